// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub const CRATE_NAME: &str = "taskdeck-api";

mod dto;
mod error_mapping;
mod errors;
mod params;

pub use dto::{TaskDto, TaskListDto};
pub use error_mapping::map_error;
pub use errors::{ApiError, ApiErrorKind, FieldViolation};
pub use params::{parse_create_payload, parse_id_segment, parse_update_payload};
