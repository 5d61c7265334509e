// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub const CRATE_NAME: &str = "taskdeck-model";

mod command;
mod task;

pub use command::{CreateTask, UpdateTask};
pub use task::{ParseError, Task, TaskId, Title, TITLE_MAX_LEN};
