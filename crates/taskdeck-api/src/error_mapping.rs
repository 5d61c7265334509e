// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorKind};

/// Kind → HTTP status. Client faults map to 4xx, everything the caller
/// cannot fix maps to 500.
#[must_use]
pub fn map_error(error: &ApiError) -> u16 {
    match error.kind {
        ApiErrorKind::ValidationError | ApiErrorKind::ConstraintError => 400,
        ApiErrorKind::NotFoundError => 404,
        ApiErrorKind::StorageError | ApiErrorKind::UnknownError => 500,
    }
}
