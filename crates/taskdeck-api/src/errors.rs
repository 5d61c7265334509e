// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Every failure in the system collapses to one of these kinds before it
/// reaches the wire. The serialized name is the `error` field of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    ValidationError,
    NotFoundError,
    ConstraintError,
    StorageError,
    UnknownError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Uniform wire-level error body: `{error, message, details?}`.
/// `details` is populated only for `ValidationError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    #[serde(rename = "error")]
    pub kind: ApiErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl ApiError {
    #[must_use]
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn validation_failed(violations: Vec<FieldViolation>) -> Self {
        Self {
            kind: ApiErrorKind::ValidationError,
            message: "validation failed".to_string(),
            details: Some(violations),
        }
    }

    #[must_use]
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::validation_failed(vec![FieldViolation::new(field, message)])
    }

    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::new(ApiErrorKind::NotFoundError, format!("task {id} not found"))
    }

    #[must_use]
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::ConstraintError, message)
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::StorageError, message)
    }

    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::UnknownError, message)
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}
