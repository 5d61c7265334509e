// SPDX-License-Identifier: Apache-2.0

use crate::errors::{ApiError, FieldViolation};
use serde_json::{Map, Value};
use taskdeck_model::{CreateTask, TaskId, Title, UpdateTask, TITLE_MAX_LEN};

/// Per-field constraint, held as data and evaluated by [`check_field`].
/// There is no cross-field logic, so the whole pipeline is a fold over
/// this table collecting violations.
#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// String, trimmed before the emptiness/length checks.
    TrimmedText { max: usize },
    /// String or an explicit `null`.
    NullableText,
    /// Boolean.
    Flag,
}

#[derive(Debug, Clone, Copy)]
struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    required: bool,
}

const TASK_FIELDS: [FieldRule; 3] = [
    FieldRule {
        name: "title",
        kind: FieldKind::TrimmedText { max: TITLE_MAX_LEN },
        required: true,
    },
    FieldRule {
        name: "description",
        kind: FieldKind::NullableText,
        required: false,
    },
    FieldRule {
        name: "completed",
        kind: FieldKind::Flag,
        required: false,
    },
];

fn check_field(rule: &FieldRule, value: Option<&Value>, violations: &mut Vec<FieldViolation>) {
    let Some(value) = value else {
        if rule.required {
            violations.push(FieldViolation::new(rule.name, "is required"));
        }
        return;
    };
    match rule.kind {
        FieldKind::TrimmedText { max } => match value.as_str() {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    violations.push(FieldViolation::new(rule.name, "must not be empty"));
                } else if trimmed.chars().count() > max {
                    violations.push(FieldViolation::new(
                        rule.name,
                        format!("must be at most {max} characters"),
                    ));
                }
            }
            None => violations.push(FieldViolation::new(rule.name, "must be a string")),
        },
        FieldKind::NullableText => {
            if !value.is_string() && !value.is_null() {
                violations.push(FieldViolation::new(rule.name, "must be a string or null"));
            }
        }
        FieldKind::Flag => {
            if !value.is_boolean() {
                violations.push(FieldViolation::new(rule.name, "must be a boolean"));
            }
        }
    }
}

fn check_rules(
    object: &Map<String, Value>,
    rules: &[FieldRule],
    require_present: bool,
) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    for rule in rules {
        let rule = FieldRule {
            required: require_present && rule.required,
            ..*rule
        };
        check_field(&rule, object.get(rule.name), &mut violations);
    }
    violations
}

fn require_object(payload: &Value) -> Result<&Map<String, Value>, ApiError> {
    payload
        .as_object()
        .ok_or_else(|| ApiError::invalid_field("body", "payload must be a JSON object"))
}

/// Validates and normalizes a create payload into the canonical command.
/// Unrecognized fields are ignored. All violations are reported together.
pub fn parse_create_payload(payload: &Value) -> Result<CreateTask, ApiError> {
    let object = require_object(payload)?;
    let violations = check_rules(object, &TASK_FIELDS, true);
    if !violations.is_empty() {
        return Err(ApiError::validation_failed(violations));
    }

    let title = object
        .get("title")
        .and_then(Value::as_str)
        .map(Title::parse)
        .transpose()
        .map_err(|e| ApiError::invalid_field("title", e.to_string()))?
        .ok_or_else(|| ApiError::invalid_field("title", "is required"))?;
    // An explicit `null` description on create is the same as omitting it.
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let completed = object
        .get("completed")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(CreateTask {
        title,
        description,
        completed,
    })
}

/// Validates a partial update payload. Per-field rules match create, but
/// nothing is individually required; the payload must supply at least one
/// recognized field.
pub fn parse_update_payload(payload: &Value) -> Result<UpdateTask, ApiError> {
    let object = require_object(payload)?;
    let violations = check_rules(object, &TASK_FIELDS, false);
    if !violations.is_empty() {
        return Err(ApiError::validation_failed(violations));
    }

    let title = object
        .get("title")
        .and_then(Value::as_str)
        .map(Title::parse)
        .transpose()
        .map_err(|e| ApiError::invalid_field("title", e.to_string()))?;
    // `description: null` clears the stored value; absence leaves it alone.
    let description = object
        .get("description")
        .map(|v| v.as_str().map(str::to_string));
    let completed = object.get("completed").and_then(Value::as_bool);

    let command = UpdateTask {
        title,
        description,
        completed,
    };
    if command.is_empty() {
        return Err(ApiError::invalid_field(
            "body",
            "at least one of title, description, completed must be supplied",
        ));
    }
    Ok(command)
}

/// Parses a path id segment, mapping model-level rejections to the wire
/// error shape under the `id` field.
pub fn parse_id_segment(raw: &str) -> Result<TaskId, ApiError> {
    TaskId::parse(raw).map_err(|e| ApiError::invalid_field("id", e.to_string()))
}
