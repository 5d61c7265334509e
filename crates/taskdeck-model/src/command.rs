// SPDX-License-Identifier: Apache-2.0

use crate::task::Title;

/// Canonical create command: the validated, normalized shape of a
/// `POST /tasks` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    pub title: Title,
    pub description: Option<String>,
    pub completed: bool,
}

/// Canonical partial update command. Only the fields actually supplied
/// by the caller are `Some`. The outer option on `description`
/// distinguishes "field absent" from an explicit `null` that clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTask {
    pub title: Option<Title>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl UpdateTask {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_command_is_empty_only_when_no_field_is_supplied() {
        assert!(UpdateTask::default().is_empty());
        assert!(!UpdateTask {
            completed: Some(false),
            ..UpdateTask::default()
        }
        .is_empty());
        // An explicit null description counts as a supplied field.
        assert!(!UpdateTask {
            description: Some(None),
            ..UpdateTask::default()
        }
        .is_empty());
    }
}
