//! Task records and input shapes.
//!
//! Tasks serialize with camelCase keys and ISO-8601 dates so the blobs stay
//! byte-compatible with collections written by earlier builds.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

const TASK_ID_PREFIX: &str = "task_";

/// Task priority, ordered high to low for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    pub priority: Priority,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the caller supplies when creating a task. Everything else is
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date,
            priority,
            completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Reject drafts the form layer should already have caught.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".to_string()));
        }
        Ok(())
    }

    pub(crate) fn into_task(self, owner_id: &str, now: DateTime<Utc>) -> Task {
        Task {
            id: generate_task_id(),
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            completed: self.completed,
            priority: self.priority,
            owner_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update: only the present fields are merged into the task.
/// Id, owner, and created_at are never patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(Error::Validation("title must not be empty".to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn apply(self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        task.updated_at = now;
    }
}

pub(crate) fn generate_task_id() -> String {
    format!("{}{}", TASK_ID_PREFIX, Uuid::new_v4().simple())
}

/// Starter collection for an owner logging in with no stored tasks.
pub fn sample_tasks(owner_id: &str) -> Vec<Task> {
    let now = Utc::now();
    let next_month = now + Duration::days(30);
    vec![
        TaskDraft::new("Complete project proposal", next_month, Priority::High)
            .with_description("Finalize the project proposal for the client meeting")
            .into_task(owner_id, now),
        TaskDraft::new("Weekly team meeting", now, Priority::Medium)
            .with_description("Discuss project progress and assign tasks for the next sprint")
            .into_task(owner_id, now),
        {
            let mut done = TaskDraft::new("Update documentation", next_month, Priority::Low)
                .with_description("Update the project documentation with recent changes")
                .into_task(owner_id, now);
            done.completed = true;
            done
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_rejects_blank_title() {
        let draft = TaskDraft::new("   ", Utc::now(), Priority::Medium);
        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let now = Utc::now();
        let mut task = TaskDraft::new("Write report", now, Priority::Low)
            .with_description("Quarterly numbers")
            .into_task("user_1", now);

        let later = now + Duration::minutes(5);
        TaskPatch::default()
            .priority(Priority::High)
            .apply(&mut task, later);

        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.title, "Write report");
        assert_eq!(task.description, "Quarterly numbers");
        assert_eq!(task.updated_at, later);
        assert_eq!(task.created_at, now);
    }

    #[test]
    fn serialized_keys_are_camel_case() {
        let now = Utc::now();
        let task = TaskDraft::new("A", now, Priority::High).into_task("user_1", now);
        let json = serde_json::to_string(&task).expect("serialize");
        assert!(json.contains("\"dueDate\""));
        assert!(json.contains("\"ownerId\""));
        assert!(json.contains("\"priority\":\"high\""));
    }
}
