//! In-app notifications emitted as task-mutation side effects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::task::Task;

const NOTIFICATION_ID_PREFIX: &str = "notification_";

/// Notice severity, mapped by the UI to toast styling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub owner_id: String,
}

impl Notification {
    pub fn new(
        message: impl Into<String>,
        kind: NotificationKind,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{}{}", NOTIFICATION_ID_PREFIX, Uuid::new_v4().simple()),
            message: message.into(),
            kind,
            read: false,
            created_at: Utc::now(),
            owner_id: owner_id.into(),
        }
    }

    // Notice texts for each task mutation.

    pub(crate) fn task_added(task: &Task) -> Self {
        Self::new(
            format!("New task \"{}\" has been added.", task.title),
            NotificationKind::Success,
            &task.owner_id,
        )
    }

    pub(crate) fn task_updated(task: &Task) -> Self {
        Self::new(
            format!("Task \"{}\" has been updated.", task.title),
            NotificationKind::Info,
            &task.owner_id,
        )
    }

    pub(crate) fn task_deleted(task: &Task) -> Self {
        Self::new(
            format!("Task \"{}\" has been deleted.", task.title),
            NotificationKind::Warning,
            &task.owner_id,
        )
    }

    pub(crate) fn task_toggled(task: &Task) -> Self {
        // Kind reflects the state after the flip.
        let (status, kind) = if task.completed {
            ("completed", NotificationKind::Success)
        } else {
            ("marked as incomplete", NotificationKind::Info)
        };
        Self::new(
            format!("Task \"{}\" has been {}.", task.title, status),
            kind,
            &task.owner_id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskDraft};

    #[test]
    fn toggle_notice_tracks_new_state() {
        let now = Utc::now();
        let mut task = TaskDraft::new("Ship release", now, Priority::High).into_task("user_1", now);

        task.completed = true;
        let done = Notification::task_toggled(&task);
        assert_eq!(done.kind, NotificationKind::Success);
        assert!(done.message.contains("has been completed"));

        task.completed = false;
        let undone = Notification::task_toggled(&task);
        assert_eq!(undone.kind, NotificationKind::Info);
        assert!(undone.message.contains("marked as incomplete"));
    }

    #[test]
    fn kind_serializes_as_type_field() {
        let notice = Notification::new("hello", NotificationKind::Warning, "user_1");
        let json = serde_json::to_string(&notice).expect("serialize");
        assert!(json.contains("\"type\":\"warning\""));
        assert!(json.contains("\"ownerId\":\"user_1\""));
    }
}
