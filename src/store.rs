//! The entity store: owns the active session's task and notification
//! collections, applies mutations, and mirrors every change into the blob
//! store before returning.
//!
//! Failure policy: when the blob write for a mutation fails, the in-memory
//! change is rolled back and the error returned, so memory never diverges
//! from durable state. Notification side-effect notices are best-effort: a
//! failed notice write is logged and dropped without failing the task
//! mutation that produced it.

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::dates;
use crate::error::{Error, Result};
use crate::notification::{Notification, NotificationKind};
use crate::query::TaskQuery;
use crate::session::User;
use crate::stats::{self, TaskStats};
use crate::storage::{notifications_key, tasks_key, BlobStore, SESSION_KEY};
use crate::task::{sample_tasks, Priority, Task, TaskDraft, TaskPatch};

/// Entity store for one logical user session.
///
/// Single writer by construction: mutations take `&mut self` and run to
/// completion. Derived views are pure reads over the current snapshot.
#[derive(Debug)]
pub struct Store<B: BlobStore> {
    blobs: B,
    config: Config,
    user: Option<User>,
    tasks: Vec<Task>,
    notifications: Vec<Notification>,
}

impl<B: BlobStore> Store<B> {
    /// Create a store with no active session.
    pub fn new(blobs: B, config: Config) -> Self {
        Self {
            blobs,
            config,
            user: None,
            tasks: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Create a store and restore a persisted session, if any.
    pub fn open(blobs: B, config: Config) -> Result<Self> {
        let mut store = Self::new(blobs, config);
        if let Some(user) = store.read_blob_or_discard::<User>(SESSION_KEY)? {
            debug!(owner = %user.id, "restoring persisted session");
            store.user = Some(user);
            store.load_collections()?;
        }
        Ok(store)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn blobs_mut(&mut self) -> &mut B {
        &mut self.blobs
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Mock login: any password is accepted, the display name comes from the
    /// email local part.
    pub fn login(&mut self, email: &str, _password: &str) -> Result<User> {
        let user = User::from_login(email)?;
        self.start_session(user)
    }

    /// Mock registration with an explicit display name.
    pub fn register(&mut self, name: &str, email: &str, _password: &str) -> Result<User> {
        let user = User::from_registration(name, email)?;
        self.start_session(user)
    }

    /// End the session: drop the session blob and empty the in-memory
    /// collections. The owner's task/notification blobs stay durable.
    pub fn logout(&mut self) -> Result<()> {
        self.blobs.remove(SESSION_KEY)?;
        if let Some(user) = self.user.take() {
            debug!(owner = %user.id, "session ended");
        }
        self.tasks.clear();
        self.notifications.clear();
        Ok(())
    }

    fn start_session(&mut self, user: User) -> Result<User> {
        // Persist the session first: a failed write leaves the previous
        // session (if any) fully intact.
        self.blobs.write_json(SESSION_KEY, &user)?;
        debug!(owner = %user.id, email = %user.email, "session started");
        self.user = Some(user.clone());
        self.load_collections()?;
        Ok(user)
    }

    /// Swap the visible collections to the active owner's, seeding a
    /// first-time owner with sample tasks when configured.
    ///
    /// The old collections are dropped before any read: a failed load must
    /// leave the store empty, never showing another owner's tasks under the
    /// new session.
    fn load_collections(&mut self) -> Result<()> {
        self.tasks.clear();
        self.notifications.clear();

        let owner_id = match &self.user {
            Some(user) => user.id.clone(),
            None => return Ok(()),
        };

        self.tasks = match self.read_blob_or_discard::<Vec<Task>>(&tasks_key(&owner_id))? {
            Some(tasks) => tasks,
            None if self.config.seed_sample_tasks => {
                let seeded = sample_tasks(&owner_id);
                if let Err(err) = self.blobs.write_json(&tasks_key(&owner_id), &seeded) {
                    warn!(owner = %owner_id, %err, "failed to persist sample tasks");
                }
                seeded
            }
            None => Vec::new(),
        };

        self.notifications = self
            .read_blob_or_discard::<Vec<Notification>>(&notifications_key(&owner_id))?
            .unwrap_or_default();

        debug!(
            owner = %owner_id,
            tasks = self.tasks.len(),
            notifications = self.notifications.len(),
            "collections loaded"
        );
        Ok(())
    }

    /// Read a JSON blob, discarding (with a warning) a stored value that no
    /// longer deserializes. Losing a corrupt cache beats refusing login.
    fn read_blob_or_discard<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.blobs.read_json::<T>(key) {
            Ok(value) => Ok(value),
            Err(Error::Json(err)) => {
                warn!(key, %err, "discarding corrupt blob");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn owner_id(&self) -> Result<String> {
        self.user
            .as_ref()
            .map(|user| user.id.clone())
            .ok_or(Error::NoActiveSession)
    }

    // =========================================================================
    // Task mutations
    // =========================================================================

    /// Create a task owned by the active user. Returns the stored task.
    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task> {
        let owner_id = self.owner_id()?;
        draft.validate()?;

        let task = draft.into_task(&owner_id, Utc::now());
        self.tasks.push(task.clone());

        if let Err(err) = self.persist_tasks(&owner_id) {
            self.tasks.pop();
            return Err(err);
        }

        self.push_notice(Notification::task_added(&task));
        Ok(task)
    }

    /// Merge a partial update into an existing task.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let owner_id = self.owner_id()?;
        patch.validate()?;

        let index = self.task_index(id)?;
        let previous = self.tasks[index].clone();
        patch.apply(&mut self.tasks[index], Utc::now());

        if let Err(err) = self.persist_tasks(&owner_id) {
            self.tasks[index] = previous;
            return Err(err);
        }

        let task = self.tasks[index].clone();
        self.push_notice(Notification::task_updated(&task));
        Ok(task)
    }

    /// Remove a task permanently.
    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        let owner_id = self.owner_id()?;

        let index = self.task_index(id)?;
        let removed = self.tasks.remove(index);

        if let Err(err) = self.persist_tasks(&owner_id) {
            self.tasks.insert(index, removed);
            return Err(err);
        }

        self.push_notice(Notification::task_deleted(&removed));
        Ok(())
    }

    /// Flip a task's completion state.
    pub fn toggle_completion(&mut self, id: &str) -> Result<Task> {
        let owner_id = self.owner_id()?;

        let index = self.task_index(id)?;
        let previous = self.tasks[index].clone();
        self.tasks[index].completed = !previous.completed;
        self.tasks[index].updated_at = Utc::now();

        if let Err(err) = self.persist_tasks(&owner_id) {
            self.tasks[index] = previous;
            return Err(err);
        }

        let task = self.tasks[index].clone();
        self.push_notice(Notification::task_toggled(&task));
        Ok(task)
    }

    fn task_index(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| {
                warn!(task = id, "mutation targeted a missing task");
                Error::TaskNotFound(id.to_string())
            })
    }

    fn persist_tasks(&mut self, owner_id: &str) -> Result<()> {
        self.blobs.write_json(&tasks_key(owner_id), &self.tasks)
    }

    // =========================================================================
    // Task reads / derived views
    // =========================================================================

    /// Snapshot of the active owner's tasks.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks due on an exact calendar day, ignoring time-of-day.
    pub fn tasks_due_on(&self, date: NaiveDate) -> Vec<&Task> {
        dates::tasks_due_on(&self.tasks, date)
    }

    pub fn tasks_with_priority(&self, priority: Priority) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.priority == priority)
            .collect()
    }

    /// Monthly stats with "overdue" measured against the real current day.
    pub fn stats_for_month(&self, month: NaiveDate) -> TaskStats {
        stats::compute_stats(&self.tasks, month, Utc::now().date_naive())
    }

    /// Run a filter/sort query over the current snapshot.
    pub fn query(&self, query: &TaskQuery) -> Vec<Task> {
        query.run(&self.tasks)
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Visible notifications, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Add a notification for the active owner.
    pub fn add_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Result<Notification> {
        let owner_id = self.owner_id()?;
        let notice = Notification::new(message, kind, &owner_id);

        self.notifications.insert(0, notice.clone());
        if let Err(err) = self.persist_notifications(&owner_id) {
            self.notifications.remove(0);
            return Err(err);
        }
        Ok(notice)
    }

    pub fn mark_notification_read(&mut self, id: &str) -> Result<()> {
        let owner_id = self.owner_id()?;
        let index = self.notification_index(id)?;
        if self.notifications[index].read {
            return Ok(());
        }

        self.notifications[index].read = true;
        if let Err(err) = self.persist_notifications(&owner_id) {
            self.notifications[index].read = false;
            return Err(err);
        }
        Ok(())
    }

    pub fn mark_all_notifications_read(&mut self) -> Result<()> {
        let owner_id = self.owner_id()?;
        let previous = self.notifications.clone();

        for notice in &mut self.notifications {
            notice.read = true;
        }
        if let Err(err) = self.persist_notifications(&owner_id) {
            self.notifications = previous;
            return Err(err);
        }
        Ok(())
    }

    pub fn delete_notification(&mut self, id: &str) -> Result<()> {
        let owner_id = self.owner_id()?;
        let index = self.notification_index(id)?;
        let removed = self.notifications.remove(index);

        if let Err(err) = self.persist_notifications(&owner_id) {
            self.notifications.insert(index, removed);
            return Err(err);
        }
        Ok(())
    }

    pub fn clear_notifications(&mut self) -> Result<()> {
        let owner_id = self.owner_id()?;
        let previous = std::mem::take(&mut self.notifications);

        if let Err(err) = self.persist_notifications(&owner_id) {
            self.notifications = previous;
            return Err(err);
        }
        Ok(())
    }

    fn notification_index(&self, id: &str) -> Result<usize> {
        self.notifications
            .iter()
            .position(|notice| notice.id == id)
            .ok_or_else(|| {
                warn!(notification = id, "mutation targeted a missing notification");
                Error::NotificationNotFound(id.to_string())
            })
    }

    fn persist_notifications(&mut self, owner_id: &str) -> Result<()> {
        self.blobs
            .write_json(&notifications_key(owner_id), &self.notifications)
    }

    /// Best-effort side-effect notice for a committed task mutation.
    fn push_notice(&mut self, notice: Notification) {
        let owner_id = notice.owner_id.clone();
        self.notifications.insert(0, notice);
        if let Err(err) = self.persist_notifications(&owner_id) {
            warn!(owner = %owner_id, %err, "dropping notification after failed write");
            self.notifications.remove(0);
        }
    }
}
