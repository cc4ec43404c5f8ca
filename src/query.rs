//! Task list filtering and ordering.
//!
//! The pipeline mirrors the task page controls: a free-text search, a
//! priority dropdown, and a status dropdown, combined with AND, then a
//! stable priority-then-due-date sort.

use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    #[serde(untagged)]
    Only(Priority),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// Filter set applied to a task snapshot.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub search: String,
    pub priority: PriorityFilter,
    pub status: StatusFilter,
}

impl TaskQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = PriorityFilter::Only(priority);
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// True when the task passes all three predicates.
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task) && self.matches_priority(task) && self.matches_status(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }

    fn matches_priority(&self, task: &Task) -> bool {
        match self.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == priority,
        }
    }

    fn matches_status(&self, task: &Task) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }

    /// Run the pipeline over a snapshot. The input is untouched; the output
    /// is a new, ordered vec.
    pub fn run(&self, tasks: &[Task]) -> Vec<Task> {
        let mut matched: Vec<Task> = tasks
            .iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect();
        sort_tasks(&mut matched);
        matched
    }
}

/// Stable sort: priority rank first (high before low), due date ascending as
/// the tie-break.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        left.priority
            .rank()
            .cmp(&right.priority.rank())
            .then_with(|| left.due_date.cmp(&right.due_date))
    });
}
