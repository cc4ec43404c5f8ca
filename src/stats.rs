//! Monthly task statistics.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::dates;
use crate::task::{Priority, Task};

/// Aggregated counts over the tasks due in one month.
///
/// Serialized camelCase for the analytics view.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub total_tasks: usize,
    pub completion_rate: f64,
    pub high_priority_count: usize,
    pub medium_priority_count: usize,
    pub low_priority_count: usize,
}

/// Compute stats over the tasks due in `month`'s year and month.
///
/// Only the year and month of `month` matter for the filter; `today` is the
/// true current day and feeds the overdue count alone.
pub fn compute_stats(tasks: &[Task], month: NaiveDate, today: NaiveDate) -> TaskStats {
    let in_month: Vec<&Task> = tasks
        .iter()
        .filter(|task| {
            let due = dates::due_day(task);
            due.year() == month.year() && due.month() == month.month()
        })
        .collect();

    let total_tasks = in_month.len();
    let completed = in_month.iter().filter(|task| task.completed).count();
    let pending = total_tasks - completed;
    let overdue = in_month
        .iter()
        .filter(|task| dates::is_overdue(task, today))
        .count();

    let count_priority = |priority: Priority| {
        in_month
            .iter()
            .filter(|task| task.priority == priority)
            .count()
    };

    let completion_rate = if total_tasks == 0 {
        0.0
    } else {
        completed as f64 / total_tasks as f64 * 100.0
    };

    TaskStats {
        completed,
        pending,
        overdue,
        total_tasks,
        completion_rate,
        high_priority_count: count_priority(Priority::High),
        medium_priority_count: count_priority(Priority::Medium),
        low_priority_count: count_priority(Priority::Low),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;
    use chrono::{TimeZone, Utc};

    fn task(title: &str, priority: Priority, y: i32, m: u32, d: u32, completed: bool) -> Task {
        let due = Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        let mut task = TaskDraft::new(title, due, priority).into_task("user_1", Utc::now());
        task.completed = completed;
        task
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_month_yields_zero_rate() {
        let stats = compute_stats(&[], day(2024, 6, 1), day(2024, 6, 15));
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn two_task_june_scenario() {
        let tasks = vec![
            task("A", Priority::High, 2024, 6, 1, false),
            task("B", Priority::Low, 2024, 6, 15, true),
        ];

        // Evaluated before 2024-06-01 passes: nothing overdue yet.
        let stats = compute_stats(&tasks, day(2024, 6, 1), day(2024, 5, 20));
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.completion_rate, 50.0);
        assert_eq!(stats.high_priority_count, 1);
        assert_eq!(stats.medium_priority_count, 0);
        assert_eq!(stats.low_priority_count, 1);
        assert_eq!(stats.overdue, 0);

        // Evaluated mid-month: A is past due and pending.
        let stats = compute_stats(&tasks, day(2024, 6, 1), day(2024, 6, 10));
        assert_eq!(stats.overdue, 1);
    }

    #[test]
    fn day_of_month_is_ignored_for_the_filter() {
        let tasks = vec![task("A", Priority::Medium, 2024, 6, 28, false)];

        let from_first = compute_stats(&tasks, day(2024, 6, 1), day(2024, 5, 1));
        let from_last = compute_stats(&tasks, day(2024, 6, 30), day(2024, 5, 1));
        assert_eq!(from_first, from_last);
        assert_eq!(from_first.total_tasks, 1);

        // Same month number in a different year stays out.
        let other_year = compute_stats(&tasks, day(2023, 6, 1), day(2024, 5, 1));
        assert_eq!(other_year.total_tasks, 0);
    }

    #[test]
    fn counts_partition_the_filtered_set() {
        let tasks = vec![
            task("A", Priority::High, 2024, 6, 1, false),
            task("B", Priority::High, 2024, 6, 2, true),
            task("C", Priority::Medium, 2024, 6, 3, true),
            task("D", Priority::Low, 2024, 7, 1, false),
        ];
        let stats = compute_stats(&tasks, day(2024, 6, 1), day(2024, 6, 15));

        assert_eq!(stats.completed + stats.pending, stats.total_tasks);
        assert!(stats.completion_rate >= 0.0 && stats.completion_rate <= 100.0);
        assert_eq!(
            stats.high_priority_count + stats.medium_priority_count + stats.low_priority_count,
            stats.total_tasks
        );
    }
}
