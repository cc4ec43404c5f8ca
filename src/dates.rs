//! Due-date bucketing.
//!
//! All classification is calendar-day granularity: a task due today is never
//! overdue no matter how its stored time-of-day compares to the clock.
//! Every function takes the reference day explicitly so results are
//! deterministic under test.

use chrono::{Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::task::Task;

/// Calendar day a task is due on
pub fn due_day(task: &Task) -> NaiveDate {
    task.due_date.date_naive()
}

/// Strictly before `today` and still pending
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed && due_day(task) < today
}

pub fn is_due_today(task: &Task, today: NaiveDate) -> bool {
    due_day(task) == today
}

pub fn is_due_tomorrow(task: &Task, today: NaiveDate) -> bool {
    due_day(task) == today + Duration::days(1)
}

/// Due after tomorrow but still inside the week containing `today`
pub fn is_upcoming_this_week(task: &Task, today: NaiveDate, week_start: Weekday) -> bool {
    let due = due_day(task);
    due > today + Duration::days(1) && due <= today.week(week_start).last_day()
}

/// Tasks whose due date matches `date` exactly, ignoring time-of-day
pub fn tasks_due_on<'a>(tasks: &'a [Task], date: NaiveDate) -> Vec<&'a Task> {
    tasks.iter().filter(|task| due_day(task) == date).collect()
}

/// Due-date classification relative to a reference day.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    Overdue,
    Today,
    Tomorrow,
    ThisWeek,
    Later,
}

/// Classify a task for dashboard grouping.
///
/// Overdue wins over everything; completed past-due tasks fall through to
/// `Later`.
pub fn bucket(task: &Task, today: NaiveDate, week_start: Weekday) -> DueBucket {
    if is_overdue(task, today) {
        DueBucket::Overdue
    } else if is_due_today(task, today) {
        DueBucket::Today
    } else if is_due_tomorrow(task, today) {
        DueBucket::Tomorrow
    } else if is_upcoming_this_week(task, today, week_start) {
        DueBucket::ThisWeek
    } else {
        DueBucket::Later
    }
}
