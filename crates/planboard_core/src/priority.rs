//! Display ordering for tasks and to-do items.
//!
//! Tasks are triaged into buckets: work in progress first, then pending work
//! that starts this month, then later pending work, then delayed, completed
//! and cancelled. Inside a bucket the earlier start wins. To-dos order by due
//! date and fall back to their priority level on equal dates.
//!
//! Ordering is derived; nothing here mutates the records. The clock is always
//! passed in.

use crate::dates::{end_of_month, parse_timestamp};
use crate::error::AppError;
use crate::model::{Task, TaskStatus, TodoItem};
use log::debug;
use time::{Date, OffsetDateTime, UtcOffset};

pub const BUCKET_IN_PROGRESS: u8 = 0;
pub const BUCKET_PENDING_THIS_MONTH: u8 = 1;
pub const BUCKET_PENDING_LATER: u8 = 2;
pub const BUCKET_DELAYED: u8 = 3;
pub const BUCKET_COMPLETED: u8 = 4;
pub const BUCKET_CANCELLED: u8 = 5;
pub const BUCKET_UNMATCHED: u8 = 6;

/// The calendar frame a sort runs against, derived from one `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityWindow {
    pub today: Date,
    pub end_of_month: Date,
    pub offset: UtcOffset,
}

impl PriorityWindow {
    pub fn at(now: OffsetDateTime) -> Self {
        let today = now.date();
        Self {
            today,
            end_of_month: end_of_month(today),
            offset: now.offset(),
        }
    }
}

/// Something that can be ranked for display.
pub trait DisplayPriority {
    type Key: Ord;

    fn priority_key(&self, window: &PriorityWindow) -> Result<Self::Key, AppError>;
}

impl DisplayPriority for Task {
    type Key = (u8, OffsetDateTime);

    fn priority_key(&self, window: &PriorityWindow) -> Result<Self::Key, AppError> {
        let reference = parse_timestamp(
            &self.start_date_time,
            window.offset,
            &format!("task {} start_date_time", self.id),
        )?;
        Ok((task_bucket(self.status, reference.date(), window), reference))
    }
}

impl DisplayPriority for TodoItem {
    type Key = (OffsetDateTime, u8);

    fn priority_key(&self, window: &PriorityWindow) -> Result<Self::Key, AppError> {
        let due = parse_timestamp(
            &self.due_date,
            window.offset,
            &format!("todo {} due_date", self.id),
        )?;
        Ok((due, self.priority.rank()))
    }
}

/// Bucket for a task whose reference date (in the window's offset) is `reference`.
///
/// Pending work that started before today matches no rule and lands in
/// [`BUCKET_UNMATCHED`].
pub fn task_bucket(status: TaskStatus, reference: Date, window: &PriorityWindow) -> u8 {
    match status {
        TaskStatus::InProgress => BUCKET_IN_PROGRESS,
        TaskStatus::Pending if reference >= window.today && reference <= window.end_of_month => {
            BUCKET_PENDING_THIS_MONTH
        }
        TaskStatus::Pending if reference > window.end_of_month => BUCKET_PENDING_LATER,
        TaskStatus::Delayed => BUCKET_DELAYED,
        TaskStatus::Completed => BUCKET_COMPLETED,
        TaskStatus::Cancelled => BUCKET_CANCELLED,
        TaskStatus::Pending => BUCKET_UNMATCHED,
    }
}

/// Returns `items` in display order. Stable: equal keys keep their input order.
pub fn sort_for_display<T>(items: &[T], now: OffsetDateTime) -> Result<Vec<T>, AppError>
where
    T: DisplayPriority + Clone,
{
    let window = PriorityWindow::at(now);
    let mut keyed = items
        .iter()
        .map(|item| Ok((item.priority_key(&window)?, item)))
        .collect::<Result<Vec<_>, AppError>>()?;
    keyed.sort_by(|left, right| left.0.cmp(&right.0));

    debug!(
        "event=priority_sort module=priority items={} today={}",
        keyed.len(),
        window.today
    );
    Ok(keyed.into_iter().map(|(_, item)| item.clone()).collect())
}

pub fn sort_tasks(tasks: &[Task], now: OffsetDateTime) -> Result<Vec<Task>, AppError> {
    sort_for_display(tasks, now)
}

pub fn sort_todos(todos: &[TodoItem], now: OffsetDateTime) -> Result<Vec<TodoItem>, AppError> {
    sort_for_display(todos, now)
}
