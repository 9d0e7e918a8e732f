use crate::dates::parse_timestamp;
use crate::error::AppError;
use crate::model::TodoItem;
use time::OffsetDateTime;

pub const DEFAULT_DUE_SOON_DAYS: u32 = 2;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueSignal {
    Overdue,
    DueSoon,
}

impl DueSignal {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueSoon => "due soon",
        }
    }
}

/// Flags an open to-do whose due date has passed or is within `due_soon_days`.
///
/// Days are counted by rounding the remaining time up, so anything due later
/// today is one day away.
pub fn due_signal(
    todo: &TodoItem,
    now: OffsetDateTime,
    due_soon_days: u32,
) -> Result<Option<DueSignal>, AppError> {
    if !todo.status.is_open() {
        return Ok(None);
    }

    let due = parse_timestamp(
        &todo.due_date,
        now.offset(),
        &format!("todo {} due_date", todo.id),
    )?;
    if due < now {
        return Ok(Some(DueSignal::Overdue));
    }

    let remaining = (due - now).whole_seconds();
    let days_left = (remaining + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    if days_left <= i64::from(due_soon_days) {
        Ok(Some(DueSignal::DueSoon))
    } else {
        Ok(None)
    }
}
