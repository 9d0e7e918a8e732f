use crate::dates::{format_timestamp, parse_timestamp};
use crate::error::AppError;
use crate::model::{ProgressEntry, Task, TaskStatus};
use log::debug;
use time::{OffsetDateTime, UtcOffset};

pub const FULL_PERCENT: u8 = 100;

/// Percent of the most recently recorded entry, or 0 when nothing was recorded.
///
/// Entries sharing a timestamp resolve to the one recorded last.
pub fn latest_progress(task: &Task) -> Result<u8, AppError> {
    let mut latest: Option<(OffsetDateTime, u8)> = None;
    for entry in &task.progress {
        let created_at = parse_timestamp(
            &entry.created_at,
            UtcOffset::UTC,
            &format!("task {} progress created_at", task.id),
        )?;
        if latest.is_none_or(|(seen, _)| created_at >= seen) {
            latest = Some((created_at, entry.percent_complete));
        }
    }

    Ok(latest.map(|(_, percent)| percent).unwrap_or(0))
}

/// Appends a progress entry and moves the task along its lifecycle.
///
/// Reaching 100% completes the task; any progress on a pending task starts it.
pub fn record_progress(
    task: &mut Task,
    description: &str,
    percent_complete: u8,
    now: OffsetDateTime,
) -> Result<ProgressEntry, AppError> {
    if percent_complete > FULL_PERCENT {
        return Err(AppError::invalid_input(
            "percent_complete must be between 0 and 100",
        ));
    }

    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("description is required"));
    }

    let entry = ProgressEntry {
        description: trimmed.to_string(),
        percent_complete,
        created_at: format_timestamp(now)?,
    };
    task.progress.push(entry.clone());

    let previous = task.status;
    if percent_complete == FULL_PERCENT {
        task.status = TaskStatus::Completed;
    } else if percent_complete > 0 && task.status == TaskStatus::Pending {
        task.status = TaskStatus::InProgress;
    }

    debug!(
        "event=progress_recorded module=progress task_id={} percent={} status_from={} status_to={}",
        task.id,
        percent_complete,
        previous.label(),
        task.status.label()
    );
    Ok(entry)
}
