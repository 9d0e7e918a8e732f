mod activity;
mod task;
mod todo;

pub use activity::{Activity, ActivityCategory, YearPlan};
pub use task::{ProgressEntry, Task, TaskStatus};
pub use todo::{TodoItem, TodoKind, TodoPriority, TodoStatus};

/// Lowercases and collapses every run of non-alphanumerics into a single `_`.
///
/// `"In Progress"`, `"in-progress"` and `"IN_PROGRESS"` all become `in_progress`.
pub(crate) fn canonical_token(raw: &str) -> String {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    cleaned.trim_matches('_').to_string()
}
