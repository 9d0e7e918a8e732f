use crate::dates::parse_timestamp;
use crate::error::AppError;
use crate::model::{Task, TaskStatus, TodoItem, TodoKind, TodoStatus};
use time::{Date, UtcOffset};

/// Narrows a task list before it is ordered.
///
/// `from` and `to` are inclusive calendar days in the viewer's offset, so a
/// task starting at 23:59 on `to` is still kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub kind: Option<TodoKind>,
    pub status: Option<TodoStatus>,
}

pub fn filter_tasks(
    tasks: &[Task],
    filter: &TaskFilter,
    offset: UtcOffset,
) -> Result<Vec<Task>, AppError> {
    if let (Some(from), Some(to)) = (filter.from, filter.to)
        && from > to
    {
        return Err(AppError::invalid_input("from date must not be after to date"));
    }

    let mut filtered = Vec::new();
    for task in tasks {
        if filter.status.is_some_and(|status| status != task.status) {
            continue;
        }

        if filter.from.is_some() || filter.to.is_some() {
            let start = parse_timestamp(
                &task.start_date_time,
                offset,
                &format!("task {} start_date_time", task.id),
            )?
            .date();
            if filter.from.is_some_and(|from| start < from) {
                continue;
            }
            if filter.to.is_some_and(|to| start > to) {
                continue;
            }
        }

        filtered.push(task.clone());
    }

    Ok(filtered)
}

pub fn filter_todos(todos: &[TodoItem], filter: &TodoFilter) -> Vec<TodoItem> {
    todos
        .iter()
        .filter(|todo| filter.kind.is_none_or(|kind| kind == todo.kind))
        .filter(|todo| filter.status.is_none_or(|status| status == todo.status))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{TaskFilter, TodoFilter, filter_tasks, filter_todos};
    use crate::model::{Task, TaskStatus, TodoItem, TodoKind, TodoPriority, TodoStatus};
    use time::UtcOffset;
    use time::macros::date;

    fn task(id: &str, status: TaskStatus, start: &str) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: None,
            status,
            start_date_time: start.to_string(),
            activity_id: None,
            progress: Vec::new(),
        }
    }

    fn todo(id: &str, kind: TodoKind, status: TodoStatus) -> TodoItem {
        TodoItem {
            id: id.to_string(),
            title: format!("todo {id}"),
            description: None,
            due_date: "2024-06-01".to_string(),
            kind,
            priority: TodoPriority::Medium,
            status,
        }
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let tasks = vec![
            task("t-1", TaskStatus::Pending, "2024-06-01T09:00:00Z"),
            task("t-2", TaskStatus::Completed, "not parsed without dates"),
        ];

        let filtered = filter_tasks(&tasks, &TaskFilter::default(), UtcOffset::UTC).unwrap();
        assert_eq!(filtered, tasks);
    }

    #[test]
    fn status_filter_matches_exactly() {
        let tasks = vec![
            task("t-1", TaskStatus::Pending, "2024-06-01T09:00:00Z"),
            task("t-2", TaskStatus::Delayed, "2024-06-01T09:00:00Z"),
        ];
        let filter = TaskFilter {
            status: Some(TaskStatus::Delayed),
            ..TaskFilter::default()
        };

        let filtered = filter_tasks(&tasks, &filter, UtcOffset::UTC).unwrap();

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "t-2");
    }

    #[test]
    fn date_range_is_inclusive_of_whole_days() {
        let tasks = vec![
            task("before", TaskStatus::Pending, "2024-05-31T23:59:59Z"),
            task("first-day", TaskStatus::Pending, "2024-06-01T00:00:00Z"),
            task("last-day", TaskStatus::Pending, "2024-06-10T23:59:00Z"),
            task("after", TaskStatus::Pending, "2024-06-11T00:00:00Z"),
        ];
        let filter = TaskFilter {
            status: None,
            from: Some(date!(2024-06-01)),
            to: Some(date!(2024-06-10)),
        };

        let filtered = filter_tasks(&tasks, &filter, UtcOffset::UTC).unwrap();
        let ids: Vec<&str> = filtered.iter().map(|task| task.id.as_str()).collect();

        assert_eq!(ids, vec!["first-day", "last-day"]);
    }

    #[test]
    fn date_range_uses_viewer_offset() {
        let tasks = vec![task("t-1", TaskStatus::Pending, "2024-06-10T20:00:00Z")];
        let filter = TaskFilter {
            status: None,
            from: None,
            to: Some(date!(2024-06-10)),
        };
        let bangkok = UtcOffset::from_hms(7, 0, 0).unwrap();

        let filtered = filter_tasks(&tasks, &filter, bangkok).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn reversed_range_is_rejected() {
        let filter = TaskFilter {
            status: None,
            from: Some(date!(2024-06-10)),
            to: Some(date!(2024-06-01)),
        };

        let err = filter_tasks(&[], &filter, UtcOffset::UTC).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn todo_filter_combines_kind_and_status() {
        let todos = vec![
            todo("d-1", TodoKind::Daily, TodoStatus::Pending),
            todo("d-2", TodoKind::Weekly, TodoStatus::Pending),
            todo("d-3", TodoKind::Weekly, TodoStatus::Completed),
        ];
        let filter = TodoFilter {
            kind: Some(TodoKind::Weekly),
            status: Some(TodoStatus::Pending),
        };

        let filtered = filter_todos(&todos, &filter);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "d-2");
    }
}
