use crate::dates::parse_timestamp;
use crate::error::AppError;
use crate::model::{Task, TaskStatus, TodoItem, TodoStatus, YearPlan};
use crate::priority::sort_todos;
use time::{Duration, OffsetDateTime};

pub const DEFAULT_UPCOMING_DAYS: u32 = 7;
pub const SUMMARY_LIST_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub year_plans: usize,
    pub todo_total: usize,
    pub todos_by_status: Vec<(TodoStatus, usize)>,
    /// Open to-dos due between now and the upcoming horizon, soonest first.
    pub upcoming_todos: Vec<TodoItem>,
    pub task_total: usize,
    pub tasks_by_status: Vec<(TaskStatus, usize)>,
    /// Most recently started first.
    pub in_progress_tasks: Vec<Task>,
}

pub fn summarize(
    year_plans: &[YearPlan],
    tasks: &[Task],
    todos: &[TodoItem],
    now: OffsetDateTime,
    upcoming_days: u32,
) -> Result<DashboardSummary, AppError> {
    let horizon = now
        .checked_add(Duration::days(i64::from(upcoming_days)))
        .ok_or_else(|| AppError::invalid_input("upcoming_days is out of range"))?;

    let mut upcoming = Vec::new();
    for todo in todos.iter().filter(|todo| todo.status.is_open()) {
        let due = parse_timestamp(
            &todo.due_date,
            now.offset(),
            &format!("todo {} due_date", todo.id),
        )?;
        if due >= now && due <= horizon {
            upcoming.push(todo.clone());
        }
    }
    let mut upcoming_todos = sort_todos(&upcoming, now)?;
    upcoming_todos.truncate(SUMMARY_LIST_LIMIT);

    let mut started = Vec::new();
    for task in tasks.iter().filter(|task| task.status == TaskStatus::InProgress) {
        let start = parse_timestamp(
            &task.start_date_time,
            now.offset(),
            &format!("task {} start_date_time", task.id),
        )?;
        started.push((start, task));
    }
    started.sort_by(|left, right| right.0.cmp(&left.0));
    let in_progress_tasks = started
        .into_iter()
        .take(SUMMARY_LIST_LIMIT)
        .map(|(_, task)| task.clone())
        .collect();

    Ok(DashboardSummary {
        year_plans: year_plans.len(),
        todo_total: todos.len(),
        todos_by_status: TodoStatus::ALL
            .into_iter()
            .map(|status| {
                let count = todos.iter().filter(|todo| todo.status == status).count();
                (status, count)
            })
            .collect(),
        upcoming_todos,
        task_total: tasks.len(),
        tasks_by_status: TaskStatus::ALL
            .into_iter()
            .map(|status| {
                let count = tasks.iter().filter(|task| task.status == status).count();
                (status, count)
            })
            .collect(),
        in_progress_tasks,
    })
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_UPCOMING_DAYS, SUMMARY_LIST_LIMIT, summarize};
    use crate::model::{Task, TaskStatus, TodoItem, TodoKind, TodoPriority, TodoStatus};
    use time::macros::datetime;

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

    fn todo(id: &str, due: &str, status: TodoStatus) -> TodoItem {
        TodoItem {
            id: id.to_string(),
            title: format!("todo {id}"),
            description: None,
            due_date: due.to_string(),
            kind: TodoKind::Daily,
            priority: TodoPriority::Medium,
            status,
        }
    }

    #[test]
    fn counts_every_status_even_when_zero() {
        let now = datetime!(2024-06-12 10:00 UTC);
        let tasks = vec![
            task("t-1", TaskStatus::Delayed, "2024-06-01T09:00:00Z"),
            task("t-2", TaskStatus::Delayed, "2024-06-02T09:00:00Z"),
        ];

        let summary = summarize(&[], &tasks, &[], now, DEFAULT_UPCOMING_DAYS).unwrap();

        assert_eq!(summary.task_total, 2);
        assert_eq!(summary.tasks_by_status.len(), 5);
        assert!(summary
            .tasks_by_status
            .contains(&(TaskStatus::Delayed, 2)));
        assert!(summary
            .tasks_by_status
            .contains(&(TaskStatus::Pending, 0)));
        assert_eq!(summary.todos_by_status.len(), 4);
    }

    #[test]
    fn upcoming_keeps_open_items_inside_horizon() {
        let now = datetime!(2024-06-12 10:00 UTC);
        let todos = vec![
            todo("past", "2024-06-11T10:00:00Z", TodoStatus::Pending),
            todo("later", "2024-06-18T09:00:00Z", TodoStatus::InProgress),
            todo("soon", "2024-06-13T09:00:00Z", TodoStatus::Pending),
            todo("done", "2024-06-13T09:00:00Z", TodoStatus::Completed),
            todo("too-far", "2024-06-20T10:00:00Z", TodoStatus::Pending),
        ];

        let summary = summarize(&[], &[], &todos, now, DEFAULT_UPCOMING_DAYS).unwrap();
        let ids: Vec<&str> = summary
            .upcoming_todos
            .iter()
            .map(|todo| todo.id.as_str())
            .collect();

        assert_eq!(ids, vec!["soon", "later"]);
    }

    #[test]
    fn in_progress_list_is_newest_first_and_capped() {
        let now = datetime!(2024-06-12 10:00 UTC);
        let tasks: Vec<Task> = (1..=7)
            .map(|day| {
                task(
                    &format!("t-{day}"),
                    TaskStatus::InProgress,
                    &format!("2024-06-{day:02}T09:00:00Z"),
                )
            })
            .chain(std::iter::once(task(
                "pending",
                TaskStatus::Pending,
                "2024-06-30T09:00:00Z",
            )))
            .collect();

        let summary = summarize(&[], &tasks, &[], now, DEFAULT_UPCOMING_DAYS).unwrap();

        assert_eq!(summary.in_progress_tasks.len(), SUMMARY_LIST_LIMIT);
        assert_eq!(summary.in_progress_tasks[0].id, "t-7");
        assert_eq!(summary.in_progress_tasks[4].id, "t-3");
    }

    #[test]
    fn horizon_past_the_calendar_is_rejected() {
        let now = datetime!(2024-06-12 10:00 UTC);

        let err = summarize(&[], &[], &[], now, 10_000_000).unwrap_err();

        assert_eq!(err.code(), "invalid_input");
        assert!(err.message().contains("upcoming_days"));
    }
}
