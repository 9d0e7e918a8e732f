use crate::dashboard::{DashboardSummary, summarize};
use crate::due::{DueSignal, due_signal};
use crate::error::AppError;
use crate::filter::{TaskFilter, TodoFilter, filter_tasks, filter_todos};
use crate::model::{Task, TodoItem, YearPlan};
use crate::priority::{sort_tasks, sort_todos};
use crate::progress::{latest_progress, record_progress};
use crate::storage::json_store;
use crate::timeline::{LabelLocale, TimelineBar, layout_with_locale};
use std::path::Path;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct PlanTimeline {
    pub plan: YearPlan,
    pub year: i32,
    /// One bar per `plan.activities` entry, same order.
    pub bars: Vec<TimelineBar>,
}

#[derive(Debug, Clone)]
pub struct TaskRow {
    pub task: Task,
    pub latest_progress: u8,
}

#[derive(Debug, Clone)]
pub struct TodoRow {
    pub todo: TodoItem,
    pub due: Option<DueSignal>,
}

pub fn year_timeline(
    plan_id: Option<&str>,
    year: Option<i32>,
    locale: LabelLocale,
) -> Result<PlanTimeline, AppError> {
    let path = json_store::store_path()?;
    year_timeline_with_path(&path, plan_id, year, locale)
}

pub fn list_tasks(filter: &TaskFilter, now: OffsetDateTime) -> Result<Vec<TaskRow>, AppError> {
    let path = json_store::store_path()?;
    list_tasks_with_path(&path, filter, now)
}

pub fn list_todos(
    filter: &TodoFilter,
    now: OffsetDateTime,
    due_soon_days: u32,
) -> Result<Vec<TodoRow>, AppError> {
    let path = json_store::store_path()?;
    list_todos_with_path(&path, filter, now, due_soon_days)
}

pub fn record_task_progress(
    id: &str,
    percent_complete: u8,
    description: &str,
    now: OffsetDateTime,
) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    record_task_progress_with_path(&path, id, percent_complete, description, now)
}

pub fn dashboard(now: OffsetDateTime, upcoming_days: u32) -> Result<DashboardSummary, AppError> {
    let path = json_store::store_path()?;
    dashboard_with_path(&path, now, upcoming_days)
}

fn year_timeline_with_path(
    path: &Path,
    plan_id: Option<&str>,
    year: Option<i32>,
    locale: LabelLocale,
) -> Result<PlanTimeline, AppError> {
    let snapshot = json_store::load_snapshot(path)?;

    let plan = match (plan_id.map(str::trim), year) {
        (Some(""), _) => return Err(AppError::invalid_input("plan id is required")),
        (Some(id), _) => snapshot
            .year_plans
            .into_iter()
            .find(|plan| plan.id == id)
            .ok_or_else(|| AppError::invalid_input("year plan not found"))?,
        (None, Some(year)) => snapshot
            .year_plans
            .into_iter()
            .find(|plan| plan.year == year)
            .ok_or_else(|| AppError::invalid_input(format!("no year plan for {year}")))?,
        (None, None) => snapshot
            .year_plans
            .into_iter()
            .next()
            .ok_or_else(|| AppError::invalid_input("no year plans"))?,
    };

    let display_year = year.unwrap_or(plan.year);
    let bars = layout_with_locale(&plan.activities, display_year, locale)?;

    Ok(PlanTimeline {
        plan,
        year: display_year,
        bars,
    })
}

fn list_tasks_with_path(
    path: &Path,
    filter: &TaskFilter,
    now: OffsetDateTime,
) -> Result<Vec<TaskRow>, AppError> {
    let tasks = json_store::load_snapshot(path)?.tasks;
    let filtered = filter_tasks(&tasks, filter, now.offset())?;

    sort_tasks(&filtered, now)?
        .into_iter()
        .map(|task| {
            let latest_progress = latest_progress(&task)?;
            Ok(TaskRow {
                task,
                latest_progress,
            })
        })
        .collect()
}

fn list_todos_with_path(
    path: &Path,
    filter: &TodoFilter,
    now: OffsetDateTime,
    due_soon_days: u32,
) -> Result<Vec<TodoRow>, AppError> {
    let todos = json_store::load_snapshot(path)?.todos;
    let filtered = filter_todos(&todos, filter);

    sort_todos(&filtered, now)?
        .into_iter()
        .map(|todo| {
            let due = due_signal(&todo, now, due_soon_days)?;
            Ok(TodoRow { todo, due })
        })
        .collect()
}

fn record_task_progress_with_path(
    path: &Path,
    id: &str,
    percent_complete: u8,
    description: &str,
    now: OffsetDateTime,
) -> Result<Task, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let mut snapshot = json_store::load_snapshot(path)?;
    let task = snapshot
        .tasks
        .iter_mut()
        .find(|task| task.id == trimmed_id)
        .ok_or_else(|| AppError::invalid_input("task not found"))?;

    record_progress(task, description, percent_complete, now)?;
    let updated = task.clone();
    json_store::save_snapshot(path, &snapshot)?;

    Ok(updated)
}

fn dashboard_with_path(
    path: &Path,
    now: OffsetDateTime,
    upcoming_days: u32,
) -> Result<DashboardSummary, AppError> {
    let snapshot = json_store::load_snapshot(path)?;
    summarize(
        &snapshot.year_plans,
        &snapshot.tasks,
        &snapshot.todos,
        now,
        upcoming_days,
    )
}
