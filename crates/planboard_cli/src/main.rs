use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use planboard_cli::cli::{Cli, Command, collect_overrides};
use planboard_core::board_api::{PlanTimeline, TaskRow, TodoRow};
use planboard_core::config::{Config, load_config_with_fallback, merge_overrides};
use planboard_core::dashboard::DashboardSummary;
use planboard_core::dates::{local_now, parse_calendar_date};
use planboard_core::error::AppError;
use planboard_core::filter::{TaskFilter, TodoFilter};
use planboard_core::model::{ActivityCategory, Task};
use planboard_core::timeline::{LabelLocale, MONTHS_IN_YEAR};
use std::collections::HashSet;
use tabled::builder::Builder;
use tabled::settings::Style;

const BAR_CELL: &str = "■";

fn render_table(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(header);
    for row in rows {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

fn print_timeline_plain(timeline: &PlanTimeline, locale: LabelLocale) {
    println!(
        "{} ({}) | {}",
        timeline.plan.title, timeline.plan.id, timeline.year
    );
    if timeline.bars.is_empty() {
        println!("No activities in this plan.");
        return;
    }

    let mut header = vec!["Activity".to_string(), "When".to_string()];
    header.extend((0..MONTHS_IN_YEAR).map(|month| locale.month_abbrev(month).to_string()));

    let rows = timeline
        .plan
        .activities
        .iter()
        .zip(&timeline.bars)
        .map(|(activity, bar)| {
            let mut row = vec![activity.title.clone(), bar.label.clone()];
            row.extend((0..MONTHS_IN_YEAR).map(|month| {
                if bar.covers(month) {
                    BAR_CELL.to_string()
                } else {
                    String::new()
                }
            }));
            row
        })
        .collect();
    println!("{}", render_table(header, rows));

    let present: HashSet<ActivityCategory> = timeline
        .plan
        .activities
        .iter()
        .map(|activity| activity.category)
        .collect();
    for category in ActivityCategory::ALL {
        if present.contains(&category) {
            println!("  {}: {}", category.label(), locale.category_name(category));
        }
    }
}

fn print_timeline_json(timeline: &PlanTimeline) {
    let bars: Vec<serde_json::Value> = timeline
        .plan
        .activities
        .iter()
        .zip(&timeline.bars)
        .map(|(activity, bar)| {
            serde_json::json!({
                "activity_id": activity.id,
                "title": activity.title,
                "category": activity.category,
                "left_month_index": bar.left_month_index,
                "width_in_months": bar.width_in_months,
                "label": bar.label,
            })
        })
        .collect();
    let json = serde_json::json!({
        "plan_id": timeline.plan.id,
        "title": timeline.plan.title,
        "year": timeline.year,
        "bars": bars,
    });
    println!("{}", json);
}

fn print_tasks_plain(rows: &[TaskRow]) {
    if rows.is_empty() {
        println!("No tasks.");
        return;
    }

    let header = ["ID", "Title", "Status", "Start", "Progress"]
        .map(String::from)
        .to_vec();
    let body = rows
        .iter()
        .map(|row| {
            vec![
                row.task.id.clone(),
                row.task.title.clone(),
                row.task.status.label().to_string(),
                row.task.start_date_time.clone(),
                format!("{}%", row.latest_progress),
            ]
        })
        .collect();
    println!("{}", render_table(header, body));
}

fn print_tasks_json(rows: &[TaskRow]) {
    let payload: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "id": row.task.id,
                "title": row.task.title,
                "status": row.task.status,
                "start_date_time": row.task.start_date_time,
                "activity_id": row.task.activity_id,
                "latest_progress": row.latest_progress,
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn print_todos_plain(rows: &[TodoRow]) {
    if rows.is_empty() {
        println!("No to-do items.");
        return;
    }

    let header = ["ID", "Title", "Type", "Priority", "Status", "Due", ""]
        .map(String::from)
        .to_vec();
    let body = rows
        .iter()
        .map(|row| {
            vec![
                row.todo.id.clone(),
                row.todo.title.clone(),
                row.todo.kind.label().to_string(),
                row.todo.priority.label().to_string(),
                row.todo.status.label().to_string(),
                row.todo.due_date.clone(),
                row.due.map(|signal| signal.label()).unwrap_or("").to_string(),
            ]
        })
        .collect();
    println!("{}", render_table(header, body));
}

fn print_todos_json(rows: &[TodoRow]) {
    let payload: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            serde_json::json!({
                "id": row.todo.id,
                "title": row.todo.title,
                "type": row.todo.kind,
                "priority": row.todo.priority,
                "status": row.todo.status,
                "due_date": row.todo.due_date,
                "due_signal": row.due.map(|signal| signal.label()),
            })
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn print_progress_json(task: &Task) {
    let json = serde_json::json!({
        "id": task.id,
        "title": task.title,
        "status": task.status,
        "progress": task.progress,
    });
    println!("{}", json);
}

fn print_summary_plain(summary: &DashboardSummary) {
    println!("Year plans: {}", summary.year_plans);
    println!("To-do items: {}", summary.todo_total);
    for (status, count) in &summary.todos_by_status {
        println!("  {}: {}", status.label(), count);
    }
    println!("Tasks: {}", summary.task_total);
    for (status, count) in &summary.tasks_by_status {
        println!("  {}: {}", status.label(), count);
    }

    println!("Upcoming to-do items:");
    if summary.upcoming_todos.is_empty() {
        println!("  -");
    }
    for todo in &summary.upcoming_todos {
        println!("  {} | {} | {}", todo.id, todo.title, todo.due_date);
    }

    println!("Tasks in progress:");
    if summary.in_progress_tasks.is_empty() {
        println!("  -");
    }
    for task in &summary.in_progress_tasks {
        println!("  {} | {} | {}", task.id, task.title, task.start_date_time);
    }
}

fn print_summary_json(summary: &DashboardSummary) {
    let todos_by_status: serde_json::Map<String, serde_json::Value> = summary
        .todos_by_status
        .iter()
        .map(|(status, count)| (status.label().to_string(), serde_json::json!(count)))
        .collect();
    let tasks_by_status: serde_json::Map<String, serde_json::Value> = summary
        .tasks_by_status
        .iter()
        .map(|(status, count)| (status.label().to_string(), serde_json::json!(count)))
        .collect();
    let upcoming: Vec<serde_json::Value> = summary
        .upcoming_todos
        .iter()
        .map(|todo| serde_json::json!({ "id": todo.id, "title": todo.title, "due_date": todo.due_date }))
        .collect();
    let in_progress: Vec<serde_json::Value> = summary
        .in_progress_tasks
        .iter()
        .map(|task| {
            serde_json::json!({
                "id": task.id,
                "title": task.title,
                "start_date_time": task.start_date_time,
            })
        })
        .collect();

    let json = serde_json::json!({
        "year_plans": summary.year_plans,
        "todos": {
            "total": summary.todo_total,
            "by_status": todos_by_status,
            "upcoming": upcoming,
        },
        "tasks": {
            "total": summary.task_total,
            "by_status": tasks_by_status,
            "in_progress": in_progress,
        },
    });
    println!("{}", json);
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn init_logging(verbose: bool) -> Option<LoggerHandle> {
    let logger = if verbose {
        Logger::try_with_str("debug")
    } else {
        Logger::try_with_env_or_str("warn")
    };

    match logger.and_then(|logger| {
        logger
            .log_to_stderr()
            .format(flexi_logger::default_format)
            .start()
    }) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("WARN: logging disabled: {err}");
            None
        }
    }
}

fn resolve_config(raw_overrides: &[String]) -> Result<Config, AppError> {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        log::warn!("event=config_ignored module=cli error=\"{}\"", err);
    }
    let overrides = collect_overrides(raw_overrides)?;
    Ok(merge_overrides(&loaded.config, &overrides))
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let config = resolve_config(&cli.config_override)?;
    let locale = config.label_locale();
    let now = local_now();

    match cli.command {
        Command::Timeline { plan, year } => {
            let timeline = planboard_core::board_api::year_timeline(plan.as_deref(), year, locale)?;
            if cli.json {
                print_timeline_json(&timeline);
            } else {
                print_timeline_plain(&timeline, locale);
            }
        }
        Command::Tasks { status, from, to } => {
            let filter = TaskFilter {
                status: status.as_deref().map(str::parse).transpose()?,
                from: from
                    .as_deref()
                    .map(|value| parse_calendar_date(value, "--from"))
                    .transpose()?,
                to: to
                    .as_deref()
                    .map(|value| parse_calendar_date(value, "--to"))
                    .transpose()?,
            };
            let rows = planboard_core::board_api::list_tasks(&filter, now)?;
            if cli.json {
                print_tasks_json(&rows);
            } else {
                print_tasks_plain(&rows);
            }
        }
        Command::Todos { kind, status } => {
            let filter = TodoFilter {
                kind: kind.as_deref().map(str::parse).transpose()?,
                status: status.as_deref().map(str::parse).transpose()?,
            };
            let rows = planboard_core::board_api::list_todos(&filter, now, config.due_soon_days())?;
            if cli.json {
                print_todos_json(&rows);
            } else {
                print_todos_plain(&rows);
            }
        }
        Command::Progress {
            id,
            percent,
            description,
        } => {
            let task =
                planboard_core::board_api::record_task_progress(&id, percent, &description, now)?;
            if cli.json {
                print_progress_json(&task);
            } else {
                println!(
                    "Recorded {}% on task: {} ({}) now {}",
                    percent,
                    task.title,
                    task.id,
                    task.status.label()
                );
            }
        }
        Command::Summary => {
            let summary = planboard_core::board_api::dashboard(now, config.upcoming_days())?;
            if cli.json {
                print_summary_json(&summary);
            } else {
                print_summary_plain(&summary);
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            print!("{err}");
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let _logger = init_logging(cli.verbose);

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
