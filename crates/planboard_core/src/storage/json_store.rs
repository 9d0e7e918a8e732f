use crate::error::AppError;
use crate::model::{Task, TodoItem, YearPlan};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "snapshot.json";
const STORE_ENV_VAR: &str = "PLANBOARD_STORE_PATH";

#[derive(Debug, Serialize, Deserialize)]
struct StoredSnapshot {
    schema_version: u32,
    #[serde(default)]
    year_plans: Vec<YearPlan>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    todos: Vec<TodoItem>,
}

/// Everything the persistence layer returned for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub year_plans: Vec<YearPlan>,
    pub tasks: Vec<Task>,
    pub todos: Vec<TodoItem>,
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("planboard")
            .join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("planboard")
            .join(STORE_FILE_NAME))
    }
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, AppError> {
    if !path.exists() {
        return Ok(Snapshot::default());
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    let stored: StoredSnapshot =
        serde_json::from_str(&content).map_err(|err| AppError::invalid_data(err.to_string()))?;

    if !(1..=SCHEMA_VERSION).contains(&stored.schema_version) {
        return Err(AppError::invalid_data("schema_version mismatch"));
    }

    let snapshot = Snapshot {
        year_plans: stored.year_plans,
        tasks: stored.tasks,
        todos: stored.todos,
    };
    check_references(&snapshot)?;

    Ok(snapshot)
}

fn check_references(snapshot: &Snapshot) -> Result<(), AppError> {
    let activity_ids: HashSet<&str> = snapshot
        .year_plans
        .iter()
        .flat_map(|plan| plan.activities.iter())
        .map(|activity| activity.id.as_str())
        .collect();

    for task in &snapshot.tasks {
        if let Some(activity_id) = task.activity_id.as_deref()
            && !activity_ids.contains(activity_id)
        {
            return Err(AppError::invalid_data(format!(
                "task {}: activity_id {activity_id} not found",
                task.id
            )));
        }

        if task.progress.iter().any(|entry| entry.percent_complete > 100) {
            return Err(AppError::invalid_data(format!(
                "task {}: percent_complete above 100",
                task.id
            )));
        }
    }

    Ok(())
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let stored = StoredSnapshot {
        schema_version: SCHEMA_VERSION,
        year_plans: snapshot.year_plans.clone(),
        tasks: snapshot.tasks.clone(),
        todos: snapshot.todos.clone(),
    };
    let content = serde_json::to_string_pretty(&stored)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    info!(
        "event=snapshot_saved module=storage path={} tasks={} todos={}",
        path.display(),
        snapshot.tasks.len(),
        snapshot.todos.len()
    );
    Ok(())
}
