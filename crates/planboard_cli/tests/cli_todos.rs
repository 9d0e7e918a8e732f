use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, UtcOffset};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("planboard-{nanos}-{file_name}"))
}

fn hours_from_now(hours: i64) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let now = OffsetDateTime::now_utc().to_offset(offset);
    (now + Duration::hours(hours))
        .format(&Rfc3339)
        .expect("format timestamp")
}

fn todo(id: &str, due_date: &str, kind: &str, priority: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("todo {id}"),
        "due_date": due_date,
        "type": kind,
        "priority": priority,
        "status": status
    })
}

fn run(args: &[&str], store_path: &PathBuf, config_path: &PathBuf) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_planboard"))
        .args(args)
        .env("PLANBOARD_STORE_PATH", store_path)
        .env("PLANBOARD_CONFIG_PATH", config_path)
        .output()
        .expect("failed to run planboard")
}

#[test]
fn todos_json_orders_by_due_date_then_priority() {
    let store_path = temp_path("cli-todos-order.json");
    let config_path = temp_path("cli-todos-order-config.json");
    let content = serde_json::json!({
        "schema_version": 1,
        "todos": [
            todo("low", "2999-01-01", "DAILY", "LOW", "PENDING"),
            todo("urgent", "2999-01-01", "DAILY", "URGENT", "PENDING"),
            todo("late", "2000-01-01", "WEEKLY", "MEDIUM", "PENDING"),
            todo("medium", "2999-01-01", "MONTHLY", "MEDIUM", "PENDING")
        ]
    });
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = run(&["--json", "todos"], &store_path, &config_path);

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    let rows = value.as_array().unwrap();
    let ids: Vec<&str> = rows.iter().map(|row| row["id"].as_str().unwrap()).collect();

    assert_eq!(ids, vec!["late", "urgent", "medium", "low"]);
    assert_eq!(rows[0]["due_signal"], "overdue");
    assert!(rows[1]["due_signal"].is_null());
    assert_eq!(rows[1]["type"], "DAILY");
}

#[test]
fn todos_filter_by_type_and_status() {
    let store_path = temp_path("cli-todos-filter.json");
    let config_path = temp_path("cli-todos-filter-config.json");
    let content = serde_json::json!({
        "schema_version": 1,
        "todos": [
            todo("weekly-open", "2999-01-01", "WEEKLY", "LOW", "PENDING"),
            todo("weekly-done", "2999-01-01", "WEEKLY", "LOW", "COMPLETED"),
            todo("daily-open", "2999-01-01", "DAILY", "LOW", "PENDING")
        ]
    });
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = run(
        &["todos", "--type", "weekly", "--status", "pending", "--json"],
        &store_path,
        &config_path,
    );

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "weekly-open");
}

#[test]
fn todos_plain_text_flags_due_soon_items() {
    let store_path = temp_path("cli-todos-due-soon.json");
    let config_path = temp_path("cli-todos-due-soon-config.json");
    let content = serde_json::json!({
        "schema_version": 1,
        "todos": [
            todo("soon", &hours_from_now(30), "DAILY", "HIGH", "PENDING"),
            todo("far", "2999-01-01", "DAILY", "HIGH", "PENDING")
        ]
    });
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = run(&["todos"], &store_path, &config_path);

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("todo soon"));
    assert!(stdout.contains("due soon"));
}

#[test]
fn todos_rejects_unknown_type() {
    let store_path = temp_path("cli-todos-bad-type.json");
    let config_path = temp_path("cli-todos-bad-type-config.json");

    let output = run(&["todos", "--type", "yearly"], &store_path, &config_path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn summary_json_counts_and_lists_attention_items() {
    let store_path = temp_path("cli-summary.json");
    let config_path = temp_path("cli-summary-config.json");
    let content = serde_json::json!({
        "schema_version": 1,
        "year_plans": [
            { "id": "plan-1", "title": "Plan", "year": 2024, "activities": [] }
        ],
        "tasks": [
            {
                "id": "task-1",
                "title": "Book venue",
                "status": "IN_PROGRESS",
                "start_date_time": hours_from_now(-48)
            },
            {
                "id": "task-2",
                "title": "Print handbooks",
                "status": "COMPLETED",
                "start_date_time": hours_from_now(-96)
            }
        ],
        "todos": [
            todo("next", &hours_from_now(24), "DAILY", "LOW", "PENDING"),
            todo("far", "2999-01-01", "DAILY", "LOW", "PENDING"),
            todo("closed", &hours_from_now(24), "DAILY", "LOW", "COMPLETED")
        ]
    });
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = run(&["--json", "summary"], &store_path, &config_path);

    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();

    assert_eq!(value["year_plans"], 1);
    assert_eq!(value["todos"]["total"], 3);
    assert_eq!(value["todos"]["by_status"]["pending"], 2);
    assert_eq!(value["todos"]["by_status"]["completed"], 1);
    assert_eq!(value["todos"]["upcoming"][0]["id"], "next");
    assert_eq!(value["todos"]["upcoming"].as_array().unwrap().len(), 1);
    assert_eq!(value["tasks"]["total"], 2);
    assert_eq!(value["tasks"]["in_progress"][0]["id"], "task-1");
}

#[test]
fn malformed_config_override_is_rejected() {
    let store_path = temp_path("cli-bad-override.json");
    let config_path = temp_path("cli-bad-override-config.json");

    let output = run(
        &["summary", "--config-override", "theme=noir"],
        &store_path,
        &config_path,
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - unknown config field 'theme'"));
}

#[test]
fn summary_rejects_horizon_beyond_calendar() {
    let store_path = temp_path("cli-summary-horizon.json");
    let config_path = temp_path("cli-summary-horizon-config.json");

    let output = run(
        &["summary", "--config-override", "upcoming_days=10000000"],
        &store_path,
        &config_path,
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - upcoming_days is out of range"));
}
