use clap::{Parser, Subcommand};
use planboard_core::config::ConfigOverrides;
use planboard_core::error::AppError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a year plan on the month grid
    ///
    /// Example: planboard timeline
    /// Example: planboard timeline --plan plan-2024
    /// Example: planboard timeline --year 2025
    Timeline {
        #[arg(long)]
        plan: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// List tasks in priority order
    ///
    /// Example: planboard tasks
    /// Example: planboard tasks --status in_progress
    /// Example: planboard tasks --from 2024-06-01 --to 2024-06-30
    Tasks {
        #[arg(long)]
        status: Option<String>,
        #[arg(long, value_name = "DATE")]
        from: Option<String>,
        #[arg(long, value_name = "DATE")]
        to: Option<String>,
    },
    /// List to-do items by due date
    ///
    /// Example: planboard todos
    /// Example: planboard todos --type weekly --status pending
    Todos {
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Record progress on a task
    ///
    /// Example: planboard progress task-1 40 "Venue booked"
    Progress {
        id: String,
        percent: u8,
        description: String,
    },
    /// Show dashboard counts and what needs attention
    ///
    /// Example: planboard summary
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Locale,
    UpcomingDays,
    DueSoonDays,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let field =
        canonicalize_flag_name(key_raw).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match field.as_str() {
        "locale" | "lang" => ConfigOverrideTarget::Locale,
        "upcoming_days" => ConfigOverrideTarget::UpcomingDays,
        "due_soon_days" => ConfigOverrideTarget::DueSoonDays,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` argument into one set of overrides.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry).map_err(AppError::invalid_input)?;
        match parsed.target {
            ConfigOverrideTarget::Locale => overrides.locale = Some(parsed.value),
            ConfigOverrideTarget::UpcomingDays => {
                overrides.upcoming_days = Some(parse_days(&parsed.value)?)
            }
            ConfigOverrideTarget::DueSoonDays => {
                overrides.due_soon_days = Some(parse_days(&parsed.value)?)
            }
        }
    }

    Ok(overrides)
}

fn parse_days(value: &str) -> Result<u32, AppError> {
    value
        .parse::<u32>()
        .map_err(|_| AppError::invalid_input(format!("'{value}' is not a number of days")))
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
