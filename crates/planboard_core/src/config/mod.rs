use crate::dashboard::DEFAULT_UPCOMING_DAYS;
use crate::due::DEFAULT_DUE_SOON_DAYS;
use crate::error::AppError;
use crate::model::canonical_token;
use crate::timeline::LabelLocale;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "PLANBOARD_CONFIG_PATH";

/// Maps locale spellings onto `en` or `th`; anything else falls back to `en`.
pub fn canonical_locale_name(raw: &str) -> String {
    match canonical_token(raw).as_str() {
        "th" | "thai" | "th_th" => "th".to_string(),
        _ => "en".to_string(),
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub upcoming_days: Option<u32>,
    #[serde(default)]
    pub due_soon_days: Option<u32>,
}

impl Config {
    pub fn label_locale(&self) -> LabelLocale {
        match self.locale.as_deref() {
            Some("th") => LabelLocale::Thai,
            _ => LabelLocale::English,
        }
    }

    pub fn upcoming_days(&self) -> u32 {
        self.upcoming_days.unwrap_or(DEFAULT_UPCOMING_DAYS)
    }

    pub fn due_soon_days(&self) -> u32 {
        self.due_soon_days.unwrap_or(DEFAULT_DUE_SOON_DAYS)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub locale: Option<String>,
    pub upcoming_days: Option<u32>,
    pub due_soon_days: Option<u32>,
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata)
            .join("planboard")
            .join(CONFIG_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("planboard")
            .join(CONFIG_FILE_NAME))
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => {
            warn!(
                "event=config_fallback module=config path={} code={}",
                path.display(),
                err.code()
            );
            ConfigLoad {
                config: Config::default(),
                error: Some(err),
            }
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.locale = config.locale.map(|name| canonical_locale_name(&name));
    Ok(config)
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(locale) = overrides.locale.as_ref() {
        merged.locale = Some(canonical_locale_name(locale));
    }
    if let Some(days) = overrides.upcoming_days {
        merged.upcoming_days = Some(days);
    }
    if let Some(days) = overrides.due_soon_days {
        merged.due_soon_days = Some(days);
    }

    merged
}
