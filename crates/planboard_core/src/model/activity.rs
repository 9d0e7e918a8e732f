use super::canonical_token;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPlan {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub year: i32,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// A calendar-scoped item of a year plan, drawn as one bar on the month grid.
///
/// Dates are stored as `YYYY-MM-DD` (an RFC3339 timestamp is accepted too and
/// only its date part is used).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub category: ActivityCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityCategory {
    /// Runs for the whole displayed year whatever the stored dates say.
    Ongoing,
    /// Runs over a sub-range of months.
    Partial,
    Event,
    Training,
    Design,
    Other,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 6] = [
        Self::Ongoing,
        Self::Partial,
        Self::Event,
        Self::Training,
        Self::Design,
        Self::Other,
    ];

    /// Point categories occupy a single month cell.
    pub fn is_point(self) -> bool {
        matches!(
            self,
            Self::Event | Self::Training | Self::Design | Self::Other
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Partial => "partial",
            Self::Event => "event",
            Self::Training => "training",
            Self::Design => "design",
            Self::Other => "other",
        }
    }
}

impl FromStr for ActivityCategory {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = canonical_token(raw);
        Self::ALL
            .into_iter()
            .find(|category| category.label() == token)
            .ok_or_else(|| AppError::invalid_input(format!("unknown activity category '{raw}'")))
    }
}
