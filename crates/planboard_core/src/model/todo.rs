use super::canonical_token;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC3339, or `YYYY-MM-DD` for midnight in the viewer's offset.
    pub due_date: String,
    #[serde(rename = "type")]
    pub kind: TodoKind,
    pub priority: TodoPriority,
    pub status: TodoStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoKind {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TodoKind {
    pub const ALL: [TodoKind; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl TodoPriority {
    pub const ALL: [TodoPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Tie-break rank for equal due dates; lower sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled items need no further attention.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

impl FromStr for TodoKind {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = canonical_token(raw);
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == token)
            .ok_or_else(|| AppError::invalid_input(format!("unknown todo type '{raw}'")))
    }
}

impl FromStr for TodoPriority {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = canonical_token(raw);
        Self::ALL
            .into_iter()
            .find(|priority| priority.label() == token)
            .ok_or_else(|| AppError::invalid_input(format!("unknown todo priority '{raw}'")))
    }
}

impl FromStr for TodoStatus {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let token = canonical_token(raw);
        Self::ALL
            .into_iter()
            .find(|status| status.label() == token)
            .ok_or_else(|| AppError::invalid_input(format!("unknown todo status '{raw}'")))
    }
}
