use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid goal: {0}")]
    Goal(#[from] GoalError),

    #[error("stdin must be a tty")]
    NotATty,
}

/// Reasons a goal string is rejected by [`crate::goal::DailyGoal::parse`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalError {
    #[error("goal is empty")]
    Empty,

    #[error("'{0}' is not a whole number of seconds")]
    NotANumber(String),

    #[error("'{0}' is too large")]
    TooLarge(String),
}

pub type Result<T> = std::result::Result<T, StudyError>;
