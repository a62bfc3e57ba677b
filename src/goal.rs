use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Target number of seconds to study in a day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyGoal(u64);

impl DailyGoal {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn secs(&self) -> u64 {
        self.0
    }

    /// Strict parse of a whole, non-negative number of seconds.
    pub fn parse(text: &str) -> Result<Self, GoalError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(GoalError::Empty);
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(GoalError::NotANumber(trimmed.to_string()));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| GoalError::TooLarge(trimmed.to_string()))
    }

    /// Parse user-typed goal text. Anything unusable becomes a goal of 0.
    pub fn parse_lenient(text: &str) -> Self {
        Self::parse(text).unwrap_or_default()
    }

    pub fn progress(&self, studied: u64) -> GoalProgress {
        GoalProgress {
            studied,
            goal: self.0,
            remaining: self.0.saturating_sub(studied),
            met: studied >= self.0,
        }
    }
}

impl From<u64> for DailyGoal {
    fn from(secs: u64) -> Self {
        Self(secs)
    }
}

/// Studied time measured against the daily goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub studied: u64,
    pub goal: u64,
    /// Seconds still missing, never negative.
    pub remaining: u64,
    pub met: bool,
}

impl GoalProgress {
    /// Fraction of the goal reached, clamped to `0.0..=1.0`. A zero goal
    /// counts as complete.
    pub fn ratio(&self) -> f64 {
        if self.goal == 0 {
            return 1.0;
        }
        (self.studied as f64 / self.goal as f64).min(1.0)
    }
}
