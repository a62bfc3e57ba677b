// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod goal;
pub mod journal;
pub mod logging;
pub mod runtime;
pub mod timer;
pub mod tracker;
pub mod util;

pub use error::{Result, StudyError};
pub use goal::{DailyGoal, GoalProgress};
pub use journal::Journal;
pub use timer::{SessionTimer, TimerState, TimerStatus};
pub use tracker::Tracker;
