//! Session timer state machine.
//!
//! The timer has no clock of its own. The caller credits one second at a
//! time through [`SessionTimer::tick`], normally from the seconds the event
//! loop's [`crate::runtime::Runner`] reports.
//!
//! ```text
//! Idle --start--> Running --pause--> Paused --resume--> Running
//!                 Running --stop---> Idle (elapsed committed)
//!                 Running --pause--> Idle (nothing counted yet)
//! ```

use serde::{Deserialize, Serialize};

/// Current state of a study session, carrying the elapsed seconds where
/// they are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        elapsed: u64,
    },
    Paused {
        elapsed: u64,
    },
}

/// Short label for a [`TimerState`], used by the views and in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTimer {
    state: TimerState,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn status(&self) -> TimerStatus {
        match self.state {
            TimerState::Idle => TimerStatus::Idle,
            TimerState::Running { .. } => TimerStatus::Running,
            TimerState::Paused { .. } => TimerStatus::Paused,
        }
    }

    /// Seconds counted in the current session, 0 when idle.
    pub fn elapsed(&self) -> u64 {
        match self.state {
            TimerState::Idle => 0,
            TimerState::Running { elapsed } | TimerState::Paused { elapsed } => elapsed,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, TimerState::Paused { .. })
    }

    pub fn is_idle(&self) -> bool {
        self.state == TimerState::Idle
    }

    /// Idle -> Running. Returns false (and does nothing) in any other state.
    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running { elapsed: 0 };
                true
            }
            _ => false,
        }
    }

    /// Running -> Paused, keeping the elapsed value. A session paused before
    /// its first second has nothing to keep and goes back to Idle.
    pub fn pause(&mut self) -> bool {
        match self.state {
            TimerState::Running { elapsed: 0 } => {
                self.state = TimerState::Idle;
                true
            }
            TimerState::Running { elapsed } => {
                self.state = TimerState::Paused { elapsed };
                true
            }
            _ => false,
        }
    }

    /// Paused -> Running, continuing from the retained value.
    pub fn resume(&mut self) -> bool {
        match self.state {
            TimerState::Paused { elapsed } => {
                self.state = TimerState::Running { elapsed };
                true
            }
            _ => false,
        }
    }

    /// Running -> Idle. Returns the seconds to commit, `None` if the timer
    /// was not running. A session stopped before its first tick commits 0.
    pub fn stop(&mut self) -> Option<u64> {
        match self.state {
            TimerState::Running { elapsed } => {
                self.state = TimerState::Idle;
                Some(elapsed)
            }
            _ => None,
        }
    }

    /// Credit one second. Only counts while running.
    pub fn tick(&mut self) -> bool {
        match &mut self.state {
            TimerState::Running { elapsed } => {
                *elapsed = elapsed.saturating_add(1);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn running_for(secs: u64) -> SessionTimer {
        let mut timer = SessionTimer::new();
        timer.start();
        for _ in 0..secs {
            timer.tick();
        }
        timer
    }

    #[test]
    fn new_timer_is_idle() {
        let timer = SessionTimer::new();
        assert!(timer.is_idle());
        assert_eq!(timer.elapsed(), 0);
        assert_eq!(timer.status(), TimerStatus::Idle);
    }

    #[test]
    fn start_begins_counting_from_zero() {
        let mut timer = SessionTimer::new();
        assert!(timer.start());
        assert_matches!(timer.state(), TimerState::Running { elapsed: 0 });
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed(), 2);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut timer = running_for(3);
        assert!(!timer.start());
        assert_eq!(timer.elapsed(), 3);
    }

    #[test]
    fn start_while_paused_is_ignored() {
        let mut timer = running_for(3);
        timer.pause();
        assert!(!timer.start());
        assert_matches!(timer.state(), TimerState::Paused { elapsed: 3 });
    }

    #[test]
    fn pause_retains_elapsed_and_stops_counting() {
        let mut timer = running_for(4);
        assert!(timer.pause());
        assert!(!timer.tick());
        assert!(!timer.tick());
        assert_matches!(timer.state(), TimerState::Paused { elapsed: 4 });
    }

    #[test]
    fn pause_before_first_tick_returns_to_idle() {
        let mut timer = running_for(0);
        assert!(timer.pause());
        assert_eq!(timer.state(), TimerState::Idle);
        assert!(!timer.resume());

        // start is available again
        assert!(timer.start());
        timer.tick();
        assert_matches!(timer.state(), TimerState::Running { elapsed: 1 });
    }

    #[test]
    fn pause_when_not_running_is_ignored() {
        let mut timer = SessionTimer::new();
        assert!(!timer.pause());
        assert!(timer.is_idle());

        let mut timer = running_for(1);
        timer.pause();
        assert!(!timer.pause());
    }

    #[test]
    fn resume_continues_from_retained_value() {
        let mut timer = running_for(2);
        timer.pause();
        assert!(timer.resume());
        timer.tick();
        assert_matches!(timer.state(), TimerState::Running { elapsed: 3 });
    }

    #[test]
    fn resume_when_not_paused_is_ignored() {
        let mut timer = SessionTimer::new();
        assert!(!timer.resume());
        assert!(timer.is_idle());

        let mut timer = running_for(1);
        assert!(!timer.resume());
        assert!(timer.is_running());
    }

    #[test]
    fn stop_commits_elapsed_and_resets() {
        let mut timer = running_for(5);
        assert_eq!(timer.stop(), Some(5));
        assert!(timer.is_idle());
        assert_eq!(timer.elapsed(), 0);
    }

    #[test]
    fn stop_before_first_tick_commits_zero() {
        let mut timer = running_for(0);
        assert_eq!(timer.stop(), Some(0));
    }

    #[test]
    fn stop_when_paused_or_idle_is_ignored() {
        let mut timer = SessionTimer::new();
        assert_eq!(timer.stop(), None);

        let mut timer = running_for(7);
        timer.pause();
        assert_eq!(timer.stop(), None);
        assert_matches!(timer.state(), TimerState::Paused { elapsed: 7 });
    }

    #[test]
    fn tick_when_idle_does_nothing() {
        let mut timer = SessionTimer::new();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed(), 0);
    }

    #[test]
    fn status_label_matches_state() {
        let mut timer = running_for(1);
        assert_eq!(timer.status().to_string(), "Running");
        timer.pause();
        assert_eq!(timer.status().to_string(), "Paused");
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_string(&TimerState::Paused { elapsed: 9 }).unwrap();
        assert_eq!(json, r#"{"state":"paused","elapsed":9}"#);
    }

    #[test]
    fn state_deserializes_from_tag() {
        let state: TimerState = serde_json::from_str(r#"{"state":"running","elapsed":12}"#).unwrap();
        assert_eq!(state, TimerState::Running { elapsed: 12 });

        let idle: TimerState = serde_json::from_str(r#"{"state":"idle"}"#).unwrap();
        assert_eq!(idle, TimerState::Idle);

        assert!(serde_json::from_str::<TimerState>(r#"{"state":"stopped"}"#).is_err());
    }
}
