//! The study tracker: one session timer, the journal it commits into and
//! the daily goal that the journal total is measured against.

use tracing::{debug, info};

use crate::goal::{DailyGoal, GoalProgress};
use crate::journal::Journal;
use crate::timer::{SessionTimer, TimerState, TimerStatus};

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    timer: SessionTimer,
    journal: Journal,
    goal: DailyGoal,
}

impl Tracker {
    pub fn new(goal: DailyGoal) -> Self {
        Self {
            goal,
            ..Self::default()
        }
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn goal(&self) -> DailyGoal {
        self.goal
    }

    pub fn state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn status(&self) -> TimerStatus {
        self.timer.status()
    }

    pub fn elapsed(&self) -> u64 {
        self.timer.elapsed()
    }

    pub fn total(&self) -> u64 {
        self.journal.total()
    }

    pub fn progress(&self) -> GoalProgress {
        self.goal.progress(self.total())
    }

    pub fn start(&mut self) -> bool {
        let applied = self.timer.start();
        if applied {
            info!("session started");
        } else {
            debug!(status = %self.timer.status(), "start ignored");
        }
        applied
    }

    pub fn pause(&mut self) -> bool {
        let applied = self.timer.pause();
        if applied && self.timer.is_idle() {
            info!("session paused before its first second, back to idle");
        } else if applied {
            info!(elapsed = self.timer.elapsed(), "session paused");
        } else {
            debug!(status = %self.timer.status(), "pause ignored");
        }
        applied
    }

    pub fn resume(&mut self) -> bool {
        let applied = self.timer.resume();
        if applied {
            info!(elapsed = self.timer.elapsed(), "session resumed");
        } else {
            debug!(status = %self.timer.status(), "resume ignored");
        }
        applied
    }

    /// Stop a running session and append its duration to the journal.
    /// Returns the committed seconds.
    pub fn stop(&mut self) -> Option<u64> {
        match self.timer.stop() {
            Some(secs) => {
                self.journal.append(secs);
                info!(
                    secs,
                    entries = self.journal.len(),
                    total = self.journal.total(),
                    "session committed"
                );
                Some(secs)
            }
            None => {
                debug!(status = %self.timer.status(), "stop ignored");
                None
            }
        }
    }

    pub fn tick(&mut self) -> bool {
        self.timer.tick()
    }

    /// Credit `secs` whole seconds to a running session.
    pub fn advance(&mut self, secs: u64) -> u64 {
        let mut counted = 0;
        for _ in 0..secs {
            if !self.timer.tick() {
                break;
            }
            counted += 1;
        }
        counted
    }

    pub fn delete_entry(&mut self, index: usize) -> Option<u64> {
        let removed = self.journal.delete(index);
        match removed {
            Some(secs) => info!(index, secs, "journal entry deleted"),
            None => debug!(index, len = self.journal.len(), "delete out of range ignored"),
        }
        removed
    }

    pub fn set_goal(&mut self, goal: DailyGoal) {
        info!(goal = goal.secs(), "daily goal set");
        self.goal = goal;
    }

    /// Set the goal from user-typed text; unusable text becomes 0.
    pub fn set_goal_text(&mut self, text: &str) -> DailyGoal {
        let goal = DailyGoal::parse_lenient(text);
        if goal.secs() == 0 && !text.trim().is_empty() && text.trim() != "0" {
            debug!(text, "goal text not a number, using 0");
        }
        self.set_goal(goal);
        goal
    }
}
