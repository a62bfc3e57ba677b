pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use studytrack::{GoalProgress, TimerStatus};

use crate::{ui::screen::current_screen, App};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        current_screen(self.view).render(self, area, buf);
    }
}

/// Key hints valid for the timer in its current state
pub fn home_actions(status: TimerStatus) -> &'static [(&'static str, &'static str)] {
    match status {
        TimerStatus::Idle => &[("s", "start studying")],
        TimerStatus::Running => &[("x", "finish session"), ("p", "pause")],
        TimerStatus::Paused => &[("r", "resume")],
    }
}

pub fn format_actions(actions: &[(&str, &str)]) -> String {
    actions
        .iter()
        .map(|(key, label)| format!("({key}) {label}"))
        .collect::<Vec<_>>()
        .join("   ")
}

pub fn goal_status_text(progress: &GoalProgress) -> &'static str {
    if progress.met {
        "Daily study goal reached!"
    } else {
        "Daily study goal not reached yet"
    }
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_style() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn goal_style(progress: &GoalProgress) -> Style {
    let color = if progress.met {
        Color::Green
    } else {
        Color::Red
    };
    bold_style().fg(color)
}

fn status_style(status: TimerStatus) -> Style {
    match status {
        TimerStatus::Idle => dim_style(),
        TimerStatus::Running => bold_style().fg(Color::Green),
        TimerStatus::Paused => bold_style().fg(Color::Yellow),
    }
}
