use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use studytrack::util::{format_duration, percent};

use super::{
    bold_style, dim_style, format_actions, goal_status_text, goal_style, home_actions,
    status_style, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};
use crate::{App, View};

/// A UI Screen boundary: responsible for rendering one view of the app
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Timer view: elapsed seconds, the actions valid right now and the goal input
pub struct HomeScreen;

impl Screen for HomeScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let tracker = &app.tracker;
        let status = tracker.status();
        let elapsed = tracker.elapsed();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Length(1), // elapsed
                Constraint::Length(1), // status
                Constraint::Length(1), // padding
                Constraint::Length(1), // actions
                Constraint::Length(1), // padding
                Constraint::Length(3), // goal input
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Welcome to the study tracker!",
            bold_style().fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(format!("{elapsed} seconds"), bold_style()))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(Line::from(vec![
            Span::styled(status.to_string(), status_style(status)),
            Span::styled(format!("  {}", format_duration(elapsed)), dim_style()),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        Paragraph::new(format_actions(home_actions(status)))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        let goal = tracker.goal().secs();
        let goal_line = match &app.goal_input {
            Some(input) => Line::from(Span::styled(
                format!("{input}_"),
                bold_style().fg(Color::Yellow),
            )),
            None => Line::from(vec![
                Span::styled(goal.to_string(), bold_style()),
                Span::styled(format!(" ({})", format_duration(goal)), dim_style()),
                Span::styled("   (g) edit", dim_style()),
            ]),
        };
        let goal_title = if app.is_editing_goal() {
            "Daily goal in seconds: (enter) save (esc) cancel"
        } else {
            "Daily goal in seconds"
        };
        Paragraph::new(goal_line)
            .block(Block::default().borders(Borders::ALL).title(goal_title))
            .render(chunks[6], buf);

        Paragraph::new(Span::styled(
            "(j) journal / (q)uit",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[8], buf);
    }
}

/// Journal view: completed sessions, the running total and goal progress
pub struct JournalScreen;

impl Screen for JournalScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let tracker = &app.tracker;
        let journal = tracker.journal();
        let progress = tracker.progress();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Min(3),    // entries
                Constraint::Length(1), // total
                Constraint::Length(1), // goal status
                Constraint::Length(3), // gauge
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("My study journal  {}", Local::now().format("%Y-%m-%d")),
            bold_style().fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let entries_block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Sessions ({})", journal.len()));

        if journal.is_empty() {
            Paragraph::new("No sessions yet. Finish a session to see it here.")
                .block(entries_block)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
        } else {
            let items: Vec<ListItem> = journal
                .entries()
                .iter()
                .enumerate()
                .map(|(idx, secs)| {
                    ListItem::new(format!("{}. {} sec ({})", idx + 1, secs, format_duration(*secs)))
                })
                .collect();

            let list = List::new(items)
                .block(entries_block)
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(app.selected));
            StatefulWidget::render(list, chunks[1], buf, &mut state);
        }

        Paragraph::new(Span::styled(
            format!(
                "Total: {} sec ({})",
                progress.studied,
                format_duration(progress.studied)
            ),
            bold_style(),
        ))
        .render(chunks[2], buf);

        Paragraph::new(Span::styled(goal_status_text(&progress), goal_style(&progress)))
            .render(chunks[3], buf);

        let label = format!(
            "{} / {} sec ({}%), {} sec left",
            progress.studied,
            progress.goal,
            percent(progress.ratio()),
            progress.remaining
        );
        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Daily goal"))
            .gauge_style(goal_style(&progress))
            .ratio(progress.ratio())
            .label(label)
            .render(chunks[4], buf);

        Paragraph::new(Span::styled(
            "(↑/↓) select / (d)elete / (b)ack / (q)uit",
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .render(chunks[5], buf);
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Home => Box::new(HomeScreen),
        View::Journal => Box::new(JournalScreen),
    }
}
