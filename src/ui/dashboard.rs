//! Dashboard of aggregate stat cards

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::stats::DashboardStats;

pub struct Dashboard {
    pub stats: DashboardStats,
    /// When the last successful refresh completed
    pub last_updated: Option<DateTime<Utc>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            stats: DashboardStats::zero(),
            last_updated: None,
        }
    }

    pub fn update(&mut self, stats: DashboardStats) {
        self.stats = stats;
        self.last_updated = Some(Utc::now());
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(5), // Stat cards
                Constraint::Length(1), // Last updated
                Constraint::Min(0),
            ])
            .split(area);

        let title = Paragraph::new(Line::from("Dashboard Overview"))
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(title, chunks[0]);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(chunks[1]);

        render_stat_card(frame, cards[0], "Active Users", self.stats.active_users);
        render_stat_card(frame, cards[1], "Branches", self.stats.active_branches);
        render_stat_card(frame, cards[2], "Areas", self.stats.active_areas);
        render_stat_card(frame, cards[3], "Approved", self.stats.approved_reports);

        if let Some(updated) = self.last_updated {
            let line = Paragraph::new(Line::from(format!(
                "Last updated {}",
                updated.format("%H:%M:%S")
            )))
            .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(line, chunks[2]);
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

fn render_stat_card(frame: &mut Frame, area: Rect, title: &str, value: usize) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value = Paragraph::new(Line::from(value.to_string()))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(value, inner);
}
