//! Modal dialogs and shared dialog helpers

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Helper to create a centered rect using a percentage of the available rect
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// The single blocking alert every error and confirmation goes through.
/// While visible it swallows all input except dismissal.
pub struct AlertDialog {
    pub visible: bool,
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl AlertDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            kind: AlertKind::Info,
            title: String::new(),
            message: String::new(),
        }
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.kind = AlertKind::Info;
        self.title = title.into();
        self.message = message.into();
        self.visible = true;
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.kind = AlertKind::Error;
        self.title = title.into();
        self.message = message.into();
        self.visible = true;
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let border_color = match self.kind {
            AlertKind::Info => Color::Green,
            AlertKind::Error => Color::Red,
        };

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    self.title.clone(),
                    Style::default()
                        .fg(border_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(inner);

        let message = Paragraph::new(self.message.clone())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);
        frame.render_widget(message, chunks[0]);

        let footer = Paragraph::new(Line::from(Span::styled(
            "[Enter] OK",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[1]);
    }
}

impl Default for AlertDialog {
    fn default() -> Self {
        Self::new()
    }
}
