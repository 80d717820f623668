//! Login screen

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::dialogs::centered_rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

pub struct LoginScreen {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Inline failure message (bad credentials, network down)
    pub error: Option<String>,
    /// True while the login request is outstanding
    pub submitting: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            focus: LoginField::Username,
            error: None,
            submitting: false,
        }
    }

    /// Clear everything, including the entered password
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn input_char(&mut self, c: char) {
        self.error = None;
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    /// Required-field presence check before the request is made
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username is required".to_string());
        }
        if self.password.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.focus_next(),
            KeyCode::Char(c) => self.input_char(c),
            KeyCode::Backspace => self.backspace(),
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = centered_rect(40, 40, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Management Information System ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(1), // Username
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Password
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Error
                Constraint::Min(0),
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let label_style = |field| {
            if self.focus == field {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            }
        };

        let username = Paragraph::new(Line::from(vec![
            Span::styled("Username: ", label_style(LoginField::Username)),
            Span::raw(self.username.clone()),
        ]));
        frame.render_widget(username, chunks[0]);

        let masked = "*".repeat(self.password.chars().count());
        let password = Paragraph::new(Line::from(vec![
            Span::styled("Password: ", label_style(LoginField::Password)),
            Span::raw(masked),
        ]));
        frame.render_widget(password, chunks[2]);

        if let Some(ref message) = self.error {
            let error = Paragraph::new(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(error, chunks[4]);
        }

        let hint = if self.submitting {
            "Logging in..."
        } else {
            "[Tab] field  [Enter] login  [Esc] quit"
        };
        let footer = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[6]);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_both_fields() {
        let mut screen = LoginScreen::new();
        assert!(screen.validate().is_err());

        screen.username = "admin".to_string();
        assert!(screen.validate().is_err());

        screen.password = "secret".to_string();
        assert!(screen.validate().is_ok());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut screen = LoginScreen::new();
        screen.input_char('a');
        screen.focus_next();
        screen.input_char('p');
        assert_eq!(screen.username, "a");
        assert_eq!(screen.password, "p");
    }

    #[test]
    fn test_reset_clears_password() {
        let mut screen = LoginScreen::new();
        screen.username = "admin".to_string();
        screen.password = "secret".to_string();
        screen.error = Some("Login failed".to_string());

        screen.reset();
        assert!(screen.username.is_empty());
        assert!(screen.password.is_empty());
        assert!(screen.error.is_none());
    }
}
