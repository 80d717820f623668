//! Branch attributes step rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::dialogs::centered_rect;
use crate::wizard::{BranchField, BranchWizard};

impl BranchWizard {
    pub(crate) fn render_branch_step(&mut self, frame: &mut Frame) {
        let area = centered_rect(60, 80, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" Add Branch "),
                Span::styled(
                    "(step 1/4)",
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(1), // Area selector
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Branch name
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Active toggle
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Source type header
                Constraint::Min(4),    // Source type checklist
                Constraint::Length(1), // Validation error
                Constraint::Length(2), // Footer
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

        // Area selector
        let area_name = self
            .area_idx
            .and_then(|i| self.areas.get(i))
            .map_or("Select Area (default JV)", |a| a.area_name.as_str());
        let area_line = Paragraph::new(Line::from(vec![
            Span::styled("Area:        ", label_style(BranchField::Area)),
            Span::raw("< "),
            Span::raw(area_name),
            Span::raw(" >"),
        ]));
        frame.render_widget(area_line, chunks[0]);

        // Branch name input
        let cursor = if self.focus == BranchField::Name {
            "█"
        } else {
            ""
        };
        let name_line = Paragraph::new(Line::from(vec![
            Span::styled("Branch Name: ", label_style(BranchField::Name)),
            Span::raw(self.state.branch.branch_name.clone()),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]));
        frame.render_widget(name_line, chunks[2]);

        // Active toggle
        let active_mark = if self.state.branch.is_active {
            "[x]"
        } else {
            "[ ]"
        };
        let active_line = Paragraph::new(Line::from(vec![
            Span::styled("Active:      ", label_style(BranchField::Active)),
            Span::raw(active_mark),
        ]));
        frame.render_widget(active_line, chunks[4]);

        // Source type checklist
        let header = Paragraph::new(Line::from(Span::styled(
            "Source Type",
            label_style(BranchField::SourceTypes).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(header, chunks[6]);

        let items: Vec<ListItem> = self
            .source_types
            .iter()
            .map(|t| {
                let mark = if self.state.source_type_selected(t.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                ListItem::new(Line::from(format!("{} {}", mark, t.name)))
            })
            .collect();

        let highlight = if self.focus == BranchField::SourceTypes {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[7], &mut self.type_state);

        // Validation error
        if let Some(ref message) = self.form_error {
            let error = Paragraph::new(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )));
            frame.render_widget(error, chunks[8]);
        }

        let footer = Paragraph::new(Line::from(Span::styled(
            "[Tab] field  [←/→] area  [Space] toggle  [Enter] next  [Esc] cancel",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[9]);
    }
}
