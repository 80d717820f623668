//! Source-name list editor step rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::dialogs::centered_rect;
use crate::wizard::BranchWizard;

impl BranchWizard {
    pub(crate) fn render_source_names_step(&mut self, frame: &mut Frame) {
        let area = centered_rect(60, 80, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" Add a Source Name "),
                Span::styled("(step 2/4)", Style::default().fg(Color::DarkGray)),
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
                Constraint::Min(5),    // Entered names
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Entry type selector
                Constraint::Length(1), // Entry input
                Constraint::Length(2), // Footer
            ])
            .split(inner);

        // The table of entered names, insertion order
        let type_name = |type_id: u32| {
            self.source_types
                .iter()
                .find(|t| t.id == type_id)
                .map_or("?", |t| t.name.as_str())
        };
        let items: Vec<ListItem> = self
            .state
            .source_names
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(format!(
                    "{:<3} {:<28} {}",
                    entry.id,
                    entry.name,
                    type_name(entry.source_type_id)
                )))
            })
            .collect();

        let title = format!("Source Names ({})", self.state.source_names.len());
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[0], &mut self.names_state);

        // Source type for the new entry
        let entry_types = self.entry_types();
        let entry_type = entry_types
            .get(self.entry_type_idx.min(entry_types.len().saturating_sub(1)))
            .map_or("-", |t| t.name.as_str());
        let type_line = Paragraph::new(Line::from(vec![
            Span::styled("Source Type: ", Style::default().fg(Color::Gray)),
            Span::raw("< "),
            Span::raw(entry_type),
            Span::raw(" >"),
        ]));
        frame.render_widget(type_line, chunks[2]);

        // Entry input, doubling as the rename editor
        let label = if self.renaming.is_some() {
            "Rename:      "
        } else {
            "Source Name: "
        };
        let input_line = Paragraph::new(Line::from(vec![
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(self.name_entry.clone()),
            Span::styled("█", Style::default().fg(Color::Cyan)),
        ]));
        frame.render_widget(input_line, chunks[3]);

        let footer = Paragraph::new(Line::from(Span::styled(
            "[Enter] add / next when empty  [F2] rename  [Del] delete  [←/→] type  [Esc] back",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[4]);
    }
}
