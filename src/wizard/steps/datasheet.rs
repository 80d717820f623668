//! Datasheet field checklist rendering, shared by the daily and monthly steps

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::ui::dialogs::centered_rect;
use crate::wizard::{BranchWizard, FieldSelection};

impl BranchWizard {
    pub(crate) fn render_daily_fields_step(&mut self, frame: &mut Frame) {
        render_field_checklist(
            frame,
            "Forms for Daily Datasheet",
            3,
            &self.state.daily,
            &mut self.daily_state,
            "[Enter] next",
        );
    }

    pub(crate) fn render_monthly_fields_step(&mut self, frame: &mut Frame) {
        let confirm = if self.submitting {
            "submitting..."
        } else {
            "[Enter] save branch"
        };
        render_field_checklist(
            frame,
            "Forms for Monthly Datasheet",
            4,
            &self.state.monthly,
            &mut self.monthly_state,
            confirm,
        );
    }
}

fn render_field_checklist(
    frame: &mut Frame,
    title: &str,
    step_number: u8,
    selection: &FieldSelection,
    list_state: &mut ListState,
    confirm_hint: &str,
) {
    let area = centered_rect(60, 85, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Line::from(vec![
            Span::raw(format!(" {title} ")),
            Span::styled(
                format!("(step {step_number}/4)"),
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
        .margin(1)
        .constraints([
            Constraint::Length(1), // Selected count
            Constraint::Min(6),    // Field checklist
            Constraint::Length(2), // Footer
        ])
        .split(inner);

    let count = Paragraph::new(Line::from(Span::styled(
        format!(
            "{} of {} fields enabled",
            selection.selected_count(),
            selection.catalog().len()
        ),
        Style::default().fg(Color::Gray),
    )));
    frame.render_widget(count, chunks[0]);

    let items: Vec<ListItem> = selection
        .catalog()
        .iter()
        .map(|field| {
            let mark = if selection.is_selected(field) {
                "[x]"
            } else {
                "[ ]"
            };
            ListItem::new(Line::from(format!("{mark} {field}")))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[1], list_state);

    let footer = Paragraph::new(Line::from(Span::styled(
        format!("[Space] toggle  {confirm_hint}  [Esc] back"),
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}
