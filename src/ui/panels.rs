//! List panels and chrome shared by the screens

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::dto::{Area, Branch, Role, User};

/// Top bar with the product name and the signed-in user
pub struct HeaderBar<'a> {
    pub screen_title: &'a str,
    pub username: Option<&'a str>,
}

impl HeaderBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let user = self.username.unwrap_or("not signed in");
        let line = Line::from(vec![
            Span::styled(
                " MIS Console ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("│ "),
            Span::raw(self.screen_title),
            Span::raw(" │ "),
            Span::styled(user, Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Bottom bar with the key hints for the active screen
pub struct StatusBar<'a> {
    pub hints: &'a str,
}

impl StatusBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.hints,
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Id to display-name lookup against the fetched area list
pub fn area_name(areas: &[Area], area_id: u32) -> &str {
    areas
        .iter()
        .find(|a| a.id == area_id)
        .map_or("", |a| a.area_name.as_str())
}

/// Id to display-name lookup against the fetched role list
pub fn role_name(roles: &[Role], role_id: Option<u32>) -> &str {
    role_id
        .and_then(|id| roles.iter().find(|r| r.id == id))
        .map_or("", |r| r.role_name.as_str())
}

/// Read-only table of users with the role lookup applied
pub struct UsersView {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub state: ListState,
}

impl UsersView {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            roles: Vec::new(),
            state: ListState::default(),
        }
    }

    pub fn update(&mut self, users: Vec<User>, roles: Vec<Role>) {
        self.users = users;
        self.roles = roles;
        if self.users.is_empty() {
            self.state.select(None);
        } else if self.state.selected().is_none() {
            self.state.select(Some(0));
        }
    }

    pub fn select_next(&mut self) {
        select_next(&mut self.state, self.users.len());
    }

    pub fn select_prev(&mut self) {
        select_prev(&mut self.state, self.users.len());
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .users
            .iter()
            .map(|u| {
                let active = if u.is_active { "[x]" } else { "[ ]" };
                ListItem::new(Line::from(format!(
                    "{:<20} {:<16} {}",
                    u.username,
                    role_name(&self.roles, u.role_id),
                    active
                )))
            })
            .collect();

        let title = format!("Users ({})", self.users.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

impl Default for UsersView {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only table of branches with the area lookup applied. Hosts the
/// "Add Branch" action that opens the wizard.
pub struct BranchesView {
    pub branches: Vec<Branch>,
    pub areas: Vec<Area>,
    pub state: ListState,
}

impl BranchesView {
    pub fn new() -> Self {
        Self {
            branches: Vec::new(),
            areas: Vec::new(),
            state: ListState::default(),
        }
    }

    pub fn update(&mut self, branches: Vec<Branch>, areas: Vec<Area>) {
        self.branches = branches;
        self.areas = areas;
        if self.branches.is_empty() {
            self.state.select(None);
        } else if self.state.selected().is_none() {
            self.state.select(Some(0));
        }
    }

    pub fn selected_branch(&self) -> Option<&Branch> {
        self.state.selected().and_then(|i| self.branches.get(i))
    }

    pub fn select_next(&mut self) {
        select_next(&mut self.state, self.branches.len());
    }

    pub fn select_prev(&mut self) {
        select_prev(&mut self.state, self.branches.len());
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .branches
            .iter()
            .map(|b| {
                let active = if b.is_active { "[x]" } else { "[ ]" };
                ListItem::new(Line::from(format!(
                    "{:<24} {:<16} {}",
                    b.branch_name,
                    area_name(&self.areas, b.area_id),
                    active
                )))
            })
            .collect();

        let title = format!("Branches ({})", self.branches.len());
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

impl Default for BranchesView {
    fn default() -> Self {
        Self::new()
    }
}

fn select_next(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = state.selected().map_or(0, |i| (i + 1) % len);
    state.select(Some(i));
}

fn select_prev(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = state
        .selected()
        .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
    state.select(Some(i));
}
