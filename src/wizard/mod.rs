//! Multi-step branch-creation wizard.
//!
//! Four sequential steps over one shared [`WizardState`]: branch attributes
//! with a source-type checklist, a source-name list editor, and the daily and
//! monthly datasheet field checklists. Submission is only reachable from the
//! final step and produces exactly one `POST /branch/full-create` payload.

use crossterm::event::KeyCode;
use ratatui::{widgets::ListState, Frame};

use crate::api::dto::{Area, SourceType};

pub mod state;
pub mod steps;

pub use state::{
    BranchDraft, FieldSelection, SourceNameEntry, WizardState, WizardStep, DAILY_FIELDS,
    MONTHLY_FIELDS,
};

#[cfg(test)]
mod tests;

/// Result of feeding a key to the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    /// Stay in the wizard
    Continue,
    /// User cancelled; state has been reset
    Cancel,
    /// User confirmed on the final step; caller submits the accumulated state
    Submit,
}

/// Which control on the branch step has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BranchField {
    Area,
    Name,
    Active,
    SourceTypes,
}

impl BranchField {
    fn next(self) -> Self {
        match self {
            Self::Area => Self::Name,
            Self::Name => Self::Active,
            Self::Active => Self::SourceTypes,
            Self::SourceTypes => Self::Area,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Area => Self::SourceTypes,
            Self::Name => Self::Area,
            Self::Active => Self::Name,
            Self::SourceTypes => Self::Active,
        }
    }
}

/// Controller owning the wizard session. Step views read slices of
/// [`WizardState`] and the per-step cursor state held here; nothing is
/// duplicated between steps.
pub struct BranchWizard {
    pub visible: bool,
    pub state: WizardState,

    /// Areas for the step-1 selector (fetched by the branches screen)
    pub areas: Vec<Area>,
    /// Source-type reference data for the step-1 checklist
    pub source_types: Vec<SourceType>,

    /// True while the full-create request is outstanding; the submit control
    /// is inert until it clears
    pub submitting: bool,

    // Step 1 cursor state
    pub(crate) focus: BranchField,
    pub(crate) area_idx: Option<usize>,
    pub(crate) type_state: ListState,
    pub(crate) form_error: Option<String>,

    // Step 2 cursor state
    pub(crate) names_state: ListState,
    pub(crate) name_entry: String,
    pub(crate) entry_type_idx: usize,
    pub(crate) renaming: Option<u32>,

    // Step 3/4 cursor state
    pub(crate) daily_state: ListState,
    pub(crate) monthly_state: ListState,
}

impl BranchWizard {
    pub fn new() -> Self {
        let mut type_state = ListState::default();
        type_state.select(Some(0));
        let mut daily_state = ListState::default();
        daily_state.select(Some(0));
        let mut monthly_state = ListState::default();
        monthly_state.select(Some(0));

        Self {
            visible: false,
            state: WizardState::new(),
            areas: Vec::new(),
            source_types: Vec::new(),
            submitting: false,
            focus: BranchField::Area,
            area_idx: None,
            type_state,
            form_error: None,
            names_state: ListState::default(),
            name_entry: String::new(),
            entry_type_idx: 0,
            renaming: None,
            daily_state,
            monthly_state,
        }
    }

    /// Start a fresh wizard session with the given reference data
    pub fn open(&mut self, areas: Vec<Area>, source_types: Vec<SourceType>) {
        *self = Self::new();
        self.areas = areas;
        self.source_types = source_types;
        self.visible = true;
    }

    /// Discard the session and reset all accumulated state
    pub fn close(&mut self) {
        self.state.reset();
        self.visible = false;
        self.submitting = false;
        self.form_error = None;
        self.name_entry.clear();
        self.renaming = None;
    }

    /// Called by the app after a successful submission
    pub fn finish(&mut self) {
        self.close();
    }

    /// Source types the step-2 entry selector cycles through: the step-1
    /// selection when non-empty, otherwise the full catalog
    pub(crate) fn entry_types(&self) -> Vec<&SourceType> {
        let selected: Vec<&SourceType> = self
            .source_types
            .iter()
            .filter(|t| self.state.source_type_selected(t.id))
            .collect();
        if selected.is_empty() {
            self.source_types.iter().collect()
        } else {
            selected
        }
    }

    fn entry_type_id(&self) -> Option<u32> {
        let types = self.entry_types();
        types
            .get(self.entry_type_idx.min(types.len().saturating_sub(1)))
            .map(|t| t.id)
    }

    /// Feed one key press to the current step
    pub fn handle_key(&mut self, key: KeyCode) -> WizardOutcome {
        match self.state.step {
            WizardStep::Branch => self.handle_branch_key(key),
            WizardStep::SourceNames => self.handle_source_names_key(key),
            WizardStep::DailyFields | WizardStep::MonthlyFields => self.handle_fields_key(key),
        }
    }

    // ─── Step 1: branch attributes + source-type checklist ──────────────────

    fn handle_branch_key(&mut self, key: KeyCode) -> WizardOutcome {
        match key {
            KeyCode::Esc => {
                self.close();
                return WizardOutcome::Cancel;
            }
            KeyCode::Enter => match self.state.validate_branch() {
                Ok(()) => {
                    self.form_error = None;
                    self.state.advance();
                }
                Err(err) => {
                    self.form_error = Some(err.to_string());
                }
            },
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Left if self.focus == BranchField::Area => self.cycle_area(false),
            KeyCode::Right if self.focus == BranchField::Area => self.cycle_area(true),
            KeyCode::Up if self.focus == BranchField::SourceTypes => {
                select_prev(&mut self.type_state, self.source_types.len());
            }
            KeyCode::Down if self.focus == BranchField::SourceTypes => {
                select_next(&mut self.type_state, self.source_types.len());
            }
            KeyCode::Char(' ') if self.focus == BranchField::Active => {
                self.state.branch.is_active = !self.state.branch.is_active;
            }
            KeyCode::Char(' ') if self.focus == BranchField::SourceTypes => {
                if let Some(i) = self.type_state.selected() {
                    if let Some(source_type) = self.source_types.get(i) {
                        self.state.toggle_source_type(source_type.id);
                    }
                }
            }
            KeyCode::Char(c) if self.focus == BranchField::Name => {
                self.state.branch.branch_name.push(c);
                self.form_error = None;
            }
            KeyCode::Backspace if self.focus == BranchField::Name => {
                self.state.branch.branch_name.pop();
            }
            _ => {}
        }
        WizardOutcome::Continue
    }

    fn cycle_area(&mut self, forward: bool) {
        if self.areas.is_empty() {
            return;
        }
        let len = self.areas.len();
        self.area_idx = Some(match (self.area_idx, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
        });
        self.state.branch.area_id = self.area_idx.map(|i| self.areas[i].id);
        self.form_error = None;
    }

    // ─── Step 2: source-name list editor ────────────────────────────────────

    fn handle_source_names_key(&mut self, key: KeyCode) -> WizardOutcome {
        match key {
            KeyCode::Esc => {
                if self.renaming.take().is_some() {
                    self.name_entry.clear();
                } else {
                    self.state.retreat();
                }
            }
            KeyCode::Enter => {
                if let Some(id) = self.renaming.take() {
                    self.state.rename_source_name(id, &self.name_entry);
                    self.name_entry.clear();
                } else if self.name_entry.trim().is_empty() {
                    // Empty entry box: proceed to the next step
                    self.state.advance();
                } else if let Some(type_id) = self.entry_type_id() {
                    self.state.add_source_name(type_id, &self.name_entry);
                    self.name_entry.clear();
                    let last = self.state.source_names.len().saturating_sub(1);
                    self.names_state.select(Some(last));
                }
            }
            KeyCode::Up => select_prev(&mut self.names_state, self.state.source_names.len()),
            KeyCode::Down => select_next(&mut self.names_state, self.state.source_names.len()),
            KeyCode::Left => {
                let len = self.entry_types().len();
                if len > 0 {
                    self.entry_type_idx = if self.entry_type_idx == 0 {
                        len - 1
                    } else {
                        self.entry_type_idx - 1
                    };
                }
            }
            KeyCode::Right => {
                let len = self.entry_types().len();
                if len > 0 {
                    self.entry_type_idx = (self.entry_type_idx + 1) % len;
                }
            }
            KeyCode::F(2) => {
                // Load the selected entry into the input for renaming
                if let Some((id, name)) = self
                    .selected_source_name()
                    .map(|e| (e.id, e.name.clone()))
                {
                    self.renaming = Some(id);
                    self.name_entry = name;
                }
            }
            KeyCode::Delete => {
                if let Some(id) = self.selected_source_name().map(|e| e.id) {
                    self.state.remove_source_name(id);
                    let len = self.state.source_names.len();
                    if len == 0 {
                        self.names_state.select(None);
                    } else if let Some(i) = self.names_state.selected() {
                        self.names_state.select(Some(i.min(len - 1)));
                    }
                }
            }
            KeyCode::Char(c) => self.name_entry.push(c),
            KeyCode::Backspace => {
                self.name_entry.pop();
            }
            _ => {}
        }
        WizardOutcome::Continue
    }

    fn selected_source_name(&self) -> Option<&SourceNameEntry> {
        self.names_state
            .selected()
            .and_then(|i| self.state.source_names.get(i))
    }

    // ─── Steps 3 and 4: datasheet field checklists ──────────────────────────

    fn handle_fields_key(&mut self, key: KeyCode) -> WizardOutcome {
        let monthly = self.state.step == WizardStep::MonthlyFields;
        let catalog = if monthly {
            self.state.monthly.catalog()
        } else {
            self.state.daily.catalog()
        };
        let list_state = if monthly {
            &mut self.monthly_state
        } else {
            &mut self.daily_state
        };

        match key {
            KeyCode::Esc => self.state.retreat(),
            KeyCode::Up => select_prev(list_state, catalog.len()),
            KeyCode::Down => select_next(list_state, catalog.len()),
            KeyCode::Char(' ') => {
                if let Some(field) = list_state.selected().and_then(|i| catalog.get(i)) {
                    if monthly {
                        self.state.monthly.toggle(field);
                    } else {
                        self.state.daily.toggle(field);
                    }
                }
            }
            KeyCode::Enter => {
                if self.state.step.is_last() {
                    if !self.submitting {
                        return WizardOutcome::Submit;
                    }
                } else {
                    self.state.advance();
                }
            }
            _ => {}
        }
        WizardOutcome::Continue
    }

    /// Render the current step
    pub fn render(&mut self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        match self.state.step {
            WizardStep::Branch => self.render_branch_step(frame),
            WizardStep::SourceNames => self.render_source_names_step(frame),
            WizardStep::DailyFields => self.render_daily_fields_step(frame),
            WizardStep::MonthlyFields => self.render_monthly_fields_step(frame),
        }
    }
}

impl Default for BranchWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap-around list navigation helpers shared by the steps
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
