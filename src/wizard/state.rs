//! Shared form state for the branch-creation wizard.
//!
//! One `WizardState` is owned by the [`BranchWizard`](super::BranchWizard)
//! controller for the lifetime of a wizard session. Each step view mutates
//! only its own slice; nothing here touches the network.

use serde_json::Value;

use crate::api::dto::{
    BranchPayload, DatasheetTemplate, FullCreateRequest, SourceNamePayload,
};
use crate::api::ApiError;

/// Fields available on the daily collection datasheet
pub const DAILY_FIELDS: &[&str] = &[
    "Production Volume",
    "Operation Hours",
    "Number of Service Interruptions",
    "Electricity Consumption",
    "VFD Frequency",
    "Spot Flow",
    "Spot Pressure",
    "Time Spot Measurements were Taken",
    "Line Voltage [L1-L2]",
    "Line Voltage [L2-L3]",
    "Line Voltage [L3-L1]",
    "Line Current [L1-L2]",
    "Line Current [L2-L3]",
    "Line Current [L3-L1]",
];

/// Fields available on the monthly collection datasheet
pub const MONTHLY_FIELDS: &[&str] = &[
    "Production Volume",
    "Operation Hours",
    "Number of Service Interruptions",
    "Total Number of Hours of Service Interruption",
    "Electricity Consumption",
    "Electricity Cost",
    "Bulk Cost",
    "Name of Bulk Provider",
    "WTP Raw Water Cost",
    "WTP Raw Water Source",
    "WTP Raw Water Volume",
    "Method of Disinfection",
    "Disinfectant Cost",
    "Disinfection Amount",
    "Other Treatment Cost",
    "Liters Consumed - Emergency Operations",
    "Fuel Cost - Emergency Operations",
    "Total Hours Used - Emergency Operations",
    "Liters Consumed - Genset Operated",
    "Fuel Cost - Genset Operated",
];

/// The in-progress branch record, mutable until submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDraft {
    pub area_id: Option<u32>,
    pub branch_name: String,
    pub is_active: bool,
}

impl Default for BranchDraft {
    fn default() -> Self {
        Self {
            area_id: None,
            branch_name: String::new(),
            is_active: true,
        }
    }
}

/// A source name entered during the wizard session. The id is session-local
/// and only meaningful for display and edit targeting until persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNameEntry {
    pub id: u32,
    pub source_type_id: u32,
    pub name: String,
}

/// Field-name to enabled-flag selection over a fixed catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    catalog: &'static [&'static str],
    selected: Vec<String>,
}

impl FieldSelection {
    pub fn daily() -> Self {
        Self {
            catalog: DAILY_FIELDS,
            selected: Vec::new(),
        }
    }

    pub fn monthly() -> Self {
        Self {
            catalog: MONTHLY_FIELDS,
            selected: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &'static [&'static str] {
        self.catalog
    }

    /// Flip one field. Toggling twice restores the original state.
    pub fn toggle(&mut self, field: &str) {
        if !self.catalog.contains(&field) {
            return;
        }
        if self.selected.iter().any(|f| f == field) {
            self.selected.retain(|f| f != field);
        } else {
            self.selected.push(field.to_string());
        }
    }

    pub fn is_selected(&self, field: &str) -> bool {
        self.selected.iter().any(|f| f == field)
    }

    /// Enabled fields in catalog order
    pub fn selected(&self) -> Vec<&'static str> {
        self.catalog
            .iter()
            .filter(|f| self.is_selected(f))
            .copied()
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Full catalog as a JSON object of field-name to flag
    pub fn to_map(&self) -> serde_json::Map<String, Value> {
        self.catalog
            .iter()
            .map(|f| ((*f).to_string(), Value::Bool(self.is_selected(f))))
            .collect()
    }
}

/// Steps of the wizard, in order. Step numbers are 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    /// Branch attributes and source-type checklist
    Branch,
    /// Source-name list editor
    SourceNames,
    /// Daily datasheet field checklist
    DailyFields,
    /// Monthly datasheet field checklist; hosts Submit
    MonthlyFields,
}

impl WizardStep {
    /// 1-based step number, always within 1..=4
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Branch => 1,
            WizardStep::SourceNames => 2,
            WizardStep::DailyFields => 3,
            WizardStep::MonthlyFields => 4,
        }
    }

    pub fn is_first(self) -> bool {
        self == WizardStep::Branch
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::MonthlyFields
    }

    fn next(self) -> Self {
        match self {
            WizardStep::Branch => WizardStep::SourceNames,
            WizardStep::SourceNames => WizardStep::DailyFields,
            WizardStep::DailyFields | WizardStep::MonthlyFields => WizardStep::MonthlyFields,
        }
    }

    fn prev(self) -> Self {
        match self {
            WizardStep::Branch | WizardStep::SourceNames => WizardStep::Branch,
            WizardStep::DailyFields => WizardStep::SourceNames,
            WizardStep::MonthlyFields => WizardStep::DailyFields,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Branch => "Branch Details",
            WizardStep::SourceNames => "Add a Source Name",
            WizardStep::DailyFields => "Forms for Daily Datasheet",
            WizardStep::MonthlyFields => "Forms for Monthly Datasheet",
        }
    }
}

/// Everything the wizard accumulates across its four steps
#[derive(Debug, Clone)]
pub struct WizardState {
    pub step: WizardStep,
    pub branch: BranchDraft,
    /// Selected source-type ids (step 1 checklist)
    pub source_types: Vec<u32>,
    /// Insertion-ordered source names (step 2)
    pub source_names: Vec<SourceNameEntry>,
    pub daily: FieldSelection,
    pub monthly: FieldSelection,
    next_source_name_id: u32,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Branch,
            branch: BranchDraft::default(),
            source_types: Vec::new(),
            source_names: Vec::new(),
            daily: FieldSelection::daily(),
            monthly: FieldSelection::monthly(),
            next_source_name_id: 1,
        }
    }

    /// Restore every field to its initial empty value
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Move forward one step; a no-op on the final step
    pub fn advance(&mut self) {
        self.step = self.step.next();
    }

    /// Move back one step; a no-op on the first step
    pub fn retreat(&mut self) {
        self.step = self.step.prev();
    }

    // ─── Step 1 slice ───────────────────────────────────────────────────────

    pub fn toggle_source_type(&mut self, type_id: u32) {
        if self.source_types.contains(&type_id) {
            self.source_types.retain(|id| *id != type_id);
        } else {
            self.source_types.push(type_id);
        }
    }

    pub fn source_type_selected(&self, type_id: u32) -> bool {
        self.source_types.contains(&type_id)
    }

    /// Required-field presence check for the branch step
    pub fn validate_branch(&self) -> Result<(), ApiError> {
        if self.branch.branch_name.trim().is_empty() {
            return Err(ApiError::validation("Branch name is required"));
        }
        if self.branch.area_id.is_none() {
            return Err(ApiError::validation("Area is required"));
        }
        Ok(())
    }

    // ─── Step 2 slice ───────────────────────────────────────────────────────

    /// Append a source name; empty or whitespace-only names are rejected.
    /// Returns the assigned session-local id.
    pub fn add_source_name(&mut self, source_type_id: u32, name: &str) -> Option<u32> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.next_source_name_id;
        self.next_source_name_id += 1;
        self.source_names.push(SourceNameEntry {
            id,
            source_type_id,
            name: name.to_string(),
        });
        Some(id)
    }

    /// Rename an entry in place, preserving its position and id
    pub fn rename_source_name(&mut self, id: u32, new_name: &str) -> bool {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return false;
        }
        match self.source_names.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove_source_name(&mut self, id: u32) {
        self.source_names.retain(|e| e.id != id);
    }

    // ─── Submission ─────────────────────────────────────────────────────────

    /// Build the single aggregate payload for `POST /branch/full-create`.
    ///
    /// Fails with a validation error when the branch slice is incomplete,
    /// which is unreachable through the UI since leaving step 1 requires
    /// `validate_branch` to pass.
    pub fn full_create_request(&self) -> Result<FullCreateRequest, ApiError> {
        self.validate_branch()?;
        let area_id = self
            .branch
            .area_id
            .ok_or_else(|| ApiError::validation("Area is required"))?;

        Ok(FullCreateRequest {
            branch: BranchPayload {
                area_id,
                branch_name: self.branch.branch_name.trim().to_string(),
                is_active: self.branch.is_active,
            },
            source_names: self
                .source_names
                .iter()
                .map(|e| SourceNamePayload {
                    source_name: e.name.clone(),
                    source_type_id: e.source_type_id,
                })
                .collect(),
            daily: DatasheetTemplate {
                fields: self.daily.to_map(),
            },
            monthly: DatasheetTemplate {
                fields: self.monthly.to_map(),
            },
        })
    }
}
