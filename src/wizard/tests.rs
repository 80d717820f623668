//! Tests for the branch-creation wizard

use crossterm::event::KeyCode;

use super::state::*;
use super::{BranchWizard, WizardOutcome};
use crate::api::dto::{Area, SourceType};

fn test_areas() -> Vec<Area> {
    vec![
        Area {
            id: 1,
            area_name: "JV".to_string(),
            is_active: true,
        },
        Area {
            id: 3,
            area_name: "North".to_string(),
            is_active: true,
        },
    ]
}

fn open_wizard() -> BranchWizard {
    let mut wizard = BranchWizard::new();
    wizard.open(test_areas(), SourceType::builtin_catalog());
    wizard
}

fn type_text(wizard: &mut BranchWizard, text: &str) {
    for c in text.chars() {
        wizard.handle_key(KeyCode::Char(c));
    }
}

// ─── Step sequencing ──────────────────────────────────────────────────────────

#[test]
fn test_new_state_starts_at_step_one() {
    let state = WizardState::new();
    assert_eq!(state.step, WizardStep::Branch);
    assert_eq!(state.step.number(), 1);
    assert!(state.branch.branch_name.is_empty());
    assert!(state.branch.area_id.is_none());
    assert!(state.branch.is_active);
}

#[test]
fn test_retreat_at_first_step_is_noop() {
    let mut state = WizardState::new();
    state.retreat();
    assert_eq!(state.step, WizardStep::Branch);
}

#[test]
fn test_advance_at_final_step_is_noop() {
    let mut state = WizardState::new();
    state.advance();
    state.advance();
    state.advance();
    assert_eq!(state.step, WizardStep::MonthlyFields);
    state.advance();
    assert_eq!(state.step, WizardStep::MonthlyFields);
}

#[test]
fn test_step_number_stays_in_bounds() {
    let mut state = WizardState::new();
    for _ in 0..10 {
        state.advance();
        assert!((1..=4).contains(&state.step.number()));
    }
    for _ in 0..10 {
        state.retreat();
        assert!((1..=4).contains(&state.step.number()));
    }
}

#[test]
fn test_steps_are_sequential() {
    let mut state = WizardState::new();
    let forward: Vec<u8> = (0..3)
        .map(|_| {
            state.advance();
            state.step.number()
        })
        .collect();
    assert_eq!(forward, vec![2, 3, 4]);

    let backward: Vec<u8> = (0..3)
        .map(|_| {
            state.retreat();
            state.step.number()
        })
        .collect();
    assert_eq!(backward, vec![3, 2, 1]);
}

// ─── Branch step validation ───────────────────────────────────────────────────

#[test]
fn test_branch_step_blocks_until_required_fields_present() {
    let mut wizard = open_wizard();

    // Enter with nothing filled in: stays on step 1 with an error
    wizard.handle_key(KeyCode::Enter);
    assert_eq!(wizard.state.step, WizardStep::Branch);
    assert!(wizard.form_error.is_some());

    // Name alone is not enough, the area is still missing
    wizard.handle_key(KeyCode::Tab); // Area -> Name
    type_text(&mut wizard, "Main St");
    wizard.handle_key(KeyCode::Enter);
    assert_eq!(wizard.state.step, WizardStep::Branch);

    // Pick an area, then Enter advances
    wizard.handle_key(KeyCode::BackTab); // Name -> Area
    wizard.handle_key(KeyCode::Right);
    wizard.handle_key(KeyCode::Enter);
    assert_eq!(wizard.state.step, WizardStep::SourceNames);
    assert!(wizard.form_error.is_none());
}

#[test]
fn test_validate_branch_messages() {
    let mut state = WizardState::new();
    let err = state.validate_branch().unwrap_err();
    assert!(err.is_validation());

    state.branch.branch_name = "Main St".to_string();
    assert!(state.validate_branch().is_err());

    state.branch.area_id = Some(3);
    assert!(state.validate_branch().is_ok());
}

// ─── Field selection ──────────────────────────────────────────────────────────

#[test]
fn test_double_toggle_is_identity() {
    let mut selection = FieldSelection::daily();
    let before = selection.clone();

    selection.toggle("Production Volume");
    assert!(selection.is_selected("Production Volume"));

    selection.toggle("Production Volume");
    assert_eq!(selection, before);
}

#[test]
fn test_toggle_unknown_field_is_ignored() {
    let mut selection = FieldSelection::daily();
    selection.toggle("No Such Field");
    assert_eq!(selection.selected_count(), 0);
}

#[test]
fn test_selected_fields_keep_catalog_order() {
    let mut selection = FieldSelection::daily();
    selection.toggle("Operation Hours");
    selection.toggle("Production Volume");
    assert_eq!(
        selection.selected(),
        vec!["Production Volume", "Operation Hours"]
    );
}

#[test]
fn test_daily_and_monthly_catalogs() {
    assert_eq!(FieldSelection::daily().catalog().len(), 14);
    assert_eq!(FieldSelection::monthly().catalog().len(), 20);
}

// ─── Source names ─────────────────────────────────────────────────────────────

#[test]
fn test_source_name_ids_are_sequential_and_not_reused() {
    let mut state = WizardState::new();
    assert_eq!(state.add_source_name(1, "Well A"), Some(1));
    assert_eq!(state.add_source_name(1, "Well B"), Some(2));

    state.remove_source_name(2);
    assert_eq!(state.add_source_name(2, "Spring"), Some(3));
    assert_eq!(state.source_names.len(), 2);
}

#[test]
fn test_blank_source_name_rejected() {
    let mut state = WizardState::new();
    assert_eq!(state.add_source_name(1, "   "), None);
    assert!(state.source_names.is_empty());
}

#[test]
fn test_rename_preserves_position_and_id() {
    let mut state = WizardState::new();
    state.add_source_name(1, "Well A");
    state.add_source_name(1, "Well B");

    assert!(state.rename_source_name(1, "Well A (rehab)"));
    assert_eq!(state.source_names[0].id, 1);
    assert_eq!(state.source_names[0].name, "Well A (rehab)");

    assert!(!state.rename_source_name(99, "nope"));
    assert!(!state.rename_source_name(1, "  "));
}

// ─── Reset ────────────────────────────────────────────────────────────────────

#[test]
fn test_reset_restores_every_field() {
    let mut state = WizardState::new();
    state.branch.branch_name = "Main St".to_string();
    state.branch.area_id = Some(3);
    state.branch.is_active = false;
    state.toggle_source_type(1);
    state.add_source_name(1, "Well A");
    state.daily.toggle("Production Volume");
    state.monthly.toggle("Electricity Cost");
    state.advance();

    state.reset();

    assert_eq!(state.step, WizardStep::Branch);
    assert!(state.branch.branch_name.is_empty());
    assert!(state.branch.area_id.is_none());
    assert!(state.branch.is_active);
    assert!(state.source_types.is_empty());
    assert!(state.source_names.is_empty());
    assert_eq!(state.daily.selected_count(), 0);
    assert_eq!(state.monthly.selected_count(), 0);
    // Ids restart after a reset; this is a brand-new session
    assert_eq!(state.add_source_name(1, "Well A"), Some(1));
}

// ─── Full scenario ────────────────────────────────────────────────────────────

#[test]
fn test_full_wizard_walk_builds_one_payload() {
    let mut wizard = open_wizard();

    // Step 1: area 3, branch name, first source type checked
    wizard.handle_key(KeyCode::Right);
    wizard.handle_key(KeyCode::Right); // cycles JV -> North (id 3)
    wizard.handle_key(KeyCode::Tab);
    type_text(&mut wizard, "Main St");
    wizard.handle_key(KeyCode::Tab); // Name -> Active
    wizard.handle_key(KeyCode::Tab); // Active -> SourceTypes
    wizard.handle_key(KeyCode::Char(' ')); // check "Deep Well - Electric" (id 1)
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Continue);
    assert_eq!(wizard.state.step, WizardStep::SourceNames);

    // Step 2: one source name
    type_text(&mut wizard, "Well A");
    wizard.handle_key(KeyCode::Enter);
    assert_eq!(wizard.state.source_names.len(), 1);
    wizard.handle_key(KeyCode::Enter); // empty entry: advance
    assert_eq!(wizard.state.step, WizardStep::DailyFields);

    // Steps 3 and 4: leave every checklist false
    wizard.handle_key(KeyCode::Enter);
    assert_eq!(wizard.state.step, WizardStep::MonthlyFields);
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Submit);

    let request = wizard.state.full_create_request().unwrap();
    let json = serde_json::to_string(&request).unwrap();
    assert!(json.contains(r#""branchName":"Main St""#));
    assert!(json.contains(r#""areaId":3"#));
    assert!(json.contains(r#""sourceName":"Well A""#));
    assert!(json.contains(r#""sourceTypeId":1"#));
    assert_eq!(request.source_names.len(), 1);
    assert!(request.daily.fields.values().all(|v| v == &serde_json::Value::Bool(false)));
    assert!(request.monthly.fields.values().all(|v| v == &serde_json::Value::Bool(false)));
}

#[test]
fn test_submit_control_disabled_while_in_flight() {
    let mut wizard = open_wizard();
    wizard.state.branch.branch_name = "Main St".to_string();
    wizard.state.branch.area_id = Some(3);
    wizard.state.advance();
    wizard.state.advance();
    wizard.state.advance();

    wizard.submitting = true;
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Continue);

    wizard.submitting = false;
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Submit);
}

#[test]
fn test_failed_submission_keeps_state_for_retry() {
    // The app leaves the wizard untouched on an API error; everything the
    // user entered must still be there for a retry.
    let mut wizard = open_wizard();
    wizard.state.branch.branch_name = "Main St".to_string();
    wizard.state.branch.area_id = Some(3);
    wizard.state.add_source_name(1, "Well A");
    wizard.state.advance();
    wizard.state.advance();
    wizard.state.advance();

    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Submit);

    // Simulated failure path: submitting flag cleared, nothing else changes
    wizard.submitting = false;
    assert_eq!(wizard.state.step, WizardStep::MonthlyFields);
    assert_eq!(wizard.state.source_names.len(), 1);
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Submit);
}

#[test]
fn test_cancel_on_first_step_resets_state() {
    let mut wizard = open_wizard();
    wizard.handle_key(KeyCode::Tab);
    type_text(&mut wizard, "Main St");

    assert_eq!(wizard.handle_key(KeyCode::Esc), WizardOutcome::Cancel);
    assert!(!wizard.visible);
    assert!(wizard.state.branch.branch_name.is_empty());
}

#[test]
fn test_esc_on_later_steps_retreats_without_losing_data() {
    let mut wizard = open_wizard();
    wizard.state.branch.branch_name = "Main St".to_string();
    wizard.state.branch.area_id = Some(3);
    wizard.state.advance();
    type_text(&mut wizard, "Well A");
    wizard.handle_key(KeyCode::Enter);

    assert_eq!(wizard.handle_key(KeyCode::Esc), WizardOutcome::Continue);
    assert_eq!(wizard.state.step, WizardStep::Branch);
    assert_eq!(wizard.state.source_names.len(), 1);
    assert_eq!(wizard.state.branch.branch_name, "Main St");
}

#[test]
fn test_rename_flow_through_keys() {
    let mut wizard = open_wizard();
    wizard.state.advance();
    type_text(&mut wizard, "Well A");
    wizard.handle_key(KeyCode::Enter);
    wizard.handle_key(KeyCode::Down); // select the entry

    wizard.handle_key(KeyCode::F(2));
    assert_eq!(wizard.name_entry, "Well A");
    type_text(&mut wizard, " (rehab)");
    wizard.handle_key(KeyCode::Enter);

    assert_eq!(wizard.state.source_names[0].name, "Well A (rehab)");
    assert!(wizard.name_entry.is_empty());
}
