//! Integration tests for the branch-creation workflow
//!
//! These tests verify that:
//! - A complete wizard walk accumulates state across all four steps and
//!   produces exactly one full-create payload with the entered values
//! - Cancel and failed-submit paths preserve the documented state semantics
//! - The session store honors the login/expiry lifecycle
//! - Dashboard stats derived from empty API responses are all zeros

use crossterm::event::KeyCode;
use tempfile::TempDir;

use mis_console::api::dto::{Area, SourceType};
use mis_console::api::{ApiError, Session, SessionStore};
use mis_console::config::Config;
use mis_console::stats::DashboardStats;
use mis_console::wizard::{BranchWizard, WizardOutcome, WizardStep};

// ─── Helpers ──────────────────────────────────────────────────────────────────

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

fn state_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.paths.state = temp_dir.path().to_string_lossy().to_string();
    config
}

// ─── Wizard flow ──────────────────────────────────────────────────────────────

#[test]
fn full_walk_produces_exactly_one_payload_with_entered_values() {
    let mut wizard = open_wizard();

    // Step 1: pick area 3, enter the branch name, leave active on
    wizard.handle_key(KeyCode::Right); // JV
    wizard.handle_key(KeyCode::Right); // North (id 3)
    wizard.handle_key(KeyCode::Tab); // focus the name input
    type_text(&mut wizard, "Main St");
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Continue);
    assert_eq!(wizard.state.step, WizardStep::SourceNames);

    // Step 2: add one source name for the first source type
    type_text(&mut wizard, "Well A");
    wizard.handle_key(KeyCode::Enter);
    wizard.handle_key(KeyCode::Enter); // empty entry advances

    // Steps 3 and 4: leave every field checklist false
    assert_eq!(wizard.state.step, WizardStep::DailyFields);
    wizard.handle_key(KeyCode::Enter);
    assert_eq!(wizard.state.step, WizardStep::MonthlyFields);

    // Only the final step can submit
    let outcome = wizard.handle_key(KeyCode::Enter);
    assert_eq!(outcome, WizardOutcome::Submit);

    let request = wizard.state.full_create_request().unwrap();
    assert_eq!(request.source_names.len(), 1);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["branch"]["branchName"], "Main St");
    assert_eq!(json["branch"]["areaId"], 3);
    assert_eq!(json["branch"]["isActive"], true);
    assert_eq!(json["sourceNames"][0]["sourceName"], "Well A");
    assert_eq!(json["sourceNames"][0]["sourceTypeId"], 1);

    // All checklist fields were left false
    for (_, enabled) in json["daily"]["fields"].as_object().unwrap() {
        assert_eq!(enabled, false);
    }
    for (_, enabled) in json["monthly"]["fields"].as_object().unwrap() {
        assert_eq!(enabled, false);
    }
}

#[test]
fn submission_is_only_reachable_from_the_final_step() {
    let mut wizard = open_wizard();
    wizard.state.branch.branch_name = "Main St".to_string();
    wizard.state.branch.area_id = Some(3);

    // Enter on steps 1-3 never yields Submit
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Continue);
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Continue);
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Continue);
    assert_eq!(wizard.state.step, WizardStep::MonthlyFields);

    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Submit);
}

#[test]
fn cancel_resets_and_successful_finish_resets() {
    let mut wizard = open_wizard();
    wizard.handle_key(KeyCode::Tab);
    type_text(&mut wizard, "Main St");

    assert_eq!(wizard.handle_key(KeyCode::Esc), WizardOutcome::Cancel);
    assert!(wizard.state.branch.branch_name.is_empty());
    assert_eq!(wizard.state.step, WizardStep::Branch);

    // Simulate the app finishing a successful submission
    let mut wizard = open_wizard();
    wizard.state.branch.branch_name = "Main St".to_string();
    wizard.state.branch.area_id = Some(3);
    wizard.state.add_source_name(1, "Well A");
    wizard.finish();

    assert!(!wizard.visible);
    assert!(wizard.state.branch.branch_name.is_empty());
    assert!(wizard.state.source_names.is_empty());
}

#[test]
fn failed_submission_leaves_the_wizard_on_the_final_step() {
    let mut wizard = open_wizard();
    wizard.state.branch.branch_name = "Main St".to_string();
    wizard.state.branch.area_id = Some(3);
    wizard.state.add_source_name(2, "Spring B");
    wizard.state.advance();
    wizard.state.advance();
    wizard.state.advance();

    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Submit);

    // The app clears the in-flight flag on error and touches nothing else;
    // every entered value is still there and submit works again
    assert_eq!(wizard.state.step, WizardStep::MonthlyFields);
    assert_eq!(wizard.state.source_names[0].name, "Spring B");
    assert_eq!(wizard.handle_key(KeyCode::Enter), WizardOutcome::Submit);
}

// ─── Session lifecycle ────────────────────────────────────────────────────────

#[test]
fn session_clears_on_auth_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = state_config(&temp_dir);

    let mut store = SessionStore::open(&config).unwrap();
    store.store(Session::new("tok-123", "admin")).unwrap();
    assert!(temp_dir.path().join("session.json").exists());

    // Any 401 means the token is dead
    let err = ApiError::unauthorized();
    assert!(err.is_auth_error());
    store.clear().unwrap();

    assert!(store.token().is_none());
    assert!(!temp_dir.path().join("session.json").exists());

    // A fresh store sees a logged-out state and the UI falls back to login
    let reopened = SessionStore::open(&config).unwrap();
    assert!(reopened.current().is_none());
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

#[test]
fn dashboard_stats_over_empty_responses_are_zeros() {
    let stats = DashboardStats::from_sources(&[], &[], &[], &[]);
    assert_eq!(stats.active_users, 0);
    assert_eq!(stats.active_branches, 0);
    assert_eq!(stats.active_areas, 0);
    assert_eq!(stats.approved_reports, 0);
}
