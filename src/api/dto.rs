//! Wire types for the MIS API.
//!
//! All request and response bodies are camelCase JSON.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// =============================================================================
// Authentication
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<u32>,
}

// =============================================================================
// Reference and list records
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub role_id: Option<u32>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: u32,
    pub area_id: u32,
    pub branch_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: u32,
    pub area_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: u32,
    pub role_name: String,
}

/// A category of water source (e.g. "Deep Well - Electric")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceType {
    pub id: u32,
    pub name: String,
}

impl SourceType {
    /// The eight source types every MIS deployment ships with. Used when
    /// `GET /source-types` returns an empty list, so the wizard still renders
    /// a meaningful checklist.
    pub fn builtin_catalog() -> Vec<SourceType> {
        [
            "Deep Well - Electric",
            "Deep Well - Genset Operated",
            "Shallow Well",
            "Spring - Gravity",
            "Spring - Power-driven",
            "Bulk",
            "WTP",
            "Booster",
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| SourceType {
            id: i as u32 + 1,
            name: (*name).to_string(),
        })
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatus {
    pub status_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub id: u32,
    #[serde(default)]
    pub branch_id: Option<u32>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
}

/// A source name already attached to a branch (from `GET /branch/{id}/source-names`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSourceName {
    pub id: u32,
    pub source_name: String,
    pub source_type_id: u32,
    #[serde(default)]
    pub source_type_name: Option<String>,
}

// =============================================================================
// Source-name creation (attach to an existing branch)
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceNameCreate {
    pub source_name: String,
    pub source_type_id: u32,
    pub branch_id: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSourceName {
    pub id: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchSourceNameLink {
    pub branch_id: u32,
    pub source_name_id: u32,
}

// =============================================================================
// Branch full-create (wizard submission)
// =============================================================================

/// The single aggregate payload the branch wizard submits
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullCreateRequest {
    pub branch: BranchPayload,
    pub source_names: Vec<SourceNamePayload>,
    pub daily: DatasheetTemplate,
    pub monthly: DatasheetTemplate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPayload {
    pub area_id: u32,
    pub branch_name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceNamePayload {
    pub source_name: String,
    pub source_type_id: u32,
}

/// Field-name to enabled-flag mapping for a collection form template
#[derive(Debug, Clone, Serialize)]
pub struct DatasheetTemplate {
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullCreateResponse {
    pub branch_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_has_eight_types() {
        let catalog = SourceType::builtin_catalog();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog[0].id, 1);
        assert_eq!(catalog[0].name, "Deep Well - Electric");
        assert_eq!(catalog[7].name, "Booster");
    }

    #[test]
    fn test_branch_deserializes_camel_case() {
        let json = r#"{"id": 7, "areaId": 3, "branchName": "Main St", "isActive": false}"#;
        let branch: Branch = serde_json::from_str(json).unwrap();
        assert_eq!(branch.area_id, 3);
        assert_eq!(branch.branch_name, "Main St");
        assert!(!branch.is_active);
    }

    #[test]
    fn test_branch_is_active_defaults_true() {
        let json = r#"{"id": 7, "areaId": 3, "branchName": "Main St"}"#;
        let branch: Branch = serde_json::from_str(json).unwrap();
        assert!(branch.is_active);
    }

    #[test]
    fn test_full_create_serializes_camel_case() {
        let request = FullCreateRequest {
            branch: BranchPayload {
                area_id: 3,
                branch_name: "Main St".to_string(),
                is_active: true,
            },
            source_names: vec![SourceNamePayload {
                source_name: "Well A".to_string(),
                source_type_id: 1,
            }],
            daily: DatasheetTemplate {
                fields: serde_json::Map::new(),
            },
            monthly: DatasheetTemplate {
                fields: serde_json::Map::new(),
            },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""branchName":"Main St""#));
        assert!(json.contains(r#""areaId":3"#));
        assert!(json.contains(r#""sourceNames":[{"sourceName":"Well A","sourceTypeId":1}]"#));
    }

    #[test]
    fn test_daily_report_tolerates_missing_status() {
        let json = r#"{"id": 1}"#;
        let report: DailyReport = serde_json::from_str(json).unwrap();
        assert!(report.status.is_none());
    }
}
