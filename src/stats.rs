//! Aggregate statistics for the dashboard.

use tokio::try_join;

use crate::api::dto::{Area, Branch, DailyReport, User};
use crate::api::{ApiClient, ApiError};

/// The four stat-card values shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_users: usize,
    pub active_branches: usize,
    pub active_areas: usize,
    pub approved_reports: usize,
}

impl DashboardStats {
    /// All-zero stats; what an empty deployment renders
    pub fn zero() -> Self {
        Self::default()
    }

    /// Derive the card values from the raw list responses
    pub fn from_sources(
        users: &[User],
        branches: &[Branch],
        areas: &[Area],
        reports: &[DailyReport],
    ) -> Self {
        Self {
            active_users: users.iter().filter(|u| u.is_active).count(),
            active_branches: branches.iter().filter(|b| b.is_active).count(),
            active_areas: areas.iter().filter(|a| a.is_active).count(),
            approved_reports: reports
                .iter()
                .filter(|r| {
                    r.status
                        .as_ref()
                        .is_some_and(|s| s.status_name == "Approved")
                })
                .count(),
        }
    }
}

/// One full dashboard refresh: the fixed parallel batch of list fetches
pub async fn fetch(client: &ApiClient) -> Result<DashboardStats, ApiError> {
    let (users, branches, areas, reports) = try_join!(
        client.users(),
        client.branches(),
        client.areas(),
        client.daily_reports(),
    )?;

    Ok(DashboardStats::from_sources(
        &users, &branches, &areas, &reports,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::ReportStatus;

    #[test]
    fn test_empty_sources_render_zeros() {
        let stats = DashboardStats::from_sources(&[], &[], &[], &[]);
        assert_eq!(stats, DashboardStats::zero());
    }

    #[test]
    fn test_counts_only_active_records() {
        let users = vec![
            User {
                id: 1,
                username: "admin".to_string(),
                role_id: Some(1),
                is_active: true,
            },
            User {
                id: 2,
                username: "retired".to_string(),
                role_id: None,
                is_active: false,
            },
        ];
        let branches = vec![
            Branch {
                id: 1,
                area_id: 1,
                branch_name: "Main St".to_string(),
                is_active: true,
            },
            Branch {
                id: 2,
                area_id: 1,
                branch_name: "Closed".to_string(),
                is_active: false,
            },
        ];
        let areas = vec![Area {
            id: 1,
            area_name: "JV".to_string(),
            is_active: true,
        }];

        let stats = DashboardStats::from_sources(&users, &branches, &areas, &[]);
        assert_eq!(stats.active_users, 1);
        assert_eq!(stats.active_branches, 1);
        assert_eq!(stats.active_areas, 1);
        assert_eq!(stats.approved_reports, 0);
    }

    #[test]
    fn test_approved_reports_match_status_name() {
        let reports = vec![
            DailyReport {
                id: 1,
                branch_id: Some(1),
                status: Some(ReportStatus {
                    status_name: "Approved".to_string(),
                }),
            },
            DailyReport {
                id: 2,
                branch_id: Some(1),
                status: Some(ReportStatus {
                    status_name: "Pending".to_string(),
                }),
            },
            DailyReport {
                id: 3,
                branch_id: None,
                status: None,
            },
        ];

        let stats = DashboardStats::from_sources(&[], &[], &[], &reports);
        assert_eq!(stats.approved_reports, 1);
    }
}
