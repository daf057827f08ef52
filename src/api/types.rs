//! Types for the GitHub Actions deployment-review endpoints.
//!
//! Only the fields this tool reads are modelled; everything else in the
//! GitHub payloads is ignored on deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope returned by `GET /repos/{owner}/{repo}/actions/runs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRuns {
    /// Total number of matching runs reported by the API
    pub total_count: u64,

    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

impl WorkflowRuns {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0 || self.workflow_runs.is_empty()
    }
}

/// A single workflow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,

    /// Commit title or PR title shown in the Actions UI
    #[serde(default)]
    pub display_title: String,

    /// Workflow name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub head_branch: Option<String>,

    /// When the current attempt started
    #[serde(default)]
    pub run_started_at: Option<DateTime<Utc>>,
}

/// An environment waiting on a review, from
/// `GET /repos/{owner}/{repo}/actions/runs/{run_id}/pending_deployments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingDeployment {
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub id: u64,
    pub name: String,
}

/// Pending deployments of one run. The API payload does not repeat the run
/// id, so it is carried alongside.
#[derive(Debug, Clone, PartialEq)]
pub struct RunDeployments {
    pub run_id: u64,
    pub deployments: Vec<PendingDeployment>,
}

/// Review state submitted for pending deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentState {
    Approved,
    Rejected,
}

impl std::fmt::Display for DeploymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeploymentState::Approved => write!(f, "approved"),
            DeploymentState::Rejected => write!(f, "rejected"),
        }
    }
}

/// Body of `POST .../pending_deployments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub environment_ids: Vec<u64>,
    pub state: DeploymentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewRequest {
    /// A rejection of the given environments.
    pub fn rejection(environment_ids: Vec<u64>, comment: Option<String>) -> Self {
        Self {
            environment_ids,
            state: DeploymentState::Rejected,
            comment,
        }
    }
}

/// One deployment status returned after a review is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStatus {
    /// Environment name
    pub environment: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_body_shape() {
        let req = ReviewRequest::rejection(vec![161171787, 161171795], None);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "environment_ids": [161171787, 161171795],
                "state": "rejected"
            })
        );
    }

    #[test]
    fn test_rejection_body_with_comment() {
        let req = ReviewRequest::rejection(vec![1], Some("not today".to_string()));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["comment"], "not today");
        assert_eq!(json["state"], "rejected");
    }

    #[test]
    fn test_run_with_null_fields() {
        let run: WorkflowRun = serde_json::from_str(
            r#"{"id": 5, "display_title": "Fix", "name": null, "head_branch": null,
                "run_started_at": "2024-03-01T10:00:00Z", "status": "waiting"}"#,
        )
        .unwrap();
        assert_eq!(run.id, 5);
        assert!(run.name.is_none());
        assert!(run.head_branch.is_none());
    }

    #[test]
    fn test_run_without_start_time_keeps_list() {
        let runs: WorkflowRuns = serde_json::from_str(
            r#"{"total_count": 2, "workflow_runs": [
                {"id": 1, "display_title": "A", "run_started_at": null},
                {"id": 2, "display_title": "B", "run_started_at": "2024-03-01T10:00:00Z"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(runs.workflow_runs.len(), 2);
        assert!(runs.workflow_runs[0].run_started_at.is_none());
        assert!(runs.workflow_runs[1].run_started_at.is_some());
    }

    #[test]
    fn test_empty_runs_envelope() {
        let runs: WorkflowRuns = serde_json::from_str(r#"{"total_count": 0}"#).unwrap();
        assert!(runs.is_empty());
    }
}
