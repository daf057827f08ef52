pub mod client;
pub mod error;
pub mod types;

use crate::api::types::{DeploymentStatus, PendingDeployment, ReviewRequest, WorkflowRuns};
use crate::config::RepoRef;
use async_trait::async_trait;

pub use client::RestClient;
pub use error::{ApiError, ApiResult};

/// The three deployment-review calls the `reject` command makes.
/// Implemented over HTTP by [`RestClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait DeploymentsApi {
    /// Workflow runs of `repo` whose status is `waiting`.
    async fn waiting_runs(&self, repo: &RepoRef) -> ApiResult<WorkflowRuns>;

    async fn pending_deployments(
        &self,
        repo: &RepoRef,
        run_id: u64,
    ) -> ApiResult<Vec<PendingDeployment>>;

    /// Submit a review for some of the run's pending deployments.
    async fn review_deployments(
        &self,
        repo: &RepoRef,
        run_id: u64,
        review: &ReviewRequest,
    ) -> ApiResult<Vec<DeploymentStatus>>;
}
