//! `gh reject` — reject pending deployments on a waiting workflow run.
//!
//! Flow:
//!   1. List runs waiting for review, pick one
//!   2. List that run's pending environments, pick any number
//!   3. Submit a rejection for the picked environments and echo the result
//!
//! No runs, a cancelled prompt, or an empty pick all stop the command
//! without touching anything.

use crate::api::types::{
    DeploymentStatus, PendingDeployment, ReviewRequest, RunDeployments, WorkflowRun,
};
use crate::api::{DeploymentsApi, RestClient};
use crate::config::{Config, RepoRef};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::utils::time::elapsed_since;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Options for the `reject` command.
#[derive(Debug, Clone, Default)]
pub struct RejectOptions {
    /// `[HOST/]OWNER/REPO`; the git checkout's origin when absent
    pub repo: Option<String>,

    /// Review comment sent with the rejection
    pub comment: Option<String>,
}

/// How a `reject` invocation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectOutcome {
    /// No workflow run is waiting for review
    NoRuns,
    /// The run prompt was cancelled
    Cancelled,
    /// No environment was picked
    NothingSelected,
    /// The rejection went through
    Rejected(Vec<DeploymentStatus>),
}

/// Run the `reject` command against the real API and terminal.
pub async fn run(options: RejectOptions) -> Result<RejectOutcome> {
    let config = Config::resolve(options.repo.as_deref())
        .context("Failed to determine the target repository")?;
    let client = RestClient::from_config(&config)?;

    run_reject(&client, &TerminalPrompter::new(), &config.repo, &options).await
}

/// The whole select-select-reject pipeline over any API and prompter.
pub async fn run_reject<A, P>(
    api: &A,
    prompter: &P,
    repo: &RepoRef,
    options: &RejectOptions,
) -> Result<RejectOutcome>
where
    A: DeploymentsApi + Sync + ?Sized,
    P: Prompter + Sync + ?Sized,
{
    let runs = api
        .waiting_runs(repo)
        .await
        .with_context(|| format!("Failed to list waiting runs of {}", repo))?;

    if runs.is_empty() {
        println!("No runs detected");
        return Ok(RejectOutcome::NoRuns);
    }

    let run = match select_run(prompter, &runs.workflow_runs, Utc::now()).await? {
        Some(run) => run,
        None => return Ok(RejectOutcome::Cancelled),
    };

    let deployments = RunDeployments {
        run_id: run.id,
        deployments: api
            .pending_deployments(repo, run.id)
            .await
            .with_context(|| format!("Failed to list pending deployments of run {}", run.id))?,
    };

    let environment_ids = select_environments(prompter, &deployments.deployments).await?;
    if environment_ids.is_empty() {
        debug!("No environments selected for run {}, nothing to do", run.id);
        return Ok(RejectOutcome::NothingSelected);
    }

    let statuses = reject_deployments(
        api,
        repo,
        deployments.run_id,
        environment_ids,
        options.comment.clone(),
    )
    .await?;

    Ok(RejectOutcome::Rejected(statuses))
}

/// Prompt for one of the waiting runs.
pub async fn select_run<P>(
    prompter: &P,
    runs: &[WorkflowRun],
    now: DateTime<Utc>,
) -> Result<Option<WorkflowRun>>
where
    P: Prompter + Sync + ?Sized,
{
    let labels: Vec<String> = runs.iter().map(|run| run_label(run, now)).collect();

    let choice = prompter
        .select_one("Select a workflow run", &labels)
        .await?;

    match choice {
        Some(index) => {
            let run = runs
                .get(index)
                .with_context(|| format!("Selected run #{} does not exist", index))?;
            debug!("Selected run {}", run.id);
            Ok(Some(run.clone()))
        }
        None => Ok(None),
    }
}

/// Prompt for the environments to reject. Returns their ids; empty when
/// nothing was picked or nothing is pending.
pub async fn select_environments<P>(
    prompter: &P,
    deployments: &[PendingDeployment],
) -> Result<Vec<u64>>
where
    P: Prompter + Sync + ?Sized,
{
    if deployments.is_empty() {
        debug!("Run has no pending deployments");
        return Ok(Vec::new());
    }

    let names: Vec<String> = deployments
        .iter()
        .map(|d| d.environment.name.clone())
        .collect();

    let selection = prompter
        .select_many("Select environments to reject", &names)
        .await?;

    environment_ids(deployments, &selection)
}

/// Map picked indices to environment ids, in pick order, without duplicates.
pub fn environment_ids(deployments: &[PendingDeployment], selection: &[usize]) -> Result<Vec<u64>> {
    let mut ids: Vec<u64> = Vec::with_capacity(selection.len());
    let mut seen: Vec<usize> = Vec::with_capacity(selection.len());

    for &index in selection {
        if seen.contains(&index) {
            continue;
        }
        seen.push(index);

        let deployment = match deployments.get(index) {
            Some(d) => d,
            None => bail!(
                "Selected environment #{} is out of range ({} pending)",
                index,
                deployments.len()
            ),
        };
        ids.push(deployment.environment.id);
    }

    Ok(ids)
}

/// Submit the rejection and print one line per resulting deployment.
pub async fn reject_deployments<A>(
    api: &A,
    repo: &RepoRef,
    run_id: u64,
    environment_ids: Vec<u64>,
    comment: Option<String>,
) -> Result<Vec<DeploymentStatus>>
where
    A: DeploymentsApi + Sync + ?Sized,
{
    let review = ReviewRequest::rejection(environment_ids, comment);
    debug!(
        "Rejecting environments {:?} of run {}",
        review.environment_ids, run_id
    );

    let statuses = api
        .review_deployments(repo, run_id, &review)
        .await
        .with_context(|| format!("Failed to reject deployments of run {}", run_id))?;

    for status in &statuses {
        println!("{}", rejection_line(status));
    }

    Ok(statuses)
}

/// `"{title}, {name} ({branch}) {elapsed} ago"`, or `not started` in
/// place of the elapsed part when the run has no start time.
pub fn run_label(run: &WorkflowRun, now: DateTime<Utc>) -> String {
    let started = match run.run_started_at {
        Some(start) => format!("{} ago", elapsed_since(start, now)),
        None => "not started".to_string(),
    };
    format!(
        "{}, {} ({}) {}",
        run.display_title,
        run.name.as_deref().unwrap_or_default(),
        run.head_branch.as_deref().unwrap_or_default(),
        started
    )
}

/// `" • {environment} rejected @{timestamp}"`, timestamp as
/// `2024-03-01 10:05:09 +0000 UTC`.
pub fn rejection_line(status: &DeploymentStatus) -> String {
    format!(
        " • {} rejected @{}",
        status.environment,
        status.created_at.format("%Y-%m-%d %H:%M:%S %z UTC")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Environment;
    use chrono::TimeZone;

    fn pending(id: u64, name: &str) -> PendingDeployment {
        PendingDeployment {
            environment: Environment {
                id,
                name: name.to_string(),
            },
        }
    }

    #[test]
    fn test_run_label() {
        let started = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let run = WorkflowRun {
            id: 1,
            display_title: "Bump version".to_string(),
            name: Some("Deploy".to_string()),
            head_branch: Some("main".to_string()),
            run_started_at: Some(started),
        };
        let now = started + chrono::Duration::seconds(125);
        assert_eq!(run_label(&run, now), "Bump version, Deploy (main) 2m5s ago");
    }

    #[test]
    fn test_run_label_missing_fields() {
        let started = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let run = WorkflowRun {
            id: 1,
            display_title: "Nightly".to_string(),
            name: None,
            head_branch: None,
            run_started_at: Some(started),
        };
        assert_eq!(run_label(&run, started), "Nightly,  () 0s ago");
    }

    #[test]
    fn test_rejection_line() {
        let status = DeploymentStatus {
            environment: "production".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 5, 9).unwrap(),
        };
        assert_eq!(
            rejection_line(&status),
            " • production rejected @2024-03-01 10:05:09 +0000 UTC"
        );
        assert!(!rejection_line(&status).contains('\u{1b}'));
    }

    #[test]
    fn test_run_label_without_start_time() {
        let run = WorkflowRun {
            id: 2,
            display_title: "Queued deploy".to_string(),
            name: Some("Deploy".to_string()),
            head_branch: Some("main".to_string()),
            run_started_at: None,
        };
        assert_eq!(
            run_label(&run, Utc::now()),
            "Queued deploy, Deploy (main) not started"
        );
    }

    #[test]
    fn test_environment_ids_order_and_duplicates() {
        let deployments = vec![pending(10, "dev"), pending(20, "staging"), pending(30, "prod")];
        assert_eq!(
            environment_ids(&deployments, &[2, 0, 2]).unwrap(),
            vec![30, 10]
        );
        assert!(environment_ids(&deployments, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_environment_ids_out_of_range() {
        let deployments = vec![pending(10, "dev")];
        let err = environment_ids(&deployments, &[0, 3]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
