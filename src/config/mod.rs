//! Runtime configuration: which repository, which API, which token.
//!
//! Everything is resolved once at start-up from flags, environment, the git
//! checkout and gh's own configuration. Nothing is persisted.

pub mod auth;
pub mod repo;

use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

pub use repo::{RepoRef, DEFAULT_HOST};

/// Overrides the API base URL (tests, proxies).
pub const API_URL_ENV: &str = "GH_REJECT_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Expected the \"[HOST/]OWNER/REPO\" format, got {0:?}")]
    InvalidRepo(String),

    #[error("No repository found. Run inside a git checkout with an \"origin\" remote, or pass --repo OWNER/REPO")]
    NoRepository,

    #[error("Failed to run git: {0}")]
    Git(#[source] std::io::Error),

    #[error("Failed to read gh config {}: {message}", path.display())]
    HostsFile { path: PathBuf, message: String },
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    pub repo: RepoRef,
    pub api_url: String,
    pub token: Option<String>,
}

impl Config {
    /// Resolve configuration. `repo_arg` comes from `--repo` / `GH_REPO`.
    pub fn resolve(repo_arg: Option<&str>) -> Result<Self, ConfigError> {
        let default_host = std::env::var("GH_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let repo = match repo_arg {
            Some(arg) => RepoRef::parse(arg, &default_host)?,
            None => RepoRef::from_remote_url(&repo::origin_remote_url()?)?,
        };

        let api_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| api_url_for_host(&repo.host));

        debug!("Repository {} on {} via {}", repo, repo.host, api_url);

        let token = auth::resolve_token(&repo.host);

        Ok(Self {
            repo,
            api_url,
            token,
        })
    }
}

/// REST API base URL for a GitHub host.
pub fn api_url_for_host(host: &str) -> String {
    if host == DEFAULT_HOST {
        "https://api.github.com".to_string()
    } else {
        format!("https://{}/api/v3", host)
    }
}
