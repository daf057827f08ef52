//! GitHub REST client for the deployment-review endpoints.
//!
//! Every call is a single request: no pagination, no retries. Non-2xx
//! responses become [`ApiError::Status`] carrying GitHub's error message.

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{DeploymentStatus, PendingDeployment, ReviewRequest, WorkflowRuns};
use crate::api::DeploymentsApi;
use crate::config::{Config, RepoRef};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the GitHub REST API of a single host.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    /// Create a client for `base_url` (e.g. `https://api.github.com`).
    pub fn new(base_url: impl Into<String>, token: Option<&str>) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ApiError::Url(base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gh-reject/", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Url("token contains invalid header characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(&config.api_url, config.token.as_deref())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn runs_url(&self, repo: &RepoRef) -> String {
        format!(
            "{}/repos/{}/{}/actions/runs",
            self.base_url, repo.owner, repo.name
        )
    }

    fn pending_deployments_url(&self, repo: &RepoRef, run_id: u64) -> String {
        format!("{}/{}/pending_deployments", self.runs_url(repo), run_id)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        Self::decode(url, response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!("POST {}", url);
        let response = self.http.post(url).json(body).send().await?;
        Self::decode(url, response).await
    }

    async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await?;
        debug!("{} -> {} ({} bytes)", url, status, body.len());

        if !status.is_success() {
            return Err(ApiError::from_body(status, &body));
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DeploymentsApi for RestClient {
    async fn waiting_runs(&self, repo: &RepoRef) -> ApiResult<WorkflowRuns> {
        let url = format!("{}?status=waiting", self.runs_url(repo));
        self.get(&url).await
    }

    async fn pending_deployments(
        &self,
        repo: &RepoRef,
        run_id: u64,
    ) -> ApiResult<Vec<PendingDeployment>> {
        self.get(&self.pending_deployments_url(repo, run_id)).await
    }

    async fn review_deployments(
        &self,
        repo: &RepoRef,
        run_id: u64,
        review: &ReviewRequest,
    ) -> ApiResult<Vec<DeploymentStatus>> {
        self.post(&self.pending_deployments_url(repo, run_id), review)
            .await
    }
}
