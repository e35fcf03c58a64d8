//! Octocrab-backed hosting service.

use async_trait::async_trait;
use checkrun_core::{Error, Result, RunEvent};
use checkrun_status::{
    CheckRunApi, CheckRunUpdate, CommitStatus, CommitStatusApi, ExistingCheck, NewCheckRun,
};
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::wire::{
    CHECK_RUNS_PER_PAGE, CheckRunRef, CheckRunsPage, CreateCheckRunBody, CreateStatusBody,
    ListCheckRunsQuery, UpdateCheckRunBody,
};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable overriding the API base URL (GitHub Enterprise).
pub const API_URL_ENV: &str = "GITHUB_API_URL";

/// GitHub REST client implementing the check-run and commit-status APIs.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient").finish_non_exhaustive()
    }
}

impl GitHubClient {
    /// Client for api.github.com authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is empty or the client
    /// cannot be built.
    pub fn new(token: &str) -> Result<Self> {
        Self::build(token, None)
    }

    /// Client for a GitHub Enterprise instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is empty, the URL is
    /// invalid or the client cannot be built.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        Self::build(token, Some(base_url))
    }

    /// Client configured from `GITHUB_TOKEN` and `GITHUB_API_URL`.
    ///
    /// Returns `None` when no token is set, which leaves the reconciler
    /// without a hosting capability.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the client cannot be built.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_vars(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(API_URL_ENV).ok(),
        )
    }

    fn from_vars(token: Option<String>, api_url: Option<String>) -> Result<Option<Self>> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            debug!("{TOKEN_ENV} is not set, no hosting service configured");
            return Ok(None);
        };
        let api_url = api_url.filter(|u| !u.is_empty());
        Self::build(&token, api_url.as_deref()).map(Some)
    }

    fn build(token: &str, base_url: Option<&str>) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::configuration("GitHub token is not set or empty"));
        }
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(url) = base_url {
            builder = builder.base_uri(url).map_err(|e| {
                Error::configuration(format!("Invalid GitHub API URL '{url}': {e}"))
            })?;
        }
        let octocrab = builder.build().map_err(|e| {
            Error::configuration(format!("Failed to create GitHub client: {e}"))
        })?;
        Ok(Self { octocrab })
    }

    fn repo_route(event: &RunEvent) -> String {
        format!("/repos/{}/{}", event.organization, event.repository)
    }
}

#[async_trait]
impl CheckRunApi for GitHubClient {
    async fn list_check_runs(
        &self,
        event: &RunEvent,
        app_id: Option<u64>,
    ) -> Result<Vec<ExistingCheck>> {
        let route = format!("{}/commits/{}/check-runs", Self::repo_route(event), event.sha);
        let mut checks = Vec::new();

        for page in 1.. {
            let query = ListCheckRunsQuery {
                app_id,
                per_page: CHECK_RUNS_PER_PAGE,
                page,
            };
            let response: CheckRunsPage = self
                .octocrab
                .get(&route, Some(&query))
                .await
                .map_err(|e| Error::discovery(format!("listing check runs on {event}: {e}")))?;

            let received = response.check_runs.len();
            checks.extend(response.check_runs.into_iter().map(ExistingCheck::from));
            if received < usize::from(CHECK_RUNS_PER_PAGE)
                || u64::try_from(checks.len()).unwrap_or(u64::MAX) >= response.total_count
            {
                break;
            }
        }

        debug!(count = checks.len(), "Listed check runs");
        Ok(checks)
    }

    async fn create_check_run(&self, event: &RunEvent, check: &NewCheckRun) -> Result<u64> {
        let route = format!("{}/check-runs", Self::repo_route(event));
        let created: CheckRunRef = self
            .octocrab
            .post(route, Some(&CreateCheckRunBody::from(check)))
            .await
            .map_err(|e| Error::submission("Create check run", e.to_string()))?;
        Ok(created.id)
    }

    async fn update_check_run(
        &self,
        event: &RunEvent,
        check_run_id: u64,
        update: &CheckRunUpdate,
    ) -> Result<()> {
        let route = format!("{}/check-runs/{check_run_id}", Self::repo_route(event));
        let _: CheckRunRef = self
            .octocrab
            .patch(route, Some(&UpdateCheckRunBody::from(update)))
            .await
            .map_err(|e| Error::submission("Update check run", e.to_string()))?;
        info!(check_run_id, status = %update.status, "Updated check run");
        Ok(())
    }
}

#[async_trait]
impl CommitStatusApi for GitHubClient {
    async fn create_status(&self, event: &RunEvent, status: &CommitStatus) -> Result<()> {
        let route = format!("{}/statuses/{}", Self::repo_route(event), event.sha);
        let _: serde_json::Value = self
            .octocrab
            .post(route, Some(&CreateStatusBody::from(status)))
            .await
            .map_err(|e| Error::submission("Create commit status", e.to_string()))?;
        Ok(())
    }

    async fn create_issue_comment(&self, event: &RunEvent, number: u64, body: &str) -> Result<()> {
        let comment = self
            .octocrab
            .issues(&event.organization, &event.repository)
            .create_comment(number, body)
            .await
            .map_err(|e| Error::submission("Create pull request comment", e.to_string()))?;
        info!(url = %comment.html_url, "Posted pull request comment");
        Ok(())
    }
}
