//! Minimal blocking client for the GitHub repository endpoints the fixtures
//! need: create, delete, existence check and listing.

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::json;

use crate::config::Settings;
use crate::error::E2eError;

const ACCEPT: &str = "application/vnd.github+json";
const PAGE_SIZE: usize = 100;

/// Everything outside `[A-Za-z0-9-_.~]` gets escaped.
const NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The subset of the repository object the suite looks at.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRepo {
    pub name: String,
    pub clone_url: String,
    #[serde(default)]
    pub private: bool,
}

pub struct GitHubClient {
    agent: ureq::Agent,
    api_url: String,
    owner: String,
    auth_header: String,
}

impl GitHubClient {
    pub fn new(settings: &Settings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(settings.request_timeout)
            .user_agent(concat!("git-e2e/", env!("CARGO_PKG_VERSION")))
            .build();

        GitHubClient {
            agent,
            api_url: settings.api_url.clone(),
            owner: settings.username.clone(),
            auth_header: format!("Bearer {}", settings.token),
        }
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &self.auth_header)
            .set("Accept", ACCEPT)
    }

    /// Create a private repository owned by the authenticated user.
    pub fn create_repo(&self, name: &str) -> Result<RemoteRepo> {
        info!("Creating repo with name: {}", name);

        let url = format!("{}/user/repos", self.api_url);
        let response = send(
            self.request("POST", &url)
                .send_json(json!({ "name": name, "private": true })),
        )?;

        if response.status() != 201 {
            let status = response.status();
            let body = response.into_string().unwrap_or_default();
            return Err(E2eError::RepoCreateFailed { status, body }.into());
        }

        let repo: RemoteRepo = response
            .into_json()
            .context("Failed to parse repo creation response")?;

        info!("Successfully created repo with name: {}", name);
        Ok(repo)
    }

    pub fn delete_repo(&self, name: &str) -> Result<()> {
        info!("Deleting git repo with name: {}", name);

        let url = repo_api_url(&self.api_url, &self.owner, name);
        let response = send(self.request("DELETE", &url).call())?;

        if response.status() != 204 {
            let status = response.status();
            let body = response.into_string().unwrap_or_default();
            return Err(E2eError::RepoDeleteFailed { status, body }.into());
        }

        info!("Successfully deleted repo with name: {}", name);
        Ok(())
    }

    pub fn repo_exists(&self, name: &str) -> Result<bool> {
        let url = repo_api_url(&self.api_url, &self.owner, name);
        let response = send(self.request("GET", &url).call())?;

        match response.status() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(E2eError::UnexpectedStatus {
                url,
                status,
                body: response.into_string().unwrap_or_default(),
            }
            .into()),
        }
    }

    /// All repositories owned by the authenticated user, following pagination.
    pub fn list_owned_repos(&self) -> Result<Vec<RemoteRepo>> {
        let url = format!("{}/user/repos", self.api_url);
        let mut repos = Vec::new();

        for page in 1.. {
            let response = send(
                self.request("GET", &url)
                    .query("affiliation", "owner")
                    .query("per_page", &PAGE_SIZE.to_string())
                    .query("page", &page.to_string())
                    .call(),
            )?;

            if response.status() != 200 {
                return Err(E2eError::UnexpectedStatus {
                    url,
                    status: response.status(),
                    body: response.into_string().unwrap_or_default(),
                }
                .into());
            }

            let batch: Vec<RemoteRepo> = response
                .into_json()
                .context("Failed to parse repository listing")?;
            debug!("Fetched page {} with {} repos", page, batch.len());

            let last_page = batch.len() < PAGE_SIZE;
            repos.extend(batch);
            if last_page {
                break;
            }
        }

        Ok(repos)
    }
}

/// Turn HTTP error statuses back into responses so callers can inspect the
/// status and body themselves. Transport failures stay errors.
fn send(result: Result<ureq::Response, ureq::Error>) -> Result<ureq::Response> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(_, response)) => Ok(response),
        Err(ureq::Error::Transport(transport)) => {
            Err(anyhow!("GitHub API request failed: {}", transport))
        }
    }
}

pub fn encode_repo_name(name: &str) -> String {
    utf8_percent_encode(name, NAME_ENCODE_SET).to_string()
}

/// `{api}/repos/{owner}/{name}` with the name percent-encoded.
pub fn repo_api_url(api_url: &str, owner: &str, name: &str) -> String {
    format!("{}/repos/{}/{}", api_url, owner, encode_repo_name(name))
}
