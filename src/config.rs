use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crate::error::E2eError;

pub const GH_URL: &str = "https://github.com";
pub const GH_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BRANCH: &str = "main";
pub const REMOTE_NAME: &str = "origin";
pub const TEST_FILE_NAME: &str = "README.md";
pub const TEST_FILE_CONTENT: &str = "Test file content";
pub const TEST_REPOS_DIR: &str = "test_repos";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the fixtures and the remote client read from the environment,
/// resolved once.
#[derive(Clone)]
pub struct Settings {
    pub username: String,
    pub token: String,
    pub api_url: String,
    pub web_url: String,
    pub root_dir: PathBuf,
    pub request_timeout: Duration,
    pub committer_name: String,
    pub committer_email: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    ///
    /// `GH_USERNAME` and `GH_TOKEN` are required. `GITHUB_WORKSPACE` moves
    /// the root away from the current directory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| E2eError::EnvMissing { key: key.to_string() })
        };

        let username = required("GH_USERNAME")?;
        let token = required("GH_TOKEN")?;

        let root_dir = match lookup("GITHUB_WORKSPACE").filter(|v| !v.is_empty()) {
            Some(workspace) => PathBuf::from(workspace),
            None => std::env::current_dir().context("Cannot determine current directory")?,
        };

        Ok(Settings {
            username,
            token,
            api_url: lookup("GH_API_URL")
                .filter(|url| !url.is_empty())
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| GH_API_URL.to_string()),
            web_url: lookup("GH_URL")
                .filter(|url| !url.is_empty())
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| GH_URL.to_string()),
            root_dir,
            request_timeout: REQUEST_TIMEOUT,
            committer_name: "Test User".to_string(),
            committer_email: "test@example.com".to_string(),
        })
    }

    pub fn repos_root(&self) -> PathBuf {
        self.root_dir.join(TEST_REPOS_DIR)
    }

    pub fn repo_path(&self, name: &str) -> PathBuf {
        self.repos_root().join(name)
    }

    /// Web URL of the repository without the `.git` suffix, as used by clone.
    pub fn repo_web_url(&self, name: &str) -> String {
        format!("{}/{}/{}", self.web_url, self.username, name)
    }

    /// URL attached as `origin`.
    pub fn remote_url(&self, name: &str) -> String {
        format!("{}.git", self.repo_web_url(name))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("web_url", &self.web_url)
            .field("root_dir", &self.root_dir)
            .field("request_timeout", &self.request_timeout)
            .field("committer_name", &self.committer_name)
            .field("committer_email", &self.committer_email)
            .finish()
    }
}
