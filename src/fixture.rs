//! Local/remote repository pair provisioned around a single test.
//!
//! A fixture owns the remote repository it created: [`RepoFixture::teardown`]
//! deletes it and reports failures, and dropping a fixture that was never torn
//! down (the test failed or panicked) deletes it too, logging instead of
//! panicking so the original failure stays visible.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{error, info};

use crate::command_utils::run_shell_command;
use crate::config::{Settings, DEFAULT_BRANCH, REMOTE_NAME};
use crate::cwd::{change_dir, CwdGuard};
use crate::error::E2eError;
use crate::github::{GitHubClient, RemoteRepo};
use crate::naming::{generate_repo_name, DEFAULT_NAME_LENGTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixtureMode {
    /// Local repository under `test_repos/<name>` with `origin` attached.
    #[default]
    LocalAndRemote,
    /// Remote repository only; the working directory is left untouched.
    RemoteOnly,
}

pub struct RepoFixture {
    name: String,
    mode: FixtureMode,
    local_path: Option<PathBuf>,
    remote: RemoteRepo,
    remote_url: String,
    web_url: String,
    client: GitHubClient,
    deleted: bool,
    cwd: CwdGuard,
}

impl RepoFixture {
    pub fn provision(settings: &Settings, mode: FixtureMode) -> Result<Self> {
        let name = generate_repo_name(DEFAULT_NAME_LENGTH)?;
        Self::provision_named(settings, &name, mode)
    }

    pub fn provision_named(settings: &Settings, name: &str, mode: FixtureMode) -> Result<Self> {
        let cwd = CwdGuard::new()?;

        let result = run_shell_command(
            &format!("git config --global init.defaultBranch {}", DEFAULT_BRANCH),
            false,
        )?;
        if !result.stdout.is_empty() {
            bail!("Error with git config for default branch: {}", result.stdout);
        }

        let local_path = match mode {
            FixtureMode::LocalAndRemote => Some(init_local_repo(settings, name)?),
            FixtureMode::RemoteOnly => {
                let root = settings.repos_root();
                fs::create_dir_all(&root)
                    .with_context(|| format!("Failed to create {}", root.display()))?;
                None
            }
        };

        let client = GitHubClient::new(settings);
        let remote = client.create_repo(name)?;
        let remote_url = settings.remote_url(name);

        // The remote exists now; dropping `fixture` deletes it.
        let fixture = RepoFixture {
            name: name.to_string(),
            mode,
            local_path,
            remote,
            remote_url,
            web_url: settings.repo_web_url(name),
            client,
            deleted: false,
            cwd,
        };

        if !fixture.remote.clone_url.eq_ignore_ascii_case(&fixture.remote_url) {
            return Err(E2eError::UnexpectedCloneUrl {
                expected: fixture.remote_url.clone(),
                actual: fixture.remote.clone_url.clone(),
            }
            .into());
        }

        if mode == FixtureMode::LocalAndRemote {
            let result = run_shell_command(
                &format!("git remote add {} {}", REMOTE_NAME, fixture.remote_url),
                false,
            )?;
            if !result.stdout.is_empty() {
                bail!("Error adding remote origin: {}", result.stdout);
            }
        }

        info!("Provisioned test repo {} ({:?})", fixture.name, fixture.mode);
        Ok(fixture)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> FixtureMode {
        self.mode
    }

    /// `None` in [`FixtureMode::RemoteOnly`].
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    pub fn remote(&self) -> &RemoteRepo {
        &self.remote
    }

    /// `https://github.com/<user>/<name>.git`
    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    /// `https://github.com/<user>/<name>`
    pub fn web_url(&self) -> &str {
        &self.web_url
    }

    /// Working directory that is restored once the fixture is gone.
    pub fn original_dir(&self) -> &Path {
        self.cwd.original()
    }

    /// Delete the remote repository, surfacing any failure to the caller.
    pub fn teardown(mut self) -> Result<()> {
        self.deleted = true;
        self.client
            .delete_repo(&self.name)
            .with_context(|| format!("Failed to delete GitHub repo {}", self.name))
    }
}

impl Drop for RepoFixture {
    fn drop(&mut self) {
        if self.deleted {
            return;
        }
        self.deleted = true;

        if let Err(e) = self.client.delete_repo(&self.name) {
            error!("Failed to delete GitHub repo {}: {:#}", self.name, e);
        }
    }
}

fn init_local_repo(settings: &Settings, name: &str) -> Result<PathBuf> {
    let path = settings.repo_path(name);
    fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;

    let result = run_shell_command(&format!("git init \"{}\"", path.display()), false)?;
    if !result.stdout.contains("Initialized empty Git repository") {
        bail!("Git init failed: {}", result.stdout);
    }

    change_dir(&path)?;

    run_shell_command(
        &format!("git config user.name \"{}\"", settings.committer_name),
        false,
    )?;
    run_shell_command(
        &format!("git config user.email \"{}\"", settings.committer_email),
        false,
    )?;

    Ok(path)
}
