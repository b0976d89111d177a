//! Helpers for driving the `git` CLI end to end against GitHub: a shell
//! runner, random repository names, whitespace-tolerant output comparison,
//! a small GitHub client and the fixture that ties them together.

pub mod command_utils;
pub mod compare;
pub mod config;
pub mod cwd;
pub mod error;
pub mod files;
pub mod fixture;
pub mod github;
pub mod logging;
pub mod naming;
pub mod prune;
pub mod remote;

pub use command_utils::{run_shell_command, CommandResult};
pub use compare::{compare_normalized_strings, normalize_whitespace};
pub use config::Settings;
pub use cwd::CwdGuard;
pub use error::E2eError;
pub use files::create_test_file;
pub use fixture::{FixtureMode, RepoFixture};
pub use github::GitHubClient;
pub use naming::generate_repo_name;
