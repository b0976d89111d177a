use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use dialoguer::Confirm;
use log::{error, info, warn};
use walkdir::WalkDir;

use crate::config::Settings;
use crate::error::E2eError;
use crate::github::GitHubClient;
use crate::naming::is_generated_name;

/// Delete leftover test repositories: remote repos whose names have the
/// generated shape and, with `local`, matching directories under
/// `test_repos`.
pub fn run(settings: &Settings, assume_yes: bool, local: bool) -> Result<()> {
    let client = GitHubClient::new(settings);

    let leftovers: Vec<String> = client
        .list_owned_repos()?
        .into_iter()
        .filter(|repo| repo.private && is_generated_name(&repo.name))
        .map(|repo| repo.name)
        .collect();

    let local_dirs = if local {
        find_local_leftovers(&settings.repos_root())?
    } else {
        Vec::new()
    };

    if leftovers.is_empty() && local_dirs.is_empty() {
        println!("Nothing to prune");
        return Ok(());
    }

    for name in &leftovers {
        println!("remote: {}", name);
    }
    for dir in &local_dirs {
        println!("local:  {}", dir.display());
    }

    if !assume_yes {
        let confirm = Confirm::new()
            .with_prompt(format!(
                "Delete {} remote and {} local test repositories?",
                leftovers.len(),
                local_dirs.len()
            ))
            .default(false)
            .interact()?;

        if !confirm {
            return Err(E2eError::Cancelled.into());
        }
    }

    let mut failures = 0;

    for name in &leftovers {
        if let Err(e) = client.delete_repo(name) {
            error!("Failed to delete GitHub repo {}: {:#}", name, e);
            failures += 1;
        }
    }

    for dir in &local_dirs {
        match fs::remove_dir_all(dir) {
            Ok(()) => info!("Removed {}", dir.display()),
            Err(e) => {
                error!("Failed to remove {}: {}", dir.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} deletions failed", failures, leftovers.len() + local_dirs.len());
    }

    println!(
        "Pruned {} remote and {} local test repositories",
        leftovers.len(),
        local_dirs.len()
    );
    Ok(())
}

fn find_local_leftovers(root: &Path) -> Result<Vec<std::path::PathBuf>> {
    if !root.exists() {
        warn!("{} does not exist, skipping local prune", root.display());
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_generated_name(name) {
                dirs.push(entry.into_path());
            }
        }
    }

    dirs.sort();
    Ok(dirs)
}
