use anyhow::Result;

use crate::config::Settings;
use crate::github::GitHubClient;

pub fn create(settings: &Settings, name: &str) -> Result<()> {
    let repo = GitHubClient::new(settings).create_repo(name)?;
    println!("{}", repo.clone_url);
    Ok(())
}

pub fn delete(settings: &Settings, name: &str) -> Result<()> {
    GitHubClient::new(settings).delete_repo(name)?;
    println!("Deleted {}", name);
    Ok(())
}
