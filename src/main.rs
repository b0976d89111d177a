use anyhow::Result;
use clap::{Parser, Subcommand};

use git_e2e::config::Settings;
use git_e2e::naming::{generate_repo_name, DEFAULT_NAME_LENGTH};
use git_e2e::{logging, prune, remote};

#[derive(Parser)]
#[command(name = "git-e2e")]
#[command(about = "Manage the GitHub repositories used by the git end-to-end suite")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random test repository name
    #[command(alias = "n")]
    Name {
        /// Length of the generated name
        #[arg(short, long, default_value_t = DEFAULT_NAME_LENGTH)]
        length: usize,
    },
    /// Create a private remote repository and print its clone URL
    Create {
        /// Repository name
        name: String,
    },
    /// Delete a remote repository
    Delete {
        /// Repository name
        name: String,
    },
    /// Delete test repositories left behind by failed teardowns
    Prune {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Also remove leftover directories under test_repos
        #[arg(long)]
        local: bool,
    },
}

fn main() -> Result<()> {
    logging::init(false);
    let cli = Cli::parse();

    match cli.command {
        Commands::Name { length } => {
            println!("{}", generate_repo_name(length)?);
        }
        Commands::Create { name } => {
            remote::create(&Settings::from_env()?, &name)?;
        }
        Commands::Delete { name } => {
            remote::delete(&Settings::from_env()?, &name)?;
        }
        Commands::Prune { yes, local } => {
            prune::run(&Settings::from_env()?, yes, local)?;
        }
    }

    Ok(())
}
