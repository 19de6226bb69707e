use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use auto_version::analyzer::RequestedBump;
use auto_version::cli::{run_bump, show_status, RunOptions};
use auto_version::config;
use auto_version::git::Git2Repository;
use auto_version::ui;

#[derive(Parser)]
#[command(
    name = "auto-version",
    about = "Bump semantic versions and maintain a changelog from conventional commits",
    version
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bump the version and regenerate the changelog from commit history
    Bump {
        #[arg(short, long, help = "Branch to release from")]
        branch: Option<String>,

        #[arg(
            short = 't',
            long = "type",
            default_value = "auto",
            help = "Bump type (patch|minor|major|auto)"
        )]
        bump: RequestedBump,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,

        #[arg(long, help = "Skip changelog generation")]
        skip_changelog: bool,

        #[arg(long, help = "Skip the release commit")]
        skip_commit: bool,

        #[arg(long, help = "Skip tag creation")]
        skip_tag: bool,

        #[arg(short = 'y', long, help = "Skip confirmation prompts")]
        yes: bool,

        #[arg(long, help = "Push branch and tags after the release")]
        push: bool,
    },

    /// Show the current version and the commits pending release
    Status {
        #[arg(short, long, help = "Branch to inspect")]
        branch: Option<String>,
    },

    /// Write a default auto-version.toml in the current directory
    Init {
        #[arg(short = 'y', long, help = "Overwrite an existing file without asking")]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Init { yes } => {
            init_config(yes)?;
        }
        Commands::Bump {
            branch,
            bump,
            dry_run,
            skip_changelog,
            skip_commit,
            skip_tag,
            yes,
            push,
        } => {
            let (repo, root) = open_repository();
            let options = RunOptions {
                branch,
                requested: bump,
                dry_run,
                skip_changelog,
                skip_commit,
                skip_tag,
                yes,
                push,
            };

            if let Err(e) = run_bump(&repo, &config, &root, &options) {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        }
        Commands::Status { branch } => {
            let (repo, root) = open_repository();
            if let Err(e) = show_status(&repo, &config, &root, branch.as_deref()) {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn open_repository() -> (Git2Repository, PathBuf) {
    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    let root = match repo.workdir() {
        Ok(root) => root,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    (repo, root)
}

fn init_config(yes: bool) -> Result<()> {
    let path = std::env::current_dir()?.join("auto-version.toml");

    if path.exists() && !yes && !ui::confirm_action("auto-version.toml already exists, overwrite?")?
    {
        println!("Init cancelled.");
        return Ok(());
    }

    config::write_default_config(&path)?;
    ui::display_success(&format!("Configuration written to {}", path.display()));
    Ok(())
}
