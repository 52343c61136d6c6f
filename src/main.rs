use anyhow::Result;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::config::Config;
use twig::artifacts::core::pager::PagerWriter;

const LOG_FILTER_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A small local version-control system",
    long_about = "twig tracks snapshots of a working directory: stage files, commit them, \
    branch, and merge branches back together with a three-way merge.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates a .twig directory in the current directory or at the specified path, \
        with a single master branch holding the initial commit."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal and delete it if it is tracked"
    )]
    Rm {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the first-parent history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and untracked files")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch, checkout -- <file> restores a file from head, \
        and checkout <commit> -- <file> restores a file from the given commit."
    )]
    Checkout {
        #[arg(help = "Branch name, or commit id when a file follows")]
        target: Option<String>,
        #[arg(last = true, help = "The file to restore")]
        file: Option<PathBuf>,
    },
    #[command(name = "branch", about = "Create a branch at the current head")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to the given commit")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge the given branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let is_terminal = std::io::stdout().is_terminal();
    if !is_terminal {
        colored::control::set_override(false);
    }

    let config = Config::load_from_env()?;
    let pwd = std::env::current_dir()?;

    match &cli.command {
        Commands::Init { path } => {
            let path = path.clone().unwrap_or(pwd);
            let repository = Repository::init(&path, Box::new(std::io::stdout()), config)?;

            repository.print_initialized()?
        }
        Commands::Add { file } => {
            let mut repository = open(&pwd, config)?;

            repository.add(file)?;
        }
        Commands::Rm { file } => {
            let mut repository = open(&pwd, config)?;

            repository.remove(file)?;
        }
        Commands::Commit { message } => {
            let mut repository = open(&pwd, config)?;

            repository.commit(message)?;
        }
        Commands::Log => with_pager(&pwd, config, is_terminal, |repository| {
            let entries = repository.log()?;
            repository.print_log(&entries)
        })?,
        Commands::GlobalLog => with_pager(&pwd, config, is_terminal, |repository| {
            let entries = repository.full_log()?;
            repository.print_log(&entries)
        })?,
        Commands::Find { message } => {
            let repository = open(&pwd, config)?;

            let found = repository.find(message)?;
            repository.print_found(&found)?
        }
        Commands::Status => {
            let repository = open(&pwd, config)?;

            let status = repository.status()?;
            repository.print_status(&status)?
        }
        Commands::Checkout { target, file } => {
            let mut repository = open(&pwd, config)?;

            match (target, file) {
                (Some(commit), Some(file)) => repository.checkout_file_at(commit, file)?,
                (None, Some(file)) => repository.checkout_file(file)?,
                (Some(branch), None) => repository.checkout_branch(branch)?,
                (None, None) => anyhow::bail!("Nothing to check out: give a branch or -- <file>"),
            }
        }
        Commands::Branch { name } => {
            let mut repository = open(&pwd, config)?;

            repository.branch(name)?
        }
        Commands::RmBranch { name } => {
            let mut repository = open(&pwd, config)?;

            repository.delete_branch(name)?
        }
        Commands::Reset { commit } => {
            let mut repository = open(&pwd, config)?;

            repository.reset(commit)?;
        }
        Commands::Merge { branch } => {
            let mut repository = open(&pwd, config)?;

            let outcome = repository.merge(branch)?;
            repository.print_merge_outcome(&outcome)?
        }
    }

    Ok(())
}

fn open(path: &Path, config: Config) -> Result<Repository> {
    Repository::open(path, Box::new(std::io::stdout()), config)
}

/// Run `command` with its output routed through the pager when stdout is a terminal
fn with_pager(
    path: &Path,
    config: Config,
    is_terminal: bool,
    command: impl FnOnce(&Repository) -> Result<()>,
) -> Result<()> {
    if !is_terminal || config.no_pager {
        return command(&open(path, config)?);
    }

    let writer = PagerWriter::new();
    let pager = writer.pager().clone();
    let repository = Repository::open(path, Box::new(writer), config)?;

    command(&repository)?;
    repository.writer().flush()?;
    drop(repository);

    minus::page_all(pager)?;
    Ok(())
}
