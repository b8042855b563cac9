use anyhow::Result;
use clap::{Parser, Subcommand};
use minigit::areas::repository::Repository;
use minigit::artifacts::core::config::pager_enabled;
use minigit::artifacts::core::pager::PagerWriter;
use minigit::artifacts::merge::MergeOutcome;
use minus::Pager;
use std::io::Write;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_FILTER_ENV: &str = "MINIGIT_LOG";
const DEFAULT_LOG_FILTER: &str = "minigit=error";

#[derive(Parser)]
#[command(
    name = "minigit",
    version = "0.1.0",
    about = "A minimal version control system",
    long_about = "A minimal content-addressed version control system with branches, \
    checkout and three-way merges over a single-parent commit history.",
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
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Add files to the staging area",
        long_about = "This command stores the content of the given files and stages them for the next commit. \
        Directories, including '.', stage every file below them."
    )]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit from the staged files with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show the commit history",
        long_about = "This command shows every commit from HEAD back to the first one, newest first."
    )]
    Log,
    #[command(
        name = "branch",
        about = "Create or list branches",
        long_about = "This command creates a branch at the current HEAD commit. \
        Without a name it lists every branch and marks the current one."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or commit",
        long_about = "This command switches HEAD to a branch or commit hash and makes the working tree \
        match that commit. Files the commit does not track are removed."
    )]
    Checkout {
        #[arg(index = 1, help = "The branch name or commit hash to switch to")]
        target: String,
    },
    #[command(
        name = "merge",
        about = "Merge a branch into the current HEAD",
        long_about = "This command merges the given branch into HEAD using a three-way merge. \
        Conflicting files get conflict markers and no commit is made."
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge")]
        branch: String,
    },
    #[command(
        name = "diff",
        about = "Compare two files line by line",
        long_about = "This command compares two files line by line and prints every line number where they differ."
    )]
    Diff {
        #[arg(index = 1)]
        left: String,
        #[arg(index = 2)]
        right: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_repository(writer: Box<dyn Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;

    Repository::new(&pwd.to_string_lossy(), writer)
}

fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Init { path } => {
            let mut repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_repository(Box::new(std::io::stdout()))?,
            };

            repository.init()?
        }
        Commands::Add { paths } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.add(paths)?
        }
        Commands::Commit { message } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.commit(message.as_str())?
        }
        Commands::Log => {
            if pager_enabled() {
                let pager = Pager::new();
                let repository = open_repository(Box::new(PagerWriter::new(pager.clone())))?;

                repository.log()?;
                minus::page_all(pager)?;
            } else {
                let repository = open_repository(Box::new(std::io::stdout()))?;

                repository.log()?
            }
        }
        Commands::Branch { name } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.branch(name.as_deref())?
        }
        Commands::Checkout { target } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            repository.checkout(target)?
        }
        Commands::Merge { branch } => {
            let mut repository = open_repository(Box::new(std::io::stdout()))?;

            let outcome = repository.merge(branch)?;
            if let MergeOutcome::Conflicted(paths) = &outcome {
                debug!(?paths, "merge stopped on conflicts");
            }
        }
        Commands::Diff { left, right } => {
            let repository = open_repository(Box::new(std::io::stdout()))?;

            repository.diff(left, right)?
        }
    }

    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    // every outcome is reported on stdout and the exit status is always 0
    if let Err(e) = run(&cli.command) {
        println!("error: {e:#}");
    }
}
