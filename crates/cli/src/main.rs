//! commithub CLI - minimal content-addressed version control

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commithub_cli::cmd;
use commithub_cli::util::GlobalOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// commithub - snapshot files into a chain of content-addressed commits
#[derive(Parser)]
#[command(name = "commithub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository root (default: search upward from the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    repo: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty repository
    Init,
    /// Stage files for the next commit
    Add {
        /// Files to stage
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Record the staged files as a new commit
    Commit {
        /// Commit message
        message: String,
    },
    /// Show commit history, newest first
    Log {
        /// Number of commits to show (default: log.limit from config)
        #[arg(long)]
        limit: Option<usize>,
        /// One line per commit
        #[arg(long)]
        oneline: bool,
    },
    /// Show what a commit changed relative to its parent
    Diff {
        /// Commit hash, unique prefix or HEAD
        commit: String,
    },
    /// Show HEAD and the staging area
    Status,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = GlobalOptions {
        repo: cli.repo,
        no_color: cli.no_color,
    };

    match cli.command {
        Commands::Init => cmd::init::run(&opts),
        Commands::Add { files } => cmd::add::run(&opts, &files),
        Commands::Commit { message } => cmd::commit::run(&opts, &message),
        Commands::Log { limit, oneline } => cmd::log::run(&opts, limit, oneline),
        Commands::Diff { commit } => cmd::diff::run(&opts, &commit),
        Commands::Status => cmd::status::run(&opts),
    }
}
