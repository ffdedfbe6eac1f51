//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use commithub_core::Error;
use commithub_journal::Repository;
use owo_colors::Style;
use std::io::IsTerminal;
use std::path::Path;

/// Options every command receives from the top-level parser
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Explicit repository root; otherwise discovered from the cwd
    pub repo: Option<std::path::PathBuf>,
    /// `--no-color`
    pub no_color: bool,
}

/// Open the repository the command should operate on
pub fn open_repo(opts: &GlobalOptions) -> Result<Repository> {
    let result = match &opts.repo {
        Some(root) => Repository::open(root),
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            Repository::discover(&cwd)
        }
    };

    match result {
        Ok(repo) => {
            tracing::debug!(root = %repo.store().root().display(), "opened repository");
            Ok(repo)
        }
        Err(Error::NotInitialized(path)) => anyhow::bail!(
            "Not a commithub repository: {} (run 'commithub init' first)",
            path.display()
        ),
        Err(e) => Err(e).context("Failed to open repository"),
    }
}

/// Colors used for console output; every style is plain when disabled
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colored unless disabled by flag or config, or stdout is not a terminal
    pub fn for_repo(opts: &GlobalOptions, repo: &Repository) -> Self {
        Self::new(
            !opts.no_color && repo.store().config().ui.color && std::io::stdout().is_terminal(),
        )
    }

    /// Palette for commands that run without a repository config
    pub fn for_stdout(opts: &GlobalOptions) -> Self {
        Self::new(!opts.no_color && std::io::stdout().is_terminal())
    }

    fn pick(&self, style: Style) -> Style {
        if self.enabled {
            style
        } else {
            Style::new()
        }
    }

    pub fn added(&self) -> Style {
        self.pick(Style::new().green())
    }

    pub fn removed(&self) -> Style {
        self.pick(Style::new().red())
    }

    pub fn unchanged(&self) -> Style {
        self.pick(Style::new().bright_black())
    }

    pub fn hash(&self) -> Style {
        self.pick(Style::new().yellow())
    }

    pub fn heading(&self) -> Style {
        self.pick(Style::new().bold())
    }

    pub fn dimmed(&self) -> Style {
        self.pick(Style::new().dimmed())
    }

    pub fn warning(&self) -> Style {
        self.pick(Style::new().yellow())
    }

    pub fn success(&self) -> Style {
        self.pick(Style::new().green())
    }

    pub fn path(&self) -> Style {
        self.pick(Style::new().cyan())
    }
}

/// Format timestamp as relative time ("2 hours ago")
pub fn format_relative_time(ts: DateTime<Utc>) -> String {
    format_relative_time_from(ts, Utc::now())
}

fn format_relative_time_from(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - ts).num_seconds();
    if seconds < 0 {
        return "in the future".to_string();
    }

    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{} days ago", seconds / 86400)
    } else {
        format!("{} weeks ago", seconds / 604800)
    }
}

/// Format timestamp in local time ("2024-01-03 14:30:00 +0100")
pub fn format_absolute_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %z")
        .to_string()
}

/// First line of a commit message
pub fn summary_line(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}

/// Path relative to `base` when possible, for display
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
