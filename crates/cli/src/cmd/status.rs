//! Show HEAD and the staging area

use crate::util::{self, open_repo, GlobalOptions, Palette};
use anyhow::Result;
use commithub_core::{hash_file, Error, Sha1Hash, StagingEntry};
use owo_colors::OwoColorize;
use std::path::Path;

/// State of a staged file compared with the working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkingState {
    Unchanged,
    Modified,
    Missing,
}

/// Compare the staged blob hash with the file currently on disk.
/// Relative paths resolve against the repository root.
pub fn working_state(root: &Path, entry: &StagingEntry) -> WorkingState {
    let path = root.join(&entry.path);
    match hash_file(&path) {
        Ok(hash) if hash == entry.hash => WorkingState::Unchanged,
        Ok(_) => WorkingState::Modified,
        Err(Error::FileRead { .. }) => WorkingState::Missing,
        Err(_) => WorkingState::Modified,
    }
}

pub fn run(opts: &GlobalOptions) -> Result<()> {
    let repo = open_repo(opts)?;
    let palette = Palette::for_repo(opts, &repo);
    let root = repo.store().root();

    println!("{}", "Repository".style(palette.heading()));
    println!("  Root: {}", root.display());
    match repo.head()? {
        Some(head) => print_head(&repo, &head, &palette),
        None => println!("  HEAD: {}", "no commits yet".style(palette.dimmed())),
    }
    println!();

    let staged = repo.staging().read_all()?;
    if staged.is_empty() {
        println!("{}", "Nothing staged".style(palette.dimmed()));
        return Ok(());
    }

    println!(
        "{} ({})",
        "Staged for commit".style(palette.heading()),
        staged.len()
    );
    for entry in &staged {
        let state = match working_state(root, entry) {
            WorkingState::Unchanged => String::new(),
            WorkingState::Modified => format!(" {}", "(modified since staged)".style(palette.warning())),
            WorkingState::Missing => format!(" {}", "(missing)".style(palette.removed())),
        };
        println!(
            "  {} {}{}",
            entry.hash.short().style(palette.hash()),
            util::display_path(Path::new(&entry.path), root).style(palette.path()),
            state
        );
    }

    Ok(())
}

fn print_head(repo: &commithub_journal::Repository, head: &Sha1Hash, palette: &Palette) {
    match repo.get_commit(head) {
        Ok(commit) => {
            let when = commit
                .timestamp_utc()
                .map(util::format_relative_time)
                .unwrap_or_else(|| commit.timestamp.clone());
            println!(
                "  HEAD: {} {} {}",
                head.short().style(palette.hash()),
                util::summary_line(&commit.message),
                format!("({})", when).style(palette.dimmed())
            );
        }
        Err(e) => println!(
            "  HEAD: {} {}",
            head.short().style(palette.hash()),
            format!("(unreadable: {})", e).style(palette.warning())
        ),
    }
}
