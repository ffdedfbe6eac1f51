//! Display commit history

use crate::util::{self, open_repo, GlobalOptions, Palette};
use anyhow::Result;
use commithub_core::Sha1Hash;
use commithub_journal::LogEntry;
use owo_colors::OwoColorize;

pub fn run(opts: &GlobalOptions, limit: Option<usize>, oneline: bool) -> Result<()> {
    let repo = open_repo(opts)?;
    let palette = Palette::for_repo(opts, &repo);

    // 0 means unlimited, both on the flag and in config
    let limit = match limit.unwrap_or(repo.store().config().log.limit) {
        0 => usize::MAX,
        n => n,
    };

    let head = repo.head()?;
    let mut shown = 0;
    for item in repo.log()?.take(limit) {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) if e.is_not_found() => {
                // Broken chain: show what was reachable
                eprintln!(
                    "{}",
                    format!("warning: history stops here: {}", e).style(palette.warning())
                );
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if oneline {
            display_oneline(&entry, &palette);
        } else {
            if shown > 0 {
                println!();
            }
            display_full(&entry, head.as_ref(), &palette);
        }
        shown += 1;
    }

    if shown == 0 {
        println!("{}", "No commits yet".style(palette.dimmed()));
    }

    Ok(())
}

/// Display in one-line format (like git log --oneline)
fn display_oneline(entry: &LogEntry, palette: &Palette) {
    println!(
        "{} {}",
        entry.hash.short().style(palette.hash()),
        util::summary_line(&entry.commit.message)
    );
}

fn display_full(entry: &LogEntry, head: Option<&Sha1Hash>, palette: &Palette) {
    let marker = if head == Some(&entry.hash) { " (HEAD)" } else { "" };
    println!(
        "{} {}{}",
        "commit".style(palette.heading()),
        entry.hash.to_hex().style(palette.hash()),
        marker.style(palette.path())
    );

    let date = match entry.commit.timestamp_utc() {
        Some(ts) => format!(
            "{} ({})",
            util::format_absolute_time(ts),
            util::format_relative_time(ts)
        ),
        None => entry.commit.timestamp.clone(),
    };
    println!("Date:   {}", date);
    println!();

    for line in entry.commit.message.lines() {
        println!("    {}", line);
    }
}
