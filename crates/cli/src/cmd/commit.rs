//! Record the staging area as a commit

use crate::util::{open_repo, GlobalOptions, Palette};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

pub fn run(opts: &GlobalOptions, message: &str) -> Result<()> {
    let repo = open_repo(opts)?;
    let palette = Palette::for_repo(opts, &repo);

    let empty = repo.staging().is_empty()?;
    let hash = repo.commit(message).context("Failed to create commit")?;

    println!(
        "Commit successfully created: {}",
        hash.to_hex().style(palette.hash())
    );
    if empty {
        println!("{}", "Note: nothing was staged, commit has no files".style(palette.dimmed()));
    }

    Ok(())
}
