//! Stage files

use crate::util::{open_repo, GlobalOptions, Palette};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn run(opts: &GlobalOptions, files: &[PathBuf]) -> Result<()> {
    let repo = open_repo(opts)?;
    let palette = Palette::for_repo(opts, &repo);

    for file in files {
        let entry = repo
            .add(file)
            .with_context(|| format!("Failed to add {}", file.display()))?;
        println!(
            "Added {} to staging area {}",
            entry.path.style(palette.path()),
            entry.hash.short().style(palette.dimmed())
        );
    }

    Ok(())
}
