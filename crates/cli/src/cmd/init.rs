//! Create the repository layout

use crate::util::{GlobalOptions, Palette};
use anyhow::{Context, Result};
use commithub_core::Error;
use commithub_journal::Repository;
use owo_colors::OwoColorize;
use std::env;

pub fn run(opts: &GlobalOptions) -> Result<()> {
    let root = match &opts.repo {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let palette = Palette::for_stdout(opts);

    match Repository::init(&root) {
        Ok(repo) => {
            println!(
                "{} {}",
                "Initialized empty commithub repository in".style(palette.success()),
                repo.store().repo_dir().display()
            );
            Ok(())
        }
        Err(Error::AlreadyInitialized(dir)) => {
            println!(
                "{}",
                format!("Repository already initialized at {}", dir.display())
                    .style(palette.warning())
            );
            Ok(())
        }
        Err(e) => Err(e).context("Failed to initialize repository"),
    }
}
