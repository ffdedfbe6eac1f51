//! Show what a commit changed relative to its parent

use crate::diff_utils::{render_commit_diff, RenderOptions};
use crate::util::{open_repo, GlobalOptions, Palette};
use anyhow::Result;
use commithub_core::Error;
use owo_colors::OwoColorize;

pub fn run(opts: &GlobalOptions, reference: &str) -> Result<()> {
    let repo = open_repo(opts)?;
    let palette = Palette::for_repo(opts, &repo);

    let diff = match repo.diff_reference(reference) {
        Ok(diff) => diff,
        Err(Error::CommitNotFound(_)) => {
            println!("{}", "Commit not found".style(palette.warning()));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let render = RenderOptions {
        show_content: repo.store().config().diff.show_content,
        palette,
    };
    print!("{}", render_commit_diff(&diff, &render));

    Ok(())
}
