//! Text rendering for commit diffs

use crate::util::Palette;
use commithub_journal::{CommitDiff, FileDiff, FileStatus, Segment, SegmentKind};
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Rendering switches
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Print each file's full content before its diff
    pub show_content: bool,
    pub palette: Palette,
}

/// Render the report `commithub diff` prints
pub fn render_commit_diff(diff: &CommitDiff, opts: &RenderOptions) -> String {
    let palette = &opts.palette;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        "Changes in commit".style(palette.heading()),
        diff.hash.to_hex().style(palette.hash())
    );
    if diff.files.is_empty() {
        let _ = writeln!(out, "{}", "No files in this commit".style(palette.dimmed()));
        return out;
    }

    for file in &diff.files {
        out.push('\n');
        render_file(&mut out, file, opts);
    }

    out
}

fn render_file(out: &mut String, file: &FileDiff, opts: &RenderOptions) {
    let palette = &opts.palette;

    let _ = writeln!(out, "File: {}", file.path.style(palette.path()));

    if opts.show_content {
        push_terminated(out, &file.text());
    }

    match &file.status {
        FileStatus::FirstCommit => {
            let _ = writeln!(out, "{}", "First commit".style(palette.dimmed()));
        }
        FileStatus::NewFile => {
            let _ = writeln!(out, "{}", "New file in this commit".style(palette.added()));
        }
        FileStatus::Changed(segments) => {
            let _ = writeln!(
                out,
                "{} {} {}",
                "Diff:".style(palette.heading()),
                format!("+{}", file.added_lines()).style(palette.added()),
                format!("-{}", file.removed_lines()).style(palette.removed())
            );
            for segment in segments {
                render_segment(out, segment, palette);
            }
        }
    }
}

/// One output line per input line, prefixed by kind
fn render_segment(out: &mut String, segment: &Segment, palette: &Palette) {
    let (prefix, style) = match segment.kind {
        SegmentKind::Added => ("++ ", palette.added()),
        SegmentKind::Removed => ("-- ", palette.removed()),
        SegmentKind::Unchanged => ("   ", palette.unchanged()),
    };

    for line in segment.text.split_inclusive('\n') {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let _ = writeln!(out, "{}", format!("{}{}", prefix, line).style(style));
    }
}

fn push_terminated(out: &mut String, text: &str) {
    out.push_str(text);
    if !text.is_empty() && !text.ends_with('\n') {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commithub_core::{hash_bytes, StagingEntry};
    use commithub_journal::Commit;

    fn plain(show_content: bool) -> RenderOptions {
        RenderOptions {
            show_content,
            palette: Palette::new(false),
        }
    }

    fn file(path: &str, content: &str, status: FileStatus) -> FileDiff {
        FileDiff {
            path: path.to_string(),
            hash: hash_bytes(content.as_bytes()),
            content: content.as_bytes().to_vec(),
            status,
        }
    }

    fn commit_diff(files: Vec<FileDiff>) -> CommitDiff {
        let entries = files
            .iter()
            .map(|f| StagingEntry::new(f.path.clone(), f.hash))
            .collect();
        let commit = Commit::new("msg", entries, None);
        CommitDiff {
            hash: hash_bytes(b"commit"),
            commit,
            files,
        }
    }

    #[test]
    fn test_render_changed_file() {
        let diff = commit_diff(vec![file(
            "a.txt",
            "X\nY\n",
            FileStatus::Changed(vec![
                Segment::new(SegmentKind::Unchanged, "X\n"),
                Segment::new(SegmentKind::Added, "Y\n"),
            ]),
        )]);

        let out = render_commit_diff(&diff, &plain(false));
        assert!(out.contains("File: a.txt"));
        assert!(out.contains("Diff: +1 -0"));
        assert!(out.contains("   X\n"));
        assert!(out.contains("++ Y\n"));
    }

    #[test]
    fn test_render_removed_lines_each_prefixed() {
        let diff = commit_diff(vec![file(
            "a.txt",
            "",
            FileStatus::Changed(vec![Segment::new(SegmentKind::Removed, "one\ntwo")]),
        )]);

        let out = render_commit_diff(&diff, &plain(false));
        assert!(out.contains("-- one\n-- two\n"));
    }

    #[test]
    fn test_render_first_commit_and_new_file() {
        let diff = commit_diff(vec![
            file("a.txt", "hello", FileStatus::FirstCommit),
            file("b.txt", "new\n", FileStatus::NewFile),
        ]);

        let out = render_commit_diff(&diff, &plain(true));
        assert!(out.contains("File: a.txt\nhello\nFirst commit\n"));
        assert!(out.contains("File: b.txt\nnew\nNew file in this commit\n"));
    }

    #[test]
    fn test_render_without_content() {
        let diff = commit_diff(vec![file("a.txt", "secret body\n", FileStatus::FirstCommit)]);

        let out = render_commit_diff(&diff, &plain(false));
        assert!(!out.contains("secret body"));
    }

    #[test]
    fn test_render_empty_commit() {
        let out = render_commit_diff(&commit_diff(vec![]), &plain(true));
        assert!(out.contains("No files in this commit"));
    }
}
