//! Line-level text diff
//!
//! Myers' O(ND) algorithm in its linear-space form: each step finds the
//! middle snake of the remaining region and recurses on both halves, so
//! memory stays proportional to the input rather than to its square.

use std::collections::{HashMap, HashSet};
use std::ops::{Index, IndexMut};

/// Classification of a run of lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Unchanged,
    Added,
    Removed,
}

/// Consecutive lines sharing one classification. `text` keeps line endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Number of lines in the segment
    pub fn line_count(&self) -> usize {
        self.text.split_inclusive('\n').count()
    }
}

/// Diff `old` against `new` line by line
///
/// Lines include their trailing `\n`, so `"a"` and `"a\n"` differ. At each
/// change point removed lines come before added lines.
pub fn diff_lines(old: &str, new: &str) -> Vec<Segment> {
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();

    let mut ids = HashMap::new();
    let old_ids = intern(&old_lines, &mut ids);
    let new_ids = intern(&new_lines, &mut ids);

    let mut builder = SegmentBuilder::default();
    for edit in edit_script(&old_ids, &new_ids) {
        match edit {
            Edit::Equal(i) => builder.push(SegmentKind::Unchanged, old_lines[i]),
            Edit::Delete(i) => builder.push(SegmentKind::Removed, old_lines[i]),
            Edit::Insert(j) => builder.push(SegmentKind::Added, new_lines[j]),
        }
    }

    builder.finish()
}

/// Map each distinct line to a small integer so comparisons are cheap
fn intern<'a>(lines: &[&'a str], ids: &mut HashMap<&'a str, usize>) -> Vec<usize> {
    lines
        .iter()
        .map(|line| {
            let next = ids.len();
            *ids.entry(*line).or_insert(next)
        })
        .collect()
}

/// One step of an edit script; indices point into the old or new sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Equal(usize),
    Delete(usize),
    Insert(usize),
}

/// Shortest edit script from `old` to `new`
fn edit_script(old: &[usize], new: &[usize]) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(old.len().max(new.len()));

    // No shared line: skip the search entirely
    let new_set: HashSet<usize> = new.iter().copied().collect();
    if !old.iter().any(|id| new_set.contains(id)) {
        edits.extend((0..old.len()).map(Edit::Delete));
        edits.extend((0..new.len()).map(Edit::Insert));
        return edits;
    }

    let max_d = max_d(old.len(), new.len());
    let mut myers = Myers {
        old,
        new,
        vf: V::new(max_d),
        vb: V::new(max_d),
    };
    myers.conquer(0, old.len(), 0, new.len(), &mut edits);
    edits
}

fn max_d(n: usize, m: usize) -> usize {
    (n + m + 1) / 2 + 1
}

/// Furthest-reaching x per diagonal `k`, indexed from `-max_d` to `max_d`
struct V {
    offset: isize,
    v: Vec<usize>,
}

impl V {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize,
            v: vec![0; 2 * max_d + 2],
        }
    }
}

impl Index<isize> for V {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for V {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

struct Myers<'a> {
    old: &'a [usize],
    new: &'a [usize],
    vf: V,
    vb: V,
}

impl Myers<'_> {
    fn conquer(
        &mut self,
        mut old_lo: usize,
        mut old_hi: usize,
        mut new_lo: usize,
        mut new_hi: usize,
        edits: &mut Vec<Edit>,
    ) {
        let prefix = common_prefix(&self.old[old_lo..old_hi], &self.new[new_lo..new_hi]);
        edits.extend((old_lo..old_lo + prefix).map(Edit::Equal));
        old_lo += prefix;
        new_lo += prefix;

        let suffix = common_suffix(&self.old[old_lo..old_hi], &self.new[new_lo..new_hi]);
        old_hi -= suffix;
        new_hi -= suffix;

        if old_lo == old_hi {
            edits.extend((new_lo..new_hi).map(Edit::Insert));
        } else if new_lo == new_hi {
            edits.extend((old_lo..old_hi).map(Edit::Delete));
        } else {
            match self.middle_snake(old_lo, old_hi, new_lo, new_hi) {
                Some((x, y)) if (x, y) != (old_lo, new_lo) && (x, y) != (old_hi, new_hi) => {
                    self.conquer(old_lo, x, new_lo, y, edits);
                    self.conquer(x, old_hi, y, new_hi, edits);
                }
                _ => {
                    edits.extend((old_lo..old_hi).map(Edit::Delete));
                    edits.extend((new_lo..new_hi).map(Edit::Insert));
                }
            }
        }

        edits.extend((old_hi..old_hi + suffix).map(Edit::Equal));
    }

    /// A point on an optimal path through the region, found by searching
    /// forward from the top-left and backward from the bottom-right until
    /// the two frontiers overlap
    fn middle_snake(
        &mut self,
        old_lo: usize,
        old_hi: usize,
        new_lo: usize,
        new_hi: usize,
    ) -> Option<(usize, usize)> {
        let (old, new) = (self.old, self.new);
        let old = &old[old_lo..old_hi];
        let new = &new[new_lo..new_hi];
        let n = old.len();
        let m = new.len();

        let delta = n as isize - m as isize;
        let odd = delta & 1 == 1;

        self.vf[1] = 0;
        self.vb[1] = 0;

        for d in 0..max_d(n, m) as isize {
            // Forward
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.vf[k - 1] < self.vf[k + 1]) {
                    self.vf[k + 1]
                } else {
                    self.vf[k - 1] + 1
                };
                let y = (x as isize - k) as usize;
                let (x0, y0) = (x, y);
                if x < n && y < m {
                    x += common_prefix(&old[x..], &new[y..]);
                }
                self.vf[k] = x;

                if odd
                    && (k - delta).abs() < d
                    && self.vf[k] + self.vb[delta - k] >= n
                    && x0 <= n
                    && y0 <= m
                {
                    return Some((old_lo + x0, new_lo + y0));
                }
            }

            // Backward, x and y measured from the bottom-right corner
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.vb[k - 1] < self.vb[k + 1]) {
                    self.vb[k + 1]
                } else {
                    self.vb[k - 1] + 1
                };
                let mut y = (x as isize - k) as usize;
                if x < n && y < m {
                    let advance = common_suffix(&old[..n - x], &new[..m - y]);
                    x += advance;
                    y += advance;
                }
                self.vb[k] = x;

                if !odd
                    && (k - delta).abs() <= d
                    && self.vb[k] + self.vf[delta - k] >= n
                    && x <= n
                    && y <= m
                {
                    return Some((old_hi - x, new_hi - y));
                }
            }
        }

        None
    }
}

fn common_prefix(a: &[usize], b: &[usize]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[usize], b: &[usize]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Groups consecutive lines of one kind; buffers additions so that a
/// removal run interleaved after them still prints first
#[derive(Default)]
struct SegmentBuilder {
    segments: Vec<Segment>,
    removed: String,
    added: String,
}

impl SegmentBuilder {
    fn push(&mut self, kind: SegmentKind, line: &str) {
        match kind {
            SegmentKind::Removed => self.removed.push_str(line),
            SegmentKind::Added => self.added.push_str(line),
            SegmentKind::Unchanged => {
                self.flush_changes();
                match self.segments.last_mut() {
                    Some(last) if last.kind == SegmentKind::Unchanged => last.text.push_str(line),
                    _ => self.segments.push(Segment::new(SegmentKind::Unchanged, line)),
                }
            }
        }
    }

    fn flush_changes(&mut self) {
        if !self.removed.is_empty() {
            let text = std::mem::take(&mut self.removed);
            self.segments.push(Segment::new(SegmentKind::Removed, text));
        }
        if !self.added.is_empty() {
            let text = std::mem::take(&mut self.added);
            self.segments.push(Segment::new(SegmentKind::Added, text));
        }
    }

    fn finish(mut self) -> Vec<Segment> {
        self.flush_changes();
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SegmentKind::*;

    fn seg(kind: SegmentKind, text: &str) -> Segment {
        Segment::new(kind, text)
    }

    #[test]
    fn test_appended_line() {
        assert_eq!(
            diff_lines("X\n", "X\nY\n"),
            vec![seg(Unchanged, "X\n"), seg(Added, "Y\n")]
        );
    }

    #[test]
    fn test_identical() {
        assert_eq!(diff_lines("a\nb\n", "a\nb\n"), vec![seg(Unchanged, "a\nb\n")]);
    }

    #[test]
    fn test_both_empty() {
        assert!(diff_lines("", "").is_empty());
    }

    #[test]
    fn test_from_empty_and_to_empty() {
        assert_eq!(diff_lines("", "a\nb\n"), vec![seg(Added, "a\nb\n")]);
        assert_eq!(diff_lines("a\nb\n", ""), vec![seg(Removed, "a\nb\n")]);
    }

    #[test]
    fn test_replaced_line_removed_first() {
        assert_eq!(
            diff_lines("a\nb\nc\n", "a\nB\nc\n"),
            vec![
                seg(Unchanged, "a\n"),
                seg(Removed, "b\n"),
                seg(Added, "B\n"),
                seg(Unchanged, "c\n"),
            ]
        );
    }

    #[test]
    fn test_missing_trailing_newline_is_a_change() {
        assert_eq!(
            diff_lines("a\nb", "a\nb\n"),
            vec![seg(Unchanged, "a\n"), seg(Removed, "b"), seg(Added, "b\n")]
        );
    }

    #[test]
    fn test_interleaved_changes() {
        let old = "one\ntwo\nthree\nfour\nfive\n";
        let new = "zero\none\nthree\nfour\nFIVE\nsix\n";
        assert_eq!(
            diff_lines(old, new),
            vec![
                seg(Added, "zero\n"),
                seg(Unchanged, "one\n"),
                seg(Removed, "two\n"),
                seg(Unchanged, "three\nfour\n"),
                seg(Removed, "five\n"),
                seg(Added, "FIVE\nsix\n"),
            ]
        );
    }

    #[test]
    fn test_reconstructs_both_sides() {
        let old = "fn main() {\n    println!(\"hi\");\n}\n";
        let new = "// header\nfn main() {\n    let x = 1;\n    println!(\"{}\", x);\n}\n";
        let segments = diff_lines(old, new);

        let rebuilt_old: String = segments
            .iter()
            .filter(|s| s.kind != Added)
            .map(|s| s.text.as_str())
            .collect();
        let rebuilt_new: String = segments
            .iter()
            .filter(|s| s.kind != Removed)
            .map(|s| s.text.as_str())
            .collect();

        assert_eq!(rebuilt_old, old);
        assert_eq!(rebuilt_new, new);
    }

    #[test]
    fn test_large_files_with_edits_at_both_ends() {
        let old: String = (0..50_000).map(|i| format!("line {}\n", i)).collect();
        let mut new_lines: Vec<String> = (0..50_000).map(|i| format!("line {}\n", i)).collect();
        new_lines[0] = "first\n".to_string();
        new_lines[49_999] = "last\n".to_string();
        let new: String = new_lines.concat();

        let segments = diff_lines(&old, &new);
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], seg(Removed, "line 0\n"));
        assert_eq!(segments[1], seg(Added, "first\n"));
        assert_eq!(segments[2].kind, Unchanged);
        assert_eq!(segments[2].line_count(), 49_998);
        assert_eq!(segments[3], seg(Removed, "line 49999\n"));
        assert_eq!(segments[4], seg(Added, "last\n"));
    }

    #[test]
    fn test_large_disjoint_files() {
        let old: String = (0..20_000).map(|i| format!("old {}\n", i)).collect();
        let new: String = (0..20_000).map(|i| format!("new {}\n", i)).collect();

        let segments = diff_lines(&old, &new);
        assert_eq!(segments, vec![seg(Removed, &old), seg(Added, &new)]);
    }

    #[test]
    fn test_minimal_script_on_scattered_edits() {
        let old: Vec<String> = (0..200).map(|i| format!("{}\n", i)).collect();
        let mut new = old.clone();
        new.remove(150);
        new.insert(100, "inserted\n".to_string());
        new[10] = "changed\n".to_string();

        let segments = diff_lines(&old.concat(), &new.concat());
        let added: usize = segments.iter().filter(|s| s.kind == Added).map(Segment::line_count).sum();
        let removed: usize = segments.iter().filter(|s| s.kind == Removed).map(Segment::line_count).sum();
        assert_eq!(added, 2);
        assert_eq!(removed, 2);
    }

    #[test]
    fn test_line_count() {
        assert_eq!(seg(Added, "a\nb\n").line_count(), 2);
        assert_eq!(seg(Added, "a\nb").line_count(), 2);
        assert_eq!(seg(Added, "").line_count(), 0);
    }
}
