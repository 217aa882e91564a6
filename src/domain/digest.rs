use crate::domain::change::StagedChanges;

/// Scope used when no changed path carries a directory component.
pub const FALLBACK_SCOPE: &str = "misc";

const SAMPLE_LINE_LIMIT: usize = 3;

/// Per-file digest of a staged diff: line counts plus a few sample lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffDigest {
    pub filename: String,
    pub added: usize,
    pub removed: usize,
    pub sample_lines: Vec<String>,
}

impl DiffDigest {
    /// Digest one file's diff text. Counting is prefix-based on raw diff
    /// lines; sample lines keep their order in the diff.
    pub fn from_diff(path: &str, diff_text: &str) -> Self {
        let filename = path
            .rsplit('/')
            .next()
            .unwrap_or(path)
            .to_string();

        let mut added = 0;
        let mut removed = 0;
        let mut sample_lines = Vec::new();
        for line in diff_text.lines() {
            let changed = match line.as_bytes().first() {
                Some(b'+') => {
                    added += 1;
                    true
                }
                Some(b'-') => {
                    removed += 1;
                    true
                }
                _ => false,
            };
            if changed && sample_lines.len() < SAMPLE_LINE_LIMIT {
                sample_lines.push(line.to_string());
            }
        }

        Self {
            filename,
            added,
            removed,
            sample_lines,
        }
    }

    fn render(&self) -> String {
        let mut block = format!("File: {}", self.filename);
        if self.added > 0 || self.removed > 0 {
            block.push_str(&format!(" ({} added, {} removed)", self.added, self.removed));
        }
        if !self.sample_lines.is_empty() {
            block.push_str("\nChanges:\n");
            block.push_str(&self.sample_lines.join("\n"));
        }
        block
    }
}

/// Compact textual digest of all staged changes, one block per file.
pub fn summarize(changes: &StagedChanges) -> String {
    changes
        .iter()
        .map(|change| DiffDigest::from_diff(&change.path, &change.diff_text).render())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Most frequent top-level path segment among the changed paths.
///
/// Paths without a directory component count toward [`FALLBACK_SCOPE`]; ties
/// resolve to the segment seen first among the equal maxima.
pub fn scope(paths: &[&str]) -> String {
    if paths.is_empty() {
        return FALLBACK_SCOPE.to_string();
    }

    let mut order: Vec<&str> = Vec::new();
    let mut counts: Vec<usize> = Vec::new();
    for path in paths {
        let segment = match path.split_once('/') {
            Some((first, rest)) if !rest.is_empty() => first,
            _ => FALLBACK_SCOPE,
        };
        match order.iter().position(|&s| s == segment) {
            Some(idx) => counts[idx] += 1,
            None => {
                order.push(segment);
                counts.push(1);
            }
        }
    }

    let best = counts
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
        .map(|(idx, _)| order[idx])
        .unwrap_or(FALLBACK_SCOPE);
    best.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::change::StagedChange;

    fn changes(entries: &[(&str, &str)]) -> StagedChanges {
        StagedChanges::new(
            entries
                .iter()
                .map(|(path, diff)| StagedChange {
                    path: path.to_string(),
                    diff_text: diff.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn counts_lines_and_samples_first_three() {
        let digest = DiffDigest::from_diff("src/lib.rs", "+a\n+b\n-c\n+d\n-e");
        assert_eq!(digest.filename, "lib.rs");
        assert_eq!(digest.added, 3);
        assert_eq!(digest.removed, 2);
        assert_eq!(digest.sample_lines, vec!["+a", "+b", "-c"]);

        let rendered = summarize(&changes(&[("src/lib.rs", "+a\n+b\n-c\n+d\n-e")]));
        assert_eq!(rendered, "File: lib.rs (3 added, 2 removed)\nChanges:\n+a\n+b\n-c");
    }

    #[test]
    fn omits_counts_and_changes_when_nothing_changed() {
        let rendered = summarize(&changes(&[("notes.txt", "context only\nmore context")]));
        assert_eq!(rendered, "File: notes.txt");
    }

    #[test]
    fn joins_file_blocks_with_blank_lines() {
        let rendered = summarize(&changes(&[("a.rs", "+x"), ("b.rs", "-y")]));
        assert_eq!(
            rendered,
            "File: a.rs (1 added, 0 removed)\nChanges:\n+x\n\nFile: b.rs (0 added, 1 removed)\nChanges:\n-y"
        );
    }

    #[test]
    fn scope_picks_most_common_top_level_directory() {
        assert_eq!(scope(&["src/a.py", "src/b.py", "docs/c.md"]), "src");
    }

    #[test]
    fn scope_falls_back_without_directories() {
        assert_eq!(scope(&["readme.md"]), FALLBACK_SCOPE);
        assert_eq!(scope(&[]), FALLBACK_SCOPE);
    }

    #[test]
    fn scope_breaks_ties_by_first_seen() {
        assert_eq!(scope(&["docs/a.md", "src/b.rs"]), "docs");
        assert_eq!(scope(&["src/a.rs", "docs/b.md", "docs/c.md", "src/d.rs"]), "src");
    }
}
