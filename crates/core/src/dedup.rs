use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::fsio::{read_lines, write_lines_atomic};
use crate::Result;

/// Outcome of deduplicating one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    /// Lines left in the file.
    pub kept: usize,
    /// Later duplicates dropped.
    pub removed: usize,
}

/// Keeps the first occurrence of every line, preserving order.
///
/// Equality is exact: case and whitespace both count.
pub fn dedup_lines<I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

/// Deduplicates `path` in place.
pub fn dedup_file(path: &Path) -> Result<DedupReport> {
    let lines = read_lines(path)?;
    let total = lines.len();
    let unique = dedup_lines(lines);

    write_lines_atomic(path, unique.as_slice())?;

    Ok(DedupReport {
        kept: unique.len(),
        removed: total - unique.len(),
    })
}
