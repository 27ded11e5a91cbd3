use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::dedup::dedup_file;
use crate::fsio::ends_with_newline;
use crate::{GuextConfig, GuextError, Result};

/// What happened to a project's aggregate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub path: PathBuf,
    /// Directives appended during this pass (before deduplication).
    pub appended: usize,
    /// Lines in the file after deduplication.
    pub lines: usize,
    pub duplicates_removed: usize,
}

/// Appends globalized directives to a root's aggregate file and deduplicates it.
pub struct AggregateWriter {
    file_name: String,
    marker: String,
}

impl AggregateWriter {
    pub fn new(file_name: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            marker: marker.into(),
        }
    }

    pub fn from_config(config: &GuextConfig) -> Self {
        Self::new(config.aggregate_file_name(), config.global_marker())
    }

    pub fn aggregate_path(&self, root: &Path) -> PathBuf {
        root.join(&self.file_name)
    }

    /// `using System;` becomes `global using System;`.
    pub fn globalize(&self, directive: &str) -> String {
        format!("{} {directive}", self.marker)
    }

    pub fn write(&self, root: &Path, directives: &[String]) -> Result<AggregateReport> {
        let path = self.aggregate_path(root);

        let needs_separator = path.exists() && !ends_with_newline(&path)?;
        if needs_separator {
            log::warn!(
                "{} does not end with a newline; appending on a new line",
                path.display()
            );
        }

        {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|err| GuextError::io("open", &path, err))?;
            let mut writer = BufWriter::new(file);
            let write_err = |err| GuextError::io("append to", &path, err);
            if needs_separator {
                writer.write_all(b"\n").map_err(write_err)?;
            }
            for directive in directives {
                writeln!(writer, "{}", self.globalize(directive)).map_err(write_err)?;
            }
            writer.flush().map_err(write_err)?;
        }

        let dedup = dedup_file(&path)?;
        log::debug!(
            "{}: appended {}, {} duplicate(s) removed",
            path.display(),
            directives.len(),
            dedup.removed
        );

        Ok(AggregateReport {
            path,
            appended: directives.len(),
            lines: dedup.kept,
            duplicates_removed: dedup.removed,
        })
    }
}
