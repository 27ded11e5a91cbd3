use std::path::PathBuf;

use serde::Serialize;

use crate::{AggregateReport, Workspace};

/// Result of processing one project root.
#[derive(Debug, Clone, Serialize)]
pub struct RootReport {
    pub root: PathBuf,

    /// Source files visited
    pub files: usize,

    /// Directive lines removed across those files
    pub directives: usize,

    pub aggregate: AggregateReport,
}

/// Result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub workspace: Workspace,
    pub roots: Vec<RootReport>,

    /// Time taken in milliseconds
    pub time_ms: u64,
}

impl RunReport {
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            roots: Vec::new(),
            time_ms: 0,
        }
    }

    pub fn add_root(&mut self, root: RootReport) {
        self.roots.push(root);
    }

    pub fn total_files(&self) -> usize {
        self.roots.iter().map(|root| root.files).sum()
    }

    pub fn total_directives(&self) -> usize {
        self.roots.iter().map(|root| root.directives).sum()
    }
}
