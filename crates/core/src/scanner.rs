use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::{GuextConfig, GuextError, Result};

/// Finds project roots and the source files beneath them.
pub struct ProjectScanner<'a> {
    config: &'a GuextConfig,
}

impl<'a> ProjectScanner<'a> {
    pub fn new(config: &'a GuextConfig) -> Self {
        Self { config }
    }

    /// Directories under `root` (inclusive) that directly hold a project descriptor.
    ///
    /// Pre-order, filesystem order. Nested roots are reported on their own.
    /// Any unreadable directory aborts the scan.
    pub fn project_roots(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut roots = Vec::new();

        for entry in self.walk(root, false) {
            let entry = entry.map_err(|err| GuextError::traversal(root, err))?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if self.holds_descriptor(entry.path())? {
                log::debug!("Project root {}", entry.path().display());
                roots.push(entry.into_path());
            }
        }

        log::info!(
            "Found {} project root(s) under {}",
            roots.len(),
            root.display()
        );
        Ok(roots)
    }

    /// Every file under `root` with the configured source extension.
    ///
    /// Siblings are visited in file-name order so aggregate order does not
    /// depend on the filesystem.
    pub fn source_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in self.walk(root, true) {
            let entry = entry.map_err(|err| GuextError::traversal(root, err))?;
            if entry.file_type().is_file() && self.is_source_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        log::debug!("Found {} source file(s) in {}", files.len(), root.display());
        Ok(files)
    }

    fn walk(
        &self,
        root: &Path,
        sorted: bool,
    ) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
        let mut walker = WalkDir::new(root).follow_links(false);
        if sorted {
            walker = walker.sort_by_file_name();
        }
        let staging = self.config.staging_dir_name().to_string();
        walker
            .into_iter()
            .filter_entry(move |entry| !is_staging_dir(entry, &staging))
    }

    fn holds_descriptor(&self, dir: &Path) -> Result<bool> {
        let entries = fs::read_dir(dir).map_err(|err| GuextError::unreadable_dir(dir, err))?;
        for entry in entries {
            let entry = entry.map_err(|err| GuextError::unreadable_dir(dir, err))?;
            let is_file = entry
                .file_type()
                .map_err(|err| GuextError::unreadable_dir(entry.path(), err))?
                .is_file();
            if is_file
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.config.is_descriptor(name))
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.config.source_extension())
    }
}

pub(crate) fn is_staging_dir(entry: &DirEntry, staging: &str) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str() == Some(staging)
}
