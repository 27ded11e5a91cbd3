use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;
use walkdir::WalkDir;

use crate::scanner::is_staging_dir;
use crate::{GuextError, Result};

/// The tree a run actually mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    /// Directory the user pointed at.
    pub original: PathBuf,
    /// Directory that gets rewritten; equals `original` when not isolated.
    pub path: PathBuf,
    pub isolated: bool,
}

impl Workspace {
    pub fn in_place(original: PathBuf) -> Self {
        Self {
            path: original.clone(),
            original,
            isolated: false,
        }
    }
}

/// Clones a target tree into `<parent>/<staging>/<uuid>` before anything is rewritten.
///
/// The copy is left on disk after the run.
pub struct WorkspaceIsolator {
    staging_dir_name: String,
}

impl WorkspaceIsolator {
    pub fn new(staging_dir_name: impl Into<String>) -> Self {
        Self {
            staging_dir_name: staging_dir_name.into(),
        }
    }

    pub fn scratch_path(&self, source: &Path, id: Uuid) -> Result<PathBuf> {
        let parent = source.parent().ok_or_else(|| {
            GuextError::InvalidPath(format!(
                "{} has no parent directory to stage a copy in",
                source.display()
            ))
        })?;
        Ok(parent
            .join(&self.staging_dir_name)
            .join(id.hyphenated().to_string()))
    }

    pub fn isolate(&self, source: &Path) -> Result<Workspace> {
        let scratch = self.scratch_path(source, Uuid::new_v4())?;
        log::info!(
            "Copying {} into isolated workspace {}",
            source.display(),
            scratch.display()
        );

        let wrap = |err: GuextError| GuextError::Isolation {
            path: scratch.clone(),
            source: Box::new(err),
        };
        fs::create_dir_all(&scratch)
            .map_err(|err| wrap(GuextError::io("create", &scratch, err)))?;
        copy_tree(source, &scratch, &self.staging_dir_name).map_err(wrap)?;

        Ok(Workspace {
            original: source.to_path_buf(),
            path: scratch,
            isolated: true,
        })
    }
}

/// Recursive copy that leaves out scratch copies from earlier runs.
fn copy_tree(src: &Path, dst: &Path, staging: &str) -> Result<()> {
    let walker = WalkDir::new(src)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_staging_dir(entry, staging));
    for entry in walker {
        let entry = entry.map_err(|err| GuextError::traversal(src, err))?;
        let relative = entry.path().strip_prefix(src).map_err(|_| {
            GuextError::InvalidPath(format!(
                "{} escaped {}",
                entry.path().display(),
                src.display()
            ))
        })?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|err| GuextError::io("create", &target, err))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|err| GuextError::io("copy", entry.path(), err))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = fs::read_link(link).map_err(|err| GuextError::io("read link", link, err))?;
    std::os::unix::fs::symlink(&points_to, target)
        .map_err(|err| GuextError::io("create link", target, err))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    fs::copy(link, target)
        .map(|_| ())
        .map_err(|err| GuextError::io("copy", link, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn scratch_path_is_a_staged_sibling() {
        let isolator = WorkspaceIsolator::new(".guext-tmp");
        let id = Uuid::new_v4();
        let path = isolator
            .scratch_path(Path::new("/work/solution"), id)
            .unwrap();
        assert_eq!(
            path,
            Path::new("/work/.guext-tmp").join(id.hyphenated().to_string())
        );
    }

    #[test]
    fn filesystem_root_has_no_staging_parent() {
        let isolator = WorkspaceIsolator::new(".guext-tmp");
        let err = isolator
            .scratch_path(Path::new("/"), Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, GuextError::InvalidPath(_)), "{err}");
    }

    #[test]
    fn copies_tree_and_leaves_source_alone() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("solution");
        fs::create_dir_all(source.join("App").join("Models")).unwrap();
        fs::write(source.join("App").join("App.csproj"), "<Project />").unwrap();
        fs::write(
            source.join("App").join("Models").join("User.cs"),
            "using System;\nclass User {}\n",
        )
        .unwrap();

        let workspace = WorkspaceIsolator::new(".guext-tmp")
            .isolate(&source)
            .unwrap();

        assert!(workspace.isolated);
        assert_eq!(workspace.original, source);
        assert!(workspace.path.starts_with(temp.path().join(".guext-tmp")));
        assert_eq!(
            fs::read_to_string(workspace.path.join("App").join("Models").join("User.cs")).unwrap(),
            "using System;\nclass User {}\n"
        );
        assert!(workspace.path.join("App").join("App.csproj").is_file());
    }

    #[test]
    fn leftover_scratch_copies_are_not_copied() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("solution");
        let stale = source.join("App").join(".guext-tmp").join("old");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("Stale.cs"), "using Old;\n").unwrap();
        fs::write(source.join("App").join("App.csproj"), "").unwrap();

        let workspace = WorkspaceIsolator::new(".guext-tmp")
            .isolate(&source)
            .unwrap();

        assert!(workspace.path.join("App").join("App.csproj").is_file());
        assert!(!workspace.path.join("App").join(".guext-tmp").exists());
        assert!(stale.join("Stale.cs").is_file());
    }

    #[test]
    fn each_isolation_gets_a_fresh_directory() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("solution");
        fs::create_dir_all(&source).unwrap();
        let isolator = WorkspaceIsolator::new(".guext-tmp");

        let first = isolator.isolate(&source).unwrap();
        let second = isolator.isolate(&source).unwrap();

        assert_ne!(first.path, second.path);
    }

    #[test]
    fn missing_source_is_an_isolation_error() {
        let temp = tempdir().unwrap();
        let err = WorkspaceIsolator::new(".guext-tmp")
            .isolate(&temp.path().join("absent"))
            .unwrap_err();
        assert!(matches!(err, GuextError::Isolation { .. }), "{err}");
    }
}
