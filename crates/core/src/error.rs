use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GuextError>;

#[derive(Error, Debug)]
pub enum GuextError {
    #[error("failed to traverse {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to isolate workspace at {}: {source}", path.display())]
    Isolation {
        path: PathBuf,
        #[source]
        source: Box<GuextError>,
    },

    #[error("Invalid target path: {0}")]
    InvalidPath(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GuextError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn traversal(root: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        let path = source
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.into());
        Self::Traversal {
            path,
            source: source.into(),
        }
    }

    /// A directory that could not be listed while looking for project roots.
    pub(crate) fn unreadable_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Traversal {
            path: path.into(),
            source,
        }
    }
}
