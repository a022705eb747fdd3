//! Error types for the asset pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Asset pipeline errors.
///
/// Per-file and per-target errors ([`UnreadableImage`](Error::UnreadableImage),
/// [`Render`](Error::Render)) are contained and logged by the caller; only
/// [`Scan`](Error::Scan) is fatal, since without an enumeration of the tree
/// no candidates can be known.
#[derive(Debug, Error)]
pub enum Error {
    /// File is not a decodable raster or is truncated/corrupt.
    #[error("unreadable image `{path}`")]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Resize/composite/encode/write failure for one target.
    #[error("failed to render `{path}`")]
    Render {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem walk failure while enumerating the project tree.
    #[error("failed to scan `{path}`")]
    Scan {
        path: PathBuf,
        #[source]
        source: jwalk::Error,
    },
}

impl Error {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::UnreadableImage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Render {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Render {
            path: path.into(),
            source: image::ImageError::IoError(source),
        }
    }
}
