//! Project tree scanning.
//!
//! Enumerates every raster image under the project root, pruning build
//! output, dependency trees, and editor directories. Order is filesystem
//! walk order; callers rely on it only for tie-breaking, never correctness.

use jwalk::WalkDir;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Default output directory name, always excluded from scanning.
pub const OUT_DIR: &str = "resourcegen-out";

/// Recognized raster extensions (matched case-insensitively).
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Directory names pruned from the walk wherever they appear.
const EXCLUDED_DIRS: &[&str] = &[
    OUT_DIR,
    "node_modules",
    "target",
    "vendor",
    "test",
    "build",
    "www",
    "coverage",
    ".git",
    ".vscode",
    ".idea",
    ".e2e",
];

/// Whether a path has a recognized raster extension.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Scan `root` recursively for image files.
///
/// Returns paths relative to `root`, in walk order. `out_dir_name` is the
/// configured output directory name, pruned in addition to the fixed
/// exclusion set. Any walk-level failure aborts the scan ([`Error::Scan`]).
pub fn scan(root: &Path, out_dir_name: &str) -> Result<Vec<PathBuf>, Error> {
    let extra = out_dir_name.to_string();
    let walker = WalkDir::new(root).process_read_dir(move |_depth, _path, _state, children| {
        children.retain(|entry| {
            entry.as_ref().map_or(true, |e| {
                if !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_str().unwrap_or_default();
                !EXCLUDED_DIRS.contains(&name) && name != extra
            })
        });
    });

    let mut images = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| Error::Scan {
            path: e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_image_path(&path) {
            images.push(path.strip_prefix(root).unwrap_or(&path).to_path_buf());
        }
    }
    Ok(images)
}
