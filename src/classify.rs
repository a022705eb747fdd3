//! Candidate classification and ranking.
//!
//! Splits the scanned image set, per asset kind, into *source* candidates
//! (square images above the kind's minimum dimension, ranked by filename
//! plausibility) and *target* candidates (existing placeholder files whose
//! names match the kind's convention; their current pixel dimensions define
//! the sizes to regenerate).

use std::path::{Path, PathBuf};

use crate::debug;
use crate::kind::AssetKind;
use crate::log;
use crate::meta::read_info;

/// A qualifying source image, with its ranking score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCandidate {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Filename-plausibility score, used only for ordering.
    pub score: u32,
}

/// A required output file: an existing placeholder's relative path and its
/// current pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    /// Path relative to the project root, mirrored under the output root.
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Filter and rank source candidates for one kind.
///
/// Unreadable files are logged and skipped. The result is sorted descending
/// by score with a stable sort, so equal scores keep scanner encounter
/// order; the head of the list is the chosen source.
pub fn source_candidates(
    kind: &AssetKind,
    root: &Path,
    images: &[PathBuf],
) -> Vec<SourceCandidate> {
    let mut candidates = Vec::new();
    for rel in images {
        let info = match read_info(&root.join(rel)) {
            Ok(info) => info,
            Err(e) => {
                log!(kind.name; "skipping unreadable image: {:#}", anyhow::Error::new(e));
                continue;
            }
        };
        if kind.is_source_candidate(&info) {
            candidates.push(SourceCandidate {
                path: rel.clone(),
                width: info.width,
                height: info.height,
                score: kind.score_path(&rel.to_string_lossy()),
            });
        }
    }
    // stable: ties keep scan order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Collect regeneration targets for one kind.
///
/// A path qualifies when it matches the kind's naming convention; its
/// required output dimensions come from reading the placeholder file itself,
/// never from the digits in its name.
pub fn target_candidates(kind: &AssetKind, root: &Path, images: &[PathBuf]) -> Vec<TargetSpec> {
    let mut targets = Vec::new();
    for rel in images {
        if !kind.is_target(&rel.to_string_lossy()) {
            continue;
        }
        match read_info(&root.join(rel)) {
            Ok(info) => targets.push(TargetSpec {
                path: rel.clone(),
                width: info.width,
                height: info.height,
            }),
            Err(e) => {
                log!(kind.name; "skipping unreadable target: {:#}", anyhow::Error::new(e));
                debug!(kind.name; "matched target pattern but not decodable: {}", rel.display());
            }
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{ICON, SPLASH};
    use image::RgbaImage;
    use std::fs;
    use tempfile::TempDir;

    fn write_png(root: &Path, rel: &str, width: u32, height: u32) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::new(width, height).save(&path).unwrap();
        PathBuf::from(rel)
    }

    #[test]
    fn filters_square_above_threshold() {
        let dir = TempDir::new().unwrap();
        let images = vec![
            write_png(dir.path(), "big.png", 1024, 1024),
            write_png(dir.path(), "edge.png", 1023, 1023),
            write_png(dir.path(), "wide.png", 2048, 1024),
        ];

        let sources = source_candidates(&ICON, dir.path(), &images);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, PathBuf::from("big.png"));
        assert_eq!((sources[0].width, sources[0].height), (1024, 1024));
    }

    #[test]
    fn splash_bound_is_strictly_greater_than_1200() {
        let dir = TempDir::new().unwrap();
        let images = vec![
            write_png(dir.path(), "at-bound.png", 1200, 1200),
            write_png(dir.path(), "over.png", 1201, 1201),
        ];

        let sources = source_candidates(&SPLASH, dir.path(), &images);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, PathBuf::from("over.png"));
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let dir = TempDir::new().unwrap();
        // all 1024x1024; scores: plain=3, a/b tie at 3, icon=4, resources+icon=5
        let images = vec![
            write_png(dir.path(), "a.png", 1024, 1024),
            write_png(dir.path(), "b.png", 1024, 1024),
            write_png(dir.path(), "art/icon-master.png", 1024, 1024),
            write_png(dir.path(), "resources/icon.png", 1024, 1024),
        ];

        let sources = source_candidates(&ICON, dir.path(), &images);
        let paths: Vec<_> = sources.iter().map(|s| s.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("resources/icon.png"),
                PathBuf::from("art/icon-master.png"),
                PathBuf::from("a.png"),
                PathBuf::from("b.png"),
            ]
        );
        assert_eq!(sources[0].score, 5);
        assert_eq!(sources[2].score, 3);
    }

    #[test]
    fn unreadable_source_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        let garbage = dir.path().join("broken.png");
        fs::write(&garbage, b"definitely not a png").unwrap();
        let images = vec![
            PathBuf::from("broken.png"),
            write_png(dir.path(), "ok.png", 1024, 1024),
        ];

        let sources = source_candidates(&ICON, dir.path(), &images);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, PathBuf::from("ok.png"));
    }

    #[test]
    fn targets_take_dimensions_from_the_file_not_the_name() {
        let dir = TempDir::new().unwrap();
        // the name says 120, the file says 120x96
        let images = vec![
            write_png(dir.path(), "resources/icon-120.png", 120, 96),
            write_png(dir.path(), "resources/icon.png", 57, 57),
        ];

        let targets = target_candidates(&ICON, dir.path(), &images);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].path, PathBuf::from("resources/icon-120.png"));
        assert_eq!((targets[0].width, targets[0].height), (120, 96));
    }
}
