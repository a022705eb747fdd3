//! Asset kind definitions.
//!
//! Each [`AssetKind`] is a configuration record bundling everything the
//! classifier needs to know about one asset category: the keyword used for
//! scoring, the minimum source dimension, the filename convention that marks
//! a file as a regeneration target, and the scoring policy itself. New kinds
//! (favicon, adaptive-icon, ...) are added here without touching classifier
//! control flow.

use regex::Regex;
use std::sync::LazyLock;

use crate::meta::ImageInfo;

/// Scoring policy: maps a path string to a filename-plausibility score.
///
/// Injectable so a kind can swap in a different heuristic without changing
/// how candidates are ranked.
pub type ScoreFn = fn(&AssetKind, &str) -> u32;

/// Configuration record for one asset category.
pub struct AssetKind {
    /// Kind name, also used as the log module prefix.
    pub name: &'static str,
    /// Keyword rewarded by the default scoring policy.
    pub keyword: &'static str,
    /// Exclusive lower bound on source dimensions: a source candidate must
    /// be square with `width > min_dimension`.
    pub min_dimension: u32,
    /// Naming convention that marks an existing file as a regeneration
    /// target. Matched against the lowercased relative path; it only decides
    /// *whether* a file is a target, never its size.
    pub target_pattern: Regex,
    /// Scoring policy for ranking source candidates.
    pub score: ScoreFn,
}

/// Icon kind: square sources above 1023px, `.png` targets only.
pub static ICON: LazyLock<AssetKind> = LazyLock::new(|| AssetKind {
    name: "icon",
    keyword: "icon",
    min_dimension: 1023,
    target_pattern: Regex::new(r"icon.*(?:@[0-9]x|[0-9]{1,4})+\.png$").unwrap(),
    score: substring_score,
});

/// Splash kind: square sources strictly above 1200px, `.png` or `.jpg`
/// targets. Note the bound is one pixel tighter relative to its threshold
/// than icon's.
pub static SPLASH: LazyLock<AssetKind> = LazyLock::new(|| AssetKind {
    name: "splash",
    keyword: "splash",
    min_dimension: 1200,
    target_pattern: Regex::new(r"splash.*(?:@[0-9]x|[0-9]{1,4})+\.(?:png|jpg)$").unwrap(),
    score: substring_score,
});

/// All built-in kinds, in processing order.
pub fn all() -> [&'static AssetKind; 2] {
    [&ICON, &SPLASH]
}

/// Look up a built-in kind by name.
pub fn by_name(name: &str) -> Option<&'static AssetKind> {
    all().into_iter().find(|k| k.name == name)
}

impl AssetKind {
    /// Whether an image qualifies as a source candidate: square and strictly
    /// above the kind's minimum dimension.
    pub fn is_source_candidate(&self, info: &ImageInfo) -> bool {
        info.is_square() && info.width > self.min_dimension
    }

    /// Whether a path matches the kind's target naming convention
    /// (case-insensitive).
    pub fn is_target(&self, path: &str) -> bool {
        self.target_pattern.is_match(&path.to_ascii_lowercase())
    }

    /// Score a path with the kind's configured policy.
    pub fn score_path(&self, path: &str) -> u32 {
        (self.score)(self, path)
    }
}

/// Default scoring policy: 3 base points, +1 if the path contains the kind
/// keyword, +1 if it contains "resources". Case-insensitive.
fn substring_score(kind: &AssetKind, path: &str) -> u32 {
    let lower = path.to_ascii_lowercase();
    let mut score = 3;
    if lower.contains(kind.keyword) {
        score += 1;
    }
    if lower.contains("resources") {
        score += 1;
    }
    score
}
