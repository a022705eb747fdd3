//! Per-kind orchestration.
//!
//! Drives the full flow for each asset kind: scan once, pick the top-ranked
//! source, resolve targets from existing placeholders, ensure the output
//! root (and its ignore marker) exists, then fan the source out over every
//! target. Kinds are independent and run via `rayon::join`; per-target
//! failures are logged and never abort the batch.

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::classify;
use crate::kind::AssetKind;
use crate::render::render;
use crate::scan;
use crate::{debug, log};

/// Ignore marker written into the output root, excluding the whole
/// directory from version control.
pub const IGNORE_MARKER: &str = ".gitignore";
const IGNORE_CONTENT: &str = "*\n";

/// One generation run's parameters.
pub struct Options {
    /// Project root to scan.
    pub root: PathBuf,
    /// Output root; target paths are mirrored beneath it.
    pub out_dir: PathBuf,
    /// 0 flattens to opaque output, any positive value rounds corners.
    pub corner_radius_percent: f32,
    /// Kinds to process, each fully independent of the others.
    pub kinds: Vec<&'static AssetKind>,
}

/// Run the generation pipeline for every configured kind.
///
/// Only a scan failure is fatal; a kind with no source or no targets is
/// reported and skipped.
pub fn generate(opts: &Options) -> Result<()> {
    let images = scan::scan(&opts.root, out_dir_name(&opts.out_dir))?;
    debug!("scan"; "{} image file(s) under {}", images.len(), opts.root.display());

    match opts.kinds.as_slice() {
        [a, b] => {
            let (ra, rb) = rayon::join(
                || process_kind(a, opts, &images),
                || process_kind(b, opts, &images),
            );
            ra?;
            rb?;
        }
        kinds => {
            for kind in kinds {
                process_kind(kind, opts, &images)?;
            }
        }
    }
    Ok(())
}

/// Classify, then render every target for one kind.
fn process_kind(kind: &AssetKind, opts: &Options, images: &[PathBuf]) -> Result<()> {
    let sources = classify::source_candidates(kind, &opts.root, images);
    let Some(source) = sources.first() else {
        log!(kind.name; "no likely {} source image candidates found", kind.name);
        return Ok(());
    };
    log!(
        kind.name;
        "using {} source ({}x{}) >>> {}",
        kind.name, source.width, source.height, source.path.display()
    );

    let targets = classify::target_candidates(kind, &opts.root, images);
    if targets.is_empty() {
        log!(kind.name; "no {} targets found", kind.name);
        return Ok(());
    }

    ensure_output_root(&opts.out_dir)?;

    let source_path = opts.root.join(&source.path);
    let mut rendered = 0usize;
    for target in &targets {
        let out_path = opts.out_dir.join(&target.path);
        log!(kind.name; " > {} ({}x{})", target.path.display(), target.width, target.height);
        match render(
            &source_path,
            target.width,
            target.height,
            opts.corner_radius_percent,
            &out_path,
        ) {
            Ok(()) => rendered += 1,
            Err(e) => log!("error"; "{:#}", anyhow::Error::new(e)),
        }
    }
    log!(kind.name; "generated {rendered}/{} {} target(s)", targets.len(), kind.name);
    Ok(())
}

/// Create the output root and its ignore marker if absent.
///
/// Idempotent and safe under concurrent creation: the marker uses
/// create-if-absent semantics and is never overwritten once present.
pub fn ensure_output_root(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;
    let marker = out_dir.join(IGNORE_MARKER);
    match OpenOptions::new().write(true).create_new(true).open(&marker) {
        Ok(mut file) => file.write_all(IGNORE_CONTENT.as_bytes())?,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Dry run: print ranked source candidates and resolved targets per kind
/// without writing anything.
pub fn report(root: &Path, kinds: &[&'static AssetKind]) -> Result<()> {
    let images = scan::scan(root, scan::OUT_DIR)?;
    log!("scan"; "{} image file(s) under {}", images.len(), root.display());

    for kind in kinds {
        let sources = classify::source_candidates(kind, root, &images);
        if sources.is_empty() {
            log!(kind.name; "no likely {} source image candidates found", kind.name);
        } else {
            log!(kind.name; "{} source candidate(s), best first:", sources.len());
            for s in &sources {
                log!(kind.name; "  [score {}] {} ({}x{})", s.score, s.path.display(), s.width, s.height);
            }
        }

        let targets = classify::target_candidates(kind, root, &images);
        log!(kind.name; "{} target(s):", targets.len());
        for t in &targets {
            log!(kind.name; "  {} ({}x{})", t.path.display(), t.width, t.height);
        }
    }
    Ok(())
}

/// Output directory name to prune from scanning.
fn out_dir_name(out_dir: &Path) -> &str {
    out_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(scan::OUT_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{ICON, SPLASH};
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(root: &Path, rel: &str, width: u32, height: u32) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(width, height, Rgba([180, 60, 20, 255]))
            .save(&path)
            .unwrap();
    }

    fn options(root: &Path) -> Options {
        Options {
            root: root.to_path_buf(),
            out_dir: root.join(scan::OUT_DIR),
            corner_radius_percent: 0.0,
            kinds: vec![&ICON, &SPLASH],
        }
    }

    #[test]
    fn end_to_end_icon_generation() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "art/icon-master.png", 1536, 1536);
        write_png(dir.path(), "resources/icon-120.png", 120, 96);
        write_png(dir.path(), "resources/icon-180.png", 180, 144);

        let opts = options(dir.path());
        generate(&opts).unwrap();

        let out_120 = opts.out_dir.join("resources/icon-120.png");
        let out_180 = opts.out_dir.join("resources/icon-180.png");
        assert_eq!(image::image_dimensions(&out_120).unwrap(), (120, 96));
        assert_eq!(image::image_dimensions(&out_180).unwrap(), (180, 144));
        // flattened outputs carry no alpha channel
        assert_eq!(
            image::open(&out_120).unwrap().color(),
            image::ColorType::Rgb8
        );

        let marker = fs::read_to_string(opts.out_dir.join(IGNORE_MARKER)).unwrap();
        assert_eq!(marker, "*\n");
    }

    #[test]
    fn kind_without_candidates_skips_but_other_kind_proceeds() {
        let dir = TempDir::new().unwrap();
        // splash qualifies, icon has no square source anywhere
        write_png(dir.path(), "art/splash-master.png", 2048, 2048);
        write_png(dir.path(), "res/splash_480.png", 480, 800);
        // this wide image is never a source candidate
        write_png(dir.path(), "banner/icon-99.png", 64, 32);

        let opts = options(dir.path());
        generate(&opts).unwrap();

        assert!(opts.out_dir.join("res/splash_480.png").exists());
        // icon-99 matched the icon *target* pattern but icon had no source,
        // so nothing was rendered for it
        assert!(!opts.out_dir.join("banner/icon-99.png").exists());
    }

    #[test]
    fn no_candidates_at_all_creates_no_output_dir() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "photos/holiday.png", 800, 600);

        let opts = options(dir.path());
        generate(&opts).unwrap();
        assert!(!opts.out_dir.exists());
    }

    #[test]
    fn rerun_is_idempotent_and_keeps_existing_marker() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "resources/icon-source.png", 1024, 1024);
        write_png(dir.path(), "resources/icon-57.png", 57, 57);

        let opts = options(dir.path());
        generate(&opts).unwrap();
        let out = opts.out_dir.join("resources/icon-57.png");
        let first = fs::read(&out).unwrap();

        // a hand-edited marker survives subsequent runs
        fs::write(opts.out_dir.join(IGNORE_MARKER), "custom\n").unwrap();

        generate(&opts).unwrap();
        assert_eq!(fs::read(&out).unwrap(), first);
        assert_eq!(
            fs::read_to_string(opts.out_dir.join(IGNORE_MARKER)).unwrap(),
            "custom\n"
        );
    }

    #[test]
    fn one_bad_target_does_not_abort_the_batch() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "icon-big.png", 1024, 1024);
        write_png(dir.path(), "res/icon-40.png", 40, 40);
        write_png(dir.path(), "res/icon-80.png", 80, 80);
        // make one mirrored output path unwritable by occupying it with a dir
        let opts = options(dir.path());
        fs::create_dir_all(opts.out_dir.join("res/icon-40.png")).unwrap();

        generate(&opts).unwrap();
        assert!(opts.out_dir.join("res/icon-80.png").is_file());
    }

    #[test]
    fn ensure_output_root_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        ensure_output_root(&out).unwrap();
        ensure_output_root(&out).unwrap();
        assert_eq!(
            fs::read_to_string(out.join(IGNORE_MARKER)).unwrap(),
            "*\n"
        );
    }
}
