//! resourcegen - regenerate app icon and splash screen assets from the best
//! source image in a project tree.

#![allow(dead_code)]

mod classify;
mod cli;
mod error;
mod kind;
mod logger;
mod meta;
mod pipeline;
mod render;
mod scan;

use anyhow::{Result, bail};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use pipeline::Options;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match cli.command {
        Commands::Generate {
            root,
            out,
            radius,
            kind,
        } => {
            if !(0.0..=100.0).contains(&radius) {
                bail!("--radius must be between 0 and 100, got {radius}");
            }
            let out_dir = if out.is_absolute() {
                out
            } else {
                root.join(&out)
            };
            let opts = Options {
                root,
                out_dir,
                corner_radius_percent: radius,
                kinds: resolve_kinds(kind.as_deref())?,
            };
            pipeline::generate(&opts)
        }
        Commands::Scan { root, kind } => pipeline::report(&root, &resolve_kinds(kind.as_deref())?),
    }
}

/// Resolve the `--kind` filter to the kinds to process.
fn resolve_kinds(name: Option<&str>) -> Result<Vec<&'static kind::AssetKind>> {
    match name {
        None => Ok(kind::all().to_vec()),
        Some(n) => match kind::by_name(n) {
            Some(k) => Ok(vec![k]),
            None => bail!("unknown asset kind `{n}` (expected one of: icon, splash)"),
        },
    }
}
