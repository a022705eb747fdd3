//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::scan::OUT_DIR;

/// resourcegen CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate icon and splash assets from the best source image
    #[command(visible_alias = "g")]
    Generate {
        /// Project root to scan
        #[arg(value_hint = clap::ValueHint::DirPath, default_value = ".")]
        root: PathBuf,

        /// Output directory (relative paths resolve under the project root)
        #[arg(short, long, default_value = OUT_DIR, value_hint = clap::ValueHint::DirPath)]
        out: PathBuf,

        /// Corner radius percent; 0 flattens output to opaque instead
        #[arg(short, long, default_value_t = 0.0)]
        radius: f32,

        /// Restrict to one asset kind (icon, splash)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// List ranked source candidates and targets without writing anything
    #[command(visible_alias = "s")]
    Scan {
        /// Project root to scan
        #[arg(value_hint = clap::ValueHint::DirPath, default_value = ".")]
        root: PathBuf,

        /// Restrict to one asset kind (icon, splash)
        #[arg(short, long)]
        kind: Option<String>,
    },
}
