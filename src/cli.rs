use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use contrast_audit::TargetLevel;

#[derive(Debug, Parser)]
#[command(name = "contrast-audit", version, about = "WCAG color-contrast audits for rendered pages")]
pub struct Args {
    /// JSON audit configuration.
    #[arg(long, global = true, env = "CONTRAST_AUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Level to gate against; overrides the config file.
    #[arg(long, global = true, value_enum)]
    pub target: Option<TargetChoice>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Audit renderer dumps (element descriptors as JSON).
    Audit {
        #[arg(required = true)]
        snapshots: Vec<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Drop elements whose bounding box has no area.
        #[arg(long, default_value_t = false)]
        skip_zero_area: bool,
        /// Ask the advisory service to explain each violation (text format).
        #[arg(long, default_value_t = false)]
        explain: bool,
    },
    /// Render a worker's serialized audit result as a violation report.
    Report {
        /// Path to the result JSON, or `-` for stdin.
        input: PathBuf,
        #[arg(long, default_value_t = false)]
        explain: bool,
    },
    /// Contrast ratio and level for one color pair.
    Check {
        foreground: String,
        background: String,
        #[arg(long, default_value = "16px")]
        font_size: String,
    },
    /// Darkest gray reaching a ratio on a background.
    Suggest {
        background: String,
        #[arg(long, default_value_t = 4.5)]
        ratio: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetChoice {
    Aa,
    Aaa,
}

impl From<TargetChoice> for TargetLevel {
    fn from(value: TargetChoice) -> Self {
        match value {
            TargetChoice::Aa => TargetLevel::Aa,
            TargetChoice::Aaa => TargetLevel::Aaa,
        }
    }
}
