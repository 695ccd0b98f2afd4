//! certstat - statistics over certificate-chain validator results
//!
//! Every subcommand is an independent report over precomputed datasets.

use anyhow::Result;
use certstat::output::Printer;
use certstat::{logging, reports};
use certstat_common::{CertstatConfig, ColorMode};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

// Version is embedded at build time
const VERSION: &str = env!("CERTSTAT_VERSION");

#[derive(Parser)]
#[command(name = "certstat")]
#[command(about = "Error statistics for certificate chain validation results", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Config file (default: $CERTSTAT_CONFIG or ./certstat.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// When to color section headers
    #[arg(long, value_enum, global = true)]
    color: Option<ColorArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorMode::Auto,
            ColorArg::Always => ColorMode::Always,
            ColorArg::Never => ColorMode::Never,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Outcomes of chains with an intermediate missing the CA flag
    LeavesInChains {
        /// Chain dataset (JSON Lines)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Result dataset for the chain dataset (JSON Lines)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Intermediate index CSV (id,index)
        #[arg(long)]
        ids: Option<PathBuf>,
    },

    /// Leaf certificate index chosen by the old and new methods
    LeavesChosen {
        #[arg(long)]
        old: Option<PathBuf>,

        #[arg(long)]
        new: Option<PathBuf>,
    },

    /// Error categories of the old and new methods on an id subset
    Errors {
        /// CSV with an `id` column
        #[arg(long)]
        ids: Option<PathBuf>,

        #[arg(long)]
        old: Option<PathBuf>,

        #[arg(long)]
        new: Option<PathBuf>,
    },

    /// Cross-check valid chains against valid leaf indices
    ValidLeaves {
        /// CSV with an `id` column
        #[arg(long)]
        ids: Option<PathBuf>,

        #[arg(long)]
        new: Option<PathBuf>,
    },

    /// Write the intermediate index CSV from the validator's JSON log
    ExtractIds {
        /// Validator JSON log
        #[arg(long)]
        log: Option<PathBuf>,

        /// CSV to write (default: the configured intermediate index)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Classify root store error strings, in root store order
    Classify {
        /// Error strings; pass "" for a store that accepted the chain
        errors: Vec<String>,
    },

    /// Run every dataset report with the configured paths
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = CertstatConfig::load(cli.config.as_deref())?;
    debug!(?config, "Configuration loaded");

    let color = cli.color.map(ColorMode::from).unwrap_or(config.report.color);
    let mut out = Printer::stdout(color);
    let ds = &config.datasets;

    match cli.command {
        Commands::LeavesInChains { input, output, ids } => {
            reports::leaves_in_chains::run(
                &input.unwrap_or_else(|| ds.input_path()),
                &output.unwrap_or_else(|| ds.output_path()),
                &ids.unwrap_or_else(|| ds.intermediate_ids_path()),
                &mut out,
            )?;
        }
        Commands::LeavesChosen { old, new } => {
            reports::leaves_chosen::run(
                &old.unwrap_or_else(|| ds.old_output_path()),
                &new.unwrap_or_else(|| ds.new_output_path()),
                &mut out,
            )?;
        }
        Commands::Errors { ids, old, new } => {
            reports::errors::run(
                &ids.unwrap_or_else(|| ds.ldap_ids_path()),
                &old.unwrap_or_else(|| ds.old_output_path()),
                &new.unwrap_or_else(|| ds.new_output_path()),
                &mut out,
            )?;
        }
        Commands::ValidLeaves { ids, new } => {
            reports::valid_leaves::run(
                &ids.unwrap_or_else(|| ds.ldap_ids_path()),
                &new.unwrap_or_else(|| ds.new_output_path()),
                &mut out,
            )?;
        }
        Commands::ExtractIds { log, out: csv } => {
            reports::extract_ids::run(
                &log.unwrap_or_else(|| ds.validator_log_path()),
                &csv.unwrap_or_else(|| ds.intermediate_ids_path()),
                &mut out,
            )?;
        }
        Commands::Classify { errors } => {
            reports::classify::run(&errors, &mut out)?;
        }
        Commands::All => reports::run_all(ds, &mut out)?,
    }

    Ok(())
}
