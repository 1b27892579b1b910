use clap::{Args, Parser, Subcommand, ValueEnum};
use cropfit::logic::Variant;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cropfit", version, about = "Rank crops by suitability for local conditions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score and rank a crop catalog
    Rank(RankArgs),
    /// Validate config, scoring profile and catalog
    Check {
        /// Crop catalog (.yaml, .yml or .json)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// List scoring dimensions and their weights
    Dimensions,
}

#[derive(Args)]
pub struct RankArgs {
    /// Soil pH (0-14)
    #[arg(long)]
    pub ph: f64,

    /// Ambient temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: f64,

    /// Annual rainfall in mm
    #[arg(long)]
    pub rainfall: f64,

    /// Soil type (clay, sandy, loam, rocky, organic)
    #[arg(long)]
    pub soil: Option<String>,

    /// Planting month (name, abbreviation or number); defaults to this month
    #[arg(long)]
    pub month: Option<String>,

    /// Crop grown on the plot last season
    #[arg(long)]
    pub previous: Option<String>,

    /// Crop catalog (.yaml, .yml or .json); defaults to the built-in reference crops
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Scoring constants to use, overriding the config
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Show only the best N crops
    #[arg(long)]
    pub top: Option<usize>,

    /// Drop crops whose known ranges exclude the measured conditions
    #[arg(long)]
    pub only_tolerant: bool,

    /// Shuffle near-equal scores with a seeded ±2 point perturbation
    #[arg(long)]
    pub jitter_seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
