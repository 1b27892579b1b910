mod cli;

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat, RankArgs};
use cropfit::catalog::load_catalog;
use cropfit::config::Config;
use cropfit::logic::enrichment::{enrich_crop, missing_ranges};
use cropfit::logic::jitter::{apply_seeded_jitter, DEFAULT_AMPLITUDE};
use cropfit::logic::{ReferenceTables, SuitabilityEngine};
use cropfit::models::{
    filter_tolerant, Crop, CropRecommendation, EnvironmentalInputs, Month, SoilType,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { force } => init(cli.config, force),
        Commands::Rank(args) => {
            let config = load_config(cli.config.as_deref())?;
            rank(config, args)
        }
        Commands::Check { catalog } => {
            let config = load_config(cli.config.as_deref())?;
            check(&config, catalog)
        }
        Commands::Dimensions => {
            let config = load_config(cli.config.as_deref())?;
            dimensions(&config)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path).context("Failed to load configuration")
}

fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(p) => p,
        None => Config::default_config_path()?,
    };
    Config::starter()?.write(&path, force)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

fn rank(mut config: Config, args: RankArgs) -> Result<()> {
    if let Some(variant) = args.variant {
        config.variant = variant;
        config.scoring = None;
        config.reference = None;
    }
    let engine = config.build_engine().context("Invalid scoring configuration")?;

    let inputs = build_inputs(&args)?;
    let mut crops = resolve_catalog(args.catalog.as_deref(), &config, &engine)?;
    if args.only_tolerant {
        let total = crops.len();
        crops = filter_tolerant(&crops, &inputs);
        tracing::info!(kept = crops.len(), total, "Applied tolerance filter");
    }

    let mut ranked = engine.score_crops(&crops, &inputs)?;
    if let Some(seed) = args.jitter_seed {
        ranked = apply_seeded_jitter(ranked, seed, DEFAULT_AMPLITUDE, &engine.profile().tiers);
    }
    if let Some(top) = args.top {
        ranked.truncate(top);
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ranked)?),
        OutputFormat::Table => print_table(&inputs, &ranked),
    }
    Ok(())
}

fn build_inputs(args: &RankArgs) -> Result<EnvironmentalInputs> {
    let mut inputs = EnvironmentalInputs::new(args.ph, args.temperature, args.rainfall);

    if let Some(soil) = args.soil.as_deref().filter(|s| !s.trim().is_empty()) {
        match SoilType::from_str(soil) {
            Some(soil) => inputs = inputs.with_soil(soil),
            None => bail!(
                "Unknown soil type '{}'. Expected one of: clay, sandy, loam, rocky, organic",
                soil
            ),
        }
    }

    let month = match args.month.as_deref().filter(|m| !m.trim().is_empty()) {
        Some(m) => match Month::from_str(m) {
            Some(month) => Some(month),
            None => bail!("Unknown month '{}'", m),
        },
        None => Month::from_number(chrono::Local::now().month()),
    };
    if let Some(month) = month {
        inputs = inputs.with_season(month);
    }

    if let Some(previous) = &args.previous {
        inputs = inputs.with_previous_crop(previous.clone());
    }

    inputs.validate()?;
    Ok(inputs)
}

fn resolve_catalog(
    cli_path: Option<&Path>,
    config: &Config,
    engine: &SuitabilityEngine,
) -> Result<Vec<Crop>> {
    if let Some(path) = cli_path.or(config.catalog.as_deref()) {
        return load_catalog(path).with_context(|| format!("Failed to load catalog {:?}", path));
    }

    let builtin = engine.reference().default_catalog();
    if builtin.is_empty() {
        // Legacy tables carry no reference crops.
        return Ok(ReferenceTables::builtin().default_catalog());
    }
    Ok(builtin)
}

fn print_table(inputs: &EnvironmentalInputs, ranked: &[CropRecommendation]) {
    println!(
        "Conditions: pH {:.1} | {:.1}°C | {:.0} mm | soil {} | month {} | previous {}",
        inputs.ph,
        inputs.temperature,
        inputs.rainfall,
        inputs.soil_type.map_or("-", |s| s.as_str()),
        inputs.current_season.map_or("-", |m| m.as_str()),
        inputs.previous_crop().unwrap_or("-"),
    );
    println!();

    if ranked.is_empty() {
        println!("No crops to rank.");
        return;
    }

    println!(
        "{:>3}  {:<20} {:>6}  {:<11} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}  {}",
        "#", "Crop", "Score", "Tier", "pH", "Temp", "Rain", "Soil", "Season", "Rot.", "Weakest"
    );
    for (i, rec) in ranked.iter().enumerate() {
        let b = &rec.score_breakdown;
        let (weakest, _) = b.weakest();
        println!(
            "{:>3}  {:<20} {:>6.2}  {} {:<9} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1}  {}",
            i + 1,
            truncate(rec.crop.label(), 20),
            rec.suitability_score,
            rec.suitability_level.symbol(),
            rec.suitability_level.as_str(),
            b.ph,
            b.temperature,
            b.rainfall,
            b.soil_type,
            b.season,
            b.rotation,
            weakest,
        );
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

fn check(config: &Config, catalog: Option<PathBuf>) -> Result<()> {
    let engine = config.build_engine().context("Invalid scoring configuration")?;
    println!(
        "Config: OK (variant {}, tiers {}/{})",
        config.variant,
        engine.profile().tiers.excellent,
        engine.profile().tiers.good
    );

    let Some(path) = catalog.or_else(|| config.catalog.clone()) else {
        println!("Catalog: none given, built-in reference crops will be used");
        return Ok(());
    };

    let crops = load_catalog(&path).with_context(|| format!("Failed to load catalog {:?}", path))?;
    let mut errors = 0;
    for (index, crop) in crops.iter().enumerate() {
        if let Err(e) = crop.validate() {
            errors += 1;
            println!("  catalog[{}]: {}", index, e);
            continue;
        }
        let missing = missing_ranges(&enrich_crop(crop, engine.reference()));
        if !missing.is_empty() {
            println!(
                "  catalog[{}] '{}': no {} data, neutral scores will be used",
                index,
                crop.name,
                missing.join("/")
            );
        }
    }

    if errors > 0 {
        bail!("{} of {} crops in {:?} are invalid", errors, crops.len(), path);
    }
    println!("Catalog: OK ({} crops)", crops.len());
    Ok(())
}

fn dimensions(config: &Config) -> Result<()> {
    let engine = config.build_engine().context("Invalid scoring configuration")?;
    println!("{:<12} {:<16} {:>6}", "ID", "Dimension", "Weight");
    for (id, name, weight) in engine.dimensions() {
        println!("{:<12} {:<16} {:>5.0}%", id, name, weight * 100.0);
    }
    Ok(())
}
