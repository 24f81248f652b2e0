//! Aquarium analyzer service
//!
//! Reads one JSON analysis request per stdin line and writes every
//! publication as a JSON line on stdout for a bus bridge to forward.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use aquarium_analyzer::publish::JsonLinesPublisher;
use aquarium_analyzer::{AnalyzerConfig, AquariumAnalyzer, TestKit};
use clap::Parser;
use log::{info, warn};

#[derive(Parser)]
#[command(name = "aquarium_analyzer")]
#[command(about = "Aquarium photo analysis service")]
struct Cli {
    /// Kit calibration JSON file
    #[arg(long, env = "ANALYZER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory relative image paths are resolved against
    #[arg(long, env = "PHOTO_PATH")]
    photo_root: Option<PathBuf>,

    /// Processor identifier reported with water-test results
    #[arg(long, env = "ANALYZER_PROCESSOR")]
    processor: Option<String>,
}

fn load_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = match &cli.config {
        Some(path) if path.is_file() => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        Some(path) => {
            warn!(
                "Config {} not found, using built-in calibration",
                path.display()
            );
            AnalyzerConfig::default_calibration()
        }
        None => AnalyzerConfig::default_calibration(),
    };

    if let Some(photo_root) = &cli.photo_root {
        config.photo_root = photo_root.clone();
    }
    if let Some(processor) = &cli.processor {
        config.processor = processor.clone();
    }
    Ok(config)
}

/// Info by default; `RUST_LOG` directives override
fn logger(filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    builder
}

fn main() -> Result<()> {
    logger(std::env::var("RUST_LOG").ok().as_deref()).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    info!("Aquarium analyzer starting");
    info!("Photo root: {}", config.photo_root.display());
    info!("Processor: {}", config.processor);
    for kit in TestKit::ALL {
        let covered = config.kit(kit).covered_parameters();
        info!("{}: {} calibrated parameters", kit.label(), covered.len());
    }

    let stdout = io::stdout();
    let mut analyzer = AquariumAnalyzer::new(config, JsonLinesPublisher::new(stdout.lock()));
    analyzer.start();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read request")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Failures are logged inside and never end the loop
        let _ = analyzer.handle_message(line);
    }

    info!("Input closed, shutting down");
    Ok(())
}
