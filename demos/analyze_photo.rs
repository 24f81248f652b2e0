//! Read a single water-test photo
//!
//! Prints the readings as JSON on stdout and a summary on stderr.

use aquarium_analyzer::image_loader::is_supported_extension;
use aquarium_analyzer::publish::ParameterPayload;
use aquarium_analyzer::{analyze_water_test, AnalyzerConfig, WaterTestReport};
use chrono::Local;
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "analyze_photo")]
#[command(about = "Read an aquarium water-test photo")]
struct Args {
    /// Photo to read
    image_path: PathBuf,

    /// Kit calibration JSON (default: built-in calibration)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Kit hint: badge, api, strip, nt, tube (default: auto)
    #[arg(long)]
    kit: Option<String>,
}

fn main() {
    let args = Args::parse();
    let image_path = args.image_path.as_path();

    let supported = image_path
        .extension()
        .and_then(|e| e.to_str())
        .map(is_supported_extension)
        .unwrap_or(false);
    if !supported {
        eprintln!("Warning: '{}' has an unrecognized extension, trying anyway", image_path.display());
    }

    let config = match &args.config {
        Some(path) => match AnalyzerConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        },
        None => AnalyzerConfig::default_calibration(),
    };

    match analyze_water_test(image_path, args.kit.as_deref(), &config) {
        Ok(report) => print_report(&report),
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            if error.is_recoverable() {
                eprintln!("Suggestion: {}", error.user_message());
            }
            process::exit(1);
        }
    }
}

fn print_report(report: &WaterTestReport) {
    let timestamp = Local::now();
    let readings: BTreeMap<String, ParameterPayload> = report
        .readings
        .iter()
        .map(|(p, r)| (p.key().to_string(), ParameterPayload::new(*p, r, timestamp)))
        .collect();

    match serde_json::to_string_pretty(&readings) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing readings: {}", e),
    }

    eprintln!();
    eprintln!("Water Test Summary:");
    eprintln!("  Kit: {}", report.source_label());
    for (parameter, reading) in &report.readings {
        eprintln!(
            "  {:<8} {:>6} {:<3} color {} confidence {:.1}%",
            parameter.to_string(),
            reading.value,
            parameter.unit(),
            reading.color.to_hex(),
            reading.confidence
        );
    }
    for (parameter, error) in &report.failures {
        eprintln!("  {:<8} failed: {}", parameter.to_string(), error);
    }
    eprintln!("  Time: {:.3}s", report.processing_time.as_secs_f64());

    if let Some(mean) = report.mean_confidence() {
        if mean < 50.0 {
            eprintln!("  Warning: Low confidence result. Check the kit layout and lighting.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["analyze_photo", "--kit", "badge", "badge.png"]);
        assert_eq!(args.image_path, PathBuf::from("badge.png"));
        assert_eq!(args.kit.as_deref(), Some("badge"));
        assert!(args.config.is_none());

        assert!(Args::try_parse_from(["analyze_photo"]).is_err());
    }
}
