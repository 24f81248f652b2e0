//! Generate the built-in calibration as a configuration file
//!
//! Creates a JSON config that can be edited to match real kit photos

use aquarium_analyzer::{AnalyzerConfig, TestKit};
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} calibration/config.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = AnalyzerConfig::default_calibration();

    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!("  Photo root: {}", config.photo_root.display());
            eprintln!("  Processor:  {}", config.processor);
            for kit in TestKit::ALL {
                let covered = config.kit(kit).covered_parameters();
                let names: Vec<String> = covered.iter().map(|p| p.to_string()).collect();
                eprintln!("  {}: {}", kit.label(), names.join(", "));
            }
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
