// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: derive columns, girders and beams for a building
//!
//! Reads `Bays.json`, `Levels.json` and `Grids.json` (each optional) from a
//! model directory and writes the framing members as JSON.
//!
//! Usage:
//!   structure-by-envelope <model_dir> [options]

use std::env;
use std::path::PathBuf;
use std::process;

use bayframe_structure::{execute, InputModels, MemberKind, StructureInputs};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let model_dir = PathBuf::from(&args[1]);

    // Parse options
    let mut inputs_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut overrides: Vec<(String, String)> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--inputs" | "--output" | "--beam-spacing" | "--slab-thickness" | "--column-type"
            | "--girder-type" | "--beam-type" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Missing value for {}", args[i]);
                    process::exit(1);
                };
                match args[i].as_str() {
                    "--inputs" => inputs_path = Some(PathBuf::from(value)),
                    "--output" => output_path = Some(PathBuf::from(value)),
                    flag => overrides.push((flag.to_string(), value.clone())),
                }
                i += 1;
            }
            "--no-external-columns" => overrides.push((args[i].clone(), String::new())),
            "--first-level-beams" => overrides.push((args[i].clone(), String::new())),
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut inputs = match inputs_path {
        Some(path) => StructureInputs::from_json_file(&path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => StructureInputs::default(),
    };
    for (flag, value) in overrides {
        apply_override(&mut inputs, &flag, &value);
    }

    let models = InputModels::load_dir(&model_dir).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let outputs = execute(models, &inputs).unwrap_or_else(|e| {
        if e.is_configuration() {
            eprintln!("Configuration error: {}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    });

    match output_path {
        Some(path) => {
            if let Err(e) = outputs.write_json_file(&path) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            tracing::info!(
                path = %path.display(),
                columns = outputs.count(MemberKind::Column),
                girders = outputs.count(MemberKind::Girder),
                beams = outputs.count(MemberKind::Beam),
                "wrote structure"
            );
        }
        None => match outputs.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
    }
}

fn apply_override(inputs: &mut StructureInputs, flag: &str, value: &str) {
    let number = |v: &str| -> f64 {
        v.parse().unwrap_or_else(|_| {
            eprintln!("Invalid value for {}: {}", flag, v);
            process::exit(1);
        })
    };
    match flag {
        "--beam-spacing" => inputs.beam_spacing = number(value),
        "--slab-thickness" => inputs.slab_thickness = number(value),
        "--column-type" => inputs.column_type = value.to_string(),
        "--girder-type" => inputs.girder_type = value.to_string(),
        "--beam-type" => inputs.beam_type = value.to_string(),
        "--no-external-columns" => inputs.insert_columns_at_external_edges = false,
        "--first-level-beams" => inputs.create_beams_on_first_level = true,
        _ => {}
    }
}

fn print_usage() {
    eprintln!("Usage: structure-by-envelope <model_dir> [options]");
    eprintln!();
    eprintln!("Reads Bays.json, Levels.json and Grids.json from <model_dir>.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --inputs <path>          JSON file with structure inputs");
    eprintln!("  --output <path>          Write members here instead of stdout");
    eprintln!("  --beam-spacing <m>       Infill beam spacing (default: 1.5)");
    eprintln!("  --slab-thickness <m>     Slab thickness (default: 0.15)");
    eprintln!("  --column-type <name>     Column profile (default: W10x100)");
    eprintln!("  --girder-type <name>     Girder profile (default: W16x31)");
    eprintln!("  --beam-type <name>       Beam profile (default: W16x31)");
    eprintln!("  --no-external-columns    Skip columns on the building boundary");
    eprintln!("  --first-level-beams      Frame the lowest tier too");
    eprintln!();
    eprintln!("The log level is read from RUST_LOG (default: info).");
}
