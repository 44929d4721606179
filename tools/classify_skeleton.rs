// Copyright 2025 Neurite Developers
// SPDX-License-Identifier: Apache-2.0

/*!
Skeleton Classification Tool

Classifies one neuron, or an array of neurons, from a JSON file and prints a
per-neuron summary. Optionally writes the full results as JSON.

Usage:
  cargo run --bin classify_skeleton -- <neurons.json> [results.json] [options]

Options:
  --config=<path>                      Use this neurite_configuration.toml
  --flow_mode=<centrifugal|centripetal|average>   (alias --mode)
  --polypre=<true|false>
  --primary_dendrite_threshold=<0..1|none>
  --batch_workers=<n>
  --log_level=<level>  --log_format=<text|json>
  --debug-<crate> / --debug-all         Per-crate debug logging

Unknown options and values that cannot be parsed are rejected.
*/

use anyhow::{bail, Context, Result};
use neurite::compartments::{classify_batch, BatchReport, NeuronInput};
use neurite::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config,
    validate_config, ConfigError, NeuriteConfig,
};
use neurite::observability::{debug_flags_help, init_logging, parse_debug_flags};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A single neuron or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum InputFile {
    Many(Vec<NeuronInput>),
    One(NeuronInput),
}

impl InputFile {
    fn into_neurons(self) -> Vec<NeuronInput> {
        match self {
            InputFile::Many(neurons) => neurons,
            InputFile::One(neuron) => vec![neuron],
        }
    }
}

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut overrides = HashMap::new();

    for arg in args.iter().skip(1) {
        if arg.starts_with("--debug-") {
            continue;
        }
        if let Some(option) = arg.strip_prefix("--") {
            let Some((key, value)) = option.split_once('=') else {
                bail!("Expected --key=value, got '{}'", arg);
            };
            if key == "config" {
                config = Some(PathBuf::from(value));
            } else {
                overrides.insert(key.to_string(), value.to_string());
            }
        } else {
            positional.push(PathBuf::from(arg));
        }
    }

    let mut positional = positional.into_iter();
    let Some(input) = positional.next() else {
        bail!("Missing input file");
    };
    let output = positional.next();
    if positional.next().is_some() {
        bail!("Too many positional arguments");
    }

    Ok(Args {
        input,
        output,
        config,
        overrides,
    })
}

/// Load the config file if one exists, falling back to defaults
fn resolve_config(args: &Args) -> Result<NeuriteConfig> {
    let config = match &args.config {
        Some(path) => load_config(Some(path.as_path()), Some(&args.overrides))?,
        None => match find_config_file() {
            Ok(path) => load_config(Some(path.as_path()), Some(&args.overrides))?,
            Err(ConfigError::FileNotFound(_)) => {
                let mut config = NeuriteConfig::default();
                apply_environment_overrides(&mut config)?;
                apply_cli_overrides(&mut config, &args.overrides)?;
                config
            }
            Err(e) => return Err(e.into()),
        },
    };
    validate_config(&config)?;
    Ok(config)
}

fn load_neurons(path: &Path) -> Result<Vec<NeuronInput>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file '{}'", path.display()))?;
    let parsed: InputFile = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not a neuron or list of neurons", path.display()))?;
    Ok(parsed.into_neurons())
}

fn print_summary(report: &BatchReport) {
    println!("Neurite Compartment Classification");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for result in &report.results {
        println!(
            "{:<16} {:<18} index {:.3}  AIS {}  max flow {}",
            result.skeleton_id.as_deref().unwrap_or("-"),
            result.neuron_type,
            result.segregation_index(),
            result.axon_initiation_site,
            result.max_flow_centrality,
        );
        for totals in &result.compartments {
            if totals.nodes > 0 {
                println!(
                    "    {:<17} {:>6} nodes {:>6} in {:>6} out",
                    totals.label.as_str(),
                    totals.nodes,
                    totals.post,
                    totals.pre
                );
            }
        }
        for warning in &result.warnings {
            println!("    warning: {}", warning);
        }
    }
    for failure in &report.failures {
        println!(
            "{:<16} FAILED: {}",
            failure.skeleton_id.as_deref().unwrap_or("-"),
            failure.error
        );
    }
    println!();
    println!(
        "{} classified, {} failed, {} total",
        report.succeeded(),
        report.failed(),
        report.total()
    );
}

fn main() -> Result<()> {
    let argv: Vec<String> = env::args().collect();
    if argv.iter().any(|a| a == "--help" || a == "-h") {
        println!("Usage: {} <neurons.json> [results.json] [--key=value ...]", argv[0]);
        println!();
        println!("{}", debug_flags_help());
        return Ok(());
    }

    let args = parse_args(&argv)?;
    let config = resolve_config(&args)?;

    let debug_flags = parse_debug_flags();
    let logging = init_logging(&debug_flags, &neurite::logging_options(&config.logging))?;

    let options = neurite::classifier_options(&config)?;
    info!(
        "Classifying with mode={} polypre={} primary_dendrite_threshold={:?}",
        options.mode, options.polypre, options.primary_dendrite_threshold
    );

    let neurons = load_neurons(&args.input)?;
    if neurons.is_empty() {
        warn!("Input file '{}' contains no neurons", args.input.display());
    }

    let report = classify_batch(&neurons, &options, config.batch.workers)?;
    print_summary(&report);

    if let Some(output) = &args.output {
        let json = serde_json::to_string_pretty(&report.results)?;
        fs::write(output, json)
            .with_context(|| format!("Failed to write results to '{}'", output.display()))?;
        info!("Wrote {} results to {}", report.succeeded(), output.display());
    }

    if report.failed() > 0 {
        // Flush file writers before exiting
        drop(logging);
        std::process::exit(2);
    }
    Ok(())
}
