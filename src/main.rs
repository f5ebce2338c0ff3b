//! jpeg-exif - Print the Exif metadata embedded in a JPEG file.
//!
//! This binary reads the file, decodes it and prints the result.

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jpeg_exif::{
    config::{Config, OutputFormat},
    decode, ExifDataset, ExifValue,
};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let buffer = match std::fs::read(&config.file) {
        Ok(buffer) => buffer,
        Err(e) => {
            error!("Failed to read {}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(file = %config.file.display(), size = buffer.len(), "read file");

    let dataset = match decode(&buffer) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("{}: {}", config.file.display(), e);
            return ExitCode::FAILURE;
        }
    };
    debug!(
        tags = dataset.len(),
        byte_order = ?dataset.byte_order(),
        "decoded Exif data"
    );

    let selected = if config.has_tag_filter() {
        match select(&dataset, &config.tags) {
            Ok(selected) => selected,
            Err(missing) => {
                error!("Tag(s) not found: {}", missing.join(", "));
                return ExitCode::FAILURE;
            }
        }
    } else {
        dataset.sorted()
    };

    match config.output {
        OutputFormat::Text => {
            for (name, value) in selected {
                println!("{}: {}", name, value);
            }
        }
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = selected
                .into_iter()
                .map(|(name, value)| (name.to_string(), to_json(value)))
                .collect();
            match serde_json::to_string_pretty(&map) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Failed to serialize output: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    ExitCode::SUCCESS
}

/// Pick the requested tags in the order given.
///
/// Returns the names that are missing when any requested tag is absent.
fn select<'a>(
    dataset: &'a ExifDataset,
    tags: &'a [String],
) -> Result<Vec<(&'a str, &'a ExifValue)>, Vec<&'a str>> {
    let missing: Vec<&str> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !dataset.contains(t))
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    Ok(tags
        .iter()
        .map(|t| t.trim())
        .filter_map(|t| dataset.get(t).map(|v| (t, v)))
        .collect())
}

fn to_json(value: &ExifValue) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so they never mix with the printed metadata.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "jpeg_exif=debug"
    } else {
        "jpeg_exif=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
