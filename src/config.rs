//! Configuration for the `jpeg-exif` command line tool.
//!
//! Options come from command-line arguments via clap, with environment
//! variable fallbacks using the `EXIF_` prefix:
//!
//! - `EXIF_OUTPUT` - Output format, `text` or `json` (default: text)
//! - `EXIF_TAGS` - Comma-separated tag names to print (default: all)
//!
//! # Example
//!
//! ```ignore
//! use jpeg_exif::config::Config;
//!
//! let config = Config::parse();
//! println!("Reading {}", config.file.display());
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// =============================================================================
// Output Format
// =============================================================================

/// How the decoded dataset is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `Name: value` line per tag, sorted by name
    #[default]
    Text,
    /// A single JSON object
    Json,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// jpeg-exif - Print the Exif metadata embedded in a JPEG file.
#[derive(Parser, Debug, Clone)]
#[command(name = "jpeg-exif")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// JPEG file to read.
    pub file: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, env = "EXIF_OUTPUT")]
    pub output: OutputFormat,

    /// Only print these tags (repeatable or comma-separated).
    ///
    /// Fails if any of them is missing from the file.
    #[arg(short, long = "tag", env = "EXIF_TAGS", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.tags.iter().any(|t| t.trim().is_empty()) {
            return Err("Tag names must not be empty. Check --tag or EXIF_TAGS".to_string());
        }

        Ok(())
    }

    /// Whether output is restricted to selected tags.
    pub fn has_tag_filter(&self) -> bool {
        !self.tags.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
