//! Command line interface definition

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// photofetch - check that sample photos download within a timeout
#[derive(Parser, Debug)]
#[command(name = "photofetch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check that photos download within a timeout")]
#[command(long_about = None)]
pub struct Cli {
    /// URLs to check (defaults to the configured cases, or the sample photos)
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Seconds to wait for each download
    #[arg(long, short, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Network retries per request
    #[arg(long, value_name = "COUNT")]
    pub retries: Option<u32>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to a file
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Use alternate config file
    #[arg(long, value_name = "PATH", env = "PHOTOFETCH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}
