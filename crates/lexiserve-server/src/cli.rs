//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lexiserve-server")]
#[command(about = "Lexiserve text inference service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "lexiserve.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "PORT")]
    pub port: Option<u16>,

    /// Model directory
    #[arg(short, long, env = "LEXISERVE_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Model name
    #[arg(short = 'n', long, env = "LEXISERVE_MODEL_NAME")]
    pub model_name: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
