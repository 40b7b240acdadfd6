//! Command-line arguments (each also readable from the environment).

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "mockex", version, about = "Synthetic Prometheus metrics exporter")]
pub struct Args {
    /// Path to the YAML config.
    #[arg(short, long, env = "MOCKEX_CONFIG", default_value = "config.yml")]
    pub config: PathBuf,

    /// Listen address; overrides `exporter.listen` from the config.
    #[arg(short, long, env = "MOCKEX_LISTEN")]
    pub listen: Option<String>,
}
