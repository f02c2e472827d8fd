//! CLI configuration

use std::path::PathBuf;

use clap::Args;

/// Settings shared by every subcommand, read from flags or the environment.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Directory holding the persisted cart and wishlist slots
    #[arg(long, env = "LOOPCART_DATA_DIR", default_value = ".loopcart")]
    pub data_dir: PathBuf,

    /// Catalog file (`.json` API payload or `.yml`); sample products when unset or unreadable
    #[arg(long, env = "LOOPCART_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOOPCART_LOG", default_value = "warn")]
    pub log_level: String,
}
