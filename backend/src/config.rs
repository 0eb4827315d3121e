use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::domain::models::vocabulary::Vocabulary;

#[derive(Parser, Debug, Default)]
#[command(name = "expense-ledger", about = "Expense and funding ledger served over HTTP")]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long, default_value = "ledger.toml")]
    pub config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding the yearly CSV files (overrides config file)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Log level (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub vocabulary: VocabularyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Defaults to the user's downloads folder. A leading `~` is expanded.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct VocabularyConfig {
    /// Reject submitted categories and payment methods outside `lists`
    #[serde(default)]
    pub enforce: bool,

    /// `expense_categories`, `funding_categories` and `payment_methods`
    #[serde(flatten)]
    pub lists: Vocabulary,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load the config file named on the command line, then apply CLI overrides.
    /// A missing file means defaults; an unreadable or invalid one is an error.
    pub fn load(cli: &CliArgs) -> Result<Self> {
        let path = Path::new(&cli.config);
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            AppConfig::default()
        };

        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(ref data_dir) = cli.data_dir {
            config.storage.data_dir = Some(data_dir.clone());
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse::<SocketAddr>()
            .with_context(|| {
                format!("Invalid listen address {}:{}", self.server.host, self.server.port)
            })
    }

    /// Configured data directory with `~` expanded, or `None` for the default
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage.data_dir.as_deref().map(expand_home)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
