//! Settings resolution.
//!
//! Priority order, highest first:
//! 1. Command-line flag
//! 2. Environment variable (handled by clap's `env` attribute)
//! 3. TOML config file (`--config`, or `<config_dir>/lift-tracker/config.toml`)
//! 4. Built-in default

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_SERVER_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_LOG_FILTER: &str = "lift_tracker=info";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_WIDTH: f32 = 520.0;
const DEFAULT_HEIGHT: f32 = 760.0;

/// Which API base the client uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Same origin as the server: the API base is empty.
    #[default]
    Production,
    /// Explicit `api_base_url`, typically a backend on localhost.
    Development,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            other => Err(ConfigError::Environment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => f.write_str("production"),
            Environment::Development => f.write_str("development"),
        }
    }
}

/// Command-line arguments for lift-tracker
#[derive(Parser, Debug, Default)]
#[command(name = "lift-tracker")]
#[command(about = "Desktop client for a 5/3/1 training tracker")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "LIFT_TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// "production" (same-origin API) or "development" (explicit API base)
    #[arg(short, long, env = "LIFT_TRACKER_ENV")]
    pub environment: Option<String>,

    /// Server the client talks to
    #[arg(short, long, env = "LIFT_TRACKER_SERVER")]
    pub server: Option<String>,

    /// API base used in development
    #[arg(long, env = "LIFT_TRACKER_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Rewrite requests starting with this prefix...
    #[arg(long, env = "LIFT_TRACKER_REWRITE_FROM", requires = "rewrite_to")]
    pub rewrite_from: Option<String>,

    /// ...to this prefix
    #[arg(long, env = "LIFT_TRACKER_REWRITE_TO", requires = "rewrite_from")]
    pub rewrite_to: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "LIFT_TRACKER_TIMEOUT")]
    pub timeout: Option<u64>,

    /// tracing filter, used when RUST_LOG is unset
    #[arg(long, env = "LIFT_TRACKER_LOG")]
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    environment: Option<String>,
    server_origin: Option<String>,
    api_base_url: Option<String>,
    rewrite: Option<Rewrite>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
}

/// Prefix rule applied to outgoing request URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rewrite {
    pub from: String,
    pub to: String,
}

impl Rewrite {
    /// `from/...` becomes `to/...`; anything else passes through.
    pub fn apply(&self, url: &str) -> Option<String> {
        let from = self.from.trim_end_matches('/');
        let to = self.to.trim_end_matches('/');
        url.strip_prefix(from)
            .filter(|rest| rest.starts_with('/'))
            .map(|rest| format!("{to}{rest}"))
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server_origin: Url,
    pub api_base_url: String,
    pub rewrite: Option<Rewrite>,
    pub request_timeout: Duration,
    pub log_filter: String,
    pub window_size: [f32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server_origin: Url::parse(DEFAULT_SERVER_ORIGIN).expect("default origin is a valid URL"),
            api_base_url: DEFAULT_SERVER_ORIGIN.to_string(),
            rewrite: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            window_size: [DEFAULT_WIDTH, DEFAULT_HEIGHT],
        }
    }
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match cli.config.clone().or_else(default_config_path) {
            Some(path) => load_file(&path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    fn merge(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let environment = match cli.environment.as_deref().or(file.environment.as_deref()) {
            Some(env) => env.parse()?,
            None => defaults.environment,
        };

        let server_origin = match cli.server.as_deref().or(file.server_origin.as_deref()) {
            Some(origin) => Url::parse(origin).map_err(|_| ConfigError::Url {
                field: "server_origin",
                value: origin.to_string(),
            })?,
            None => defaults.server_origin,
        };

        let api_base_url = match cli.api_base_url.clone().or(file.api_base_url) {
            Some(base) => {
                Url::parse(&base).map_err(|_| ConfigError::Url {
                    field: "api_base_url",
                    value: base.clone(),
                })?;
                base.trim_end_matches('/').to_string()
            }
            None => defaults.api_base_url,
        };

        let rewrite = match (&cli.rewrite_from, &cli.rewrite_to) {
            (Some(from), Some(to)) => Some(Rewrite {
                from: from.clone(),
                to: to.clone(),
            }),
            _ => file.rewrite,
        };

        let request_timeout = cli
            .timeout
            .or(file.request_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let log_filter = cli
            .log_filter
            .clone()
            .or(file.log_filter)
            .unwrap_or(defaults.log_filter);

        let window_size = [
            file.width.unwrap_or(defaults.window_size[0]),
            file.height.unwrap_or(defaults.window_size[1]),
        ];

        Ok(Self {
            environment,
            server_origin,
            api_base_url,
            rewrite,
            request_timeout,
            log_filter,
            window_size,
        })
    }

    /// The prefix put in front of every API path.
    pub fn api_base(&self) -> &str {
        match self.environment {
            Environment::Production => "",
            Environment::Development => &self.api_base_url,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("lift-tracker").join("config.toml");
    path.exists().then_some(path)
}

fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
