//! Start-up configuration: command-line arguments layered over an optional
//! RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uploader_engine::ClientSettings;
use uploader_logging::{client_debug, client_info, LogDestination};
use url::Url;

const DEFAULT_CONFIG_FILENAME: &str = "uploader.ron";

#[derive(Debug, Clone, Parser)]
#[command(name = "uploader", about = "Upload files to a bucket and list its contents")]
pub struct Args {
    /// Endpoint used for both listing (GET) and uploading (POST).
    #[arg(long, env = "UPLOADER_API_URL")]
    pub endpoint: Option<String>,

    /// RON configuration file. Missing files are ignored.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Abort requests that take longer than this many seconds.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, value_enum, default_value_t = LogArg::File)]
    pub log: LogArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    Terminal,
    File,
    Both,
    Off,
}

impl From<LogArg> for LogDestination {
    fn from(arg: LogArg) -> Self {
        match arg {
            LogArg::Terminal => LogDestination::Terminal,
            LogArg::File => LogDestination::File,
            LogArg::Both => LogDestination::Both,
            LogArg::Off => LogDestination::Off,
        }
    }
}

/// Every field is optional; an absent timeout means none is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no endpoint configured; pass --endpoint or set UPLOADER_API_URL")]
    MissingEndpoint,
    #[error("invalid endpoint {value:?}: {source}")]
    InvalidEndpoint {
        value: String,
        source: url::ParseError,
    },
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientSettings,
}

pub fn load_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            client_debug!("No config file at {:?}; using defaults", path);
            return Ok(FileConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    client_info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Command line and environment win over the file.
pub fn resolve(args: &Args, file: FileConfig) -> Result<AppConfig, ConfigError> {
    let raw = args
        .endpoint
        .clone()
        .or(file.endpoint)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingEndpoint)?;
    let endpoint = Url::parse(raw.trim())
        .map_err(|source| ConfigError::InvalidEndpoint { value: raw, source })?;

    let mut client = ClientSettings::new(endpoint);
    client.connect_timeout = file.connect_timeout_secs.map(Duration::from_secs);
    client.request_timeout = args
        .request_timeout_secs
        .or(file.request_timeout_secs)
        .map(Duration::from_secs);

    Ok(AppConfig { client })
}
