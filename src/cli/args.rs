//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::audio::ContentType;
use crate::domain::config::AppConfig;
use crate::domain::recording::Duration;

/// wav-recorder - capture the microphone as PCM WAV
#[derive(Parser, Debug)]
#[command(name = "wav-recorder")]
#[command(version)]
#[command(about = "Record the default microphone and export it as a 16-bit mono PCM WAV")]
#[command(long_about = None)]
pub struct Cli {
    /// Recording duration (e.g., 10s, 1m, 2m30s, 1500ms); Ctrl+C stops early
    #[arg(short = 'd', long, value_name = "TIME")]
    pub duration: Option<String>,

    /// Write the recording to this file
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<String>,

    /// Upload the recording as multipart/form-data to this URL
    #[arg(short = 'u', long, value_name = "URL", conflicts_with = "stdout")]
    pub upload: Option<String>,

    /// Session id sent as a query parameter with uploads
    #[arg(long, value_name = "ID")]
    pub session_id: Option<String>,

    /// Print the recording to stdout as JSON with base64 data
    #[arg(long)]
    pub stdout: bool,

    /// Samples per captured block
    #[arg(short = 'b', long, value_name = "SAMPLES", value_parser = parse_buffer_len)]
    pub buffer_len: Option<usize>,

    /// Content type attached to the recording
    #[arg(short = 't', long, value_name = "TYPE")]
    pub content_type: Option<String>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config layer made of the flags given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            duration: self.duration.clone(),
            buffer_len: self.buffer_len,
            content_type: self.content_type.clone(),
            output: self.output.clone(),
            upload_url: self.upload.clone(),
            session_id: self.session_id.clone(),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Remove a config value
    Unset {
        /// Config key
        key: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Where the exported recording goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Upload {
        url: String,
        session_id: Option<String>,
    },
    Stdout,
}

/// Parsed capture options
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub duration: Duration,
    pub buffer_len: usize,
    pub content_type: ContentType,
    pub target: OutputTarget,
}

impl CaptureOptions {
    /// Resolve a merged config into options.
    ///
    /// `--stdout` wins over everything; otherwise an upload URL wins over the output file.
    pub fn from_config(config: &AppConfig, stdout: bool) -> Result<Self, String> {
        let duration = match config.duration.as_deref() {
            Some(s) => s
                .parse::<Duration>()
                .map_err(|e| e.to_string())?,
            None => Duration::default_duration(),
        };

        let target = if stdout {
            OutputTarget::Stdout
        } else if let Some(url) = config.upload_url.clone() {
            OutputTarget::Upload {
                url,
                session_id: config.session_id.clone(),
            }
        } else {
            OutputTarget::File(PathBuf::from(config.output_or_default()))
        };

        Ok(Self {
            duration,
            buffer_len: config.buffer_len_or_default(),
            content_type: config.content_type_or_default(),
            target,
        })
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "duration",
    "buffer_len",
    "content_type",
    "output",
    "upload_url",
    "session_id",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

/// Parse a strictly positive block length
pub fn parse_buffer_len(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("buffer length must be at least 1".to_string()),
        Ok(len) => Ok(len),
        Err(_) => Err(format!("'{}' is not a positive integer", value)),
    }
}
