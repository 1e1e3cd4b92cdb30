use std::{fs::read_to_string, path::PathBuf, str::FromStr};

use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warn" => Self::Warn,
            "error" => Self::Error,
            _ => return Err(format!("unknown log level: {value}")),
        })
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl LogLevel {
    pub fn as_level(&self) -> log::Level {
        match *self {
            Self::Error => log::Level::Error,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Log {
    ///
    /// log level
    ///
    /// An enum representing the available verbosity levels of the logger.
    ///
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Codec {
    ///
    /// strict payload types
    ///
    /// Reject packets whose payload type is reserved or unassigned in the
    /// RFC 3551 profile.
    ///
    #[serde(default = "Codec::strict")]
    pub strict: bool,
}

impl Codec {
    fn strict() -> bool {
        cfg!(feature = "rfc3551")
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            strict: Self::strict(),
        }
    }
}

/// How a packet is stored in an input file.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// The wire bytes as they are.
    #[default]
    Raw,
    /// Standard base64, surrounding whitespace is ignored.
    Base64,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "raw" => Self::Raw,
            "base64" => Self::Base64,
            _ => return Err(format!("unknown input format: {value}")),
        })
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Input {
    #[serde(default)]
    pub format: Format,
    ///
    /// packet files
    ///
    /// Every file holds exactly one packet.
    ///
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub codec: Codec,
    #[serde(default)]
    pub input: Input,
}

#[derive(Parser, Debug)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION"),
)]
struct Cli {
    ///
    /// Specify the configuration file path
    ///
    /// Example: rtp-inspect --config /etc/rtp-inspect/config.json5
    ///
    #[arg(long, short)]
    config: Option<PathBuf>,
    ///
    /// Reject reserved and unassigned payload types
    ///
    #[arg(long)]
    strict: bool,
    ///
    /// Input file format, raw or base64
    ///
    #[arg(long, short)]
    format: Option<Format>,
    ///
    /// Log level, error, warn, info, debug or trace
    ///
    #[arg(long)]
    log_level: Option<LogLevel>,
    ///
    /// Packet files, one packet per file
    ///
    files: Vec<PathBuf>,
}

impl Config {
    ///
    /// Load configure from config file and command line parameters.
    ///
    /// If the configuration file path is specified, the configuration is
    /// read from the configuration file, otherwise the default configuration
    /// is used.  Command line parameters take precedence over the file.
    ///
    pub fn load() -> Result<Self> {
        Self::from_cli(Cli::parse())
    }

    fn from_cli(cli: Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_json5(&read_to_string(path)?)?,
            None => Self::default(),
        };

        if cli.strict {
            config.codec.strict = true;
        }

        if let Some(format) = cli.format {
            config.input.format = format;
        }

        if let Some(level) = cli.log_level {
            config.log.level = level;
        }

        if !cli.files.is_empty() {
            config.input.files = cli.files;
        }

        Ok(config)
    }

    pub fn from_json5(source: &str) -> Result<Self> {
        Ok(serde_json5::from_str::<Self>(source)?)
    }
}
