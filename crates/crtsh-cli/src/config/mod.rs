//! Configuration management.
//!
//! Settings come from three places, highest priority first: command-line
//! flags (and their environment variables), the config file, and built-in
//! defaults. They are folded once into an immutable [`RunConfig`].

use anyhow::{bail, Context as _, Result};
use crtsh::recon::dns::{DEFAULT_DNS_PORT, DEFAULT_DNS_SERVER};
use crtsh::recon::{PoolConfig, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_WORKERS};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::args::Cli;
use crate::output::OutputMode;

/// Settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// DNS server for live checks.
    pub dns_server: Option<String>,

    /// DNS server port.
    pub dns_port: Option<u16>,

    /// Concurrent lookup workers.
    pub workers: Option<usize>,

    /// Per-lookup timeout in seconds.
    pub lookup_timeout_secs: Option<u64>,

    /// Always include unresolvable hosts (as if -a was passed).
    pub show_unresolvable: bool,

    /// Never colorize output.
    pub no_color: bool,
}

impl Config {
    /// Default config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("rs", "crtsh", "crtsh").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::default_path().map_or_else(|| Ok(Self::default()), |p| Self::load_from(&p)),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        Ok(config)
    }
}

/// Everything one invocation needs, resolved up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Domain to query
    pub domain: String,

    /// Resolve every extracted name
    pub live: bool,

    /// Keep unresolvable entries in the output
    pub show_unresolvable: bool,

    /// How results are rendered
    pub output: OutputMode,

    /// Colorize plain output
    pub color: bool,

    /// DNS server host or address
    pub dns_server: String,

    /// DNS server port
    pub dns_port: u16,

    /// Pool sizing and deadlines
    pub pool: PoolConfig,

    /// Certificate search endpoint override
    pub endpoint: Option<String>,
}

impl RunConfig {
    /// Merge parsed flags over file settings over defaults.
    pub fn from_sources(cli: &Cli, file: &Config) -> Result<Self> {
        let domain = cli.domain.trim().to_string();
        if domain.is_empty() {
            bail!("domain must not be empty");
        }

        let workers = cli.workers.or(file.workers).unwrap_or(DEFAULT_WORKERS);
        if workers == 0 {
            bail!("workers must be at least 1");
        }

        let lookup_timeout = match cli.timeout.or(file.lookup_timeout_secs) {
            Some(0) => bail!("timeout must be at least 1 second"),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_LOOKUP_TIMEOUT,
        };

        let output = if cli.json {
            OutputMode::Json
        } else if cli.table {
            OutputMode::Table
        } else {
            OutputMode::Plain
        };

        Ok(Self {
            domain,
            live: cli.live,
            show_unresolvable: cli.all || file.show_unresolvable,
            output,
            color: !(cli.no_color || file.no_color),
            dns_server: cli
                .dns_server
                .clone()
                .or_else(|| file.dns_server.clone())
                .unwrap_or_else(|| DEFAULT_DNS_SERVER.to_string()),
            dns_port: cli.dns_port.or(file.dns_port).unwrap_or(DEFAULT_DNS_PORT),
            pool: PoolConfig::default()
                .workers(workers)
                .lookup_timeout(lookup_timeout),
            endpoint: cli.endpoint.clone(),
        })
    }
}
