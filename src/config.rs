//! Layered runtime settings.
//!
//! Precedence, lowest first: built-in defaults, an optional config file,
//! `PINGWATCH_*` environment variables, explicit command-line flags.
//!
//! ```toml
//! # pingwatch.toml
//! host = "9.9.9.9"
//! interval = "1s"
//! timeout = "3s"
//! tick = "1s"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::sampler::{SamplerConfig, DEFAULT_INTERVAL};
use crate::source::{PingSource, DEFAULT_HOST, DEFAULT_TIMEOUT};

/// Redraw cadence when nothing else triggers a frame.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub interval: Option<String>,
    pub timeout: Option<String>,
    pub tick: Option<String>,
}

/// Settings as they appear in files and the environment.
#[derive(Debug, Deserialize)]
struct RawSettings {
    host: String,
    interval: String,
    timeout: String,
    tick: String,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Host the probe targets.
    pub host: String,
    /// Pause between probes.
    pub interval: Duration,
    /// Upper bound on one probe.
    pub probe_timeout: Duration,
    /// Redraw cadence for the overlay.
    pub tick: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            interval: DEFAULT_INTERVAL,
            probe_timeout: DEFAULT_TIMEOUT,
            tick: DEFAULT_TICK,
        }
    }
}

impl Settings {
    /// Merge every layer into one set of settings.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("interval", "500ms")?
            .set_default("timeout", "5s")?
            .set_default("tick", "1s")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let raw: RawSettings = builder
            .add_source(Environment::with_prefix("PINGWATCH"))
            .set_override_option("host", overrides.host.clone())?
            .set_override_option("interval", overrides.interval.clone())?
            .set_override_option("timeout", overrides.timeout.clone())?
            .set_override_option("tick", overrides.tick.clone())?
            .build()
            .context("failed to load configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self> {
        let host = raw.host.trim().to_string();
        if host.is_empty() {
            bail!("host must not be empty");
        }

        let interval = parse_duration(&raw.interval).context("invalid interval")?;
        let probe_timeout = parse_duration(&raw.timeout).context("invalid timeout")?;
        let tick = parse_duration(&raw.tick).context("invalid tick")?;

        if interval.is_zero() {
            bail!("interval must be greater than zero");
        }
        if probe_timeout.is_zero() {
            bail!("timeout must be greater than zero");
        }
        if tick.is_zero() {
            bail!("tick must be greater than zero");
        }

        Ok(Self {
            host,
            interval,
            probe_timeout,
            tick,
        })
    }

    /// The latency source these settings describe.
    pub fn ping_source(&self) -> PingSource {
        PingSource::new(self.host.clone()).with_timeout(self.probe_timeout)
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        SamplerConfig {
            interval: self.interval,
        }
    }
}
