use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use mockex_core::error::{MockexError, Result};
use mockex_core::model::{SeriesDescriptor, TagDescriptor};

use crate::sim::TickRange;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MockConfig {
    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub label_metrics: Vec<TagDescriptor>,

    #[serde(default)]
    pub mock_metrics: Vec<SeriesDescriptor>,
}

impl MockConfig {
    pub fn validate(&self) -> Result<()> {
        self.exporter.validate()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_tick_min_ms")]
    pub tick_min_ms: u64,

    #[serde(default = "default_tick_max_ms")]
    pub tick_max_ms: u64,

    /// How long `/readyz` reports draining before the server stops.
    #[serde(default = "default_drain_grace_ms")]
    pub drain_grace_ms: u64,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            tick_min_ms: default_tick_min_ms(),
            tick_max_ms: default_tick_max_ms(),
            drain_grace_ms: default_drain_grace_ms(),
        }
    }
}

impl ExporterSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.tick_max_ms > 600_000 {
            return Err(MockexError::Config(
                "exporter.tick_max_ms must be at most 600000".into(),
            ));
        }
        if self.drain_grace_ms > 60_000 {
            return Err(MockexError::Config(
                "exporter.drain_grace_ms must be at most 60000".into(),
            ));
        }
        self.tick_range()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MockexError::Config(format!(
                "exporter.listen {:?} is not a socket address: {e}",
                self.listen
            ))
        })
    }

    pub fn drain_grace(&self) -> Duration {
        Duration::from_millis(self.drain_grace_ms)
    }

    pub fn tick_range(&self) -> Result<TickRange> {
        TickRange::from_millis(self.tick_min_ms, self.tick_max_ms)
    }
}

fn default_listen() -> String {
    "0.0.0.0:2112".into()
}
fn default_tick_min_ms() -> u64 {
    2000
}
fn default_tick_max_ms() -> u64 {
    4000
}
fn default_drain_grace_ms() -> u64 {
    1000
}
