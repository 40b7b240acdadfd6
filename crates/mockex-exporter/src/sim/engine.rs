//! Bootstraps a simulation from a loaded config.
//!
//! Registration happens once, up front: tag infos first, then one series and
//! one generator per descriptor. Per-descriptor failures are logged and
//! skipped; the remaining descriptors still run.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::MockConfig;
use crate::registry::SeriesRegistry;

use super::generator::{Generator, TickRange};

/// Outcome of a bootstrap pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub tags: usize,
    pub series: usize,
    pub skipped: usize,
}

pub struct SimulationEngine {
    registry: Arc<SeriesRegistry>,
    ticks: TickRange,
}

impl SimulationEngine {
    pub fn new(registry: Arc<SeriesRegistry>, ticks: TickRange) -> Self {
        Self { registry, ticks }
    }

    /// Register everything in `cfg` and spawn the generators.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self, cfg: &MockConfig) -> Simulation {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut report = BootstrapReport::default();
        let mut tasks = Vec::with_capacity(cfg.mock_metrics.len());

        for tags in &cfg.label_metrics {
            match self.registry.register_tag_info(tags) {
                Ok(_) => report.tags += 1,
                Err(e) => {
                    report.skipped += 1;
                    tracing::warn!(error = %e, "skipping label_metrics entry");
                }
            }
        }

        for d in &cfg.mock_metrics {
            match self.registry.register_series(d) {
                Ok(instance) => {
                    report.series += 1;
                    let generator = Generator::new(instance, self.ticks);
                    tasks.push(tokio::spawn(generator.run(shutdown_rx.clone())));
                }
                Err(e) => {
                    report.skipped += 1;
                    tracing::warn!(
                        name = %d.name,
                        kind = %d.kind,
                        class = e.class().as_str(),
                        error = %e,
                        "skipping mock_metrics entry"
                    );
                }
            }
        }

        tracing::info!(
            tags = report.tags,
            series = report.series,
            skipped = report.skipped,
            "simulation started"
        );

        Simulation {
            report,
            shutdown: shutdown_tx,
            tasks,
        }
    }
}

/// Running simulation. Dropping it also stops the generators.
pub struct Simulation {
    report: BootstrapReport,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl Simulation {
    pub fn report(&self) -> BootstrapReport {
        self.report
    }

    pub fn generator_count(&self) -> usize {
        self.tasks.len()
    }

    /// Signal every generator and wait for all of them to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for res in join_all(self.tasks).await {
            if let Err(e) = res {
                tracing::warn!(error = %e, "generator task failed");
            }
        }
        tracing::info!("simulation stopped");
    }
}
