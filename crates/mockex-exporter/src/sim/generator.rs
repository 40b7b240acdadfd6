//! Per-series generator: randomized tick cadence plus evolution policy.
//!
//! Counters add `U[0, 5)` per tick. Gauges random-walk by `U[-5, 5)` from
//! their base value and clamp at zero. The walk is carried in the generator,
//! not re-read from the instance, so each tick builds on the previous one.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;

use mockex_core::error::{MockexError, Result};
use mockex_core::model::MetricType;

use crate::registry::SeriesInstance;

/// Upper bound (exclusive) of a counter increment.
pub const COUNTER_MAX_INCREMENT: f64 = 5.0;
/// Gauge deltas are drawn from `[-GAUGE_MAX_DELTA, GAUGE_MAX_DELTA)`.
pub const GAUGE_MAX_DELTA: f64 = 5.0;

/// Inclusive range the tick interval is drawn from, millisecond granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRange {
    min_ms: u64,
    max_ms: u64,
}

impl Default for TickRange {
    fn default() -> Self {
        Self {
            min_ms: 2000,
            max_ms: 4000,
        }
    }
}

impl TickRange {
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Result<Self> {
        if min_ms == 0 {
            return Err(MockexError::Config("tick_min_ms must be at least 1".into()));
        }
        if min_ms > max_ms {
            return Err(MockexError::Config(
                "tick_min_ms must not exceed tick_max_ms".into(),
            ));
        }
        Ok(Self { min_ms, max_ms })
    }

    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.gen_range(self.min_ms..=self.max_ms))
    }
}

/// Mutation produced by one evolution step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update {
    Add(f64),
    Set(f64),
}

impl Update {
    /// Apply to the instance and return the value now exposed.
    pub fn apply(self, instance: &SeriesInstance) -> f64 {
        match self {
            Update::Add(inc) => instance.add(inc),
            Update::Set(v) => {
                instance.set(v);
                v
            }
        }
    }
}

/// Per-series evolution state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evolution {
    Counter,
    Gauge { current: f64 },
}

impl Evolution {
    /// Initial state for an instance; gauges carry its registered value.
    pub fn for_instance(instance: &SeriesInstance) -> Self {
        match instance.metric_type() {
            MetricType::Counter => Evolution::Counter,
            MetricType::Gauge => Evolution::Gauge {
                current: instance.get(),
            },
        }
    }

    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Update {
        match self {
            Evolution::Counter => Update::Add(rng.gen_range(0.0..COUNTER_MAX_INCREMENT)),
            Evolution::Gauge { current } => {
                let next = *current + rng.gen_range(-GAUGE_MAX_DELTA..GAUGE_MAX_DELTA);
                *current = if next < 0.0 { 0.0 } else { next };
                Update::Set(*current)
            }
        }
    }
}

/// Drives one `SeriesInstance` until cancelled.
pub struct Generator {
    instance: Arc<SeriesInstance>,
    evolution: Evolution,
    ticks: TickRange,
    rng: StdRng,
}

impl Generator {
    pub fn new(instance: Arc<SeriesInstance>, ticks: TickRange) -> Self {
        Self::with_rng(instance, ticks, StdRng::from_entropy())
    }

    pub fn with_rng(instance: Arc<SeriesInstance>, ticks: TickRange, rng: StdRng) -> Self {
        let evolution = Evolution::for_instance(&instance);
        Self {
            instance,
            evolution,
            ticks,
            rng,
        }
    }

    /// Apply one mutation immediately and return the exposed value.
    pub fn tick(&mut self) -> f64 {
        self.evolution.step(&mut self.rng).apply(&self.instance)
    }

    /// Sleep a randomized interval, mutate, repeat. Returns once `shutdown`
    /// reads `true` or its sender is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::debug!(
            name = %self.instance.name(),
            kind = self.instance.metric_type().as_str(),
            "generator started"
        );
        loop {
            if *shutdown.borrow() {
                break;
            }
            let wait = self.ticks.sample(&mut self.rng);
            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    let value = self.tick();
                    tracing::trace!(name = %self.instance.name(), value, "series updated");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!(name = %self.instance.name(), "generator stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockex_core::model::LabelSet;

    #[test]
    fn tick_range_bounds() {
        assert!(TickRange::from_millis(0, 10).is_err());
        assert!(TickRange::from_millis(10, 5).is_err());

        let r = TickRange::from_millis(2000, 4000).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = r.sample(&mut rng);
            assert!(d >= r.min() && d <= r.max());
        }
        assert_eq!(TickRange::default(), r);
    }

    #[test]
    fn counter_steps_are_non_negative_and_bounded() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut evo = Evolution::Counter;
        for _ in 0..10_000 {
            match evo.step(&mut rng) {
                Update::Add(inc) => assert!((0.0..COUNTER_MAX_INCREMENT).contains(&inc)),
                other => panic!("unexpected update {other:?}"),
            }
        }
    }

    #[test]
    fn gauge_walk_is_carried_and_clamped() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut evo = Evolution::Gauge { current: 10.0 };
        let mut prev = 10.0;
        for _ in 0..10_000 {
            let Update::Set(v) = evo.step(&mut rng) else {
                panic!("gauge must set");
            };
            assert!(v >= 0.0);
            // delta from the carried value, or clamped up from a negative result
            let step = v - prev;
            let bound = GAUGE_MAX_DELTA + 1e-9;
            assert!(v == 0.0 || (-bound..=bound).contains(&step));
            prev = v;
        }
        assert_eq!(evo, Evolution::Gauge { current: prev });
    }

    #[test]
    fn generator_tick_updates_instance() {
        let instance = Arc::new(SeriesInstance::new(
            "req_total",
            LabelSet::default(),
            MetricType::Counter,
            0.0,
        ));
        let mut g = Generator::with_rng(
            Arc::clone(&instance),
            TickRange::default(),
            StdRng::seed_from_u64(3),
        );
        let mut last = instance.get();
        for _ in 0..100 {
            let v = g.tick();
            assert!(v >= last);
            assert_eq!(instance.get(), v);
            last = v;
        }
    }
}
