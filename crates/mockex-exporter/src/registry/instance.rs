use std::sync::atomic::{AtomicU64, Ordering};

use mockex_core::model::{LabelSet, MetricType};

/// Live, mutable counterpart of a descriptor.
///
/// The value is an `f64` stored as raw bits in an `AtomicU64`, so a reader
/// always sees either the previous or the next value, never a mix.
#[derive(Debug)]
pub struct SeriesInstance {
    name: String,
    labels: LabelSet,
    ty: MetricType,
    bits: AtomicU64,
}

impl SeriesInstance {
    pub(crate) fn new(
        name: impl Into<String>,
        labels: LabelSet,
        ty: MetricType,
        initial: f64,
    ) -> Self {
        Self {
            name: name.into(),
            labels,
            ty,
            bits: AtomicU64::new(initial.to_bits()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn metric_type(&self) -> MetricType {
        self.ty
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Replace the value.
    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Release);
    }

    /// Add `delta` and return the new value.
    pub fn add(&self, delta: f64) -> f64 {
        let mut cur = self.bits.load(Ordering::Acquire);
        loop {
            let next = (f64::from_bits(cur) + delta).to_bits();
            match self
                .bits
                .compare_exchange_weak(cur, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return f64::from_bits(next),
                Err(actual) => cur = actual,
            }
        }
    }
}
