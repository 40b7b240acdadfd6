//! Registry of simulated series.
//!
//! Families are keyed by metric name in a `DashMap`; each family keeps its
//! series in a `BTreeMap` keyed by label set, so rendering is deterministic
//! (families sorted by name, series sorted by labels).
//!
//! Identity is `(name, labels)`. Registering an identity twice is rejected
//! with `DuplicateSeries`: the first instance stays live and keeps its
//! generator. A name can only carry one metric type.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use mockex_core::error::{MockexError, Result};
use mockex_core::expo;
use mockex_core::model::{
    validate_metric_name, LabelSet, MetricType, SeriesDescriptor, TagDescriptor,
};

use super::instance::SeriesInstance;

/// Name of the constant info gauge built from `label_metrics`.
pub const TAG_INFO_NAME: &str = "mock_tag_info";

struct Family {
    ty: MetricType,
    help: String,
    series: BTreeMap<LabelSet, Arc<SeriesInstance>>,
}

#[derive(Default)]
pub struct SeriesRegistry {
    families: DashMap<String, Family>,
}

impl SeriesRegistry {
    pub fn new() -> Self {
        Self {
            families: DashMap::new(),
        }
    }

    /// Register `mock_tag_info{tags...} 1`.
    pub fn register_tag_info(&self, tags: &TagDescriptor) -> Result<Arc<SeriesInstance>> {
        tags.validate()?;
        self.insert(TAG_INFO_NAME, tags.clone(), MetricType::Gauge, 1.0)
    }

    /// Register one mutable series for a descriptor.
    ///
    /// Both kinds start at `max(base_value, 0)` so no scrape ever sees a
    /// negative value before the first tick.
    pub fn register_series(&self, d: &SeriesDescriptor) -> Result<Arc<SeriesInstance>> {
        let ty = d
            .kind
            .metric_type()
            .ok_or_else(|| MockexError::UnsupportedKind(d.kind.to_string()))?;
        validate_metric_name(&d.name)?;
        d.labels.validate()?;
        if !d.base_value.is_finite() {
            return Err(MockexError::InvalidValue {
                name: d.name.clone(),
                value: d.base_value,
            });
        }

        self.insert(&d.name, d.labels.clone(), ty, d.base_value.max(0.0))
    }

    fn insert(
        &self,
        name: &str,
        labels: LabelSet,
        ty: MetricType,
        initial: f64,
    ) -> Result<Arc<SeriesInstance>> {
        let mut family = self.families.entry(name.to_string()).or_insert_with(|| Family {
            ty,
            help: name.to_string(),
            series: BTreeMap::new(),
        });

        if family.ty != ty {
            return Err(MockexError::KindConflict {
                name: name.to_string(),
                existing: family.ty.as_str(),
                requested: ty.as_str(),
            });
        }

        match family.series.entry(labels) {
            Entry::Occupied(e) => Err(MockexError::DuplicateSeries(series_id(name, e.key()))),
            Entry::Vacant(e) => {
                let instance = Arc::new(SeriesInstance::new(name, e.key().clone(), ty, initial));
                e.insert(Arc::clone(&instance));
                Ok(instance)
            }
        }
    }

    /// Look up a registered instance by identity.
    pub fn get(&self, name: &str, labels: &LabelSet) -> Option<Arc<SeriesInstance>> {
        self.families
            .get(name)
            .and_then(|f| f.series.get(labels).cloned())
    }

    /// Number of registered series across all families.
    pub fn len(&self) -> usize {
        self.families.iter().map(|f| f.series.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render every family in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut names: Vec<String> = self.families.iter().map(|e| e.key().clone()).collect();
        names.sort();

        let mut out = String::new();
        for name in &names {
            let Some(family) = self.families.get(name) else {
                continue;
            };
            expo::write_family_header(&mut out, name, &family.help, family.ty);
            for (labels, instance) in &family.series {
                expo::write_sample(&mut out, name, labels, instance.get());
            }
        }
        out
    }
}

/// `name{k="v",...}` for log and error messages.
fn series_id(name: &str, labels: &LabelSet) -> String {
    if labels.is_empty() {
        return name.to_string();
    }
    let label_str = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, expo::escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{name}{{{label_str}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockex_core::SeriesKind;

    fn gauge(name: &str, v: f64) -> SeriesDescriptor {
        SeriesDescriptor::new(name, SeriesKind::Gauge, v)
    }

    #[test]
    fn same_name_different_labels_are_distinct() {
        let reg = SeriesRegistry::new();
        let a = reg
            .register_series(&gauge("temp", 1.0).with_labels(LabelSet::new([("room", "a")])))
            .unwrap();
        let b = reg
            .register_series(&gauge("temp", 2.0).with_labels(LabelSet::new([("room", "b")])))
            .unwrap();
        a.set(5.0);
        assert_eq!(b.get(), 2.0);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn duplicate_identity_keeps_first() {
        let reg = SeriesRegistry::new();
        let first = reg.register_series(&gauge("temp", 1.0)).unwrap();
        let err = reg.register_series(&gauge("temp", 9.0)).unwrap_err();
        assert!(matches!(err, MockexError::DuplicateSeries(ref id) if id == "temp"));
        assert_eq!(first.get(), 1.0);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn kind_conflict_on_same_name() {
        let reg = SeriesRegistry::new();
        reg.register_series(&gauge("jobs", 1.0)).unwrap();
        let err = reg
            .register_series(
                &SeriesDescriptor::new("jobs", SeriesKind::Counter, 0.0)
                    .with_labels(LabelSet::new([("q", "x")])),
            )
            .unwrap_err();
        assert!(matches!(err, MockexError::KindConflict { .. }));
    }

    #[test]
    fn rejects_bad_descriptors() {
        let reg = SeriesRegistry::new();
        assert!(matches!(
            reg.register_series(&SeriesDescriptor::new("x", "summary", 0.0)),
            Err(MockexError::UnsupportedKind(k)) if k == "summary"
        ));
        assert!(matches!(
            reg.register_series(&gauge("bad-name", 0.0)),
            Err(MockexError::InvalidName(_))
        ));
        assert!(matches!(
            reg.register_series(&gauge("nan_gauge", f64::NAN)),
            Err(MockexError::InvalidValue { .. })
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn negative_base_is_clamped() {
        let reg = SeriesRegistry::new();
        let c = reg
            .register_series(&SeriesDescriptor::new("c_total", SeriesKind::Counter, -3.0))
            .unwrap();
        assert_eq!(c.get(), 0.0);
        let g = reg.register_series(&gauge("g", -3.0)).unwrap();
        assert_eq!(g.get(), 0.0);
    }

    #[test]
    fn nameless_descriptor_is_rejected() {
        let reg = SeriesRegistry::new();
        assert!(matches!(
            reg.register_series(&gauge("", 1.0)),
            Err(MockexError::InvalidName(_))
        ));
        assert!(matches!(
            reg.register_series(&SeriesDescriptor::new("", "unknown", 0.0)),
            Err(MockexError::UnsupportedKind(_))
        ));
        assert!(reg.is_empty());
    }

    #[test]
    fn render_is_sorted_and_grouped() {
        let reg = SeriesRegistry::new();
        reg.register_series(&gauge("zeta", 2.0)).unwrap();
        reg.register_tag_info(&LabelSet::new([("env", "prod")])).unwrap();
        reg.register_series(&gauge("alpha", 1.5).with_labels(LabelSet::new([("k", "v")])))
            .unwrap();

        let expected = "\
# HELP alpha alpha
# TYPE alpha gauge
alpha{k=\"v\"} 1.5
# HELP mock_tag_info mock_tag_info
# TYPE mock_tag_info gauge
mock_tag_info{env=\"prod\"} 1
# HELP zeta zeta
# TYPE zeta gauge
zeta 2
";
        assert_eq!(reg.render(), expected);
    }
}
