//! Series descriptors (the `mock_metrics` / `label_metrics` entries).

use std::fmt;

use serde::Deserialize;

use super::labels::LabelSet;

/// A constant label set rendered as one `mock_tag_info` gauge.
pub type TagDescriptor = LabelSet;

/// Exposed metric type of a registered family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
}

impl MetricType {
    /// Name used on the `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
        }
    }
}

/// Kind as written in config (`type:` field).
///
/// Anything other than `counter` or `gauge` is kept verbatim so the engine can
/// report it and skip the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SeriesKind {
    Counter,
    Gauge,
    Unknown(String),
}

impl Default for SeriesKind {
    fn default() -> Self {
        SeriesKind::Unknown(String::new())
    }
}

impl From<String> for SeriesKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "counter" => SeriesKind::Counter,
            "gauge" => SeriesKind::Gauge,
            _ => SeriesKind::Unknown(s),
        }
    }
}

impl From<&str> for SeriesKind {
    fn from(s: &str) -> Self {
        SeriesKind::from(s.to_string())
    }
}

impl SeriesKind {
    /// Exposed type, or `None` for kinds the simulator does not drive.
    pub fn metric_type(&self) -> Option<MetricType> {
        match self {
            SeriesKind::Counter => Some(MetricType::Counter),
            SeriesKind::Gauge => Some(MetricType::Gauge),
            SeriesKind::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SeriesKind::Counter => "counter",
            SeriesKind::Gauge => "gauge",
            SeriesKind::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured mock series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesDescriptor {
    /// Metric name (e.g., `http_requests_total`). A missing name loads as
    /// empty and is rejected at registration.
    #[serde(default)]
    pub name: String,
    /// Evolution policy (field name is `type` in YAML).
    #[serde(rename = "type", default)]
    pub kind: SeriesKind,
    /// Starting value (field name is `value` in YAML).
    #[serde(rename = "value", default)]
    pub base_value: f64,
    /// Constant labels identifying this series.
    #[serde(default)]
    pub labels: LabelSet,
}

impl SeriesDescriptor {
    pub fn new(name: impl Into<String>, kind: impl Into<SeriesKind>, base_value: f64) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            base_value,
            labels: LabelSet::default(),
        }
    }

    /// Builder-style label attachment, mostly for tests and tooling.
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing_is_exact() {
        assert_eq!(SeriesKind::from("counter"), SeriesKind::Counter);
        assert_eq!(SeriesKind::from("gauge"), SeriesKind::Gauge);
        assert_eq!(
            SeriesKind::from("Gauge"),
            SeriesKind::Unknown("Gauge".into())
        );
        assert_eq!(SeriesKind::from("histogram").metric_type(), None);
    }
}
