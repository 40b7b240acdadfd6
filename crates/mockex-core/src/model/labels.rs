//! Label sets and identifier validation.
//!
//! Labels are flattened into a vector sorted by key so identity comparisons
//! and rendering order are deterministic regardless of YAML map order.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{MockexError, Result};

/// Sorted, de-duplicated `(name, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct LabelSet(Vec<(String, String)>);

impl LabelSet {
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check every label name against the Prometheus rules.
    pub fn validate(&self) -> Result<()> {
        for (k, _) in &self.0 {
            validate_label_name(k)?;
        }
        Ok(())
    }
}

impl From<BTreeMap<String, String>> for LabelSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map.into_iter().collect())
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn validate_metric_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(MockexError::InvalidName(format!("metric name {name:?}")))
    }
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, and the `__` prefix is reserved.
pub fn validate_label_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if !ok {
        return Err(MockexError::InvalidName(format!("label name {name:?}")));
    }
    if name.starts_with("__") {
        return Err(MockexError::InvalidName(format!(
            "label name {name:?} is reserved"
        )));
    }
    Ok(())
}
