//! Exporter config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use mockex_core::error::{MockexError, Result};

pub use schema::{ExporterSection, MockConfig};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<MockConfig> {
    load_from_file_with_listen(path, None)
}

/// Load, replace `exporter.listen` with `listen` when given, then validate.
pub fn load_from_file_with_listen(
    path: impl AsRef<Path>,
    listen: Option<&str>,
) -> Result<MockConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)
        .map_err(|e| MockexError::Config(format!("read {} failed: {e}", path.display())))?;
    load_from_str_with_listen(&s, listen)
}

pub fn load_from_str(s: &str) -> Result<MockConfig> {
    load_from_str_with_listen(s, None)
}

pub fn load_from_str_with_listen(s: &str, listen: Option<&str>) -> Result<MockConfig> {
    // An empty document is a valid, empty simulation.
    let mut cfg: MockConfig = if s.trim().is_empty() {
        MockConfig::default()
    } else {
        serde_yaml::from_str(s)
            .map_err(|e| MockexError::Config(format!("invalid yaml: {e}")))?
    };
    if let Some(listen) = listen {
        cfg.exporter.listen = listen.to_string();
    }
    cfg.validate()?;
    Ok(cfg)
}
