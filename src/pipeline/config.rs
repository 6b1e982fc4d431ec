//! Pipeline-wide configuration, loadable from a JSON file with CLI flags
//! layered on top, using the same `serde`-default-field shape throughout
//! so partial config files stay forward-compatible.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::minhash::MinHashConfig;
use crate::suffix_array::SuffixArrayConfig;

/// Which field of each JSONL document holds the text to deduplicate.
fn default_text_key() -> String {
    "text".to_string()
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_text_key")]
    pub text_key: String,
    /// 0 means "use available_parallelism()".
    #[serde(default)]
    pub worker_count: usize,
    #[serde(default)]
    pub minhash: MinHashConfig,
    #[serde(default)]
    pub suffix_array: SuffixArrayConfig,
    /// Cap on DedupStore entries; `None` is unbounded.
    #[serde(default)]
    pub max_store_entries: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            text_key: default_text_key(),
            worker_count: 0,
            minhash: MinHashConfig::default(),
            suffix_array: SuffixArrayConfig::default(),
            max_store_entries: None,
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn effective_worker_count(&self) -> usize {
        if self.worker_count == 0 {
            default_worker_count()
        } else {
            self.worker_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.text_key, "text");
        assert!(config.effective_worker_count() >= 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"text_key": "content"}"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.text_key, "content");
        assert_eq!(config.minhash.bands, 20);
    }

    #[test]
    fn test_explicit_worker_count_is_used_as_is() {
        let mut config = PipelineConfig::default();
        config.worker_count = 3;
        assert_eq!(config.effective_worker_count(), 3);
    }
}
