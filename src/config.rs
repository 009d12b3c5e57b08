//! Runtime configuration: pool and arena sizing plus index handling.
//!
//! Everything has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! node_capacity = 1024
//! vertex_arena_bytes = 67108864
//! element_arena_bytes = 67108864
//! index_mode = "rebase"
//! max_parent_depth = 32
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How index data is treated when a template is copied into the element arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMode {
    /// Indices are copied unchanged. Draws must pass the instance's base vertex.
    #[default]
    Verbatim,
    /// The instance's base vertex is added to every index at copy time.
    Rebase,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub node_capacity: usize,
    pub vertex_arena_bytes: usize,
    pub element_arena_bytes: usize,
    pub index_mode: IndexMode,
    /// Overrides the parent-walk limit, which defaults to `node_capacity`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_parent_depth: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            node_capacity: 1024,
            vertex_arena_bytes: 64 * 1024 * 1024,
            element_arena_bytes: 64 * 1024 * 1024,
            index_mode: IndexMode::default(),
            max_parent_depth: None,
        }
    }
}

impl RuntimeConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::debug!("loaded {:?} from {}", config, path.display());
        Ok(config)
    }
}
