//! # CLI Configuration
//!
//! Optional YAML file supplying defaults for the subcommands:
//!
//! ```yaml
//! comment: "Generated from nginx.org documentation"
//! skip_documents:
//!   - ngx_http_api_module.xml
//! filter:
//!   include: ["@default", "http_v2"]
//!   exclude: ["@commercial"]
//!   id: https://example.org/nginx.schema.json
//! ```
//!
//! Flags given on the command line take precedence.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Documentation files whose syntax is not directive-shaped.
pub const DEFAULT_SKIP_DOCUMENTS: &[&str] = &["ngx_http_api_module.xml"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Default `$comment` of generated documents.
    pub comment: Option<String>,
    /// File names `generate` never processes.
    pub skip_documents: Vec<String>,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub id: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            comment: None,
            skip_documents: DEFAULT_SKIP_DOCUMENTS.iter().map(|s| s.to_string()).collect(),
            filter: FilterConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load the file at `path`, or the built-in defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// True when `path` names a document `generate` must not process.
    pub fn skips(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.skip_documents.iter().any(|skip| skip == name))
    }
}
