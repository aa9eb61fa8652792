//! Configuration I/O (YAML loading)
//!
//! ```yaml
//! version: 1
//! preset: strict
//! overrides:
//!   callers_scope: project
//! ```

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::query_config::{CallerScope, QueryConfig, UnresolvedGroups};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfigExportV1 {
    /// Schema version (always 1 for v1); optional only so a missing value
    /// can be reported precisely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default)]
    pub preset: Option<String>,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<QueryConfigOverrides>,
}

/// Per-field overrides applied on top of the preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callers_scope: Option<CallerScope>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_filters: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unresolved_groups: Option<UnresolvedGroups>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slow_query_ms: Option<u64>,
}

impl QueryConfigOverrides {
    fn apply(self, mut config: QueryConfig) -> QueryConfig {
        if let Some(v) = self.callers_scope {
            config.callers_scope = v;
        }
        if let Some(v) = self.strict_filters {
            config.strict_filters = v;
        }
        if let Some(v) = self.unresolved_groups {
            config.unresolved_groups = v;
        }
        if let Some(v) = self.slow_query_ms {
            config.slow_query_ms = v;
        }
        config
    }
}

impl QueryConfig {
    /// Load and validate a configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading query configuration");
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: QueryConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match export.preset.as_deref() {
            Some(name) => Preset::parse(name)?,
            None => Preset::default(),
        };

        let config = export
            .overrides
            .unwrap_or_default()
            .apply(Self::preset(preset));
        config.validate()?;
        Ok(config)
    }

    /// Serialize as a v1 document: lenient preset plus every field as override
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = QueryConfigExportV1 {
            version: Some(1),
            preset: Some(Preset::Lenient.as_str().to_string()),
            overrides: Some(QueryConfigOverrides {
                callers_scope: Some(self.callers_scope),
                strict_filters: Some(self.strict_filters),
                unresolved_groups: Some(self.unresolved_groups),
                slow_query_ms: Some(self.slow_query_ms),
            }),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}
