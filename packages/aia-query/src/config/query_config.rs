//! Query evaluation configuration
//!
//! Controls the few behaviours that are a matter of taste rather than
//! correctness: how far `callers` looks, whether filters swallow unsupported
//! attributes, and where group-by puts elements it cannot key.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use serde::{Deserialize, Serialize};

/// Where the callers reverse index looks for referencing blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerScope {
    /// Only blocks on the same screen as the referenced block
    #[default]
    Screen,
    /// Blocks on every screen of the project
    Project,
}

/// What group-by does with elements whose group attribute cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedGroups {
    /// Collect them under the `Value::Null` key, so group counts sum to the input count
    #[default]
    Collect,
    /// Drop them from the result
    Skip,
}

/// Query evaluation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Scope of the `callers` attribute
    pub callers_scope: CallerScope,

    /// Surface UnsupportedAttribute from inside filters instead of "no match"
    pub strict_filters: bool,

    /// Group-by policy for unresolvable keys
    pub unresolved_groups: UnresolvedGroups,

    /// Use-case queries slower than this are logged at warn level (1..=600000)
    pub slow_query_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::preset(Preset::Lenient)
    }
}

impl QueryConfig {
    /// Complete configuration for a preset
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Lenient => Self {
                callers_scope: CallerScope::Screen,
                strict_filters: false,
                unresolved_groups: UnresolvedGroups::Collect,
                slow_query_ms: 250,
            },
            Preset::Strict => Self {
                callers_scope: CallerScope::Screen,
                strict_filters: true,
                unresolved_groups: UnresolvedGroups::Skip,
                slow_query_ms: 250,
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.slow_query_ms == 0 || self.slow_query_ms > 600_000 {
            return Err(ConfigError::range_with_hint(
                "slow_query_ms",
                self.slow_query_ms,
                1,
                600_000,
                "Slow-query threshold must be between 1ms and 10 minutes",
            ));
        }
        Ok(())
    }

    /// Builder: Set callers_scope
    pub fn callers_scope(mut self, v: CallerScope) -> Self {
        self.callers_scope = v;
        self
    }

    /// Builder: Set strict_filters
    pub fn strict_filters(mut self, v: bool) -> Self {
        self.strict_filters = v;
        self
    }

    /// Builder: Set unresolved_groups
    pub fn unresolved_groups(mut self, v: UnresolvedGroups) -> Self {
        self.unresolved_groups = v;
        self
    }

    /// Builder: Set slow_query_ms
    pub fn slow_query_ms(mut self, v: u64) -> Self {
        self.slow_query_ms = v;
        self
    }
}
