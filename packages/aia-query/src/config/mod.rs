//! Query configuration
//!
//! ```text
//! Preset (lenient | strict)
//!    ↓
//! QueryConfig (+ builder overrides)
//!    ↓
//! YAML v1 (version + preset + overrides)
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod query_config;

pub use error::{ConfigError, ConfigResult};
pub use io::{QueryConfigExportV1, QueryConfigOverrides};
pub use preset::Preset;
pub use query_config::{CallerScope, QueryConfig, UnresolvedGroups};
