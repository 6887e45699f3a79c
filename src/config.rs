//! Configuration for the `funcmap` binary.
//!
//! ```yaml
//! seed: 42                  # reseed the shared random source
//! log_level: debug          # trace/debug/info/warn/error/off
//! strict: false             # fail `math` on the first skipped step
//! rightmost_overrides: true # let aliases replace built-in names
//! aliases:
//!   next_host: ip4_inc
//!   math: ip_math
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::funcs::{FuncMap, HelperMap};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub rightmost_overrides: bool,
    /// Extra names for existing helpers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid log level '{0}', expected one of trace, debug, info, warn, error, off")]
    InvalidLogLevel(String),
    #[error("Invalid alias name '{0}'")]
    InvalidAlias(String),
    #[error("Alias '{alias}' refers to unknown helper '{target}'")]
    UnknownAliasTarget { alias: String, target: String },
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(ValidationError::InvalidLogLevel(level.clone()));
            }
        }

        if self.aliases.is_empty() {
            return Ok(());
        }

        let builtins = FuncMap::new();
        for (alias, target) in &self.aliases {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(ValidationError::InvalidAlias(alias.clone()));
            }
            if !builtins.contains(target) {
                return Err(ValidationError::UnknownAliasTarget {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(())
    }

    /// Build the helper map: built-ins plus the configured aliases.
    ///
    /// Aliases share the built-in helper instances, so e.g. an alias of `seq`
    /// advances the same counter.
    pub fn func_map(&self) -> Result<FuncMap, ValidationError> {
        let base = FuncMap::new();

        let mut aliases = HelperMap::new();
        for (alias, target) in &self.aliases {
            let helper = base.get(target).cloned().ok_or_else(|| ValidationError::UnknownAliasTarget {
                alias: alias.clone(),
                target: target.clone(),
            })?;
            aliases.insert(alias.clone(), Some(helper));
        }

        let mut builder = FuncMap::builder()
            .without_defaults()
            .with_maps([base.to_helper_map(), aliases]);
        if self.rightmost_overrides {
            builder = builder.rightmost_overrides();
        }
        Ok(builder.build())
    }
}
