use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub log_level: Option<String>,
    pub strict: bool,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<()> {
    if let Some(seed) = overrides.seed {
        info!("Seed overridden from command line: {}", seed);
        config.seed = Some(seed);
    }

    if let Some(level) = &overrides.log_level {
        config.log_level = Some(level.clone());
    }

    if overrides.strict {
        config.strict = true;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
