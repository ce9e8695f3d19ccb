use crate::config::RunnerConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and validate a runner configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<RunnerConfig> {
    info!("Loading runner configuration from: {:?}", config_path);

    // Open the configuration file
    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    // Parse the YAML content
    let config: RunnerConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    // Validate the configuration
    config.validate()?;

    if !config.cc_algorithms.is_empty() {
        info!(
            "Configuration registers {} extra congestion control algorithms",
            config.cc_algorithms.len()
        );
    }

    Ok(config)
}
