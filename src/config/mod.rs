mod schema;

pub use schema::{ColorMode, Config, DisplayConfig, FormConfig};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Highest number of decimal places a score can be displayed with.
pub const MAX_DECIMALS: u8 = 6;

/// Get the config directory path (~/.config/refscore/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("refscore"))
}

/// Get the default config file path (~/.config/refscore/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// An explicit `path` must exist. When `path` is None the default location is
/// used, and a missing file there means built-in defaults.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path()?, false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.display.decimals > MAX_DECIMALS {
        errors.push(format!(
            "display.decimals: must be at most {}, got {}",
            MAX_DECIMALS, config.display.decimals
        ));
    }

    if let Some(ref level) = config.log_level {
        if let Err(e) = tracing_subscriber::EnvFilter::try_new(level) {
            errors.push(format!("log_level: invalid filter '{}' - {}", level, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_path = env::temp_dir().join("refscore_test_missing_config.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_path = env::temp_dir().join("refscore_test_config.yaml");
        fs::write(&temp_path, "display:\n  decimals: 1\nform:\n  prefill: false\n").unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.display.decimals, 1);
        assert!(!config.form.prefill);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_path = env::temp_dir().join("refscore_test_bad_config.yaml");
        fs::write(&temp_path, "display: [1, 2\n").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config.display.decimals = 9;
        config.log_level = Some("refscore=loud".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("display.decimals"));
        assert!(errors[1].contains("log_level"));
    }
}
