use crate::errors::{NeuralError, NeuralResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub response_delay_ms: u64,
    pub tick_rate_ms: u64,
    pub metrics_refresh_ms: u64,
    pub rain_density: f32,
    pub scanlines: bool,
    pub template_seed: Option<u64>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            response_delay_ms: 2000,
            tick_rate_ms: 100,
            metrics_refresh_ms: 2000,
            rain_density: 0.6,
            scanlines: true,
            template_seed: None,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads (or creates) the config file, applies environment overrides and
/// installs the result as the process-wide config.
pub fn initialize_config() -> NeuralResult<()> {
    let config_path = get_config_path()?;
    let mut config = load_from(&config_path)?;

    apply_overrides(&mut config, |key| env::var(key).ok())?;
    validate_config(&config)?;

    *CONFIG.write().unwrap_or_else(|e| e.into_inner()) = config;

    Ok(())
}

/// Reads the config at `path`, writing a default one first if it does not exist.
pub fn load_from(path: &Path) -> NeuralResult<Config> {
    if path.exists() {
        let config_str = fs::read_to_string(path)
            .map_err(|e| NeuralError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| NeuralError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;
        Ok(config)
    } else {
        let config = Config::default();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                NeuralError::config_error(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config_str = serde_json::to_string_pretty(&config)?;
        fs::write(path, config_str)
            .map_err(|e| NeuralError::config_error(format!("Failed to write config file: {}", e)))?;

        Ok(config)
    }
}

/// Applies `NEURAL_*` overrides. `lookup` is `std::env::var` outside of tests.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> NeuralResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(delay) = lookup("NEURAL_RESPONSE_DELAY_MS") {
        config.response_delay_ms = delay.trim().parse().map_err(|_| {
            NeuralError::config_error(format!("NEURAL_RESPONSE_DELAY_MS is not a number: {}", delay))
        })?;
    }

    if let Some(seed) = lookup("NEURAL_TEMPLATE_SEED") {
        config.template_seed = Some(seed.trim().parse().map_err(|_| {
            NeuralError::config_error(format!("NEURAL_TEMPLATE_SEED is not a number: {}", seed))
        })?);
    }

    if let Some(level) = lookup("NEURAL_LOG_LEVEL") {
        config.log_level = level.trim().to_lowercase();
    }

    Ok(())
}

pub fn get_config_dir() -> NeuralResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| NeuralError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("neural-interface"))
}

fn get_config_path() -> NeuralResult<PathBuf> {
    Ok(get_config_dir()?.join("config.json"))
}

pub fn validate_config(config: &Config) -> NeuralResult<()> {
    if config.response_delay_ms == 0 {
        return Err(NeuralError::config_error("response_delay_ms must be greater than 0"));
    }

    if config.tick_rate_ms == 0 {
        return Err(NeuralError::config_error("tick_rate_ms must be greater than 0"));
    }

    if config.metrics_refresh_ms < config.tick_rate_ms {
        return Err(NeuralError::config_error(
            "metrics_refresh_ms must be at least tick_rate_ms",
        ));
    }

    if !(0.0..=1.0).contains(&config.rain_density) {
        return Err(NeuralError::config_error("rain_density must be between 0.0 and 1.0"));
    }

    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(NeuralError::config_error(format!(
            "Unknown log_level '{}'",
            config.log_level
        )));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_zero_delay() {
        let mut config = Config::default();
        config.response_delay_ms = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_density() {
        let mut config = Config::default();
        config.rain_density = 1.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_refresh_faster_than_tick() {
        let mut config = Config::default();
        config.tick_rate_ms = 500;
        config.metrics_refresh_ms = 100;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_unknown_log_level() {
        let mut config = Config::default();
        config.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_from_reads_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "response_delay_ms": 3000, "scanlines": false }"#).unwrap();

        let config = load_from(&path).unwrap();

        assert_eq!(config.response_delay_ms, 3000);
        assert!(!config.scanlines);
        assert_eq!(config.tick_rate_ms, Config::default().tick_rate_ms);
    }

    #[test]
    fn test_load_from_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(load_from(&path), Err(NeuralError::Config(_))));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        apply_overrides(&mut config, |key| match key {
            "NEURAL_RESPONSE_DELAY_MS" => Some("3000".to_string()),
            "NEURAL_TEMPLATE_SEED" => Some(" 42 ".to_string()),
            "NEURAL_LOG_LEVEL" => Some("DEBUG".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.response_delay_ms, 3000);
        assert_eq!(config.template_seed, Some(42));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_apply_overrides_bad_number() {
        let mut config = Config::default();
        let result = apply_overrides(&mut config, |key| {
            (key == "NEURAL_RESPONSE_DELAY_MS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
        assert_eq!(config.response_delay_ms, 2000);
    }
}
