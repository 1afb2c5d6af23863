// src/core/config.rs
use std::env;
use std::path::PathBuf;
use log::LevelFilter;

// Configuration for the password tool
#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub store_file: PathBuf,
    pub key_file: PathBuf,

    // Password Generation
    pub default_password_length: usize,

    // Logging
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_data_dir(crate::utils::get_app_data_dir())
    }
}

impl Config {
    /// Defaults rooted at `data_dir`
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            store_file: data_dir.join("passwords.json"),
            key_file: data_dir.join("secret.key"),
            default_password_length: 12,
            log_level: LevelFilter::Info,
            log_file: data_dir.join("passtool.log"),
        }
    }

    // Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(Config::default(), |name| env::var(name).ok())
    }

    /// Apply overrides from `lookup` on top of `config`.
    pub fn from_lookup<F>(mut config: Config, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Storage
        if let Some(path) = lookup("PASSTOOL_STORE_FILE") {
            config.store_file = PathBuf::from(path);
        }

        if let Some(path) = lookup("PASSTOOL_KEY_FILE") {
            config.key_file = PathBuf::from(path);
        }

        // Password Generation
        if let Some(val) = lookup("DEFAULT_PASSWORD_LENGTH") {
            match val.parse::<usize>() {
                Ok(length) if length > 0 => config.default_password_length = length,
                _ => log::warn!("Ignoring invalid DEFAULT_PASSWORD_LENGTH '{}'", val),
            }
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            match level.to_lowercase().as_str() {
                "off" => config.log_level = LevelFilter::Off,
                "error" => config.log_level = LevelFilter::Error,
                "warn" => config.log_level = LevelFilter::Warn,
                "info" => config.log_level = LevelFilter::Info,
                "debug" => config.log_level = LevelFilter::Debug,
                "trace" => config.log_level = LevelFilter::Trace,
                _ => log::warn!("Unknown log level '{}', using {}", level, config.log_level),
            }
        }

        if let Some(file) = lookup("LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(Config::with_data_dir(PathBuf::from("/tmp/pt")), lookup_from(&[]));
        assert_eq!(config.store_file, PathBuf::from("/tmp/pt/passwords.json"));
        assert_eq!(config.key_file, PathBuf::from("/tmp/pt/secret.key"));
        assert_eq!(config.default_password_length, 12);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(
            Config::with_data_dir(PathBuf::from("/tmp/pt")),
            lookup_from(&[
                ("PASSTOOL_STORE_FILE", "/srv/store.json"),
                ("PASSTOOL_KEY_FILE", "/srv/key"),
                ("DEFAULT_PASSWORD_LENGTH", "20"),
                ("LOG_LEVEL", "DEBUG"),
                ("LOG_FILE", "/var/log/pt.log"),
            ]),
        );
        assert_eq!(config.store_file, PathBuf::from("/srv/store.json"));
        assert_eq!(config.key_file, PathBuf::from("/srv/key"));
        assert_eq!(config.default_password_length, 20);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, PathBuf::from("/var/log/pt.log"));
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let config = Config::from_lookup(
            Config::with_data_dir(PathBuf::from("/tmp/pt")),
            lookup_from(&[("DEFAULT_PASSWORD_LENGTH", "0"), ("LOG_LEVEL", "loud")]),
        );
        assert_eq!(config.default_password_length, 12);
        assert_eq!(config.log_level, LevelFilter::Info);
    }
}
