use crate::error::CliError;
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use getset::{CopyGetters, Getters};
use layout_search_client::{CACHE_FILE_NAME, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "g80-layouts";
const CONFIG_FILE_NAME: &str = "config.yaml";
const ENV_PREFIX: &str = "G80_";

#[serde_inline_default]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, CopyGetters)]
pub struct Config {
    #[serde_inline_default(DEFAULT_BASE_URL.to_string())]
    #[getset(get = "pub")]
    base_url: String,
    /// Overrides the platform cache location
    #[serde(default)]
    #[getset(get = "pub")]
    cache_path: Option<PathBuf>,
    #[serde_inline_default(true)]
    #[getset(get_copy = "pub")]
    cache_enabled: bool,
    #[serde_inline_default(10)]
    #[getset(get_copy = "pub")]
    limit: usize,
}

impl Config {
    /// Layers the YAML config file (if any) and `G80_*` environment variables
    /// over the built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let file = match explicit {
            Some(path) if !path.exists() => {
                return Err(CliError::ConfigMissing(path.to_path_buf()))
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        let mut figment = Figment::new();
        if let Some(file) = file {
            log::debug!("Reading config from {}", file.display());
            figment = figment.merge(Yaml::file(file));
        }
        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, CliError> {
        Ok(figment.extract()?)
    }

    /// Where the layout cache lives: the configured path, or the platform
    /// cache directory.
    pub fn resolve_cache_path(&self) -> Result<PathBuf, CliError> {
        if let Some(path) = &self.cache_path {
            return Ok(path.clone());
        }
        dirs::cache_dir()
            .map(|dir| dir.join(CACHE_FILE_NAME))
            .ok_or(CliError::NoCacheDir)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::Serialized;
    use tempdir::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::from_figment(Figment::new()).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.limit(), 10);
        assert!(config.cache_enabled());
        assert_eq!(config.cache_path(), &None);
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let yaml = "base_url: http://localhost:8080/v1/\nlimit: 25\ncache_path: /tmp/layouts.json\n";
        let config = Config::from_figment(Figment::new().merge(Yaml::string(yaml))).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080/v1/");
        assert_eq!(config.limit(), 25);
        assert_eq!(
            config.resolve_cache_path().unwrap(),
            PathBuf::from("/tmp/layouts.json")
        );
    }

    #[test]
    fn test_later_layers_win() {
        let figment = Figment::new()
            .merge(Yaml::string("limit: 25\ncache_enabled: true"))
            .merge(Serialized::default("cache_enabled", false));
        let config = Config::from_figment(figment).unwrap();
        assert_eq!(config.limit(), 25);
        assert!(!config.cache_enabled());
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let figment = Figment::new().merge(Yaml::string("limit: lots"));
        assert!(matches!(
            Config::from_figment(figment),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = TempDir::new("config").unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "limit: 4\n").unwrap();
        assert_eq!(Config::load(Some(&path)).unwrap().limit(), 4);

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(CliError::ConfigMissing(_))
        ));
    }
}
