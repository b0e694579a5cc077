use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const URL_VAR: &str = "BONFIRE_API_URL";
const TIMEOUT_VAR: &str = "BONFIRE_API_TIMEOUT";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Where a config value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Given on the command line.
    Override,
    /// Hard-coded default value.
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Override => write!(f, "command line"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Provenance of each config field.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSources {
    pub base_url: ConfigSource,
    pub timeout: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    api: Option<ApiSection>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
struct ApiSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Load the config from environment variables, config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<(Self, ConfigSources), ApiError> {
        let file = config_path().and_then(|p| read_section(&p));
        Self::resolve(|var| std::env::var(var).ok(), file.as_ref())
    }

    /// Load from an explicit config file instead of the user config dir.
    pub fn load_from(path: &Path) -> Result<(Self, ConfigSources), ApiError> {
        let file = read_section(path);
        Self::resolve(|var| std::env::var(var).ok(), file.as_ref())
    }

    fn resolve(
        env: impl Fn(&str) -> Option<String>,
        file: Option<&ApiSection>,
    ) -> Result<(Self, ConfigSources), ApiError> {
        let (base_url, url_source) = if let Some(url) = env(URL_VAR).filter(|u| !u.is_empty()) {
            (url, ConfigSource::EnvVar(URL_VAR))
        } else if let Some(url) = file.and_then(|f| f.base_url.clone()) {
            (url, ConfigSource::ConfigFile)
        } else {
            (DEFAULT_BASE_URL.to_string(), ConfigSource::Default)
        };

        let (timeout, timeout_source) = if let Some(raw) = env(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::config(format!("{TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'"))
            })?;
            (Duration::from_secs(secs), ConfigSource::EnvVar(TIMEOUT_VAR))
        } else if let Some(secs) = file.and_then(|f| f.timeout_secs) {
            (Duration::from_secs(secs), ConfigSource::ConfigFile)
        } else {
            (DEFAULT_TIMEOUT, ConfigSource::Default)
        };

        let config = Self {
            base_url: normalize_base_url(&base_url)?,
            timeout,
        };
        let sources = ConfigSources {
            base_url: url_source,
            timeout: timeout_source,
        };
        Ok((config, sources))
    }

    /// Replace the base URL, e.g. from a command-line flag.
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ApiError> {
        self.base_url = normalize_base_url(url)?;
        Ok(self)
    }
}

/// Trim whitespace and trailing slashes; endpoint segments are appended to the path.
pub fn normalize_base_url(url: &str) -> Result<String, ApiError> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ApiError::config(format!(
            "API URL must start with http:// or https://, got '{url}'"
        )));
    }
    Ok(url.to_string())
}

/// Return the path to the client config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bonfire").join("config.toml"))
}

/// Persist a base URL to the user config file.
///
/// Other keys in the file are left as they are. Returns the path written.
pub fn save_base_url(url: &str) -> Result<PathBuf, ApiError> {
    let path = config_path()
        .ok_or_else(|| ApiError::config("Could not determine config directory"))?;
    save_base_url_to(&path, url)?;
    Ok(path)
}

pub fn save_base_url_to(path: &Path, url: &str) -> Result<(), ApiError> {
    let url = normalize_base_url(url)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file: ConfigFile = std::fs::read_to_string(path)
        .ok()
        .and_then(|c| toml::from_str(&c).ok())
        .unwrap_or_default();
    file.api.get_or_insert_with(ApiSection::default).base_url = Some(url);

    let toml_str = toml::to_string_pretty(&file)
        .map_err(|e| ApiError::config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

fn read_section(path: &Path) -> Option<ApiSection> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<ConfigFile>(&content) {
        Ok(config) => config.api,
        Err(e) => {
            log::warn!("Ignoring unreadable config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_env_or_file() {
        let (config, sources) = ApiConfig::resolve(no_env, None).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(sources.base_url, ConfigSource::Default);
        assert_eq!(sources.timeout, ConfigSource::Default);
    }

    #[test]
    fn env_beats_file() {
        let file = ApiSection {
            base_url: Some("http://file:1/api".to_string()),
            timeout_secs: Some(5),
        };
        let env = |var: &str| match var {
            URL_VAR => Some("http://env:2/api/".to_string()),
            _ => None,
        };
        let (config, sources) = ApiConfig::resolve(env, Some(&file)).unwrap();
        assert_eq!(config.base_url, "http://env:2/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(sources.base_url, ConfigSource::EnvVar(URL_VAR));
        assert_eq!(sources.timeout, ConfigSource::ConfigFile);
    }

    #[test]
    fn bad_timeout_is_config_error() {
        let env = |var: &str| (var == TIMEOUT_VAR).then(|| "soon".to_string());
        assert!(matches!(
            ApiConfig::resolve(env, None),
            Err(ApiError::Config(_))
        ));
    }

    #[test]
    fn base_url_needs_scheme() {
        assert!(normalize_base_url("localhost:8000/api").is_err());
        assert_eq!(
            normalize_base_url(" https://shop.example/api// ").unwrap(),
            "https://shop.example/api"
        );
    }

    #[test]
    fn save_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 7\n").unwrap();

        save_base_url_to(&path, "http://127.0.0.1:9000/api").unwrap();
        let section = read_section(&path).unwrap();
        assert_eq!(section.base_url.as_deref(), Some("http://127.0.0.1:9000/api"));
        assert_eq!(section.timeout_secs, Some(7));

        let (config, sources) = ApiConfig::resolve(no_env, Some(&section)).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(sources.base_url, ConfigSource::ConfigFile);
    }
}
