//! Run configuration and provider credentials.
//!
//! The configuration is built once at startup, from built-in defaults
//! optionally overlaid with a TOML file, and is never mutated afterwards.

use crate::error::{ConfigError, CoreError};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "TRENDSEED_CONFIG";

/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "trendseed.toml";

pub const DEFAULT_GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DEFAULT_OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

const DEFAULT_SEED_KEYWORDS: [&str; 7] = [
    "IT 트렌드",
    "AI 신기술",
    "헬스케어",
    "MZ세대 유행",
    "국내여행 추천",
    "재테크 방법",
    "최신 영화 리뷰",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordConfig {
    /// Name of the environment variable holding the Gemini key.
    pub gemini_key_var: String,
    /// Name of the environment variable holding the OpenAI key.
    pub openai_key_var: String,
    pub seed_keywords: Vec<String>,
    pub keyword_count: u32,
    pub output_path: PathBuf,
    pub gemini_model: String,
    pub openai_model: String,
    pub gemini_base_url: String,
    pub openai_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            gemini_key_var: DEFAULT_GEMINI_KEY_VAR.to_string(),
            openai_key_var: DEFAULT_OPENAI_KEY_VAR.to_string(),
            seed_keywords: DEFAULT_SEED_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            keyword_count: 30,
            output_path: PathBuf::from("keywords.json"),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl KeywordConfig {
    /// The file named by `TRENDSEED_CONFIG`, if set.
    pub fn path_from_env() -> Option<PathBuf> {
        env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Loads the configuration for this process.
    ///
    /// An explicit path (usually from `TRENDSEED_CONFIG`) must exist.
    /// Without one, `trendseed.toml` in the working directory is used if
    /// present, otherwise the built-in defaults.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, CoreError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    debug!("No configuration file found, using built-in defaults");
                    let config = Self::default();
                    config.validate()?;
                    Ok(config)
                }
            }
        }
    }

    /// Output path to use when the configuration could not be loaded.
    ///
    /// Takes `output_path` from the config file when that key alone still
    /// parses to a non-empty path, otherwise the built-in default.
    pub fn fallback_output_path(explicit: Option<&Path>) -> PathBuf {
        #[derive(Deserialize)]
        struct OutputOnly {
            output_path: Option<PathBuf>,
        }

        let source = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        source
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|raw| toml::from_str::<OutputOnly>(&raw).ok())
            .and_then(|partial| partial.output_path)
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| Self::default().output_path)
    }

    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        info!("Loading configuration from {}", path.display());
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CoreError> {
        let config: Self = toml::from_str(raw).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keyword_count == 0 {
            return Err(invalid("keyword_count", "0"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(invalid("output_path", ""));
        }
        if self.gemini_key_var.trim().is_empty() {
            return Err(invalid("gemini_key_var", &self.gemini_key_var));
        }
        if self.openai_key_var.trim().is_empty() {
            return Err(invalid("openai_key_var", &self.openai_key_var));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "0"));
        }
        validate_base_url("gemini_base_url", &self.gemini_base_url)?;
        validate_base_url("openai_base_url", &self.openai_base_url)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn invalid(field: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(invalid(field, value)),
    }
}

/// API keys found in the environment. Blank values count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    checked: Vec<String>,
}

impl Credentials {
    pub fn from_lookup<F>(config: &KeywordConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            gemini_api_key: read(&config.gemini_key_var),
            openai_api_key: read(&config.openai_key_var),
            checked: vec![config.gemini_key_var.clone(), config.openai_key_var.clone()],
        }
    }

    /// Error for the case where neither key is set.
    pub fn missing_error(&self) -> ConfigError {
        let checked = if self.checked.is_empty() {
            format!("{}, {}", DEFAULT_GEMINI_KEY_VAR, DEFAULT_OPENAI_KEY_VAR)
        } else {
            self.checked.join(", ")
        };
        ConfigError::NoApiKey { checked }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("gemini_api_key", &mask(&self.gemini_api_key))
            .field("openai_api_key", &mask(&self.openai_api_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = KeywordConfig::default();
        assert_eq!(config.gemini_key_var, "GEMINI_API_KEY");
        assert_eq!(config.openai_key_var, "OPENAI_API_KEY");
        assert_eq!(config.keyword_count, 30);
        assert_eq!(config.output_path, PathBuf::from("keywords.json"));
        assert_eq!(config.seed_keywords.len(), 7);
        assert_eq!(config.seed_keywords[0], "IT 트렌드");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = KeywordConfig::from_toml_str(
            r#"
            seed_keywords = ["캠핑", "전기차"]
            keyword_count = 10
            output_path = "out/trends.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.seed_keywords, vec!["캠핑", "전기차"]);
        assert_eq!(config.keyword_count, 10);
        assert_eq!(config.output_path, PathBuf::from("out/trends.json"));
        assert_eq!(config.openai_model, DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = KeywordConfig::from_toml_str("keyword_cnt = 5");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let result = KeywordConfig::from_toml_str("keyword_count = 0");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { ref field, .. })) if field == "keyword_count"
        ));

        let result = KeywordConfig::from_toml_str(r#"openai_base_url = "ftp://example.com""#);
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidValue { ref field, .. })) if field == "openai_base_url"
        ));
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trendseed.toml");
        fs::write(&path, "keyword_count = 12\n").unwrap();

        let config = KeywordConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.keyword_count, 12);

        let missing = dir.path().join("missing.toml");
        let result = KeywordConfig::load_from(Some(&missing));
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_fallback_output_path() {
        let dir = tempfile::tempdir().unwrap();

        let invalid = dir.path().join("invalid.toml");
        fs::write(&invalid, "keyword_count = 0\noutput_path = \"out/trends.json\"\n").unwrap();
        assert_eq!(
            KeywordConfig::fallback_output_path(Some(&invalid)),
            PathBuf::from("out/trends.json")
        );

        let empty_output = dir.path().join("empty.toml");
        fs::write(&empty_output, "output_path = \"\"\n").unwrap();
        assert_eq!(
            KeywordConfig::fallback_output_path(Some(&empty_output)),
            PathBuf::from("keywords.json")
        );

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "output_path = [\n").unwrap();
        assert_eq!(
            KeywordConfig::fallback_output_path(Some(&broken)),
            PathBuf::from("keywords.json")
        );

        let missing = dir.path().join("missing.toml");
        assert_eq!(
            KeywordConfig::fallback_output_path(Some(&missing)),
            PathBuf::from("keywords.json")
        );
    }

    #[test]
    fn test_credentials_lookup() {
        let config = KeywordConfig::default();
        let creds = Credentials::from_lookup(
            &config,
            lookup_from(&[("GEMINI_API_KEY", "g-key"), ("OPENAI_API_KEY", "o-key")]),
        );
        assert_eq!(creds.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(creds.openai_api_key.as_deref(), Some("o-key"));
    }

    #[test]
    fn test_blank_credentials_count_as_absent() {
        let config = KeywordConfig::default();
        let creds = Credentials::from_lookup(
            &config,
            lookup_from(&[("GEMINI_API_KEY", ""), ("OPENAI_API_KEY", "  ")]),
        );
        assert_eq!(creds.gemini_api_key, None);
        assert_eq!(creds.openai_api_key, None);

        let message = creds.missing_error().to_string();
        assert!(message.contains("No API key configured"));
        assert!(message.contains("GEMINI_API_KEY"));
        assert!(message.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_custom_variable_names() {
        let config = KeywordConfig {
            openai_key_var: "MY_OPENAI".to_string(),
            ..KeywordConfig::default()
        };
        let creds = Credentials::from_lookup(&config, lookup_from(&[("MY_OPENAI", "o-key")]));
        assert_eq!(creds.openai_api_key.as_deref(), Some("o-key"));
        assert!(creds.missing_error().to_string().contains("MY_OPENAI"));
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let config = KeywordConfig::default();
        let creds = Credentials::from_lookup(&config, lookup_from(&[("GEMINI_API_KEY", "secret")]));
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
