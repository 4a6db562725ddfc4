use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_BODY_MB: usize = 50;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_body_mb: usize,
    pub proxy_url: String,
    pub log_level: String,
    pub gemini: GeminiConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        // An empty key in .env counts as unset.
        let api_key = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());
        let model = lookup("GEMINI_MODEL").unwrap_or(defaults.model);
        let base_url = lookup("GEMINI_API_BASE").unwrap_or(defaults.base_url);

        GeminiConfig {
            api_key,
            model,
            base_url,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from("dist"),
            max_body_mb: DEFAULT_MAX_BODY_MB,
            proxy_url: format!("http://127.0.0.1:{}", DEFAULT_PORT),
            log_level: "info".to_string(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = lookup("PORT")
            .and_then(|port| port.parse().ok())
            .unwrap_or(defaults.port);
        let static_dir = lookup("FITROOM_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let max_body_mb = lookup("FITROOM_MAX_BODY_MB")
            .and_then(|mb| mb.parse().ok())
            .filter(|mb| *mb > 0)
            .unwrap_or(defaults.max_body_mb);
        let proxy_url = lookup("FITROOM_PROXY_URL").unwrap_or(defaults.proxy_url);
        let log_level = lookup("FITROOM_LOG_LEVEL").unwrap_or(defaults.log_level);

        Config {
            host,
            port,
            static_dir,
            max_body_mb,
            proxy_url,
            log_level,
            gemini: GeminiConfig::from_lookup(&lookup),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn with_proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = url.into();
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb * 1024 * 1024
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert_eq!(config.max_body_bytes(), 50 * 1024 * 1024);
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert!(!config.gemini.has_api_key());
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.5-flash-image"),
            ("FITROOM_MAX_BODY_MB", "10"),
            ("FITROOM_STATIC_DIR", "public"),
        ]));
        assert_eq!(config.port, 9000);
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini.model, "gemini-2.5-flash-image");
        assert_eq!(config.max_body_mb, 10);
        assert_eq!(config.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_blank_key_and_bad_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "not-a-port"),
            ("GEMINI_API_KEY", "   "),
            ("FITROOM_MAX_BODY_MB", "0"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.max_body_mb, DEFAULT_MAX_BODY_MB);
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .with_port(3000)
            .with_gemini(GeminiConfig::new().with_api_key("k").with_base_url("http://mock"));
        assert_eq!(config.bind_address(), ("0.0.0.0".to_string(), 3000));
        assert_eq!(config.gemini.base_url, "http://mock");
        assert!(config.gemini.has_api_key());
    }
}
