use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:3003".into(), timeout_secs: default_timeout_secs() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { session_file: default_session_file() }
    }
}

fn default_timeout_secs() -> u64 { 30 }
fn default_session_file() -> String { "data/auth-session.json".into() }

/// Load the config file named by `CONFIG_PATH` (default `config.toml`).
/// A missing file yields the built-in defaults; a malformed file is an error.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.api.normalize_from_env();
        self.api.validate()?;
        if self.storage.session_file.trim().is_empty() {
            self.storage.session_file = default_session_file();
        }
        Ok(())
    }
}

impl ApiConfig {
    pub fn normalize_from_env(&mut self) {
        // The environment wins over the file (and over the built-in
        // default), so a deployment can repoint the backend without
        // editing config.toml.
        if let Ok(url) = std::env::var("BARBERDESK_API_URL") {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(anyhow!(
                "api.base_url is empty; set it in config.toml or via BARBERDESK_API_URL"
            ));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that normalize read BARBERDESK_API_URL; serialize them so the
    // env-override test cannot bleed into the others.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn defaults_are_valid() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:3003");
        assert_eq!(cfg.api.timeout_secs, 30);
        assert_eq!(cfg.storage.session_file, "data/auth-session.json");
    }

    #[test]
    fn env_url_overrides_the_configured_one() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("BARBERDESK_API_URL", "https://staging.example.com");
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate().unwrap();
        std::env::remove_var("BARBERDESK_API_URL");
        assert_eq!(cfg.api.base_url, "https://staging.example.com");
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "https://api.example.com");
        assert_eq!(cfg.api.timeout_secs, 30);
    }

    #[test]
    fn rejects_non_http_url() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "ftp://api.example.com".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let _guard = ENV_LOCK.lock().unwrap();
        let mut cfg = AppConfig::default();
        cfg.api.timeout_secs = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
