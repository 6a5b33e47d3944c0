use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_HEALTH_POLL_SECS: u64 = 60;
const DEFAULT_MAP_REFRESH_SECS: u64 = 600;
const MIN_INTERVAL_SECS: u64 = 5;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn log_level(self) -> tracing::Level {
        match self {
            Self::Dev => tracing::Level::INFO,
            Self::Prod => tracing::Level::WARN,
        }
    }

    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub map_access_token: Option<String>,
    pub profile: AppProfile,
    pub health_poll_interval: Duration,
    pub map_refresh_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            map_access_token: None,
            profile: AppProfile::Dev,
            health_poll_interval: Duration::from_secs(DEFAULT_HEALTH_POLL_SECS),
            map_refresh_interval: Duration::from_secs(DEFAULT_MAP_REFRESH_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        Self::from_lookup(read_env)
    }

    /// Builds a config from an arbitrary key lookup; `from_env` plugs in the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("GRIEVANCE_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().to_string();
        }

        if let Some(token) = lookup("GRIEVANCE_MAP_TOKEN").filter(|v| !v.trim().is_empty()) {
            config.map_access_token = Some(token.trim().to_string());
        }

        config.profile = AppProfile::from_env(lookup("GRIEVANCE_PROFILE"));

        if let Some(secs) = lookup("GRIEVANCE_HEALTH_POLL_SECS").and_then(|v| v.parse::<u64>().ok())
        {
            config.health_poll_interval = Duration::from_secs(secs.max(MIN_INTERVAL_SECS));
        }

        if let Some(secs) = lookup("GRIEVANCE_MAP_REFRESH_SECS").and_then(|v| v.parse::<u64>().ok())
        {
            config.map_refresh_interval = Duration::from_secs(secs.max(MIN_INTERVAL_SECS));
        }

        config
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// The health endpoint lives beside the API root, not under it.
    pub fn health_url(&self) -> String {
        let base = self.base_url();
        let root = base.strip_suffix("/api").unwrap_or(base);
        format!("{root}/health")
    }

    pub fn upload_url(&self, filename: &str) -> String {
        format!("{}/uploads/{}", self.base_url(), filename.trim_start_matches('/'))
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "GRIEVANCE_API_BASE_URL" => option_env!("GRIEVANCE_API_BASE_URL"),
        "GRIEVANCE_MAP_TOKEN" => option_env!("GRIEVANCE_MAP_TOKEN"),
        "GRIEVANCE_PROFILE" => option_env!("GRIEVANCE_PROFILE"),
        "GRIEVANCE_HEALTH_POLL_SECS" => option_env!("GRIEVANCE_HEALTH_POLL_SECS"),
        "GRIEVANCE_MAP_REFRESH_SECS" => option_env!("GRIEVANCE_MAP_REFRESH_SECS"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}

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
    fn defaults_point_at_local_backend() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.health_poll_interval, Duration::from_secs(60));
        assert_eq!(config.map_refresh_interval, Duration::from_secs(600));
        assert_eq!(config.profile, AppProfile::Dev);
        assert!(config.map_access_token.is_none());
    }

    #[test]
    fn overrides_are_read_and_intervals_clamped() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GRIEVANCE_API_BASE_URL", "https://grievance.example.org/api/"),
            ("GRIEVANCE_MAP_TOKEN", " pk.test "),
            ("GRIEVANCE_PROFILE", "prod"),
            ("GRIEVANCE_HEALTH_POLL_SECS", "1"),
            ("GRIEVANCE_MAP_REFRESH_SECS", "120"),
        ]));
        assert_eq!(config.base_url(), "https://grievance.example.org/api");
        assert_eq!(config.map_access_token.as_deref(), Some("pk.test"));
        assert_eq!(config.profile, AppProfile::Prod);
        assert_eq!(config.health_poll_interval, Duration::from_secs(5));
        assert_eq!(config.map_refresh_interval, Duration::from_secs(120));
    }

    #[test]
    fn health_url_drops_api_segment() {
        let config = AppConfig::default();
        assert_eq!(config.health_url(), "http://localhost:8000/health");

        let custom = AppConfig {
            api_base_url: "https://host/v2/".into(),
            ..AppConfig::default()
        };
        assert_eq!(custom.health_url(), "https://host/v2/health");
    }

    #[test]
    fn upload_url_joins_filename() {
        let config = AppConfig::default();
        assert_eq!(
            config.upload_url("abc123.jpg"),
            "http://localhost:8000/api/uploads/abc123.jpg"
        );
    }
}
