use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub timezone: Option<String>,
    pub location: Option<String>,
    pub hours: Option<u32>,
    /// Sea level measurement location; sea level scoring is off when unset
    pub sealevel: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub forecast: Option<ForecastConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from FISHCAST_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("FISHCAST_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        let cfg = if Path::new(&path).exists() {
            let s = fs::read_to_string(&path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Timezone for forecast timestamps (default Europe/Helsinki)
    pub fn timezone(&self) -> String {
        self.forecast
            .as_ref()
            .and_then(|f| f.timezone.clone())
            .unwrap_or_else(|| "Europe/Helsinki".to_string())
    }

    /// Forecast location (default Oulu)
    pub fn location(&self) -> String {
        self.forecast
            .as_ref()
            .and_then(|f| f.location.clone())
            .unwrap_or_else(|| "Oulu".to_string())
    }

    /// Forecast length in hours (default 48)
    pub fn hours(&self) -> u32 {
        self.forecast.as_ref().and_then(|f| f.hours).unwrap_or(48)
    }

    /// Sea level measurement location, when enabled
    pub fn sealevel(&self) -> Option<String> {
        self.forecast.as_ref().and_then(|f| f.sealevel.clone())
    }

    /// Get HTTP bind address (default 0.0.0.0:8080)
    pub fn http_bind(&self) -> String {
        self.http
            .as_ref()
            .and_then(|h| h.bind.clone())
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_is_8080() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.http_bind(), "0.0.0.0:8080");
    }

    #[test]
    fn defaults_match_the_oulu_baseline() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.timezone(), "Europe/Helsinki");
        assert_eq!(cfg.location(), "Oulu");
        assert_eq!(cfg.hours(), 48);
        assert_eq!(cfg.sealevel(), None);
    }

    #[test]
    fn toml_overrides_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [forecast]
            location = "Helsinki"
            hours = 24
            sealevel = "Helsinki"

            [http]
            bind = "127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.location(), "Helsinki");
        assert_eq!(cfg.hours(), 24);
        assert_eq!(cfg.sealevel(), Some("Helsinki".to_string()));
        assert_eq!(cfg.http_bind(), "127.0.0.1:9000");
        assert_eq!(cfg.timezone(), "Europe/Helsinki");
    }
}
