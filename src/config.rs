use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::site::{BoundViolation, CalculationRequest, FormDefaults, INPUT_BOUNDS, Locale};

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_map_zoom() -> u8 {
    16
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub defaults: InputDefaults,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served as fallback (front-end assets). Nothing is served when unset.
    #[serde(default)]
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. "info" or "solarmap=debug,tower_http=info"
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Values the form starts with.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct InputDefaults {
    pub latitude: f64,
    pub longitude: f64,
    pub available_area_m2: f64,
    pub panel_area_m2: f64,
    pub panel_wattage_w: f64,
}

impl Default for InputDefaults {
    fn default() -> Self {
        // Belo Horizonte, a 30 m² roof and a common 450 W module
        Self {
            latitude: -19.9,
            longitude: -43.9,
            available_area_m2: 30.0,
            panel_area_m2: 1.7,
            panel_wattage_w: 450.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct MapConfig {
    #[serde(default = "default_map_zoom")]
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            zoom: default_map_zoom(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid form default: {0}")]
    InvalidDefault(#[from] BoundViolation),
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.defaults_request().validate()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }

    fn defaults_request(&self) -> CalculationRequest {
        let d = &self.defaults;
        CalculationRequest {
            latitude: d.latitude,
            longitude: d.longitude,
            available_area_m2: d.available_area_m2,
            panel_area_m2: d.panel_area_m2,
            panel_wattage_w: d.panel_wattage_w,
            locale: Some(self.locale),
        }
    }

    pub fn form_defaults(&self) -> FormDefaults {
        let d = &self.defaults;
        FormDefaults {
            latitude: d.latitude,
            longitude: d.longitude,
            available_area_m2: d.available_area_m2,
            panel_area_m2: d.panel_area_m2,
            panel_wattage_w: d.panel_wattage_w,
            locale: self.locale,
            map_zoom: self.map.zoom,
            bounds: INPUT_BOUNDS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "server": { "bind": "127.0.0.1", "port": 3000, "static_dir": "static" },
            "logging": { "level": "debug", "format": "json" },
            "defaults": { "latitude": -23.5, "longitude": -46.6, "available_area_m2": 50.0,
                          "panel_area_m2": 2.0, "panel_wattage_w": 550.0 },
            "map": { "zoom": 12 },
            "locale": "pt-BR"
        }"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.server.static_dir.as_deref(), Some("static"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.defaults.panel_wattage_w, 550.0);
        assert_eq!(config.map.zoom, 12);
        assert_eq!(config.locale, Locale::PtBr);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults, InputDefaults::default());
        assert_eq!(config.map.zoom, 16);
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_partial_defaults_section() {
        let config = Config::from_json(r#"{ "defaults": { "available_area_m2": 12.0 } }"#).unwrap();
        assert_eq!(config.defaults.available_area_m2, 12.0);
        assert_eq!(config.defaults.panel_area_m2, 1.7);
    }

    #[test]
    fn test_out_of_range_default_rejected() {
        let err = Config::from_json(r#"{ "defaults": { "latitude": 123.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDefault(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "server": {{ "port": 9090 }} }}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Config::load("/nonexistent/solarmap.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_form_defaults_expose_bounds() {
        let form = Config::default().form_defaults();
        assert_eq!(form.bounds.len(), 5);
        assert_eq!(form.map_zoom, 16);
        assert_eq!(form.latitude, -19.9);
    }
}
