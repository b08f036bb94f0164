use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "csvwerk.toml";
pub const CONFIG_PATH_VAR: &str = "CSVWERK_CONFIG";
pub const ENV_PREFIX: &str = "CSVWERK_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub csv_delimiter: char,
    pub csv_suffix: String,
    pub xlsx_suffix: String,
    pub sheet_name: String,
    /// Stem used when the upload name has none
    pub fallback_stem: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_delimiter: ';',
            csv_suffix: "_semicolon.csv".to_string(),
            xlsx_suffix: "_de.xlsx".to_string(),
            sheet_name: "Daten".to_string(),
            fallback_stem: "bearbeitete_daten".to_string(),
        }
    }
}

impl ExportConfig {
    /// The CSV field separator as a byte, rejecting non-ASCII, quote and line breaks
    pub fn csv_delimiter_byte(&self) -> Result<u8> {
        let delimiter = self.csv_delimiter;
        match u8::try_from(delimiter) {
            Ok(b) if b.is_ascii() && !matches!(b, b'"' | b'\n' | b'\r') => Ok(b),
            _ => Err(AppError::ConfigError(format!(
                "export.csv_delimiter '{}' is not usable as a field separator",
                delimiter.escape_default()
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log_filter: String,
    pub log_capacity: usize,
    pub preview_rows: usize,
    pub export: ExportConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            log_filter: "info".to_string(),
            log_capacity: 100,
            preview_rows: 50,
            export: ExportConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `csvwerk.toml` (or `$CSVWERK_CONFIG`), then `CSVWERK_*` variables
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE));
        Self::from_figment(Self::figment(path))
    }

    pub fn figment(path: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::ConfigError("server.port must be > 0".to_string()));
        }
        if self.preview_rows == 0 {
            return Err(AppError::ConfigError("preview_rows must be > 0".to_string()));
        }
        if self.log_capacity == 0 {
            return Err(AppError::ConfigError("log_capacity must be > 0".to_string()));
        }
        let sheet = self.export.sheet_name.trim();
        if sheet.is_empty() || sheet.chars().count() > 31 {
            return Err(AppError::ConfigError(
                "export.sheet_name must be 1 to 31 characters".to_string(),
            ));
        }
        self.export.csv_delimiter_byte()?;
        Ok(())
    }
}
