// src/config.rs
//! Configuration management

use crate::error::{GpsError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpsConfig {
    pub serial_port: Option<String>,
    pub serial_baudrate: u32,
}

impl Default for GpsConfig {
    fn default() -> Self {
        Self {
            serial_port: None,
            serial_baudrate: 9600,
        }
    }
}

impl GpsConfig {
    /// Load configuration from the config file, falling back to defaults
    /// if it does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&contents)?;

        Ok(config)
    }

    /// Save configuration to the config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the config file path
    fn get_config_path() -> Result<std::path::PathBuf> {
        use std::path::PathBuf;

        let home = std::env::var("HOME")
            .map_err(|_| GpsError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("gps-receiver")
            .join("config.json"))
    }

    /// Update serial port settings
    pub fn update_serial(&mut self, port: String, baudrate: u32) {
        self.serial_port = Some(port);
        self.serial_baudrate = baudrate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GpsConfig::default();
        assert_eq!(config.serial_port, None);
        assert_eq!(config.serial_baudrate, 9600);
    }

    #[test]
    fn test_update_serial() {
        let mut config = GpsConfig::default();
        config.update_serial("/dev/ttyUSB0".to_string(), 115200);
        assert_eq!(config.serial_port, Some("/dev/ttyUSB0".to_string()));
        assert_eq!(config.serial_baudrate, 115200);
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = GpsConfig::default();
        config.update_serial("/dev/ttyACM0".to_string(), 38400);

        let json = serde_json::to_string(&config).unwrap();
        let restored: GpsConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.serial_port, Some("/dev/ttyACM0".to_string()));
        assert_eq!(restored.serial_baudrate, 38400);
    }
}
