// Configuration management
//
// Two layers: tool-level settings persisted as TOML, and the per-project
// config.json describing an AVR build project.

use crate::avrdude::HardwareConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Identifier marking a config.json as one of ours
const PROJECT_CONFIG_ID: &str = "atmel-project-config";

/// Project configuration file name
const PROJECT_CONFIG_FILE: &str = "config.json";

/// Tool-level default settings
///
/// Used when a project does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Default programmer id, if configured
    pub programmer: Option<String>,

    /// Default port
    pub port: String,

    /// Default bit clock period in microseconds
    pub bit_clock: String,

    /// Default CPU frequency in Hz
    pub default_frequency_hz: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            programmer: None,
            port: "usb".to_string(),
            bit_clock: "5".to_string(),
            default_frequency_hz: 16_000_000.0,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file or fall back to defaults
    ///
    /// If the file doesn't exist, a default settings file is written so the
    /// user has something to edit.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(&path).unwrap_or_else(|_| {
            let settings = Self::default();
            // Try to save the defaults, but don't fail if we can't
            let _ = settings.save(&path);
            settings
        })
    }

    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save settings to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}

/// Per-project configuration, the config.json at a project root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Must equal `atmel-project-config` for the directory to count as a project
    pub id: String,

    /// Project name
    pub project: String,

    /// Technical MCU name for the compiler (e.g. "attiny13")
    pub mcu: String,

    /// Part number for the programmer tool (e.g. "t13")
    pub partno: String,

    /// Clock frequency in Hz
    pub cpu_freq: u64,

    /// Programmer id
    pub programmer: String,

    #[serde(default)]
    pub port: Option<String>,

    // Older project files used lowercase casing for this key
    #[serde(default, rename = "bitClock", alias = "bitclock")]
    pub bit_clock: Option<String>,

    /// I/O header define for the device (e.g. "__AVR_ATtiny13__")
    #[serde(default)]
    pub io_def: Option<String>,
}

impl ProjectConfig {
    /// Load a project config from its JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save a project config to its JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }

    /// Whether `dir` contains a config.json with our project id
    pub fn is_project_dir<P: AsRef<Path>>(dir: P) -> bool {
        match Self::load(dir.as_ref().join(PROJECT_CONFIG_FILE)) {
            Ok(config) => config.id == PROJECT_CONFIG_ID,
            Err(_) => false,
        }
    }

    /// Preprocessor defines derived from the project configuration
    pub fn preprocessor_defines(&self) -> Vec<String> {
        let mut defines = Vec::new();
        if let Some(io_def) = &self.io_def {
            defines.push(io_def.clone());
        }
        defines.push(format!("F_CPU={}UL", self.cpu_freq));
        defines
    }

    /// The programmer hardware configuration this project implies
    pub fn hardware_config(&self) -> HardwareConfig {
        HardwareConfig {
            programmer: self.programmer.clone(),
            partno: self.partno.clone(),
            port: self.port.clone(),
            bit_clock: self.bit_clock.clone(),
        }
    }
}
