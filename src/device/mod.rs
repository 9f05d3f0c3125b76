// Device module - static device description database
//
// Serde model of the device database JSON. The core components treat this
// as read-only input; nothing here is cached or mutated after loading.

use crate::fuse::Register;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while loading the device database
#[derive(Debug)]
pub enum DeviceError {
    /// I/O error
    Io(io::Error),

    /// JSON parse error
    Parse(serde_json::Error),
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceError::Io(e) => write!(f, "I/O error: {}", e),
            DeviceError::Parse(e) => write!(f, "Device database parse error: {}", e),
        }
    }
}

impl std::error::Error for DeviceError {}

impl From<io::Error> for DeviceError {
    fn from(e: io::Error) -> Self {
        DeviceError::Io(e)
    }
}

impl From<serde_json::Error> for DeviceError {
    fn from(e: serde_json::Error) -> Self {
        DeviceError::Parse(e)
    }
}

/// A single device entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Database identifier
    pub id: String,

    /// Display name (e.g. "ATmega328P")
    pub name: String,

    /// Part number for the programmer tool (e.g. "m328p")
    pub partno: String,

    /// Flash size in bytes
    pub flash_bytes: u64,

    /// EEPROM size in bytes, if the device has one
    #[serde(default)]
    pub eeprom_bytes: Option<u64>,

    /// Fuse register tables feeding the codec
    #[serde(default)]
    pub fuses_detailed: Vec<Register>,
}

impl Device {
    /// One-line memory summary for device listings
    pub fn summary(&self) -> String {
        format!(
            "Flash: {}, EEPROM: {}",
            format_bytes(self.flash_bytes),
            format_bytes(self.eeprom_bytes.unwrap_or(0))
        )
    }

    /// The fuse register with the given channel name, if declared
    pub fn fuse_register(&self, name: &str) -> Option<&Register> {
        self.fuses_detailed.iter().find(|r| r.name == name)
    }
}

/// The full device database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDatabase {
    pub devices: Vec<Device>,
}

impl DeviceDatabase {
    /// Parse a database from JSON text
    pub fn from_json(text: &str) -> Result<Self, DeviceError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a database from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DeviceError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Devices sorted by display name, the order used for listings
    pub fn sorted_by_name(&self) -> Vec<&Device> {
        let mut devices: Vec<&Device> = self.devices.iter().collect();
        devices.sort_by(|a, b| a.name.cmp(&b.name));
        devices
    }

    /// Find a device by display name or part number, case-insensitively
    pub fn find(&self, needle: &str) -> Option<&Device> {
        self.devices.iter().find(|d| {
            d.name.eq_ignore_ascii_case(needle) || d.partno.eq_ignore_ascii_case(needle)
        })
    }
}

/// Human-readable byte count for device listings
pub fn format_bytes(value: u64) -> String {
    if value >= 1024 {
        format!("{} KB", value as f64 / 1024.0)
    } else {
        format!("{} Byte", value)
    }
}
