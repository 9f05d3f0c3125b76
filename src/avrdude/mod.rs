// Avrdude module - command synthesis for the external programmer tool
//
// Builds the avrdude command lines used to read and write fuse bytes and
// parses the hex output of a fuse read. Pure string work; spawning the
// actual process is the adapter's job, never done here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logical fuse channels and their avrdude memory names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FuseChannel {
    Low,
    High,
    Extended,
    Lockbit,
}

impl FuseChannel {
    /// Map a register channel name from the device database
    pub fn from_register_name(name: &str) -> Option<Self> {
        match name {
            "LOW" => Some(FuseChannel::Low),
            "HIGH" => Some(FuseChannel::High),
            "EXTENDED" => Some(FuseChannel::Extended),
            "LOCKBIT" => Some(FuseChannel::Lockbit),
            _ => None,
        }
    }

    /// The avrdude `-U` memory name
    pub fn memory_name(self) -> &'static str {
        match self {
            FuseChannel::Low => "lfuse",
            FuseChannel::High => "hfuse",
            FuseChannel::Extended => "efuse",
            FuseChannel::Lockbit => "lock",
        }
    }
}

/// Errors for command synthesis and read-output parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvrdudeError {
    /// A write command was requested without any mappable fuse values
    EmptyWriteSet,

    /// The programmer tool printed something that is not a hex byte
    UnparseableOutput(String),
}

impl std::fmt::Display for AvrdudeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvrdudeError::EmptyWriteSet => write!(f, "No fuse values provided to write"),
            AvrdudeError::UnparseableOutput(text) => {
                write!(f, "Invalid read output: \"{}\"", text)
            }
        }
    }
}

impl std::error::Error for AvrdudeError {}

/// Programmer hardware configuration shared by all commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// Programmer id (avrdude `-c`)
    pub programmer: String,

    /// Part number (avrdude `-p`)
    pub partno: String,

    /// Port (avrdude `-P`), e.g. "usb", "COM3", "/dev/ttyUSB0"
    #[serde(default)]
    pub port: Option<String>,

    /// Bit clock period in microseconds (avrdude `-B`)
    #[serde(default)]
    pub bit_clock: Option<String>,
}

impl HardwareConfig {
    /// The common hardware argument block: `-p -c` plus `-P`/`-B` when set
    ///
    /// Blank port or bit-clock strings are treated as unset.
    pub fn hardware_args(&self) -> Vec<String> {
        let mut args = vec![
            "-p".to_string(),
            self.partno.clone(),
            "-c".to_string(),
            self.programmer.clone(),
        ];

        if let Some(port) = self.port.as_deref() {
            if !port.trim().is_empty() {
                args.push("-P".to_string());
                args.push(port.to_string());
            }
        }

        if let Some(clock) = self.bit_clock.as_deref() {
            let clock = clock.trim();
            if !clock.is_empty() {
                args.push("-B".to_string());
                args.push(clock.to_string());
            }
        }

        args
    }

    /// Command reading one fuse channel as hex to stdout
    pub fn read_command(&self, channel: FuseChannel) -> String {
        format!(
            "avrdude {} -U {}:r:-:h",
            self.hardware_args().join(" "),
            channel.memory_name()
        )
    }

    /// Command writing the given fuse bytes, keyed by register channel name
    ///
    /// Names that map to no fuse channel are skipped; with `dry_run` the
    /// `-n` flag is added so avrdude simulates without touching the chip.
    ///
    /// # Errors
    /// Returns `AvrdudeError::EmptyWriteSet` when no value maps to a channel.
    pub fn write_command(
        &self,
        values: &BTreeMap<String, u8>,
        dry_run: bool,
    ) -> Result<String, AvrdudeError> {
        let mut operations = Vec::new();
        for (name, value) in values {
            if let Some(channel) = FuseChannel::from_register_name(name) {
                operations.push(format!(
                    "-U {}:w:0x{:02X}:m",
                    channel.memory_name(),
                    value
                ));
            }
        }

        if operations.is_empty() {
            return Err(AvrdudeError::EmptyWriteSet);
        }

        let mut cmd = format!("avrdude {}", self.hardware_args().join(" "));
        if dry_run {
            cmd.push_str(" -n");
        }
        for op in operations {
            cmd.push(' ');
            cmd.push_str(&op);
        }

        Ok(cmd)
    }
}

/// Parse the hex byte avrdude prints for a `-U <fuse>:r:-:h` read
pub fn parse_read_output(output: &str) -> Result<u8, AvrdudeError> {
    let clean = output.trim();
    let digits = clean
        .strip_prefix("0x")
        .or_else(|| clean.strip_prefix("0X"))
        .unwrap_or(clean);

    u8::from_str_radix(digits, 16)
        .map_err(|_| AvrdudeError::UnparseableOutput(clean.to_string()))
}
