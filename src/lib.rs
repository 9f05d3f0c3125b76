// avrcalc - AVR fuse and timer configuration calculator
// Core computation (fuse codec, timer solver) plus the data plumbing
// around it (device database, avrdude command synthesis, configuration)

// Public modules
pub mod avrdude;
pub mod config;
pub mod device;
pub mod fuse;
pub mod logger;
pub mod timer;

// Re-export main types for convenience
pub use avrdude::{parse_read_output, AvrdudeError, FuseChannel, HardwareConfig};
pub use config::{ProjectConfig, Settings};
pub use device::{format_bytes, Device, DeviceDatabase, DeviceError};
pub use fuse::{Bitfield, DecodedField, EnumMember, FieldSetting, FuseError, Register};
pub use logger::{LogLevel, Logger};
pub use timer::{
    ctc_snippet, CounterWidth, Prescaler, PrescalerResult, TimerError, TimerRequest,
    INFEASIBLE_NOTE,
};
