//! Fuse codec unit tests
//!
//! Shared register fixtures plus decode/encode test modules.

use super::*;

// ========================================
// Test Fixtures
// ========================================

/// Low-fuse style register whose enum fields declare every bit pattern of
/// their masks, so any byte decodes to declared values only.
pub(crate) fn clock_register() -> Register {
    let cksel = (0u8..16)
        .map(|v| EnumMember {
            value: v,
            label: format!("Clock source {}", v),
        })
        .collect();
    let sut = (0u8..4)
        .map(|v| EnumMember {
            value: v << 4,
            label: format!("Start-up time {}", v),
        })
        .collect();

    Register {
        name: "LOW".to_string(),
        default_value: 0x62,
        bitfields: vec![
            Bitfield {
                name: "CKSEL".to_string(),
                caption: Some("Clock source select".to_string()),
                mask: 0x0F,
                values: cksel,
            },
            Bitfield {
                name: "SUT".to_string(),
                caption: None,
                mask: 0x30,
                values: sut,
            },
            Bitfield {
                name: "CKOUT".to_string(),
                caption: Some("Clock output on CKOUT pin".to_string()),
                mask: 0x40,
                values: vec![],
            },
            Bitfield {
                name: "CKDIV8".to_string(),
                caption: Some("Divide clock by 8".to_string()),
                mask: 0x80,
                values: vec![],
            },
        ],
    }
}

/// High-fuse style register with a partially declared enum field, leaving
/// reserved bit combinations undeclared.
pub(crate) fn brownout_register() -> Register {
    Register {
        name: "HIGH".to_string(),
        default_value: 0xD9,
        bitfields: vec![
            Bitfield {
                name: "BODLEVEL".to_string(),
                caption: Some("Brown-out detector trigger level".to_string()),
                mask: 0x07,
                values: vec![
                    EnumMember {
                        value: 0x07,
                        label: "BOD disabled".to_string(),
                    },
                    EnumMember {
                        value: 0x06,
                        label: "1.8 V".to_string(),
                    },
                    EnumMember {
                        value: 0x05,
                        label: "2.7 V".to_string(),
                    },
                ],
            },
            Bitfield {
                name: "EESAVE".to_string(),
                caption: Some("Preserve EEPROM through chip erase".to_string()),
                mask: 0x08,
                values: vec![],
            },
            Bitfield {
                name: "SPIEN".to_string(),
                caption: Some("Serial programming enabled".to_string()),
                mask: 0x20,
                values: vec![],
            },
        ],
    }
}

// ========================================
// Test Modules
// ========================================
