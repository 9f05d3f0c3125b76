// Common test utilities for the integration suites
//
// Provides a small device database in the shape the device JSON uses, so
// codec and command-synthesis tests run against realistic field tables.

#![allow(dead_code)]

use avrcalc::DeviceDatabase;

/// ATtiny13-flavored database snippet with one fully described LOW fuse
pub const DEVICE_DB_JSON: &str = r#"{
    "devices": [
        {
            "id": "attiny13",
            "name": "ATtiny13",
            "partno": "t13",
            "flash_bytes": 1024,
            "eeprom_bytes": 64,
            "fuses_detailed": [
                {
                    "name": "LOW",
                    "default": 106,
                    "bitfields": [
                        {
                            "name": "SPIEN",
                            "caption": "Serial programming enabled",
                            "mask": 128
                        },
                        {
                            "name": "EESAVE",
                            "caption": "Preserve EEPROM through chip erase",
                            "mask": 64
                        },
                        {
                            "name": "WDTON",
                            "caption": "Watchdog timer always on",
                            "mask": 32
                        },
                        {
                            "name": "CKDIV8",
                            "caption": "Divide clock by 8",
                            "mask": 16
                        },
                        {
                            "name": "SUT",
                            "caption": "Start-up time",
                            "mask": 12,
                            "values": [
                                { "value": 0, "label": "14CK" },
                                { "value": 4, "label": "14CK + 4 ms" },
                                { "value": 8, "label": "14CK + 64 ms" }
                            ]
                        },
                        {
                            "name": "CKSEL",
                            "caption": "Clock source select",
                            "mask": 3,
                            "values": [
                                { "value": 0, "label": "External clock" },
                                { "value": 1, "label": "Int. osc. 4.8 MHz" },
                                { "value": 2, "label": "Int. osc. 9.6 MHz" },
                                { "value": 3, "label": "Int. osc. 128 kHz" }
                            ]
                        }
                    ]
                },
                {
                    "name": "HIGH",
                    "default": 255,
                    "bitfields": [
                        {
                            "name": "SELFPRGEN",
                            "caption": "Self programming enabled",
                            "mask": 16
                        },
                        {
                            "name": "BODLEVEL",
                            "caption": "Brown-out detector trigger level",
                            "mask": 6,
                            "values": [
                                { "value": 6, "label": "BOD disabled" },
                                { "value": 4, "label": "1.8 V" },
                                { "value": 2, "label": "2.7 V" },
                                { "value": 0, "label": "4.3 V" }
                            ]
                        },
                        {
                            "name": "RSTDISBL",
                            "caption": "External reset disabled",
                            "mask": 1
                        }
                    ]
                }
            ]
        }
    ]
}"#;

/// Parse the shared database snippet
pub fn load_database() -> DeviceDatabase {
    DeviceDatabase::from_json(DEVICE_DB_JSON).expect("test database must parse")
}
