// Fuse module - register model and byte codec
//
// Maps a byte-wide fuse register to named bitfields and back. The field
// tables come from the static device database and are never mutated here;
// the codec only applies masks mechanically.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// A single `{value, label}` member of an enumerated bitfield
///
/// `value` is pre-masked to the field's bit positions by the device database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Raw bits within the register byte
    pub value: u8,

    /// Display label (e.g. a clock source description)
    pub label: String,
}

/// A named subset of bits within a fuse register
///
/// A field with declared `values` is enumerated. A field without any is a
/// "programmed" flag: the hardware convention is inverted polarity, so the
/// flag is active exactly when all masked bits read 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bitfield {
    /// Identifier, unique within its register
    pub name: String,

    /// Optional human-readable caption from the device database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// The set bits this field occupies within the register byte
    pub mask: u8,

    /// Declared enum members; empty for flag fields
    #[serde(default)]
    pub values: Vec<EnumMember>,
}

impl Bitfield {
    /// Whether this field carries an enumerated value set
    pub fn is_enum(&self) -> bool {
        !self.values.is_empty()
    }

    /// Look up the label of the declared member matching `bits`, if any
    pub fn label_for(&self, bits: u8) -> Option<&str> {
        self.values
            .iter()
            .find(|m| m.value == bits)
            .map(|m| m.label.as_str())
    }

    /// Caption if present, otherwise the identifier
    pub fn display_name(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.name)
    }
}

/// A byte-wide fuse register with its unprogrammed default and field table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Register {
    /// Logical fuse channel name (e.g. "LOW", "HIGH")
    pub name: String,

    /// Unprogrammed baseline used when fields are combined
    #[serde(rename = "default")]
    pub default_value: u8,

    /// Field table; masks are disjoint by data contract
    pub bitfields: Vec<Bitfield>,
}

/// Decoded state of a single bitfield
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DecodedField {
    /// Enumerated selection. `label` is `None` when the extracted bits match
    /// no declared member; the raw bits are always surfaced so unknown
    /// combinations (e.g. reserved patterns) are never dropped.
    Enum { bits: u8, label: Option<String> },

    /// Programmed flag; `true` when the masked bits are all zero
    Programmed(bool),
}

/// Desired state of a single bitfield when encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSetting {
    /// Raw bits for an enumerated field (must be a declared member value)
    Bits(u8),

    /// Flag state; `true` writes 0 into the masked bits, `false` writes the mask
    Programmed(bool),
}

impl From<&DecodedField> for FieldSetting {
    fn from(decoded: &DecodedField) -> Self {
        match decoded {
            DecodedField::Enum { bits, .. } => FieldSetting::Bits(*bits),
            DecodedField::Programmed(active) => FieldSetting::Programmed(*active),
        }
    }
}

/// Errors that can occur while encoding a register byte
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FuseError {
    /// An enumerated field was given bits outside its declared value set
    InvalidFieldValue { field: String, value: u8 },
}

impl std::fmt::Display for FuseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FuseError::InvalidFieldValue { field, value } => {
                write!(
                    f,
                    "Value 0x{:02X} is not declared for field '{}'",
                    value, field
                )
            }
        }
    }
}

impl std::error::Error for FuseError {}

impl Register {
    /// Decode a register byte into per-field values
    ///
    /// Never fails: enumerated bits that match no declared member are
    /// surfaced with `label: None`, and flag fields report `true` when their
    /// masked bits are all zero (an un-programmed fuse bit reads as 1, a
    /// programmed one as 0).
    pub fn decode(&self, byte: u8) -> BTreeMap<String, DecodedField> {
        let mut decoded = BTreeMap::new();

        for field in &self.bitfields {
            let bits = byte & field.mask;

            let value = if field.is_enum() {
                DecodedField::Enum {
                    bits,
                    label: field.label_for(bits).map(String::from),
                }
            } else {
                DecodedField::Programmed(bits == 0)
            };

            decoded.insert(field.name.clone(), value);
        }

        decoded
    }

    /// Encode field settings into a register byte, starting from the
    /// register's own default value
    ///
    /// # Errors
    /// Returns `FuseError::InvalidFieldValue` if an enumerated field is given
    /// bits outside its declared member set.
    pub fn encode(&self, settings: &BTreeMap<String, FieldSetting>) -> Result<u8, FuseError> {
        self.encode_with_default(self.default_value, settings)
    }

    /// Encode field settings into a register byte, starting from `default`
    ///
    /// For each field present in `settings` the field's mask bits are cleared
    /// and the desired bits are or-ed in. Fields absent from `settings` keep
    /// whatever bits the default contributed, as do bits not covered by any
    /// field. Field masks are disjoint by data contract, so traversal order
    /// does not affect the result.
    pub fn encode_with_default(
        &self,
        default: u8,
        settings: &BTreeMap<String, FieldSetting>,
    ) -> Result<u8, FuseError> {
        let mut byte = default;

        for field in &self.bitfields {
            let Some(setting) = settings.get(&field.name) else {
                continue;
            };

            let desired = match setting {
                FieldSetting::Bits(v) => *v,
                FieldSetting::Programmed(true) => 0,
                FieldSetting::Programmed(false) => field.mask,
            };

            if field.is_enum() && field.label_for(desired).is_none() {
                return Err(FuseError::InvalidFieldValue {
                    field: field.name.clone(),
                    value: desired,
                });
            }

            byte &= !field.mask;
            byte |= desired & field.mask;
        }

        Ok(byte)
    }

    /// Fields sorted by descending mask, the order used for presentation
    ///
    /// Display order only; decode and encode do not depend on it.
    pub fn sorted_fields(&self) -> Vec<&Bitfield> {
        let mut fields: Vec<&Bitfield> = self.bitfields.iter().collect();
        fields.sort_by(|a, b| b.mask.cmp(&a.mask));
        fields
    }
}
