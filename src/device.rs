//! Accessory identity.

use serde::{Deserialize, Serialize};

/// Accessory information reported by a Key Light.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub hardware_board_type: i64,
    #[serde(default)]
    pub firmware_build_number: i64,
    #[serde(default)]
    pub firmware_version: String,
    pub serial_number: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Device {
    /// The name to show for this device: its display name, or the serial
    /// number when no display name was assigned.
    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.serial_number
        } else {
            &self.display_name
        }
    }
}

/// Body of `PUT /elgato/accessory-info`.
///
/// The firmware only accepts the fields that may change.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessoryUpdate {
    pub display_name: Option<String>,
}
