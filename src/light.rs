//! Light state and its wire representation.

use serde::{Deserialize, Serialize};

use crate::types::{Brightness, Kelvin};

/// The state of one lighting element on a Key Light device.
///
/// # Example
///
/// ```
/// use keylight_rs::{Brightness, Kelvin, Light};
///
/// let light = Light::new(true, Brightness::create(40).unwrap(), Kelvin::create(4500).unwrap());
/// assert!(light.on);
/// assert_eq!(light.brightness.value(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Light {
    pub on: bool,
    pub brightness: Brightness,
    pub temperature: Kelvin,
}

impl Light {
    pub fn new(on: bool, brightness: Brightness, temperature: Kelvin) -> Self {
        Light {
            on,
            brightness,
            temperature,
        }
    }
}

/// Body of `GET`/`PUT /elgato/lights`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LightsEnvelope {
    #[serde(default)]
    pub number_of_lights: usize,
    pub lights: Vec<WireLight>,
}

impl LightsEnvelope {
    pub fn from_lights(lights: &[Light]) -> Self {
        LightsEnvelope {
            number_of_lights: lights.len(),
            lights: lights.iter().map(WireLight::from).collect(),
        }
    }

    pub fn into_lights(self) -> Vec<Light> {
        self.lights.into_iter().map(Light::from).collect()
    }
}

/// A light as the firmware encodes it: integer power flag and mired temperature.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub(crate) struct WireLight {
    pub on: u8,
    pub brightness: u8,
    pub temperature: u16,
}

impl From<&Light> for WireLight {
    fn from(light: &Light) -> Self {
        WireLight {
            on: u8::from(light.on),
            brightness: light.brightness.value(),
            temperature: light.temperature.to_mired(),
        }
    }
}

impl From<WireLight> for Light {
    fn from(wire: WireLight) -> Self {
        Light {
            on: wire.on != 0,
            brightness: Brightness::raw(wire.brightness),
            temperature: Kelvin::from_mired(wire.temperature),
        }
    }
}
