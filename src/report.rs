//! Textual report of a device and its lights.

use std::fmt;

use crate::device::Device;
use crate::light::Light;

/// The outcome of a command run: the device and the state of its lights.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    device: Device,
    lights: Vec<Light>,
    written: bool,
}

impl Report {
    pub fn new(device: Device, lights: Vec<Light>, written: bool) -> Self {
        Report {
            device,
            lights,
            written,
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Whether the lights were written back to the device.
    pub fn written(&self) -> bool {
        self.written
    }

    /// One line per light, in device order.
    ///
    /// ```
    /// use keylight_rs::{Brightness, Device, Kelvin, Light, Report};
    ///
    /// let device = Device { serial_number: "CW19K1A01234".into(), ..Default::default() };
    /// let lights = vec![
    ///     Light::new(true, Brightness::create(40).unwrap(), Kelvin::create(4500).unwrap()),
    ///     Light::new(false, Brightness::create(40).unwrap(), Kelvin::create(4500).unwrap()),
    /// ];
    /// let report = Report::new(device, lights, false);
    /// assert_eq!(
    ///     report.lines(),
    ///     vec![
    ///         r#"device "CW19K1A01234", light 0 on: temperature 4500K, brightness 40%"#,
    ///         r#"device "CW19K1A01234", light 1 off"#,
    ///     ]
    /// );
    /// ```
    pub fn lines(&self) -> Vec<String> {
        let name = self.device.name();
        self.lights
            .iter()
            .enumerate()
            .map(|(i, light)| format!("device {:?}, light {} {}", name, i, describe(light)))
            .collect()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn describe(light: &Light) -> String {
    if light.on {
        format!(
            "on: temperature {}, brightness {}",
            light.temperature, light.brightness
        )
    } else {
        "off".to_string()
    }
}
