//! Read-modify-write of a device's lights for one invocation.

use log::info;

use crate::client::KeyLightApi;
use crate::deadline::Deadline;
use crate::errors::Error;
use crate::light::Light;
use crate::report::Report;
use crate::types::{Brightness, Kelvin, PowerMode};

type Result<T> = std::result::Result<T, Error>;

/// What one invocation asks for.
///
/// Every adjustment is optional. Deltas of zero mean "not requested".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Base address of the device's HTTP API.
    pub address: String,
    /// Absolute brightness.
    pub brightness: Option<Brightness>,
    /// Brightness change in percent, clamped to 3-100 after adding.
    pub brightness_delta: i32,
    /// Rename the device before reading its state. Forces `info`.
    pub display_name: Option<String>,
    /// Report the current state without changing anything.
    pub info: bool,
    /// Absolute color temperature.
    pub temperature: Option<Kelvin>,
    /// Temperature change in Kelvin, clamped to 2900-7000 after adding.
    pub temperature_delta: i32,
}

impl Options {
    pub const DEFAULT_ADDRESS: &'static str = "http://keylight:9123";

    /// How the power state of each light changes.
    ///
    /// A bare invocation toggles. Any absolute value turns the lights on.
    /// Deltas alone keep the power state, so they only show on lights that
    /// are already on.
    pub fn power_mode(&self) -> PowerMode {
        let absolute = self.brightness.is_some() || self.temperature.is_some();
        let incremental = self.brightness_delta != 0 || self.temperature_delta != 0;

        match (absolute, incremental) {
            (false, false) => PowerMode::Toggle,
            (false, true) => PowerMode::Keep,
            (true, _) => PowerMode::On,
        }
    }

    fn rename(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            address: Self::DEFAULT_ADDRESS.to_string(),
            brightness: None,
            brightness_delta: 0,
            display_name: None,
            info: false,
            temperature: None,
            temperature_delta: 0,
        }
    }
}

/// Apply the requested adjustments to every light.
pub fn apply(options: &Options, lights: &mut [Light]) {
    let power = options.power_mode();

    for light in lights.iter_mut() {
        if let Some(brightness) = options.brightness {
            light.brightness = brightness;
        }
        if let Some(temperature) = options.temperature {
            light.temperature = temperature;
        }

        if options.brightness_delta != 0 {
            light.brightness = light.brightness.offset(options.brightness_delta);
        }
        if options.temperature_delta != 0 {
            info!(
                "received color temperature increment {}, current temperature {}",
                options.temperature_delta, light.temperature
            );
            if let Some(bound) = temperature_bound(light.temperature, options.temperature_delta) {
                info!("reached {bound} color temperature bound");
            }
            light.temperature = light.temperature.offset(options.temperature_delta);
        }

        light.on = power.apply(light.on);
    }
}

/// Which end of the valid range `current + delta` runs past, if any.
fn temperature_bound(current: Kelvin, delta: i32) -> Option<&'static str> {
    let wanted = i32::from(current.kelvin()).saturating_add(delta);
    if wanted > i32::from(Kelvin::MAX) {
        Some("upper")
    } else if wanted < i32::from(Kelvin::MIN) {
        Some("lower")
    } else {
        None
    }
}

/// Run one invocation against `client`.
///
/// A rename happens first and is not undone if a later step fails.
pub async fn run<C: KeyLightApi>(
    client: &C,
    options: &Options,
    deadline: &Deadline,
) -> Result<Report> {
    let mut info = options.info;

    if let Some(name) = options.rename() {
        client
            .set_display_name(deadline, name)
            .await
            .map_err(|e| Error::step("set display name", e))?;
        // Show the new name without touching the lights.
        info = true;
    }

    let device = client
        .accessory_info(deadline)
        .await
        .map_err(|e| Error::step("fetch accessory info", e))?;

    let mut lights = client
        .lights(deadline)
        .await
        .map_err(|e| Error::step("fetch lights", e))?;

    if info {
        return Ok(Report::new(device, lights, false));
    }

    apply(options, &mut lights);

    client
        .set_lights(deadline, &lights)
        .await
        .map_err(|e| Error::step("set lights", e))?;

    Ok(Report::new(device, lights, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::Device;
    use rstest::rstest;
    use std::sync::Mutex;

    fn light(on: bool, brightness: u8, kelvin: u16) -> Light {
        Light::new(
            on,
            Brightness::create(brightness).unwrap(),
            Kelvin::create(kelvin).unwrap(),
        )
    }

    /// In-memory device recording every write.
    ///
    /// `fail` names one operation that returns an error instead.
    struct FakeKeyLight {
        device: Mutex<Device>,
        lights: Mutex<Vec<Light>>,
        writes: Mutex<Vec<Vec<Light>>>,
        fail: Option<&'static str>,
    }

    impl FakeKeyLight {
        fn new(lights: Vec<Light>) -> Self {
            FakeKeyLight {
                device: Mutex::new(Device {
                    serial_number: "CW19K1A01234".into(),
                    ..Default::default()
                }),
                lights: Mutex::new(lights),
                writes: Mutex::new(Vec::new()),
                fail: None,
            }
        }

        fn lights_now(&self) -> Vec<Light> {
            self.lights.lock().unwrap().clone()
        }

        fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }
    }

    impl KeyLightApi for FakeKeyLight {
        async fn accessory_info(&self, _deadline: &Deadline) -> Result<Device> {
            if self.fail == Some("accessory_info") {
                return Err(Error::Status {
                    status: 503,
                    path: "/elgato/accessory-info".into(),
                });
            }
            Ok(self.device.lock().unwrap().clone())
        }

        async fn lights(&self, _deadline: &Deadline) -> Result<Vec<Light>> {
            if self.fail == Some("lights") {
                return Err(Error::Timeout);
            }
            Ok(self.lights_now())
        }

        async fn set_lights(&self, _deadline: &Deadline, lights: &[Light]) -> Result<()> {
            self.writes.lock().unwrap().push(lights.to_vec());
            if self.fail == Some("set_lights") {
                return Err(Error::Status {
                    status: 400,
                    path: "/elgato/lights".into(),
                });
            }
            *self.lights.lock().unwrap() = lights.to_vec();
            Ok(())
        }

        async fn set_display_name(&self, _deadline: &Deadline, name: &str) -> Result<()> {
            self.device.lock().unwrap().display_name = name.to_string();
            Ok(())
        }
    }

    #[rstest]
    #[case(None, None, 0, 0, PowerMode::Toggle)]
    #[case(None, None, 10, 0, PowerMode::Keep)]
    #[case(None, None, 0, -300, PowerMode::Keep)]
    #[case(Some(50), None, 0, 0, PowerMode::On)]
    #[case(None, Some(4000), 0, 0, PowerMode::On)]
    #[case(Some(50), None, 0, 200, PowerMode::On)]
    fn test_power_mode(
        #[case] brightness: Option<u8>,
        #[case] temperature: Option<u16>,
        #[case] brightness_delta: i32,
        #[case] temperature_delta: i32,
        #[case] expected: PowerMode,
    ) {
        let options = Options {
            brightness: brightness.and_then(Brightness::create),
            temperature: temperature.and_then(Kelvin::create),
            brightness_delta,
            temperature_delta,
            ..Default::default()
        };
        assert_eq!(options.power_mode(), expected);
    }

    #[test]
    fn test_apply_bare_toggles() {
        let mut lights = vec![light(true, 40, 4500), light(false, 10, 3000)];
        apply(&Options::default(), &mut lights);
        assert_eq!(lights, vec![light(false, 40, 4500), light(true, 10, 3000)]);
    }

    #[test]
    fn test_apply_delta_keeps_off_light_off() {
        let mut lights = vec![light(false, 95, 4500)];
        let options = Options {
            brightness_delta: 10,
            ..Default::default()
        };
        apply(&options, &mut lights);
        assert_eq!(lights, vec![light(false, 100, 4500)]);
    }

    #[test]
    fn test_apply_absolute_forces_on() {
        let mut lights = vec![light(false, 10, 3000), light(true, 80, 6000)];
        let options = Options {
            brightness: Brightness::create(50),
            ..Default::default()
        };
        apply(&options, &mut lights);
        assert_eq!(lights, vec![light(true, 50, 3000), light(true, 50, 6000)]);
    }

    #[test]
    fn test_apply_absolute_then_delta() {
        let mut lights = vec![light(true, 10, 3000)];
        let options = Options {
            brightness: Brightness::create(90),
            brightness_delta: 20,
            temperature: Kelvin::create(3000),
            temperature_delta: -500,
            ..Default::default()
        };
        apply(&options, &mut lights);
        assert_eq!(lights, vec![light(true, 100, 2900)]);
    }

    #[rstest]
    #[case(4500, 4000, 7000)]
    #[case(4500, -4100, 2900)]
    #[case(4500, 250, 4750)]
    fn test_apply_temperature_delta(#[case] start: u16, #[case] delta: i32, #[case] expected: u16) {
        let mut lights = vec![light(true, 50, start)];
        let options = Options {
            temperature_delta: delta,
            ..Default::default()
        };
        apply(&options, &mut lights);
        assert_eq!(lights, vec![light(true, 50, expected)]);
    }

    #[tokio::test]
    async fn test_run_bare_toggles_and_writes() {
        let fake = FakeKeyLight::new(vec![light(true, 40, 4500)]);
        let report = run(&fake, &Options::default(), &Deadline::default())
            .await
            .unwrap();

        assert!(report.written());
        assert_eq!(fake.write_count(), 1);
        assert_eq!(fake.lights_now(), vec![light(false, 40, 4500)]);
        assert_eq!(
            report.lines(),
            vec![r#"device "CW19K1A01234", light 0 off"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_run_toggle_twice_restores() {
        let original = vec![light(true, 40, 4500), light(false, 20, 6000)];
        let fake = FakeKeyLight::new(original.clone());

        for _ in 0..2 {
            run(&fake, &Options::default(), &Deadline::default())
                .await
                .unwrap();
        }
        assert_eq!(fake.write_count(), 2);
        assert_eq!(fake.lights_now(), original);
    }

    #[tokio::test]
    async fn test_run_info_does_not_write() {
        let original = vec![light(true, 40, 4500)];
        let fake = FakeKeyLight::new(original.clone());
        let options = Options {
            info: true,
            brightness: Brightness::create(80),
            ..Default::default()
        };

        let report = run(&fake, &options, &Deadline::default()).await.unwrap();

        assert!(!report.written());
        assert_eq!(fake.write_count(), 0);
        assert_eq!(report.lights(), original.as_slice());
    }

    #[tokio::test]
    async fn test_run_rename_forces_info() {
        let original = vec![light(false, 40, 4500)];
        let fake = FakeKeyLight::new(original.clone());
        let options = Options {
            display_name: Some("Desk".into()),
            brightness: Brightness::create(80),
            ..Default::default()
        };

        let report = run(&fake, &options, &Deadline::default()).await.unwrap();

        assert_eq!(report.device().name(), "Desk");
        assert_eq!(fake.write_count(), 0);
        assert_eq!(fake.lights_now(), original);
        assert_eq!(
            report.lines(),
            vec![r#"device "Desk", light 0 off"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_run_empty_name_is_ignored() {
        let fake = FakeKeyLight::new(vec![light(false, 40, 4500)]);
        let options = Options {
            display_name: Some(String::new()),
            ..Default::default()
        };

        let report = run(&fake, &options, &Deadline::default()).await.unwrap();
        assert!(report.written());
        assert_eq!(report.device().name(), "CW19K1A01234");
    }

    #[tokio::test]
    async fn test_run_fetch_failure_keeps_rename() {
        let mut fake = FakeKeyLight::new(vec![light(false, 40, 4500)]);
        fake.fail = Some("lights");
        let options = Options {
            display_name: Some("Desk".into()),
            ..Default::default()
        };

        let err = run(&fake, &options, &Deadline::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "failed to fetch lights: operation timed out");
        assert!(err.is_timeout());
        assert_eq!(fake.device.lock().unwrap().display_name, "Desk");
        assert_eq!(fake.write_count(), 0);
    }

    #[tokio::test]
    async fn test_run_accessory_info_failure() {
        let mut fake = FakeKeyLight::new(vec![light(true, 40, 4500)]);
        fake.fail = Some("accessory_info");

        let err = run(&fake, &Options::default(), &Deadline::default())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to fetch accessory info: unexpected HTTP status 503 from /elgato/accessory-info"
        );
        assert!(err.is_protocol());
        assert_eq!(fake.write_count(), 0);
    }

    #[tokio::test]
    async fn test_run_set_lights_failure() {
        let original = vec![light(true, 40, 4500)];
        let mut fake = FakeKeyLight::new(original.clone());
        fake.fail = Some("set_lights");

        let err = run(&fake, &Options::default(), &Deadline::default())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to set lights: unexpected HTTP status 400 from /elgato/lights"
        );
        // The toggled set was sent before the device refused it.
        assert_eq!(
            fake.writes.lock().unwrap().clone(),
            vec![vec![light(false, 40, 4500)]]
        );
        assert_eq!(fake.lights_now(), original);
    }

    #[rstest]
    #[case(6900, 200, Some("upper"))]
    #[case(3000, -200, Some("lower"))]
    #[case(3000, -100, None)]
    #[case(6900, 100, None)]
    #[case(4500, i32::MAX, Some("upper"))]
    fn test_temperature_bound(
        #[case] current: u16,
        #[case] delta: i32,
        #[case] expected: Option<&'static str>,
    ) {
        assert_eq!(
            temperature_bound(Kelvin::create(current).unwrap(), delta),
            expected
        );
    }
}
