//! Color temperature control.

use std::fmt;
use std::str::FromStr;

/// Color temperature in Kelvin, with valid values from 2900K to 7000K.
///
/// The device firmware speaks in a reciprocal unit (roughly mireds, 143-344);
/// [`Kelvin::from_mired`] and [`Kelvin::to_mired`] convert between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kelvin {
    pub(crate) kelvin: u16,
}

impl Kelvin {
    pub const MIN: u16 = 2900;
    pub const MAX: u16 = 7000;

    const MIRED_MIN: u16 = 143;
    const MIRED_MAX: u16 = 344;

    /// Create a new Kelvin with the default value (2900K).
    ///
    /// # Examples
    ///
    /// ```
    /// use keylight_rs::Kelvin;
    ///
    /// assert_eq!(Kelvin::new().kelvin(), 2900);
    /// ```
    pub fn new() -> Self {
        Kelvin { kelvin: Self::MIN }
    }

    /// Get the kelvin value.
    pub fn kelvin(&self) -> u16 {
        self.kelvin
    }

    /// Create a new Kelvin with the given value.
    ///
    /// Returns `None` if value is outside the valid range (2900-7000).
    ///
    /// # Examples
    ///
    /// ```
    /// use keylight_rs::Kelvin;
    ///
    /// assert!(Kelvin::create(2899).is_none());
    /// assert!(Kelvin::create(2900).is_some());
    /// assert!(Kelvin::create(7000).is_some());
    /// assert!(Kelvin::create(7001).is_none());
    /// ```
    pub fn create(kelvin: u16) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&kelvin) {
            Some(Kelvin { kelvin })
        } else {
            None
        }
    }

    /// Adds `delta` Kelvin, saturating at the valid range.
    pub fn offset(&self, delta: i32) -> Self {
        let kelvin = i32::from(self.kelvin)
            .saturating_add(delta)
            .clamp(Self::MIN.into(), Self::MAX.into());
        Kelvin {
            kelvin: kelvin as u16,
        }
    }

    /// Converts the firmware unit to Kelvin, rounded to the nearest 50K.
    ///
    /// The result is not range checked: whatever the device reports is kept.
    pub fn from_mired(mired: u16) -> Self {
        let mired = u32::from(mired.max(1));
        let steps = (1_000_000 + mired * 25) / (mired * 50);
        Kelvin {
            kelvin: u16::try_from(steps * 50).unwrap_or(u16::MAX),
        }
    }

    /// Converts to the firmware unit, limited to what the firmware accepts.
    pub fn to_mired(&self) -> u16 {
        let kelvin = u32::from(self.kelvin.max(1));
        let mired = (1_000_000 + kelvin / 2) / kelvin;
        u16::try_from(mired)
            .unwrap_or(u16::MAX)
            .clamp(Self::MIRED_MIN, Self::MIRED_MAX)
    }
}

impl Default for Kelvin {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Kelvin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K", self.kelvin)
    }
}

impl FromStr for Kelvin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kelvin: u16 = s
            .trim()
            .parse()
            .map_err(|_| format!("{s:?} is not a color temperature in Kelvin"))?;
        Self::create(kelvin).ok_or_else(|| {
            format!(
                "temperature {kelvin}K is outside the valid range {}-{}K",
                Self::MIN,
                Self::MAX
            )
        })
    }
}
