//! Brightness control for Key Lights.

use std::fmt;
use std::str::FromStr;

/// Brightness level from 3 to 100 percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brightness {
    pub(crate) value: u8,
}

impl Brightness {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 100;

    pub fn new() -> Self {
        Brightness { value: Self::MAX }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is outside valid range (3-100).
    pub fn create(value: u8) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Brightness { value })
        } else {
            None
        }
    }

    /// Adds `delta` percent, saturating at the valid range.
    ///
    /// ```
    /// use keylight_rs::Brightness;
    ///
    /// let b = Brightness::create(95).unwrap();
    /// assert_eq!(b.offset(10).value(), 100);
    /// assert_eq!(b.offset(-200).value(), 3);
    /// assert_eq!(b.offset(-5).value(), 90);
    /// ```
    pub fn offset(&self, delta: i32) -> Self {
        let value = i32::from(self.value)
            .saturating_add(delta)
            .clamp(Self::MIN.into(), Self::MAX.into());
        Brightness { value: value as u8 }
    }

    /// Wraps a value reported by a device as-is.
    pub(crate) fn raw(value: u8) -> Self {
        Brightness { value }
    }

    fn is_valid(value: u8) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.value)
    }
}

impl FromStr for Brightness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("{s:?} is not a brightness percentage"))?;
        Self::create(value).ok_or_else(|| {
            format!(
                "brightness {value} is outside the valid range {}-{}",
                Self::MIN,
                Self::MAX
            )
        })
    }
}
