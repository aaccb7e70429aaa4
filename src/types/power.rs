//! Power handling for a command run.

/// What a command run does to the power state of each light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// Flip the light on or off
    Toggle,
    /// Turn the light on
    On,
    /// Leave the power state alone
    Keep,
}

impl PowerMode {
    /// Returns the new power state for a light that is currently `on`.
    pub fn apply(self, on: bool) -> bool {
        match self {
            PowerMode::Toggle => !on,
            PowerMode::On => true,
            PowerMode::Keep => on,
        }
    }
}
