//! Invocation-wide deadline for device requests.
//!
//! A [`Deadline`] is created once, at the start of a run, and handed to every
//! [`KeyLightApi`](crate::KeyLightApi) call. All requests share the same
//! absolute expiry, so a slow first request leaves less time for the next.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// An absolute point in time after which requests are abandoned.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// Default budget for a whole command-line invocation.
    pub const DEFAULT: Duration = Duration::from_secs(5);

    /// A deadline `duration` from now.
    pub fn after(duration: Duration) -> Self {
        Deadline {
            at: Instant::now() + duration,
        }
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Run a future, aborting it with [`Error::Timeout`] if the deadline
    /// passes before it completes.
    pub async fn run<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout_at(self.at, future)
            .await
            .map_err(|_| Error::Timeout)?
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::after(Self::DEFAULT)
    }
}
