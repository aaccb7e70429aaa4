//! # keylight_rs
//!
//! An async Rust library for controlling Elgato Key Light devices over their
//! JSON-over-HTTP API.
//!
//! The library reads a device's identity and the state of its lights, and
//! writes the lights back as one complete set. The [`command`] module builds
//! the read-modify-write cycle used by the `keylight` command-line tool on
//! top of the [`KeyLightApi`] trait.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use keylight_rs::{Client, Deadline, KeyLightApi};
//!
//! async fn turn_on() -> Result<(), keylight_rs::Error> {
//!     let client = Client::new("http://192.168.1.50:9123", None)?;
//!     let deadline = Deadline::after(Duration::from_secs(5));
//!
//!     let mut lights = client.lights(&deadline).await?;
//!     for light in &mut lights {
//!         light.on = true;
//!     }
//!     client.set_lights(&deadline, &lights).await
//! }
//! ```
//!
//! ## Value ranges
//!
//! - **Brightness**: 3-100 % using [`Brightness`]
//! - **Color Temperature**: 2900K-7000K using [`Kelvin`]
//!
//! Incremental changes ([`Brightness::offset`], [`Kelvin::offset`]) saturate
//! at the ends of those ranges.
//!
//! ## Communication
//!
//! Devices listen on port 9123 and expose `/elgato/accessory-info` and
//! `/elgato/lights`. Every request made through a [`Deadline`] fails with
//! [`Error::Timeout`] once it expires.

mod client;
pub mod command;
mod deadline;
mod device;
mod errors;
mod light;
mod report;
mod types;

// Re-export public API
pub use client::{Client, KeyLightApi};
pub use command::Options;
pub use deadline::Deadline;
pub use device::Device;
pub use errors::Error;
pub use light::Light;
pub use report::Report;
pub use types::{Brightness, Kelvin, PowerMode};
