//! HTTP client for the Key Light control API.

use std::future::Future;

use log::debug;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::deadline::Deadline;
use crate::device::{AccessoryUpdate, Device};
use crate::errors::Error;
use crate::light::{Light, LightsEnvelope};

type Result<T> = std::result::Result<T, Error>;

/// Operations a Key Light device supports.
///
/// [`Client`] talks to real hardware over HTTP. The command processor only
/// depends on this trait, so it can be driven by any other implementation.
pub trait KeyLightApi {
    /// Fetch the accessory's identity.
    fn accessory_info(&self, deadline: &Deadline) -> impl Future<Output = Result<Device>> + Send;

    /// Fetch the current state of every light, in device order.
    fn lights(&self, deadline: &Deadline) -> impl Future<Output = Result<Vec<Light>>> + Send;

    /// Replace the state of every light in one request.
    fn set_lights(
        &self,
        deadline: &Deadline,
        lights: &[Light],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Rename the accessory.
    fn set_display_name(
        &self,
        deadline: &Deadline,
        name: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// A Key Light reachable at an HTTP base address.
///
/// # Example
///
/// ```
/// use keylight_rs::Client;
///
/// let client = Client::new("http://192.168.1.50:9123", None).unwrap();
/// assert_eq!(client.address().as_str(), "http://192.168.1.50:9123/");
/// assert!(Client::new("keylight:9123", None).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    base: Url,
    http: reqwest::Client,
}

impl Client {
    const ACCESSORY_INFO: &'static str = "/elgato/accessory-info";
    const LIGHTS: &'static str = "/elgato/lights";

    /// Create a client for the device at `address`.
    ///
    /// `transport` lets callers share or configure a `reqwest::Client`; a
    /// default one is created otherwise.
    pub fn new(address: &str, transport: Option<reqwest::Client>) -> Result<Self> {
        let base =
            Url::parse(address).map_err(|e| Error::invalid_address(address, &e.to_string()))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::invalid_address(
                address,
                &format!("unsupported scheme {:?}", base.scheme()),
            ));
        }
        if base.host_str().is_none_or(str::is_empty) {
            return Err(Error::invalid_address(address, "missing host"));
        }

        Ok(Client {
            base,
            http: transport.unwrap_or_default(),
        })
    }

    pub fn address(&self) -> &Url {
        &self.base
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(Method::GET, path, None).await?;
        serde_json::from_str(&body).map_err(Error::JsonLoad)
    }

    async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let body = serde_json::to_string(body).map_err(Error::JsonDump)?;
        self.send(Method::PUT, path, Some(body)).await?;
        Ok(())
    }

    async fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<String> {
        let url = self
            .base
            .join(path)
            .map_err(|e| Error::invalid_address(self.base.as_str(), &e.to_string()))?;

        debug!("HTTP request: {} {} {:?}", method, url, body);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(Error::Network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let text = response.text().await.map_err(Error::Network)?;
        debug!("HTTP response: {} {}", status, text);
        Ok(text)
    }
}

impl KeyLightApi for Client {
    async fn accessory_info(&self, deadline: &Deadline) -> Result<Device> {
        deadline.run(self.get(Self::ACCESSORY_INFO)).await
    }

    async fn lights(&self, deadline: &Deadline) -> Result<Vec<Light>> {
        let envelope: LightsEnvelope = deadline.run(self.get(Self::LIGHTS)).await?;
        Ok(envelope.into_lights())
    }

    async fn set_lights(&self, deadline: &Deadline, lights: &[Light]) -> Result<()> {
        let envelope = LightsEnvelope::from_lights(lights);
        deadline.run(self.put(Self::LIGHTS, &envelope)).await
    }

    async fn set_display_name(&self, deadline: &Deadline, name: &str) -> Result<()> {
        let update = AccessoryUpdate {
            display_name: Some(name.to_string()),
        };
        deadline.run(self.put(Self::ACCESSORY_INFO, &update)).await
    }
}
