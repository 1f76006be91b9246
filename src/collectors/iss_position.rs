use serde::Deserialize;
use tracing::{debug, info};

use crate::collectors::{get_json, ProviderError};
use crate::core::geo::{number_or_string, GeoPoint};
use crate::core::proximity::within_tolerance_box;

const PROVIDER: &str = "iss provider";

/// Source of the spacecraft's current sub-point.
#[allow(async_fn_in_trait)]
pub trait SpacecraftPositionSource {
    async fn current_position(&self) -> Result<GeoPoint, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct IssNowResponse {
    #[serde(default)]
    message: Option<String>,
    iss_position: Option<IssPosition>,
}

#[derive(Debug, Deserialize)]
struct IssPosition {
    #[serde(deserialize_with = "number_or_string")]
    latitude: f64,
    #[serde(deserialize_with = "number_or_string")]
    longitude: f64,
}

/// HTTP client for an open-notify `iss-now` compatible endpoint. Never caches.
#[derive(Debug, Clone)]
pub struct IssPositionClient {
    client: reqwest::Client,
    url: String,
}

impl IssPositionClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }
}

impl SpacecraftPositionSource for IssPositionClient {
    async fn current_position(&self) -> Result<GeoPoint, ProviderError> {
        info!(url = %self.url, "Fetching ISS position");
        let resp: IssNowResponse = get_json(PROVIDER, self.client.get(&self.url)).await?;
        let position = position_from(resp)?;
        debug!(lat = position.lat, lon = position.lon, "ISS sub-point");
        Ok(position)
    }
}

fn position_from(resp: IssNowResponse) -> Result<GeoPoint, ProviderError> {
    if let Some(message) = resp.message.as_deref().filter(|m| *m != "success") {
        return Err(ProviderError::unavailable(PROVIDER, format!("message {message}")));
    }
    let pos = resp
        .iss_position
        .ok_or_else(|| ProviderError::malformed(PROVIDER, "missing `iss_position`"))?;
    if !(pos.latitude.is_finite() && pos.longitude.is_finite()) {
        return Err(ProviderError::malformed(PROVIDER, "non-finite coordinate"));
    }
    Ok(GeoPoint::new(pos.latitude, pos.longitude))
}

/// One proximity check: where the spacecraft was and whether that counts as near.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityReading {
    pub spacecraft: GeoPoint,
    pub near: bool,
}

/// Compares a freshly fetched spacecraft position with the observer.
#[derive(Debug, Clone)]
pub struct ProximityEvaluator<S> {
    source: S,
}

impl<S: SpacecraftPositionSource> ProximityEvaluator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn evaluate(&self, observer: GeoPoint) -> Result<ProximityReading, ProviderError> {
        let spacecraft = self.source.current_position().await?;
        Ok(ProximityReading {
            spacecraft,
            near: within_tolerance_box(observer, spacecraft),
        })
    }
}
