use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::collectors::{get_json, ProviderError};
use crate::core::geo::GeoPoint;
use crate::core::window::{NightWindow, UtcClock};

const PROVIDER: &str = "sun provider";

/// Source of today's night window for a location.
#[allow(async_fn_in_trait)]
pub trait NightWindowSource {
    async fn resolve(&self, at: GeoPoint) -> Result<NightWindow, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct SunResponse {
    #[serde(default)]
    status: Option<String>,
    // an error reply carries `"results": ""`, so decode after the status check
    #[serde(default)]
    results: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SunResults {
    sunset: Option<String>,
    sunrise: Option<String>,
}

/// HTTP client for a sunrise-sunset.org compatible endpoint.
#[derive(Debug, Clone)]
pub struct SunTimesClient {
    client: reqwest::Client,
    url: String,
}

impl SunTimesClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }

    pub async fn resolve_on(&self, at: GeoPoint, date: NaiveDate) -> Result<NightWindow, ProviderError> {
        info!(lat = at.lat, lon = at.lon, %date, url = %self.url, "Fetching sunset/sunrise");
        let date = date.format("%Y-%m-%d").to_string();
        let request = self.client.get(&self.url).query(&[
            ("lat", at.lat.to_string()),
            ("lng", at.lon.to_string()),
            ("formatted", "0".to_string()),
            ("date", date),
        ]);
        let resp: SunResponse = get_json(PROVIDER, request).await?;
        let window = night_window_from(resp)?;
        debug!(%window, "Resolved night window");
        Ok(window)
    }
}

impl NightWindowSource for SunTimesClient {
    async fn resolve(&self, at: GeoPoint) -> Result<NightWindow, ProviderError> {
        self.resolve_on(at, Utc::now().date_naive()).await
    }
}

fn night_window_from(resp: SunResponse) -> Result<NightWindow, ProviderError> {
    if let Some(status) = resp.status.as_deref().filter(|s| *s != "OK") {
        return Err(ProviderError::unavailable(PROVIDER, format!("status {status}")));
    }
    if !resp.results.is_object() {
        return Err(ProviderError::malformed(PROVIDER, "missing `results` object"));
    }
    let results: SunResults =
        serde_json::from_value(resp.results).map_err(|e| ProviderError::malformed(PROVIDER, e))?;
    // sunset and sunrise are separate fields; each is parsed on its own
    let sunset = parse_utc_clock("sunset", results.sunset.as_deref())?;
    let sunrise = parse_utc_clock("sunrise", results.sunrise.as_deref())?;
    Ok(NightWindow::new(sunset, sunrise))
}

/// `2024-06-01T19:42:07+00:00` -> 19:42 UTC.
fn parse_utc_clock(field: &str, raw: Option<&str>) -> Result<UtcClock, ProviderError> {
    let raw = raw.ok_or_else(|| ProviderError::malformed(PROVIDER, format!("missing `results.{field}`")))?;
    let t = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| ProviderError::malformed(PROVIDER, format!("`results.{field}` = {raw:?}: {e}")))?;
    Ok(UtcClock::from_datetime(t.with_timezone(&Utc)))
}
