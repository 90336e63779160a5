//! HTTP client for the data API and the tile server.
//!
//! Works natively (CLI) and in the browser, where reqwest goes through `fetch`.

use crate::complaint::ComplaintSubmission;
use crate::config::ApiConfig;
use crate::error::{BwrError, Result};
use crate::forecast::{ForecastEnvelope, ForecastPoint};
use crate::geo::LatLng;
use crate::geojson::{self, Polyline};
use crate::reservoir::ReservoirDetail;
use crate::route::RoutePath;
use crate::time_cursor::TimeFetch;
use bwr_utils::time::{backoff_delay, sleep};
use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;

const MAX_RETRY_ATTEMPTS: u32 = 3;
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing reqwest client.
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn dams_url(&self, skip: u32, limit: u32) -> String {
        format!("{}?skip={}&limit={}", self.config.api_url("/dams"), skip, limit)
    }

    pub fn dam_url(&self, id: &str) -> String {
        self.config.api_url(&format!("/dams/{}", id))
    }

    pub fn route_url(&self, dam_id: Option<&str>, at: &LatLng) -> String {
        let mut url = format!(
            "{}?latitude={}&longitude={}",
            self.config.api_url("/path"),
            at.lat,
            at.lng
        );
        if let Some(id) = dam_id {
            url.push_str("&dam_id=");
            url.push_str(id);
        }
        url
    }

    /// One GET, failing on any non-success status.
    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BwrError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    /// GET with exponential backoff. Client errors (4xx) are not retried.
    async fn get_with_retry(&self, url: &str) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.get_text(url).await {
                Ok(body) => return Ok(body),
                Err(BwrError::HttpStatus { status, url }) if status < 500 => {
                    return Err(BwrError::HttpStatus { status, url });
                }
                Err(e) if attempt < MAX_RETRY_ATTEMPTS => {
                    let delay = backoff_delay(INITIAL_RETRY_DELAY, attempt);
                    warn!(
                        "Attempt {}/{}: GET {} failed: {}",
                        attempt, MAX_RETRY_ATTEMPTS, url, e
                    );
                    info!("Sleeping for {} milliseconds before retry", delay.as_millis());
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!("All attempts failed for {}", url);
                    return Err(e);
                }
            }
        }
    }

    /// `GET /dams?skip=&limit=`
    pub async fn list_dams(&self, skip: u32, limit: u32) -> Result<Vec<ReservoirDetail>> {
        let body = self.get_text(&self.dams_url(skip, limit)).await?;
        let dams: Vec<ReservoirDetail> = serde_json::from_str(&body)?;
        info!("Fetched {} reservoirs", dams.len());
        Ok(dams)
    }

    /// Body of `GET /dams/{id}`, with 404 mapped to `ReservoirNotFound`.
    async fn get_dam_body(&self, id: &str) -> Result<String> {
        match self.get_with_retry(&self.dam_url(id)).await {
            Err(BwrError::HttpStatus { status: 404, .. }) => {
                Err(BwrError::ReservoirNotFound(id.to_string()))
            }
            other => other,
        }
    }

    /// `GET /dams/{id}`
    pub async fn get_dam(&self, id: &str) -> Result<ReservoirDetail> {
        let body = self.get_dam_body(id).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Forecast series for a reservoir. The API serves it from `GET /dams/{id}`
    /// under `forecast`; a reservoir without one yields an empty series.
    pub async fn fetch_forecast(&self, id: &str) -> Result<Vec<ForecastPoint>> {
        let body = self.get_dam_body(id).await?;
        parse_forecast(&body)
    }

    /// Detail and forecast from a single `GET /dams/{id}`.
    pub async fn get_dam_with_forecast(&self, id: &str) -> Result<ReservoirDetail> {
        let body = self.get_dam_body(id).await?;
        detail_with_forecast(&body)
    }

    /// `POST /complaints`. Never retried.
    pub async fn submit_complaint(
        &self,
        submission: &ComplaintSubmission,
    ) -> Result<serde_json::Value> {
        let url = self.config.api_url("/complaints");
        let response = self.client.post(&url).json(submission).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BwrError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }
        // Some deployments answer 201/204 with an empty body.
        let body = response.text().await?;
        if body.trim().is_empty() || status == StatusCode::NO_CONTENT {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Route from the reservoir serving `at` (or `dam_id`, when known).
    pub async fn fetch_route(&self, dam_id: Option<&str>, at: &LatLng) -> Result<RoutePath> {
        let body = self.get_with_retry(&self.route_url(dam_id, at)).await?;
        let route: RoutePath = serde_json::from_str(&body)?;
        info!(
            "Route with {} nodes, {:.1} km",
            route.path.len(),
            route.total_distance_km()
        );
        Ok(route)
    }

    /// GeoJSON overlay for one month, already converted to display order.
    pub async fn fetch_time_overlay(&self, fetch: &TimeFetch) -> Result<Polyline> {
        let body = self.get_text(&fetch.geojson_url).await?;
        let collection = geojson::parse_feature_collection(&body)?;
        Ok(geojson::to_polyline(&collection))
    }
}

fn parse_forecast(body: &str) -> Result<Vec<ForecastPoint>> {
    let envelope: ForecastEnvelope = serde_json::from_str(body)?;
    Ok(envelope.forecast)
}

fn detail_with_forecast(body: &str) -> Result<ReservoirDetail> {
    let detail: ReservoirDetail = serde_json::from_str(body)?;
    let series = parse_forecast(body)?;
    info!("{} forecast points for {}", series.len(), detail.id());
    Ok(detail.with_forecast(series))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = ApiClient::new(ApiConfig::default().with_api_base_url("https://api.example.bg/"));
        assert_eq!(
            client.dams_url(0, 100),
            "https://api.example.bg/dams?skip=0&limit=100"
        );
        assert_eq!(client.dam_url("abc"), "https://api.example.bg/dams/abc");
        assert_eq!(
            client.route_url(None, &LatLng::new(42.69, 23.33)),
            "https://api.example.bg/path?latitude=42.69&longitude=23.33"
        );
        assert_eq!(
            client.route_url(Some("d1"), &LatLng::new(42.5, 23.0)),
            "https://api.example.bg/path?latitude=42.5&longitude=23&dam_id=d1"
        );
    }

    #[test]
    fn test_detail_and_forecast_share_one_body() {
        let body = r#"{
            "id": "d1",
            "display_name": "Искър",
            "latitude": 42.5,
            "longitude": 23.5,
            "max_volume": 1000,
            "forecast": [
                {"timestamp": "2025-03-02T00:00:00", "forecasted_available_useful_volume": 500.0},
                {"timestamp": "2025-03-09T00:00:00", "forecasted_available_useful_volume": 350.0}
            ]
        }"#;
        let detail = detail_with_forecast(body).unwrap();
        assert_eq!(detail.id(), "d1");
        assert_eq!(detail.will_dry_up(), Some(true));
        assert_eq!(parse_forecast(body).unwrap().len(), 2);
    }
}
