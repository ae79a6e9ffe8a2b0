use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{Config, Provider};
use crate::decoder::decode_metar;
use crate::error::{self, DecodeError, FetchError, MetarError};
use crate::models::ParsedMetar;

const CHECKWX_URL: &str = "https://api.checkwx.com/metar";
const AVIATION_WEATHER_URL: &str = "https://aviationweather.gov/api/data/metar";

// source of raw metar text for a station
pub trait Fetcher: Send + Sync {
    fn fetch(&self, station: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

pub struct HttpFetcher {
    client: reqwest::Client,
    provider: Provider,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct CheckWxResponse {
    #[serde(default)]
    data: Vec<String>,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HttpFetcher {
            client,
            provider: config.provider,
            api_key: config.api_key.clone(),
        })
    }

    // checkwx wraps the report in json and needs an api key
    async fn fetch_checkwx(&self, station: &str) -> Result<String, FetchError> {
        let api_key = self.api_key.as_deref().ok_or(FetchError::MissingApiKey)?;
        let url = format!("{}/{}/", CHECKWX_URL, station);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header("X-API-Key", api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        let body = response.text().await?;
        unwrap_checkwx_body(&body, station)
    }

    // aviationweather.gov hands back the raw report as plain text
    async fn fetch_aviation_weather(&self, station: &str) -> Result<String, FetchError> {
        let url = format!("{}?ids={}&format=raw", AVIATION_WEATHER_URL, station);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        let text = response.text().await?;
        first_report(&text, station)
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, station: &str) -> Result<String, FetchError> {
        debug!(station, provider = ?self.provider, "fetching METAR");
        match self.provider {
            Provider::CheckWx => self.fetch_checkwx(station).await,
            Provider::AviationWeather => self.fetch_aviation_weather(station).await,
        }
    }
}

// pulls the first report out of a checkwx {"results": n, "data": [...]} body
pub fn unwrap_checkwx_body(body: &str, station: &str) -> Result<String, FetchError> {
    let response: CheckWxResponse = serde_json::from_str(body)?;
    response
        .data
        .into_iter()
        .next()
        .map(|report| report.trim().to_string())
        .filter(|report| !report.is_empty())
        .ok_or_else(|| FetchError::NoReport {
            station: station.to_string(),
        })
}

fn first_report(text: &str, station: &str) -> Result<String, FetchError> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FetchError::NoReport {
            station: station.to_string(),
        })
}

// rejects provider responses that carry an error message in place of a report
pub fn check_provider_errors(raw: &str, station: &str) -> Result<(), DecodeError> {
    let lowered = raw.to_lowercase();

    if lowered.contains("invalid station") {
        return Err(DecodeError::StationNotFound {
            station: station.to_string(),
        });
    }

    if lowered.contains("currently unavailable") {
        return Err(DecodeError::ReportUnavailable {
            station: station.to_string(),
        });
    }

    Ok(())
}

pub fn normalize_station(station: &str) -> String {
    station.trim().to_uppercase()
}

// fetches the current report for a station and decodes it
pub async fn retrieve_metar<F: Fetcher>(fetcher: &F, station: &str) -> error::Result<ParsedMetar> {
    let station = normalize_station(station);
    let raw = fetcher.fetch(&station).await?;
    info!(station = %station, raw = %raw, "received METAR");

    decode_metar(&raw, &station).map_err(|e| {
        warn!(station = %station, error = %e, "failed to decode METAR");
        MetarError::from(e)
    })
}
