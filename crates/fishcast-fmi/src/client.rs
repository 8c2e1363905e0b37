//! WFS client for forecasted surface weather and sea level

use chrono::{Duration, Utc};
use fishcast_core::{ForecastRequest, ForecastResult, ForecastSource, Measurement};
use url::Url;

use crate::geoid::geoid_for;
use crate::waterml::parse_points;
use crate::{FmiError, FmiResult};

pub const DEFAULT_BASE_URL: &str = "http://opendata.fmi.fi/wfs";

const SURFACE_QUERY: &str = "fmi::forecast::harmonie::surface::point::timevaluepair";
const SEA_LEVEL_QUERY: &str = "fmi::forecast::sealevel::point::timevaluepair";
const SURFACE_PARAMETERS: &str = "WindDirection,WindSpeedMS,Pressure";

/// Client for the FMI open data WFS endpoint.
pub struct FmiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FmiClient {
    pub fn new() -> Self {
        Self::with_base_url(
            DEFAULT_BASE_URL
                .parse()
                .expect("default base url is well-formed"),
        )
    }

    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn query_url(&self, stored_query: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("service", "WFS")
                .append_pair("version", "2.0.0")
                .append_pair("request", "getFeature")
                .append_pair("storedquery_id", stored_query);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    async fn fetch_xml(&self, url: Url) -> FmiResult<String> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    async fn fetch_measurements(&self, request: &ForecastRequest) -> FmiResult<Vec<Measurement>> {
        // Validate the sea level location before any network round trip
        let geoid = request
            .sea_level_place
            .as_deref()
            .map(geoid_for)
            .transpose()?;

        let start = request
            .start_time
            .unwrap_or_else(|| Utc::now() - Duration::hours(1));
        let end = start + Duration::hours(i64::from(request.hours));
        let start_stamp = start.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let end_stamp = end.format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let url = self.query_url(
            SURFACE_QUERY,
            &[
                ("place", request.place.as_str()),
                ("parameters", SURFACE_PARAMETERS),
                ("starttime", &start_stamp),
                ("endtime", &end_stamp),
            ],
        );
        tracing::debug!(%url, "fetching surface forecast");
        let xml = self.fetch_xml(url).await?;

        let pressure = parse_points(&xml, "Pressure")?;
        let wind_speed = parse_points(&xml, "WindSpeedMS")?;
        let wind_direction = parse_points(&xml, "WindDirection")?;
        if pressure.len() != wind_speed.len() || pressure.len() != wind_direction.len() {
            return Err(FmiError::LengthMismatch);
        }

        let mut measurements = Vec::with_capacity(pressure.len());
        for (i, (time, value)) in pressure.iter().enumerate() {
            measurements.push(Measurement {
                time: time.with_timezone(&request.timezone).fixed_offset(),
                pressure: *value,
                wind_speed: wind_speed[i].1,
                wind_direction: wind_direction[i].1,
                sea_level: None,
            });
        }

        if let Some(geoid) = geoid {
            let url = self.query_url(
                SEA_LEVEL_QUERY,
                &[
                    ("geoid", geoid),
                    ("starttime", &start_stamp),
                    ("endtime", &end_stamp),
                ],
            );
            tracing::debug!(%url, "fetching sea level forecast");
            let xml = self.fetch_xml(url).await?;

            let sea_levels = parse_points(&xml, "SeaLevelN2000")?;
            if sea_levels.len() != measurements.len() {
                return Err(FmiError::LengthMismatch);
            }
            for (measurement, (_, level)) in measurements.iter_mut().zip(&sea_levels) {
                measurement.sea_level = Some(*level);
            }
        }

        Ok(measurements)
    }
}

impl Default for FmiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ForecastSource for FmiClient {
    async fn fetch(&self, request: &ForecastRequest) -> ForecastResult<Vec<Measurement>> {
        Ok(self.fetch_measurements(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishcast_core::ForecastError;

    #[test]
    fn test_query_url_carries_wfs_boilerplate_and_params() {
        let client = FmiClient::new();
        let url = client.query_url(
            SURFACE_QUERY,
            &[("place", "Oulu"), ("parameters", SURFACE_PARAMETERS)],
        );
        let query = url.query().unwrap();

        assert!(query.contains("service=WFS"));
        assert!(query.contains("version=2.0.0"));
        assert!(query.contains("request=getFeature"));
        assert!(query.contains("storedquery_id=fmi%3A%3Aforecast"));
        assert!(query.contains("place=Oulu"));
        assert!(query.contains("WindDirection%2CWindSpeedMS%2CPressure"));
    }

    #[tokio::test]
    async fn test_unknown_sea_level_location_fails_before_fetching() {
        // Unroutable base url: the validation error must come first
        let client = FmiClient::with_base_url("http://127.0.0.1:9/wfs".parse().unwrap());
        let request = ForecastRequest::new(chrono_tz::Europe::Helsinki, "Oulu", 48)
            .with_sea_level("Atlantis");

        let error = client.fetch(&request).await.unwrap_err();
        match error {
            ForecastError::InvalidConfiguration(message) => {
                assert!(message.contains("Atlantis"));
                assert!(message.contains("Helsinki"));
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }
}
