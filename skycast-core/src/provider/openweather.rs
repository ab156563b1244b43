use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{Location, WeatherSnapshot},
    provider::{GeocodingProvider, ResolvedPlace, WeatherProvider},
};

const GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
const CURRENT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Client for OpenWeather's geocoding and current-weather endpoints.
/// Both run off the same API key, so one client implements both ports.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn read_body(
        res: reqwest::Response,
        stage: &'static str,
    ) -> Result<String, LookupError> {
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| LookupError::Http { stage, source })?;

        if !status.is_success() {
            return Err(LookupError::Unavailable {
                stage,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl GeocodingProvider for OpenWeatherClient {
    async fn resolve(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<ResolvedPlace, LookupError> {
        let stage = "geocoding";
        let query = format!("{city},{country_code}");

        tracing::debug!(%query, "resolving location");

        let res = self
            .http
            .get(GEOCODING_URL)
            .query(&[
                ("q", query.as_str()),
                ("limit", "1"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|source| LookupError::Http { stage, source })?;

        let body = Self::read_body(res, stage).await?;

        let candidates: Vec<GeoCandidate> = serde_json::from_str(&body)
            .map_err(|source| LookupError::Decode { stage, source })?;

        pick_candidate(city, country_code, candidates)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, LookupError> {
        let stage = "weather";

        tracing::debug!(lat, lon, "fetching current weather");

        let lat = lat.to_string();
        let lon = lon.to_string();

        let res = self
            .http
            .get(CURRENT_WEATHER_URL)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|source| LookupError::Http { stage, source })?;

        let body = Self::read_body(res, stage).await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|source| LookupError::Decode { stage, source })?;

        // The API guarantees at least one condition; the first is the
        // representative one.
        let condition = parsed.weather.into_iter().next().ok_or(LookupError::Malformed {
            stage,
            what: "a weather condition",
        })?;

        Ok(WeatherSnapshot {
            main: condition.main,
            description: condition.description,
            icon: condition.icon,
            temperature_k: parsed.main.temp,
            min_temperature_k: parsed.main.temp_min,
            max_temperature_k: parsed.main.temp_max,
            humidity_pct: parsed.main.humidity,
        })
    }
}

/// Apply the resolver contract to the candidate list: zero candidates is a
/// miss, a best candidate in the wrong country is a mismatch, otherwise the
/// provider's canonical spelling wins over the user's input.
fn pick_candidate(
    city: &str,
    requested_cc: &str,
    candidates: Vec<GeoCandidate>,
) -> Result<ResolvedPlace, LookupError> {
    let Some(best) = candidates.into_iter().next() else {
        return Err(LookupError::NotFound {
            city: city.to_string(),
            country_code: requested_cc.to_string(),
        });
    };

    if !best.country.eq_ignore_ascii_case(requested_cc) {
        return Err(LookupError::CountryMismatch {
            city: city.to_string(),
            requested: requested_cc.to_string(),
            found: best.country,
        });
    }

    Ok(ResolvedPlace {
        location: Location {
            city: best.name,
            country_code: best.country,
        },
        lat: best.lat,
        lon: best.lon,
    })
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    name: String,
    lat: f64,
    lon: f64,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    weather: Vec<OwCondition>,
    main: OwMain,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, country: &str, lat: f64, lon: f64) -> GeoCandidate {
        GeoCandidate {
            name: name.to_string(),
            lat,
            lon,
            country: country.to_string(),
        }
    }

    #[test]
    fn pick_candidate_empty_list_is_not_found() {
        let err = pick_candidate("Atlantis", "GR", vec![]).unwrap_err();
        assert!(matches!(err, LookupError::NotFound { .. }));
    }

    #[test]
    fn pick_candidate_wrong_country_is_mismatch() {
        let err = pick_candidate(
            "Paris",
            "US",
            vec![candidate("Paris", "FR", 48.85, 2.35)],
        )
        .unwrap_err();

        match err {
            LookupError::CountryMismatch { requested, found, .. } => {
                assert_eq!(requested, "US");
                assert_eq!(found, "FR");
            }
            other => panic!("expected CountryMismatch, got {other:?}"),
        }
    }

    #[test]
    fn pick_candidate_country_match_is_case_insensitive() {
        let place = pick_candidate(
            "london",
            "gb",
            vec![candidate("London", "GB", 51.5, -0.13)],
        )
        .expect("should resolve");

        // Canonical spelling from the provider, not the user's input.
        assert_eq!(place.location.city, "London");
        assert_eq!(place.location.country_code, "GB");
        assert_eq!(place.lat, 51.5);
        assert_eq!(place.lon, -0.13);
    }

    #[test]
    fn current_response_parses_the_documented_fields() {
        let body = r#"{
            "weather": [{"id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04d"}],
            "main": {"temp": 288.15, "feels_like": 287.6, "temp_min": 287.0, "temp_max": 290.0, "pressure": 1012, "humidity": 70}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.weather[0].main, "Clouds");
        assert_eq!(parsed.weather[0].icon, "04d");
        assert_eq!(parsed.main.temp, 288.15);
        assert_eq!(parsed.main.humidity, 70);
    }
}
