use crate::{
    Config,
    error::LookupError,
    model::{Location, WeatherSnapshot},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Geocoding output: canonical place identity plus the coordinates the
/// weather fetch needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub location: Location,
    pub lat: f64,
    pub lon: f64,
}

/// Turns free-text city + ISO country code into a [`ResolvedPlace`].
///
/// One outbound call, at most one candidate requested, no retries.
/// Zero candidates is [`LookupError::NotFound`]; a best candidate in the
/// wrong country is [`LookupError::CountryMismatch`].
#[async_trait]
pub trait GeocodingProvider: Send + Sync + Debug {
    async fn resolve(&self, city: &str, country_code: &str)
    -> Result<ResolvedPlace, LookupError>;
}

/// Fetches current conditions for coordinates obtained from a
/// [`GeocodingProvider`]. Temperatures come back in Kelvin.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot, LookupError>;
}

/// Construct both provider ends from config. OpenWeather serves both the
/// geocoding and the weather endpoint with the same API key.
pub fn providers_from_config(
    config: &Config,
) -> anyhow::Result<(Box<dyn GeocodingProvider>, Box<dyn WeatherProvider>)> {
    let api_key = config.api_key()?;
    let client = OpenWeatherClient::new(api_key.to_owned());

    Ok((Box::new(client.clone()), Box::new(client)))
}
