use chrono::Utc;

use crate::{
    error::LookupError,
    model::SearchRecord,
    provider::{GeocodingProvider, WeatherProvider},
};

/// Composes geocoding and weather fetch into one search operation.
///
/// The two stages are strictly sequential: the weather fetch needs the
/// resolver's coordinates, so they are never issued concurrently. The first
/// failing stage propagates as-is and no partial record is produced. This
/// service never touches history state; appending the projection is the
/// caller's job.
#[derive(Debug)]
pub struct LookupService {
    geocoder: Box<dyn GeocodingProvider>,
    weather: Box<dyn WeatherProvider>,
}

impl LookupService {
    pub fn new(geocoder: Box<dyn GeocodingProvider>, weather: Box<dyn WeatherProvider>) -> Self {
        Self { geocoder, weather }
    }

    /// One resolve-then-fetch round trip. `searched_at` is stamped when
    /// composition completes, not when the request starts.
    pub async fn lookup(
        &self,
        city: &str,
        country_code: &str,
    ) -> Result<SearchRecord, LookupError> {
        if city.trim().is_empty() || country_code.trim().is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let place = self.geocoder.resolve(city, country_code).await?;
        let snapshot = self.weather.fetch_current(place.lat, place.lon).await?;

        Ok(SearchRecord {
            location: place.location,
            weather: snapshot,
            searched_at: Utc::now(),
        })
    }
}
