use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical place identity as reported by geocoding. May differ in
/// spelling or case from what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    #[serde(rename = "countryCode")]
    pub country_code: String,
}

/// Current conditions for one location. Temperatures are kept in the
/// provider's native Kelvin; conversion to Celsius happens at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub main: String,
    pub description: String,
    pub icon: String,
    pub temperature_k: f64,
    pub min_temperature_k: f64,
    pub max_temperature_k: f64,
    pub humidity_pct: u8,
}

/// The full result of one successful lookup. Immutable once created;
/// a new search replaces the whole record, never merges into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub location: Location,
    pub weather: WeatherSnapshot,
    pub searched_at: DateTime<Utc>,
}

impl SearchRecord {
    /// Project out the fields needed to replay this search later.
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            location: self.location.clone(),
            searched_at: self.searched_at,
        }
    }
}

/// One row of the search history: where and when, nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub location: Location,
    pub searched_at: DateTime<Utc>,
}

/// The only numeric transform in the system. Applied once, at display time.
pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - 273.15
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn kelvin_to_celsius_fixed_points() {
        assert_eq!(kelvin_to_celsius(273.15), 0.0);
        assert_eq!(kelvin_to_celsius(0.0), -273.15);
        assert!((kelvin_to_celsius(288.15) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn history_entry_serde_preserves_instant() {
        let entry = HistoryEntry {
            location: Location {
                city: "London".to_string(),
                country_code: "GB".to_string(),
            },
            searched_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap(),
        };

        let json = serde_json::to_string(&entry).expect("serialize");
        let back: HistoryEntry = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(back, entry);
        assert_eq!(back.searched_at, entry.searched_at);
    }

    #[test]
    fn search_record_projects_location_and_instant() {
        let record = SearchRecord {
            location: Location {
                city: "Oslo".to_string(),
                country_code: "NO".to_string(),
            },
            weather: WeatherSnapshot {
                main: "Snow".to_string(),
                description: "light snow".to_string(),
                icon: "13d".to_string(),
                temperature_k: 270.0,
                min_temperature_k: 268.0,
                max_temperature_k: 271.5,
                humidity_pct: 82,
            },
            searched_at: Utc::now(),
        };

        let entry = record.to_history_entry();
        assert_eq!(entry.location, record.location);
        assert_eq!(entry.searched_at, record.searched_at);
    }
}
