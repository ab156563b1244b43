//! Core library for the `skycast` weather search.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The geocoding and weather provider ports, with an OpenWeather client
//! - Lookup orchestration (resolve a city, then fetch its current weather)
//! - The session-scoped search history store
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod history;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod storage;

pub use config::Config;
pub use error::LookupError;
pub use history::{HISTORY_KEY, HistoryStore};
pub use lookup::LookupService;
pub use model::{HistoryEntry, Location, SearchRecord, WeatherSnapshot, kelvin_to_celsius};
pub use provider::{GeocodingProvider, ResolvedPlace, WeatherProvider, providers_from_config};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
