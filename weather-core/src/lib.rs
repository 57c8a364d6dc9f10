//! Core library for the `weather` app.
//!
//! This crate defines:
//! - The weatherapi.com client and the forecast data model
//! - Persisted and app-lifetime preferences (city, temperature unit)
//! - The Home / Hourly / Daily screen controllers and tab navigation
//! - Rendering policy shared by front ends (units, air quality, icons)
//!
//! It is used by `weather-cli`, but can also drive other front ends.

pub mod app;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod model;
pub mod prefs;
pub mod provider;
pub mod screen;
pub mod search;
pub mod store;
pub mod sun;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{AppSettings, Tab, WeatherApp};
pub use config::Config;
pub use error::{FetchError, StoreError};
pub use model::{Day, Forecast, Hour, LocationCandidate};
pub use prefs::{Preferences, TemperatureUnit};
pub use provider::{ForecastDays, WeatherProvider, provider_from_config, weatherapi::WeatherApiProvider};
pub use screen::LoadState;
pub use store::{FileStore, MemoryStore, PreferenceStore};
