use crate::{Config, FetchError, Forecast, LocationCandidate, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod weatherapi;

/// Number of days requested from the forecast endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForecastDays(u8);

impl ForecastDays {
    /// Provider ceiling for `days`.
    pub const MAX: u8 = 14;

    /// Today only; the hourly screen needs nothing else.
    pub const TODAY: ForecastDays = ForecastDays(1);
    pub const WEEK: ForecastDays = ForecastDays(7);
    /// Today plus seven following days.
    pub const WEEK_AHEAD: ForecastDays = ForecastDays(8);

    pub fn new(days: u8) -> Result<Self, FetchError> {
        if (1..=Self::MAX).contains(&days) {
            Ok(Self(days))
        } else {
            Err(FetchError::InvalidDays(days))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ForecastDays {
    type Error = FetchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ForecastDays::new(value)
    }
}

impl std::fmt::Display for ForecastDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remote forecast and geocoding source.
///
/// Both calls perform one outbound request each, with no retries and the
/// transport's default timeout.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, city: &str, days: ForecastDays) -> Result<Forecast, FetchError>;

    /// Callers only issue this for queries longer than two characters.
    async fn fetch_locations(&self, query: &str) -> Result<Vec<LocationCandidate>, FetchError>;
}

/// Construct the weatherapi.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.resolved_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for weatherapi.com.\n\
                 Hint: run `weather configure` and enter your API key."
        )
    })?;

    Ok(WeatherApiProvider::with_base_url(api_key, &config.base_url))
}
