//! In-process provider double shared by the unit tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::{
    FetchError, ForecastDays, WeatherProvider,
    model::{Astro, Condition, Day, DaySummary, Forecast, Hour, Location, LocationCandidate, Temperature},
    store::PreferenceStore,
    StoreError,
};

#[derive(Debug, Default)]
pub(crate) struct FakeProvider {
    forecast_calls: AtomicUsize,
    location_calls: AtomicUsize,
    fail_forecast: AtomicBool,
    requests: Mutex<Vec<(String, u8)>>,
    queries: Mutex<Vec<String>>,
    candidates: Vec<LocationCandidate>,
}

impl FakeProvider {
    pub(crate) fn new() -> Self {
        Self {
            candidates: vec![
                LocationCandidate::new("Paris", "France"),
                LocationCandidate::new("Parma", "Italy"),
            ],
            ..Default::default()
        }
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.fail_forecast.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn forecast_calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn location_calls(&self) -> usize {
        self.location_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<(String, u8)> {
        self.requests.lock().clone()
    }

    pub(crate) fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn fetch_forecast(&self, city: &str, days: ForecastDays) -> Result<Forecast, FetchError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push((city.to_string(), days.get()));

        if self.fail_forecast.load(Ordering::SeqCst) {
            return Err(FetchError::Provider {
                code: 1006,
                message: "No matching location found.".into(),
            });
        }
        Ok(sample_forecast(city, days.get()))
    }

    async fn fetch_locations(&self, query: &str) -> Result<Vec<LocationCandidate>, FetchError> {
        self.location_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(query.to_string());
        Ok(self.candidates.clone())
    }
}

/// Store whose writes always fail and whose reads find nothing.
#[derive(Debug, Default)]
pub(crate) struct BrokenStore;

impl PreferenceStore for BrokenStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::NoDataDir)
    }
}

pub(crate) fn sample_forecast(city: &str, days: u8) -> Forecast {
    let days = (0..days)
        .map(|d| {
            let date = format!("2024-05-{:02}", 10 + u32::from(d));
            Day {
                summary: DaySummary {
                    avg: Temperature::new(Some(28.0 + f64::from(d)), Some(82.4)),
                    condition: Condition { text: "Sunny".into(), icon: "//cdn/113.png".into() },
                    ..Default::default()
                },
                hours: (0..24)
                    .map(|h| Hour {
                        time: format!("{date} {h:02}:00"),
                        temperature: Temperature::new(Some(25.0), Some(77.0)),
                        epa_index: Some(1),
                        ..Default::default()
                    })
                    .collect(),
                astro: Astro { sunrise: "06:35 AM".into(), sunset: "07:00 PM".into() },
                date,
                alerts: Vec::new(),
            }
        })
        .collect();

    Forecast {
        location: Location { name: city.to_string(), country: "Nigeria".into(), ..Default::default() },
        days,
        ..Default::default()
    }
}
