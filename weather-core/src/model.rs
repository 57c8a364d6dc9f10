use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::display::AirQualityLevel;
use crate::prefs::TemperatureUnit;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A temperature as reported by the provider in both scales.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Temperature {
    pub celsius: Option<f64>,
    pub fahrenheit: Option<f64>,
}

impl Temperature {
    pub fn new(celsius: Option<f64>, fahrenheit: Option<f64>) -> Self {
        Self { celsius, fahrenheit }
    }

    pub fn in_unit(&self, unit: TemperatureUnit) -> Option<f64> {
        match unit {
            TemperatureUnit::Celsius => self.celsius,
            TemperatureUnit::Fahrenheit => self.fahrenheit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    pub text: String,
    /// Icon path as returned by the provider, usually protocol-relative.
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub localtime: String,
    pub timezone: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Current {
    pub temperature: Temperature,
    pub feels_like: Temperature,
    pub condition: Condition,
    pub wind_kph: Option<f64>,
    pub wind_dir: String,
    pub humidity: Option<u8>,
    pub uv: Option<f64>,
    pub cloud: Option<u8>,
    pub vis_km: Option<f64>,
    pub epa_index: Option<i64>,
    pub is_day: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Alert {
    pub headline: String,
    pub event: String,
    pub severity: String,
    pub description: String,
}

/// Aggregated values for a whole forecast day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySummary {
    pub max: Temperature,
    pub min: Temperature,
    pub avg: Temperature,
    pub condition: Condition,
    pub chance_of_rain: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hour {
    /// Local time, `YYYY-MM-DD HH:MM`.
    pub time: String,
    pub temperature: Temperature,
    pub feels_like: Temperature,
    pub condition: Condition,
    pub wind_kph: Option<f64>,
    pub humidity: Option<u8>,
    pub uv: Option<f64>,
    pub cloud: Option<u8>,
    pub vis_km: Option<f64>,
    pub epa_index: Option<i64>,
}

impl Hour {
    pub fn hour_of_day(&self) -> Option<u32> {
        NaiveDateTime::parse_from_str(&self.time, DATE_TIME_FORMAT)
            .ok()
            .map(|t| t.hour())
    }

    pub fn air_quality(&self) -> AirQualityLevel {
        AirQualityLevel::from_epa_index(self.epa_index)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Day {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub summary: DaySummary,
    pub hours: Vec<Hour>,
    pub astro: Astro,
    pub alerts: Vec<Alert>,
}

impl Day {
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Full English weekday name, e.g. "Monday".
    pub fn weekday_name(&self) -> Option<String> {
        self.naive_date().map(|d| d.format("%A").to_string())
    }

    pub fn first_alert_event(&self) -> Option<&str> {
        self.alerts
            .first()
            .map(|a| a.event.as_str())
            .filter(|e| !e.is_empty())
    }
}

/// A complete forecast payload. `days` keeps the provider's order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    pub location: Location,
    pub current: Current,
    pub days: Vec<Day>,
}

impl Forecast {
    pub fn today(&self) -> Option<&Day> {
        self.days.first()
    }
}

/// Result of a location search. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationCandidate {
    pub name: String,
    pub region: String,
    pub country: String,
}

impl LocationCandidate {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self { name: name.into(), region: String::new(), country: country.into() }
    }

    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}
