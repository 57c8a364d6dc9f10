use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument, warn};

use crate::{
    FetchError,
    model::{
        Alert, Astro, Condition, Current, Day, DaySummary, Forecast, Hour, Location,
        LocationCandidate, Temperature,
    },
};

use super::{ForecastDays, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, "issuing request");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<WaErrorEnvelope>(&body) {
                return Err(FetchError::Provider {
                    code: envelope.error.code,
                    message: envelope.error.message,
                });
            }
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_forecast(&self, city: &str, days: ForecastDays) -> Result<Forecast, FetchError> {
        let days = days.to_string();
        let parsed: WaForecastResponse = self
            .get_json("forecast.json", &[("q", city), ("days", &days), ("aqi", "yes")])
            .await
            .inspect_err(|e| warn!(city, error = %e, "forecast request failed"))?;

        Ok(parsed.into())
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_locations(&self, query: &str) -> Result<Vec<LocationCandidate>, FetchError> {
        let parsed: Vec<WaSearchResult> = self
            .get_json("search.json", &[("q", query)])
            .await
            .inspect_err(|e| warn!(query, error = %e, "location search failed"))?;

        Ok(parsed
            .into_iter()
            .map(|r| LocationCandidate { name: r.name, region: r.region, country: r.country })
            .collect())
    }
}

// Wire types. Every leaf is optional or defaulted, and null reads as missing,
// so a partial payload still decodes into a partially filled model.

#[derive(Debug, Deserialize)]
struct WaErrorEnvelope {
    error: WaError,
}

#[derive(Debug, Deserialize)]
struct WaError {
    code: i64,
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaLocation {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    region: String,
    #[serde(deserialize_with = "null_as_default")]
    country: String,
    #[serde(deserialize_with = "null_as_default")]
    tz_id: String,
    #[serde(deserialize_with = "null_as_default")]
    localtime: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaCondition {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
    #[serde(deserialize_with = "null_as_default")]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaAirQuality {
    #[serde(rename = "us-epa-index")]
    us_epa_index: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaCurrent {
    temp_c: Option<f64>,
    temp_f: Option<f64>,
    feelslike_c: Option<f64>,
    feelslike_f: Option<f64>,
    is_day: Option<u8>,
    #[serde(deserialize_with = "null_as_default")]
    condition: WaCondition,
    wind_kph: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    wind_dir: String,
    humidity: Option<u8>,
    cloud: Option<u8>,
    vis_km: Option<f64>,
    uv: Option<f64>,
    air_quality: Option<WaAirQuality>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaAlert {
    #[serde(deserialize_with = "null_as_default")]
    headline: String,
    #[serde(deserialize_with = "null_as_default")]
    event: String,
    #[serde(deserialize_with = "null_as_default")]
    severity: String,
    #[serde(deserialize_with = "null_as_default")]
    desc: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaDay {
    maxtemp_c: Option<f64>,
    maxtemp_f: Option<f64>,
    mintemp_c: Option<f64>,
    mintemp_f: Option<f64>,
    avgtemp_c: Option<f64>,
    avgtemp_f: Option<f64>,
    daily_chance_of_rain: Option<u8>,
    #[serde(deserialize_with = "null_as_default")]
    condition: WaCondition,
    #[serde(deserialize_with = "null_as_default")]
    alerts: Vec<WaAlert>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaAstro {
    #[serde(deserialize_with = "null_as_default")]
    sunrise: String,
    #[serde(deserialize_with = "null_as_default")]
    sunset: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaHour {
    #[serde(deserialize_with = "null_as_default")]
    time: String,
    temp_c: Option<f64>,
    temp_f: Option<f64>,
    feelslike_c: Option<f64>,
    feelslike_f: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    condition: WaCondition,
    wind_kph: Option<f64>,
    humidity: Option<u8>,
    cloud: Option<u8>,
    vis_km: Option<f64>,
    uv: Option<f64>,
    air_quality: Option<WaAirQuality>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaForecastDay {
    #[serde(deserialize_with = "null_as_default")]
    date: String,
    #[serde(deserialize_with = "null_as_default")]
    day: WaDay,
    #[serde(deserialize_with = "null_as_default")]
    astro: WaAstro,
    #[serde(deserialize_with = "null_as_default")]
    hour: Vec<WaHour>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaForecast {
    #[serde(deserialize_with = "null_as_default")]
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaForecastResponse {
    #[serde(deserialize_with = "null_as_default")]
    location: WaLocation,
    #[serde(deserialize_with = "null_as_default")]
    current: WaCurrent,
    #[serde(deserialize_with = "null_as_default")]
    forecast: WaForecast,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaSearchResult {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    region: String,
    #[serde(deserialize_with = "null_as_default")]
    country: String,
}

/// Explicit `null` reads like a missing key.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

fn epa_index(aq: Option<WaAirQuality>) -> Option<i64> {
    aq.and_then(|a| a.us_epa_index)
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition { text: c.text, icon: c.icon }
    }
}

impl From<WaHour> for Hour {
    fn from(h: WaHour) -> Self {
        Hour {
            time: h.time,
            temperature: Temperature::new(h.temp_c, h.temp_f),
            feels_like: Temperature::new(h.feelslike_c, h.feelslike_f),
            condition: h.condition.into(),
            wind_kph: h.wind_kph,
            humidity: h.humidity,
            uv: h.uv,
            cloud: h.cloud,
            vis_km: h.vis_km,
            epa_index: epa_index(h.air_quality),
        }
    }
}

impl From<WaForecastDay> for Day {
    fn from(d: WaForecastDay) -> Self {
        Day {
            date: d.date,
            summary: DaySummary {
                max: Temperature::new(d.day.maxtemp_c, d.day.maxtemp_f),
                min: Temperature::new(d.day.mintemp_c, d.day.mintemp_f),
                avg: Temperature::new(d.day.avgtemp_c, d.day.avgtemp_f),
                condition: d.day.condition.into(),
                chance_of_rain: d.day.daily_chance_of_rain,
            },
            hours: d.hour.into_iter().map(Hour::from).collect(),
            astro: Astro { sunrise: d.astro.sunrise, sunset: d.astro.sunset },
            alerts: d
                .day
                .alerts
                .into_iter()
                .map(|a| Alert {
                    headline: a.headline,
                    event: a.event,
                    severity: a.severity,
                    description: a.desc,
                })
                .collect(),
        }
    }
}

impl From<WaForecastResponse> for Forecast {
    fn from(r: WaForecastResponse) -> Self {
        let c = r.current;
        Forecast {
            location: Location {
                name: r.location.name,
                region: r.location.region,
                country: r.location.country,
                localtime: r.location.localtime,
                timezone: r.location.tz_id,
            },
            current: Current {
                temperature: Temperature::new(c.temp_c, c.temp_f),
                feels_like: Temperature::new(c.feelslike_c, c.feelslike_f),
                condition: c.condition.into(),
                wind_kph: c.wind_kph,
                wind_dir: c.wind_dir,
                humidity: c.humidity,
                uv: c.uv,
                cloud: c.cloud,
                vis_km: c.vis_km,
                epa_index: epa_index(c.air_quality),
                is_day: c.is_day.unwrap_or(1) == 1,
            },
            // Provider order is chronological; keep it.
            days: r.forecast.forecastday.into_iter().map(Day::from).collect(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
