//! Derived rendering policy: nothing here is stored, all of it is computed
//! from model values and the current [`TemperatureUnit`].

use crate::model::Temperature;
use crate::prefs::TemperatureUnit;

/// Placeholder shown for any value the provider did not send.
pub const MISSING: &str = "--";

/// US EPA air-quality scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirQualityLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    Unknown,
}

impl AirQualityLevel {
    pub fn from_epa_index(index: Option<i64>) -> Self {
        match index {
            Some(1) => AirQualityLevel::Good,
            Some(2) => AirQualityLevel::Moderate,
            Some(3) => AirQualityLevel::UnhealthyForSensitiveGroups,
            Some(4) => AirQualityLevel::Unhealthy,
            Some(5) => AirQualityLevel::VeryUnhealthy,
            Some(6) => AirQualityLevel::Hazardous,
            _ => AirQualityLevel::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AirQualityLevel::Good => "Good",
            AirQualityLevel::Moderate => "Moderate",
            AirQualityLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AirQualityLevel::Unhealthy => "Unhealthy",
            AirQualityLevel::VeryUnhealthy => "Very Unhealthy",
            AirQualityLevel::Hazardous => "Hazardous",
            AirQualityLevel::Unknown => "Unknown",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AirQualityLevel::Good => "green",
            AirQualityLevel::Moderate => "yellow",
            AirQualityLevel::UnhealthyForSensitiveGroups => "orange",
            AirQualityLevel::Unhealthy => "red",
            AirQualityLevel::VeryUnhealthy => "purple",
            AirQualityLevel::Hazardous => "maroon",
            AirQualityLevel::Unknown => "gray",
        }
    }
}

impl std::fmt::Display for AirQualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn format_temperature(temperature: &Temperature, unit: TemperatureUnit) -> String {
    match temperature.in_unit(unit) {
        Some(value) => format!("{value}{}", unit.symbol()),
        None => MISSING.to_string(),
    }
}

/// Formats an optional reading with its suffix, e.g. `12.5 km/h`.
pub fn format_reading<T: std::fmt::Display>(value: Option<T>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v}{suffix}"),
        None => MISSING.to_string(),
    }
}

pub fn or_missing(text: &str) -> &str {
    if text.is_empty() { MISSING } else { text }
}

/// Fallback asset used for condition text the table does not know.
pub const OTHER_ASSET: &str = "moderaterain";

const CONDITION_ASSETS: &[(&str, &str)] = &[
    ("Partly cloudy", "partlycloudy"),
    ("Moderate rain", "moderaterain"),
    ("Patchy rain possible", "moderaterain"),
    ("Patchy rain nearby", "moderaterain"),
    ("Sunny", "sun"),
    ("Clear", "sun"),
    ("Overcast", "cloud"),
    ("Cloudy", "cloud"),
    ("Light rain", "moderaterain"),
    ("Moderate rain at times", "moderaterain"),
    ("Heavy rain", "heavyrain"),
    ("Heavy rain at times", "heavyrain"),
    ("Moderate or heavy freezing rain", "heavyrain"),
    ("Moderate or heavy rain shower", "heavyrain"),
    ("Moderate or heavy rain with thunder", "heavyrain"),
    ("Mist", "mist"),
];

/// Local asset name for a provider condition text.
pub fn condition_asset(text: &str) -> &'static str {
    let text = text.trim();
    CONDITION_ASSETS
        .iter()
        .find(|(condition, _)| condition.eq_ignore_ascii_case(text))
        .map(|(_, asset)| *asset)
        .unwrap_or(OTHER_ASSET)
}

/// Provider icons come back as `//cdn.weatherapi.com/...`.
pub fn icon_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else if raw.starts_with("//") {
        Some(format!("https:{raw}"))
    } else {
        Some(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epa_scale_maps_all_six_levels() {
        let labels: Vec<&str> =
            (1..=6).map(|i| AirQualityLevel::from_epa_index(Some(i)).label()).collect();
        assert_eq!(
            labels,
            vec![
                "Good",
                "Moderate",
                "Unhealthy for Sensitive Groups",
                "Unhealthy",
                "Very Unhealthy",
                "Hazardous"
            ]
        );
    }

    #[test]
    fn epa_out_of_range_is_unknown() {
        for index in [None, Some(0), Some(7), Some(-1), Some(100)] {
            let level = AirQualityLevel::from_epa_index(index);
            assert_eq!(level, AirQualityLevel::Unknown);
            assert_eq!(level.color(), "gray");
        }
    }

    #[test]
    fn epa_colors() {
        assert_eq!(AirQualityLevel::Good.color(), "green");
        assert_eq!(AirQualityLevel::Hazardous.color(), "maroon");
    }

    #[test]
    fn temperature_formatting_follows_unit() {
        let t = Temperature::new(Some(31.2), Some(88.2));
        assert_eq!(format_temperature(&t, TemperatureUnit::Celsius), "31.2°C");
        assert_eq!(format_temperature(&t, TemperatureUnit::Fahrenheit), "88.2°F");
        assert_eq!(format_temperature(&Temperature::default(), TemperatureUnit::Celsius), "--");
    }

    #[test]
    fn unknown_condition_uses_other_asset() {
        assert_eq!(condition_asset("Sunny"), "sun");
        assert_eq!(condition_asset("partly cloudy "), "partlycloudy");
        assert_eq!(condition_asset("Blizzard"), OTHER_ASSET);
        assert_eq!(condition_asset(""), OTHER_ASSET);
    }

    #[test]
    fn icon_url_adds_scheme() {
        assert_eq!(
            icon_url("//cdn.weatherapi.com/weather/64x64/day/116.png").as_deref(),
            Some("https://cdn.weatherapi.com/weather/64x64/day/116.png")
        );
        assert_eq!(icon_url("https://x/y.png").as_deref(), Some("https://x/y.png"));
        assert_eq!(icon_url(""), None);
    }

    #[test]
    fn readings_fall_back_to_placeholder() {
        assert_eq!(format_reading(Some(12.5), " km/h"), "12.5 km/h");
        assert_eq!(format_reading::<u8>(None, "%"), "--");
        assert_eq!(or_missing(""), "--");
    }
}
