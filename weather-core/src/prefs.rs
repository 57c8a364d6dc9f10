//! App-lifetime preferences shared by every screen.
//!
//! `Preferences` is owned by [`crate::app::WeatherApp`] and handed to screens
//! explicitly. It never touches durable storage; screens write the city
//! through to the [`crate::store::PreferenceStore`] themselves.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    unit: TemperatureUnit,
    selected_city: String,
}

impl Preferences {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self { unit: TemperatureUnit::default(), selected_city: default_city.into() }
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggle();
        self.unit
    }

    pub fn selected_city(&self) -> &str {
        &self.selected_city
    }

    /// Returns `false` and leaves the city unchanged for blank names.
    pub fn set_selected_city(&mut self, city: &str) -> bool {
        let city = city.trim();
        if city.is_empty() {
            return false;
        }
        self.selected_city = city.to_string();
        true
    }
}
