//! Tab navigation over the three screens.

use std::{sync::Arc, time::Duration};
use tracing::info;

use crate::{
    LocationCandidate, WeatherProvider,
    prefs::{Preferences, TemperatureUnit},
    screen::{
        CurrentScreen, CurrentView, DailyScreen, DailyView, HourlyScreen, HourlyView, Screen,
        ScreenDeps,
    },
    store::{PreferenceStore, resolve_city},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Home,
    Hourly,
    Daily,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Hourly, Tab::Daily];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Hourly => "Hourly",
            Tab::Daily => "Daily",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Tunables injected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub default_city: String,
    pub search_debounce: Duration,
    pub sun_toggle_period: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_city: "lagos".to_string(),
            search_debounce: Duration::from_millis(1200),
            sun_toggle_period: Duration::from_secs(10),
        }
    }
}

/// Owns the preferences and the screens; the single place state is mutated.
#[derive(Debug)]
pub struct WeatherApp {
    prefs: Preferences,
    current: CurrentScreen,
    hourly: HourlyScreen,
    daily: DailyScreen,
    active: Tab,
}

impl WeatherApp {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        store: Arc<dyn PreferenceStore>,
        settings: AppSettings,
    ) -> Self {
        // Screens mount on the persisted city; the preferences have to agree.
        let city = resolve_city(store.as_ref(), &settings.default_city);
        let deps = ScreenDeps { provider, store, default_city: settings.default_city };

        Self {
            prefs: Preferences::new(city),
            current: Screen::new(
                CurrentView::new(settings.search_debounce, settings.sun_toggle_period),
                deps.clone(),
            ),
            hourly: Screen::new(HourlyView::default(), deps.clone()),
            daily: Screen::new(DailyView, deps),
            active: Tab::Home,
        }
    }

    /// Shows the Home tab for the first time.
    pub async fn start(&mut self) {
        self.active = Tab::Home;
        self.current.mount().await;
    }

    /// Focuses `tab`, mounting it on first visit. Returns whether a forecast
    /// request was issued.
    pub async fn switch_to(&mut self, tab: Tab) -> bool {
        self.active = tab;
        match tab {
            Tab::Home => self.current.focus().await,
            Tab::Hourly => self.hourly.focus().await,
            Tab::Daily => self.daily.focus().await,
        }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.prefs.unit()
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.prefs.set_unit(unit);
    }

    /// Rendering picks the unit up; nothing is refetched.
    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        let unit = self.prefs.toggle_unit();
        info!(%unit, "temperature unit toggled");
        unit
    }

    pub async fn select_location(&mut self, candidate: &LocationCandidate) -> bool {
        self.current.select_location(candidate, &mut self.prefs).await
    }

    pub fn current(&self) -> &CurrentScreen {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut CurrentScreen {
        &mut self.current
    }

    pub fn hourly(&self) -> &HourlyScreen {
        &self.hourly
    }

    pub fn hourly_mut(&mut self) -> &mut HourlyScreen {
        &mut self.hourly
    }

    pub fn daily(&self) -> &DailyScreen {
        &self.daily
    }

    pub fn shutdown(&mut self) {
        self.current.teardown();
        self.hourly.teardown();
        self.daily.teardown();
    }
}

impl Drop for WeatherApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::format_temperature;
    use crate::store::{CITY_KEY, MemoryStore};
    use crate::test_support::FakeProvider;

    fn app(provider: &Arc<FakeProvider>, store: &Arc<MemoryStore>) -> WeatherApp {
        WeatherApp::new(provider.clone(), store.clone(), AppSettings::default())
    }

    #[tokio::test]
    async fn tabs_mount_lazily_with_their_own_day_counts() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());
        let mut app = app(&provider, &store);

        app.start().await;
        assert!(!app.hourly().is_mounted());

        assert!(app.switch_to(Tab::Hourly).await);
        assert!(app.switch_to(Tab::Daily).await);
        assert_eq!(app.active(), Tab::Daily);

        assert_eq!(
            provider.requests(),
            vec![("lagos".to_string(), 7), ("lagos".to_string(), 1), ("lagos".to_string(), 8)]
        );
    }

    #[tokio::test]
    async fn switching_back_without_city_change_is_free() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());
        let mut app = app(&provider, &store);

        app.start().await;
        app.switch_to(Tab::Hourly).await;
        let calls = provider.forecast_calls();

        assert!(!app.switch_to(Tab::Home).await);
        assert!(!app.switch_to(Tab::Hourly).await);
        assert_eq!(provider.forecast_calls(), calls);
    }

    #[tokio::test]
    async fn selection_on_home_propagates_to_other_tabs() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());
        let mut app = app(&provider, &store);

        app.start().await;
        app.switch_to(Tab::Daily).await;
        app.switch_to(Tab::Home).await;

        assert!(app.select_location(&LocationCandidate::new("Paris", "France")).await);
        assert_eq!(app.prefs().selected_city(), "Paris");
        assert_eq!(store.get(CITY_KEY).as_deref(), Some("Paris"));

        assert!(app.switch_to(Tab::Daily).await);
        assert_eq!(app.daily().data().unwrap().city, "Paris");
    }

    #[tokio::test]
    async fn persisted_city_survives_restart() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::with_city("Paris"));
        let mut app = app(&provider, &store);
        assert_eq!(app.prefs().selected_city(), "Paris");

        app.start().await;
        assert_eq!(app.current().city(), Some("Paris"));
        assert_eq!(app.prefs().selected_city(), "Paris");
        assert_eq!(provider.requests(), vec![("Paris".to_string(), 7)]);
    }

    #[tokio::test]
    async fn empty_store_starts_on_default_city() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());
        let app = app(&provider, &store);
        assert_eq!(app.prefs().selected_city(), "lagos");
    }

    #[tokio::test]
    async fn double_toggle_restores_display_without_fetching() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());
        let mut app = app(&provider, &store);
        app.start().await;

        let temp = app.current().data().unwrap().days[0].summary.avg;
        let before = format_temperature(&temp, app.unit());
        let calls = provider.forecast_calls();

        app.toggle_unit();
        assert_eq!(format_temperature(&temp, app.unit()), "82.4°F");
        app.toggle_unit();

        assert_eq!(format_temperature(&temp, app.unit()), before);
        assert_eq!(provider.forecast_calls(), calls);
    }

    #[tokio::test]
    async fn shutdown_stops_sun_toggle() {
        let provider = Arc::new(FakeProvider::new());
        let store = Arc::new(MemoryStore::new());
        let mut app = app(&provider, &store);
        app.start().await;
        assert!(app.current().view().sun_running());

        app.shutdown();
        assert!(!app.current().is_mounted());
        assert!(!app.current().view().sun_running());
    }
}
