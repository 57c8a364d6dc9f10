use std::time::Duration;
use tracing::{info, warn};

use crate::{
    Forecast, ForecastDays, LocationCandidate,
    prefs::Preferences,
    search::LocationSearch,
    store::CITY_KEY,
    sun::{SunEvent, SunToggle},
};

use super::{ForecastView, Screen};

pub type CurrentScreen = Screen<CurrentView>;

/// Current conditions plus the week strip, search and sunrise/sunset flip.
#[derive(Debug)]
pub struct CurrentView {
    search: LocationSearch,
    sun: Option<SunToggle>,
    sun_period: Duration,
}

impl CurrentView {
    pub fn new(search_delay: Duration, sun_period: Duration) -> Self {
        Self { search: LocationSearch::new(search_delay), sun: None, sun_period }
    }

    pub fn search(&self) -> &LocationSearch {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut LocationSearch {
        &mut self.search
    }

    /// Which of today's sun times is on display.
    pub fn sun_event(&self) -> SunEvent {
        self.sun.as_ref().map(SunToggle::current).unwrap_or(SunEvent::Sunrise)
    }

    pub fn sun_running(&self) -> bool {
        self.sun.as_ref().is_some_and(SunToggle::is_running)
    }
}

impl ForecastView for CurrentView {
    type Data = Forecast;

    const NAME: &'static str = "current";

    fn days(&self) -> ForecastDays {
        ForecastDays::WEEK
    }

    fn project(&self, _city: &str, forecast: Forecast) -> Forecast {
        forecast
    }

    fn on_mount(&mut self) {
        self.sun = Some(SunToggle::start(self.sun_period));
    }

    fn on_teardown(&mut self) {
        self.sun = None;
        self.search.close();
    }
}

impl Screen<CurrentView> {
    /// Shown sun event and its time for today, if loaded.
    pub fn sun_time(&self) -> Option<(SunEvent, &str)> {
        let event = self.view().sun_event();
        let astro = &self.data()?.today()?.astro;
        let time = match event {
            SunEvent::Sunrise => astro.sunrise.as_str(),
            SunEvent::Sunset => astro.sunset.as_str(),
        };
        Some((event, time))
    }

    pub fn search_input(&mut self, text: &str) {
        self.view_mut().search_mut().input(text);
    }

    /// See [`LocationSearch::settle`].
    pub async fn settle_search(&mut self) -> Option<usize> {
        let provider = self.provider();
        self.view_mut().search_mut().settle(provider.as_ref()).await
    }

    /// Loads the candidate's city. On success the city is written to the
    /// store and mirrored into `prefs`. Returns whether the load succeeded.
    /// Blank names are rejected without a request.
    pub async fn select_location(&mut self, candidate: &LocationCandidate, prefs: &mut Preferences) -> bool {
        self.view_mut().search_mut().close();

        let city = candidate.name.trim();
        if city.is_empty() {
            return false;
        }
        self.load(city.to_string()).await;

        if !self.state().is_ready() {
            return false;
        }

        if let Err(e) = self.store().set(CITY_KEY, city) {
            warn!(%city, error = %e, "could not persist selected city");
        }
        prefs.set_selected_city(city);
        info!(%city, "location selected");
        true
    }
}
