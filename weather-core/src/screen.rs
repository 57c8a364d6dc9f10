//! Forecast screens and the load/focus state machine they share.
//!
//! Each screen fetches on first display and, on later focus, only when the
//! persisted city differs from the one it last fetched. Results are applied
//! through a [`FetchTicket`]: a response for anything but the latest request,
//! or one arriving after teardown, is dropped.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    FetchError, Forecast, ForecastDays, WeatherProvider,
    store::{PreferenceStore, resolve_city},
};

pub mod current;
pub mod daily;
pub mod hourly;

pub use current::{CurrentScreen, CurrentView};
pub use daily::{DailyForecast, DailyScreen, DailyView};
pub use hourly::{HourlyForecast, HourlyScreen, HourlyView};

/// What a screen currently has to show.
#[derive(Debug, Default)]
pub enum LoadState<T> {
    /// Never fetched.
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LoadState::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Per-screen behaviour plugged into [`Screen`].
pub trait ForecastView {
    type Data: std::fmt::Debug;

    const NAME: &'static str;

    fn days(&self) -> ForecastDays;

    /// Shapes a fetched forecast into what this screen renders.
    fn project(&self, city: &str, forecast: Forecast) -> Self::Data;

    fn on_mount(&mut self) {}

    fn on_loaded(&mut self) {}

    fn on_teardown(&mut self) {}
}

/// Collaborators every screen is built with.
#[derive(Debug, Clone)]
pub struct ScreenDeps {
    pub provider: Arc<dyn WeatherProvider>,
    pub store: Arc<dyn PreferenceStore>,
    pub default_city: String,
}

/// Identifies one forecast request issued by a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    city: String,
    days: ForecastDays,
}

impl FetchTicket {
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn days(&self) -> ForecastDays {
        self.days
    }

    /// Performs the request this ticket describes.
    pub async fn execute(&self, provider: &dyn WeatherProvider) -> Result<Forecast, FetchError> {
        provider.fetch_forecast(&self.city, self.days).await
    }
}

#[derive(Debug)]
pub struct Screen<V: ForecastView> {
    view: V,
    deps: ScreenDeps,
    state: LoadState<V::Data>,
    last_city: Option<String>,
    seq: u64,
    mounted: bool,
}

impl<V: ForecastView> Screen<V> {
    pub fn new(view: V, deps: ScreenDeps) -> Self {
        Self { view, deps, state: LoadState::Idle, last_city: None, seq: 0, mounted: false }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn state(&self) -> &LoadState<V::Data> {
        &self.state
    }

    pub fn data(&self) -> Option<&V::Data> {
        self.state.data()
    }

    /// City of the most recent request.
    pub fn city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn provider(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.deps.provider)
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.deps.store.as_ref()
    }

    fn persisted_city(&self) -> String {
        resolve_city(self.deps.store.as_ref(), &self.deps.default_city)
    }

    /// First display: always fetches the persisted (or default) city.
    /// Mounting an already mounted screen behaves like [`Screen::focus`].
    pub async fn mount(&mut self) -> bool {
        if self.mounted {
            return self.refresh_if_city_changed().await;
        }
        self.mounted = true;
        self.view.on_mount();

        let city = self.persisted_city();
        debug!(screen = V::NAME, %city, "mounted");
        self.load(city).await;
        true
    }

    /// Returns whether a request was issued.
    pub async fn focus(&mut self) -> bool {
        if !self.mounted {
            return self.mount().await;
        }
        self.refresh_if_city_changed().await
    }

    async fn refresh_if_city_changed(&mut self) -> bool {
        let city = self.persisted_city();
        if self.last_city.as_deref() == Some(city.as_str()) {
            debug!(screen = V::NAME, %city, "focus with unchanged city");
            return false;
        }
        self.load(city).await;
        true
    }

    pub async fn load(&mut self, city: String) {
        let ticket = self.begin_load(city);
        let result = ticket.execute(self.deps.provider.as_ref()).await;
        self.complete_load(ticket, result);
    }

    /// Starts a request, superseding any outstanding one.
    pub fn begin_load(&mut self, city: String) -> FetchTicket {
        self.seq += 1;
        self.last_city = Some(city.clone());
        self.state = LoadState::Loading;
        FetchTicket { seq: self.seq, city, days: self.view.days() }
    }

    /// Applies a result. Returns `false` when the ticket is stale or the
    /// screen has been torn down.
    pub fn complete_load(&mut self, ticket: FetchTicket, result: Result<Forecast, FetchError>) -> bool {
        if !self.mounted || ticket.seq != self.seq {
            debug!(screen = V::NAME, city = %ticket.city, "discarding stale forecast");
            return false;
        }

        self.state = match result {
            Ok(forecast) => {
                info!(screen = V::NAME, city = %ticket.city, days = forecast.days.len(), "forecast loaded");
                LoadState::Ready(self.view.project(&ticket.city, forecast))
            }
            Err(e) => {
                warn!(screen = V::NAME, city = %ticket.city, error = %e, "forecast failed");
                LoadState::Failed(e)
            }
        };
        self.view.on_loaded();
        true
    }

    pub fn teardown(&mut self) {
        if self.mounted {
            self.mounted = false;
            self.view.on_teardown();
        }
    }
}
