use crate::{Forecast, ForecastDays, Hour};

use super::{ForecastView, Screen};

pub type HourlyScreen = Screen<HourlyView>;

/// Today's hourly entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyForecast {
    pub city: String,
    pub hours: Vec<Hour>,
}

/// Tracks which hour, if any, the detail overlay shows.
#[derive(Debug, Clone, Default)]
pub struct HourlyView {
    selected: Option<usize>,
}

impl ForecastView for HourlyView {
    type Data = HourlyForecast;

    const NAME: &'static str = "hourly";

    fn days(&self) -> ForecastDays {
        ForecastDays::TODAY
    }

    fn project(&self, city: &str, forecast: Forecast) -> HourlyForecast {
        let hours = forecast.days.into_iter().next().map(|d| d.hours).unwrap_or_default();
        HourlyForecast { city: city.to_string(), hours }
    }

    // Indices refer to the previous hour list.
    fn on_loaded(&mut self) {
        self.selected = None;
    }

    fn on_teardown(&mut self) {
        self.selected = None;
    }
}

impl Screen<HourlyView> {
    /// Opens the detail overlay for `index`; out-of-range indices leave it closed.
    pub fn open_detail(&mut self, index: usize) -> Option<&Hour> {
        let exists = self.data().is_some_and(|d| index < d.hours.len());
        self.view_mut().selected = exists.then_some(index);
        self.detail()
    }

    pub fn close_detail(&mut self) {
        self.view_mut().selected = None;
    }

    pub fn detail(&self) -> Option<&Hour> {
        let index = self.view().selected?;
        self.data()?.hours.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::ScreenDeps;
    use crate::store::MemoryStore;
    use crate::test_support::FakeProvider;
    use std::sync::Arc;

    fn screen(provider: &Arc<FakeProvider>) -> HourlyScreen {
        Screen::new(
            HourlyView::default(),
            ScreenDeps {
                provider: provider.clone(),
                store: Arc::new(MemoryStore::new()),
                default_city: "lagos".into(),
            },
        )
    }

    #[tokio::test]
    async fn requests_one_day_and_keeps_its_hours() {
        let provider = Arc::new(FakeProvider::new());
        let mut screen = screen(&provider);
        screen.mount().await;

        assert_eq!(provider.requests(), vec![("lagos".to_string(), 1)]);
        let data = screen.data().unwrap();
        assert_eq!(data.hours.len(), 24);
        assert_eq!(data.hours[13].hour_of_day(), Some(13));
    }

    #[tokio::test]
    async fn detail_overlay_opens_and_clears() {
        let provider = Arc::new(FakeProvider::new());
        let mut screen = screen(&provider);
        screen.mount().await;

        let hour = screen.open_detail(5).cloned().unwrap();
        assert_eq!(hour.hour_of_day(), Some(5));
        assert_eq!(screen.detail(), Some(&hour));

        screen.close_detail();
        assert!(screen.detail().is_none());
    }

    #[tokio::test]
    async fn detail_out_of_range_stays_closed() {
        let provider = Arc::new(FakeProvider::new());
        let mut screen = screen(&provider);
        assert!(screen.open_detail(0).is_none());

        screen.mount().await;
        assert!(screen.open_detail(24).is_none());
    }

    #[tokio::test]
    async fn reload_clears_selection() {
        let provider = Arc::new(FakeProvider::new());
        let mut screen = screen(&provider);
        screen.mount().await;
        screen.open_detail(3);

        screen.load("Paris".into()).await;
        assert!(screen.detail().is_none());
    }

    #[test]
    fn empty_forecast_has_no_hours() {
        let hourly = HourlyView::default().project("lagos", Forecast::default());
        assert!(hourly.hours.is_empty());
    }
}
