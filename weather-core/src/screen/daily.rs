use crate::{Day, Forecast, ForecastDays};

use super::{ForecastView, Screen};

pub type DailyScreen = Screen<DailyView>;

/// Days after today, in provider order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyForecast {
    pub city: String,
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DailyView;

impl ForecastView for DailyView {
    type Data = DailyForecast;

    const NAME: &'static str = "daily";

    fn days(&self) -> ForecastDays {
        ForecastDays::WEEK_AHEAD
    }

    fn project(&self, city: &str, forecast: Forecast) -> DailyForecast {
        DailyForecast { city: city.to_string(), days: forecast.days.into_iter().skip(1).collect() }
    }
}
