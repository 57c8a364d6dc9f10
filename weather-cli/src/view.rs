//! Plain-text rendering of the three screens.

use std::fmt::Write;

use chrono::NaiveDate;
use weather_core::{
    Day, Forecast, Hour, LoadState, TemperatureUnit,
    display::{MISSING, condition_asset, format_reading, format_temperature, icon_url, or_missing},
    screen::{CurrentScreen, DailyScreen, HourlyScreen},
    sun::SunEvent,
};

fn status_line<T>(state: &LoadState<T>) -> Option<String> {
    match state {
        LoadState::Idle | LoadState::Loading => Some("Loading...".to_string()),
        LoadState::Failed(e) => Some(format!("Could not load forecast: {}", e.user_message())),
        LoadState::Ready(_) => None,
    }
}

pub fn render_current(screen: &CurrentScreen, unit: TemperatureUnit) -> String {
    let mut out = String::new();
    if let Some(status) = status_line(screen.state()) {
        let _ = writeln!(out, "{status}");
        if screen.state().is_loading() {
            return out;
        }
    }

    // A failed load still renders the layout with placeholders.
    let fallback = Forecast::default();
    let forecast = screen.data().unwrap_or(&fallback);
    let current = &forecast.current;

    let _ = writeln!(
        out,
        "{}, {}",
        or_missing(&forecast.location.name),
        or_missing(&forecast.location.country)
    );
    let _ = writeln!(out, "[{}]", condition_asset(&current.condition.text));
    let _ = writeln!(out, "{}", format_temperature(&current.temperature, unit));
    let _ = writeln!(out, "{}", or_missing(&current.condition.text));

    let (sun_label, sun_time) = match screen.sun_time() {
        Some((event, time)) => (event.label(), or_missing(time)),
        None => (SunEvent::Sunrise.label(), MISSING),
    };
    let _ = writeln!(
        out,
        "Wind {}   Humidity {}   {} {}",
        format_reading(current.wind_kph, "km"),
        format_reading(current.humidity, "%"),
        sun_label,
        sun_time,
    );

    let _ = writeln!(out, "\nDaily forecast");
    for day in &forecast.days {
        let name = day.weekday_name().unwrap_or_else(|| MISSING.to_string());
        let _ = writeln!(
            out,
            "  {:<10} {:>8}  [{}]",
            name,
            format_temperature(&day.summary.avg, unit),
            condition_asset(&day.summary.condition.text)
        );
    }

    let search = screen.view().search();
    if search.is_open() {
        let _ = writeln!(out, "\nSearch results");
        for (i, candidate) in search.candidates().iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, candidate.label());
        }
    }

    out
}

fn hour_label(hour: &Hour) -> String {
    match hour.hour_of_day() {
        Some(h) => format!("{h}:00"),
        None => MISSING.to_string(),
    }
}

pub fn render_hour_row(hour: &Hour, unit: TemperatureUnit) -> String {
    format!(
        "{:>5}  {:>8}  {}  {}",
        hour_label(hour),
        format_temperature(&hour.temperature, unit),
        or_missing(&hour.condition.text),
        icon_url(&hour.condition.icon).unwrap_or_default(),
    )
}

pub fn render_hourly(screen: &HourlyScreen, unit: TemperatureUnit) -> String {
    let mut out = String::new();
    if let Some(status) = status_line(screen.state()) {
        let _ = writeln!(out, "{status}");
    }
    let Some(data) = screen.data() else {
        return out;
    };

    let _ = writeln!(out, "Hourly Forecast for {}", data.city);
    for hour in &data.hours {
        let _ = writeln!(out, "{}", render_hour_row(hour, unit));
    }

    if let Some(hour) = screen.detail() {
        let _ = write!(out, "\n{}", render_hour_detail(hour, unit));
    }
    out
}

pub fn render_hour_detail(hour: &Hour, unit: TemperatureUnit) -> String {
    let aq = hour.air_quality();
    let mut out = String::new();
    let _ = writeln!(out, "Details for {}", hour_label(hour));
    let _ = writeln!(out, "  {}", format_temperature(&hour.temperature, unit));
    let _ = writeln!(out, "  {}", or_missing(&hour.condition.text));
    let _ = writeln!(out, "  Feels like: {}", format_temperature(&hour.feels_like, unit));
    let _ = writeln!(out, "  Wind Speed: {}", format_reading(hour.wind_kph, " km/h"));
    let _ = writeln!(out, "  Humidity: {}", format_reading(hour.humidity, "%"));
    let _ = writeln!(out, "  UV Index: {}", format_reading(hour.uv, ""));
    let _ = writeln!(out, "  Cloud Coverage: {}", format_reading(hour.cloud, "%"));
    let _ = writeln!(out, "  Visibility: {}", format_reading(hour.vis_km, " km"));
    let _ = writeln!(out, "  Air Quality: {} ({})", aq.label(), aq.color());
    out
}

fn day_date(day: &Day) -> String {
    day.naive_date()
        .map(|d: NaiveDate| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| or_missing(&day.date).to_string())
}

pub fn render_daily(screen: &DailyScreen, unit: TemperatureUnit) -> String {
    let mut out = String::new();
    if let Some(status) = status_line(screen.state()) {
        let _ = writeln!(out, "{status}");
    }
    let Some(data) = screen.data() else {
        return out;
    };

    let _ = writeln!(out, "Daily Forecast for {}", data.city);
    for day in &data.days {
        let _ = writeln!(out, "{}", day_date(day));
        let _ = writeln!(
            out,
            "  {:>8}  {}  {}",
            format_temperature(&day.summary.avg, unit),
            or_missing(&day.summary.condition.text),
            icon_url(&day.summary.condition.icon).unwrap_or_default(),
        );
        let _ = writeln!(out, "  {}", day.first_alert_event().unwrap_or("No alerts"));
    }
    out
}
