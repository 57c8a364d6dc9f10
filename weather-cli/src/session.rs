//! Interactive tabbed session.
//!
//! Prompts block, so each one runs on the blocking pool; the sunrise/sunset
//! timer keeps ticking on the runtime meanwhile.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use weather_core::{Tab, WeatherApp};

use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Open(Tab),
    Search,
    HourDetails,
    ToggleUnit,
    Quit,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Open(tab) => write!(f, "Go to {tab}"),
            Action::Search => f.write_str("Search for a city"),
            Action::HourDetails => f.write_str("Hour details"),
            Action::ToggleUnit => f.write_str("Toggle °C / °F"),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

fn actions_for(active: Tab) -> Vec<Action> {
    let mut actions: Vec<Action> =
        Tab::ALL.into_iter().filter(|t| *t != active).map(Action::Open).collect();
    match active {
        Tab::Home => actions.insert(0, Action::Search),
        Tab::Hourly => actions.insert(0, Action::HourDetails),
        Tab::Daily => {}
    }
    actions.push(Action::ToggleUnit);
    actions.push(Action::Quit);
    actions
}

/// Runs a blocking prompt off the runtime. Esc and Ctrl-C read as `None`.
async fn ask<T, F>(prompt: F) -> Result<Option<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    match tokio::task::spawn_blocking(prompt).await? {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn render(app: &WeatherApp) -> String {
    let unit = app.unit();
    match app.active() {
        Tab::Home => view::render_current(app.current(), unit),
        Tab::Hourly => view::render_hourly(app.hourly(), unit),
        Tab::Daily => view::render_daily(app.daily(), unit),
    }
}

pub async fn run(app: &mut WeatherApp) -> Result<()> {
    app.start().await;

    loop {
        println!("\n=== {} ({}) ===", app.active(), app.prefs().selected_city());
        print!("{}", render(app));

        let actions = actions_for(app.active());
        let Some(action) = ask(move || Select::new("What next?", actions).prompt()).await? else {
            break;
        };

        match action {
            Action::Open(tab) => {
                app.switch_to(tab).await;
            }
            Action::Search => search(app).await?,
            Action::HourDetails => hour_details(app).await?,
            Action::ToggleUnit => {
                app.toggle_unit();
            }
            Action::Quit => break,
        }
    }

    app.shutdown();
    Ok(())
}

async fn search(app: &mut WeatherApp) -> Result<()> {
    let home = app.current_mut();
    home.view_mut().search_mut().open();

    let query = ask(|| Text::new("Search for any city:").prompt()).await?;
    let Some(query) = query else {
        home.view_mut().search_mut().close();
        return Ok(());
    };

    home.search_input(&query);
    if home.settle_search().await.is_none() {
        println!("Type at least 3 characters to search.");
        home.view_mut().search_mut().close();
        return Ok(());
    }

    let candidates = home.view().search().candidates().to_vec();
    if candidates.is_empty() {
        println!("No matching locations.");
        home.view_mut().search_mut().close();
        return Ok(());
    }

    let labels: Vec<String> = candidates.iter().map(|c| c.label()).collect();
    let picked = ask(move || Select::new("Choose a location:", labels).raw_prompt()).await?;
    match picked.and_then(|choice| candidates.get(choice.index).cloned()) {
        Some(candidate) => {
            if !app.select_location(&candidate).await {
                println!("Could not load {}.", candidate.name);
            }
        }
        None => app.current_mut().view_mut().search_mut().close(),
    }
    Ok(())
}

async fn hour_details(app: &mut WeatherApp) -> Result<()> {
    let unit = app.unit();
    let rows: Vec<String> = match app.hourly().data() {
        Some(data) => data.hours.iter().map(|h| view::render_hour_row(h, unit)).collect(),
        None => return Ok(()),
    };
    if rows.is_empty() {
        return Ok(());
    }

    let picked = ask(move || Select::new("Which hour?", rows).with_page_size(12).raw_prompt()).await?;
    let Some(choice) = picked else {
        return Ok(());
    };

    if let Some(hour) = app.hourly_mut().open_detail(choice.index) {
        print!("{}", view::render_hour_detail(hour, unit));
        ask(|| Select::new("", vec!["Close"]).prompt()).await?;
    }
    app.hourly_mut().close_detail();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_offers_search_first() {
        let actions = actions_for(Tab::Home);
        assert_eq!(actions[0], Action::Search);
        assert!(!actions.contains(&Action::Open(Tab::Home)));
        assert_eq!(actions.last(), Some(&Action::Quit));
    }

    #[test]
    fn hourly_offers_details() {
        let actions = actions_for(Tab::Hourly);
        assert_eq!(actions[0], Action::HourDetails);
        assert!(actions.contains(&Action::Open(Tab::Home)));
        assert!(!actions.contains(&Action::Search));
    }

    #[test]
    fn daily_has_only_navigation() {
        let actions = actions_for(Tab::Daily);
        assert_eq!(
            actions,
            vec![Action::Open(Tab::Home), Action::Open(Tab::Hourly), Action::ToggleUnit, Action::Quit]
        );
    }
}
