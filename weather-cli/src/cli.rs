use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, FileStore, Tab, TemperatureUnit, WeatherApp, provider_from_config,
};

use crate::{session, view};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather forecasts in the terminal")]
pub struct Cli {
    /// Show temperatures in Fahrenheit.
    #[arg(long, global = true)]
    pub fahrenheit: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key and default city.
    Configure,

    /// Current conditions and the week ahead for the saved city.
    Now,

    /// Today's hourly forecast.
    Hourly {
        /// Also show the full details of this hour (0-23).
        #[arg(long)]
        hour: Option<usize>,
    },

    /// Forecast for the days after today.
    Daily,

    /// Search for a city; with --pick, make it the saved city.
    Search {
        /// At least three characters.
        query: String,

        /// 1-based index of the result to select.
        #[arg(long)]
        pick: Option<usize>,
    },

    /// Tabbed session (the default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            command => run_app(command, self.fahrenheit).await,
        }
    }
}

async fn run_app(command: Command, fahrenheit: bool) -> Result<()> {
    let config = Config::load()?;
    let mut app = build_app(&config)?;
    if fahrenheit {
        app.set_unit(TemperatureUnit::Fahrenheit);
    }

    match command {
        Command::Configure => configure()?,
        Command::Now => {
            app.start().await;
            print!("{}", view::render_current(app.current(), app.unit()));
        }
        Command::Hourly { hour } => {
            app.switch_to(Tab::Hourly).await;
            if let Some(hour) = hour {
                if app.hourly_mut().open_detail(hour).is_none() && app.hourly().data().is_some() {
                    bail!("No forecast entry for hour {hour}");
                }
            }
            print!("{}", view::render_hourly(app.hourly(), app.unit()));
        }
        Command::Daily => {
            app.switch_to(Tab::Daily).await;
            print!("{}", view::render_daily(app.daily(), app.unit()));
        }
        Command::Search { query, pick } => search(&mut app, &query, pick).await?,
        Command::Interactive => session::run(&mut app).await?,
    }

    app.shutdown();
    Ok(())
}

fn build_app(config: &Config) -> Result<WeatherApp> {
    let provider = provider_from_config(config)?;
    let store = FileStore::open_default().context("Failed to locate the preference file")?;
    tracing::debug!(path = %store.path().display(), "using preference file");

    Ok(WeatherApp::new(Arc::new(provider), Arc::new(store), config.app_settings()))
}

async fn search(app: &mut WeatherApp, query: &str, pick: Option<usize>) -> Result<()> {
    app.start().await;

    let home = app.current_mut();
    home.view_mut().search_mut().open();
    home.search_input(query);
    if home.settle_search().await.is_none() {
        bail!("Type at least 3 characters to search.");
    }

    let search = home.view().search();
    if let Some(err) = search.last_error() {
        bail!("Search failed: {}", err.user_message());
    }
    let candidates = search.candidates().to_vec();
    if candidates.is_empty() {
        println!("No matching locations.");
        return Ok(());
    }

    let Some(pick) = pick else {
        for (i, candidate) in candidates.iter().enumerate() {
            println!("{}. {}", i + 1, candidate.label());
        }
        return Ok(());
    };

    let candidate = pick
        .checked_sub(1)
        .and_then(|i| candidates.get(i))
        .with_context(|| format!("--pick must be between 1 and {}", candidates.len()))?;

    if !app.select_location(candidate).await {
        let reason = app
            .current()
            .state()
            .error()
            .map(|e| e.user_message())
            .unwrap_or_else(|| "unknown error".to_string());
        bail!("Could not load {}: {reason}", candidate.name);
    }
    print!("{}", view::render_current(app.current(), app.unit()));
    Ok(())
}

/// Interactive configuration of the API key and default city.
fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(&api_key);
    }

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    if !city.trim().is_empty() {
        config.default_city = city.trim().to_string();
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.fahrenheit);
    }

    #[test]
    fn fahrenheit_flag_is_global() {
        let cli = Cli::try_parse_from(["weather", "daily", "--fahrenheit"]).unwrap();
        assert!(cli.fahrenheit);
        assert!(matches!(cli.command, Some(Command::Daily)));
    }

    #[test]
    fn search_takes_query_and_pick() {
        let cli = Cli::try_parse_from(["weather", "search", "Par", "--pick", "2"]).unwrap();
        match cli.command {
            Some(Command::Search { query, pick }) => {
                assert_eq!(query, "Par");
                assert_eq!(pick, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn hourly_hour_option() {
        let cli = Cli::try_parse_from(["weather", "hourly", "--hour", "13"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Hourly { hour: Some(13) })));
    }
}
