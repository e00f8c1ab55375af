use std::fmt;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select, Text};

use forecast_core::{
    City, CityCatalog, Config, ForecastClient, ForecastSession, Phase, RecentSearches, projection,
};

use crate::render;
use crate::store::FileRecentStore;

/// Bundled, pre-sorted city list.
const CITY_LIST: &str = include_str!("../assets/city_list.json");

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional default city.
    Configure,

    /// Show the forecast for a city (configured default when omitted).
    Show {
        /// City name, e.g. "Asan".
        city: Option<String>,
    },

    /// Search the bundled city list and show the selected city.
    Search {
        /// Substring to filter city names with.
        query: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city.as_deref()).await,
            Command::Search { query } => search(query.as_deref()).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeather API key:").prompt()?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }
    config.api_key = Some(api_key.to_string());

    let default_city = Text::new("Default city (blank keeps the current one):").prompt()?;
    let default_city = default_city.trim();
    if !default_city.is_empty() {
        config.default_city = Some(default_city.to_string());
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let city = config.city_or_default(city);
    show_city(&config, &city).await
}

/// Drive one forecast session to a rendered report.
///
/// A failed fetch prints the published error and offers an interactive
/// retry; declining leaves the last-good state untouched and exits.
async fn show_city(config: &Config, city: &str) -> Result<()> {
    let api_key = config.require_api_key()?.to_string();
    let client = ForecastClient::new(api_key).with_count(config.count);
    let hourly_cap = config.hourly_cap.unwrap_or(projection::DEFAULT_HOURLY_CAP);
    let session = ForecastSession::with_hourly_cap(Box::new(client), hourly_cap);

    session.request(city).await;

    loop {
        let state = session.snapshot();

        if state.phase == Phase::Failed {
            if let Some(notice) = &state.error {
                eprintln!("{}", notice.message);
            }
            let retry = Confirm::new("Retry?").with_default(true).prompt()?;
            if !retry {
                return Ok(());
            }
            session.retry().await;
            continue;
        }

        if let Some(projections) = &state.projections {
            render::print_projections(projections);
        }
        return Ok(());
    }
}

async fn search(query: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let catalog = CityCatalog::from_json(CITY_LIST).context("Bundled city list is invalid")?;
    let mut recents = RecentSearches::new(Box::new(FileRecentStore::new()?));

    let query = query.unwrap_or("");
    let matches = catalog.filter(query);
    if matches.is_empty() {
        println!("No city matches '{query}'.");
        return Ok(());
    }

    let choices = build_choices(&matches, recents.entries());
    let choice = Select::new("Select a city:", choices).prompt()?;

    recents.select(choice.city.clone());
    show_city(&config, &choice.city.name).await
}

/// Matching recents lead the list, followed by the remaining matches in
/// catalog order.
fn build_choices(matches: &[&City], recents: &[City]) -> Vec<CityChoice> {
    let mut choices: Vec<CityChoice> = recents
        .iter()
        .filter(|recent| matches.iter().any(|city| city.id == recent.id))
        .map(|recent| CityChoice { city: recent.clone(), recent: true })
        .collect();

    for city in matches {
        if !choices.iter().any(|choice| choice.city.id == city.id) {
            choices.push(CityChoice { city: (*city).clone(), recent: false });
        }
    }

    choices
}

struct CityChoice {
    city: City,
    recent: bool,
}

impl fmt::Display for CityChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city.name, self.city.country)?;
        if self.recent {
            write!(f, "  (recent)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::Coordinate;

    fn city(id: i64, name: &str) -> City {
        City {
            id,
            name: name.to_string(),
            coord: Coordinate { lat: 0.0, lon: 0.0 },
            country: "KR".to_string(),
            population: None,
            timezone: None,
            sunrise: None,
            sunset: None,
        }
    }

    #[test]
    fn bundled_city_list_parses_and_is_sorted() {
        let catalog = CityCatalog::from_json(CITY_LIST).expect("bundled list must parse");
        let names: Vec<_> = catalog.cities().iter().map(|c| c.name.as_str()).collect();

        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"Asan"));
    }

    #[test]
    fn recents_lead_the_choice_list_without_duplicates() {
        let seoul = city(1, "Seoul");
        let asan = city(2, "Asan");
        let busan = city(3, "Busan");
        let matches = vec![&asan, &busan, &seoul];
        let recents = vec![seoul.clone()];

        let choices = build_choices(&matches, &recents);

        let rendered: Vec<_> = choices.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["Seoul, KR  (recent)", "Asan, KR", "Busan, KR"]
        );
    }

    #[test]
    fn recents_outside_the_match_set_are_skipped() {
        let asan = city(2, "Asan");
        let matches = vec![&asan];
        let recents = vec![city(1, "Seoul")];

        let choices = build_choices(&matches, &recents);
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].city.name, "Asan");
    }
}
