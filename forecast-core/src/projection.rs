//! Pure projections derived from one decoded forecast response.
//!
//! Every derivation is deterministic and total: given any well-formed
//! response the engine returns a full `Projections` value without failing.
//! An empty entry list (which the client already rejects) yields the reduced
//! default set instead.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDateTime, Weekday};

use crate::model::{Coordinate, ForecastEntry, ForecastResponse};

/// Default number of hourly samples: two days at the 3-hour cadence.
pub const DEFAULT_HOURLY_CAP: usize = 16;

/// At most five distinct calendar dates in the daily series.
const DAILY_CAP: usize = 5;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The full set of view projections, published together as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Projections {
    /// `None` only when the entry list was empty.
    pub header: Option<HeaderSummary>,
    pub hourly: Vec<HourlySample>,
    pub daily: Vec<DailySample>,
    pub metrics: AveragedMetrics,
    pub coordinate: Coordinate,
}

/// Current conditions for the header: first entry of the series.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSummary {
    pub city: String,
    pub temperature: f64,
    pub description: String,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// One sample of the hourly strip.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySample {
    pub time: String,
    pub temperature: f64,
    pub category: String,
}

/// One row of the daily list: the first entry seen for its calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySample {
    pub day: String,
    pub category: String,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// Arithmetic means over all entries of the response.
///
/// Cloudiness and humidity use integer division (truncation), wind speed
/// floating-point division.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragedMetrics {
    pub cloudiness: i64,
    pub wind_speed: f64,
    pub humidity: i64,
}

/// Derive every projection from one response.
pub fn derive(response: &ForecastResponse, hourly_cap: usize) -> Projections {
    Projections {
        header: derive_header(response),
        hourly: derive_hourly(&response.list, hourly_cap),
        daily: derive_daily(&response.list),
        metrics: derive_metrics(&response.list),
        coordinate: response.city.coord.clone(),
    }
}

fn derive_header(response: &ForecastResponse) -> Option<HeaderSummary> {
    let current = response.list.first()?;

    Some(HeaderSummary {
        city: response.city.name.clone(),
        temperature: current.main.temp,
        description: first_condition(current, |w| w.description.clone()),
        temp_min: current.main.temp_min,
        temp_max: current.main.temp_max,
    })
}

fn derive_hourly(list: &[ForecastEntry], cap: usize) -> Vec<HourlySample> {
    list.iter()
        .take(cap)
        .map(|entry| HourlySample {
            time: am_pm_label(&entry.dt_txt),
            temperature: entry.main.temp,
            category: first_condition(entry, |w| w.main.clone()),
        })
        .collect()
}

fn derive_daily(list: &[ForecastEntry]) -> Vec<DailySample> {
    let mut seen_dates = HashSet::new();
    let mut daily = Vec::new();

    for entry in list {
        let date_key = date_key(&entry.dt_txt);
        if !seen_dates.insert(date_key.to_string()) {
            continue;
        }

        daily.push(DailySample {
            day: weekday_label(&entry.dt_txt),
            category: first_condition(entry, |w| w.main.clone()),
            temp_min: entry.main.temp_min,
            temp_max: entry.main.temp_max,
        });

        if daily.len() == DAILY_CAP {
            break;
        }
    }

    daily
}

fn derive_metrics(list: &[ForecastEntry]) -> AveragedMetrics {
    let count = list.len() as i64;
    if count == 0 {
        return AveragedMetrics { cloudiness: 0, wind_speed: 0.0, humidity: 0 };
    }

    let cloudiness = list.iter().map(|e| e.clouds.all).sum::<i64>() / count;
    let wind_speed = list.iter().map(|e| e.wind.speed).sum::<f64>() / count as f64;
    let humidity = list.iter().map(|e| e.main.humidity).sum::<i64>() / count;

    AveragedMetrics { cloudiness, wind_speed, humidity }
}

/// Value taken from the entry's first condition; empty string when the
/// condition list is empty.
fn first_condition(entry: &ForecastEntry, pick: impl Fn(&crate::model::WeatherCondition) -> String) -> String {
    entry.weather.first().map(pick).unwrap_or_default()
}

/// Calendar-date portion of the formatted timestamp ("YYYY-MM-DD").
fn date_key(dt_txt: &str) -> &str {
    dt_txt.get(..10).unwrap_or(dt_txt)
}

/// 12-hour "h AM/PM" label; empty string if the timestamp does not parse.
fn am_pm_label(dt_txt: &str) -> String {
    NaiveDateTime::parse_from_str(dt_txt, TIMESTAMP_FORMAT)
        .map(|dt| dt.format("%-I %p").to_string())
        .unwrap_or_default()
}

/// Single-letter weekday label; empty string if the timestamp does not parse.
fn weekday_label(dt_txt: &str) -> String {
    let Ok(dt) = NaiveDateTime::parse_from_str(dt_txt, TIMESTAMP_FORMAT) else {
        return String::new();
    };

    let letter = match dt.weekday() {
        Weekday::Mon => "M",
        Weekday::Tue | Weekday::Thu => "T",
        Weekday::Wed => "W",
        Weekday::Fri => "F",
        Weekday::Sat | Weekday::Sun => "S",
    };

    letter.to_string()
}

/// Icon identifier for a condition category; closed mapping with a fallback
/// for anything unrecognized.
pub fn icon_for_category(category: &str) -> &'static str {
    match category {
        "Clear" => "01d",
        "Clouds" => "04d",
        "Rain" | "Drizzle" => "09d",
        "Thunderstorm" => "11d",
        "Snow" => "13d",
        "Mist" | "Haze" | "Dust" | "Fog" | "Sand" | "Ash" | "Squall" | "Tornado" => "50d",
        _ => "02d",
    }
}
