//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The forecast client for the OpenWeather 5-day endpoint
//! - The projection engine deriving display-ready views from one response
//! - The forecast session orchestrating fetch, derivation, and publication
//! - The bundled city catalog and recent-selection handling
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod catalog;
pub mod client;
pub mod config;
pub mod model;
pub mod projection;
pub mod session;

pub use catalog::{City, CityCatalog, RecentSearches, RecentStore};
pub use client::{FetchError, FetchForecast, ForecastClient};
pub use config::Config;
pub use model::{Coordinate, ForecastResponse};
pub use projection::{
    AveragedMetrics, DailySample, HeaderSummary, HourlySample, Projections, derive,
    icon_for_category,
};
pub use session::{ErrorNotice, ForecastSession, Phase, SessionState};
