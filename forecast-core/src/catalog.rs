//! Bundled city list and the recent-selection list.
//!
//! The catalog is loaded once from a static JSON asset shipped with the
//! binary; recents go through a small key-value store capability so the core
//! stays independent of the storage format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// Maximum number of remembered selections.
const RECENT_LIMIT: usize = 10;

/// One selectable city from the bundled list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub coord: Coordinate,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
}

/// The bundled, pre-sorted list of selectable cities.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    cities: Vec<City>,
}

impl CityCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let cities: Vec<City> =
            serde_json::from_str(json).context("Failed to parse bundled city list")?;
        Ok(Self { cities })
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Case-insensitive substring match on the city name; an empty query
    /// returns the full list.
    pub fn filter(&self, query: &str) -> Vec<&City> {
        if query.is_empty() {
            return self.cities.iter().collect();
        }

        let query = query.to_lowercase();
        self.cities
            .iter()
            .filter(|city| city.name.to_lowercase().contains(&query))
            .collect()
    }
}

/// Persistence capability for the recent-selection list.
///
/// `load` never propagates an error: a missing or undecodable store reads as
/// an empty list. `save` is best-effort.
pub trait RecentStore {
    fn load(&self) -> Vec<City>;
    fn save(&self, cities: &[City]);
}

/// Ordered recent selections, newest first, deduplicated by city id.
pub struct RecentSearches {
    store: Box<dyn RecentStore>,
    entries: Vec<City>,
}

impl RecentSearches {
    pub fn new(store: Box<dyn RecentStore>) -> Self {
        let entries = store.load();
        Self { store, entries }
    }

    pub fn entries(&self) -> &[City] {
        &self.entries
    }

    /// Record a selection: move it to the front, drop any older duplicate,
    /// keep at most `RECENT_LIMIT` entries, persist.
    pub fn select(&mut self, city: City) {
        self.entries.retain(|existing| existing.id != city.id);
        self.entries.insert(0, city);
        self.entries.truncate(RECENT_LIMIT);
        self.store.save(&self.entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

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

    struct MemoryStore {
        raw: Option<String>,
        saved: Rc<RefCell<Vec<Vec<City>>>>,
    }

    impl RecentStore for MemoryStore {
        fn load(&self) -> Vec<City> {
            self.raw
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default()
        }

        fn save(&self, cities: &[City]) {
            self.saved.borrow_mut().push(cities.to_vec());
        }
    }

    fn memory_store(raw: Option<&str>) -> (Box<MemoryStore>, Rc<RefCell<Vec<Vec<City>>>>) {
        let saved = Rc::new(RefCell::new(Vec::new()));
        let store = Box::new(MemoryStore {
            raw: raw.map(str::to_string),
            saved: Rc::clone(&saved),
        });
        (store, saved)
    }

    #[test]
    fn catalog_filter_is_case_insensitive() {
        let catalog = CityCatalog::from_json(
            r#"[
                {"id": 1, "name": "Asan", "coord": {"lat": 36.78, "lon": 127.0}, "country": "KR"},
                {"id": 2, "name": "Busan", "coord": {"lat": 35.1, "lon": 129.04}, "country": "KR"},
                {"id": 3, "name": "Seoul", "coord": {"lat": 37.57, "lon": 126.98}, "country": "KR"}
            ]"#,
        )
        .expect("catalog must parse");

        let hits = catalog.filter("SAN");
        let names: Vec<_> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Asan", "Busan"]);
    }

    #[test]
    fn catalog_empty_query_returns_everything() {
        let catalog = CityCatalog::from_json(
            r#"[{"id": 1, "name": "Asan", "coord": {"lat": 36.78, "lon": 127.0}, "country": "KR"}]"#,
        )
        .expect("catalog must parse");

        assert_eq!(catalog.filter("").len(), 1);
    }

    #[test]
    fn catalog_rejects_malformed_asset() {
        assert!(CityCatalog::from_json("not json").is_err());
    }

    #[test]
    fn undecodable_recents_read_as_empty() {
        let (store, _) = memory_store(Some("{{ definitely not a city list"));
        let recents = RecentSearches::new(store);
        assert!(recents.entries().is_empty());
    }

    #[test]
    fn selection_moves_to_front_and_deduplicates() {
        let (store, saved) = memory_store(None);
        let mut recents = RecentSearches::new(store);

        recents.select(city(1, "Asan"));
        recents.select(city(2, "Seoul"));
        recents.select(city(1, "Asan"));

        let names: Vec<_> = recents.entries().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Asan", "Seoul"]);
        assert_eq!(saved.borrow().len(), 3);
    }

    #[test]
    fn recents_are_capped_at_ten() {
        let (store, _) = memory_store(None);
        let mut recents = RecentSearches::new(store);

        for id in 0..12 {
            recents.select(city(id, &format!("City {id}")));
        }

        assert_eq!(recents.entries().len(), 10);
        assert_eq!(recents.entries()[0].name, "City 11");
        assert_eq!(recents.entries()[9].name, "City 2");
    }

    #[test]
    fn recents_round_trip_through_the_store() {
        let stored = serde_json::to_string(&vec![city(7, "Busan")]).expect("encode");
        let (store, _) = memory_store(Some(&stored));

        let recents = RecentSearches::new(store);
        assert_eq!(recents.entries().len(), 1);
        assert_eq!(recents.entries()[0].name, "Busan");
    }
}
