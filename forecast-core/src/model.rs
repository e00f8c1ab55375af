use serde::{Deserialize, Serialize};

/// Decoded body of the OpenWeather 5-day forecast endpoint.
///
/// Field names follow the wire keys (snake_case), so no rename attributes are
/// needed. The payload is decode-only: nothing in the app re-encodes it.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub cod: String,
    pub message: i64,
    pub cnt: i64,
    pub list: Vec<ForecastEntry>,
    pub city: CityInfo,
}

/// City metadata attached to a forecast response.
#[derive(Debug, Clone, Deserialize)]
pub struct CityInfo {
    pub id: i64,
    pub name: String,
    pub coord: Coordinate,
    pub country: String,
    pub population: Option<i64>,
    pub timezone: Option<i64>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

/// Latitude/longitude pair, shared with the city catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// One timestamped sample of the forecast series (3-hour cadence).
///
/// `weather` may be empty; projections that depend on it substitute an empty
/// category. Entries arrive in ascending `dt` order and are never reordered.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainMetrics,
    pub weather: Vec<WeatherCondition>,
    pub clouds: Clouds,
    pub wind: Wind,
    pub visibility: Option<i64>,
    pub pop: f64,
    pub sys: Sys,
    pub dt_txt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainMetrics {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub sea_level: i64,
    pub grnd_level: i64,
    pub humidity: i64,
    pub temp_kf: f64,
}

/// One condition attached to an entry; `main` is the coarse category
/// ("Clear", "Rain", ...) and the first element is authoritative for display.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherCondition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Clouds {
    pub all: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: i64,
    #[serde(default)]
    pub gust: f64,
}

/// Part-of-day marker ("d" or "n").
#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    pub pod: String,
}

/// Realistic two-entry payload shared by tests across the crate.
#[cfg(test)]
pub(crate) fn sample_payload() -> &'static str {
    r#"{
        "cod": "200",
        "message": 0,
        "cnt": 2,
        "list": [
            {
                "dt": 1730419200,
                "main": {
                    "temp": 12.3, "feels_like": 11.2,
                    "temp_min": 9.8, "temp_max": 14.1,
                    "pressure": 1021, "sea_level": 1021, "grnd_level": 1014,
                    "humidity": 62, "temp_kf": 0.4
                },
                "weather": [
                    {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}
                ],
                "clouds": {"all": 75},
                "wind": {"speed": 1.5, "deg": 200, "gust": 2.3},
                "visibility": 10000,
                "pop": 0.1,
                "sys": {"pod": "d"},
                "dt_txt": "2024-11-01 00:00:00"
            },
            {
                "dt": 1730430000,
                "main": {
                    "temp": 15.0, "feels_like": 14.4,
                    "temp_min": 12.0, "temp_max": 16.2,
                    "pressure": 1019, "sea_level": 1019, "grnd_level": 1012,
                    "humidity": 48, "temp_kf": 0.0
                },
                "weather": [
                    {"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}
                ],
                "clouds": {"all": 10},
                "wind": {"speed": 2.5, "deg": 190, "gust": 3.0},
                "visibility": 10000,
                "pop": 0.0,
                "sys": {"pod": "d"},
                "dt_txt": "2024-11-01 03:00:00"
            }
        ],
        "city": {
            "id": 1839726,
            "name": "Asan",
            "coord": {"lat": 36.7836, "lon": 127.0042},
            "country": "KR",
            "population": 554000,
            "timezone": 32400,
            "sunrise": 1730411050,
            "sunset": 1730449980
        }
    }"#
}
