//! Text rendering of the projection set.

use forecast_core::{Projections, icon_for_category};

/// Build the full report for one projection set.
pub fn projection_report(projections: &Projections) -> String {
    let mut out = String::new();

    if let Some(header) = &projections.header {
        out.push_str(&format!("{}\n", header.city));
        out.push_str(&format!("{}°\n", header.temperature as i64));
        if !header.description.is_empty() {
            out.push_str(&format!("{}\n", capitalize_words(&header.description)));
        }
        out.push_str(&format!(
            "H: {}° | L: {}°\n",
            header.temp_max as i64, header.temp_min as i64
        ));
    }

    if !projections.hourly.is_empty() {
        out.push_str("\nHourly:\n");
        for sample in &projections.hourly {
            out.push_str(&format!(
                "  {:<6} {:>4}°  {}\n",
                sample.time,
                sample.temperature as i64,
                sample.category,
            ));
        }
    }

    if !projections.daily.is_empty() {
        out.push_str("\nDaily:\n");
        for sample in &projections.daily {
            out.push_str(&format!(
                "  {:<2} [{}]  {}° / {}°\n",
                sample.day,
                icon_for_category(&sample.category),
                sample.temp_min as i64,
                sample.temp_max as i64,
            ));
        }
    }

    out.push_str(&format!(
        "\nHumidity {}%\nClouds {}%\nWind speed {:.2} m/s\n",
        projections.metrics.humidity, projections.metrics.cloudiness, projections.metrics.wind_speed,
    ));

    out.push_str(&format!(
        "\nMap: {:.4}, {:.4}\n",
        projections.coordinate.lat, projections.coordinate.lon,
    ));

    out
}

pub fn print_projections(projections: &Projections) {
    print!("{}", projection_report(projections));
}

/// Uppercase the first letter of each word ("broken clouds" -> "Broken Clouds").
fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
