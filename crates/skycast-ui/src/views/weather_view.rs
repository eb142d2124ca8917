use std::fmt::Write as _;

use skycast_core::Loadable;
use skycast_weather::{CityReport, WeatherSnapshot};

use super::render_loadable;

/// Temperature suffix for the provider's unit system.
pub fn unit_symbol(units: &str) -> &'static str {
    match units {
        "imperial" => "°F",
        "standard" => "K",
        _ => "°C",
    }
}

/// Current conditions, then one line per forecast entry.
///
/// A failed report renders only its message; there is no forecast section.
pub fn render_report(city: &str, report: &Loadable<CityReport>, unit: &str) -> String {
    let placeholder = format!("Loading weather for {}...", city.trim());
    render_loadable(report, &placeholder, |r| {
        let mut out = render_current(&r.current, unit);
        if !r.forecast.entries.is_empty() {
            out.push_str("\nForecast:\n");
            for entry in &r.forecast.entries {
                let _ = writeln!(out, "{}", render_forecast_row(entry, unit));
            }
        }
        out
    })
}

/// Current conditions only, for a coordinate lookup.
pub fn render_current_weather(current: &Loadable<WeatherSnapshot>, unit: &str) -> String {
    render_loadable(current, "Loading weather...", |c| render_current(c, unit))
}

fn render_current(current: &WeatherSnapshot, unit: &str) -> String {
    format!(
        "City: {}\nTime: {}\nTemperature: {}{}\nDescription: {}\nIcon: {}\n",
        current.city,
        current.local_time(),
        current.temperature,
        unit,
        current.description,
        current.icon_url(),
    )
}

fn render_forecast_row(entry: &WeatherSnapshot, unit: &str) -> String {
    format!(
        "  {}  {}{}  {}  {}",
        entry.local_time(),
        entry.temperature,
        unit,
        entry.description,
        entry.icon_url(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use skycast_weather::Forecast;

    fn snapshot(ts: i64, temp: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Paris".into(),
            timestamp: DateTime::from_timestamp(ts, 0).unwrap(),
            utc_offset_secs: 3600,
            temperature: temp,
            description: "light rain".into(),
            icon_code: "10d".into(),
        }
    }

    #[test]
    fn renders_current_and_forecast() {
        let report = Loadable::Loaded(CityReport {
            current: snapshot(1_700_000_000, 12.5),
            forecast: Forecast {
                city: "Paris".into(),
                entries: vec![snapshot(1_700_010_800, 11.0), snapshot(1_700_021_600, 9.5)],
            },
        });

        let text = render_report("Paris", &report, unit_symbol("metric"));

        assert!(text.contains("City: Paris"));
        assert!(text.contains("Time: 2023-11-14 23:13:20"));
        assert!(text.contains("Temperature: 12.5°C"));
        assert!(text.contains("Description: light rain"));
        assert!(text.contains("http://openweathermap.org/img/wn/10d@2x.png"));
        assert!(text.contains("Forecast:"));
        assert!(text.contains("2023-11-15 02:13:20  11°C  light rain"));
        assert!(text.contains("2023-11-15 05:13:20  9.5°C  light rain"));
    }

    #[test]
    fn failed_report_has_no_forecast() {
        let report = Loadable::Failed("Could not fetch weather data.".into());
        let text = render_report("Nowhereville", &report, "°C");
        assert_eq!(text, "Could not fetch weather data.");
        assert!(!text.contains("Forecast"));
    }

    #[test]
    fn current_weather_has_no_forecast_section() {
        let text = render_current_weather(&Loadable::Loaded(snapshot(1_700_000_000, 12.5)), "°C");
        assert!(text.contains("City: Paris"));
        assert!(text.contains("Temperature: 12.5°C"));
        assert!(!text.contains("Forecast:"));
    }

    #[test]
    fn loading_placeholder_names_city() {
        assert_eq!(
            render_report(" Oslo ", &Loadable::Loading, "°C"),
            "Loading weather for Oslo..."
        );
    }

    #[test]
    fn unit_symbols() {
        assert_eq!(unit_symbol("metric"), "°C");
        assert_eq!(unit_symbol("imperial"), "°F");
        assert_eq!(unit_symbol("standard"), "K");
    }
}
