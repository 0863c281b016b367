use meteo_core::{City, Weather};

/// Hourly entries shown by default (one day).
const HOURS_SHOWN: usize = 24;

pub fn city_line(city: &City) -> String {
    format!(
        "{}  ({:.4}, {:.4})",
        city.display_name(),
        city.latitude,
        city.longitude
    )
}

pub fn weather(weather: &Weather) -> String {
    let mut out = format!(
        "{}\n  {} °C, {}\n",
        weather.city, weather.temperature_c, weather.description
    );

    if !weather.hourly.is_empty() {
        out.push_str("\nHourly\n");
        for hour in weather.hourly.iter().take(HOURS_SHOWN) {
            out.push_str(&format!("  {}  {:>4} °C\n", hour.hour, hour.temperature_c));
        }
    }

    if !weather.daily.is_empty() {
        out.push_str("\nDaily\n");
        for day in &weather.daily {
            out.push_str(&format!(
                "  {}  min {:>4} °C  max {:>4} °C\n",
                day.day, day.min_c, day.max_c
            ));
        }
    }

    out
}
