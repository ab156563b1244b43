use chrono::{DateTime, Local, Utc};
use skycast_core::{HistoryEntry, SearchRecord, kelvin_to_celsius};

/// Render a search result the way the widget shows it: headline temperature,
/// extremes, place, time, humidity and condition.
pub fn render_record(record: &SearchRecord) -> String {
    let wx = &record.weather;
    format!(
        "Today's Weather\n\
         {}\n\
         H: {}  L: {}\n\
         {}, {}\n\
         {}\n\
         Humidity: {}%\n\
         {}",
        format_temperature(wx.temperature_k),
        format_temperature(wx.max_temperature_k),
        format_temperature(wx.min_temperature_k),
        record.location.city,
        record.location.country_code,
        format_instant(record.searched_at),
        wx.humidity_pct,
        wx.description,
    )
}

/// One line per history entry, most recent first, prefixed with the display
/// index that `remove` and the interactive prompts accept.
pub fn render_history(entries: &[&HistoryEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| history_row(i, e))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn history_row(index: usize, entry: &HistoryEntry) -> String {
    format!(
        "{index}. {}, {}  {}",
        entry.location.city,
        entry.location.country_code,
        format_instant(entry.searched_at),
    )
}

/// Kelvin is converted exactly once, here, when the value is shown.
pub fn format_temperature(kelvin: f64) -> String {
    format!("{:.0}°C", kelvin_to_celsius(kelvin))
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&Local)
        .format("%d-%m-%Y %I:%M %P")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_core::{Location, WeatherSnapshot};

    fn london_record() -> SearchRecord {
        SearchRecord {
            location: Location {
                city: "London".to_string(),
                country_code: "GB".to_string(),
            },
            weather: WeatherSnapshot {
                main: "Clouds".to_string(),
                description: "overcast clouds".to_string(),
                icon: "04d".to_string(),
                temperature_k: 288.15,
                min_temperature_k: 287.0,
                max_temperature_k: 290.0,
                humidity_pct: 70,
            },
            searched_at: Utc::now(),
        }
    }

    #[test]
    fn temperatures_render_in_whole_celsius() {
        assert_eq!(format_temperature(288.15), "15°C");
        assert_eq!(format_temperature(273.15), "0°C");
        assert_eq!(format_temperature(263.15), "-10°C");
    }

    #[test]
    fn record_renders_converted_temperature_and_location() {
        let rendered = render_record(&london_record());

        assert!(rendered.contains("15°C"));
        assert!(rendered.contains("H: 17°C  L: 14°C"));
        assert!(rendered.contains("London, GB"));
        assert!(rendered.contains("Humidity: 70%"));
        assert!(rendered.contains("overcast clouds"));
    }

    #[test]
    fn history_rows_carry_their_display_index() {
        let entry = london_record().to_history_entry();
        let row = history_row(3, &entry);
        assert!(row.starts_with("3. London, GB"));
    }
}
