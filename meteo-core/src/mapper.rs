//! Pure DTO -> domain conversions. The domain never sees JSON shapes.

use chrono::NaiveDateTime;

use crate::{
    model::{City, DailyForecast, HourlyForecast, Weather, WeatherKind},
    remote::dto::{DailyDto, GeocodingResponseDto, HourlyDto, WeatherDto},
};

/// Weather code used when the provider omits `current.weather_code`.
pub const MISSING_WEATHER_CODE: i32 = -1;

/// Keep every entry that has a name, country, latitude and longitude, in server order.
pub fn cities_from_dto(dto: &GeocodingResponseDto) -> Vec<City> {
    dto.results
        .iter()
        .flatten()
        .filter_map(|item| {
            Some(City {
                name: item.name.clone()?,
                country: item.country.clone()?,
                region: item.admin1.clone(),
                latitude: item.latitude?,
                longitude: item.longitude?,
            })
        })
        .collect()
}

/// Build a weather snapshot labelled with `city`.
pub fn weather_from_dto(dto: &WeatherDto, city: &str) -> Weather {
    let current = dto.current.as_ref();
    let temperature_c = current
        .and_then(|c| c.temperature_2m)
        .map(round_c)
        .unwrap_or(0);
    let weather_code = current
        .and_then(|c| c.weather_code)
        .unwrap_or(MISSING_WEATHER_CODE);

    Weather {
        city: city.to_string(),
        temperature_c,
        description: describe_code(weather_code).to_string(),
        weather_code,
        hourly: dto.hourly.as_ref().map(hourly_from_dto).unwrap_or_default(),
        daily: dto.daily.as_ref().map(daily_from_dto).unwrap_or_default(),
    }
}

pub fn describe_code(code: i32) -> &'static str {
    WeatherKind::from_code(code).description()
}

/// Zipped by index; stops at the shorter series.
fn hourly_from_dto(hourly: &HourlyDto) -> Vec<HourlyForecast> {
    hourly
        .time
        .iter()
        .zip(&hourly.temperature_2m)
        .map(|(time, temp)| HourlyForecast {
            hour: hour_label(time),
            temperature_c: round_c(*temp),
        })
        .collect()
}

/// Zipped by index; stops at the shortest of the three series.
fn daily_from_dto(daily: &DailyDto) -> Vec<DailyForecast> {
    daily
        .time
        .iter()
        .zip(&daily.max)
        .zip(&daily.min)
        .map(|((day, max), min)| DailyForecast {
            day: day.clone(),
            max_c: round_c(*max),
            min_c: round_c(*min),
        })
        .collect()
}

/// "2024-06-01T14:00" -> "14:00"; anything else keeps its last five characters.
fn hour_label(time: &str) -> String {
    match NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M") {
        Ok(dt) => dt.format("%H:%M").to_string(),
        Err(_) => {
            let skip = time.chars().count().saturating_sub(5);
            time.chars().skip(skip).collect()
        }
    }
}

fn round_c(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::dto::{CurrentDto, GeocodingCityDto};

    fn raw_city(name: &str, lat: Option<f64>) -> GeocodingCityDto {
        GeocodingCityDto {
            name: Some(name.into()),
            country: Some("France".into()),
            admin1: None,
            latitude: lat,
            longitude: Some(2.35),
        }
    }

    #[test]
    fn drops_cities_missing_required_fields() {
        let dto = GeocodingResponseDto {
            results: Some(vec![
                raw_city("Paris", Some(48.85)),
                raw_city("Nowhere", None),
                raw_city("Pau", Some(43.3)),
            ]),
        };

        let cities = cities_from_dto(&dto);

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "Paris");
        assert_eq!(cities[1].name, "Pau");
    }

    #[test]
    fn missing_country_or_name_is_dropped() {
        let mut no_country = raw_city("Paris", Some(48.85));
        no_country.country = None;
        let mut no_name = raw_city("", Some(48.85));
        no_name.name = None;

        let dto = GeocodingResponseDto {
            results: Some(vec![no_country, no_name]),
        };

        assert!(cities_from_dto(&dto).is_empty());
    }

    #[test]
    fn absent_results_map_to_empty_list() {
        assert!(cities_from_dto(&GeocodingResponseDto::default()).is_empty());
    }

    #[test]
    fn region_is_carried_over() {
        let mut item = raw_city("Paris", Some(48.85));
        item.admin1 = Some("Île-de-France".into());
        let dto = GeocodingResponseDto { results: Some(vec![item]) };

        let cities = cities_from_dto(&dto);
        assert_eq!(cities[0].region.as_deref(), Some("Île-de-France"));
    }

    #[test]
    fn hourly_truncates_to_shorter_series() {
        let dto = WeatherDto {
            hourly: Some(HourlyDto {
                time: vec![
                    "2024-06-01T00:00".into(),
                    "2024-06-01T01:00".into(),
                    "2024-06-01T02:00".into(),
                ],
                temperature_2m: vec![5.0, 6.0],
            }),
            ..Default::default()
        };

        let weather = weather_from_dto(&dto, "Paris");

        assert_eq!(
            weather.hourly,
            vec![
                HourlyForecast { hour: "00:00".into(), temperature_c: 5 },
                HourlyForecast { hour: "01:00".into(), temperature_c: 6 },
            ]
        );
    }

    #[test]
    fn daily_truncates_to_shortest_series() {
        let dto = WeatherDto {
            daily: Some(DailyDto {
                time: vec!["2024-06-01".into(), "2024-06-02".into(), "2024-06-03".into()],
                max: vec![21.6, 23.2, 19.9],
                min: vec![12.4],
            }),
            ..Default::default()
        };

        let weather = weather_from_dto(&dto, "Paris");

        assert_eq!(
            weather.daily,
            vec![DailyForecast { day: "2024-06-01".into(), max_c: 22, min_c: 12 }]
        );
    }

    #[test]
    fn missing_sections_use_defaults() {
        let weather = weather_from_dto(&WeatherDto::default(), "Somewhere");

        assert_eq!(weather.city, "Somewhere");
        assert_eq!(weather.temperature_c, 0);
        assert_eq!(weather.weather_code, MISSING_WEATHER_CODE);
        assert_eq!(weather.description, WeatherKind::Unknown.description());
        assert!(weather.hourly.is_empty());
        assert!(weather.daily.is_empty());
    }

    #[test]
    fn current_temperature_is_rounded() {
        let dto = WeatherDto {
            current: Some(CurrentDto { temperature_2m: Some(18.4), weather_code: Some(61) }),
            ..Default::default()
        };

        let weather = weather_from_dto(&dto, "Paris, France");

        assert_eq!(weather.temperature_c, 18);
        assert_eq!(weather.weather_code, 61);
        assert_eq!(weather.description, "Rain");
        assert_eq!(weather.kind(), WeatherKind::Rain);
    }

    #[test]
    fn mapping_is_repeatable() {
        let dto = WeatherDto {
            current: Some(CurrentDto { temperature_2m: Some(-3.6), weather_code: Some(71) }),
            hourly: Some(HourlyDto {
                time: vec!["2024-12-01T08:00".into()],
                temperature_2m: vec![-4.2],
            }),
            daily: None,
        };

        assert_eq!(weather_from_dto(&dto, "Oslo"), weather_from_dto(&dto, "Oslo"));
    }

    #[test]
    fn odd_time_labels_keep_last_five_chars() {
        assert_eq!(hour_label("2024-06-01T14:00"), "14:00");
        assert_eq!(hour_label("T9:30"), "T9:30");
        assert_eq!(hour_label("xx 07:15"), "07:15");
        assert_eq!(hour_label("7h"), "7h");
    }

    #[test]
    fn describe_code_never_fails() {
        assert_eq!(describe_code(0), "Clear sky");
        assert_eq!(describe_code(61), "Rain");
        assert_eq!(describe_code(999), "Unknown");
    }
}
