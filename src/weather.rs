//! Historical weather for an activity's start.
//!
//! The archive is asked for the hourly series of the activity's calendar day;
//! the sample closest to the start time is kept. Temperature is stored in
//! Celsius and converted to the preferred unit system each time it is read.

use crate::config::AppConfig;
use crate::constants::WEATHER_HOURLY_FIELDS;
use crate::error::{WeatherError, WeatherResult};
use crate::settings::{self, UnitSystem};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ============================================================================
// Activity Input
// ============================================================================

/// Location and start time fields of an activity payload
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityStart {
    /// `[latitude, longitude]`; empty for indoor activities
    pub start_latlng: Vec<f64>,
    /// UTC start, RFC 3339
    pub start_date: Option<String>,
    /// Local wall-clock start (provider marks it with a bogus `Z`)
    pub start_date_local: Option<String>,
}

/// Parse an activity or archive timestamp into wall-clock time.
///
/// Accepts RFC 3339 (the offset is dropped, keeping the written clock time)
/// and the archive's offset-less `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Parameters of one archive request
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub start: NaiveDateTime,
}

impl WeatherQuery {
    /// Build a query for an activity.
    ///
    /// Prefers the local start time, since the archive answers in the
    /// location's own timezone.
    pub fn for_activity(activity: &ActivityStart) -> WeatherResult<Self> {
        let &[latitude, longitude] = activity.start_latlng.as_slice() else {
            return Err(WeatherError::MissingLocation);
        };

        let raw = activity
            .start_date_local
            .as_deref()
            .or(activity.start_date.as_deref())
            .ok_or_else(|| WeatherError::InvalidTimestamp("missing".to_string()))?;
        let start =
            parse_timestamp(raw).ok_or_else(|| WeatherError::InvalidTimestamp(raw.to_string()))?;

        Ok(Self {
            latitude,
            longitude,
            start,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Full archive URL for this query
    pub fn url(&self, archive_url: &str) -> String {
        let date = self.date().format("%Y-%m-%d").to_string();
        format!(
            "{archive_url}?latitude={}&longitude={}&start_date={date}&end_date={date}&hourly={}&timezone=auto",
            self.latitude,
            self.longitude,
            urlencoding::encode(WEATHER_HOURLY_FIELDS),
        )
    }
}

// ============================================================================
// Archive Response
// ============================================================================

/// Hourly series as returned by the archive
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub weathercode: Vec<Option<u8>>,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    hourly: HourlySeries,
}

/// Index of the sample closest to `start`; ties go to the earliest sample.
///
/// Unparseable timestamps are skipped.
pub fn closest_hour_index(times: &[String], start: NaiveDateTime) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (index, time) in times.iter().enumerate() {
        let Some(sample) = parse_timestamp(time) else {
            continue;
        };
        let diff = (sample - start).num_seconds().abs();
        if best.is_none_or(|(_, min)| diff < min) {
            best = Some((index, diff));
        }
    }
    best.map(|(index, _)| index)
}

// ============================================================================
// Interpretation
// ============================================================================

/// Human-readable WMO weather code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interpretation {
    pub description: &'static str,
    pub icon: &'static str,
}

pub fn interpret_code(code: u8) -> Interpretation {
    let (description, icon) = match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅️"),
        3 => ("Overcast", "☁️"),
        45 => ("Fog", "🌫️"),
        48 => ("Depositing rime fog", "🌫️"),
        51 => ("Light drizzle", "🌦️"),
        53 => ("Moderate drizzle", "🌦️"),
        55 => ("Dense drizzle", "🌦️"),
        56 => ("Light freezing drizzle", "🥶"),
        57 => ("Dense freezing drizzle", "🥶"),
        61 => ("Slight rain", "🌧️"),
        63 => ("Moderate rain", "🌧️"),
        65 => ("Heavy rain", "🌧️"),
        66 => ("Light freezing rain", "🥶"),
        67 => ("Heavy freezing rain", "🥶"),
        71 => ("Slight snow fall", "🌨️"),
        73 => ("Moderate snow fall", "🌨️"),
        75 => ("Heavy snow fall", "🌨️"),
        77 => ("Snow grains", "🌨️"),
        80 => ("Slight rain showers", "🌦️"),
        81 => ("Moderate rain showers", "🌧️"),
        82 => ("Violent rain showers", "🌧️"),
        85 => ("Slight snow showers", "🌨️"),
        86 => ("Heavy snow showers", "🌨️"),
        95 => ("Thunderstorm", "⛈️"),
        96 => ("Thunderstorm with hail", "⛈️"),
        99 => ("Thunderstorm with heavy hail", "⛈️"),
        _ => ("Unknown", "🤷"),
    };
    Interpretation { description, icon }
}

/// Weather at the activity start
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub code: Option<u8>,
    pub description: &'static str,
    pub icon: &'static str,
}

impl WeatherReading {
    /// Pick the sample closest to `start` out of an hourly series
    pub fn from_series(series: &HourlySeries, start: NaiveDateTime) -> WeatherResult<Self> {
        let index = closest_hour_index(&series.time, start)
            .ok_or_else(|| WeatherError::NoData("no hourly samples".to_string()))?;
        let temperature_c = series
            .temperature_2m
            .get(index)
            .copied()
            .flatten()
            .ok_or_else(|| WeatherError::NoData(format!("no temperature for sample {index}")))?;
        let code = series.weathercode.get(index).copied().flatten();
        let interpretation = interpret_code(code.unwrap_or(u8::MAX));

        Ok(Self {
            temperature_c,
            code,
            description: interpretation.description,
            icon: interpretation.icon,
        })
    }

    /// Whole-degree temperature in the given unit system
    pub fn temperature(&self, units: UnitSystem) -> i64 {
        let value = match units {
            UnitSystem::Imperial => self.temperature_c * 9.0 / 5.0 + 32.0,
            UnitSystem::Metric => self.temperature_c,
        };
        value.round() as i64
    }

    /// Temperature with its unit, e.g. `"12°C"`
    pub fn display_temperature(&self, units: UnitSystem) -> String {
        let unit = match units {
            UnitSystem::Imperial => "°F",
            UnitSystem::Metric => "°C",
        };
        format!("{}{}", self.temperature(units), unit)
    }
}

// ============================================================================
// Archive Transport
// ============================================================================

/// Source of hourly historical weather
pub trait WeatherArchive {
    fn hourly(&self, query: &WeatherQuery) -> WeatherResult<HourlySeries>;
}

/// Open-Meteo archive over HTTP
#[derive(Clone, Debug)]
pub struct OpenMeteoArchive {
    client: reqwest::blocking::Client,
    archive_url: String,
}

impl OpenMeteoArchive {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            archive_url: config.weather_archive_url.clone(),
        }
    }
}

impl WeatherArchive for OpenMeteoArchive {
    fn hourly(&self, query: &WeatherQuery) -> WeatherResult<HourlySeries> {
        let url = query.url(&self.archive_url);
        tracing::debug!(%url, "Requesting historical weather");

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }
        let body: ArchiveResponse = response.json()?;
        Ok(body.hourly)
    }
}

// ============================================================================
// Lookup State
// ============================================================================

/// Weather state for the badge element.
///
/// A failed lookup leaves the state "unavailable" (`None`) instead of
/// reporting an error.
#[derive(Debug)]
pub struct WeatherLookup<A> {
    archive: A,
    reading: Option<WeatherReading>,
}

impl<A: WeatherArchive> WeatherLookup<A> {
    pub fn new(archive: A) -> Self {
        Self {
            archive,
            reading: None,
        }
    }

    /// Fetch the weather for `activity`.
    ///
    /// Activities without a start location are skipped and keep the
    /// previous reading. Any other failure clears the reading.
    pub fn fetch(&mut self, activity: &ActivityStart) -> Option<&WeatherReading> {
        let query = match WeatherQuery::for_activity(activity) {
            Ok(query) => query,
            Err(WeatherError::MissingLocation) => return self.reading.as_ref(),
            Err(e) => {
                tracing::warn!("Error fetching weather: {}", e);
                self.reading = None;
                return None;
            }
        };

        self.reading = match self
            .archive
            .hourly(&query)
            .and_then(|series| WeatherReading::from_series(&series, query.start))
        {
            Ok(reading) => Some(reading),
            Err(e) => {
                tracing::warn!("Error fetching weather: {}", e);
                None
            }
        };
        self.reading.as_ref()
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.reading.is_some()
    }

    /// Temperature string for the current unit preference
    pub fn display_temperature(&self) -> Option<String> {
        self.reading
            .as_ref()
            .map(|r| r.display_temperature(settings::current_units()))
    }

    pub fn clear(&mut self) {
        self.reading = None;
    }
}
