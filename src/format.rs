//! Unit-aware display formatting for activity metrics.
//!
//! [`UnitFormatter`] formats against an explicit unit system. The free
//! functions read the process-wide preference at call time, so nothing
//! formatted is ever cached across a unit change.
//!
//! Missing (`None`) or non-finite input always renders as `"-"`.

use crate::constants::{
    FEET_PER_METER, KMH_PER_MPS, KM_PER_MILE, MILES_PER_METER, MPH_PER_MPS, PLACEHOLDER,
};
use crate::settings::{self, UnitSystem};

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Round half up to a whole number, never yielding negative zero
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor() + 0.0
}

/// `HH:MM:SS` for a non-negative number of seconds; fractions are truncated.
///
/// Hours keep counting past 24.
fn clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Formatter bound to one unit system
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitFormatter {
    pub units: UnitSystem,
}

impl UnitFormatter {
    pub fn new(units: UnitSystem) -> Self {
        Self { units }
    }

    /// Formatter for the unit system currently in effect
    pub fn current() -> Self {
        Self::new(settings::current_units())
    }

    /// Elapsed time as `HH:MM:SS`
    pub fn time(&self, seconds: Option<f64>) -> String {
        finite(seconds).map_or_else(|| PLACEHOLDER.to_string(), clock)
    }

    /// Meters as km or mi with two decimals
    pub fn distance(&self, meters: Option<f64>) -> String {
        let Some(m) = finite(meters) else {
            return PLACEHOLDER.to_string();
        };
        match self.units {
            UnitSystem::Imperial => format!("{:.2} mi", m * MILES_PER_METER),
            UnitSystem::Metric => format!("{:.2} km", m / 1000.0),
        }
    }

    /// Seconds-per-km pace as `M:SS /km` or `M:SS /mi`
    pub fn pace(&self, seconds_per_km: Option<f64>) -> String {
        let Some(s_per_km) = finite(seconds_per_km) else {
            return PLACEHOLDER.to_string();
        };
        let (seconds, suffix) = match self.units {
            UnitSystem::Imperial => (s_per_km * KM_PER_MILE, "/mi"),
            UnitSystem::Metric => (s_per_km, "/km"),
        };
        // Round the whole value first so 59.7s never renders as ":60"
        let total = seconds.max(0.0).round() as u64;
        format!("{}:{:02} {}", total / 60, total % 60, suffix)
    }

    /// Meters per second as km/h or mph with one decimal
    pub fn speed(&self, mps: Option<f64>) -> String {
        let Some(mps) = finite(mps) else {
            return PLACEHOLDER.to_string();
        };
        match self.units {
            UnitSystem::Imperial => format!("{:.1} mph", mps * MPH_PER_MPS),
            UnitSystem::Metric => format!("{:.1} km/h", mps * KMH_PER_MPS),
        }
    }

    /// Meters as whole m or ft
    pub fn elevation(&self, meters: Option<f64>) -> String {
        let Some(m) = finite(meters) else {
            return PLACEHOLDER.to_string();
        };
        match self.units {
            UnitSystem::Imperial => format!("{} ft", round_half_up(m * FEET_PER_METER)),
            UnitSystem::Metric => format!("{} m", round_half_up(m)),
        }
    }

    pub fn heart_rate(&self, bpm: Option<f64>) -> String {
        rounded_with_suffix(bpm, "bpm")
    }

    pub fn cadence(&self, spm: Option<f64>) -> String {
        rounded_with_suffix(spm, "spm")
    }

    pub fn power(&self, watts: Option<f64>) -> String {
        rounded_with_suffix(watts, "W")
    }
}

fn rounded_with_suffix(value: Option<f64>, suffix: &str) -> String {
    finite(value).map_or_else(
        || PLACEHOLDER.to_string(),
        |v| format!("{} {}", round_half_up(v), suffix),
    )
}

/// Segment/best-effort time as `HH:MM:SS`; missing time renders as zero
pub fn format_effort_time(seconds: Option<f64>) -> String {
    clock(finite(seconds).unwrap_or(0.0))
}

/// Rank with its English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 21st...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

// ============================================================================
// Global-preference shorthands
// ============================================================================

pub fn format_time(seconds: Option<f64>) -> String {
    UnitFormatter::current().time(seconds)
}

pub fn format_distance(meters: Option<f64>) -> String {
    UnitFormatter::current().distance(meters)
}

pub fn format_pace(seconds_per_km: Option<f64>) -> String {
    UnitFormatter::current().pace(seconds_per_km)
}

pub fn format_speed(mps: Option<f64>) -> String {
    UnitFormatter::current().speed(mps)
}

pub fn format_elevation(meters: Option<f64>) -> String {
    UnitFormatter::current().elevation(meters)
}

pub fn format_heart_rate(bpm: Option<f64>) -> String {
    UnitFormatter::current().heart_rate(bpm)
}

pub fn format_cadence(spm: Option<f64>) -> String {
    UnitFormatter::current().cadence(spm)
}

pub fn format_power(watts: Option<f64>) -> String {
    UnitFormatter::current().power(watts)
}
