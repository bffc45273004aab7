//! Formatter Unit Tests

use miles_to_merch::format::{format_effort_time, ordinal, UnitFormatter};
use miles_to_merch::UnitSystem;

const METRIC: UnitFormatter = UnitFormatter {
    units: UnitSystem::Metric,
};
const IMPERIAL: UnitFormatter = UnitFormatter {
    units: UnitSystem::Imperial,
};

#[test]
fn test_pace_metric() {
    assert_eq!(METRIC.pace(Some(300.0)), "5:00 /km");
    assert_eq!(METRIC.pace(Some(272.4)), "4:32 /km");
}

#[test]
fn test_pace_imperial_converts_to_mile() {
    // 300 s/km * 1.60934 = 482.8 s/mi
    assert_eq!(IMPERIAL.pace(Some(300.0)), "8:03 /mi");
}

#[test]
fn test_pace_never_shows_sixty_seconds() {
    assert_eq!(METRIC.pace(Some(359.7)), "6:00 /km");
}

#[test]
fn test_missing_values_render_placeholder() {
    for formatter in [METRIC, IMPERIAL] {
        assert_eq!(formatter.distance(None), "-");
        assert_eq!(formatter.time(None), "-");
        assert_eq!(formatter.pace(None), "-");
        assert_eq!(formatter.speed(None), "-");
        assert_eq!(formatter.elevation(None), "-");
        assert_eq!(formatter.heart_rate(None), "-");
        assert_eq!(formatter.cadence(None), "-");
        assert_eq!(formatter.power(None), "-");
        assert_eq!(formatter.distance(Some(f64::NAN)), "-");
    }
}

#[test]
fn test_distance() {
    assert_eq!(METRIC.distance(Some(5000.0)), "5.00 km");
    assert_eq!(METRIC.distance(Some(0.0)), "0.00 km");
    assert_eq!(IMPERIAL.distance(Some(5000.0)), "3.11 mi");
}

#[test]
fn test_time() {
    assert_eq!(METRIC.time(Some(3725.0)), "01:02:05");
    assert_eq!(IMPERIAL.time(Some(59.9)), "00:00:59");
}

#[test]
fn test_speed() {
    assert_eq!(METRIC.speed(Some(5.0)), "18.0 km/h");
    assert_eq!(IMPERIAL.speed(Some(5.0)), "11.2 mph");
}

#[test]
fn test_elevation() {
    assert_eq!(METRIC.elevation(Some(123.4)), "123 m");
    assert_eq!(IMPERIAL.elevation(Some(100.0)), "328 ft");
}

#[test]
fn test_near_sea_level_elevation_rounds_half_up() {
    assert_eq!(METRIC.elevation(Some(-0.3)), "0 m");
    assert_eq!(METRIC.elevation(Some(-2.5)), "-2 m");
    assert_eq!(METRIC.elevation(Some(2.5)), "3 m");
    assert_eq!(METRIC.elevation(Some(-12.6)), "-13 m");
    assert_eq!(IMPERIAL.elevation(Some(-0.1)), "0 ft");
    assert_eq!(METRIC.heart_rate(Some(-0.2)), "0 bpm");
}

#[test]
fn test_unitless_metrics() {
    assert_eq!(METRIC.heart_rate(Some(152.6)), "153 bpm");
    assert_eq!(IMPERIAL.cadence(Some(88.0)), "88 spm");
    assert_eq!(METRIC.power(Some(245.4)), "245 W");
}

#[test]
fn test_effort_time_treats_missing_as_zero() {
    assert_eq!(format_effort_time(None), "00:00:00");
    assert_eq!(format_effort_time(Some(1234.0)), "00:20:34");
}

#[test]
fn test_ordinals() {
    let rendered: Vec<String> = [1, 2, 3, 4, 10, 11, 22, 103].into_iter().map(ordinal).collect();
    assert_eq!(rendered, ["1st", "2nd", "3rd", "4th", "10th", "11th", "22nd", "103rd"]);
}
