//! Achievement Analyzer Unit Tests

use miles_to_merch::achievements::{
    analyze, Achievement, AchievementKind, ActivityDetails, AthleteSex, BestEffort, SegmentEffort,
};

fn segment(id: u64, name: &str, seconds: f64, achievements: Vec<Achievement>) -> SegmentEffort {
    SegmentEffort {
        id,
        name: name.to_string(),
        elapsed_time: Some(seconds),
        achievements,
    }
}

fn best(name: &str, seconds: Option<f64>, watts: Option<f64>, pr_rank: Option<u32>) -> BestEffort {
    BestEffort {
        id: None,
        name: name.to_string(),
        elapsed_time: seconds,
        average_watts: watts,
        pr_rank,
    }
}

fn details(segments: Vec<SegmentEffort>, best_efforts: Vec<BestEffort>) -> ActivityDetails {
    ActivityDetails {
        segment_efforts: segments,
        best_efforts,
    }
}

#[test]
fn test_crown_depends_on_athlete_sex() {
    let input = details(vec![segment(1, "Col", 600.0, vec![Achievement::overall(1)])], vec![]);

    let female = analyze(Some(&input), AthleteSex::from_code(Some("F")));
    assert!(female[0].text.contains("QOM"));
    assert_eq!(female[0].kind, AchievementKind::Qom);

    let male = analyze(Some(&input), AthleteSex::from_code(Some("M")));
    assert!(male[0].text.contains("KOM"));
    assert_eq!(male[0].text, "KOM on 'Col': 00:10:00 👑");

    let unknown = analyze(Some(&input), AthleteSex::from_code(None));
    assert_eq!(unknown[0].kind, AchievementKind::Kom);
}

#[test]
fn test_top_ten_and_personal_records() {
    let input = details(
        vec![
            segment(1, "Hill", 300.0, vec![Achievement::overall(3)]),
            segment(2, "Lane", 75.0, vec![Achievement::pr(2)]),
            segment(3, "Park", 90.0, vec![Achievement::pr(1)]),
        ],
        vec![],
    );

    let options = analyze(Some(&input), AthleteSex::Male);
    let texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "3rd overall on 'Hill': 00:05:00 🏆",
            "Personal best on 'Park': 00:01:30 🥇",
            "2nd personal best on 'Lane': 00:01:15 🥈",
        ]
    );
}

#[test]
fn test_overall_rank_wins_over_pr() {
    let input = details(
        vec![segment(1, "Hill", 300.0, vec![Achievement::pr(1), Achievement::overall(5)])],
        vec![],
    );
    let options = analyze(Some(&input), AthleteSex::Female);
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].kind, AchievementKind::Top10);
}

#[test]
fn test_unranked_efforts_are_skipped() {
    let input = details(
        vec![
            segment(1, "Far back", 300.0, vec![Achievement::overall(11)]),
            segment(2, "Slow", 300.0, vec![Achievement::pr(4)]),
            segment(3, "Plain", 300.0, vec![]),
        ],
        vec![],
    );
    assert!(analyze(Some(&input), AthleteSex::Male).is_empty());
}

#[test]
fn test_power_best_effort_uses_watts() {
    let input = details(vec![], vec![best("256m Power", Some(40.0), Some(312.4), Some(1))]);

    let options = analyze(Some(&input), AthleteSex::Male);
    assert_eq!(options[0].text, "Personal best 256m Power: 312 W 🥇");
    assert!(!options[0].text.contains("00:"));
    assert_eq!(options[0].kind, AchievementKind::BestEffortTop3);
    assert_eq!(options[0].priority, 3);
}

#[test]
fn test_best_effort_texts() {
    let input = details(
        vec![],
        vec![
            best("5k", Some(1200.0), None, None),
            best("1 mile", Some(360.0), None, Some(3)),
        ],
    );

    let options = analyze(Some(&input), AthleteSex::Male);
    assert_eq!(options[0].text, "3rd best 1 mile: 00:06:00 🥉");
    assert_eq!(options[0].priority, 5);
    assert_eq!(options[1].text, "Fastest 5k: 00:20:00");
    assert_eq!(options[1].kind, AchievementKind::BestEffort);
    assert_eq!(options[1].priority, 6);
}

#[test]
fn test_sorted_by_priority_and_numbered() {
    let input = details(
        vec![
            segment(1, "A", 60.0, vec![Achievement::pr(3)]),
            segment(2, "B", 60.0, vec![Achievement::overall(1)]),
            segment(3, "C", 60.0, vec![Achievement::pr(3)]),
        ],
        vec![best("400m", Some(80.0), None, None)],
    );

    let options = analyze(Some(&input), AthleteSex::Male);
    let ids: Vec<&str> = options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["segment_2", "segment_1", "segment_3", "best_400m"]);

    let orders: Vec<usize> = options.iter().map(|o| o.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert!(options.iter().all(|o| o.selected));
}

#[test]
fn test_missing_details_yield_nothing() {
    assert!(analyze(None, AthleteSex::Male).is_empty());
    assert!(analyze(Some(&ActivityDetails::default()), AthleteSex::Female).is_empty());
}

#[test]
fn test_parses_provider_payload() {
    let payload = serde_json::json!({
        "segment_efforts": [
            {
                "id": 99,
                "name": "Bridge",
                "elapsed_time": 125,
                "achievements": [{ "type": "overall", "rank": 1 }]
            }
        ],
        "best_efforts": [
            { "id": 5, "name": "1k", "elapsed_time": 240, "pr_rank": null }
        ],
        "distance": 10234.5
    });
    let parsed: ActivityDetails = serde_json::from_value(payload).unwrap();

    let options = analyze(Some(&parsed), AthleteSex::Female);
    assert_eq!(options[0].text, "QOM on 'Bridge': 00:02:05 👑");
    assert_eq!(options[1].id, "best_5");
}
