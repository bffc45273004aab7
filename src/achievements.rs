//! Achievement badges derived from activity details.
//!
//! [`analyze`] turns the segment efforts and best efforts of an activity
//! into badge options ranked by how notable they are: crowns first, then
//! top-10 placings, personal records, and plain fastest efforts last.

use crate::format::{UnitFormatter, format_effort_time, ordinal};
use serde::{Deserialize, Serialize};
use std::fmt;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

// ============================================================================
// Activity Payload
// ============================================================================

/// The parts of an activity-detail payload the analyzer reads
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityDetails {
    pub segment_efforts: Vec<SegmentEffort>,
    pub best_efforts: Vec<BestEffort>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentEffort {
    pub id: u64,
    pub name: String,
    pub elapsed_time: Option<f64>,
    pub achievements: Vec<Achievement>,
}

/// A ranking attached to an effort by the activity provider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    /// `"overall"` or `"pr"`; other values are ignored
    #[serde(rename = "type")]
    pub kind: String,
    pub rank: u32,
}

impl Achievement {
    pub fn overall(rank: u32) -> Self {
        Self {
            kind: "overall".to_string(),
            rank,
        }
    }

    pub fn pr(rank: u32) -> Self {
        Self {
            kind: "pr".to_string(),
            rank,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestEffort {
    pub id: Option<u64>,
    pub name: String,
    pub elapsed_time: Option<f64>,
    pub average_watts: Option<f64>,
    pub pr_rank: Option<u32>,
}

/// Athlete sex as reported by the provider; decides KOM vs QOM
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AthleteSex {
    Female,
    Male,
    #[default]
    Unspecified,
}

impl AthleteSex {
    /// Parse the provider's `"F"` / `"M"` marker
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("F") => AthleteSex::Female,
            Some("M") => AthleteSex::Male,
            _ => AthleteSex::Unspecified,
        }
    }
}

// ============================================================================
// Badge Options
// ============================================================================

/// Category of a badge, which also fixes its priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementKind {
    #[serde(rename = "kom")]
    Kom,
    #[serde(rename = "qom")]
    Qom,
    #[serde(rename = "top10")]
    Top10,
    #[serde(rename = "pr_1")]
    Pr1,
    #[serde(rename = "pr_2")]
    Pr2,
    #[serde(rename = "pr_3")]
    Pr3,
    #[serde(rename = "best_effort_top3")]
    BestEffortTop3,
    #[serde(rename = "best_effort")]
    BestEffort,
    #[serde(other, rename = "unknown")]
    Unknown,
}

impl AchievementKind {
    /// Sort key; lower is more notable
    pub fn priority(self) -> u8 {
        match self {
            AchievementKind::Kom | AchievementKind::Qom => 1,
            AchievementKind::Top10 => 2,
            AchievementKind::Pr1 => 3,
            AchievementKind::Pr2 | AchievementKind::BestEffortTop3 => 4,
            AchievementKind::Pr3 => 5,
            AchievementKind::BestEffort => 6,
            AchievementKind::Unknown => 99,
        }
    }

    /// Personal-record kind for ranks 1-3
    fn pr(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(AchievementKind::Pr1),
            2 => Some(AchievementKind::Pr2),
            3 => Some(AchievementKind::Pr3),
            _ => None,
        }
    }

    fn crown(sex: AthleteSex) -> Self {
        if sex == AthleteSex::Female {
            AchievementKind::Qom
        } else {
            AchievementKind::Kom
        }
    }

    fn label(self) -> &'static str {
        match self {
            AchievementKind::Kom => "KOM",
            AchievementKind::Qom => "QOM",
            _ => "",
        }
    }
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AchievementKind::Kom => "kom",
            AchievementKind::Qom => "qom",
            AchievementKind::Top10 => "top10",
            AchievementKind::Pr1 => "pr_1",
            AchievementKind::Pr2 => "pr_2",
            AchievementKind::Pr3 => "pr_3",
            AchievementKind::BestEffortTop3 => "best_effort_top3",
            AchievementKind::BestEffort => "best_effort",
            AchievementKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One selectable badge shown in the badge list element
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementOption {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    pub priority: u8,
    pub selected: bool,
    pub order: usize,
}

// ============================================================================
// Analysis
// ============================================================================

/// Derive ranked badge options from an activity.
///
/// The result is sorted by priority (stable, so equal priorities keep the
/// order they were found in), every option starts selected, and `order` is
/// the final position.
pub fn analyze(details: Option<&ActivityDetails>, sex: AthleteSex) -> Vec<AchievementOption> {
    let Some(details) = details else {
        return Vec::new();
    };

    let mut options: Vec<(String, String, AchievementKind, u8)> = details
        .segment_efforts
        .iter()
        .filter_map(|effort| segment_option(effort, sex))
        .collect();
    options.extend(details.best_efforts.iter().map(best_effort_option));

    options.sort_by_key(|(_, _, _, priority)| *priority);

    options
        .into_iter()
        .enumerate()
        .map(|(order, (id, text, kind, priority))| AchievementOption {
            id,
            text,
            kind,
            priority,
            selected: true,
            order,
        })
        .collect()
}

fn segment_option(
    effort: &SegmentEffort,
    sex: AthleteSex,
) -> Option<(String, String, AchievementKind, u8)> {
    let overall = effort.achievements.iter().find(|a| a.kind == "overall");
    let pr = effort.achievements.iter().find(|a| a.kind == "pr");
    let time = format_effort_time(effort.elapsed_time);
    let name = &effort.name;

    let (kind, text) = if let Some(overall) = overall {
        match overall.rank {
            1 => {
                let kind = AchievementKind::crown(sex);
                (kind, format!("{} on '{name}': {time} 👑", kind.label()))
            }
            2..=10 => (
                AchievementKind::Top10,
                format!("{} overall on '{name}': {time} 🏆", ordinal(overall.rank)),
            ),
            _ => return None,
        }
    } else {
        let pr = pr?;
        let kind = AchievementKind::pr(pr.rank)?;
        let medal = MEDALS[pr.rank as usize - 1];
        let text = if pr.rank == 1 {
            format!("Personal best on '{name}': {time} {medal}")
        } else {
            format!("{} personal best on '{name}': {time} {medal}", ordinal(pr.rank))
        };
        (kind, text)
    };

    Some((format!("segment_{}", effort.id), text, kind, kind.priority()))
}

fn best_effort_option(best: &BestEffort) -> (String, String, AchievementKind, u8) {
    let value = if best.name.to_lowercase().contains("power") {
        UnitFormatter::default().power(best.average_watts)
    } else {
        format_effort_time(best.elapsed_time)
    };
    let name = &best.name;
    let id = match best.id {
        Some(id) => format!("best_{id}"),
        None => format!("best_{name}"),
    };

    match best.pr_rank.and_then(|rank| AchievementKind::pr(rank).map(|pr| (rank, pr))) {
        Some((rank, pr_kind)) => {
            let medal = MEDALS[rank as usize - 1];
            let text = if rank == 1 {
                format!("Personal best {name}: {value} {medal}")
            } else {
                format!("{} best {name}: {value} {medal}", ordinal(rank))
            };
            (id, text, AchievementKind::BestEffortTop3, pr_kind.priority())
        }
        None => {
            let kind = AchievementKind::BestEffort;
            (id, format!("Fastest {name}: {value}"), kind, kind.priority())
        }
    }
}
