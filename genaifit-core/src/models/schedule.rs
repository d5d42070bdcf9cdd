use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::store::{Collection, Record};

/// Day of the weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        };
        f.write_str(s)
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Weekday::ALL
            .into_iter()
            .find(|d| d.to_string() == upper || (upper.len() > 3 && upper.starts_with(&d.to_string())))
            .ok_or_else(|| {
                format!(
                    "Invalid day '{}'. Valid options: mon, tue, wed, thu, fri, sat, sun",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScheduleStatus {
    #[default]
    Scheduled,
    Completed,
    Skipped,
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::Scheduled => write!(f, "Scheduled"),
            ScheduleStatus::Completed => write!(f, "Completed"),
            ScheduleStatus::Skipped => write!(f, "Skipped"),
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(ScheduleStatus::Scheduled),
            "completed" => Ok(ScheduleStatus::Completed),
            "skipped" => Ok(ScheduleStatus::Skipped),
            _ => Err(format!(
                "Invalid status '{}'. Valid options: scheduled, completed, skipped",
                s
            )),
        }
    }
}

/// A workout slotted into the weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledWorkout {
    pub day: Weekday,
    pub name: String,
    /// Minutes.
    pub duration: u32,
    #[serde(default)]
    pub status: ScheduleStatus,
}

impl ScheduledWorkout {
    pub const DEFAULT_DURATION: u32 = 30;

    pub fn new(day: Weekday, name: impl Into<String>) -> Self {
        Self {
            day,
            name: name.into(),
            duration: Self::DEFAULT_DURATION,
            status: ScheduleStatus::Scheduled,
        }
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }
}

impl Record for ScheduledWorkout {
    const COLLECTION: Collection = Collection::Schedules;
}

impl fmt::Display for ScheduledWorkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({} min) [{}]",
            self.day, self.name, self.duration, self.status
        )
    }
}

/// Partial update for a scheduled workout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchedulePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<Weekday>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
}
