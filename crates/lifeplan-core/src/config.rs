//! TOML-based life configuration.
//!
//! Describes what a week should contain: recurring activities with weekly
//! frequency/duration targets, fixed commitments, priority tiers, and the
//! work/sleep template used to carve out unavailable time. Shorthand field
//! shapes from the configuration file (a frequency of `3`, `"daily"` or
//! `"3-4"`; a duration of `45` or `"30-45"`; a time preference given as one
//! value or a list) are normalized into uniform range/set types at parse
//! time, so the planner only ever sees one shape.

use std::fmt;
use std::path::Path;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Days of the week, serialized lowercase (`"monday"` .. `"sunday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }

    /// Offset from Monday in days (0 = Monday .. 6 = Sunday).
    pub fn offset_from_monday(&self) -> i64 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }
}

/// Time-of-day bands for activity preferences.
///
/// Morning is [05:00, 12:00), afternoon [12:00, 17:00), evening
/// [17:00, 22:00). Flexible matches any hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Flexible,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Flexible => "flexible",
        }
    }

    /// Whether an hour of day (0-23) falls inside this band.
    pub fn hour_matches(&self, hour: u32) -> bool {
        match self {
            Self::Morning => (5..12).contains(&hour),
            Self::Afternoon => (12..17).contains(&hour),
            Self::Evening => (17..22).contains(&hour),
            Self::Flexible => true,
        }
    }
}

/// Category of activity for organizing a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    Health,
    Learning,
    Creative,
    Work,
    Life,
    Social,
    Other,
}

impl ActivityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Learning => "learning",
            Self::Creative => "creative",
            Self::Work => "work",
            Self::Life => "life",
            Self::Social => "social",
            Self::Other => "other",
        }
    }
}

/// Priority tier of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Critical,
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Sort rank: critical = 0 .. low = 3.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

/// A clock time of day, parsed from `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ConfigError> {
        if hour > 23 || minute > 59 {
            return Err(ConfigError::invalid(
                "time",
                format!("{hour:02}:{minute:02} is not a valid clock time"),
            ));
        }
        Ok(Self { hour, minute })
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || {
            ConfigError::invalid("time", format!("expected HH:MM, got '{value}'"))
        };
        let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
        let hour: u8 = hour.trim().parse().map_err(|_| invalid())?;
        let minute: u8 = minute.trim().parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    pub fn to_naive(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, 0)
            .expect("validated clock time is always in range")
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

fn parse_range(value: &str, field: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || {
        ConfigError::invalid(
            field,
            format!("expected a number or 'min-max' range, got '{value}'"),
        )
    };
    let (min, max) = value.split_once('-').ok_or_else(invalid)?;
    let min: u32 = min.trim().parse().map_err(|_| invalid())?;
    let max: u32 = max.trim().parse().map_err(|_| invalid())?;
    if min > max {
        return Err(ConfigError::invalid(
            field,
            format!("range minimum {min} exceeds maximum {max}"),
        ));
    }
    Ok((min, max))
}

/// Weekly session frequency, normalized to a closed `(min, max)` range.
///
/// Accepts an exact count, `"daily"` (7), `"weekly"` (1), or `"a-b"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FrequencyRepr", into = "FrequencyRepr")]
pub struct FrequencySpec {
    min: u32,
    max: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FrequencyRepr {
    Count(u32),
    Text(String),
}

impl TryFrom<FrequencyRepr> for FrequencySpec {
    type Error = ConfigError;

    fn try_from(repr: FrequencyRepr) -> Result<Self, Self::Error> {
        match repr {
            FrequencyRepr::Count(n) => Ok(Self { min: n, max: n }),
            FrequencyRepr::Text(text) => match text.as_str() {
                "daily" => Ok(Self { min: 7, max: 7 }),
                "weekly" => Ok(Self { min: 1, max: 1 }),
                other => {
                    if let Ok(n) = other.trim().parse::<u32>() {
                        return Ok(Self { min: n, max: n });
                    }
                    let (min, max) = parse_range(other, "frequency")?;
                    Ok(Self { min, max })
                }
            },
        }
    }
}

impl From<FrequencySpec> for FrequencyRepr {
    fn from(spec: FrequencySpec) -> Self {
        if spec.min == spec.max {
            FrequencyRepr::Count(spec.min)
        } else {
            FrequencyRepr::Text(format!("{}-{}", spec.min, spec.max))
        }
    }
}

impl FrequencySpec {
    pub fn exact(sessions: u32) -> Self {
        Self {
            min: sessions,
            max: sessions,
        }
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    /// Weekly planning target: the lower frequency bound.
    pub fn weekly_target(&self) -> u32 {
        self.min
    }
}

/// Session duration in minutes, normalized to a closed `(min, max)` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DurationRepr", into = "DurationRepr")]
pub struct DurationSpec {
    min: u32,
    max: u32,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DurationRepr {
    Minutes(u32),
    Text(String),
}

impl TryFrom<DurationRepr> for DurationSpec {
    type Error = ConfigError;

    fn try_from(repr: DurationRepr) -> Result<Self, Self::Error> {
        match repr {
            DurationRepr::Minutes(n) => Ok(Self { min: n, max: n }),
            DurationRepr::Text(text) => {
                if let Ok(n) = text.trim().parse::<u32>() {
                    return Ok(Self { min: n, max: n });
                }
                let (min, max) = parse_range(&text, "duration")?;
                Ok(Self { min, max })
            }
        }
    }
}

impl From<DurationSpec> for DurationRepr {
    fn from(spec: DurationSpec) -> Self {
        if spec.min == spec.max {
            DurationRepr::Minutes(spec.min)
        } else {
            DurationRepr::Text(format!("{}-{}", spec.min, spec.max))
        }
    }
}

impl DurationSpec {
    pub fn exact(minutes: u32) -> Self {
        Self {
            min: minutes,
            max: minutes,
        }
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    pub fn min_minutes(&self) -> u32 {
        self.min
    }

    pub fn max_minutes(&self) -> u32 {
        self.max
    }
}

/// Time-of-day preference, normalized to a non-empty set of bands.
///
/// Accepts a single band or a list; the bands are OR-ed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimePreferenceRepr", into = "TimePreferenceRepr")]
pub struct TimePreference {
    bands: Vec<TimeOfDay>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TimePreferenceRepr {
    One(TimeOfDay),
    Many(Vec<TimeOfDay>),
}

impl TryFrom<TimePreferenceRepr> for TimePreference {
    type Error = ConfigError;

    fn try_from(repr: TimePreferenceRepr) -> Result<Self, Self::Error> {
        match repr {
            TimePreferenceRepr::One(band) => Ok(Self { bands: vec![band] }),
            TimePreferenceRepr::Many(bands) => {
                if bands.is_empty() {
                    return Err(ConfigError::invalid(
                        "time_preference",
                        "preference list must not be empty",
                    ));
                }
                Ok(Self { bands })
            }
        }
    }
}

impl From<TimePreference> for TimePreferenceRepr {
    fn from(pref: TimePreference) -> Self {
        if pref.bands.len() == 1 {
            TimePreferenceRepr::One(pref.bands[0])
        } else {
            TimePreferenceRepr::Many(pref.bands)
        }
    }
}

impl Default for TimePreference {
    fn default() -> Self {
        Self::flexible()
    }
}

impl TimePreference {
    pub fn flexible() -> Self {
        Self {
            bands: vec![TimeOfDay::Flexible],
        }
    }

    pub fn single(band: TimeOfDay) -> Self {
        Self { bands: vec![band] }
    }

    pub fn bands(&self) -> &[TimeOfDay] {
        &self.bands
    }

    pub fn is_flexible(&self) -> bool {
        self.bands.contains(&TimeOfDay::Flexible)
    }

    /// Whether an hour of day falls inside at least one preferred band.
    pub fn matches_hour(&self, hour: u32) -> bool {
        self.bands.iter().any(|band| band.hour_matches(hour))
    }
}

/// An activity that should recur during the week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub category: ActivityCategory,
    pub frequency: FrequencySpec,
    pub duration: DurationSpec,
    #[serde(default)]
    pub time_preference: TimePreference,
    #[serde(default)]
    pub days_preference: Option<Vec<DayOfWeek>>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Activity {
    /// `(min, max)` sessions per week.
    pub fn frequency_range(&self) -> (u32, u32) {
        self.frequency.range()
    }

    /// `(min, max)` minutes per session.
    pub fn duration_range(&self) -> (u32, u32) {
        self.duration.range()
    }

    /// Weekly planning target: the lower frequency bound.
    pub fn weekly_target(&self) -> u32 {
        self.frequency.weekly_target()
    }

    pub fn min_duration(&self) -> u32 {
        self.duration.min_minutes()
    }

    pub fn max_duration(&self) -> u32 {
        self.duration.max_minutes()
    }
}

/// A fixed, non-negotiable recurring block.
///
/// Never subject to deficit analysis; always treated as occupied time when
/// computing availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commitment {
    pub name: String,
    #[serde(default)]
    pub day: Option<DayOfWeek>,
    #[serde(default)]
    pub days: Option<Vec<DayOfWeek>>,
    pub start: ClockTime,
    #[serde(default)]
    pub end: Option<ClockTime>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub travel_minutes: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Commitment {
    /// The days this commitment occupies (`days` wins over `day`).
    pub fn active_days(&self) -> Vec<DayOfWeek> {
        if let Some(days) = &self.days {
            return days.clone();
        }
        self.day.map(|day| vec![day]).unwrap_or_default()
    }

    /// Occupied window as `(start, end)` minutes from midnight, without the
    /// travel buffer. `None` when neither `end` nor `duration` resolves to a
    /// window after `start` within the same day.
    pub fn window_minutes(&self) -> Option<(u32, u32)> {
        let start = self.start.minutes_from_midnight();
        let end = match (self.end, self.duration) {
            (Some(end), _) => end.minutes_from_midnight(),
            (None, Some(minutes)) => start + minutes,
            (None, None) => return None,
        };
        (end > start && end <= 24 * 60).then_some((start, end))
    }
}

/// Work schedule template: occupied hours on work days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkTemplate {
    pub days: Vec<DayOfWeek>,
    pub start: ClockTime,
    pub end: ClockTime,
}

/// Sleep schedule template: target bedtime and wake time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepTemplate {
    pub bedtime: ClockTime,
    pub wake: ClockTime,
}

/// Weekly template carved out of every day's availability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeekTemplate {
    #[serde(default)]
    pub work: Option<WorkTemplate>,
    #[serde(default)]
    pub sleep: Option<SleepTemplate>,
}

/// Priority tiers, each holding a list of activity ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Priorities {
    #[serde(default)]
    pub critical: Vec<String>,
    #[serde(default)]
    pub high: Vec<String>,
    #[serde(default)]
    pub medium: Vec<String>,
    #[serde(default)]
    pub low: Vec<String>,
}

impl Priorities {
    /// Tier lookup, first match in critical -> high -> medium -> low order.
    /// Ids listed in no tier resolve to medium.
    pub fn tier_of(&self, activity_id: &str) -> Tier {
        if self.critical.iter().any(|id| id == activity_id) {
            return Tier::Critical;
        }
        if self.high.iter().any(|id| id == activity_id) {
            return Tier::High;
        }
        if self.medium.iter().any(|id| id == activity_id) {
            return Tier::Medium;
        }
        if self.low.iter().any(|id| id == activity_id) {
            return Tier::Low;
        }
        Tier::Medium
    }
}

/// Naming convention for calendar-event drafts rendered from proposals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFormat {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub include_category: bool,
}

/// Configuration metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub user: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            user: String::new(),
            timezone: default_timezone(),
        }
    }
}

/// Complete life configuration.
///
/// Loaded once per process and treated as immutable by the planner; each
/// operation takes a snapshot at construction time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub template: WeekTemplate,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub priorities: Priorities,
    #[serde(default)]
    pub event_format: EventFormat,
}

impl Config {
    /// Parse and validate a configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (index, activity) in self.activities.iter().enumerate() {
            if activity.id.is_empty() {
                return Err(ConfigError::MissingField(format!("activities[{index}].id")));
            }
            if self.activities[..index]
                .iter()
                .any(|other| other.id == activity.id)
            {
                return Err(ConfigError::invalid(
                    format!("activities[{index}].id"),
                    format!("duplicate activity id '{}'", activity.id),
                ));
            }
        }
        for (index, commitment) in self.commitments.iter().enumerate() {
            if commitment.active_days().is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "commitments[{index}].days"
                )));
            }
            if commitment.end.is_none() && commitment.duration.is_none() {
                return Err(ConfigError::MissingField(format!(
                    "commitments[{index}].end"
                )));
            }
            if commitment.window_minutes().is_none() {
                return Err(ConfigError::invalid(
                    format!("commitments[{index}].end"),
                    format!(
                        "commitment '{}' must end after it starts, within the same day",
                        commitment.name
                    ),
                ));
            }
        }
        if let Some(work) = &self.template.work {
            if work.end <= work.start {
                return Err(ConfigError::invalid(
                    "template.work.end",
                    "work hours must end after they start",
                ));
            }
        }
        Ok(())
    }

    /// Find an activity by id.
    pub fn activity_by_id(&self, activity_id: &str) -> Option<&Activity> {
        self.activities
            .iter()
            .find(|activity| activity.id == activity_id)
    }

    /// All activities in a category, in configuration order.
    pub fn activities_by_category(&self, category: ActivityCategory) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|activity| activity.category == category)
            .collect()
    }

    /// Priority tier of an activity (medium when unlisted).
    pub fn tier_of(&self, activity_id: &str) -> Tier {
        self.priorities.tier_of(activity_id)
    }
}
