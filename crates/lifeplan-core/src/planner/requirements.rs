//! Weekly requirement calculation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{Config, Tier};

/// Time requirement for one activity over one week.
///
/// Derived from the configuration on every call; never cached, since it
/// depends on nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyRequirement {
    pub activity_id: String,
    pub activity_name: String,
    pub min_sessions: u32,
    pub max_sessions: u32,
    pub min_duration: u32,
    pub max_duration: u32,
    pub total_min_minutes: u32,
    pub total_max_minutes: u32,
    pub tier: Tier,
}

/// Compute the weekly requirement for every configured activity.
pub fn weekly_requirements(config: &Config) -> BTreeMap<String, WeeklyRequirement> {
    config
        .activities
        .iter()
        .map(|activity| {
            let (min_sessions, max_sessions) = activity.frequency_range();
            let (min_duration, max_duration) = activity.duration_range();
            (
                activity.id.clone(),
                WeeklyRequirement {
                    activity_id: activity.id.clone(),
                    activity_name: activity.name.clone(),
                    min_sessions,
                    max_sessions,
                    min_duration,
                    max_duration,
                    total_min_minutes: min_sessions * min_duration,
                    total_max_minutes: max_sessions * max_duration,
                    tier: config.tier_of(&activity.id),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_toml_str(
            r#"
            [[activities]]
            id = "exercise"
            name = "Exercise"
            category = "health"
            frequency = 3
            duration = 45

            [[activities]]
            id = "reading"
            name = "Reading"
            category = "learning"
            frequency = "daily"
            duration = "30-45"

            [priorities]
            critical = ["exercise"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn exact_frequency_and_duration() {
        let requirements = weekly_requirements(&config());
        let exercise = &requirements["exercise"];
        assert_eq!(exercise.min_sessions, 3);
        assert_eq!(exercise.max_sessions, 3);
        assert_eq!(exercise.total_min_minutes, 135);
        assert_eq!(exercise.total_max_minutes, 135);
        assert_eq!(exercise.tier, Tier::Critical);
    }

    #[test]
    fn daily_frequency_with_ranged_duration() {
        let requirements = weekly_requirements(&config());
        let reading = &requirements["reading"];
        assert_eq!(reading.min_sessions, 7);
        assert_eq!(reading.total_min_minutes, 210);
        assert_eq!(reading.total_max_minutes, 315);
        assert_eq!(reading.tier, Tier::Medium);
    }
}
