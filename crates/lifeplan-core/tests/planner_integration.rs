//! Integration tests for the weekly planning workflow.
//!
//! These tests drive the full analyze/propose cycle over synthetic weeks:
//! deficit filling, priority contention, boundary durations, and feeding
//! accepted proposals back into analysis.

use chrono::{DateTime, Duration, TimeZone, Utc};
use lifeplan_core::{
    Config, MatchMode, ScheduledEvent, Tier, WeekPlanner,
};

/// Monday of the test week, 2026-01-19.
fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 19, 0, 0, 0).unwrap()
}

/// Busy events leaving each of the 7 days one open window of `hours` hours,
/// starting at 09:00.
fn week_with_daily_window(hours: i64) -> Vec<ScheduledEvent> {
    let mut events = Vec::new();
    for offset in 0..7 {
        let day = monday() + Duration::days(offset);
        events.push(ScheduledEvent::new(
            format!("pre-{offset}"),
            "Blocked",
            day,
            day + Duration::hours(9),
        ));
        events.push(ScheduledEvent::new(
            format!("post-{offset}"),
            "Blocked",
            day + Duration::hours(9 + hours),
            day + Duration::days(1),
        ));
    }
    events
}

#[test]
fn deficit_is_filled_with_minimum_duration_sessions() {
    let config = Config::from_toml_str(
        r#"
        [[activities]]
        id = "exercise"
        name = "Exercise"
        category = "health"
        frequency = 3
        duration = 45

        [priorities]
        high = ["exercise"]
        "#,
    )
    .unwrap();
    let planner = WeekPlanner::new(config);

    let events = week_with_daily_window(8);
    let proposal = planner.propose_week(&events, monday()).unwrap();

    assert_eq!(proposal.proposals.len(), 3);
    for proposed in &proposal.proposals {
        assert_eq!(proposed.duration_minutes(), 45);
        assert_eq!(proposed.tier, Tier::High);
        assert_eq!(proposed.activity_id, "exercise");
    }

    let coverage = &proposal.coverage["exercise"];
    assert_eq!(coverage.scheduled, 3);
    assert_eq!(coverage.target, 3);
    assert!(coverage.covered);
}

#[test]
fn critical_activity_wins_the_contested_slot() {
    let config = Config::from_toml_str(
        r#"
        [[activities]]
        id = "errands"
        name = "Errands"
        category = "life"
        frequency = 1
        duration = 60

        [[activities]]
        id = "therapy"
        name = "Therapy"
        category = "health"
        frequency = 1
        duration = 60

        [priorities]
        critical = ["therapy"]
        low = ["errands"]
        "#,
    )
    .unwrap();
    let planner = WeekPlanner::new(config).with_min_slot(15);

    // One 60-minute window in the whole week.
    let mut events = vec![ScheduledEvent::new(
        "all-week",
        "Blocked",
        monday(),
        monday() + Duration::days(6),
    )];
    events.push(ScheduledEvent::new(
        "sunday",
        "Blocked",
        monday() + Duration::days(6) + Duration::hours(1),
        monday() + Duration::days(7),
    ));

    let proposal = planner.propose_week(&events, monday()).unwrap();

    assert_eq!(proposal.proposals.len(), 1);
    assert_eq!(proposal.proposals[0].activity_id, "therapy");
    assert_eq!(proposal.proposals[0].tier, Tier::Critical);

    assert!(proposal.coverage["therapy"].covered);
    let errands = &proposal.coverage["errands"];
    assert!(!errands.covered);
    assert_eq!(errands.scheduled, 0);

    // The loser keeps its residual deficit in a fresh analysis too.
    let analysis = planner.analyze_week(&events, monday());
    assert_eq!(analysis["errands"].sessions_deficit, 1);
}

#[test]
fn slot_of_exactly_minimum_duration_qualifies() {
    let config = Config::from_toml_str(
        r#"
        [[activities]]
        id = "yoga"
        name = "Yoga"
        category = "health"
        frequency = 1
        duration = 45
        "#,
    )
    .unwrap();
    let planner = WeekPlanner::new(config).with_min_slot(15);

    // Exactly 45 free minutes on Monday.
    let exact = vec![
        ScheduledEvent::new("a", "Blocked", monday() + Duration::minutes(45), monday() + Duration::days(7)),
    ];
    let proposal = planner.propose_week(&exact, monday()).unwrap();
    assert_eq!(proposal.proposals.len(), 1);
    assert_eq!(proposal.proposals[0].duration_minutes(), 45);

    // 44 minutes does not qualify.
    let short = vec![
        ScheduledEvent::new("a", "Blocked", monday() + Duration::minutes(44), monday() + Duration::days(7)),
    ];
    let proposal = planner.propose_week(&short, monday()).unwrap();
    assert!(proposal.proposals.is_empty());
    assert!(!proposal.coverage["yoga"].covered);
}

#[test]
fn lower_priority_activities_still_get_leftover_time() {
    let config = Config::from_toml_str(
        r#"
        [[activities]]
        id = "study"
        name = "Study"
        category = "learning"
        frequency = 1
        duration = 60

        [[activities]]
        id = "walk"
        name = "Walk"
        category = "health"
        frequency = 1
        duration = 30

        [priorities]
        high = ["study"]
        low = ["walk"]
        "#,
    )
    .unwrap();
    let planner = WeekPlanner::new(config).with_min_slot(15);

    // A single 2-hour window: study takes the first hour, the walk must fit
    // in the shrunken remainder.
    let events = vec![
        ScheduledEvent::new("pre", "Blocked", monday(), monday() + Duration::hours(10)),
        ScheduledEvent::new(
            "post",
            "Blocked",
            monday() + Duration::hours(12),
            monday() + Duration::days(7),
        ),
    ];

    let proposal = planner.propose_week(&events, monday()).unwrap();
    assert_eq!(proposal.proposals.len(), 2);
    assert_eq!(proposal.proposals[0].activity_id, "study");
    assert_eq!(proposal.proposals[1].activity_id, "walk");
    // The walk starts where the study session ended.
    assert_eq!(proposal.proposals[1].start, proposal.proposals[0].end);
    assert!(proposal.coverage.values().all(|summary| summary.covered));
}

#[test]
fn proposals_fed_back_as_events_clear_the_deficit() {
    let config = Config::from_toml_str(
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
        frequency = 2
        duration = 30
        "#,
    )
    .unwrap();
    let planner = WeekPlanner::new(config);

    // One pre-existing tagged session for exercise.
    let mut events = week_with_daily_window(8);
    events.push(
        ScheduledEvent::new(
            "existing",
            "Exercise",
            monday() + Duration::hours(9),
            monday() + Duration::hours(10),
        )
        .with_activity("exercise"),
    );

    let proposal = planner.propose_week(&events, monday()).unwrap();
    // 2 more exercise sessions and 2 reading sessions.
    assert_eq!(
        proposal
            .proposals
            .iter()
            .filter(|p| p.activity_id == "exercise")
            .count(),
        2
    );

    // Accept every proposal: book it as a tagged event.
    events.extend(proposal.proposals.iter().map(|p| p.as_scheduled_event()));

    let analysis = planner.analyze_week(&events, monday());
    for info in analysis.values() {
        assert_eq!(info.sessions_deficit, 0, "{} still short", info.activity_id);
        assert!(info.on_track);
    }
    // Pre-existing tagged events are not double-counted: exactly the target.
    assert_eq!(analysis["exercise"].scheduled_sessions, 3);
    assert_eq!(analysis["reading"].scheduled_sessions, 2);

    // And a second proposal pass has nothing left to do.
    let second = planner.propose_week(&events, monday()).unwrap();
    assert!(second.proposals.is_empty());
}

#[test]
fn strict_mode_planner_reschedules_untagged_lookalikes() {
    let config = Config::from_toml_str(
        r#"
        [[activities]]
        id = "reading"
        name = "Reading"
        category = "learning"
        frequency = 1
        duration = 30
        "#,
    )
    .unwrap();

    // An untagged event whose title matches the activity name.
    let mut events = week_with_daily_window(8);
    events.push(ScheduledEvent::new(
        "manual",
        "Reading on the porch",
        monday() + Duration::hours(9),
        monday() + Duration::hours(10),
    ));

    let heuristic = WeekPlanner::new(Config::from_toml_str(
        r#"
        [[activities]]
        id = "reading"
        name = "Reading"
        category = "learning"
        frequency = 1
        duration = 30
        "#,
    )
    .unwrap());
    let strict = WeekPlanner::new(config).with_match_mode(MatchMode::Strict);

    // Heuristic matching counts the manual event; strict does not.
    assert!(heuristic
        .propose_week(&events, monday())
        .unwrap()
        .proposals
        .is_empty());
    assert_eq!(strict.propose_week(&events, monday()).unwrap().proposals.len(), 1);
}

#[test]
fn template_and_commitments_are_kept_free_of_proposals() {
    let config = Config::from_toml_str(
        r#"
        [template.work]
        days = ["monday", "tuesday", "wednesday", "thursday", "friday"]
        start = "09:00"
        end = "17:00"

        [template.sleep]
        bedtime = "23:00"
        wake = "07:00"

        [[commitments]]
        name = "Band practice"
        day = "tuesday"
        start = "19:00"
        end = "21:00"

        [[activities]]
        id = "reading"
        name = "Reading"
        category = "learning"
        frequency = "daily"
        duration = 30
        "#,
    )
    .unwrap();
    let planner = WeekPlanner::new(config);

    let proposal = planner.propose_week(&[], monday()).unwrap();
    assert_eq!(proposal.proposals.len(), 7);

    let tuesday = monday() + Duration::days(1);
    for proposed in &proposal.proposals {
        let day_offset = (proposed.start - monday()).num_days();
        let day_start = monday() + Duration::days(day_offset);

        // Never before wake or after bedtime.
        assert!(proposed.start >= day_start + Duration::hours(7));
        assert!(proposed.end <= day_start + Duration::hours(23));

        // Never inside work hours on a weekday.
        if day_offset < 5 {
            let work_start = day_start + Duration::hours(9);
            let work_end = day_start + Duration::hours(17);
            assert!(proposed.end <= work_start || proposed.start >= work_end);
        }

        // Never inside the Tuesday commitment.
        let practice_start = tuesday + Duration::hours(19);
        let practice_end = tuesday + Duration::hours(21);
        assert!(proposed.end <= practice_start || proposed.start >= practice_end);
    }
}
