//! # Lifeplan Core Library
//!
//! This library provides the scheduling engine behind Lifeplan: a personal
//! assistant that keeps a week's calendar aligned with a declarative
//! configuration of recurring activities, fixed commitments and priorities.
//! It implements a CLI-first philosophy where all operations are available
//! via a standalone CLI binary, with chat/bot front-ends being thin layers
//! over the same core library.
//!
//! ## Architecture
//!
//! - **Configuration**: TOML-based activity/commitment/priority model with
//!   shorthand field shapes normalized at parse time
//! - **Timeline**: Slot primitives, free-busy inversion, and preference
//!   filtering
//! - **Planner**: Requirement calculation, coverage analysis, and greedy
//!   gap-filling proposal generation
//! - **Calendar boundary**: Read-only event contract with the calendar
//!   collaborator; the engine proposes, the caller books
//!
//! The engine is single-threaded, synchronous, and stateless between calls:
//! every operation is pure computation over already-fetched data.
//!
//! ## Key Components
//!
//! - [`Config`]: Validated life configuration
//! - [`WeekPlanner`]: Analysis and proposal operations over one week
//! - [`TimeSlot`]: Half-open interval with busy/free provenance
//! - [`EventSource`]: Trait for calendar collaborators

pub mod calendar;
pub mod config;
pub mod error;
pub mod planner;
pub mod timeline;

pub use calendar::{EventDraft, EventSource, ScheduledEvent, StaticEvents};
pub use config::{
    Activity, ActivityCategory, ClockTime, Commitment, Config, DayOfWeek, DurationSpec,
    EventFormat, FrequencySpec, Priorities, SleepTemplate, Tier, TimeOfDay, TimePreference,
    WeekTemplate, WorkTemplate,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use planner::{
    CoverageInfo, CoverageSummary, MatchMode, ProposedEvent, ScheduleProposal, WeekPlanner,
    WeeklyRequirement,
};
pub use timeline::{AvailabilityCalculator, TimeSlot};
