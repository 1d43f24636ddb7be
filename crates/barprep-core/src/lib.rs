//! # Barprep Core Library
//!
//! Deterministic study planning and readiness estimation for bar exam
//! candidates. The CLI binary is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Planner**: partitions the window before the exam into weekly study
//!   blocks across four phases, with a full-time ramp near the exam
//! - **Projection**: converts practice scores into a projected scaled score
//!   and a pass/fail verdict
//! - **Day plan**: request building and stale-response handling for an
//!   external day-by-day plan generator
//! - **Storage**: TOML-based configuration of default inputs
//!
//! Both calculators are pure functions over immutable inputs. Every call
//! recomputes from scratch.
//!
//! ## Key Components
//!
//! - [`generate_schedule`]: weekly study blocks for a date window
//! - [`project`]: projected exam score
//! - [`Phase`]: the ordered phase catalog
//! - [`Config`]: application configuration management

pub mod day_plan;
pub mod error;
pub mod phase;
pub mod planner;
pub mod projection;
pub mod storage;
pub mod subjects;

pub use day_plan::{DayPlanRequest, DayPlanner, PlanError, PlanOutcome, PlanSelection};
pub use error::{ConfigError, CoreError, ValidationError};
pub use phase::Phase;
pub use planner::{generate_schedule, total_hours, PhaseSummary, SchedulerInputs, WeekBlock};
pub use projection::{
    project, Advice, EssayBand, ScoreInputs, ScoreProjection, Verdict, PASSING_SCORE,
};
pub use storage::Config;
pub use subjects::{Subject, SUBJECTS};
