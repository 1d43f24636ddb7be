//! Day-by-day plan requests for a single scheduled week.
//!
//! The narrative itself comes from an external generator behind
//! [`DayPlanner`]. This module builds the request from a [`WeekBlock`],
//! turns generator failures into a displayable fallback, and drops responses
//! for weeks that are no longer selected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::planner::WeekBlock;

/// Shown in place of a plan when the generator fails.
pub const PLAN_FALLBACK: &str = "Error generating schedule.";
/// Shown when the generator answers with nothing.
pub const EMPTY_PLAN_FALLBACK: &str = "Unable to generate schedule.";

/// Payload handed to the day planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlanRequest {
    pub phase_name: String,
    pub hours_this_week: f64,
    pub focus_subjects: Vec<String>,
}

impl DayPlanRequest {
    pub fn for_week(week: &WeekBlock) -> Self {
        Self {
            phase_name: week.phase.name().to_string(),
            hours_this_week: week.hours,
            focus_subjects: week
                .phase
                .focus_subjects()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("day planner unavailable: {0}")]
    Unavailable(String),
    #[error("day planner timed out")]
    TimedOut,
    #[error("day planner returned an empty plan")]
    Empty,
}

/// Generator of a free-form daily breakdown for one week.
pub trait DayPlanner: Send + Sync {
    fn plan(&self, request: &DayPlanRequest) -> Result<String, PlanError>;
}

/// What the caller displays for a plan request.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Plan(String),
    Fallback { message: String, cause: PlanError },
}

impl PlanOutcome {
    /// Collapse a planner result into something displayable.
    pub fn resolve(result: Result<String, PlanError>) -> Self {
        match result {
            Ok(text) if text.trim().is_empty() => Self::fallback(PlanError::Empty),
            Ok(text) => PlanOutcome::Plan(text),
            Err(cause) => Self::fallback(cause),
        }
    }

    fn fallback(cause: PlanError) -> Self {
        tracing::warn!(error = %cause, "day plan generation failed");
        let message = match cause {
            PlanError::Empty => EMPTY_PLAN_FALLBACK,
            _ => PLAN_FALLBACK,
        };
        PlanOutcome::Fallback {
            message: message.to_string(),
            cause,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            PlanOutcome::Plan(text) => text,
            PlanOutcome::Fallback { message, .. } => message,
        }
    }
}

/// Handle for one in-flight plan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanTicket {
    generation: u64,
    week_index: usize,
}

impl PlanTicket {
    pub fn week_index(&self) -> usize {
        self.week_index
    }
}

/// Tracks the currently selected week so stale plan responses are dropped.
#[derive(Debug, Default)]
pub struct PlanSelection {
    generation: u64,
    /// Generation still waiting for a response; cleared by the first accept.
    pending: Option<u64>,
    selected: Option<usize>,
    current: Option<PlanOutcome>,
}

impl PlanSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a week, superseding any request still in flight.
    pub fn select(&mut self, week: &WeekBlock) -> PlanTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.selected = Some(week.week_index);
        self.current = None;
        PlanTicket {
            generation: self.generation,
            week_index: week.week_index,
        }
    }

    /// Apply a response. Returns `false` if the ticket was superseded or
    /// already answered.
    pub fn accept(&mut self, ticket: PlanTicket, result: Result<String, PlanError>) -> bool {
        if self.pending != Some(ticket.generation) {
            tracing::debug!(
                week_index = ticket.week_index,
                "dropping superseded or duplicate day plan"
            );
            return false;
        }
        self.pending = None;
        self.current = Some(PlanOutcome::resolve(result));
        true
    }

    pub fn selected_week(&self) -> Option<usize> {
        self.selected
    }

    /// `None` while the latest request is still pending.
    pub fn current(&self) -> Option<&PlanOutcome> {
        self.current.as_ref()
    }
}
