//! Adaptive study scheduler.
//!
//! Partitions the window between a start date and the exam date into weekly
//! study blocks:
//! - Each week is assigned one of the four catalog phases
//! - Phase segments are contiguous and sized by each phase's share
//! - Weeks inside the trailing high-intensity window get the full-time budget
//!
//! The schedule is regenerated wholesale from [`SchedulerInputs`] on every
//! change. Nothing here is cached or mutated in place.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::phase::Phase;

/// Inputs for [`generate_schedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerInputs {
    pub start_date: NaiveDate,
    pub exam_date: NaiveDate,
    /// Hours per week outside the high-intensity window
    pub part_time_hours_per_week: f64,
    /// Hours per week inside the high-intensity window
    pub full_time_hours_per_week: f64,
    /// Number of trailing weeks studied at the full-time budget
    pub high_intensity_window_weeks: u32,
}

impl Default for SchedulerInputs {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default(),
            exam_date: NaiveDate::from_ymd_opt(2026, 7, 29).unwrap_or_default(),
            part_time_hours_per_week: 15.0,
            full_time_hours_per_week: 40.0,
            high_intensity_window_weeks: 10,
        }
    }
}

impl SchedulerInputs {
    /// `ceil(days / 7)`, or zero when the exam does not follow the start.
    pub fn total_weeks(&self) -> usize {
        let days = (self.exam_date - self.start_date).num_days();
        if days <= 0 {
            return 0;
        }
        ((days + 6) / 7) as usize
    }

    /// Optional plausibility check for callers that want one.
    ///
    /// [`generate_schedule`] accepts any inputs; this only reports the ones
    /// that would produce an empty or nonsensical schedule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.exam_date <= self.start_date {
            return Err(ValidationError::InvalidDateRange {
                start: self.start_date,
                exam: self.exam_date,
            });
        }
        for (field, value) in [
            ("part_time_hours_per_week", self.part_time_hours_per_week),
            ("full_time_hours_per_week", self.full_time_hours_per_week),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: format!("must be positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// One week of the study timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBlock {
    /// Zero-based position in the schedule
    pub week_index: usize,
    pub week_start_date: NaiveDate,
    pub phase: Phase,
    pub hours: f64,
    pub is_high_intensity: bool,
}

impl WeekBlock {
    /// One-based week number for display.
    pub fn week_number(&self) -> usize {
        self.week_index + 1
    }

    /// Last day of the week (start + 6 days).
    pub fn week_end_date(&self) -> NaiveDate {
        self.week_start_date
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Segment boundaries between consecutive phases.
///
/// Boundary `i` is `floor(total_weeks * cumulative_share_i)`, accumulated in
/// catalog order over the first three phases. The final phase absorbs every
/// week from the last boundary to the end, including any rounding drift.
pub fn phase_boundaries(total_weeks: usize) -> [usize; 3] {
    let mut bounds = [0usize; 3];
    let mut cumulative = 0usize;
    for (slot, phase) in bounds.iter_mut().zip(Phase::ALL.iter()) {
        cumulative += phase.share_percent() as usize;
        *slot = total_weeks * cumulative / 100;
    }
    bounds
}

/// Phase owning week `index` given the segment boundaries.
pub fn phase_for_week(index: usize, boundaries: &[usize; 3]) -> Phase {
    let crossed = boundaries.iter().take_while(|&&b| index >= b).count();
    Phase::ALL[crossed]
}

/// Build the full weekly schedule.
///
/// Returns an empty schedule when `exam_date <= start_date`. Hour budgets are
/// copied through verbatim, whatever their sign.
pub fn generate_schedule(inputs: &SchedulerInputs) -> Vec<WeekBlock> {
    let total_weeks = inputs.total_weeks();
    let boundaries = phase_boundaries(total_weeks);
    let window = inputs.high_intensity_window_weeks as usize;

    let weeks: Vec<WeekBlock> = (0..total_weeks)
        .map(|i| {
            let weeks_remaining = total_weeks - i;
            let is_high_intensity = weeks_remaining <= window;
            let hours = if is_high_intensity {
                inputs.full_time_hours_per_week
            } else {
                inputs.part_time_hours_per_week
            };
            WeekBlock {
                week_index: i,
                week_start_date: inputs
                    .start_date
                    .checked_add_days(Days::new(7 * i as u64))
                    .unwrap_or(NaiveDate::MAX),
                phase: phase_for_week(i, &boundaries),
                hours,
                is_high_intensity,
            }
        })
        .collect();

    tracing::debug!(
        total_weeks,
        ?boundaries,
        window,
        "generated study schedule"
    );
    weeks
}

/// Sum of hours across the schedule.
pub fn total_hours(weeks: &[WeekBlock]) -> f64 {
    weeks.iter().map(|w| w.hours).sum()
}

/// Number of weeks at the full-time budget.
pub fn high_intensity_weeks(weeks: &[WeekBlock]) -> usize {
    weeks.iter().filter(|w| w.is_high_intensity).count()
}

/// Select a week by its one-based week number.
pub fn find_week(weeks: &[WeekBlock], week_number: usize) -> Option<&WeekBlock> {
    week_number
        .checked_sub(1)
        .and_then(|index| weeks.get(index))
}

/// Per-phase aggregate of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSummary {
    pub phase: Phase,
    pub weeks: usize,
    pub first_week_index: Option<usize>,
    pub last_week_index: Option<usize>,
    pub hours: f64,
}

/// Summarize a schedule by phase, one entry per catalog phase in order.
pub fn summarize_phases(weeks: &[WeekBlock]) -> Vec<PhaseSummary> {
    Phase::ALL
        .iter()
        .map(|&phase| {
            let in_phase: Vec<&WeekBlock> = weeks.iter().filter(|w| w.phase == phase).collect();
            PhaseSummary {
                phase,
                weeks: in_phase.len(),
                first_week_index: in_phase.first().map(|w| w.week_index),
                last_week_index: in_phase.last().map(|w| w.week_index),
                hours: in_phase.iter().map(|w| w.hours).sum(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inputs(start: NaiveDate, exam: NaiveDate, window: u32) -> SchedulerInputs {
        SchedulerInputs {
            start_date: start,
            exam_date: exam,
            part_time_hours_per_week: 15.0,
            full_time_hours_per_week: 40.0,
            high_intensity_window_weeks: window,
        }
    }

    #[test]
    fn spring_window_has_22_weeks() {
        let schedule = generate_schedule(&SchedulerInputs::default());
        assert_eq!(schedule.len(), 22);
        assert_eq!(phase_boundaries(22), [5, 11, 17]);
    }

    #[test]
    fn spring_window_phase_segments() {
        let schedule = generate_schedule(&SchedulerInputs::default());
        let phases: Vec<Phase> = schedule.iter().map(|w| w.phase).collect();
        assert!(phases[0..5].iter().all(|&p| p == Phase::Foundation));
        assert!(phases[5..11].iter().all(|&p| p == Phase::PatternRecognition));
        assert!(phases[11..17].iter().all(|&p| p == Phase::ActiveApplication));
        assert!(phases[17..22].iter().all(|&p| p == Phase::Refinement));
    }

    #[test]
    fn window_applies_to_trailing_weeks() {
        let schedule = generate_schedule(&SchedulerInputs::default());
        assert_eq!(high_intensity_weeks(&schedule), 10);
        assert!(!schedule[11].is_high_intensity);
        assert!(schedule[12].is_high_intensity);
        assert_eq!(schedule[11].hours, 15.0);
        assert_eq!(schedule[12].hours, 40.0);
        assert_eq!(total_hours(&schedule), 12.0 * 15.0 + 10.0 * 40.0);
    }

    #[test]
    fn exam_on_or_before_start_is_empty() {
        let same = inputs(date(2026, 3, 1), date(2026, 3, 1), 4);
        assert!(generate_schedule(&same).is_empty());

        let reversed = inputs(date(2026, 7, 29), date(2026, 3, 1), 4);
        assert!(generate_schedule(&reversed).is_empty());
        assert_eq!(total_hours(&generate_schedule(&reversed)), 0.0);
    }

    #[test]
    fn partial_week_rounds_up() {
        let one_day = inputs(date(2026, 3, 1), date(2026, 3, 2), 0);
        assert_eq!(one_day.total_weeks(), 1);
        let exact = inputs(date(2026, 3, 1), date(2026, 3, 15), 0);
        assert_eq!(exact.total_weeks(), 2);
        let over = inputs(date(2026, 3, 1), date(2026, 3, 16), 0);
        assert_eq!(over.total_weeks(), 3);
    }

    #[test]
    fn single_week_lands_in_final_phase() {
        let schedule = generate_schedule(&inputs(date(2026, 3, 1), date(2026, 3, 4), 0));
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].phase, Phase::Refinement);
    }

    #[test]
    fn rounding_drift_goes_to_final_phase() {
        // 7 weeks: boundaries floor(1.75)=1, floor(3.5)=3, floor(5.6)=5
        assert_eq!(phase_boundaries(7), [1, 3, 5]);
        let summary = summarize_phases(&generate_schedule(&inputs(
            date(2026, 1, 1),
            date(2026, 2, 19),
            0,
        )));
        let counts: Vec<usize> = summary.iter().map(|s| s.weeks).collect();
        assert_eq!(counts, vec![1, 2, 2, 2]);
    }

    #[test]
    fn window_extremes_saturate() {
        let base = SchedulerInputs::default();
        let total = base.total_weeks() as u32;

        let all_full = generate_schedule(&SchedulerInputs {
            high_intensity_window_weeks: total,
            ..base.clone()
        });
        assert!(all_full.iter().all(|w| w.is_high_intensity && w.hours == 40.0));

        let beyond = generate_schedule(&SchedulerInputs {
            high_intensity_window_weeks: total * 3,
            ..base.clone()
        });
        assert!(beyond.iter().all(|w| w.is_high_intensity));

        let none = generate_schedule(&SchedulerInputs {
            high_intensity_window_weeks: 0,
            ..base
        });
        assert!(none.iter().all(|w| !w.is_high_intensity && w.hours == 15.0));
    }

    #[test]
    fn nonpositive_hours_are_propagated() {
        let schedule = generate_schedule(&SchedulerInputs {
            part_time_hours_per_week: -5.0,
            full_time_hours_per_week: 0.0,
            high_intensity_window_weeks: 2,
            ..SchedulerInputs::default()
        });
        assert_eq!(schedule[0].hours, -5.0);
        assert_eq!(schedule.last().unwrap().hours, 0.0);
    }

    #[test]
    fn validate_reports_implausible_inputs() {
        assert!(SchedulerInputs::default().validate().is_ok());

        let reversed = inputs(date(2026, 7, 29), date(2026, 3, 1), 0);
        assert!(matches!(
            reversed.validate(),
            Err(ValidationError::InvalidDateRange { .. })
        ));

        let zero_hours = SchedulerInputs {
            full_time_hours_per_week: 0.0,
            ..SchedulerInputs::default()
        };
        assert!(matches!(
            zero_hours.validate(),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn week_helpers() {
        let schedule = generate_schedule(&SchedulerInputs::default());
        let third = find_week(&schedule, 3).unwrap();
        assert_eq!(third.week_index, 2);
        assert_eq!(third.week_number(), 3);
        assert_eq!(third.week_start_date, date(2026, 3, 15));
        assert_eq!(third.week_end_date(), date(2026, 3, 21));
        assert!(find_week(&schedule, 0).is_none());
        assert!(find_week(&schedule, 23).is_none());
    }

    #[test]
    fn summary_covers_every_week() {
        let schedule = generate_schedule(&SchedulerInputs::default());
        let summary = summarize_phases(&schedule);
        assert_eq!(summary.len(), 4);
        assert_eq!(summary.iter().map(|s| s.weeks).sum::<usize>(), schedule.len());
        assert_eq!(summary[3].first_week_index, Some(17));
        assert_eq!(summary[3].last_week_index, Some(21));
        assert_eq!(summary[3].hours, 5.0 * 40.0);
        let hours: f64 = summary.iter().map(|s| s.hours).sum();
        assert_eq!(hours, total_hours(&schedule));
    }

    #[test]
    fn summary_of_empty_schedule() {
        let summary = summarize_phases(&[]);
        assert!(summary.iter().all(|s| s.weeks == 0 && s.first_week_index.is_none()));
    }

    #[test]
    fn regeneration_is_identical() {
        let inputs = SchedulerInputs::default();
        assert_eq!(generate_schedule(&inputs), generate_schedule(&inputs));
    }

    proptest! {
        #[test]
        fn prop_schedule_shape(
            offset in 0i64..3000,
            span in 1i64..1500,
            window in 0u32..250,
        ) {
            let start = date(2020, 1, 1) + chrono::Duration::days(offset);
            let exam = start + chrono::Duration::days(span);
            let schedule = generate_schedule(&inputs(start, exam, window));

            let expected = ((span + 6) / 7) as usize;
            prop_assert_eq!(schedule.len(), expected);
            for (i, week) in schedule.iter().enumerate() {
                prop_assert_eq!(week.week_index, i);
            }
            for pair in schedule.windows(2) {
                prop_assert_eq!((pair[1].week_start_date - pair[0].week_start_date).num_days(), 7);
                prop_assert!(pair[0].phase.index() <= pair[1].phase.index());
            }
            prop_assert_eq!(schedule.last().map(|w| w.phase), Some(Phase::Refinement));
        }

        #[test]
        fn prop_boundaries_monotonic(total in 0usize..2000) {
            let b = phase_boundaries(total);
            prop_assert!(b[0] <= b[1] && b[1] <= b[2] && b[2] <= total);
        }

        #[test]
        fn prop_intensity_count_matches_window(span in 1i64..700, window in 0u32..120) {
            let start = date(2026, 1, 1);
            let exam = start + chrono::Duration::days(span);
            let schedule = generate_schedule(&inputs(start, exam, window));
            let expected = schedule.len().min(window as usize);
            prop_assert_eq!(high_intensity_weeks(&schedule), expected);
        }
    }
}
