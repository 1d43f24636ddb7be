//! Score projection engine.
//!
//! Converts practice results into a projected scaled exam score using a
//! fixed linear approximation of the exam's scaling:
//! - MBE accuracy maps linearly onto the scaled range
//! - Written raw average is five essays plus a double-weighted performance
//!   test, over seven units, then mapped linearly
//! - The two scaled sections are combined 50/50 and compared to the passing
//!   threshold
//!
//! The calibration constants are fixed; they are not configurable per call.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Passing threshold on the scaled range.
pub const PASSING_SCORE: f64 = 1390.0;
/// Scaled MBE points per accuracy percentage point.
pub const MBE_SLOPE: f64 = 5.8;
pub const MBE_INTERCEPT: f64 = 1010.0;
/// Scaled written points per raw average point.
pub const WRITTEN_SLOPE: f64 = 4.8;
pub const WRITTEN_INTERCEPT: f64 = 1095.0;
pub const ESSAY_COUNT: usize = 5;
/// The performance test counts as this many essay units.
pub const PERFORMANCE_TEST_WEIGHT: f64 = 2.0;
/// Essay units plus performance test units.
pub const WRITTEN_UNITS: f64 = ESSAY_COUNT as f64 + PERFORMANCE_TEST_WEIGHT;
/// Weight of each section in the total.
pub const SECTION_WEIGHT: f64 = 0.5;

/// Practice performance fed to [`project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Percent of MBE questions answered correctly (0-100)
    pub mbe_accuracy_percent: f64,
    /// Raw essay scores (0-100), in exam order
    pub essay_scores: [f64; ESSAY_COUNT],
    /// Raw performance test score (0-100)
    pub performance_test_score: f64,
}

impl Default for ScoreInputs {
    fn default() -> Self {
        Self {
            mbe_accuracy_percent: 65.0,
            essay_scores: [60.0; ESSAY_COUNT],
            performance_test_score: 60.0,
        }
    }
}

impl ScoreInputs {
    /// Optional range check. [`project`] itself accepts anything.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_percent("mbe_accuracy_percent", self.mbe_accuracy_percent)?;
        for (i, score) in self.essay_scores.iter().enumerate() {
            check_percent(&format!("essay_scores[{i}]"), *score)?;
        }
        check_percent("performance_test_score", self.performance_test_score)
    }
}

fn check_percent(field: &str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min: 0.0,
            max: 100.0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Passing,
    BelowPassing,
}

/// Result of [`project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreProjection {
    /// Unrounded scaled MBE score
    pub estimated_mbe_scaled: f64,
    /// Unrounded scaled written score
    pub estimated_written_scaled: f64,
    /// Rounded half of the scaled MBE score
    pub mbe_contribution: f64,
    /// Rounded half of the scaled written score
    pub written_contribution: f64,
    pub total_score: f64,
    pub raw_written_average: f64,
    pub passes: bool,
}

impl ScoreProjection {
    /// Distance from the passing threshold; negative when below it.
    pub fn margin(&self) -> f64 {
        self.total_score - PASSING_SCORE
    }

    pub fn verdict(&self) -> Verdict {
        if self.passes {
            Verdict::Passing
        } else {
            Verdict::BelowPassing
        }
    }

    /// Study advice for this projection. The MBE is checked before the
    /// performance test, so a weak MBE wins when both are low.
    pub fn advice(&self, inputs: &ScoreInputs) -> Advice {
        if self.passes {
            Advice::KeepBuffer
        } else if inputs.mbe_accuracy_percent < ADVICE_FLOOR {
            Advice::RaiseMbe
        } else if inputs.performance_test_score < ADVICE_FLOOR {
            Advice::RaisePerformanceTest
        } else {
            Advice::PolishEssays
        }
    }
}

/// Inputs below this percentage are called out by [`ScoreProjection::advice`].
pub const ADVICE_FLOOR: f64 = 60.0;

/// Where to spend the next study hours, given a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    KeepBuffer,
    RaiseMbe,
    RaisePerformanceTest,
    PolishEssays,
}

impl Advice {
    pub fn message(self) -> &'static str {
        match self {
            Advice::KeepBuffer => {
                "Great job. You have built a passing buffer. Focus on maintaining this \
                 consistency."
            }
            Advice::RaiseMbe => {
                "Your MBE score is dragging you down. Increasing MBE accuracy by just 5% \
                 adds ~30 scaled points."
            }
            Advice::RaisePerformanceTest => {
                "The PT is killing your score. It is worth double. Raising your PT to a 65 \
                 is equivalent to raising two separate essays by 5 points each."
            }
            Advice::PolishEssays => {
                "You are close. Small improvements in issue spotting on 1-2 essays will push \
                 you over the line."
            }
        }
    }
}

/// Round half toward positive infinity.
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Project a scaled exam score from practice inputs.
///
/// Total over all inputs; out-of-range values are carried through the
/// formula unchanged.
pub fn project(inputs: &ScoreInputs) -> ScoreProjection {
    let estimated_mbe_scaled = inputs.mbe_accuracy_percent * MBE_SLOPE + MBE_INTERCEPT;

    let essay_sum: f64 = inputs.essay_scores.iter().sum();
    let weighted_performance_test = inputs.performance_test_score * PERFORMANCE_TEST_WEIGHT;
    let raw_written_average = (essay_sum + weighted_performance_test) / WRITTEN_UNITS;
    let estimated_written_scaled = raw_written_average * WRITTEN_SLOPE + WRITTEN_INTERCEPT;

    let total_score = round_half_up(
        estimated_mbe_scaled * SECTION_WEIGHT + estimated_written_scaled * SECTION_WEIGHT,
    );
    let projection = ScoreProjection {
        estimated_mbe_scaled,
        estimated_written_scaled,
        mbe_contribution: round_half_up(estimated_mbe_scaled * SECTION_WEIGHT),
        written_contribution: round_half_up(estimated_written_scaled * SECTION_WEIGHT),
        total_score,
        raw_written_average,
        passes: total_score >= PASSING_SCORE,
    };

    tracing::debug!(
        total = projection.total_score,
        passes = projection.passes,
        "projected exam score"
    );
    projection
}

/// Coarse grading band for a single essay score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EssayBand {
    /// Below 55
    Weak,
    /// 55 up to, not including, 65
    Borderline,
    Solid,
}

impl EssayBand {
    pub fn classify(score: f64) -> Self {
        if score < 55.0 {
            EssayBand::Weak
        } else if score < 65.0 {
            EssayBand::Borderline
        } else {
            EssayBand::Solid
        }
    }
}
