use barprep_core::projection::{ESSAY_COUNT, PASSING_SCORE};
use barprep_core::{project, Advice, Config, EssayBand, ScoreInputs, ScoreProjection};
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand)]
pub enum ScoreAction {
    /// Project a scaled score from practice results
    Project {
        /// MBE accuracy percent
        #[arg(long, allow_negative_numbers = true)]
        mbe: Option<f64>,
        /// Five comma-separated essay scores
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        essays: Option<Vec<f64>>,
        /// Performance test score
        #[arg(long, allow_negative_numbers = true)]
        pt: Option<f64>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ProjectionReport<'a> {
    inputs: &'a ScoreInputs,
    projection: &'a ScoreProjection,
    margin: f64,
    essay_bands: Vec<EssayBand>,
    advice: Advice,
    advice_message: &'static str,
}

pub fn run(action: ScoreAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScoreAction::Project {
            mbe,
            essays,
            pt,
            json,
        } => {
            let base = Config::load_or_default().score_inputs();
            let essay_scores = match essays {
                Some(values) => <[f64; ESSAY_COUNT]>::try_from(values.as_slice()).map_err(|_| {
                    format!("expected {ESSAY_COUNT} essay scores, got {}", values.len())
                })?,
                None => base.essay_scores,
            };
            let inputs = ScoreInputs {
                mbe_accuracy_percent: mbe.unwrap_or(base.mbe_accuracy_percent),
                essay_scores,
                performance_test_score: pt.unwrap_or(base.performance_test_score),
            };
            if let Err(e) = inputs.validate() {
                tracing::warn!(error = %e, "score input out of range");
            }

            let projection = project(&inputs);
            let advice = projection.advice(&inputs);
            let essay_bands: Vec<EssayBand> =
                inputs.essay_scores.iter().map(|s| EssayBand::classify(*s)).collect();

            if json {
                let report = ProjectionReport {
                    inputs: &inputs,
                    projection: &projection,
                    margin: projection.margin(),
                    essay_bands,
                    advice,
                    advice_message: advice.message(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!(
                "Projected score: {} ({})",
                projection.total_score,
                if projection.passes { "PASSING" } else { "BELOW PASSING" }
            );
            println!("  Passing score:        {PASSING_SCORE}");
            println!("  Margin:               {:+}", projection.margin());
            println!("  MBE contribution:     {}", projection.mbe_contribution);
            println!("  Written contribution: {}", projection.written_contribution);
            println!("  Raw written average:  {:.1}", projection.raw_written_average);
            for (i, (score, band)) in inputs.essay_scores.iter().zip(&essay_bands).enumerate() {
                println!("  Essay {}: {score} ({band:?})", i + 1);
            }
            println!("  Performance test (2x): {}", inputs.performance_test_score);
            println!();
            println!("Analysis: {}", advice.message());
        }
    }
    Ok(())
}
