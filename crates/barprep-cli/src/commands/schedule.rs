use barprep_core::planner::{
    find_week, generate_schedule, high_intensity_weeks, summarize_phases, total_hours,
};
use barprep_core::{Config, DayPlanRequest, SchedulerInputs, WeekBlock};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Planner inputs; anything omitted comes from the config file.
#[derive(Args, Debug)]
pub struct PlannerArgs {
    /// First study day (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Exam day (YYYY-MM-DD)
    #[arg(long)]
    exam: Option<NaiveDate>,
    /// Hours per week before the high-intensity window
    #[arg(long, allow_negative_numbers = true)]
    part_time: Option<f64>,
    /// Hours per week inside the high-intensity window
    #[arg(long, allow_negative_numbers = true)]
    full_time: Option<f64>,
    /// Trailing weeks studied full time
    #[arg(long)]
    window: Option<u32>,
}

impl PlannerArgs {
    fn resolve(self) -> SchedulerInputs {
        let base = Config::load_or_default().scheduler_inputs();
        let inputs = SchedulerInputs {
            start_date: self.start.unwrap_or(base.start_date),
            exam_date: self.exam.unwrap_or(base.exam_date),
            part_time_hours_per_week: self.part_time.unwrap_or(base.part_time_hours_per_week),
            full_time_hours_per_week: self.full_time.unwrap_or(base.full_time_hours_per_week),
            high_intensity_window_weeks: self.window.unwrap_or(base.high_intensity_window_weeks),
        };
        if let Err(e) = inputs.validate() {
            tracing::warn!(error = %e, "implausible planner inputs");
        }
        inputs
    }
}

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Show the week-by-week timeline
    Show {
        #[command(flatten)]
        inputs: PlannerArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show weeks and hours per phase
    Summary {
        #[command(flatten)]
        inputs: PlannerArgs,
        #[arg(long)]
        json: bool,
    },
    /// Show one week and its day-plan request
    Week {
        /// Week number, starting at 1
        number: usize,
        #[command(flatten)]
        inputs: PlannerArgs,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct ScheduleReport<'a> {
    inputs: &'a SchedulerInputs,
    total_weeks: usize,
    total_hours: f64,
    high_intensity_weeks: usize,
    weeks: &'a [WeekBlock],
}

#[derive(Serialize)]
struct WeekReport<'a> {
    week: &'a WeekBlock,
    week_number: usize,
    week_end_date: NaiveDate,
    focus: &'static str,
    tasks: &'static [&'static str],
    day_plan_request: DayPlanRequest,
}

pub fn run(action: ScheduleAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScheduleAction::Show { inputs, json } => show(&inputs.resolve(), json),
        ScheduleAction::Summary { inputs, json } => summary(&inputs.resolve(), json),
        ScheduleAction::Week {
            number,
            inputs,
            json,
        } => week(&inputs.resolve(), number, json),
    }
}

fn show(inputs: &SchedulerInputs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let weeks = generate_schedule(inputs);

    if json {
        let report = ScheduleReport {
            inputs,
            total_weeks: weeks.len(),
            total_hours: total_hours(&weeks),
            high_intensity_weeks: high_intensity_weeks(&weeks),
            weeks: &weeks,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if weeks.is_empty() {
        println!("Nothing to schedule: exam date must be after start date.");
        return Ok(());
    }

    println!("{:>4}  {:<6}  {:<20}  {:>6}", "Week", "Start", "Phase", "Hours");
    println!("{}", "-".repeat(44));
    for week in &weeks {
        println!(
            "{:>4}  {:<6}  {:<20}  {:>6}{}",
            week.week_number(),
            week.week_start_date.format("%b %d"),
            week.phase.name(),
            week.hours,
            if week.is_high_intensity { "  FULL INTENSITY" } else { "" }
        );
    }
    println!("{}", "-".repeat(44));
    println!(
        "Total: {} weeks, {} hours ({} high-intensity weeks)",
        weeks.len(),
        total_hours(&weeks),
        high_intensity_weeks(&weeks)
    );
    Ok(())
}

fn summary(inputs: &SchedulerInputs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let weeks = generate_schedule(inputs);
    let phases = summarize_phases(&weeks);

    if json {
        println!("{}", serde_json::to_string_pretty(&phases)?);
        return Ok(());
    }

    for entry in &phases {
        let span = match (entry.first_week_index, entry.last_week_index) {
            (Some(first), Some(last)) => format!("weeks {}-{}", first + 1, last + 1),
            _ => "no weeks".to_string(),
        };
        println!(
            "{:<20}  {:>3}%  {:<12}  {:>3} weeks  {:>6} hours  {}",
            entry.phase.name(),
            entry.phase.share_percent(),
            span,
            entry.weeks,
            entry.hours,
            entry.phase.description()
        );
    }
    println!("Total hours: {}", total_hours(&weeks));
    Ok(())
}

fn week(
    inputs: &SchedulerInputs,
    number: usize,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let weeks = generate_schedule(inputs);
    let block = find_week(&weeks, number)
        .ok_or_else(|| format!("week {number} is outside the {}-week schedule", weeks.len()))?;
    let report = WeekReport {
        week: block,
        week_number: block.week_number(),
        week_end_date: block.week_end_date(),
        focus: block.phase.focus(),
        tasks: block.phase.tasks(),
        day_plan_request: DayPlanRequest::for_week(block),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Week {} ({} - {})",
        report.week_number,
        block.week_start_date.format("%b %d"),
        report.week_end_date.format("%b %d")
    );
    println!("  Phase:     {} ({})", block.phase.name(), block.phase.description());
    println!("  Hours:     {}", block.hours);
    println!("  Intensity: {}", if block.is_high_intensity { "full time" } else { "part time" });
    println!("  Focus:     {}", report.focus);
    for task in report.tasks {
        println!("    - {task}");
    }
    println!("  Day-plan subjects: {}", report.day_plan_request.focus_subjects.join(", "));
    Ok(())
}
