use barprep_core::{Phase, SUBJECTS};
use clap::Subcommand;
use serde::Serialize;

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List study phases in order
    Phases {
        #[arg(long)]
        json: bool,
    },
    /// List tested subjects
    Subjects {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct PhaseEntry {
    phase: Phase,
    name: &'static str,
    share_of_total: f64,
    description: &'static str,
    focus: &'static str,
    tasks: &'static [&'static str],
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CatalogAction::Phases { json } => {
            if json {
                let entries: Vec<PhaseEntry> = Phase::ALL
                    .iter()
                    .map(|&phase| PhaseEntry {
                        phase,
                        name: phase.name(),
                        share_of_total: phase.share_of_total(),
                        description: phase.description(),
                        focus: phase.focus(),
                        tasks: phase.tasks(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for phase in Phase::ALL {
                    println!(
                        "{}. {} ({}%): {}",
                        phase.index() + 1,
                        phase.name(),
                        phase.share_percent(),
                        phase.focus()
                    );
                    for task in phase.tasks() {
                        println!("   - {task}");
                    }
                }
            }
        }
        CatalogAction::Subjects { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&SUBJECTS)?);
            } else {
                for subject in &SUBJECTS {
                    println!("{:<10} {:<28} {}", subject.id, subject.name, subject.description);
                }
            }
        }
    }
    Ok(())
}
