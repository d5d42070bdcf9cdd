use clap::{Args, Subcommand};
use genaifit_core::{Backend, WorkoutPatch};

use super::{emit, CommandResult, OutputFormat};

#[derive(Args)]
pub struct WorkoutCommand {
    #[command(subcommand)]
    pub command: WorkoutSubcommand,
}

#[derive(Subcommand)]
pub enum WorkoutSubcommand {
    /// List all workouts
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a workout with its exercises
    Show {
        /// Workout ID
        id: u32,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Mark a workout as completed
    Complete {
        /// Workout ID
        id: u32,

        /// Mark as not completed instead
        #[arg(long)]
        undo: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update workout details
    Update {
        /// Workout ID
        id: u32,

        #[arg(long)]
        title: Option<String>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        #[arg(long)]
        calories: Option<u32>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl WorkoutCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        let workouts = backend.workouts();

        match &self.command {
            WorkoutSubcommand::List { format } => {
                emit(format, workouts.get_workouts().await, |list| {
                    if list.is_empty() {
                        println!("No workouts found");
                        return;
                    }
                    for w in list {
                        println!(
                            "{:>3}  {:<20} {:>3} min  {:>4} kcal{}",
                            w.record.id,
                            w.title,
                            w.duration,
                            w.calories,
                            if w.completed { "  done" } else { "" }
                        );
                    }
                    println!("\nTotal: {} workout(s)", list.len());
                })
            }

            WorkoutSubcommand::Show { id, format } => {
                emit(format, workouts.get_workout_by_id(*id).await, |w| {
                    print!("{}", w.record)
                })
            }

            WorkoutSubcommand::Complete { id, undo, format } => {
                let result = workouts
                    .update_workout(*id, WorkoutPatch::completed(!undo))
                    .await;
                emit(format, result, |w| {
                    if w.completed {
                        println!("Completed: {}", w.title);
                    } else {
                        println!("Marked as not completed: {}", w.title);
                    }
                })
            }

            WorkoutSubcommand::Update {
                id,
                title,
                duration,
                calories,
                format,
            } => {
                let patch = WorkoutPatch {
                    title: title.clone(),
                    duration: *duration,
                    calories: *calories,
                    ..Default::default()
                };
                emit(format, workouts.update_workout(*id, patch).await, |w| {
                    println!("Updated workout:");
                    print!("{}", w.record);
                })
            }
        }
    }
}
