use clap::{Args, Subcommand};
use genaifit_core::{
    Backend, DocumentId, SchedulePatch, ScheduleStatus, ScheduledWorkout, Stored, Weekday,
};

use super::{emit, CommandResult, OutputFormat};

#[derive(Args)]
pub struct ScheduleCommand {
    #[command(subcommand)]
    pub command: ScheduleSubcommand,
}

#[derive(Subcommand)]
pub enum ScheduleSubcommand {
    /// Show the weekly schedule
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Schedule a workout on a day
    Add {
        /// Day of the week (MON..SUN)
        #[arg(long, short)]
        day: String,

        /// Workout name
        name: String,

        /// Duration in minutes
        #[arg(long, default_value_t = ScheduledWorkout::DEFAULT_DURATION)]
        duration: u32,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Change a scheduled workout
    Update {
        /// Entry ID as shown by `schedule list`
        id: String,

        /// Move to another day
        #[arg(long, short)]
        day: Option<String>,

        #[arg(long)]
        name: Option<String>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// scheduled, completed or skipped
        #[arg(long, short)]
        status: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Remove a scheduled workout
    Remove {
        /// Entry ID as shown by `schedule list`
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ScheduleCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        let schedule = backend.schedule();

        match &self.command {
            ScheduleSubcommand::List { format } => {
                emit(format, schedule.get_schedule().await, |entries| {
                    print_week(entries)
                })
            }

            ScheduleSubcommand::Add {
                day,
                name,
                duration,
                format,
            } => {
                let day: Weekday = day.parse().map_err(|e: String| e)?;
                let workout = ScheduledWorkout::new(day, name).with_duration(*duration);

                emit(format, schedule.add_scheduled_workout(workout).await, |entries| {
                    println!("Scheduled {} on {}\n", name, day);
                    print_week(entries);
                })
            }

            ScheduleSubcommand::Update {
                id,
                day,
                name,
                duration,
                status,
                format,
            } => {
                let day: Option<Weekday> = match day {
                    Some(d) => Some(d.parse().map_err(|e: String| e)?),
                    None => None,
                };
                let status: Option<ScheduleStatus> = match status {
                    Some(s) => Some(s.parse().map_err(|e: String| e)?),
                    None => None,
                };
                let patch = SchedulePatch {
                    day,
                    name: name.clone(),
                    duration: *duration,
                    status,
                };

                let id = DocumentId::from(id.as_str());
                emit(format, schedule.update_scheduled_workout(&id, patch).await, |entry| {
                    println!("Updated: {}", entry.record)
                })
            }

            ScheduleSubcommand::Remove { id, format } => {
                let id = DocumentId::from(id.as_str());
                emit(format, schedule.remove_scheduled_workout(&id).await, |entries| {
                    println!("Removed {}\n", id);
                    print_week(entries);
                })
            }
        }
    }
}

/// Prints entries in weekday order, with empty days marked as rest.
fn print_week(entries: &[Stored<ScheduledWorkout>]) {
    for day in Weekday::ALL {
        match entries.iter().find(|e| e.day == day) {
            Some(entry) => println!(
                "{}  {} ({} min) [{}]  {}",
                day, entry.name, entry.duration, entry.status, entry.id
            ),
            None => println!("{}  Rest day", day),
        }
    }
}
