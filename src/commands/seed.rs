use clap::Args;
use genaifit_core::seed::{seed_demo_data, DEMO_EMAIL, DEMO_PASSWORD};
use genaifit_core::{Backend, Envelope};

use super::{print_envelope, CommandResult, OutputFormat};

#[derive(Args)]
pub struct SeedCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl SeedCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        let report = seed_demo_data(backend.store()).await?;

        match self.format {
            OutputFormat::Json => print_envelope(&Envelope::ok(report)),
            OutputFormat::Text => {
                if report.user_created {
                    println!("Created demo user {} / {}", DEMO_EMAIL, DEMO_PASSWORD);
                } else {
                    println!("Demo user already present");
                }
                if report.workouts_created > 0 {
                    println!("Created {} demo workout(s)", report.workouts_created);
                } else {
                    println!("Workouts already present");
                }
                Ok(())
            }
        }
    }
}

