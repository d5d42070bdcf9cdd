mod auth;
mod config_cmd;
mod food;
mod mealplan;
mod report;
mod schedule;
mod seed;
mod workout;

pub use auth::{LoginCommand, LogoutCommand, SignupCommand, WhoamiCommand};
pub use config_cmd::ConfigCommand;
pub use food::FoodCommand;
pub use mealplan::MealPlanCommand;
pub use report::ReportCommand;
pub use schedule::ScheduleCommand;
pub use seed::SeedCommand;
pub use workout::WorkoutCommand;

use chrono::NaiveDate;
use clap::ValueEnum;
use genaifit_core::{ApiResult, Envelope};
use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Prints a façade result.
///
/// Text output runs `text` on success. JSON output prints the envelope either
/// way. A failure is also returned so the process exits non-zero.
fn emit<T: Serialize>(
    format: &OutputFormat,
    result: ApiResult<T>,
    text: impl FnOnce(&T),
) -> CommandResult {
    match format {
        OutputFormat::Text => {
            text(&result?);
            Ok(())
        }
        OutputFormat::Json => print_envelope(&Envelope::from(result)),
    }
}

fn print_envelope<T: Serialize>(envelope: &Envelope<T>) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    match &envelope.message {
        Some(message) if !envelope.success => Err(message.clone().into()),
        _ => Ok(()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", s))
}
