use chrono::Local;
use clap::{Args, ValueEnum};
use genaifit_core::{Backend, Report, ReportKind};
use std::path::PathBuf;

use super::{parse_date, CommandResult};

#[derive(Clone, ValueEnum)]
pub enum ReportTarget {
    /// Food log as CSV
    Food,
    /// Workouts as JSON
    Workouts,
    /// Weekly schedule as JSON
    Schedule,
}

impl From<&ReportTarget> for ReportKind {
    fn from(target: &ReportTarget) -> Self {
        match target {
            ReportTarget::Food => ReportKind::FoodLog,
            ReportTarget::Workouts => ReportKind::Workouts,
            ReportTarget::Schedule => ReportKind::Schedule,
        }
    }
}

#[derive(Args)]
pub struct ReportCommand {
    /// What to export
    #[arg(value_enum)]
    kind: ReportTarget,

    /// Directory to write the report into
    #[arg(long, short, default_value = ".")]
    output: PathBuf,

    /// Date used in the filename (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,
}

impl ReportCommand {
    pub async fn run(&self, backend: &Backend) -> CommandResult {
        let date = match &self.date {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        };

        let report = Report::generate(backend.store(), (&self.kind).into(), date).await?;

        std::fs::create_dir_all(&self.output)?;
        let path = self.output.join(&report.filename);
        std::fs::write(&path, &report.contents)?;

        println!("Wrote {}", path.display());
        Ok(())
    }
}
