//! Downloadable exports of the food log, workouts and schedule.

use chrono::NaiveDate;
use std::fmt;

use crate::error::{ApiError, ApiResult};
use crate::models::FoodItem;
use crate::store::{from_document, Collection, DocumentStore};

const FOOD_LOG_HEADER: &str = "Name,Meal Type,Calories,Protein (g),Carbs (g),Fat (g)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    FoodLog,
    Workouts,
    Schedule,
}

impl ReportKind {
    pub fn collection(&self) -> Collection {
        match self {
            ReportKind::FoodLog => Collection::FoodLogs,
            ReportKind::Workouts => Collection::Workouts,
            ReportKind::Schedule => Collection::Schedules,
        }
    }

    fn stem(&self) -> &'static str {
        match self {
            ReportKind::FoodLog => "food-log",
            ReportKind::Workouts => "workout",
            ReportKind::Schedule => "schedule",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ReportKind::FoodLog => "csv",
            ReportKind::Workouts | ReportKind::Schedule => "json",
        }
    }

    /// `<kind>-report-YYYY-MM-DD.<ext>`
    pub fn filename(&self, date: NaiveDate) -> String {
        format!(
            "{}-report-{}.{}",
            self.stem(),
            date.format("%Y-%m-%d"),
            self.extension()
        )
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Renders food items as CSV, one row per item under a fixed header.
pub fn food_log_csv(items: &[FoodItem]) -> String {
    let mut lines = vec![FOOD_LOG_HEADER.to_string()];
    lines.extend(items.iter().map(|item| {
        format!(
            "\"{}\",{},{},{},{},{}",
            item.name.replace('"', "\"\""),
            item.meal_type,
            item.calories,
            item.protein,
            item.carbs,
            item.fat
        )
    }));
    lines.join("\n")
}

/// A generated report, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub filename: String,
    pub contents: String,
}

impl Report {
    /// Builds a report from the current contents of the store.
    ///
    /// Reads go straight to the store and do not require a session.
    pub async fn generate(
        store: &DocumentStore,
        kind: ReportKind,
        date: NaiveDate,
    ) -> ApiResult<Self> {
        let collection = kind.collection();
        let documents = store.get_collection(collection).await?;

        let contents = match kind {
            ReportKind::FoodLog => {
                let items = documents
                    .into_iter()
                    .map(|d| from_document::<FoodItem>(d).map(|s| s.record))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(ApiError::invalid::<FoodItem>)?;
                food_log_csv(&items)
            }
            ReportKind::Workouts | ReportKind::Schedule => serde_json::to_string_pretty(&documents)
                .map_err(|source| ApiError::InvalidRecord { collection, source })?,
        };

        tracing::info!("Generated {} report with {} bytes", kind, contents.len());
        Ok(Self {
            filename: kind.filename(date),
            contents,
        })
    }
}
