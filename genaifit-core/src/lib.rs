//! GenAI-Fit Core Library
//!
//! A simulated document database over a key-value substrate, and the
//! authenticated domain access layer built on top of it.

pub mod api;
pub mod envelope;
pub mod error;
pub mod latency;
pub mod models;
pub mod report;
pub mod seed;
pub mod session;
pub mod store;

pub use api::{Auth, Backend, MealPlans, Nutrition, Schedule, Workouts};
pub use envelope::Envelope;
pub use error::{ApiError, ApiResult};
pub use latency::{Delay, NoDelay, TokioDelay};
pub use models::{
    DayPlan, DayPlanPatch, Exercise, FoodItem, Meal, MealType, NutritionTotals, Reps,
    SchedulePatch, ScheduleStatus, ScheduledWorkout, User, UserProfile, Weekday, Workout,
    WorkoutPatch,
};
pub use report::{Report, ReportKind};
pub use seed::{seed_demo_data, SeedReport};
pub use session::{Session, SessionError, SessionState};
pub use store::{
    Collection, Document, DocumentId, DocumentStore, FileStore, KeyValueStore, KvError,
    MemoryStore, Stored, StoreError,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
