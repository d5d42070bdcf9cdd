mod food_item;
mod meal_plan;
mod meal_type;
mod schedule;
mod user;
mod workout;

pub use food_item::{FoodItem, NutritionTotals};
pub use meal_plan::{DayPlan, DayPlanPatch, Meal};
pub use meal_type::MealType;
pub use schedule::{SchedulePatch, ScheduleStatus, ScheduledWorkout, Weekday};
pub use user::{User, UserProfile};
pub use workout::{Exercise, Reps, Workout, WorkoutPatch};
