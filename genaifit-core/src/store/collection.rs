use std::fmt;

/// Named partitions of the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Workouts,
    FoodLogs,
    MealPlans,
    Schedules,
}

impl Collection {
    /// Returns the substrate key for this collection.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Workouts => "workouts",
            Collection::FoodLogs => "food_logs",
            Collection::MealPlans => "meal_plans",
            Collection::Schedules => "schedules",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
