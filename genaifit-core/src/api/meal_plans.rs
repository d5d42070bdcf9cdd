use super::Backend;
use crate::error::{ApiError, ApiResult};
use crate::latency;
use crate::models::{DayPlan, DayPlanPatch, Meal};
use crate::store::{DocumentId, Stored};

/// Day-by-day meal plans.
pub struct MealPlans<'a> {
    backend: &'a Backend,
}

impl<'a> MealPlans<'a> {
    pub(super) fn new(backend: &'a Backend) -> Self {
        Self { backend }
    }

    pub async fn get_meal_plans(&self) -> ApiResult<Vec<Stored<DayPlan>>> {
        self.backend.gate(latency::LIST).await?;
        self.backend.load::<DayPlan>().await
    }

    /// Adds a day plan and returns the refreshed list.
    pub async fn add_day_plan(&self, plan: DayPlan) -> ApiResult<Vec<Stored<DayPlan>>> {
        self.backend.gate(latency::MUTATE).await?;

        self.backend.insert(&plan).await?;
        self.backend.load::<DayPlan>().await
    }

    /// Removes a day plan and returns the refreshed list.
    pub async fn remove_day_plan(&self, id: &DocumentId) -> ApiResult<Vec<Stored<DayPlan>>> {
        self.backend.gate(latency::MUTATE).await?;
        self.backend.delete::<DayPlan>(id).await
    }

    pub async fn update_day_plan(
        &self,
        id: &DocumentId,
        patch: DayPlanPatch,
    ) -> ApiResult<Stored<DayPlan>> {
        self.backend.gate(latency::UPDATE).await?;

        self.backend
            .update::<DayPlan, _>(id, &patch)
            .await?
            .ok_or(ApiError::NotFound("Meal plan"))
    }

    /// Appends a meal to an existing day plan.
    pub async fn add_meal(&self, id: &DocumentId, meal: Meal) -> ApiResult<Stored<DayPlan>> {
        self.backend.gate(latency::UPDATE).await?;

        let plan = self
            .backend
            .load::<DayPlan>()
            .await?
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or(ApiError::NotFound("Meal plan"))?;

        let mut meals = plan.record.meals;
        meals.push(meal);

        let patch = DayPlanPatch {
            meals: Some(meals),
            ..Default::default()
        };
        self.backend
            .update::<DayPlan, _>(id, &patch)
            .await?
            .ok_or(ApiError::NotFound("Meal plan"))
    }
}
