use super::Backend;
use crate::error::ApiResult;
use crate::latency;
use crate::models::{FoodItem, NutritionTotals};
use crate::store::{DocumentId, Stored};

/// The food log.
///
/// Mutations return the whole refreshed log so callers can replace their
/// view in one step.
pub struct Nutrition<'a> {
    backend: &'a Backend,
}

impl<'a> Nutrition<'a> {
    pub(super) fn new(backend: &'a Backend) -> Self {
        Self { backend }
    }

    pub async fn get_food_log(&self) -> ApiResult<Vec<Stored<FoodItem>>> {
        self.backend.gate(latency::LIST).await?;
        self.backend.load::<FoodItem>().await
    }

    pub async fn add_food_item(&self, item: FoodItem) -> ApiResult<Vec<Stored<FoodItem>>> {
        self.backend.gate(latency::MUTATE).await?;

        let created = self.backend.insert(&item).await?;
        tracing::debug!("Logged {} as {}", created.name, created.id);

        self.backend.load::<FoodItem>().await
    }

    pub async fn remove_food_item(&self, id: &DocumentId) -> ApiResult<Vec<Stored<FoodItem>>> {
        self.backend.gate(latency::MUTATE).await?;
        self.backend.delete::<FoodItem>(id).await
    }

    /// Calories and macros summed over the whole log.
    pub async fn daily_totals(&self) -> ApiResult<NutritionTotals> {
        self.backend.gate(latency::LIST).await?;

        let items = self.backend.load::<FoodItem>().await?;
        Ok(NutritionTotals::sum(items.iter().map(|s| &s.record)))
    }
}
