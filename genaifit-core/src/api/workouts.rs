use super::Backend;
use crate::error::{ApiError, ApiResult};
use crate::latency;
use crate::models::{Workout, WorkoutPatch};
use crate::store::Stored;

/// Workout routines, addressed by their numeric domain id.
pub struct Workouts<'a> {
    backend: &'a Backend,
}

impl<'a> Workouts<'a> {
    pub(super) fn new(backend: &'a Backend) -> Self {
        Self { backend }
    }

    pub async fn get_workouts(&self) -> ApiResult<Vec<Stored<Workout>>> {
        self.backend.gate(latency::LIST).await?;
        self.backend.load::<Workout>().await
    }

    pub async fn get_workout_by_id(&self, id: u32) -> ApiResult<Stored<Workout>> {
        self.backend.gate(latency::LOOKUP).await?;

        self.backend
            .load::<Workout>()
            .await?
            .into_iter()
            .find(|w| w.record.id == id)
            .ok_or(ApiError::NotFound("Workout"))
    }

    /// Applies `patch` to the workout with domain id `id`.
    pub async fn update_workout(&self, id: u32, patch: WorkoutPatch) -> ApiResult<Stored<Workout>> {
        self.backend.gate(latency::UPDATE).await?;

        let target = self
            .backend
            .load::<Workout>()
            .await?
            .into_iter()
            .find(|w| w.record.id == id)
            .ok_or(ApiError::NotFound("Workout"))?;

        let updated = self
            .backend
            .update::<Workout, _>(&target.id, &patch)
            .await?
            // Removed between the lookup and the update
            .ok_or(ApiError::NotFound("Workout"))?;

        tracing::debug!("Updated workout {}", id);
        Ok(updated)
    }
}
