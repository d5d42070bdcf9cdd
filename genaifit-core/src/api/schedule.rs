use super::Backend;
use crate::error::{ApiError, ApiResult};
use crate::latency;
use crate::models::{SchedulePatch, ScheduledWorkout};
use crate::store::{DocumentId, Stored};

/// The weekly workout schedule. Each day holds at most one workout.
pub struct Schedule<'a> {
    backend: &'a Backend,
}

impl<'a> Schedule<'a> {
    pub(super) fn new(backend: &'a Backend) -> Self {
        Self { backend }
    }

    pub async fn get_schedule(&self) -> ApiResult<Vec<Stored<ScheduledWorkout>>> {
        self.backend.gate(latency::LIST).await?;
        self.backend.load::<ScheduledWorkout>().await
    }

    /// Adds a workout and returns the refreshed schedule.
    pub async fn add_scheduled_workout(
        &self,
        workout: ScheduledWorkout,
    ) -> ApiResult<Vec<Stored<ScheduledWorkout>>> {
        self.backend.gate(latency::MUTATE).await?;

        let day = workout.day;
        self.backend
            .insert_if(|existing: &[Stored<ScheduledWorkout>]| {
                (!existing.iter().any(|w| w.day == day)).then_some(workout)
            })
            .await?
            .ok_or(ApiError::DayAlreadyScheduled(day))?;

        self.backend.load::<ScheduledWorkout>().await
    }

    /// Removes a workout and returns the refreshed schedule.
    pub async fn remove_scheduled_workout(
        &self,
        id: &DocumentId,
    ) -> ApiResult<Vec<Stored<ScheduledWorkout>>> {
        self.backend.gate(latency::MUTATE).await?;
        self.backend.delete::<ScheduledWorkout>(id).await
    }

    /// Patches one entry. An unknown id is reported before any day clash.
    pub async fn update_scheduled_workout(
        &self,
        id: &DocumentId,
        patch: SchedulePatch,
    ) -> ApiResult<Stored<ScheduledWorkout>> {
        self.backend.gate(latency::UPDATE).await?;

        self.backend
            .update_if(id, &patch, |existing: &[Stored<ScheduledWorkout>]| {
                match patch.day {
                    Some(day) if existing.iter().any(|w| w.day == day && &w.id != id) => {
                        Err(ApiError::DayAlreadyScheduled(day))
                    }
                    _ => Ok(()),
                }
            })
            .await?
            .ok_or(ApiError::NotFound("Scheduled workout"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{collection_keys, recorded, signed_in};
    use crate::models::{ScheduleStatus, Weekday};

    #[tokio::test]
    async fn test_add_and_list() {
        let backend = signed_in().await;
        let schedule = backend.schedule();

        schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Mon, "Upper Body Focus").with_duration(45))
            .await
            .unwrap();
        let entries = schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Wed, "Core Crusher"))
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].day, Weekday::Wed);
        assert_eq!(entries[0].duration, 30);
        assert_eq!(entries[1].duration, 45);
        assert_eq!(schedule.get_schedule().await.unwrap(), entries);
    }

    #[tokio::test]
    async fn test_one_workout_per_day() {
        let backend = signed_in().await;
        let schedule = backend.schedule();

        schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Fri, "Full Body HIIT"))
            .await
            .unwrap();
        let err = schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Fri, "Cardio Blast"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Workout already scheduled for FRI");
        assert_eq!(schedule.get_schedule().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_status_and_move_day() {
        let backend = signed_in().await;
        let schedule = backend.schedule();

        let entries = schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Sun, "Recovery / Light Cardio"))
            .await
            .unwrap();
        let id = entries[0].id.clone();

        let updated = schedule
            .update_scheduled_workout(
                &id,
                SchedulePatch {
                    day: Some(Weekday::Sat),
                    status: Some(ScheduleStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.day, Weekday::Sat);
        assert_eq!(updated.status, ScheduleStatus::Completed);
        assert_eq!(updated.name, "Recovery / Light Cardio");
    }

    #[tokio::test]
    async fn test_update_into_taken_day() {
        let backend = signed_in().await;
        let schedule = backend.schedule();

        schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Mon, "A"))
            .await
            .unwrap();
        let entries = schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Tue, "B"))
            .await
            .unwrap();

        let result = schedule
            .update_scheduled_workout(
                &entries[0].id,
                SchedulePatch {
                    day: Some(Weekday::Mon),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ApiError::DayAlreadyScheduled(Weekday::Mon))));

        // Keeping its own day is fine
        let same_day = schedule
            .update_scheduled_workout(
                &entries[0].id,
                SchedulePatch {
                    day: Some(Weekday::Tue),
                    duration: Some(50),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(same_day.duration, 50);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let backend = signed_in().await;

        let err = backend
            .schedule()
            .update_scheduled_workout(&DocumentId::from("missing"), SchedulePatch::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Scheduled workout not found");
    }

    #[tokio::test]
    async fn test_update_unknown_id_into_taken_day() {
        let backend = signed_in().await;
        let schedule = backend.schedule();
        schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Mon, "A"))
            .await
            .unwrap();

        let err = schedule
            .update_scheduled_workout(
                &DocumentId::from("missing"),
                SchedulePatch {
                    day: Some(Weekday::Mon),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Scheduled workout not found");
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_adds_for_one_day() {
        use crate::latency::TokioDelay;
        use crate::seed::{self, DEMO_EMAIL, DEMO_PASSWORD};
        use crate::store::MemoryStore;
        use std::sync::Arc;

        let backend = Backend::new(Arc::new(MemoryStore::new()), Arc::new(TokioDelay));
        seed::seed_demo_data(backend.store()).await.unwrap();
        backend.auth().login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        let schedule = backend.schedule();

        let (first, second) = futures::join!(
            schedule.add_scheduled_workout(ScheduledWorkout::new(Weekday::Mon, "A")),
            schedule.add_scheduled_workout(ScheduledWorkout::new(Weekday::Mon, "B")),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(ApiError::DayAlreadyScheduled(Weekday::Mon)))));
        assert_eq!(schedule.get_schedule().await.unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_moves_into_one_day() {
        use crate::latency::TokioDelay;
        use crate::seed::{self, DEMO_EMAIL, DEMO_PASSWORD};
        use crate::store::MemoryStore;
        use std::sync::Arc;

        let backend = Backend::new(Arc::new(MemoryStore::new()), Arc::new(TokioDelay));
        seed::seed_demo_data(backend.store()).await.unwrap();
        backend.auth().login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
        let schedule = backend.schedule();
        schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Tue, "A"))
            .await
            .unwrap();
        let entries = schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Wed, "B"))
            .await
            .unwrap();
        let to_mon = || SchedulePatch {
            day: Some(Weekday::Mon),
            ..Default::default()
        };

        let (first, second) = futures::join!(
            schedule.update_scheduled_workout(&entries[0].id, to_mon()),
            schedule.update_scheduled_workout(&entries[1].id, to_mon()),
        );

        assert_eq!([&first, &second].iter().filter(|r| r.is_ok()).count(), 1);
        let days: Vec<_> = schedule
            .get_schedule()
            .await
            .unwrap()
            .iter()
            .map(|w| w.day)
            .collect();
        assert_eq!(days.iter().filter(|d| **d == Weekday::Mon).count(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let backend = signed_in().await;
        let schedule = backend.schedule();

        let entries = schedule
            .add_scheduled_workout(ScheduledWorkout::new(Weekday::Thu, "Strength Training"))
            .await
            .unwrap();

        let remaining = schedule
            .remove_scheduled_workout(&entries[0].id)
            .await
            .unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_schedule_requires_authentication() {
        let (backend, kv) = recorded().await;
        let schedule = backend.schedule();
        let id = DocumentId::from("x");

        for result in [
            schedule.get_schedule().await.map(|_| ()),
            schedule
                .add_scheduled_workout(ScheduledWorkout::new(Weekday::Mon, "A"))
                .await
                .map(|_| ()),
            schedule.remove_scheduled_workout(&id).await.map(|_| ()),
            schedule
                .update_scheduled_workout(&id, SchedulePatch::default())
                .await
                .map(|_| ()),
        ] {
            assert!(matches!(result, Err(ApiError::AuthenticationRequired)));
        }

        assert!(collection_keys(&kv.touched()).is_empty());
    }
}
