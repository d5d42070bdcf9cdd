//! Demo account and starter workouts.

use serde::Serialize;

use crate::api::{insert_record, insert_record_if};
use crate::error::ApiResult;
use crate::models::{Exercise, Reps, User, Workout};
use crate::store::{DocumentStore, Record, Stored};

pub const DEMO_EMAIL: &str = "demo@genaifit.com";
pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_NAME: &str = "Demo User";

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub user_created: bool,
    pub workouts_created: usize,
}

pub fn demo_user() -> User {
    User::new(1, DEMO_NAME, DEMO_EMAIL, DEMO_PASSWORD)
}

pub fn demo_workouts() -> Vec<Workout> {
    vec![
        Workout::new(1, "Full Body HIIT", 30, 350).with_exercises(vec![
            Exercise::new("Jumping Jacks", 3, Reps::Count(20), 30),
            Exercise::new("Push-ups", 3, Reps::Count(12), 45),
            Exercise::new("Squats", 3, Reps::Count(15), 45),
            Exercise::new("Mountain Climbers", 3, Reps::Count(20), 30),
        ]),
        Workout::new(2, "Upper Body Focus", 45, 280).with_exercises(vec![
            Exercise::new("Dumbbell Press", 4, Reps::Count(10), 60),
            Exercise::new("Bent Over Rows", 4, Reps::Count(12), 60),
            Exercise::new("Tricep Dips", 3, Reps::Count(15), 45),
            Exercise::new("Bicep Curls", 3, Reps::Count(12), 45),
        ]),
        Workout::new(3, "Core Crusher", 20, 180).with_exercises(vec![
            Exercise::new("Plank", 3, Reps::Timed("30 sec".into()), 30),
            Exercise::new("Russian Twists", 3, Reps::Count(20), 30),
            Exercise::new("Bicycle Crunches", 3, Reps::Count(20), 30),
            Exercise::new("Leg Raises", 3, Reps::Count(12), 30),
        ]),
    ]
}

/// Inserts the demo user and workouts where they are missing.
///
/// Safe to run repeatedly. Workouts are inserted newest-id first so the
/// collection reads back in id order.
pub async fn seed_demo_data(store: &DocumentStore) -> ApiResult<SeedReport> {
    let mut report = SeedReport::default();

    let created = insert_record_if(store, |users: &[Stored<User>]| {
        (!users.iter().any(|u| u.email == DEMO_EMAIL)).then(demo_user)
    })
    .await?;
    if created.is_some() {
        report.user_created = true;
        tracing::info!("Seeded demo user {}", DEMO_EMAIL);
    }

    if store.get_collection(Workout::COLLECTION).await?.is_empty() {
        for workout in demo_workouts().iter().rev() {
            insert_record(store, workout).await?;
            report.workouts_created += 1;
        }
        tracing::info!("Seeded {} demo workouts", report.workouts_created);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Backend;
    use crate::store::{to_document, Collection};

    #[tokio::test]
    async fn test_seed_fresh_store() {
        let backend = Backend::in_memory();

        let report = seed_demo_data(backend.store()).await.unwrap();

        assert_eq!(
            report,
            SeedReport {
                user_created: true,
                workouts_created: 3,
            }
        );
        let users = backend.store().get_collection(Collection::Users).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["password"], DEMO_PASSWORD);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let backend = Backend::in_memory();

        seed_demo_data(backend.store()).await.unwrap();
        let second = seed_demo_data(backend.store()).await.unwrap();

        assert_eq!(second, SeedReport::default());
        let workouts = backend.store().get_collection(Collection::Workouts).await.unwrap();
        assert_eq!(workouts.len(), 3);
    }

    #[tokio::test]
    async fn test_workouts_read_back_in_id_order() {
        let backend = Backend::in_memory();
        seed_demo_data(backend.store()).await.unwrap();

        let ids: Vec<_> = backend
            .store()
            .get_collection(Collection::Workouts)
            .await
            .unwrap()
            .iter()
            .map(|w| w["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_existing_workouts_are_left_alone() {
        let backend = Backend::in_memory();
        let custom = to_document(&Workout::new(7, "Yoga Flow", 40, 150)).unwrap();
        backend
            .store()
            .insert_document(Collection::Workouts, custom)
            .await
            .unwrap();

        let report = seed_demo_data(backend.store()).await.unwrap();

        assert!(report.user_created);
        assert_eq!(report.workouts_created, 0);
    }

    #[test]
    fn test_demo_workouts_shape() {
        let workouts = demo_workouts();
        assert_eq!(workouts.len(), 3);
        assert!(workouts.iter().all(|w| w.exercises.len() == 4 && !w.completed));
        assert_eq!(workouts[1].duration, 45);
    }
}
