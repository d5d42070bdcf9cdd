use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::{Collection, Record};

/// Repetitions for an exercise: a count, or a free-form duration such as
/// `"30 sec"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Timed(String),
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reps::Count(n) => write!(f, "{}", n),
            Reps::Timed(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: Reps,
    /// Rest between sets, in seconds.
    pub rest: u32,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: u32, reps: Reps, rest: u32) -> Self {
        Self {
            name: name.into(),
            sets,
            reps,
            rest,
        }
    }
}

/// A workout routine.
///
/// `id` is the numeric domain id used by callers; it is distinct from the
/// store-assigned `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: u32,
    pub title: String,
    /// Minutes.
    pub duration: u32,
    pub calories: u32,
    pub completed: bool,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl Workout {
    pub fn new(id: u32, title: impl Into<String>, duration: u32, calories: u32) -> Self {
        Self {
            id,
            title: title.into(),
            duration,
            calories,
            completed: false,
            exercises: Vec::new(),
        }
    }

    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }
}

impl Record for Workout {
    const COLLECTION: Collection = Collection::Workouts;
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workout #{}: {}", self.id, self.title)?;
        writeln!(f, "{}", "=".repeat(30))?;
        writeln!(
            f,
            "{} min, {} kcal, {}",
            self.duration,
            self.calories,
            if self.completed { "completed" } else { "not completed" }
        )?;

        if !self.exercises.is_empty() {
            writeln!(f, "\nExercises:")?;
            for exercise in &self.exercises {
                writeln!(
                    f,
                    "  - {}: {} x {} (rest {}s)",
                    exercise.name, exercise.sets, exercise.reps, exercise.rest
                )?;
            }
        }

        Ok(())
    }
}

/// Partial update for a workout. Only set fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkoutPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
}

impl WorkoutPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reps_untagged() {
        let count: Reps = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(count, Reps::Count(12));

        let timed: Reps = serde_json::from_value(json!("30 sec")).unwrap();
        assert_eq!(timed, Reps::Timed("30 sec".into()));

        assert_eq!(serde_json::to_value(&Reps::Count(5)).unwrap(), json!(5));
    }

    #[test]
    fn test_workout_new_defaults() {
        let workout = Workout::new(4, "Leg Day", 30, 250);
        assert!(!workout.completed);
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_workout_missing_exercises_defaults_empty() {
        let workout: Workout = serde_json::from_value(json!({
            "id": 1, "title": "Run", "duration": 20, "calories": 200, "completed": false
        }))
        .unwrap();
        assert!(workout.exercises.is_empty());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = WorkoutPatch::completed(true);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "completed": true })
        );

        assert_eq!(
            serde_json::to_value(WorkoutPatch::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_workout_display() {
        let workout = Workout::new(1, "Core Crusher", 20, 180).with_exercises(vec![Exercise::new(
            "Plank",
            3,
            Reps::Timed("30 sec".into()),
            30,
        )]);

        let output = workout.to_string();
        assert!(output.contains("Workout #1: Core Crusher"));
        assert!(output.contains("Plank: 3 x 30 sec (rest 30s)"));
    }
}
