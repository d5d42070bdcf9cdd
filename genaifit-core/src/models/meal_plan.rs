use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::food_item::NutritionTotals;
use super::meal_type::MealType;
use crate::store::{Collection, Record};

/// A planned meal within a day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub title: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Meal {
    pub fn new(title: impl Into<String>, meal_type: MealType, calories: f64) -> Self {
        Self {
            title: title.into(),
            meal_type,
            calories,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            ingredients: Vec::new(),
        }
    }

    pub fn with_macros(mut self, protein: f64, carbs: f64, fat: f64) -> Self {
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }
}

/// The meals planned for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Display name of the day, e.g. "Monday".
    pub day: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl DayPlan {
    /// Creates an empty plan, naming the day after `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            day: date.format("%A").to_string(),
            date,
            meals: Vec::new(),
        }
    }

    pub fn with_meals(mut self, meals: Vec<Meal>) -> Self {
        self.meals = meals;
        self
    }

    pub fn totals(&self) -> NutritionTotals {
        self.meals
            .iter()
            .fold(NutritionTotals::default(), |acc, meal| {
                acc + NutritionTotals {
                    calories: meal.calories,
                    protein: meal.protein,
                    carbs: meal.carbs,
                    fat: meal.fat,
                }
            })
    }
}

impl Record for DayPlan {
    const COLLECTION: Collection = Collection::MealPlans;
}

impl fmt::Display for DayPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.day, self.date)?;
        writeln!(f, "{}", "=".repeat(30))?;

        if self.meals.is_empty() {
            writeln!(f, "No meals planned")?;
        }
        for meal in &self.meals {
            writeln!(f, "{}: {} - {} kcal", meal.meal_type, meal.title, meal.calories)?;
            if !meal.ingredients.is_empty() {
                writeln!(f, "  {}", meal.ingredients.join(", "))?;
            }
        }

        Ok(())
    }
}

/// Partial update for a day plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayPlanPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals: Option<Vec<Meal>>,
}
