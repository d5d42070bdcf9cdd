use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use super::meal_type::MealType;
use crate::store::{Collection, Record};

/// An entry in the food log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    pub meal_type: MealType,
    pub calories: f64,
    /// Grams.
    pub protein: f64,
    /// Grams.
    pub carbs: f64,
    /// Grams.
    pub fat: f64,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, meal_type: MealType, calories: f64) -> Self {
        Self {
            name: name.into(),
            meal_type,
            calories,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
        }
    }

    pub fn with_macros(mut self, protein: f64, carbs: f64, fat: f64) -> Self {
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self
    }

    pub fn totals(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

impl Record for FoodItem {
    const COLLECTION: Collection = Collection::FoodLogs;
}

impl fmt::Display for FoodItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} kcal, P {}g / C {}g / F {}g",
            self.name, self.meal_type, self.calories, self.protein, self.carbs, self.fat
        )
    }
}

/// Summed calories and macros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    pub fn sum<'a>(items: impl IntoIterator<Item = &'a FoodItem>) -> Self {
        items
            .into_iter()
            .fold(Self::default(), |acc, item| acc + item.totals())
    }
}

impl Add for NutritionTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl fmt::Display for NutritionTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} kcal, protein {:.1}g, carbs {:.1}g, fat {:.1}g",
            self.calories, self.protein, self.carbs, self.fat
        )
    }
}
