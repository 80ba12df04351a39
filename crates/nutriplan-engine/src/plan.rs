// ABOUTME: Plan accumulation structures and the aggregator producing the final week plan
// ABOUTME: Tracks running calorie totals; null calories add zero but stay visible
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::models::{MealSlot, RecipeCandidate};
use serde::Serialize;

/// Display fields of one chosen recipe.
#[derive(Debug, Clone, Serialize)]
pub struct SlotChoice {
    /// Dish title
    pub name: String,
    /// Ingredients text
    pub ingredients: String,
    /// Dietary restriction tag
    pub restrictions: String,
    /// Calories; `None` is rendered as null, never coerced for display
    pub calories: Option<f64>,
    /// Preparation time text
    pub prep_time: String,
    /// Preparation procedure text
    pub procedure: String,
}

impl From<&RecipeCandidate> for SlotChoice {
    fn from(candidate: &RecipeCandidate) -> Self {
        Self {
            name: candidate.title.clone(),
            ingredients: candidate.ingredients.clone(),
            restrictions: candidate.restriction.clone(),
            calories: candidate.calories,
            prep_time: candidate.prep_time.clone(),
            procedure: candidate.preparation.clone(),
        }
    }
}

/// One chosen recipe in its slot.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedMeal {
    /// Meal slot this choice fills
    pub slot: MealSlot,
    /// Chosen recipe display fields
    pub choice: SlotChoice,
}

/// All slot choices for one day, in slot order.
#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    /// 1-based day index
    pub day: u32,
    /// Chosen meals in slot order
    pub meals: Vec<PlannedMeal>,
}

/// Calorie totals for the finished plan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NutritionSummary {
    /// Sum of calories across every slot (null counted as 0)
    pub total_calories: f64,
    /// Total divided by day count, rounded to 2 decimals
    pub average_daily: f64,
}

/// Finished plan: one entry per day plus the nutrition summary.
#[derive(Debug, Clone, Serialize)]
pub struct WeekPlan {
    /// Day plans in day order
    pub days: Vec<DayPlan>,
    /// Calorie summary
    pub summary: NutritionSummary,
}

/// Accumulates selections into a day-indexed plan and a running total.
#[derive(Debug, Default)]
pub struct PlanAggregator {
    days: Vec<DayPlan>,
    total_calories: f64,
}

impl PlanAggregator {
    /// Empty aggregator for a fresh plan generation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chosen recipe for (day, slot).
    ///
    /// Days are expected in ascending order; a new day entry is opened when
    /// the day index advances.
    pub fn add(&mut self, day: u32, slot: MealSlot, chosen: &RecipeCandidate) {
        self.total_calories += chosen.calories.unwrap_or(0.0);
        let meal = PlannedMeal {
            slot,
            choice: SlotChoice::from(chosen),
        };
        match self.days.last_mut() {
            Some(last) if last.day == day => last.meals.push(meal),
            _ => self.days.push(DayPlan {
                day,
                meals: vec![meal],
            }),
        }
    }

    /// Close the plan and compute the summary.
    ///
    /// The daily average is the only rounded figure (2 decimals).
    #[must_use]
    pub fn finalize(self, days: u32) -> WeekPlan {
        let average = if days == 0 {
            0.0
        } else {
            self.total_calories / f64::from(days)
        };
        WeekPlan {
            days: self.days,
            summary: NutritionSummary {
                total_calories: self.total_calories,
                average_daily: (average * 100.0).round() / 100.0,
            },
        }
    }
}
