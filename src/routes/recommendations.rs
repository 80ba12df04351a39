// ABOUTME: Route handlers for the meal-plan recommendation API
// ABOUTME: Validates the Spanish wire payload, runs the engine, renders the plan response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! Recommendation routes
//!
//! `POST /api/recommendations` accepts the profile payload, generates a
//! multi-day meal plan through the engine, and returns the plan keyed by
//! `"Día N"` with a nutrition summary. Field names on the wire stay in
//! Spanish for compatibility with existing clients; errors always render as
//! `{"error": <message>}`.

use crate::database::recipes::RecipeStore;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use axum::{extract::State, routing::post, Json, Router};
use nutriplan_engine::{
    Classifier, EngineError, MealPlanEngine, Preference, UserProfile, WeekPlan,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Wire fields required in every recommendation request.
const REQUIRED_FIELDS: [&str; 6] = [
    "edad",
    "peso",
    "altura",
    "restricciones",
    "preferencia",
    "dias",
];

/// Parsed request payload, still unvalidated against field ranges.
#[derive(Debug)]
struct RecommendationRequest {
    age: u32,
    weight_kg: f64,
    height_cm: f64,
    restrictions: Vec<String>,
    preference: Preference,
    days: u32,
}

impl RecommendationRequest {
    /// Extract and type-check the payload fields.
    ///
    /// Missing fields are reported together; type mismatches one at a time,
    /// each as a 400 with the offending field named.
    fn from_value(payload: &Value) -> AppResult<Self> {
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .filter(|field| payload.get(**field).map_or(true, Value::is_null))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }

        let age = payload["edad"]
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| AppError::invalid_input("edad must be an integer"))?;
        let weight_kg = payload["peso"]
            .as_f64()
            .ok_or_else(|| AppError::invalid_input("peso must be a number"))?;
        let height_cm = payload["altura"]
            .as_f64()
            .ok_or_else(|| AppError::invalid_input("altura must be a number"))?;
        let restrictions = payload["restricciones"]
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(String::from))
                    .collect::<Option<Vec<String>>>()
            })
            .ok_or_else(|| AppError::invalid_input("restricciones must be an array of strings"))?;
        let preference = parse_preference(&payload["preferencia"])?;
        let days = payload["dias"]
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| AppError::invalid_input("dias must be an integer"))?;

        Ok(Self {
            age,
            weight_kg,
            height_cm,
            restrictions,
            preference,
            days,
        })
    }

    /// Range-validate into an engine profile.
    fn into_profile(self) -> Result<UserProfile, EngineError> {
        UserProfile::new(
            self.age,
            self.weight_kg,
            self.height_cm,
            self.restrictions,
            self.preference,
            self.days,
        )
        .map_err(EngineError::Validation)
    }
}

/// Resolve `preferencia` from a string or a list of terms.
fn parse_preference(value: &Value) -> AppResult<Preference> {
    let invalid = || {
        AppError::invalid_input(
            "preferencia must be 'dulce', 'salado', 'ambas', or a list of those terms",
        )
    };
    match value {
        Value::String(s) => match s.to_lowercase().as_str() {
            "dulce" => Ok(Preference::Sweet),
            "salado" => Ok(Preference::Savory),
            "ambas" => Ok(Preference::Both),
            _ => Err(invalid()),
        },
        Value::Array(items) => {
            let mut sweet = false;
            let mut savory = false;
            for item in items {
                match item.as_str().map(str::to_lowercase).as_deref() {
                    Some("dulce") => sweet = true,
                    Some("salado") => savory = true,
                    _ => return Err(invalid()),
                }
            }
            match (sweet, savory) {
                (true, true) => Ok(Preference::Both),
                (true, false) => Ok(Preference::Sweet),
                (false, true) => Ok(Preference::Savory),
                (false, false) => Err(invalid()),
            }
        }
        _ => Err(invalid()),
    }
}

/// Render the finished plan in the wire shape.
///
/// Day keys are inserted in order; serde_json's `preserve_order` feature
/// keeps them that way through serialization.
fn render_plan(plan: &WeekPlan) -> Value {
    let mut days = Map::new();
    for day_plan in &plan.days {
        let mut slots = Map::new();
        for meal in &day_plan.meals {
            slots.insert(
                meal.slot.as_str().to_owned(),
                serde_json::json!({
                    "Nombre del Plato": meal.choice.name,
                    "Ingredientes": meal.choice.ingredients,
                    "Restricciones": meal.choice.restrictions,
                    "Calorías": meal.choice.calories,
                    "Tiempo de Preparación": meal.choice.prep_time,
                    "Procedimiento": meal.choice.procedure,
                }),
            );
        }
        days.insert(format!("Día {}", day_plan.day), Value::Object(slots));
    }
    serde_json::json!({
        "plan": days,
        "resumen_nutricional": {
            "total_calorias": plan.summary.total_calories,
            "promedio_diario": plan.summary.average_daily,
        }
    })
}

/// Recommendation routes handler
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recommendations", post(Self::handle_recommendations))
            .with_state(resources)
    }

    /// Generate a meal plan for the supplied profile.
    async fn handle_recommendations(
        State(resources): State<Arc<ServerResources>>,
        Json(payload): Json<Value>,
    ) -> Result<Json<Value>, AppError> {
        let request = RecommendationRequest::from_value(&payload)?;
        let profile = request.into_profile()?;

        let classifier: Arc<dyn Classifier> = resources
            .classifier
            .clone()
            .ok_or(EngineError::ClassifierUnavailable)?;
        let store = RecipeStore::new(resources.database.pool().clone());
        let engine = MealPlanEngine::new(classifier, Arc::new(store));

        let plan = engine.generate_plan(&profile).await?;
        info!(
            days = profile.days(),
            total_calories = plan.summary.total_calories,
            "generated meal plan"
        );
        Ok(Json(render_plan(&plan)))
    }
}
