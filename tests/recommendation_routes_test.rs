// ABOUTME: Integration tests for the recommendations endpoint through the full router
// ABOUTME: Covers the success shape and the 400, 404, and 500 error envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use helpers::axum_test::AxumTestRequest;
use nutriplan_engine::{LinearClassifier, ModelArtifact};
use nutriplan_server::config::environment::{Environment, LogLevel, ServerConfig};
use nutriplan_server::database::recipes::{NewRecipe, RecipeStore};
use nutriplan_server::database::Database;
use nutriplan_server::resources::ServerResources;
use nutriplan_server::routes;
use std::path::PathBuf;
use std::sync::Arc;

/// Artifact with a single label: every request predicts "alta".
fn fixed_artifact() -> ModelArtifact {
    ModelArtifact {
        labels: vec!["alta".into()],
        slots: vec!["Desayuno".into(), "Almuerzo".into(), "Merienda".into()],
        coefficients: vec![vec![0.0; 10]],
        intercepts: vec![1.0],
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".into(),
        model_path: PathBuf::from("unused.json"),
        environment: Environment::Testing,
        log_level: LogLevel::Info,
    }
}

fn recipe(title: &str, preference: &str, meal_type: &str, calories: Option<f64>) -> NewRecipe {
    NewRecipe {
        title: title.to_owned(),
        ingredients: "ingredientes".into(),
        preparation: "pasos".into(),
        calories,
        prep_time: "15-30 minutos".into(),
        restriction: "ninguna".to_owned(),
        preference: preference.to_owned(),
        meal_type: meal_type.to_owned(),
        label: "alta".to_owned(),
    }
}

/// Catalog with three sweet recipes per slot, fixed calories per slot.
async fn seeded_database() -> Database {
    let database = Database::new("sqlite::memory:").await.unwrap();
    let store = RecipeStore::new(database.pool().clone());
    for (meal_type, calories) in [("Desayuno", 300.0), ("Almuerzo", 600.0), ("Merienda", 200.0)] {
        for i in 1..=3 {
            store
                .insert(&recipe(
                    &format!("{meal_type} dulce {i}"),
                    "dulce",
                    meal_type,
                    Some(calories),
                ))
                .await
                .unwrap();
        }
    }
    database
}

async fn app_with_classifier(database: Database) -> axum::Router {
    let classifier = LinearClassifier::from_artifact(fixed_artifact()).unwrap();
    let resources = Arc::new(ServerResources::new(
        database,
        Some(Arc::new(classifier)),
        Arc::new(test_config()),
    ));
    routes::router(resources)
}

fn valid_payload(days: u32) -> serde_json::Value {
    serde_json::json!({
        "edad": 35,
        "peso": 175,
        "altura": 175,
        "restricciones": ["ninguna"],
        "preferencia": "dulce",
        "dias": days
    })
}

#[tokio::test]
async fn two_day_plan_has_expected_shape_and_totals() {
    let app = app_with_classifier(seeded_database().await).await;
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&valid_payload(2))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    let plan = body["plan"].as_object().unwrap();
    assert_eq!(plan.len(), 2);
    assert!(plan.contains_key("Día 1"));
    assert!(plan.contains_key("Día 2"));

    for day in plan.values() {
        let slots = day.as_object().unwrap();
        assert_eq!(slots.len(), 3);
        for slot_name in ["Desayuno", "Almuerzo", "Merienda"] {
            let entry = &slots[slot_name];
            assert!(entry["Nombre del Plato"].is_string());
            assert!(entry["Ingredientes"].is_string());
            assert!(entry["Restricciones"].is_string());
            assert!(entry["Calorías"].is_number());
            assert!(entry["Tiempo de Preparación"].is_string());
            assert!(entry["Procedimiento"].is_string());
        }
    }

    // 2 x (300 + 600 + 200)
    let summary = &body["resumen_nutricional"];
    assert!((summary["total_calorias"].as_f64().unwrap() - 2200.0).abs() < f64::EPSILON);
    assert!((summary["promedio_diario"].as_f64().unwrap() - 1100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn slot_titles_do_not_repeat_across_days() {
    // Pool of 3 per slot, 3 days: every slot's titles must be distinct
    let app = app_with_classifier(seeded_database().await).await;
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&valid_payload(3))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    for slot_name in ["Desayuno", "Almuerzo", "Merienda"] {
        let titles: std::collections::HashSet<String> = body["plan"]
            .as_object()
            .unwrap()
            .values()
            .map(|day| day[slot_name]["Nombre del Plato"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(titles.len(), 3, "{slot_name} repeated before exhaustion");
    }
}

#[tokio::test]
async fn missing_fields_return_400_envelope() {
    let app = app_with_classifier(seeded_database().await).await;
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&serde_json::json!({"edad": 35, "peso": 175}))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("altura"));
    assert!(message.contains("dias"));
}

#[tokio::test]
async fn out_of_range_age_returns_400() {
    let app = app_with_classifier(seeded_database().await).await;
    let mut payload = valid_payload(2);
    payload["edad"] = serde_json::json!(120);
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&payload)
        .send(app)
        .await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("age"));
}

#[tokio::test]
async fn empty_candidate_pool_returns_404_naming_the_slot() {
    // Savory request against an all-sweet catalog: Desayuno comes up empty
    let app = app_with_classifier(seeded_database().await).await;
    let mut payload = valid_payload(2);
    payload["preferencia"] = serde_json::json!("salado");
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&payload)
        .send(app)
        .await;
    assert_eq!(response.status(), 404);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Desayuno"));
    assert!(body.get("plan").is_none());
}

#[tokio::test]
async fn missing_classifier_returns_500() {
    let resources = Arc::new(ServerResources::new(
        seeded_database().await,
        None,
        Arc::new(test_config()),
    ));
    let app = routes::router(resources);
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&valid_payload(1))
        .send(app)
        .await;
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("model is not available"));
}

#[tokio::test]
async fn ambas_preference_succeeds_against_single_taste_catalog() {
    // No preference filter is applied for "ambas", so the sweet-only
    // catalog still satisfies every slot.
    let app = app_with_classifier(seeded_database().await).await;
    let mut payload = valid_payload(1);
    payload["preferencia"] = serde_json::json!("ambas");
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&payload)
        .send(app)
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn null_calories_render_as_null_and_sum_as_zero() {
    let database = Database::new("sqlite::memory:").await.unwrap();
    let store = RecipeStore::new(database.pool().clone());
    store
        .insert(&recipe("Desayuno sin calorías", "dulce", "Desayuno", None))
        .await
        .unwrap();
    store
        .insert(&recipe("Almuerzo dulce", "dulce", "Almuerzo", Some(500.0)))
        .await
        .unwrap();
    store
        .insert(&recipe("Merienda dulce", "dulce", "Merienda", Some(100.0)))
        .await
        .unwrap();

    let app = app_with_classifier(database).await;
    let response = AxumTestRequest::post("/api/recommendations")
        .json(&valid_payload(1))
        .send(app)
        .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json();
    assert!(body["plan"]["Día 1"]["Desayuno"]["Calorías"].is_null());
    assert!(
        (body["resumen_nutricional"]["total_calorias"].as_f64().unwrap() - 600.0).abs()
            < f64::EPSILON
    );
}

#[tokio::test]
async fn health_probes_respond() {
    let app = app_with_classifier(seeded_database().await).await;
    let response = AxumTestRequest::get("/health").send(app).await;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}
