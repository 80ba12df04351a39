// ABOUTME: Demo catalog seeder for the Nutriplan recipe database
// ABOUTME: Populates lookup tables and recipes, and writes a demo classifier artifact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! Demo data seeder for the Nutriplan server.
//!
//! Populates the catalog with a small recipe set covering every meal slot,
//! recommendation label, and taste preference, and writes a deterministic
//! classifier artifact so the server is runnable end-to-end.
//!
//! Usage:
//! ```bash
//! # Seed with default settings
//! cargo run --bin seed-recipes
//!
//! # Reset catalog tables before seeding
//! cargo run --bin seed-recipes -- --reset
//! ```

use anyhow::Result;
use clap::Parser;
use nutriplan_engine::ModelArtifact;
use nutriplan_server::constants::env_config;
use nutriplan_server::database::recipes::{NewRecipe, RecipeStore};
use nutriplan_server::database::Database;
use nutriplan_server::logging;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "seed-recipes",
    about = "Nutriplan demo catalog seeder",
    long_about = "Populate the recipe catalog and write a demo classifier artifact"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Classifier artifact path override
    #[arg(long)]
    model_path: Option<String>,

    /// Delete existing catalog rows before seeding
    #[arg(long)]
    reset: bool,
}

/// One demo catalog row:
/// (title, ingredients, preparation, calories, prep time, restriction, preference, meal type, label)
type DemoRecipe = (
    &'static str,
    &'static str,
    &'static str,
    Option<f64>,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const DEMO_RECIPES: &[DemoRecipe] = &[
    // Desayuno - dulce
    ("Avena con frutas", "Avena, leche, plátano, fresas, miel", "Cocinar la avena en leche, añadir la fruta picada y la miel.", Some(320.0), "15-30 minutos", "ninguna", "dulce", "Desayuno", "alta"),
    ("Panqueques de plátano", "Plátano, huevo, harina de avena, canela", "Licuar los ingredientes y dorar en sartén por ambos lados.", Some(410.0), "15-30 minutos", "ninguna", "dulce", "Desayuno", "media"),
    ("Yogur con granola", "Yogur natural, granola, arándanos", "Servir el yogur y cubrir con granola y arándanos.", Some(280.0), "15-30 minutos", "ninguna", "dulce", "Desayuno", "baja"),
    // Desayuno - salado
    ("Huevos revueltos con espinaca", "Huevos, espinaca, cebolla, aceite de oliva", "Saltear la cebolla y la espinaca, añadir los huevos batidos.", Some(350.0), "15-30 minutos", "ninguna", "salado", "Desayuno", "alta"),
    ("Tostadas con aguacate", "Pan integral, aguacate, tomate, sal", "Tostar el pan y untar el aguacate machacado con tomate.", Some(300.0), "15-30 minutos", "ninguna", "salado", "Desayuno", "media"),
    ("Arepa con queso", "Harina de maíz, queso fresco, mantequilla", "Formar las arepas, asarlas y rellenar con queso.", Some(380.0), "30-60 minutos", "ninguna", "salado", "Desayuno", "baja"),
    // Almuerzo - dulce
    ("Pollo en salsa de mango", "Pechuga de pollo, mango, miel, arroz", "Sellar el pollo y cocinarlo en la salsa de mango; servir con arroz.", Some(650.0), "30-60 minutos", "ninguna", "dulce", "Almuerzo", "alta"),
    ("Ensalada de quinua con pasas", "Quinua, pasas, zanahoria, nuez", "Cocer la quinua y mezclar con las pasas y la zanahoria rallada.", Some(520.0), "30-60 minutos", "ninguna", "dulce", "Almuerzo", "media"),
    ("Camote asado con canela", "Camote, canela, mantequilla", "Asar el camote y espolvorear con canela.", Some(430.0), "30-60 minutos", "ninguna", "dulce", "Almuerzo", "baja"),
    // Almuerzo - salado
    ("Lomo saltado", "Carne de res, cebolla, tomate, papas, arroz", "Saltear la carne con la verdura y servir con papas y arroz.", Some(780.0), "30-60 minutos", "ninguna", "salado", "Almuerzo", "alta"),
    ("Pescado a la plancha", "Filete de pescado, limón, ensalada verde", "Cocinar el filete a la plancha y acompañar con ensalada.", Some(540.0), "15-30 minutos", "ninguna", "salado", "Almuerzo", "media"),
    ("Sopa de lentejas", "Lentejas, zanahoria, apio, comino", "Cocer las lentejas con la verdura hasta ablandar.", Some(460.0), ">60 minutos", "ninguna", "salado", "Almuerzo", "baja"),
    // Merienda - dulce
    ("Batido de fresa", "Fresas, leche, avena, miel", "Licuar todos los ingredientes hasta obtener una mezcla homogénea.", Some(220.0), "15-30 minutos", "ninguna", "dulce", "Merienda", "alta"),
    ("Manzana con mantequilla de maní", "Manzana, mantequilla de maní", "Cortar la manzana en rodajas y untar con mantequilla de maní.", Some(250.0), "15-30 minutos", "ninguna", "dulce", "Merienda", "media"),
    ("Gelatina con frutas", "Gelatina, frutas picadas", "Preparar la gelatina y añadir la fruta antes de cuajar.", Some(150.0), ">60 minutos", "ninguna", "dulce", "Merienda", "baja"),
    // Merienda - salado
    ("Tostadas de hummus", "Pan pita, hummus, pepino", "Untar el hummus sobre el pan y cubrir con pepino.", Some(260.0), "15-30 minutos", "ninguna", "salado", "Merienda", "alta"),
    ("Palitos de zanahoria con queso", "Zanahoria, queso crema", "Cortar la zanahoria en palitos y servir con el queso.", Some(180.0), "15-30 minutos", "ninguna", "salado", "Merienda", "media"),
    ("Canchita serrana", "Maíz chulpe, aceite, sal", "Tostar el maíz en aceite caliente hasta reventar.", Some(210.0), "15-30 minutos", "ninguna", "salado", "Merienda", "baja"),
    // Keto
    ("Omelette keto de tocino", "Huevos, tocino, queso, espinaca", "Batir los huevos y cuajar con el tocino y el queso.", Some(520.0), "15-30 minutos", "keto", "salado", "Desayuno", "alta"),
    ("Pollo al horno con brócoli", "Muslos de pollo, brócoli, mantequilla", "Hornear el pollo con el brócoli y la mantequilla.", Some(640.0), ">60 minutos", "keto", "salado", "Almuerzo", "alta"),
    ("Nueces con coco", "Nueces mixtas, coco deshidratado", "Mezclar las nueces con el coco.", Some(310.0), "15-30 minutos", "keto", "dulce", "Merienda", "alta"),
    // Vegetariano
    ("Bowl de frutas y chía", "Frutas de estación, semillas de chía, yogur", "Picar la fruta y mezclar con el yogur y la chía.", Some(290.0), "15-30 minutos", "vegetariano", "dulce", "Desayuno", "alta"),
    ("Curry de garbanzos", "Garbanzos, leche de coco, curry, arroz", "Cocinar los garbanzos en la salsa de curry; servir con arroz.", Some(610.0), "30-60 minutos", "vegetariano", "salado", "Almuerzo", "alta"),
    ("Energéticos de avena", "Avena, dátiles, cacao", "Procesar los ingredientes y formar bolitas.", None, "15-30 minutos", "vegetariano", "dulce", "Merienda", "alta"),
];

/// Deterministic demo artifact: BMI pushes toward "alta", age toward
/// "media", a savory-leaning baseline for "baja". Every label stays
/// reachable, and the catalog covers all of them for every slot.
fn demo_artifact() -> ModelArtifact {
    ModelArtifact {
        labels: vec!["alta".into(), "media".into(), "baja".into()],
        slots: vec!["Desayuno".into(), "Almuerzo".into(), "Merienda".into()],
        coefficients: vec![
            // age, bmi, prep, sweet, savory, keto, vegetarian, slot one-hot
            vec![0.00, 0.09, 0.0, 0.4, 0.2, 0.6, 0.6, 0.0, 0.2, 0.0],
            vec![0.04, 0.02, 0.0, 0.2, 0.2, 0.0, 0.0, 0.1, 0.0, 0.0],
            vec![0.01, 0.03, 0.0, 0.1, 0.5, 0.0, 0.0, 0.0, 0.0, 0.3],
        ],
        intercepts: vec![-1.2, 0.3, 0.2],
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SeedArgs::parse();
    logging::init_from_env()?;

    let database_url = args
        .database_url
        .unwrap_or_else(env_config::database_url);
    let model_path = args.model_path.unwrap_or_else(env_config::model_path);

    if let Some(dir) = database_url
        .strip_prefix("sqlite:")
        .and_then(|p| Path::new(p).parent())
    {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let database = Database::new(&database_url).await?;
    info!("Database initialized: {database_url}");

    if args.reset {
        for table in ["recommendations", "recipes"] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(database.pool())
                .await?;
        }
        info!("Existing catalog rows deleted");
    }

    let store = RecipeStore::new(database.pool().clone());
    let mut inserted = 0usize;
    for (title, ingredients, preparation, calories, prep_time, restriction, preference, meal_type, label) in
        DEMO_RECIPES
    {
        store
            .insert(&NewRecipe {
                title: (*title).to_owned(),
                ingredients: (*ingredients).to_owned(),
                preparation: (*preparation).to_owned(),
                calories: *calories,
                prep_time: (*prep_time).to_owned(),
                restriction: (*restriction).to_owned(),
                preference: (*preference).to_owned(),
                meal_type: (*meal_type).to_owned(),
                label: (*label).to_owned(),
            })
            .await
            .map_err(|e| anyhow::anyhow!("failed to seed '{title}': {e}"))?;
        inserted += 1;
    }
    let total = store
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("failed to count recipes: {e}"))?;
    info!(inserted, total, "Catalog seeded");

    if let Some(dir) = Path::new(&model_path).parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(
        &model_path,
        serde_json::to_string_pretty(&demo_artifact())?,
    )?;
    info!("Classifier artifact written to {model_path}");

    Ok(())
}
