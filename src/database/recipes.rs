// ABOUTME: Recipe catalog store: candidate queries and seeding inserts
// ABOUTME: Implements the engine's CandidateRepository port with fully parameterized SQL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::errors::{AppError, AppResult};
use nutriplan_engine::{CandidateFilter, CandidateRepository, EngineError, EngineResult};
use nutriplan_engine::{MealSlot, RecipeCandidate};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool};

/// A recipe row ready for insertion, lookup values by name.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// Dish title
    pub title: String,
    /// Ingredients text
    pub ingredients: String,
    /// Preparation procedure text
    pub preparation: String,
    /// Calories, if known
    pub calories: Option<f64>,
    /// Preparation time text
    pub prep_time: String,
    /// Dietary restriction name (created in the lookup table if new)
    pub restriction: String,
    /// Preference name (created if new)
    pub preference: String,
    /// Meal type name (created if new)
    pub meal_type: String,
    /// Recommendation label for this recipe
    pub label: String,
}

/// Recipe catalog operations manager
pub struct RecipeStore {
    pool: SqlitePool,
}

impl RecipeStore {
    /// Create a new recipe store over a pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a recipe and its recommendation label, resolving lookup rows
    /// by name and creating them when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn insert(&self, recipe: &NewRecipe) -> AppResult<i64> {
        let restriction_id = self
            .lookup_id("dietary_restrictions", &recipe.restriction)
            .await?;
        let preference_id = self.lookup_id("preferences", &recipe.preference).await?;
        let meal_type_id = self.lookup_id("meal_types", &recipe.meal_type).await?;

        let recipe_id = sqlx::query(
            r"
            INSERT INTO recipes (
                title, ingredients, preparation, calories, prep_time,
                restriction_id, preference_id, meal_type_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(&recipe.title)
        .bind(&recipe.ingredients)
        .bind(&recipe.preparation)
        .bind(recipe.calories)
        .bind(&recipe.prep_time)
        .bind(restriction_id)
        .bind(preference_id)
        .bind(meal_type_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe: {e}")))?
        .last_insert_rowid();

        sqlx::query("INSERT INTO recommendations (recipe_id, label) VALUES ($1, $2)")
            .bind(recipe_id)
            .bind(&recipe.label)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert recommendation: {e}")))?;

        Ok(recipe_id)
    }

    /// Resolve a lookup table id by name, inserting the row if missing.
    async fn lookup_id(&self, table: &str, name: &str) -> AppResult<i64> {
        // `table` is one of three compile-time constants, never user input.
        let insert = format!("INSERT OR IGNORE INTO {table} (name) VALUES ($1)");
        sqlx::query(&insert)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to insert into {table}: {e}")))?;

        let select = format!("SELECT id FROM {table} WHERE name = $1");
        let row = sqlx::query(&select)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to query {table}: {e}")))?;
        row.try_get("id")
            .map_err(|e| AppError::database(format!("Failed to read {table} id: {e}")))
    }

    /// Total number of recipes in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn count(&self) -> AppResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM recipes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count recipes: {e}")))?;
        row.try_get("n")
            .map_err(|e| AppError::database(format!("Failed to read recipe count: {e}")))
    }

    /// Map one joined row into an engine candidate.
    ///
    /// Numeric coercion happens here: SQLite numerics become plain `f64`
    /// before the candidate ever reaches serialization.
    fn row_to_candidate(row: &SqliteRow) -> EngineResult<RecipeCandidate> {
        let meal_type: String = read(row, "meal_type")?;
        let slot = MealSlot::parse(&meal_type).ok_or_else(|| {
            EngineError::Repository(format!("unknown meal type in catalog: {meal_type}"))
        })?;
        Ok(RecipeCandidate {
            title: read(row, "title")?,
            ingredients: read(row, "ingredients")?,
            preparation: read(row, "preparation")?,
            calories: read(row, "calories")?,
            prep_time: read(row, "prep_time")?,
            restriction: read(row, "restriction")?,
            preference: read(row, "preference")?,
            slot,
            label: read(row, "label")?,
        })
    }
}

fn read<'r, T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>>(
    row: &'r SqliteRow,
    column: &str,
) -> EngineResult<T> {
    row.try_get(column)
        .map_err(|e| EngineError::Repository(format!("failed to read column {column}: {e}")))
}

#[async_trait::async_trait]
impl CandidateRepository for RecipeStore {
    async fn find_candidates(
        &self,
        label: &str,
        slot: MealSlot,
        filter: &CandidateFilter,
    ) -> EngineResult<Vec<RecipeCandidate>> {
        // OR-composition over bound parameters; only the placeholder
        // skeleton is assembled dynamically, never a user-supplied value.
        let restriction_clause = filter
            .restriction_terms()
            .iter()
            .map(|_| "LOWER(rd.name) LIKE '%' || ? || '%'")
            .collect::<Vec<_>>()
            .join(" OR ");

        let mut sql = format!(
            r"
            SELECT r.title, r.ingredients, r.preparation, r.calories, r.prep_time,
                   rd.name AS restriction, p.name AS preference,
                   mt.name AS meal_type, rec.label AS label
            FROM recipes r
            JOIN recommendations rec ON rec.recipe_id = r.id
            JOIN dietary_restrictions rd ON r.restriction_id = rd.id
            JOIN preferences p ON r.preference_id = p.id
            JOIN meal_types mt ON r.meal_type_id = mt.id
            WHERE ({restriction_clause}) AND mt.name = ? AND rec.label = ?
            "
        );
        if filter.preference_term().is_some() {
            sql.push_str(" AND LOWER(p.name) LIKE '%' || ? || '%'");
        }

        let mut query = sqlx::query(&sql);
        for term in filter.restriction_terms() {
            query = query.bind(term);
        }
        query = query.bind(slot.as_str()).bind(label);
        if let Some(term) = filter.preference_term() {
            query = query.bind(term);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| EngineError::Repository(e.to_string()))?;

        rows.iter().map(Self::row_to_candidate).collect()
    }
}
