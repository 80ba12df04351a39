// ABOUTME: Database management for the recipe catalog
// ABOUTME: Owns the SQLite pool and creates the normalized recipe schema at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! # Database Management
//!
//! Pool construction and schema migration for the normalized recipe
//! catalog: lookup tables for restrictions, preferences, and meal types,
//! the recipes table referencing them, and one recommendation label per
//! recipe.

/// Recipe catalog store and candidate queries
pub mod recipes;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Database manager for the recipe catalog
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options =
            if database_url.starts_with("sqlite:") && !database_url.contains(":memory:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_owned()
            };

        // An in-memory SQLite database exists per connection, so the pool
        // must stay on a single connection to see one schema.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&connection_options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_lookups().await?;
        self.migrate_recipes().await?;
        Ok(())
    }

    /// Create the lookup tables
    async fn migrate_lookups(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS dietary_restrictions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS preferences (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS meal_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create the recipes table and its recommendation labels
    async fn migrate_recipes(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                ingredients TEXT NOT NULL,
                preparation TEXT NOT NULL,
                calories REAL,
                prep_time TEXT NOT NULL,
                restriction_id INTEGER NOT NULL REFERENCES dietary_restrictions(id),
                preference_id INTEGER NOT NULL REFERENCES preferences(id),
                meal_type_id INTEGER NOT NULL REFERENCES meal_types(id),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recommendations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                label TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recommendations_label ON recommendations(label)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
