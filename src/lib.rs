// ABOUTME: Main library entry point for the Nutriplan meal-plan API
// ABOUTME: HTTP boundary, recipe store, and configuration around the recommendation engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

#![deny(unsafe_code)]

//! # Nutriplan Server
//!
//! HTTP API serving personalized multi-day meal plans. A request carries a
//! user profile (age, weight, height, dietary restrictions, taste
//! preference, day count); the server derives classifier features per meal
//! slot, predicts a recommendation label, retrieves matching recipes from
//! the catalog, and assembles a plan with calorie totals through
//! [`nutriplan_engine`].
//!
//! ## Architecture
//!
//! - **Engine** (`crates/nutriplan-engine`): pure feature derivation,
//!   classification, anti-repeat selection, and aggregation
//! - **Database**: SQLite recipe catalog behind the engine's repository port
//! - **Routes**: the recommendations endpoint plus health probes
//! - **Config**: environment-based settings loaded once at startup
//!
//! ## Quick Start
//!
//! 1. Seed a demo catalog and model artifact with `seed-recipes`
//! 2. Start the API with `nutriplan-server`
//! 3. `POST /api/recommendations` with a profile payload

/// Application constants and environment accessors
pub mod constants;

/// Configuration management and environment parsing
pub mod config;

/// Database management for the recipe catalog
pub mod database;

/// Unified error handling with HTTP mapping
pub mod errors;

/// Logging configuration and initialization
pub mod logging;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;
