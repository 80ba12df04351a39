// ABOUTME: Route module organization for Nutriplan HTTP endpoints
// ABOUTME: Assembles the router with tracing and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! Route module for the Nutriplan server
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the engine and store layers.

/// Health check and system status routes
pub mod health;
/// Meal-plan recommendation routes
pub mod recommendations;

pub use health::HealthRoutes;
pub use recommendations::RecommendationRoutes;

use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router.
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(RecommendationRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
