// ABOUTME: Application constants grouped by domain
// ABOUTME: Environment variable accessors, defaults, and service identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! Constants module
//!
//! Environment-derived settings live behind small accessor functions so the
//! variable names and defaults stay in one place.

use std::env;

/// Service identity strings
pub mod service_names {
    /// Main HTTP server
    pub const NUTRIPLAN_SERVER: &str = "nutriplan-server";
}

/// Default values used when the environment is silent
pub mod defaults {
    /// HTTP port the API listens on
    pub const HTTP_PORT: u16 = 8080;
    /// SQLite database location
    pub const DATABASE_URL: &str = "sqlite:./data/nutriplan.db";
    /// Classifier artifact location
    pub const MODEL_PATH: &str = "./data/classifier.json";
}

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env};

    /// Get HTTP server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::HTTP_PORT)
    }

    /// Get database URL from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DATABASE_URL.to_owned())
    }

    /// Get classifier artifact path from environment or default
    #[must_use]
    pub fn model_path() -> String {
        env::var("MODEL_PATH").unwrap_or_else(|_| defaults::MODEL_PATH.to_owned())
    }
}
