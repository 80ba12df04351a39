// ABOUTME: Shared server resources constructed once at startup
// ABOUTME: Database, classifier artifact, and configuration injected into every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! Server resources
//!
//! Everything a request handler needs, constructed explicitly in the binary
//! and passed by `Arc` into the router — no process-wide globals, so tests
//! can run parallel instances with different stores and classifiers.

use crate::config::ServerConfig;
use crate::database::Database;
use nutriplan_engine::LinearClassifier;
use std::sync::Arc;

/// Shared, read-only state for all request handlers.
pub struct ServerResources {
    /// Recipe catalog database
    pub database: Database,
    /// Loaded classifier artifact.
    ///
    /// `None` when the artifact failed to load at startup; requests then
    /// surface a configuration error instead of retrying the load.
    pub classifier: Option<Arc<LinearClassifier>>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the startup-constructed dependencies.
    #[must_use]
    pub fn new(
        database: Database,
        classifier: Option<Arc<LinearClassifier>>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database,
            classifier,
            config,
        }
    }
}
