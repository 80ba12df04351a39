// ABOUTME: Main server binary for the Nutriplan meal-plan API
// ABOUTME: Loads configuration, database, and the classifier artifact, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! # Nutriplan API Server Binary
//!
//! Starts the meal-plan recommendation API: environment configuration,
//! catalog database with migrations, classifier artifact load, HTTP serve.
//! A failed artifact load is logged and the server still starts — every
//! recommendation request then returns a configuration error until the
//! artifact is fixed and the process restarted.

use anyhow::Result;
use clap::Parser;
use nutriplan_engine::LinearClassifier;
use nutriplan_server::{
    config::environment::ServerConfig, database::Database, logging, resources::ServerResources,
    routes,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "nutriplan-server")]
#[command(about = "Nutriplan API - personalized meal-plan recommendations")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Override classifier artifact path
    #[arg(long)]
    model_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }
    if let Some(model_path) = args.model_path {
        config.model_path = model_path.into();
    }

    logging::init_from_env()?;

    info!("Starting Nutriplan API");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", config.database_url);

    let classifier = match LinearClassifier::from_path(&config.model_path) {
        Ok(model) => {
            info!(
                labels = model.labels().len(),
                "Classifier artifact loaded from {}",
                config.model_path.display()
            );
            Some(Arc::new(model))
        }
        Err(e) => {
            error!(
                "Failed to load classifier artifact from {}: {e}",
                config.model_path.display()
            );
            None
        }
    };

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(
        database,
        classifier,
        Arc::new(config),
    ));
    let app = routes::router(resources);

    let addr = SocketAddr::from(([0, 0, 0, 0], http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
