// ABOUTME: Configuration module organization for the Nutriplan server
// ABOUTME: Environment-based settings with typed level and environment enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! Configuration management

/// Environment-based server configuration
pub mod environment;

pub use environment::{Environment, LogLevel, ServerConfig};
