// ABOUTME: Meal-plan recommendation engine crate for the Nutriplan platform
// ABOUTME: Pure feature derivation, classification, selection, and plan aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

//! # Nutriplan Engine
//!
//! Turns a validated user profile into a multi-day meal plan:
//! per-(day, slot) feature records, a predicted recommendation label, a
//! filtered candidate pool, anti-repeat selection, and calorie aggregation.
//!
//! The crate owns no I/O beyond loading the classifier artifact. Recipe
//! retrieval goes through the [`repository::CandidateRepository`] port,
//! which the server crate implements against its store; tests supply
//! in-memory stubs and a seeded sampler for exact assertions.

/// Classifier port and the linear-model artifact adapter
pub mod classifier;
/// Plan generation orchestrator
pub mod engine;
/// Error taxonomy for plan generation
pub mod error;
/// Feature derivation from profile and slot
pub mod features;
/// Core domain types
pub mod models;
/// Plan accumulation and the nutrition summary
pub mod plan;
/// Candidate repository port
pub mod repository;
/// Anti-repeat selection policy and history
pub mod selection;

pub use classifier::{Classifier, LinearClassifier, ModelArtifact};
pub use engine::MealPlanEngine;
pub use error::{EngineError, EngineResult, ValidationError};
pub use features::{FeatureBuilder, FeatureRecord};
pub use models::{
    CandidateFilter, MealSlot, Preference, RecipeCandidate, UserProfile, RESTRICTION_SENTINEL,
};
pub use plan::{DayPlan, NutritionSummary, PlanAggregator, PlannedMeal, SlotChoice, WeekPlan};
pub use repository::CandidateRepository;
pub use selection::{SelectionHistory, SelectionPolicy};
