// ABOUTME: Candidate repository port for recipe retrieval by label, slot, and filters
// ABOUTME: Implemented by the server's recipe store; stubbed in engine tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::error::EngineResult;
use crate::models::{CandidateFilter, MealSlot, RecipeCandidate};

/// Recipe retrieval capability consumed by the plan engine.
///
/// Implementations must apply the filter semantics of
/// [`CandidateFilter`]: OR across restriction terms with case-insensitive
/// substring matching, optional preference term, exact slot and label
/// match. An empty result is a valid, expected outcome — not an error.
#[async_trait::async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Fetch every recipe matching the predicted label, slot, and filters.
    async fn find_candidates(
        &self,
        label: &str,
        slot: MealSlot,
        filter: &CandidateFilter,
    ) -> EngineResult<Vec<RecipeCandidate>>;
}
