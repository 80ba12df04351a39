// ABOUTME: Plan generation orchestrator: features, prediction, retrieval, selection, aggregation
// ABOUTME: Fails fast on the first slot with an empty candidate pool; no partial plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::classifier::Classifier;
use crate::error::EngineResult;
use crate::features::FeatureBuilder;
use crate::models::{CandidateFilter, MealSlot, UserProfile};
use crate::plan::{PlanAggregator, WeekPlan};
use crate::repository::CandidateRepository;
use crate::selection::{SelectionHistory, SelectionPolicy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::debug;

/// Meal-plan generation engine.
///
/// Holds the classifier and recipe repository as injected dependencies —
/// constructed once at startup and shared across requests; all per-request
/// state (history, aggregator) lives inside a single `generate` call.
pub struct MealPlanEngine {
    classifier: Arc<dyn Classifier>,
    repository: Arc<dyn CandidateRepository>,
}

impl MealPlanEngine {
    /// Build an engine from its two collaborators.
    #[must_use]
    pub fn new(classifier: Arc<dyn Classifier>, repository: Arc<dyn CandidateRepository>) -> Self {
        Self {
            classifier,
            repository,
        }
    }

    /// Generate a plan with an entropy-seeded sampler.
    pub async fn generate_plan(&self, profile: &UserProfile) -> EngineResult<WeekPlan> {
        let mut rng = StdRng::from_entropy();
        self.generate_plan_with_rng(profile, &mut rng).await
    }

    /// Generate a plan with a caller-supplied sampler.
    ///
    /// Tests pass a seeded generator here to make selections exact.
    pub async fn generate_plan_with_rng<R: Rng + ?Sized>(
        &self,
        profile: &UserProfile,
        rng: &mut R,
    ) -> EngineResult<WeekPlan> {
        let filter = CandidateFilter::from_profile(profile);
        let mut history = SelectionHistory::new();
        let mut aggregator = PlanAggregator::new();

        for day in 1..=profile.days() {
            for slot in MealSlot::ORDERED {
                let features = FeatureBuilder::build(profile, slot);
                let label = self.classifier.predict(&features)?;
                let candidates = self.repository.find_candidates(&label, slot, &filter).await?;
                debug!(
                    day,
                    slot = slot.as_str(),
                    label = %label,
                    candidates = candidates.len(),
                    "retrieved candidate pool"
                );
                let chosen = SelectionPolicy::select(rng, &candidates, slot, &mut history)?;
                aggregator.add(day, slot, &chosen);
            }
        }

        Ok(aggregator.finalize(profile.days()))
    }
}
