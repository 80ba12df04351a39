// ABOUTME: Stateful recipe selection with anti-repeat history per meal slot
// ABOUTME: Falls back to unrestricted sampling once a slot's pool is exhausted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::error::{EngineError, EngineResult};
use crate::models::{MealSlot, RecipeCandidate};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Titles already chosen per meal slot, accumulated across the ENTIRE plan
/// generation — never reset between days. Request-local; discarded with the
/// response.
#[derive(Debug, Default)]
pub struct SelectionHistory {
    used: HashMap<MealSlot, HashSet<String>>,
}

impl SelectionHistory {
    /// Empty history for a fresh plan generation
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a title was already chosen for this slot
    #[must_use]
    pub fn is_used(&self, slot: MealSlot, title: &str) -> bool {
        self.used.get(&slot).is_some_and(|titles| titles.contains(title))
    }

    /// Record a chosen title for a slot
    pub fn record(&mut self, slot: MealSlot, title: String) {
        self.used.entry(slot).or_default().insert(title);
    }

    /// Number of distinct titles chosen so far for a slot
    #[must_use]
    pub fn used_count(&self, slot: MealSlot) -> usize {
        self.used.get(&slot).map_or(0, HashSet::len)
    }
}

/// Uniform sampler that avoids repeats until a slot's pool is exhausted.
pub struct SelectionPolicy;

impl SelectionPolicy {
    /// Pick one candidate and record it in the history.
    ///
    /// Candidates whose title is not yet in `history[slot]` are preferred;
    /// once every title has been used at least once across the plan, the
    /// full set is sampled again and repeats are permitted. An empty
    /// candidate set is a terminal error for the whole request.
    pub fn select<R: Rng + ?Sized>(
        rng: &mut R,
        candidates: &[RecipeCandidate],
        slot: MealSlot,
        history: &mut SelectionHistory,
    ) -> EngineResult<RecipeCandidate> {
        let unused: Vec<&RecipeCandidate> = candidates
            .iter()
            .filter(|c| !history.is_used(slot, &c.title))
            .collect();

        let chosen = if unused.is_empty() {
            candidates.choose(rng)
        } else {
            unused.choose(rng).copied()
        }
        .ok_or(EngineError::NoCandidates { slot })?;

        history.record(slot, chosen.title.clone());
        Ok(chosen.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn candidate(title: &str) -> RecipeCandidate {
        RecipeCandidate {
            title: title.to_owned(),
            ingredients: "ingredients".into(),
            preparation: "steps".into(),
            calories: Some(100.0),
            prep_time: "15-30 minutos".into(),
            restriction: "ninguna".into(),
            preference: "dulce".into(),
            slot: MealSlot::Breakfast,
            label: "alta".into(),
        }
    }

    #[test]
    fn empty_pool_is_a_terminal_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut history = SelectionHistory::new();
        let result = SelectionPolicy::select(&mut rng, &[], MealSlot::Lunch, &mut history);
        assert!(matches!(
            result,
            Err(EngineError::NoCandidates {
                slot: MealSlot::Lunch
            })
        ));
    }

    #[test]
    fn no_repeats_until_pool_is_exhausted() {
        let pool: Vec<RecipeCandidate> =
            ["a", "b", "c", "d"].iter().map(|t| candidate(t)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut history = SelectionHistory::new();

        let mut seen = HashSet::new();
        for _ in 0..pool.len() {
            let chosen =
                SelectionPolicy::select(&mut rng, &pool, MealSlot::Breakfast, &mut history)
                    .unwrap();
            assert!(seen.insert(chosen.title), "title repeated before exhaustion");
        }
        assert_eq!(history.used_count(MealSlot::Breakfast), pool.len());

        // Pool exhausted: the next pick must still succeed, now repeating.
        let again =
            SelectionPolicy::select(&mut rng, &pool, MealSlot::Breakfast, &mut history).unwrap();
        assert!(seen.contains(&again.title));
    }

    #[test]
    fn single_candidate_pool_repeats_without_error() {
        let pool = vec![candidate("only")];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut history = SelectionHistory::new();
        for _ in 0..5 {
            let chosen =
                SelectionPolicy::select(&mut rng, &pool, MealSlot::Snack, &mut history).unwrap();
            assert_eq!(chosen.title, "only");
        }
    }

    #[test]
    fn history_is_tracked_per_slot() {
        let pool = vec![candidate("shared")];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut history = SelectionHistory::new();
        SelectionPolicy::select(&mut rng, &pool, MealSlot::Breakfast, &mut history).unwrap();
        assert!(history.is_used(MealSlot::Breakfast, "shared"));
        assert!(!history.is_used(MealSlot::Lunch, "shared"));
    }

    #[test]
    fn seeded_rng_makes_selection_deterministic() {
        let pool: Vec<RecipeCandidate> = ["a", "b", "c"].iter().map(|t| candidate(t)).collect();
        let pick = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut history = SelectionHistory::new();
            SelectionPolicy::select(&mut rng, &pool, MealSlot::Lunch, &mut history)
                .unwrap()
                .title
        };
        assert_eq!(pick(99), pick(99));
    }
}
