// ABOUTME: Feature derivation for classifier input from user profile and meal slot
// ABOUTME: Pure mapping; the same profile and slot always produce the same record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::models::{MealSlot, UserProfile};

/// Fixed preparation-time feature, in minutes.
///
/// Represents the user's intended preparation time, decoupled from any
/// recipe's actual time; the classifier was trained with this default.
pub const DEFAULT_PREP_TIME_MINUTES: f64 = 30.0;

/// Restriction names the classifier was trained on.
pub const TRAINED_RESTRICTION_KETO: &str = "keto";
/// See [`TRAINED_RESTRICTION_KETO`].
pub const TRAINED_RESTRICTION_VEGETARIAN: &str = "vegetariano";

/// Number of numeric/binary features ahead of the slot one-hot block.
pub const NUMERIC_FEATURE_COUNT: usize = 7;

/// Classifier input for one (profile, slot) pair.
///
/// Values depend on the profile and slot only — the day index never enters,
/// so records repeat within a day loop and are simply recomputed each time.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// Age in years
    pub age: f64,
    /// Body-mass index
    pub bmi: f64,
    /// Intended preparation time in minutes
    pub prep_time_minutes: f64,
    /// Sweet preference flag
    pub prefers_sweet: bool,
    /// Savory preference flag
    pub prefers_savory: bool,
    /// Keto restriction flag
    pub restricted_keto: bool,
    /// Vegetarian restriction flag
    pub restricted_vegetarian: bool,
    /// Meal slot, passed through as a categorical feature
    pub slot: MealSlot,
}

impl FeatureRecord {
    /// Numeric view of the record, flags as 0/1, in training column order.
    #[must_use]
    pub fn numeric_features(&self) -> [f64; NUMERIC_FEATURE_COUNT] {
        [
            self.age,
            self.bmi,
            self.prep_time_minutes,
            f64::from(u8::from(self.prefers_sweet)),
            f64::from(u8::from(self.prefers_savory)),
            f64::from(u8::from(self.restricted_keto)),
            f64::from(u8::from(self.restricted_vegetarian)),
        ]
    }
}

/// Derives classifier features from a validated profile.
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Build the feature record for one (profile, slot) pair. Pure; no side
    /// effects.
    #[must_use]
    pub fn build(profile: &UserProfile, slot: MealSlot) -> FeatureRecord {
        FeatureRecord {
            age: f64::from(profile.age()),
            bmi: profile.bmi(),
            prep_time_minutes: DEFAULT_PREP_TIME_MINUTES,
            prefers_sweet: profile.preference().prefers_sweet(),
            prefers_savory: profile.preference().prefers_savory(),
            restricted_keto: profile.has_restriction(TRAINED_RESTRICTION_KETO),
            restricted_vegetarian: profile.has_restriction(TRAINED_RESTRICTION_VEGETARIAN),
            slot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Preference;

    fn profile(preference: Preference, restrictions: Vec<&str>) -> UserProfile {
        UserProfile::new(
            35,
            175.0,
            175.0,
            restrictions.into_iter().map(String::from).collect(),
            preference,
            2,
        )
        .unwrap()
    }

    #[test]
    fn build_is_idempotent() {
        let p = profile(Preference::Sweet, vec!["ninguna"]);
        let a = FeatureBuilder::build(&p, MealSlot::Breakfast);
        let b = FeatureBuilder::build(&p, MealSlot::Breakfast);
        assert_eq!(a, b);
    }

    #[test]
    fn sweet_preference_sets_only_sweet_flag() {
        let record = FeatureBuilder::build(&profile(Preference::Sweet, vec![]), MealSlot::Lunch);
        assert!(record.prefers_sweet);
        assert!(!record.prefers_savory);
    }

    #[test]
    fn both_preference_sets_both_flags() {
        let record = FeatureBuilder::build(&profile(Preference::Both, vec![]), MealSlot::Lunch);
        assert!(record.prefers_sweet);
        assert!(record.prefers_savory);
    }

    #[test]
    fn restriction_flags_use_membership_check() {
        let record = FeatureBuilder::build(
            &profile(Preference::Savory, vec!["Keto", "Vegetariano"]),
            MealSlot::Snack,
        );
        assert!(record.restricted_keto);
        assert!(record.restricted_vegetarian);
    }

    #[test]
    fn prep_time_is_the_fixed_default() {
        let record = FeatureBuilder::build(&profile(Preference::Both, vec![]), MealSlot::Breakfast);
        assert!((record.prep_time_minutes - DEFAULT_PREP_TIME_MINUTES).abs() < f64::EPSILON);
    }

    #[test]
    fn numeric_features_keep_training_order() {
        let record = FeatureBuilder::build(&profile(Preference::Sweet, vec![]), MealSlot::Lunch);
        let v = record.numeric_features();
        assert!((v[0] - 35.0).abs() < f64::EPSILON);
        assert!((v[1] - record.bmi).abs() < f64::EPSILON);
        assert!((v[3] - 1.0).abs() < f64::EPSILON);
        assert!((v[4] - 0.0).abs() < f64::EPSILON);
    }
}
