// ABOUTME: Core domain types for meal-plan recommendation
// ABOUTME: User profiles, meal slots, taste preferences, and recipe candidates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Sentinel restriction name meaning "no dietary restriction".
///
/// Stored verbatim in the recipe catalog, so an unrestricted profile is
/// matched against this value rather than against an empty filter.
pub const RESTRICTION_SENTINEL: &str = "ninguna";

/// A named meal occasion within a day.
///
/// The order of [`MealSlot::ORDERED`] drives deterministic plan iteration;
/// it carries no other meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// Morning meal ("Desayuno")
    Breakfast,
    /// Midday meal ("Almuerzo")
    Lunch,
    /// Afternoon snack ("Merienda")
    Snack,
}

impl MealSlot {
    /// Fixed iteration order for plan generation
    pub const ORDERED: [Self; 3] = [Self::Breakfast, Self::Lunch, Self::Snack];

    /// Catalog and wire name for this slot
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "Desayuno",
            Self::Lunch => "Almuerzo",
            Self::Snack => "Merienda",
        }
    }

    /// Parse from the catalog string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Desayuno" => Some(Self::Breakfast),
            "Almuerzo" => Some(Self::Lunch),
            "Merienda" => Some(Self::Snack),
            _ => None,
        }
    }
}

/// Taste preference resolved from the request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    /// Sweet dishes only ("dulce")
    Sweet,
    /// Savory dishes only ("salado")
    Savory,
    /// Both tastes; widens the candidate pool instead of filtering
    Both,
}

impl Preference {
    /// Whether the sweet feature flag is set
    #[must_use]
    pub const fn prefers_sweet(&self) -> bool {
        matches!(self, Self::Sweet | Self::Both)
    }

    /// Whether the savory feature flag is set
    #[must_use]
    pub const fn prefers_savory(&self) -> bool {
        matches!(self, Self::Savory | Self::Both)
    }

    /// Catalog term to filter candidates by.
    ///
    /// `None` for [`Preference::Both`]: both tastes are acceptable, so no
    /// preference filter is applied at all.
    #[must_use]
    pub const fn query_term(&self) -> Option<&'static str> {
        match self {
            Self::Sweet => Some("dulce"),
            Self::Savory => Some("salado"),
            Self::Both => None,
        }
    }
}

/// Validated user profile for one recommendation request.
///
/// Constructed only through [`UserProfile::new`], which enforces the field
/// ranges; immutable afterwards and discarded once the response is built.
#[derive(Debug, Clone)]
pub struct UserProfile {
    age: u32,
    weight_kg: f64,
    height_cm: f64,
    restrictions: Vec<String>,
    preference: Preference,
    days: u32,
}

impl UserProfile {
    /// Validate and build a profile.
    ///
    /// Ranges: age 1-119, weight (0, 300) kg, height (0, 250) cm,
    /// days 1-30. Restrictions may be empty or carry the
    /// [`RESTRICTION_SENTINEL`]; names are matched case-insensitively later.
    pub fn new(
        age: u32,
        weight_kg: f64,
        height_cm: f64,
        restrictions: Vec<String>,
        preference: Preference,
        days: u32,
    ) -> Result<Self, ValidationError> {
        if !(1..=119).contains(&age) {
            return Err(ValidationError::Age { value: age });
        }
        if !(weight_kg > 0.0 && weight_kg < 300.0) {
            return Err(ValidationError::Weight { value: weight_kg });
        }
        if !(height_cm > 0.0 && height_cm < 250.0) {
            return Err(ValidationError::Height { value: height_cm });
        }
        if !(1..=30).contains(&days) {
            return Err(ValidationError::Days { value: days });
        }
        Ok(Self {
            age,
            weight_kg,
            height_cm,
            restrictions,
            preference,
            days,
        })
    }

    /// Age in years
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Weight in kilograms
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Height in centimeters
    #[must_use]
    pub const fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Dietary restriction names as supplied by the user
    #[must_use]
    pub fn restrictions(&self) -> &[String] {
        &self.restrictions
    }

    /// Resolved taste preference
    #[must_use]
    pub const fn preference(&self) -> Preference {
        self.preference
    }

    /// Number of days the plan must cover
    #[must_use]
    pub const fn days(&self) -> u32 {
        self.days
    }

    /// Body-mass index derived from weight and height
    #[must_use]
    pub fn bmi(&self) -> f64 {
        self.weight_kg / (self.height_cm / 100.0).powi(2)
    }

    /// Case-insensitive substring membership check against the restriction
    /// list, e.g. `has_restriction("keto")`.
    #[must_use]
    pub fn has_restriction(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.restrictions
            .iter()
            .any(|r| r.to_lowercase().contains(&needle))
    }

    /// Whether the profile carries no effective restriction (empty list or
    /// the sentinel anywhere in it)
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.restrictions.is_empty() || self.has_restriction(RESTRICTION_SENTINEL)
    }
}

/// Candidate retrieval filter derived once per request from the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    restriction_terms: Vec<String>,
    preference_term: Option<String>,
}

impl CandidateFilter {
    /// Resolve the store filter for a profile.
    ///
    /// An unrestricted profile collapses to a single match on the sentinel;
    /// otherwise every supplied restriction name becomes one OR term. The
    /// preference term is absent for [`Preference::Both`].
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        let restriction_terms = if profile.is_unrestricted() {
            vec![RESTRICTION_SENTINEL.to_owned()]
        } else {
            profile
                .restrictions()
                .iter()
                .map(|r| r.to_lowercase())
                .collect()
        };
        Self {
            restriction_terms,
            preference_term: profile
                .preference()
                .query_term()
                .map(std::borrow::ToOwned::to_owned),
        }
    }

    /// Lowered restriction terms to OR-match; never empty
    #[must_use]
    pub fn restriction_terms(&self) -> &[String] {
        &self.restriction_terms
    }

    /// Concrete preference term, if one should be filtered on
    #[must_use]
    pub fn preference_term(&self) -> Option<&str> {
        self.preference_term.as_deref()
    }
}

/// One recipe row matching a slot's predicted label and filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCandidate {
    /// Dish title; unique within a slot type, used as the repetition key
    pub title: String,
    /// Ingredients text
    pub ingredients: String,
    /// Preparation procedure text
    pub preparation: String,
    /// Calories; `None` counts as 0 in totals but is preserved for display
    pub calories: Option<f64>,
    /// Preparation time as stored in the catalog (free text)
    pub prep_time: String,
    /// Dietary restriction tag
    pub restriction: String,
    /// Taste preference tag
    pub preference: String,
    /// Meal slot this recipe belongs to
    pub slot: MealSlot,
    /// Recommendation label the classifier joined against
    pub label: String,
}
