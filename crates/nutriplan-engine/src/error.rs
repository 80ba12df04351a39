// ABOUTME: Error taxonomy for meal-plan generation with structured context
// ABOUTME: Defines ValidationError for profile fields and EngineError for the generation pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan

use crate::models::MealSlot;

/// Field-level validation failures for a user profile.
///
/// Each variant carries the offending value so callers can return
/// actionable messages without re-deriving context.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Age outside the accepted range
    #[error("age must be between 1 and 119, got {value}")]
    Age {
        /// Rejected age value
        value: u32,
    },

    /// Weight outside the accepted range
    #[error("weight must be greater than 0 and less than 300 kg, got {value}")]
    Weight {
        /// Rejected weight in kilograms
        value: f64,
    },

    /// Height outside the accepted range
    #[error("height must be greater than 0 and less than 250 cm, got {value}")]
    Height {
        /// Rejected height in centimeters
        value: f64,
    },

    /// Day count outside the accepted range
    #[error("day count must be between 1 and 30, got {value}")]
    Days {
        /// Rejected day count
        value: u32,
    },
}

/// Errors raised while generating a meal plan.
///
/// Validation failures short-circuit before any engine work begins; every
/// other variant aborts the in-progress plan without partial output.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Profile failed range validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The classifier artifact was never loaded
    #[error("the recommendation model is not available")]
    ClassifierUnavailable,

    /// The classifier artifact could not be loaded or is inconsistent
    #[error("recommendation model error: {0}")]
    Model(String),

    /// A slot's filtered candidate query returned nothing to select from
    #[error("no recipes available for {} with the selected filters", .slot.as_str())]
    NoCandidates {
        /// Meal slot whose candidate pool was empty
        slot: MealSlot,
    },

    /// Recipe store connectivity or query failure
    #[error("recipe store error: {0}")]
    Repository(String),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_candidates_names_the_slot() {
        let err = EngineError::NoCandidates {
            slot: MealSlot::Lunch,
        };
        assert!(err.to_string().contains("Almuerzo"));
    }

    #[test]
    fn validation_error_carries_value() {
        let err = ValidationError::Age { value: 120 };
        assert!(err.to_string().contains("120"));
    }
}
