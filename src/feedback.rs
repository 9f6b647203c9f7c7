//! Self-rating feedback collected once the turn limit is reached

use serde::{Deserialize, Serialize};
use std::fmt;

/// A slider value in `[1, 5]`, defaulting to the midpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Construct from a raw value, rejecting anything outside `[1, 5]`
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Construct from a raw value, clamping into `[1, 5]`
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// The five frozen rating values, immutable after submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRatings {
    pub technical: Rating,
    pub communication: Rating,
    pub problem_solving: Rating,
    pub culture_fit: Rating,
    pub confidence: Rating,
}

impl FeedbackRatings {
    /// Confirmation text shown after submission, listing all five values
    pub fn summary(&self) -> String {
        format!(
            "Thank you for your feedback!\n\n\
             Technical Skills: {}\n\
             Communication: {}\n\
             Problem Solving: {}\n\
             Culture Fit: {}\n\
             Confidence: {}",
            self.technical,
            self.communication,
            self.problem_solving,
            self.culture_fit,
            self.confidence,
        )
    }
}

impl Default for FeedbackRatings {
    fn default() -> Self {
        FeedbackForm::new().freeze()
    }
}

/// Mutable buffer backing the five sliders, all defaulting to 3
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackForm {
    pub technical: Rating,
    pub communication: Rating,
    pub problem_solving: Rating,
    pub culture_fit: Rating,
    pub confidence: Rating,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze the slider values into an immutable [`FeedbackRatings`].
    pub fn freeze(self) -> FeedbackRatings {
        FeedbackRatings {
            technical: self.technical,
            communication: self.communication,
            problem_solving: self.problem_solving,
            culture_fit: self.culture_fit,
            confidence: self.confidence,
        }
    }
}
