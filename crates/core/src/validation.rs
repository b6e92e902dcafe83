use serde::Serialize;
use thiserror::Error;

use crate::models::{ItineraryRequest, SafetyRequest, TripRequest};

pub const MAX_DESTINATION_LEN: usize = 100;
pub const MIN_TRIP_DAYS: i64 = 1;
pub const MAX_TRIP_DAYS: i64 = 30;
pub const MAX_BUDGET_LEN: usize = 50;
pub const MAX_INTERESTS_LEN: usize = 500;
pub const MAX_ITINERARY_LEN: usize = 50_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", describe(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    fn check(issues: Vec<FieldIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl TripRequest {
    /// Returns a trimmed copy, or every field that is out of bounds.
    pub fn validate(&self) -> Result<TripRequest, ValidationError> {
        let destination = self.destination.trim();
        let budget = self.budget.trim();
        let interests = self.interests.trim();
        let mut issues = Vec::new();

        bounded_text(
            &mut issues,
            "destination",
            destination,
            MAX_DESTINATION_LEN,
            ("Destination is required", "Destination too long"),
        );
        if self.duration < MIN_TRIP_DAYS {
            issues.push(issue("duration", "Duration must be at least 1 day"));
        } else if self.duration > MAX_TRIP_DAYS {
            issues.push(issue("duration", "Duration cannot exceed 30 days"));
        }
        bounded_text(
            &mut issues,
            "budget",
            budget,
            MAX_BUDGET_LEN,
            ("Budget is required", "Budget description too long"),
        );
        if interests.chars().count() > MAX_INTERESTS_LEN {
            issues.push(issue("interests", "Interests description too long"));
        }

        ValidationError::check(issues)?;
        Ok(TripRequest {
            destination: destination.to_string(),
            duration: self.duration,
            budget: budget.to_string(),
            interests: interests.to_string(),
        })
    }
}

impl ItineraryRequest {
    pub fn validate(&self) -> Result<ItineraryRequest, ValidationError> {
        let itinerary = self.itinerary.trim();
        let mut issues = Vec::new();
        bounded_text(
            &mut issues,
            "itinerary",
            itinerary,
            MAX_ITINERARY_LEN,
            ("Itinerary is required", "Itinerary too long"),
        );

        ValidationError::check(issues)?;
        Ok(ItineraryRequest {
            itinerary: itinerary.to_string(),
        })
    }
}

impl SafetyRequest {
    /// Accepts two ASCII letters in any case and upper-cases them.
    pub fn validate(&self) -> Result<SafetyRequest, ValidationError> {
        let code = self.country_code.trim();

        if code.chars().count() != 2 {
            return Err(ValidationError {
                issues: vec![issue("countryCode", "Country code must be 2 characters")],
            });
        }
        if !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(ValidationError {
                issues: vec![issue("countryCode", "Country code must be 2 letters")],
            });
        }

        Ok(SafetyRequest {
            country_code: code.to_ascii_uppercase(),
        })
    }
}

fn bounded_text(
    issues: &mut Vec<FieldIssue>,
    field: &'static str,
    value: &str,
    max_chars: usize,
    (missing, too_long): (&'static str, &'static str),
) {
    if value.is_empty() {
        issues.push(issue(field, missing));
    } else if value.chars().count() > max_chars {
        issues.push(issue(field, too_long));
    }
}

fn issue(field: &'static str, message: &'static str) -> FieldIssue {
    FieldIssue { field, message }
}
