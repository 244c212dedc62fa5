//! Core types for oraculo decisions.
//!
//! These are the data structures shared by the registry, the catalog,
//! the scoring engine and the decision log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Relevance strength per principle for one situation.
///
/// BTreeMap so factors always iterate, sum and render in key order.
pub type RelevanceFactors = BTreeMap<String, f64>;

/// A named ethical value with an adjustable importance weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Principle {
    /// Principle identifier (e.g., "vida_humana")
    pub name: String,

    /// Importance weight, nominally in [0.0, 1.0]
    pub weight: f64,
}

impl Principle {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A fixed scenario and how strongly each principle applies to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Situation {
    /// Situation identifier (e.g., "corte_energia")
    pub name: String,

    /// Relevance factor per principle
    #[serde(default)]
    pub factors: RelevanceFactors,
}

impl Situation {
    /// Build a situation from literal `(principle, relevance)` pairs.
    pub fn from_pairs(name: impl Into<String>, pairs: &[(&str, f64)]) -> Self {
        Self {
            name: name.into(),
            factors: pairs
                .iter()
                .map(|(principle, relevance)| (principle.to_string(), *relevance))
                .collect(),
        }
    }
}

/// The binary outcome of a decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Score strictly above the approval threshold
    Approved,

    /// Score at or below the approval threshold
    Denied,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::Denied => "DENIED",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What `DecisionEngine::decide` hands back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionOutcome {
    /// Situation name exactly as requested
    pub situation: String,

    /// APPROVED or DENIED
    pub decision: Decision,

    /// Full-precision ethical score
    pub score: f64,

    /// Factors the score was computed from (empty for unknown situations)
    pub factors: RelevanceFactors,
}

impl DecisionOutcome {
    /// Score rounded the way it is logged and shown to users.
    pub fn display_score(&self) -> f64 {
        round_score(self.score)
    }
}

/// One immutable record in the decision log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionLogEntry {
    /// When the decision was taken
    pub timestamp: DateTime<Utc>,

    /// Situation name exactly as requested
    pub situation: String,

    /// APPROVED or DENIED
    pub decision: Decision,

    /// Ethical score rounded to 3 decimals
    pub ethical_score: f64,

    /// Factors used for the decision
    pub factors: RelevanceFactors,
}

/// Per-principle term of an ethical score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contribution {
    /// Principle named by the factor
    pub principle: String,

    /// Weight applied (registry value or the default)
    pub weight: f64,

    /// Relevance factor from the situation
    pub relevance: f64,

    /// `weight * relevance`
    pub value: f64,

    /// True when the principle is unknown to the registry
    pub defaulted: bool,
}

/// Round a score to 3 decimal places.
///
/// Rounds from the exact decimal value of `score` (ties to even), so a
/// double stored just below a .0005 boundary rounds down.
pub fn round_score(score: f64) -> f64 {
    format!("{:.3}", score).parse().unwrap_or(score)
}
