//! Scoring: combines relevance factors with principle weights.
//!
//! score = Σ weight(principle) × relevance, over the situation's factors.
//! Unknown principles are weighted with [`DEFAULT_PRINCIPLE_WEIGHT`].
//! The result is not normalized; it is a scalar, not a probability.

use crate::registry::{PrincipleRegistry, DEFAULT_PRINCIPLE_WEIGHT};
use crate::types::{Contribution, RelevanceFactors};

/// Weighted dot product of relevance factors and principle weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Ethical score of `factors` under the current `registry` weights.
    ///
    /// Empty factors score 0.0 (positive zero, so it renders as "0.000").
    pub fn score(&self, factors: &RelevanceFactors, registry: &PrincipleRegistry) -> f64 {
        self.contributions(factors, registry)
            .iter()
            .fold(0.0, |acc, c| acc + c.value)
    }

    /// Per-factor breakdown of [`ScoringEngine::score`], in factor key order.
    pub fn contributions(
        &self,
        factors: &RelevanceFactors,
        registry: &PrincipleRegistry,
    ) -> Vec<Contribution> {
        factors
            .iter()
            .map(|(principle, relevance)| {
                let known = registry.get(principle);
                let weight = registry.get_or_default(principle, DEFAULT_PRINCIPLE_WEIGHT);
                if known.is_none() {
                    tracing::debug!(
                        principle = %principle,
                        default = DEFAULT_PRINCIPLE_WEIGHT,
                        "Unknown principle, using default weight"
                    );
                }
                Contribution {
                    principle: principle.clone(),
                    weight,
                    relevance: *relevance,
                    value: weight * relevance,
                    defaulted: known.is_none(),
                }
            })
            .collect()
    }
}
