//! Decision engine: looks up a situation, scores it, classifies the score
//! and records the result.
//!
//! Classification is a single, non-configurable rule:
//! score > 0.65 → APPROVED, otherwise DENIED.
//!
//! Unknown situations are not errors. They have no factors, score 0.0,
//! are DENIED, and are still logged.

use chrono::{DateTime, Utc};

use crate::catalog::SituationCatalog;
use crate::config::OraculoConfig;
use crate::feedback::FeedbackChannel;
use crate::log::DecisionLog;
use crate::registry::PrincipleRegistry;
use crate::scoring::ScoringEngine;
use crate::types::{
    round_score, Contribution, Decision, DecisionLogEntry, DecisionOutcome, Principle,
};

/// One decision session: owns the weights, the catalog and the log.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    registry: PrincipleRegistry,
    catalog: SituationCatalog,
    scorer: ScoringEngine,
    log: DecisionLog,
    fixed_time: Option<DateTime<Utc>>,
}

impl DecisionEngine {
    /// Scores strictly above this are APPROVED. Exactly 0.65 is DENIED.
    ///
    /// A compile-time constant, not configuration.
    pub const APPROVAL_THRESHOLD: f64 = 0.65;

    pub fn new(registry: PrincipleRegistry, catalog: SituationCatalog) -> Self {
        Self {
            registry,
            catalog,
            scorer: ScoringEngine::new(),
            log: DecisionLog::new(),
            fixed_time: None,
        }
    }

    /// Build a session from configuration.
    ///
    /// A configured `determinism.evaluated_at` stamps every log entry of
    /// the session with that time.
    pub fn from_config(config: &OraculoConfig) -> Self {
        let mut engine = Self::new(config.registry(), config.catalog());
        engine.fixed_time = config.determinism.evaluated_at;
        engine
    }

    /// Classify a score against [`Self::APPROVAL_THRESHOLD`].
    pub fn classify(score: f64) -> Decision {
        if score > Self::APPROVAL_THRESHOLD {
            Decision::Approved
        } else {
            Decision::Denied
        }
    }

    /// Decide on a situation and append the result to the log.
    ///
    /// Uses the configured fixed time if any, otherwise the current time.
    /// For explicit timestamps use [`Self::decide_at`].
    pub fn decide(&mut self, situation: &str) -> DecisionOutcome {
        let now = self.fixed_time.unwrap_or_else(Utc::now);
        self.decide_at(situation, now)
    }

    /// Decide on a situation, logging it with the given timestamp.
    ///
    /// The returned score has full precision; the logged score is rounded
    /// to 3 decimals.
    pub fn decide_at(&mut self, situation: &str, timestamp: DateTime<Utc>) -> DecisionOutcome {
        let factors = self.catalog.factors_for(situation);
        if self.catalog.get(situation).is_none() {
            tracing::debug!(situation = %situation, "Unknown situation, no factors");
        }

        let score = self.scorer.score(&factors, &self.registry);
        let decision = Self::classify(score);

        tracing::debug!(
            situation = %situation,
            score,
            decision = %decision,
            "Decision taken"
        );

        self.log.append(DecisionLogEntry {
            timestamp,
            situation: situation.to_string(),
            decision,
            ethical_score: round_score(score),
            factors: factors.clone(),
        });

        DecisionOutcome {
            situation: situation.to_string(),
            decision,
            score,
            factors,
        }
    }

    /// Score breakdown for a situation under the current weights.
    ///
    /// Read-only: nothing is logged.
    pub fn explain(&self, situation: &str) -> Vec<Contribution> {
        let factors = self.catalog.factors_for(situation);
        self.scorer.contributions(&factors, &self.registry)
    }

    /// Write access to the principle weights.
    pub fn feedback(&mut self) -> FeedbackChannel<'_> {
        FeedbackChannel::new(&mut self.registry)
    }

    /// Overwrite a principle weight; `false` if the principle is unknown.
    pub fn apply_feedback(&mut self, principle: &str, weight: f64) -> bool {
        self.feedback().apply(principle, weight)
    }

    /// Situation names in catalog order.
    pub fn list_situations(&self) -> Vec<&str> {
        self.catalog.names()
    }

    /// Principles with their current weights, in registry order.
    pub fn list_principles(&self) -> &[Principle] {
        self.registry.principles()
    }

    pub fn registry(&self) -> &PrincipleRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &SituationCatalog {
        &self.catalog
    }

    pub fn log(&self) -> &DecisionLog {
        &self.log
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(PrincipleRegistry::seeded(), SituationCatalog::seeded())
    }
}
