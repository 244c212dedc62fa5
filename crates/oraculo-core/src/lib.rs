//! # oraculo-core
//!
//! Principle-weighted decision engine.
//!
//! Given a named situation, the engine looks up how relevant each ethical
//! principle is to it, combines those relevance factors with the session's
//! adjustable principle weights, and thresholds the weighted sum into
//! APPROVED or DENIED.
//!
//! ## Key Guarantees
//!
//! 1. **Infallible**: unknown situations and principles degrade to defined
//!    outputs, never errors
//! 2. **Owned state**: weights and the decision log belong to one
//!    [`DecisionEngine`] per session; no globals
//! 3. **Append-only log**: every decision is recorded, none is edited
//!
//! ## Example
//!
//! ```rust
//! use oraculo_core::{Decision, DecisionEngine};
//!
//! let mut engine = DecisionEngine::default();
//!
//! let outcome = engine.decide("corte_energia");
//! assert_eq!(outcome.decision, Decision::Approved);
//!
//! assert!(engine.apply_feedback("vida_humana", 0.1));
//! assert!(!engine.apply_feedback("nonexistent_principle", 0.5));
//! assert_eq!(engine.log().len(), 1);
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod feedback;
pub mod log;
pub mod registry;
pub mod scoring;
pub mod types;

// Re-export main types at crate root
pub use catalog::{SituationCatalog, SEED_SITUATIONS};
pub use config::{ConfigError, DeterminismConfig, OraculoConfig};
pub use engine::DecisionEngine;
pub use feedback::FeedbackChannel;
pub use log::DecisionLog;
pub use registry::{PrincipleRegistry, DEFAULT_PRINCIPLE_WEIGHT, SEED_PRINCIPLES};
pub use scoring::ScoringEngine;
pub use types::{
    round_score, Contribution, Decision, DecisionLogEntry, DecisionOutcome, Principle,
    RelevanceFactors, Situation,
};

/// End-to-end session tests across registry, catalog, scoring and feedback.
#[cfg(test)]
mod session_tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const CUSTOM_CONFIG: &str = r#"
principles:
  - name: vida_humana
    weight: 0.9
  - name: seguridad
    weight: 0.5
situations:
  - name: evacuacion
    factors:
      vida_humana: 0.7
      seguridad: 0.2
  - name: patrulla
    factors:
      seguridad: 0.9
      privacidad: 0.6
determinism:
  evaluated_at: "2025-12-20T10:00:00Z"
"#;

    #[test]
    fn test_custom_session() {
        let config = OraculoConfig::from_yaml(CUSTOM_CONFIG).unwrap();
        let mut engine = DecisionEngine::from_config(&config);

        assert_eq!(engine.list_situations(), vec!["evacuacion", "patrulla"]);

        // 0.9*0.7 + 0.5*0.2 = 0.73
        let evacuacion = engine.decide("evacuacion");
        assert_eq!(evacuacion.decision, Decision::Approved);

        // privacidad is not a configured principle: 0.5*0.9 + 0.5*0.6 = 0.75
        let patrulla = engine.decide("patrulla");
        assert!((patrulla.score - 0.75).abs() < 1e-9);
        assert_eq!(patrulla.decision, Decision::Approved);

        // Feedback cannot add the missing principle
        assert!(!engine.apply_feedback("privacidad", 0.0));
        assert!(!engine.registry().contains("privacidad"));

        assert!(engine.apply_feedback("seguridad", 0.1));
        let patrulla = engine.decide("patrulla");
        assert_eq!(patrulla.decision, Decision::Denied);

        let fixed = Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap();
        assert_eq!(engine.log().len(), 3);
        assert!(engine.log().iter().all(|e| e.timestamp == fixed));
    }

    #[test]
    fn test_feedback_can_flip_a_decision() {
        let mut engine = DecisionEngine::default();

        // 0.7*0.9 + 0.8*0.8 = 1.27
        assert_eq!(engine.decide("vigilancia_festival").decision, Decision::Approved);

        engine.apply_feedback("privacidad", 0.0);
        engine.apply_feedback("seguridad", 0.0);
        let outcome = engine.decide("vigilancia_festival");
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.decision, Decision::Denied);

        let decisions: Vec<Decision> = engine.log().iter().map(|e| e.decision).collect();
        assert_eq!(decisions, vec![Decision::Approved, Decision::Denied]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut first = DecisionEngine::default();
        let mut second = DecisionEngine::default();

        first.apply_feedback("vida_humana", 0.0);
        first.decide("corte_energia");

        assert_eq!(second.registry().get("vida_humana"), Some(0.9));
        assert!(second.log().is_empty());
        assert_eq!(second.decide("corte_energia").decision, Decision::Approved);
    }

    #[test]
    fn test_log_entry_json_shape() {
        let mut engine = DecisionEngine::default();
        let at = Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap();
        engine.decide_at("crisis_alimentos", at);

        let json = serde_json::to_value(engine.log().last().unwrap()).unwrap();
        assert_eq!(json["situation"], "crisis_alimentos");
        assert_eq!(json["decision"], "APPROVED");
        assert_eq!(json["ethical_score"], 1.935);
        assert_eq!(json["timestamp"], "2025-12-20T10:00:00Z");
        assert_eq!(json["factors"]["vida_humana"], 0.95);
    }
}
