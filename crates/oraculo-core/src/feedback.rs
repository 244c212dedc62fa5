//! Feedback channel: the only mutation path into the principle registry.

use crate::registry::PrincipleRegistry;

/// Borrowed write access to a session's principle weights.
///
/// Obtained from [`crate::DecisionEngine::feedback`], so a channel can
/// never outlive or alias the engine that owns the registry.
#[derive(Debug)]
pub struct FeedbackChannel<'a> {
    registry: &'a mut PrincipleRegistry,
}

impl<'a> FeedbackChannel<'a> {
    pub fn new(registry: &'a mut PrincipleRegistry) -> Self {
        Self { registry }
    }

    /// Overwrite the weight of a known principle.
    ///
    /// Returns `false` when the principle is unknown; the registry is left
    /// untouched and the caller should report "principle not found".
    /// Weights outside [0.0, 1.0] are accepted but logged.
    pub fn apply(&mut self, principle: &str, weight: f64) -> bool {
        if !(0.0..=1.0).contains(&weight) {
            tracing::warn!(
                principle = %principle,
                weight,
                "Feedback weight outside [0.0, 1.0]"
            );
        }

        let applied = self.registry.set(principle, weight);
        if applied {
            tracing::debug!(principle = %principle, weight, "Feedback applied");
        } else {
            tracing::warn!(principle = %principle, "Feedback rejected: principle not found");
        }
        applied
    }
}
