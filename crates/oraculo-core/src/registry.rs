//! Principle registry: the adjustable importance weights.
//!
//! The key set is fixed when the registry is built. Feedback may overwrite
//! the weight of a known principle but never adds a new one.

use serde::{Deserialize, Serialize};

use crate::types::Principle;

/// Weight used when scoring meets a principle the registry does not know.
pub const DEFAULT_PRINCIPLE_WEIGHT: f64 = 0.5;

/// Seed principles in declaration order.
pub const SEED_PRINCIPLES: &[(&str, f64)] = &[
    ("vida_humana", 0.9),
    ("privacidad", 0.7),
    ("seguridad", 0.8),
    ("libertad_expresion", 0.6),
    ("cohesion_social", 0.75),
];

/// Ordered mapping from principle name to importance weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<Principle>", into = "Vec<Principle>")]
pub struct PrincipleRegistry {
    principles: Vec<Principle>,
}

impl PrincipleRegistry {
    /// Build a registry from principles in the order given.
    ///
    /// A later duplicate name is ignored so the key set stays unique;
    /// configuration validation rejects duplicates before this point.
    pub fn new(principles: impl IntoIterator<Item = Principle>) -> Self {
        let mut registry = Self { principles: Vec::new() };
        for principle in principles {
            if !registry.contains(&principle.name) {
                registry.principles.push(principle);
            }
        }
        registry
    }

    /// The five seed principles with their default weights.
    pub fn seeded() -> Self {
        Self::new(
            SEED_PRINCIPLES
                .iter()
                .map(|(name, weight)| Principle::new(*name, *weight)),
        )
    }

    /// Weight of a known principle.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.principles
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.weight)
    }

    /// Weight of a principle, or `default` when it is unknown.
    pub fn get_or_default(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    /// Overwrite the weight of an existing principle.
    ///
    /// Returns `false` and leaves the registry untouched when `name` is not
    /// already a key. The value itself is not range checked.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.principles.iter_mut().find(|p| p.name == name) {
            Some(principle) => {
                principle.weight = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.principles.iter().any(|p| p.name == name)
    }

    /// Principles with their current weights, in declaration order.
    pub fn principles(&self) -> &[Principle] {
        &self.principles
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.principles.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.principles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principles.is_empty()
    }
}

impl From<Vec<Principle>> for PrincipleRegistry {
    fn from(items: Vec<Principle>) -> Self {
        Self::new(items)
    }
}

impl From<PrincipleRegistry> for Vec<Principle> {
    fn from(value: PrincipleRegistry) -> Self {
        value.principles
    }
}

impl Default for PrincipleRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}
