//! Situation catalog: static lookup from situation name to relevance factors.
//!
//! The catalog never fails. An unrecognized name yields an empty factor
//! map, which scores 0.0 and is therefore DENIED.

use serde::{Deserialize, Serialize};

use crate::types::{RelevanceFactors, Situation};

/// Seed situations in declaration order.
pub const SEED_SITUATIONS: &[(&str, &[(&str, f64)])] = &[
    (
        "manifestacion",
        &[
            ("libertad_expresion", 0.9),
            ("cohesion_social", 0.6),
            ("seguridad", 0.7),
        ],
    ),
    ("corte_energia", &[("vida_humana", 0.8), ("seguridad", 0.6)]),
    ("vigilancia_festival", &[("privacidad", 0.9), ("seguridad", 0.8)]),
    (
        "uso_drones",
        &[("privacidad", 0.8), ("seguridad", 0.85), ("vida_humana", 0.5)],
    ),
    (
        "crisis_alimentos",
        &[
            ("vida_humana", 0.95),
            ("cohesion_social", 0.8),
            ("seguridad", 0.6),
        ],
    ),
];

/// Fixed, ordered table of situations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "Vec<Situation>", into = "Vec<Situation>")]
pub struct SituationCatalog {
    situations: Vec<Situation>,
}

impl SituationCatalog {
    /// Build a catalog from situations in the order given.
    ///
    /// A later duplicate name is ignored.
    pub fn new(situations: impl IntoIterator<Item = Situation>) -> Self {
        let mut catalog = Self { situations: Vec::new() };
        for situation in situations {
            if catalog.get(&situation.name).is_none() {
                catalog.situations.push(situation);
            }
        }
        catalog
    }

    /// The five seed situations with their exact relevance factors.
    pub fn seeded() -> Self {
        Self::new(
            SEED_SITUATIONS
                .iter()
                .map(|(name, pairs)| Situation::from_pairs(*name, pairs)),
        )
    }

    pub fn get(&self, name: &str) -> Option<&Situation> {
        self.situations.iter().find(|s| s.name == name)
    }

    /// Relevance factors for a situation, empty when the name is unknown.
    pub fn factors_for(&self, name: &str) -> RelevanceFactors {
        self.get(name)
            .map(|s| s.factors.clone())
            .unwrap_or_default()
    }

    /// Situation names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.situations.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn situations(&self) -> &[Situation] {
        &self.situations
    }

    pub fn len(&self) -> usize {
        self.situations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.situations.is_empty()
    }
}

impl From<Vec<Situation>> for SituationCatalog {
    fn from(items: Vec<Situation>) -> Self {
        Self::new(items)
    }
}

impl From<SituationCatalog> for Vec<Situation> {
    fn from(value: SituationCatalog) -> Self {
        value.situations
    }
}

impl Default for SituationCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}
