//! Concept descriptions and the interned concept universe.
//!
//! Concepts are stored once in a `ConceptStore` and referenced everywhere
//! else by `ConceptId` (the same move as a string interner: composite
//! concepts hold the ids of their children, so interning a concept
//! transitively registers its whole sub-concept closure). The reasoner
//! compares concepts by id only; structural equality matters exactly once,
//! at interning time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Concept Model
// ============================================================================

/// Interned concept ID (4 bytes, index into the universe).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct ConceptId(u32);

impl ConceptId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A description-logic class expression.
///
/// The supported fragment is conjunction and existential role restriction
/// over atomic names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Concept {
    Atomic {
        name: String,
    },
    /// Set semantics: conjuncts are sorted by id and deduplicated when the
    /// concept is interned, so two conjunctions over the same member set are
    /// one universe entry.
    Conjunction {
        conjuncts: Vec<ConceptId>,
    },
    Existential {
        role: String,
        filler: ConceptId,
    },
}

// ============================================================================
// Concept Universe
// ============================================================================

/// The concept universe of one ontology.
///
/// Append-only: ids handed out by `intern` stay valid for the store's
/// lifetime and index it densely in insertion order. Because composite
/// concepts can only reference already-interned children, the store always
/// contains the full sub-concept closure of everything in it.
#[derive(Debug, Clone, Default)]
pub struct ConceptStore {
    concepts: Vec<Concept>,
    ids: HashMap<Concept, ConceptId>,
}

impl ConceptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of concepts in the universe.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Intern a concept, returning its id.
    ///
    /// Idempotent: a structurally equal concept maps to the existing entry.
    /// Conjunction members are normalized (sorted by id, deduplicated) first;
    /// a conjunction left with a single member collapses to that member.
    pub fn intern(&mut self, concept: Concept) -> ConceptId {
        let concept = match concept {
            Concept::Conjunction { mut conjuncts } => {
                conjuncts.sort();
                conjuncts.dedup();
                if conjuncts.len() == 1 {
                    return conjuncts[0];
                }
                Concept::Conjunction { conjuncts }
            }
            other => other,
        };

        if let Some(&id) = self.ids.get(&concept) {
            return id;
        }

        let id = ConceptId(self.concepts.len() as u32);
        self.ids.insert(concept.clone(), id);
        self.concepts.push(concept);
        id
    }

    /// Look up a concept by id.
    ///
    /// Ids must come from this store; a foreign id is a caller bug and
    /// panics like any out-of-bounds index.
    pub fn get(&self, id: ConceptId) -> &Concept {
        &self.concepts[id.raw() as usize]
    }

    /// Iterate the universe in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ConceptId, &Concept)> + '_ {
        self.concepts
            .iter()
            .enumerate()
            .map(|(i, c)| (ConceptId(i as u32), c))
    }

    /// Render a concept to its stable, human-readable form.
    ///
    /// - atomic:      `Roll`
    /// - existential: `∃hasIngredient.Cucumber`
    /// - conjunction: `(Roll ⊓ ∃hasIngredient.Cucumber)`
    ///
    /// This string doubles as the concept's *name*: `resolve` matches against
    /// it with exact string equality.
    pub fn render(&self, id: ConceptId) -> String {
        match self.get(id) {
            Concept::Atomic { name } => name.clone(),
            Concept::Existential { role, filler } => {
                format!("∃{role}.{}", self.render(*filler))
            }
            Concept::Conjunction { conjuncts } => {
                let members: Vec<String> = conjuncts.iter().map(|&c| self.render(c)).collect();
                format!("({})", members.join(" ⊓ "))
            }
        }
    }

    /// Resolve a concept by its rendered form.
    ///
    /// Linear scan over the universe; name resolution happens once per run,
    /// at initial-graph construction.
    pub fn resolve(&self, name: &str) -> Option<ConceptId> {
        self.iter()
            .find(|(id, _)| self.render(*id) == name)
            .map(|(id, _)| id)
    }
}

// ============================================================================
// Tests
// ============================================================================
