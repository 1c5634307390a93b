//! TBox axioms and the `Ontology` container the reasoner consumes.

use crate::concept::{ConceptId, ConceptStore};
use serde::{Deserialize, Serialize};

/// A terminological axiom over universe concepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Axiom {
    /// `lhs ⊑ rhs`
    Inclusion { lhs: ConceptId, rhs: ConceptId },
    /// All members mutually imply each other. At least two distinct members.
    Equivalence { members: Vec<ConceptId> },
}

/// An ontology: the finite concept universe plus an ordered axiom list.
///
/// Read-only reference data for the reasoner. Only input acquisition (the
/// parser, or test setup) mutates an `Ontology`; the reasoner takes `&self`.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    name: Option<String>,
    universe: ConceptStore,
    axioms: Vec<Axiom>,
}

impl Ontology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn universe(&self) -> &ConceptStore {
        &self.universe
    }

    pub fn universe_mut(&mut self) -> &mut ConceptStore {
        &mut self.universe
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    pub fn add_axiom(&mut self, axiom: Axiom) {
        self.axioms.push(axiom);
    }

    /// Render an axiom in surface form, for reports.
    pub fn render_axiom(&self, axiom: &Axiom) -> String {
        match axiom {
            Axiom::Inclusion { lhs, rhs } => {
                format!("{} ⊑ {}", self.universe.render(*lhs), self.universe.render(*rhs))
            }
            Axiom::Equivalence { members } => members
                .iter()
                .map(|&m| self.universe.render(m))
                .collect::<Vec<_>>()
                .join(" ≡ "),
        }
    }
}
