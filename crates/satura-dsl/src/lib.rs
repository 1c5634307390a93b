//! satura ontology model
//!
//! This crate owns everything the reasoner consumes as read-only reference
//! data: the concept variants, the interned concept universe, the stable
//! concept formatter, the axiom model, and the parser for the small DL
//! surface syntax.
//!
//! The reasoner itself (`satura-reasoner`) never parses text and never
//! inspects syntax; it works purely over `ConceptId`s drawn from a
//! `ConceptStore` and the typed `Axiom` list of an `Ontology`.

pub mod concept;
pub mod parser;
pub mod tbox;

pub use concept::{Concept, ConceptId, ConceptStore};
pub use parser::{parse_ontology, ParseError};
pub use tbox::{Axiom, Ontology};
