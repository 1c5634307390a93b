//! satura-reasoner: completion-graph construction by forward saturation
//!
//! Given an `Ontology` (concept universe + inclusion/equivalence axioms) and
//! a list of initial concept names, this crate builds a finite model: a graph
//! of abstract individuals, each labeled with the concepts it satisfies,
//! connected by role-labeled edges, such that every axiom and every
//! structural concept obligation is locally satisfied.
//!
//! The driver repeats a pass of four ordered phases until nothing changes:
//!
//! 1. axiom propagation (inclusions and equivalences),
//! 2. concept expansion (existential witnessing + conjunction decomposition),
//! 3. materialization of witnesses staged during phase 2,
//! 4. global conjunction saturation.
//!
//! Nothing is ever removed: concept sets and edge sets only grow, so a pass
//! with no growth is a fixpoint. There is no blocking or cycle detection,
//! so a universe with an unbounded existential obligation (say `A ⊑ ∃r.A`
//! where no existing individual can serve as the witness) makes the pass
//! loop run forever; see `Saturation::run`.

pub mod graph;
pub mod saturate;
pub mod trace;

use thiserror::Error;

pub use graph::{CompletionGraph, Individual, NodeId, RelationEdge};
pub use saturate::Saturation;
pub use trace::GraphSnapshot;

/// Fatal conditions. Both abort the run; neither is recoverable or
/// retryable, since each one signals bad input or a driver bug rather than
/// a transient failure.
#[derive(Debug, Error)]
pub enum ReasonerError {
    /// An initial-concept name with no match (by rendered form) in the
    /// concept universe. Raised before any individual is created.
    #[error("initial concept `{name}` not found in the concept universe")]
    ConceptNotFound { name: String },

    /// A relation edge whose target is neither a live individual nor one
    /// queued for creation in the current pass. Unreachable unless the
    /// driver's witness bookkeeping is broken.
    #[error("orphan relation {source} --{role}--> {target}: target is neither live nor pending")]
    OrphanRelation {
        source: NodeId,
        role: String,
        target: NodeId,
    },
}
