//! The fixpoint driver: four ordered phases per pass, repeated until a pass
//! changes nothing.
//!
//! Phase order matters: each phase sees the propagation of the phases before
//! it in the same pass, and the outer loop (not any within-phase fixpoint)
//! is what carries effects discovered late in a pass back to the start.

use crate::graph::{CompletionGraph, Individual, NodeId};
use crate::ReasonerError;
use satura_dsl::{Axiom, Concept, ConceptId, Ontology};

/// An existential witness staged for creation at the end of a pass.
///
/// Phase 2 never mutates the population it is scanning; it queues new
/// individuals here (ids already drawn) and phase 3 drains the queue in id
/// order, attaching the deferred edge to the individual that needed the
/// witness.
struct PendingIndividual {
    id: NodeId,
    individual: Individual,
    origin: NodeId,
    role: String,
}

fn find_queued_witness(queue: &[PendingIndividual], filler: ConceptId) -> Option<NodeId> {
    queue
        .iter()
        .find(|pending| pending.individual.has_concept(filler))
        .map(|pending| pending.id)
}

/// Saturation driver over one completion graph.
///
/// The ontology is read-only reference data; the graph is owned by the
/// driver for the duration of the run.
pub struct Saturation<'a> {
    ontology: &'a Ontology,
    graph: CompletionGraph,
    passes: usize,
}

impl<'a> Saturation<'a> {
    pub fn new(ontology: &'a Ontology, graph: CompletionGraph) -> Self {
        Self {
            ontology,
            graph,
            passes: 0,
        }
    }

    /// Resolve the initial concept names and set up the driver in one step.
    pub fn with_initial<S: AsRef<str>>(
        ontology: &'a Ontology,
        initial: &[S],
    ) -> Result<Self, ReasonerError> {
        Ok(Self::new(ontology, CompletionGraph::new(ontology, initial)?))
    }

    pub fn graph(&self) -> &CompletionGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut CompletionGraph {
        &mut self.graph
    }

    /// Passes executed so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn into_graph(self) -> CompletionGraph {
        self.graph
    }

    /// Run one full pass. Returns whether the graph changed.
    pub fn step(&mut self) -> Result<bool, ReasonerError> {
        self.graph.begin_pass();
        self.propagate_axioms();
        let queue = self.expand_concepts()?;
        self.materialize(queue);
        self.saturate_conjunctions();
        self.passes += 1;
        tracing::debug!(
            pass = self.passes,
            individuals = self.graph.len(),
            changed = self.graph.has_changed(),
            "saturation pass complete"
        );
        Ok(self.graph.has_changed())
    }

    /// Run passes until a fixpoint; returns the number of passes executed
    /// (including the final, unchanged one).
    ///
    /// There is no blocking or cycle detection: a universe with an unbounded
    /// existential obligation keeps materializing fresh witnesses and this
    /// never returns. Callers that cannot rule that out should drive `step`
    /// themselves under an external pass bound.
    pub fn run(&mut self) -> Result<usize, ReasonerError> {
        while self.step()? {}
        Ok(self.passes)
    }

    /// Like `run`, invoking `observer` after every pass (fixpoint pass
    /// included). Same non-termination caveat.
    pub fn run_traced<F>(&mut self, mut observer: F) -> Result<usize, ReasonerError>
    where
        F: FnMut(usize, &CompletionGraph),
    {
        loop {
            let changed = self.step()?;
            observer(self.passes, &self.graph);
            if !changed {
                return Ok(self.passes);
            }
        }
    }

    // ------------------------------------------------------------------
    // Phase 1: axiom propagation
    // ------------------------------------------------------------------

    /// One linear scan over axioms × individuals. No within-phase fixpoint:
    /// anything this scan misses, the next pass picks up.
    fn propagate_axioms(&mut self) {
        let ontology = self.ontology;
        let mut changed = false;

        for axiom in ontology.axioms() {
            match axiom {
                Axiom::Inclusion { lhs, rhs } => {
                    for individual in self.graph.individuals_mut() {
                        if individual.has_concept(*lhs) {
                            changed |= individual.assert_concept(*rhs);
                        }
                    }
                }
                Axiom::Equivalence { members } => {
                    for individual in self.graph.individuals_mut() {
                        if members.iter().any(|member| individual.has_concept(*member)) {
                            for member in members {
                                changed |= individual.assert_concept(*member);
                            }
                        }
                    }
                }
            }
        }

        if changed {
            self.graph.mark_changed();
        }
    }

    // ------------------------------------------------------------------
    // Phase 2: concept expansion
    // ------------------------------------------------------------------

    /// Walk every concept of every individual; decompose conjunctions in
    /// place and find or stage a witness for every existential restriction.
    ///
    /// The concept list is walked by index: conjuncts asserted during the
    /// walk are picked up by the same walk, so a nested conjunction unfolds
    /// fully within one pass. The population itself never grows here; new
    /// individuals go through the returned queue.
    fn expand_concepts(&mut self) -> Result<Vec<PendingIndividual>, ReasonerError> {
        let ontology = self.ontology;
        let mut queue: Vec<PendingIndividual> = Vec::new();
        let mut changed = false;

        for index in 0..self.graph.len() {
            let source = NodeId::from_index(index);
            let mut cursor = 0;
            while cursor < self.graph.node(source).concepts().len() {
                let concept = self.graph.node(source).concepts()[cursor];
                cursor += 1;

                match ontology.universe().get(concept) {
                    Concept::Atomic { .. } => {}
                    Concept::Conjunction { conjuncts } => {
                        let node = self.graph.node_mut(source);
                        for &conjunct in conjuncts {
                            changed |= node.assert_concept(conjunct);
                        }
                    }
                    Concept::Existential { role, filler } => {
                        if self.witnessed(source, role, *filler, &queue)? {
                            continue;
                        }
                        if let Some(target) = self.find_live_witness(*filler) {
                            self.graph.node_mut(source).add_relation(role.clone(), target);
                            changed = true;
                        } else if let Some(target) = find_queued_witness(&queue, *filler) {
                            self.graph.node_mut(source).add_relation(role.clone(), target);
                            changed = true;
                        } else {
                            let id = self.graph.fresh_id();
                            queue.push(PendingIndividual {
                                id,
                                individual: Individual::with_concept(*filler),
                                origin: source,
                                role: role.clone(),
                            });
                        }
                    }
                }
            }
        }

        if changed {
            self.graph.mark_changed();
        }
        Ok(queue)
    }

    /// Whether `source` already has a `role` edge to an individual (live or
    /// queued) carrying `filler`.
    ///
    /// Every edge of `source` is resolved along the way; one that resolves
    /// to neither a live nor a queued individual is an orphan and aborts
    /// the run.
    fn witnessed(
        &self,
        source: NodeId,
        role: &str,
        filler: ConceptId,
        queue: &[PendingIndividual],
    ) -> Result<bool, ReasonerError> {
        for edge in self.graph.node(source).relations() {
            let carries_filler = if let Some(target) = self.graph.individual(edge.target) {
                target.has_concept(filler)
            } else if let Some(pending) = queue.iter().find(|p| p.id == edge.target) {
                pending.individual.has_concept(filler)
            } else {
                return Err(ReasonerError::OrphanRelation {
                    source,
                    role: edge.role.clone(),
                    target: edge.target,
                });
            };

            if carries_filler && edge.role == role {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// First live individual (creation order) carrying `filler`.
    fn find_live_witness(&self, filler: ConceptId) -> Option<NodeId> {
        self.graph
            .iter()
            .find(|(_, individual)| individual.has_concept(filler))
            .map(|(id, _)| id)
    }

    // ------------------------------------------------------------------
    // Phase 3: materialization
    // ------------------------------------------------------------------

    /// Create the staged individuals and attach their deferred edges. No
    /// decision logic; the queue exists only so phase 2 never mutates the
    /// population mid-scan.
    fn materialize(&mut self, queue: Vec<PendingIndividual>) {
        if queue.is_empty() {
            return;
        }
        tracing::debug!(staged = queue.len(), "materializing existential witnesses");
        for pending in queue {
            self.graph.insert(pending.id, pending.individual);
            self.graph
                .node_mut(pending.origin)
                .add_relation(pending.role, pending.id);
            self.graph.mark_changed();
        }
    }

    // ------------------------------------------------------------------
    // Phase 4: global conjunction saturation
    // ------------------------------------------------------------------

    /// For every conjunction in the universe, present on an individual or
    /// not, assert it on every individual that already carries all of its
    /// conjuncts. This closes the case phase 2 cannot reach: a conjunction
    /// that became entailed through independent propagation paths without
    /// ever being asserted itself.
    fn saturate_conjunctions(&mut self) {
        let ontology = self.ontology;
        let mut changed = false;

        for (concept, variant) in ontology.universe().iter() {
            let Concept::Conjunction { conjuncts } = variant else {
                continue;
            };
            for individual in self.graph.individuals_mut() {
                if individual.has_concept(concept) {
                    continue;
                }
                if conjuncts.iter().all(|&c| individual.has_concept(c)) {
                    changed |= individual.assert_concept(concept);
                }
            }
        }

        if changed {
            self.graph.mark_changed();
        }
    }
}
