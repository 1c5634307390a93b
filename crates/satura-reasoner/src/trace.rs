//! Pass-trace rendering: the observation surface between passes.
//!
//! The driver itself never prints; callers render the graph with `render`
//! after each pass (the CLI does exactly that) or capture a serializable
//! `GraphSnapshot` for artifacts.

use crate::graph::CompletionGraph;
use satura_dsl::Ontology;
use serde::{Deserialize, Serialize};

/// Render the graph as the per-pass textual trace: a separator line, one
/// line per individual in creation order, then one line per relation edge.
///
/// ```text
/// -------------------------
/// A: [CucumberRoll, Roll]
/// B: [Cucumber]
/// A --hasIngredient--> B
/// ```
pub fn render(graph: &CompletionGraph, ontology: &Ontology) -> String {
    let universe = ontology.universe();
    let mut output = String::new();

    output.push_str(&"-".repeat(25));
    output.push('\n');

    for (id, individual) in graph.iter() {
        let concepts: Vec<String> = individual
            .concepts()
            .iter()
            .map(|&concept| universe.render(concept))
            .collect();
        output.push_str(&format!("{id}: [{}]\n", concepts.join(", ")));
    }

    for (id, individual) in graph.iter() {
        for edge in individual.relations() {
            output.push_str(&format!("{id} --{}--> {}\n", edge.role, edge.target));
        }
    }

    output
}

/// Serializable view of a completion graph with rendered concept names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub individuals: Vec<IndividualSnapshot>,
    pub relations: Vec<RelationSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualSnapshot {
    pub id: String,
    pub concepts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSnapshot {
    pub source: String,
    pub role: String,
    pub target: String,
}

impl GraphSnapshot {
    pub fn capture(graph: &CompletionGraph, ontology: &Ontology) -> Self {
        let universe = ontology.universe();

        let individuals = graph
            .iter()
            .map(|(id, individual)| IndividualSnapshot {
                id: id.to_string(),
                concepts: individual
                    .concepts()
                    .iter()
                    .map(|&concept| universe.render(concept))
                    .collect(),
            })
            .collect();

        let relations = graph
            .iter()
            .flat_map(|(id, individual)| {
                individual.relations().iter().map(move |edge| RelationSnapshot {
                    source: id.to_string(),
                    role: edge.role.clone(),
                    target: edge.target.to_string(),
                })
            })
            .collect();

        Self {
            individuals,
            relations,
        }
    }
}
