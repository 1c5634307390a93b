//! Integration tests for the complete satura pipeline:
//! surface syntax → ontology → saturation → trace.
//!
//! Run with: cargo test --test integration_tests

use satura_dsl::{parse_ontology, Axiom, Concept};
use satura_reasoner::{trace, Saturation};

const SUSHI: &str = r#"
-- small enough to saturate by hand, rich enough to hit every phase
ontology Sushi

CucumberRoll ⊑ Roll ⊓ ∃hasIngredient.Cucumber
CucumberRoll ⊑ ∃hasIngredient.Vegetable
PhiladelphiaRoll ⊑ Roll ⊓ ∃hasIngredient.Salmon ⊓ ∃hasIngredient.CreamCheese
Roll ⊑ Sushi
Sushi ⊑ ∃hasBase.Rice
VegetarianRoll ≡ Roll ⊓ ∃hasIngredient.Vegetable
Cucumber ⊑ Vegetable
"#;

#[test]
fn sushi_ontology_saturates_to_the_expected_model() {
    let ontology = parse_ontology(SUSHI).expect("parse");
    let mut saturation =
        Saturation::with_initial(&ontology, &["CucumberRoll", "PhiladelphiaRoll"])
            .expect("initial graph");
    let passes = saturation.run().expect("fixpoint");
    let graph = saturation.graph();

    // two roots, one witness each for Cucumber / Vegetable / Salmon /
    // CreamCheese, and a single Rice witness shared by both rolls
    assert_eq!(passes, 3);
    assert_eq!(graph.len(), 7);
    let edge_count: usize = graph.iter().map(|(_, i)| i.relations().len()).sum();
    assert_eq!(edge_count, 6);

    // the cucumber roll was recognized as a vegetarian roll: the equivalence
    // fired on the conjunction recovered by global saturation
    let universe = ontology.universe();
    let vegetarian = universe.resolve("VegetarianRoll").expect("in universe");
    let (_, cucumber_roll) = graph.iter().next().expect("first root");
    assert!(cucumber_roll.has_concept(vegetarian));

    // both rolls share the same Rice witness
    let rice_targets: Vec<_> = graph
        .iter()
        .flat_map(|(_, individual)| individual.relations())
        .filter(|edge| edge.role == "hasBase")
        .map(|edge| edge.target)
        .collect();
    assert_eq!(rice_targets.len(), 2);
    assert_eq!(rice_targets[0], rice_targets[1]);
}

#[test]
fn saturated_model_satisfies_every_axiom() {
    let ontology = parse_ontology(SUSHI).expect("parse");
    let mut saturation =
        Saturation::with_initial(&ontology, &["CucumberRoll", "PhiladelphiaRoll"])
            .expect("initial graph");
    saturation.run().expect("fixpoint");

    for (_, individual) in saturation.graph().iter() {
        for axiom in ontology.axioms() {
            match axiom {
                Axiom::Inclusion { lhs, rhs } => {
                    if individual.has_concept(*lhs) {
                        assert!(
                            individual.has_concept(*rhs),
                            "{} broken on an individual",
                            ontology.render_axiom(axiom)
                        );
                    }
                }
                Axiom::Equivalence { members } => {
                    let held = members
                        .iter()
                        .filter(|member| individual.has_concept(**member))
                        .count();
                    assert!(held == 0 || held == members.len());
                }
            }
        }
    }
}

#[test]
fn trace_lists_individuals_then_edges() {
    let ontology = parse_ontology(SUSHI).expect("parse");
    let mut saturation =
        Saturation::with_initial(&ontology, &["CucumberRoll"]).expect("initial graph");
    saturation.run().expect("fixpoint");

    let rendered = trace::render(saturation.graph(), &ontology);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "-".repeat(25));
    assert!(lines[1].starts_with("A: [CucumberRoll"));
    assert!(rendered.contains("--hasIngredient--> "));
    assert!(rendered.contains("--hasBase--> "));

    // edge lines come after all individual lines
    let first_edge = lines.iter().position(|l| l.contains("-->")).expect("edges");
    let last_individual = lines
        .iter()
        .rposition(|l| l.contains(": ["))
        .expect("individuals");
    assert!(last_individual < first_edge);
}

#[test]
fn every_existential_in_the_final_model_is_witnessed() {
    let ontology = parse_ontology(SUSHI).expect("parse");
    let mut saturation =
        Saturation::with_initial(&ontology, &["CucumberRoll", "PhiladelphiaRoll"])
            .expect("initial graph");
    saturation.run().expect("fixpoint");
    let graph = saturation.graph();

    for (_, individual) in graph.iter() {
        for &concept in individual.concepts() {
            let Concept::Existential { role, filler } = ontology.universe().get(concept)
            else {
                continue;
            };
            assert!(individual.relations().iter().any(|edge| {
                edge.role == *role
                    && graph
                        .individual(edge.target)
                        .is_some_and(|target| target.has_concept(*filler))
            }));
        }
    }
}
