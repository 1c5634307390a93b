use proptest::prelude::*;
use satura_dsl::parse_ontology;

/// Random concept expressions in surface syntax: atoms, existentials over
/// them, and conjunctions of two or three members.
fn concept_text() -> impl Strategy<Value = String> {
    let leaf = "[A-Z][a-z]{0,4}".prop_map(|s| s);
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            ("[a-z]{1,6}", inner.clone())
                .prop_map(|(role, filler)| format!("∃{role}.{filler}")),
            prop::collection::vec(inner, 2..4)
                .prop_map(|members| format!("({})", members.join(" ⊓ "))),
        ]
    })
}

proptest! {
    // Whatever the parser interns renders back to a form the parser
    // accepts and resolves to a universe member.
    #[test]
    fn rendered_concepts_reparse_and_resolve(expr in concept_text()) {
        let ontology = parse_ontology(&format!("Seed ⊑ {expr}")).unwrap();
        for (id, _) in ontology.universe().iter() {
            let rendered = ontology.universe().render(id);
            let reparsed = parse_ontology(&format!("Seed ⊑ {rendered}")).unwrap();
            prop_assert!(reparsed.universe().resolve(&rendered).is_some());
        }
    }

    // Interning is stable: parsing the same axiom twice grows nothing.
    #[test]
    fn reparsing_is_idempotent(expr in concept_text()) {
        let once = parse_ontology(&format!("Seed ⊑ {expr}")).unwrap();
        let twice =
            parse_ontology(&format!("Seed ⊑ {expr}\nSeed ⊑ {expr}")).unwrap();
        prop_assert_eq!(once.universe().len(), twice.universe().len());
    }
}
