//! Surface syntax for satura ontologies.
//!
//! Line-oriented: one statement per line, `--` comments, blank lines ignored.
//!
//! ```text
//! -- a tiny ontology
//! ontology Sushi
//!
//! CucumberRoll ⊑ Roll ⊓ ∃hasIngredient.Cucumber
//! VegetarianRoll ≡ Roll ⊓ ∃hasIngredient.Vegetable
//! ```
//!
//! ASCII aliases are accepted everywhere: `<=` for `⊑`, `==` for `≡`, `&`
//! for `⊓`, and `exists r.C` for `∃r.C`. Existentials bind tighter than
//! conjunction, so `∃r.A ⊓ B` is `(∃r.A) ⊓ B`; use parentheses for
//! `∃r.(A ⊓ B)`.
//!
//! Parsing interns every concept (and, transitively, every sub-concept) into
//! one universe, so the produced `Ontology` carries the full sub-concept
//! closure of its axioms.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char as pchar, multispace0, multispace1},
    combinator::{all_consuming, map, recognize},
    multi::separated_list1,
    sequence::{delimited, pair, preceded},
    IResult,
};
use thiserror::Error;

use crate::concept::{Concept, ConceptId, ConceptStore};
use crate::tbox::{Axiom, Ontology};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("parse error on line {line}: {message}")]
    Line { line: usize, message: String },
}

const INCLUSION_OPS: [&str; 2] = ["⊑", "<="];
const EQUIVALENCE_OPS: [&str; 2] = ["≡", "=="];

/// Parse an ontology source text into a fully interned `Ontology`.
pub fn parse_ontology(text: &str) -> Result<Ontology, ParseError> {
    let mut ontology = Ontology::new();

    for (i, raw) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix("ontology ").map(str::trim) {
            if name.is_empty() {
                return Err(err(line_no, "ontology name missing"));
            }
            ontology.set_name(name);
            continue;
        }

        let has_inclusion = INCLUSION_OPS.iter().any(|op| line.contains(op));
        let has_equivalence = EQUIVALENCE_OPS.iter().any(|op| line.contains(op));

        match (has_inclusion, has_equivalence) {
            (true, true) => {
                return Err(err(line_no, "cannot mix `⊑` and `≡` in one axiom"));
            }
            (true, false) => {
                let parts = split_on_ops(line, &INCLUSION_OPS);
                if parts.len() != 2 {
                    return Err(err(line_no, "an inclusion axiom has exactly one `⊑`"));
                }
                let lhs = parse_concept(parts[0], ontology.universe_mut())
                    .map_err(|message| err(line_no, message))?;
                let rhs = parse_concept(parts[1], ontology.universe_mut())
                    .map_err(|message| err(line_no, message))?;
                ontology.add_axiom(Axiom::Inclusion { lhs, rhs });
            }
            (false, true) => {
                let parts = split_on_ops(line, &EQUIVALENCE_OPS);
                let mut members: Vec<ConceptId> = Vec::with_capacity(parts.len());
                for part in parts {
                    let id = parse_concept(part, ontology.universe_mut())
                        .map_err(|message| err(line_no, message))?;
                    if !members.contains(&id) {
                        members.push(id);
                    }
                }
                if members.len() < 2 {
                    return Err(err(
                        line_no,
                        "an equivalence axiom needs at least two distinct members",
                    ));
                }
                ontology.add_axiom(Axiom::Equivalence { members });
            }
            (false, false) => {
                return Err(err(
                    line_no,
                    "expected an axiom (`C ⊑ D` or `C ≡ D`) or an `ontology` header",
                ));
            }
        }
    }

    Ok(ontology)
}

fn err(line: usize, message: impl Into<String>) -> ParseError {
    ParseError::Line {
        line,
        message: message.into(),
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("--") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Split a statement on any of the given operator tokens, keeping order.
fn split_on_ops<'a>(line: &'a str, ops: &[&str]) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut rest = line;
    loop {
        let mut earliest: Option<(usize, usize)> = None;
        for op in ops {
            if let Some(idx) = rest.find(op) {
                if earliest.map_or(true, |(best, _)| idx < best) {
                    earliest = Some((idx, op.len()));
                }
            }
        }
        match earliest {
            Some((idx, len)) => {
                parts.push(&rest[..idx]);
                rest = &rest[idx + len..];
            }
            None => {
                parts.push(rest);
                return parts;
            }
        }
    }
}

// ============================================================================
// Concept expressions
// ============================================================================

/// Parsed-but-not-yet-interned concept tree.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConceptExpr {
    Atomic(String),
    Conjunction(Vec<ConceptExpr>),
    Existential { role: String, filler: Box<ConceptExpr> },
}

/// Parse one concept expression and intern it (and its sub-concepts).
fn parse_concept(text: &str, universe: &mut ConceptStore) -> Result<ConceptId, String> {
    match all_consuming(delimited(multispace0, conjunction, multispace0))(text) {
        Ok((_, expr)) => Ok(intern_expr(universe, &expr)),
        Err(_) => Err(format!("invalid concept expression `{}`", text.trim())),
    }
}

fn intern_expr(universe: &mut ConceptStore, expr: &ConceptExpr) -> ConceptId {
    match expr {
        ConceptExpr::Atomic(name) => universe.intern(Concept::Atomic { name: name.clone() }),
        ConceptExpr::Existential { role, filler } => {
            let filler = intern_expr(universe, filler);
            universe.intern(Concept::Existential {
                role: role.clone(),
                filler,
            })
        }
        ConceptExpr::Conjunction(members) => {
            let conjuncts = members.iter().map(|m| intern_expr(universe, m)).collect();
            universe.intern(Concept::Conjunction { conjuncts })
        }
    }
}

fn ident(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            take_while1(|c: char| c.is_alphabetic() || c == '_'),
            take_while(|c: char| c.is_alphanumeric() || c == '_'),
        )),
        str::to_string,
    )(input)
}

fn existential(input: &str) -> IResult<&str, ConceptExpr> {
    let (input, _) = alt((tag("∃"), recognize(pair(tag("exists"), multispace1))))(input)?;
    let (input, role) = preceded(multispace0, ident)(input)?;
    let (input, _) = preceded(multispace0, pchar('.'))(input)?;
    let (input, filler) = preceded(multispace0, primary)(input)?;
    Ok((
        input,
        ConceptExpr::Existential {
            role,
            filler: Box::new(filler),
        },
    ))
}

fn primary(input: &str) -> IResult<&str, ConceptExpr> {
    alt((
        existential,
        delimited(
            pair(pchar('('), multispace0),
            conjunction,
            pair(multispace0, pchar(')')),
        ),
        map(ident, ConceptExpr::Atomic),
    ))(input)
}

fn conjunction(input: &str) -> IResult<&str, ConceptExpr> {
    let (input, mut members) = separated_list1(
        delimited(multispace0, alt((tag("⊓"), tag("&"))), multispace0),
        primary,
    )(input)?;
    let expr = if members.len() == 1 {
        members.remove(0)
    } else {
        ConceptExpr::Conjunction(members)
    };
    Ok((input, expr))
}

// ============================================================================
// Tests
// ============================================================================
