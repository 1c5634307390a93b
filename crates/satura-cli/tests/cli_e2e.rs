//! End-to-end tests driving the built `satura` binary.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_satura"))
}

const SUSHI: &str = r#"
ontology Sushi

CucumberRoll ⊑ Roll ⊓ ∃hasIngredient.Cucumber
Roll ⊑ Sushi
Sushi ⊑ ∃hasBase.Rice
"#;

fn write_ontology(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("sushi.dl");
    fs::write(&path, SUSHI).expect("write ontology");
    path
}

#[test]
fn check_reports_axioms_and_universe() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_ontology(&dir);

    let output = Command::new(bin())
        .arg("check")
        .arg(&path)
        .output()
        .expect("run satura check");

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Sushi"));
    assert!(stdout.contains("CucumberRoll ⊑ (Roll ⊓ ∃hasIngredient.Cucumber)"));
    assert!(stdout.contains("∃hasBase.Rice"));
}

#[test]
fn saturate_prints_a_trace_per_pass_and_converges() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_ontology(&dir);

    let output = Command::new(bin())
        .arg("saturate")
        .arg(&path)
        .args(["--init", "CucumberRoll"])
        .output()
        .expect("run satura saturate");

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    // one separator per pass, at least two passes to reach the fixpoint
    assert!(stdout.matches(&"-".repeat(25)).count() >= 2);
    assert!(stdout.contains("A: [CucumberRoll"));
    assert!(stdout.contains("--hasIngredient--> "));
    assert!(stdout.contains("--hasBase--> "));

    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("fixpoint"), "{stderr}");
}

#[test]
fn saturate_writes_a_json_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_ontology(&dir);
    let out = dir.path().join("graph.json");

    let output = Command::new(bin())
        .arg("saturate")
        .arg(&path)
        .args(["--init", "CucumberRoll", "--quiet"])
        .arg("--json")
        .arg(&out)
        .output()
        .expect("run satura saturate");

    assert!(output.status.success(), "{output:?}");
    let payload = fs::read_to_string(&out).expect("snapshot written");
    let snapshot: serde_json::Value = serde_json::from_str(&payload).expect("valid json");
    assert!(snapshot["individuals"].as_array().is_some_and(|a| !a.is_empty()));
    assert!(snapshot["relations"].as_array().is_some_and(|a| !a.is_empty()));
}

#[test]
fn unknown_initial_concept_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_ontology(&dir);

    let output = Command::new(bin())
        .arg("saturate")
        .arg(&path)
        .args(["--init", "NoSuchConcept"])
        .output()
        .expect("run satura saturate");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("NoSuchConcept"), "{stderr}");
}

#[test]
fn max_passes_stops_before_the_fixpoint() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_ontology(&dir);

    let output = Command::new(bin())
        .arg("saturate")
        .arg(&path)
        .args(["--init", "CucumberRoll", "--quiet", "--max-passes", "1"])
        .output()
        .expect("run satura saturate");

    assert!(output.status.success(), "{output:?}");
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("without a fixpoint"), "{stderr}");
}
