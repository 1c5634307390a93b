//! satura CLI
//!
//! Two entrypoints:
//! - `satura check <file>`: parse an ontology and report its axioms and
//!   concept universe.
//! - `satura saturate <file> --init <NAME>…`: build the initial completion
//!   graph and run the saturation procedure, printing the trace after every
//!   pass until a fixpoint (or an explicit `--max-passes` bound).
//!
//! Status lines go to stderr; the graph trace and reports go to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use satura_dsl::{parse_ontology, Ontology};
use satura_reasoner::{trace, GraphSnapshot, Saturation};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "satura")]
#[command(
    author,
    version,
    about = "Saturation-based model builder for EL-style description logic"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an ontology file and report its axioms and concept universe.
    Check {
        /// Ontology file
        input: PathBuf,
    },

    /// Build a completion graph and saturate it to a fixpoint.
    Saturate {
        /// Ontology file
        input: PathBuf,

        /// Initial concept names, one individual each (repeatable). Composite
        /// concepts use their rendered form, e.g. `(A ⊓ B)`.
        #[arg(short, long = "init", required = true)]
        init: Vec<String>,

        /// Stop after N passes even without a fixpoint. The procedure has no
        /// cycle detection and need not terminate on its own.
        #[arg(long)]
        max_passes: Option<usize>,

        /// Write the final graph as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Only print the final graph instead of every pass
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { input } => cmd_check(&input),
        Commands::Saturate {
            input,
            init,
            max_passes,
            json,
            quiet,
        } => cmd_saturate(&input, &init, max_passes, json.as_deref(), quiet),
    }
}

fn load_ontology(path: &Path) -> Result<Ontology> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let ontology =
        parse_ontology(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(ontology)
}

fn cmd_check(input: &Path) -> Result<()> {
    let ontology = load_ontology(input)?;

    if let Some(name) = ontology.name() {
        println!("{} {}", "ontology".cyan().bold(), name.bold());
    }

    println!("{} ({})", "axioms".cyan().bold(), ontology.axioms().len());
    for axiom in ontology.axioms() {
        println!("  {}", ontology.render_axiom(axiom));
    }

    println!(
        "{} ({})",
        "universe".cyan().bold(),
        ontology.universe().len()
    );
    for (id, _) in ontology.universe().iter() {
        println!("  {}", ontology.universe().render(id));
    }

    eprintln!(
        "{} {}",
        "ok".green().bold(),
        input.display().to_string().bold()
    );
    Ok(())
}

fn cmd_saturate(
    input: &Path,
    init: &[String],
    max_passes: Option<usize>,
    json: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let ontology = load_ontology(input)?;
    let mut saturation = Saturation::with_initial(&ontology, init)?;

    let mut converged = false;
    loop {
        let changed = saturation.step()?;
        if !quiet {
            print!("{}", trace::render(saturation.graph(), &ontology));
        }
        if !changed {
            converged = true;
            break;
        }
        if max_passes.is_some_and(|bound| saturation.passes() >= bound) {
            break;
        }
    }
    if quiet {
        print!("{}", trace::render(saturation.graph(), &ontology));
    }

    if converged {
        eprintln!(
            "{} fixpoint after {} passes ({} individuals)",
            "ok".green().bold(),
            saturation.passes(),
            saturation.graph().len()
        );
    } else {
        eprintln!(
            "{} stopped after {} passes without a fixpoint ({} individuals)",
            "warning:".yellow().bold(),
            saturation.passes(),
            saturation.graph().len()
        );
    }

    if let Some(path) = json {
        let snapshot = GraphSnapshot::capture(saturation.graph(), &ontology);
        let payload = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, payload).with_context(|| format!("writing {}", path.display()))?;
        eprintln!(
            "{} {}",
            "wrote".green().bold(),
            path.display().to_string().bold()
        );
    }

    Ok(())
}
