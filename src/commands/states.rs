//! Front-end operations over a [`StateRepository`], shared by the one-shot
//! subcommands and the shell.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::commands::parse::{parse_amplitudes, parse_matrix};
use crate::config::QStateConfig;
use crate::core::report::render;
use crate::core::{
    gates, Distribution, MeasurementReporter, Operator, QuantumState, StateRepository,
};

/// Prints measurement reports to stdout.
pub struct ConsoleReporter;

impl MeasurementReporter for ConsoleReporter {
    fn report(&mut self, state: &QuantumState, distribution: &Distribution) {
        let mut lines = render(state, distribution).into_iter();
        if let Some(head) = lines.next() {
            println!("{}", head.truecolor(0, 255, 180).bold());
        }
        for line in lines {
            println!("{line}");
        }
    }
}

pub fn list(repo: &StateRepository) -> Result<()> {
    let entries = repo.list();
    if entries.is_empty() {
        println!("No states stored.");
    } else {
        println!("{}", "States:".bold());
        for entry in entries {
            println!(" - {entry}");
        }
    }
    Ok(())
}

pub fn add<S: AsRef<str>>(
    repo: &mut StateRepository,
    id: &str,
    tokens: &[S],
    basis: &str,
) -> Result<()> {
    let amps = parse_amplitudes(tokens)?;
    repo.add(id, amps, basis)?;
    println!("State '{id}' added.");
    Ok(())
}

pub fn show(repo: &StateRepository, id: &str) -> Result<()> {
    match repo.get(id) {
        Some(state) => {
            println!("{state}");
            Ok(())
        }
        None => bail!("no state with id '{id}'"),
    }
}

pub fn measure(repo: &StateRepository, id: &str, json: bool) -> Result<()> {
    if json {
        let distribution = repo.measure(id)?;
        println!("{}", serde_json::to_string_pretty(&distribution)?);
    } else {
        repo.measure_with(id, &mut ConsoleReporter)?;
    }
    Ok(())
}

/// `--matrix` first, then config operators, then built-in gates.
pub fn resolve_operator(cfg: &QStateConfig, name: &str, matrix: Option<&str>) -> Result<Operator> {
    if let Some(text) = matrix {
        let rows = parse_matrix(text)?;
        return Ok(Operator::new(name, rows)?);
    }
    if let Some(op) = cfg.find_operator(name)? {
        return Ok(op);
    }
    match gates::lookup(name) {
        Some(op) => Ok(op),
        None => bail!("unknown operator '{name}' (see `gates`, or pass --matrix)"),
    }
}

pub fn apply(
    repo: &mut StateRepository,
    cfg: &QStateConfig,
    source: &str,
    operator: &str,
    target: Option<&str>,
    matrix: Option<&str>,
) -> Result<()> {
    let op = resolve_operator(cfg, operator, matrix)?;
    if !op.is_unitary() {
        eprintln!(
            "{} operator '{}' is not unitary; the result may fail normalization",
            "warn:".yellow().bold(),
            op.name()
        );
    }
    let produced = repo.apply_operator(source, &op, target)?;
    println!("Operator applied: {produced}");
    Ok(())
}

pub fn remove(repo: &mut StateRepository, id: &str) -> Result<()> {
    repo.remove(id)?;
    println!("State '{id}' removed.");
    Ok(())
}

pub fn export(repo: &StateRepository, path: &Path) -> Result<()> {
    repo.persist_to(path)
        .with_context(|| format!("saving states to {}", path.display()))?;
    println!("Saved {} state(s) to {}.", repo.len(), path.display());
    Ok(())
}

/// Load `path` in memory only.
pub fn load(repo: &mut StateRepository, path: &Path) -> Result<()> {
    repo.load_from(path)
        .with_context(|| format!("loading states from {}", path.display()))?;
    println!("Loaded {} state(s) from {}.", repo.len(), path.display());
    if path != repo.path() {
        println!("{}", unflushed_notice(repo).truecolor(130, 0, 200));
    }
    Ok(())
}

pub fn unflushed_notice(repo: &StateRepository) -> String {
    format!(
        "(in memory only; {} is rewritten on the next change or `save`)",
        repo.path().display()
    )
}

/// Load `path` and write it through to the backing store.
pub fn import(repo: &mut StateRepository, path: &Path) -> Result<()> {
    repo.import_from(path)
        .with_context(|| format!("importing states from {}", path.display()))?;
    println!(
        "Imported {} state(s) from {} into {}.",
        repo.len(),
        path.display(),
        repo.path().display()
    );
    Ok(())
}

pub fn gates(cfg: &QStateConfig) -> Result<()> {
    println!("{}", "Built-in gates:".bold());
    for name in gates::names() {
        println!("  • {}", name.truecolor(255, 180, 0));
    }
    let configured = cfg.operators()?;
    if !configured.is_empty() {
        println!("{}", "Configured operators:".bold());
        for op in configured {
            println!("  • {} ({}x{})", op.name().truecolor(100, 255, 100), op.dim(), op.dim());
        }
    }
    Ok(())
}
