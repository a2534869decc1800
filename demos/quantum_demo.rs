//! Library walk-through: add a state, apply H, measure, persist and reload.
//!
//!   cargo run --example quantum_demo -- /tmp/states.csv
use std::env;
use std::f64::consts::FRAC_1_SQRT_2;
use std::path::PathBuf;

use anyhow::Context;
use qstate::core::gates;
use qstate::core::report::render;
use qstate::{Operator, StateRepository, DEFAULT_BASIS};

fn main() -> anyhow::Result<()> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let Some(path) = args.first().map(PathBuf::from) else {
        eprintln!("usage: cargo run --example quantum_demo -- <store.csv>");
        std::process::exit(2);
    };

    let mut repo = StateRepository::open(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    if repo.get("psi").is_none() {
        repo.add("psi", [FRAC_1_SQRT_2, FRAC_1_SQRT_2], DEFAULT_BASIS)?;
    }
    for line in repo.list() {
        println!("{line}");
    }

    let h = Operator::new("H", [[FRAC_1_SQRT_2, FRAC_1_SQRT_2], [FRAC_1_SQRT_2, -FRAC_1_SQRT_2]])?;
    if repo.get("psi_H").is_none() {
        let psi_h = repo.apply_operator("psi", &h, Some("psi_H"))?;
        println!("{psi_h}"); // ~ [1, 0]
    }
    if let Err(e) = repo.apply_operator("psi", &h, Some("psi_H")) {
        println!("expected: {e}");
    }

    let z = gates::lookup("Z").context("Z gate")?;
    let minus = match repo.get("psi_Z") {
        Some(existing) => existing.clone(),
        None => repo.apply_operator("psi", &z, None)?,
    };
    for line in render(&minus, &minus.measure()) {
        println!("{line}");
    }

    let reloaded = StateRepository::open(&path)?;
    println!("reloaded {} state(s) from {}", reloaded.len(), path.display());
    Ok(())
}
