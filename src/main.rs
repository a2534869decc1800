/// qstate main — one-shot subcommands, or the shell by default.
use anyhow::Context;
use clap::Parser; // trait import enables QStateCli::parse()
use tracing_subscriber::EnvFilter;

use qstate::cli::{Command, QStateCli};
use qstate::commands::states;
use qstate::config::QStateConfig;
use qstate::shell;
use qstate::StateRepository;

fn init_logging() {
    let filter = EnvFilter::try_from_env("QSTATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args = QStateCli::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let cfg = QStateConfig::load(&args.config)?;
    if let Some(Command::Gates) = args.cmd {
        return states::gates(&cfg);
    }
    let store = cfg.store_path(args.store.clone())?;
    let mut repo = StateRepository::open(&store)
        .with_context(|| format!("opening backing store {}", store.display()))?;

    match args.cmd {
        None | Some(Command::Shell) => shell::start(repo, cfg),
        Some(Command::List) => states::list(&repo),
        Some(Command::Add { id, amplitudes, basis }) => {
            let basis = basis.as_deref().unwrap_or(cfg.default_basis());
            states::add(&mut repo, &id, &amplitudes, basis)
        }
        Some(Command::Show { id }) => states::show(&repo, &id),
        Some(Command::Measure { id, json }) => states::measure(&repo, &id, json),
        Some(Command::Apply { source, operator, target, matrix }) => states::apply(
            &mut repo,
            &cfg,
            &source,
            &operator,
            target.as_deref(),
            matrix.as_deref(),
        ),
        Some(Command::Remove { id }) => states::remove(&mut repo, &id),
        Some(Command::Export { path }) => states::export(&repo, &path),
        Some(Command::Import { path }) => states::import(&mut repo, &path),
        Some(Command::Gates) => states::gates(&cfg),
    }
}
