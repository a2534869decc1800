use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::commands::states;
use crate::config::QStateConfig;
use crate::core::StateRepository;

/// Interactive loop on stdin. Errors are printed and the loop continues.
pub fn start(repo: StateRepository, cfg: QStateConfig) -> anyhow::Result<()> {
    banner(&repo);
    let stdin = io::stdin();
    run(repo, &cfg, stdin.lock(), true)
}

/// Drive the shell from any line source. Returns at `exit`/`quit` or EOF.
pub fn run<R: BufRead>(
    mut repo: StateRepository,
    cfg: &QStateConfig,
    mut input: R,
    prompt: bool,
) -> anyhow::Result<()> {
    loop {
        if prompt {
            print!("{} ", "⟦QSTATE⟧ ›".bold().truecolor(225, 0, 180));
            io::stdout().flush().ok();
        }

        // bytes, not read_line: a non-UTF-8 line must not end the session
        let mut buf = Vec::new();
        if input.read_until(b'\n', &mut buf)? == 0 {
            if prompt {
                println!();
            }
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = shell_words(line);
        if parts.is_empty() {
            continue;
        }
        let cmd = parts.remove(0);

        let result = match cmd.as_str() {
            "help" | "?" => {
                print_help();
                Ok(())
            }
            "exit" | "quit" => {
                println!("Exiting...");
                break;
            }
            "list" | "ls" => states::list(&repo),
            "add" => {
                let basis = take_flag(&mut parts, "--basis");
                if parts.len() < 2 {
                    usage("add <id> <amp>... [--basis B]   (amp: re or re,im)");
                    continue;
                }
                let id = parts.remove(0);
                let basis = basis.as_deref().unwrap_or(cfg.default_basis());
                states::add(&mut repo, &id, &parts, basis)
            }
            "show" => match parts.first() {
                Some(id) => states::show(&repo, id),
                None => {
                    usage("show <id>");
                    continue;
                }
            },
            "measure" => {
                let json = take_switch(&mut parts, "--json");
                match parts.first() {
                    Some(id) => states::measure(&repo, id, json),
                    None => {
                        usage("measure <id> [--json]");
                        continue;
                    }
                }
            }
            "apply" => {
                let target = take_flag(&mut parts, "--target");
                let matrix = take_flag(&mut parts, "--matrix");
                if parts.len() < 2 {
                    usage("apply <source> <operator> [--target ID] [--matrix \"0 1; 1 0\"]");
                    continue;
                }
                states::apply(
                    &mut repo,
                    cfg,
                    &parts[0],
                    &parts[1],
                    target.as_deref(),
                    matrix.as_deref(),
                )
            }
            "remove" | "rm" => match parts.first() {
                Some(id) => states::remove(&mut repo, id),
                None => {
                    usage("remove <id>");
                    continue;
                }
            },
            "save" => {
                let path = path_arg(&parts, &repo);
                states::export(&repo, &path)
            }
            "load" => {
                let path = path_arg(&parts, &repo);
                states::load(&mut repo, &path)
            }
            "gates" => states::gates(cfg),
            other => {
                eprintln!("{} unknown command '{}' (type 'help')", "err:".red().bold(), other);
                continue;
            }
        };

        if let Err(e) = result {
            eprintln!("{} {:#}", "err:".red().bold(), e);
        }
    }
    Ok(())
}

/// First argument as a path, else the backing store.
fn path_arg(parts: &[String], repo: &StateRepository) -> PathBuf {
    parts
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| repo.path().to_path_buf())
}

/// Remove `name VALUE` from `parts`, returning VALUE.
fn take_flag(parts: &mut Vec<String>, name: &str) -> Option<String> {
    let idx = parts.iter().position(|p| p == name)?;
    if idx + 1 >= parts.len() {
        parts.remove(idx);
        return None;
    }
    let value = parts.remove(idx + 1);
    parts.remove(idx);
    Some(value)
}

fn take_switch(parts: &mut Vec<String>, name: &str) -> bool {
    match parts.iter().position(|p| p == name) {
        Some(idx) => {
            parts.remove(idx);
            true
        }
        None => false,
    }
}

fn banner(repo: &StateRepository) {
    println!(
        "\n{}\n{}\n{}",
        "╔══════════════════════════════════════════════════╗".truecolor(225, 0, 180),
        "║          Q u a n t u m   S t a t e s            ║"
            .truecolor(255, 240, 0)
            .bold(),
        "╚══════════════════════════════════════════════════╝".truecolor(225, 0, 180),
    );
    println!(
        "{} {}  {}",
        "store:".truecolor(130, 0, 200),
        repo.path().display(),
        "type 'help' for commands".truecolor(130, 0, 200)
    );
}

fn print_help() {
    println!("{}", "qstate — Quantum State Shell".bold().truecolor(0, 255, 180));
    println!("{}", "States:".truecolor(130, 0, 200));
    println!("  list                          # list stored states");
    println!("  add <id> <amp>... [--basis B] # amp: re or re,im");
    println!("  show <id>                     # show one state");
    println!("  remove <id>                   # delete a state");
    println!("{}", "Quantum:".truecolor(255, 180, 0));
    println!("  measure <id> [--json]         # outcome probabilities");
    println!("  apply <src> <op> [--target ID] [--matrix \"0 1; 1 0\"]");
    println!("  gates                         # built-in and configured operators");
    println!("{}", "Files:".truecolor(130, 0, 200));
    println!("  save [path]                   # write states (default: backing store)");
    println!("  load [path]                   # replace states in memory only");
    println!("{}", "Shell:".truecolor(130, 0, 200));
    println!("  help                          # show this help");
    println!("  exit                          # quit shell");
}

fn usage(s: &str) {
    eprintln!("{} {}", "usage:".yellow().bold(), s);
}

fn shell_words(s: &str) -> Vec<String> {
    // minimal split by whitespace respecting "quoted strings"
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut in_q = false;
    for c in s.chars() {
        match (c, in_q) {
            ('"', false) => in_q = true,
            ('"', true) => in_q = false,
            (c, _) if c.is_whitespace() && !in_q => {
                if !buf.is_empty() {
                    out.push(std::mem::take(&mut buf));
                }
            }
            (c, _) => buf.push(c),
        }
    }
    if !buf.is_empty() {
        out.push(buf);
    }
    out
}
