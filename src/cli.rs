use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "qstate",
    about = "qstate — store, transform and measure quantum state vectors",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QStateCli {
    /// Global: backing store file (overrides `store` in the config)
    #[arg(long = "store", value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    /// Global: path to config (TOML); default: ~/.qstate/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: disable colored output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List stored states in insertion order
    List,

    /// Add a state
    ///
    /// Examples:
    ///   qstate add q0 1 0
    ///   qstate add --basis lab psi 0.6 0,0.8
    Add {
        #[arg(value_name = "ID")]
        id: String,
        /// Amplitudes, each `re` or `re,im`
        #[arg(value_name = "AMP", num_args = 1.., required = true, allow_hyphen_values = true)]
        amplitudes: Vec<String>,
        /// Basis label (default: config `basis`, else "computational")
        #[arg(long = "basis", value_name = "BASIS")]
        basis: Option<String>,
    },

    /// Show one state
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Measurement probabilities of a state
    Measure {
        #[arg(value_name = "ID")]
        id: String,
        /// Print the distribution as JSON
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Apply an operator and store the result
    ///
    /// Examples:
    ///   qstate apply q0 H
    ///   qstate apply q0 flip --matrix "0 1; 1 0" --target q1
    Apply {
        #[arg(value_name = "SOURCE")]
        source: String,
        /// Built-in gate, config operator, or the name given to --matrix
        #[arg(value_name = "OPERATOR")]
        operator: String,
        /// Id for the result (default: <SOURCE>_<OPERATOR>)
        #[arg(long = "target", value_name = "ID")]
        target: Option<String>,
        /// Inline matrix: rows split by `;`, entries by whitespace, each `re` or `re,im`
        #[arg(long = "matrix", value_name = "ROWS", allow_hyphen_values = true)]
        matrix: Option<String>,
    },

    /// Remove a state
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Write all states to another file
    Export {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Replace all states with the contents of a file
    Import {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// List built-in and configured operators
    Gates,

    /// Interactive shell (default)
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_complex_tokens() {
        let argv = ["qstate", "--store", "s.csv", "add", "psi", "0.6", "0,-0.8"];
        let cli = QStateCli::try_parse_from(argv).unwrap();
        match cli.cmd {
            Some(Command::Add { id, amplitudes, basis }) => {
                assert_eq!(id, "psi");
                assert_eq!(amplitudes, vec!["0.6", "0,-0.8"]);
                assert!(basis.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(cli.store, Some(PathBuf::from("s.csv")));
    }

    #[test]
    fn parses_apply_with_matrix() {
        let cli = QStateCli::try_parse_from([
            "qstate", "apply", "q0", "flip", "--matrix", "0 1; 1 0", "--target", "q1",
        ])
        .unwrap();
        match cli.cmd {
            Some(Command::Apply { source, operator, target, matrix }) => {
                assert_eq!(source, "q0");
                assert_eq!(operator, "flip");
                assert_eq!(target.as_deref(), Some("q1"));
                assert_eq!(matrix.as_deref(), Some("0 1; 1 0"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_is_shell() {
        let cli = QStateCli::try_parse_from(["qstate"]).unwrap();
        assert!(cli.cmd.is_none());
    }
}
