//! User config: optional TOML at ~/.qstate/config.toml (or `--config FILE`).
//!
//! ```toml
//! store = "states.csv"
//! basis = "computational"
//!
//! [[operators]]
//! name = "SX"
//! matrix = [[[0.5, 0.5], [0.5, -0.5]], [[0.5, -0.5], [0.5, 0.5]]]
//! ```
//!
//! Matrix entries are a number or a `[re, im]` pair.

use anyhow::{bail, Context, Result};
use num_complex::Complex64 as C64;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Operator, DEFAULT_BASIS};

#[derive(Debug, Default, Deserialize)]
pub struct QStateConfig {
    #[serde(default)]
    pub store: Option<PathBuf>,
    #[serde(default)]
    pub basis: Option<String>,
    #[serde(default)]
    pub operators: Vec<OperatorDef>,
}

#[derive(Debug, Deserialize)]
pub struct OperatorDef {
    pub name: String,
    pub matrix: Vec<Vec<Entry>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Real(f64),
    Complex([f64; 2]),
}

impl From<Entry> for C64 {
    fn from(e: Entry) -> Self {
        match e {
            Entry::Real(re) => C64::new(re, 0.0),
            Entry::Complex([re, im]) => C64::new(re, im),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::home_dir().map(|h| h.join(".qstate").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

impl QStateConfig {
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        Ok(toml::from_str(txt)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&txt).with_context(|| format!("parsing {}", path.display()))
    }

    /// An explicit `--config` must exist; a missing default file means defaults.
    pub fn load(cli_path: &Option<PathBuf>) -> Result<Self> {
        match resolve_config_path(cli_path) {
            Some(p) if cli_path.is_some() || p.exists() => Self::from_toml_file(&p),
            _ => Ok(Self::default()),
        }
    }

    /// `--store` wins over the config's `store`. There is no built-in fallback.
    pub fn store_path(&self, cli_store: Option<PathBuf>) -> Result<PathBuf> {
        match cli_store.or_else(|| self.store.clone()) {
            Some(p) => Ok(p),
            None => bail!("no backing store given: pass --store FILE or set `store` in the config"),
        }
    }

    pub fn default_basis(&self) -> &str {
        self.basis.as_deref().unwrap_or(DEFAULT_BASIS)
    }

    pub fn operators(&self) -> Result<Vec<Operator>> {
        self.operators
            .iter()
            .map(|def| {
                Operator::new(def.name.clone(), def.matrix.iter().map(|row| row.iter().copied()))
                    .with_context(|| format!("config operator '{}'", def.name))
            })
            .collect()
    }

    pub fn find_operator(&self, name: &str) -> Result<Option<Operator>> {
        Ok(self.operators()?.into_iter().find(|op| op.name() == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_means_defaults() {
        let cfg = QStateConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.default_basis(), "computational");
        assert!(cfg.operators().unwrap().is_empty());
        assert!(cfg.store_path(None).is_err());
    }

    #[test]
    fn cli_store_overrides_config() {
        let cfg = QStateConfig::from_toml_str(r#"store = "a.csv""#).unwrap();
        assert_eq!(cfg.store_path(None).unwrap(), PathBuf::from("a.csv"));
        assert_eq!(cfg.store_path(Some("b.csv".into())).unwrap(), PathBuf::from("b.csv"));
    }

    #[test]
    fn operators_accept_real_and_complex_entries() {
        let cfg = QStateConfig::from_toml_str(
            r#"
            basis = "lab"

            [[operators]]
            name = "flip"
            matrix = [[0, 1], [1, 0]]

            [[operators]]
            name = "Yc"
            matrix = [[0, [0.0, -1.0]], [[0.0, 1.0], 0]]
            "#,
        )
        .unwrap();
        assert_eq!(cfg.default_basis(), "lab");
        let ops = cfg.operators().unwrap();
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(Operator::is_unitary));
        let yc = cfg.find_operator("Yc").unwrap().unwrap();
        assert_eq!(yc.matrix()[(1, 0)], C64::new(0.0, 1.0));
        assert!(cfg.find_operator("missing").unwrap().is_none());
    }

    #[test]
    fn non_square_config_operator_is_an_error() {
        let cfg = QStateConfig::from_toml_str(
            r#"
            [[operators]]
            name = "bad"
            matrix = [[1, 0]]
            "#,
        )
        .unwrap();
        let err = cfg.operators().unwrap_err();
        assert!(format!("{err:#}").contains("config operator 'bad'"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Some(dir.path().join("nope.toml"));
        assert!(QStateConfig::load(&missing).is_err());
    }
}
