//! Keyed, insertion-ordered store of states with write-through persistence.
//!
//! Every successful mutation rewrites the whole backing store through
//! [`atomic_write`]. If that write fails the in-memory change is undone, so the
//! entries and the file never disagree.

use std::fs;
use std::path::{Path, PathBuf};

use num_complex::Complex64 as C64;

use crate::core::error::{QuantumError, Result};
use crate::core::operator::Operator;
use crate::core::record;
use crate::core::report::MeasurementReporter;
use crate::core::state::{Distribution, QuantumState};
use crate::io::atomic_write;

#[derive(Debug)]
pub struct StateRepository {
    path: PathBuf,
    states: Vec<QuantumState>,
}

impl StateRepository {
    /// Empty repository bound to `path`. Nothing is read or written yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), states: Vec::new() }
    }

    /// Bind to `path`, loading it first when the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut repo = Self::new(path);
        if repo.path.exists() {
            repo.load()?;
        }
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[QuantumState] {
        &self.states
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(QuantumState::id)
    }

    /// Display strings in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.states.iter().map(ToString::to_string).collect()
    }

    pub fn get(&self, id: &str) -> Option<&QuantumState> {
        self.states.iter().find(|s| s.id() == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.states.iter().position(|s| s.id() == id)
    }

    pub fn add<I>(&mut self, id: &str, amplitudes: I, basis: &str) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<C64>,
    {
        if self.get(id).is_some() {
            return Err(QuantumError::duplicate(id));
        }
        let state = QuantumState::new(id, amplitudes, basis)?;
        self.insert_and_flush(state)?;
        tracing::trace!(id, "added state");
        Ok(())
    }

    /// Apply `op` to `source_id` and store the result under `target_id`, or
    /// `<source_id>_<op name>` when no (or an empty) target is given.
    pub fn apply_operator(
        &mut self,
        source_id: &str,
        op: &Operator,
        target_id: Option<&str>,
    ) -> Result<QuantumState> {
        let source = self.get(source_id).ok_or_else(|| QuantumError::not_found(source_id))?;
        let target = match target_id.filter(|t| !t.is_empty()) {
            Some(t) => t.to_string(),
            None => format!("{}_{}", source_id, op.name()),
        };
        if self.get(&target).is_some() {
            return Err(QuantumError::duplicate(&target));
        }
        let produced = op.apply(source)?.with_id(target);
        self.insert_and_flush(produced.clone())?;
        tracing::trace!(
            source = source_id,
            target = produced.id(),
            op = op.name(),
            "applied operator"
        );
        Ok(produced)
    }

    pub fn remove(&mut self, id: &str) -> Result<QuantumState> {
        let idx = self.position(id).ok_or_else(|| QuantumError::not_found(id))?;
        let removed = self.states.remove(idx);
        if let Err(e) = self.persist() {
            self.states.insert(idx, removed);
            return Err(e);
        }
        tracing::trace!(id, "removed state");
        Ok(removed)
    }

    pub fn measure(&self, id: &str) -> Result<Distribution> {
        self.get(id)
            .map(QuantumState::measure)
            .ok_or_else(|| QuantumError::not_found(id))
    }

    /// [`measure`](Self::measure), also handing the outcome to `reporter`.
    pub fn measure_with(
        &self,
        id: &str,
        reporter: &mut dyn MeasurementReporter,
    ) -> Result<Distribution> {
        let state = self.get(id).ok_or_else(|| QuantumError::not_found(id))?;
        let distribution = state.measure();
        reporter.report(state, &distribution);
        Ok(distribution)
    }

    /// Rewrite the backing store with every entry.
    pub fn persist(&self) -> Result<()> {
        self.persist_to(&self.path)
    }

    /// Write every entry to `path`. The repository stays bound to its own store.
    pub fn persist_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = record::encode(&self.states).map_err(|e| QuantumError::io(path, e))?;
        atomic_write(path, bytes).map_err(|e| QuantumError::io(path, e))?;
        tracing::debug!(
            path = %path.display(),
            entries = self.states.len(),
            "persisted state store"
        );
        Ok(())
    }

    /// Replace all entries with the contents of the backing store.
    pub fn load(&mut self) -> Result<()> {
        let path = self.path.clone();
        self.load_from(path)
    }

    /// Replace all entries with the contents of `path`. On any error the
    /// current entries are kept as they were.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| QuantumError::io(path, e))?;
        let states = record::decode(&bytes)?;
        self.states = states;
        tracing::debug!(path = %path.display(), entries = self.states.len(), "loaded state store");
        Ok(())
    }

    /// [`load_from`](Self::load_from), then rewrite the backing store. If the
    /// write fails the previous entries are restored.
    pub fn import_from(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let previous = self.states.clone();
        self.load_from(path)?;
        if let Err(e) = self.persist() {
            self.states = previous;
            return Err(e);
        }
        Ok(())
    }

    fn insert_and_flush(&mut self, state: QuantumState) -> Result<()> {
        self.states.push(state);
        if let Err(e) = self.persist() {
            self.states.pop();
            return Err(e);
        }
        Ok(())
    }
}
