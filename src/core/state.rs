//! Validated state vectors and the measurement rule.
use std::fmt;

use nalgebra::DVector;
use num_complex::Complex64 as C64;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::error::{QuantumError, Result};

pub const DEFAULT_BASIS: &str = "computational";

/// Relative tolerance on `Σ|a_i|² = 1`.
pub const NORM_REL_TOL: f64 = 1e-9;

/// Components at or below this magnitude render as zero / are omitted.
const DISPLAY_EPS: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub struct QuantumState {
    id: String,
    amplitudes: DVector<C64>,
    basis: String,
}

impl QuantumState {
    /// Build a state, rejecting empty or unnormalized amplitude vectors.
    ///
    /// Real inputs are promoted to complex, so `[1.0, 0.0]` and
    /// `[C64::new(1.0, 0.0), C64::new(0.0, 0.0)]` build the same state.
    pub fn new<I>(id: impl Into<String>, amplitudes: I, basis: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<C64>,
    {
        let amps: Vec<C64> = amplitudes.into_iter().map(Into::into).collect();
        if amps.is_empty() {
            return Err(QuantumError::validation("state vector must not be empty"));
        }
        let sum: f64 = amps.iter().map(|z| z.norm_sqr()).sum();
        if !is_normalized(sum) {
            return Err(QuantumError::validation(format!(
                "state vector is not normalized (sum of squares = {sum})"
            )));
        }
        Ok(Self {
            id: id.into(),
            amplitudes: DVector::from_vec(amps),
            basis: basis.into(),
        })
    }

    /// Same as [`QuantumState::new`] in the computational basis.
    pub fn computational<I>(id: impl Into<String>, amplitudes: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<C64>,
    {
        Self::new(id, amplitudes, DEFAULT_BASIS)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn basis(&self) -> &str {
        &self.basis
    }

    pub fn amplitudes(&self) -> &DVector<C64> {
        &self.amplitudes
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Copy of this state under another id. Amplitudes and basis are kept.
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            amplitudes: self.amplitudes.clone(),
            basis: self.basis.clone(),
        }
    }

    /// Probability of each basis index, `|a_i|²`. Does not collapse the state.
    pub fn measure(&self) -> Distribution {
        Distribution {
            outcomes: self
                .amplitudes
                .iter()
                .enumerate()
                .map(|(i, z)| (basis_label(i), z.norm_sqr()))
                .collect(),
        }
    }
}

impl fmt::Display for QuantumState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.amplitudes.iter().map(|z| format_amplitude(*z)).collect();
        write!(f, "{}: [{}] en base {}", self.id, parts.join(", "), self.basis)
    }
}

fn is_normalized(sum: f64) -> bool {
    sum.is_finite() && (sum - 1.0).abs() <= NORM_REL_TOL * sum.abs().max(1.0)
}

/// `|i⟩`, zero-based.
pub fn basis_label(index: usize) -> String {
    format!("|{index}⟩")
}

fn format_amplitude(z: C64) -> String {
    let re = if z.re.abs() > DISPLAY_EPS {
        format!("{:.3}", z.re)
    } else {
        "0.000".to_string()
    };
    if z.im.abs() > DISPLAY_EPS {
        let sign = if z.im >= 0.0 { '+' } else { '-' };
        format!("{re}{sign}{:.3}j", z.im.abs())
    } else {
        re
    }
}

/// Outcome probabilities of a measurement, in basis-index order.
#[derive(Clone, Debug, PartialEq)]
pub struct Distribution {
    outcomes: Vec<(String, f64)>,
}

impl Distribution {
    /// Probability for a label such as `|0⟩`.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.outcomes.iter().find(|(l, _)| l == label).map(|(_, p)| *p)
    }

    pub fn probability(&self, index: usize) -> Option<f64> {
        self.outcomes.get(index).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.outcomes.iter().map(|(l, p)| (l.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.outcomes.iter().map(|(_, p)| p).sum()
    }
}

// Serialized as a JSON object whose keys keep basis-index order.
impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outcomes.len()))?;
        for (label, p) in &self.outcomes {
            map.serialize_entry(label, p)?;
        }
        map.end()
    }
}
