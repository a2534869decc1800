//! Named square operators applied to state vectors.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

use crate::core::error::{QuantumError, Result};
use crate::core::state::QuantumState;

/// Max entry of |U†U − I| still counted as unitary.
pub const UNITARY_TOL: f64 = 1e-8;

#[derive(Clone, Debug, PartialEq)]
pub struct Operator {
    name: String,
    matrix: DMatrix<C64>,
}

impl Operator {
    /// Build from row lists. Every row must be as long as there are rows.
    pub fn new<R, T>(name: impl Into<String>, rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = T>,
        T: Into<C64>,
    {
        let rows: Vec<Vec<C64>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(QuantumError::validation(format!(
                "operator matrix must be square (n×n): {n} rows but a row of length {}",
                bad.len()
            )));
        }
        let flat: Vec<C64> = rows.into_iter().flatten().collect();
        Ok(Self {
            name: name.into(),
            matrix: DMatrix::from_row_slice(n, n, &flat),
        })
    }

    pub fn from_matrix(name: impl Into<String>, matrix: DMatrix<C64>) -> Result<Self> {
        if matrix.nrows() != matrix.ncols() {
            return Err(QuantumError::validation(format!(
                "operator matrix must be square (n×n), got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            )));
        }
        Ok(Self { name: name.into(), matrix })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matrix(&self) -> &DMatrix<C64> {
        &self.matrix
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// U†U ≈ I. Informational only; `apply` does not require it.
    pub fn is_unitary(&self) -> bool {
        let n = self.dim();
        let u_dag_u = self.matrix.adjoint() * &self.matrix;
        let max_diff = (u_dag_u - DMatrix::<C64>::identity(n, n))
            .iter()
            .map(|z| z.norm())
            .fold(0.0_f64, f64::max);
        max_diff <= UNITARY_TOL
    }

    /// Matrix–vector product into a new state `<id>_<name>` in the same basis.
    ///
    /// The result goes through [`QuantumState::new`], so an operator that does
    /// not preserve the norm yields `QuantumError::Validation`.
    pub fn apply(&self, state: &QuantumState) -> Result<QuantumState> {
        if self.dim() != state.len() {
            return Err(QuantumError::DimensionMismatch {
                expected: self.dim(),
                actual: state.len(),
            });
        }
        let out = &self.matrix * state.amplitudes();
        QuantumState::new(
            format!("{}_{}", state.id(), self.name),
            out.iter().copied(),
            state.basis(),
        )
    }
}
