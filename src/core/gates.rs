//! Built-in single-qubit gates.
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;

use crate::core::operator::Operator;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

const NAMES: [&str; 7] = ["I", "X", "Y", "Z", "H", "S", "T"];

pub fn names() -> &'static [&'static str] {
    &NAMES
}

/// Case-insensitive lookup; the returned operator carries the upper-case name.
pub fn lookup(name: &str) -> Option<Operator> {
    let upper = name.to_ascii_uppercase();
    let m = match upper.as_str() {
        "I" => i2(),
        "X" => x(),
        "Y" => y(),
        "Z" => z(),
        "H" => h(),
        "S" => s(),
        "T" => t(),
        _ => return None,
    };
    Operator::from_matrix(upper, m).ok()
}

pub fn i2() -> DMatrix<C64> {
    DMatrix::identity(2, 2)
}
pub fn x() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)])
}
pub fn y() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)])
}
pub fn z() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)])
}
pub fn h() -> DMatrix<C64> {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    DMatrix::from_row_slice(2, 2, &[c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)])
}
pub fn s() -> DMatrix<C64> {
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0)])
}
pub fn t() -> DMatrix<C64> {
    let phase = C64::from_polar(1.0, std::f64::consts::FRAC_PI_4);
    DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), phase])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::QuantumState;

    #[test]
    fn every_gate_is_unitary() {
        for name in names() {
            let op = lookup(name).unwrap();
            assert_eq!(op.dim(), 2);
            assert!(op.is_unitary(), "{name} should be unitary");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("h").unwrap().name(), "H");
        assert!(lookup("CNOT").is_none());
    }

    #[test]
    fn s_then_s_is_z() {
        let one = QuantumState::computational("one", [0.0, 1.0]).unwrap();
        let s = lookup("S").unwrap();
        let out = s.apply(&s.apply(&one).unwrap()).unwrap();
        assert!((out.amplitudes()[1] - c(-1.0, 0.0)).norm() < 1e-12);
    }
}
