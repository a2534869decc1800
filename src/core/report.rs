//! Hook for presenting measurements without the core doing any output.
use crate::core::state::{Distribution, QuantumState};

pub trait MeasurementReporter {
    fn report(&mut self, state: &QuantumState, distribution: &Distribution);
}

/// Keeps every report, in call order.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    pub reports: Vec<(String, Distribution)>,
}

impl MeasurementReporter for CollectingReporter {
    fn report(&mut self, state: &QuantumState, distribution: &Distribution) {
        self.reports.push((state.id().to_string(), distribution.clone()));
    }
}

/// Human-readable report lines, percentages with two decimals.
pub fn render(state: &QuantumState, distribution: &Distribution) -> Vec<String> {
    let mut lines = Vec::with_capacity(distribution.len() + 1);
    lines.push(format!(
        "Measurement of state {} (basis {}):",
        state.id(),
        state.basis()
    ));
    for (label, p) in distribution.iter() {
        lines.push(format!("  - basis state {label}: {:.2}%", p * 100.0));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_every_outcome() {
        let s = QuantumState::computational("q1", [0.0, 1.0]).unwrap();
        let lines = render(&s, &s.measure());
        assert_eq!(
            lines,
            vec![
                "Measurement of state q1 (basis computational):",
                "  - basis state |0⟩: 0.00%",
                "  - basis state |1⟩: 100.00%",
            ]
        );
    }
}
