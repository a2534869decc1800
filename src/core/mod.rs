//! Core module tree: states, operators, and the persistent repository.

pub mod error;
pub mod gates;
pub mod operator;
pub mod record;
pub mod report;
pub mod repository;
pub mod state;

pub use error::{QuantumError, Result};
pub use operator::Operator;
pub use report::MeasurementReporter;
pub use repository::StateRepository;
pub use state::{Distribution, QuantumState, DEFAULT_BASIS};
