pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod shell;

pub use crate::core::{
    Distribution, MeasurementReporter, Operator, QuantumError, QuantumState, StateRepository,
    DEFAULT_BASIS,
};
