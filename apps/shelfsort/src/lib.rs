//! # shelfsort
//!
//! Library half of the shelfsort binary: configuration, catalog storage, CSV transfer,
//! synthetic data, chart output and the CLI itself. Split out of `main.rs`
//! so integration tests can reach it.

pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_io;
pub mod generator;
pub mod store;
