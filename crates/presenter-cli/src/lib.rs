//! # presenter-cli: Command-Line Host for the Projection Engine
//!
//! Loads a presenter configuration (YAML or JSON), reads a JSON model from a
//! file or stdin, and prints its presentation.

pub mod present;
