//! symem-driver library exports for testing.
//!
//! The `symem` binary is a thin clap front end over these modules: solver
//! selection, the built-in scenarios, the runner, and text/JSON output.

pub mod config;
pub mod json_output;
pub mod output;
pub mod runner;
pub mod scenarios;
