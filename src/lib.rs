//! `pack-agent` library crate.
//!
//! The binary (`pack`) is a thin wrapper around this library so that:
//!
//! - the optimizer bridge is testable against stub executables
//! - modules are reusable (e.g., embedding the bridge in a service later)
//! - code stays easy to navigate as the project grows
//!
//! The actual bin-packing algorithm lives in an external executable; this
//! crate owns the subprocess boundary (`bridge`), the LLM glue (`llm`), and
//! the console/report surfaces around them.

pub mod app;
pub mod bridge;
pub mod cli;
pub mod domain;
pub mod error;
pub mod llm;
pub mod report;
