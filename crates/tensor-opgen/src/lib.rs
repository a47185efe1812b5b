#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
//! Tensor operator table resolution and registration code generation.
//!
//! [`registry::by_name`] resolves the built-in operator table against the
//! built-in schemas. [`generator::orchestrator::Orchestrator`] turns any
//! resolved table into a Rust module.

pub mod generator;
pub(crate) mod naming;
pub mod registry;
pub mod ui;
