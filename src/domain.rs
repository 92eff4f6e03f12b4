//! Domain models for degree auditing.
//!
//! This module contains the solving core (the [`Requirement`] capability
//! and the [`Solver`] that drives it), the built-in requirement rules,
//! per-term credit loads and configuration.

mod course;
pub use course::Course;

/// Catalog code parsing (`SUBJECT NNNN`).
pub mod code;
pub use code::CatalogCode;

mod requirement;
pub use requirement::{Fulfillment, Progress, Requirement};

mod solver;
pub use solver::Solver;

pub mod rule;
pub use rule::Rule;

/// Credit hours carried per term.
pub mod term;
pub use term::Term;

mod config;
pub use config::Config;
