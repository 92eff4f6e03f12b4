//! Degree auditing
//!
//! Completed courses are replayed against a major's requirements to find
//! out which requirements are met, and how far along the rest are.

pub mod domain;
pub use domain::{Config, Course, Fulfillment, Progress, Requirement, Rule, Solver, Term};

/// Loading majors and transcripts from disk.
pub mod storage;
pub use storage::{Entry, LoadError, Major, Transcript};
