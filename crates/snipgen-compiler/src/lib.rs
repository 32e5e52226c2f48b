//! Snippet compiler and fixture oracle.

pub mod compiler;
pub mod error;
pub mod fixtures;

pub use compiler::Compiler;
pub use error::FixtureError;
pub use fixtures::{builtin_cases, find_case, CheckReport, Discrepancy, FixtureCase, Oracle};
