//! Common test utilities for Zitify CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project directory with git helpers
//! - Fixtures: reusable fragment content

pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
