//! Core sequence engine
//!
//! This module contains the sequence generator, summary statistics, error
//! taxonomy, and logging setup.

mod error;
pub mod logging;
mod sequence;
mod stats;

pub use error::*;
pub use logging::*;
pub use sequence::*;
pub use stats::*;
