//! Public API for the jnd-engine crate.
//!
//! This module provides the high-level API: the [`JndAnalyzer`] builder and
//! the [`EngineError`] unified error type.

mod builder;
mod error;

pub use builder::{JndAnalysis, JndAnalyzer};
pub use error::{EngineError, ParseColorError};
