//! cmap2d - perceptual quality evaluation of 2D colormaps
//!
//! Command-line front end for the `jnd-engine` crate: a catalog of built-in
//! colormaps, YAML configuration, and JSON reports.
//! This library exposes modules for integration testing.

pub mod colormaps;
pub mod error;
pub mod models;
pub mod services;
