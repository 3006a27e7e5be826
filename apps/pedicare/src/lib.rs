//! # PediCare Library
//!
//! This library exposes the PediCare modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod simulation;

pub use error::AppError;

// Re-export pedicare_core for convenience
pub use pedicare_core;
