//! figclass-test - Regression test framework for figclass
//!
//! This crate provides a small regression harness modeled on classic
//! `regutils`-style image regression tests, plus deterministic synthetic
//! figures to run them on.
//!
//! - **Compare** (default): check computed values against expectations
//! - **Display**: also print every check as it passes
//!
//! # Usage
//!
//! ```ignore
//! use figclass_test::{RegParams, fixtures};
//!
//! let img = fixtures::solid(64, 64, fixtures::WHITE).unwrap();
//! let mut rp = RegParams::new("features");
//! rp.compare_values(0.0, contrast, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
