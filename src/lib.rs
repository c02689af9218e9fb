//! camview library crate.
//!
//! Exposes the capture, preprocessing, and display-loop components for
//! integration testing.

pub mod capture;
pub mod cli;
pub mod config;
pub mod display;
pub mod preprocess;
pub mod rate;
pub mod run;
