//! Independent restarts.
//!
//! Local search ends in whichever local optimum its random starting tour
//! leads to. [`TrialRunner`] runs several restarts, each with its own tour,
//! rule and random generator, and keeps the cheapest result.

mod config;
mod runner;

pub use config::TrialConfig;
pub use runner::{TrialFactory, TrialResult, TrialRunner};
