// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Agrisim Farmer Adoption Suite

//! Agent-based model of seed technology adoption.
//!
//! A population of farmers repeatedly chooses between a proprietary seed
//! (P, deterministic net return) and a non-proprietary alternative (NP,
//! stochastic or adoption-dependent return), based on comparative payoff
//! information spread over a fixed-degree random network. One [`Model`] is
//! one independent run; experiments repeat many runs under identical
//! parameters with independently seeded RNGs and aggregate the persisted
//! time series downstream.

pub mod agent;
pub mod config;
pub mod error;
pub mod model;
pub mod network;
pub mod population;
pub mod variate;

pub use agent::{Farmer, Seed};
pub use config::{DecisionCase, ModelVariant, Parameters};
pub use error::SimError;
pub use model::{Model, RunResult, TimeSeries};
