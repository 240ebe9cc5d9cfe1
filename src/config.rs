// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Agrisim Farmer Adoption Suite - Run Configuration

//! Run parameters, loaded from the JSON specification files.
//!
//! Field names match the specification keys used by the experiment files
//! (`number_of_farmers`, `initial_share_P`, ...), so a specification can be
//! deserialized directly with `serde_json`. The `model` and `model_1_case`
//! strings map onto closed enums: an unrecognized value fails at load time
//! instead of surfacing mid-run.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

// ─── Model variants ─────────────────────────────────────────────────────────

/// The three documented model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelVariant {
    /// `model_0`: every agent re-draws its seed at random each round.
    #[serde(rename = "model_0")]
    Baseline,
    /// `model_1`: agents compare the fixed P net return against an
    /// NP payoff signal (cases A/B/C below).
    #[serde(rename = "model_1")]
    PayoffComparison,
    /// `model_2`: as `model_1`, but the NP payoff grows with NP adoption.
    #[serde(rename = "model_2")]
    NetworkEffects,
}

/// Information source for the payoff comparison in `model_1`/`model_2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionCase {
    /// Population-wide mean NP payoff (public information).
    A,
    /// Mean over the agent's NP-seeded neighbors only.
    B,
    /// As B, averaged 50/50 with the agent's own payoff history.
    C,
    /// Reserved; dispatching on it raises an unimplemented-feature error.
    D,
}

fn default_case() -> DecisionCase {
    DecisionCase::A
}

// ─── Parameters ─────────────────────────────────────────────────────────────

/// Read-only configuration of one run. The engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameters {
    pub model: ModelVariant,
    #[serde(default = "default_case")]
    pub model_1_case: DecisionCase,
    pub number_of_farmers: usize,
    #[serde(rename = "initial_share_P")]
    pub initial_share_p: f64,
    /// Probability of choosing P in a random-choice round.
    #[serde(rename = "p_P")]
    pub p_p: f64,
    #[serde(rename = "fix_return_P")]
    pub fix_return_p: f64,
    #[serde(rename = "yearly_cost_P")]
    pub yearly_cost_p: f64,
    #[serde(rename = "mean_return_NP")]
    pub mean_return_np: f64,
    #[serde(rename = "var_return_NP")]
    pub var_return_np: f64,
    /// Number of trailing wealth entries entering comparison signals.
    pub retrospective_memory: usize,
    pub number_of_timesteps: usize,
}

impl Parameters {
    /// Deterministic per-round net return of the proprietary seed.
    pub fn net_return_p(&self) -> f64 {
        self.fix_return_p - self.yearly_cost_p
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.number_of_farmers == 0 {
            return Err(SimError::Configuration(
                "number_of_farmers must be positive".into(),
            ));
        }
        if self.number_of_timesteps == 0 {
            return Err(SimError::Configuration(
                "number_of_timesteps must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.initial_share_p) {
            return Err(SimError::Configuration(format!(
                "initial_share_P must lie in [0, 1], got {}",
                self.initial_share_p
            )));
        }
        if !(0.0..=1.0).contains(&self.p_p) {
            return Err(SimError::Configuration(format!(
                "p_P must lie in [0, 1], got {}",
                self.p_p
            )));
        }
        if !(self.mean_return_np > 0.0) {
            return Err(SimError::Configuration(format!(
                "mean_return_NP must be positive, got {}",
                self.mean_return_np
            )));
        }
        if !(self.var_return_np > 0.0) {
            return Err(SimError::Configuration(format!(
                "var_return_NP must be positive, got {}",
                self.var_return_np
            )));
        }
        if self.retrospective_memory == 0 {
            return Err(SimError::Configuration(
                "retrospective_memory must be at least 1".into(),
            ));
        }
        if !self.fix_return_p.is_finite() || !self.yearly_cost_p.is_finite() {
            return Err(SimError::Configuration(
                "fix_return_P and yearly_cost_P must be finite".into(),
            ));
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
