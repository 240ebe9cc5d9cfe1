// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Agrisim Farmer Adoption Suite - Farmer Agent

//! The farmer agent: seed choice, wealth history, neighborhood.
//!
//! Agents live in an arena owned by the model; neighborhoods are plain
//! index lists into that arena, so cross-agent access is read-only lookup
//! rather than a graph of pointers. An agent never writes another agent's
//! state.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{DecisionCase, ModelVariant, Parameters};
use crate::error::SimError;
use crate::variate;

// ─── Seed choice ────────────────────────────────────────────────────────────

/// The two seed technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seed {
    /// Proprietary: deterministic net return `fix_return_P - yearly_cost_P`.
    P,
    /// Non-proprietary: stochastic or adoption-dependent return.
    NP,
}

// ─── Farmer ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Farmer {
    seed: Seed,
    /// One entry per timestep, index 0 is the initialization value 0.0.
    /// Append-only; prior entries are never rewritten.
    wealth: Vec<f64>,
    /// Indices of neighboring agents in the population arena.
    neighborhood: Vec<usize>,
}

impl Farmer {
    pub fn new(initial_seed: Seed) -> Self {
        Self {
            seed: initial_seed,
            wealth: vec![0.0],
            neighborhood: Vec::new(),
        }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn wealth(&self) -> &[f64] {
        &self.wealth
    }

    /// The payoff recorded for the most recent timestep.
    pub fn latest_wealth(&self) -> f64 {
        self.wealth.last().copied().unwrap_or(0.0)
    }

    pub fn neighborhood(&self) -> &[usize] {
        &self.neighborhood
    }

    /// Store a copy of the neighbor index list. Rejects empty input; a wired
    /// agent always observes at least one neighbor.
    pub fn set_neighborhood(&mut self, neighbors: &[usize]) -> Result<(), SimError> {
        if neighbors.is_empty() {
            return Err(SimError::PopulationConstruction(
                "agent neighborhood must not be empty".into(),
            ));
        }
        self.neighborhood = neighbors.to_vec();
        Ok(())
    }

    /// Mean of the last `memory` wealth entries (all entries when the
    /// history is shorter).
    pub fn trailing_mean(&self, memory: usize) -> f64 {
        let start = self.wealth.len().saturating_sub(memory);
        let window = &self.wealth[start..];
        window.iter().sum::<f64>() / window.len() as f64
    }

    /// Mean over this agent's NP-seeded neighbors of each neighbor's
    /// trailing wealth mean. `None` when no neighbor currently uses NP:
    /// that round carries no local NP information.
    pub fn local_np_signal(&self, agents: &[Farmer], memory: usize) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for &j in &self.neighborhood {
            let neighbor = &agents[j];
            if neighbor.seed == Seed::NP {
                sum += neighbor.trailing_mean(memory);
                count += 1;
            }
        }
        (count > 0).then(|| sum / count as f64)
    }

    /// Seed-choice transition for one round.
    ///
    /// `mean_np_signal` is the already-resolved comparison value for this
    /// agent (population mean for case A, neighborhood mean for B, the
    /// self-weighted blend for C). `None` marks a round without any NP
    /// observation; the comparison degenerates to the unbiased coin flip,
    /// which is the defined fallback for an empty NP group.
    pub fn choose_seed<R: Rng + ?Sized>(
        &mut self,
        mean_np_signal: Option<f64>,
        first_round: bool,
        params: &Parameters,
        rng: &mut R,
    ) -> Result<(), SimError> {
        let random_draw = params.model == ModelVariant::Baseline
            || (first_round
                && matches!(
                    params.model,
                    ModelVariant::PayoffComparison | ModelVariant::NetworkEffects
                ));
        if random_draw {
            self.seed = if rng.gen_bool(params.p_p) { Seed::P } else { Seed::NP };
            return Ok(());
        }

        match params.model_1_case {
            DecisionCase::A | DecisionCase::B | DecisionCase::C => {
                let net_p = params.net_return_p();
                self.seed = match mean_np_signal {
                    Some(signal) if !signal.is_finite() => {
                        return Err(SimError::DegenerateSignal(format!(
                            "NP comparison signal is {signal}"
                        )));
                    }
                    Some(signal) if net_p > signal => Seed::P,
                    Some(signal) if net_p < signal => Seed::NP,
                    // Exact tie, or no NP observation at all.
                    _ => {
                        if rng.gen_bool(0.5) {
                            Seed::P
                        } else {
                            Seed::NP
                        }
                    }
                };
                Ok(())
            }
            DecisionCase::D => Err(SimError::Unimplemented("decision case D")),
        }
    }

    /// Append this round's payoff to the wealth history.
    ///
    /// `n_np_users` is the NP adopter count at the start of the round; the
    /// network-effect payoff of `model_2` is pinned to twice the P net
    /// return at full adoption and 0.0 at none.
    pub fn receive_income<R: Rng + ?Sized>(
        &mut self,
        n_np_users: usize,
        params: &Parameters,
        rng: &mut R,
    ) {
        let income = match (params.model, self.seed) {
            (_, Seed::P) => params.net_return_p(),
            (ModelVariant::Baseline | ModelVariant::PayoffComparison, Seed::NP) => {
                variate::positive_normal(rng, params.mean_return_np, params.var_return_np)
            }
            (ModelVariant::NetworkEffects, Seed::NP) => {
                2.0 * params.net_return_p()
                    * (n_np_users as f64 / params.number_of_farmers as f64)
            }
        };
        self.wealth.push(income);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::baseline;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1)
    }

    fn comparison_params(case: DecisionCase) -> Parameters {
        let mut p = baseline();
        p.model = ModelVariant::PayoffComparison;
        p.model_1_case = case;
        p
    }

    #[test]
    fn new_agent_starts_with_zero_wealth() {
        let f = Farmer::new(Seed::P);
        assert_eq!(f.wealth(), &[0.0]);
        assert_eq!(f.latest_wealth(), 0.0);
        assert!(f.neighborhood().is_empty());
    }

    #[test]
    fn neighborhood_setter_rejects_empty_and_copies() {
        let mut f = Farmer::new(Seed::P);
        assert!(f.set_neighborhood(&[]).is_err());

        let mut source = vec![1, 2, 3, 4];
        f.set_neighborhood(&source).expect("test: non-empty");
        source.push(99);
        source[0] = 7;
        assert_eq!(f.neighborhood(), &[1, 2, 3, 4]);
    }

    #[test]
    fn trailing_mean_uses_last_entries_only() {
        let mut f = Farmer::new(Seed::NP);
        f.wealth.extend_from_slice(&[2.0, 4.0, 6.0]);
        // History is [0.0, 2.0, 4.0, 6.0].
        assert_eq!(f.trailing_mean(2), 5.0);
        assert_eq!(f.trailing_mean(3), 4.0);
        assert_eq!(f.trailing_mean(100), 3.0);
    }

    #[test]
    fn case_a_comparison_is_deterministic_off_tie() {
        let params = comparison_params(DecisionCase::A);
        let net_p = params.net_return_p();
        let mut rng = rng();

        let mut f = Farmer::new(Seed::NP);
        f.choose_seed(Some(net_p - 1.0), false, &params, &mut rng)
            .expect("test: case A");
        assert_eq!(f.seed(), Seed::P);

        f.choose_seed(Some(net_p + 1.0), false, &params, &mut rng)
            .expect("test: case A");
        assert_eq!(f.seed(), Seed::NP);
    }

    #[test]
    fn case_a_tie_converges_to_even_split() {
        let params = comparison_params(DecisionCase::A);
        let net_p = params.net_return_p();
        let mut rng = rng();
        let trials = 10_000;
        let mut p_count = 0;
        for _ in 0..trials {
            let mut f = Farmer::new(Seed::NP);
            f.choose_seed(Some(net_p), false, &params, &mut rng)
                .expect("test: tie");
            if f.seed() == Seed::P {
                p_count += 1;
            }
        }
        let share = p_count as f64 / trials as f64;
        assert!((share - 0.5).abs() < 0.02, "tie split {share} not near 0.5");
    }

    #[test]
    fn missing_signal_falls_back_to_coin_flip() {
        let params = comparison_params(DecisionCase::B);
        let mut rng = rng();
        let trials = 10_000;
        let mut p_count = 0;
        for _ in 0..trials {
            let mut f = Farmer::new(Seed::NP);
            f.choose_seed(None, false, &params, &mut rng)
                .expect("test: fallback");
            if f.seed() == Seed::P {
                p_count += 1;
            }
        }
        let share = p_count as f64 / trials as f64;
        assert!((share - 0.5).abs() < 0.02, "fallback split {share}");
    }

    #[test]
    fn non_finite_signal_is_rejected() {
        let params = comparison_params(DecisionCase::A);
        let mut f = Farmer::new(Seed::NP);
        let err = f
            .choose_seed(Some(f64::NAN), false, &params, &mut rng())
            .expect_err("test: NaN signal");
        assert!(matches!(err, SimError::DegenerateSignal(_)));
    }

    #[test]
    fn case_d_is_unimplemented() {
        let params = comparison_params(DecisionCase::D);
        let mut f = Farmer::new(Seed::P);
        let err = f
            .choose_seed(Some(1.0), false, &params, &mut rng())
            .expect_err("test: case D");
        assert!(matches!(err, SimError::Unimplemented(_)));
    }

    #[test]
    fn first_round_overrides_comparison() {
        let mut params = comparison_params(DecisionCase::A);
        params.p_p = 1.0;
        let mut f = Farmer::new(Seed::NP);
        // Signal strongly favors NP, but the first round draws at random
        // and p_P = 1.0 forces P.
        f.choose_seed(Some(1e9), true, &params, &mut rng())
            .expect("test: first round");
        assert_eq!(f.seed(), Seed::P);
    }

    #[test]
    fn baseline_ignores_history_every_round() {
        let mut params = baseline();
        params.p_p = 0.0;
        let mut f = Farmer::new(Seed::P);
        for _ in 0..10 {
            f.choose_seed(None, false, &params, &mut rng())
                .expect("test: baseline");
            assert_eq!(f.seed(), Seed::NP);
        }
    }

    #[test]
    fn local_np_signal_filters_np_neighbors() {
        let params = comparison_params(DecisionCase::B);
        let mut agents = vec![
            Farmer::new(Seed::P),
            Farmer::new(Seed::NP),
            Farmer::new(Seed::NP),
            Farmer::new(Seed::P),
        ];
        agents[1].wealth.extend_from_slice(&[10.0, 20.0]);
        agents[2].wealth.extend_from_slice(&[30.0, 40.0]);
        agents[0]
            .set_neighborhood(&[1, 2, 3])
            .expect("test: neighborhood");

        let signal = agents[0]
            .local_np_signal(&agents, params.retrospective_memory)
            .expect("test: NP neighbors present");
        // Neighbor 1 window [0, 10, 20] -> 10; neighbor 2 [0, 30, 40] -> 70/3.
        assert!((signal - (10.0 + 70.0 / 3.0) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn local_np_signal_empty_when_no_np_neighbor() {
        let mut agents = vec![Farmer::new(Seed::P), Farmer::new(Seed::P)];
        agents[0].set_neighborhood(&[1]).expect("test: neighborhood");
        assert_eq!(agents[0].local_np_signal(&agents, 3), None);
    }

    #[test]
    fn income_is_fixed_for_p_seed() {
        let params = baseline();
        let mut f = Farmer::new(Seed::P);
        f.receive_income(0, &params, &mut rng());
        f.receive_income(50, &params, &mut rng());
        assert_eq!(f.wealth(), &[0.0, 8.0, 8.0]);
    }

    #[test]
    fn np_income_stays_within_variate_support() {
        let params = baseline();
        let mut f = Farmer::new(Seed::NP);
        let mut rng = rng();
        for _ in 0..1_000 {
            f.receive_income(0, &params, &mut rng);
            let x = f.latest_wealth();
            assert!((0.0..=2.0 * params.mean_return_np).contains(&x));
        }
        assert_eq!(f.wealth().len(), 1_001);
    }

    #[test]
    fn network_effect_payoff_boundaries() {
        let mut params = baseline();
        params.model = ModelVariant::NetworkEffects;
        let mut rng = rng();

        let mut f = Farmer::new(Seed::NP);
        f.receive_income(params.number_of_farmers, &params, &mut rng);
        assert_eq!(f.latest_wealth(), 2.0 * params.net_return_p());

        f.receive_income(0, &params, &mut rng);
        assert_eq!(f.latest_wealth(), 0.0);

        // Half adoption sits exactly at the P net return.
        f.receive_income(params.number_of_farmers / 2, &params, &mut rng);
        assert_eq!(f.latest_wealth(), params.net_return_p());
    }

    #[test]
    fn network_effect_p_seed_unchanged() {
        let mut params = baseline();
        params.model = ModelVariant::NetworkEffects;
        let mut f = Farmer::new(Seed::P);
        f.receive_income(params.number_of_farmers, &params, &mut rng());
        assert_eq!(f.latest_wealth(), params.net_return_p());
    }
}
