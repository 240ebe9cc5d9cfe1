// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Agrisim Farmer Adoption Suite - Simulation Core

//! The simulation engine: timestep loop, aggregate signal, recorded series.
//!
//! One `Model` owns one run: its agent arena, its independently seeded RNG
//! and its time series. Timesteps are strictly sequential; within a step
//! agents decide and earn in population order, and every income uses the
//! NP adopter count taken before any agent moved this round.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::agent::{Farmer, Seed};
use crate::config::{DecisionCase, ModelVariant, Parameters};
use crate::error::SimError;
use crate::population;

// ─── Time series ────────────────────────────────────────────────────────────

/// The seven recorded columns. Each holds `number_of_timesteps + 1`
/// entries after a full run: the pre-loop record plus one per timestep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "Total_return")]
    pub total_return: Vec<f64>,
    #[serde(rename = "Returns_P")]
    pub returns_p: Vec<f64>,
    #[serde(rename = "Returns_NP")]
    pub returns_np: Vec<f64>,
    #[serde(rename = "Returns_P_pc")]
    pub returns_p_pc: Vec<f64>,
    #[serde(rename = "Returns_NP_pc")]
    pub returns_np_pc: Vec<f64>,
    #[serde(rename = "Share_P")]
    pub share_p: Vec<f64>,
    #[serde(rename = "Share_NP")]
    pub share_np: Vec<f64>,
}

impl TimeSeries {
    /// Number of records, indexed by timestep starting at 0.
    pub fn len(&self) -> usize {
        self.total_return.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_return.is_empty()
    }
}

/// A finished run: its identity and the complete time series, ready for
/// the persistence/analysis consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: u32,
    pub seed: u64,
    pub series: TimeSeries,
}

// ─── Model ──────────────────────────────────────────────────────────────────

pub struct Model {
    agents: Vec<Farmer>,
    params: Parameters,
    rng: ChaCha8Rng,
    run_id: u32,
    seed: u64,
    timestep: usize,
    series: TimeSeries,
}

impl Model {
    /// Validate the parameters, build the population and wire its
    /// neighborhoods. Fails before any timestep runs.
    pub fn new(params: Parameters, run_id: u32, seed: u64) -> Result<Self, SimError> {
        params.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let agents = population::build(&params, &mut rng)?;
        let mut model = Self {
            agents,
            params,
            rng,
            run_id,
            seed,
            timestep: 0,
            series: TimeSeries::default(),
        };
        model.record();
        Ok(model)
    }

    pub fn run_id(&self) -> u32 {
        self.run_id
    }

    /// Index of the most recently executed round.
    pub fn timestep(&self) -> usize {
        self.timestep
    }

    pub fn agents(&self) -> &[Farmer] {
        &self.agents
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Drive all `number_of_timesteps` rounds. The initial state was
    /// recorded at construction.
    pub fn run(&mut self) -> Result<(), SimError> {
        for i in 0..self.params.number_of_timesteps {
            self.timestep = i;
            self.update(i)?;
        }
        Ok(())
    }

    pub fn into_result(self) -> RunResult {
        RunResult {
            run_id: self.run_id,
            seed: self.seed,
            series: self.series,
        }
    }

    /// One synchronous round: resolve each agent's comparison signal,
    /// transition its seed, pay its income, then record.
    fn update(&mut self, i: usize) -> Result<(), SimError> {
        // NP adopter count before anyone moves; every income this round
        // uses it.
        let n_np = self
            .agents
            .iter()
            .filter(|a| a.seed() == Seed::NP)
            .count();

        // Population-wide public signal. Round 0 has no realized NP payoff
        // yet and seeds the comparison with the P net return itself (an
        // exact tie), not with a random draw.
        let global_signal = if i == 0 {
            Some(self.params.net_return_p())
        } else {
            self.population_np_signal()
        };

        let memory = self.params.retrospective_memory;
        for idx in 0..self.agents.len() {
            let signal = match (self.params.model, self.params.model_1_case) {
                (ModelVariant::Baseline, _) => None,
                (_, DecisionCase::A) => global_signal,
                (_, DecisionCase::B) => self.agents[idx].local_np_signal(&self.agents, memory),
                (_, DecisionCase::C) => self.agents[idx]
                    .local_np_signal(&self.agents, memory)
                    .map(|s| 0.5 * s + 0.5 * self.agents[idx].trailing_mean(memory)),
                (_, DecisionCase::D) => None,
            };
            self.agents[idx].choose_seed(signal, false, &self.params, &mut self.rng)?;
            self.agents[idx].receive_income(n_np, &self.params, &mut self.rng);
        }

        self.record();
        Ok(())
    }

    /// Mean over NP-seeded agents of each agent's trailing wealth mean;
    /// `None` when nobody currently uses NP.
    fn population_np_signal(&self) -> Option<f64> {
        let memory = self.params.retrospective_memory;
        let mut sum = 0.0;
        let mut count = 0usize;
        for agent in &self.agents {
            if agent.seed() == Seed::NP {
                sum += agent.trailing_mean(memory);
                count += 1;
            }
        }
        (count > 0).then(|| sum / count as f64)
    }

    /// Append one entry to each of the seven series.
    fn record(&mut self) {
        let (mut n_p, mut n_np) = (0usize, 0usize);
        let (mut sum_p, mut sum_np) = (0.0f64, 0.0f64);
        for agent in &self.agents {
            let latest = agent.latest_wealth();
            match agent.seed() {
                Seed::P => {
                    n_p += 1;
                    sum_p += latest;
                }
                Seed::NP => {
                    n_np += 1;
                    sum_np += latest;
                }
            }
        }
        assert_eq!(
            n_p + n_np,
            self.agents.len(),
            "seed groups must partition the population"
        );

        let total = self.agents.len() as f64;
        let share_p = n_p as f64 / total;

        self.series.total_return.push(sum_p + sum_np);
        self.series.returns_p.push(sum_p);
        self.series.returns_np.push(sum_np);
        self.series
            .returns_p_pc
            .push(if n_p > 0 { sum_p / n_p as f64 } else { 0.0 });
        self.series
            .returns_np_pc
            .push(if n_np > 0 { sum_np / n_np as f64 } else { 0.0 });
        self.series.share_p.push(share_p);
        self.series.share_np.push(1.0 - share_p);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
