// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Agrisim Farmer Adoption Suite - Population Factory

//! Initial population construction: the P/NP split and neighborhood wiring.

use rand::Rng;

use crate::agent::{Farmer, Seed};
use crate::config::Parameters;
use crate::error::SimError;
use crate::network;

/// Build the initial agent arena.
///
/// `floor(initial_share_P * number_of_farmers)` agents start with the P
/// seed, the remainder with NP, in that fixed order. All agents are then
/// wired into a degree-4 random regular neighborhood graph.
pub fn build<R: Rng + ?Sized>(
    params: &Parameters,
    rng: &mut R,
) -> Result<Vec<Farmer>, SimError> {
    let n = params.number_of_farmers;
    let init_nb_p = (params.initial_share_p * n as f64).floor() as usize;
    let init_nb_np = n - init_nb_p;

    let mut agents: Vec<Farmer> = std::iter::repeat_with(|| Farmer::new(Seed::P))
        .take(init_nb_p)
        .chain(std::iter::repeat_with(|| Farmer::new(Seed::NP)).take(init_nb_np))
        .collect();
    if agents.len() != n {
        return Err(SimError::PopulationConstruction(format!(
            "split produced {} agents, expected {n}",
            agents.len()
        )));
    }

    let edges = network::random_regular_graph(rng, network::NEIGHBORHOOD_DEGREE, n)?;
    network::assign_neighborhoods(&mut agents, &edges)?;
    Ok(agents)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
