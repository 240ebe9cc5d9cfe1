// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Agrisim Farmer Adoption Suite - Neighborhood Network

//! Fixed-degree random graph and the neighborhood assigner.
//!
//! The von Neumann-style neighborhood is emulated by a random regular graph
//! of degree 4: every agent gets exactly four neighbors, drawn uniformly,
//! with no self-loops and no parallel edges. The assigner only consumes an
//! edge list, so an externally generated graph can be wired in the same way.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::Farmer;
use crate::error::SimError;

/// Degree of the emulated von Neumann neighborhood.
pub const NEIGHBORHOOD_DEGREE: usize = 4;

/// Restart budget for the pairing-model construction. For degree 4 a single
/// attempt succeeds with probability around e^(-15/4), so a few hundred
/// attempts make failure astronomically unlikely.
const MAX_ATTEMPTS: usize = 2_000;

/// Generate a random `degree`-regular graph on `n` nodes as an edge list.
///
/// Uses the pairing (configuration) model: each node contributes `degree`
/// stubs, the stubs are shuffled into a perfect matching, and the attempt
/// is discarded if it produced a self-loop or a parallel edge.
pub fn random_regular_graph<R: Rng + ?Sized>(
    rng: &mut R,
    degree: usize,
    n: usize,
) -> Result<Vec<(usize, usize)>, SimError> {
    if degree >= n {
        return Err(SimError::PopulationConstruction(format!(
            "cannot build a {degree}-regular graph on {n} nodes"
        )));
    }
    if (degree * n) % 2 != 0 {
        return Err(SimError::PopulationConstruction(format!(
            "no {degree}-regular graph exists on {n} nodes (odd stub count)"
        )));
    }

    let mut stubs: Vec<usize> = (0..n).flat_map(|i| std::iter::repeat(i).take(degree)).collect();

    for _ in 0..MAX_ATTEMPTS {
        stubs.shuffle(rng);
        if let Some(edges) = match_stubs(&stubs) {
            return Ok(edges);
        }
    }

    Err(SimError::PopulationConstruction(format!(
        "pairing model failed to produce a simple {degree}-regular graph \
         on {n} nodes within {MAX_ATTEMPTS} attempts"
    )))
}

/// Pair consecutive stubs into edges; `None` if the matching is not simple.
fn match_stubs(stubs: &[usize]) -> Option<Vec<(usize, usize)>> {
    let mut seen = HashSet::with_capacity(stubs.len() / 2);
    let mut edges = Vec::with_capacity(stubs.len() / 2);
    for pair in stubs.chunks_exact(2) {
        let (a, b) = (pair[0], pair[1]);
        if a == b {
            return None;
        }
        if !seen.insert((a.min(b), a.max(b))) {
            return None;
        }
        edges.push((a, b));
    }
    Some(edges)
}

/// Bind each agent to its neighbors: every edge contributes a neighbor
/// reference in both directions. Fails if an edge endpoint is out of range
/// or any agent would end up without neighbors.
pub fn assign_neighborhoods(
    agents: &mut [Farmer],
    edges: &[(usize, usize)],
) -> Result<(), SimError> {
    let n = agents.len();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(a, b) in edges {
        if a >= n || b >= n {
            return Err(SimError::PopulationConstruction(format!(
                "edge ({a}, {b}) references a node outside the population of {n}"
            )));
        }
        adjacency[a].push(b);
        adjacency[b].push(a);
    }
    for (agent, neighbors) in agents.iter_mut().zip(&adjacency) {
        agent.set_neighborhood(neighbors)?;
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
