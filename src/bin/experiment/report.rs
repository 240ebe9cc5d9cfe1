// Experiment Report Types
// Structured output for the cross-run summary and downstream analysis

use agrisim_engine::Parameters;
use serde::Serialize;

// ─── Statistics (per-metric cross-run aggregation) ──────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                ci_lower: 0.0,
                ci_upper: 0.0,
                min: 0.0,
                max: 0.0,
                n: 0,
            };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }
}

// ─── Single-Run Summary ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: u32,
    pub seed: u64,
    pub final_share_p: f64,
    pub final_total_return: f64,
    pub timesteps: usize,
    pub elapsed_ms: u128,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExperimentReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs: usize,
    pub base_seed: u64,
    pub parameters: Parameters,
    pub final_share_p: Stats,
    pub final_total_return: Stats,
    pub elapsed_ms: Stats,
    pub runs: Vec<RunSummary>,
}
