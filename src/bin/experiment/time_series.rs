// Per-Run JSONL Time Series Writer
// One JSON line per recorded timestep, for independent analysis

use agrisim_engine::RunResult;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub run_id: u32,
    pub timestep: usize,
    #[serde(rename = "Total_return")]
    pub total_return: f64,
    #[serde(rename = "Returns_P")]
    pub returns_p: f64,
    #[serde(rename = "Returns_NP")]
    pub returns_np: f64,
    #[serde(rename = "Returns_P_pc")]
    pub returns_p_pc: f64,
    #[serde(rename = "Returns_NP_pc")]
    pub returns_np_pc: f64,
    #[serde(rename = "Share_P")]
    pub share_p: f64,
    #[serde(rename = "Share_NP")]
    pub share_np: f64,
}

/// Flatten a finished run into per-timestep records.
pub fn step_records(result: &RunResult) -> Vec<StepRecord> {
    let s = &result.series;
    (0..s.len())
        .map(|t| StepRecord {
            run_id: result.run_id,
            timestep: t,
            total_return: s.total_return[t],
            returns_p: s.returns_p[t],
            returns_np: s.returns_np[t],
            returns_p_pc: s.returns_p_pc[t],
            returns_np_pc: s.returns_np_pc[t],
            share_p: s.share_p[t],
            share_np: s.share_np[t],
        })
        .collect()
}

/// Write one run's series as JSONL.
pub fn write_jsonl(result: &RunResult, path: &std::path::Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;
    for record in step_records(result) {
        let line = serde_json::to_string(&record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writeln!(file, "{}", line)?;
    }
    Ok(())
}
