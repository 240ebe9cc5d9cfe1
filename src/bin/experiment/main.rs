// Agrisim Experiment Runner — repeated independent runs, seedable PRNG,
// per-run JSONL time series, cross-run summary report
//
// Usage:
//   cargo run --release --bin experiment -- --params specs/baseline.json
//   cargo run --release --bin experiment -- --params spec.json --runs 50
//   cargo run --release --bin experiment -- --params spec.json --seed 42
//   cargo run --release --bin experiment -- --params spec.json --out results

mod report;
mod time_series;

use agrisim_engine::{Model, Parameters};
use report::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    params: Option<String>,
    out: String,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        params: None,
        out: "output".to_string(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--params" => {
                i += 1;
                if i < args.len() {
                    cli.params = Some(args[i].clone());
                }
            }
            "--out" => {
                i += 1;
                if i < args.len() {
                    cli.out = args[i].clone();
                }
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    if let Err(e) = run_experiment() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run_experiment() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args();
    let params_path = cli
        .params
        .ok_or("missing --params <file.json> (the run specification)")?;

    let spec = std::fs::read_to_string(&params_path)?;
    let params: Parameters = serde_json::from_str(&spec)?;
    params.validate()?;

    let stem = std::path::Path::new(&params_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("experiment")
        .to_string();
    let out_dir = std::path::Path::new(&cli.out);
    std::fs::create_dir_all(out_dir)?;

    println!("\n  Agrisim Experiment Runner v0.2.0");
    println!(
        "  PRNG: ChaCha8Rng | Runs: {} | Base seed: {} | Spec: {}",
        cli.runs, cli.seed, params_path
    );
    println!(
        "  Model: {:?} | Case: {:?} | Farmers: {} | Timesteps: {}\n",
        params.model, params.model_1_case, params.number_of_farmers, params.number_of_timesteps
    );
    println!(
        "  {:<8} {:>12} {:>10} {:>14} {:>8}",
        "Run", "Seed", "Share_P", "Total_return", "Time"
    );
    println!("  {}", "-".repeat(56));

    let suite_start = Instant::now();
    let mut summaries = Vec::with_capacity(cli.runs);

    for i in 0..cli.runs {
        let run_id = (i + 1) as u32;
        let seed = cli.seed + i as u64;
        let run_start = Instant::now();

        let mut model = Model::new(params.clone(), run_id, seed)?;
        model.run()?;
        let result = model.into_result();

        let path = out_dir.join(format!("{stem}_data_{run_id:03}.jsonl"));
        time_series::write_jsonl(&result, &path)?;

        let elapsed_ms = run_start.elapsed().as_millis();
        let last = result.series.len() - 1;
        let summary = RunSummary {
            run_id,
            seed,
            final_share_p: result.series.share_p[last],
            final_total_return: result.series.total_return[last],
            timesteps: last,
            elapsed_ms,
        };
        println!(
            "  {:<8} {:>12} {:>10.3} {:>14.2} {:>6}ms",
            summary.run_id,
            summary.seed,
            summary.final_share_p,
            summary.final_total_return,
            summary.elapsed_ms
        );
        summaries.push(summary);
    }

    let final_share_p =
        Stats::from_samples(&summaries.iter().map(|r| r.final_share_p).collect::<Vec<_>>());
    let final_total_return = Stats::from_samples(
        &summaries.iter().map(|r| r.final_total_return).collect::<Vec<_>>(),
    );
    let elapsed_ms = Stats::from_samples(
        &summaries.iter().map(|r| r.elapsed_ms as f64).collect::<Vec<_>>(),
    );

    println!("  {}", "-".repeat(56));
    println!(
        "  Share_P: {:.3} ± {:.3}   Total_return: {:.2} ± {:.2}   Suite: {:.1}s\n",
        final_share_p.mean,
        (final_share_p.ci_upper - final_share_p.ci_lower) / 2.0,
        final_total_return.mean,
        (final_total_return.ci_upper - final_total_return.ci_lower) / 2.0,
        suite_start.elapsed().as_secs_f64()
    );

    let ts = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    let report = ExperimentReport {
        timestamp: format!("{ts}"),
        version: "0.2.0",
        prng: "ChaCha8Rng",
        n_runs: cli.runs,
        base_seed: cli.seed,
        parameters: params,
        final_share_p,
        final_total_return,
        elapsed_ms,
        runs: summaries,
    };
    let report_path = out_dir.join(format!("{stem}_report_{ts}.json"));
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&report_path, &json)?;
    println!("  Results saved to: {}\n", report_path.display());

    Ok(())
}
