// Starship Campaign Benchmark Runner
// Monte Carlo campaigns, seedable ChaCha8 well fields, per-tick trajectory output
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- ENHANCED         # Filter by name
//   cargo run --release --bin bench -- --time-series    # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42        # Custom base seed

mod report;
mod scenarios;
mod monte_carlo;
mod time_series;

use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    time_series: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        time_series: false,
        filter: None,
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
            "--time-series" => {
                cli.time_series = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn write_report(report: &BenchReport, timestamp: &str) -> std::io::Result<std::path::PathBuf> {
    let dir = std::path::Path::new("bench-results");
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("bench-{}.json", timestamp));
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    std::fs::write(&path, json)?;
    Ok(path)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    let all_scenarios = scenarios();

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let ts_dir = cli.time_series
        .then(|| std::path::Path::new("bench-results/time-series").to_path_buf());

    println!("\n  Starship Campaign Benchmark");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<26} {:<9} {:>5} {:>14} {:>9} {:>8} {:>7} {:>7}",
        "Scenario", "Preset", "Pass%", "Earned", "BestDist", "BestHt", "Growth", "Time");
    println!("  {}", "-".repeat(92));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let report = monte_carlo::run_monte_carlo(
            scenario,
            cli.runs,
            cli.seed,
            ts_dir.as_deref(),
        );

        let pass_pct = report.pass_rate * 100.0;
        let status = if report.pass_rate >= 1.0 { "PASS" } else { "FAIL" };

        println!("  {:<26} {:<9} {:>4}% {:>8.0}±{:<5.0} {:>9.0} {:>8.0} {:>6.1}x {:>5.0}ms  {}",
            report.scenario_name,
            report.category,
            pass_pct as u32,
            report.total_earned.mean, report.total_earned.half_width(),
            report.best_distance.mean,
            report.best_height.mean,
            report.growth_ratio.mean,
            report.elapsed_ms.mean,
            status,
        );

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= 1.0).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(92));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
        .to_string();

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        scenarios: mc_reports,
    };

    match write_report(&report, &timestamp) {
        Ok(path) => println!("  Results saved to: {}\n", path.display()),
        Err(e) => eprintln!("  Failed to write report: {}", e),
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
