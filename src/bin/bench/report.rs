// Campaign Benchmark Report Types
// Structured output for balancing the upgrade economy

use serde::Serialize;

// ─── Statistics (per-metric Monte Carlo aggregation) ────────────────────────

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
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
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

    pub fn half_width(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

// ─── Single-Campaign Result ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct BenchResult {
    pub scenario: String,
    pub seed: u64,
    pub pass: bool,
    pub flights: u32,
    pub landed: u32,
    pub exited: u32,
    pub capped: u32,
    pub total_earned: u64,
    pub final_currency: u64,
    pub upgrades_bought: u32,
    pub upgrade_spend: u64,
    pub best_distance: f64,
    pub best_height: f64,
    pub total_assists: u32,
    pub mean_flight_ticks: f64,
    pub earnings_first_flight: u64,
    pub earnings_last_flight: u64,
    pub elapsed_ms: u128,
}

// ─── Monte Carlo Aggregate ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MonteCarloReport {
    pub scenario_name: String,
    pub label: String,
    pub category: String,
    pub n_runs: usize,
    pub pass_rate: f64,
    pub total_earned: Stats,
    pub best_distance: Stats,
    pub best_height: Stats,
    pub total_assists: Stats,
    pub upgrades_bought: Stats,
    pub mean_flight_ticks: Stats,
    pub growth_ratio: Stats,
    pub elapsed_ms: Stats,
    pub individual_runs: Vec<BenchResult>,
}

// ─── Suite Report ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub timestamp: String,
    pub version: &'static str,
    pub prng: &'static str,
    pub n_runs_per_scenario: usize,
    pub summary: Summary,
    pub scenarios: Vec<MonteCarloReport>,
}
