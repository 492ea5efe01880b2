// Monte Carlo Infrastructure: N campaigns per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N-1, computing mean ± 95% CI

use starship_engine::*;

use crate::report::*;
use crate::scenarios::Scenario;
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Hard stop per flight, well past the engine's own tick cap.
const STEP_BUDGET_FACTOR: u64 = 2;

/// Run a single campaign with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> BenchResult {
    let start = Instant::now();
    let config = GameConfig { flight: scenario.flight.clone(), ..Default::default() };
    let max_ticks = config.flight.max_ticks;
    let step_budget = max_ticks.saturating_mul(STEP_BUDGET_FACTOR);
    let mut game = RunController::new(config, MemoryStore::new(), seed);

    let mut recorder = time_series_dir.map(|_| TimeSeriesRecorder::new());

    let mut ledger: u64 = 0;
    let mut ledger_holds = true;
    let mut unterminated = 0u32;
    let mut landed = 0u32;
    let mut exited = 0u32;
    let mut capped = 0u32;
    let mut total_earned = 0u64;
    let mut upgrades_bought = 0u32;
    let mut upgrade_spend = 0u64;
    let mut total_assists = 0u32;
    let mut total_ticks = 0u64;
    let mut earnings_first_flight = 0u64;
    let mut earnings_last_flight = 0u64;

    for flight in 0..scenario.flights {
        if game.launch().is_err() {
            unterminated += 1;
            game.abort();
            continue;
        }

        let pilot = scenario.pilot;
        let summary = game.fly(
            |rocket| {
                if let Some(ts) = recorder.as_mut() {
                    ts.record(flight, rocket);
                }
                pilot.thrust(rocket)
            },
            step_budget,
        );

        let Some(summary) = summary else {
            unterminated += 1;
            game.abort();
            continue;
        };

        let ticks = game.rocket().ticks;
        total_ticks += ticks;
        match summary.phase {
            FlightPhase::Landed => landed += 1,
            FlightPhase::Exited if ticks >= max_ticks => capped += 1,
            _ => exited += 1,
        }

        total_earned += summary.total_earnings;
        total_assists += summary.gravity_assists;
        ledger += summary.total_earnings;
        if flight == 0 {
            earnings_first_flight = summary.total_earnings;
        }
        earnings_last_flight = summary.total_earnings;

        while let Some(id) = scenario.shopping.pick(&game.shop()) {
            match game.purchase(id) {
                Ok(paid) => {
                    ledger = ledger.saturating_sub(paid);
                    upgrade_spend += paid;
                    upgrades_bought += 1;
                }
                Err(_) => break,
            }
        }

        if game.profile().currency != ledger {
            ledger_holds = false;
        }
    }

    if let (Some(ts), Some(dir)) = (&recorder, time_series_dir) {
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = ts.write_jsonl(&path) {
            eprintln!("  Warning: failed to write time series: {}", e);
        }
    }

    let flown = scenario.flights.saturating_sub(unterminated).max(1);
    let profile = game.profile();

    BenchResult {
        scenario: scenario.label.to_string(),
        seed,
        pass: unterminated == 0 && ledger_holds,
        flights: scenario.flights,
        landed,
        exited,
        capped,
        total_earned,
        final_currency: profile.currency,
        upgrades_bought,
        upgrade_spend,
        best_distance: profile.best_distance,
        best_height: profile.best_height,
        total_assists,
        mean_flight_ticks: total_ticks as f64 / f64::from(flown),
        earnings_first_flight,
        earnings_last_flight,
        elapsed_ms: start.elapsed().as_millis(),
    }
}

/// Run Monte Carlo: N campaigns of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> MonteCarloReport {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let results = (0..n_runs)
        .map(|i| run_single(scenario, base_seed + i as u64, ts_dir.as_deref()))
        .collect();

    aggregate(scenario, results)
}

fn stats_of(results: &[BenchResult], metric: impl Fn(&BenchResult) -> f64) -> Stats {
    Stats::from_samples(&results.iter().map(metric).collect::<Vec<_>>())
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = if n == 0 { 0.0 } else { passed as f64 / n as f64 };

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate,
        total_earned: stats_of(&results, |r| r.total_earned as f64),
        best_distance: stats_of(&results, |r| r.best_distance),
        best_height: stats_of(&results, |r| r.best_height),
        total_assists: stats_of(&results, |r| f64::from(r.total_assists)),
        upgrades_bought: stats_of(&results, |r| f64::from(r.upgrades_bought)),
        mean_flight_ticks: stats_of(&results, |r| r.mean_flight_ticks),
        growth_ratio: stats_of(&results, |r| {
            r.earnings_last_flight as f64 / (r.earnings_first_flight.max(1)) as f64
        }),
        elapsed_ms: stats_of(&results, |r| r.elapsed_ms as f64),
        individual_runs: results,
    }
}
