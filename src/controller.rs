// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Run Controller

//! Sequences one run: launch, step until the flight engine reports a
//! terminal phase, settle earnings into the profile, persist, and go idle.
//!
//! The controller owns every piece of mutable game state. Hosts drive it
//! through [`RunController::step`] (one simulation tick) or
//! [`RunController::frame`] (wall-clock time, converted to fixed steps).

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::achievements::AchievementTracker;
use crate::config::GameConfig;
use crate::economy::{self, Bonuses, PurchaseError};
use crate::field::{self, GravityWell};
use crate::flight::FlightEngine;
use crate::profile::{Profile, ProfileStore};
use crate::scheduler::FixedStepScheduler;
use crate::types::*;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error("a run is already in progress")]
    AlreadyRunning,
}

const CAMERA_LEAD_X: f64 = 200.0;
const CAMERA_LEAD_Y: f64 = 300.0;

// ---------------------------------------------------------------------------
// RunController
// ---------------------------------------------------------------------------

pub struct RunController<S: ProfileStore> {
    config: GameConfig,
    profile: Profile,
    store: S,
    engine: FlightEngine,
    wells: Vec<GravityWell>,
    rng: ChaCha8Rng,
    scheduler: FixedStepScheduler,
    achievements: AchievementTracker,
    /// Bonuses frozen at launch; purchases mid-flight apply to the next run.
    run_bonuses: Bonuses,
    running: bool,
    thrust_active: bool,
    camera: Camera,
    last_summary: Option<FlightSummary>,
}

impl<S: ProfileStore> RunController<S> {
    pub fn new(config: GameConfig, store: S, seed: u64) -> Self {
        let profile = Profile::restore(&store);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let wells = field::generate(&mut rng, &config.field);
        let run_bonuses = Bonuses::from_levels(&profile.upgrade_levels);
        let mut engine = FlightEngine::new(config.flight.clone());
        engine.reset(&run_bonuses);
        let scheduler = FixedStepScheduler::new(config.tick_rate_hz, config.max_catch_up_steps);

        Self {
            config,
            profile,
            store,
            engine,
            wells,
            rng,
            scheduler,
            achievements: AchievementTracker::new(),
            run_bonuses,
            running: false,
            thrust_active: false,
            camera: Camera::default(),
            last_summary: None,
        }
    }

    // ─── Read-only views ────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rocket(&self) -> &RocketState {
        self.engine.state()
    }

    pub fn wells(&self) -> &[GravityWell] {
        &self.wells
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn last_summary(&self) -> Option<&FlightSummary> {
        self.last_summary.as_ref()
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            rocket: self.engine.state(),
            wells: &self.wells,
            camera: self.camera,
            running: self.running,
        }
    }

    // ─── Economy ────────────────────────────────────────────────────────

    /// Bonuses from the profile's current levels.
    pub fn bonuses(&self) -> Bonuses {
        Bonuses::from_levels(&self.profile.upgrade_levels)
    }

    pub fn cost(&self, id: UpgradeId) -> u64 {
        economy::cost(id, &self.profile.upgrade_levels)
    }

    pub fn can_afford(&self, id: UpgradeId) -> bool {
        economy::can_afford(id, self.profile.currency, &self.profile.upgrade_levels)
    }

    pub fn purchase(&mut self, id: UpgradeId) -> Result<u64, PurchaseError> {
        let price = economy::purchase(id, &mut self.profile)?;
        self.persist();
        Ok(price)
    }

    pub fn shop(&self) -> Vec<UpgradeOffer> {
        let levels = &self.profile.upgrade_levels;
        UpgradeId::ALL
            .iter()
            .map(|&id| UpgradeOffer {
                id,
                description: id.description(),
                level: levels.get(id),
                cost: economy::cost(id, levels),
                affordable: economy::can_afford(id, self.profile.currency, levels),
                bonus: economy::bonus(id, levels.get(id)),
            })
            .collect()
    }

    // ─── Run lifecycle ──────────────────────────────────────────────────

    pub fn launch(&mut self) -> Result<(), RunError> {
        if self.running {
            return Err(RunError::AlreadyRunning);
        }
        self.run_bonuses = self.bonuses();
        self.engine.reset(&self.run_bonuses);
        self.wells = field::generate(&mut self.rng, &self.config.field);
        self.achievements.reset();
        self.scheduler.reset();
        self.thrust_active = false;
        self.camera = Camera::default();
        self.last_summary = None;
        self.running = true;
        tracing::debug!(
            wells = self.wells.len(),
            fuel = self.engine.state().max_fuel,
            "launch"
        );
        Ok(())
    }

    /// Thrust input from the host. Ignored while idle.
    pub fn set_thrust(&mut self, active: bool) {
        self.thrust_active = active && self.running;
    }

    /// Advance one simulation tick. No-op while idle.
    pub fn step(&mut self) -> StepReport {
        let mut report = StepReport::default();
        if !self.running {
            return report;
        }
        report.steps = 1;

        self.engine.apply_thrust(self.thrust_active, &self.run_bonuses);
        let outcome = self.engine.tick(&self.wells, &self.run_bonuses);
        for well in &mut self.wells {
            well.advance_phase(self.config.field.phase_step);
        }

        let rocket = self.engine.state();
        self.camera = Camera {
            x: rocket.x - CAMERA_LEAD_X,
            y: rocket.y - CAMERA_LEAD_Y,
        };

        if outcome.assists > 0 {
            report.events.push(GameEvent::GravityAssist { total: rocket.gravity_assists });
        }
        if self.config.achievements {
            report.events.extend(
                self.achievements.observe(rocket).into_iter().map(GameEvent::Achievement),
            );
        }

        if outcome.terminal {
            let summary = self.settle();
            report.events.push(GameEvent::FlightEnded(summary.clone()));
            report.summary = Some(summary);
        }
        report
    }

    /// Run as many fixed steps as `elapsed_ms` of wall time calls for.
    pub fn frame(&mut self, elapsed_ms: f64) -> StepReport {
        let mut report = StepReport::default();
        if !self.running {
            return report;
        }
        for _ in 0..self.scheduler.advance(elapsed_ms) {
            let step = self.step();
            report.steps += step.steps;
            report.events.extend(step.events);
            if step.summary.is_some() {
                report.summary = step.summary;
                break;
            }
        }
        report
    }

    /// Step until the run ends, consulting `pilot` for thrust each tick.
    /// Returns `None` if the run is idle or `max_steps` elapse first.
    pub fn fly<F>(&mut self, mut pilot: F, max_steps: u64) -> Option<FlightSummary>
    where
        F: FnMut(&RocketState) -> bool,
    {
        for _ in 0..max_steps {
            if !self.running {
                return None;
            }
            let thrust = pilot(self.engine.state());
            self.set_thrust(thrust);
            if let Some(summary) = self.step().summary {
                return Some(summary);
            }
        }
        None
    }

    fn settle(&mut self) -> FlightSummary {
        self.running = false;
        self.thrust_active = false;

        let rocket = self.engine.state();
        let distance = rocket.distance.max(0.0).floor() as u64;
        let height = rocket.max_height.max(0.0).floor() as u64;
        let earnings = economy::settlement_earnings(
            distance,
            height,
            rocket.gravity_assists,
            self.run_bonuses.get(UpgradeId::Luck),
        );

        self.profile.currency = self.profile.currency.saturating_add(earnings.total);
        let new_best_distance = distance as f64 > self.profile.best_distance;
        if new_best_distance {
            self.profile.best_distance = distance as f64;
        }
        let new_best_height = height as f64 > self.profile.best_height;
        if new_best_height {
            self.profile.best_height = height as f64;
        }

        let summary = FlightSummary {
            phase: rocket.phase,
            distance,
            height,
            gravity_assists: rocket.gravity_assists,
            base_earnings: earnings.base,
            assist_bonus: earnings.assist_bonus,
            total_earnings: earnings.total,
            new_best_distance,
            new_best_height,
        };
        tracing::info!(
            distance,
            height,
            assists = summary.gravity_assists,
            earned = summary.total_earnings,
            currency = self.profile.currency,
            "flight settled"
        );

        self.persist();
        self.last_summary = Some(summary.clone());
        summary
    }

    /// Abandon the current run without crediting anything.
    pub fn abort(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        self.thrust_active = false;
        self.scheduler.reset();
        if was_running {
            tracing::debug!(ticks = self.engine.state().ticks, "run aborted");
        }
        was_running
    }

    /// Wipe all progress and persist the empty profile.
    pub fn reset_progress(&mut self) {
        self.abort();
        self.profile = Profile::default();
        self.run_bonuses = Bonuses::default();
        self.engine.reset(&self.run_bonuses);
        self.last_summary = None;
        self.camera = Camera::default();
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.profile.save(&mut self.store) {
            tracing::warn!(error = %e, "profile save failed");
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{MemoryStore, PersistenceError};

    fn controller() -> RunController<MemoryStore> {
        RunController::new(GameConfig::default(), MemoryStore::new(), 11)
    }

    #[test]
    fn idle_controller_does_not_step() {
        let mut c = controller();
        let before = c.rocket().clone();
        let report = c.step();
        assert_eq!(report.steps, 0);
        assert_eq!(c.rocket().ticks, before.ticks);
    }

    #[test]
    fn launch_twice_is_rejected() {
        let mut c = controller();
        assert_eq!(c.launch(), Ok(()));
        assert_eq!(c.launch(), Err(RunError::AlreadyRunning));
    }

    #[test]
    fn launch_regenerates_field() {
        let mut c = controller();
        let initial = c.wells().to_vec();
        c.launch().expect("test: idle");
        assert_eq!(c.wells().len(), 15);
        assert_ne!(c.wells(), initial.as_slice());
    }

    #[test]
    fn thrust_is_ignored_while_idle() {
        let mut c = controller();
        c.set_thrust(true);
        assert!(!c.thrust_active);
        c.launch().expect("test: idle");
        assert!(!c.thrust_active, "launch clears thrust input");
    }

    #[test]
    fn completed_run_settles_and_persists() {
        let mut c = controller();
        c.launch().expect("test: idle");
        let summary = c.fly(|_| false, 10_000).expect("test: run finishes");
        assert!(!c.is_running());
        assert!(summary.total_earnings > 0);
        assert_eq!(c.profile().currency, summary.total_earnings);
        assert_eq!(c.profile().best_distance, summary.distance as f64);
        assert!(summary.new_best_distance && summary.new_best_height);
        assert_eq!(c.last_summary(), Some(&summary));
        assert_eq!(Profile::restore(c.store()), *c.profile());
    }

    #[test]
    fn abort_credits_nothing() {
        let mut c = controller();
        c.launch().expect("test: idle");
        for _ in 0..20 {
            c.step();
        }
        assert!(c.abort());
        assert!(!c.abort());
        assert_eq!(c.profile().currency, 0);
        assert!(c.last_summary().is_none());
        assert_eq!(c.store().writes, 0);
        assert_eq!(c.step().steps, 0);
    }

    #[test]
    fn purchase_mid_flight_waits_for_next_launch() {
        let store = MemoryStore::with_blob(r#"{"currency":1000}"#);
        let mut c = RunController::new(GameConfig::default(), store, 3);
        c.launch().expect("test: idle");
        c.purchase(UpgradeId::Ramp).expect("test: affordable");
        assert_eq!(c.run_bonuses.get(UpgradeId::Ramp), 0.0);
        c.abort();
        c.launch().expect("test: idle");
        assert_eq!(c.rocket().vx, 15.0);
    }

    #[test]
    fn purchase_persists_and_rejects_when_broke() {
        let store = MemoryStore::with_blob(r#"{"currency":160}"#);
        let mut c = RunController::new(GameConfig::default(), store, 3);
        assert_eq!(c.purchase(UpgradeId::Thrust), Ok(150));
        assert_eq!(c.store().writes, 1);
        assert!(c.purchase(UpgradeId::Thrust).is_err());
        assert_eq!(c.store().writes, 1);
        assert_eq!(c.profile().currency, 10);
        assert_eq!(c.cost(UpgradeId::Thrust), 225);
        assert!(!c.can_afford(UpgradeId::Fuel));
    }

    #[test]
    fn shop_lists_every_upgrade() {
        let store = MemoryStore::with_blob(r#"{"currency":300,"upgradeLevels":{"luck":2}}"#);
        let c = RunController::new(GameConfig::default(), store, 3);
        let shop = c.shop();
        assert_eq!(shop.len(), UpgradeId::ALL.len());
        let luck = shop.iter().find(|o| o.id == UpgradeId::Luck).expect("test: listed");
        assert_eq!((luck.level, luck.cost, luck.bonus), (2, 900, 20.0));
        assert!(!luck.affordable);
        let fuel = shop.iter().find(|o| o.id == UpgradeId::Fuel).expect("test: listed");
        assert!(fuel.affordable);
    }

    #[test]
    fn reset_progress_zeroes_and_persists() {
        let store = MemoryStore::with_blob(
            r#"{"currency":999,"bestDistance":40,"bestHeight":5,"upgradeLevels":{"fuel":3}}"#,
        );
        let mut c = RunController::new(GameConfig::default(), store, 3);
        c.launch().expect("test: idle");
        c.reset_progress();
        assert!(!c.is_running());
        assert_eq!(*c.profile(), Profile::default());
        assert_eq!(Profile::restore(c.store()), Profile::default());
        assert_eq!(c.rocket().max_fuel, 100.0);
    }

    #[test]
    fn camera_follows_rocket() {
        let mut c = controller();
        c.launch().expect("test: idle");
        c.step();
        let r = c.rocket();
        assert_eq!(c.camera(), Camera { x: r.x - 200.0, y: r.y - 300.0 });
    }

    #[test]
    fn frame_converts_wall_time_to_steps() {
        let mut c = controller();
        assert_eq!(c.frame(1000.0).steps, 0);
        c.launch().expect("test: idle");
        assert_eq!(c.frame(60.0).steps, 3);
        assert_eq!(c.rocket().ticks, 3);
    }

    struct BrokenStore;

    impl ProfileStore for BrokenStore {
        fn load(&self) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Storage("quota".into()))
        }
        fn save(&mut self, _blob: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Storage("quota".into()))
        }
    }

    #[test]
    fn storage_failures_do_not_stop_play() {
        let mut c = RunController::new(GameConfig::default(), BrokenStore, 5);
        c.launch().expect("test: idle");
        let summary = c.fly(|_| false, 10_000).expect("test: run finishes");
        assert_eq!(c.profile().currency, summary.total_earnings);
    }
}
