// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Flight Engine

//! Per-tick rocket integration.
//!
//! One call to [`FlightEngine::tick`] is one 60 Hz animation frame:
//! gravity, quadratic drag, lift, gravity assists, a single semi-implicit
//! Euler position step, heading update, record tracking and the terminal
//! checks, in that order. Once the rocket has landed or left the corridor
//! the engine ignores further ticks and thrust until the next `reset`.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::config::FlightConfig;
use crate::economy::Bonuses;
use crate::field::GravityWell;
use crate::types::{FlightPhase, RocketState, UpgradeId};

// ─── Gravity assist ──────────────────────────────────────────────────────────

/// Velocity impulse granted by one well on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssistImpulse {
    pub dvx: f64,
    pub dvy: f64,
    /// Linear falloff: 0 at the detection boundary, approaching 1 at the well.
    pub strength: f64,
}

/// Slingshot heuristic: a push perpendicular to the rocket-to-well direction,
/// rotated a fixed +90°. `None` outside the detection ring or inside the well.
pub fn gravity_assist(
    x: f64,
    y: f64,
    well: &GravityWell,
    detection_range: f64,
    power: f64,
) -> Option<AssistImpulse> {
    let dx = well.x - x;
    let dy = well.y - y;
    let distance = dx.hypot(dy);
    if distance >= detection_range || distance <= well.radius {
        return None;
    }
    let strength = (detection_range - distance) / detection_range;
    let direction = dy.atan2(dx) + FRAC_PI_2;
    let magnitude = strength * power;
    Some(AssistImpulse {
        dvx: direction.cos() * magnitude,
        dvy: direction.sin() * magnitude,
        strength,
    })
}

/// Signed smallest rotation from `from` to `to`, in `[-PI, PI)`.
pub fn shortest_angle(from: f64, to: f64) -> f64 {
    (to - from + PI).rem_euclid(TAU) - PI
}

// ─── TickOutcome ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Assists counted this tick. One well may count on consecutive ticks.
    pub assists: u32,
    pub terminal: bool,
}

// ─── FlightEngine ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FlightEngine {
    config: FlightConfig,
    state: RocketState,
}

impl FlightEngine {
    pub fn new(config: FlightConfig) -> Self {
        let state = Self::launch_state(&config, &Bonuses::default());
        Self { config, state }
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    pub fn state(&self) -> &RocketState {
        &self.state
    }

    pub fn phase(&self) -> FlightPhase {
        self.state.phase
    }

    /// Put the rocket back on the pad with the launch impulse from `bonuses`.
    pub fn reset(&mut self, bonuses: &Bonuses) {
        self.state = Self::launch_state(&self.config, bonuses);
    }

    fn launch_state(cfg: &FlightConfig, bonuses: &Bonuses) -> RocketState {
        let max_fuel = cfg.base_fuel + bonuses.get(UpgradeId::Fuel);
        RocketState {
            x: cfg.launch_x,
            y: cfg.launch_y,
            vx: cfg.launch_vx + bonuses.get(UpgradeId::Ramp) * cfg.ramp_scale,
            vy: cfg.launch_vy - bonuses.get(UpgradeId::Booster) * cfg.booster_scale,
            angle: cfg.launch_angle,
            fuel: max_fuel,
            max_fuel,
            distance: 0.0,
            max_height: 0.0,
            gravity_assists: 0,
            ticks: 0,
            phase: FlightPhase::Flying,
        }
    }

    pub fn apply_thrust(&mut self, active: bool, bonuses: &Bonuses) {
        let cfg = &self.config;
        let s = &mut self.state;
        if !active || !s.is_flying() || s.fuel <= 0.0 {
            return;
        }

        let mut power = cfg.base_thrust + bonuses.get(UpgradeId::Thrust) * cfg.thrust_per_bonus;
        if cfg.policy.mass_ratio_thrust {
            power *= (cfg.dry_mass + s.max_fuel) / (cfg.dry_mass + s.fuel);
        }
        s.vx += s.angle.cos() * power;
        s.vy += s.angle.sin() * power;

        let burn = cfg.burn_rate * (1.0 - bonuses.fraction(UpgradeId::Efficiency)).max(0.0);
        s.fuel = (s.fuel - burn).clamp(0.0, s.max_fuel);
    }

    pub fn tick(&mut self, wells: &[GravityWell], bonuses: &Bonuses) -> TickOutcome {
        if !self.state.is_flying() {
            return TickOutcome { assists: 0, terminal: true };
        }
        let gravity = self.gravity_at(self.state.y);
        let cfg = &self.config;
        let s = &mut self.state;
        s.ticks += 1;

        // Gravity
        s.vy += gravity;

        // Drag and lift
        let drag = cfg.drag * (1.0 - bonuses.fraction(UpgradeId::Nosecone)).max(0.0);
        let lift = cfg.lift * (1.0 + bonuses.fraction(UpgradeId::Wings));
        let speed = s.speed();
        s.vx -= s.vx * drag * speed;
        s.vy -= s.vy * drag * speed;
        if s.vx > 0.0 {
            s.vy -= lift * s.vx;
        }

        // Gravity assists
        let detection_range = cfg.detection_range + bonuses.get(UpgradeId::Detector);
        let power = cfg.assist_power * (1.0 + bonuses.fraction(UpgradeId::Boost));
        let mut assists = 0;
        for well in wells {
            if let Some(a) = gravity_assist(s.x, s.y, well, detection_range, power) {
                s.vx += a.dvx;
                s.vy += a.dvy;
                if a.strength > cfg.assist_count_threshold {
                    assists += 1;
                }
            }
        }
        s.gravity_assists += assists;

        // Integrate
        s.x += s.vx;
        s.y += s.vy;

        // Heading
        if speed > cfg.heading_min_speed {
            let target = s.vy.atan2(s.vx);
            s.angle = if cfg.policy.smoothed_heading {
                let next = s.angle + shortest_angle(s.angle, target) * cfg.heading_blend;
                shortest_angle(0.0, next)
            } else {
                target
            };
        }

        // Records
        s.distance = s.distance.max(s.x);
        s.max_height = s.max_height.max(cfg.height_datum - s.y);

        // Terminal checks
        if s.y >= cfg.ground_y {
            s.y = cfg.ground_y;
            s.phase = FlightPhase::Landed;
        } else if s.x < 0.0 || s.ticks >= cfg.max_ticks {
            s.phase = FlightPhase::Exited;
        }

        debug_assert!(s.is_finite(), "non-finite rocket state: {:?}", s);

        TickOutcome {
            assists,
            terminal: s.phase.is_terminal(),
        }
    }

    /// Downward acceleration at screen height `y`.
    pub fn gravity_at(&self, y: f64) -> f64 {
        let cfg = &self.config;
        if !cfg.policy.altitude_gravity || cfg.gravity_fade_altitude <= 0.0 {
            return cfg.gravity;
        }
        let altitude = (cfg.height_datum - y).max(0.0);
        let factor = (1.0 - altitude / cfg.gravity_fade_altitude).max(cfg.gravity_floor);
        cfg.gravity * factor
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UpgradeLevels;

    const EPS: f64 = 1e-9;

    fn no_bonuses() -> Bonuses {
        Bonuses::default()
    }

    fn still_air() -> FlightConfig {
        FlightConfig {
            gravity: 0.0,
            drag: 0.0,
            lift: 0.0,
            ..FlightConfig::classic()
        }
    }

    #[test]
    fn reset_applies_launch_bonuses() {
        let levels = UpgradeLevels { fuel: 2, ramp: 2, booster: 1, ..Default::default() };
        let mut engine = FlightEngine::new(FlightConfig::classic());
        engine.reset(&Bonuses::from_levels(&levels));
        let s = engine.state();
        assert_eq!((s.x, s.y), (100.0, 500.0));
        assert_eq!(s.vx, 20.0);
        assert_eq!(s.vy, -30.0);
        assert_eq!(s.fuel, 140.0);
        assert_eq!(s.max_fuel, 140.0);
        assert!((s.angle + std::f64::consts::FRAC_PI_4).abs() < EPS);
        assert_eq!(s.gravity_assists, 0);
        assert_eq!(engine.phase(), FlightPhase::Flying);
    }

    #[test]
    fn thrust_ignored_when_inactive_or_dry() {
        let mut engine = FlightEngine::new(FlightConfig::classic());
        let before = engine.state().clone();
        engine.apply_thrust(false, &no_bonuses());
        assert_eq!(engine.state().vx, before.vx);

        engine.state.fuel = 0.0;
        engine.apply_thrust(true, &no_bonuses());
        assert_eq!(engine.state().vx, before.vx);
        assert_eq!(engine.state().fuel, 0.0);
    }

    #[test]
    fn thrust_accelerates_along_heading_and_burns() {
        let levels = UpgradeLevels { thrust: 2, efficiency: 1, ..Default::default() };
        let bonuses = Bonuses::from_levels(&levels);
        let mut engine = FlightEngine::new(FlightConfig::classic());
        engine.reset(&bonuses);
        engine.state.angle = 0.0;
        let vx0 = engine.state().vx;
        engine.apply_thrust(true, &bonuses);
        assert!((engine.state().vx - vx0 - 0.8).abs() < EPS);
        assert!((engine.state().fuel - (100.0 - 0.45)).abs() < EPS);
    }

    #[test]
    fn fuel_stays_within_tank() {
        let mut engine = FlightEngine::new(FlightConfig::classic());
        for _ in 0..1_000 {
            engine.apply_thrust(true, &no_bonuses());
            let s = engine.state();
            assert!(s.fuel >= 0.0 && s.fuel <= s.max_fuel);
        }
        assert_eq!(engine.state().fuel, 0.0);
    }

    #[test]
    fn extreme_efficiency_never_refuels() {
        let bonuses = Bonuses::from_levels(&UpgradeLevels { efficiency: 15, ..Default::default() });
        let mut engine = FlightEngine::new(FlightConfig::classic());
        engine.reset(&bonuses);
        engine.apply_thrust(true, &bonuses);
        assert_eq!(engine.state().fuel, engine.state().max_fuel);
    }

    #[test]
    fn unpowered_flight_lands_on_ground_line() {
        let mut engine = FlightEngine::new(FlightConfig::classic());
        let mut ticks = 0;
        while !engine.tick(&[], &no_bonuses()).terminal {
            ticks += 1;
            assert!(ticks < 5_000, "flight never ended");
        }
        assert_eq!(engine.phase(), FlightPhase::Landed);
        assert_eq!(engine.state().y, 580.0);
        assert!(engine.state().distance > 100.0);
        assert!(engine.state().max_height > 100.0);
    }

    #[test]
    fn records_never_decrease() {
        let mut engine = FlightEngine::new(FlightConfig::enhanced());
        let mut last = (0.0, 0.0);
        while engine.phase() == FlightPhase::Flying {
            engine.apply_thrust(engine.state().ticks % 3 == 0, &no_bonuses());
            engine.tick(&[], &no_bonuses());
            let s = engine.state();
            assert!(s.distance >= last.0 && s.max_height >= last.1);
            last = (s.distance, s.max_height);
        }
    }

    #[test]
    fn leaving_the_corridor_exits() {
        let cfg = FlightConfig { launch_x: 10.0, launch_vx: -50.0, ..FlightConfig::classic() };
        let mut engine = FlightEngine::new(cfg);
        assert!(engine.tick(&[], &no_bonuses()).terminal);
        assert_eq!(engine.phase(), FlightPhase::Exited);
    }

    #[test]
    fn tick_cap_exits() {
        let cfg = FlightConfig { max_ticks: 3, ..still_air() };
        let mut engine = FlightEngine::new(cfg);
        engine.state.vy = 0.0;
        engine.tick(&[], &no_bonuses());
        engine.tick(&[], &no_bonuses());
        assert_eq!(engine.phase(), FlightPhase::Flying);
        engine.tick(&[], &no_bonuses());
        assert_eq!(engine.phase(), FlightPhase::Exited);
    }

    #[test]
    fn terminal_state_is_absorbing() {
        let mut engine = FlightEngine::new(FlightConfig::classic());
        while !engine.tick(&[], &no_bonuses()).terminal {}
        let landed = engine.state().clone();
        engine.apply_thrust(true, &no_bonuses());
        engine.tick(&[GravityWell::new(landed.x, landed.y - 40.0, 10.0)], &no_bonuses());
        let after = engine.state();
        assert_eq!((after.x, after.y, after.vx, after.vy), (landed.x, landed.y, landed.vx, landed.vy));
        assert_eq!(after.fuel, landed.fuel);
        assert_eq!(after.ticks, landed.ticks);
    }

    #[test]
    fn assist_is_perpendicular_to_well_direction() {
        let well = GravityWell::new(30.0, -40.0, 10.0);
        let a = gravity_assist(0.0, 0.0, &well, 100.0, 0.3).expect("test: inside range");
        let dot = a.dvx * well.x + a.dvy * well.y;
        assert!(dot.abs() < EPS);
        assert!((a.strength - 0.5).abs() < EPS);
        assert!((a.dvx.hypot(a.dvy) - 0.15).abs() < EPS);
    }

    #[test]
    fn assist_rotates_counter_clockwise() {
        // Well straight ahead on +x: the push is +90°, i.e. +y.
        let well = GravityWell::new(50.0, 0.0, 10.0);
        let a = gravity_assist(0.0, 0.0, &well, 100.0, 1.0).expect("test: inside range");
        assert!(a.dvx.abs() < EPS);
        assert!(a.dvy > 0.0);
    }

    #[test]
    fn assist_strength_falls_off_linearly() {
        let well = GravityWell::new(0.0, 0.0, 20.0);
        assert!(gravity_assist(100.0, 0.0, &well, 100.0, 0.3).is_none());
        assert!(gravity_assist(20.0, 0.0, &well, 100.0, 0.3).is_none());
        let near_edge = gravity_assist(99.9, 0.0, &well, 100.0, 0.3).expect("test: inside");
        let near_well = gravity_assist(20.1, 0.0, &well, 100.0, 0.3).expect("test: inside");
        assert!(near_edge.strength < 0.01);
        assert!(near_well.strength > 0.79);
        assert!(near_well.dvx.hypot(near_well.dvy) > near_edge.dvx.hypot(near_edge.dvy));
    }

    #[test]
    fn one_well_counts_on_consecutive_ticks() {
        let mut engine = FlightEngine::new(FlightConfig::classic());
        let wells = [GravityWell::new(130.0, 480.0, 5.0)];
        let first = engine.tick(&wells, &no_bonuses());
        let second = engine.tick(&wells, &no_bonuses());
        assert_eq!(first.assists, 1);
        assert_eq!(second.assists, 1);
        assert_eq!(engine.state().gravity_assists, 2);
    }

    #[test]
    fn detector_bonus_widens_range() {
        let wells = [GravityWell::new(220.0, 500.0, 5.0)];
        let mut plain = FlightEngine::new(still_air());
        plain.tick(&wells, &no_bonuses());
        assert_eq!(plain.state().vy, -20.0);

        let detector = Bonuses::from_levels(&UpgradeLevels { detector: 1, ..Default::default() });
        let mut wide = FlightEngine::new(still_air());
        wide.tick(&wells, &detector);
        assert!(wide.state().vy > -20.0);
    }

    #[test]
    fn altitude_gravity_fades_to_floor() {
        let classic = FlightEngine::new(FlightConfig::classic());
        let enhanced = FlightEngine::new(FlightConfig::enhanced());
        assert_eq!(classic.gravity_at(-10_000.0), 0.2);
        assert!((enhanced.gravity_at(600.0) - 0.2).abs() < EPS);
        assert!((enhanced.gravity_at(600.0 - 2_500.0) - 0.1).abs() < EPS);
        assert!((enhanced.gravity_at(600.0 - 20_000.0) - 0.02).abs() < EPS);
    }

    #[test]
    fn lighter_rocket_accelerates_harder() {
        let mut full = FlightEngine::new(FlightConfig::enhanced());
        let mut light = FlightEngine::new(FlightConfig::enhanced());
        full.state.angle = 0.0;
        light.state.angle = 0.0;
        light.state.fuel = 1.0;
        let (vx_full, vx_light) = (full.state().vx, light.state().vx);
        full.apply_thrust(true, &no_bonuses());
        light.apply_thrust(true, &no_bonuses());
        let dv_full = full.state().vx - vx_full;
        let dv_light = light.state().vx - vx_light;
        assert!((dv_full - 0.5).abs() < EPS);
        assert!(dv_light > dv_full * 1.9);
    }

    #[test]
    fn smoothed_heading_eases_toward_velocity() {
        let mut snap = FlightEngine::new(still_air());
        let mut smooth = FlightEngine::new(FlightConfig {
            policy: crate::config::PhysicsPolicy { smoothed_heading: true, ..Default::default() },
            ..still_air()
        });
        for e in [&mut snap, &mut smooth] {
            e.state.vx = 0.0;
            e.state.vy = -10.0;
            e.state.angle = 0.0;
            e.tick(&[], &no_bonuses());
        }
        assert!((snap.state().angle + FRAC_PI_2).abs() < EPS);
        assert!((smooth.state().angle + FRAC_PI_2 * 0.2).abs() < EPS);
    }

    #[test]
    fn shortest_angle_wraps() {
        assert!((shortest_angle(0.0, FRAC_PI_2) - FRAC_PI_2).abs() < EPS);
        assert!((shortest_angle(3.0, -3.0) - (TAU - 6.0)).abs() < EPS);
        assert!((shortest_angle(-3.0, 3.0) + (TAU - 6.0)).abs() < EPS);
    }
}
