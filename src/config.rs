// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Configuration

//! Tunable constants for the flight model, the gravity-well field and the
//! run loop. Every struct deserializes with defaults so the page can pass a
//! partial object.

use serde::{Deserialize, Serialize};

// ─── Physics policy ──────────────────────────────────────────────────────────

/// Switches between the classic flight model and the refinements layered on
/// top of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicsPolicy {
    /// Gravity fades with altitude down to `gravity_floor` of its base value.
    pub altitude_gravity: bool,
    /// Thrust acceleration grows as fuel mass burns off.
    pub mass_ratio_thrust: bool,
    /// Heading eases toward the velocity vector instead of snapping.
    pub smoothed_heading: bool,
}

impl PhysicsPolicy {
    pub fn enhanced() -> Self {
        Self {
            altitude_gravity: true,
            mass_ratio_thrust: true,
            smoothed_heading: true,
        }
    }
}

// ─── FlightConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlightConfig {
    pub policy: PhysicsPolicy,

    // Launch
    pub launch_x: f64,
    pub launch_y: f64,
    pub launch_vx: f64,
    pub launch_vy: f64,
    pub launch_angle: f64,
    /// Multiplier on the ramp bonus added to the initial horizontal speed.
    pub ramp_scale: f64,
    /// Multiplier on the booster bonus added to the initial climb speed.
    pub booster_scale: f64,
    pub base_fuel: f64,

    // Thrust
    pub base_thrust: f64,
    pub thrust_per_bonus: f64,
    pub burn_rate: f64,
    pub dry_mass: f64,

    // Forces
    pub gravity: f64,
    pub gravity_fade_altitude: f64,
    pub gravity_floor: f64,
    pub drag: f64,
    pub lift: f64,

    // Gravity assist
    pub detection_range: f64,
    pub assist_power: f64,
    /// Assist strength above which the pass counts toward the assist tally.
    pub assist_count_threshold: f64,

    // Heading
    pub heading_min_speed: f64,
    pub heading_blend: f64,

    // Corridor
    /// Landing line; the rocket is clamped here on touchdown.
    pub ground_y: f64,
    /// Altitude is measured from this line, slightly below the landing line.
    pub height_datum: f64,
    pub max_ticks: u64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl FlightConfig {
    /// The flight model the browser game shipped with.
    pub fn classic() -> Self {
        Self {
            policy: PhysicsPolicy::default(),
            launch_x: 100.0,
            launch_y: 500.0,
            launch_vx: 10.0,
            launch_vy: -20.0,
            launch_angle: -std::f64::consts::FRAC_PI_4,
            ramp_scale: 1.0,
            booster_scale: 1.0,
            base_fuel: 100.0,
            base_thrust: 0.5,
            thrust_per_bonus: 0.01,
            burn_rate: 0.5,
            dry_mass: 100.0,
            gravity: 0.2,
            gravity_fade_altitude: 5000.0,
            gravity_floor: 0.1,
            drag: 0.001,
            lift: 0.002,
            detection_range: 100.0,
            assist_power: 0.3,
            assist_count_threshold: 0.5,
            heading_min_speed: 1.0,
            heading_blend: 0.2,
            ground_y: 580.0,
            height_datum: 600.0,
            max_ticks: 100_000,
        }
    }

    pub fn enhanced() -> Self {
        Self {
            policy: PhysicsPolicy::enhanced(),
            ..Self::classic()
        }
    }
}

// ─── FieldConfig ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    /// Decorative pulse advance per tick, radians.
    pub phase_step: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 15,
            x_min: 500.0,
            x_max: 8500.0,
            y_min: 200.0,
            y_max: 600.0,
            radius_min: 20.0,
            radius_max: 50.0,
            phase_step: 0.05,
        }
    }
}

// ─── GameConfig ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub flight: FlightConfig,
    pub field: FieldConfig,
    pub achievements: bool,
    /// Simulation cadence; one step is one rendered frame of the browser game.
    pub tick_rate_hz: f64,
    /// Upper bound on steps run for a single long frame.
    pub max_catch_up_steps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            flight: FlightConfig::classic(),
            field: FieldConfig::default(),
            achievements: true,
            tick_rate_hz: 60.0,
            max_catch_up_steps: 8,
        }
    }
}
