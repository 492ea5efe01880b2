// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Gravity-Well Field

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::config::FieldConfig;

// ─── GravityWell ─────────────────────────────────────────────────────────────

/// A planet the rocket can slingshot around. Position and radius never change
/// after generation; `pulse_phase` only drives the page's glow animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GravityWell {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub mass: f64,
    pub pulse_phase: f64,
}

impl GravityWell {
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius, mass: radius, pulse_phase: 0.0 }
    }

    pub fn advance_phase(&mut self, step: f64) {
        self.pulse_phase = (self.pulse_phase + step).rem_euclid(TAU);
    }
}

// ─── Generation ──────────────────────────────────────────────────────────────

/// Sample `count` wells with independent uniform position and radius.
/// Degenerate ranges (min >= max) collapse to `min`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, cfg: &FieldConfig) -> Vec<GravityWell> {
    (0..cfg.count)
        .map(|_| {
            let x = sample(rng, cfg.x_min, cfg.x_max);
            let y = sample(rng, cfg.y_min, cfg.y_max);
            let radius = sample(rng, cfg.radius_min, cfg.radius_max);
            GravityWell {
                pulse_phase: rng.gen_range(0.0..TAU),
                ..GravityWell::new(x, y, radius)
            }
        })
        .collect()
}

fn sample<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}
