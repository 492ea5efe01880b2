// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - In-flight achievements

use crate::types::{Achievement, AchievementKind, RocketState};

const THRESHOLDS: &[(AchievementKind, f64)] = &[
    (AchievementKind::Speed, 25.0),
    (AchievementKind::Speed, 50.0),
    (AchievementKind::Height, 1_000.0),
    (AchievementKind::Height, 5_000.0),
    (AchievementKind::Distance, 1_000.0),
    (AchievementKind::Distance, 5_000.0),
    (AchievementKind::Distance, 10_000.0),
    (AchievementKind::Assists, 1.0),
    (AchievementKind::Assists, 10.0),
];

/// Emits each threshold at most once per run.
#[derive(Debug, Clone, Default)]
pub struct AchievementTracker {
    reached: Vec<bool>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self { reached: vec![false; THRESHOLDS.len()] }
    }

    pub fn reset(&mut self) {
        self.reached = vec![false; THRESHOLDS.len()];
    }

    pub fn observe(&mut self, rocket: &RocketState) -> Vec<Achievement> {
        if self.reached.len() != THRESHOLDS.len() {
            self.reset();
        }
        let mut fired = Vec::new();
        for (reached, &(kind, threshold)) in self.reached.iter_mut().zip(THRESHOLDS) {
            if *reached {
                continue;
            }
            let value = match kind {
                AchievementKind::Speed => rocket.speed(),
                AchievementKind::Height => rocket.max_height,
                AchievementKind::Distance => rocket.distance,
                AchievementKind::Assists => rocket.gravity_assists as f64,
            };
            if value >= threshold {
                *reached = true;
                fired.push(Achievement { kind, threshold });
            }
        }
        fired
    }
}
