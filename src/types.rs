// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Type Definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::economy::UpgradeError;
use crate::field::GravityWell;

// ─── Upgrade Id ──────────────────────────────────────────────────────────────

/// The closed set of purchasable upgrades.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeId {
    Fuel,
    Thrust,
    Efficiency,
    Wings,
    Nosecone,
    Detector,
    Boost,
    Luck,
    Ramp,
    Booster,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 10] = [
        Self::Fuel,
        Self::Thrust,
        Self::Efficiency,
        Self::Wings,
        Self::Nosecone,
        Self::Detector,
        Self::Boost,
        Self::Luck,
        Self::Ramp,
        Self::Booster,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Thrust => "thrust",
            Self::Efficiency => "efficiency",
            Self::Wings => "wings",
            Self::Nosecone => "nosecone",
            Self::Detector => "detector",
            Self::Boost => "boost",
            Self::Luck => "luck",
            Self::Ramp => "ramp",
            Self::Booster => "booster",
        }
    }

    /// Shop label shown next to the buy button.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Fuel => "+20 fuel per level",
            Self::Thrust => "+15% thrust per level",
            Self::Efficiency => "-10% fuel burn per level",
            Self::Wings => "+8% lift per level",
            Self::Nosecone => "-5% drag per level",
            Self::Detector => "+30 units gravity-well detection range per level",
            Self::Boost => "+15% gravity-assist power per level",
            Self::Luck => "+10% earnings per level",
            Self::Ramp => "+5 initial horizontal speed per level",
            Self::Booster => "+10 initial vertical speed per level",
        }
    }
}

impl fmt::Display for UpgradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpgradeId {
    type Err = UpgradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UpgradeError::Unknown(s.to_string()))
    }
}

// ─── Upgrade Levels ──────────────────────────────────────────────────────────

/// Purchased level per upgrade. Missing keys in a saved blob default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeLevels {
    pub fuel: u32,
    pub thrust: u32,
    pub efficiency: u32,
    pub wings: u32,
    pub nosecone: u32,
    pub detector: u32,
    pub boost: u32,
    pub luck: u32,
    pub ramp: u32,
    pub booster: u32,
}

impl UpgradeLevels {
    pub fn get(&self, id: UpgradeId) -> u32 {
        match id {
            UpgradeId::Fuel => self.fuel,
            UpgradeId::Thrust => self.thrust,
            UpgradeId::Efficiency => self.efficiency,
            UpgradeId::Wings => self.wings,
            UpgradeId::Nosecone => self.nosecone,
            UpgradeId::Detector => self.detector,
            UpgradeId::Boost => self.boost,
            UpgradeId::Luck => self.luck,
            UpgradeId::Ramp => self.ramp,
            UpgradeId::Booster => self.booster,
        }
    }

    pub fn get_mut(&mut self, id: UpgradeId) -> &mut u32 {
        match id {
            UpgradeId::Fuel => &mut self.fuel,
            UpgradeId::Thrust => &mut self.thrust,
            UpgradeId::Efficiency => &mut self.efficiency,
            UpgradeId::Wings => &mut self.wings,
            UpgradeId::Nosecone => &mut self.nosecone,
            UpgradeId::Detector => &mut self.detector,
            UpgradeId::Boost => &mut self.boost,
            UpgradeId::Luck => &mut self.luck,
            UpgradeId::Ramp => &mut self.ramp,
            UpgradeId::Booster => &mut self.booster,
        }
    }
}

// ─── Flight Phase ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlightPhase {
    Flying = 0,
    Landed = 1, // TERMINAL: touched the ground line
    Exited = 2, // TERMINAL: left the corridor or hit the tick cap
}

impl FlightPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Landed | Self::Exited)
    }
}

// ─── RocketState ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RocketState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Heading in radians; screen coordinates, so negative is nose-up.
    pub angle: f64,
    pub fuel: f64,
    pub max_fuel: f64,
    /// Furthest x reached this run.
    pub distance: f64,
    /// Highest altitude above the height datum this run.
    pub max_height: f64,
    pub gravity_assists: u32,
    pub ticks: u64,
    pub phase: FlightPhase,
}

impl RocketState {
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn is_flying(&self) -> bool {
        self.phase == FlightPhase::Flying
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.vx, self.vy, self.angle, self.fuel]
            .iter()
            .all(|v| v.is_finite())
    }
}

// ─── Camera ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
}

// ─── Achievements ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AchievementKind {
    Speed,
    Height,
    Distance,
    Assists,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub threshold: f64,
}

// ─── FlightSummary ───────────────────────────────────────────────────────────

/// Result of settling one finished run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightSummary {
    pub phase: FlightPhase,
    pub distance: u64,
    pub height: u64,
    pub gravity_assists: u32,
    pub base_earnings: u64,
    pub assist_bonus: u64,
    pub total_earnings: u64,
    pub new_best_distance: bool,
    pub new_best_height: bool,
}

// ─── GameEvent ───────────────────────────────────────────────────────────────

/// Facts emitted for the notification sink. Display timing is the page's job.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Achievement(Achievement),
    GravityAssist { total: u32 },
    FlightEnded(FlightSummary),
}

// ─── StepReport ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct StepReport {
    pub steps: u32,
    pub events: Vec<GameEvent>,
    pub summary: Option<FlightSummary>,
}

// ─── Renderer snapshot ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FrameSnapshot<'a> {
    pub rocket: &'a RocketState,
    pub wells: &'a [GravityWell],
    pub camera: Camera,
    pub running: bool,
}

// ─── Shop listing ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpgradeOffer {
    pub id: UpgradeId,
    pub description: &'static str,
    pub level: u32,
    pub cost: u64,
    pub affordable: bool,
    pub bonus: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_id_parses_every_name() {
        for id in UpgradeId::ALL {
            assert_eq!(id.as_str().parse::<UpgradeId>().ok(), Some(id));
        }
    }

    #[test]
    fn upgrade_id_rejects_unknown_name() {
        let err = "warp".parse::<UpgradeId>().unwrap_err();
        assert!(matches!(err, UpgradeError::Unknown(ref s) if s == "warp"));
        assert!("Fuel".parse::<UpgradeId>().is_err(), "ids are case-sensitive");
    }

    #[test]
    fn levels_lookup_matches_mutation() {
        let mut levels = UpgradeLevels::default();
        for (i, id) in UpgradeId::ALL.iter().enumerate() {
            *levels.get_mut(*id) = i as u32 + 1;
        }
        for (i, id) in UpgradeId::ALL.iter().enumerate() {
            assert_eq!(levels.get(*id), i as u32 + 1);
        }
    }

    #[test]
    fn terminal_phases() {
        assert!(!FlightPhase::Flying.is_terminal());
        assert!(FlightPhase::Landed.is_terminal());
        assert!(FlightPhase::Exited.is_terminal());
    }
}
