// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Upgrade Economy

//! Upgrade costs, bonus magnitudes and settlement earnings.
//!
//! All currency math runs in [`Decimal`] so the `floor` applied to costs and
//! earnings is exact. Physics-facing bonuses are plain `f64`.

use num_traits::ToPrimitive;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::profile::Profile;
use crate::types::{UpgradeId, UpgradeLevels};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum UpgradeError {
    #[error("unknown upgrade id: {0:?}")]
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    #[error("insufficient funds: cost {cost}, have {currency}")]
    InsufficientFunds { cost: u64, currency: u64 },
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

const COST_GROWTH: Decimal = dec!(1.5);
const BASE_EARNINGS_DISTANCE_DIVISOR: Decimal = dec!(10);
const BASE_EARNINGS_HEIGHT_DIVISOR: Decimal = dec!(5);
const ASSIST_BONUS: u64 = 50;

pub fn base_cost(id: UpgradeId) -> u64 {
    match id {
        UpgradeId::Fuel => 100,
        UpgradeId::Thrust => 150,
        UpgradeId::Efficiency => 200,
        UpgradeId::Wings => 175,
        UpgradeId::Nosecone => 250,
        UpgradeId::Detector => 500,
        UpgradeId::Boost => 600,
        UpgradeId::Luck => 400,
        UpgradeId::Ramp => 300,
        UpgradeId::Booster => 350,
    }
}

/// Bonus gained per purchased level. Percent for thrust, efficiency, wings,
/// nosecone, boost and luck; absolute units for the rest.
pub fn rate_per_level(id: UpgradeId) -> f64 {
    match id {
        UpgradeId::Fuel => 20.0,
        UpgradeId::Thrust => 15.0,
        UpgradeId::Efficiency => 10.0,
        UpgradeId::Wings => 8.0,
        UpgradeId::Nosecone => 5.0,
        UpgradeId::Detector => 30.0,
        UpgradeId::Boost => 15.0,
        UpgradeId::Luck => 10.0,
        UpgradeId::Ramp => 5.0,
        UpgradeId::Booster => 10.0,
    }
}

// ---------------------------------------------------------------------------
// Cost curve
// ---------------------------------------------------------------------------

/// `floor(base_cost * 1.5^level)`, saturating at `u64::MAX`.
pub fn cost_at_level(id: UpgradeId, level: u32) -> u64 {
    let mut cost = Decimal::from(base_cost(id));
    for _ in 0..level {
        cost = match cost.checked_mul(COST_GROWTH) {
            Some(c) if c <= Decimal::from(u64::MAX) => c,
            _ => return u64::MAX,
        };
    }
    cost.floor().to_u64().unwrap_or(u64::MAX)
}

pub fn cost(id: UpgradeId, levels: &UpgradeLevels) -> u64 {
    cost_at_level(id, levels.get(id))
}

pub fn can_afford(id: UpgradeId, currency: u64, levels: &UpgradeLevels) -> bool {
    currency >= cost(id, levels)
}

/// Buy one level. Either both currency and level change, or neither does.
/// Persisting the profile is the caller's job.
pub fn purchase(id: UpgradeId, profile: &mut Profile) -> Result<u64, PurchaseError> {
    let price = cost(id, &profile.upgrade_levels);
    if profile.currency < price {
        return Err(PurchaseError::InsufficientFunds {
            cost: price,
            currency: profile.currency,
        });
    }
    profile.currency -= price;
    let level = profile.upgrade_levels.get_mut(id);
    *level = level.saturating_add(1);
    tracing::debug!(upgrade = %id, level = *level, price, "upgrade purchased");
    Ok(price)
}

// ---------------------------------------------------------------------------
// Bonuses
// ---------------------------------------------------------------------------

/// `level * rate_per_level(id)`. No unit conversion.
pub fn bonus(id: UpgradeId, level: u32) -> f64 {
    level as f64 * rate_per_level(id)
}

/// Bonus view over a set of levels, snapshotted at launch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bonuses {
    levels: UpgradeLevels,
}

impl Bonuses {
    pub fn from_levels(levels: &UpgradeLevels) -> Self {
        Self { levels: *levels }
    }

    pub fn get(&self, id: UpgradeId) -> f64 {
        bonus(id, self.levels.get(id))
    }

    /// Percentage bonuses as a fraction (15 -> 0.15).
    pub fn fraction(&self, id: UpgradeId) -> f64 {
        self.get(id) * 0.01
    }

    pub fn levels(&self) -> &UpgradeLevels {
        &self.levels
    }
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

/// Currency earned by one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Earnings {
    pub base: u64,
    pub assist_bonus: u64,
    pub total: u64,
}

/// `floor((floor(d/10 + h/5) + assists*50) * (1 + luck/100))`.
///
/// Distance and height are whole units; callers floor them first.
pub fn settlement_earnings(distance: u64, height: u64, assists: u32, luck_bonus: f64) -> Earnings {
    let base = (Decimal::from(distance) / BASE_EARNINGS_DISTANCE_DIVISOR
        + Decimal::from(height) / BASE_EARNINGS_HEIGHT_DIVISOR)
        .floor();
    let assist_bonus = u64::from(assists).saturating_mul(ASSIST_BONUS);
    let multiplier = Decimal::ONE + Decimal::from_f64(luck_bonus).unwrap_or(Decimal::ZERO) / dec!(100);
    let total = ((base + Decimal::from(assist_bonus)) * multiplier).floor();

    Earnings {
        base: base.to_u64().unwrap_or(u64::MAX),
        assist_bonus,
        total: total.to_u64().unwrap_or(u64::MAX),
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_at_level_zero_is_base_cost() {
        for id in UpgradeId::ALL {
            assert_eq!(cost_at_level(id, 0), base_cost(id));
        }
    }

    #[test]
    fn cost_is_strictly_increasing() {
        for id in UpgradeId::ALL {
            for level in 0..40 {
                assert!(
                    cost_at_level(id, level + 1) > cost_at_level(id, level),
                    "{} not increasing at level {}",
                    id,
                    level
                );
            }
        }
    }

    #[test]
    fn cost_matches_floor_of_growth_curve() {
        // 100 * 1.5^3 = 337.5
        assert_eq!(cost_at_level(UpgradeId::Fuel, 3), 337);
        // 175 * 1.5 = 262.5
        assert_eq!(cost_at_level(UpgradeId::Wings, 1), 262);
        // 600 * 2.25 = 1350
        assert_eq!(cost_at_level(UpgradeId::Boost, 2), 1350);
    }

    #[test]
    fn cost_saturates_instead_of_overflowing() {
        assert_eq!(cost_at_level(UpgradeId::Boost, 500), u64::MAX);
    }

    #[test]
    fn bonus_rates() {
        assert_eq!(bonus(UpgradeId::Fuel, 2), 40.0);
        assert_eq!(bonus(UpgradeId::Detector, 1), 30.0);
        assert_eq!(bonus(UpgradeId::Luck, 3), 30.0);
        assert_eq!(bonus(UpgradeId::Nosecone, 0), 0.0);
    }

    #[test]
    fn bonuses_fraction() {
        let levels = UpgradeLevels { thrust: 2, ..Default::default() };
        let b = Bonuses::from_levels(&levels);
        assert_eq!(b.get(UpgradeId::Thrust), 30.0);
        assert!((b.fraction(UpgradeId::Thrust) - 0.30).abs() < 1e-12);
        assert_eq!(b.get(UpgradeId::Wings), 0.0);
    }

    #[test]
    fn purchase_debits_and_levels_up() {
        let mut profile = Profile { currency: 500, ..Default::default() };
        let paid = purchase(UpgradeId::Thrust, &mut profile).expect("test: affordable");
        assert_eq!(paid, 150);
        assert_eq!(profile.currency, 350);
        assert_eq!(profile.upgrade_levels.thrust, 1);
        assert_eq!(cost(UpgradeId::Thrust, &profile.upgrade_levels), 225);
    }

    #[test]
    fn purchase_is_atomic_when_unaffordable() {
        let mut profile = Profile { currency: 99, ..Default::default() };
        let before = profile.clone();
        let err = purchase(UpgradeId::Fuel, &mut profile).unwrap_err();
        assert_eq!(err, PurchaseError::InsufficientFunds { cost: 100, currency: 99 });
        assert_eq!(profile, before);
    }

    #[test]
    fn exact_funds_are_enough() {
        let levels = UpgradeLevels::default();
        assert!(can_afford(UpgradeId::Detector, 500, &levels));
        assert!(!can_afford(UpgradeId::Detector, 499, &levels));
    }

    #[test]
    fn settlement_reference_case() {
        let e = settlement_earnings(530, 210, 2, bonus(UpgradeId::Luck, 3));
        assert_eq!(e.base, 95);
        assert_eq!(e.assist_bonus, 100);
        assert_eq!(e.total, 253);
    }

    #[test]
    fn settlement_floors_base() {
        // 19/10 + 4/5 = 2.7
        let e = settlement_earnings(19, 4, 0, 0.0);
        assert_eq!(e.base, 2);
        assert_eq!(e.total, 2);
    }

    #[test]
    fn settlement_luck_multiplier_is_exact() {
        // 100 * 1.1 must not land on 109.999...
        let e = settlement_earnings(1000, 0, 0, 10.0);
        assert_eq!(e.total, 110);
        assert_eq!(settlement_earnings(0, 0, 0, 0.0).total, 0);
        assert_eq!(e.total, (dec!(100) * dec!(1.1)).to_u64().unwrap_or_default());
    }
}
