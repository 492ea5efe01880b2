// Scenario Definitions: pilot strategy × physics preset × shopping policy
// Zero engine changes: all scenario logic is in the pilot and shopping rules

use starship_engine::{FlightConfig, RocketState, UpgradeId, UpgradeOffer};

// ─── Pilot ──────────────────────────────────────────────────────────────────

/// Stands in for the player's thrust button.
#[derive(Debug, Clone, Copy)]
pub enum Pilot {
    /// Never touches the button.
    Coast,
    /// Holds the button until the tank is dry.
    FullBurn,
    /// Alternates `on` ticks of thrust with `off` ticks of coasting.
    Pulse { on: u64, off: u64 },
    /// Burns only while climbing, saving fuel once the nose drops.
    ClimbOnly,
}

impl Pilot {
    pub fn thrust(&self, rocket: &RocketState) -> bool {
        if rocket.fuel <= 0.0 {
            return false;
        }
        match *self {
            Pilot::Coast => false,
            Pilot::FullBurn => true,
            Pilot::Pulse { on, off } => rocket.ticks % (on + off).max(1) < on,
            Pilot::ClimbOnly => rocket.vy < 0.0,
        }
    }
}

// ─── Shopping ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub enum Shopping {
    Never,
    /// Buy the cheapest affordable upgrade, repeatedly, after every flight.
    Cheapest,
    /// Walk the list in order, buying whatever is affordable.
    Priority(&'static [UpgradeId]),
}

impl Shopping {
    pub fn pick(&self, shop: &[UpgradeOffer]) -> Option<UpgradeId> {
        match self {
            Shopping::Never => None,
            Shopping::Cheapest => shop
                .iter()
                .filter(|o| o.affordable)
                .min_by_key(|o| o.cost)
                .map(|o| o.id),
            Shopping::Priority(order) => order
                .iter()
                .find(|id| shop.iter().any(|o| o.id == **id && o.affordable))
                .copied(),
        }
    }
}

const ENGINE_FIRST: &[UpgradeId] = &[
    UpgradeId::Fuel,
    UpgradeId::Thrust,
    UpgradeId::Efficiency,
    UpgradeId::Nosecone,
    UpgradeId::Luck,
];

const SLINGSHOT_FIRST: &[UpgradeId] = &[
    UpgradeId::Detector,
    UpgradeId::Boost,
    UpgradeId::Luck,
    UpgradeId::Fuel,
];

// ─── Scenario ───────────────────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub flight: FlightConfig,
    pub pilot: Pilot,
    pub shopping: Shopping,
    pub flights: u32,
}

pub fn scenarios() -> Vec<Scenario> {
    let mut all = Vec::new();
    for (preset, flight) in [("CLASSIC", FlightConfig::classic()), ("ENHANCED", FlightConfig::enhanced())] {
        let category = if preset == "CLASSIC" { "classic" } else { "enhanced" };
        all.push(Scenario {
            name: if preset == "CLASSIC" { "CLASSIC_COAST" } else { "ENHANCED_COAST" },
            label: "Coast, never shop",
            category,
            flight: flight.clone(),
            pilot: Pilot::Coast,
            shopping: Shopping::Never,
            flights: 10,
        });
        all.push(Scenario {
            name: if preset == "CLASSIC" { "CLASSIC_BURN_CHEAPEST" } else { "ENHANCED_BURN_CHEAPEST" },
            label: "Full burn, buy cheapest",
            category,
            flight: flight.clone(),
            pilot: Pilot::FullBurn,
            shopping: Shopping::Cheapest,
            flights: 40,
        });
        all.push(Scenario {
            name: if preset == "CLASSIC" { "CLASSIC_PULSE_ENGINE" } else { "ENHANCED_PULSE_ENGINE" },
            label: "Pulse burn, engine upgrades first",
            category,
            flight: flight.clone(),
            pilot: Pilot::Pulse { on: 3, off: 2 },
            shopping: Shopping::Priority(ENGINE_FIRST),
            flights: 40,
        });
        all.push(Scenario {
            name: if preset == "CLASSIC" { "CLASSIC_CLIMB_SLINGSHOT" } else { "ENHANCED_CLIMB_SLINGSHOT" },
            label: "Climb burn, slingshot upgrades first",
            category,
            flight,
            pilot: Pilot::ClimbOnly,
            shopping: Shopping::Priority(SLINGSHOT_FIRST),
            flights: 40,
        });
    }
    all
}
