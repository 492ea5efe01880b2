// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - flight physics and upgrade economy

pub mod types;
pub mod config;
pub mod economy;
pub mod profile;
pub mod field;
pub mod flight;
pub mod achievements;
pub mod scheduler;
pub mod controller;
pub mod storage;

pub use types::*;
pub use config::{FieldConfig, FlightConfig, GameConfig, PhysicsPolicy};
pub use controller::{RunController, RunError};
pub use economy::{Bonuses, PurchaseError, UpgradeError};
pub use field::GravityWell;
pub use flight::FlightEngine;
pub use profile::{MemoryStore, PersistenceError, Profile, ProfileStore};

use storage::LocalStorageStore;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Page-facing handle. The page owns rendering, input and the
/// `requestAnimationFrame` loop; it feeds elapsed time into [`frame`] and
/// draws whatever [`get_snapshot`] returns.
///
/// [`frame`]: StarshipGame::frame
/// [`get_snapshot`]: StarshipGame::get_snapshot
#[wasm_bindgen]
pub struct StarshipGame {
    inner: RunController<LocalStorageStore>,
}

#[wasm_bindgen]
impl StarshipGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Construct with a partial config object, e.g. `{flight: {policy:
    /// {smoothedHeading: true}}}`.
    pub fn with_config(config: JsValue, seed: u32) -> Result<StarshipGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self::build(config, seed))
    }

    pub fn launch(&mut self) -> bool {
        self.inner.launch().is_ok()
    }

    pub fn set_thrust(&mut self, active: bool) {
        self.inner.set_thrust(active);
    }

    /// Advance exactly one tick.
    pub fn step(&mut self) -> JsValue {
        let report = self.inner.step();
        serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
    }

    /// Advance by wall-clock time at the configured tick rate.
    pub fn frame(&mut self, elapsed_ms: f64) -> JsValue {
        let report = self.inner.frame(elapsed_ms);
        serde_wasm_bindgen::to_value(&report).unwrap_or(JsValue::NULL)
    }

    pub fn abort(&mut self) -> bool {
        self.inner.abort()
    }

    pub fn reset_progress(&mut self) {
        self.inner.reset_progress();
    }

    /// `Ok(false)` when the player cannot afford it; throws on an unknown id.
    pub fn purchase(&mut self, upgrade: &str) -> Result<bool, JsValue> {
        let id: UpgradeId = upgrade.parse().map_err(|e: UpgradeError| JsValue::from_str(&e.to_string()))?;
        Ok(self.inner.purchase(id).is_ok())
    }

    pub fn upgrade_cost(&self, upgrade: &str) -> Result<f64, JsValue> {
        let id: UpgradeId = upgrade.parse().map_err(|e: UpgradeError| JsValue::from_str(&e.to_string()))?;
        Ok(self.inner.cost(id) as f64)
    }

    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    pub fn get_shop(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.shop()).unwrap_or(JsValue::NULL)
    }

    pub fn get_profile(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.profile()).unwrap_or(JsValue::NULL)
    }

    pub fn get_snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap_or(JsValue::NULL)
    }

    pub fn get_last_summary(&self) -> JsValue {
        match self.inner.last_summary() {
            Some(s) => serde_wasm_bindgen::to_value(s).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }
}

impl StarshipGame {
    fn build(config: GameConfig, seed: u32) -> Self {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let store = LocalStorageStore::default();
        if cfg!(target_arch = "wasm32") {
            if let Err(e) = store.load() {
                log(&format!("starship: {}; progress will not be saved", e));
            }
        }
        Self {
            inner: RunController::new(config, store, u64::from(seed)),
        }
    }

    pub fn controller(&self) -> &RunController<LocalStorageStore> {
        &self.inner
    }
}
