// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Starship Slingshot - Browser storage

//! `window.localStorage` as a [`ProfileStore`]. Only usable on `wasm32`
//! inside a page; natively every call reports the storage as unavailable.

use wasm_bindgen::prelude::*;

use crate::profile::{PersistenceError, ProfileStore, SAVE_KEY};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = localStorage, js_name = getItem)]
    fn local_storage_get(key: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(catch, js_namespace = localStorage, js_name = setItem)]
    fn local_storage_set(key: &str, value: &str) -> Result<(), JsValue>;
}

#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(SAVE_KEY)
    }
}

impl ProfileStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        if !cfg!(target_arch = "wasm32") {
            return Err(PersistenceError::Storage("localStorage requires wasm32".into()));
        }
        local_storage_get(&self.key).map_err(|e| PersistenceError::Storage(describe(&e)))
    }

    fn save(&mut self, blob: &str) -> Result<(), PersistenceError> {
        if !cfg!(target_arch = "wasm32") {
            return Err(PersistenceError::Storage("localStorage requires wasm32".into()));
        }
        local_storage_set(&self.key, blob).map_err(|e| {
            let reason = describe(&e);
            crate::log(&format!("starship: save failed: {}", reason));
            PersistenceError::Storage(reason)
        })
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
