#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

//! Visual-effects layer for a single-page portfolio.
//!
//! The host-independent pieces (tiering, selection, state machines, resize
//! policy) compile everywhere and are tested natively. The DOM glue lives in
//! the `wasm` module and is only built for `wasm32`.

pub mod config;
pub mod content;
pub mod decor;
pub mod effects;
pub mod error;
pub mod gravity;
pub mod lifecycle;
pub mod profile;
pub mod registry;
pub mod scroll;
pub mod typing;

pub use config::FxConfig;
pub use effects::{select_ambient, select_effect_set, Effect, EffectSet};
pub use error::{FxError, Result};
pub use profile::{DeviceProfile, Tier};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod a11y;
    mod backgrounds;
    mod cursor;
    mod dom;
    mod handles;
    mod interactive;
    mod manager;
    mod navigation;
    mod render;
    mod reveal;
    mod shared;
    mod typing_fx;
    mod widgets;

    pub use manager::EffectManager;

    #[cfg(test)]
    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::EffectManager;
