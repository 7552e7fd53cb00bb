//! Flappy WASM core crate.
//!
//! A bird falls under gravity, the player flaps it upward, and it has to thread
//! a stream of scrolling pipe pairs. The simulation (`game`, `pipes`, `frames`,
//! `scoring`, `geometry`) is plain Rust and runs natively under `cargo test`; the
//! `web` module is the browser host that wires it to a canvas, `<audio>`
//! elements, input events and timers.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod frames;
pub mod game;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod pipes;
pub mod scoring;
mod web;

pub use config::GameConfig;
pub use error::GameError;
pub use frames::FrameCycle;
pub use game::{Audio, Bird, Game, GameOverCause, Phase, Sound, Sprite, Surface, TextAlign};
pub use geometry::{Rect, overlaps};
pub use pipes::{Pipe, PipeKind, PipePair, PipeStream};
pub use scoring::{evaluate_collision, evaluate_pass};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init();
}

/// Starts the game on `<canvas id="board">` sized to the window.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(|width, height| Ok(GameConfig::for_board(width, height))).map_err(JsValue::from)
}

/// Like [`start_game`], with a JSON object overriding individual `GameConfig` fields.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(config_json: &str) -> Result<(), JsValue> {
    web::start(|width, height| GameConfig::from_json(config_json, width, height))
        .map_err(JsValue::from)
}
