//! Platform abstraction layer
//!
//! Implementations of the `Surface` and `Hud` interfaces plus input wiring:
//! - `web`: canvas 2D, DOM HUD and keyboard listeners (wasm32 only)
//! - `headless`: recording surface and logging HUD for native runs

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;
