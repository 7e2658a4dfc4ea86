//! wasm-bindgen surface for the WebXR page
//!
//! The page owns the three.js scene and the XR session. Each frame it passes
//! the camera pose in and draws the returned JSON snapshot; controller and
//! tap input come in as separate calls.

use glam::Vec3;
use wasm_bindgen::prelude::*;

use super::{init_logging, pose_from_slice};
use crate::highscores::LocalStorageLedger;
use crate::settings::Settings;
use crate::sim::{GameMode, GameState, HitTargetKind, ShotOutcome, TickContext};

fn to_js<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn shot_to_js(result: Result<ShotOutcome, crate::GameError>) -> Result<String, JsValue> {
    match result {
        Ok(outcome) => to_js(&outcome),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
}

#[wasm_bindgen]
impl WebGame {
    /// New game; a zero seed is replaced by the clock
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        init_logging();
        let seed = if seed > 0.0 {
            seed as u64
        } else {
            js_sys::Date::now() as u64
        };
        let state = GameState::with_settings(seed, Settings::load())
            .with_ledger(Box::new(LocalStorageLedger::load()));
        log::info!("AR shooter initialized with seed: {}", state.seed);
        WebGame { state }
    }

    /// XR session started
    pub fn session_ready(&mut self) -> Result<(), JsValue> {
        self.state
            .session_ready()
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// XR session ended
    pub fn session_ended(&mut self) {
        if let Err(e) = self.state.session_ended() {
            log::warn!("{}", e);
        }
    }

    /// Place a button: kind is "start", "restart" or a mode id
    pub fn set_hit_target(&mut self, kind: &str, x: f32, y: f32, z: f32) -> bool {
        match HitTargetKind::from_str(kind) {
            Some(kind) => {
                self.state.set_hit_target(kind, Vec3::new(x, y, z));
                true
            }
            None => {
                log::warn!("Unknown hit target '{}'", kind);
                false
            }
        }
    }

    pub fn remove_hit_target(&mut self, kind: &str) -> bool {
        HitTargetKind::from_str(kind)
            .map(|kind| self.state.remove_hit_target(kind))
            .unwrap_or(false)
    }

    /// Advance one frame. `camera` is `[px, py, pz, qx, qy, qz, qw]`.
    pub fn tick(&mut self, now_ms: f64, camera: Vec<f32>) -> Result<String, JsValue> {
        let player = pose_from_slice(&camera).unwrap_or(self.state.player);
        let snapshot = self.state.tick(&TickContext::new(now_ms, player));
        snapshot
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Controller trigger. `muzzle` is `[px, py, pz, qx, qy, qz, qw]`.
    pub fn trigger(&mut self, muzzle: Option<Vec<f32>>) -> Result<String, JsValue> {
        let origin = muzzle.as_deref().and_then(pose_from_slice);
        shot_to_js(self.state.trigger(origin))
    }

    /// Screen tap (fires from the camera)
    pub fn tap(&mut self) -> Result<String, JsValue> {
        shot_to_js(self.state.tap())
    }

    /// Best `n` scores for a mode as a JSON array
    pub fn top_scores(&self, mode: &str, n: usize) -> Result<String, JsValue> {
        let mode = GameMode::from_str(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown mode '{}'", mode)))?;
        to_js(&self.state.top_scores(mode, n))
    }

    /// Current settings as JSON
    pub fn settings(&self) -> Result<String, JsValue> {
        to_js(&self.state.settings)
    }

    /// Replace and persist settings. Gravity changes apply on the next load.
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.state.settings = settings.validated();
        self.state.settings.save();
        Ok(())
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    init_logging();
    log::info!("AR shooter core loaded");
}
