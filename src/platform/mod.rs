//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging setup
//! - Pose marshalling from the JS scene graph
//! - The wasm-bindgen surface (`web`) driven by the WebXR page

use glam::{Quat, Vec3};

use crate::sim::Pose;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the logger for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Install the logger for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Pose from a flat `[px, py, pz, qx, qy, qz, qw]` array (three.js order)
pub fn pose_from_slice(values: &[f32]) -> Option<Pose> {
    let [px, py, pz, qx, qy, qz, qw] = values else {
        return None;
    };
    let pose = Pose::new(Vec3::new(*px, *py, *pz), Quat::from_xyzw(*qx, *qy, *qz, *qw));
    pose.is_valid().then_some(pose)
}
