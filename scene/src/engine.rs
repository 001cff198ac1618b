use std::collections::HashMap;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::SceneError;
use crate::root::SceneRoot;
use crate::transform::{Transform, Vec3};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Browser-facing wrapper around [`SceneRoot`].
///
/// Arguments and results cross the boundary as JSON strings; errors come back
/// as `"<CODE>: <message>"`.
#[wasm_bindgen]
#[derive(Default)]
pub struct SceneEngine {
    core: SceneRoot,
}

#[wasm_bindgen]
impl SceneEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self { core: SceneRoot::new() }
    }

    // --- Scene population ---

    /// Place an object with a JSON-encoded [`Transform`].
    ///
    /// # Errors
    ///
    /// Returns an error string if the transform does not parse or is degenerate.
    pub fn add_object(&mut self, id: String, transform_json: &str) -> Result<(), String> {
        let transform = parse_transform(transform_json)?;
        self.core.add_object(id, transform).map_err(scene_error)
    }

    /// # Errors
    ///
    /// Returns an error string if the object is unknown.
    pub fn remove_object(&mut self, id: &str) -> Result<String, String> {
        let events = self.core.remove_object(id).map_err(scene_error)?;
        to_json(&events)
    }

    // --- Input ---

    /// # Errors
    ///
    /// Returns an error string if the hit id is not in the scene.
    pub fn on_pointer_click(&mut self, hit: Option<String>) -> Result<String, String> {
        let events = self
            .core
            .on_pointer_click(hit.as_deref())
            .map_err(scene_error)?;
        to_json(&events)
    }

    /// # Errors
    ///
    /// Returns an error string for an unrecognized tool name.
    pub fn set_tool(&mut self, tool: &str) -> Result<String, String> {
        let events = self.core.set_tool(tool).map_err(scene_error)?;
        to_json(&events)
    }

    pub fn gizmo_press(&mut self) -> bool {
        self.core.gizmo_press()
    }

    pub fn gizmo_drag(&mut self) -> bool {
        self.core.gizmo_drag()
    }

    /// Finish a gizmo gesture. `pose_json` is the proxy's pose read by the
    /// host at release time, or `None` if the proxy is gone.
    ///
    /// A pose that does not parse ends the gesture like a missing proxy: no
    /// commit, and the next release needs a new press.
    ///
    /// # Errors
    ///
    /// Returns an error string if the pose does not parse or is degenerate.
    pub fn gizmo_release(&mut self, pose_json: Option<String>) -> Result<String, String> {
        let mut poses = HashMap::new();
        let mut bad_pose = None;
        if let (Some(raw), Some(gizmo)) = (pose_json, self.core.gizmo()) {
            match parse_transform(&raw) {
                Ok(pose) => {
                    poses.insert(gizmo.object_id().clone(), pose);
                }
                Err(err) => bad_pose = Some(err),
            }
        }
        let events = self.core.gizmo_release(&poses).map_err(scene_error)?;
        match bad_pose {
            Some(err) => Err(err),
            None => to_json(&events),
        }
    }

    /// Place a room model at `(x, y, z)` with the default model scale.
    ///
    /// # Errors
    ///
    /// Returns an error string if `id` is already placed.
    pub fn place_model(&mut self, id: String, x: f64, y: f64, z: f64) -> Result<(), String> {
        self.core
            .place_model(id, Vec3::new(x, y, z))
            .map_err(scene_error)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<String> {
        self.core.selection().cloned()
    }

    #[must_use]
    pub fn active_tool(&self) -> String {
        self.core.active_tool().as_str().to_owned()
    }

    /// # Errors
    ///
    /// Returns an error string if serialization fails.
    pub fn object_views(&self) -> Result<String, String> {
        to_json(&self.core.object_views())
    }
}

fn parse_transform(raw: &str) -> Result<Transform, String> {
    serde_json::from_str(raw).map_err(|e| format!("E_BAD_TRANSFORM: {e}"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("E_SERIALIZE: {e}"))
}

fn scene_error(err: SceneError) -> String {
    format!("{}: {err}", err.error_code())
}
