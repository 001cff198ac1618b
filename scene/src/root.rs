//! Composition root: routes pointer clicks, tool changes and gizmo gestures.
//!
//! `SceneRoot` owns the selection controller, the transform store and a
//! single gizmo slot. Every mutating call finishes its state change before it
//! returns the [`SceneEvent`]s describing it, so the host never observes a
//! half-applied transition. When the gizmo has to move to another object or
//! mode, the old binding is taken out of the slot (and its `GizmoDetached`
//! event emitted) before the new one is put in.

#[cfg(test)]
#[path = "root_test.rs"]
mod root_test;

use serde::Serialize;
use tracing::debug;

use crate::error::SceneError;
use crate::gizmo::{GizmoAdapter, GizmoMode, PoseSource, mode_for_tool};
use crate::selection::{SelectionController, SelectionState, Tool};
use crate::transform::{ObjectId, Transform, TransformStore, Vec3};

/// State changes reported back to the host for re-rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneEvent {
    SelectionChanged { selected_id: Option<ObjectId> },
    ToolChanged { tool: Tool },
    GizmoDetached { object_id: ObjectId },
    GizmoAttached { object_id: ObjectId, mode: GizmoMode },
    TransformCommitted { object_id: ObjectId, transform: Transform },
    ObjectRemoved { object_id: ObjectId },
}

/// Render input for one placed object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectView {
    pub id: ObjectId,
    pub transform: Transform,
    pub is_selected: bool,
    pub active_tool: Tool,
}

/// The interactive scene: selection, tool, gizmo and transforms.
#[derive(Debug, Default)]
pub struct SceneRoot {
    selection: SelectionController,
    store: TransformStore,
    gizmo: Option<GizmoAdapter>,
}

impl SceneRoot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Scene population ---

    /// Place a new object.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateObject` if `id` is already placed (scene unchanged)
    /// and `DegenerateScale` if `transform` has a non-positive scale.
    pub fn add_object(&mut self, id: impl Into<ObjectId>, transform: Transform) -> Result<(), SceneError> {
        self.store.track(id.into(), transform)
    }

    /// Place a freshly loaded room model at `position` with the default
    /// model scale.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateObject` if `id` is already placed.
    pub fn place_model(&mut self, id: impl Into<ObjectId>, position: Vec3) -> Result<(), SceneError> {
        self.store.track(id.into(), Transform::placed_at(position))
    }

    /// Remove an object, deselecting it and unbinding its gizmo if needed.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObject` if `id` is not in the scene.
    pub fn remove_object(&mut self, id: &str) -> Result<Vec<SceneEvent>, SceneError> {
        if self.store.untrack(id).is_none() {
            return Err(SceneError::UnknownObject(id.to_owned()));
        }
        let mut events = vec![SceneEvent::ObjectRemoved { object_id: id.to_owned() }];
        if self.selection.is_selected(id) {
            self.selection.clear_selection();
            events.push(SceneEvent::SelectionChanged { selected_id: None });
        }
        self.sync_gizmo(&mut events);
        Ok(events)
    }

    // --- Selection / tool ---

    /// Route a pointer click. `None` means the click hit empty space.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObject` if the hit id is not in the scene.
    pub fn on_pointer_click(&mut self, hit: Option<&str>) -> Result<Vec<SceneEvent>, SceneError> {
        match hit {
            Some(id) => self.select(id),
            None => Ok(self.clear_selection()),
        }
    }

    /// Select `id`, implicitly deselecting any other object.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObject` if `id` is not in the scene; selection is
    /// left unchanged.
    pub fn select(&mut self, id: &str) -> Result<Vec<SceneEvent>, SceneError> {
        if !self.store.contains(id) {
            return Err(SceneError::UnknownObject(id.to_owned()));
        }
        if self.selection.is_selected(id) {
            return Ok(Vec::new());
        }
        self.selection.select(id.to_owned());
        let mut events = vec![SceneEvent::SelectionChanged { selected_id: Some(id.to_owned()) }];
        self.sync_gizmo(&mut events);
        Ok(events)
    }

    /// Deselect whatever is selected.
    pub fn clear_selection(&mut self) -> Vec<SceneEvent> {
        if self.selection.clear_selection().is_none() {
            return Vec::new();
        }
        let mut events = vec![SceneEvent::SelectionChanged { selected_id: None }];
        self.sync_gizmo(&mut events);
        events
    }

    /// Set the active tool by its host-facing name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTool` for unrecognized names; the tool is unchanged.
    pub fn set_tool(&mut self, name: &str) -> Result<Vec<SceneEvent>, SceneError> {
        let previous = self.selection.active_tool();
        let tool = self.selection.set_tool_named(name)?;
        if tool == previous {
            return Ok(Vec::new());
        }
        let mut events = vec![SceneEvent::ToolChanged { tool }];
        self.sync_gizmo(&mut events);
        Ok(events)
    }

    // --- Gizmo gesture ---

    /// Pointer pressed on the gizmo. Returns `false` if no gizmo is bound.
    pub fn gizmo_press(&mut self) -> bool {
        match self.gizmo.as_mut() {
            Some(gizmo) => {
                gizmo.press();
                true
            }
            None => false,
        }
    }

    /// Intermediate drag frame. Never mutates the store.
    pub fn gizmo_drag(&mut self) -> bool {
        self.gizmo.as_mut().is_some_and(GizmoAdapter::drag)
    }

    /// Pointer released: commit the proxy's final pose to the store.
    ///
    /// Yields no events when no gesture was in progress or the proxy is gone.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateScale` if the released pose has an invalid scale;
    /// the stored transform is left unchanged.
    pub fn gizmo_release(&mut self, poses: &dyn PoseSource) -> Result<Vec<SceneEvent>, SceneError> {
        let Some(commit) = self.gizmo.as_mut().and_then(|gizmo| gizmo.release(poses)) else {
            return Ok(Vec::new());
        };
        self.store.commit(&commit.object_id, commit.transform)?;
        debug!(object_id = %commit.object_id, "transform committed");
        Ok(vec![SceneEvent::TransformCommitted { object_id: commit.object_id, transform: commit.transform }])
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&ObjectId> {
        self.selection.selected_id()
    }

    #[must_use]
    pub fn active_tool(&self) -> Tool {
        self.selection.active_tool()
    }

    #[must_use]
    pub fn selection_state(&self) -> &SelectionState {
        self.selection.state()
    }

    /// Current committed transform for `id`.
    #[must_use]
    pub fn transform(&self, id: &str) -> Option<Transform> {
        self.store.get(id)
    }

    /// The bound gizmo, if any.
    #[must_use]
    pub fn gizmo(&self) -> Option<&GizmoAdapter> {
        self.gizmo.as_ref()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    /// Render input for every placed object, sorted by id.
    #[must_use]
    pub fn object_views(&self) -> Vec<ObjectView> {
        let active_tool = self.selection.active_tool();
        self.store
            .sorted_ids()
            .into_iter()
            .filter_map(|id| {
                let transform = self.store.get(id)?;
                Some(ObjectView {
                    id: id.clone(),
                    transform,
                    is_selected: self.selection.is_selected(id),
                    active_tool,
                })
            })
            .collect()
    }

    /// Bring the gizmo slot in line with the selection state.
    fn sync_gizmo(&mut self, events: &mut Vec<SceneEvent>) {
        let target = self
            .selection
            .state()
            .gizmo_target()
            .map(|(id, tool)| (id.clone(), tool));

        if let (Some(gizmo), Some((id, tool))) = (&self.gizmo, &target) {
            if gizmo.object_id() == id && gizmo.mode() == mode_for_tool(*tool) {
                return;
            }
        }

        if let Some(old) = self.gizmo.take() {
            events.push(SceneEvent::GizmoDetached { object_id: old.into_object_id() });
        }
        if let Some((id, tool)) = target {
            let gizmo = GizmoAdapter::bind(id, tool);
            events.push(SceneEvent::GizmoAttached { object_id: gizmo.object_id().clone(), mode: gizmo.mode() });
            self.gizmo = Some(gizmo);
        }
    }
}
