//! Transform gizmo adapter: tool-to-mode mapping and the drag/release cycle.
//!
//! The renderer draws the gizmo and moves its object proxy live while the
//! user drags. None of those intermediate frames are observable here. A
//! `GizmoAdapter` only tracks whether a gesture is in progress; on release it
//! reads the proxy's final pose through a [`PoseSource`] borrowed for that one
//! call and hands back a single [`GizmoCommit`].

#[cfg(test)]
#[path = "gizmo_test.rs"]
mod gizmo_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::selection::Tool;
use crate::transform::{ObjectId, Transform};

/// Gizmo manipulation mode, named the way the renderer's gizmo expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoMode {
    Translate,
    Rotate,
    Scale,
}

impl GizmoMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
        }
    }
}

/// Map the active tool to a gizmo mode.
///
/// A bound gizmo under [`Tool::Select`] should never happen; if it does, the
/// gizmo falls back to translate and a warning is logged.
#[must_use]
pub fn mode_for_tool(tool: Tool) -> GizmoMode {
    match tool {
        Tool::Move => GizmoMode::Translate,
        Tool::Rotate => GizmoMode::Rotate,
        Tool::Scale => GizmoMode::Scale,
        Tool::Select => {
            warn!(%tool, "gizmo mode requested for non-manipulating tool; using translate");
            GizmoMode::Translate
        }
    }
}

/// Read access to the renderer's live object proxies.
///
/// Returns `None` when the proxy no longer exists (e.g. removed while the
/// user was dragging).
pub trait PoseSource {
    fn pose(&self, id: &str) -> Option<Transform>;
}

impl PoseSource for HashMap<ObjectId, Transform> {
    fn pose(&self, id: &str) -> Option<Transform> {
        self.get(id).copied()
    }
}

/// The one write produced by a completed drag gesture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GizmoCommit {
    pub object_id: ObjectId,
    pub transform: Transform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    Dragging { frames: u32 },
}

/// A gizmo bound to exactly one object for the lifetime of the binding.
#[derive(Debug)]
pub struct GizmoAdapter {
    object_id: ObjectId,
    mode: GizmoMode,
    gesture: Gesture,
}

impl GizmoAdapter {
    /// Bind a new gizmo to `object_id`, driven by `tool`.
    #[must_use]
    pub fn bind(object_id: ObjectId, tool: Tool) -> Self {
        Self { object_id, mode: mode_for_tool(tool), gesture: Gesture::Idle }
    }

    #[must_use]
    pub fn object_id(&self) -> &ObjectId {
        &self.object_id
    }

    #[must_use]
    pub fn mode(&self) -> GizmoMode {
        self.mode
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Unbind, yielding the id the gizmo was attached to.
    #[must_use]
    pub fn into_object_id(self) -> ObjectId {
        self.object_id
    }

    /// Pointer pressed on a gizmo handle.
    pub fn press(&mut self) {
        self.gesture = Gesture::Dragging { frames: 0 };
    }

    /// Intermediate drag frame. Purely presentational; returns whether a
    /// gesture is in progress.
    pub fn drag(&mut self) -> bool {
        match &mut self.gesture {
            Gesture::Dragging { frames } => {
                *frames = frames.saturating_add(1);
                true
            }
            Gesture::Idle => false,
        }
    }

    /// Pointer released: read the proxy pose once and produce the commit.
    ///
    /// Returns `None` without a preceding [`press`](Self::press), and when
    /// the proxy is gone; in the latter case the commit is dropped.
    pub fn release(&mut self, poses: &dyn PoseSource) -> Option<GizmoCommit> {
        let Gesture::Dragging { frames } = std::mem::replace(&mut self.gesture, Gesture::Idle) else {
            return None;
        };
        let Some(transform) = poses.pose(&self.object_id) else {
            debug!(object_id = %self.object_id, frames, "proxy unavailable at release; commit dropped");
            return None;
        };
        Some(GizmoCommit { object_id: self.object_id.clone(), transform })
    }
}
