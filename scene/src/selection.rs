//! Tools and the single-selection controller.
//!
//! `SelectionController` is the sole owner of `SelectionState`. Other
//! components read it through [`SelectionController::state`] and never write
//! to it. At most one object is selected at any time; selecting a different
//! object implicitly deselects the previous one in the same assignment.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::transform::ObjectId;

/// Which manipulation tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pointer / selection only; no gizmo is shown.
    #[default]
    Select,
    /// Translate the selected object.
    Move,
    /// Rotate the selected object.
    Rotate,
    /// Scale the selected object.
    Scale,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Self; 4] = [Self::Select, Self::Move, Self::Rotate, Self::Scale];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Move => "move",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
        }
    }

    /// Whether this tool edits the selected object's transform through a gizmo.
    #[must_use]
    pub fn manipulates(self) -> bool {
        !matches!(self, Self::Select)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| SceneError::InvalidTool(s.to_owned()))
    }
}

/// Current selection and tool. Owned by [`SelectionController`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// The selected object, if any.
    pub selected_id: Option<ObjectId>,
    /// The active manipulation tool.
    pub active_tool: Tool,
}

impl SelectionState {
    /// The object a gizmo should be bound to, together with the tool driving
    /// it. `Some` exactly when an object is selected and the tool is not
    /// [`Tool::Select`].
    #[must_use]
    pub fn gizmo_target(&self) -> Option<(&ObjectId, Tool)> {
        match &self.selected_id {
            Some(id) if self.active_tool.manipulates() => Some((id, self.active_tool)),
            _ => None,
        }
    }
}

/// Holds the selected object and the active tool.
///
/// Existence of the selected object is validated by the caller (see
/// [`crate::root::SceneRoot::select`]); this type only enforces the
/// single-selection invariant.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, returning the previously selected object if it differs.
    pub fn select(&mut self, id: ObjectId) -> Option<ObjectId> {
        let previous = self.state.selected_id.replace(id);
        previous.filter(|prev| Some(prev) != self.state.selected_id.as_ref())
    }

    /// Clear the selection, returning what was selected.
    pub fn clear_selection(&mut self) -> Option<ObjectId> {
        self.state.selected_id.take()
    }

    /// Set the active tool, returning the previous one.
    pub fn set_tool(&mut self, tool: Tool) -> Tool {
        std::mem::replace(&mut self.state.active_tool, tool)
    }

    /// Parse and set the active tool by its host-facing name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTool` for any name outside `select | move | rotate |
    /// scale`; the active tool is left unchanged.
    pub fn set_tool_named(&mut self, name: &str) -> Result<Tool, SceneError> {
        let tool = name.parse::<Tool>()?;
        self.set_tool(tool);
        Ok(tool)
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&ObjectId> {
        self.state.selected_id.as_ref()
    }

    #[must_use]
    pub fn active_tool(&self) -> Tool {
        self.state.active_tool
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.state.selected_id.as_deref() == Some(id)
    }
}
