//! Error taxonomy for the editing core.
//!
//! Every variant is a local contract violation: the operation is rejected
//! synchronously and no state is touched. Nothing here is retried.

use crate::transform::{ObjectId, Vec3};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// A tool name outside `select | move | rotate | scale`.
    #[error("invalid tool: {0:?} (expected select, move, rotate or scale)")]
    InvalidTool(String),
    /// The operation named an object that is not in the scene.
    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),
    /// An object with this id is already placed.
    #[error("object already in scene: {0}")]
    DuplicateObject(ObjectId),
    /// A transform whose scale has a zero, negative or non-finite component.
    #[error("degenerate scale for {id}: ({}, {}, {})", scale.x, scale.y, scale.z)]
    DegenerateScale { id: ObjectId, scale: Vec3 },
}

impl SceneError {
    /// Grepable code surfaced to the host alongside the message.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTool(_) => "E_INVALID_TOOL",
            Self::UnknownObject(_) => "E_UNKNOWN_OBJECT",
            Self::DuplicateObject(_) => "E_DUPLICATE_OBJECT",
            Self::DegenerateScale { .. } => "E_DEGENERATE_SCALE",
        }
    }
}
