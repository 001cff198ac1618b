//! Shared constants for the scene crate.

// ── Placement ───────────────────────────────────────────────────

/// Uniform scale applied to a room model when it is first placed.
pub const PREVIEW_MODEL_SCALE: f64 = 0.08;
