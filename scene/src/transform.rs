//! Transform model and the authoritative per-object transform store.
//!
//! `TransformStore` is the only place a placed object's pose lives. It is
//! written exclusively through [`TransformStore::commit`], which the
//! composition root calls once per released gizmo gesture. A commit replaces
//! the whole `Transform` value in one assignment, so a reader can never see
//! the position of one commit next to the scale of another.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::PREVIEW_MODEL_SCALE;
use crate::error::SceneError;

/// Identifier of a placed object, unique within one scene.
pub type ObjectId = String;

/// A 3-component vector in world units (or radians, for rotations).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `v`.
    #[must_use]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    #[must_use]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    fn is_strictly_positive(self) -> bool {
        self.to_array()
            .iter()
            .all(|c| c.is_finite() && *c > 0.0)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Full pose of a placed object. Rotation is XYZ Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self { position: Vec3::ZERO, rotation: Vec3::ZERO, scale: Vec3::ONE };

    #[must_use]
    pub const fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    /// Identity pose at the origin with a uniform scale factor.
    #[must_use]
    pub const fn uniform_scale(factor: f64) -> Self {
        Self { scale: Vec3::splat(factor), ..Self::IDENTITY }
    }

    /// Pose of a newly placed room model: unrotated, at `position`, with the
    /// default model scale.
    #[must_use]
    pub const fn placed_at(position: Vec3) -> Self {
        Self::uniform_scale(PREVIEW_MODEL_SCALE).with_position(position)
    }

    #[must_use]
    pub const fn with_position(self, position: Vec3) -> Self {
        Self { position, ..self }
    }

    /// Whether every scale component is finite and strictly positive.
    #[must_use]
    pub fn has_valid_scale(&self) -> bool {
        self.scale.is_strictly_positive()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Authoritative transforms for every object tracked in the scene.
#[derive(Debug, Default)]
pub struct TransformStore {
    objects: HashMap<ObjectId, Transform>,
}

impl TransformStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: HashMap::new() }
    }

    /// Start tracking an object. An already tracked pose is never replaced
    /// here; only `commit` moves a placed object.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateObject` if `id` is already tracked and
    /// `DegenerateScale` if the initial pose has a non-positive scale.
    pub fn track(&mut self, id: ObjectId, transform: Transform) -> Result<(), SceneError> {
        if self.objects.contains_key(&id) {
            return Err(SceneError::DuplicateObject(id));
        }
        if !transform.has_valid_scale() {
            return Err(SceneError::DegenerateScale { id, scale: transform.scale });
        }
        self.objects.insert(id, transform);
        Ok(())
    }

    /// Stop tracking an object, returning its last committed pose.
    pub fn untrack(&mut self, id: &str) -> Option<Transform> {
        self.objects.remove(id)
    }

    /// Replace the stored transform for `id`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownObject` if `id` is not tracked and `DegenerateScale`
    /// if the new scale is invalid. The stored pose is untouched on error.
    pub fn commit(&mut self, id: &str, transform: Transform) -> Result<(), SceneError> {
        let Some(slot) = self.objects.get_mut(id) else {
            return Err(SceneError::UnknownObject(id.to_owned()));
        };
        if !transform.has_valid_scale() {
            return Err(SceneError::DegenerateScale { id: id.to_owned(), scale: transform.scale });
        }
        *slot = transform;
        Ok(())
    }

    /// Current transform for `id`, or `None` if it is not tracked.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Transform> {
        self.objects.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    /// Tracked ids in ascending order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<&ObjectId> {
        let mut ids: Vec<&ObjectId> = self.objects.keys().collect();
        ids.sort();
        ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
