//! Furniture catalog read model.
//!
//! `FurnitureModel` is the shape consumers see. It is decoupled from the
//! store's row layout (see [`super::source::FurnitureRow`]) and every field
//! has a defined value: normalization fills the documented defaults.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rendering hint used when the store leaves `model_type` empty.
pub const DEFAULT_MODEL_TYPE: &str = "box";

/// Color used when the store leaves `default_color` empty.
pub const DEFAULT_COLOR: &str = "#4a90a4";

/// Scale used when the store's `default_scale` is missing or malformed.
pub const DEFAULT_SCALE: [f64; 3] = [1.0, 1.0, 1.0];

/// Category label used when the joined category has no name.
pub const DEFAULT_CATEGORY_NAME: &str = "Uncategorized";

/// Icon name used when the joined category has no icon.
pub const DEFAULT_CATEGORY_ICON: &str = "package";

/// A furniture item available for placement, with its category denormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureModel {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_icon: String,
    pub model_type: String,
    pub default_scale: [f64; 3],
    pub default_color: String,
    pub model_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_premium: bool,
}

/// Models belonging to `category_id`, in catalog order.
#[must_use]
pub fn by_category(models: &[FurnitureModel], category_id: Uuid) -> Vec<&FurnitureModel> {
    models
        .iter()
        .filter(|m| m.category_id == category_id)
        .collect()
}
