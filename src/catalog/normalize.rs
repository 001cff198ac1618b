//! Row → read-model normalization.
//!
//! Normalization is total: every row yields a `FurnitureModel` with every
//! field defined. Empty strings count as absent, matching how the store's
//! admin tooling leaves unset text columns.

use tracing::debug;

use super::model::{
    DEFAULT_CATEGORY_ICON, DEFAULT_CATEGORY_NAME, DEFAULT_COLOR, DEFAULT_MODEL_TYPE, DEFAULT_SCALE, FurnitureModel,
};
use super::source::FurnitureRow;

/// Normalize every row, preserving store order.
#[must_use]
pub fn normalize_all(rows: Vec<FurnitureRow>) -> Vec<FurnitureModel> {
    rows.into_iter().map(normalize).collect()
}

/// Normalize one row, filling documented defaults for absent fields.
#[must_use]
pub fn normalize(row: FurnitureRow) -> FurnitureModel {
    let default_scale = scale_triple(row.default_scale.as_ref()).unwrap_or_else(|| {
        if row.default_scale.is_some() {
            debug!(id = %row.id, raw = ?row.default_scale, "malformed default_scale; using unit scale");
        }
        DEFAULT_SCALE
    });

    FurnitureModel {
        id: row.id,
        name: row.name,
        category_id: row.category_id,
        category_name: or_default(row.category_name, DEFAULT_CATEGORY_NAME),
        category_icon: or_default(row.category_icon, DEFAULT_CATEGORY_ICON),
        model_type: or_default(row.model_type, DEFAULT_MODEL_TYPE),
        default_scale,
        default_color: or_default(row.default_color, DEFAULT_COLOR),
        model_url: non_empty(row.model_url),
        thumbnail_url: non_empty(row.thumbnail_url),
        is_premium: row.is_premium.unwrap_or(false),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or_else(|| default.to_string())
}

/// Exactly three finite, strictly positive numbers.
fn scale_triple(raw: Option<&serde_json::Value>) -> Option<[f64; 3]> {
    let [x, y, z] = raw?.as_array()?.as_slice() else {
        return None;
    };
    let triple = [x.as_f64()?, y.as_f64()?, z.as_f64()?];
    triple
        .iter()
        .all(|c| c.is_finite() && *c > 0.0)
        .then_some(triple)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
