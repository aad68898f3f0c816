//! Error types for a single render attempt
//!
//! Every variant is a precondition violation: the asset record or the display
//! options do not hold what the declared category requires. Unknown categories
//! are not errors, they render through the fallback strategy.

use thiserror::Error;

use crate::models::AssetCategory;

/// Error raised while computing render parameters for one asset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The payload required by the asset's category is absent
    #[error("{category} asset is missing its '{category}' data")]
    MissingData { category: AssetCategory },
    /// A parcel coordinate could not be coerced to an integer grid position
    #[error("invalid parcel coordinate '{value}'")]
    InvalidCoordinate { value: String },
    /// Estate without a single constituent parcel
    #[error("estate has no parcels")]
    EmptyEstate,
    /// Zoom level must be a positive, finite number
    #[error("invalid zoom {0}, expected a positive number")]
    InvalidZoom(f64),
}

impl RenderError {
    /// Short machine-readable label, used by the CLI and the wasm bindings
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::MissingData { .. } => "missing_data",
            RenderError::InvalidCoordinate { .. } => "invalid_coordinate",
            RenderError::EmptyEstate => "empty_estate",
            RenderError::InvalidZoom(_) => "invalid_zoom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_message_names_category() {
        let err = RenderError::MissingData { category: AssetCategory::Parcel };
        assert_eq!(err.to_string(), "parcel asset is missing its 'parcel' data");
        assert_eq!(err.kind(), "missing_data");
    }

    #[test]
    fn test_invalid_coordinate_message() {
        let err = RenderError::InvalidCoordinate { value: "1.5".to_string() };
        assert_eq!(err.to_string(), "invalid parcel coordinate '1.5'");
    }
}
