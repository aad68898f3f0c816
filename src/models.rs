//! Data models for asset records and display options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::RenderError;
use crate::geometry::Coord;
use crate::rarity::Rarity;

/// Category tag of an asset.
///
/// The four named categories have dedicated render strategies. Any other tag
/// is kept verbatim in `Other` and renders through the fallback image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetCategory {
    Parcel,
    Estate,
    Wearable,
    Ens,
    Other(String),
}

impl AssetCategory {
    pub fn as_str(&self) -> &str {
        match self {
            AssetCategory::Parcel => "parcel",
            AssetCategory::Estate => "estate",
            AssetCategory::Wearable => "wearable",
            AssetCategory::Ens => "ens",
            AssetCategory::Other(tag) => tag,
        }
    }
}

impl From<String> for AssetCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "parcel" => AssetCategory::Parcel,
            "estate" => AssetCategory::Estate,
            "wearable" => AssetCategory::Wearable,
            "ens" => AssetCategory::Ens,
            _ => AssetCategory::Other(tag),
        }
    }
}

impl From<&str> for AssetCategory {
    fn from(tag: &str) -> Self {
        AssetCategory::from(tag.to_string())
    }
}

impl From<AssetCategory> for String {
    fn from(category: AssetCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A coordinate as it arrives in a record: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CoordValue {
    /// Coerce to an integer grid position.
    ///
    /// Fails on empty or non-integral input instead of defaulting to zero.
    pub fn coerce(&self) -> Result<i32, RenderError> {
        let invalid = |value: String| RenderError::InvalidCoordinate { value };
        match self {
            CoordValue::Int(n) => i32::try_from(*n).map_err(|_| invalid(n.to_string())),
            CoordValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64
                {
                    Ok(*f as i32)
                } else {
                    Err(invalid(f.to_string()))
                }
            }
            CoordValue::Text(s) => s.trim().parse::<i32>().map_err(|_| invalid(s.clone())),
        }
    }
}

impl From<i32> for CoordValue {
    fn from(n: i32) -> Self {
        CoordValue::Int(n as i64)
    }
}

impl From<&str> for CoordValue {
    fn from(s: &str) -> Self {
        CoordValue::Text(s.to_string())
    }
}

/// Land parcel payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelData {
    pub x: CoordValue,
    pub y: CoordValue,
}

impl ParcelData {
    pub fn new(x: impl Into<CoordValue>, y: impl Into<CoordValue>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    /// Coerced grid position of this parcel.
    pub fn coord(&self) -> Result<Coord, RenderError> {
        Ok(Coord::new(self.x.coerce()?, self.y.coerce()?))
    }
}

/// Estate payload: the parcels it is made of.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EstateData {
    #[serde(default)]
    pub parcels: Vec<ParcelData>,
}

/// Wearable payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearableData {
    pub rarity: Rarity,
}

/// Name-registration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsData {
    pub subdomain: String,
}

/// Category-specific payloads. Only the one matching the category is read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetData {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parcel: Option<ParcelData>,
    /// Shared so the estate keeps a stable identity across render passes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub estate: Option<Arc<EstateData>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub wearable: Option<WearableData>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ens: Option<EnsData>,
}

/// One marketplace asset record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,
    pub category: AssetCategory,
    #[serde(default)]
    pub data: AssetData,
}

impl Asset {
    /// Create an asset with no payload.
    pub fn new(category: impl Into<AssetCategory>) -> Self {
        Self {
            id: String::new(),
            name: None,
            image: None,
            thumbnail: None,
            category: category.into(),
            data: AssetData::default(),
        }
    }

    pub fn parcel(x: impl Into<CoordValue>, y: impl Into<CoordValue>) -> Self {
        let mut asset = Self::new(AssetCategory::Parcel);
        asset.data.parcel = Some(ParcelData::new(x, y));
        asset
    }

    pub fn estate<I>(parcels: I) -> Self
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let parcels = parcels.into_iter().map(|(x, y)| ParcelData::new(x, y)).collect();
        let mut asset = Self::new(AssetCategory::Estate);
        asset.data.estate = Some(Arc::new(EstateData { parcels }));
        asset
    }

    pub fn wearable(rarity: Rarity) -> Self {
        let mut asset = Self::new(AssetCategory::Wearable);
        asset.data.wearable = Some(WearableData { rarity });
        asset
    }

    pub fn ens(subdomain: impl Into<String>) -> Self {
        let mut asset = Self::new(AssetCategory::Ens);
        asset.data.ens = Some(EnsData { subdomain: subdomain.into() });
        asset
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Caller-supplied display options for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Allow dragging the map
    pub draggable: bool,
    /// Show map navigation controls
    pub navigation: bool,
    /// Show a popup when hovering map cells
    pub popup: bool,
    /// Map zoom level
    pub zoom: f64,
    /// Compact rendering (truncates name labels)
    pub small: bool,
    /// Layer a monospace copy of the name label
    pub monospace: bool,
}

/// Default map zoom level
pub const DEFAULT_ZOOM: f64 = 0.5;

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            draggable: false,
            navigation: false,
            popup: false,
            zoom: DEFAULT_ZOOM,
            small: false,
            monospace: false,
        }
    }
}

impl DisplayOptions {
    /// Zoom level, checked to be a positive finite number.
    pub fn checked_zoom(&self) -> Result<f64, RenderError> {
        if self.zoom.is_finite() && self.zoom > 0.0 {
            Ok(self.zoom)
        } else {
            Err(RenderError::InvalidZoom(self.zoom))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_known_tags() {
        assert_eq!(AssetCategory::from("parcel"), AssetCategory::Parcel);
        assert_eq!(AssetCategory::from("estate"), AssetCategory::Estate);
        assert_eq!(AssetCategory::from("wearable"), AssetCategory::Wearable);
        assert_eq!(AssetCategory::from("ens"), AssetCategory::Ens);
    }

    #[test]
    fn test_category_unknown_tag_is_kept() {
        let category = AssetCategory::from("art");
        assert_eq!(category, AssetCategory::Other("art".to_string()));
        assert_eq!(category.to_string(), "art");
    }

    #[test]
    fn test_parcel_record_with_string_coordinates() {
        let json = r#"{"id": "p1", "category": "parcel", "data": {"parcel": {"x": "-12", "y": " 40 "}}}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.category, AssetCategory::Parcel);
        let parcel = asset.data.parcel.unwrap();
        assert_eq!(parcel.coord().unwrap(), Coord::new(-12, 40));
    }

    #[test]
    fn test_parcel_record_with_numeric_coordinates() {
        let json = r#"{"category": "parcel", "data": {"parcel": {"x": 3, "y": 4.0}}}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.data.parcel.unwrap().coord().unwrap(), Coord::new(3, 4));
    }

    #[test]
    fn test_coord_coercion_failures() {
        assert!(CoordValue::from("").coerce().is_err());
        assert!(CoordValue::from("abc").coerce().is_err());
        assert!(CoordValue::from("1.5").coerce().is_err());
        assert!(CoordValue::Float(2.5).coerce().is_err());
        assert!(CoordValue::Int(i64::from(i32::MAX) + 1).coerce().is_err());
    }

    #[test]
    fn test_coord_coercion_error_keeps_raw_value() {
        let err = CoordValue::from("north").coerce().unwrap_err();
        assert_eq!(err, RenderError::InvalidCoordinate { value: "north".to_string() });
    }

    #[test]
    fn test_unknown_rarity_rejected_while_deserializing() {
        let json = r#"{"category": "wearable", "data": {"wearable": {"rarity": "ultra"}}}"#;
        assert!(serde_json::from_str::<Asset>(json).is_err());
    }

    #[test]
    fn test_unknown_category_record() {
        let json = r#"{"category": "art", "name": "Sunset", "image": "https://img/1.png"}"#;
        let asset: Asset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.category, AssetCategory::Other("art".to_string()));
        assert_eq!(asset.image.as_deref(), Some("https://img/1.png"));
    }

    #[test]
    fn test_category_serializes_as_tag() {
        let json = serde_json::to_string(&Asset::ens("alexa")).unwrap();
        assert!(json.contains(r#""category":"ens""#));
    }

    #[test]
    fn test_display_options_defaults() {
        let options: DisplayOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, DisplayOptions::default());
        assert_eq!(options.zoom, 0.5);
        assert!(!options.draggable && !options.navigation && !options.popup);
        assert!(!options.small && !options.monospace);
    }

    #[test]
    fn test_display_options_partial() {
        let options: DisplayOptions = serde_json::from_str(r#"{"small": true, "zoom": 2}"#).unwrap();
        assert!(options.small);
        assert_eq!(options.zoom, 2.0);
        assert!(!options.monospace);
    }

    #[test]
    fn test_checked_zoom() {
        let mut options = DisplayOptions::default();
        assert_eq!(options.checked_zoom(), Ok(0.5));
        options.zoom = 0.0;
        assert_eq!(options.checked_zoom(), Err(RenderError::InvalidZoom(0.0)));
        options.zoom = f64::NAN;
        assert!(options.checked_zoom().is_err());
    }
}
