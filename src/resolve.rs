//! Image and display-name resolution for assets
//!
//! The render strategies only need two facts about an asset beyond its
//! category payload: which image to show and what to call it. Both come from an
//! [`AssetResolver`] so hosts can plug in their own catalog lookups.

use crate::models::{Asset, AssetCategory};

/// Deterministic, side-effect free lookups used by the render strategies.
pub trait AssetResolver {
    /// Image reference (URL or data URI) for the asset
    fn resolve_image(&self, asset: &Asset) -> String;

    /// Human-readable name, used for labels and alt text
    fn resolve_display_name(&self, asset: &Asset) -> String;
}

/// Resolver reading the record's own `image`, `thumbnail` and `name` fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl AssetResolver for DefaultResolver {
    fn resolve_image(&self, asset: &Asset) -> String {
        asset
            .image
            .as_deref()
            .or(asset.thumbnail.as_deref())
            .unwrap_or_default()
            .to_string()
    }

    fn resolve_display_name(&self, asset: &Asset) -> String {
        if let Some(name) = asset.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }

        match &asset.category {
            AssetCategory::Parcel => match asset.data.parcel.as_ref().map(|p| p.coord()) {
                Some(Ok(coord)) => format!("Parcel {}", coord),
                _ => "Parcel".to_string(),
            },
            AssetCategory::Estate => "Estate".to_string(),
            AssetCategory::Wearable => "Wearable".to_string(),
            AssetCategory::Ens => match &asset.data.ens {
                Some(ens) => ens.subdomain.clone(),
                None => "Name".to_string(),
            },
            AssetCategory::Other(_) => "NFT".to_string(),
        }
    }
}
