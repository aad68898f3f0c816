//! Category dispatch and per-strategy render parameters
//!
//! [`render`] inspects an asset's category and hands it to one strategy:
//!
//! - parcel and estate assets become map parameters (center cell + selection)
//! - wearables become a rarity gradient background around the item image
//! - name registrations become a text label, optionally truncated and doubled
//! - everything else becomes a deferred image load (see [`crate::lazy`])
//!
//! Rendering is pure: the same asset and options always produce the same
//! [`RenderSpec`]. [`Renderer`] adds an estate geometry cache on top.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tracing::debug;

use crate::cache::{EstateGeometry, EstateGeometryCache};
use crate::color::Gradient;
use crate::error::RenderError;
use crate::geometry::{single_selection, Coord, Selection};
use crate::lazy::DEBOUNCE_MS;
use crate::models::{Asset, AssetCategory, DisplayOptions, EnsData, EstateData, ParcelData, WearableData};
use crate::resolve::{AssetResolver, DefaultResolver};

/// Number of characters kept from a name label in compact rendering
pub const SMALL_LABEL_CHARS: usize = 2;

/// Parameters for the map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasParams {
    pub center: Coord,
    pub selection: Arc<Selection>,
    pub is_estate: bool,
    pub draggable: bool,
    pub popup: bool,
    pub navigation: bool,
    pub zoom: f64,
}

/// Parameters for a wearable thumbnail on its rarity background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WearableParams {
    pub gradient: Gradient,
    /// CSS background built from `gradient`
    pub background: String,
    pub image: String,
    pub alt: String,
}

/// Parameters for a name-registration label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsParams {
    pub label: String,
    pub small: bool,
    /// Monospace copy of `label`, present when requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub monospace: Option<String>,
}

impl EnsParams {
    /// Every label instance to draw, primary first.
    pub fn labels(&self) -> Vec<&str> {
        std::iter::once(self.label.as_str()).chain(self.monospace.as_deref()).collect()
    }
}

/// Display hint for the loading indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderHint {
    pub small: bool,
    pub active: bool,
}

impl Default for LoaderHint {
    fn default() -> Self {
        Self { small: true, active: true }
    }
}

/// Parameters for the fallback lazily loaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredImageParams {
    pub src: String,
    pub alt: String,
    pub debounce_ms: u64,
    pub loader: LoaderHint,
}

/// Output of one render pass, one variant per strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderSpec {
    Parcel(AtlasParams),
    Estate(AtlasParams),
    Wearable(WearableParams),
    Ens(EnsParams),
    Other(DeferredImageParams),
}

impl RenderSpec {
    /// Strategy name, matching the serialized `kind`
    pub fn kind(&self) -> &'static str {
        match self {
            RenderSpec::Parcel(_) => "parcel",
            RenderSpec::Estate(_) => "estate",
            RenderSpec::Wearable(_) => "wearable",
            RenderSpec::Ens(_) => "ens",
            RenderSpec::Other(_) => "other",
        }
    }
}

/// Compute render parameters for an asset.
///
/// Estate geometry is derived on every call; use [`Renderer`] to memoize it.
pub fn render(
    asset: &Asset,
    options: &DisplayOptions,
    resolver: &dyn AssetResolver,
) -> Result<RenderSpec, RenderError> {
    dispatch(asset, options, resolver, |estate| EstateGeometry::compute(estate).map(Arc::new))
}

fn dispatch<F>(
    asset: &Asset,
    options: &DisplayOptions,
    resolver: &dyn AssetResolver,
    estate_geometry: F,
) -> Result<RenderSpec, RenderError>
where
    F: FnOnce(&Arc<EstateData>) -> Result<Arc<EstateGeometry>, RenderError>,
{
    debug!(id = %asset.id, category = %asset.category, "rendering asset");

    let missing = || RenderError::MissingData { category: asset.category.clone() };

    match &asset.category {
        AssetCategory::Parcel => {
            let parcel = asset.data.parcel.as_ref().ok_or_else(missing)?;
            render_parcel(parcel, options).map(RenderSpec::Parcel)
        }
        AssetCategory::Estate => {
            let estate = asset.data.estate.as_ref().ok_or_else(missing)?;
            let geometry = estate_geometry(estate)?;
            render_estate(&geometry, options).map(RenderSpec::Estate)
        }
        AssetCategory::Wearable => {
            let wearable = asset.data.wearable.as_ref().ok_or_else(missing)?;
            Ok(RenderSpec::Wearable(render_wearable(asset, wearable, resolver)))
        }
        AssetCategory::Ens => {
            let ens = asset.data.ens.as_ref().ok_or_else(missing)?;
            Ok(RenderSpec::Ens(render_ens(ens, options)))
        }
        AssetCategory::Other(_) => Ok(RenderSpec::Other(render_fallback(asset, resolver))),
    }
}

/// Map parameters centered on a single parcel.
pub fn render_parcel(parcel: &ParcelData, options: &DisplayOptions) -> Result<AtlasParams, RenderError> {
    let center = parcel.coord()?;
    Ok(AtlasParams {
        center,
        selection: Arc::new(single_selection(center)),
        is_estate: false,
        draggable: options.draggable,
        popup: options.popup,
        navigation: options.navigation,
        zoom: options.checked_zoom()?,
    })
}

/// Map parameters centered on an estate's centroid, selecting all its parcels.
pub fn render_estate(
    geometry: &EstateGeometry,
    options: &DisplayOptions,
) -> Result<AtlasParams, RenderError> {
    Ok(AtlasParams {
        center: geometry.center,
        selection: Arc::clone(&geometry.selection),
        is_estate: true,
        draggable: options.draggable,
        popup: options.popup,
        navigation: options.navigation,
        zoom: options.checked_zoom()?,
    })
}

pub fn render_wearable(
    asset: &Asset,
    wearable: &WearableData,
    resolver: &dyn AssetResolver,
) -> WearableParams {
    let gradient = wearable.rarity.gradient();
    WearableParams {
        background: gradient.css(),
        gradient,
        image: resolver.resolve_image(asset),
        alt: resolver.resolve_display_name(asset),
    }
}

/// Name label; compact rendering keeps only the first two characters.
pub fn render_ens(ens: &EnsData, options: &DisplayOptions) -> EnsParams {
    let label: String = if options.small {
        ens.subdomain.chars().take(SMALL_LABEL_CHARS).collect()
    } else {
        ens.subdomain.clone()
    };
    EnsParams {
        monospace: options.monospace.then(|| label.clone()),
        label,
        small: options.small,
    }
}

pub fn render_fallback(asset: &Asset, resolver: &dyn AssetResolver) -> DeferredImageParams {
    DeferredImageParams {
        src: resolver.resolve_image(asset),
        alt: resolver.resolve_display_name(asset),
        debounce_ms: DEBOUNCE_MS,
        loader: LoaderHint::default(),
    }
}

/// Stateful renderer that memoizes estate geometry across passes.
///
/// Geometry is recomputed only when a different estate payload is rendered;
/// changing display options never invalidates it.
#[derive(Debug, Default)]
pub struct Renderer<R = DefaultResolver> {
    resolver: R,
    cache: EstateGeometryCache,
}

impl Renderer<DefaultResolver> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: AssetResolver> Renderer<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver, cache: EstateGeometryCache::new() }
    }

    pub fn render(&mut self, asset: &Asset, options: &DisplayOptions) -> Result<RenderSpec, RenderError> {
        let cache = &mut self.cache;
        dispatch(asset, options, &self.resolver, |estate| cache.get_or_compute(estate))
    }

    pub fn cache(&self) -> &EstateGeometryCache {
        &self.cache
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }
}
