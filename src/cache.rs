//! Memoized estate geometry
//!
//! Deriving an estate's selection walks every parcel, so the result is kept
//! for as long as the same estate is rendered. The key is the identity of the
//! shared estate payload (`Arc` pointer), not its contents: a new estate value
//! always recomputes, the same one never does.

use std::sync::Arc;

use tracing::debug;

use crate::error::RenderError;
use crate::geometry::{centroid, estate_selection, Coord, Selection};
use crate::models::EstateData;

/// Selection and centroid derived from one estate.
#[derive(Debug, Clone, PartialEq)]
pub struct EstateGeometry {
    pub selection: Arc<Selection>,
    pub center: Coord,
}

impl EstateGeometry {
    /// Derive the geometry of an estate. Fails on an empty estate.
    pub fn compute(estate: &EstateData) -> Result<Self, RenderError> {
        let selection = estate_selection(estate)?;
        let center = centroid(&selection)?;
        Ok(Self { selection: Arc::new(selection), center })
    }
}

/// Single-entry cache keyed by estate identity.
#[derive(Debug, Default)]
pub struct EstateGeometryCache {
    // Holding the key keeps its allocation alive, so a pointer match is never stale
    entry: Option<(Arc<EstateData>, Arc<EstateGeometry>)>,
    recomputations: usize,
}

impl EstateGeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry of `estate`, recomputed only when the estate identity changes.
    ///
    /// A failed computation leaves the previous entry in place.
    pub fn get_or_compute(
        &mut self,
        estate: &Arc<EstateData>,
    ) -> Result<Arc<EstateGeometry>, RenderError> {
        if let Some((key, geometry)) = &self.entry {
            if Arc::ptr_eq(key, estate) {
                debug!(parcels = geometry.selection.len(), "estate geometry cache hit");
                return Ok(Arc::clone(geometry));
            }
        }

        let geometry = Arc::new(EstateGeometry::compute(estate)?);
        self.recomputations += 1;
        debug!(
            parcels = geometry.selection.len(),
            center = %geometry.center,
            "estate geometry recomputed"
        );
        self.entry = Some((Arc::clone(estate), Arc::clone(&geometry)));
        Ok(geometry)
    }

    /// Drop the cached entry.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of times geometry was actually derived
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn is_cached(&self, estate: &Arc<EstateData>) -> bool {
        matches!(&self.entry, Some((key, _)) if Arc::ptr_eq(key, estate))
    }
}
