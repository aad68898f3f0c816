//! Grid geometry for land parcels and estates
//!
//! Coordinates live on an integer grid. An estate's selection is the set of
//! its parcel cells, and its centroid is snapped back onto the grid so the map
//! can center on an addressable cell.
//!
//! # Centroid rounding
//!
//! Each axis is `round(mean)` with halves rounded up (toward positive
//! infinity): a mean of `0.5` gives `1`, a mean of `-0.5` gives `0`. The value
//! is computed in integer arithmetic, so large estates never suffer float error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::RenderError;
use crate::models::EstateData;

/// A cell on the land grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A set of highlighted grid cells, ordered by `(x, y)`.
pub type Selection = BTreeSet<Coord>;

/// Selection made of a single cell.
pub fn single_selection(coord: Coord) -> Selection {
    BTreeSet::from([coord])
}

/// Collect the grid cells of every parcel in an estate.
///
/// Duplicate parcels collapse into one cell. Fails on the first parcel whose
/// coordinates cannot be coerced.
pub fn estate_selection(estate: &EstateData) -> Result<Selection, RenderError> {
    estate.parcels.iter().map(|parcel| parcel.coord()).collect()
}

/// Grid cell closest to the mean of a non-empty selection.
pub fn centroid(selection: &Selection) -> Result<Coord, RenderError> {
    if selection.is_empty() {
        return Err(RenderError::EmptyEstate);
    }

    let n = selection.len() as i64;
    let (sum_x, sum_y) = selection
        .iter()
        .fold((0i64, 0i64), |(sx, sy), c| (sx + c.x as i64, sy + c.y as i64));

    Ok(Coord::new(round_half_up(sum_x, n), round_half_up(sum_y, n)))
}

/// `floor(sum / n + 1/2)`, i.e. `floor((2 * sum + n) / (2 * n))`.
fn round_half_up(sum: i64, n: i64) -> i32 {
    // The mean of i32 values is itself within i32 range
    (2 * sum + n).div_euclid(2 * n) as i32
}

/// Inclusive bounding box of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Coord,
    pub max: Coord,
}

impl Bounds {
    /// Bounding box of a selection, `None` when it is empty.
    pub fn of(selection: &Selection) -> Option<Self> {
        let first = selection.iter().next()?;
        let init = Bounds { min: *first, max: *first };
        Some(selection.iter().fold(init, |b, c| Bounds {
            min: Coord::new(b.min.x.min(c.x), b.min.y.min(c.y)),
            max: Coord::new(b.max.x.max(c.x), b.max.y.max(c.y)),
        }))
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= self.min.x && coord.x <= self.max.x && coord.y >= self.min.y && coord.y <= self.max.y
    }

    /// Cell count along x. `u64` so a box spanning the whole `i32` range fits.
    pub fn width(&self) -> u64 {
        u64::from(self.min.x.abs_diff(self.max.x)) + 1
    }

    pub fn height(&self) -> u64 {
        u64::from(self.min.y.abs_diff(self.max.y)) + 1
    }
}
