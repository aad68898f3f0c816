//! assetimage - render parameters for marketplace asset thumbnails
//!
//! Given one asset record (land parcel, estate, wearable, name registration or
//! anything else) and a set of display options, this library picks the render
//! strategy for the asset's category and computes what the presentation layer
//! needs: map center and selection, rarity gradient, label text, or a
//! deferred image load.
//!
//! ```
//! use assetimage::models::{Asset, DisplayOptions};
//! use assetimage::render::{render, RenderSpec};
//! use assetimage::resolve::DefaultResolver;
//!
//! let spec = render(&Asset::estate([(0, 0), (2, 0)]), &DisplayOptions::default(), &DefaultResolver).unwrap();
//! match spec {
//!     RenderSpec::Estate(map) => assert_eq!((map.center.x, map.center.y), (1, 0)),
//!     _ => unreachable!(),
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod lazy;
pub mod models;
pub mod parser;
pub mod rarity;
pub mod render;
pub mod resolve;

#[cfg(feature = "wasm")]
pub mod wasm;
