//! WASM API module for browser/JS interop
//!
//! Exposes the renderer to a JS presentation layer. Inputs and outputs are
//! JSON strings so the host can keep using its own asset records.

use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::models::{Asset, DisplayOptions};
use crate::rarity::Rarity;
use crate::render::render;
use crate::resolve::DefaultResolver;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Render one asset record.
///
/// `options_json` may be empty, in which case the default display options
/// apply. Returns the render spec as JSON, or `{"error": .., "kind": ..}`.
#[wasm_bindgen]
pub fn render_asset(asset_json: &str, options_json: &str) -> String {
    let asset: Asset = match serde_json::from_str(asset_json) {
        Ok(asset) => asset,
        Err(e) => return error_json("invalid_asset", &e.to_string()),
    };
    let options: DisplayOptions = if options_json.trim().is_empty() {
        DisplayOptions::default()
    } else {
        match serde_json::from_str(options_json) {
            Ok(options) => options,
            Err(e) => return error_json("invalid_options", &e.to_string()),
        }
    };

    match render(&asset, &options, &DefaultResolver) {
        Ok(spec) => serde_json::to_string(&spec)
            .unwrap_or_else(|e| error_json("serialize", &e.to_string())),
        Err(e) => error_json(e.kind(), &e.to_string()),
    }
}

/// Light and dark gradient stops for a rarity name, empty if unknown.
#[wasm_bindgen]
pub fn rarity_gradient(rarity: &str) -> Vec<String> {
    match rarity.parse::<Rarity>() {
        Ok(tier) => {
            let gradient = tier.gradient();
            vec![gradient.light, gradient.dark]
        }
        Err(_) => Vec::new(),
    }
}

fn error_json(kind: &str, message: &str) -> String {
    json!({ "error": message, "kind": kind }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_asset_parcel() {
        let out = render_asset(r#"{"category": "parcel", "data": {"parcel": {"x": "3", "y": "4"}}}"#, "");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["kind"], "parcel");
        assert_eq!(value["center"]["x"], 3);
        assert_eq!(value["zoom"], 0.5);
    }

    #[test]
    fn test_render_asset_with_options() {
        let out = render_asset(
            r#"{"category": "ens", "data": {"ens": {"subdomain": "alexa"}}}"#,
            r#"{"small": true}"#,
        );
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["label"], "al");
    }

    #[test]
    fn test_render_asset_errors() {
        let out = render_asset("not json", "");
        assert!(out.contains(r#""kind":"invalid_asset""#));

        let out = render_asset(r#"{"category": "estate"}"#, "");
        assert!(out.contains(r#""kind":"missing_data""#));
    }

    #[test]
    fn test_rarity_gradient() {
        assert_eq!(rarity_gradient("mythic"), vec!["#FB7DE3", "#FF4BED"]);
        assert!(rarity_gradient("ultra").is_empty());
    }
}
