//! WASM tests using wasm_bindgen_test
//!
//! Run with: wasm-pack test --headless --chrome --features wasm

#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use assetimage::wasm::{rarity_gradient, render_asset};

const PARCEL: &str = r#"{"category": "parcel", "data": {"parcel": {"x": "-4", "y": "12"}}}"#;
const ESTATE: &str =
    r#"{"category": "estate", "data": {"estate": {"parcels": [{"x": 0, "y": 0}, {"x": 2, "y": 0}]}}}"#;
const ENS: &str = r#"{"category": "ens", "data": {"ens": {"subdomain": "alexa"}}}"#;

fn parse(out: &str) -> serde_json::Value {
    serde_json::from_str(out).expect("render_asset should return JSON")
}

#[wasm_bindgen_test]
fn test_render_parcel() {
    let value = parse(&render_asset(PARCEL, ""));
    assert_eq!(value["kind"], "parcel");
    assert_eq!(value["center"]["x"], -4);
    assert_eq!(value["center"]["y"], 12);
}

#[wasm_bindgen_test]
fn test_render_estate_centroid() {
    let value = parse(&render_asset(ESTATE, ""));
    assert_eq!(value["kind"], "estate");
    assert_eq!(value["center"]["x"], 1);
    assert_eq!(value["is_estate"], true);
}

#[wasm_bindgen_test]
fn test_render_ens_small_monospace() {
    let value = parse(&render_asset(ENS, r#"{"small": true, "monospace": true}"#));
    assert_eq!(value["label"], "al");
    assert_eq!(value["monospace"], "al");
}

#[wasm_bindgen_test]
fn test_render_invalid_options() {
    let value = parse(&render_asset(ENS, "{not json"));
    assert_eq!(value["kind"], "invalid_options");
}

#[wasm_bindgen_test]
fn test_rarity_gradient_lookup() {
    assert_eq!(rarity_gradient("common"), vec!["#D4E0E3", "#ABC1C1"]);
    assert!(rarity_gradient("nope").is_empty());
}
