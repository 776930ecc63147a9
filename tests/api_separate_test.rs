//! Tests for the separation endpoints.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use halftoner::models::{AppConfig, ChannelConfig, ChannelsConfig};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    common::assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_separate_black_square_into_two_by_two() {
    let app = TestApp::new();
    let query = format!("{}&greyscale=true", fixtures::TWO_BY_TWO);
    let manifest = app
        .separate(fixtures::solid_png(100, 100, (0, 0, 0)), &query)
        .await;

    assert_eq!(manifest.id.len(), 32);
    assert_eq!((manifest.width, manifest.height), (100, 100));
    assert_eq!(manifest.scale, 1.0);
    assert_eq!((manifest.columns, manifest.rows), (2, 2));

    let keys: Vec<_> = manifest.layers.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, vec!["k"]);

    let tiles: Vec<_> = manifest
        .tiles
        .iter()
        .map(|t| (t.column, t.row, t.x, t.y, t.width, t.height))
        .collect();
    assert_eq!(
        tiles,
        vec![
            (0, 0, 0.0, 0.0, 60.0, 60.0),
            (1, 0, 50.0, 0.0, 60.0, 60.0),
            (0, 1, 0.0, 50.0, 60.0, 60.0),
            (1, 1, 50.0, 50.0, 60.0, 60.0),
        ]
    );
    // Dots in the overlap strips land on more than one tile
    let per_tile: usize = manifest.tiles.iter().map(|t| t.shape_counts["k"]).sum();
    assert!(per_tile > manifest.layers[0].shape_count);
}

#[tokio::test]
async fn test_standard_screen_layers_in_order() {
    let app = TestApp::new();
    let manifest = app.separate(fixtures::split_png(80, 40), "").await;

    let layers: Vec<_> = manifest
        .layers
        .iter()
        .map(|l| (l.key.as_str(), l.angle))
        .collect();
    assert_eq!(
        layers,
        vec![("c", 345.0), ("y", 0.0), ("m", 15.0), ("k", 75.0)]
    );
    // Red and blue both carry magenta; neither carries black
    let m = &manifest.layers[2];
    assert!(m.shape_count > 0);
    assert_eq!(manifest.layers[3].shape_count, 0);
}

#[tokio::test]
async fn test_manifest_lookup_matches_creation() {
    let app = TestApp::new();
    let created = app
        .separate(fixtures::solid_png(30, 30, (200, 100, 50)), "")
        .await;

    let response = app.get(&format!("/api/separations/{}", created.id)).await;
    common::assert_ok(&response);
    let fetched: serde_json::Value = response.json();
    assert_eq!(fetched, serde_json::to_value(&created).unwrap());
}

#[tokio::test]
async fn test_identical_inputs_share_an_id() {
    let app = TestApp::new();
    let png = fixtures::solid_png(20, 20, (10, 20, 30));

    let first = app.separate(png.clone(), "cell_size=5").await;
    let second = app.separate(png.clone(), "cell_size=5").await;
    let third = app.separate(png, "cell_size=4").await;

    assert_eq!(first.id, second.id);
    assert_ne!(first.id, third.id);
    assert_eq!(app.store.len().await, 2);
}

#[tokio::test]
async fn test_halftone_svg() {
    let app = TestApp::new();
    let manifest = app
        .separate(fixtures::solid_png(50, 50, (0, 0, 0)), "invert=true")
        .await;

    let response = app
        .get(&format!("/api/separations/{}/halftone.svg", manifest.id))
        .await;
    common::assert_svg(&response);

    let svg = response.text();
    assert!(svg.contains(r#"viewBox="0 0 50 50""#));
    assert!(svg.contains(r#"<rect x="0" y="0" width="50" height="50" fill="black"/>"#));
    assert!(svg.contains(r#"<g id="layer-k" fill="black" transform="rotate(-135)"#));
}

#[tokio::test]
async fn test_tile_svg() {
    let app = TestApp::new();
    let query = format!("{}&greyscale=true&shape=square", fixtures::TWO_BY_TWO);
    let manifest = app
        .separate(fixtures::solid_png(100, 100, (0, 0, 0)), &query)
        .await;

    let response = app
        .get(&format!("/api/separations/{}/tiles/k/1/0", manifest.id))
        .await;
    common::assert_svg(&response);
    let svg = response.text();
    assert!(svg.contains(r#"viewBox="50 0 60 60""#));
    assert_eq!(svg.matches("<rect ").count(), manifest.tiles[1].shape_counts["k"]);

    // Full channel names are accepted too
    let by_name = app
        .get(&format!("/api/separations/{}/tiles/black/1/0", manifest.id))
        .await;
    assert_eq!(by_name.text(), svg);
}

#[tokio::test]
async fn test_missing_tile_channel_and_separation() {
    let app = TestApp::new();
    let manifest = app
        .separate(fixtures::solid_png(10, 10, (0, 0, 0)), "greyscale=true")
        .await;

    let response = app
        .get(&format!("/api/separations/{}/tiles/k/5/5", manifest.id))
        .await;
    common::assert_status(&response, StatusCode::NOT_FOUND);
    common::assert_json_status(&response, 404);

    let response = app
        .get(&format!("/api/separations/{}/tiles/c/0/0", manifest.id))
        .await;
    common::assert_status(&response, StatusCode::NOT_FOUND);

    let response = app
        .get(&format!("/api/separations/{}/tiles/orange/0/0", manifest.id))
        .await;
    common::assert_status(&response, StatusCode::NOT_FOUND);

    let response = app.get("/api/separations/deadbeef").await;
    common::assert_status(&response, StatusCode::NOT_FOUND);
    common::assert_json_status(&response, 404);
}

#[tokio::test]
async fn test_preview_png() {
    let app = TestApp::new();
    let manifest = app.separate(fixtures::split_png(60, 40), "").await;

    let plain = app
        .get(&format!("/api/separations/{}/preview.png", manifest.id))
        .await;
    common::assert_png(&plain);

    let chops = app
        .get(&format!(
            "/api/separations/{}/preview.png?chops=true",
            manifest.id
        ))
        .await;
    common::assert_png(&chops);
    assert_ne!(plain.body, chops.body);
}

#[tokio::test]
async fn test_invalid_png_is_bad_request() {
    let app = TestApp::new();
    let response = app
        .post_bytes("/api/separate", "image/png", b"not a png".to_vec())
        .await;
    common::assert_status(&response, StatusCode::BAD_REQUEST);
    common::assert_json_status(&response, 400);
}

#[tokio::test]
async fn test_invalid_settings_are_unprocessable() {
    let app = TestApp::new();
    let png = fixtures::solid_png(10, 10, (0, 0, 0));

    let response = app
        .post_bytes("/api/separate?cell_size=0", "image/png", png.clone())
        .await;
    common::assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    common::assert_json_status(&response, 422);
    assert!(response.text().contains("cell_size"));

    // Overlap swallows the whole printable width
    let response = app
        .post_bytes(
            "/api/separate?printable_width=10&overlap=10",
            "image/png",
            png,
        )
        .await;
    common::assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("overlap"));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_tiny_scale_is_unprocessable() {
    let app = TestApp::new();
    let response = app
        .post_bytes(
            "/api/separate?target_width=1e12",
            "image/png",
            fixtures::solid_png(10, 10, (0, 0, 0)),
        )
        .await;
    common::assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    common::assert_json_status(&response, 422);
    assert!(response.text().contains("tile layout"));
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_spot_channel_is_served_by_id() {
    let channel = |id: Option<&str>, angle: f64, fill: &str| ChannelConfig {
        id: id.map(str::to_string),
        key: "m".into(),
        angle,
        fill: fill.into(),
        skip_at: None,
    };
    let app = TestApp::with_config(AppConfig {
        channels: ChannelsConfig::Custom(vec![
            channel(None, 15.0, "magenta"),
            channel(Some("spot-red"), 45.0, "#e10600"),
        ]),
        ..Default::default()
    });
    let manifest = app
        .separate(fixtures::solid_png(100, 100, (255, 0, 0)), fixtures::TWO_BY_TWO)
        .await;

    let layers: Vec<_> = manifest
        .layers
        .iter()
        .map(|l| (l.key.as_str(), l.channel.as_str(), l.angle))
        .collect();
    assert_eq!(layers, vec![("m", "m", 15.0), ("spot-red", "m", 45.0)]);
    assert!(manifest.tiles[0].shape_counts["spot-red"] > 0);

    let spot = app
        .get(&format!("/api/separations/{}/tiles/spot-red/0/0", manifest.id))
        .await;
    common::assert_svg(&spot);
    assert!(spot.text().contains(r##"<g id="layer-spot-red" fill="#e10600""##));

    // the channel name still finds the layer carrying the default id
    let by_name = app
        .get(&format!("/api/separations/{}/tiles/magenta/0/0", manifest.id))
        .await;
    common::assert_svg(&by_name);
    assert!(by_name.text().contains(r#"<g id="layer-m" fill="magenta""#));
}

#[tokio::test]
async fn test_store_drops_least_recently_used() {
    let app = TestApp::with_config(AppConfig {
        max_stored_separations: 2,
        ..Default::default()
    });
    let png = fixtures::solid_png(20, 20, (0, 0, 0));

    let first = app.separate(png.clone(), "cell_size=4").await;
    let second = app.separate(png.clone(), "cell_size=5").await;
    let third = app.separate(png, "cell_size=6").await;

    assert_eq!(app.store.len().await, 2);
    let gone = app.get(&format!("/api/separations/{}", first.id)).await;
    common::assert_status(&gone, StatusCode::NOT_FOUND);
    for kept in [&second, &third] {
        let response = app.get(&format!("/api/separations/{}", kept.id)).await;
        common::assert_ok(&response);
    }
}
