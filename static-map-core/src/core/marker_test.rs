//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::MapError;
use crate::core::marker::{MarkerRegistry, PRESETS};
use image::{Rgba, RgbaImage};
use std::path::Path;
use tempfile::TempDir;
use tile_grid::{GeoPoint, PixelPoint};

fn write_icon(dir: &Path, file: &str) {
    let icon = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 255, 255]));
    icon.save(dir.join(file)).unwrap();
}

#[test]
fn test_register() {
    let dir = TempDir::new().unwrap();
    write_icon(dir.path(), "blue.png");
    let mut registry = MarkerRegistry::new();
    registry
        .register(Some("blue"), &dir.path().join("blue.png"), 20, 40)
        .unwrap();

    let marker = registry
        .create("blue", GeoPoint::new(53.48095, -2.23743))
        .unwrap();
    assert_eq!(marker.icon.anchor, PixelPoint::new(-20, -40));
    assert_eq!(marker.icon.image.dimensions(), (40, 40));
    assert_eq!(marker.coordinates, GeoPoint::new(53.48095, -2.23743));
}

#[test]
fn test_register_without_name() {
    let dir = TempDir::new().unwrap();
    write_icon(dir.path(), "test.png");
    let mut registry = MarkerRegistry::new();
    registry
        .register(None, &dir.path().join("test.png"), 0, 0)
        .unwrap();
    assert_eq!(registry.names(), vec!["test.png"]);
    assert!(registry.create("test.png", GeoPoint::default()).is_ok());
}

#[test]
fn test_missing_marker() {
    let registry = MarkerRegistry::new();
    let err = registry.create("foobar", GeoPoint::default()).unwrap_err();
    assert!(matches!(err, MapError::MarkerPrototypeNotFound(ref name) if name == "foobar"));

    let mut registry = MarkerRegistry::new();
    let err = registry
        .register(Some("ghost"), Path::new("/nonexistent/ghost.png"), 1, 1)
        .unwrap_err();
    assert!(matches!(err, MapError::MarkerFileNotFound(_)));
    assert!(!err.is_validation());
}

#[test]
fn test_presets() {
    let dir = TempDir::new().unwrap();
    for (name, _, _) in PRESETS {
        write_icon(dir.path(), &format!("{}.png", name));
    }
    let registry = MarkerRegistry::with_presets(dir.path()).unwrap();
    assert_eq!(registry.names().len(), 7);
    assert_eq!(
        registry.get("google_lg").unwrap().anchor,
        PixelPoint::new(-32, -64)
    );
    assert_eq!(registry.get("pin").unwrap().anchor, PixelPoint::new(-6, -42));

    // an incomplete marker directory is an error
    let empty = TempDir::new().unwrap();
    assert!(MarkerRegistry::with_presets(empty.path()).is_err());
}
