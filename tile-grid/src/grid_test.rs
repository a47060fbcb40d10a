//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid::*;

#[test]
fn test_projection() {
    assert_eq!(lng_to_tile_x(-180.0, 0), 0.0);
    assert_eq!(lng_to_tile_x(0.0, 1), 1.0);
    assert_eq!(lng_to_tile_x(90.0, 2), 3.0);
    assert!((lat_to_tile_y(0.0, 1) - 1.0).abs() < 1e-12);

    let coord = project(&GeoPoint::new(53.480950, -2.237430), 12);
    assert_eq!(coord.x.floor(), 2022.0);
    assert_eq!(coord.y.floor(), 1325.0);
}

#[test]
fn test_projection_monotonic() {
    for zoom in 0..=18 {
        let mut prev_x = lng_to_tile_x(-180.0, zoom);
        let mut lng = -180.0;
        while lng < 180.0 {
            lng += 7.5;
            let x = lng_to_tile_x(lng, zoom);
            assert!(x > prev_x);
            prev_x = x;
        }
        let mut prev_y = lat_to_tile_y(-85.0, zoom);
        let mut lat = -85.0;
        while lat < 85.0 {
            lat += 5.0;
            let y = lat_to_tile_y(lat, zoom);
            assert!(y < prev_y);
            prev_y = y;
        }
    }
}

#[test]
fn test_projection_range() {
    for zoom in 0..=18 {
        let n = (zoom as f64).exp2();
        for lng in &[-180.0, -120.5, -0.001, 0.0, 45.0, 179.999] {
            let x = project(&GeoPoint::new(0.0, *lng), zoom).x;
            assert!(x >= 0.0 && x < n, "zoom {} lng {} -> {}", zoom, lng, x);
        }
    }
}

#[test]
fn test_geo_point() {
    assert!(GeoPoint::new(90.0, 180.0).is_valid());
    assert!(GeoPoint::new(-90.0, -180.0).is_valid());
    assert!(!GeoPoint::new(90.1, 0.0).is_valid());
    assert!(!GeoPoint::new(0.0, -180.5).is_valid());
    assert_eq!(
        GeoPoint::new(53.48095, -2.23743).to_string(),
        "53.480950,-2.237430"
    );
}

#[test]
fn test_tile_wrapping() {
    assert_eq!(
        TileIndex::wrapped(2, -1, 5),
        TileIndex { zoom: 2, x: 3, y: 1 }
    );
    assert_eq!(
        TileIndex::wrapped(0, 7, -3),
        TileIndex { zoom: 0, x: 0, y: 0 }
    );
    assert_eq!(
        TileIndex::wrapped(18, 1000, 2000),
        TileIndex {
            zoom: 18,
            x: 1000,
            y: 2000
        }
    );
}

#[test]
fn test_layout() {
    let grid = TileGrid::from_tile_coord(TileCoord { x: 10.25, y: 20.75 }, 5, 500, 350);
    // span 0.9765625 x 0.68359375 tiles
    assert_eq!(grid.tile_range(), ((9, 12), (20, 22)));
    // 250 - 64 - 256, 175 - 192 + 0
    assert_eq!(grid.offset(), PixelPoint::new(-70, -17));
    assert_eq!(grid.tile_count(), 12);
    assert_eq!(grid.destination(10, 20), PixelPoint::new(186, -17));
    // the center tile coordinate lands on the canvas center
    let center = grid.destination(10, 20);
    assert_eq!(center.x + 64, 250);
    assert_eq!(center.y + 192, 175);
}

fn assert_covers(grid: &TileGrid) {
    let mut xs = grid.tiles().map(|(_, p)| p.x).collect::<Vec<_>>();
    let mut ys = grid.tiles().map(|(_, p)| p.y).collect::<Vec<_>>();
    xs.sort();
    xs.dedup();
    ys.sort();
    ys.dedup();
    let size = TILE_SIZE as i64;
    for axis in &[&xs, &ys] {
        for pair in axis.windows(2) {
            assert_eq!(pair[1] - pair[0], size);
        }
    }
    assert!(xs[0] <= 0, "gap on the left: {:?}", grid);
    assert!(ys[0] <= 0, "gap at the top: {:?}", grid);
    assert!(
        xs[xs.len() - 1] + size >= grid.width() as i64,
        "gap on the right: {:?}",
        grid
    );
    assert!(
        ys[ys.len() - 1] + size >= grid.height() as i64,
        "gap at the bottom: {:?}",
        grid
    );
}

#[test]
fn test_coverage() {
    let centers = [
        GeoPoint::new(53.480950, -2.237430),
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(-33.8688, 151.2093),
        GeoPoint::new(47.3769, 8.5417),
        GeoPoint::new(70.0, -179.9),
    ];
    let sizes = [1, 2, 100, 255, 256, 257, 300, 500, 511, 512, 513, 777, 1023, 1024];
    for center in &centers {
        for zoom in &[0, 1, 5, 12, 18] {
            for width in &sizes {
                for height in &[1, 200, 350, 1024] {
                    let grid = TileGrid::new(center, *zoom, *width, *height);
                    assert!(grid.tile_count() >= 1);
                    assert_covers(&grid);
                }
            }
        }
    }
}

#[test]
fn test_pixel_position() {
    let center = GeoPoint::new(47.0, 8.0);
    let grid = TileGrid::new(&center, 10, 400, 300);
    assert_eq!(grid.pixel_position(&center), PixelPoint::new(200, 150));

    // east is right, north is up
    let east = grid.pixel_position(&GeoPoint::new(47.0, 8.01));
    assert!(east.x > 200);
    assert_eq!(east.y, 150);
    let north = grid.pixel_position(&GeoPoint::new(47.01, 8.0));
    assert_eq!(north.x, 200);
    assert!(north.y < 150);

    // one and a half tiles east at the same zoom
    let tile_east = GeoPoint::new(47.0, 8.0 + 1.5 * 360.0 / 1024.0);
    assert_eq!(grid.pixel_position(&tile_east).x, 584);
}

#[test]
fn test_scenario_layout() {
    let grid = TileGrid::new(&GeoPoint::new(53.480950, -2.237430), 12, 300, 200);
    let ((start_x, end_x), (start_y, end_y)) = grid.tile_range();
    assert!(start_x <= 2022 && end_x >= 2022);
    assert!(start_y <= 1325 && end_y >= 1325);
    assert!(grid.tiles().all(|(tile, _)| tile.zoom == 12));
    assert_covers(&grid);
}
