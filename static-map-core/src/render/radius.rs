//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Physical circle radius to canvas pixels.
//! Planar approximation around the circle center, inaccurate at high latitudes and zoom levels.

use crate::core::geo::pixel_distance;
use crate::core::mapspec::CircleSpec;
use tile_grid::{GeoPoint, TileGrid};

/// Equatorial earth radius in meters
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Point `meters` north and `meters` east of `center`
pub fn offset_point(center: &GeoPoint, meters: i64) -> GeoPoint {
    let meters = meters as f64;
    let d_lat = meters / EARTH_RADIUS;
    let d_lng = meters / (EARTH_RADIUS * center.lat.to_radians().cos());
    GeoPoint::new(
        center.lat + d_lat.to_degrees(),
        center.lng + d_lng.to_degrees(),
    )
}

/// Radius of `circle` in pixels on the canvas laid out by `grid`
pub fn pixel_radius(grid: &TileGrid, circle: &CircleSpec) -> i64 {
    let meters = circle.unit.to_meters(circle.radius);
    let center = grid.pixel_position(&circle.center);
    let destination = grid.pixel_position(&offset_point(&circle.center, meters));
    pixel_distance(center.x, center.y, destination.x, destination.y)
}
