//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::grid_iterator::GridIterator;
use std::f64::consts;
use std::fmt;

/// Width and height of a source tile in pixels
pub const TILE_SIZE: u32 = 256;

/// WGS84 position in degrees
#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }
    /// Latitude within [-90, 90] and longitude within [-180, 180].
    /// Out of range values are reported, never clamped.
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Fractional position in the tile grid of a zoom level.
/// The integer part selects a tile, the fractional part is the offset within the tile.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct TileCoord {
    pub x: f64,
    pub y: f64,
}

/// Address of a single source tile
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct TileIndex {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileIndex {
    /// Tile at grid position `(x, y)`, wrapped into `[0, 2^zoom)` on both axes
    pub fn wrapped(zoom: u8, x: i64, y: i64) -> TileIndex {
        let n = 1i64 << zoom;
        TileIndex {
            zoom,
            x: x.rem_euclid(n) as u32,
            y: y.rem_euclid(n) as u32,
        }
    }
}

/// Position on the output canvas, origin top-left
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> PixelPoint {
        PixelPoint { x, y }
    }
    pub fn offset(&self, other: &PixelPoint) -> PixelPoint {
        PixelPoint {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

// --- Web Mercator calculations ---

pub fn lng_to_tile_x(lng: f64, zoom: u8) -> f64 {
    (lng + 180.0) / 360.0 * (zoom as f64).exp2()
}

pub fn lat_to_tile_y(lat: f64, zoom: u8) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / consts::PI) / 2.0 * (zoom as f64).exp2()
}

/// Fractional tile coordinate of a position.
/// Input is not validated, positions near the poles give non-finite values.
pub fn project(geo: &GeoPoint, zoom: u8) -> TileCoord {
    TileCoord {
        x: lng_to_tile_x(geo.lng, zoom),
        y: lat_to_tile_y(geo.lat, zoom),
    }
}

/// Tiles covering a canvas centered on a tile coordinate, with their paste offsets
#[derive(Clone, Debug)]
pub struct TileGrid {
    zoom: u8,
    width: u32,
    height: u32,
    center: TileCoord,
    start_x: i64,
    end_x: i64,
    start_y: i64,
    end_y: i64,
    offset: PixelPoint,
}

impl TileGrid {
    pub fn new(center: &GeoPoint, zoom: u8, width: u32, height: u32) -> TileGrid {
        TileGrid::from_tile_coord(project(center, zoom), zoom, width, height)
    }

    pub fn from_tile_coord(center: TileCoord, zoom: u8, width: u32, height: u32) -> TileGrid {
        let (start_x, end_x, offset_x) = axis_layout(center.x, width);
        let (start_y, end_y, offset_y) = axis_layout(center.y, height);
        TileGrid {
            zoom,
            width,
            height,
            center,
            start_x,
            end_x,
            start_y,
            end_y,
            offset: PixelPoint::new(offset_x, offset_y),
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn center(&self) -> TileCoord {
        self.center
    }
    /// Inclusive tile ranges `((start_x, end_x), (start_y, end_y))`, not wrapped
    pub fn tile_range(&self) -> ((i64, i64), (i64, i64)) {
        ((self.start_x, self.end_x), (self.start_y, self.end_y))
    }
    /// Canvas position of the top-left corner of the first tile
    pub fn offset(&self) -> PixelPoint {
        self.offset
    }
    pub fn tile_count(&self) -> usize {
        ((self.end_x - self.start_x + 1) * (self.end_y - self.start_y + 1)) as usize
    }

    /// Canvas position of tile `(x, y)`, given in unwrapped grid coordinates
    pub fn destination(&self, x: i64, y: i64) -> PixelPoint {
        let size = TILE_SIZE as i64;
        PixelPoint::new(
            self.offset.x + (x - self.start_x) * size,
            self.offset.y + (y - self.start_y) * size,
        )
    }

    /// Lazy sequence of `(tile, destination)` pairs covering the whole canvas
    pub fn tiles(&self) -> GridIterator {
        GridIterator::new(self)
    }

    /// Canvas position of a coordinate, relative to the canvas center
    pub fn pixel_position(&self, geo: &GeoPoint) -> PixelPoint {
        let size = TILE_SIZE as f64;
        let x = self.width as f64 / 2.0 - size * (self.center.x - lng_to_tile_x(geo.lng, self.zoom));
        let y = self.height as f64 / 2.0 - size * (self.center.y - lat_to_tile_y(geo.lat, self.zoom));
        PixelPoint::new(x.floor() as i64, y.floor() as i64)
    }
}

/// Start tile, end tile and paste offset along one canvas axis
fn axis_layout(center: f64, extent: u32) -> (i64, i64, i64) {
    let size = TILE_SIZE as f64;
    let span = extent as f64 / size / 2.0;
    let start = (center - span).floor();
    let end = (center + span).ceil();
    let offset = (extent / 2) as f64 - ((center - center.floor()) * size).floor()
        + (start - center.floor()).floor() * size;
    (start as i64, end as i64, offset as i64)
}
