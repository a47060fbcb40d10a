//! A library for static map tile layout calculations
//!
//! ## Projection
//!
//! ```rust
//! use tile_grid::{project, GeoPoint};
//!
//! let coord = project(&GeoPoint::new(0.0, 0.0), 1);
//! assert_eq!(coord.x, 1.0);
//! assert!((coord.y - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Tile layout
//!
//! ```rust
//! use tile_grid::{GeoPoint, TileGrid};
//!
//! let grid = TileGrid::new(&GeoPoint::new(53.480950, -2.237430), 12, 300, 200);
//! for (tile, dest) in grid.tiles() {
//!     println!("Tile {}/{}/{} at {},{}", tile.zoom, tile.x, tile.y, dest.x, dest.y);
//! }
//! assert_eq!(grid.tiles().count(), grid.tile_count());
//! ```
//!
//! ## Overlay positions
//!
//! ```rust
//! use tile_grid::{GeoPoint, PixelPoint, TileGrid};
//!
//! let center = GeoPoint::new(47.0, 8.0);
//! let grid = TileGrid::new(&center, 10, 400, 300);
//! assert_eq!(grid.pixel_position(&center), PixelPoint::new(200, 150));
//! ```

mod grid;
mod grid_iterator;
#[cfg(test)]
mod grid_test;

pub use grid::{
    lat_to_tile_y, lng_to_tile_x, project, GeoPoint, PixelPoint, TileCoord, TileGrid, TileIndex,
    TILE_SIZE,
};
pub use grid_iterator::GridIterator;
