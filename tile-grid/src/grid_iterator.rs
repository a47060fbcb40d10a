//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Grid iterators

use crate::grid::{PixelPoint, TileGrid, TileIndex};

/// Column-by-column iterator over the tiles of a canvas
pub struct GridIterator {
    grid: TileGrid,
    x: i64,
    y: i64,
    finished: bool,
}

impl GridIterator {
    pub fn new(grid: &TileGrid) -> GridIterator {
        let ((start_x, end_x), (start_y, end_y)) = grid.tile_range();
        GridIterator {
            grid: grid.clone(),
            x: start_x,
            y: start_y,
            finished: start_x > end_x || start_y > end_y,
        }
    }
}

impl Iterator for GridIterator {
    /// Wrapped tile index and its canvas destination
    type Item = (TileIndex, PixelPoint);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let current = (
            TileIndex::wrapped(self.grid.zoom(), self.x, self.y),
            self.grid.destination(self.x, self.y),
        );
        let ((_, end_x), (start_y, end_y)) = self.grid.tile_range();
        if self.y < end_y {
            self.y += 1;
        } else if self.x < end_x {
            self.x += 1;
            self.y = start_y;
        } else {
            self.finished = true;
        }
        Some(current)
    }
}

#[test]
fn test_single_tile_iter() {
    use crate::grid::TileCoord;
    // 256x256 canvas centered on the middle of tile 1/1
    let grid = TileGrid::from_tile_coord(TileCoord { x: 1.5, y: 1.5 }, 2, 256, 256);
    let cells = grid.tiles().collect::<Vec<_>>();
    assert_eq!(
        cells,
        vec![
            (TileIndex { zoom: 2, x: 1, y: 1 }, PixelPoint::new(0, 0)),
            (TileIndex { zoom: 2, x: 1, y: 2 }, PixelPoint::new(0, 256)),
            (TileIndex { zoom: 2, x: 2, y: 1 }, PixelPoint::new(256, 0)),
            (TileIndex { zoom: 2, x: 2, y: 2 }, PixelPoint::new(256, 256)),
        ]
    );
}

#[test]
fn test_restartable() {
    use crate::grid::GeoPoint;
    let grid = TileGrid::new(&GeoPoint::new(53.480950, -2.237430), 12, 300, 200);
    let first = grid.tiles().collect::<Vec<_>>();
    let second = grid.tiles().collect::<Vec<_>>();
    assert_eq!(first, second);
    assert_eq!(first.len(), grid.tile_count());
}

#[test]
fn test_wrapping_iter() {
    use crate::grid::TileCoord;
    // zoom 0 has a single tile, every cell wraps onto it
    let grid = TileGrid::from_tile_coord(TileCoord { x: 0.5, y: 0.5 }, 0, 600, 300);
    assert!(grid.tiles().all(|(tile, _)| tile == TileIndex { zoom: 0, x: 0, y: 0 }));
    assert_eq!(grid.tiles().count(), grid.tile_count());
}
