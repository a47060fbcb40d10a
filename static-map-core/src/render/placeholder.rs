//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Substitute for tiles which could not be fetched

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tile_grid::TILE_SIZE;

const BACKGROUND: Rgba<u8> = Rgba([224, 224, 224, 255]);
const LABEL: Rgba<u8> = Rgba([160, 32, 32, 255]);

// 5x7 bitmap glyphs, one byte per row, high bit left
const GLYPH_E: [u8; 7] = [
    0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110,
];
const GLYPH_R: [u8; 7] = [
    0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000,
];
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const SCALE: u32 = 6;

/// Solid tile labelled "err"
pub fn placeholder_tile() -> RgbaImage {
    let mut tile = RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, BACKGROUND);
    let glyphs = [GLYPH_E, GLYPH_R, GLYPH_R];
    let advance = (GLYPH_WIDTH + 1) * SCALE;
    let label_width = glyphs.len() as u32 * advance - SCALE;
    let left = ((TILE_SIZE - label_width) / 2) as i32;
    let top = ((TILE_SIZE - GLYPH_HEIGHT * SCALE) / 2) as i32;
    for (i, glyph) in glyphs.iter().enumerate() {
        let x0 = left + (i as u32 * advance) as i32;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    let rect = Rect::at(x0 + (col * SCALE) as i32, top + (row as u32 * SCALE) as i32)
                        .of_size(SCALE, SCALE);
                    draw_filled_rect_mut(&mut tile, rect, LABEL);
                }
            }
        }
    }
    tile
}

#[test]
fn test_placeholder() {
    let tile = placeholder_tile();
    assert_eq!(tile.dimensions(), (TILE_SIZE, TILE_SIZE));
    assert_eq!(*tile.get_pixel(0, 0), BACKGROUND);
    assert_eq!(*tile.get_pixel(255, 255), BACKGROUND);
    let labelled = tile.pixels().filter(|p| **p == LABEL).count() as u32;
    // e: 14 cells, r: 9 cells each
    assert_eq!(labelled, (14 + 9 + 9) * SCALE * SCALE);
}
