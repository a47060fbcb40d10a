//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Map canvas with a fixed drawing order:
//! base tiles, circle, markers, copyright.

use crate::core::mapspec::{CircleSpec, MapSpec, MarkerPlacement};
use crate::core::MapError;
use crate::render::radius::pixel_radius;
use image::{imageops, DynamicImage, ImageOutputFormat, Pixel, Rgba, RgbaImage};
use std::cmp;
use std::io::Cursor;
use tile_grid::{PixelPoint, TileGrid};

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Stage {
    Empty,
    BaseTiles,
    Circle,
    Markers,
    Copyright,
    Done,
}

/// Single-use canvas of one render
pub struct Compositor {
    grid: TileGrid,
    canvas: RgbaImage,
    stage: Stage,
}

impl Compositor {
    pub fn new(spec: &MapSpec) -> Compositor {
        Compositor {
            grid: spec.tile_grid(),
            canvas: RgbaImage::new(spec.width, spec.height),
            stage: Stage::Empty,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn enter(&mut self, stage: Stage) {
        debug_assert!(
            self.stage < stage,
            "{:?} drawn after {:?}",
            stage,
            self.stage
        );
        self.stage = stage;
    }

    /// Paste tiles at their destinations, clipped to the canvas
    pub fn draw_base_tiles<I>(&mut self, tiles: I)
    where
        I: IntoIterator<Item = (PixelPoint, RgbaImage)>,
    {
        self.enter(Stage::BaseTiles);
        for (dest, tile) in tiles {
            imageops::replace(&mut self.canvas, &tile, dest.x, dest.y);
        }
    }

    pub fn draw_circle(&mut self, circle: &CircleSpec) {
        self.enter(Stage::Circle);
        let center = self.grid.pixel_position(&circle.center);
        let radius = pixel_radius(&self.grid, circle);
        if radius <= 0 {
            debug!("Skipping circle with radius {} px", radius);
            return;
        }
        fill_disk(&mut self.canvas, center, radius, circle.color.rgba());
    }

    /// Markers in list order, later ones on top
    pub fn draw_markers(&mut self, markers: &[MarkerPlacement]) {
        self.enter(Stage::Markers);
        for marker in markers {
            let pos = self
                .grid
                .pixel_position(&marker.coordinates)
                .offset(&marker.icon.anchor);
            imageops::overlay(&mut self.canvas, &*marker.icon.image, pos.x, pos.y);
        }
    }

    /// Paste into the bottom-right corner
    pub fn draw_copyright(&mut self, copyright: &RgbaImage) {
        self.enter(Stage::Copyright);
        let x = self.canvas.width() as i64 - copyright.width() as i64;
        let y = self.canvas.height() as i64 - copyright.height() as i64;
        imageops::overlay(&mut self.canvas, copyright, x, y);
    }

    pub fn into_image(mut self) -> RgbaImage {
        self.enter(Stage::Done);
        self.canvas
    }

    /// PNG encoded canvas
    pub fn finish(self) -> Result<Vec<u8>, MapError> {
        let image = DynamicImage::ImageRgba8(self.into_image());
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(bytes)
    }
}

/// Blend `color` into every canvas pixel within `radius` of `center`, each pixel once.
/// Work is bounded by the canvas size, not by the radius.
fn fill_disk(canvas: &mut RgbaImage, center: PixelPoint, radius: i64, color: Rgba<u8>) {
    let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
    if width == 0 || height == 0 {
        return;
    }
    let r = radius as f64;
    let far_x = cmp::max(center.x, width - 1 - center.x) as f64;
    let far_y = cmp::max(center.y, height - 1 - center.y) as f64;
    if r * r >= far_x * far_x + far_y * far_y {
        for pixel in canvas.pixels_mut() {
            pixel.blend(&color);
        }
        return;
    }
    let y_min = cmp::max(0, center.y.saturating_sub(radius));
    let y_max = cmp::min(height - 1, center.y.saturating_add(radius));
    for y in y_min..=y_max {
        let dy = (y - center.y) as f64;
        let dx = (r * r - dy * dy).max(0.0).sqrt().floor() as i64;
        let x_min = cmp::max(0, center.x.saturating_sub(dx));
        let x_max = cmp::min(width - 1, center.x.saturating_add(dx));
        for x in x_min..=x_max {
            canvas.get_pixel_mut(x as u32, y as u32).blend(&color);
        }
    }
}

/// Draw all layers of `spec` onto a fresh canvas
pub fn compose<I>(spec: &MapSpec, tiles: I) -> Result<Vec<u8>, MapError>
where
    I: IntoIterator<Item = (PixelPoint, RgbaImage)>,
{
    let mut compositor = Compositor::new(spec);
    compositor.draw_base_tiles(tiles);
    if let Some(ref circle) = spec.circle {
        compositor.draw_circle(circle);
    }
    if !spec.markers.is_empty() {
        compositor.draw_markers(&spec.markers);
    }
    if let Some(ref copyright) = spec.copyright {
        compositor.draw_copyright(copyright);
    }
    compositor.finish()
}
