//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::MapError;
use crate::core::geo::{Color, DistanceUnit};
use image::RgbaImage;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tile_grid::{GeoPoint, PixelPoint, TileGrid, TileIndex};

pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 18;
pub const DEFAULT_ZOOM: u8 = 12;
pub const MAX_WIDTH: u32 = 1024;
pub const MAX_HEIGHT: u32 = 1024;
pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 350;

/// Raster tile server
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum TileSource {
    Mapnik,
    Osmarenderer,
    Cycle,
}

impl TileSource {
    pub fn name(&self) -> &'static str {
        match self {
            TileSource::Mapnik => "mapnik",
            TileSource::Osmarenderer => "osmarenderer",
            TileSource::Cycle => "cycle",
        }
    }
    pub fn url_template(&self) -> &'static str {
        match self {
            TileSource::Mapnik => "http://tile.openstreetmap.org/{Z}/{X}/{Y}.png",
            TileSource::Osmarenderer => "http://otile1.mqcdn.com/tiles/1.0.0/osm/{Z}/{X}/{Y}.png",
            TileSource::Cycle => "http://a.tile.opencyclemap.org/cycle/{Z}/{X}/{Y}.png",
        }
    }
    pub fn url(&self, tile: &TileIndex) -> String {
        self.url_template()
            .replace("{Z}", &tile.zoom.to_string())
            .replace("{X}", &tile.x.to_string())
            .replace("{Y}", &tile.y.to_string())
    }
}

impl Default for TileSource {
    fn default() -> Self {
        TileSource::Mapnik
    }
}

impl FromStr for TileSource {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mapnik" => Ok(TileSource::Mapnik),
            "osmarenderer" => Ok(TileSource::Osmarenderer),
            "cycle" => Ok(TileSource::Cycle),
            _ => Err(MapError::InvalidRequest(format!(
                "Unknown maptype `{}`; use mapnik, osmarenderer or cycle",
                s
            ))),
        }
    }
}

impl fmt::Display for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named marker image with its anchor.
/// The anchor is the vector from the top-left corner of the image to the marked point.
#[derive(Clone, Debug)]
pub struct MarkerIcon {
    pub name: String,
    pub image: Arc<RgbaImage>,
    pub anchor: PixelPoint,
}

#[derive(Clone, Debug)]
pub struct MarkerPlacement {
    pub coordinates: GeoPoint,
    pub icon: MarkerIcon,
}

#[derive(Clone, Debug)]
pub struct CircleSpec {
    pub center: GeoPoint,
    pub radius: f64,
    pub unit: DistanceUnit,
    pub color: Color,
}

/// Everything needed to render one map
#[derive(Clone, Debug)]
pub struct MapSpec {
    pub zoom: u8,
    pub center: GeoPoint,
    pub width: u32,
    pub height: u32,
    pub tile_source: TileSource,
    pub markers: Vec<MarkerPlacement>,
    pub circle: Option<CircleSpec>,
    pub copyright: Option<Arc<RgbaImage>>,
}

impl MapSpec {
    pub fn new(center: GeoPoint) -> MapSpec {
        MapSpec {
            zoom: DEFAULT_ZOOM,
            center,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_source: TileSource::default(),
            markers: Vec::new(),
            circle: None,
            copyright: None,
        }
    }

    /// Check all invariants before any rendering work starts
    pub fn validate(&self) -> Result<(), MapError> {
        if self.zoom > MAX_ZOOM {
            return Err(MapError::InvalidZoom(self.zoom as i64));
        }
        if self.width > MAX_WIDTH {
            return Err(MapError::WidthTooLarge(self.width));
        }
        if self.height > MAX_HEIGHT {
            return Err(MapError::HeightTooLarge(self.height));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MapError::EmptySize);
        }
        if !self.center.is_valid() {
            return Err(MapError::InvalidCoordinates(self.center));
        }
        for marker in &self.markers {
            if !marker.coordinates.is_valid() {
                return Err(MapError::InvalidCoordinates(marker.coordinates));
            }
        }
        if let Some(ref circle) = self.circle {
            if !circle.center.is_valid() {
                return Err(MapError::InvalidCoordinates(circle.center));
            }
        }
        Ok(())
    }

    pub fn tile_grid(&self) -> TileGrid {
        TileGrid::new(&self.center, self.zoom, self.width, self.height)
    }

    /// Deterministic text form of the fields identifying a rendered map.
    /// Circle and copyright are not part of it. Markers enter by icon name and
    /// anchor, not by image content, so one map cache must not be shared by
    /// registries mapping a name to different icons.
    pub fn canonical(&self) -> String {
        let markers = self
            .markers
            .iter()
            .map(|m| {
                format!(
                    "{},{},{},{},{}",
                    m.coordinates.lat, m.coordinates.lng, m.icon.name, m.icon.anchor.x, m.icon.anchor.y
                )
            })
            .collect::<Vec<_>>()
            .join("|");
        format!(
            "{}&{}&{}&{}&{}&{}&{}",
            self.zoom, self.center.lat, self.center.lng, self.width, self.height, markers, self.tile_source
        )
    }
}

/// PNG encoded map with the cache file it was read from or written to
#[derive(Clone, Debug)]
pub struct RenderedMap {
    pub bytes: Vec<u8>,
    pub path: Option<PathBuf>,
}
