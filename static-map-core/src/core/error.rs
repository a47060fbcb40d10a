//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use std::path::PathBuf;
use tile_grid::GeoPoint;

/// Errors raised before or outside of compositing.
/// Tile fetch failures never end up here, they degrade to placeholder tiles.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("The zoom level must be between 0 and 18")]
    InvalidZoom(i64),

    #[error("The width should be no greater than 1024")]
    WidthTooLarge(u32),

    #[error("The height should be no greater than 1024")]
    HeightTooLarge(u32),

    #[error("The width and height should be at least 1 pixel")]
    EmptySize,

    #[error("Coordinates {0} are out of range")]
    InvalidCoordinates(GeoPoint),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Cache directory {} not found", .0.display())]
    CacheDirectoryNotFound(PathBuf),

    #[error("Cache directory {} is not writable", .0.display())]
    CacheDirectoryNotWritable(PathBuf),

    #[error("Marker prototype `{0}` not found")]
    MarkerPrototypeNotFound(String),

    #[error("Marker file {} not found", .0.display())]
    MarkerFileNotFound(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Render task failed: {0}")]
    RenderTask(String),
}

impl MapError {
    /// Errors caused by the request itself rather than by the server setup
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MapError::InvalidZoom(_)
                | MapError::WidthTooLarge(_)
                | MapError::HeightTooLarge(_)
                | MapError::EmptySize
                | MapError::InvalidCoordinates(_)
                | MapError::InvalidRequest(_)
                | MapError::MarkerPrototypeNotFound(_)
        )
    }
}
