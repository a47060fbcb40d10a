//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::{Cache, Tilecache};
use crate::core::config::{ApplicationCfg, Config, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::core::mapspec::TileSource;
use crate::render::placeholder::placeholder_tile;
use image::RgbaImage;
use reqwest::blocking::Client;
use std::sync::Arc;
use std::time::Duration;
use tile_grid::TileIndex;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Empty response body")]
    EmptyBody,

    #[error("Invalid tile image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Raw tile download
pub trait TileFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Must not be called from within an async runtime
    pub fn new(user_agent: &str, timeout: Duration) -> Result<HttpFetcher, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl TileFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.client.get(url).send()?;
        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }
        let bytes = resp.bytes()?;
        if bytes.is_empty() {
            return Err(FetchError::EmptyBody);
        }
        Ok(bytes.to_vec())
    }
}

/// Tile cache path: URL without scheme
pub fn tile_cache_path(url: &str) -> &str {
    url.trim_start_matches("http://")
        .trim_start_matches("https://")
}

/// Decoded source tiles, read through the tile cache
#[derive(Clone)]
pub struct TileLoader {
    fetcher: Arc<dyn TileFetcher>,
    cache: Tilecache,
}

impl TileLoader {
    pub fn new(fetcher: Arc<dyn TileFetcher>, cache: Tilecache) -> TileLoader {
        TileLoader { fetcher, cache }
    }

    pub fn cache(&self) -> &Tilecache {
        &self.cache
    }

    pub fn tile(&self, source: TileSource, tile: &TileIndex) -> Result<RgbaImage, FetchError> {
        let url = source.url(tile);
        let path = tile_cache_path(&url);

        if let Some(data) = self.cache.read(path) {
            match image::load_from_memory(&data) {
                Ok(img) => return Ok(img.to_rgba8()),
                Err(e) => warn!("Ignoring cached tile {} - {}", path, e),
            }
        }

        debug!("Fetching {}", url);
        let data = self.fetcher.fetch(&url)?;
        if data.is_empty() {
            return Err(FetchError::EmptyBody);
        }
        let img = image::load_from_memory(&data)?.to_rgba8();
        if let Err(ioerr) = self.cache.write(path, &data) {
            error!("Error writing {}: {}", path, ioerr);
        }
        Ok(img)
    }

    /// Tile image, or the placeholder tile if it is not available
    pub fn tile_or_placeholder(&self, source: TileSource, tile: &TileIndex) -> RgbaImage {
        self.tile(source, tile).unwrap_or_else(|e| {
            warn!(
                "Tile {}/{}/{} of {} not available - {}",
                tile.zoom, tile.x, tile.y, source, e
            );
            placeholder_tile()
        })
    }
}

impl<'a> Config<'a, ApplicationCfg> for TileLoader {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let tiles_cfg = config.tiles.clone().unwrap_or_default();
        let user_agent = tiles_cfg
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let timeout = Duration::from_secs(tiles_cfg.timeout.unwrap_or(DEFAULT_TIMEOUT));
        let fetcher = HttpFetcher::new(&user_agent, timeout).map_err(|e| e.to_string())?;
        let cache = Tilecache::from_config(config)?;
        Ok(TileLoader::new(Arc::new(fetcher), cache))
    }
    fn gen_config() -> String {
        let toml = r#"
[tiles]
#user_agent = "static-map/0.1"
# Timeout of a single tile request in seconds
timeout = 10
# Maximum number of parallel tile requests per map, defaults to twice the number of CPUs
#workers = 16
"#;
        toml.to_string()
    }
}
