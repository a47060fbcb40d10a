//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::request::{MapRequest, RequestParser};
use futures_util::FutureExt;
use image::RgbaImage;
use static_map_core::cache::{MapCache, Tilecache};
use static_map_core::core::config::ApplicationCfg;
use static_map_core::core::mapspec::{MapSpec, RenderedMap, TileSource};
use static_map_core::core::marker::MarkerRegistry;
use static_map_core::core::{Config, MapError};
use static_map_core::render::{compose, placeholder_tile, TileLoader};
use std::cmp;
use std::future::Future;
use std::sync::Arc;
use tile_grid::PixelPoint;
use tokio::runtime::Runtime;
use tokio::task;

/// Static map rendering service
#[derive(Clone)]
pub struct MapService {
    pub tiles: TileLoader,
    pub map_cache: MapCache,
    pub markers: MarkerRegistry,
    pub copyright: Option<Arc<RgbaImage>>,
    pub default_source: TileSource,
    /// Maximum number of parallel tile requests per map
    pub workers: usize,
}

impl MapService {
    pub fn new(tiles: TileLoader, map_cache: MapCache, markers: MarkerRegistry) -> MapService {
        MapService {
            tiles,
            map_cache,
            markers,
            copyright: None,
            default_source: TileSource::default(),
            workers: default_workers(),
        }
    }

    pub fn parser(&self) -> RequestParser<'_> {
        RequestParser::new(&self.markers, self.default_source, self.copyright.clone())
    }

    pub fn map_spec(&self, request: &MapRequest) -> Result<MapSpec, MapError> {
        self.parser().parse(request)
    }

    /// Render a map, served from the map cache if available
    pub async fn render(&self, spec: &MapSpec) -> Result<RenderedMap, MapError> {
        spec.validate()?;
        // Cache file access and PNG encoding block, keep them off the async worker threads
        let map_cache = self.map_cache.clone();
        let lookup = spec.clone();
        let cached = task::spawn_blocking(move || map_cache.get(&lookup))
            .await
            .map_err(task_error)?;
        if let Some(map) = cached {
            debug!("Map cache hit {:?}", map.path);
            return Ok(map);
        }
        let tiles = self.fetch_tiles(spec).await;
        let map_cache = self.map_cache.clone();
        let spec = spec.clone();
        task::spawn_blocking(move || -> Result<RenderedMap, MapError> {
            let bytes = compose(&spec, tiles)?;
            let path = match map_cache.put(&spec, &bytes) {
                Ok(path) => path,
                Err(ioerr) => {
                    error!("Error writing map {}: {}", MapCache::key(&spec), ioerr);
                    None
                }
            };
            Ok(RenderedMap { bytes, path })
        })
        .await
        .map_err(task_error)?
    }

    pub async fn render_request(&self, request: &MapRequest) -> Result<RenderedMap, MapError> {
        let spec = self.map_spec(request)?;
        self.render(&spec).await
    }

    /// Render outside of an async runtime
    pub fn render_blocking(&self, spec: &MapSpec) -> Result<RenderedMap, MapError> {
        let rt = Runtime::new()?;
        rt.block_on(self.render(spec))
    }

    /// Fetch all tiles of the map grid with a bounded number of parallel requests
    async fn fetch_tiles(&self, spec: &MapSpec) -> Vec<(PixelPoint, RgbaImage)> {
        let grid = spec.tile_grid();
        let task_queue_size = cmp::max(1, cmp::min(self.workers, grid.tile_count()));
        let mut tasks = Vec::with_capacity(task_queue_size);
        let mut tiles = Vec::with_capacity(grid.tile_count());
        debug!(
            "Fetching {} {} tiles at zoom {}",
            grid.tile_count(),
            spec.tile_source,
            spec.zoom
        );
        for (tile, dest) in grid.tiles() {
            let loader = self.tiles.clone();
            let source = spec.tile_source;
            // Blocking HTTP client, keep it off the async worker threads
            let fetch = task::spawn_blocking(move || loader.tile_or_placeholder(source, &tile));
            tasks.push(fetch.map(move |result| (dest, result)));
            if tasks.len() >= task_queue_size {
                let (result, remaining) = await_one_task(tasks).await;
                tasks = remaining;
                collect_tile(result, &mut tiles);
            }
        }
        // Finish remaining tasks
        for result in futures_util::future::join_all(tasks).await {
            collect_tile(result, &mut tiles);
        }
        tiles
    }
}

fn default_workers() -> usize {
    cmp::min(num_cpus::get() * 2, 64)
}

fn task_error(e: task::JoinError) -> MapError {
    MapError::RenderTask(e.to_string())
}

async fn await_one_task<F>(tasks: Vec<F>) -> (F::Output, Vec<F>)
where
    F: Future + Unpin,
{
    let (result, _index, remaining) = futures_util::future::select_all(tasks).await;
    (result, remaining)
}

fn collect_tile(
    (dest, result): (PixelPoint, Result<RgbaImage, task::JoinError>),
    tiles: &mut Vec<(PixelPoint, RgbaImage)>,
) {
    match result {
        Ok(tile) => tiles.push((dest, tile)),
        Err(e) => {
            error!("Tile task failed: {}", e);
            tiles.push((dest, placeholder_tile()));
        }
    }
}

impl<'a> Config<'a, ApplicationCfg> for MapService {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let tiles = TileLoader::from_config(config)?;
        let map_cache = MapCache::from_config(config)?;
        let markers = MarkerRegistry::from_config(config)?;
        let mut service = MapService::new(tiles, map_cache, markers);
        if let Some(ref maptype) = config.service.default_maptype {
            service.default_source = maptype.parse().map_err(|e: MapError| e.to_string())?;
        }
        if let Some(ref path) = config.service.copyright {
            let copyright = image::open(path)
                .map_err(|e| format!("Error reading copyright image {}: {}", path, e))?;
            service.copyright = Some(Arc::new(copyright.to_rgba8()));
        }
        if let Some(workers) = config.tiles.as_ref().and_then(|t| t.workers) {
            service.workers = workers;
        }
        Ok(service)
    }
    fn gen_config() -> String {
        let toml = r#"# static-map configuration

[service]
# mapnik, osmarenderer or cycle
default_maptype = "mapnik"
# PNG pasted into the bottom-right corner of every map
#copyright = "/usr/share/static-map/copyright.png"
# Directory with the built-in marker icons (google_sm.png, blue.png, ...)
#marker_dir = "/usr/share/static-map/markers"
"#;
        let mut config = toml.to_string();
        config.push_str(&TileLoader::gen_config());
        config.push_str(&Tilecache::gen_config());
        config.push_str(&MapCache::gen_config());
        config.push_str(&MarkerRegistry::gen_config());
        config
    }
}
