//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::map_service::MapService;
use crate::request::MapRequest;
use image::{DynamicImage, GenericImageView, ImageOutputFormat, Rgba, RgbaImage};
use static_map_core::cache::{Filecache, MapCache, Nocache, Tilecache};
use static_map_core::core::config::parse_config;
use static_map_core::core::mapspec::{MapSpec, TileSource};
use static_map_core::core::marker::MarkerRegistry;
use static_map_core::core::{ApplicationCfg, Config, MapError};
use static_map_core::render::{FetchError, TileFetcher, TileLoader};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;
use tile_grid::{GeoPoint, TILE_SIZE};

struct FailingFetcher {
    calls: AtomicUsize,
}

impl TileFetcher for FailingFetcher {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::Status(404))
    }
}

struct PanickingFetcher;

impl TileFetcher for PanickingFetcher {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        panic!("tile fetcher crashed")
    }
}

/// Solid green tiles, tracking the number of parallel requests
struct SlowFetcher {
    calls: AtomicUsize,
    running: AtomicUsize,
    max_running: AtomicUsize,
}

impl SlowFetcher {
    fn new() -> SlowFetcher {
        SlowFetcher {
            calls: AtomicUsize::new(0),
            running: AtomicUsize::new(0),
            max_running: AtomicUsize::new(0),
        }
    }
}

impl TileFetcher for SlowFetcher {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(running, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        let tile = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            TILE_SIZE,
            TILE_SIZE,
            Rgba([0, 255, 0, 255]),
        ));
        let mut bytes = Vec::new();
        tile.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        self.running.fetch_sub(1, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(bytes)
    }
}

fn nocache() -> Tilecache {
    Tilecache::Nocache(Nocache)
}

fn service(fetcher: Arc<dyn TileFetcher>, map_cache: Tilecache) -> MapService {
    MapService::new(
        TileLoader::new(fetcher, nocache()),
        MapCache::new(map_cache),
        MarkerRegistry::new(),
    )
}

fn manchester() -> MapSpec {
    let mut spec = MapSpec::new(GeoPoint::new(53.480950, -2.237430));
    spec.zoom = 12;
    spec.width = 300;
    spec.height = 200;
    spec.tile_source = TileSource::Mapnik;
    spec
}

#[tokio::test]
async fn test_render() {
    let fetcher = Arc::new(SlowFetcher::new());
    let service = service(fetcher.clone(), nocache());
    let spec = manchester();
    let map = service.render(&spec).await.unwrap();
    assert!(map.path.is_none());

    let img = image::load_from_memory(&map.bytes).unwrap();
    assert_eq!(img.dimensions(), (300, 200));
    assert_eq!(img.get_pixel(0, 0), Rgba([0, 255, 0, 255]));
    assert_eq!(img.get_pixel(299, 199), Rgba([0, 255, 0, 255]));
    assert_eq!(
        fetcher.calls.load(Ordering::SeqCst),
        spec.tile_grid().tile_count()
    );
}

#[tokio::test]
async fn test_failing_tile_source() {
    let fetcher = Arc::new(FailingFetcher {
        calls: AtomicUsize::new(0),
    });
    let service = service(fetcher.clone(), nocache());
    let map = service.render(&manchester()).await.unwrap();
    let img = image::load_from_memory(&map.bytes).unwrap();
    assert_eq!(img.dimensions(), (300, 200));
    // placeholder tiles everywhere, no transparent gaps
    let img = img.to_rgba8();
    let background = img
        .pixels()
        .filter(|p| **p == Rgba([224, 224, 224, 255]))
        .count();
    assert!(background > img.pixels().count() / 2);
    assert!(img.pixels().all(|p| p[3] == 255));
    assert!(fetcher.calls.load(Ordering::SeqCst) > 0);
}

#[tokio::test]
async fn test_panicking_tile_task() {
    let service = service(Arc::new(PanickingFetcher), nocache());
    let map = service.render(&manchester()).await.unwrap();
    let img = image::load_from_memory(&map.bytes).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (300, 200));
    // every cell filled with a placeholder tile
    assert!(img.pixels().all(|p| p[3] == 255));
    let background = img
        .pixels()
        .filter(|p| **p == Rgba([224, 224, 224, 255]))
        .count();
    assert!(background > img.pixels().count() / 2);
}

#[tokio::test]
async fn test_validation_before_fetching() {
    let fetcher = Arc::new(FailingFetcher {
        calls: AtomicUsize::new(0),
    });
    let service = service(fetcher.clone(), nocache());

    let mut spec = manchester();
    spec.zoom = 20;
    let err = service.render(&spec).await.unwrap_err();
    assert!(matches!(err, MapError::InvalidZoom(20)));

    let mut spec = manchester();
    spec.width = 2000;
    let err = service.render(&spec).await.unwrap_err();
    assert!(err.to_string().contains("1024"));
    assert!(err.is_validation());

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_bounded_parallel_fetches() {
    let fetcher = Arc::new(SlowFetcher::new());
    let mut service = service(fetcher.clone(), nocache());
    service.workers = 2;
    let mut spec = manchester();
    spec.width = 1024;
    spec.height = 1024;
    service.render(&spec).await.unwrap();

    assert_eq!(
        fetcher.calls.load(Ordering::SeqCst),
        spec.tile_grid().tile_count()
    );
    let max_running = fetcher.max_running.load(Ordering::SeqCst);
    assert!(max_running >= 1 && max_running <= 2, "{}", max_running);
}

#[tokio::test]
async fn test_map_cache() {
    let dir = TempDir::new().unwrap();
    let map_cache = Tilecache::Filecache(
        Filecache::checked(&dir.path().display().to_string()).unwrap(),
    );
    let fetcher = Arc::new(SlowFetcher::new());
    let service = service(fetcher.clone(), map_cache);
    let spec = manchester();

    let first = service.render(&spec).await.unwrap();
    let path = first.path.clone().expect("cached map");
    assert!(path.exists());
    let calls = fetcher.calls.load(Ordering::SeqCst);

    let second = service.render(&spec).await.unwrap();
    assert_eq!(second.bytes, first.bytes);
    assert_eq!(second.path, Some(path));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), calls);
}

#[test]
fn test_render_blocking() {
    let fetcher = Arc::new(SlowFetcher::new());
    let service = service(fetcher, nocache());
    let mut spec = manchester();
    spec.width = 64;
    spec.height = 64;
    let map = service.render_blocking(&spec).unwrap();
    let img = image::load_from_memory(&map.bytes).unwrap();
    assert_eq!(img.dimensions(), (64, 64));
}

#[tokio::test]
async fn test_render_request() {
    let fetcher = Arc::new(SlowFetcher::new());
    let service = service(fetcher.clone(), nocache());
    let request = MapRequest {
        center: Some("53.480950,-2.237430".to_string()),
        zoom: Some("12".to_string()),
        size: Some("300x200".to_string()),
        maptype: Some("mapnik".to_string()),
        ..Default::default()
    };
    let map = service.render_request(&request).await.unwrap();
    let img = image::load_from_memory(&map.bytes).unwrap();
    assert_eq!(img.dimensions(), (300, 200));

    let request = MapRequest {
        center: Some("53.480950,-2.237430".to_string()),
        zoom: Some("20".to_string()),
        ..Default::default()
    };
    let calls = fetcher.calls.load(Ordering::SeqCst);
    assert!(service.render_request(&request).await.is_err());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), calls);
}

#[test]
fn test_from_config() {
    let toml = r#"
[service]
default_maptype = "cycle"

[tiles]
timeout = 5
workers = 3

[webserver]
bind = "127.0.0.1"
port = 6767
"#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    let service = MapService::from_config(&config).unwrap();
    assert_eq!(service.default_source, TileSource::Cycle);
    assert_eq!(service.workers, 3);
    assert!(service.copyright.is_none());
    assert!(service.markers.names().is_empty());

    let request = MapRequest {
        center: Some("0,0".to_string()),
        ..Default::default()
    };
    assert_eq!(
        service.map_spec(&request).unwrap().tile_source,
        TileSource::Cycle
    );
}

#[test]
fn test_missing_copyright() {
    let toml = r#"
[service]
copyright = "/nonexistent/copyright.png"

[webserver]
port = 6767
"#;
    let config: ApplicationCfg = parse_config(toml.to_string(), "").unwrap();
    let err = MapService::from_config(&config).err().unwrap();
    assert!(err.contains("copyright"), "{}", err);
}

#[test]
fn test_gen_config() {
    let config = MapService::gen_config();
    assert!(config.starts_with("# static-map configuration\n"));
    assert!(config.contains("[service]"));
    assert!(config.contains("[tiles]"));
    assert!(config.contains("#[cache.tiles]"));
    assert!(config.contains("#[cache.maps]"));
    assert!(config.contains("#[[marker]]"));
}
