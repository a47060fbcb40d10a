//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Rendered map cache, addressed by a hash of the map parameters.
//! Entries are never expired.

use crate::cache::{Cache, Tilecache};
use crate::core::mapspec::{MapSpec, RenderedMap};
use crate::core::{ApplicationCfg, Config};
use sha2::{Digest, Sha256};
use std::io;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct MapCache {
    cache: Tilecache,
}

impl MapCache {
    pub fn new(cache: Tilecache) -> MapCache {
        MapCache { cache }
    }

    pub fn info(&self) -> String {
        format!("Map cache - {}", self.cache.info())
    }

    /// SHA-256 hex digest of the canonical map parameters
    pub fn key(spec: &MapSpec) -> String {
        Sha256::digest(spec.canonical().as_bytes())
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Relative path `{maptype}/{zoom}/cache_{k[0:2]}/{k[2:4]}/{k[4:]}.png`
    pub fn path(key: &str, spec: &MapSpec) -> String {
        format!(
            "{}/{}/cache_{}/{}/{}.png",
            spec.tile_source,
            spec.zoom,
            &key[0..2],
            &key[2..4],
            &key[4..]
        )
    }

    pub fn get(&self, spec: &MapSpec) -> Option<RenderedMap> {
        let path = MapCache::path(&MapCache::key(spec), spec);
        self.cache.read(&path).map(|bytes| RenderedMap {
            bytes,
            path: self.cache.location(&path),
        })
    }

    /// Store a rendered map, returns its file location
    pub fn put(&self, spec: &MapSpec, bytes: &[u8]) -> Result<Option<PathBuf>, io::Error> {
        let path = MapCache::path(&MapCache::key(spec), spec);
        self.cache.write(&path, bytes)?;
        Ok(self.cache.location(&path))
    }
}

impl<'a> Config<'a, ApplicationCfg> for MapCache {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let dir = config
            .cache
            .as_ref()
            .and_then(|cache| cache.maps.as_ref())
            .map(|cfg| cfg.base.as_str());
        Tilecache::from_dir(dir).map(MapCache::new)
    }
    fn gen_config() -> String {
        let toml = r#"
# Rendered maps. The directory must exist.
#[cache.maps]
#base = "/var/cache/static-map/maps"
"#;
        toml.to_string()
    }
}
