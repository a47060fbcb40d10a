//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod cache;
pub mod filecache;
pub mod mapcache;

#[cfg(test)]
mod filecache_test;

pub use self::cache::Cache;
pub use self::cache::Nocache;
pub use self::filecache::Filecache;
pub use self::mapcache::MapCache;
use crate::core::ApplicationCfg;
use crate::core::Config;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub enum Tilecache {
    Nocache(Nocache),
    Filecache(Filecache),
}

impl Tilecache {
    /// File cache in `dir`, if given
    pub fn from_dir(dir: Option<&str>) -> Result<Tilecache, String> {
        match dir {
            Some(dir) => Filecache::checked(dir)
                .map(Tilecache::Filecache)
                .map_err(|e| e.to_string()),
            None => Ok(Tilecache::Nocache(Nocache)),
        }
    }
}

impl Tilecache {
    fn backend(&self) -> &dyn Cache {
        match self {
            Tilecache::Nocache(cache) => cache,
            Tilecache::Filecache(cache) => cache,
        }
    }
}

impl Cache for Tilecache {
    fn info(&self) -> String {
        self.backend().info()
    }
    fn read(&self, path: &str) -> Option<Vec<u8>> {
        self.backend().read(path)
    }
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        self.backend().write(path, obj)
    }
    fn exists(&self, path: &str) -> bool {
        self.backend().exists(path)
    }
    fn location(&self, path: &str) -> Option<PathBuf> {
        self.backend().location(path)
    }
}

impl<'a> Config<'a, ApplicationCfg> for Tilecache {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let dir = config
            .cache
            .as_ref()
            .and_then(|cache| cache.tiles.as_ref())
            .map(|cfg| cfg.base.as_str());
        Tilecache::from_dir(dir)
    }
    fn gen_config() -> String {
        let toml = r#"
# Source tiles, stored by URL. The directory must exist.
#[cache.tiles]
#base = "/var/cache/static-map/tiles"
"#;
        toml.to_string()
    }
}
