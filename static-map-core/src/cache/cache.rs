//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use std::io;
use std::path::PathBuf;

/// Key/value store for tiles and rendered maps, keyed by relative path.
/// Entries are created or replaced as a whole, never modified.
pub trait Cache {
    fn info(&self) -> String;
    /// Content of a cache entry, `None` on cache miss
    fn read(&self, path: &str) -> Option<Vec<u8>>;
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error>;
    fn exists(&self, path: &str) -> bool;
    /// Filesystem location of a cache entry
    fn location(&self, path: &str) -> Option<PathBuf>;
}

/// Disabled cache, every read is a miss
#[derive(Clone, Debug)]
pub struct Nocache;

impl Cache for Nocache {
    fn info(&self) -> String {
        "No cache".to_string()
    }
    fn read(&self, _path: &str) -> Option<Vec<u8>> {
        None
    }
    fn write(&self, _path: &str, _obj: &[u8]) -> Result<(), io::Error> {
        Ok(())
    }
    fn exists(&self, _path: &str) -> bool {
        false
    }
    fn location(&self, _path: &str) -> Option<PathBuf> {
        None
    }
}
