//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::cache::Cache;
use crate::core::MapError;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Clone, Debug)]
pub struct Filecache {
    pub basepath: String,
}

impl Filecache {
    /// Cache in an existing and writable directory
    pub fn checked(basepath: &str) -> Result<Filecache, MapError> {
        let dir = Path::new(basepath);
        if !dir.is_dir() {
            return Err(MapError::CacheDirectoryNotFound(dir.to_path_buf()));
        }
        if NamedTempFile::new_in(dir).is_err() {
            return Err(MapError::CacheDirectoryNotWritable(dir.to_path_buf()));
        }
        Ok(Filecache {
            basepath: basepath.to_string(),
        })
    }
    fn fullpath(&self, path: &str) -> PathBuf {
        Path::new(&self.basepath).join(path)
    }
}

impl Cache for Filecache {
    fn info(&self) -> String {
        format!("Cache directory: {}", self.basepath)
    }
    fn read(&self, path: &str) -> Option<Vec<u8>> {
        let fullpath = self.fullpath(path);
        match fs::read(&fullpath) {
            Ok(data) => {
                debug!("Cache hit {}", fullpath.display());
                Some(data)
            }
            Err(_) => {
                debug!("Cache miss {}", fullpath.display());
                None
            }
        }
    }
    /// Entries appear atomically: written to a temporary file in the target directory, then renamed.
    fn write(&self, path: &str, obj: &[u8]) -> Result<(), io::Error> {
        let fullpath = self.fullpath(path);
        debug!("Cache write {}", fullpath.display());
        let dir = fullpath.parent().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "cache entry without directory")
        })?;
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(obj)?;
        tmp.persist(&fullpath).map_err(|e| e.error)?;
        Ok(())
    }
    fn exists(&self, path: &str) -> bool {
        self.fullpath(path).exists()
    }
    fn location(&self, path: &str) -> Option<PathBuf> {
        Some(self.fullpath(path))
    }
}
