//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::cache::cache::Cache;
use crate::cache::filecache::Filecache;
use crate::core::MapError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_dircache() {
    let dir = TempDir::new().unwrap();
    let cache = Filecache::checked(&dir.path().display().to_string()).unwrap();
    let path = "tile.openstreetmap.org/12/2022/1325.png";
    let fullpath = format!("{}/{}", cache.basepath, path);
    let obj = "0123456789";

    // Cache miss
    assert_eq!(cache.read(path), None);
    assert!(!cache.exists(path));

    // Write into cache
    cache.write(path, obj.as_bytes()).unwrap();
    assert!(Path::new(&fullpath).exists());
    assert!(cache.exists(path));
    assert_eq!(cache.location(path), Some(Path::new(&fullpath).to_path_buf()));

    // Cache hit
    assert_eq!(cache.read(path), Some(obj.as_bytes().to_vec()));

    // Overwrite, no temporary files left behind
    cache.write(path, b"abc").unwrap();
    assert_eq!(fs::read(&fullpath).unwrap(), b"abc");
    let entries = fs::read_dir(Path::new(&fullpath).parent().unwrap())
        .unwrap()
        .count();
    assert_eq!(entries, 1);
}

#[test]
fn test_checked_dir() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    let err = Filecache::checked(&missing.display().to_string()).unwrap_err();
    assert!(matches!(err, MapError::CacheDirectoryNotFound(_)));
    assert!(!err.is_validation());

    // a plain file is not a cache directory
    let file = dir.path().join("file");
    fs::write(&file, b"x").unwrap();
    let err = Filecache::checked(&file.display().to_string()).unwrap_err();
    assert!(matches!(err, MapError::CacheDirectoryNotFound(_)));
}

#[cfg(unix)]
#[test]
fn test_readonly_dir() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let readonly = dir.path().join("readonly");
    fs::create_dir(&readonly).unwrap();
    fs::set_permissions(&readonly, fs::Permissions::from_mode(0o555)).unwrap();
    // root ignores directory permissions
    let probe = readonly.join("probe");
    if fs::write(&probe, b"x").is_ok() {
        return;
    }
    let err = Filecache::checked(&readonly.display().to_string()).unwrap_err();
    assert!(matches!(err, MapError::CacheDirectoryNotWritable(_)));
    fs::set_permissions(&readonly, fs::Permissions::from_mode(0o755)).unwrap();
}
