//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::config::{ApplicationCfg, Config};
use crate::core::error::MapError;
use crate::core::mapspec::{MarkerIcon, MarkerPlacement};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tile_grid::{GeoPoint, PixelPoint};

/// Built-in marker icons `(name, offset_left, offset_down)`, read from `<name>.png`
pub const PRESETS: &[(&str, i64, i64)] = &[
    ("google_sm", 16, 32),
    ("google_md", 24, 48),
    ("google_lg", 32, 64),
    ("blue", 20, 40),
    ("blue2", 12, 36),
    ("pin", 6, 42),
    ("greyscale", 12, 36),
];

/// Marker icons by name
#[derive(Clone, Default, Debug)]
pub struct MarkerRegistry {
    icons: HashMap<String, MarkerIcon>,
}

impl MarkerRegistry {
    pub fn new() -> MarkerRegistry {
        MarkerRegistry::default()
    }

    /// Registry with all built-in icons found in `dir`
    pub fn with_presets(dir: &Path) -> Result<MarkerRegistry, MapError> {
        let mut registry = MarkerRegistry::new();
        for (name, offset_left, offset_down) in PRESETS {
            let path = dir.join(format!("{}.png", name));
            registry.register(Some(*name), &path, *offset_left, *offset_down)?;
        }
        Ok(registry)
    }

    /// Load a PNG icon. The name defaults to the file name.
    pub fn register(
        &mut self,
        name: Option<&str>,
        path: &Path,
        offset_left: i64,
        offset_down: i64,
    ) -> Result<(), MapError> {
        if !path.is_file() {
            return Err(MapError::MarkerFileNotFound(path.to_path_buf()));
        }
        let name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .ok_or_else(|| MapError::MarkerFileNotFound(path.to_path_buf()))?,
        };
        let image = image::open(path)?.to_rgba8();
        debug!("Registering marker `{}` from {}", name, path.display());
        self.register_icon(MarkerIcon {
            name,
            image: Arc::new(image),
            anchor: PixelPoint::new(-offset_left, -offset_down),
        });
        Ok(())
    }

    pub fn register_icon(&mut self, icon: MarkerIcon) {
        self.icons.insert(icon.name.clone(), icon);
    }

    pub fn get(&self, name: &str) -> Option<&MarkerIcon> {
        self.icons.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names = self.icons.keys().map(|k| k.as_str()).collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Place a copy of a registered icon at `coordinates`
    pub fn create(&self, name: &str, coordinates: GeoPoint) -> Result<MarkerPlacement, MapError> {
        let icon = self
            .get(name)
            .ok_or_else(|| MapError::MarkerPrototypeNotFound(name.to_string()))?;
        Ok(MarkerPlacement {
            coordinates,
            icon: icon.clone(),
        })
    }
}

impl<'a> Config<'a, ApplicationCfg> for MarkerRegistry {
    fn from_config(config: &ApplicationCfg) -> Result<Self, String> {
        let mut registry = match config.service.marker_dir {
            Some(ref dir) => MarkerRegistry::with_presets(Path::new(dir)),
            None => Ok(MarkerRegistry::new()),
        }
        .map_err(|e| e.to_string())?;
        for marker_cfg in &config.markers {
            registry
                .register(
                    marker_cfg.name.as_deref(),
                    Path::new(&marker_cfg.path),
                    marker_cfg.offset_left,
                    marker_cfg.offset_down,
                )
                .map_err(|e| e.to_string())?;
        }
        Ok(registry)
    }
    fn gen_config() -> String {
        let toml = r#"
#[[marker]]
#name = "red"
#path = "/usr/share/static-map/markers/red.png"
# Pixels from the left and top edge of the image to the marked point
#offset_left = 10
#offset_down = 34
"#;
        toml.to_string()
    }
}
