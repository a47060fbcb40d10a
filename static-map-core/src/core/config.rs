//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use regex::Regex;
use serde::Deserialize;
use std;
use std::collections::HashMap;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use tera::{Context, Tera};
use toml::Value;

pub trait Config<'a, C: Deserialize<'a>>
where
    Self: std::marker::Sized,
{
    /// Read configuration
    fn from_config(config: &C) -> Result<Self, String>;
    /// Generate configuration template
    fn gen_config() -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationCfg {
    pub service: ServiceCfg,
    pub tiles: Option<TilesCfg>,
    pub cache: Option<CacheCfg>,
    #[serde(rename = "marker", default)]
    pub markers: Vec<MarkerCfg>,
    pub webserver: WebserverCfg,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServiceCfg {
    /// mapnik, osmarenderer or cycle
    pub default_maptype: Option<String>,
    /// PNG pasted into the bottom-right corner of every map
    pub copyright: Option<String>,
    /// Directory containing the built-in marker icons
    pub marker_dir: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct TilesCfg {
    pub user_agent: Option<String>,
    /// Timeout of a single tile request in seconds
    pub timeout: Option<u64>,
    /// Maximum number of parallel tile requests per map
    pub workers: Option<usize>,
}

pub const DEFAULT_USER_AGENT: &str = concat!("static-map/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: u64 = 10;

#[derive(Deserialize, Clone, Debug)]
pub struct CacheCfg {
    pub tiles: Option<CacheDirCfg>,
    pub maps: Option<CacheDirCfg>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CacheDirCfg {
    pub base: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct MarkerCfg {
    pub name: Option<String>,
    pub path: String,
    #[serde(default)]
    pub offset_left: i64,
    #[serde(default)]
    pub offset_down: i64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct WebserverCfg {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub threads: Option<u8>,
    // Cache-Control headers set by web server
    // https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Cache-Control#Expiration
    pub cache_control_max_age: Option<u32>,
}

/// 14 days
pub const DEFAULT_CACHE_CONTROL_MAX_AGE: u32 = 1_209_600;

pub const DEFAULT_CONFIG: &'static str = r#"
[service]
default_maptype = "mapnik"

[webserver]
bind = "127.0.0.1"
port = 6767
"#;

/// Load and parse the config file into an config struct.
pub fn read_config<'a, T: Deserialize<'a>>(path: &str) -> Result<T, String> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(_) => {
            return Err("Could not find config file!".to_string());
        }
    };
    let mut config_toml = String::new();
    if let Err(err) = file.read_to_string(&mut config_toml) {
        return Err(format!("Error while reading config: [{}]", err));
    };

    parse_config(config_toml, path)
}

/// Parse the configuration into an config struct.
pub fn parse_config<'a, T: Deserialize<'a>>(config_toml: String, path: &str) -> Result<T, String> {
    // Check for old ${var} expressions
    let re = Regex::new(r"\$\{([[:alnum:]]+)\}").map_err(|e| e.to_string())?;
    if re.is_match(&config_toml) {
        return Err(
            "Replace old environment variable syntax ${VARNAME} with `{{env.VARNAME}}`".to_string(),
        );
    }

    // Parse template
    let mut tera = Tera::default();
    tera.add_raw_template(path, &config_toml)
        .map_err(|e| format!("Template error: {}", e))?;
    let mut context = Context::new();
    let mut env = HashMap::new();
    for (key, value) in env::vars() {
        env.insert(key, value);
    }
    context.insert("env", &env);
    let toml = tera.render(path, &context).map_err(|e| match e.source() {
        Some(source) => format!("Template error: {}", source),
        None => format!("Template error: {}", e),
    })?;

    toml.parse::<Value>()
        .and_then(|cfg| cfg.try_into::<T>())
        .map_err(|err| format!("{} - {}", path, err))
}
