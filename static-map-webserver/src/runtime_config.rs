//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use clap::ArgMatches;
use static_map_core::core::config::{ApplicationCfg, CacheCfg, CacheDirCfg, DEFAULT_CONFIG};
use static_map_core::core::{parse_config, read_config, Config};
use static_map_service::MapService;
use std::process;
use std::str::FromStr;

fn cache_dir(args: &ArgMatches, argname: &str) -> Option<CacheDirCfg> {
    args.value_of(argname).map(|dir| CacheDirCfg {
        base: dir.to_string(),
    })
}

/// Configuration from `--config` file or from command line arguments
pub fn config_from_args(args: &ArgMatches) -> ApplicationCfg {
    if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        for argname in &["tilecache", "mapcache", "markerdir"] {
            if args.value_of(argname).is_some() {
                warn!("Ignoring argument `{}`", argname);
            }
        }
        read_config(cfgpath).unwrap_or_else(|err| {
            println!("Error reading configuration - {} ", err);
            process::exit(1)
        })
    } else {
        let mut config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "")
            .unwrap_or_else(|err| {
                println!("Error reading default configuration - {} ", err);
                process::exit(1)
            });
        if let Some(bind) = args.value_of("bind") {
            config.webserver.bind = Some(bind.to_string());
        }
        if let Some(port) = args.value_of("port") {
            let port = u16::from_str(port).unwrap_or_else(|_| {
                println!("Invalid port number `{}`", port);
                process::exit(1)
            });
            config.webserver.port = Some(port);
        }
        if let Some(dir) = args.value_of("markerdir") {
            config.service.marker_dir = Some(dir.to_string());
        }
        config.cache = Some(CacheCfg {
            tiles: cache_dir(args, "tilecache"),
            maps: cache_dir(args, "mapcache"),
        });
        config
    }
}

pub fn service_from_args(config: &ApplicationCfg) -> MapService {
    MapService::from_config(config).unwrap_or_else(|err| {
        println!("Error reading configuration - {} ", err);
        process::exit(1)
    })
}
