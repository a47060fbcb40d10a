//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use clap::{App, AppSettings, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use static_map_service::MapRequest;
use static_map_webserver as webserver;
use std::env;
use std::fs;
use std::io::Write;
use std::process;
use time;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default(),
            t.tm_nsec / 1000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log_env = env::var("RUST_LOG");
    let rust_log = match (args.value_of("loglevel"), rust_log_env.as_ref()) {
        (None, Ok(rust_log)) => rust_log.as_str(),
        (loglevel, _) => match loglevel.unwrap_or("info") {
            "debug" => "debug,tokio=info",
            loglevel => loglevel,
        },
    };
    builder.parse_filters(rust_log);

    builder.init();
}

fn render(args: &ArgMatches<'_>) {
    let config = webserver::config_from_args(args);
    let service = webserver::service_from_args(&config);
    let request = MapRequest {
        center: args.value_of("center").map(String::from),
        zoom: args.value_of("zoom").map(String::from),
        size: args.value_of("size").map(String::from),
        maptype: args.value_of("maptype").map(String::from),
        markers: args.value_of("markers").map(String::from),
        circle: args.value_of("circle").map(String::from),
    };
    let output = args.value_of("output").unwrap_or("map.png");
    let map = service
        .map_spec(&request)
        .and_then(|spec| service.render_blocking(&spec))
        .unwrap_or_else(|err| {
            println!("Error rendering map - {}", err);
            process::exit(1)
        });
    if let Err(err) = fs::write(output, &map.bytes) {
        println!("Error writing {} - {}", output, err);
        process::exit(1)
    }
    info!("Map written to {}", output);
}

fn main() {
    dotenv().ok();
    // http://kbknapp.github.io/clap-rs/clap/
    let mut app = App::new("static_map")
        .version(crate_version!())
        .author("Pirmin Kalberer <pka@sourcepole.ch>")
        .about("static map images from OpenStreetMap raster tiles")
        .subcommand(SubCommand::with_name("serve")
                        .args_from_usage("-c, --config=[FILE] 'Load from custom config file'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'
                                              --tilecache=[DIR] 'Cache source tiles in DIR'
                                              --mapcache=[DIR] 'Cache rendered maps in DIR'
                                              --markerdir=[DIR] 'Directory with the built-in marker icons'
                                              --bind=[IPADDRESS] 'Bind web server to this address (0.0.0.0 for all)'
                                              --port=[PORT] 'Bind web server to this port'")
                        .about("Start web server and serve static maps"))
        .subcommand(SubCommand::with_name("genconfig")
                        .args_from_usage("--loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Generate configuration template"))
        .subcommand(SubCommand::with_name("render")
                        .setting(AppSettings::AllowLeadingHyphen)
                        .args_from_usage("--center=<LAT,LNG> 'Map center'
                                              --zoom=[LEVEL] 'Zoom level 0-18 (Default: 12)'
                                              --size=[WIDTHxHEIGHT] 'Image size (Default: 500x350)'
                                              --maptype=[mapnik|osmarenderer|cycle] 'Tile source'
                                              --markers=[LAT,LNG,TYPE|..] 'Markers'
                                              --circle=[RADIUS,UNIT,COLOR[,ALPHA]] 'Circle around the map center'
                                              -o, --output=[FILE] 'Output PNG file (Default: map.png)'
                                              -c, --config=[FILE] 'Load from custom config file'
                                              --tilecache=[DIR] 'Cache source tiles in DIR'
                                              --mapcache=[DIR] 'Cache rendered maps in DIR'
                                              --markerdir=[DIR] 'Directory with the built-in marker icons'
                                              --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'")
                        .about("Render a single map into a PNG file"));

    match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("serve", Some(sub_m)) => {
                init_logger(sub_m);
                if let Err(e) = webserver::webserver(sub_m.clone()) {
                    error!("{}", e);
                    process::exit(1)
                }
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                println!("{}", webserver::gen_config());
            }
            ("render", Some(sub_m)) => {
                init_logger(sub_m);
                render(sub_m);
            }
            _ => {
                let _ = app.print_help();
                println!("");
            }
        },
    }
}
