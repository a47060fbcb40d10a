//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::runtime_config::{config_from_args, service_from_args};
use actix_web::http::header::{CacheControl, CacheDirective, Expires, HttpDate};
use actix_web::{middleware, rt, web, App, HttpResponse, HttpServer};
use clap::ArgMatches;
use static_map_core::cache::Cache;
use static_map_core::core::config::DEFAULT_CACHE_CONTROL_MAX_AGE;
use static_map_core::core::Config;
use static_map_service::{MapRequest, MapService};
use std::io;
use std::time::{Duration, SystemTime};

/// Application state
pub struct AppState {
    pub service: MapService,
    /// Cache-Control max-age in seconds
    pub cache_max_age: u32,
}

/// Example: /staticmap?center=53.48095,-2.23743&zoom=12&size=300x200&maptype=mapnik
async fn staticmap(state: web::Data<AppState>, params: web::Query<MapRequest>) -> HttpResponse {
    match state.service.render_request(&params.into_inner()).await {
        Ok(map) => {
            let max_age = state.cache_max_age;
            let expires = SystemTime::now() + Duration::from_secs(u64::from(max_age));
            HttpResponse::Ok()
                .content_type("image/png")
                .insert_header(CacheControl(vec![CacheDirective::MaxAge(max_age)]))
                .insert_header(Expires(HttpDate::from(expires)))
                .body(map.bytes)
        }
        Err(e) if e.is_validation() => {
            debug!("Invalid map request: {}", e);
            HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(e.to_string())
        }
        Err(e) => {
            error!("Map rendering failed: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(e.to_string())
        }
    }
}

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/staticmap", web::get().to(staticmap));
}

pub fn webserver(args: ArgMatches<'static>) -> io::Result<()> {
    let config = config_from_args(&args);
    let host = config
        .webserver
        .bind
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let port = config.webserver.port.unwrap_or(6767);
    let threads = config
        .webserver
        .threads
        .map(usize::from)
        .unwrap_or_else(num_cpus::get);
    let cache_max_age = config
        .webserver
        .cache_control_max_age
        .unwrap_or(DEFAULT_CACHE_CONTROL_MAX_AGE);

    // Tile HTTP client has to be created outside of the async runtime
    let service = service_from_args(&config);
    info!("Tile cache - {}", service.tiles.cache().info());
    info!("{}", service.map_cache.info());
    let state = web::Data::new(AppState {
        service,
        cache_max_age,
    });

    // The last service reference is dropped outside of the runtime
    let app_state = state.clone();
    rt::System::new().block_on(async move {
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .wrap(middleware::Logger::default())
                .configure(configure_app)
        })
        .workers(threads)
        .bind((host.as_str(), port))?
        .shutdown_timeout(3) // default: 30s
        .run();
        info!("Serving static maps on http://{}:{}/staticmap", host, port);
        server.await
    })
}

pub fn gen_config() -> String {
    let toml = r#"
[webserver]
# Bind address. Use 0.0.0.0 to listen on all adresses.
bind = "127.0.0.1"
port = 6767
#threads = 4
# Cache-Control max-age of rendered maps in seconds
cache_control_max_age = 1209600
"#;
    let mut config = MapService::gen_config();
    config.push_str(toml);
    config
}

#[test]
fn test_gen_config() {
    use static_map_core::core::{parse_config, ApplicationCfg};

    let toml = gen_config();
    println!("{}", toml);
    assert_eq!(Some("# static-map configuration"), toml.lines().next());

    let config: ApplicationCfg = parse_config(toml, "").unwrap();
    assert_eq!(config.webserver.port, Some(6767));
    assert_eq!(
        config.webserver.cache_control_max_age,
        Some(DEFAULT_CACHE_CONTROL_MAX_AGE)
    );
    let _service = MapService::from_config(&config).unwrap();
}
