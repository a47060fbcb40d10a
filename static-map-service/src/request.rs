//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use image::RgbaImage;
use regex::Regex;
use static_map_core::core::geo::{Color, DistanceUnit};
use static_map_core::core::mapspec::{CircleSpec, MapSpec, MarkerPlacement, TileSource};
use static_map_core::core::marker::MarkerRegistry;
use static_map_core::core::MapError;
use std::sync::Arc;
use tile_grid::GeoPoint;

lazy_static! {
    static ref CENTER_RE: Regex =
        Regex::new(r"^(-?\d+(\.\d+)?),\s*(-?\d+(\.\d+)?)$").expect("center regex");
    static ref SIZE_RE: Regex = Regex::new(r"^(\d+)x(\d+)$").expect("size regex");
}

/// Raw map request parameters, e.g. from a query string
///
/// `center=53.48095,-2.23743&zoom=12&size=300x200&maptype=mapnik`
#[derive(Deserialize, Clone, Debug, Default)]
pub struct MapRequest {
    pub center: Option<String>,
    pub zoom: Option<String>,
    pub size: Option<String>,
    pub maptype: Option<String>,
    /// `lat,lng,type|lat,lng,type`
    pub markers: Option<String>,
    /// `radius,unit,color[,alpha]` around the map center
    pub circle: Option<String>,
}

fn invalid(msg: &str) -> MapError {
    MapError::InvalidRequest(msg.to_string())
}

fn param(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Turns a `MapRequest` into a validated `MapSpec`
pub struct RequestParser<'a> {
    markers: &'a MarkerRegistry,
    default_source: TileSource,
    copyright: Option<Arc<RgbaImage>>,
}

impl<'a> RequestParser<'a> {
    pub fn new(
        markers: &'a MarkerRegistry,
        default_source: TileSource,
        copyright: Option<Arc<RgbaImage>>,
    ) -> RequestParser<'a> {
        RequestParser {
            markers,
            default_source,
            copyright,
        }
    }

    pub fn parse(&self, request: &MapRequest) -> Result<MapSpec, MapError> {
        let center = match param(&request.center) {
            Some(center) => parse_center(center)?,
            None => return Err(invalid("The center parameter is required")),
        };
        let mut spec = MapSpec::new(center);
        spec.tile_source = self.default_source;
        spec.copyright = self.copyright.clone();

        if let Some(zoom) = param(&request.zoom) {
            spec.zoom = parse_zoom(zoom)?;
        }
        if let Some(maptype) = param(&request.maptype) {
            spec.tile_source = maptype.parse()?;
        }
        if let Some(size) = param(&request.size) {
            let (width, height) = parse_size(size)?;
            spec.width = width;
            spec.height = height;
        }
        if let Some(markers) = param(&request.markers) {
            spec.markers = self.parse_markers(markers)?;
        }
        if let Some(circle) = param(&request.circle) {
            spec.circle = Some(parse_circle(circle, center)?);
        }

        spec.validate()?;
        Ok(spec)
    }

    fn parse_markers(&self, markers: &str) -> Result<Vec<MarkerPlacement>, MapError> {
        markers
            .split('|')
            .filter(|m| !m.trim().is_empty())
            .map(|marker| {
                let parts: Vec<&str> = marker.split(',').map(str::trim).collect();
                if parts.len() != 3 {
                    return Err(invalid(
                        "The markers parameter should be in the format lat,lng,type|lat,lng,type",
                    ));
                }
                let coordinates = GeoPoint::new(parse_float(parts[0])?, parse_float(parts[1])?);
                // Only the file name part of the marker type
                let name = parts[2].rsplit('/').next().unwrap_or(parts[2]);
                self.markers.create(name, coordinates)
            })
            .collect()
    }
}

fn parse_center(center: &str) -> Result<GeoPoint, MapError> {
    let caps = CENTER_RE
        .captures(center)
        .ok_or_else(|| invalid("The center parameter should be in the format lat,lng"))?;
    Ok(GeoPoint::new(
        parse_float(&caps[1])?,
        parse_float(&caps[3])?,
    ))
}

fn parse_zoom(zoom: &str) -> Result<u8, MapError> {
    let zoom = zoom
        .parse::<i64>()
        .map_err(|_| invalid("The zoom parameter should be an integer"))?;
    if zoom < 0 || zoom > 255 {
        return Err(MapError::InvalidZoom(zoom));
    }
    Ok(zoom as u8)
}

fn parse_size(size: &str) -> Result<(u32, u32), MapError> {
    let caps = SIZE_RE.captures(size).ok_or_else(|| {
        invalid("The size parameter should be in the format widthxheight; e.g. 200x200")
    })?;
    // Digits only, so a parse error is an overflow
    let width = caps[1].parse::<u32>().unwrap_or(u32::MAX);
    let height = caps[2].parse::<u32>().unwrap_or(u32::MAX);
    Ok((width, height))
}

fn parse_float(value: &str) -> Result<f64, MapError> {
    value
        .parse::<f64>()
        .map_err(|_| MapError::InvalidRequest(format!("`{}` is not a number", value)))
}

fn parse_circle(circle: &str, center: GeoPoint) -> Result<CircleSpec, MapError> {
    let format_err =
        || invalid("The circle parameter should be in the format radius,unit,color[,alpha]; e.g. 2,km,f395e6");
    let parts: Vec<&str> = circle.split(',').map(str::trim).collect();
    if parts.len() < 3 || parts.len() > 4 {
        return Err(format_err());
    }
    let radius = parse_float(parts[0])?;
    if !radius.is_finite() || radius < 0.0 {
        return Err(format_err());
    }
    let unit = parts[1].parse::<DistanceUnit>()?;
    let alpha = match parts.get(3) {
        Some(alpha) => Some(alpha.parse::<u8>().map_err(|_| format_err())?),
        None => None,
    };
    let color = Color::from_hex(parts[2], alpha)?;
    Ok(CircleSpec {
        center,
        radius,
        unit,
        color,
    })
}
