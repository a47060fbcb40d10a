//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::core::error::MapError;
use image::Rgba;
use std::fmt;
use std::str::FromStr;

pub use tile_grid::{GeoPoint, PixelPoint};

/// Color with optional alpha channel (255: opaque)
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: Option<u8>,
}

impl Color {
    pub fn new(red: u8, green: u8, blue: u8, alpha: Option<u8>) -> Color {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parse `#rrggbb`, `rrggbb` or the shorthand `rgb`
    pub fn from_hex(hex: &str, alpha: Option<u8>) -> Result<Color, MapError> {
        let digits = hex.trim_start_matches('#');
        let invalid = || MapError::InvalidRequest(format!("Invalid hex color `{}`", hex));
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| vec![c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Color {
            red: channel(0)?,
            green: channel(2)?,
            blue: channel(4)?,
            alpha,
        })
    }

    pub fn rgba(&self) -> Rgba<u8> {
        Rgba([self.red, self.green, self.blue, self.alpha.unwrap_or(255)])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.red, self.green, self.blue)?;
        if let Some(alpha) = self.alpha {
            write!(f, "|{}", alpha)?;
        }
        Ok(())
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
    Meters,
}

impl DistanceUnit {
    /// Distance in whole meters
    pub fn to_meters(&self, distance: f64) -> i64 {
        match self {
            DistanceUnit::Miles => miles_to_meters(distance),
            DistanceUnit::Kilometers => kilometers_to_meters(distance),
            DistanceUnit::Meters => distance as i64,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mi" => Ok(DistanceUnit::Miles),
            "km" => Ok(DistanceUnit::Kilometers),
            "m" | "meters" => Ok(DistanceUnit::Meters),
            _ => Err(MapError::InvalidRequest(format!(
                "Unknown distance unit `{}`; use mi, km or m",
                s
            ))),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self {
            DistanceUnit::Miles => "mi",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters => "m",
        };
        f.write_str(unit)
    }
}

pub fn miles_to_meters(miles: f64) -> i64 {
    (miles * 1609.34) as i64
}

pub fn kilometers_to_meters(km: f64) -> i64 {
    (km * 1000.0) as i64
}

/// Euclidean distance in whole pixels
pub fn pixel_distance(x1: i64, y1: i64, x2: i64, y2: i64) -> i64 {
    let dx = (x2 - x1) as f64;
    let dy = (y2 - y1) as f64;
    (dx * dx + dy * dy).sqrt().floor() as i64
}
