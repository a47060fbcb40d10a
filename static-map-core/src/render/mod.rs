//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

pub mod compositor;
pub mod placeholder;
pub mod radius;
pub mod source;


pub use self::compositor::{compose, Compositor, Stage};
pub use self::placeholder::placeholder_tile;
pub use self::source::{FetchError, HttpFetcher, TileFetcher, TileLoader};
