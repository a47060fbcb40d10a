//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;

pub mod map_service;
#[cfg(test)]
mod map_service_test;
pub mod request;

pub use map_service::MapService;
pub use request::{MapRequest, RequestParser};
