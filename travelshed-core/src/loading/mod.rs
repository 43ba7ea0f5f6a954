//! This module is responsible for turning input line layers into the
//! travel-time weighted road graph.

mod builder;
mod config;

pub use builder::build_road_network;
pub use config::NetworkConfig;
