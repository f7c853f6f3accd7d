// src/lib.rs

//! Partitions a country's Exclusive Economic Zone (EEZ) among its
//! administrative regions.
//!
//! The pipeline seeds a planar Voronoi tessellation with coastline vertices,
//! repairs the unbounded perimeter cells into closed polygons, clips every
//! cell to the EEZ outline and dissolves the fragments into one maritime
//! polygon per region, keyed back to the matching land record.

pub mod config;
pub mod dataset;
pub mod dissolve;
pub mod error;
pub mod pipeline;
pub mod projection;
pub mod seeds;
pub mod voronoi;

pub use config::PartitionConfig;
pub use dataset::{ShapeClass, ShapeRecord, ZoneRecord};
pub use error::{PartitionError, PartitionResult};
pub use pipeline::{region_centroids, run, RegionCentroid};
pub use projection::AlbersProjection;
pub use seeds::SeedPoint;
