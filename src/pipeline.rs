// src/pipeline.rs

//! Stage orchestration. One synchronous pass: classify, seed, tessellate,
//! clip and dissolve; the first error aborts the run. Each stage fully
//! consumes its predecessor's output.

use crate::config::PartitionConfig;
use crate::dataset::{classify, LandShape, ShapeClass, ShapeRecord, ZoneRecord};
use crate::dissolve::dissolve_cells;
use crate::error::PartitionResult;
use crate::projection::AlbersProjection;
use crate::seeds::extract_seeds;
use crate::voronoi::build_cells;
use geo::Centroid;
use tracing::info;

/// Runs the full partition: land records pass through, every region adjacent
/// to the coast additionally receives one maritime record covering its share
/// of the EEZ.
pub fn run(
    config: &PartitionConfig,
    records: Vec<ShapeRecord>,
) -> PartitionResult<Vec<ZoneRecord>> {
    config.validate()?;

    let classified = classify(records, config)?;
    info!(land = classified.land.len(), "Classified input shapes");

    let seeds = extract_seeds(&classified.land, &classified.eez_outline, config)?;
    let cells = build_cells(&seeds)?;
    let maritime = dissolve_cells(&cells, &seeds, &classified.land, &classified.eez_outline, config);

    let mut output: Vec<ZoneRecord> = classified
        .land
        .into_iter()
        .map(LandShape::into_zone_record)
        .collect();
    output.extend(maritime);

    info!(records = output.len(), "Partition complete");
    Ok(output)
}

/// A land region's representative point in geographic coordinates, rounded
/// to 6 decimal places. This is the contract the node/location exporter
/// consumes downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionCentroid {
    pub state_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Centroids of the land subset, inverse-projected back to lon/lat.
pub fn region_centroids(
    records: &[ZoneRecord],
    projection: &AlbersProjection,
) -> Vec<RegionCentroid> {
    records
        .iter()
        .filter(|record| record.shape_class == ShapeClass::Land)
        .filter_map(|record| {
            let centroid = record.geometry.centroid()?;
            let (lon, lat) = projection.inverse(centroid.x(), centroid.y());
            Some(RegionCentroid {
                state_id: record.state_id.clone(),
                latitude: round6(lat),
                longitude: round6(lon),
            })
        })
        .collect()
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
