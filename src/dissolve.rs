// src/dissolve.rs

//! Final allocation stage: clip every repaired Voronoi cell to the EEZ
//! outline, group the surviving fragments per region and dissolve each group
//! into one maritime record keyed back to its land record.

use crate::config::PartitionConfig;
use crate::dataset::{LandShape, ShapeClass, ZoneRecord};
use crate::seeds::SeedPoint;
use geo::{unary_union, BooleanOps, MultiPolygon, Polygon};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Clips cells to the EEZ outline and dissolves them into one maritime
/// record per region.
///
/// Cells clipped to nothing are dropped silently; a region whose cells all
/// land outside the EEZ is simply absent from the result. Regions are
/// processed in name order so the output is deterministic.
pub fn dissolve_cells(
    cells: &[Polygon<f64>],
    seeds: &[SeedPoint],
    land: &[LandShape],
    eez_outline: &MultiPolygon<f64>,
    config: &PartitionConfig,
) -> Vec<ZoneRecord> {
    let mut fragments: BTreeMap<&str, Vec<Polygon<f64>>> = BTreeMap::new();

    for (cell, seed) in cells.iter().zip(seeds) {
        let clipped = cell.intersection(eez_outline);
        if clipped.0.is_empty() {
            continue;
        }
        fragments
            .entry(land[seed.region].name.as_str())
            .or_default()
            .extend(clipped.0);
    }

    let mut records = Vec::with_capacity(fragments.len());
    for (region, parts) in fragments {
        let Some(shape) = land.iter().find(|s| s.name == region) else {
            // Seeds always originate from land shapes; an unmatched label
            // would mean the inputs were mutated mid-run.
            debug!(region, "No land shape for dissolved region, skipping");
            continue;
        };

        let dissolved = unary_union(parts.iter());
        records.push(ZoneRecord {
            shape_id: format!(
                "{}_marineregions.{}_1",
                config.country_code, shape.numeric_fragment
            ),
            country_id: config.country_code.clone(),
            state_id: shape.state_id.clone(),
            state_name: shape.name.clone(),
            shape_class: ShapeClass::Maritime,
            geometry: dissolved,
        });
    }

    info!(regions = records.len(), "Dissolved maritime allocations");
    records
}
