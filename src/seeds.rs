// src/seeds.rs

//! Coastline seed extraction: every exterior vertex of a land polygon near
//! the EEZ becomes a tessellation seed, labeled with the region it belongs
//! to. Deduplication and a fixed-stride cap keep the seed count tractable
//! without giving up determinism.

use crate::config::PartitionConfig;
use crate::dataset::LandShape;
use crate::error::{PartitionError, PartitionResult};
use geo::{BoundingRect, Coord, Intersects, MultiPolygon, Rect};
use std::collections::HashSet;
use tracing::{debug, info};

/// A planar tessellation seed. `region` indexes into the land shape slice
/// the seed was extracted from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedPoint {
    pub x: f64,
    pub y: f64,
    pub region: usize,
}

/// Extracts coastline seed points from land shapes adjacent to the EEZ.
///
/// Adjacency means intersecting the EEZ bounding envelope expanded by
/// `coast_buffer` on every side; land wholly outside that envelope
/// contributes nothing and ends up with no maritime allocation. Duplicate
/// coordinates keep their first occurrence. If the distinct count exceeds
/// `seed_cap`, every `ceil(count / cap)`-th seed is kept, which preserves
/// spatial coverage and reproducibility better than random sampling would.
pub fn extract_seeds(
    land: &[LandShape],
    eez_outline: &MultiPolygon<f64>,
    config: &PartitionConfig,
) -> PartitionResult<Vec<SeedPoint>> {
    let envelope = eez_outline
        .bounding_rect()
        .map(|rect| expand_rect(rect, config.coast_buffer))
        .ok_or(PartitionError::NoSeedPoints)?
        .to_polygon();

    let mut seeds = Vec::new();
    for (region, shape) in land.iter().enumerate() {
        if !shape.geometry.intersects(&envelope) {
            debug!(region = %shape.name, "Land shape outside buffered EEZ envelope, no seeds");
            continue;
        }
        for part in &shape.geometry.0 {
            for coord in part.exterior().coords() {
                seeds.push(SeedPoint {
                    x: coord.x,
                    y: coord.y,
                    region,
                });
            }
        }
    }

    if seeds.is_empty() {
        return Err(PartitionError::NoSeedPoints);
    }

    let deduplicated = deduplicate(seeds);
    let capped = apply_cap(deduplicated, config.seed_cap);
    info!(seeds = capped.len(), "Extracted coastline seed points");
    Ok(capped)
}

fn expand_rect(rect: Rect<f64>, buffer: f64) -> Rect<f64> {
    Rect::new(
        Coord {
            x: rect.min().x - buffer,
            y: rect.min().y - buffer,
        },
        Coord {
            x: rect.max().x + buffer,
            y: rect.max().y + buffer,
        },
    )
}

/// Exact-coordinate deduplication, first occurrence wins. Comparison is on
/// the f64 bit patterns, so -0.0 and 0.0 count as distinct; coastline data
/// never hits that case in practice.
fn deduplicate(seeds: Vec<SeedPoint>) -> Vec<SeedPoint> {
    let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(seeds.len());
    seeds
        .into_iter()
        .filter(|seed| seen.insert((seed.x.to_bits(), seed.y.to_bits())))
        .collect()
}

/// Uniform stride subsampling for counts above the cap. The stride is
/// `ceil(count / cap)`, so the result can undershoot the cap but never
/// exceeds it.
fn apply_cap(seeds: Vec<SeedPoint>, cap: usize) -> Vec<SeedPoint> {
    if seeds.len() <= cap {
        return seeds;
    }
    let stride = seeds.len().div_ceil(cap);
    seeds.into_iter().step_by(stride).collect()
}
