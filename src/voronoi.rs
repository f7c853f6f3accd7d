// src/voronoi.rs

//! Planar Voronoi tessellation over the coastline seeds, via the dual of a
//! Delaunay triangulation.
//!
//! Seeds on the perimeter of the point cloud have unbounded Voronoi regions.
//! Those are repaired into closed polygons by extending every infinite ridge
//! ray outward by twice the cloud's coordinate range and taking the convex
//! hull of the finite and extended vertices. The extension is deliberately
//! oversized: everything is clipped to the EEZ outline afterwards, so only
//! the bounded portion has to be exact.

use crate::error::{PartitionError, PartitionResult};
use crate::seeds::SeedPoint;
use geo::{Coord, ConvexHull, LineString, MultiPoint, Point, Polygon};
use spade::{DelaunayTriangulation, Point2, Triangulation};
use tracing::info;

/// A meaningful tessellation needs at least four non-collinear seeds.
pub const MIN_SEED_POINTS: usize = 4;

/// Computes one closed cell polygon per seed, index-aligned with the input.
///
/// Fails on fewer than [`MIN_SEED_POINTS`] seeds and on exactly collinear
/// seed sets, both of which would otherwise yield a degenerate tessellation.
pub fn build_cells(seeds: &[SeedPoint]) -> PartitionResult<Vec<Polygon<f64>>> {
    if seeds.len() < MIN_SEED_POINTS {
        return Err(PartitionError::InsufficientSeeds {
            expected: MIN_SEED_POINTS,
            actual: seeds.len(),
        });
    }

    let mut triangulation: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for seed in seeds {
        triangulation
            .insert(Point2::new(seed.x, seed.y))
            .map_err(|err| PartitionError::TriangulationFailed {
                reason: format!("{err:?}"),
            })?;
    }

    // Seeds are pre-deduplicated, so a merged vertex or a face-less
    // triangulation means the input was degenerate.
    if triangulation.num_vertices() != seeds.len() || triangulation.num_inner_faces() == 0 {
        return Err(PartitionError::DegenerateSeeds);
    }

    let center = cloud_center(seeds);
    let radius = cloud_range(seeds) * 2.0;

    let mut cells: Vec<Option<Polygon<f64>>> = vec![None; seeds.len()];
    for vertex in triangulation.vertices() {
        let index = vertex.fix().index();
        let generator = vertex.position();

        let unbounded = vertex.out_edges().any(|edge| edge.face().is_outer());
        let polygon = if unbounded {
            // Each out-edge's dual ridge runs between the circumcenters of
            // the edge's two adjacent triangles; an outer face marks an
            // infinite ridge endpoint to be replaced by an extended ray.
            let mut points: Vec<Point<f64>> = Vec::new();
            for edge in vertex.out_edges() {
                let neighbor = edge.to().position();
                let near = edge.face().as_inner().map(|face| face.circumcenter());
                let far = edge.rev().face().as_inner().map(|face| face.circumcenter());

                match (near, far) {
                    (Some(a), Some(b)) => {
                        points.push(Point::new(a.x, a.y));
                        points.push(Point::new(b.x, b.y));
                    }
                    (Some(finite), None) | (None, Some(finite)) => {
                        let extended = extend_ridge(generator, neighbor, finite, center, radius);
                        points.push(Point::new(finite.x, finite.y));
                        points.push(extended);
                    }
                    // Both faces outer only happens in degenerate
                    // triangulations, rejected above.
                    (None, None) => {}
                }
            }
            MultiPoint::from(points).convex_hull()
        } else {
            // All ridge endpoints are finite: the adjacent circumcenters,
            // ordered by angle around the generator, are the cell.
            let mut corners: Vec<Coord<f64>> = vertex
                .out_edges()
                .filter_map(|edge| edge.face().as_inner())
                .map(|face| {
                    let cc = face.circumcenter();
                    Coord { x: cc.x, y: cc.y }
                })
                .collect();
            sort_by_angle(&mut corners, generator);
            Polygon::new(LineString::from(corners), vec![])
        };

        cells[index] = Some(polygon);
    }

    info!(cells = cells.len(), "Tessellated seed points");
    cells
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| PartitionError::TriangulationFailed {
            reason: "Tessellation produced no cell for some seed".to_string(),
        })
}

/// Replaces an infinite ridge endpoint with a far point.
///
/// The ridge is the perpendicular bisector of the generator-neighbor
/// Delaunay edge. Of the two perpendicular directions, the one pointing
/// away from the cloud center is chosen by the sign of the dot product
/// between the edge midpoint minus center and the candidate normal.
fn extend_ridge(
    generator: Point2<f64>,
    neighbor: Point2<f64>,
    finite: Point2<f64>,
    center: Coord<f64>,
    radius: f64,
) -> Point<f64> {
    let dx = neighbor.x - generator.x;
    let dy = neighbor.y - generator.y;
    let length = (dx * dx + dy * dy).sqrt();
    let normal = Coord {
        x: -dy / length,
        y: dx / length,
    };
    let midpoint = Coord {
        x: (generator.x + neighbor.x) / 2.0,
        y: (generator.y + neighbor.y) / 2.0,
    };
    let outward = (midpoint.x - center.x) * normal.x + (midpoint.y - center.y) * normal.y;
    let sign = if outward >= 0.0 { 1.0 } else { -1.0 };

    Point::new(
        finite.x + sign * normal.x * radius,
        finite.y + sign * normal.y * radius,
    )
}

fn sort_by_angle(corners: &mut [Coord<f64>], generator: Point2<f64>) {
    corners.sort_by(|a, b| {
        let angle_a = (a.y - generator.y).atan2(a.x - generator.x);
        let angle_b = (b.y - generator.y).atan2(b.x - generator.x);
        angle_a
            .partial_cmp(&angle_b)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn cloud_center(seeds: &[SeedPoint]) -> Coord<f64> {
    let n = seeds.len() as f64;
    Coord {
        x: seeds.iter().map(|s| s.x).sum::<f64>() / n,
        y: seeds.iter().map(|s| s.y).sum::<f64>() / n,
    }
}

/// Largest per-axis coordinate spread of the seed cloud.
fn cloud_range(seeds: &[SeedPoint]) -> f64 {
    let mut min = Coord {
        x: f64::INFINITY,
        y: f64::INFINITY,
    };
    let mut max = Coord {
        x: f64::NEG_INFINITY,
        y: f64::NEG_INFINITY,
    };
    for seed in seeds {
        min.x = min.x.min(seed.x);
        min.y = min.y.min(seed.y);
        max.x = max.x.max(seed.x);
        max.y = max.y.max(seed.y);
    }
    (max.x - min.x).max(max.y - min.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Contains};

    fn seed(x: f64, y: f64) -> SeedPoint {
        SeedPoint { x, y, region: 0 }
    }

    #[test]
    fn too_few_seeds_are_rejected() {
        let seeds = vec![seed(0.0, 0.0), seed(1.0, 0.0), seed(0.0, 1.0)];
        assert!(matches!(
            build_cells(&seeds),
            Err(PartitionError::InsufficientSeeds { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn collinear_seeds_are_rejected() {
        let seeds = vec![
            seed(0.0, 0.0),
            seed(1.0, 1.0),
            seed(2.0, 2.0),
            seed(3.0, 3.0),
            seed(4.0, 4.0),
        ];
        assert!(matches!(
            build_cells(&seeds),
            Err(PartitionError::DegenerateSeeds)
        ));
    }

    #[test]
    fn every_seed_gets_a_cell() {
        let seeds = vec![
            seed(0.0, 0.0),
            seed(10.0, 0.0),
            seed(10.0, 10.0),
            seed(0.0, 10.0),
            seed(5.0, 5.0),
        ];
        let cells = build_cells(&seeds).unwrap();
        assert_eq!(cells.len(), 5);
        for cell in &cells {
            assert!(cell.unsigned_area() > 0.0);
            assert!(cell
                .exterior()
                .coords()
                .all(|c| c.x.is_finite() && c.y.is_finite()));
        }
    }

    #[test]
    fn interior_cell_contains_its_seed() {
        let seeds = vec![
            seed(0.0, 0.0),
            seed(10.0, 0.0),
            seed(10.0, 10.0),
            seed(0.0, 10.0),
            seed(5.0, 5.0),
        ];
        let cells = build_cells(&seeds).unwrap();
        assert!(cells[4].contains(&Point::new(5.0, 5.0)));
    }

    #[test]
    fn perimeter_cell_is_finite_and_convex() {
        // Four corners plus one clear perimeter point sticking out left.
        let seeds = vec![
            seed(0.0, 0.0),
            seed(10.0, 0.0),
            seed(10.0, 10.0),
            seed(0.0, 10.0),
            seed(-8.0, 5.0),
        ];
        let cells = build_cells(&seeds).unwrap();
        let perimeter = &cells[4];

        assert!(perimeter.unsigned_area() > 0.0);
        assert!(perimeter
            .exterior()
            .coords()
            .all(|c| c.x.is_finite() && c.y.is_finite()));
        // The repaired cell comes out of a convex hull, so re-hulling must
        // not change its area; that also rules out self-intersection.
        let rehulled = perimeter.convex_hull();
        assert!((rehulled.unsigned_area() - perimeter.unsigned_area()).abs() < 1e-9);
        // The seed itself lies inside its repaired cell.
        assert!(perimeter.contains(&Point::new(-8.0, 5.0)));
    }

    #[test]
    fn cells_partition_space_around_seeds() {
        // Each cell holds the locations nearest to its seed: probe points
        // on either side of the midline between two seeds.
        let seeds = vec![
            seed(0.0, 0.0),
            seed(10.0, 0.0),
            seed(10.0, 10.0),
            seed(0.0, 10.0),
        ];
        let cells = build_cells(&seeds).unwrap();
        assert!(cells[0].contains(&Point::new(2.0, 2.0)));
        assert!(!cells[0].contains(&Point::new(8.0, 8.0)));
        assert!(cells[2].contains(&Point::new(8.0, 8.0)));
    }
}
