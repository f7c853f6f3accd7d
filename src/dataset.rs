// src/dataset.rs

//! Input/output record types and the loader/classifier stage: drop-list
//! filtering, reprojection, land/EEZ separation and short-code assignment.

use crate::config::PartitionConfig;
use crate::error::{PartitionError, PartitionResult};
use geo::{unary_union, MultiPolygon};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Classification of an output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeClass {
    Land,
    Maritime,
}

impl ShapeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeClass::Land => "land",
            ShapeClass::Maritime => "maritime",
        }
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw input shape, geometry in geographic (lon/lat degree) coordinates.
#[derive(Debug, Clone)]
pub struct ShapeRecord {
    pub shape_id: String,
    pub country_id: String,
    pub parent_name: String,
    pub parent_subtype: String,
    pub shape_class: String,
    pub geometry: MultiPolygon<f64>,
}

/// One output shape, geometry in planar coordinates.
#[derive(Debug, Clone)]
pub struct ZoneRecord {
    pub shape_id: String,
    pub country_id: String,
    pub state_id: String,
    pub state_name: String,
    pub shape_class: ShapeClass,
    pub geometry: MultiPolygon<f64>,
}

/// A land shape after classification: reprojected, with its short code and
/// the numeric fragment of its shape id (reused later to key the matching
/// maritime shape).
#[derive(Debug, Clone)]
pub struct LandShape {
    pub shape_id: String,
    pub country_id: String,
    pub name: String,
    pub state_id: String,
    pub numeric_fragment: String,
    pub geometry: MultiPolygon<f64>,
}

impl LandShape {
    pub fn into_zone_record(self) -> ZoneRecord {
        ZoneRecord {
            shape_id: self.shape_id,
            country_id: self.country_id,
            state_id: self.state_id,
            state_name: self.name,
            shape_class: ShapeClass::Land,
            geometry: self.geometry,
        }
    }
}

/// Classifier output: the land subset and the unioned EEZ outline, both
/// already planar.
#[derive(Debug, Clone)]
pub struct ClassifiedShapes {
    pub land: Vec<LandShape>,
    pub eez_outline: MultiPolygon<f64>,
}

/// Derives a short code from a region name: uppercased initials of each
/// whitespace-separated word, truncated to 3 characters.
///
/// This is a pure fallback for names missing from the configured lookup
/// table. Two distinct names can collide ("North East Land" and "New England
/// Lowlands" both give "NEL"); collisions are accepted silently, a known
/// limitation inherited from the upstream data contract.
pub fn derive_short_code(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(3)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Resolves a region name to its short code: explicit table first, derived
/// initials otherwise.
pub fn short_code(name: &str, config: &PartitionConfig) -> String {
    config
        .abbreviations
        .get(name)
        .cloned()
        .unwrap_or_else(|| derive_short_code(name))
}

/// The second dot-separated component of a shape id, e.g. `"5_1"` out of
/// `"AUS.5_1"`. This fragment keys the land/maritime record pairing.
fn numeric_fragment(shape_id: &str) -> PartitionResult<String> {
    shape_id
        .split('.')
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| PartitionError::MalformedShapeId {
            shape_id: shape_id.to_string(),
        })
}

/// Splits the input into land shapes and the EEZ outline.
///
/// Drops configured region names, reprojects everything to planar
/// coordinates, then separates `shape_class == "land"` rows from rows whose
/// `parent_subtype` contains `"eez"` (case-insensitive). Whatever matches
/// neither is discarded. Missing EEZ rows are fatal: the algorithm has no
/// fallback definition of the maritime boundary.
pub fn classify(
    records: Vec<ShapeRecord>,
    config: &PartitionConfig,
) -> PartitionResult<ClassifiedShapes> {
    let kept: Vec<ShapeRecord> = records
        .into_iter()
        .filter(|record| !config.drop_names.contains(&record.parent_name))
        .collect();

    let mut land = Vec::new();
    let mut eez_parts: Vec<MultiPolygon<f64>> = Vec::new();

    for record in &kept {
        let planar = config.projection.project(&record.geometry);

        if record.parent_subtype.to_lowercase().contains("eez") {
            eez_parts.push(planar);
            continue;
        }

        if record.shape_class == "land" {
            land.push(LandShape {
                shape_id: record.shape_id.clone(),
                country_id: record.country_id.clone(),
                name: record.parent_name.clone(),
                state_id: short_code(&record.parent_name, config),
                numeric_fragment: numeric_fragment(&record.shape_id)?,
                geometry: planar,
            });
        } else {
            debug!(
                shape_id = %record.shape_id,
                shape_class = %record.shape_class,
                "Dropping unclassified record"
            );
        }
    }

    if eez_parts.is_empty() {
        return Err(PartitionError::MissingEez);
    }

    let eez_outline = unary_union(eez_parts.iter());

    Ok(ClassifiedShapes { land, eez_outline })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square(lon: f64, lat: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: lon, y: lat),
            (x: lon + size, y: lat),
            (x: lon + size, y: lat + size),
            (x: lon, y: lat + size),
            (x: lon, y: lat),
        ]])
    }

    fn record(shape_id: &str, name: &str, subtype: &str, class: &str) -> ShapeRecord {
        ShapeRecord {
            shape_id: shape_id.to_string(),
            country_id: "AUS".to_string(),
            parent_name: name.to_string(),
            parent_subtype: subtype.to_string(),
            shape_class: class.to_string(),
            geometry: square(130.0, -25.0, 1.0),
        }
    }

    #[test]
    fn short_code_prefers_lookup_table() {
        let config = PartitionConfig::default();
        assert_eq!(short_code("Queensland", &config), "QLD");
        assert_eq!(short_code("Western Australia", &config), "WA");
    }

    #[test]
    fn short_code_falls_back_to_initials() {
        let config = PartitionConfig::default();
        assert_eq!(short_code("Lord Howe Island", &config), "LHI");
        // Truncated to three characters.
        assert_eq!(short_code("A Very Long Region Name", &config), "AVL");
        assert_eq!(derive_short_code("macquarie island"), "MI");
    }

    #[test]
    fn classify_splits_land_and_eez() {
        let config = PartitionConfig::default();
        let shapes = classify(
            vec![
                record("AUS.1_1", "Queensland", "state", "land"),
                record("AUS.2_1", "Tasmania", "state", "land"),
                record("AUS_eez.0_1", "Australia", "country_eez", "maritime"),
                record("AUS.9_1", "Some Reef", "reef", "rock"),
            ],
            &config,
        )
        .unwrap();

        assert_eq!(shapes.land.len(), 2);
        assert_eq!(shapes.land[0].state_id, "QLD");
        assert_eq!(shapes.land[0].numeric_fragment, "1_1");
        assert!(!shapes.eez_outline.0.is_empty());
    }

    #[test]
    fn classify_without_eez_is_fatal() {
        let config = PartitionConfig::default();
        let result = classify(vec![record("AUS.1_1", "Queensland", "state", "land")], &config);
        assert!(matches!(result, Err(PartitionError::MissingEez)));
    }

    #[test]
    fn classify_honors_drop_list() {
        let config = PartitionConfig::default();
        let shapes = classify(
            vec![
                record("AUS.3_1", "Jervis Bay Territory", "state", "land"),
                record("AUS.1_1", "Queensland", "state", "land"),
                record("AUS_eez.0_1", "Australia", "country_EEZ", "maritime"),
            ],
            &config,
        )
        .unwrap();

        assert_eq!(shapes.land.len(), 1);
        assert_eq!(shapes.land[0].name, "Queensland");
    }

    #[test]
    fn malformed_shape_id_is_fatal() {
        let config = PartitionConfig::default();
        let result = classify(
            vec![
                record("no-dot-here", "Queensland", "state", "land"),
                record("AUS_eez.0_1", "Australia", "eez", "maritime"),
            ],
            &config,
        );
        assert!(matches!(
            result,
            Err(PartitionError::MalformedShapeId { .. })
        ));
    }
}
