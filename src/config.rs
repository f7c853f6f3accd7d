// src/config.rs
use crate::error::{PartitionError, PartitionResult};
use crate::projection::AlbersProjection;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Configuration for one partition run: which country, which regions to
/// ignore, how names map to short codes, and the geometric constants that
/// drive seeding and tessellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Country code used for `country_id` and synthesized maritime shape ids.
    pub country_code: String,
    /// Region names removed from the input before anything else runs.
    pub drop_names: HashSet<String>,
    /// Full region name -> stable short code.
    pub abbreviations: HashMap<String, String>,
    /// Geographic -> planar projection used for all metric operations.
    pub projection: AlbersProjection,
    /// Expansion of the EEZ bounding envelope, in planar meters. Land
    /// polygons outside the expanded envelope contribute no seeds.
    pub coast_buffer: f64,
    /// Upper bound on seed points fed into the tessellation.
    pub seed_cap: usize,
}

impl PartitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into();
        self
    }

    pub fn with_drop_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_abbreviations<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.abbreviations = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_projection(mut self, projection: AlbersProjection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_coast_buffer(mut self, meters: f64) -> Self {
        self.coast_buffer = meters;
        self
    }

    pub fn with_seed_cap(mut self, cap: usize) -> Self {
        self.seed_cap = cap;
        self
    }

    pub fn validate(&self) -> PartitionResult<()> {
        if self.country_code.is_empty() {
            return Err(PartitionError::InvalidConfiguration {
                message: "Country code must not be empty".to_string(),
            });
        }

        if self.seed_cap < 4 {
            return Err(PartitionError::InvalidConfiguration {
                message: "Seed cap must be at least 4 (minimum for a tessellation)".to_string(),
            });
        }

        if !self.coast_buffer.is_finite() || self.coast_buffer < 0.0 {
            return Err(PartitionError::InvalidConfiguration {
                message: "Coast buffer must be a finite non-negative distance".to_string(),
            });
        }

        self.projection.validate()?;

        Ok(())
    }
}

impl Default for PartitionConfig {
    /// The setup this pipeline was built for: Australia's EEZ split among its
    /// states and mainland territories.
    fn default() -> Self {
        let abbreviations = [
            ("Australian Capital Territory", "ACT"),
            ("New South Wales", "NSW"),
            ("Northern Territory", "NT"),
            ("Queensland", "QLD"),
            ("South Australia", "SA"),
            ("Tasmania", "TAS"),
            ("Victoria", "VIC"),
            ("Western Australia", "WA"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let drop_names = [
            "Ashmore and Cartier Islands",
            "Coral Sea Islands Territory",
            "Jervis Bay Territory",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            country_code: "AUS".to_string(),
            drop_names,
            abbreviations,
            projection: AlbersProjection::australian_albers(),
            coast_buffer: 300_000.0,
            seed_cap: 3000,
        }
    }
}
