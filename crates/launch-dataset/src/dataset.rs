//! The validated, immutable launch table

use crate::error::DataLoadError;
use crate::record::LaunchRecord;
use crate::ALL_SITES;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Global payload range over every record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// Inclusive containment
    #[inline]
    #[must_use]
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.min <= payload_mass_kg && payload_mass_kg <= self.max
    }

    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Immutable table of launch records
///
/// Construction validates every row, so all records carry a site, a finite
/// non-negative payload and a binary outcome. Site order and payload bounds
/// are computed once here and never change.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    sites: Vec<String>,
    bounds: PayloadBounds,
}

impl Dataset {
    /// Validate records and derive the site list and payload bounds
    ///
    /// # Errors
    /// - [`DataLoadError::Empty`] when `records` is empty
    /// - [`DataLoadError::MissingField`] when a site name is blank
    /// - [`DataLoadError::InvalidPayload`] when a payload is negative or not finite
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataLoadError> {
        if records.is_empty() {
            return Err(DataLoadError::Empty);
        }

        let mut sites = IndexSet::new();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;
            if record.launch_site.trim().is_empty() {
                return Err(DataLoadError::MissingField {
                    row,
                    column: crate::loader::SITE_COLUMN,
                });
            }
            let payload = record.payload_mass_kg;
            if !payload.is_finite() || payload < 0.0 {
                return Err(DataLoadError::InvalidPayload {
                    row,
                    value: payload,
                });
            }
            min = min.min(payload);
            max = max.max(payload);
            if !sites.contains(record.launch_site.as_str()) {
                sites.insert(record.launch_site.clone());
            }
        }

        Ok(Self {
            records,
            sites: sites.into_iter().collect(),
            bounds: PayloadBounds { min, max },
        })
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct site names in first-seen order
    #[inline]
    #[must_use]
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Site selector values: [`ALL_SITES`] followed by [`Dataset::sites`]
    #[must_use]
    pub fn selector_sites(&self) -> Vec<String> {
        std::iter::once(ALL_SITES.to_string())
            .chain(self.sites.iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn contains_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    #[inline]
    #[must_use]
    pub fn payload_bounds(&self) -> PayloadBounds {
        self.bounds
    }

    /// Number of records with a successful outcome
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }
}
