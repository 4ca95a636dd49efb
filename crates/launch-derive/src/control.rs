//! Control state: the live values of the site selector and payload slider
//!
//! A [`ControlState`] is an immutable snapshot. Every user interaction
//! produces a new one; derivations only ever borrow it.

use crate::error::DeriveError;
use launch_dataset::{Dataset, LaunchRecord, PayloadBounds, ALL_SITES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Site selector value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteSelection {
    /// Every site (`"ALL"`)
    #[default]
    All,
    /// One named site
    Site(String),
}

impl SiteSelection {
    #[must_use]
    pub fn site(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    #[inline]
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Selector value as shown to the widget layer
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(name) => name,
        }
    }

    /// Whether `record` passes this selection's site filter
    #[inline]
    #[must_use]
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            Self::All => true,
            Self::Site(name) => record.is_at(name),
        }
    }

    /// Check that a named site exists in `dataset`
    ///
    /// # Errors
    /// [`DeriveError::UnknownSite`] for a site the table never mentions.
    pub fn validate(&self, dataset: &Dataset) -> Result<(), DeriveError> {
        match self {
            Self::All => Ok(()),
            Self::Site(name) if dataset.contains_site(name) => Ok(()),
            Self::Site(name) => Err(DeriveError::UnknownSite(name.clone())),
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value)
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<SiteSelection> for String {
    fn from(value: SiteSelection) -> Self {
        match value {
            SiteSelection::All => ALL_SITES.to_string(),
            SiteSelection::Site(name) => name,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed payload interval `[low, high]` in kilograms
///
/// Serialized as a two-element array, matching the range slider's value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PayloadInterval {
    pub low: f64,
    pub high: f64,
}

impl PayloadInterval {
    /// Checked constructor
    ///
    /// # Errors
    /// [`DeriveError::InvalidInterval`] when `low > high` or either end is NaN.
    pub fn new(low: f64, high: f64) -> Result<Self, DeriveError> {
        let interval = Self { low, high };
        if interval.is_inverted() {
            return Err(DeriveError::InvalidInterval { low, high });
        }
        Ok(interval)
    }

    /// The whole slider range
    #[must_use]
    pub fn full(bounds: PayloadBounds) -> Self {
        Self {
            low: bounds.min,
            high: bounds.max,
        }
    }

    /// True when no payload can satisfy the interval (includes NaN ends)
    #[inline]
    #[must_use]
    pub fn is_inverted(&self) -> bool {
        !(self.low <= self.high)
    }

    /// Inclusive at both ends
    #[inline]
    #[must_use]
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    /// Whether the interval lies inside the dataset's payload bounds
    #[inline]
    #[must_use]
    pub fn within(&self, bounds: PayloadBounds) -> bool {
        bounds.min <= self.low && self.high <= bounds.max
    }
}

impl From<[f64; 2]> for PayloadInterval {
    fn from([low, high]: [f64; 2]) -> Self {
        Self { low, high }
    }
}

impl From<PayloadInterval> for [f64; 2] {
    fn from(value: PayloadInterval) -> Self {
        [value.low, value.high]
    }
}

impl fmt::Display for PayloadInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

/// Atomic snapshot of both widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    #[serde(rename = "site")]
    pub selected_site: SiteSelection,
    #[serde(rename = "payload")]
    pub payload_interval: PayloadInterval,
}

impl ControlState {
    #[must_use]
    pub fn new(selected_site: impl Into<SiteSelection>, payload_interval: PayloadInterval) -> Self {
        Self {
            selected_site: selected_site.into(),
            payload_interval,
        }
    }

    /// Widget defaults on page load: all sites, full payload range
    #[must_use]
    pub fn initial(dataset: &Dataset) -> Self {
        Self {
            selected_site: SiteSelection::All,
            payload_interval: PayloadInterval::full(dataset.payload_bounds()),
        }
    }

    #[must_use]
    pub fn with_site(mut self, site: impl Into<SiteSelection>) -> Self {
        self.selected_site = site.into();
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: PayloadInterval) -> Self {
        self.payload_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_literal_maps_to_all() {
        assert_eq!(SiteSelection::from("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        assert_eq!(SiteSelection::All.to_string(), "ALL");
    }

    #[test]
    fn interval_rejects_inversion_and_nan() {
        assert!(PayloadInterval::new(10.0, 5.0).is_err());
        assert!(PayloadInterval::new(f64::NAN, 5.0).is_err());
        assert!(PayloadInterval::new(5.0, 5.0).is_ok());
    }

    #[test]
    fn interval_is_inclusive() {
        let iv = PayloadInterval::new(1000.0, 2000.0).unwrap();
        assert!(iv.contains(1000.0));
        assert!(iv.contains(2000.0));
        assert!(!iv.contains(2000.5));
    }

    #[test]
    fn interval_within_bounds() {
        let bounds = PayloadBounds { min: 0.0, max: 9600.0 };
        assert!(PayloadInterval::full(bounds).within(bounds));
        assert!(!PayloadInterval::from([-1.0, 100.0]).within(bounds));
        assert!(!PayloadInterval::from([0.0, 10_000.0]).within(bounds));
    }
}
