//! A single row of the launch table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary launch outcome (`class` column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Both outcomes in ascending numeric order
    pub const ALL: [Outcome; 2] = [Outcome::Failure, Outcome::Success];

    #[inline]
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.as_u8())
    }

    /// Two-valued category label ("0" / "1") used before render-time relabelling
    #[inline]
    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            Outcome::Failure => "0",
            Outcome::Success => "1",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Parse a numeric cell value; only exact 0 and 1 are accepted
    #[must_use]
    pub fn from_value(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }
}

impl From<Outcome> for u8 {
    fn from(value: Outcome) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Outcome::from_value(f64::from(value)).ok_or_else(|| format!("invalid outcome {value}"))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

/// One launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Launch site name
    pub launch_site: String,
    /// Payload mass in kg, never negative
    pub payload_mass_kg: f64,
    /// Mission outcome (`class` column)
    pub outcome: Outcome,
    /// Booster version category label
    pub booster_version_category: String,
}

impl LaunchRecord {
    #[must_use]
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_at(&self, site: &str) -> bool {
        self.launch_site == site
    }
}
