//! Scatter chart derivation: payload mass vs. jittered outcome
//!
//! Records are filtered by payload interval and site first; jitter is drawn
//! once per surviving record afterwards. Filtering never looks at jitter.

use crate::control::{PayloadInterval, SiteSelection};
use crate::jitter::{check_amplitude, JitterSource, JITTER_AMPLITUDE};
use launch_dataset::{Dataset, Outcome};
use serde::Serialize;

/// One plotted launch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// X value, payload mass in kg
    pub payload_mass_kg: f64,
    /// `outcome + u`, `u` uniform in the jitter band
    pub jittered_outcome: f64,
    /// Unjittered outcome, kept for tooltips and checks
    pub outcome: Outcome,
    /// Color group
    pub booster_version_category: String,
    /// Hover label
    pub launch_site: String,
}

/// Data backing the scatter chart
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScatterDataset {
    points: Vec<ScatterPoint>,
}

impl ScatterDataset {
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn into_points(self) -> Vec<ScatterPoint> {
        self.points
    }
}

impl IntoIterator for ScatterDataset {
    type Item = ScatterPoint;
    type IntoIter = std::vec::IntoIter<ScatterPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScatterDataset {
    type Item = &'a ScatterPoint;
    type IntoIter = std::slice::Iter<'a, ScatterPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Derive the scatter chart's dataset with the default jitter band
#[must_use]
pub fn derive_scatter<J: JitterSource>(
    dataset: &Dataset,
    selected_site: &SiteSelection,
    payload_interval: PayloadInterval,
    jitter: &mut J,
) -> ScatterDataset {
    derive_scatter_with_amplitude(
        dataset,
        selected_site,
        payload_interval,
        JITTER_AMPLITUDE,
        jitter,
    )
}

/// Derive the scatter chart's dataset with an explicit jitter half-width
///
/// An inverted interval or an amplitude that is negative, NaN or infinite is
/// a caller bug; it is logged and yields an empty dataset instead of being
/// clamped into range.
#[must_use]
pub fn derive_scatter_with_amplitude<J: JitterSource>(
    dataset: &Dataset,
    selected_site: &SiteSelection,
    payload_interval: PayloadInterval,
    amplitude: f64,
    jitter: &mut J,
) -> ScatterDataset {
    if payload_interval.is_inverted() {
        tracing::warn!(
            "Inverted payload interval {}; returning empty scatter",
            payload_interval
        );
        return ScatterDataset::empty();
    }
    if let Err(e) = check_amplitude(amplitude) {
        tracing::warn!("{}; returning empty scatter", e);
        return ScatterDataset::empty();
    }

    let points: Vec<ScatterPoint> = dataset
        .records()
        .iter()
        .filter(|r| payload_interval.contains(r.payload_mass_kg))
        .filter(|r| selected_site.matches(r))
        .map(|r| ScatterPoint {
            payload_mass_kg: r.payload_mass_kg,
            jittered_outcome: r.outcome.as_f64() + jitter.next_offset(amplitude),
            outcome: r.outcome,
            booster_version_category: r.booster_version_category.clone(),
            launch_site: r.launch_site.clone(),
        })
        .collect();

    tracing::debug!(
        site = %selected_site,
        interval = %payload_interval,
        points = points.len(),
        "Derived scatter dataset"
    );
    ScatterDataset { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::{CyclingJitter, FixedJitter};
    use launch_dataset::LaunchRecord;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LaunchRecord::new("A", 0.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("B", 1000.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("A", 2000.0, Outcome::Failure, "FT"),
            LaunchRecord::new("B", 3000.0, Outcome::Success, "B4"),
        ])
        .unwrap()
    }

    #[test]
    fn interval_ends_are_inclusive() {
        let ds = dataset();
        let iv = PayloadInterval::new(1000.0, 2000.0).unwrap();
        let out = derive_scatter(&ds, &SiteSelection::All, iv, &mut FixedJitter(0.0));

        let payloads: Vec<f64> = out.points().iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(payloads, [1000.0, 2000.0]);
    }

    #[test]
    fn jitter_is_drawn_only_for_emitted_points() {
        let ds = dataset();
        let mut jitter = CyclingJitter::new(vec![0.01, 0.02, 0.03, 0.04]);
        let out = derive_scatter(
            &ds,
            &SiteSelection::site("B"),
            PayloadInterval::full(ds.payload_bounds()),
            &mut jitter,
        );

        assert_eq!(jitter.draws(), 2);
        assert_eq!(out.points()[0].jittered_outcome, 0.01);
        assert!((out.points()[1].jittered_outcome - 1.02).abs() < 1e-12);
    }

    #[test]
    fn inverted_interval_is_empty() {
        let ds = dataset();
        let iv = PayloadInterval::from([3000.0, 0.0]);
        let out = derive_scatter(&ds, &SiteSelection::All, iv, &mut FixedJitter(0.0));
        assert!(out.is_empty());
    }

    #[test]
    fn unusable_amplitude_is_empty_not_panic() {
        let ds = dataset();
        let iv = PayloadInterval::full(ds.payload_bounds());
        for amplitude in [f64::NAN, f64::INFINITY, -0.1] {
            let out = derive_scatter_with_amplitude(
                &ds,
                &SiteSelection::All,
                iv,
                amplitude,
                &mut FixedJitter(0.05),
            );
            assert!(out.is_empty());
        }
    }

    #[test]
    fn carries_booster_and_site() {
        let ds = dataset();
        let iv = PayloadInterval::new(3000.0, 3000.0).unwrap();
        let out = derive_scatter(&ds, &SiteSelection::All, iv, &mut FixedJitter(-0.1));

        let p = &out.points()[0];
        assert_eq!(p.booster_version_category, "B4");
        assert_eq!(p.launch_site, "B");
        assert_eq!(p.outcome, Outcome::Success);
        assert!((p.jittered_outcome - 0.9).abs() < 1e-12);
    }
}
