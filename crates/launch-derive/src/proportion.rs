//! Proportion chart derivation
//!
//! - `ALL`: successes per site, one slice per site in first-seen order,
//!   zero-success sites included.
//! - one site: record count per outcome present at that site, labelled with
//!   the raw category ("0" / "1"), failure first.

use crate::control::SiteSelection;
use indexmap::IndexMap;
use launch_dataset::{Dataset, Outcome};
use serde::Serialize;

/// Which grouping produced a [`ProportionDataset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProportionKind {
    /// Slice per site, valued by success count
    SuccessesBySite,
    /// Slice per outcome category for one site
    OutcomesForSite,
}

/// One pie slice before render-time labelling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProportionSlice {
    pub label: String,
    pub count: u64,
}

/// Data backing the proportion chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProportionDataset {
    kind: ProportionKind,
    slices: Vec<ProportionSlice>,
}

impl ProportionDataset {
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ProportionKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn slices(&self) -> &[ProportionSlice] {
        &self.slices
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Sum over every slice
    #[must_use]
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.count).sum()
    }

    /// Count for a slice label
    #[must_use]
    pub fn count(&self, label: &str) -> Option<u64> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.count)
    }

    /// Fraction of the total held by `label`; `None` when absent or the total is zero
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn share(&self, label: &str) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.count(label).map(|c| c as f64 / total as f64)
    }
}

/// Derive the proportion chart's dataset for `selected_site`
///
/// An unknown site yields an empty dataset.
#[must_use]
pub fn derive_proportion(dataset: &Dataset, selected_site: &SiteSelection) -> ProportionDataset {
    match selected_site {
        SiteSelection::All => successes_by_site(dataset),
        SiteSelection::Site(site) => outcomes_for_site(dataset, site),
    }
}

fn successes_by_site(dataset: &Dataset) -> ProportionDataset {
    let mut per_site: IndexMap<&str, u64> = IndexMap::new();
    for record in dataset.records() {
        *per_site.entry(record.launch_site.as_str()).or_insert(0) +=
            u64::from(record.outcome.as_u8());
    }

    ProportionDataset {
        kind: ProportionKind::SuccessesBySite,
        slices: per_site
            .into_iter()
            .map(|(site, count)| ProportionSlice {
                label: site.to_string(),
                count,
            })
            .collect(),
    }
}

fn outcomes_for_site(dataset: &Dataset, site: &str) -> ProportionDataset {
    let mut counts = [0u64; 2];
    for record in dataset.records().iter().filter(|r| r.is_at(site)) {
        counts[usize::from(record.outcome.as_u8())] += 1;
    }

    if counts == [0, 0] {
        tracing::warn!(site, "No launch records for selected site");
    }

    ProportionDataset {
        kind: ProportionKind::OutcomesForSite,
        slices: Outcome::ALL
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(outcome, count)| ProportionSlice {
                label: outcome.category().to_string(),
                count,
            })
            .collect(),
    }
}
