//! Property tests over arbitrary launch tables

use launch_dataset::{Dataset, LaunchRecord, Outcome};
use launch_derive::*;
use proptest::prelude::*;
use std::collections::HashSet;

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];
const BOOSTERS: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

fn arb_dataset() -> impl Strategy<Value = Dataset> {
    proptest::collection::vec(
        (0..SITES.len(), 0.0..10_000.0f64, any::<bool>(), 0..BOOSTERS.len()),
        1..60,
    )
    .prop_map(|rows| {
        let records = rows
            .into_iter()
            .map(|(site, payload, success, booster)| {
                let outcome = if success { Outcome::Success } else { Outcome::Failure };
                LaunchRecord::new(SITES[site], payload, outcome, BOOSTERS[booster])
            })
            .collect();
        Dataset::from_records(records).unwrap()
    })
}

fn arb_selection() -> impl Strategy<Value = SiteSelection> {
    prop_oneof![
        Just(SiteSelection::All),
        (0..SITES.len()).prop_map(|i| SiteSelection::site(SITES[i])),
    ]
}

fn arb_interval() -> impl Strategy<Value = PayloadInterval> {
    (0.0..10_000.0f64, 0.0..10_000.0f64)
        .prop_map(|(a, b)| PayloadInterval::new(a.min(b), a.max(b)).unwrap())
}

proptest! {
    #[test]
    fn prop_all_has_one_slice_per_site_summing_to_successes(ds in arb_dataset()) {
        let pie = derive_proportion(&ds, &SiteSelection::All);

        let labels: Vec<&str> = pie.slices().iter().map(|s| s.label.as_str()).collect();
        let sites: Vec<&str> = ds.sites().iter().map(String::as_str).collect();
        prop_assert_eq!(labels, sites);
        prop_assert_eq!(pie.total(), ds.success_count() as u64);
    }

    #[test]
    fn prop_single_site_counts_only_that_site(ds in arb_dataset(), idx in 0..SITES.len()) {
        let site = SITES[idx];
        let pie = derive_proportion(&ds, &SiteSelection::site(site));

        let at_site = ds.records().iter().filter(|r| r.launch_site == site).count() as u64;
        let successes = ds
            .records()
            .iter()
            .filter(|r| r.launch_site == site && r.outcome.is_success())
            .count() as u64;

        prop_assert_eq!(pie.total(), at_site);
        prop_assert_eq!(pie.count("1").unwrap_or(0), successes);
        prop_assert!(pie.len() <= 2);
        prop_assert!(pie.slices().iter().all(|s| s.count > 0));
    }

    #[test]
    fn prop_scatter_respects_interval_site_and_jitter_band(
        ds in arb_dataset(),
        sel in arb_selection(),
        iv in arb_interval(),
        seed in any::<u64>(),
    ) {
        let out = derive_scatter(&ds, &sel, iv, &mut UniformJitter::seeded(seed));

        for p in out.points() {
            prop_assert!(iv.low <= p.payload_mass_kg && p.payload_mass_kg <= iv.high);
            prop_assert!((p.jittered_outcome - p.outcome.as_f64()).abs() <= JITTER_AMPLITUDE);
            prop_assert!(matches!(p.outcome.as_u8(), 0 | 1));
            if let SiteSelection::Site(name) = &sel {
                prop_assert_eq!(&p.launch_site, name);
            }
        }

        let expected = ds
            .records()
            .iter()
            .filter(|r| iv.contains(r.payload_mass_kg) && sel.matches(r))
            .count();
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn prop_scatter_idempotent_modulo_jitter(
        ds in arb_dataset(),
        sel in arb_selection(),
        iv in arb_interval(),
    ) {
        let a = derive_scatter(&ds, &sel, iv, &mut UniformJitter::new());
        let b = derive_scatter(&ds, &sel, iv, &mut UniformJitter::new());

        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.points().iter().zip(b.points()) {
            prop_assert_eq!(x.payload_mass_kg, y.payload_mass_kg);
            prop_assert_eq!(&x.booster_version_category, &y.booster_version_category);
            prop_assert_eq!(&x.launch_site, &y.launch_site);
            prop_assert_eq!(x.outcome, y.outcome);
        }
    }

    #[test]
    fn prop_inverted_interval_is_always_empty(
        ds in arb_dataset(),
        sel in arb_selection(),
        a in 0.0..10_000.0f64,
        gap in 0.001..5_000.0f64,
    ) {
        let iv = PayloadInterval::from([a + gap, a]);
        prop_assert!(iv.is_inverted());
        prop_assert!(derive_scatter(&ds, &sel, iv, &mut FixedJitter(0.0)).is_empty());
    }

    #[test]
    fn prop_full_range_covers_distinct_sites(ds in arb_dataset()) {
        let iv = PayloadInterval::full(ds.payload_bounds());
        let out = derive_scatter(&ds, &SiteSelection::All, iv, &mut FixedJitter(0.0));

        prop_assert_eq!(out.len(), ds.len());
        let seen: HashSet<&str> = out.points().iter().map(|p| p.launch_site.as_str()).collect();
        prop_assert_eq!(seen.len(), ds.sites().len());
    }
}
