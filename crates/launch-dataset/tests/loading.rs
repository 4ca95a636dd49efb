//! Loader and store tests against on-disk fixtures

use launch_dataset::{load, DataLoadError, DatasetStore, Outcome, PayloadBounds};
use launch_test_utils::{launch_csv, write_csv, SITE_CCAFS_LC40, SITE_CCAFS_SLC40, SITE_KSC, SITE_VAFB};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn loads_fixture_file() {
    let (_dir, path) = write_csv(&launch_csv());
    let ds = load(&path).unwrap();

    assert_eq!(ds.len(), 14);
    assert_eq!(
        ds.sites(),
        [SITE_CCAFS_LC40, SITE_VAFB, SITE_KSC, SITE_CCAFS_SLC40]
    );
    assert_eq!(ds.payload_bounds(), PayloadBounds { min: 0.0, max: 9600.0 });
    assert_eq!(ds.success_count(), 7);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("nope.csv")).unwrap_err();

    assert!(matches!(err, DataLoadError::Io { .. }));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn ragged_row_is_malformed() {
    let csv = "Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,100,FT\nB,0\n";
    let (_dir, path) = write_csv(csv);

    let err = load(&path).unwrap_err();
    assert!(matches!(err, DataLoadError::Malformed { row: 2, .. }));
}

#[test]
fn store_exposes_sites_and_bounds() {
    let (_dir, path) = write_csv(&launch_csv());
    let store = DatasetStore::load(&path).unwrap();

    assert_eq!(store.sites().len(), 4);
    assert_eq!(store.payload_bounds().max, 9600.0);
    assert_eq!(store.dataset().records()[2].outcome, Outcome::Success);
}

proptest! {
    #[test]
    fn prop_bounds_cover_every_payload(
        rows in proptest::collection::vec((0..5usize, 0.0..20_000.0f64, any::<bool>()), 1..40)
    ) {
        let mut csv = String::from("Launch Site,Payload Mass (kg),class,Booster Version Category\n");
        for (site, payload, success) in &rows {
            csv.push_str(&format!("S{site},{payload},{},FT\n", u8::from(*success)));
        }

        let ds = launch_dataset::load_from_reader(csv.as_bytes()).unwrap();
        let bounds = ds.payload_bounds();

        prop_assert_eq!(ds.len(), rows.len());
        prop_assert!(ds.records().iter().all(|r| bounds.contains(r.payload_mass_kg)));
        prop_assert!(ds.records().iter().any(|r| r.payload_mass_kg == bounds.min));
        prop_assert!(ds.records().iter().any(|r| r.payload_mass_kg == bounds.max));

        let mut seen = Vec::new();
        for (site, _, _) in &rows {
            let name = format!("S{site}");
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        prop_assert_eq!(ds.sites(), seen.as_slice());
    }
}
