//! Testing utilities for the launch dashboard workspace
//!
//! Shared fixtures: small hand-checked tables, a multi-site table shaped like
//! the real launch data, and CSV text for loader tests.

#![allow(missing_docs)]

use launch_dataset::{Dataset, LaunchRecord, Outcome};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SITE_CCAFS_LC40: &str = "CCAFS LC-40";
pub const SITE_VAFB: &str = "VAFB SLC-4E";
pub const SITE_KSC: &str = "KSC LC-39A";
pub const SITE_CCAFS_SLC40: &str = "CCAFS SLC-40";

pub fn record(site: &str, payload_mass_kg: f64, success: bool, booster: &str) -> LaunchRecord {
    let outcome = if success {
        Outcome::Success
    } else {
        Outcome::Failure
    };
    LaunchRecord::new(site, payload_mass_kg, outcome, booster)
}

/// Three launches at "A", one at "B", outcomes `[1, 0, 1, 1]`
///
/// Success counts: A = 2, B = 1. Payloads span 0..=4000.
pub fn scenario_records() -> Vec<LaunchRecord> {
    vec![
        record("A", 0.0, true, "v1.0"),
        record("A", 1500.0, false, "v1.1"),
        record("A", 4000.0, true, "FT"),
        record("B", 2500.0, true, "FT"),
    ]
}

pub fn scenario_dataset() -> Dataset {
    Dataset::from_records(scenario_records()).unwrap()
}

/// Multi-site table with the shape of the real launch records
///
/// | site          | rows | successes |
/// |---------------|------|-----------|
/// | CCAFS LC-40   | 5    | 2         |
/// | VAFB SLC-4E   | 3    | 1         |
/// | KSC LC-39A    | 4    | 3         |
/// | CCAFS SLC-40  | 2    | 1         |
///
/// Payloads span 0..=9600.
pub fn launch_records() -> Vec<LaunchRecord> {
    vec![
        record(SITE_CCAFS_LC40, 0.0, false, "v1.0"),
        record(SITE_CCAFS_LC40, 525.0, false, "v1.0"),
        record(SITE_CCAFS_LC40, 677.0, true, "v1.0"),
        record(SITE_VAFB, 500.0, false, "v1.1"),
        record(SITE_CCAFS_LC40, 3170.0, false, "v1.1"),
        record(SITE_CCAFS_LC40, 2216.0, true, "FT"),
        record(SITE_VAFB, 9600.0, true, "FT"),
        record(SITE_KSC, 2490.0, true, "FT"),
        record(SITE_KSC, 5300.0, true, "FT"),
        record(SITE_KSC, 6070.0, false, "FT"),
        record(SITE_VAFB, 475.0, false, "B4"),
        record(SITE_KSC, 3600.0, true, "B4"),
        record(SITE_CCAFS_SLC40, 5384.0, true, "B5"),
        record(SITE_CCAFS_SLC40, 4311.0, false, "B4"),
    ]
}

pub fn launch_dataset() -> Dataset {
    Dataset::from_records(launch_records()).unwrap()
}

/// CSV text in the on-disk layout, including the columns the loader ignores
pub fn launch_csv() -> String {
    let mut out = String::from(
        "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n",
    );
    for (idx, r) in launch_records().iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},F9 B{:04},{}\n",
            idx + 1,
            r.launch_site,
            r.outcome.as_u8(),
            r.payload_mass_kg,
            1000 + idx,
            r.booster_version_category
        ));
    }
    out
}

/// Write `contents` to a CSV file inside a fresh temp dir
///
/// The returned `TempDir` must outlive the path.
pub fn write_csv(contents: &str) -> (TempDir, PathBuf) {
    write_temp("spacex_launch_dash.csv", contents)
}

/// Write `contents` to `name` inside a fresh temp dir
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}
