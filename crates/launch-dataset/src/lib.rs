//! Launch Dataset - the static table behind the dashboard
//!
//! Provides:
//! - [`LaunchRecord`] rows with a binary [`Outcome`]
//! - [`Dataset`], the validated immutable table with payload bounds and
//!   first-seen site ordering
//! - CSV loading ([`load`], [`load_from_reader`])
//! - [`DatasetStore`], the process-wide read-only handle installed once at startup
//!
//! # Example
//!
//! ```rust,ignore
//! use launch_dataset::DatasetStore;
//!
//! let store = DatasetStore::load("spacex_launch_dash.csv")?.install()?;
//! let bounds = store.payload_bounds();
//! println!("{} sites, payload {}..={}", store.sites().len(), bounds.min, bounds.max);
//! ```

pub mod dataset;
pub mod error;
pub mod loader;
pub mod record;
pub mod store;

pub use dataset::{Dataset, PayloadBounds};
pub use error::{DataLoadError, StoreError};
pub use loader::{load, load_from_reader, BOOSTER_COLUMN, OUTCOME_COLUMN, PAYLOAD_COLUMN, SITE_COLUMN};
pub use record::{LaunchRecord, Outcome};
pub use store::DatasetStore;

/// Selector value meaning "every launch site"
pub const ALL_SITES: &str = "ALL";
