//! Process-wide read-only dataset handle

use crate::dataset::{Dataset, PayloadBounds};
use crate::error::{DataLoadError, StoreError};
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::Arc;

static GLOBAL: OnceCell<DatasetStore> = OnceCell::new();

/// Shared, immutable view of the launch table
///
/// Cloning is cheap (one `Arc` bump). The store exposes no mutation, so
/// concurrent sessions read it without locking.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    dataset: Arc<Dataset>,
}

impl DatasetStore {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }

    /// Load from a CSV file
    ///
    /// # Errors
    /// Propagates [`DataLoadError`] from the loader.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        crate::loader::load(path).map(Self::new)
    }

    /// Make this store the process-wide instance
    ///
    /// This is the single initialization point. There is no teardown.
    ///
    /// # Errors
    /// [`StoreError::AlreadyInstalled`] if a store was installed earlier.
    pub fn install(self) -> Result<&'static DatasetStore, StoreError> {
        GLOBAL.set(self).map_err(|_| StoreError::AlreadyInstalled)?;
        GLOBAL.get().ok_or(StoreError::AlreadyInstalled)
    }

    /// The installed process-wide store, if any
    #[must_use]
    pub fn global() -> Option<&'static DatasetStore> {
        GLOBAL.get()
    }

    #[inline]
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Shared handle for moving into worker tasks
    #[inline]
    #[must_use]
    pub fn shared(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    #[inline]
    #[must_use]
    pub fn sites(&self) -> &[String] {
        self.dataset.sites()
    }

    #[inline]
    #[must_use]
    pub fn payload_bounds(&self) -> PayloadBounds {
        self.dataset.payload_bounds()
    }
}

impl From<Dataset> for DatasetStore {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{LaunchRecord, Outcome};

    #[test]
    fn install_is_one_shot() {
        let ds = Dataset::from_records(vec![LaunchRecord::new("A", 1.0, Outcome::Success, "FT")])
            .unwrap();
        let store = DatasetStore::new(ds);

        let installed = store.clone().install().unwrap();
        assert_eq!(installed.sites(), ["A"]);
        assert!(DatasetStore::global().is_some());

        assert!(matches!(store.install(), Err(StoreError::AlreadyInstalled)));
    }

    #[test]
    fn clones_share_the_table() {
        let ds = Dataset::from_records(vec![LaunchRecord::new("A", 1.0, Outcome::Success, "FT")])
            .unwrap();
        let store = DatasetStore::new(ds);
        let other = store.clone();

        assert!(Arc::ptr_eq(&store.shared(), &other.shared()));
    }
}
