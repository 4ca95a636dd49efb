//! Dashboard host: startup, session creation and layout manifest

use crate::config::{ConfigError, DashboardConfig};
use crate::presentation::{
    payload_slider, pie_figure, render, scatter_figure, site_dropdown, PieFigure, RangeSlider,
    ScatterFigure, SiteDropdown,
};
use launch_binding::{Binding, BindingError, BindingGraph, DashboardSession};
use launch_dataset::{DataLoadError, DatasetStore, PayloadBounds, StoreError};
use launch_derive::{
    derive_proportion, derive_scatter_with_amplitude, ControlState, DeriveError, PayloadInterval,
    SiteSelection, UniformJitter,
};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Startup and host-level errors
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Launch table could not be loaded; the dashboard cannot start
    #[error("failed to load launch data: {0}")]
    Data(#[from] DataLoadError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    /// Rejected chart request (e.g. inverted payload interval)
    #[error(transparent)]
    Derive(#[from] DeriveError),

    /// Reading events or writing output failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Event line is not a control state
    #[error("line {line}: invalid control state: {source}")]
    Event {
        /// 1-based line in the event stream
        line: usize,
        /// JSON decoding error
        #[source]
        source: serde_json::Error,
    },

    /// Output could not be encoded
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Counts from one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Rendered events written, the initial render included
    pub frames: usize,
    /// Events accepted by the session
    pub applied: usize,
    /// Events rejected as caller violations
    pub rejected: usize,
}

/// Everything the layout needs to draw the page before the first event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardManifest {
    /// Launch count
    pub records: usize,
    /// Successful launch count
    pub successes: usize,
    /// Sites in first-seen order
    pub sites: Vec<String>,
    /// Global payload range
    pub payload_bounds: PayloadBounds,
    /// Site selector definition
    pub dropdown: SiteDropdown,
    /// Payload slider definition
    pub slider: RangeSlider,
    /// Declared input -> derivation -> chart edges
    pub bindings: Vec<Binding>,
}

/// A started dashboard: loaded data, validated graph, config
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    store: DatasetStore,
    graph: Arc<BindingGraph>,
}

impl Dashboard {
    /// Validate config, load the launch table and wire the standard graph
    ///
    /// # Errors
    /// Any config, load or graph validation failure. Load failures are
    /// fatal: there is no empty-dataset fallback.
    pub fn start(config: DashboardConfig) -> Result<Self, DashboardError> {
        config.validate()?;
        let store = DatasetStore::load(&config.data_path)?;
        Self::with_store(config, store)
    }

    /// Start over an already-loaded store
    ///
    /// # Errors
    /// Config or graph validation failure.
    pub fn with_store(config: DashboardConfig, store: DatasetStore) -> Result<Self, DashboardError> {
        config.validate()?;
        let graph = BindingGraph::dashboard();
        graph.validate()?;

        tracing::info!(
            records = store.dataset().len(),
            sites = store.sites().len(),
            bindings = graph.bindings().len(),
            "Dashboard started"
        );
        Ok(Self {
            config,
            store,
            graph: Arc::new(graph),
        })
    }

    /// Make this dashboard's store the process-wide one
    ///
    /// # Errors
    /// [`StoreError::AlreadyInstalled`] on a second call.
    pub fn install_global(&self) -> Result<&'static DatasetStore, DashboardError> {
        Ok(self.store.clone().install()?)
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    #[must_use]
    pub fn graph(&self) -> &BindingGraph {
        &self.graph
    }

    /// Fresh per-user session over the shared dataset and graph
    #[must_use]
    pub fn new_session(&self) -> Arc<DashboardSession> {
        Arc::new(DashboardSession::new(
            self.store.shared(),
            Arc::clone(&self.graph),
            self.config.jitter_options(),
        ))
    }

    /// Proportion chart for a site selection
    #[must_use]
    pub fn proportion_view(&self, site: &SiteSelection) -> PieFigure {
        pie_figure(site, &derive_proportion(self.store.dataset(), site))
    }

    /// Scatter chart for a site and payload range
    ///
    /// Missing endpoints default to the dataset's payload bounds. `seed`
    /// falls back to the configured jitter seed; with neither, jitter is
    /// drawn fresh.
    ///
    /// # Errors
    /// [`DashboardError::Derive`] for an inverted interval.
    pub fn scatter_view(
        &self,
        site: &SiteSelection,
        low: Option<f64>,
        high: Option<f64>,
        seed: Option<u64>,
    ) -> Result<ScatterFigure, DashboardError> {
        let dataset = self.store.dataset();
        let bounds = dataset.payload_bounds();
        let interval =
            PayloadInterval::new(low.unwrap_or(bounds.min), high.unwrap_or(bounds.max))?;
        let amplitude = self.config.jitter_amplitude;

        let data = match seed.or(self.config.jitter_seed) {
            Some(seed) => derive_scatter_with_amplitude(
                dataset,
                site,
                interval,
                amplitude,
                &mut UniformJitter::seeded(seed),
            ),
            None => derive_scatter_with_amplitude(
                dataset,
                site,
                interval,
                amplitude,
                &mut UniformJitter::new(),
            ),
        };
        Ok(scatter_figure(site, &data))
    }

    /// Feed JSON-lines control states through a fresh session
    ///
    /// Writes the initial render and then one rendered event per accepted
    /// line, each as a JSON line. Blank lines are skipped. Caller violations
    /// (inverted or out-of-range intervals) are logged and counted, not fatal.
    ///
    /// # Errors
    /// IO failures, an undecodable line, or a non-caller binding error.
    pub async fn replay<R: BufRead, W: Write>(
        &self,
        events: R,
        out: &mut W,
    ) -> Result<ReplaySummary, DashboardError> {
        let session = self.new_session();
        let mut summary = ReplaySummary::default();

        serde_json::to_writer(&mut *out, &render(&session.initial_render()))?;
        writeln!(out)?;
        summary.frames += 1;

        for (idx, line) in events.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let next: ControlState = serde_json::from_str(&line)
                .map_err(|source| DashboardError::Event { line: idx + 1, source })?;

            match session.apply_concurrent(next).await {
                Ok(r) => {
                    serde_json::to_writer(&mut *out, &render(&r))?;
                    writeln!(out)?;
                    summary.applied += 1;
                    summary.frames += 1;
                }
                Err(e) if e.is_caller_violation() => {
                    tracing::warn!(line = idx + 1, "Rejected event: {}", e);
                    summary.rejected += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            frames = summary.frames,
            applied = summary.applied,
            rejected = summary.rejected,
            "Replay finished"
        );
        Ok(summary)
    }

    #[must_use]
    pub fn manifest(&self) -> DashboardManifest {
        let dataset = self.store.dataset();
        DashboardManifest {
            records: dataset.len(),
            successes: dataset.success_count(),
            sites: dataset.sites().to_vec(),
            payload_bounds: dataset.payload_bounds(),
            dropdown: site_dropdown(dataset),
            slider: payload_slider(dataset, self.config.slider_step, self.config.slider_mark_count),
            bindings: self.graph.bindings(),
        }
    }
}
