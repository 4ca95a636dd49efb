//! Per-session dispatch of control events through the binding graph
//!
//! Each incoming [`ControlState`] is validated, diffed against the previous
//! snapshot, stamped with a sequence number and handed whole to every
//! triggered derivation. Published frames only move forward: a result
//! computed from an older snapshot never replaces a newer one.

use crate::error::BindingError;
use crate::graph::{BindingGraph, ChartOutput, ControlInput, Derivation};
use launch_dataset::Dataset;
use launch_derive::{
    check_amplitude, derive_proportion, derive_scatter_with_amplitude, ControlState, ProportionDataset,
    ScatterDataset, UniformJitter, JITTER_AMPLITUDE,
};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

/// Jitter settings for a session's scatter derivations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterOptions {
    pub amplitude: f64,
    /// Base seed; each event draws from `seed + sequence` so redraws still differ
    pub seed: Option<u64>,
}

impl JitterOptions {
    /// Checked constructor
    ///
    /// # Errors
    /// [`BindingError::Derive`] wrapping `InvalidAmplitude` for a negative,
    /// NaN or infinite amplitude.
    pub fn new(amplitude: f64, seed: Option<u64>) -> Result<Self, BindingError> {
        Ok(Self {
            amplitude: check_amplitude(amplitude)?,
            seed,
        })
    }
}

impl Default for JitterOptions {
    fn default() -> Self {
        Self {
            amplitude: JITTER_AMPLITUDE,
            seed: None,
        }
    }
}

/// A chart's backing dataset and the snapshot it was derived from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame<T> {
    pub sequence: u64,
    pub state: ControlState,
    pub data: T,
}

/// A replaced chart dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "chart")]
pub enum ChartUpdate {
    #[serde(rename = "success-pie-chart")]
    Proportion(ChartFrame<ProportionDataset>),
    #[serde(rename = "success-payload-scatter-chart")]
    Scatter(ChartFrame<ScatterDataset>),
}

impl ChartUpdate {
    #[must_use]
    pub fn output(&self) -> ChartOutput {
        match self {
            ChartUpdate::Proportion(_) => ChartOutput::SuccessPie,
            ChartUpdate::Scatter(_) => ChartOutput::PayloadScatter,
        }
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        match self {
            ChartUpdate::Proportion(f) => f.sequence,
            ChartUpdate::Scatter(f) => f.sequence,
        }
    }
}

/// Outcome of one control event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recomputation {
    pub sequence: u64,
    pub changed: Vec<ControlInput>,
    /// Published updates, in derivation order
    pub updates: Vec<ChartUpdate>,
}

impl Recomputation {
    #[must_use]
    pub fn proportion(&self) -> Option<&ChartFrame<ProportionDataset>> {
        self.updates.iter().find_map(|u| match u {
            ChartUpdate::Proportion(f) => Some(f),
            ChartUpdate::Scatter(_) => None,
        })
    }

    #[must_use]
    pub fn scatter(&self) -> Option<&ChartFrame<ScatterDataset>> {
        self.updates.iter().find_map(|u| match u {
            ChartUpdate::Scatter(f) => Some(f),
            ChartUpdate::Proportion(_) => None,
        })
    }
}

/// Snapshot handed to derivations
#[derive(Debug, Clone)]
struct Dispatch {
    sequence: u64,
    state: ControlState,
    changed: Vec<ControlInput>,
    derivations: Vec<Derivation>,
}

#[derive(Debug)]
struct SessionState {
    control: ControlState,
    sequence: u64,
}

#[derive(Debug, Default)]
struct Frames {
    proportion: Option<ChartFrame<ProportionDataset>>,
    scatter: Option<ChartFrame<ScatterDataset>>,
}

/// One user's live dashboard
///
/// The dataset and graph are shared read-only across sessions. Control state
/// and published frames are private to the session.
#[derive(Debug)]
pub struct DashboardSession {
    dataset: Arc<Dataset>,
    graph: Arc<BindingGraph>,
    jitter: JitterOptions,
    state: Mutex<SessionState>,
    frames: Mutex<Frames>,
}

impl DashboardSession {
    /// New session at the widget defaults (all sites, full payload range)
    ///
    /// An unusable `jitter.amplitude` does not panic; every scatter frame is
    /// then empty. Use [`JitterOptions::new`] to reject it up front.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, graph: Arc<BindingGraph>, jitter: JitterOptions) -> Self {
        let control = ControlState::initial(&dataset);
        Self {
            dataset,
            graph,
            jitter,
            state: Mutex::new(SessionState {
                control,
                sequence: 0,
            }),
            frames: Mutex::new(Frames::default()),
        }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn graph(&self) -> &BindingGraph {
        &self.graph
    }

    /// Current control snapshot
    #[must_use]
    pub fn control_state(&self) -> ControlState {
        self.state.lock().control.clone()
    }

    /// Last published proportion frame
    #[must_use]
    pub fn proportion_frame(&self) -> Option<ChartFrame<ProportionDataset>> {
        self.frames.lock().proportion.clone()
    }

    /// Last published scatter frame
    #[must_use]
    pub fn scatter_frame(&self) -> Option<ChartFrame<ScatterDataset>> {
        self.frames.lock().scatter.clone()
    }

    /// Run every bound derivation against the current snapshot (page load)
    pub fn initial_render(&self) -> Recomputation {
        let dispatch = {
            let mut st = self.state.lock();
            st.sequence += 1;
            Dispatch {
                sequence: st.sequence,
                state: st.control.clone(),
                changed: ControlInput::ALL.to_vec(),
                derivations: self.graph.triggered_by(&ControlInput::ALL),
            }
        };
        tracing::info!(sequence = dispatch.sequence, "Initial render");
        self.run_sync(dispatch)
    }

    /// Apply a new control snapshot and recompute synchronously
    ///
    /// # Errors
    /// A [`BindingError`] for a caller contract violation (inverted or
    /// out-of-range interval). The session state is unchanged in that case.
    pub fn apply(&self, next: ControlState) -> Result<Recomputation, BindingError> {
        let dispatch = self.begin(next)?;
        Ok(self.run_sync(dispatch))
    }

    /// Apply a new control snapshot, running triggered derivations in parallel
    /// on the blocking pool
    ///
    /// # Errors
    /// Same as [`DashboardSession::apply`], plus [`BindingError::Worker`] if
    /// a derivation task panics. A worker failure is reported after the
    /// snapshot was committed: the session keeps the new control state, and
    /// results joined ahead of the failed one stay published.
    pub async fn apply_concurrent(
        self: &Arc<Self>,
        next: ControlState,
    ) -> Result<Recomputation, BindingError> {
        let dispatch = self.begin(next)?;

        let tasks = dispatch.derivations.iter().map(|derivation| {
            let session = Arc::clone(self);
            let derivation = *derivation;
            let state = dispatch.state.clone();
            let sequence = dispatch.sequence;
            tokio::task::spawn_blocking(move || session.run(derivation, sequence, state))
        });

        let mut updates = Vec::with_capacity(dispatch.derivations.len());
        for joined in futures::future::join_all(tasks).await {
            let update = joined.map_err(|e| BindingError::Worker(e.to_string()))?;
            if self.publish(update.clone()) {
                updates.push(update);
            }
        }

        Ok(Recomputation {
            sequence: dispatch.sequence,
            changed: dispatch.changed,
            updates,
        })
    }

    /// Validate, diff and stamp a snapshot; commits it as the current state
    fn begin(&self, next: ControlState) -> Result<Dispatch, BindingError> {
        self.validate(&next)?;

        let mut st = self.state.lock();
        let changed = changed_inputs(&st.control, &next);
        let derivations = self.graph.triggered_by(&changed);
        st.sequence += 1;
        st.control = next.clone();

        tracing::debug!(
            sequence = st.sequence,
            ?changed,
            ?derivations,
            "Control event"
        );
        Ok(Dispatch {
            sequence: st.sequence,
            state: next,
            changed,
            derivations,
        })
    }

    fn validate(&self, next: &ControlState) -> Result<(), BindingError> {
        let iv = next.payload_interval;
        if iv.is_inverted() {
            tracing::warn!("Rejected inverted payload interval {}", iv);
            return Err(launch_derive::DeriveError::InvalidInterval {
                low: iv.low,
                high: iv.high,
            }
            .into());
        }

        let bounds = self.dataset.payload_bounds();
        if !iv.within(bounds) {
            tracing::warn!("Rejected payload interval {} outside slider range", iv);
            return Err(BindingError::IntervalOutOfBounds {
                low: iv.low,
                high: iv.high,
                min: bounds.min,
                max: bounds.max,
            });
        }

        if let Err(e) = next.selected_site.validate(&self.dataset) {
            tracing::warn!("{}; charts will be empty", e);
        }
        Ok(())
    }

    fn run_sync(&self, dispatch: Dispatch) -> Recomputation {
        let mut updates = Vec::with_capacity(dispatch.derivations.len());
        for derivation in &dispatch.derivations {
            let update = self.run(*derivation, dispatch.sequence, dispatch.state.clone());
            if self.publish(update.clone()) {
                updates.push(update);
            }
        }

        Recomputation {
            sequence: dispatch.sequence,
            changed: dispatch.changed,
            updates,
        }
    }

    fn run(&self, derivation: Derivation, sequence: u64, state: ControlState) -> ChartUpdate {
        match derivation {
            Derivation::Proportion => {
                let data = derive_proportion(&self.dataset, &state.selected_site);
                ChartUpdate::Proportion(ChartFrame {
                    sequence,
                    state,
                    data,
                })
            }
            Derivation::Scatter => {
                let data = match self.jitter.seed {
                    Some(seed) => derive_scatter_with_amplitude(
                        &self.dataset,
                        &state.selected_site,
                        state.payload_interval,
                        self.jitter.amplitude,
                        &mut UniformJitter::seeded(seed.wrapping_add(sequence)),
                    ),
                    None => derive_scatter_with_amplitude(
                        &self.dataset,
                        &state.selected_site,
                        state.payload_interval,
                        self.jitter.amplitude,
                        &mut UniformJitter::new(),
                    ),
                };
                ChartUpdate::Scatter(ChartFrame {
                    sequence,
                    state,
                    data,
                })
            }
        }
    }

    /// Replace a chart's frame unless a newer snapshot already landed
    fn publish(&self, update: ChartUpdate) -> bool {
        let mut frames = self.frames.lock();
        let sequence = update.sequence();
        let current = match &update {
            ChartUpdate::Proportion(_) => frames.proportion.as_ref().map(|f| f.sequence),
            ChartUpdate::Scatter(_) => frames.scatter.as_ref().map(|f| f.sequence),
        };
        if current.is_some_and(|c| c >= sequence) {
            tracing::debug!(
                chart = %update.output(),
                sequence,
                "Discarded stale recomputation"
            );
            return false;
        }
        match update {
            ChartUpdate::Proportion(f) => frames.proportion = Some(f),
            ChartUpdate::Scatter(f) => frames.scatter = Some(f),
        }
        true
    }
}

/// Inputs whose values differ between two snapshots
#[must_use]
pub fn changed_inputs(prev: &ControlState, next: &ControlState) -> Vec<ControlInput> {
    let mut changed = Vec::new();
    if prev.selected_site != next.selected_site {
        changed.push(ControlInput::SiteSelector);
    }
    if prev.payload_interval != next.payload_interval {
        changed.push(ControlInput::PayloadSelector);
    }
    changed
}
