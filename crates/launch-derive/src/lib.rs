//! Launch Derive - chart-ready datasets from control state
//!
//! Every derivation is a pure function of the dataset and a control-state
//! snapshot. The only non-determinism is the scatter jitter, which is drawn
//! from an injected [`JitterSource`].
//!
//! # Example
//!
//! ```rust,ignore
//! use launch_derive::{derive_proportion, derive_scatter, ControlState, UniformJitter};
//!
//! let state = ControlState::initial(&dataset);
//! let pie = derive_proportion(&dataset, &state.selected_site);
//! let scatter = derive_scatter(
//!     &dataset,
//!     &state.selected_site,
//!     state.payload_interval,
//!     &mut UniformJitter::new(),
//! );
//! ```

pub mod control;
pub mod error;
pub mod jitter;
pub mod proportion;
pub mod scatter;

pub use control::{ControlState, PayloadInterval, SiteSelection};
pub use error::DeriveError;
pub use jitter::{check_amplitude, CyclingJitter, FixedJitter, JitterSource, UniformJitter, JITTER_AMPLITUDE};
pub use proportion::{derive_proportion, ProportionDataset, ProportionKind, ProportionSlice};
pub use scatter::{derive_scatter, derive_scatter_with_amplitude, ScatterDataset, ScatterPoint};
