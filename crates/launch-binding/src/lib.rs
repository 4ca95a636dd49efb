//! Launch Binding - reactive wiring between widgets and charts
//!
//! Two layers:
//! 1. [`BindingGraph`]: a declarative, inspectable edge list
//!    `inputs -> derivation -> chart`
//! 2. [`DashboardSession`]: one user's control state; turns each new snapshot
//!    into the set of derivations the graph says must rerun and publishes the
//!    results with latest-snapshot-wins ordering
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use launch_binding::{BindingGraph, DashboardSession, JitterOptions};
//!
//! let graph = Arc::new(BindingGraph::dashboard());
//! let session = DashboardSession::new(store.shared(), graph, JitterOptions::default());
//! let first = session.initial_render();
//! let next = session.apply(session.control_state().with_site("KSC LC-39A"))?;
//! ```

pub mod error;
pub mod graph;
pub mod session;

pub use error::BindingError;
pub use graph::{Binding, BindingGraph, BindingNode, ChartOutput, ControlInput, Derivation};
pub use session::{
    changed_inputs, ChartFrame, ChartUpdate, DashboardSession, JitterOptions, Recomputation,
};
