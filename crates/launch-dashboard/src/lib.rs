//! Launch Dashboard - host layer over the dataset, derivations and bindings
//!
//! - [`DashboardConfig`]: TOML configuration
//! - [`Dashboard`]: startup (load, validate, wire) and per-user sessions
//! - [`presentation`]: widget definitions and chart view models
//! - [`telemetry`]: tracing subscriber setup

pub mod app;
pub mod config;
pub mod presentation;
pub mod telemetry;

pub use app::{Dashboard, DashboardError, DashboardManifest, ReplaySummary};
pub use config::{ConfigError, DashboardConfig};
pub use presentation::{
    payload_slider, pie_figure, render, render_update, scatter_figure, site_dropdown, Figure,
    PieFigure, RangeSlider, RenderedEvent, ScatterFigure, SiteDropdown,
};
