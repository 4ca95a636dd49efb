//! Renderer-facing view models
//!
//! Derived datasets carry raw categories ("0"/"1") and plain numbers. This
//! module adds what the widget and charting layers display: selector
//! options, slider marks, chart titles, and the `0 -> Failure`,
//! `1 -> Success` relabelling on the pie slices and the scatter y axis.
//!
//! Scatter field bindings (`x`, `y`, `color`, `hover_data`) name keys of the
//! serialized [`ScatterPoint`]; display names live in `labels`.

use launch_binding::{ChartOutput, ChartUpdate, ControlInput, Recomputation};
use launch_dataset::{Dataset, Outcome, ALL_SITES};
use launch_derive::{ProportionDataset, ProportionKind, ScatterDataset, ScatterPoint, SiteSelection};
use serde::Serialize;
use std::collections::BTreeMap;

pub const ALL_SITES_LABEL: &str = "All Sites";
pub const SITE_PLACEHOLDER: &str = "Select a Launch Site here";
pub const OUTCOME_AXIS_TITLE: &str = "Launch Outcome";
pub const PAYLOAD_AXIS_TITLE: &str = "Payload Mass (kg)";

/// Point key plotted on the x axis
pub const X_FIELD: &str = "payload_mass_kg";
/// Point key plotted on the y axis
pub const Y_FIELD: &str = "jittered_outcome";
/// Point key that groups colors
pub const COLOR_FIELD: &str = "booster_version_category";
/// Point key shown on hover
pub const HOVER_FIELD: &str = "launch_site";

/// Display name for each bound point key
#[must_use]
pub fn field_labels() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (X_FIELD, PAYLOAD_AXIS_TITLE),
        (Y_FIELD, OUTCOME_AXIS_TITLE),
        (COLOR_FIELD, "Booster Version Category"),
        (HOVER_FIELD, "Launch Site"),
    ])
}

/// Human label for an outcome
#[inline]
#[must_use]
pub fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Failure => "Failure",
        Outcome::Success => "Success",
    }
}

/// Human label for a raw outcome category ("0" / "1")
#[must_use]
pub fn category_label(category: &str) -> Option<&'static str> {
    Outcome::ALL
        .into_iter()
        .find(|o| o.category() == category)
        .map(outcome_label)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOption {
    /// Text shown in the list
    pub label: String,
    /// Value sent as the site selection
    pub value: String,
}

/// Site selector widget definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteDropdown {
    /// Component id
    pub id: &'static str,
    /// "All Sites" first, then each site
    pub options: Vec<DropdownOption>,
    /// Initial selection
    pub value: String,
    /// Hint shown when nothing is selected
    pub placeholder: &'static str,
    /// Whether typing filters the options
    pub searchable: bool,
}

/// "All Sites" followed by each site in first-seen order
#[must_use]
pub fn site_dropdown(dataset: &Dataset) -> SiteDropdown {
    let options = dataset
        .selector_sites()
        .into_iter()
        .map(|value| DropdownOption {
            label: if value == ALL_SITES {
                ALL_SITES_LABEL.to_string()
            } else {
                value.clone()
            },
            value,
        })
        .collect();

    SiteDropdown {
        id: ControlInput::SiteSelector.id(),
        options,
        value: ALL_SITES.to_string(),
        placeholder: SITE_PLACEHOLDER,
        searchable: true,
    }
}

/// Payload range slider definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    /// Component id
    pub id: &'static str,
    /// Smallest payload in the dataset
    pub min: f64,
    /// Largest payload in the dataset
    pub max: f64,
    /// Handle step in kg
    pub step: f64,
    /// Labelled tick positions
    pub marks: BTreeMap<i64, String>,
    /// Initial `[low, high]`
    pub value: [f64; 2],
}

/// Slider over the dataset's payload bounds with `mark_count` evenly spaced
/// integer marks (truncated toward zero)
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn payload_slider(dataset: &Dataset, step: f64, mark_count: usize) -> RangeSlider {
    let bounds = dataset.payload_bounds();
    let divisions = mark_count.saturating_sub(1).max(1) as f64;
    let marks = (0..mark_count.max(2))
        .map(|i| {
            let at = (bounds.min + i as f64 * bounds.span() / divisions).trunc() as i64;
            (at, at.to_string())
        })
        .collect();

    RangeSlider {
        id: ControlInput::PayloadSelector.id(),
        min: bounds.min,
        max: bounds.max,
        step,
        marks,
        value: [bounds.min, bounds.max],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    /// Site name, or "Failure"/"Success" for a single site
    pub label: String,
    /// Launch count
    pub value: u64,
}

/// Proportion chart view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieFigure {
    /// Component id
    pub id: &'static str,
    /// Chart title
    pub title: String,
    /// Slices in derivation order
    pub slices: Vec<PieSlice>,
}

#[must_use]
pub fn pie_title(selection: &SiteSelection) -> String {
    match selection {
        SiteSelection::All => "Total Success Launches by Site".to_string(),
        SiteSelection::Site(site) => format!("Success/Failure Ratio for {site}"),
    }
}

#[must_use]
pub fn pie_figure(selection: &SiteSelection, data: &ProportionDataset) -> PieFigure {
    let relabel = data.kind() == ProportionKind::OutcomesForSite;
    let slices = data
        .slices()
        .iter()
        .map(|s| PieSlice {
            label: if relabel {
                category_label(&s.label).map_or_else(|| s.label.clone(), str::to_string)
            } else {
                s.label.clone()
            },
            value: s.count,
        })
        .collect();

    PieFigure {
        id: ChartOutput::SuccessPie.id(),
        title: pie_title(selection),
        slices,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Axis title
    pub title: &'static str,
    /// Tick positions; empty means automatic
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tickvals: Vec<f64>,
    /// Tick labels matching `tickvals`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ticktext: Vec<&'static str>,
}

/// Scatter chart view model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterFigure {
    /// Component id
    pub id: &'static str,
    /// Chart title
    pub title: String,
    /// Point key on the x axis
    pub x: &'static str,
    /// Point key on the y axis
    pub y: &'static str,
    /// Point key that groups colors
    pub color: &'static str,
    /// Point keys shown on hover
    pub hover_data: Vec<&'static str>,
    /// Display name per point key
    pub labels: BTreeMap<&'static str, &'static str>,
    /// X axis layout
    pub x_axis: Axis,
    /// Y axis layout, ticks at the unjittered outcomes
    pub y_axis: Axis,
    /// Plotted points
    pub points: Vec<ScatterPoint>,
}

#[must_use]
pub fn scatter_title(selection: &SiteSelection) -> String {
    let target = match selection {
        SiteSelection::All => ALL_SITES_LABEL,
        SiteSelection::Site(site) => site.as_str(),
    };
    format!("Payload vs. Launch Outcome for {target}")
}

/// Y axis ticks sit on the unjittered outcomes and read Failure / Success
#[must_use]
pub fn outcome_axis() -> Axis {
    Axis {
        title: OUTCOME_AXIS_TITLE,
        tickvals: Outcome::ALL.iter().map(|o| o.as_f64()).collect(),
        ticktext: Outcome::ALL.iter().map(|o| outcome_label(*o)).collect(),
    }
}

#[must_use]
pub fn scatter_figure(selection: &SiteSelection, data: &ScatterDataset) -> ScatterFigure {
    ScatterFigure {
        id: ChartOutput::PayloadScatter.id(),
        title: scatter_title(selection),
        x: X_FIELD,
        y: Y_FIELD,
        color: COLOR_FIELD,
        hover_data: vec![HOVER_FIELD],
        labels: field_labels(),
        x_axis: Axis {
            title: PAYLOAD_AXIS_TITLE,
            tickvals: Vec::new(),
            ticktext: Vec::new(),
        },
        y_axis: outcome_axis(),
        points: data.points().to_vec(),
    }
}

/// Either chart, ready for the charting layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    Pie(PieFigure),
    Scatter(ScatterFigure),
}

#[must_use]
pub fn render_update(update: &ChartUpdate) -> Figure {
    match update {
        ChartUpdate::Proportion(f) => Figure::Pie(pie_figure(&f.state.selected_site, &f.data)),
        ChartUpdate::Scatter(f) => Figure::Scatter(scatter_figure(&f.state.selected_site, &f.data)),
    }
}

/// One control event's worth of replaced figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedEvent {
    /// Event sequence number
    pub sequence: u64,
    /// Inputs that changed in this event
    pub changed: Vec<ControlInput>,
    /// Replaced charts, in derivation order
    pub figures: Vec<Figure>,
}

#[must_use]
pub fn render(recomputation: &Recomputation) -> RenderedEvent {
    RenderedEvent {
        sequence: recomputation.sequence,
        changed: recomputation.changed.clone(),
        figures: recomputation.updates.iter().map(render_update).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels() {
        assert_eq!(category_label("0"), Some("Failure"));
        assert_eq!(category_label("1"), Some("Success"));
        assert_eq!(category_label("2"), None);
    }

    #[test]
    fn titles_follow_selection() {
        assert_eq!(pie_title(&SiteSelection::All), "Total Success Launches by Site");
        assert_eq!(
            pie_title(&SiteSelection::site("KSC LC-39A")),
            "Success/Failure Ratio for KSC LC-39A"
        );
        assert_eq!(
            scatter_title(&SiteSelection::All),
            "Payload vs. Launch Outcome for All Sites"
        );
        assert_eq!(
            scatter_title(&SiteSelection::site("VAFB SLC-4E")),
            "Payload vs. Launch Outcome for VAFB SLC-4E"
        );
    }

    #[test]
    fn outcome_axis_ticks() {
        let axis = outcome_axis();
        assert_eq!(axis.tickvals, vec![0.0, 1.0]);
        assert_eq!(axis.ticktext, vec!["Failure", "Success"]);
    }
}
