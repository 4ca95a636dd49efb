//! Declarative binding graph: `inputs -> derivation -> chart`

use crate::error::BindingError;
use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use serde::Serialize;
use std::fmt;

/// Control widgets that can trigger recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ControlInput {
    #[serde(rename = "site-dropdown")]
    SiteSelector,
    #[serde(rename = "payload-slider")]
    PayloadSelector,
}

impl ControlInput {
    pub const ALL: [ControlInput; 2] = [ControlInput::SiteSelector, ControlInput::PayloadSelector];

    /// Widget component id
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ControlInput::SiteSelector => "site-dropdown",
            ControlInput::PayloadSelector => "payload-slider",
        }
    }
}

impl fmt::Display for ControlInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Derivations the graph can schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    Proportion,
    Scatter,
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Derivation::Proportion => f.write_str("proportion"),
            Derivation::Scatter => f.write_str("scatter"),
        }
    }
}

/// Charts whose backing dataset gets replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChartOutput {
    #[serde(rename = "success-pie-chart")]
    SuccessPie,
    #[serde(rename = "success-payload-scatter-chart")]
    PayloadScatter,
}

impl ChartOutput {
    /// Graph component id
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ChartOutput::SuccessPie => "success-pie-chart",
            ChartOutput::PayloadScatter => "success-payload-scatter-chart",
        }
    }
}

impl fmt::Display for ChartOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Vertex of the binding graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BindingNode {
    Input(ControlInput),
    Derivation(Derivation),
    Output(ChartOutput),
}

/// One declared edge set, as read back from the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub inputs: Vec<ControlInput>,
    pub derivation: Derivation,
    pub output: ChartOutput,
}

/// Which control changes rerun which derivations
///
/// Built once at startup, read-only afterwards. Derivations never feed each
/// other: every edge runs input to derivation or derivation to output.
#[derive(Debug, Clone, Default)]
pub struct BindingGraph {
    inner: DiGraphMap<BindingNode, ()>,
}

impl BindingGraph {
    /// Empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's two chains:
    /// - site selector -> proportion -> success pie
    /// - site selector + payload slider -> scatter -> payload scatter
    #[must_use]
    pub fn dashboard() -> Self {
        let mut graph = Self::new();
        graph.insert(
            &[ControlInput::SiteSelector],
            Derivation::Proportion,
            ChartOutput::SuccessPie,
        );
        graph.insert(
            &[ControlInput::SiteSelector, ControlInput::PayloadSelector],
            Derivation::Scatter,
            ChartOutput::PayloadScatter,
        );
        graph
    }

    /// Declare `inputs -> derivation -> output`
    ///
    /// # Errors
    /// - [`BindingError::EmptyTrigger`] when `inputs` is empty
    /// - [`BindingError::DerivationAlreadyBound`] when `derivation` has a binding
    /// - [`BindingError::OutputAlreadyBound`] when another derivation feeds `output`
    pub fn bind(
        &mut self,
        inputs: &[ControlInput],
        derivation: Derivation,
        output: ChartOutput,
    ) -> Result<(), BindingError> {
        if inputs.is_empty() {
            return Err(BindingError::EmptyTrigger(derivation));
        }
        if self.inner.contains_node(BindingNode::Derivation(derivation)) {
            return Err(BindingError::DerivationAlreadyBound(derivation));
        }
        if self.inner.contains_node(BindingNode::Output(output)) {
            return Err(BindingError::OutputAlreadyBound(output));
        }

        self.insert(inputs, derivation, output);

        if is_cyclic_directed(&self.inner) {
            self.inner.remove_node(BindingNode::Derivation(derivation));
            self.inner.remove_node(BindingNode::Output(output));
            return Err(BindingError::CycleDetected);
        }
        Ok(())
    }

    fn insert(&mut self, inputs: &[ControlInput], derivation: Derivation, output: ChartOutput) {
        let d = BindingNode::Derivation(derivation);
        for input in inputs {
            self.inner.add_edge(BindingNode::Input(*input), d, ());
        }
        self.inner.add_edge(d, BindingNode::Output(output), ());
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Derivations to rerun when `changed` inputs take new values
    ///
    /// Sorted and deduplicated.
    #[must_use]
    pub fn triggered_by(&self, changed: &[ControlInput]) -> Vec<Derivation> {
        let mut out: Vec<Derivation> = changed
            .iter()
            .filter(|input| self.inner.contains_node(BindingNode::Input(**input)))
            .flat_map(|input| {
                self.inner
                    .neighbors_directed(BindingNode::Input(*input), Direction::Outgoing)
            })
            .filter_map(|node| match node {
                BindingNode::Derivation(d) => Some(d),
                _ => None,
            })
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Trigger inputs of a derivation, sorted
    #[must_use]
    pub fn inputs_of(&self, derivation: Derivation) -> Vec<ControlInput> {
        let node = BindingNode::Derivation(derivation);
        if !self.inner.contains_node(node) {
            return Vec::new();
        }
        let mut inputs: Vec<ControlInput> = self
            .inner
            .neighbors_directed(node, Direction::Incoming)
            .filter_map(|n| match n {
                BindingNode::Input(i) => Some(i),
                _ => None,
            })
            .collect();
        inputs.sort_unstable();
        inputs
    }

    /// Chart fed by a derivation
    #[must_use]
    pub fn output_of(&self, derivation: Derivation) -> Option<ChartOutput> {
        let node = BindingNode::Derivation(derivation);
        if !self.inner.contains_node(node) {
            return None;
        }
        self.inner
            .neighbors_directed(node, Direction::Outgoing)
            .find_map(|n| match n {
                BindingNode::Output(o) => Some(o),
                _ => None,
            })
    }

    /// Every declared binding, ordered by derivation
    #[must_use]
    pub fn bindings(&self) -> Vec<Binding> {
        let mut derivations: Vec<Derivation> = self
            .inner
            .nodes()
            .filter_map(|n| match n {
                BindingNode::Derivation(d) => Some(d),
                _ => None,
            })
            .collect();
        derivations.sort_unstable();

        derivations
            .into_iter()
            .filter_map(|derivation| {
                self.output_of(derivation).map(|output| Binding {
                    inputs: self.inputs_of(derivation),
                    derivation,
                    output,
                })
            })
            .collect()
    }

    /// Raw edge list for inspection
    #[must_use]
    pub fn edges(&self) -> Vec<(BindingNode, BindingNode)> {
        let mut edges: Vec<_> = self.inner.all_edges().map(|(a, b, _)| (a, b)).collect();
        edges.sort_unstable();
        edges
    }

    /// Validate the entire graph structure
    ///
    /// # Errors
    /// [`BindingError::CycleDetected`] if the graph is cyclic.
    pub fn validate(&self) -> Result<(), BindingError> {
        if is_cyclic_directed(&self.inner) {
            return Err(BindingError::CycleDetected);
        }
        Ok(())
    }

    /// Topological order of all nodes (inputs first, charts last)
    ///
    /// # Errors
    /// [`BindingError::CycleDetected`] if no such order exists.
    pub fn evaluation_order(&self) -> Result<Vec<BindingNode>, BindingError> {
        toposort(&self.inner, None).map_err(|_| BindingError::CycleDetected)
    }
}
