use launch_binding::*;
use proptest::prelude::*;

fn arb_inputs() -> impl Strategy<Value = Vec<ControlInput>> {
    proptest::collection::vec(
        prop_oneof![
            Just(ControlInput::SiteSelector),
            Just(ControlInput::PayloadSelector),
        ],
        0..4,
    )
}

proptest! {
    #[test]
    fn prop_triggered_derivations_read_a_changed_input(changed in arb_inputs()) {
        let g = BindingGraph::dashboard();

        for derivation in g.triggered_by(&changed) {
            let inputs = g.inputs_of(derivation);
            prop_assert!(inputs.iter().any(|i| changed.contains(i)));
        }
    }

    #[test]
    fn prop_untriggered_derivations_read_no_changed_input(changed in arb_inputs()) {
        let g = BindingGraph::dashboard();
        let triggered = g.triggered_by(&changed);

        for binding in g.bindings() {
            if !triggered.contains(&binding.derivation) {
                prop_assert!(binding.inputs.iter().all(|i| !changed.contains(i)));
            }
        }
    }
}

#[test]
fn site_selector_triggers_both() {
    let g = BindingGraph::dashboard();
    assert_eq!(
        g.triggered_by(&[ControlInput::SiteSelector]),
        vec![Derivation::Proportion, Derivation::Scatter]
    );
}

#[test]
fn payload_selector_triggers_only_scatter() {
    let g = BindingGraph::dashboard();
    assert_eq!(
        g.triggered_by(&[ControlInput::PayloadSelector]),
        vec![Derivation::Scatter]
    );
}

#[test]
fn bindings_read_back_declared_edges() {
    let g = BindingGraph::dashboard();

    assert_eq!(
        g.bindings(),
        vec![
            Binding {
                inputs: vec![ControlInput::SiteSelector],
                derivation: Derivation::Proportion,
                output: ChartOutput::SuccessPie,
            },
            Binding {
                inputs: vec![ControlInput::SiteSelector, ControlInput::PayloadSelector],
                derivation: Derivation::Scatter,
                output: ChartOutput::PayloadScatter,
            },
        ]
    );
}

#[test]
fn derivations_never_feed_each_other() {
    let g = BindingGraph::dashboard();
    for (from, to) in g.edges() {
        assert!(!matches!(
            (from, to),
            (BindingNode::Derivation(_), BindingNode::Derivation(_))
        ));
    }
}

#[test]
fn hand_built_graph_matches_dashboard() {
    let mut g = BindingGraph::new();
    g.bind(
        &[ControlInput::SiteSelector],
        Derivation::Proportion,
        ChartOutput::SuccessPie,
    )
    .unwrap();
    g.bind(
        &[ControlInput::SiteSelector, ControlInput::PayloadSelector],
        Derivation::Scatter,
        ChartOutput::PayloadScatter,
    )
    .unwrap();

    assert_eq!(g.edges(), BindingGraph::dashboard().edges());
}

#[test]
fn component_ids() {
    assert_eq!(ControlInput::SiteSelector.id(), "site-dropdown");
    assert_eq!(ControlInput::PayloadSelector.id(), "payload-slider");
    assert_eq!(ChartOutput::SuccessPie.id(), "success-pie-chart");
    assert_eq!(
        ChartOutput::PayloadScatter.to_string(),
        "success-payload-scatter-chart"
    );
}
