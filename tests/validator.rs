//! Tests for graph validation and per-node error attribution.
mod common;
use common::*;

use cepflow::prelude::*;

fn kinds_for(report: &ValidationReport, node_id: &str) -> Vec<DiagnosticKind> {
    report
        .diagnostics
        .iter()
        .filter(|d| d.node_id == node_id)
        .map(|d| d.kind)
        .collect()
}

#[test]
fn test_isolated_top_level_node() {
    let nodes = vec![atomic("n1", "lonely", Some("event.kind == 'a'"))];
    let report = validate(&nodes, &[], false);

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].kind, DiagnosticKind::IsolatedNode);
    assert_eq!(report.diagnostics[0].node_id, "n1");
}

#[test]
fn test_top_level_singleton_is_still_isolated() {
    // The sole-child exemption does not extend to the top level.
    let nodes = vec![atomic("only", "only", Some("true"))];
    let report = validate(&nodes, &[], false);

    assert_eq!(
        kinds_for(&report, "only"),
        vec![DiagnosticKind::IsolatedNode]
    );
}

#[test]
fn test_sole_child_of_group_is_never_isolated() {
    let nodes = vec![
        composite("g1", "group"),
        atomic("c1", "child", Some("true")).with_parent("g1"),
    ];
    // The group itself is wired to something so only the child is unconnected.
    let edges = vec![strategy_edge("e1", "g1", "other")];
    let report = validate(&nodes, &edges, false);

    assert!(kinds_for(&report, "c1").is_empty());
}

#[test]
fn test_unconnected_sibling_is_isolated() {
    let nodes = vec![
        composite("g1", "group"),
        atomic("c1", "first", Some("true")).with_parent("g1"),
        atomic("c2", "second", Some("true")).with_parent("g1"),
        atomic("c3", "third", Some("true")).with_parent("g1"),
    ];
    let edges = vec![
        strategy_edge("e1", "c1", "c2"),
        compute_edge("e2", "g1", "sink"),
    ];
    let report = validate(&nodes, &edges, false);

    assert!(kinds_for(&report, "c1").is_empty());
    assert!(kinds_for(&report, "c2").is_empty());
    assert_eq!(kinds_for(&report, "c3"), vec![DiagnosticKind::IsolatedNode]);
}

#[test]
fn test_compute_edge_counts_as_connectivity() {
    let nodes = vec![
        atomic("n1", "start", Some("true")),
        llm("n2", "inference"),
    ];
    let edges = vec![compute_edge("e1", "n1", "n2")];
    let report = validate(&nodes, &edges, false);

    assert!(report.is_clean());
}

#[test]
fn test_missing_condition_on_atomic() {
    let nodes = vec![
        atomic("n1", "no-cond", None),
        atomic("n2", "empty-cond", Some("")),
        atomic("n3", "with-cond", Some("event.kind == 'a'")),
    ];
    let edges = vec![
        strategy_edge("e1", "n1", "n2"),
        strategy_edge("e2", "n2", "n3"),
    ];
    let report = validate(&nodes, &edges, false);

    assert_eq!(
        kinds_for(&report, "n1"),
        vec![DiagnosticKind::MissingCondition]
    );
    assert_eq!(
        kinds_for(&report, "n2"),
        vec![DiagnosticKind::MissingCondition]
    );
    assert!(kinds_for(&report, "n3").is_empty());
}

#[test]
fn test_empty_group_reported_regardless_of_connectivity() {
    let nodes = vec![
        composite("g1", "group"),
        atomic("n1", "feeder", Some("true")),
    ];
    // The group is connected, yet still empty.
    let edges = vec![strategy_edge("e1", "n1", "g1")];
    let report = validate(&nodes, &edges, false);

    assert_eq!(kinds_for(&report, "g1"), vec![DiagnosticKind::EmptyGroup]);
}

#[test]
fn test_cycle_reports_each_node_exactly_once() {
    let nodes = vec![
        atomic("a", "a", Some("true")),
        atomic("b", "b", Some("true")),
        atomic("c", "c", Some("true")),
    ];
    let edges = vec![
        strategy_edge("e1", "a", "b"),
        strategy_edge("e2", "b", "c"),
        strategy_edge("e3", "c", "a"),
    ];
    let report = validate(&nodes, &edges, false);

    let mut cycle_ids: Vec<&str> = report
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::CircularDependency)
        .map(|d| d.node_id.as_str())
        .collect();
    cycle_ids.sort_unstable();

    assert_eq!(cycle_ids, vec!["a", "b", "c"]);
    assert_eq!(report.diagnostics.len(), 3);
}

#[test]
fn test_compute_edges_do_not_form_cycles() {
    // Adjacency for cycle detection is built from strategy edges only.
    let nodes = vec![
        atomic("a", "a", Some("true")),
        llm("b", "inference"),
    ];
    let edges = vec![
        compute_edge("e1", "a", "b"),
        compute_edge("e2", "b", "a"),
    ];
    let report = validate(&nodes, &edges, false);

    assert!(
        !report
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::CircularDependency)
    );
}

#[test]
fn test_validation_is_deterministic() {
    let nodes = vec![
        atomic("a", "a", None),
        atomic("b", "b", Some("true")),
        composite("g", "empty-group"),
        atomic("c", "c", Some("true")),
    ];
    let edges = vec![
        strategy_edge("e1", "a", "b"),
        strategy_edge("e2", "b", "a"),
    ];

    let first = validate(&nodes, &edges, false);
    let second = validate(&nodes, &edges, false);

    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn test_annotate_replaces_stale_diagnostics() {
    let mut stale = atomic("n1", "was-broken", Some("true"));
    stale.diagnostics = vec![Diagnostic {
        node_id: "n1".to_string(),
        node_name: "was-broken".to_string(),
        kind: DiagnosticKind::MissingCondition,
        message: "stale".to_string(),
    }];
    let nodes = vec![stale, atomic("n2", "broken", None)];
    let edges = vec![strategy_edge("e1", "n1", "n2")];

    let report = validate(&nodes, &edges, true);
    let annotated = report.nodes.expect("annotation requested");

    // n1 is clean now: its diagnostics are replaced with an empty list.
    assert!(annotated[0].diagnostics.is_empty());
    // n2 carries exactly its current findings.
    assert_eq!(annotated[1].diagnostics.len(), 1);
    assert_eq!(
        annotated[1].diagnostics[0].kind,
        DiagnosticKind::MissingCondition
    );
}

#[test]
fn test_no_annotation_returns_no_nodes() {
    let nodes = vec![atomic("n1", "n1", Some("true"))];
    let report = validate(&nodes, &[], false);
    assert!(report.nodes.is_none());
}

#[test]
fn test_diagnostic_uses_display_label() {
    let mut node = atomic("n1", "internal", None);
    if let NodePayload::Atomic(data) = &mut node.payload {
        data.label = Some("Pretty Label".to_string());
    }
    let report = validate(&[node], &[], false);

    assert!(
        report
            .diagnostics
            .iter()
            .all(|d| d.node_name == "Pretty Label")
    );
}
