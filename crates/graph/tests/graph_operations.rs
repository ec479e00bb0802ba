//! Tests for CallGraph operations

use lifecycle_graph::{CallGraph, GraphError, LifecycleFunction, Scope};
use pretty_assertions::assert_eq;

fn make_func(name: &str, scope: Scope) -> LifecycleFunction {
    LifecycleFunction {
        name: name.to_string(),
        scope,
        description: format!("{name} callback"),
    }
}

fn chain_graph(names: &[&str]) -> CallGraph {
    let mut graph = CallGraph::new();
    for name in names {
        graph.add_node(make_func(name, Scope::Page));
    }
    for pair in names.windows(2) {
        graph.add_edge(pair[0], pair[1]).unwrap();
    }
    graph
}

#[test]
fn test_add_node_and_lookup() {
    let mut graph = CallGraph::new();

    graph.add_node(make_func("onCreate", Scope::Page));

    assert!(graph.has_node("onCreate"));
    assert!(!graph.has_node("onDestroy"));
    assert_eq!(graph.node("onCreate").unwrap().scope, Scope::Page);
    assert_eq!(graph.node_count(), 1);
}

#[test]
fn test_add_node_is_idempotent() {
    let mut graph = CallGraph::new();

    graph.add_node(make_func("init", Scope::Page));
    graph.add_node(LifecycleFunction {
        name: "init".to_string(),
        scope: Scope::Component,
        description: "second insert".to_string(),
    });

    assert_eq!(graph.node_count(), 1);
    // First insertion wins.
    assert_eq!(graph.node("init").unwrap().scope, Scope::Page);
}

#[test]
fn test_add_edge_updates_both_adjacency_sets() {
    let mut graph = CallGraph::new();
    graph.add_node(make_func("onCreate", Scope::Page));
    graph.add_node(make_func("onShow", Scope::Page));

    graph.add_edge("onCreate", "onShow").unwrap();

    assert_eq!(graph.successors("onCreate"), vec!["onShow".to_string()]);
    assert_eq!(graph.predecessors("onShow"), vec!["onCreate".to_string()]);
    assert!(graph.has_edge("onCreate", "onShow"));
    assert!(!graph.has_edge("onShow", "onCreate"));
}

#[test]
fn test_add_edge_is_idempotent() {
    let mut graph = chain_graph(&["a", "b"]);

    graph.add_edge("a", "b").unwrap();
    graph.add_edge("a", "b").unwrap();

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.successors("a").len(), 1);
}

#[test]
fn test_add_edge_names_missing_endpoint() {
    let mut graph = CallGraph::new();
    graph.add_node(make_func("onCreate", Scope::Page));

    let err = graph.add_edge("ghost", "onCreate").unwrap_err();
    assert!(matches!(err, GraphError::MissingPredecessor(name) if name == "ghost"));

    let err = graph.add_edge("onCreate", "ghost").unwrap_err();
    assert!(matches!(err, GraphError::MissingSuccessor(name) if name == "ghost"));

    // The failed insert left no partial edge behind.
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.successors("onCreate").is_empty());
}

#[test]
fn test_adjacency_of_unknown_name_is_empty() {
    let graph = CallGraph::new();

    assert!(graph.successors("nope").is_empty());
    assert!(graph.predecessors("nope").is_empty());
}

#[test]
fn test_topological_sort_of_chain() {
    let graph = chain_graph(&["onCreate", "onShow", "onReady", "onHide"]);

    let order = graph.topological_sort().unwrap();
    assert_eq!(order, vec!["onCreate", "onShow", "onReady", "onHide"]);
}

#[test]
fn test_topological_sort_respects_every_edge() {
    let mut graph = CallGraph::new();
    for name in ["a", "b", "c", "d"] {
        graph.add_node(make_func(name, Scope::Component));
    }
    // Diamond: a -> b, a -> c, b -> d, c -> d.
    graph.add_edge("a", "b").unwrap();
    graph.add_edge("a", "c").unwrap();
    graph.add_edge("b", "d").unwrap();
    graph.add_edge("c", "d").unwrap();

    let order = graph.topological_sort().unwrap();
    let pos = |name: &str| order.iter().position(|n| n == name).unwrap();

    assert_eq!(order.len(), 4);
    assert!(pos("a") < pos("b"));
    assert!(pos("a") < pos("c"));
    assert!(pos("b") < pos("d"));
    assert!(pos("c") < pos("d"));
}

#[test]
fn test_topological_sort_is_deterministic() {
    let build = || {
        let mut graph = CallGraph::new();
        for name in ["x", "y", "z"] {
            graph.add_node(make_func(name, Scope::Page));
        }
        graph
    };

    // Three roots, no edges: ties broken by insertion order, every time.
    assert_eq!(build().topological_sort().unwrap(), vec!["x", "y", "z"]);
    assert_eq!(build().topological_sort().unwrap(), vec!["x", "y", "z"]);
}

#[test]
fn test_topological_sort_of_empty_graph() {
    let graph = CallGraph::new();
    assert!(graph.topological_sort().unwrap().is_empty());
}

#[test]
fn test_cycle_fails_sort_and_flags_detection() {
    let mut graph = chain_graph(&["A", "B", "C"]);
    graph.add_edge("C", "A").unwrap();

    let err = graph.topological_sort().unwrap_err();
    assert!(matches!(err, GraphError::CycleDetected));
    assert!(graph.detect_cycles());

    // Detection neither mutated nor consumed anything.
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_acyclic_graph_has_no_cycles() {
    let graph = chain_graph(&["A", "B", "C"]);
    assert!(!graph.detect_cycles());
}

#[test]
fn test_find_path_direct_and_transitive() {
    let graph = chain_graph(&["a", "b", "c"]);

    assert_eq!(graph.find_path("a", "b").unwrap(), vec!["a", "b"]);
    assert_eq!(graph.find_path("a", "c").unwrap(), vec!["a", "b", "c"]);
    assert!(graph.find_path("c", "a").is_none());
}

#[test]
fn test_find_path_returns_shortest() {
    let mut graph = chain_graph(&["a", "b", "c", "d"]);
    // Shortcut a -> d alongside the three-hop chain.
    graph.add_edge("a", "d").unwrap();

    assert_eq!(graph.find_path("a", "d").unwrap(), vec!["a", "d"]);
}

#[test]
fn test_find_path_self_is_single_element() {
    let mut graph = CallGraph::new();
    graph.add_node(make_func("loop", Scope::Component));
    graph.add_edge("loop", "loop").unwrap();

    assert_eq!(graph.find_path("loop", "loop").unwrap(), vec!["loop"]);
}

#[test]
fn test_find_path_missing_endpoint() {
    let graph = chain_graph(&["a", "b"]);

    assert!(graph.find_path("a", "ghost").is_none());
    assert!(graph.find_path("ghost", "b").is_none());
}

#[test]
fn test_find_path_terminates_on_cycles() {
    let mut graph = chain_graph(&["A", "B", "C"]);
    graph.add_edge("C", "A").unwrap();
    graph.add_node(make_func("island", Scope::Page));

    assert!(graph.find_path("A", "island").is_none());
    assert_eq!(graph.find_path("A", "C").unwrap(), vec!["A", "B", "C"]);
}

#[test]
fn test_stats() {
    let mut graph = chain_graph(&["onCreate", "onShow", "onHide"]);
    graph.add_node(make_func("orphan", Scope::Component));

    let stats = graph.stats();
    assert_eq!(stats.node_count, 4);
    assert_eq!(stats.edge_count, 2);
    assert!(!stats.has_cycles);
    assert_eq!(stats.root_nodes, vec!["onCreate", "orphan"]);
    assert_eq!(stats.leaf_nodes, vec!["onHide", "orphan"]);
}

#[test]
fn test_set_dynamic_behavior_flows_into_exports() {
    let mut graph = chain_graph(&["a", "b"]);
    assert_eq!(graph.dynamic_behavior(), "");

    graph.set_dynamic_behavior("b fires twice under fast navigation");

    assert_eq!(
        graph.dynamic_behavior(),
        "b fires twice under fast navigation"
    );
    assert!(graph
        .to_dot()
        .contains("note [shape=note, label=\"b fires twice under fast navigation\"];"));
    assert_eq!(
        graph.to_doc().lifecycle.dynamic_behavior,
        "b fires twice under fast navigation"
    );
}

#[test]
fn test_dot_export_styles_nodes_by_scope() {
    let mut graph = CallGraph::new();
    graph.add_node(make_func("onCreate", Scope::Page));
    graph.add_node(make_func("mount", Scope::Component));
    graph.add_edge("onCreate", "mount").unwrap();

    let dot = graph.to_dot();
    assert!(dot.starts_with("digraph LifecycleCallGraph {"));
    assert!(dot.contains("\"onCreate\" [label=\"onCreate\\n[page]\\nonCreate callback\", fillcolor=\"lightblue\", style=\"rounded,filled\"];"));
    assert!(dot.contains("fillcolor=\"lightgreen\""));
    assert!(dot.contains("\"onCreate\" -> \"mount\";"));
    assert!(!dot.contains("note [shape=note"));
}

#[test]
fn test_dot_export_escapes_quotes_in_behavior_note() {
    let mut graph = CallGraph::with_behavior("calls \"onShow\" twice");
    graph.add_node(make_func("onShow", Scope::Page));

    let dot = graph.to_dot();
    assert!(dot.contains("note [shape=note, label=\"calls \\\"onShow\\\" twice\"];"));
}

#[test]
fn test_dot_export_is_deterministic() {
    let graph = chain_graph(&["a", "b", "c"]);
    assert_eq!(graph.to_dot(), graph.to_dot());
}

#[test]
fn test_doc_export_flattens_instances_to_base_functions() {
    let mut graph = CallGraph::with_behavior("observed on cold start");
    graph.add_node(make_func("Comp.init", Scope::Component));
    graph.add_node(make_func("Comp.mount", Scope::Component));
    graph.add_node(make_func("Other.init", Scope::Component));
    graph.add_edge("Comp.init", "Comp.mount").unwrap();
    graph.add_edge("Other.init", "Comp.mount").unwrap();

    let doc = graph.to_doc().lifecycle;

    // Two distinct base names, not three instance names.
    let names: Vec<&str> = doc.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["init", "mount"]);

    // Edges keep the full instance names.
    assert_eq!(doc.order.len(), 2);
    assert!(doc
        .order
        .iter()
        .any(|o| o.pred == "Comp.init" && o.succ == "Comp.mount"));
    assert_eq!(doc.dynamic_behavior, "observed on cold start");
}
