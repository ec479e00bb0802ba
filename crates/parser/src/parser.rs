use crate::error::{ParserError, Result};
use lifecycle_graph::{base_name, CallGraph, LifecycleFunction, Scope};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Parse lifecycle analysis JSON text into a populated [`CallGraph`].
pub fn parse_str(raw: &str) -> Result<CallGraph> {
    let data: Value = serde_json::from_str(raw)?;
    parse_value(&data)
}

/// Read and parse a lifecycle analysis JSON file.
///
/// The file read is the only suspension point; parsing and graph population
/// run to completion synchronously.
pub async fn parse_file(path: impl AsRef<Path>) -> Result<CallGraph> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ParserError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    parse_str(&raw)
}

/// Validate a pre-parsed JSON value and build a [`CallGraph`] from it.
///
/// Validation is strict and ordered; the first violation aborts the build,
/// so either a fully populated graph is returned or no graph at all.
pub fn parse_value(data: &Value) -> Result<CallGraph> {
    let root = as_object(data, "data")?;

    let lifecycle = root
        .get("lifecycle")
        .ok_or(ParserError::MissingField("lifecycle"))?;
    let lifecycle = as_object(lifecycle, "lifecycle")?;

    let functions = lifecycle
        .get("functions")
        .ok_or(ParserError::MissingField("lifecycle.functions"))?;
    let functions = as_array(functions, "lifecycle.functions")?;

    let order = lifecycle
        .get("order")
        .ok_or(ParserError::MissingField("lifecycle.order"))?;
    let order = as_array(order, "lifecycle.order")?;

    // Optional field: anything but a string falls back to empty.
    let behavior = lifecycle
        .get("dynamicBehavior")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let base_functions = parse_functions(functions)?;
    let mut graph = CallGraph::with_behavior(behavior);

    // Nodes first: every distinct endpoint becomes an instance node carrying
    // the resolved base function's metadata. Edge insertion below relies on
    // all endpoints already existing.
    for instance in collect_instance_names(order) {
        let base = base_name(instance);
        let base_func =
            base_functions
                .get(base)
                .ok_or_else(|| ParserError::UnknownBase {
                    instance: instance.to_string(),
                    base: base.to_string(),
                })?;

        graph.add_node(LifecycleFunction {
            name: instance.to_string(),
            scope: base_func.scope,
            description: base_func.description.clone(),
        });
    }

    for (i, pair) in order.iter().enumerate() {
        let pair = as_object(pair, &format!("order[{i}]"))?;
        let pred = require_str(pair, "pred", &format!("order[{i}].pred"))?;
        let succ = require_str(pair, "succ", &format!("order[{i}].succ"))?;

        // The graph's own missing-node check is the last line of defense
        // against endpoints that node creation did not produce.
        graph.add_edge(pred, succ)?;
    }

    log::debug!(
        "built lifecycle call graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Self-check: a built graph must survive a canonical-export round trip.
///
/// Re-parses `graph.to_doc()` and compares node and edge counts; any parse
/// failure yields `false`.
#[must_use]
pub fn check_round_trip(graph: &CallGraph) -> bool {
    let Ok(doc) = serde_json::to_value(graph.to_doc()) else {
        return false;
    };
    match parse_value(&doc) {
        Ok(reparsed) => {
            reparsed.node_count() == graph.node_count()
                && reparsed.edge_count() == graph.edge_count()
        }
        Err(_) => false,
    }
}

/// Validate every function descriptor and key the results by base name.
fn parse_functions(functions: &[Value]) -> Result<HashMap<String, LifecycleFunction>> {
    let mut map = HashMap::with_capacity(functions.len());

    for (i, value) in functions.iter().enumerate() {
        let func = as_object(value, &format!("functions[{i}]"))?;

        let name = require_str(func, "name", &format!("functions[{i}].name"))?;

        let scope = match func.get("scope").and_then(Value::as_str) {
            Some("page") => Scope::Page,
            Some("component") => Scope::Component,
            _ => {
                return Err(ParserError::InvalidField {
                    field: format!("functions[{i}].scope"),
                    expected: "\"page\" or \"component\"",
                })
            }
        };

        let description = require_str(func, "description", &format!("functions[{i}].description"))?;

        map.insert(
            name.to_string(),
            LifecycleFunction {
                name: name.to_string(),
                scope,
                description: description.to_string(),
            },
        );
    }

    Ok(map)
}

/// Distinct endpoint names across all order pairs, in first-appearance order.
/// Only string endpoints count here; malformed pairs are reported later, at
/// their own index, by the edge pass.
fn collect_instance_names(order: &[Value]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for pair in order {
        let Some(pair) = pair.as_object() else {
            continue;
        };
        for key in ["pred", "succ"] {
            if let Some(name) = pair.get(key).and_then(Value::as_str) {
                if seen.insert(name) {
                    names.push(name);
                }
            }
        }
    }

    names
}

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| ParserError::InvalidField {
        field: field.to_string(),
        expected: "an object",
    })
}

fn as_array<'a>(value: &'a Value, field: &str) -> Result<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ParserError::InvalidField {
            field: field.to_string(),
            expected: "an array",
        })
}

fn require_str<'a>(map: &'a Map<String, Value>, key: &str, field: &str) -> Result<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ParserError::InvalidField {
            field: field.to_string(),
            expected: "a string",
        })
}
