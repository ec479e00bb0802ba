use crate::error::{GraphError, Result};
use crate::types::LifecycleFunction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet, VecDeque};

/// Directed graph of lifecycle function call relationships.
///
/// Nodes are addressed by function name. Node indices are allocated in
/// insertion order, so every query that iterates the whole graph is
/// deterministic for a fixed build history.
#[derive(Debug, Default)]
pub struct CallGraph {
    graph: DiGraph<LifecycleFunction, ()>,
    name_index: HashMap<String, NodeIndex>,
    dynamic_behavior: String,
}

/// Derived figures for a graph snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub has_cycles: bool,
    pub root_nodes: Vec<String>,
    pub leaf_nodes: Vec<String>,
}

impl CallGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_behavior(dynamic_behavior: impl Into<String>) -> Self {
        Self {
            dynamic_behavior: dynamic_behavior.into(),
            ..Self::default()
        }
    }

    /// Add a lifecycle function node. Re-adding an existing name is a no-op;
    /// the first insertion's metadata wins.
    pub fn add_node(&mut self, func: LifecycleFunction) {
        if self.name_index.contains_key(&func.name) {
            return;
        }
        let name = func.name.clone();
        let idx = self.graph.add_node(func);
        self.name_index.insert(name, idx);
    }

    /// Add a directed edge asserting `pred` runs before `succ`.
    ///
    /// Both endpoints must already be nodes; the error names the absent one.
    /// Duplicate edges are idempotent.
    pub fn add_edge(&mut self, pred: &str, succ: &str) -> Result<()> {
        let from = *self
            .name_index
            .get(pred)
            .ok_or_else(|| GraphError::MissingPredecessor(pred.to_string()))?;
        let to = *self
            .name_index
            .get(succ)
            .ok_or_else(|| GraphError::MissingSuccessor(succ.to_string()))?;

        self.graph.update_edge(from, to, ());
        Ok(())
    }

    #[must_use]
    pub fn has_node(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    #[must_use]
    pub fn has_edge(&self, pred: &str, succ: &str) -> bool {
        match (self.name_index.get(pred), self.name_index.get(succ)) {
            (Some(&from), Some(&to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Look up a node's function by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&LifecycleFunction> {
        self.name_index.get(name).map(|&idx| &self.graph[idx])
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &LifecycleFunction> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    /// Successor names of `name`. Unknown names yield an empty list; only
    /// edge insertion treats a missing node as an error.
    #[must_use]
    pub fn successors(&self, name: &str) -> Vec<String> {
        self.adjacent(name, Direction::Outgoing)
    }

    /// Predecessor names of `name`. Unknown names yield an empty list.
    #[must_use]
    pub fn predecessors(&self, name: &str) -> Vec<String> {
        self.adjacent(name, Direction::Incoming)
    }

    fn adjacent(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(&idx) = self.name_index.get(name) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].name.clone())
            .collect()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn dynamic_behavior(&self) -> &str {
        &self.dynamic_behavior
    }

    pub fn set_dynamic_behavior(&mut self, behavior: impl Into<String>) {
        self.dynamic_behavior = behavior.into();
    }

    /// Topological order over all node names using Kahn's algorithm.
    ///
    /// Ties among simultaneously-available zero-in-degree nodes follow
    /// insertion order; this is deterministic but otherwise unspecified.
    pub fn topological_sort(&self) -> Result<Vec<String>> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .collect();

        let mut result = Vec::with_capacity(self.graph.node_count());
        while let Some(current) = queue.pop_front() {
            result.push(self.graph[current].name.clone());

            for succ in self.graph.neighbors_directed(current, Direction::Outgoing) {
                in_degree[succ.index()] -= 1;
                if in_degree[succ.index()] == 0 {
                    queue.push_back(succ);
                }
            }
        }

        if result.len() != self.graph.node_count() {
            return Err(GraphError::CycleDetected);
        }
        Ok(result)
    }

    /// Whether the graph contains any cycle. Never mutates, never fails.
    #[must_use]
    pub fn detect_cycles(&self) -> bool {
        self.topological_sort().is_err()
    }

    /// Shortest (fewest-edges) path from `start` to `end` over successor
    /// edges, endpoints inclusive. `None` when either endpoint is absent or
    /// `end` is unreachable. `start == end` yields the single-element path
    /// regardless of self-loops.
    #[must_use]
    pub fn find_path(&self, start: &str, end: &str) -> Option<Vec<String>> {
        let &from = self.name_index.get(start)?;
        let &to = self.name_index.get(end)?;

        if from == to {
            return Some(vec![start.to_string()]);
        }

        // BFS with parent links; the visited set bounds the walk on cycles.
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        visited.insert(from);

        while let Some(current) = queue.pop_front() {
            for succ in self.graph.neighbors_directed(current, Direction::Outgoing) {
                if !visited.insert(succ) {
                    continue;
                }
                parent.insert(succ, current);
                if succ == to {
                    return Some(self.reconstruct_path(&parent, from, to));
                }
                queue.push_back(succ);
            }
        }

        None
    }

    fn reconstruct_path(
        &self,
        parent: &HashMap<NodeIndex, NodeIndex>,
        from: NodeIndex,
        to: NodeIndex,
    ) -> Vec<String> {
        let mut path = vec![self.graph[to].name.clone()];
        let mut current = to;
        while current != from {
            current = parent[&current];
            path.push(self.graph[current].name.clone());
        }
        path.reverse();
        path
    }

    /// Derived statistics for the current snapshot.
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let mut root_nodes = Vec::new();
        let mut leaf_nodes = Vec::new();

        for idx in self.graph.node_indices() {
            let name = &self.graph[idx].name;
            if self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_none()
            {
                root_nodes.push(name.clone());
            }
            if self
                .graph
                .neighbors_directed(idx, Direction::Outgoing)
                .next()
                .is_none()
            {
                leaf_nodes.push(name.clone());
            }
        }

        GraphStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            has_cycles: self.detect_cycles(),
            root_nodes,
            leaf_nodes,
        }
    }

    pub(crate) fn edges(&self) -> impl Iterator<Item = (&LifecycleFunction, &LifecycleFunction)> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(from, to)| (&self.graph[from], &self.graph[to]))
    }
}
