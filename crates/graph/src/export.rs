use crate::graph::CallGraph;
use crate::types::{base_name, CallOrder, LifecycleDoc, LifecycleFunction, LifecycleSection, Scope};
use std::collections::HashSet;

impl CallGraph {
    /// Render the graph as Graphviz DOT for external layout tools.
    ///
    /// Output is deterministic for a fixed build history: nodes in insertion
    /// order, edges grouped under their source node. Quotes embedded in
    /// names, descriptions, and the behavior note are escaped.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut lines = vec![
            "digraph LifecycleCallGraph {".to_string(),
            "  rankdir=TB;".to_string(),
            "  node [shape=box, style=rounded];".to_string(),
            String::new(),
        ];

        for func in self.nodes() {
            let color = match func.scope {
                Scope::Page => "lightblue",
                Scope::Component => "lightgreen",
            };
            let label = format!(
                "{}\\n[{}]\\n{}",
                escape_quotes(&func.name),
                func.scope,
                escape_quotes(&func.description)
            );
            lines.push(format!(
                "  \"{}\" [label=\"{label}\", fillcolor=\"{color}\", style=\"rounded,filled\"];",
                escape_quotes(&func.name)
            ));
        }

        lines.push(String::new());

        for func in self.nodes() {
            for succ in self.successors(&func.name) {
                lines.push(format!(
                    "  \"{}\" -> \"{}\";",
                    escape_quotes(&func.name),
                    escape_quotes(&succ)
                ));
            }
        }

        if !self.dynamic_behavior().is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "  note [shape=note, label=\"{}\"];",
                escape_quotes(self.dynamic_behavior())
            ));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Export the graph as the canonical document shape the parser consumes.
    ///
    /// `functions` carries the distinct base names reachable from the edge
    /// list (first-seen order, metadata taken from the instance node that
    /// introduced the base), while `order` keeps full instance names, so
    /// re-parsing the document reproduces the same node and edge counts.
    #[must_use]
    pub fn to_doc(&self) -> LifecycleDoc {
        let mut functions: Vec<LifecycleFunction> = Vec::new();
        let mut seen_bases: HashSet<&str> = HashSet::new();
        let mut order: Vec<CallOrder> = Vec::new();

        for (pred, succ) in self.edges() {
            for endpoint in [pred, succ] {
                let base = base_name(&endpoint.name);
                if seen_bases.insert(base) {
                    functions.push(LifecycleFunction {
                        name: base.to_string(),
                        scope: endpoint.scope,
                        description: endpoint.description.clone(),
                    });
                }
            }
            order.push(CallOrder {
                pred: pred.name.clone(),
                succ: succ.name.clone(),
            });
        }

        LifecycleDoc {
            lifecycle: LifecycleSection {
                functions,
                order,
                dynamic_behavior: self.dynamic_behavior().to_string(),
            },
        }
    }
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}
