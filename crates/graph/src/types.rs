use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a lifecycle function belongs to a page or a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Page,
    Component,
}

impl Scope {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Page => "page",
            Scope::Component => "component",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named lifecycle callback with its scope and free-text description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleFunction {
    pub name: String,
    pub scope: Scope,
    pub description: String,
}

/// One observed ordering assertion: `pred` is invoked before `succ`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOrder {
    pub pred: String,
    pub succ: String,
}

/// Canonical document shape shared by the parser's input and the graph's
/// round-trip export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleDoc {
    pub lifecycle: LifecycleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleSection {
    pub functions: Vec<LifecycleFunction>,
    pub order: Vec<CallOrder>,
    #[serde(rename = "dynamicBehavior", default)]
    pub dynamic_behavior: String,
}

/// Base function name for an instance name: the text after the final `.`
/// separator, or the whole name when there is no separator (or the trailing
/// segment is empty, as in `"weird."`).
///
/// e.g. `"Component.method"` -> `"method"`, `"method"` -> `"method"`.
#[must_use]
pub fn base_name(instance: &str) -> &str {
    match instance.rsplit_once('.') {
        Some((_, base)) if !base.is_empty() => base,
        _ => instance,
    }
}
