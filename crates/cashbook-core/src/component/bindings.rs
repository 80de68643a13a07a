//! Event handler registrations.

use crate::dom::{Dom, NodeId};
use crate::event::{EventType, UiEvent};

use super::Handler;

/// Where a handler listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every event of the type, wherever it was fired (document and window)
    Document,
    /// Events fired on one of these elements or inside them
    Nodes(Vec<NodeId>),
    /// Events fired inside `roots` on an element matching `selector`.
    /// Empty `roots` delegates from the body.
    Delegate { roots: Vec<NodeId>, selector: String },
}

impl Target {
    pub fn node(node: NodeId) -> Self {
        Self::Nodes(vec![node])
    }

    /// Delegated from the body.
    pub fn body(selector: impl Into<String>) -> Self {
        Self::Delegate { roots: Vec::new(), selector: selector.into() }
    }

    pub fn within(roots: Vec<NodeId>, selector: impl Into<String>) -> Self {
        Self::Delegate { roots, selector: selector.into() }
    }

    /// Elements the event is delivered at, innermost first.
    fn deliveries(&self, dom: &dyn Dom, event: &UiEvent) -> Vec<Option<NodeId>> {
        match self {
            Self::Document => vec![None],
            Self::Nodes(nodes) => {
                let Some(target) = event.target else {
                    return Vec::new();
                };
                let mut hits: Vec<NodeId> = Vec::new();
                for &n in nodes {
                    if dom.contains(n, target) && !hits.contains(&n) {
                        hits.push(n);
                    }
                }
                hits.sort_by_key(|&n| std::cmp::Reverse(depth(dom, n)));
                hits.into_iter().map(Some).collect()
            },
            Self::Delegate { roots, selector } => {
                let Some(target) = event.target else {
                    return Vec::new();
                };
                let body = [dom.body()];
                let roots = if roots.is_empty() { &body[..] } else { roots.as_slice() };
                let mut hits = Vec::new();
                for &root in roots {
                    if root == target || !dom.contains(root, target) {
                        continue;
                    }
                    let mut current = Some(target);
                    while let Some(n) = current.filter(|&n| n != root) {
                        if dom.matches(n, selector) && !hits.contains(&Some(n)) {
                            hits.push(Some(n));
                        }
                        current = dom.parent(n);
                    }
                }
                hits
            },
        }
    }
}

fn depth(dom: &dyn Dom, node: NodeId) -> usize {
    std::iter::successors(dom.parent(node), |&n| dom.parent(n)).count()
}

struct Binding {
    namespace: &'static str,
    kind: EventType,
    target: Target,
    handler: Handler,
}

/// All live handler registrations, in registration order.
#[derive(Default)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    pub fn add(&mut self, namespace: &'static str, kind: EventType, target: Target, handler: Handler) {
        self.entries.push(Binding { namespace, kind, target, handler });
    }

    /// Drops every binding registered under `namespace`.
    pub fn remove_namespace(&mut self, namespace: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|b| b.namespace != namespace);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, namespace: &str) -> usize {
        self.entries.iter().filter(|b| b.namespace == namespace).count()
    }

    /// Handlers to run for `event` with the element each is delivered at.
    ///
    /// Handlers run in registration order; a handler whose target matches
    /// more than one element runs once per element, innermost first.
    pub fn matching(&self, dom: &dyn Dom, event: &UiEvent) -> Vec<(Option<NodeId>, Handler)> {
        self.entries
            .iter()
            .filter(|b| b.kind == event.kind)
            .flat_map(|b| {
                b.target
                    .deliveries(dom, event)
                    .into_iter()
                    .map(|current| (current, std::rc::Rc::clone(&b.handler)))
            })
            .collect()
    }
}
