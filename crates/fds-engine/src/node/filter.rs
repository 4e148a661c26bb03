#![forbid(unsafe_code)]

//! Multi-criterion filtering that partitions a tree into matches, their
//! ancestors, and everything else.
//!
//! A tree view keeps matches and ancestors visible (ancestors expanded but
//! not highlighted) and hides the remainder. The three lists always form a
//! partition of the tree: every node appears in exactly one of them, and a
//! node that matches is never reported as an ancestor even when it also
//! contains matches.

use fds_core::{Dataset, DatasetError, Node, NodeValue, Result, debug, debug_span, warn};

/// Partial node used as filter criteria. Every `Some` field must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeFilter {
    pub id: Option<String>,
    pub value: Option<NodeValue>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl NodeFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on id only.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().with_id(id)
    }

    /// Filter on value only.
    #[must_use]
    pub fn by_value(value: impl Into<NodeValue>) -> Self {
        Self::new().with_value(value)
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<NodeValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// True when no criterion is set; such a filter matches every node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.value.is_none() && self.description.is_none() && self.icon.is_none()
    }

    /// Whether `node` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, node: &Node, options: &FilterOptions) -> bool {
        self.id
            .as_deref()
            .is_none_or(|id| options.text_matches(id, Some(node.id.as_str())))
            && self
                .value
                .as_ref()
                .is_none_or(|value| options.value_matches(value, node.value.as_ref()))
            && self
                .description
                .as_deref()
                .is_none_or(|d| options.text_matches(d, node.description.as_deref()))
            && self
                .icon
                .as_deref()
                .is_none_or(|icon| options.text_matches(icon, node.icon.as_deref()))
    }
}

/// How filter criteria are compared against node fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    partial_match: bool,
    case_sensitive: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            partial_match: false,
            case_sensitive: true,
        }
    }
}

impl FilterOptions {
    /// Exact, case-sensitive comparison.
    #[must_use]
    pub fn exact() -> Self {
        Self::default()
    }

    /// Substring comparison for string fields.
    #[must_use]
    pub fn partial() -> Self {
        Self::default().with_partial_match(true)
    }

    #[must_use]
    pub fn with_partial_match(mut self, partial_match: bool) -> Self {
        self.partial_match = partial_match;
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn partial_match(&self) -> bool {
        self.partial_match
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    fn text_matches(&self, wanted: &str, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        if self.case_sensitive {
            self.compare(wanted, actual)
        } else {
            self.compare(&wanted.to_lowercase(), &actual.to_lowercase())
        }
    }

    fn compare(&self, wanted: &str, actual: &str) -> bool {
        if self.partial_match {
            actual.contains(wanted)
        } else {
            actual == wanted
        }
    }

    // Substring matching only applies to text; numbers compare by value.
    fn value_matches(&self, wanted: &NodeValue, actual: Option<&NodeValue>) -> bool {
        match (wanted, actual) {
            (NodeValue::Text(wanted), Some(NodeValue::Text(actual))) => {
                self.text_matches(wanted, Some(actual.as_str()))
            }
            (NodeValue::Number(wanted), Some(NodeValue::Number(actual))) => {
                wanted == actual || wanted.as_f64().is_some_and(|w| actual.as_f64() == Some(w))
            }
            _ => false,
        }
    }
}

/// Where a node landed in a [`FilterResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Matching,
    Ancestor,
    Remaining,
}

/// Partition of a tree produced by [`filter`]. Each list is in pre-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterResult<'a> {
    pub matching_nodes: Vec<&'a Node>,
    pub ancestor_nodes: Vec<&'a Node>,
    pub remaining_nodes: Vec<&'a Node>,
}

impl<'a> FilterResult<'a> {
    /// Ids of the matching nodes, in pre-order.
    #[must_use]
    pub fn matching_ids(&self) -> Vec<&'a str> {
        self.matching_nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Role of the first node with `id`, if it is in the tree.
    #[must_use]
    pub fn role_of(&self, id: &str) -> Option<NodeRole> {
        let has = |nodes: &[&Node]| nodes.iter().any(|n| n.id == id);
        if has(&self.matching_nodes) {
            Some(NodeRole::Matching)
        } else if has(&self.ancestor_nodes) {
            Some(NodeRole::Ancestor)
        } else if has(&self.remaining_nodes) {
            Some(NodeRole::Remaining)
        } else {
            None
        }
    }

    /// Whether the node with `id` should stay visible (match or ancestor).
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        matches!(
            self.role_of(id),
            Some(NodeRole::Matching | NodeRole::Ancestor)
        )
    }

    /// Total number of nodes across all three lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matching_nodes.len() + self.ancestor_nodes.len() + self.remaining_nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition `dataset` by `filters`, exact or substring per `partial_match`.
///
/// Fails when `dataset` is missing. A dataset whose `nodes` is absent gives
/// an empty result.
pub fn filter<'a>(
    dataset: Option<&'a Dataset>,
    filters: &NodeFilter,
    partial_match: bool,
) -> Result<FilterResult<'a>> {
    filter_with(
        dataset,
        filters,
        &FilterOptions::default().with_partial_match(partial_match),
    )
}

/// [`filter`] with full control over comparison.
pub fn filter_with<'a>(
    dataset: Option<&'a Dataset>,
    filters: &NodeFilter,
    options: &FilterOptions,
) -> Result<FilterResult<'a>> {
    let dataset = dataset.ok_or_else(|| {
        warn!("filter called without a dataset");
        DatasetError::MissingDataset { operation: "filter" }
    })?;
    let _span = debug_span!(
        "dataset.filter",
        partial_match = options.partial_match(),
        case_sensitive = options.case_sensitive()
    )
    .entered();

    let roles = classify(dataset.nodes(), filters, options);

    let mut result = FilterResult::default();
    for (node, role) in roles {
        match role {
            NodeRole::Matching => result.matching_nodes.push(node),
            NodeRole::Ancestor => result.ancestor_nodes.push(node),
            NodeRole::Remaining => result.remaining_nodes.push(node),
        }
    }
    debug!(
        matching = result.matching_nodes.len(),
        ancestors = result.ancestor_nodes.len(),
        remaining = result.remaining_nodes.len(),
        "filter complete"
    );
    Ok(result)
}

/// Open subtree during classification.
struct Frame<'a> {
    node: &'a Node,
    slot: usize,
    matched: bool,
    below: bool,
    next_child: usize,
}

/// Each node's role, in pre-order.
///
/// Walks on an explicit frame stack; a node's role is settled once its
/// whole subtree has been visited.
fn classify<'a>(
    nodes: &'a [Node],
    filters: &NodeFilter,
    options: &FilterOptions,
) -> Vec<(&'a Node, NodeRole)> {
    let mut roles = Vec::new();
    let mut stack: Vec<Frame<'a>> = Vec::new();
    let open = |node: &'a Node, roles: &mut Vec<(&'a Node, NodeRole)>| {
        let slot = roles.len();
        roles.push((node, NodeRole::Remaining));
        Frame {
            node,
            slot,
            matched: filters.matches(node, options),
            below: false,
            next_child: 0,
        }
    };

    for root in nodes {
        let frame = open(root, &mut roles);
        stack.push(frame);
        while let Some(top) = stack.last_mut() {
            let node = top.node;
            let next = node.children().get(top.next_child);
            top.next_child += 1;
            if let Some(child) = next {
                let frame = open(child, &mut roles);
                stack.push(frame);
                continue;
            }
            let Some(done) = stack.pop() else {
                break;
            };
            roles[done.slot].1 = if done.matched {
                NodeRole::Matching
            } else if done.below {
                NodeRole::Ancestor
            } else {
                NodeRole::Remaining
            };
            if let Some(parent) = stack.last_mut() {
                parent.below |= done.matched || done.below;
            }
        }
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new().with_nodes(vec![
            Node::new("root1")
                .with_value("Root 1")
                .child(Node::new("child1").with_value("Child 1"))
                .child(
                    Node::new("branch")
                        .with_value("Branch")
                        .child(Node::new("leaf").with_value(7)),
                ),
            Node::new("root2")
                .with_value("Root 2")
                .child(Node::new("child2").with_value("Child 2")),
            Node::new("root3").with_value("Root 3"),
        ])
    }

    fn ids(nodes: &[&Node]) -> Vec<String> {
        nodes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn exact_id_match() {
        let ds = dataset();
        let result = filter(Some(&ds), &NodeFilter::by_id("root1"), false).unwrap();
        assert_eq!(ids(&result.matching_nodes), ["root1"]);
        assert!(result.ancestor_nodes.is_empty());
        assert_eq!(result.len(), ds.node_count());
    }

    #[test]
    fn partial_value_match() {
        let ds = dataset();
        let result = filter(Some(&ds), &NodeFilter::by_value("Child"), true).unwrap();
        assert_eq!(ids(&result.matching_nodes), ["child1", "child2"]);
        assert_eq!(ids(&result.ancestor_nodes), ["root1", "root2"]);
        assert_eq!(
            ids(&result.remaining_nodes),
            ["branch", "leaf", "root3"]
        );
    }

    #[test]
    fn exact_value_requires_whole_string() {
        let ds = dataset();
        let result = filter(Some(&ds), &NodeFilter::by_value("Child"), false).unwrap();
        assert!(result.matching_nodes.is_empty());
        assert!(result.ancestor_nodes.is_empty());
    }

    #[test]
    fn no_matches_is_valid() {
        let ds = dataset();
        let result = filter(Some(&ds), &NodeFilter::by_value("Nope"), true).unwrap();
        assert_eq!(result.matching_nodes.len(), 0);
        assert!(result.ancestor_nodes.is_empty());
        assert_eq!(result.remaining_nodes.len(), ds.node_count());
    }

    #[test]
    fn deep_match_marks_all_ancestors() {
        let ds = dataset();
        let result = filter(Some(&ds), &NodeFilter::by_value(7), false).unwrap();
        assert_eq!(ids(&result.matching_nodes), ["leaf"]);
        assert_eq!(ids(&result.ancestor_nodes), ["root1", "branch"]);
        assert!(result.is_visible("branch"));
        assert!(!result.is_visible("child1"));
        assert_eq!(result.role_of("root1"), Some(NodeRole::Ancestor));
        assert_eq!(result.role_of("ghost"), None);
    }

    #[test]
    fn matching_parent_is_not_an_ancestor() {
        let ds = dataset();
        let result = filter(Some(&ds), &NodeFilter::by_value("o"), true).unwrap();
        // "Root 1" and "Root 2" contain "o" themselves.
        assert_eq!(ids(&result.matching_nodes), ["root1", "root2", "root3"]);
        assert!(result.ancestor_nodes.is_empty());
    }

    #[test]
    fn number_never_substring_matches() {
        let ds = Dataset::new().with_nodes(vec![Node::new("n").with_value(1234)]);
        let result = filter(Some(&ds), &NodeFilter::by_value("23"), true).unwrap();
        assert!(result.matching_nodes.is_empty());
        let result = filter(Some(&ds), &NodeFilter::by_value(1234), true).unwrap();
        assert_eq!(result.matching_ids(), ["n"]);
    }

    #[test]
    fn all_criteria_must_hold() {
        let ds = dataset();
        let both = NodeFilter::by_id("child1").with_value("Child 1");
        assert_eq!(filter(Some(&ds), &both, false).unwrap().matching_ids(), ["child1"]);
        let conflicting = NodeFilter::by_id("child1").with_value("Child 2");
        assert!(filter(Some(&ds), &conflicting, false).unwrap().matching_nodes.is_empty());
    }

    #[test]
    fn empty_filter_matches_everything() {
        let ds = dataset();
        let result = filter(Some(&ds), &NodeFilter::new(), false).unwrap();
        assert_eq!(result.matching_nodes.len(), ds.node_count());
    }

    #[test]
    fn case_insensitive_option() {
        let ds = dataset();
        let options = FilterOptions::partial().with_case_sensitive(false);
        let result = filter_with(Some(&ds), &NodeFilter::by_value("child"), &options).unwrap();
        assert_eq!(result.matching_ids(), ["child1", "child2"]);
        let strict = filter(Some(&ds), &NodeFilter::by_value("child"), true).unwrap();
        assert!(strict.matching_nodes.is_empty());
    }

    #[test]
    fn missing_dataset_fails() {
        let err = filter(None, &NodeFilter::by_id("root1"), false).unwrap_err();
        assert_eq!(err, DatasetError::MissingDataset { operation: "filter" });
    }

    #[test]
    fn absent_nodes_is_empty_result() {
        let ds = Dataset::new();
        let result = filter(Some(&ds), &NodeFilter::by_id("x"), false).unwrap();
        assert!(result.is_empty());
    }
}
