#![forbid(unsafe_code)]

//! Deep, chain-shaped trees must not exhaust the call stack.
//!
//! Each test builds a single 100_000-level chain and runs on a thread with
//! a 512 KiB stack, far below what one frame per level would need.

use fds_core::{Cell, Dataset, Node};
use fds_engine::cell;
use fds_engine::node::{self, NodeFilter, NodePatch};
use std::collections::HashSet;

const DEPTH: usize = 100_000;
const SMALL_STACK: usize = 512 * 1024;

/// Root-to-leaf chain; only the leaf carries a cell and the value "Leaf".
fn chain(depth: usize, id: impl Fn(usize) -> String) -> Vec<Node> {
    let mut node = Node::new(id(depth - 1))
        .with_value("Leaf")
        .with_cell("status", Cell::text("done"));
    for level in (0..depth - 1).rev() {
        node = Node::new(id(level)).with_value("Inner").child(node);
    }
    vec![node]
}

fn on_small_stack<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    std::thread::Builder::new()
        .stack_size(SMALL_STACK)
        .spawn(f)
        .expect("spawn test thread")
        .join()
        .expect("deep tree test panicked");
}

#[test]
fn read_only_walks() {
    on_small_stack(|| {
        let ds = Dataset::new().with_nodes(chain(DEPTH, |level| format!("n{level}")));
        assert_eq!(ds.node_count(), DEPTH);
        assert_eq!(node::to_stream(ds.nodes()).len(), DEPTH);

        let info = node::get_drilldown_info(ds.nodes());
        assert_eq!(info.max_depth, DEPTH);
        assert_eq!(info.max_children, 1);

        let leaf_id = format!("n{}", DEPTH - 1);
        let path = node::find_path(ds.nodes(), |n| n.id == leaf_id).unwrap();
        assert_eq!(path.depth(), DEPTH);

        let leaf = node::node_at_path(ds.nodes(), &path).unwrap();
        let parent = node::get_parent(ds.nodes.as_deref(), leaf).unwrap().unwrap();
        assert_eq!(parent.id, format!("n{}", DEPTH - 2));

        let shapes = cell::get_all_shapes(Some(&ds), false).unwrap();
        assert_eq!(shapes.values().map(Vec::len).sum::<usize>(), 1);
    });
}

#[test]
fn filter_marks_every_ancestor() {
    on_small_stack(|| {
        let ds = Dataset::new().with_nodes(chain(DEPTH, |level| format!("n{level}")));
        let result = node::filter(Some(&ds), &NodeFilter::by_value("Leaf"), false).unwrap();
        assert_eq!(result.matching_nodes.len(), 1);
        assert_eq!(result.ancestor_nodes.len(), DEPTH - 1);
        assert!(result.remaining_nodes.is_empty());
    });
}

#[test]
fn mutations() {
    on_small_stack(|| {
        // Every odd level is blank, so repaired ids stay short.
        let mut nodes = chain(DEPTH, |level| {
            if level % 2 == 1 {
                String::new()
            } else {
                format!("n{level}")
            }
        });

        node::fix_ids(&mut nodes);
        assert_eq!(nodes[0].id, "n0");
        assert_eq!(nodes[0].children()[0].id, "n0-0");
        let unique = node::iter(&nodes)
            .map(|n| n.id.as_str())
            .collect::<HashSet<_>>()
            .len();
        assert_eq!(unique, DEPTH);

        node::set_properties(&mut nodes, &NodePatch::new().with_icon("dot"), true, &[]);
        assert!(node::iter(&nodes).all(|n| n.icon.as_deref() == Some("dot")));

        let leaf = node::iter(&nodes).last().unwrap();
        let target = Node::new(leaf.id.clone())
            .with_value("Leaf")
            .with_cell("status", Cell::text("done"))
            .with_icon("dot");
        let removed = node::pop(&mut nodes, &target).unwrap();
        assert_eq!(removed, target);
        assert_eq!(node::to_stream(&nodes).len(), DEPTH - 1);

        let deepest = node::find_path(&nodes, |n| n.is_leaf()).unwrap();
        assert!(node::pop_at(&mut nodes, &deepest).is_some());
        assert_eq!(node::to_stream(&nodes).len(), DEPTH - 2);
    });
}
