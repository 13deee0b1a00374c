//! Property tests: structural invariants of the graph store hold under
//! arbitrary interleavings of create / move / connect / delete.

use flow_core::{EdgeId, GraphStore, NodeId, NodeKind, Point};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
enum Op {
    AddNode { x: i16, y: i16 },
    MoveNode { idx: u16, dx: i8, dy: i8 },
    RemoveNode { idx: u16 },
    AddEdge { a: u16, b: u16 },
    RemoveEdge { idx: u16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::AddNode { x, y }),
        (any::<u16>(), any::<i8>(), any::<i8>()).prop_map(|(idx, dx, dy)| Op::MoveNode {
            idx,
            dx,
            dy,
        }),
        any::<u16>().prop_map(|idx| Op::RemoveNode { idx }),
        (any::<u16>(), any::<u16>()).prop_map(|(a, b)| Op::AddEdge { a, b }),
        any::<u16>().prop_map(|idx| Op::RemoveEdge { idx }),
    ]
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 5..60)
}

fn pick<T: Copy>(items: &[T], idx: u16) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[idx as usize % items.len()])
    }
}

/// Ids seen so far, to check that nothing is ever handed out twice.
#[derive(Default)]
struct Issued {
    nodes: HashSet<NodeId>,
    edges: HashSet<EdgeId>,
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn apply_op(store: &mut GraphStore, issued: &mut Issued, op: Op) {
    let nodes: Vec<NodeId> = store.nodes().iter().map(|n| n.id).collect();
    let edges: Vec<EdgeId> = store.edges().iter().map(|e| e.id).collect();
    match op {
        Op::AddNode { x, y } => {
            let id = store.add_node(
                NodeKind::intern("default"),
                Point::new(f64::from(x), f64::from(y)),
            );
            assert!(issued.nodes.insert(id), "node id {id} was reused");
        }
        Op::MoveNode { idx, dx, dy } => {
            if let Some(id) = pick(&nodes, idx) {
                let p = store.node(id).map(|n| n.position).unwrap_or_default();
                store.move_node(id, Point::new(p.x + f64::from(dx), p.y + f64::from(dy)));
            }
        }
        Op::RemoveNode { idx } => {
            if let Some(id) = pick(&nodes, idx) {
                store.delete_node(id);
                assert!(
                    store.edges().iter().all(|e| !e.touches(id)),
                    "edge survived deletion of {id}"
                );
            }
        }
        Op::AddEdge { a, b } => {
            if let (Some(a), Some(b)) = (pick(&nodes, a), pick(&nodes, b)) {
                let already = store.connects(a, b);
                let before = store.edge_count();
                match store.add_edge(a, b) {
                    Some(id) => {
                        assert!(a != b && !already);
                        assert!(issued.edges.insert(id), "edge id {id} was reused");
                    }
                    None => {
                        assert!(a == b || already);
                        assert_eq!(store.edge_count(), before);
                    }
                }
            }
        }
        Op::RemoveEdge { idx } => {
            if let Some(id) = pick(&edges, idx) {
                store.delete_edge(id);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, .. ProptestConfig::default() })]
    #[test]
    fn store_edit_invariants(seq in sequence_strategy()) {
        init();
        let mut store = GraphStore::default();
        let mut issued = Issued::default();
        for op in seq {
            apply_op(&mut store, &mut issued, op);
            prop_assert!(store.check_invariants().is_ok(), "{:?}", store.check_invariants());
        }
    }

    #[test]
    fn one_edge_per_unordered_pair(flip in any::<bool>(), repeats in 1usize..5) {
        let mut store = GraphStore::default();
        let a = store.add_node(NodeKind::intern("default"), Point::ZERO);
        let b = store.add_node(NodeKind::intern("default"), Point::new(200.0, 0.0));
        for i in 0..repeats {
            if (i % 2 == 0) ^ flip {
                store.add_edge(a, b);
            } else {
                store.add_edge(b, a);
            }
        }
        prop_assert_eq!(store.edge_count(), 1);
    }
}

#[test]
fn self_loop_never_created() {
    init();
    let mut store = GraphStore::default();
    for i in 0..10 {
        let a = store.add_node(NodeKind::intern("default"), Point::new(f64::from(i), 0.0));
        assert!(store.add_edge(a, a).is_none());
    }
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn delete_scenario_keeps_other_endpoint() {
    let mut store = GraphStore::default();
    let a = store.add_node(NodeKind::intern("default"), Point::ZERO);
    let b = store.add_node(NodeKind::intern("default"), Point::new(200.0, 0.0));
    store.add_edge(a, b).unwrap();

    store.delete_node(a);
    assert!(!store.contains_node(a));
    assert!(store.contains_node(b));
    assert_eq!(store.node_count(), 1);
    assert_eq!(store.edge_count(), 0);
}
