//! Property tests: arbitrary pointer, keyboard and toolbar sequences never
//! leave the editor pointing at dead entities or stuck mid-gesture.

use flow_core::{NodeId, NodeKind, Point, Selection, Side};
use flow_editor::{Editor, InputEvent, ToolKind};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Phase {
    Down,
    Move,
    Up,
    DoubleClick,
}

#[derive(Clone, Debug)]
enum Op {
    /// Pointer event at an arbitrary client point.
    Pointer { phase: Phase, x: u16, y: u16 },
    /// Pointer event aimed at one of a node's handles.
    AtHandle { phase: Phase, idx: u16, side: u8 },
    Key(&'static str),
    AddNode { x: u16, y: u16 },
    DeleteNode { idx: u16 },
    Mode(ToolKind),
}

fn phase_strategy() -> impl Strategy<Value = Phase> {
    prop_oneof![
        Just(Phase::Down),
        Just(Phase::Move),
        Just(Phase::Up),
        Just(Phase::DoubleClick),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (phase_strategy(), 0u16..600, 0u16..400)
            .prop_map(|(phase, x, y)| Op::Pointer { phase, x, y }),
        2 => (phase_strategy(), any::<u16>(), 0u8..4)
            .prop_map(|(phase, idx, side)| Op::AtHandle { phase, idx, side }),
        1 => prop_oneof![Just("Delete"), Just("Backspace"), Just("v"), Just("h")].prop_map(Op::Key),
        2 => (0u16..500, 0u16..300).prop_map(|(x, y)| Op::AddNode { x, y }),
        1 => any::<u16>().prop_map(|idx| Op::DeleteNode { idx }),
        1 => prop_oneof![Just(ToolKind::Select), Just(ToolKind::Pan)].prop_map(Op::Mode),
    ]
}

fn sequence_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 5..80)
}

fn pick(nodes: &[NodeId], idx: u16) -> Option<NodeId> {
    if nodes.is_empty() {
        None
    } else {
        Some(nodes[idx as usize % nodes.len()])
    }
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Dispatch a pointer event. Returns whether it was a release.
fn pointer(editor: &mut Editor, phase: Phase, client: Point) -> bool {
    let target = editor.hit_test(client);
    let event = match phase {
        Phase::Down => InputEvent::PointerDown { client, target },
        Phase::Move => InputEvent::PointerMove { client, target },
        Phase::Up => InputEvent::PointerUp { client, target },
        Phase::DoubleClick => InputEvent::DoubleClick { client, target },
    };
    editor.handle(event);
    matches!(phase, Phase::Up)
}

/// Client point of a node's handle under the current pan.
fn handle_point(editor: &Editor, id: NodeId, side: Side) -> Option<Point> {
    let node = editor.store().node(id)?;
    let size = editor.config().node_size;
    let p = node.position + editor.pan();
    Some(match side {
        Side::Left => Point::new(p.x, p.y + size.height / 2.0),
        Side::Right => Point::new(p.x + size.width, p.y + size.height / 2.0),
        Side::Top => Point::new(p.x + size.width / 2.0, p.y),
        Side::Bottom => Point::new(p.x + size.width / 2.0, p.y + size.height),
    })
}

/// Apply one op. Returns whether a pointer release was dispatched.
fn apply_op(editor: &mut Editor, op: Op) -> bool {
    let nodes: Vec<NodeId> = editor.store().nodes().iter().map(|n| n.id).collect();
    match op {
        Op::Pointer { phase, x, y } => {
            return pointer(editor, phase, Point::new(f64::from(x), f64::from(y)));
        }
        Op::AtHandle { phase, idx, side } => {
            let side = [Side::Left, Side::Right, Side::Top, Side::Bottom][usize::from(side)];
            if let Some(client) = pick(&nodes, idx).and_then(|id| handle_point(editor, id, side)) {
                return pointer(editor, phase, client);
            }
        }
        Op::Key(key) => {
            editor.handle(InputEvent::Key { key: key.into() });
        }
        Op::AddNode { x, y } => {
            editor.add_node(
                NodeKind::intern("default"),
                Point::new(f64::from(x), f64::from(y)),
            );
        }
        Op::DeleteNode { idx } => {
            if let Some(id) = pick(&nodes, idx) {
                editor.delete_node(id);
            }
        }
        Op::Mode(mode) => {
            editor.set_mode(mode);
        }
    }
    false
}

fn check_editor(editor: &Editor) -> Result<(), TestCaseError> {
    let store = editor.store();
    prop_assert!(store.check_invariants().is_ok(), "{:?}", store.check_invariants());

    match editor.selection() {
        Some(Selection::Node(id)) => prop_assert!(store.contains_node(id), "selected {id} is gone"),
        Some(Selection::Edge(id)) => prop_assert!(store.contains_edge(id), "selected {id} is gone"),
        None => {}
    }
    if let Some(pending) = editor.pending_connection() {
        prop_assert!(store.contains_node(pending.source));
    }
    if let Some(id) = editor.hovered() {
        prop_assert!(store.contains_node(id));
    }

    let scene = editor.scene();
    let selected = scene.nodes.iter().filter(|n| n.is_selected).count()
        + scene.edges.iter().filter(|e| e.is_selected).count();
    prop_assert!(selected <= 1, "{selected} entities selected");
    prop_assert_eq!(scene.edges.len(), store.edge_count());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]
    #[test]
    fn editor_state_stays_consistent(seq in sequence_strategy()) {
        init();
        let mut editor = Editor::default();
        editor.mount();
        for op in seq {
            let released = apply_op(&mut editor, op);
            check_editor(&editor)?;
            if released {
                prop_assert!(editor.is_idle(), "gesture survived pointer release");
            }
        }
    }
}
