// Integration tests for the layer stack: ordering, capacity, splice
// semantics, intensity falloff and change notifications.

use std::cell::RefCell;
use std::rc::Rc;

use strata_core::{LayerEntry, LayerKind, LayerStack, StackConfig, StackError, Viewport};

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn make_stack() -> LayerStack {
    LayerStack::new(StackConfig::default(), viewport(), 42)
}

fn make_stack_with_capacity(capacity: usize) -> LayerStack {
    let config = StackConfig {
        capacity,
        ..StackConfig::default()
    };
    LayerStack::new(config, viewport(), 42)
}

fn kinds(stack: &LayerStack) -> Vec<LayerKind> {
    stack.entries().iter().map(|e| e.kind).collect()
}

#[test]
fn adding_preserves_insertion_order() {
    let mut stack = make_stack();
    stack.add_layer(LayerKind::Swarm).unwrap();
    stack.add_layer(LayerKind::Drift).unwrap();
    stack.add_layer(LayerKind::Orbitals).unwrap();

    assert_eq!(stack.len(), 3);
    assert_eq!(
        kinds(&stack),
        vec![LayerKind::Swarm, LayerKind::Drift, LayerKind::Orbitals]
    );
    let entries = stack.entries();
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.index, i);
        assert!(!entry.name.is_empty());
    }
}

#[test]
fn capacity_overflow_is_rejected_without_mutation() {
    let mut stack = make_stack_with_capacity(3);
    for _ in 0..3 {
        stack.add_layer(LayerKind::Lattice).unwrap();
    }
    let before = kinds(&stack);

    let err = stack.add_layer(LayerKind::Swarm).unwrap_err();
    assert_eq!(err, StackError::AtCapacity { capacity: 3 });
    assert_eq!(stack.len(), 3, "overflowing insert must not grow the stack");
    assert_eq!(kinds(&stack), before, "overflowing insert must not mutate");
}

#[test]
fn remove_shifts_later_layers_down() {
    let mut stack = make_stack();
    stack.add_layer(LayerKind::Swarm).unwrap();
    stack.add_layer(LayerKind::Drift).unwrap();
    stack.add_layer(LayerKind::Orbitals).unwrap();
    stack.add_layer(LayerKind::FlowField).unwrap();

    stack.remove_layer(1).unwrap();

    assert_eq!(
        kinds(&stack),
        vec![LayerKind::Swarm, LayerKind::Orbitals, LayerKind::FlowField]
    );
    let entries = stack.entries();
    assert_eq!(entries[1].index, 1, "indices must compact after removal");
}

#[test]
fn remove_out_of_range_is_rejected() {
    let mut stack = make_stack();
    stack.add_layer(LayerKind::Swarm).unwrap();
    stack.add_layer(LayerKind::Drift).unwrap();

    let err = stack.remove_layer(5).unwrap_err();
    assert_eq!(err, StackError::OutOfRange { index: 5, len: 2 });
    assert_eq!(stack.len(), 2);
}

#[test]
fn move_is_a_splice_not_a_swap() {
    let mut stack = make_stack();
    stack.add_layer(LayerKind::Swarm).unwrap();
    stack.add_layer(LayerKind::Drift).unwrap();
    stack.add_layer(LayerKind::Orbitals).unwrap();
    stack.add_layer(LayerKind::FlowField).unwrap();

    // remove index 0 and reinsert at 2: everything else keeps its order
    stack.move_layer(0, 2).unwrap();
    assert_eq!(
        kinds(&stack),
        vec![
            LayerKind::Drift,
            LayerKind::Orbitals,
            LayerKind::Swarm,
            LayerKind::FlowField
        ]
    );
}

#[test]
fn move_to_own_position_is_a_noop() {
    let mut stack = make_stack();
    stack.add_layer(LayerKind::Swarm).unwrap();
    stack.add_layer(LayerKind::Drift).unwrap();
    let before = kinds(&stack);

    stack.move_layer(1, 1).unwrap();
    assert_eq!(kinds(&stack), before);
}

#[test]
fn move_out_of_range_is_rejected() {
    let mut stack = make_stack();
    stack.add_layer(LayerKind::Swarm).unwrap();
    stack.add_layer(LayerKind::Drift).unwrap();

    assert_eq!(
        stack.move_layer(7, 0).unwrap_err(),
        StackError::OutOfRange { index: 7, len: 2 }
    );
    assert_eq!(
        stack.move_layer(0, 9).unwrap_err(),
        StackError::OutOfRange { index: 9, len: 2 }
    );
    assert_eq!(stack.len(), 2);
}

#[test]
fn intensity_top_is_one_and_falloff_is_monotonic() {
    let mut stack = make_stack();
    for _ in 0..12 {
        stack.add_layer(LayerKind::Lattice).unwrap();
    }
    let n = stack.len();
    let config = *stack.config();

    assert_eq!(stack.intensity(n - 1), 1.0, "top layer is always full");

    let mut prev = stack.intensity(n - 1);
    for i in (0..n - 1).rev() {
        let v = stack.intensity(i);
        assert!(
            v <= prev,
            "intensity must not increase with depth: {v} > {prev} at {i}"
        );
        assert!(
            v >= config.intensity_floor && v <= config.intensity_ceil,
            "intensity {v} escapes [{}, {}]",
            config.intensity_floor,
            config.intensity_ceil
        );
        prev = v;
    }
    // depth 11 is past the reference range, so the bottom sits on the floor
    assert!((stack.intensity(0) - config.intensity_floor).abs() < 1e-6);
}

#[test]
fn intensity_drops_one_tier_below_the_top() {
    let mut stack = make_stack();
    stack.add_layer(LayerKind::Swarm).unwrap();
    stack.add_layer(LayerKind::Drift).unwrap();
    stack.add_layer(LayerKind::Orbitals).unwrap();
    stack.add_layer(LayerKind::FlowField).unwrap();

    let config = *stack.config();
    let tier = (config.intensity_ceil - config.intensity_floor) / config.intensity_depth_range;
    assert_eq!(stack.intensity(3), 1.0);
    let expected = config.intensity_ceil - tier;
    assert!((stack.intensity(2) - expected).abs() < 1e-6);
}

#[test]
fn randomize_stays_in_range_with_valid_kinds() {
    let mut stack = make_stack();
    let config = *stack.config();
    for _ in 0..20 {
        stack.randomize();
        assert!(
            stack.len() >= config.randomize_min && stack.len() <= config.randomize_max,
            "randomized length {} escapes [{}, {}]",
            stack.len(),
            config.randomize_min,
            config.randomize_max
        );
        for entry in stack.entries() {
            assert!(LayerKind::ALL.contains(&entry.kind));
        }
    }
}

#[test]
fn randomize_respects_a_small_capacity() {
    let mut stack = make_stack_with_capacity(6);
    for _ in 0..20 {
        stack.randomize();
        assert!(stack.len() <= 6, "randomize may never exceed capacity");
        assert!(stack.len() >= 5);
    }
}

#[test]
fn listener_sees_every_nonsilent_mutation_once() {
    let seen: Rc<RefCell<Vec<Vec<LayerEntry>>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_tap = Rc::clone(&seen);

    let mut stack = make_stack();
    stack.set_listener(Box::new(move |entries| {
        seen_tap.borrow_mut().push(entries.to_vec());
    }));

    stack.add_layer(LayerKind::Swarm).unwrap();
    stack.add_layer(LayerKind::Drift).unwrap();
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(seen.borrow()[1].len(), 2);
    assert_eq!(seen.borrow()[1][1].kind, LayerKind::Drift);

    stack.remove_layer(0).unwrap();
    assert_eq!(seen.borrow().len(), 3);
    assert_eq!(seen.borrow()[2].len(), 1);

    stack.add_layer(LayerKind::Orbitals).unwrap();
    stack.move_layer(0, 1).unwrap();
    assert_eq!(seen.borrow().len(), 5);

    // randomize performs silent inserts and one trailing notification
    stack.randomize();
    assert_eq!(seen.borrow().len(), 6);
    let last = seen.borrow().last().cloned().unwrap_or_default();
    assert_eq!(last.len(), stack.len());
}

#[test]
fn silent_add_does_not_notify() {
    let count = Rc::new(RefCell::new(0usize));
    let count_tap = Rc::clone(&count);

    let mut stack = make_stack();
    stack.set_listener(Box::new(move |_| {
        *count_tap.borrow_mut() += 1;
    }));

    stack.add_layer_silent(LayerKind::Swarm).unwrap();
    assert_eq!(*count.borrow(), 0);
    assert_eq!(stack.len(), 1);
}

#[test]
fn add_remove_move_sequence_from_three_layers() {
    // [A, B, C] with C on top; add D; remove A; move bottom up one
    let mut stack = make_stack();
    stack.add_layer(LayerKind::Swarm).unwrap(); // A
    stack.add_layer(LayerKind::Drift).unwrap(); // B
    stack.add_layer(LayerKind::Orbitals).unwrap(); // C

    stack.add_layer(LayerKind::FlowField).unwrap(); // D
    assert_eq!(stack.len(), 4);
    assert_eq!(stack.intensity(3), 1.0, "D is the new top");
    assert!(stack.intensity(2) < 1.0, "C dropped a tier");

    stack.remove_layer(0).unwrap();
    assert_eq!(
        kinds(&stack),
        vec![LayerKind::Drift, LayerKind::Orbitals, LayerKind::FlowField]
    );

    stack.move_layer(0, 1).unwrap();
    assert_eq!(
        kinds(&stack),
        vec![LayerKind::Orbitals, LayerKind::Drift, LayerKind::FlowField]
    );
}
