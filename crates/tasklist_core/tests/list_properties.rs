use proptest::prelude::*;
use tasklist_core::{items_left_label, select_view, FilterMode, TaskList};

#[derive(Debug, Clone)]
enum Op {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Reorder(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-zA-Z ]{0,12}".prop_map(Op::Add),
        any::<usize>().prop_map(Op::Toggle),
        any::<usize>().prop_map(Op::Delete),
        (any::<usize>(), any::<usize>()).prop_map(|(from, to)| Op::Reorder(from, to)),
    ]
}

fn mode_strategy() -> impl Strategy<Value = FilterMode> {
    prop_oneof![
        Just(FilterMode::All),
        Just(FilterMode::Active),
        Just(FilterMode::Completed),
    ]
}

fn build(ops: &[Op]) -> TaskList {
    let mut list = TaskList::new();
    for op in ops {
        let len = list.len().max(1);
        // Out-of-range positions are part of the input space; errors are fine.
        let _ = match op {
            Op::Add(text) => list.add(text).map(|_| ()),
            Op::Toggle(index) => list.toggle(index % len).map(|_| ()),
            Op::Delete(index) => list.delete(index % len).map(|_| ()),
            Op::Reorder(from, to) => list.reorder(from % len, to % len).map(|_| ()),
        };
    }
    list
}

proptest! {
    #[test]
    fn snapshot_round_trip_preserves_tasks(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let list = build(&ops);
        let mut restored = TaskList::new();
        restored.hydrate(&list.to_snapshot().unwrap()).unwrap();
        prop_assert_eq!(restored, list);
    }

    #[test]
    fn select_view_never_mutates(ops in prop::collection::vec(op_strategy(), 0..40), mode in mode_strategy()) {
        let list = build(&ops);
        let before = list.clone();
        let view = select_view(list.tasks(), mode);
        prop_assert!(view.iter().all(|entry| mode.admits(entry.task)));
        prop_assert!(view.windows(2).all(|pair| pair[0].index < pair[1].index));
        prop_assert_eq!(&list, &before);
    }

    #[test]
    fn items_left_matches_open_tasks(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let list = build(&ops);
        let open = list.tasks().iter().filter(|task| !task.completed).count();
        prop_assert_eq!(list.items_left(), open);
        let label = items_left_label(open);
        if open == 1 {
            prop_assert_eq!(label, "1 item left");
        } else {
            prop_assert_eq!(label, format!("{open} items left"));
        }
    }

    #[test]
    fn delete_shifts_only_later_tasks(ops in prop::collection::vec(op_strategy(), 1..40), pick in any::<usize>()) {
        let mut list = build(&ops);
        prop_assume!(!list.is_empty());
        let index = pick % list.len();
        let before = list.tasks().to_vec();

        list.delete(index).unwrap();

        prop_assert_eq!(&list.tasks()[..index], &before[..index]);
        prop_assert_eq!(&list.tasks()[index..], &before[index + 1..]);
    }

    #[test]
    fn reorder_to_same_index_is_noop(ops in prop::collection::vec(op_strategy(), 1..40), pick in any::<usize>()) {
        let mut list = build(&ops);
        prop_assume!(!list.is_empty());
        let index = pick % list.len();
        let before = list.clone();

        prop_assert_eq!(list.reorder(index, index), Ok(false));
        prop_assert_eq!(list, before);
    }

    #[test]
    fn clear_completed_is_idempotent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut once = build(&ops);
        once.clear_completed();
        let mut twice = once.clone();
        twice.clear_completed();
        prop_assert_eq!(twice, once);
    }
}
