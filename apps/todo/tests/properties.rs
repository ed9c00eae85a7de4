//! Property tests: arbitrary operation sequences against a simple model.

use proptest::prelude::*;
use std::sync::Arc;
use tasklist_runtime::Store;
use tasklist_testing::{SequentialIdGenerator, test_clock};
use todo::{TaskAction, TaskEnvironment, TaskId, TaskList, TaskReducer};

type TaskStore = Store<TaskList, TaskAction, TaskEnvironment, TaskReducer>;

/// A user operation; positions are reduced modulo the list length
#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Submit(String),
    Toggle(usize),
    Delete(usize),
    ToggleMissing,
    DeleteMissing,
    ClearCompleted,
}

fn op() -> impl Strategy<Value = Op> {
    let text = prop_oneof![
        Just(String::new()),
        "[ \t]{1,4}",
        "[ ]{0,2}[a-z]{1,8}( [a-z]{1,8})?[ ]{0,2}",
    ]
    .boxed();
    prop_oneof![
        3 => text.clone().prop_map(Op::Add),
        1 => text.prop_map(Op::Submit),
        2 => any::<usize>().prop_map(Op::Toggle),
        1 => any::<usize>().prop_map(Op::Delete),
        1 => Just(Op::ToggleMissing),
        1 => Just(Op::DeleteMissing),
        1 => Just(Op::ClearCompleted),
    ]
}

fn store() -> TaskStore {
    let env = TaskEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new()));
    Store::new(TaskList::new(), TaskReducer::new(), env)
}

fn id_at(store: &TaskStore, n: usize) -> Option<TaskId> {
    store.state(|s| {
        if s.is_empty() {
            None
        } else {
            Some(s.tasks()[n % s.len()].id)
        }
    })
}

fn snapshot(store: &TaskStore) -> Vec<(String, bool)> {
    store.state(|s| s.tasks().iter().map(|t| (t.text.clone(), t.completed)).collect())
}

/// Applies `op` to both the store and the model
fn apply(store: &mut TaskStore, model: &mut Vec<(String, bool)>, op: &Op) {
    // Never issued by the sequential generator
    let missing = TaskId::from_uuid(SequentialIdGenerator::nth(u64::MAX));

    match op {
        Op::Add(text) | Op::Submit(text) => {
            if matches!(op, Op::Add(_)) {
                store.send(TaskAction::AddTask { text: text.clone() }).ok();
            } else {
                store.send(TaskAction::UpdateDraft { text: text.clone() }).ok();
                store.send(TaskAction::Submit).ok();
            }
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                model.push((trimmed.to_string(), false));
            }
        }
        Op::Toggle(n) => {
            if let Some(id) = id_at(store, *n) {
                store.send(TaskAction::ToggleTask { id }).ok();
                let len = model.len();
                let entry = &mut model[*n % len];
                entry.1 = !entry.1;
            }
        }
        Op::Delete(n) => {
            if let Some(id) = id_at(store, *n) {
                store.send(TaskAction::DeleteTask { id }).ok();
                let len = model.len();
                model.remove(*n % len);
            }
        }
        Op::ToggleMissing => {
            store.send(TaskAction::ToggleTask { id: missing }).ok();
        }
        Op::DeleteMissing => {
            store.send(TaskAction::DeleteTask { id: missing }).ok();
        }
        Op::ClearCompleted => {
            store.send(TaskAction::ClearCompleted).ok();
            model.retain(|(_, completed)| !completed);
        }
    }
}

proptest! {
    #[test]
    fn store_matches_model_and_counts_add_up(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = store();
        let mut model = Vec::new();

        for op in &ops {
            apply(&mut store, &mut model, op);

            let counts = store.state(TaskList::counts);
            prop_assert_eq!(counts.active + counts.completed, counts.total);
            prop_assert_eq!(counts.total, store.state(TaskList::len));
            prop_assert_eq!(snapshot(&store), model.clone());
        }
    }

    #[test]
    fn ids_are_unique_and_text_is_never_blank(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = store();
        let mut model = Vec::new();

        for op in &ops {
            apply(&mut store, &mut model, op);
        }

        let (mut ids, all_trimmed) = store.state(|s| {
            let ids: Vec<TaskId> = s.tasks().iter().map(|t| t.id).collect();
            let all_trimmed = s
                .tasks()
                .iter()
                .all(|t| !t.text.is_empty() && t.text.trim() == t.text);
            (ids, all_trimmed)
        });
        prop_assert!(all_trimmed);

        let len = ids.len();
        ids.sort_by_key(|id| *id.as_uuid());
        ids.dedup();
        prop_assert_eq!(ids.len(), len);
    }

    #[test]
    fn clear_completed_is_idempotent(ops in prop::collection::vec(op(), 0..30)) {
        let mut store = store();
        let mut model = Vec::new();

        for op in &ops {
            apply(&mut store, &mut model, op);
        }

        store.send(TaskAction::ClearCompleted).ok();
        let once = store.state(Clone::clone);
        store.send(TaskAction::ClearCompleted).ok();

        prop_assert!(!once.has_completed());
        prop_assert_eq!(store.state(Clone::clone), once);
    }

    #[test]
    fn toggle_twice_is_identity(ops in prop::collection::vec(op(), 1..30), n in any::<usize>()) {
        let mut store = store();
        let mut model = Vec::new();

        for op in &ops {
            apply(&mut store, &mut model, op);
        }

        let before = store.state(Clone::clone);
        if let Some(id) = id_at(&store, n) {
            store.send(TaskAction::ToggleTask { id }).ok();
            store.send(TaskAction::ToggleTask { id }).ok();
        }

        prop_assert_eq!(store.state(Clone::clone), before);
    }
}
