use std::cell::RefCell;
use std::rc::Rc;

use vecdraw::command::{Action, ActionKind, HistoryManager};
use vecdraw::event::EditorEvent;

/// Minimal context: a running total plus a log of replayed steps
#[derive(Debug, Default)]
struct Counter {
    value: i32,
    log: Vec<String>,
}

// Helper that applies `amount` immediately and returns the matching action
fn add(counter: &mut Counter, amount: i32, name: &str) -> Action<Counter> {
    counter.value += amount;
    let undo_name = name.to_string();
    let redo_name = name.to_string();
    Action::from_fns(
        ActionKind::ModifyElement,
        format!("Add {}", name),
        move |c: &mut Counter| {
            c.value -= amount;
            c.log.push(format!("undo {}", undo_name));
        },
        move |c: &mut Counter| {
            c.value += amount;
            c.log.push(format!("redo {}", redo_name));
        },
    )
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_undo_redo_round_trip() {
    init_logger();
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    for (i, amount) in [3, 5, -2, 10].into_iter().enumerate() {
        let action = add(&mut counter, amount, &format!("step {}", i));
        history.add_action(action);
    }
    assert_eq!(counter.value, 16);

    while history.undo(&mut counter).is_some() {}
    assert_eq!(counter.value, 0);
    assert_eq!(history.redo_len(), 4);

    while history.redo(&mut counter).is_some() {}
    assert_eq!(counter.value, 16);
    assert_eq!(history.undo_len(), 4);
    assert!(!history.can_redo());
}

#[test]
fn test_group_is_one_entry_and_undoes_in_reverse() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    history.begin_action_group("Three steps");
    for name in ["a", "b", "c"] {
        let action = add(&mut counter, 1, name);
        history.add_action(action);
    }
    let closed = history.end_action_group().expect("group should be open");
    assert!(closed.is_pushed());
    let group = closed.action();
    assert!(group.is_group());
    assert_eq!(group.children().len(), 3);
    assert_eq!(group.kind(), ActionKind::CompositeAction);

    assert_eq!(history.undo_len(), 1);
    assert_eq!(history.undo_description(), Some("Three steps"));

    history.undo(&mut counter);
    assert_eq!(counter.value, 0);
    assert_eq!(counter.log, vec!["undo c", "undo b", "undo a"]);

    counter.log.clear();
    history.redo(&mut counter);
    assert_eq!(counter.value, 3);
    assert_eq!(counter.log, vec!["redo a", "redo b", "redo c"]);
}

#[test]
fn test_empty_group_is_discarded() {
    let mut history: HistoryManager<Counter> = HistoryManager::new(50);
    history.begin_action_group("Nothing");
    assert!(history.is_group_open());

    // The empty group is handed back but never reaches the stack
    let closed = history.end_action_group().expect("group should be open");
    assert!(!closed.is_pushed());
    assert_eq!(closed.action().description(), "Nothing");
    assert!(closed.action().children().is_empty());

    assert!(!history.is_group_open());
    assert_eq!(history.undo_len(), 0);
    assert!(history.end_action_group().is_none());
}

#[test]
fn test_group_can_carry_its_own_kind() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    history.begin_action_group_with_kind(ActionKind::ClearCanvas, "Wipe");
    let action = add(&mut counter, -3, "wipe");
    history.add_action(action);
    history.end_action_group();

    let snapshot = history.serialize_history();
    assert_eq!(snapshot.undo_stack[0].kind, ActionKind::ClearCanvas);
    assert_eq!(snapshot.undo_stack[0].actions.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_begin_group_closes_open_group() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    history.begin_action_group("First");
    let action = add(&mut counter, 1, "a");
    history.add_action(action);

    history.begin_action_group("Second");
    let action = add(&mut counter, 2, "b");
    history.add_action(action);
    history.end_action_group();

    let summary = history.history_summary(10);
    let descriptions: Vec<_> = summary.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Second", "First"]);
}

#[test]
fn test_undo_closes_open_group_first() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    history.begin_action_group("Open");
    let action = add(&mut counter, 4, "a");
    history.add_action(action);

    let undone = history.undo(&mut counter).map(|a| a.description().to_string());
    assert_eq!(undone.as_deref(), Some("Open"));
    assert!(!history.is_group_open());
    assert_eq!(counter.value, 0);
}

#[test]
fn test_new_action_invalidates_redo() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    let first = add(&mut counter, 1, "a");
    let first_id = first.id().to_string();
    history.add_action(first);
    history.undo(&mut counter);
    assert!(history.can_redo());
    assert!(history.action_by_id(&first_id).is_some());

    let action = add(&mut counter, 7, "b");
    history.add_action(action);
    assert!(!history.can_redo());
    assert_eq!(history.redo_len(), 0);
    assert!(history.action_by_id(&first_id).is_none());
    assert!(history.redo(&mut counter).is_none());
    assert_eq!(counter.value, 7);
}

#[test]
fn test_history_is_bounded() {
    let mut counter = Counter::default();
    let max = 10;
    let mut history = HistoryManager::new(max);

    let mut ids = Vec::new();
    for i in 0..max + 5 {
        let action = add(&mut counter, 1, &format!("{}", i));
        ids.push(action.id().to_string());
        history.add_action(action);
    }

    assert_eq!(history.undo_len(), max);
    for id in &ids[..5] {
        assert!(history.action_by_id(id).is_none(), "evicted action still indexed");
    }
    for id in &ids[5..] {
        assert!(history.action_by_id(id).is_some());
    }
}

#[test]
fn test_empty_undo_is_noop_and_still_notifies() {
    let mut counter = Counter::default();
    let mut history: HistoryManager<Counter> = HistoryManager::new(50);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    history.register_action_listener(move |can_undo, can_redo| {
        sink.borrow_mut().push((can_undo, can_redo));
    });

    assert!(history.undo(&mut counter).is_none());
    assert!(history.redo(&mut counter).is_none());
    assert_eq!(*seen.borrow(), vec![(false, false), (false, false)]);
}

#[test]
fn test_listener_sees_each_transition() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    history.subscribe(Box::new(move |event: &EditorEvent| {
        if let EditorEvent::HistoryChanged { can_undo, can_redo } = event {
            sink.borrow_mut().push((*can_undo, *can_redo));
        }
    }));

    let action = add(&mut counter, 1, "a");
    history.add_action(action);
    history.undo(&mut counter);
    history.redo(&mut counter);
    history.clear();

    assert_eq!(
        *seen.borrow(),
        vec![(true, false), (false, true), (true, false), (false, false)]
    );
}

#[test]
fn test_every_add_notifies_inside_a_group() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    history.register_action_listener(move |can_undo, can_redo| {
        sink.borrow_mut().push((can_undo, can_redo))
    });

    history.begin_action_group("Batch");
    for name in ["a", "b"] {
        let action = add(&mut counter, 1, name);
        history.add_action(action);
    }
    // The group is not on the stack yet, so the flags are unchanged
    assert_eq!(*seen.borrow(), vec![(false, false), (false, false)]);

    history.end_action_group();
    assert_eq!(seen.borrow().len(), 3);
    assert_eq!(seen.borrow().last(), Some(&(true, false)));
}

#[test]
fn test_clear_drops_everything() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    let action = add(&mut counter, 1, "a");
    let id = action.id().to_string();
    history.add_action(action);
    let action = add(&mut counter, 1, "b");
    history.add_action(action);
    history.undo(&mut counter);
    history.begin_action_group("Pending");

    history.clear();
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert!(!history.is_group_open());
    assert!(history.action_by_id(&id).is_none());
}

#[test]
fn test_history_summary_lists_undo_then_redo() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    for name in ["a", "b", "c", "d"] {
        let action = add(&mut counter, 1, name);
        history.add_action(action);
    }
    history.undo(&mut counter);
    history.undo(&mut counter);

    let summary = history.history_summary(1);
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].description, "Add b");
    assert!(summary[0].can_undo && !summary[0].can_redo);
    assert_eq!(summary[1].description, "Add c");
    assert!(summary[1].can_redo && !summary[1].can_undo);

    // Reading the summary leaves the stacks alone
    assert_eq!(history.undo_len(), 2);
    assert_eq!(history.redo_len(), 2);
}

#[test]
fn test_serialize_history_describes_groups() {
    let mut counter = Counter::default();
    let mut history = HistoryManager::new(50);

    let action = add(&mut counter, 1, "single").with_metadata("source", "test");
    history.add_action(action);

    history.begin_action_group("Batch");
    for name in ["x", "y"] {
        let action = add(&mut counter, 1, name);
        history.add_action(action);
    }
    history.end_action_group();
    history.undo(&mut counter);

    let snapshot = history.serialize_history();
    assert_eq!(snapshot.max_history, 50);
    assert_eq!(snapshot.undo_stack.len(), 1);
    assert_eq!(snapshot.undo_stack[0].metadata.get("source").map(String::as_str), Some("test"));
    assert!(snapshot.undo_stack[0].actions.is_none());

    let group = &snapshot.redo_stack[0];
    assert_eq!(group.kind, ActionKind::CompositeAction);
    let children = group.actions.as_ref().expect("group records children");
    assert_eq!(children.len(), 2);
    assert_eq!(children[1].description, "Add y");

    let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json["redo_stack"][0]["type"], "composite_action");
    assert_eq!(json["undo_stack"][0]["type"], "modify_element");
    assert!(json["undo_stack"][0].get("actions").is_none());
}
