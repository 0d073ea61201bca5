use tasklist_core::{decode_task_list, MemorySlot, SlotTaskRepository, Task, TaskDraft, TaskStore};

#[test]
fn task_serializes_with_expected_wire_fields() {
    let mut store = TaskStore::initialize(SlotTaskRepository::new(MemorySlot::new()));
    let id = store.add(TaskDraft::new("ship release")).unwrap();

    let json = serde_json::to_value(store.tasks().as_slice()).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "id": id.to_string(), "text": "ship release", "completed": false }])
    );
}

#[test]
fn deserialize_trims_text() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "text": "  padded  ",
        "completed": true
    });

    let task: Task = serde_json::from_value(value).unwrap();
    assert_eq!(task.text(), "padded");
    assert!(task.is_completed());
}

#[test]
fn deserialize_rejects_invalid_records() {
    let nil_id = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "text": "nil",
        "completed": false
    });
    let err = serde_json::from_value::<Task>(nil_id).unwrap_err();
    assert!(err.to_string().contains("must not be nil"), "unexpected error: {err}");

    let blank = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "text": "   ",
        "completed": false
    });
    let err = serde_json::from_value::<Task>(blank).unwrap_err();
    assert!(err.to_string().contains("must not be empty"), "unexpected error: {err}");
}

#[test]
fn decoded_list_preserves_order_and_fields() {
    let raw = r#"[
        {"id": "22222222-2222-4333-8444-555555555555", "text": "second", "completed": true},
        {"id": "11111111-2222-4333-8444-555555555555", "text": "first", "completed": false}
    ]"#;

    let tasks = decode_task_list(raw).unwrap();
    let encoded = serde_json::to_string(&tasks).unwrap();
    assert_eq!(decode_task_list(&encoded).unwrap(), tasks);

    assert_eq!(tasks[0].text(), "second");
    assert!(tasks[0].is_completed());
    assert_eq!(tasks[1].text(), "first");
}
