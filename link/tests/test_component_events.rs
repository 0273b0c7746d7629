//! Component operations and their delivered events.

mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use airtable_link::{
    AirtableComponent, AirtableLinkError, Delivery, DispatchHooks, EventStream, InvocationHandle,
    InvocationState, OperationKind, TableEvent,
};
use common::{client, strings, FakeAirtable, FAKE_API_KEY, FAKE_BASE_ID, FAKE_TABLE, FAKE_VIEW};
use tokio::runtime::Handle;
use tokio::time::timeout;

fn component(fake: &Arc<FakeAirtable>) -> (AirtableComponent, EventStream) {
    let (component, events) = AirtableComponent::new(client(fake), Handle::current());
    component.set_api_key(FAKE_API_KEY);
    component.set_base_id(FAKE_BASE_ID);
    component.set_table_name(FAKE_TABLE);
    component.set_view_name(FAKE_VIEW);
    (component, events)
}

async fn next(events: &mut EventStream) -> Delivery {
    timeout(Duration::from_secs(5), events.next())
        .await
        .expect("no delivery within 5s")
        .expect("event stream closed")
}

#[tokio::test]
async fn test_each_operation_delivers_its_named_event() {
    let fake = FakeAirtable::with_rows(4, 2);
    let (component, mut events) = component(&fake);

    let cases: Vec<(&str, Box<dyn Fn(&AirtableComponent) -> InvocationHandle>)> = vec![
        ("GotAllRows", Box::new(|c: &AirtableComponent| c.get_all_rows())),
        ("GotCell", Box::new(|c: &AirtableComponent| c.get_cell(1, "Name"))),
        ("GotColumn", Box::new(|c: &AirtableComponent| c.get_column("Score", None))),
        ("GotRow", Box::new(|c: &AirtableComponent| c.get_row(2))),
        ("CellChanged", Box::new(|c: &AirtableComponent| c.set_cell(1, "Name", "x"))),
        (
            "RowCreated",
            Box::new(|c: &AirtableComponent| c.create_row(strings(&["Name"]), strings(&["new"]))),
        ),
        (
            "RowUpdated",
            Box::new(|c: &AirtableComponent| {
                c.update_row_by_num(2, strings(&["Name"]), strings(&["upd"]))
            }),
        ),
        ("DeletedRowByNumber", Box::new(|c: &AirtableComponent| c.delete_row_num(3))),
    ];

    for (expected, run) in cases {
        run(&component);
        let delivery = next(&mut events).await;
        assert_eq!(delivery.event.name(), expected);
        assert_eq!(delivery.event.status(), Some(200));
    }
    assert!(events.try_next().is_none());
}

#[tokio::test]
async fn test_got_cell_payload() {
    let fake = FakeAirtable::with_rows(3, 2);
    let (component, mut events) = component(&fake);

    let handle = component.get_cell(3, "Name");
    let delivery = next(&mut events).await;
    assert_eq!(delivery.invocation_id, handle.id());
    assert_eq!(
        delivery.event,
        TableEvent::GotCell {
            status: 200,
            value: "row-3".into(),
            record_id: "rec003".into(),
            created_time: "2024-02-04T10:00:00.000Z".into(),
        }
    );
    assert_eq!(handle.state(), InvocationState::Delivered);
}

#[tokio::test]
async fn test_got_all_rows_content() {
    let fake = FakeAirtable::with_rows(3, 2);
    let (component, mut events) = component(&fake);

    component.get_all_rows();
    let delivery = next(&mut events).await;
    let content: serde_json::Value =
        serde_json::from_str(&delivery.event.response_content().unwrap()).unwrap();
    assert_eq!(content.as_array().unwrap().len(), 3);
    assert_eq!(content[1]["id"], "rec002");
    assert_eq!(content[1]["fields"]["Name"], "row-2");
    assert_eq!(content[1]["fields"]["Score"], serde_json::json!(2));
}

#[tokio::test]
async fn test_failures_are_delivered_as_events() {
    let fake = FakeAirtable::with_rows(2, 2);
    let (component, mut events) = component(&fake);

    let handle = component.get_row(9);
    let delivery = next(&mut events).await;
    assert_eq!(delivery.event.name(), "OperationFailed");
    assert_eq!(
        delivery.event,
        TableEvent::failed(
            OperationKind::GetRow,
            AirtableLinkError::RowOutOfRange { row: 9, len: 2 }
        )
    );
    assert_eq!(handle.state(), InvocationState::Failed);

    fake.fail_call_with_transport(2);
    component.get_all_rows();
    let delivery = next(&mut events).await;
    assert!(matches!(
        delivery.event,
        TableEvent::Failed {
            operation: OperationKind::GetAllRows,
            error: AirtableLinkError::TransportError(_),
        }
    ));
}

#[tokio::test]
async fn test_placeholder_settings_fail_remotely() {
    let fake = FakeAirtable::with_rows(2, 2);
    let (component, mut events) = AirtableComponent::new(client(&fake), Handle::current());

    component.get_all_rows();
    let delivery = next(&mut events).await;
    assert_eq!(delivery.event.status(), Some(401));
    assert_eq!(fake.request_count(), 1);
}

#[tokio::test]
async fn test_blank_settings_fail_without_requests() {
    let fake = FakeAirtable::with_rows(2, 2);
    let (component, mut events) = component(&fake);
    component.set_table_name("");

    component.delete_row_num(1);
    let delivery = next(&mut events).await;
    assert!(matches!(
        delivery.event,
        TableEvent::Failed {
            error: AirtableLinkError::ConfigurationError(_),
            ..
        }
    ));
    assert_eq!(fake.request_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_configuration_change_after_dispatch_does_not_leak() {
    let fake = FakeAirtable::with_rows(3, 1);
    fake.set_latency(Duration::from_millis(20));
    let (component, mut events) = component(&fake);

    component.get_all_rows();
    component.set_base_id("appOther");

    let delivery = next(&mut events).await;
    assert_eq!(delivery.event.name(), "GotAllRows");
    assert!(fake
        .requests()
        .iter()
        .all(|r| r.url.path().starts_with("/v0/appFake/")));

    component.get_all_rows();
    let delivery = next(&mut events).await;
    assert_eq!(delivery.event.status(), Some(404));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_columns_stay_isolated() {
    let fake = FakeAirtable::with_rows(12, 2);
    fake.set_latency(Duration::from_millis(5));
    let (component, mut events) = component(&fake);

    let names = component.get_column("Name", None);
    let scores = component.get_column("Score", None);

    let mut by_id = HashMap::new();
    for _ in 0..2 {
        let delivery = next(&mut events).await;
        by_id.insert(delivery.invocation_id, delivery.event);
    }

    let expected_names: Vec<String> = (1..=12).map(|i| format!("row-{}", i)).collect();
    let expected_scores: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
    match &by_id[&names.id()] {
        TableEvent::GotColumn { values, .. } => assert_eq!(values, &expected_names),
        other => panic!("unexpected event {:?}", other),
    }
    match &by_id[&scores.id()] {
        TableEvent::GotColumn { values, record_ids, .. } => {
            assert_eq!(values, &expected_scores);
            assert_eq!(record_ids.len(), 12);
        },
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_hooks_observe_dispatch_and_delivery() {
    let fake = FakeAirtable::with_rows(2, 2);
    let log = Arc::new(Mutex::new(Vec::new()));
    let dispatched = Arc::clone(&log);
    let delivered = Arc::clone(&log);
    let hooks = DispatchHooks::new()
        .on_dispatch(move |_, kind| dispatched.lock().unwrap().push(format!("start {}", kind)))
        .on_deliver(move |d| delivered.lock().unwrap().push(format!("end {}", d.event.name())));

    let (component, mut events) = component(&fake);
    let component = component.with_hooks(hooks);

    component.get_row(1);
    next(&mut events).await;

    let log = log.lock().unwrap();
    assert!(log.contains(&"start GetRow".to_string()));
    assert!(log.contains(&"end GotRow".to_string()));
}
