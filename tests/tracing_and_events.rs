//! Integration tests for tracing and event monitoring.
//!
//! The trace callback is process-wide, so every test here is `#[serial]` and
//! only records events for its own event type.

use observer_registry::{
    clear_trace_callback, define_events, set_trace_callback, HandlerTable, MapData, ObserverId,
    SetView, SingleObserver, SingleSubject, TraceEvent,
};
use serial_test::serial;
use std::any::type_name;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

fn record<E: 'static>() -> Arc<Mutex<Vec<String>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    set_trace_callback(move |event| {
        if event.event_type() == type_name::<E>() {
            events_clone.lock().unwrap().push(format!("{}", event));
        }
    });
    events
}

#[test]
#[serial]
fn test_subscription_lifecycle_is_traced() {
    struct Saved;

    let events = record::<Saved>();
    let subject = SingleSubject::<Saved>::new();
    {
        let observer = SingleObserver::<Saved>::new();
        observer.subscribe(&subject.id());
        subject.attach(&observer.id());
        subject.notify(&Saved).unwrap();
        observer.unsubscribe(&subject.id());
    }
    clear_trace_callback();

    let captured = events.lock().unwrap();
    let kinds: Vec<&str> = captured
        .iter()
        .map(|line| line.split(' ').next().unwrap_or_default())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "attach",
            "subscribe",
            "attach",
            "notify",
            "detach",
            "unsubscribe",
            "auto-detach"
        ]
    );
    assert!(captured[0].ends_with("attached: true }"));
    assert!(captured[2].ends_with("attached: false }"));
    assert!(captured[3].ends_with("delivered: 1 }"));
}

#[test]
#[serial]
fn test_auto_detach_reports_subjects() {
    struct Closed;

    let events = record::<Closed>();
    let first = SingleSubject::<Closed>::new();
    let second = SingleSubject::<Closed>::new();
    {
        let mut observer = SingleObserver::<Closed>::new();
        observer.bind_subject_handlers(MapData::new(HandlerTable::<Closed>::new()));
        observer.define_ignore(&first.id());
        observer.define_ignore(&second.id());
        observer.subscribe(&first.id());
        observer.subscribe(&second.id());
    }
    clear_trace_callback();

    let captured = events.lock().unwrap();
    let last = captured.last().unwrap();
    assert!(last.starts_with("auto-detach"));
    assert!(last.ends_with("subjects: 2 }"));
}

#[test]
#[serial]
fn test_rebinds_are_traced() {
    struct Resized;

    let registry = RefCell::new(BTreeSet::<ObserverId<Resized>>::new());
    let events = record::<Resized>();
    let mut subject = SingleSubject::<Resized>::new();
    let mut observer = SingleObserver::<Resized>::new();

    subject.bind_observer_set(SetView::new(&registry));
    observer.bind_handler_subject1(|_: &Resized| {}, None);
    clear_trace_callback();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert!(captured[0].starts_with("bind-observer-set"));
    assert!(captured[0].ends_with("backend: view }"));
    assert!(captured[1].ends_with("mode: unconditional }"));
}

#[test]
#[serial]
fn test_failed_delivery_is_not_counted() {
    struct Flushed;

    let events = record::<Flushed>();
    let subject = SingleSubject::<Flushed>::new();
    let lenient = SingleObserver::<Flushed>::new();
    let mut strict = SingleObserver::<Flushed>::new();
    strict.bind_subject_handlers(MapData::new(HandlerTable::<Flushed>::new()));

    lenient.subscribe(&subject.id());
    strict.subscribe(&subject.id());
    assert!(subject.notify(&Flushed).is_err());
    clear_trace_callback();

    let captured = events.lock().unwrap();
    let notify = captured
        .iter()
        .find(|line| line.starts_with("notify"))
        .unwrap();
    assert!(notify.ends_with("delivered: 1 }"));
}

pub struct Ping;
pub struct Pong;

define_events!(table_tennis { ping: Ping, pong: Pong });

#[test]
#[serial]
fn test_multi_event_traces_carry_event_type() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    set_trace_callback(move |event: &TraceEvent| {
        if let TraceEvent::Notify { event, delivered } = event {
            if *event == type_name::<Pong>() {
                events_clone.lock().unwrap().push(*delivered);
            }
        }
    });

    let subject = table_tennis::Subject::new();
    let observer = table_tennis::Observer::new();
    observer.subscribe(&subject.id::<Pong>());
    subject.notify(&Ping).unwrap();
    subject.notify(&Pong).unwrap();
    clear_trace_callback();

    assert_eq!(*events.lock().unwrap(), vec![1]);
}

#[test]
#[serial]
fn test_callback_may_use_the_library() {
    struct Nested;

    let inner = Arc::new(Mutex::new(0));
    let inner_clone = inner.clone();
    set_trace_callback(move |event| {
        if event.event_type() == type_name::<Nested>() {
            let probe = SingleSubject::<u8>::new();
            *inner_clone.lock().unwrap() += probe.observer_count() + 1;
        }
    });

    let subject = SingleSubject::<Nested>::new();
    let observer = SingleObserver::<Nested>::new();
    subject.attach(&observer.id());
    clear_trace_callback();

    assert_eq!(*inner.lock().unwrap(), 1);
}
