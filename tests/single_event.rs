//! Integration tests for the single-event subject and observer.
//!
//! Covers subscription bookkeeping, fan-out, re-entrant detach during notify,
//! handler modes and automatic detach on drop.

use observer_registry::{
    ConstMapData, ConstMapView, HandlerTable, MapData, MapView, ObserverError, ObserverId,
    ObserverMode, SetData, SetView, SingleObserver, SingleSubject,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::rc::Rc;

struct A {
    value: i32,
}

fn accumulate(total: &Rc<Cell<i32>>) -> impl Fn(&A) + 'static {
    let total = Rc::clone(total);
    move |a: &A| total.set(total.get() + a.value)
}

#[test]
fn test_double_attach_is_idempotent() {
    let subject = SingleSubject::<A>::new();
    let observer = SingleObserver::<A>::new();

    assert!(subject.attach(&observer.id()));
    assert!(!subject.attach(&observer.id()));
    assert_eq!(subject.observer_count(), 1);
}

#[test]
fn test_detach_symmetry() {
    let subject = SingleSubject::<A>::new();
    let attached = SingleObserver::<A>::new();
    let stranger = SingleObserver::<A>::new();
    subject.attach(&attached.id());

    assert!(!subject.detach(&stranger.id()));
    assert_eq!(subject.observer_count(), 1);

    assert!(subject.detach(&attached.id()));
    assert_eq!(subject.observer_count(), 0);
}

#[test]
fn test_notify_fan_out_for_zero_one_and_many() {
    for n in [0usize, 1, 2, 5] {
        let totals: Vec<_> = (0..n).map(|_| Rc::new(Cell::new(0))).collect();
        let subject = SingleSubject::<A>::new();
        let mut observers = Vec::new();
        for total in &totals {
            let mut observer = SingleObserver::<A>::new();
            observer.bind_handler_subject1(accumulate(total), Some(&subject.id()));
            assert!(observer.subscribe(&subject.id()));
            observers.push(observer);
        }

        subject.notify(&A { value: 2 }).unwrap();
        assert!(totals.iter().all(|t| t.get() == 2), "n = {n}");
    }
}

#[test]
fn test_self_detach_during_notify() {
    let total = Rc::new(Cell::new(0));
    let subject = Rc::new(SingleSubject::<A>::new());
    let mut observer = SingleObserver::<A>::new();
    observer.bind_subject_handlers(MapData::new(HandlerTable::<A>::new()));

    let me = observer.id();
    let notifier = Rc::clone(&subject);
    let count = accumulate(&total);
    observer.define(&subject.id(), move |a: &A| {
        count(a);
        assert!(notifier.detach(&me));
    });
    assert!(observer.subscribe(&subject.id()));

    subject.notify(&A { value: 4 }).unwrap();
    assert_eq!(total.get(), 4);
    assert_eq!(subject.observer_count(), 0);

    subject.notify(&A { value: 4 }).unwrap();
    assert_eq!(total.get(), 4);
}

#[test]
fn test_detaching_a_later_observer_skips_it() {
    let first_total = Rc::new(Cell::new(0));
    let second_total = Rc::new(Cell::new(0));
    let subject = Rc::new(SingleSubject::<A>::new());

    let mut second = SingleObserver::<A>::new();
    second.bind_handler_subject1(accumulate(&second_total), Some(&subject.id()));

    let mut first = SingleObserver::<A>::new();
    let notifier = Rc::clone(&subject);
    let victim = second.id();
    let count = accumulate(&first_total);
    first.bind_handler_subject1(
        move |a: &A| {
            count(a);
            notifier.detach(&victim);
        },
        Some(&subject.id()),
    );

    // Default registry keeps subscription order.
    first.subscribe(&subject.id());
    second.subscribe(&subject.id());

    subject.notify(&A { value: 1 }).unwrap();
    assert_eq!(first_total.get(), 1);
    assert_eq!(second_total.get(), 0);
    assert_eq!(subject.observer_count(), 1);
}

#[test]
fn test_auto_detach_after_notify() {
    let total = Rc::new(Cell::new(0));
    let subject = SingleSubject::<A>::new();
    {
        let mut observer = SingleObserver::<A>::new();
        observer.bind_subject_handlers(MapData::new(HandlerTable::<A>::new()));
        observer.define(&subject.id(), accumulate(&total));
        assert!(observer.subscribe(&subject.id()));

        subject.notify(&A { value: 4 }).unwrap();
        assert_eq!(total.get(), 4);
        assert_eq!(subject.observer_count(), 1);
    }
    assert_eq!(subject.observer_count(), 0);
}

#[test]
fn test_unconditional_without_subject_does_not_auto_detach() {
    let subject = SingleSubject::<A>::new();
    {
        let mut observer = SingleObserver::<A>::new();
        observer.bind_handler_subject1(|_: &A| {}, None);
        observer.subscribe(&subject.id());
    }
    // The stale id stays until the next notify prunes it.
    assert_eq!(subject.observer_count(), 1);
    subject.notify(&A { value: 0 }).unwrap();
    assert_eq!(subject.observer_count(), 0);
}

#[test]
fn test_last_bind_wins() {
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let subject = SingleSubject::<A>::new();
    let mut observer = SingleObserver::<A>::new();

    observer
        .bind_handler_subject1(accumulate(&first), None)
        .bind_handler_subject1(accumulate(&second), None);
    observer.subscribe(&subject.id());

    subject.notify(&A { value: 6 }).unwrap();
    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 6);
}

#[test]
fn test_handler_rebinds_its_own_observer_during_notify() {
    let total = Rc::new(Cell::new(0));
    let subject = SingleSubject::<A>::new();
    let observer = Rc::new(RefCell::new(SingleObserver::<A>::new()));

    let me = Rc::downgrade(&observer);
    let counter = Rc::clone(&total);
    observer.borrow_mut().bind_handler_subject1(
        move |_: &A| {
            if let Some(observer) = me.upgrade() {
                observer
                    .borrow_mut()
                    .bind_handler_subject1(accumulate(&counter), None);
            }
        },
        None,
    );
    assert!(observer.borrow().subscribe(&subject.id()));

    subject.notify(&A { value: 3 }).unwrap();
    assert_eq!(total.get(), 0);

    subject.notify(&A { value: 3 }).unwrap();
    assert_eq!(total.get(), 3);
    assert_eq!(observer.borrow().mode(), ObserverMode::Unconditional);
}

#[test]
fn test_unconditional_define_keeps_handler_and_remove_reports_true() {
    let total = Rc::new(Cell::new(0));
    let other = Rc::new(Cell::new(0));
    let subject = SingleSubject::<A>::new();
    let mut observer = SingleObserver::<A>::new();
    observer.bind_handler_subject1(accumulate(&total), None);

    observer.define(&subject.id(), accumulate(&other));
    assert!(observer.remove(&subject.id()));
    assert!(observer.remove(&subject.id()));

    observer.on_event(&A { value: 5 }, Some(&subject.id())).unwrap();
    assert_eq!(total.get(), 5);
    assert_eq!(other.get(), 0);
}

#[test]
fn test_const_backend_define_and_remove_are_noops() {
    let total = Rc::new(Cell::new(0));
    // Declared first: the subjects' lifetime is tied to the borrow of it.
    let table: HandlerTable<A>;
    let subject = SingleSubject::<A>::new();
    let stranger = SingleSubject::<A>::new();

    let handler: observer_registry::Handler<A> = Rc::new(accumulate(&total));
    table = HashMap::from([(subject.id(), handler)]);
    let mut observer = SingleObserver::<A>::new();
    observer.bind_subject_handlers(ConstMapView::new(&table));
    assert_eq!(observer.mode(), ObserverMode::Table);

    observer.define_ignore(&stranger.id());
    assert_eq!(table.len(), 1);
    assert!(!observer.remove(&subject.id()));
    assert!(!observer.remove(&stranger.id()));
    assert_eq!(table.len(), 1);

    observer.subscribe(&subject.id());
    subject.notify(&A { value: 7 }).unwrap();
    assert_eq!(total.get(), 7);
}

#[test]
fn test_owned_const_table_auto_detaches() {
    let subject = SingleSubject::<A>::new();
    {
        let handler: observer_registry::Handler<A> = Rc::new(|_: &A| {});
        let mut observer = SingleObserver::<A>::new();
        observer.bind_subject_handlers(ConstMapData::new(HashMap::from([(subject.id(), handler)])));
        observer.subscribe(&subject.id());
        assert_eq!(subject.observer_count(), 1);
    }
    assert_eq!(subject.observer_count(), 0);
}

#[test]
fn test_missing_table_entry_stops_notify() {
    let total = Rc::new(Cell::new(0));
    let subject = SingleSubject::<A>::new();

    let mut strict = SingleObserver::<A>::new();
    strict.bind_subject_handlers(MapData::new(HandlerTable::<A>::new()));
    let mut counting = SingleObserver::<A>::new();
    counting.bind_handler_subject1(accumulate(&total), None);

    strict.subscribe(&subject.id());
    counting.subscribe(&subject.id());

    let err = subject.notify(&A { value: 1 }).unwrap_err();
    assert!(matches!(err, ObserverError::HandlerNotFound { .. }));
    assert!(err.to_string().contains("no handler bound"));
    assert_eq!(total.get(), 0);
}

#[test]
fn test_view_registries_stay_inspectable() {
    let registry = RefCell::new(BTreeSet::<ObserverId<A>>::new());
    let table = RefCell::new(HandlerTable::<A>::new());

    let subject = SingleSubject::with_observers(SetView::new(&registry));
    let mut observer = SingleObserver::<A>::new();
    observer.bind_subject_handlers(MapView::new(&table));

    observer.define_ignore(&subject.id());
    observer.subscribe(&subject.id());
    assert!(registry.borrow().contains(&observer.id()));
    assert!(table.borrow().contains_key(&subject.id()));

    assert!(observer.unsubscribe(&subject.id()));
    assert!(registry.borrow().is_empty());
    assert!(table.borrow().is_empty());
}

#[test]
fn test_rebinding_subject_to_owned_registry() {
    let registry = RefCell::new(HashSet::<ObserverId<A>>::new());
    let observer = SingleObserver::<A>::new();
    let mut subject = SingleSubject::with_observers(SetView::new(&registry));

    subject.attach(&observer.id());
    subject.bind_observer_set(SetData::new(HashSet::<ObserverId<A>>::new()));

    assert_eq!(subject.observer_count(), 0);
    assert_eq!(registry.borrow().len(), 1);
    assert!(subject.attach(&observer.id()));
}

#[test]
fn test_on_event_without_subject() {
    let total = Rc::new(Cell::new(0));
    let mut observer = SingleObserver::<A>::new();

    assert_eq!(observer.on_event(&A { value: 1 }, None), Ok(()));

    observer.bind_handler_subject1(accumulate(&total), None);
    observer.on_event(&A { value: 9 }, None).unwrap();
    assert_eq!(total.get(), 9);
}
