//! Swappable registry example for observer-registry.
//!
//! Demonstrates:
//! - Keeping a subject's observer registry in a caller-owned container
//! - Rebinding a registry at runtime between a view and owned data
//! - Read-only handler tables
//! - Watching subscription traffic with a trace callback
//!
//! Run with: `cargo run --example swappable_backends`

use observer_registry::{
    clear_trace_callback, set_trace_callback, ConstMapView, Handler, HandlerTable, ObserverId,
    SetData, SetView, SingleObserver, SingleSubject,
};
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

struct Tick(u64);

fn main() {
    println!("=== observer-registry: Swappable Backends ===\n");

    set_trace_callback(|event| println!("   [trace] {}", event));

    // -------------------------------------------------------------------------
    // 1. A registry the caller can inspect
    // -------------------------------------------------------------------------
    println!("1. Subject over a caller-owned registry...");

    // Containers a subject or observer borrows are declared before it
    let registry = RefCell::new(BTreeSet::<ObserverId<Tick>>::new());
    let table: HandlerTable<Tick>;

    let mut clock = SingleSubject::with_observers(SetView::new(&registry));
    println!("   backend = {}", clock.backend_kind());

    let mut first = SingleObserver::<Tick>::new();
    first.bind_handler_subject1(|t: &Tick| println!("   first saw tick {}", t.0), None);
    first.subscribe(&clock.id());
    println!("   registry holds {} id(s)", registry.borrow().len());

    // -------------------------------------------------------------------------
    // 2. A read-only handler table
    // -------------------------------------------------------------------------
    println!("\n2. Observer with a read-only table...");

    let handler: Handler<Tick> = Rc::new(|t: &Tick| println!("   second saw tick {}", t.0));
    table = HashMap::from([(clock.id(), handler)]);

    let mut second = SingleObserver::<Tick>::new();
    second.bind_subject_handlers(ConstMapView::new(&table));
    second.define_ignore(&clock.id());
    println!("   table size after define_ignore = {}", table.len());
    second.subscribe(&clock.id());

    clock.notify(&Tick(1)).unwrap();

    // -------------------------------------------------------------------------
    // 3. Rebinding to owned data
    // -------------------------------------------------------------------------
    println!("\n3. Rebinding the subject to owned data...");

    clock.bind_observer_set(SetData::new(BTreeSet::<ObserverId<Tick>>::new()));
    println!("   backend = {}", clock.backend_kind());
    println!("   subject observers = {}", clock.observer_count());
    println!("   old registry still holds {} id(s)", registry.borrow().len());

    second.subscribe(&clock.id());
    clock.notify(&Tick(2)).unwrap();

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    clear_trace_callback();
    println!("\n=== Example Complete ===");
}
