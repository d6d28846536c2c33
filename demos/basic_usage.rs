//! Basic usage example for observer-registry.
//!
//! Demonstrates:
//! - Subscribing single-event observers to a subject
//! - Unconditional handlers and per-subject handler tables
//! - Multi-event subjects and observers declared with `define_events!`
//! - Automatic detach when an observer is dropped
//!
//! Run with: `cargo run --example basic_usage`

use observer_registry::{define_events, HandlerTable, MapData, SingleObserver, SingleSubject};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A temperature reading in tenths of a degree.
struct Reading(i32);

pub struct KeyPressed {
    pub key: char,
}

pub struct Resized {
    pub width: u32,
    pub height: u32,
}

// Event set for a window: one subject layer and one observer layer per event
define_events!(window { key_pressed: KeyPressed, resized: Resized });

fn main() {
    println!("=== observer-registry: Basic Usage ===\n");

    // -------------------------------------------------------------------------
    // 1. One subject, one unconditional observer
    // -------------------------------------------------------------------------
    println!("1. Subscribing an unconditional observer...");

    let latest = Rc::new(Cell::new(0));
    let sensor = SingleSubject::<Reading>::new();
    let mut display = SingleObserver::<Reading>::new();

    let sink = Rc::clone(&latest);
    display.bind_handler_subject1(move |r: &Reading| sink.set(r.0), Some(&sensor.id()));

    println!("   subscribe         = {}", display.subscribe(&sensor.id()));
    println!("   subscribe (again) = {}", display.subscribe(&sensor.id()));

    sensor.notify(&Reading(215)).unwrap();
    println!("   display shows {}.{} C", latest.get() / 10, latest.get() % 10);

    // -------------------------------------------------------------------------
    // 2. One observer, different handlers per subject
    // -------------------------------------------------------------------------
    println!("\n2. Per-subject handlers...");

    let indoor = SingleSubject::<Reading>::new();
    let outdoor = SingleSubject::<Reading>::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let mut logger = SingleObserver::<Reading>::new();
    logger.bind_subject_handlers(MapData::new(HandlerTable::<Reading>::new()));

    let sink = Rc::clone(&log);
    logger.define(&indoor.id(), move |r: &Reading| {
        sink.borrow_mut().push(format!("indoor {}", r.0))
    });
    let sink = Rc::clone(&log);
    logger.define(&outdoor.id(), move |r: &Reading| {
        sink.borrow_mut().push(format!("outdoor {}", r.0))
    });

    logger.subscribe(&indoor.id());
    logger.subscribe(&outdoor.id());

    indoor.notify(&Reading(210)).unwrap();
    outdoor.notify(&Reading(-35)).unwrap();
    for line in log.borrow().iter() {
        println!("   {}", line);
    }

    // -------------------------------------------------------------------------
    // 3. Multi-event subject and observer
    // -------------------------------------------------------------------------
    println!("\n3. Multi-event window...");

    let win = window::Subject::new();
    let mut shell = window::Observer::new();

    shell.bind_handler_subject1::<KeyPressed>(|k| println!("   key pressed: {:?}", k.key), None);
    shell.bind_handler_subject1::<Resized>(
        |r| println!("   resized to {}x{}", r.width, r.height),
        None,
    );

    shell.subscribe(&win.id::<KeyPressed>());
    shell.subscribe(&win.id::<Resized>());

    win.notify(&KeyPressed { key: 'q' }).unwrap();
    win.notify(&Resized {
        width: 800,
        height: 600,
    })
    .unwrap();
    println!("   events in set: {:?}", win.event_names());

    // -------------------------------------------------------------------------
    // 4. Dropping an observer detaches it
    // -------------------------------------------------------------------------
    println!("\n4. Automatic detach on drop...");

    {
        let mut temporary = SingleObserver::<Reading>::new();
        temporary.bind_handler_subject1(|_: &Reading| {}, Some(&sensor.id()));
        temporary.subscribe(&sensor.id());
        println!("   observers while alive   = {}", sensor.observer_count());
    }
    println!("   observers after drop    = {}", sensor.observer_count());

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("\n=== Example Complete ===");
}
