//! # Observer Registry
//!
//! Statically typed Subject/Observer pairs whose subscriber registries are
//! pluggable: a borrowed caller-owned container, an owned container, or either
//! one chosen at runtime.
//!
//! A subject keeps a set of observer ids and fans each event out to them. An
//! observer keeps a table from subject id to handler and runs the handler for
//! the subject an event came from. Both are single-threaded; handlers may
//! attach or detach observers, or rebind their own observer, while a
//! notification is running.
//!
//! ## Quick Start
//!
//! ```rust
//! use observer_registry::{SingleObserver, SingleSubject};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! struct Temperature(i32);
//!
//! let reading = Rc::new(Cell::new(0));
//! let sensor = SingleSubject::<Temperature>::new();
//! let mut display = SingleObserver::<Temperature>::new();
//!
//! let sink = Rc::clone(&reading);
//! display.bind_handler_subject1(move |t: &Temperature| sink.set(t.0), Some(&sensor.id()));
//! display.subscribe(&sensor.id());
//!
//! sensor.notify(&Temperature(21)).unwrap();
//! assert_eq!(reading.get(), 21);
//! ```
//!
//! ## Features
//!
//! - **Swappable registries**: [`SetBackend`] and [`MapBackend`] hold either a
//!   view over your container or owned data, rebindable at runtime
//! - **Multi-event components**: [`define_events!`] declares a fixed event set;
//!   using an event outside it is a compile error
//! - **Automatic detach**: dropping an observer removes it from the subjects in
//!   its handler table
//! - **Tracing support**: optional callback and `log` output for every
//!   subscription change
//!
//! ## Main Types
//!
//! - [`SingleSubject`] / [`SingleObserver`] - one event type
//! - [`Subject`] / [`Observer`] - every event of an [`EventSet`]
//! - [`SubjectConnect`] / [`ObserverConnect`] - subscription-only surface for
//!   components embedding a layer
//! - [`set_trace_callback`] - observe subscription traffic
//!
//! ## Compile-time checks
//!
//! An event outside the declared set is rejected:
//!
//! ```compile_fail
//! use observer_registry::define_events;
//!
//! pub struct A;
//! pub struct B;
//! pub struct C;
//!
//! define_events!(ab { a: A, b: B });
//!
//! fn main() {
//!     let subject = ab::Subject::new();
//!     subject.notify(&C).unwrap();
//! }
//! ```
//!
//! So is an event declared twice:
//!
//! ```compile_fail
//! use observer_registry::define_events;
//!
//! pub struct A;
//!
//! define_events!(twice { first: A, second: A });
//!
//! fn main() {}
//! ```
//!
//! And so is handing an id to the wrong role:
//!
//! ```compile_fail
//! use observer_registry::{SingleObserver, SingleSubject};
//!
//! struct A;
//!
//! fn main() {
//!     let subject = SingleSubject::<A>::new();
//!     let observer = SingleObserver::<A>::new();
//!     subject.attach(&subject.id());
//! }
//! ```
//!
//! Ids carry their event type, so an observer of another event cannot attach:
//!
//! ```compile_fail
//! use observer_registry::{SingleObserver, SingleSubject};
//!
//! struct A;
//! struct B;
//!
//! fn main() {
//!     let subject = SingleSubject::<A>::new();
//!     let observer = SingleObserver::<B>::new();
//!     subject.attach(&observer.id());
//! }
//! ```
//!
//! nor subscribe to a subject of another event:
//!
//! ```compile_fail
//! use observer_registry::{SingleObserver, SingleSubject};
//!
//! struct A;
//! struct B;
//!
//! fn main() {
//!     let subject = SingleSubject::<B>::new();
//!     let observer = SingleObserver::<A>::new();
//!     observer.subscribe(&subject.id());
//! }
//! ```
//!
//! Attach and subscribe on an aggregate reject undeclared events too:
//!
//! ```compile_fail
//! use observer_registry::{define_events, SingleObserver};
//!
//! pub struct A;
//! pub struct B;
//! pub struct C;
//!
//! define_events!(ab { a: A, b: B });
//!
//! fn main() {
//!     let subject = ab::Subject::new();
//!     let observer = SingleObserver::<C>::new();
//!     subject.attach::<C>(&observer.id());
//! }
//! ```
//!
//! ```compile_fail
//! use observer_registry::{define_events, SingleSubject};
//!
//! pub struct A;
//! pub struct B;
//! pub struct C;
//!
//! define_events!(ab { a: A, b: B });
//!
//! fn main() {
//!     let subject = SingleSubject::<C>::new();
//!     let observer = ab::Observer::new();
//!     observer.subscribe::<C>(&subject.id());
//! }
//! ```
//!
//! The same calls with a declared event compile:
//!
//! ```rust
//! use observer_registry::{define_events, SingleObserver, SingleSubject};
//!
//! pub struct A;
//! pub struct B;
//!
//! define_events!(ab { a: A, b: B });
//!
//! fn main() {
//!     let subject = ab::Subject::new();
//!     let observer = ab::Observer::new();
//!     let single_subject = SingleSubject::<B>::new();
//!     let single_observer = SingleObserver::<A>::new();
//!
//!     assert!(subject.attach::<A>(&single_observer.id()));
//!     assert!(observer.subscribe::<B>(&single_subject.id()));
//! }
//! ```

mod backend;
mod capability;
mod connect;
mod data;
mod error;
mod events;
mod id;
mod macros;
mod observer;
mod subject;
mod trace;
mod view;

// Re-export the main public API
pub use backend::{BackendKind, ConstMapBackend, MapBackend, SetBackend};
pub use capability::{AbstractConstMap, AbstractMap, AbstractSet, MapStore, SetStore};
pub use connect::{ObserverConnect, SubjectConnect};
pub use data::{ConstMapData, MapData, ReadOnly, SetData};
pub use error::ObserverError;
pub use events::{Event, EventSet, Observer, ObserverLayers, Subject, SubjectLayers};
pub use id::{ObserverId, SubjectId};
pub use observer::{Handler, HandlerTable, ObserverMode, SingleObserver};
pub use subject::SingleSubject;
pub use trace::{clear_trace_callback, set_trace_callback, TraceCallback, TraceEvent};
pub use view::{ConstMapView, MapView, SetView};
