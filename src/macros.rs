//! Macros for declaring event sets.

/// Declares a fixed set of event types and the multi-event components for it.
///
/// The macro generates a module containing:
/// - `Events`, the marker implementing [`EventSet`](crate::EventSet)
/// - `Subjects<'a>` and `Observers<'a>`, one public single-event layer field
///   per event, named as in the declaration
/// - `Subject<'a>` and `Observer<'a>`, aliases for the multi-event components
///
/// Event types are resolved from the enclosing module, so declare them there
/// (not inside a function body).
///
/// # Examples
///
/// ```rust
/// use observer_registry::define_events;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// pub struct Pressed { pub key: char }
/// pub struct Released;
///
/// define_events!(keyboard { pressed: Pressed, released: Released });
///
/// fn main() {
///     let last = Rc::new(Cell::new(' '));
///     let subject = keyboard::Subject::new();
///     let mut observer = keyboard::Observer::new();
///
///     let sink = Rc::clone(&last);
///     observer.bind_handler_subject1::<Pressed>(move |e| sink.set(e.key), None);
///
///     assert!(observer.subscribe(&subject.id::<Pressed>()));
///     assert!(!subject.detach(&observer.id::<Released>()));
///
///     subject.notify(&Pressed { key: 'q' }).unwrap();
///     assert_eq!(last.get(), 'q');
/// }
/// ```
///
/// Layers can be prepared up front through the generated structs:
///
/// ```rust
/// use observer_registry::{define_events, ObserverId, SetView, SingleSubject};
/// use std::cell::RefCell;
/// use std::collections::BTreeSet;
///
/// pub struct Tick;
///
/// define_events!(clock { tick: Tick });
///
/// fn main() {
///     let registry = RefCell::new(BTreeSet::<ObserverId<Tick>>::new());
///     let layers = clock::Subjects {
///         tick: SingleSubject::with_observers(SetView::new(&registry)),
///     };
///     let subject = clock::Subject::from_layers(layers);
///     assert_eq!(subject.event_names(), &["Tick"]);
/// }
/// ```
#[macro_export]
macro_rules! define_events {
    ($(#[$meta:meta])* $vis:vis $name:ident { $($field:ident : $event:ty),+ $(,)? }) => {
        $(#[$meta])*
        $vis mod $name {
            #[allow(unused_imports)]
            use super::*;

            /// Marker for this event set.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct Events;

            /// One subject layer per event.
            #[derive(Debug)]
            pub struct Subjects<'a> {
                $(pub $field: $crate::SingleSubject<'a, $event>,)+
            }

            impl ::std::default::Default for Subjects<'_> {
                fn default() -> Self {
                    Self {
                        $($field: $crate::SingleSubject::new(),)+
                    }
                }
            }

            /// One observer layer per event.
            #[derive(Debug)]
            pub struct Observers<'a> {
                $(pub $field: $crate::SingleObserver<'a, $event>,)+
            }

            impl ::std::default::Default for Observers<'_> {
                fn default() -> Self {
                    Self {
                        $($field: $crate::SingleObserver::new(),)+
                    }
                }
            }

            impl $crate::EventSet for Events {
                type Subjects<'a> = Subjects<'a>;
                type Observers<'a> = Observers<'a>;
                const EVENTS: &'static [&'static str] = &[$(stringify!($event)),+];
            }

            // A repeated event type yields conflicting impls here.
            $(
                impl<'a> $crate::SubjectLayers<'a, $event> for Subjects<'a> {
                    fn layer(&self) -> &$crate::SingleSubject<'a, $event> {
                        &self.$field
                    }

                    fn layer_mut(&mut self) -> &mut $crate::SingleSubject<'a, $event> {
                        &mut self.$field
                    }
                }

                impl<'a> $crate::ObserverLayers<'a, $event> for Observers<'a> {
                    fn layer(&self) -> &$crate::SingleObserver<'a, $event> {
                        &self.$field
                    }

                    fn layer_mut(&mut self) -> &mut $crate::SingleObserver<'a, $event> {
                        &mut self.$field
                    }
                }
            )+

            /// Subject for every event in this set.
            pub type Subject<'a> = $crate::Subject<'a, Events>;

            /// Observer for every event in this set.
            pub type Observer<'a> = $crate::Observer<'a, Events>;
        }
    };
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
