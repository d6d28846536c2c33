//! Single-event subject.

use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::backend::{BackendKind, SetBackend};
use crate::capability::AbstractSet;
use crate::id::{ObserverId, SubjectId};
use crate::trace::{self, TraceEvent};
use crate::ObserverError;

pub(crate) struct SubjectCore<'a, E> {
    observers: RefCell<SetBackend<'a, ObserverId<'a, E>>>,
}

impl<'a, E> SubjectCore<'a, E> {
    pub(crate) fn attach(&self, observer: ObserverId<'a, E>) -> bool {
        let attached = self.observers.borrow().append(observer);
        trace::emit(TraceEvent::Attach {
            event: type_name::<E>(),
            attached,
        });
        attached
    }

    pub(crate) fn detach(&self, observer: &ObserverId<'a, E>) -> bool {
        let detached = self.observers.borrow().remove(observer);
        trace::emit(TraceEvent::Detach {
            event: type_name::<E>(),
            detached,
        });
        detached
    }
}

/// Fans events of type `E` out to the observers attached to it.
///
/// The subscriber registry is a [`SetBackend`] of [`ObserverId`]s: an owned,
/// insertion-ordered set by default, or any view or owned container passed to
/// [`with_observers`](Self::with_observers) or
/// [`bind_observer_set`](Self::bind_observer_set).
///
/// A subject can be moved; its identity lives in a heap allocation, so ids
/// handed out earlier stay valid. It cannot be cloned.
///
/// # Examples
///
/// ```rust
/// use observer_registry::{SingleObserver, SingleSubject};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// struct Tick(u32);
///
/// let total = Rc::new(Cell::new(0));
/// let subject = SingleSubject::<Tick>::new();
/// let mut observer = SingleObserver::<Tick>::new();
///
/// let sink = Rc::clone(&total);
/// observer.bind_handler_subject1(move |tick: &Tick| sink.set(sink.get() + tick.0), None);
///
/// assert!(subject.attach(&observer.id()));
/// assert!(!subject.attach(&observer.id()));
///
/// subject.notify(&Tick(5)).unwrap();
/// assert_eq!(total.get(), 5);
/// ```
pub struct SingleSubject<'a, E> {
    core: Rc<SubjectCore<'a, E>>,
}

impl<'a, E> SingleSubject<'a, E> {
    /// Creates a subject with an owned, empty registry.
    pub fn new() -> Self {
        Self::with_observers(SetBackend::default())
    }

    /// Creates a subject over a pre-built registry.
    pub fn with_observers(observers: impl Into<SetBackend<'a, ObserverId<'a, E>>>) -> Self {
        Self {
            core: Rc::new(SubjectCore {
                observers: RefCell::new(observers.into()),
            }),
        }
    }

    pub fn id(&self) -> SubjectId<'a, E> {
        SubjectId::of(&self.core)
    }

    /// Subscribes `observer`. Returns `false` if it was already subscribed.
    pub fn attach(&self, observer: &ObserverId<'a, E>) -> bool {
        self.core.attach(observer.clone())
    }

    /// Unsubscribes `observer`. Returns `false` if it was not subscribed.
    pub fn detach(&self, observer: &ObserverId<'a, E>) -> bool {
        self.core.detach(observer)
    }

    /// Delivers `event` to every subscribed observer, tagged with this
    /// subject's id.
    ///
    /// Observers may attach or detach (themselves or others) from inside their
    /// handlers. An observer detached during the walk is not visited
    /// afterwards. Observers that were dropped without detaching are skipped
    /// and removed from the registry.
    ///
    /// # Errors
    ///
    /// Stops at the first observer that has no handler for this subject and
    /// returns [`ObserverError::HandlerNotFound`].
    pub fn notify(&self, event: &E) -> Result<(), ObserverError> {
        let subject = self.id();
        let observers = self.core.observers.borrow();

        let mut delivered = 0;
        let mut outcome: Result<(), ObserverError> = Ok(());
        observers.signal(&mut |observer| {
            if outcome.is_err() {
                return;
            }
            match observer.upgrade() {
                Some(core) => {
                    outcome = core.on_event(event, &subject);
                    if outcome.is_ok() {
                        delivered += 1;
                    }
                }
                None => {
                    log::debug!("pruning dropped observer {observer:?}");
                    observers.remove(&observer);
                }
            }
        });

        trace::emit(TraceEvent::Notify {
            event: type_name::<E>(),
            delivered,
        });
        outcome
    }

    /// Replaces the registry. The previous backend, and any container it
    /// owned, is dropped.
    pub fn bind_observer_set(
        &mut self,
        observers: impl Into<SetBackend<'a, ObserverId<'a, E>>>,
    ) -> &mut Self {
        let observers = observers.into();
        let backend = observers.kind();
        *self.core.observers.borrow_mut() = observers;

        trace::emit(TraceEvent::BindObserverSet {
            event: type_name::<E>(),
            backend,
        });
        self
    }

    /// Number of subscribed observers.
    pub fn observer_count(&self) -> usize {
        self.core.observers.borrow().len()
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.core.observers.borrow().kind()
    }
}

impl<E> Default for SingleSubject<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for SingleSubject<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleSubject")
            .field("event", &type_name::<E>())
            .field("backend", &self.backend_kind())
            .field("observers", &self.observer_count())
            .finish()
    }
}
