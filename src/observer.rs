//! Single-event observer.

use std::any::type_name;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::backend::{BackendKind, MapBackend};
use crate::capability::{AbstractConstMap, AbstractMap};
use crate::data::MapData;
use crate::id::{ObserverId, SubjectId};
use crate::trace::{self, TraceEvent};
use crate::ObserverError;

/// A shared, immutable event handler.
pub type Handler<E> = Rc<dyn Fn(&E)>;

/// The usual container for an observer's per-subject handler table.
pub type HandlerTable<'a, E> = HashMap<SubjectId<'a, E>, Handler<E>>;

/// How an observer resolves the handler for an incoming event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverMode {
    /// Every event is swallowed. A fresh observer starts here.
    Ignore,
    /// One handler serves every subject.
    Unconditional,
    /// Handlers are looked up per subject in a bound table.
    Table,
}

impl fmt::Display for ObserverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObserverMode::Ignore => write!(f, "ignore"),
            ObserverMode::Unconditional => write!(f, "unconditional"),
            ObserverMode::Table => write!(f, "table"),
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Built-in handler tables
// -------------------------------------------------------------------------------------------------

struct IgnoreAll<E> {
    noop: Handler<E>,
}

impl<E> IgnoreAll<E> {
    fn new() -> Self {
        Self {
            noop: Rc::new(|_: &E| {}),
        }
    }
}

impl<'a, E> AbstractConstMap<SubjectId<'a, E>, Handler<E>> for IgnoreAll<E> {
    fn lookup(&self, _subject: &SubjectId<'a, E>) -> Result<Handler<E>, ObserverError> {
        Ok(Rc::clone(&self.noop))
    }

    fn signal(&self, _visit: &mut dyn FnMut(SubjectId<'a, E>, Handler<E>)) {}
}

impl<'a, E> AbstractMap<SubjectId<'a, E>, Handler<E>> for IgnoreAll<E> {
    fn define(&self, _subject: SubjectId<'a, E>, _handler: Handler<E>) {}

    fn remove(&self, _subject: &SubjectId<'a, E>) -> bool {
        true
    }
}

// Answers every lookup with one handler; `subject` is what auto-detach sees.
struct Unconditional<'a, E> {
    handler: Handler<E>,
    subject: Option<SubjectId<'a, E>>,
}

impl<'a, E> AbstractConstMap<SubjectId<'a, E>, Handler<E>> for Unconditional<'a, E> {
    fn lookup(&self, _subject: &SubjectId<'a, E>) -> Result<Handler<E>, ObserverError> {
        Ok(Rc::clone(&self.handler))
    }

    fn signal(&self, visit: &mut dyn FnMut(SubjectId<'a, E>, Handler<E>)) {
        if let Some(subject) = &self.subject {
            visit(subject.clone(), Rc::clone(&self.handler));
        }
    }
}

impl<'a, E> AbstractMap<SubjectId<'a, E>, Handler<E>> for Unconditional<'a, E> {
    fn define(&self, _subject: SubjectId<'a, E>, _handler: Handler<E>) {}

    fn remove(&self, _subject: &SubjectId<'a, E>) -> bool {
        true
    }
}

// -------------------------------------------------------------------------------------------------
// Observer
// -------------------------------------------------------------------------------------------------

pub(crate) struct ObserverCore<'a, E> {
    handlers: RefCell<MapBackend<'a, SubjectId<'a, E>, Handler<E>>>,
}

impl<'a, E> ObserverCore<'a, E> {
    pub(crate) fn on_event(&self, event: &E, subject: &SubjectId<'a, E>) -> Result<(), ObserverError> {
        // The table borrow ends here so the handler may rebind or unsubscribe.
        let handler = self.handlers.borrow().lookup(subject);
        match handler {
            Ok(handler) => {
                handler(event);
                Ok(())
            }
            Err(err) => {
                log::debug!("no handler for {subject:?}: {err}");
                Err(ObserverError::handler_not_found::<E>())
            }
        }
    }
}

/// Receives events of type `E` and dispatches each to a handler chosen by the
/// subject it came from.
///
/// A fresh observer ignores everything. Bind a single handler with
/// [`bind_handler_subject1`](Self::bind_handler_subject1) or a per-subject
/// table with [`bind_subject_handlers`](Self::bind_subject_handlers); the last
/// bind wins.
///
/// Dropping an observer detaches it from every live subject its handler table
/// knows about. In unconditional mode that is only the subject named when the
/// handler was bound, so a subject attached some other way keeps a dead id
/// until its next notify prunes it.
///
/// # Examples
///
/// ```rust
/// use observer_registry::{HandlerTable, MapData, SingleObserver, SingleSubject};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// struct Level(u8);
///
/// let left = SingleSubject::<Level>::new();
/// let right = SingleSubject::<Level>::new();
///
/// let seen = Rc::new(Cell::new(0));
/// let mut observer = SingleObserver::<Level>::new();
/// observer.bind_subject_handlers(MapData::new(HandlerTable::<Level>::new()));
///
/// let sink = Rc::clone(&seen);
/// observer.define(&left.id(), move |level: &Level| sink.set(level.0));
/// observer.define_ignore(&right.id());
///
/// assert!(observer.subscribe(&left.id()));
/// assert!(observer.subscribe(&right.id()));
///
/// right.notify(&Level(9)).unwrap();
/// left.notify(&Level(4)).unwrap();
/// assert_eq!(seen.get(), 4);
/// ```
pub struct SingleObserver<'a, E> {
    core: Rc<ObserverCore<'a, E>>,
    mode: ObserverMode,
}

impl<'a, E> SingleObserver<'a, E> {
    pub fn new() -> Self {
        Self {
            core: Rc::new(ObserverCore {
                handlers: RefCell::new(MapBackend::Data(MapData::from_map(IgnoreAll::<E>::new()))),
            }),
            mode: ObserverMode::Ignore,
        }
    }

    pub fn id(&self) -> ObserverId<'a, E> {
        ObserverId::of(&self.core)
    }

    pub fn mode(&self) -> ObserverMode {
        self.mode
    }

    /// Kind of the bound handler table. The built-in ignore and
    /// unconditional tables report [`BackendKind::Data`].
    pub fn backend_kind(&self) -> BackendKind {
        self.core.handlers.borrow().kind()
    }

    /// Looks up the handler for `subject` and calls it with `event`.
    ///
    /// `None` stands for an event with no subject; it is looked up under
    /// [`SubjectId::unattributed`].
    ///
    /// # Errors
    ///
    /// Returns [`ObserverError::HandlerNotFound`] in table mode when the table
    /// has no entry for the subject.
    pub fn on_event(&self, event: &E, subject: Option<&SubjectId<'a, E>>) -> Result<(), ObserverError> {
        match subject {
            Some(subject) => self.core.on_event(event, subject),
            None => self.core.on_event(event, &SubjectId::unattributed()),
        }
    }

    /// Switches to unconditional mode: `handler` serves every subject.
    ///
    /// `subject`, when given, is the subject this observer detaches from on
    /// drop.
    pub fn bind_handler_subject1(
        &mut self,
        handler: impl Fn(&E) + 'static,
        subject: Option<&SubjectId<'a, E>>,
    ) -> &mut Self {
        let table = Unconditional {
            handler: Rc::new(handler),
            subject: subject.cloned(),
        };
        self.rebind(MapBackend::Data(MapData::from_map(table)), ObserverMode::Unconditional)
    }

    /// Switches to table mode over `handlers`, which may be a view, owned
    /// data, or a read-only table.
    pub fn bind_subject_handlers(
        &mut self,
        handlers: impl Into<MapBackend<'a, SubjectId<'a, E>, Handler<E>>>,
    ) -> &mut Self {
        self.rebind(handlers.into(), ObserverMode::Table)
    }

    fn rebind(&mut self, handlers: MapBackend<'a, SubjectId<'a, E>, Handler<E>>, mode: ObserverMode) -> &mut Self {
        *self.core.handlers.borrow_mut() = handlers;
        self.mode = mode;

        trace::emit(TraceEvent::BindHandlers {
            event: type_name::<E>(),
            mode,
        });
        self
    }

    /// Attaches this observer to `subject`. Returns `false` if it was already
    /// attached or the subject no longer exists.
    pub fn subscribe(&self, subject: &SubjectId<'a, E>) -> bool {
        let subscribed = subject
            .upgrade()
            .is_some_and(|core| core.attach(self.id()));

        trace::emit(TraceEvent::Subscribe {
            event: type_name::<E>(),
            subscribed,
        });
        subscribed
    }

    /// Detaches this observer from `subject` and drops the handler defined for
    /// it. Returns whether the detach succeeded.
    pub fn unsubscribe(&self, subject: &SubjectId<'a, E>) -> bool {
        let unsubscribed = subject
            .upgrade()
            .is_some_and(|core| core.detach(&self.id()));
        if unsubscribed {
            AbstractMap::remove(&*self.core.handlers.borrow(), subject);
        }

        trace::emit(TraceEvent::Unsubscribe {
            event: type_name::<E>(),
            unsubscribed,
        });
        unsubscribed
    }

    /// Sets the handler for `subject`. Does nothing unless in table mode.
    pub fn define(&self, subject: &SubjectId<'a, E>, handler: impl Fn(&E) + 'static) {
        self.core.handlers.borrow().define(subject.clone(), Rc::new(handler));
    }

    /// Sets a handler for `subject` that swallows its events.
    pub fn define_ignore(&self, subject: &SubjectId<'a, E>) {
        self.define(subject, |_: &E| {});
    }

    /// Drops the handler for `subject`. Always `true` outside table mode.
    pub fn remove(&self, subject: &SubjectId<'a, E>) -> bool {
        AbstractMap::remove(&*self.core.handlers.borrow(), subject)
    }
}

impl<E> Default for SingleObserver<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for SingleObserver<'_, E> {
    fn drop(&mut self) {
        let me = self.id();
        let mut subjects = 0;
        self.core.handlers.borrow().signal(&mut |subject, _| {
            if let Some(core) = subject.upgrade() {
                if core.detach(&me) {
                    subjects += 1;
                }
            }
        });

        trace::emit(TraceEvent::AutoDetach {
            event: type_name::<E>(),
            subjects,
        });
    }
}

impl<E> fmt::Debug for SingleObserver<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleObserver")
            .field("event", &type_name::<E>())
            .field("mode", &self.mode)
            .field("handlers", &*self.core.handlers.borrow())
            .finish()
    }
}
