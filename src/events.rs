//! Multi-event subjects and observers.
//!
//! A multi-event component is one single-event layer per event type in a fixed
//! set. The set is declared once with [`define_events!`](crate::define_events),
//! which generates the layer structs and the trait impls that route a call for
//! event `E` to the right layer. Calling with an event outside the set fails to
//! compile, and so does declaring the same event twice.

use std::fmt;

use crate::backend::{MapBackend, SetBackend};
use crate::id::{ObserverId, SubjectId};
use crate::observer::{Handler, ObserverMode, SingleObserver};
use crate::subject::SingleSubject;
use crate::ObserverError;

/// Anything that can be delivered through a subject.
pub trait Event: 'static {}

impl<T: 'static> Event for T {}

/// A fixed, duplicate-free set of event types.
///
/// Implemented by the `Events` marker that [`define_events!`](crate::define_events)
/// generates; not meant to be implemented by hand.
pub trait EventSet {
    /// One [`SingleSubject`] per event.
    type Subjects<'a>: Default;
    /// One [`SingleObserver`] per event.
    type Observers<'a>: Default;
    /// Event type names, in declaration order, spelled as written in
    /// [`define_events!`](crate::define_events). Trace events name the same
    /// type by its full [`type_name`](std::any::type_name), which ends with
    /// the name written here when the event was declared without a path.
    const EVENTS: &'static [&'static str];
}

/// Routes event `E` to its subject layer.
pub trait SubjectLayers<'a, E: Event> {
    fn layer(&self) -> &SingleSubject<'a, E>;
    fn layer_mut(&mut self) -> &mut SingleSubject<'a, E>;
}

/// Routes event `E` to its observer layer.
pub trait ObserverLayers<'a, E: Event> {
    fn layer(&self) -> &SingleObserver<'a, E>;
    fn layer_mut(&mut self) -> &mut SingleObserver<'a, E>;
}

// -------------------------------------------------------------------------------------------------
// Subject
// -------------------------------------------------------------------------------------------------

/// A subject for every event in `S`.
///
/// Each method takes the event type as a generic parameter, usually inferred
/// from the arguments, and forwards to that event's [`SingleSubject`].
pub struct Subject<'a, S: EventSet> {
    layers: S::Subjects<'a>,
}

impl<'a, S: EventSet> Subject<'a, S> {
    pub fn new() -> Self {
        Self::from_layers(Default::default())
    }

    /// Builds a subject from layers configured up front, for example with
    /// caller-owned registries.
    pub fn from_layers(layers: S::Subjects<'a>) -> Self {
        Self { layers }
    }

    pub fn event_names(&self) -> &'static [&'static str] {
        S::EVENTS
    }

    pub fn layer<E: Event>(&self) -> &SingleSubject<'a, E>
    where
        S::Subjects<'a>: SubjectLayers<'a, E>,
    {
        <S::Subjects<'a> as SubjectLayers<'a, E>>::layer(&self.layers)
    }

    pub fn layer_mut<E: Event>(&mut self) -> &mut SingleSubject<'a, E>
    where
        S::Subjects<'a>: SubjectLayers<'a, E>,
    {
        <S::Subjects<'a> as SubjectLayers<'a, E>>::layer_mut(&mut self.layers)
    }

    pub fn id<E: Event>(&self) -> SubjectId<'a, E>
    where
        S::Subjects<'a>: SubjectLayers<'a, E>,
    {
        self.layer::<E>().id()
    }

    pub fn attach<E: Event>(&self, observer: &ObserverId<'a, E>) -> bool
    where
        S::Subjects<'a>: SubjectLayers<'a, E>,
    {
        self.layer::<E>().attach(observer)
    }

    pub fn detach<E: Event>(&self, observer: &ObserverId<'a, E>) -> bool
    where
        S::Subjects<'a>: SubjectLayers<'a, E>,
    {
        self.layer::<E>().detach(observer)
    }

    /// Notifies the observers of `E`'s layer only.
    ///
    /// # Errors
    ///
    /// See [`SingleSubject::notify`].
    pub fn notify<E: Event>(&self, event: &E) -> Result<(), ObserverError>
    where
        S::Subjects<'a>: SubjectLayers<'a, E>,
    {
        self.layer::<E>().notify(event)
    }

    pub fn bind_observer_set<E: Event>(
        &mut self,
        observers: impl Into<SetBackend<'a, ObserverId<'a, E>>>,
    ) -> &mut Self
    where
        S::Subjects<'a>: SubjectLayers<'a, E>,
    {
        self.layer_mut::<E>().bind_observer_set(observers);
        self
    }

    pub fn observer_count<E: Event>(&self) -> usize
    where
        S::Subjects<'a>: SubjectLayers<'a, E>,
    {
        self.layer::<E>().observer_count()
    }
}

impl<S: EventSet> Default for Subject<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSet> fmt::Debug for Subject<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("events", &S::EVENTS)
            .finish_non_exhaustive()
    }
}

// -------------------------------------------------------------------------------------------------
// Observer
// -------------------------------------------------------------------------------------------------

/// An observer for every event in `S`.
///
/// Dropping it drops every layer, and each layer auto-detaches on its own.
pub struct Observer<'a, S: EventSet> {
    layers: S::Observers<'a>,
}

impl<'a, S: EventSet> Observer<'a, S> {
    pub fn new() -> Self {
        Self::from_layers(Default::default())
    }

    pub fn from_layers(layers: S::Observers<'a>) -> Self {
        Self { layers }
    }

    pub fn event_names(&self) -> &'static [&'static str] {
        S::EVENTS
    }

    pub fn layer<E: Event>(&self) -> &SingleObserver<'a, E>
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        <S::Observers<'a> as ObserverLayers<'a, E>>::layer(&self.layers)
    }

    pub fn layer_mut<E: Event>(&mut self) -> &mut SingleObserver<'a, E>
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        <S::Observers<'a> as ObserverLayers<'a, E>>::layer_mut(&mut self.layers)
    }

    pub fn id<E: Event>(&self) -> ObserverId<'a, E>
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer::<E>().id()
    }

    pub fn mode<E: Event>(&self) -> ObserverMode
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer::<E>().mode()
    }

    /// # Errors
    ///
    /// See [`SingleObserver::on_event`].
    pub fn on_event<E: Event>(
        &self,
        event: &E,
        subject: Option<&SubjectId<'a, E>>,
    ) -> Result<(), ObserverError>
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer::<E>().on_event(event, subject)
    }

    pub fn bind_handler_subject1<E: Event>(
        &mut self,
        handler: impl Fn(&E) + 'static,
        subject: Option<&SubjectId<'a, E>>,
    ) -> &mut Self
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer_mut::<E>().bind_handler_subject1(handler, subject);
        self
    }

    pub fn bind_subject_handlers<E: Event>(
        &mut self,
        handlers: impl Into<MapBackend<'a, SubjectId<'a, E>, Handler<E>>>,
    ) -> &mut Self
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer_mut::<E>().bind_subject_handlers(handlers);
        self
    }

    pub fn subscribe<E: Event>(&self, subject: &SubjectId<'a, E>) -> bool
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer::<E>().subscribe(subject)
    }

    pub fn unsubscribe<E: Event>(&self, subject: &SubjectId<'a, E>) -> bool
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer::<E>().unsubscribe(subject)
    }

    pub fn define<E: Event>(&self, subject: &SubjectId<'a, E>, handler: impl Fn(&E) + 'static)
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer::<E>().define(subject, handler)
    }

    pub fn define_ignore<E: Event>(&self, subject: &SubjectId<'a, E>)
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer::<E>().define_ignore(subject)
    }

    pub fn remove<E: Event>(&self, subject: &SubjectId<'a, E>) -> bool
    where
        S::Observers<'a>: ObserverLayers<'a, E>,
    {
        self.layer::<E>().remove(subject)
    }
}

impl<S: EventSet> Default for Observer<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSet> fmt::Debug for Observer<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("events", &S::EVENTS)
            .finish_non_exhaustive()
    }
}
