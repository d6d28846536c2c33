//! Connect mixins.
//!
//! A component that embeds a subject or observer layer can expose only the
//! subscription surface by implementing one of these traits. Callers then
//! wire components together through `attach`/`subscribe` without reaching the
//! embedded layer or being able to notify.

use crate::events::Event;
use crate::id::{ObserverId, SubjectId};
use crate::observer::SingleObserver;
use crate::subject::SingleSubject;

/// Exposes attach and detach of an embedded subject layer.
///
/// # Examples
///
/// ```rust
/// use observer_registry::{ObserverConnect, SingleObserver, SingleSubject, SubjectConnect};
///
/// pub struct Clicked;
///
/// #[derive(Default)]
/// struct Button {
///     clicked: SingleSubject<'static, Clicked>,
/// }
///
/// impl SubjectConnect<'static, Clicked> for Button {
///     fn subject_layer(&self) -> &SingleSubject<'static, Clicked> {
///         &self.clicked
///     }
/// }
///
/// #[derive(Default)]
/// struct Label {
///     on_click: SingleObserver<'static, Clicked>,
/// }
///
/// impl ObserverConnect<'static, Clicked> for Label {
///     fn observer_layer(&self) -> &SingleObserver<'static, Clicked> {
///         &self.on_click
///     }
/// }
///
/// let button = Button::default();
/// let label = Label::default();
///
/// assert!(label.subscribe(&button.subject_id()));
/// assert!(!button.attach(&label.observer_id()));
/// assert!(button.detach(&label.observer_id()));
/// ```
pub trait SubjectConnect<'a, E: Event> {
    /// The embedded layer. Implementations return a field; callers use the
    /// provided methods.
    fn subject_layer(&self) -> &SingleSubject<'a, E>;

    fn attach(&self, observer: &ObserverId<'a, E>) -> bool {
        self.subject_layer().attach(observer)
    }

    fn detach(&self, observer: &ObserverId<'a, E>) -> bool {
        self.subject_layer().detach(observer)
    }

    fn subject_id(&self) -> SubjectId<'a, E> {
        self.subject_layer().id()
    }
}

/// Exposes subscribe and unsubscribe of an embedded observer layer.
pub trait ObserverConnect<'a, E: Event> {
    fn observer_layer(&self) -> &SingleObserver<'a, E>;

    fn subscribe(&self, subject: &SubjectId<'a, E>) -> bool {
        self.observer_layer().subscribe(subject)
    }

    fn unsubscribe(&self, subject: &SubjectId<'a, E>) -> bool {
        self.observer_layer().unsubscribe(subject)
    }

    fn observer_id(&self) -> ObserverId<'a, E> {
        self.observer_layer().id()
    }
}
