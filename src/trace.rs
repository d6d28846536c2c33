//! Subscription tracing.
//!
//! Every attach, detach, notify and rebind emits a [`TraceEvent`]. Events go to
//! the `log` facade at trace level and to an optional process-wide callback.

use std::fmt;
use std::sync::{Arc, LazyLock, Mutex};

use crate::backend::BackendKind;
use crate::observer::ObserverMode;

/// Events emitted by subjects and observers.
///
/// `event` is the type name of the event the component handles, as given by
/// [`std::any::type_name`].
///
/// # Examples
///
/// ```rust
/// use observer_registry::TraceEvent;
///
/// let event = TraceEvent::Attach { event: "Clicked", attached: true };
/// assert_eq!(event.to_string(), "attach { event: Clicked, attached: true }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A subject was asked to add an observer.
    Attach { event: &'static str, attached: bool },
    /// A subject was asked to remove an observer.
    Detach { event: &'static str, detached: bool },
    /// A subject finished a notify; `delivered` counts handlers that ran without error.
    Notify { event: &'static str, delivered: usize },
    /// An observer asked a subject to attach it.
    Subscribe { event: &'static str, subscribed: bool },
    /// An observer asked a subject to detach it.
    Unsubscribe {
        event: &'static str,
        unsubscribed: bool,
    },
    /// An observer was dropped and detached from `subjects` live subjects.
    AutoDetach { event: &'static str, subjects: usize },
    /// A subject's registry was replaced.
    BindObserverSet {
        event: &'static str,
        backend: BackendKind,
    },
    /// An observer's handler table was replaced.
    BindHandlers {
        event: &'static str,
        mode: ObserverMode,
    },
}

impl TraceEvent {
    /// Type name of the event the emitting component handles.
    pub fn event_type(&self) -> &'static str {
        match self {
            TraceEvent::Attach { event, .. }
            | TraceEvent::Detach { event, .. }
            | TraceEvent::Notify { event, .. }
            | TraceEvent::Subscribe { event, .. }
            | TraceEvent::Unsubscribe { event, .. }
            | TraceEvent::AutoDetach { event, .. }
            | TraceEvent::BindObserverSet { event, .. }
            | TraceEvent::BindHandlers { event, .. } => *event,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Attach { event, attached } => {
                write!(f, "attach {{ event: {event}, attached: {attached} }}")
            }
            TraceEvent::Detach { event, detached } => {
                write!(f, "detach {{ event: {event}, detached: {detached} }}")
            }
            TraceEvent::Notify { event, delivered } => {
                write!(f, "notify {{ event: {event}, delivered: {delivered} }}")
            }
            TraceEvent::Subscribe { event, subscribed } => {
                write!(f, "subscribe {{ event: {event}, subscribed: {subscribed} }}")
            }
            TraceEvent::Unsubscribe {
                event,
                unsubscribed,
            } => {
                write!(
                    f,
                    "unsubscribe {{ event: {event}, unsubscribed: {unsubscribed} }}"
                )
            }
            TraceEvent::AutoDetach { event, subjects } => {
                write!(f, "auto-detach {{ event: {event}, subjects: {subjects} }}")
            }
            TraceEvent::BindObserverSet { event, backend } => {
                write!(f, "bind-observer-set {{ event: {event}, backend: {backend} }}")
            }
            TraceEvent::BindHandlers { event, mode } => {
                write!(f, "bind-handlers {{ event: {event}, mode: {mode} }}")
            }
        }
    }
}

/// Type alias for the user-supplied tracing callback.
///
/// Subjects and observers live on one thread each, but the callback is shared
/// by all of them, so it must be thread-safe.
pub type TraceCallback = dyn Fn(&TraceEvent) + Send + Sync + 'static;

static TRACE_CALLBACK: LazyLock<Mutex<Option<Arc<TraceCallback>>>> =
    LazyLock::new(|| Mutex::new(None));

/// Sets a tracing callback invoked on every subscription change and notify.
///
/// Replaces any previous callback.
///
/// # Example
/// ```rust
/// use observer_registry::{clear_trace_callback, set_trace_callback};
///
/// set_trace_callback(|event| println!("[observer-trace] {event}"));
/// clear_trace_callback();
/// ```
pub fn set_trace_callback(callback: impl Fn(&TraceEvent) + Send + Sync + 'static) {
    let mut guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    *guard = Some(Arc::new(callback));
}

/// Clears the tracing callback.
pub fn clear_trace_callback() {
    let mut guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    *guard = None;
}

pub(crate) fn emit(event: TraceEvent) {
    log::trace!("{event}");

    // Released before the call so a callback may touch subjects or observers.
    let callback = TRACE_CALLBACK
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .clone();
    if let Some(callback) = callback {
        callback(&event);
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
