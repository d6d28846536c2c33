use thiserror::Error;

/// Errors surfaced by handler tables and event delivery.
///
/// Attaching, detaching and removing report their outcome as `bool`; only a
/// lookup that cannot find its key escalates to an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObserverError {
    /// A map descriptor was asked for a key it does not hold.
    #[error("key not found in handler table (key type: {key_type})")]
    KeyNotFound {
        /// The type name of the key that was looked up
        key_type: &'static str,
    },

    /// An observer received an event from a subject it holds no handler for.
    #[error("no handler bound for event {event_type}")]
    HandlerNotFound {
        /// The type name of the event being delivered
        event_type: &'static str,
    },
}

impl ObserverError {
    pub(crate) fn key_not_found<K>() -> Self {
        ObserverError::KeyNotFound {
            key_type: std::any::type_name::<K>(),
        }
    }

    pub(crate) fn handler_not_found<E>() -> Self {
        ObserverError::HandlerNotFound {
            event_type: std::any::type_name::<E>(),
        }
    }
}
