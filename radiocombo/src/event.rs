use std::fmt;

use crate::element::Element;

/// Events delivered through a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A checkable input changed state, or a change was triggered programmatically.
    Change { target: String },
}

impl Event {
    pub fn change(target: impl Into<String>) -> Self {
        Self::Change {
            target: target.into(),
        }
    }

    /// ID of the element the event originated from.
    pub fn target(&self) -> &str {
        match self {
            Self::Change { target } => target,
        }
    }
}

/// Handle returned when registering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Decides whether a delegated listener handles an event from `target`.
/// Receives the tree root and the target element.
pub type TargetFilter = Box<dyn Fn(&Element, &Element) -> bool>;

/// Runs with mutable access to the whole tree.
pub type Handler = Box<dyn FnMut(&mut Element, &Event)>;

/// A delegated listener: attached to `scope`, fires for matching descendants.
pub struct Listener {
    pub id: ListenerId,
    pub scope: String,
    pub filter: TargetFilter,
    pub handler: Handler,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
