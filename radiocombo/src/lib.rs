pub mod controller;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod markers;

pub use controller::{EntryBinding, GroupBinding, RadioComboController};
pub use document::Document;
pub use element::{Element, ElementKind, InputKind};
pub use error::{Error, Result};
pub use event::{Event, ListenerId};
pub use markers::Markers;
