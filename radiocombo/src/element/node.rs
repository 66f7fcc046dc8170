use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// What an element is, as far as form semantics go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    #[default]
    Container,
    Label,
    Input(InputKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Text,
    Radio,
    Checkbox,
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub kind: ElementKind,
    /// Marker classes used for discovery.
    pub classes: Vec<String>,

    // Content
    pub content: Content,

    // Form state
    /// Radio group name. Radios sharing a name are mutually exclusive.
    pub name: Option<String>,
    pub value: String,
    pub checked: bool,
    /// Whether this element is disabled. Disabled elements don't receive input.
    pub disabled: bool,

    // Custom data storage
    pub data: HashMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            kind: ElementKind::Container,
            classes: Vec::new(),
            content: Content::None,
            name: None,
            value: String::new(),
            checked: false,
            disabled: false,
            data: HashMap::new(),
        }
    }
}

impl Element {
    pub fn container() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self {
            id: generate_id("label"),
            kind: ElementKind::Label,
            content: Content::Text(text.into()),
            ..Default::default()
        }
    }

    /// Create a text input element.
    pub fn text_input(value: impl Into<String>) -> Self {
        Self {
            id: generate_id("input"),
            kind: ElementKind::Input(InputKind::Text),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Create a radio input belonging to the named radio group.
    pub fn radio(name: impl Into<String>) -> Self {
        Self {
            id: generate_id("radio"),
            kind: ElementKind::Input(InputKind::Radio),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn checkbox() -> Self {
        Self {
            id: generate_id("checkbox"),
            kind: ElementKind::Input(InputKind::Checkbox),
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Add a marker class. Adding the same class twice is a no-op.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    // Kind queries
    pub fn input_kind(&self) -> Option<InputKind> {
        match self.kind {
            ElementKind::Input(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_input(&self) -> bool {
        self.input_kind().is_some()
    }

    pub fn is_radio(&self) -> bool {
        self.input_kind() == Some(InputKind::Radio)
    }

    // Form state
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => {
                // Replace text content with children
                self.content = Content::Children(vec![child]);
            }
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => {
                self.content = Content::Children(new_children.into_iter().collect());
            }
        }
        self
    }

    /// Append a child to an element that is already part of a tree.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    /// Remove the direct child with the given ID, returning it.
    pub fn remove_child(&mut self, id: &str) -> Option<Element> {
        if let Content::Children(children) = &mut self.content {
            let idx = children.iter().position(|c| c.id == id)?;
            return Some(children.remove(idx));
        }
        None
    }
}
