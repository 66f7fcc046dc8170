use std::collections::HashSet;

use crate::element::{ancestors, find_element, find_element_mut, query_ids, Element, InputKind};
use crate::error::{Error, Result};
use crate::event::{Event, Handler, Listener, ListenerId, TargetFilter};

/// Owns an element tree and delivers events to delegated listeners.
///
/// Events bubble: a change on an input runs the listeners scoped to the input
/// itself, then its parent, and so on up to the root. Within one scope,
/// listeners run in registration order.
#[derive(Debug)]
pub struct Document {
    root: Element,
    listeners: Vec<Listener>,
    next_listener: u64,
}

impl Document {
    /// Wrap a tree. Fails if two elements share an ID.
    pub fn new(root: Element) -> Result<Self> {
        let mut seen = HashSet::new();
        check_unique(&root, &mut seen)?;
        Ok(Self {
            root,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the whole tree. ID uniqueness is not re-checked.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    /// Append `child` under `parent`. Fails if any ID in `child` is already taken.
    pub fn insert_child(&mut self, parent: &str, child: Element) -> Result<()> {
        let mut seen = HashSet::new();
        check_unique(&self.root, &mut seen)?;
        check_unique(&child, &mut seen)?;

        let parent_el = find_element_mut(&mut self.root, parent)
            .ok_or_else(|| Error::UnknownElement(parent.to_string()))?;
        parent_el.push_child(child);
        Ok(())
    }

    /// Detach the element with `id` from the tree, returning it.
    /// The root itself cannot be removed.
    pub fn remove(&mut self, id: &str) -> Result<Element> {
        if self.root.id == id {
            return Err(Error::RemoveRoot(id.to_string()));
        }
        let path = ancestors(&self.root, id);
        let parent = path
            .get(1)
            .ok_or_else(|| Error::UnknownElement(id.to_string()))?;
        find_element_mut(&mut self.root, parent)
            .and_then(|p| p.remove_child(id))
            .ok_or_else(|| Error::UnknownElement(id.to_string()))
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a delegated listener on `scope`.
    ///
    /// `filter` sees the tree root and the event target and decides whether
    /// `handler` runs.
    pub fn add_listener<F, H>(
        &mut self,
        scope: impl Into<String>,
        filter: F,
        handler: H,
    ) -> ListenerId
    where
        F: Fn(&Element, &Element) -> bool + 'static,
        H: FnMut(&mut Element, &Event) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;

        let filter: TargetFilter = Box::new(filter);
        let handler: Handler = Box::new(handler);
        let listener = Listener {
            id,
            scope: scope.into(),
            filter,
            handler,
        };
        log::debug!("[document] add {} scope={}", id, listener.scope);
        self.listeners.push(listener);
        id
    }

    /// Returns true if a listener was removed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        let removed = self.listeners.len() != before;
        if removed {
            log::debug!("[document] remove {}", id);
        }
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Deliver `event`, bubbling from the target to the root.
    /// Returns the number of handlers that ran.
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let target = event.target();
        let path = ancestors(&self.root, target);
        if path.is_empty() {
            log::debug!("[document] drop {:?}: unknown target", event);
            return 0;
        }

        let mut handled = 0;
        for scope in &path {
            for listener in self.listeners.iter_mut().filter(|l| &l.scope == scope) {
                let accepts = find_element(&self.root, target)
                    .is_some_and(|el| (listener.filter)(&self.root, el));
                if !accepts {
                    continue;
                }
                log::trace!("[document] {:?} -> {}", event, listener.id);
                (listener.handler)(&mut self.root, event);
                handled += 1;
            }
        }
        handled
    }

    /// Dispatch a change event for `id` without touching its state.
    pub fn trigger_change(&mut self, id: &str) -> usize {
        self.dispatch(&Event::change(id))
    }

    // -------------------------------------------------------------------------
    // Form state
    // -------------------------------------------------------------------------

    /// Check an input as a user would.
    ///
    /// Checking a radio unchecks every other radio with the same name and fires
    /// a change event on it; re-checking an already-checked radio does nothing.
    /// Checkboxes toggle. Disabled inputs refuse the interaction.
    /// Returns whether the input's state changed.
    pub fn check(&mut self, id: &str) -> Result<bool> {
        let el = find_element(&self.root, id).ok_or_else(|| Error::UnknownElement(id.to_string()))?;

        match el.input_kind() {
            Some(InputKind::Radio) => {
                if el.disabled || el.checked {
                    return Ok(false);
                }
                if let Some(name) = el.name.clone() {
                    let siblings = query_ids(&self.root, |e| {
                        e.is_radio() && e.id != id && e.name.as_deref() == Some(name.as_str())
                    });
                    for sibling in siblings {
                        if let Some(radio) = find_element_mut(&mut self.root, &sibling) {
                            radio.checked = false;
                        }
                    }
                }
                if let Some(radio) = find_element_mut(&mut self.root, id) {
                    radio.checked = true;
                }
            }
            Some(InputKind::Checkbox) => {
                if el.disabled {
                    return Ok(false);
                }
                if let Some(checkbox) = find_element_mut(&mut self.root, id) {
                    checkbox.checked = !checkbox.checked;
                }
            }
            _ => return Err(Error::NotCheckable(id.to_string())),
        }

        self.dispatch(&Event::change(id));
        Ok(true)
    }

    pub fn is_checked(&self, id: &str) -> Option<bool> {
        self.element(id).map(|el| el.checked)
    }

    pub fn is_disabled(&self, id: &str) -> Option<bool> {
        self.element(id).map(|el| el.disabled)
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<()> {
        let el = self
            .element_mut(id)
            .ok_or_else(|| Error::UnknownElement(id.to_string()))?;
        el.disabled = disabled;
        Ok(())
    }
}

fn check_unique(element: &Element, seen: &mut HashSet<String>) -> Result<()> {
    if !seen.insert(element.id.clone()) {
        return Err(Error::DuplicateId(element.id.clone()));
    }
    for child in element.content.children() {
        check_unique(child, seen)?;
    }
    Ok(())
}
