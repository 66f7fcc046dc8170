//! Radio combo controller.
//!
//! A radio combo is a group of entries, each holding one radio and some text
//! inputs. Checking an entry's radio enables that entry's inputs and disables
//! every other controlled input in the group.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::document::Document;
use crate::element::{ancestors, find_element, find_element_mut, query_all, Element};
use crate::event::{Event, ListenerId};
use crate::markers::Markers;

/// One entry of a resolved group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryBinding {
    /// ID of the entry element.
    pub id: String,
    /// Radios owned by this entry, in document order.
    pub radios: Vec<String>,
    /// Inputs whose disabled state follows this entry's radio.
    pub inputs: Vec<String>,
}

/// A group's structure, resolved from the tree.
///
/// Holds the radio → entry ownership map. Change handling checks it against
/// the tree and replaces it when the structure was edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupBinding {
    group: String,
    entries: Vec<EntryBinding>,
    owners: HashMap<String, usize>,
}

impl GroupBinding {
    /// Resolve the group with ID `group`. Returns None if the element is missing.
    pub fn resolve(root: &Element, group: &str, markers: &Markers) -> Option<Self> {
        let group_el = find_element(root, group)?;

        let in_group =
            |id: &str| enclosing(root, id, |e| markers.is_group(e)).as_deref() == Some(group);

        let entries: Vec<EntryBinding> =
            query_all(group_el, |e| e.id != group && markers.is_entry(e))
                .into_iter()
                .filter(|entry| in_group(&entry.id))
                .map(|entry| resolve_entry(root, entry, markers))
                .collect();

        let mut owners = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            for radio in &entry.radios {
                owners.insert(radio.clone(), idx);
            }
        }

        Some(Self {
            group: group.to_string(),
            entries,
            owners,
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn entries(&self) -> &[EntryBinding] {
        &self.entries
    }

    /// Entry that owns `radio`, if any.
    pub fn owner(&self, radio: &str) -> Option<&EntryBinding> {
        self.owners.get(radio).map(|&idx| &self.entries[idx])
    }

    /// All radios in the group, in document order.
    pub fn radios(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|entry| entry.radios.iter().map(String::as_str))
    }

    /// Disable every controlled input in the group, then enable the inputs of
    /// the entry owning `radio`. Returns false, changing nothing, if no entry
    /// owns `radio`.
    pub fn apply(&self, root: &mut Element, radio: &str) -> bool {
        let Some(&owner) = self.owners.get(radio) else {
            return false;
        };

        for input in self.entries.iter().flat_map(|entry| &entry.inputs) {
            set_disabled(root, input, true);
        }
        for input in &self.entries[owner].inputs {
            set_disabled(root, input, false);
        }

        log::debug!(
            "[radio_combo] group={} radio={} enabled entry={}",
            self.group,
            radio,
            self.entries[owner].id
        );
        true
    }
}

fn resolve_entry(root: &Element, entry: &Element, markers: &Markers) -> EntryBinding {
    let owned = |id: &str| {
        enclosing(root, id, |e| markers.is_entry(e)).as_deref() == Some(entry.id.as_str())
    };

    let radios = query_all(entry, |e| e.is_radio())
        .into_iter()
        .filter(|radio| owned(&radio.id))
        .map(|radio| radio.id.clone())
        .collect();

    let inputs = query_all(entry, |e| e.is_input() && !e.is_radio())
        .into_iter()
        .filter(|input| owned(&input.id) && under_text_marker(root, &input.id, &entry.id, markers))
        .map(|input| input.id.clone())
        .collect();

    EntryBinding {
        id: entry.id.clone(),
        radios,
        inputs,
    }
}

/// True if `id` or one of its ancestors below `entry` carries the text marker.
fn under_text_marker(root: &Element, id: &str, entry: &str, markers: &Markers) -> bool {
    ancestors(root, id)
        .iter()
        .take_while(|ancestor| ancestor.as_str() != entry)
        .filter_map(|ancestor| find_element(root, ancestor))
        .any(|el| markers.is_text(el))
}

/// Nearest strict ancestor of `id` matching `pred`.
fn enclosing<F>(root: &Element, id: &str, pred: F) -> Option<String>
where
    F: Fn(&Element) -> bool,
{
    ancestors(root, id)
        .iter()
        .skip(1)
        .filter_map(|ancestor| find_element(root, ancestor))
        .find(|el| pred(*el))
        .map(|el| el.id.clone())
}

/// Group a radio belongs to: the group enclosing its nearest entry.
fn group_of_radio(root: &Element, radio: &str, markers: &Markers) -> Option<String> {
    let entry = enclosing(root, radio, |e| markers.is_entry(e))?;
    enclosing(root, &entry, |e| markers.is_group(e))
}

fn set_disabled(root: &mut Element, id: &str, disabled: bool) {
    if let Some(input) = find_element_mut(root, id) {
        input.disabled = disabled;
    }
}

/// Apply a change for `radio`.
///
/// The group is re-resolved first and the cached binding replaced if the tree
/// was edited since the last event (entries or inputs added, removed or moved),
/// so the binding never drives a change from stale structure.
fn handle_change(
    binding: &RefCell<GroupBinding>,
    root: &mut Element,
    radio: &str,
    markers: &Markers,
) -> bool {
    let group = binding.borrow().group.clone();
    let Some(current) = GroupBinding::resolve(root, &group, markers) else {
        log::debug!("[radio_combo] group={} no longer in tree", group);
        return false;
    };
    if *binding.borrow() != current {
        log::debug!("[radio_combo] group={} structure changed, re-resolved", group);
        *binding.borrow_mut() = current;
    }

    let applied = binding.borrow().apply(root, radio);
    if !applied {
        log::debug!("[radio_combo] group={} radio={} has no entry", group, radio);
    }
    applied
}

#[derive(Debug)]
struct AttachedGroup {
    id: String,
    listener: ListenerId,
    binding: Rc<RefCell<GroupBinding>>,
}

/// Keeps the inputs of every attached radio combo in sync with its checked radio.
///
/// # Example
///
/// ```
/// use radiocombo::{Document, Element, Markers, RadioComboController};
///
/// let root = Element::container().id("form").child(
///     Element::container().id("combo").class("radioCombo").children([
///         Element::container().class("radioComboEntry").children([
///             Element::radio("mode").id("r1"),
///             Element::container().class("text").child(Element::text_input("").id("t1")),
///         ]),
///         Element::container().class("radioComboEntry").children([
///             Element::radio("mode").id("r2").checked(true),
///             Element::container().class("text").child(Element::text_input("").id("t2")),
///         ]),
///     ]),
/// );
///
/// let mut doc = Document::new(root).unwrap();
/// let _controller = RadioComboController::initialize(&mut doc, Markers::default());
/// assert_eq!(doc.is_disabled("t1"), Some(true));
/// assert_eq!(doc.is_disabled("t2"), Some(false));
///
/// doc.check("r1").unwrap();
/// assert_eq!(doc.is_disabled("t1"), Some(false));
/// assert_eq!(doc.is_disabled("t2"), Some(true));
/// ```
#[derive(Debug, Default)]
pub struct RadioComboController {
    markers: Markers,
    groups: Vec<AttachedGroup>,
}

impl RadioComboController {
    pub fn new(markers: Markers) -> Self {
        Self {
            markers,
            groups: Vec::new(),
        }
    }

    /// Discover every group under the document root and attach to it.
    pub fn initialize(document: &mut Document, markers: Markers) -> Self {
        let groups: Vec<String> = query_all(document.root(), |e| markers.is_group(e))
            .into_iter()
            .map(|el| el.id.clone())
            .collect();
        log::debug!("[radio_combo] discovered {} group(s)", groups.len());

        let mut controller = Self::new(markers);
        controller.attach(document, groups);
        controller
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// IDs of attached groups, in attach order.
    pub fn groups(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.id.clone()).collect()
    }

    /// Snapshot of a group's resolved structure.
    pub fn binding(&self, group: &str) -> Option<GroupBinding> {
        self.find(group).map(|g| g.binding.borrow().clone())
    }

    /// Attach to each group: register its delegated change listener, then
    /// sync the inputs with whatever radio is already checked.
    ///
    /// Groups missing from the tree are skipped. Re-attaching a group replaces
    /// its listener. Returns the number of groups attached.
    pub fn attach<I, S>(&mut self, document: &mut Document, groups: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut attached = 0;
        for group in groups {
            let group = group.as_ref();
            let Some(binding) = GroupBinding::resolve(document.root(), group, &self.markers) else {
                log::warn!("[radio_combo] group={} not found, skipping", group);
                continue;
            };

            self.detach(document, group);

            let binding = Rc::new(RefCell::new(binding));
            let listener = self.register(document, group, Rc::clone(&binding));
            log::debug!(
                "[radio_combo] attached group={} entries={} via {}",
                group,
                binding.borrow().entries.len(),
                listener
            );

            // Sync with the initial selection
            let checked: Vec<String> = binding
                .borrow()
                .radios()
                .filter(|radio| document.is_checked(radio) == Some(true))
                .map(str::to_string)
                .collect();
            for radio in checked {
                document.trigger_change(&radio);
            }

            self.groups.push(AttachedGroup {
                id: group.to_string(),
                listener,
                binding,
            });
            attached += 1;
        }
        attached
    }

    fn register(
        &self,
        document: &mut Document,
        group: &str,
        binding: Rc<RefCell<GroupBinding>>,
    ) -> ListenerId {
        let filter_markers = self.markers.clone();
        let filter_group = group.to_string();
        let markers = self.markers.clone();

        document.add_listener(
            group,
            move |root: &Element, target: &Element| {
                target.is_radio()
                    && group_of_radio(root, &target.id, &filter_markers).as_deref()
                        == Some(filter_group.as_str())
            },
            move |root: &mut Element, event: &Event| {
                let Event::Change { target } = event;
                handle_change(&binding, root, target, &markers);
            },
        )
    }

    /// Handle a change for `radio` in `group` directly, as the delegated
    /// listener would. A no-op for unknown groups or unowned radios.
    pub fn on_radio_changed(&self, document: &mut Document, group: &str, radio: &str) -> bool {
        match self.find(group) {
            Some(attached) => {
                handle_change(&attached.binding, document.root_mut(), radio, &self.markers)
            }
            None => {
                log::debug!("[radio_combo] on_radio_changed: group={} not attached", group);
                false
            }
        }
    }

    /// Stop tracking a group. Input states are left as they are.
    pub fn detach(&mut self, document: &mut Document, group: &str) -> bool {
        let Some(idx) = self.groups.iter().position(|g| g.id == group) else {
            return false;
        };
        let attached = self.groups.remove(idx);
        document.remove_listener(attached.listener);
        log::debug!("[radio_combo] detached group={}", group);
        true
    }

    /// Re-resolve a group's structure after the tree was edited.
    pub fn refresh(&self, document: &Document, group: &str) -> bool {
        let Some(attached) = self.find(group) else {
            return false;
        };
        match GroupBinding::resolve(document.root(), group, &self.markers) {
            Some(resolved) => {
                *attached.binding.borrow_mut() = resolved;
                true
            }
            None => false,
        }
    }

    /// ID of the entry whose radio is currently checked.
    pub fn selected_entry(&self, document: &Document, group: &str) -> Option<String> {
        let attached = self.find(group)?;
        let binding = attached.binding.borrow();
        binding
            .entries
            .iter()
            .find(|entry| entry.radios.iter().any(|r| document.is_checked(r) == Some(true)))
            .map(|entry| entry.id.clone())
    }

    fn find(&self, group: &str) -> Option<&AttachedGroup> {
        self.groups.iter().find(|g| g.id == group)
    }
}
