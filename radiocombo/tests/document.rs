use std::cell::RefCell;
use std::rc::Rc;

use radiocombo::element::{ancestors, closest, query_ids};
use radiocombo::{Document, Element, Error, Event};

fn form() -> Element {
    Element::container()
        .id("root")
        .child(
            Element::container()
                .id("fieldset")
                .class("choices")
                .child(Element::radio("size").id("small"))
                .child(Element::radio("size").id("large").checked(true))
                .child(Element::radio("color").id("red")),
        )
        .child(Element::checkbox().id("agree"))
        .child(Element::text_input("hello").id("note"))
}

// ============================================================================
// Tree Queries
// ============================================================================

#[test]
fn test_ancestors_target_first() {
    let root = form();
    assert_eq!(
        ancestors(&root, "small"),
        vec!["small".to_string(), "fieldset".to_string(), "root".to_string()]
    );
    assert!(ancestors(&root, "missing").is_empty());
}

#[test]
fn test_closest_includes_self() {
    let root = form();
    let found = closest(&root, "small", |e| e.has_class("choices"));
    assert_eq!(found.map(|e| e.id.as_str()), Some("fieldset"));

    let found = closest(&root, "fieldset", |e| e.has_class("choices"));
    assert_eq!(found.map(|e| e.id.as_str()), Some("fieldset"));

    assert!(closest(&root, "note", |e| e.has_class("choices")).is_none());
}

#[test]
fn test_query_ids_document_order() {
    let root = form();
    assert_eq!(
        query_ids(&root, |e| e.is_input()),
        vec!["small", "large", "red", "agree", "note"]
    );
}

#[test]
fn test_class_is_not_duplicated() {
    let el = Element::container().class("a").class("a").class("b");
    assert_eq!(el.classes, vec!["a", "b"]);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_duplicate_ids_rejected() {
    let root = Element::container()
        .id("root")
        .child(Element::text_input("").id("dup"))
        .child(Element::text_input("").id("dup"));

    match Document::new(root) {
        Err(Error::DuplicateId(id)) => assert_eq!(id, "dup"),
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn test_insert_and_remove_child() {
    let mut doc = Document::new(form()).unwrap();

    doc.insert_child("fieldset", Element::radio("size").id("medium"))
        .unwrap();
    assert!(doc.element("medium").is_some());

    let err = doc
        .insert_child("fieldset", Element::radio("size").id("small"))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateId(_)));

    let err = doc
        .insert_child("nowhere", Element::radio("size").id("xl"))
        .unwrap_err();
    assert!(matches!(err, Error::UnknownElement(_)));

    let removed = doc.remove("medium").unwrap();
    assert_eq!(removed.id, "medium");
    assert!(doc.element("medium").is_none());

    // The root has no parent to be removed from
    assert!(matches!(doc.remove("root"), Err(Error::RemoveRoot(_))));
    assert!(matches!(doc.remove("ghost"), Err(Error::UnknownElement(_))));
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_dispatch_bubbles_target_first() {
    let mut doc = Document::new(form()).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    for scope in ["root", "fieldset", "small"] {
        let log = Rc::clone(&log);
        doc.add_listener(scope, |_, _| true, move |_, _| {
            log.borrow_mut().push(scope);
        });
    }

    assert_eq!(doc.trigger_change("small"), 3);
    assert_eq!(*log.borrow(), vec!["small", "fieldset", "root"]);
}

#[test]
fn test_dispatch_registration_order_within_scope() {
    let mut doc = Document::new(form()).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    for n in 0..3 {
        let log = Rc::clone(&log);
        doc.add_listener("root", |_, _| true, move |_, _| log.borrow_mut().push(n));
    }

    doc.trigger_change("note");
    assert_eq!(*log.borrow(), vec![0, 1, 2]);
}

#[test]
fn test_dispatch_outside_scope_not_delivered() {
    let mut doc = Document::new(form()).unwrap();
    let hits = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&hits);
    doc.add_listener("fieldset", |_, _| true, move |_, _| *counter.borrow_mut() += 1);

    assert_eq!(doc.trigger_change("note"), 0);
    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn test_dispatch_filter_inspects_target() {
    let mut doc = Document::new(form()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    doc.add_listener(
        "root",
        |_, target| target.is_radio(),
        move |_, event| sink.borrow_mut().push(event.target().to_string()),
    );

    doc.trigger_change("note");
    doc.trigger_change("red");
    assert_eq!(*seen.borrow(), vec!["red"]);
}

#[test]
fn test_dispatch_unknown_target_dropped() {
    let mut doc = Document::new(form()).unwrap();
    doc.add_listener("root", |_, _| true, |_, _| panic!("should not run"));
    assert_eq!(doc.dispatch(&Event::change("ghost")), 0);
}

#[test]
fn test_handler_mutates_tree() {
    let mut doc = Document::new(form()).unwrap();
    doc.add_listener("root", |_, _| true, |root, _| {
        if let Some(note) = radiocombo::element::find_element_mut(root, "note") {
            note.disabled = true;
        }
    });

    doc.trigger_change("agree");
    assert_eq!(doc.is_disabled("note"), Some(true));
}

#[test]
fn test_remove_listener() {
    let mut doc = Document::new(form()).unwrap();
    let id = doc.add_listener("root", |_, _| true, |_, _| {});
    assert_eq!(doc.listener_count(), 1);

    assert!(doc.remove_listener(id));
    assert!(!doc.remove_listener(id));
    assert_eq!(doc.trigger_change("note"), 0);
}

// ============================================================================
// Form State
// ============================================================================

#[test]
fn test_check_radio_unchecks_same_name() {
    let mut doc = Document::new(form()).unwrap();
    doc.check("red").unwrap();

    assert!(doc.check("small").unwrap());
    assert_eq!(doc.is_checked("small"), Some(true));
    assert_eq!(doc.is_checked("large"), Some(false));
    // Different name is untouched
    assert_eq!(doc.is_checked("red"), Some(true));
}

#[test]
fn test_check_fires_change_only_on_new_selection() {
    let mut doc = Document::new(form()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    doc.add_listener("root", |_, _| true, move |_, event| {
        sink.borrow_mut().push(event.target().to_string())
    });

    // Already checked: nothing happens
    assert!(!doc.check("large").unwrap());
    assert!(doc.check("small").unwrap());
    assert_eq!(*seen.borrow(), vec!["small"]);
}

#[test]
fn test_check_disabled_radio_refused() {
    let mut doc = Document::new(form()).unwrap();
    doc.set_disabled("small", true).unwrap();

    assert!(!doc.check("small").unwrap());
    assert_eq!(doc.is_checked("small"), Some(false));
    assert_eq!(doc.is_checked("large"), Some(true));
}

#[test]
fn test_check_checkbox_toggles() {
    let mut doc = Document::new(form()).unwrap();
    assert!(doc.check("agree").unwrap());
    assert_eq!(doc.is_checked("agree"), Some(true));
    assert!(doc.check("agree").unwrap());
    assert_eq!(doc.is_checked("agree"), Some(false));
}

#[test]
fn test_check_errors() {
    let mut doc = Document::new(form()).unwrap();
    assert!(matches!(doc.check("note"), Err(Error::NotCheckable(_))));
    assert!(matches!(doc.check("ghost"), Err(Error::UnknownElement(_))));
    assert!(matches!(
        doc.set_disabled("ghost", true),
        Err(Error::UnknownElement(_))
    ));
}

#[test]
fn test_unnamed_radio_only_exclusive_with_itself() {
    let mut radio = Element::radio("x").id("lonely");
    radio.name = None;
    let root = Element::container()
        .id("root")
        .child(radio)
        .child(Element::radio("x").id("other").checked(true));

    let mut doc = Document::new(root).unwrap();
    assert!(doc.check("lonely").unwrap());
    assert_eq!(doc.is_checked("other"), Some(true));
}
