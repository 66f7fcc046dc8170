use std::fs::File;

use radiocombo::{Document, Element, Markers, RadioComboController};
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("walkthrough.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let mut doc = Document::new(ui())?;
    let controller = RadioComboController::initialize(&mut doc, Markers::default());
    print_state("after initialize", &doc, &controller);

    for radio in ["by-id", "by-name", "by-name"] {
        let changed = doc.check(radio)?;
        print_state(&format!("check {radio} (changed={changed})"), &doc, &controller);
    }

    Ok(())
}

fn ui() -> Element {
    let entry = |radio: &str, label: &str, inputs: Vec<Element>| {
        Element::container()
            .class("radioComboEntry")
            .child(Element::radio("lookup").id(radio))
            .child(Element::label(label))
            .child(Element::container().class("text").children(inputs))
    };

    Element::container().id("form").child(
        Element::container().id("lookup").class("radioCombo").children([
            entry("by-id", "By id", vec![Element::text_input("").id("id")]),
            entry(
                "by-name",
                "By name",
                vec![
                    Element::text_input("").id("first"),
                    Element::text_input("").id("last"),
                ],
            ),
        ]),
    )
}

fn print_state(step: &str, doc: &Document, controller: &RadioComboController) {
    println!("{step}");
    println!(
        "  selected: {}",
        controller
            .selected_entry(doc, "lookup")
            .unwrap_or_else(|| "-".to_string())
    );
    for input in ["id", "first", "last"] {
        let state = match doc.is_disabled(input) {
            Some(true) => "disabled",
            Some(false) => "enabled",
            None => "missing",
        };
        println!("  {input:>5}: {state}");
    }
}
