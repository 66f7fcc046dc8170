mod content;
mod node;

pub use content::Content;
pub use node::{Element, ElementKind, InputKind};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.content.children() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.content.children_mut() {
        if let Some(found) = find_element_mut(child, id) {
            return Some(found);
        }
    }

    None
}

/// IDs from the element with `id` up to the root, target first.
/// Empty if `id` is not in the tree.
pub fn ancestors(root: &Element, id: &str) -> Vec<String> {
    let mut path = Vec::new();
    if collect_path(root, id, &mut path) {
        path.reverse();
    } else {
        path.clear();
    }
    path
}

fn collect_path(element: &Element, id: &str, path: &mut Vec<String>) -> bool {
    path.push(element.id.clone());
    if element.id == id {
        return true;
    }
    for child in element.content.children() {
        if collect_path(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Nearest element, starting at `id` itself and walking up, that matches `pred`.
pub fn closest<'a, F>(root: &'a Element, id: &str, pred: F) -> Option<&'a Element>
where
    F: Fn(&Element) -> bool,
{
    ancestors(root, id)
        .iter()
        .filter_map(|ancestor| find_element(root, ancestor))
        .find(|el| pred(*el))
}

/// All elements under (and including) `root` matching `pred`, in document order.
pub fn query_all<'a, F>(root: &'a Element, pred: F) -> Vec<&'a Element>
where
    F: Fn(&Element) -> bool,
{
    let mut result = Vec::new();
    query_all_recursive(root, &pred, &mut result);
    result
}

fn query_all_recursive<'a, F>(element: &'a Element, pred: &F, result: &mut Vec<&'a Element>)
where
    F: Fn(&Element) -> bool,
{
    if pred(element) {
        result.push(element);
    }
    for child in element.content.children() {
        query_all_recursive(child, pred, result);
    }
}

/// Like [`query_all`], returning owned IDs so the tree can be mutated afterwards.
pub fn query_ids<F>(root: &Element, pred: F) -> Vec<String>
where
    F: Fn(&Element) -> bool,
{
    query_all(root, pred)
        .into_iter()
        .map(|el| el.id.clone())
        .collect()
}
