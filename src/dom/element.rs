// ============================================================================
// ELEMENT HELPERS - Basic DOM access
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, Window};

pub const HIDDEN_CLASS: &str = "hidden";
pub const ACTIVE_CLASS: &str = "active";
pub const DISABLED_CLASS: &str = "disabled";

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Like `get_element_by_id`, but a missing element is an error
pub fn require_element(id: &str) -> Result<Element, JsValue> {
    get_element_by_id(id).ok_or_else(|| JsValue::from_str(&format!("Element #{} not found", id)))
}

pub fn toggle_class(element: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    element.class_list().toggle_with_force(class, on).map(|_| ())
}

/// Show or hide by toggling the `hidden` class
pub fn set_hidden(element: &Element, hidden: bool) -> Result<(), JsValue> {
    toggle_class(element, HIDDEN_CLASS, hidden)
}

pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

pub fn get_attribute(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

/// All elements under `root` matching `selector`
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Current value of an `<input>` or `<select>` by id
pub fn input_value(id: &str) -> Result<String, JsValue> {
    control_value(&require_element(id)?)
}

/// Current value of the control named `name` inside `form`
pub fn field_value(form: &Element, name: &str) -> Result<String, JsValue> {
    let field = form
        .query_selector(&format!("[name=\"{}\"]", name))?
        .ok_or_else(|| JsValue::from_str(&format!("Field '{}' not found", name)))?;
    control_value(&field)
}

fn control_value(element: &Element) -> Result<String, JsValue> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Ok(input.value());
    }
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        return Ok(select.value());
    }
    Err(JsValue::from_str(&format!("#{} is not a form control", element.id())))
}
