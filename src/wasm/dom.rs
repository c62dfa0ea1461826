//! Small DOM helpers shared by the effects.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

use crate::error::{FxError, Result};
use crate::profile::HostSignals;

/// Marks elements the manager created so teardown can sweep them.
pub(crate) const MANAGED_ATTR: &str = "data-fx-managed";

pub(crate) fn window() -> Result<Window> {
    web_sys::window().ok_or(FxError::MissingWindow)
}

pub(crate) fn document(window: &Window) -> Result<Document> {
    window.document().ok_or(FxError::MissingDocument)
}

pub(crate) fn body(doc: &Document) -> Result<HtmlElement> {
    doc.body().ok_or_else(|| FxError::MissingTarget("body".into()))
}

/// Checked cast that reports what was expected.
pub(crate) fn cast<T: JsCast>(value: impl JsCast, expected: &str) -> Result<T> {
    value
        .dyn_into::<T>()
        .map_err(|_| FxError::Js(format!("expected {expected}")))
}

/// Creates an element tagged as manager-owned.
pub(crate) fn create(doc: &Document, tag: &str, class: &str) -> Result<HtmlElement> {
    let el: HtmlElement = cast(doc.create_element(tag)?, "HTMLElement")?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.set_attribute(MANAGED_ATTR, "")?;
    Ok(el)
}

pub(crate) fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

pub(crate) fn require(doc: &Document, selector: &str) -> Result<Element> {
    query(doc, selector).ok_or_else(|| FxError::MissingTarget(selector.to_owned()))
}

pub(crate) fn require_html(doc: &Document, selector: &str) -> Result<HtmlElement> {
    cast(require(doc, selector)?, "HTMLElement")
}

pub(crate) fn by_id(doc: &Document, id: &str) -> Result<HtmlElement> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| FxError::MissingTarget(format!("#{id}")))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into().ok())
        .collect()
}

pub(crate) fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    doc.query_selector_all(selector).map(elements).unwrap_or_default()
}

pub(crate) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector).map(elements).unwrap_or_default()
}

pub(crate) fn query_all_html(doc: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(doc, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into().ok())
        .collect()
}

/// Like [`query_all`], but an empty match is an error.
pub(crate) fn require_all(doc: &Document, selector: &str) -> Result<Vec<Element>> {
    let found = query_all(doc, selector);
    if found.is_empty() {
        return Err(FxError::MissingTarget(selector.to_owned()));
    }
    Ok(found)
}

pub(crate) fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    let _ = el.style().set_property(prop, value);
}

pub(crate) fn clear_style(el: &HtmlElement, prop: &str) {
    let _ = el.style().remove_property(prop);
}

/// Removes every manager-created element still attached to the document.
pub(crate) fn remove_managed(doc: &Document) -> usize {
    let found = query_all(doc, &format!("[{MANAGED_ATTR}]"));
    let n = found.len();
    found.iter().for_each(Element::remove);
    n
}

pub(crate) fn viewport(window: &Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

pub(crate) fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub(crate) fn host_signals(window: &Window) -> HostSignals {
    let navigator = window.navigator();
    let touch_supported = navigator.max_touch_points() > 0
        || js_sys::Reflect::has(window, &"ontouchstart".into()).unwrap_or(false);
    let reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false);
    HostSignals {
        viewport_width: viewport(window).0,
        user_agent: navigator.user_agent().unwrap_or_default(),
        touch_supported,
        reduced_motion,
    }
}
