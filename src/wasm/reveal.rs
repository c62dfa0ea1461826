//! Intersection-triggered effects.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlElement, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use super::a11y;
use super::dom;
use super::handles::{ObserverHandle, Watcher};
use super::shared::Shared;
use super::typing_fx;
use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ObserveOptions {
    pub(crate) threshold: f64,
    pub(crate) root_margin: &'static str,
    /// Stop watching an element after its first entry.
    pub(crate) once: bool,
    /// Also call back when an element leaves.
    pub(crate) report_exit: bool,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px",
            once: true,
            report_exit: false,
        }
    }
}

/// Watches everything matching `selector` and calls `on_change` as elements
/// enter (and, with `report_exit`, leave) the viewport.
///
/// The observer is registered under `name`. Returns how many elements are
/// being watched.
pub(crate) fn observe_on_enter<F>(
    fx: &Rc<Shared>,
    name: &str,
    selector: &str,
    opts: ObserveOptions,
    mut on_change: F,
) -> Result<usize>
where
    F: FnMut(&Rc<Shared>, &Element, bool) + 'static,
{
    let targets = dom::require_all(&fx.document, selector)?;

    let callback = {
        let fx = Rc::clone(fx);
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                if !fx.active.get() {
                    return;
                }
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    let visible = entry.is_intersecting();
                    if visible && opts.once {
                        observer.unobserve(&target);
                    }
                    if visible || opts.report_exit {
                        on_change(&fx, &target, visible);
                    }
                }
            },
        )
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(opts.threshold));
    init.set_root_margin(opts.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for target in &targets {
        observer.observe(target);
    }
    fx.add_watcher(name, Watcher::Intersection(ObserverHandle::new(observer, callback)));
    Ok(targets.len())
}

/// Starts watching `el` again under an existing observer.
pub(crate) fn rearm(fx: &Shared, name: &str, el: &Element) -> bool {
    match fx.registry.borrow().observer(name) {
        Some(Watcher::Intersection(handle)) => {
            handle.observer().observe(el);
            true
        }
        _ => false,
    }
}

const REVEAL_TARGETS: &str = ".tech-badge, .professional-card, .section-title, .btn";
const BADGE_STAGGER_MS: u32 = 100;

/// One-shot entrance animations.
pub(crate) fn reveal(fx: &Rc<Shared>) -> Result<()> {
    let opts = ObserveOptions {
        threshold: 0.1,
        root_margin: "0px 0px -50px 0px",
        ..ObserveOptions::default()
    };
    observe_on_enter(fx, "reveal", REVEAL_TARGETS, opts, |fx, el, _| {
        let _ = el.class_list().add_1("animate-in");
        if el.class_list().contains("tech-badge") {
            stagger_badges(fx, el);
        }
        if el.class_list().contains("professional-card") {
            if let Some(card) = el.dyn_ref::<HtmlElement>() {
                dom::set_style(card, "animation", "fadeInUp 0.8s ease forwards");
            }
        }
    })?;
    Ok(())
}

fn stagger_badges(fx: &Rc<Shared>, container: &Element) {
    let mut badges = dom::query_all_in(container, ".tech-badge");
    if badges.is_empty() {
        badges.push(container.clone());
    }
    for (i, badge) in badges.into_iter().enumerate() {
        let Ok(badge) = badge.dyn_into::<HtmlElement>() else {
            continue;
        };
        fx.after("reveal.badge", i as u32 * BADGE_STAGGER_MS, move |_| {
            dom::set_style(&badge, "animation", "slideInUp 0.6s ease forwards");
        });
    }
}

/// Types each terminal body in the first time it scrolls into view.
pub(crate) fn terminals(fx: &Rc<Shared>) -> Result<()> {
    let bodies = dom::require_all(&fx.document, ".terminal-body")?;
    let starters: Vec<(Element, Box<dyn Fn(&Rc<Shared>)>)> = bodies
        .into_iter()
        .map(|body| {
            let start: Box<dyn Fn(&Rc<Shared>)> = Box::new(typing_fx::prepare_terminal(fx, &body));
            (body, start)
        })
        .collect();

    observe_on_enter(fx, "terminals", ".terminal-body", ObserveOptions::default(), move |fx, el, _| {
        if let Some((_, start)) = starters.iter().find(|(body, _)| body == el) {
            start(fx);
        }
    })?;
    Ok(())
}

/// Announces sections to screen readers as they become half visible.
pub(crate) fn announce_sections(fx: &Rc<Shared>) -> Result<()> {
    let opts = ObserveOptions {
        threshold: 0.5,
        once: false,
        ..ObserveOptions::default()
    };
    observe_on_enter(fx, "announcements", "section[id]", opts, |fx, section, _| {
        let title = section
            .query_selector("h2, h1")
            .ok()
            .flatten()
            .and_then(|h| h.text_content());
        if let Some(title) = title {
            a11y::announce(fx, &format!("Now viewing {} section", title.trim()));
        }
    })?;
    Ok(())
}

/// Swaps `data-src` into `src` on first sight.
pub(crate) fn lazy_images(fx: &Rc<Shared>) -> Result<()> {
    observe_on_enter(fx, "lazyImages", "img[data-src]", ObserveOptions::default(), |_, el, _| {
        let Some(img) = el.dyn_ref::<HtmlImageElement>() else {
            return;
        };
        if let Some(src) = img.get_attribute("data-src") {
            img.set_src(&src);
            let _ = img.remove_attribute("data-src");
        }
    })?;
    Ok(())
}
