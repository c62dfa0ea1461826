//! Navbar hide/show, smooth scrolling and active-link tracking.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::request_animation_frame;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::dom;
use super::handles::Scheduled;
use super::reveal::{observe_on_enter, ObserveOptions};
use super::shared::Shared;
use crate::error::Result;
use crate::scroll::{NavbarState, NavbarTracker, SectionTracker};

const NAV_LINKS: &str = ".navbar-nav .nav-link[href^=\"#\"]";
const NAVBAR_FRAME_KEY: &str = "navbar.frame";
/// Top-biased band: a section counts once it crosses the upper 40% of the
/// viewport, below the fixed navbar.
const SECTION_BAND: &str = "-80px 0px -60% 0px";

fn apply_navbar(navbar: &HtmlElement, state: NavbarState) {
    let _ = navbar.class_list().toggle_with_force("scrolled", state.scrolled);
    let shift = if state.hidden { "translateY(-100%)" } else { "translateY(0)" };
    dom::set_style(navbar, "transform", shift);
}

pub(crate) fn navbar(fx: &Rc<Shared>) -> Result<()> {
    let navbar = dom::require_html(&fx.document, ".navbar")?;
    let tracker = Rc::new(RefCell::new(NavbarTracker::new(fx.config.navbar)));
    {
        let navbar = navbar.clone();
        fx.on_teardown(move || {
            let _ = navbar.class_list().remove_1("scrolled");
            dom::clear_style(&navbar, "transform");
        });
    }

    let on_scroll = {
        let fx = Rc::clone(fx);
        move |_: &web_sys::Event| {
            // One update per frame; the pending frame doubles as the flag.
            if !fx.active.get() || fx.registry.borrow().has_timer(NAVBAR_FRAME_KEY) {
                return;
            }
            let frame = {
                let fx = Rc::clone(&fx);
                let navbar = navbar.clone();
                let tracker = Rc::clone(&tracker);
                move |_: f64| {
                    fx.release_timer(NAVBAR_FRAME_KEY);
                    let offset = dom::scroll_offset(&fx.window);
                    let height = f64::from(navbar.offset_height());
                    if let Some(state) = tracker.borrow_mut().update(offset, height) {
                        apply_navbar(&navbar, state);
                    }
                }
            };
            fx.add_timer(NAVBAR_FRAME_KEY, Scheduled::Frame(request_animation_frame(frame)));
        }
    };
    fx.listen("navbar.scroll", &fx.window, "scroll", on_scroll);
    Ok(())
}

/// Smoothly scrolls so the section sits just below the navbar.
pub(crate) fn scroll_to_section(fx: &Shared, id: &str) -> bool {
    let Ok(section) = dom::by_id(&fx.document, id) else {
        return false;
    };
    let top = f64::from(section.offset_top()) - fx.config.navbar.scroll_offset;
    let opts = ScrollToOptions::new();
    opts.set_top(top.max(0.0));
    opts.set_behavior(ScrollBehavior::Smooth);
    fx.window.scroll_to_with_scroll_to_options(&opts);
    true
}

fn mark_active(links: &[Element], id: &str) {
    let href = format!("#{id}");
    for link in links {
        let on = link.get_attribute("href").as_deref() == Some(href.as_str());
        let _ = link.class_list().toggle_with_force("active", on);
    }
}

pub(crate) fn smooth_scroll(fx: &Rc<Shared>) -> Result<()> {
    let links = Rc::new(dom::require_all(&fx.document, NAV_LINKS)?);
    for link in links.iter() {
        let on_click = {
            let fx = Rc::clone(fx);
            let links = Rc::clone(&links);
            let link = link.clone();
            move |event: &web_sys::Event| {
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let id = href.trim_start_matches('#');
                if scroll_to_section(&fx, id) {
                    event.prevent_default();
                    mark_active(&links, id);
                }
            }
        };
        fx.listen_active("smoothScroll.click", link, "click", on_click);
    }
    Ok(())
}

/// Highlights the nav link of the topmost section in the reading band.
pub(crate) fn active_section(fx: &Rc<Shared>) -> Result<()> {
    let links = dom::query_all(&fx.document, NAV_LINKS);
    let sections = dom::require_all(&fx.document, "section[id]")?;
    let mut tracker = SectionTracker::new(sections.iter().map(Element::id));

    let opts = ObserveOptions {
        threshold: 0.0,
        root_margin: SECTION_BAND,
        once: false,
        report_exit: true,
    };
    observe_on_enter(fx, "activeSection", "section[id]", opts, move |_, section, visible| {
        let moved = tracker.set_visible(&section.id(), visible).map(str::to_owned);
        if let Some(id) = moved {
            mark_active(&links, &id);
        }
    })?;
    Ok(())
}
