//! Skip link, keyboard activation and the polite live region.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};

use super::dom;
use super::shared::Shared;
use crate::error::Result;

pub(crate) const LIVE_REGION_ID: &str = "fx-live-region";
const ANNOUNCE_CLEAR_MS: u32 = 1000;

const SKIP_LINK_CSS: &str = "position: absolute; top: -40px; left: 6px; \
     background: var(--primary-color); color: white; padding: 8px; \
     text-decoration: none; border-radius: 4px; z-index: 10000; transition: top 0.3s;";

pub(crate) fn skip_link(fx: &Rc<Shared>) -> Result<()> {
    let body = dom::body(&fx.document)?;
    let link = dom::create(&fx.document, "a", "sr-only")?;
    link.set_attribute("href", "#main-content")?;
    link.set_text_content(Some("Skip to main content"));
    link.style().set_css_text(SKIP_LINK_CSS);

    for (event, top) in [("focus", "6px"), ("blur", "-40px")] {
        let target = link.clone();
        fx.listen("a11y.skipLink", &link, event, move |_| {
            dom::set_style(&target, "top", top);
        });
    }
    body.insert_before(&link, body.first_child().as_ref())?;
    Ok(())
}

/// Makes cards and badges focusable and clickable from the keyboard.
pub(crate) fn keyboard_activation(fx: &Rc<Shared>) -> Result<()> {
    let targets = dom::require_all(&fx.document, ".tech-badge, .professional-card")?;
    for el in targets {
        let had_tabindex = el.has_attribute("tabindex");
        let had_role = el.has_attribute("role");
        el.set_attribute("tabindex", "0")?;
        el.set_attribute("role", "button")?;
        {
            let el = el.clone();
            fx.on_teardown(move || {
                if !had_tabindex {
                    let _ = el.remove_attribute("tabindex");
                }
                if !had_role {
                    let _ = el.remove_attribute("role");
                }
            });
        }

        let Ok(target) = el.clone().dyn_into::<HtmlElement>() else {
            continue;
        };
        fx.listen_active("a11y.keydown", &el, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if key == "Enter" || key == " " {
                event.prevent_default();
                target.click();
            }
        });
    }
    Ok(())
}

pub(crate) fn live_region(fx: &Rc<Shared>) -> Result<()> {
    let region = dom::create(&fx.document, "div", "sr-only")?;
    region.set_id(LIVE_REGION_ID);
    region.set_attribute("aria-live", "polite")?;
    region.set_attribute("aria-atomic", "true")?;
    dom::body(&fx.document)?.append_child(&region)?;
    Ok(())
}

/// Speaks `message` through the live region, then clears it.
pub(crate) fn announce(fx: &Rc<Shared>, message: &str) {
    let Ok(region) = dom::by_id(&fx.document, LIVE_REGION_ID) else {
        return;
    };
    region.set_text_content(Some(message));
    let spoken = message.to_owned();
    fx.after("a11y.announce", ANNOUNCE_CLEAR_MS, move |_| {
        // A newer announcement may have replaced ours already.
        if region.text_content().as_deref() == Some(spoken.as_str()) {
            region.set_text_content(None);
        }
    });
}
