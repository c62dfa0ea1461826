//! Hover and click feedback on cards and badges.

use std::rc::Rc;

use super::dom;
use super::shared::Shared;
use crate::error::{FxError, Result};

const LIFT: &str = "translateY(-8px) scale(1.02)";
const LIFT_SHADOW: &str = "0 20px 60px rgba(0, 102, 204, 0.2)";
const PULSE_MS: u32 = 500;

pub(crate) fn hover_lift(fx: &Rc<Shared>) -> Result<()> {
    let cards = dom::query_all_html(&fx.document, ".professional-card, .tech-badge");
    if cards.is_empty() {
        return Err(FxError::MissingTarget(".professional-card, .tech-badge".into()));
    }
    for card in cards {
        let lifted = card.clone();
        fx.listen("interactive.enter", &card, "mouseenter", move |_| {
            dom::set_style(&lifted, "transform", LIFT);
            dom::set_style(&lifted, "box-shadow", LIFT_SHADOW);
        });
        let settled = card.clone();
        fx.listen("interactive.leave", &card, "mouseleave", move |_| {
            dom::clear_style(&settled, "transform");
            dom::clear_style(&settled, "box-shadow");
        });
    }
    Ok(())
}

/// Short pulse on click. Covers badges added by the architecture diagram too,
/// so it must run after the widgets.
pub(crate) fn badge_pulse(fx: &Rc<Shared>) -> Result<()> {
    for badge in dom::query_all_html(&fx.document, ".tech-badge-glow") {
        let fx_click = Rc::clone(fx);
        let target = badge.clone();
        fx.listen("interactive.pulse", &badge, "click", move |_| {
            dom::set_style(&target, "animation", "pulse 0.5s ease");
            let target = target.clone();
            fx_click.after("interactive.pulse.reset", PULSE_MS, move |_| {
                dom::clear_style(&target, "animation");
            });
        });
    }
    Ok(())
}
