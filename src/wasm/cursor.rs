//! Eased custom cursor for pointer devices.

use std::cell::Cell;
use std::rc::Rc;

use gloo::render::request_animation_frame;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent};

use super::dom;
use super::handles::Scheduled;
use super::shared::Shared;
use crate::effects::Effect;
use crate::error::Result;

const FRAME_KEY: &str = "cursorFollower.frame";
const EASING: f64 = 0.1;
const HALF_SIZE: f64 = 10.0;
const HOVER_TARGETS: &str = "a, button, .btn, .tech-badge";

const CURSOR_CSS: &str = "position: fixed; top: 0; left: 0; width: 20px; height: 20px; \
     background: var(--primary-color); border-radius: 50%; pointer-events: none; \
     z-index: 9999; transition: transform 0.1s ease; opacity: 0;";

#[derive(Default)]
struct Pointer {
    target: Cell<(f64, f64)>,
    eased: Cell<(f64, f64)>,
    hovering: Cell<bool>,
}

impl Pointer {
    fn ease(&self) -> (f64, f64) {
        let (tx, ty) = self.target.get();
        let (x, y) = self.eased.get();
        let next = (x + (tx - x) * EASING, y + (ty - y) * EASING);
        self.eased.set(next);
        next
    }
}

pub(crate) fn start(fx: &Rc<Shared>) -> Result<()> {
    let cursor = dom::create(&fx.document, "div", "custom-cursor")?;
    cursor.style().set_css_text(CURSOR_CSS);
    dom::body(&fx.document)?.append_child(&cursor)?;

    let pointer = Rc::new(Pointer::default());
    {
        let pointer = Rc::clone(&pointer);
        let cursor = cursor.clone();
        fx.listen("cursorFollower.move", &fx.document, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                pointer
                    .target
                    .set((f64::from(mouse.client_x()), f64::from(mouse.client_y())));
                dom::set_style(&cursor, "opacity", "0.7");
            }
        });
    }
    {
        let cursor = cursor.clone();
        fx.listen("cursorFollower.leave", &fx.document, "mouseleave", move |_| {
            dom::set_style(&cursor, "opacity", "0");
        });
    }

    for el in dom::query_all(&fx.document, HOVER_TARGETS) {
        for (event, hovering, color) in [
            ("mouseenter", true, "var(--code-color)"),
            ("mouseleave", false, "var(--primary-color)"),
        ] {
            let pointer = Rc::clone(&pointer);
            let cursor = cursor.clone();
            fx.listen("cursorFollower.hover", &el, event, move |_| {
                pointer.hovering.set(hovering);
                dom::set_style(&cursor, "background", color);
            });
        }
    }

    follow(fx, cursor, pointer);
    fx.running.set(fx.running.get().with(Effect::CursorFollower));
    Ok(())
}

fn follow(fx: &Rc<Shared>, cursor: HtmlElement, pointer: Rc<Pointer>) {
    let frame = {
        let fx = Rc::clone(fx);
        move |_: f64| {
            if !fx.active.get() {
                return;
            }
            let (x, y) = pointer.ease();
            let scale = if pointer.hovering.get() { " scale(1.5)" } else { "" };
            dom::set_style(
                &cursor,
                "transform",
                &format!("translate({:.1}px, {:.1}px){scale}", x - HALF_SIZE, y - HALF_SIZE),
            );
            follow(&fx, cursor, pointer);
        }
    };
    fx.add_timer(FRAME_KEY, Scheduled::Frame(request_animation_frame(frame)));
}

