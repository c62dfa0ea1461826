//! Drives the headline [`TypingMachine`] and the terminal typewriter.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use web_sys::{Element, HtmlElement};

use super::dom;
use super::handles::Scheduled;
use super::shared::Shared;
use crate::error::{FxError, Result};
use crate::typing::TypingMachine;

const TYPING_KEY: &str = "typing";

pub(crate) fn headline(fx: &Rc<Shared>) -> Result<()> {
    let el = dom::require_html(&fx.document, ".typing-animation")?;
    let machine = TypingMachine::new(
        fx.config.typing.phrases.clone(),
        fx.config.typing.timings.clone(),
    )
    .ok_or_else(|| FxError::MissingTarget("typing phrases".into()))?;

    let original = el.text_content();
    {
        let el = el.clone();
        fx.on_teardown(move || el.set_text_content(original.as_deref()));
    }
    el.set_text_content(Some(""));

    let delay = machine.initial_delay();
    tick_after(fx, el, Rc::new(RefCell::new(machine)), delay);
    Ok(())
}

fn tick_after(fx: &Rc<Shared>, el: HtmlElement, machine: Rc<RefCell<TypingMachine>>, delay: u32) {
    let tick = {
        let fx = Rc::clone(fx);
        move || {
            if !fx.active.get() {
                return;
            }
            let next = {
                let mut m = machine.borrow_mut();
                let next = m.step();
                el.set_text_content(Some(m.text()));
                next
            };
            tick_after(&fx, el, machine, next);
        }
    };
    // Replacing the previous handle is fine: it is the one that just fired.
    fx.add_timer(TYPING_KEY, Scheduled::Timeout(Timeout::new(delay, tick)));
}

const TERMINAL_START_MS: u32 = 500;
const TERMINAL_CHAR_MS: u32 = 50;

/// Blanks `body` and returns a closure that types its text back in.
///
/// The original markup is put back once typing finishes, and on teardown.
pub(crate) fn prepare_terminal(fx: &Rc<Shared>, body: &Element) -> impl Fn(&Rc<Shared>) {
    let markup = body.inner_html();
    let text: Rc<Vec<char>> = Rc::new(body.text_content().unwrap_or_default().chars().collect());
    {
        let body = body.clone();
        let markup = markup.clone();
        fx.on_teardown(move || body.set_inner_html(&markup));
    }
    body.set_inner_html("");

    let body = body.clone();
    move |fx: &Rc<Shared>| {
        let key = format!("terminal#{}", fx.next_id());
        let body = body.clone();
        let markup = markup.clone();
        let text = Rc::clone(&text);
        fx.after("terminal.start", TERMINAL_START_MS, move |fx| {
            type_terminal(fx, key, body, markup, text, 0);
        });
    }
}

fn type_terminal(
    fx: &Rc<Shared>,
    key: String,
    body: Element,
    markup: String,
    text: Rc<Vec<char>>,
    shown: usize,
) {
    if !fx.active.get() {
        return;
    }
    if shown >= text.len() {
        body.set_inner_html(&markup);
        fx.release_timer(&key);
        return;
    }
    let prefix: String = text[..=shown].iter().collect();
    body.set_text_content(Some(&prefix));

    let next = {
        let fx = Rc::clone(fx);
        let key = key.clone();
        move || type_terminal(&fx, key, body, markup, text, shown + 1)
    };
    fx.add_timer(key, Scheduled::Timeout(Timeout::new(TERMINAL_CHAR_MS, next)));
}
