//! The page-session effect manager exported to JavaScript.

use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use log::{debug, info, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DocumentReadyState, Element, HtmlElement, PerformanceNavigationTiming, Window};

use super::handles::{Scheduled, Watcher};
use super::shared::Shared;
use super::{a11y, backgrounds, cursor, dom, interactive, navigation, render, reveal, typing_fx, widgets};
use crate::config::{FxConfig, StatEntry, CONFIG_ELEMENT_ID};
use crate::effects::{select_ambient, select_effect_set, Effect, EffectSet};
use crate::error::{FxError, Result};
use crate::lifecycle::{Lifecycle, StartAction};
use crate::profile::DeviceProfile;
use crate::registry::Cancel;

const RESIZE_DEBOUNCE_MS: u32 = 250;
const RESIZE_KEY: &str = "resize.debounce";
const DOM_READY_KEY: &str = "lifecycle.domReady";

/// Owns every visual effect on the page.
///
/// Construct one per page session, call `initialize()` once the script has
/// loaded and `teardown()` before navigating away.
#[wasm_bindgen]
pub struct EffectManager {
    inner: Rc<Shared>,
}

fn load_config(json: Option<String>, doc: &web_sys::Document) -> Result<FxConfig> {
    if let Some(json) = json {
        return FxConfig::from_json(&json);
    }
    match doc
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) if !json.trim().is_empty() => FxConfig::from_json(&json),
        _ => Ok(FxConfig::default()),
    }
}

#[wasm_bindgen]
impl EffectManager {
    /// Builds a manager. `config` is optional JSON; without it the
    /// `#fx-config` script element is read, then built-in defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> std::result::Result<EffectManager, JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let config = load_config(config, &document)?;

        // Another manager may have installed the logger already.
        let _ = console_log::init_with_level(Level::Trace);
        log::set_max_level(config.level_filter());

        Ok(Self {
            inner: Rc::new(Shared::new(config, window, document)),
        })
    }

    /// Wires every effect. Repeated calls are no-ops.
    pub fn initialize(&self) {
        let fx = &self.inner;
        let ready = fx.document.ready_state() != DocumentReadyState::Loading;
        let (next, action) = fx.state.get().request_start(ready);
        fx.state.set(next);
        match action {
            StartAction::Skip => debug!("initialize: already started"),
            StartAction::Wire => wire_all(fx),
            StartAction::Defer => {
                debug!("initialize: waiting for DOMContentLoaded");
                let on_ready = {
                    let fx = Rc::clone(fx);
                    move |_: &web_sys::Event| on_dom_ready(&fx)
                };
                let listener = EventListener::once(&fx.document, "DOMContentLoaded", on_ready);
                fx.add_watcher(DOM_READY_KEY, Watcher::Listener(listener));
            }
        }
    }

    /// Recomputes the device profile and adapts running effects to it.
    #[wasm_bindgen(js_name = adjustForResize)]
    pub fn adjust_for_resize(&self) {
        if self.inner.active.get() {
            adjust_for_resize(&self.inner);
        }
    }

    /// Cancels every timer and observer and removes everything we added.
    pub fn teardown(&self) {
        teardown(&self.inner);
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    /// The current device profile as a plain object.
    pub fn profile(&self) -> std::result::Result<JsValue, JsValue> {
        let json = serde_json::to_string(&self.inner.profile()).map_err(FxError::from)?;
        js_sys::JSON::parse(&json)
    }

    /// Number of live decorative nodes.
    #[wasm_bindgen(js_name = decorCount)]
    pub fn decor_count(&self) -> usize {
        self.inner.decor.borrow().len()
    }

    /// Number of live timers plus observers.
    #[wasm_bindgen(js_name = handleCount)]
    pub fn handle_count(&self) -> usize {
        let registry = self.inner.registry.borrow();
        registry.timer_count() + registry.observer_count()
    }

    #[wasm_bindgen(js_name = scrollToSection)]
    pub fn scroll_to_section(&self, id: &str) -> bool {
        navigation::scroll_to_section(&self.inner, id)
    }

    /// Updates the stat bars from an array of `{label, percentage}`.
    ///
    /// Returns how many rows changed. Malformed input changes nothing.
    #[wasm_bindgen(js_name = updateStats)]
    pub fn update_stats(&self, stats: JsValue) -> usize {
        let parsed = js_sys::JSON::stringify(&stats)
            .ok()
            .and_then(|s| s.as_string())
            .and_then(|s| serde_json::from_str::<Vec<StatEntry>>(&s).ok());
        match parsed {
            Some(stats) => widgets::update_stats(&self.inner.document, &stats),
            None => {
                warn!("updateStats: expected an array of {{label, percentage}}");
                0
            }
        }
    }

    /// Watches `element` again under the observer registered as `name`, so a
    /// one-shot effect can fire for it once more.
    pub fn rearm(&self, name: &str, element: &Element) -> bool {
        reveal::rearm(&self.inner, name, element)
    }

    #[wasm_bindgen(js_name = triggerCodeAnimation)]
    pub fn trigger_code_animation(&self, element: Option<HtmlElement>) {
        if let Some(el) = element {
            widgets::trigger_code_animation(&self.inner, el);
        }
    }
}

impl Drop for EffectManager {
    fn drop(&mut self) {
        teardown(&self.inner);
    }
}

fn on_dom_ready(fx: &Rc<Shared>) {
    // The listener is one-shot; forget it so both start paths hold the same handles.
    fx.registry.borrow_mut().cancel_observer(DOM_READY_KEY);
    let (next, action) = fx.state.get().dom_ready();
    fx.state.set(next);
    if action == StartAction::Wire {
        wire_all(fx);
    }
}

fn wire_all(fx: &Rc<Shared>) {
    fx.active.set(true);
    let profile = DeviceProfile::from_signals(&dom::host_signals(&fx.window));
    fx.profile.set(profile);
    info!("initializing effects for {:?}", profile.tier());

    fx.attempt("styles", widgets::inject_styles(fx));
    fx.attempt("skipLink", a11y::skip_link(fx));
    fx.attempt("liveRegion", a11y::live_region(fx));
    fx.attempt("keyboard", a11y::keyboard_activation(fx));
    fx.attempt("navbar", navigation::navbar(fx));
    fx.attempt("smoothScroll", navigation::smooth_scroll(fx));
    fx.attempt("activeSection", navigation::active_section(fx));
    fx.attempt("announcements", reveal::announce_sections(fx));
    fx.attempt("lazyImages", reveal::lazy_images(fx));
    fx.attempt("codingStats", widgets::coding_stats(fx));
    fx.attempt("codeEditor", widgets::code_editor(fx));
    fx.attempt("architecture", widgets::architecture_diagram(fx));
    fx.attempt("terminalWindows", widgets::terminal_windows(fx));
    fx.attempt("hoverLift", interactive::hover_lift(fx));
    fx.attempt("badgePulse", interactive::badge_pulse(fx));
    fx.attempt("reveal", reveal::reveal(fx));

    if profile.reduced_motion_preferred {
        info!("reduced motion preferred, animated effects stay off");
    } else {
        fx.attempt("typing", typing_fx::headline(fx));
        fx.attempt("terminals", reveal::terminals(fx));
    }

    let backgrounds = select_effect_set(&profile);
    if backgrounds.contains(Effect::MatrixRain) || backgrounds.contains(Effect::BinaryRain) {
        fx.attempt("circuit", backgrounds::circuit_background(fx));
    }
    for effect in backgrounds.iter().chain(select_ambient(&profile).iter()) {
        let result = match effect {
            Effect::MatrixRain => backgrounds::matrix_rain(fx),
            Effect::BinaryRain => backgrounds::binary_rain(fx),
            Effect::TechParticles => backgrounds::tech_particles(fx),
            Effect::LightParticles => backgrounds::light_particles(fx),
            Effect::GravityCanvas => render::start(fx),
            Effect::NetworkDiagram => backgrounds::network_diagram(fx),
            Effect::CodePattern => backgrounds::code_pattern(fx),
            Effect::CursorFollower => cursor::start(fx),
        };
        fx.attempt(effect.name(), result);
    }

    watch_resize(fx);
    log_load_time(fx);
    info!("effects running: {:?}", fx.running.get());
}

fn watch_resize(fx: &Rc<Shared>) {
    let on_resize = {
        let fx = Rc::clone(fx);
        move |_: &web_sys::Event| {
            // Cancel-and-reschedule: inserting under the same key drops the
            // pending debounce.
            let settle = {
                let fx = Rc::clone(&fx);
                move || {
                    fx.release_timer(RESIZE_KEY);
                    if fx.active.get() {
                        adjust_for_resize(&fx);
                    }
                }
            };
            fx.add_timer(
                RESIZE_KEY,
                Scheduled::Timeout(Timeout::new(RESIZE_DEBOUNCE_MS, settle)),
            );
        }
    };
    fx.listen("resize", &fx.window, "resize", on_resize);
}

fn adjust_for_resize(fx: &Shared) {
    let profile = DeviceProfile::from_signals(&dom::host_signals(&fx.window));
    let before = fx.profile.replace(profile);
    if before.tier() != profile.tier() {
        info!("viewport tier {:?} -> {:?}", before.tier(), profile.tier());
    }
    backgrounds::adjust_decor(fx, profile);
    render::fit_canvas(fx);
}

fn report_load_time(window: &Window) {
    let timing = window
        .performance()
        .map(|p| p.get_entries_by_type("navigation").get(0))
        .and_then(|entry| entry.dyn_into::<PerformanceNavigationTiming>().ok())
        .map(|t| t.load_event_end());
    match timing {
        Some(ms) if ms > 0.0 => info!("page loaded in {ms:.2}ms"),
        _ => debug!("navigation timing unavailable"),
    }
}

fn log_load_time(fx: &Shared) {
    if fx.document.ready_state() == DocumentReadyState::Complete {
        report_load_time(&fx.window);
        return;
    }
    let window = fx.window.clone();
    let listener = EventListener::once(&fx.window, "load", move |_| report_load_time(&window));
    fx.add_watcher("metrics.load", Watcher::Listener(listener));
}

fn teardown(fx: &Shared) {
    fx.active.set(false);
    let (timers, observers) = fx.registry.borrow_mut().drain();
    let cancelled = timers.len() + observers.len();
    timers.into_iter().for_each(Cancel::cancel);
    observers.into_iter().for_each(Cancel::cancel);

    let decor = fx.decor.borrow_mut().drain_all();
    decor.iter().for_each(|r| r.node.remove());

    // Undo in reverse so later changes are unwound first.
    for undo in fx.take_restore().into_iter().rev() {
        undo();
    }
    let swept = dom::remove_managed(&fx.document);

    let was_started = fx.state.replace(Lifecycle::Idle).is_started();
    fx.running.set(EffectSet::empty());
    if was_started || cancelled > 0 || swept > 0 {
        info!("teardown: {cancelled} handles cancelled, {swept} elements removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn deferred_start_forgets_its_ready_listener() {
        let window = dom::window().unwrap();
        let document = dom::document(&window).unwrap();
        let fx = Rc::new(Shared::new(FxConfig::default(), window, document));
        fx.state.set(Lifecycle::AwaitingDom);
        let listener = EventListener::once(&fx.document, "DOMContentLoaded", |_| {});
        fx.add_watcher(DOM_READY_KEY, Watcher::Listener(listener));

        on_dom_ready(&fx);

        assert!(fx.active.get());
        assert_eq!(fx.state.get(), Lifecycle::Active);
        assert!(fx.registry.borrow().observer(DOM_READY_KEY).is_none());
        teardown(&fx);
        assert!(fx.registry.borrow().is_empty());
    }

    #[wasm_bindgen_test]
    fn ready_after_teardown_wires_nothing() {
        let window = dom::window().unwrap();
        let document = dom::document(&window).unwrap();
        let fx = Rc::new(Shared::new(FxConfig::default(), window, document));

        on_dom_ready(&fx);

        assert!(!fx.active.get());
        assert!(fx.registry.borrow().is_empty());
    }
}
