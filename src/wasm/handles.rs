//! Concrete handle types stored in the effect registry.

use gloo::events::EventListener;
use gloo::render::AnimationFrame;
use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;
use web_sys::IntersectionObserver;

use crate::registry::{Cancel, EffectRegistry};

pub(crate) type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Anything scheduled on the host clock.
pub(crate) enum Scheduled {
    Interval(Interval),
    Timeout(Timeout),
    Frame(AnimationFrame),
}

impl Cancel for Scheduled {
    fn cancel(self) {
        match self {
            // The returned closures are dropped right away; wasm-bindgen defers
            // the free if one of them is the callback currently running.
            Scheduled::Interval(i) => drop(i.cancel()),
            Scheduled::Timeout(t) => drop(t.cancel()),
            Scheduled::Frame(f) => drop(f),
        }
    }
}

/// An `IntersectionObserver` together with the closure it calls.
pub(crate) struct ObserverHandle {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl ObserverHandle {
    pub(crate) fn new(observer: IntersectionObserver, callback: ObserverCallback) -> Self {
        Self {
            observer,
            _callback: callback,
        }
    }

    pub(crate) fn observer(&self) -> &IntersectionObserver {
        &self.observer
    }
}

/// Anything that watches the page.
pub(crate) enum Watcher {
    Intersection(ObserverHandle),
    Listener(EventListener),
}

impl Cancel for Watcher {
    fn cancel(self) {
        match self {
            Watcher::Intersection(h) => h.observer.disconnect(),
            Watcher::Listener(l) => drop(l),
        }
    }
}

pub(crate) type Registry = EffectRegistry<Scheduled, Watcher>;
