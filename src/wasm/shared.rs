//! State shared by the manager and every effect callback.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_sys::{Document, Event, EventTarget, HtmlElement, Window};

use super::handles::{Registry, Scheduled, Watcher};
use crate::config::FxConfig;
use crate::decor::DecorField;
use crate::effects::EffectSet;
use crate::error::Result;
use crate::lifecycle::Lifecycle;
use crate::profile::DeviceProfile;

pub(crate) struct Shared {
    pub(crate) config: FxConfig,
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) state: Cell<Lifecycle>,
    /// Checked at the top of every tick; cleared first thing on teardown.
    pub(crate) active: Cell<bool>,
    pub(crate) profile: Cell<DeviceProfile>,
    /// Background and ambient effects currently running.
    pub(crate) running: Cell<EffectSet>,
    pub(crate) registry: RefCell<Registry>,
    pub(crate) decor: RefCell<DecorField<HtmlElement>>,
    pub(crate) rng: RefCell<StdRng>,
    /// Undo steps for page elements we changed but do not own.
    restore: RefCell<Vec<Box<dyn FnOnce()>>>,
    next_id: Cell<u64>,
}

impl Shared {
    pub(crate) fn new(config: FxConfig, window: Window, document: Document) -> Self {
        // Math.random is seeded by the browser; 53 bits is all it carries.
        let seed = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
        Self {
            config,
            window,
            document,
            state: Cell::new(Lifecycle::Idle),
            active: Cell::new(false),
            profile: Cell::new(DeviceProfile::default()),
            running: Cell::new(EffectSet::empty()),
            registry: RefCell::new(Registry::new()),
            decor: RefCell::new(DecorField::new()),
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
            restore: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub(crate) fn profile(&self) -> DeviceProfile {
        self.profile.get()
    }

    pub(crate) fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Runs one wiring step. Failures are logged, never propagated.
    pub(crate) fn attempt(&self, label: &str, result: Result<()>) {
        match result {
            Ok(()) => debug!("{label}: wired"),
            Err(e) if e.is_missing_target() => debug!("{label}: skipped, {e}"),
            Err(e) => warn!("{label}: disabled, {e}"),
        }
    }

    pub(crate) fn add_timer(&self, name: impl Into<String>, handle: Scheduled) {
        self.registry.borrow_mut().insert_timer(name, handle);
    }

    pub(crate) fn add_watcher(&self, name: impl Into<String>, handle: Watcher) {
        self.registry.borrow_mut().insert_observer(name, handle);
    }

    /// Drops a timer from the registry without cancelling it.
    ///
    /// Used by one-shot callbacks to forget their own handle once they fire.
    pub(crate) fn release_timer(&self, name: &str) {
        let handle = self.registry.borrow_mut().take_timer(name);
        drop(handle);
    }

    /// Registers a one-shot timeout that removes itself once it fires.
    pub(crate) fn after(self: &Rc<Self>, label: &str, ms: u32, f: impl FnOnce(&Rc<Shared>) + 'static) {
        let key = format!("{label}#{}", self.next_id());
        let fx = Rc::clone(self);
        let own_key = key.clone();
        let timeout = Timeout::new(ms, move || {
            fx.release_timer(&own_key);
            f(&fx);
        });
        self.add_timer(key, Scheduled::Timeout(timeout));
    }

    /// Adds a registered event listener and returns its registry key.
    pub(crate) fn listen(
        self: &Rc<Self>,
        label: &str,
        target: &EventTarget,
        event: impl Into<Cow<'static, str>>,
        callback: impl FnMut(&Event) + 'static,
    ) -> String {
        let key = format!("{label}#{}", self.next_id());
        let listener = EventListener::new(target, event, callback);
        self.add_watcher(key.clone(), Watcher::Listener(listener));
        key
    }

    /// Same as [`listen`](Self::listen), but the callback may call
    /// `prevent_default`.
    pub(crate) fn listen_active(
        self: &Rc<Self>,
        label: &str,
        target: &EventTarget,
        event: impl Into<Cow<'static, str>>,
        callback: impl FnMut(&Event) + 'static,
    ) -> String {
        let key = format!("{label}#{}", self.next_id());
        let listener = EventListener::new_with_options(
            target,
            event,
            EventListenerOptions::enable_prevent_default(),
            callback,
        );
        self.add_watcher(key.clone(), Watcher::Listener(listener));
        key
    }

    pub(crate) fn on_teardown(&self, undo: impl FnOnce() + 'static) {
        self.restore.borrow_mut().push(Box::new(undo));
    }

    pub(crate) fn take_restore(&self) -> Vec<Box<dyn FnOnce()>> {
        std::mem::take(&mut *self.restore.borrow_mut())
    }
}
