//! Bookkeeping of live timers and observers.
//!
//! Every handle an effect creates lands here before the effect returns, so a
//! single [`EffectRegistry::cancel_all`] is enough to stop the whole page.

use std::collections::BTreeMap;

/// A handle that can be stopped for good.
pub trait Cancel {
    fn cancel(self);
}

#[derive(Debug)]
pub struct EffectRegistry<T: Cancel, O: Cancel> {
    timers: BTreeMap<String, T>,
    observers: BTreeMap<String, O>,
}

impl<T: Cancel, O: Cancel> Default for EffectRegistry<T, O> {
    fn default() -> Self {
        Self {
            timers: BTreeMap::new(),
            observers: BTreeMap::new(),
        }
    }
}

impl<T: Cancel, O: Cancel> EffectRegistry<T, O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a timer under `name`, cancelling whatever was there before.
    ///
    /// Debounced and self-rescheduling effects rely on this: registering the
    /// next tick under the same name replaces the previous one.
    pub fn insert_timer(&mut self, name: impl Into<String>, handle: T) {
        if let Some(prev) = self.timers.insert(name.into(), handle) {
            prev.cancel();
        }
    }

    /// Stores an observer under `name`, disconnecting any previous one.
    pub fn insert_observer(&mut self, name: impl Into<String>, handle: O) {
        if let Some(prev) = self.observers.insert(name.into(), handle) {
            prev.cancel();
        }
    }

    /// Takes a timer out without cancelling it.
    pub fn take_timer(&mut self, name: &str) -> Option<T> {
        self.timers.remove(name)
    }

    pub fn cancel_timer(&mut self, name: &str) -> bool {
        match self.timers.remove(name) {
            Some(h) => {
                h.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_observer(&mut self, name: &str) -> bool {
        match self.observers.remove(name) {
            Some(h) => {
                h.cancel();
                true
            }
            None => false,
        }
    }

    pub fn observer(&self, name: &str) -> Option<&O> {
        self.observers.get(name)
    }

    pub fn has_timer(&self, name: &str) -> bool {
        self.timers.contains_key(name)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty() && self.observers.is_empty()
    }

    /// Moves every handle out, leaving the registry empty.
    ///
    /// The caller cancels them after releasing any borrow on the registry.
    pub fn drain(&mut self) -> (Vec<T>, Vec<O>) {
        let timers = std::mem::take(&mut self.timers).into_values().collect();
        let observers = std::mem::take(&mut self.observers).into_values().collect();
        (timers, observers)
    }

    /// Cancels and forgets everything. Returns how many handles were stopped.
    pub fn cancel_all(&mut self) -> usize {
        let (timers, observers) = self.drain();
        let n = timers.len() + observers.len();
        timers.into_iter().for_each(Cancel::cancel);
        observers.into_iter().for_each(Cancel::cancel);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Probe(Rc<Cell<u32>>);

    impl Cancel for Probe {
        fn cancel(self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn replacing_a_timer_cancels_the_old_one() {
        let hits = Rc::new(Cell::new(0));
        let mut reg: EffectRegistry<Probe, Probe> = EffectRegistry::new();
        reg.insert_timer("resize.debounce", Probe(hits.clone()));
        reg.insert_timer("resize.debounce", Probe(hits.clone()));
        assert_eq!(hits.get(), 1);
        assert_eq!(reg.timer_count(), 1);
    }

    #[test]
    fn cancelling_an_observer_leaves_timers_alone() {
        let hits = Rc::new(Cell::new(0));
        let mut reg: EffectRegistry<Probe, Probe> = EffectRegistry::new();
        reg.insert_observer("lifecycle.domReady", Probe(hits.clone()));
        reg.insert_timer("typing", Probe(hits.clone()));
        assert!(reg.cancel_observer("lifecycle.domReady"));
        assert!(!reg.cancel_observer("lifecycle.domReady"));
        assert_eq!(hits.get(), 1);
        assert_eq!(reg.observer_count(), 0);
        assert!(reg.has_timer("typing"));
    }

    #[test]
    fn take_does_not_cancel() {
        let hits = Rc::new(Cell::new(0));
        let mut reg: EffectRegistry<Probe, Probe> = EffectRegistry::new();
        reg.insert_timer("typing", Probe(hits.clone()));
        assert!(reg.take_timer("typing").is_some());
        assert_eq!(hits.get(), 0);
        assert!(reg.is_empty());
    }
}
