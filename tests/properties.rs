#![cfg(not(target_arch = "wasm32"))]

use std::cell::Cell;
use std::rc::Rc;

use portfolio_fx::decor::{tier_ceiling, DecorField};
use portfolio_fx::profile::HostSignals;
use portfolio_fx::registry::{Cancel, EffectRegistry};
use portfolio_fx::scroll::{NavbarConfig, NavbarTracker};
use portfolio_fx::typing::{TypingMachine, TypingTimings};
use portfolio_fx::{select_effect_set, DeviceProfile, Effect, Tier};

const PHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64)";

fn profile(width: f64, ua: &str, reduced_motion: bool) -> DeviceProfile {
    DeviceProfile::from_signals(&HostSignals {
        viewport_width: width,
        user_agent: ua.into(),
        touch_supported: false,
        reduced_motion,
    })
}

#[test]
fn selection_follows_the_tier() {
    let desktop = select_effect_set(&profile(1440.0, DESKTOP_UA, false));
    let tablet = select_effect_set(&profile(900.0, DESKTOP_UA, false));
    let mobile = select_effect_set(&profile(390.0, PHONE_UA, false));

    assert_eq!(desktop.len(), 5);
    assert!(desktop.contains(Effect::MatrixRain));
    assert!(!desktop.contains(Effect::LightParticles));
    assert_eq!(tablet, desktop);
    assert_eq!(mobile.iter().collect::<Vec<_>>(), vec![Effect::LightParticles]);
}

#[test]
fn reduced_motion_disables_everything_on_every_tier() {
    for (width, ua) in [(1440.0, DESKTOP_UA), (900.0, DESKTOP_UA), (390.0, PHONE_UA)] {
        assert!(select_effect_set(&profile(width, ua, true)).is_empty());
    }
}

/// Drives the machine on a virtual clock and samples the text at `at_ms`.
fn text_at(machine: &mut TypingMachine, at_ms: u32) -> String {
    let mut now = machine.initial_delay();
    while now <= at_ms {
        now += machine.step();
    }
    machine.text().to_owned()
}

#[test]
fn typing_timeline_for_two_phrases() {
    let timings = TypingTimings {
        type_speed_ms: 100,
        delete_speed_ms: 50,
        pause_ms: 2000,
    };
    let new = || TypingMachine::new(vec!["A".into(), "BB".into()], timings.clone()).unwrap();

    assert_eq!(text_at(&mut new(), 100), "A");
    assert_eq!(text_at(&mut new(), 2100), "A");
    assert_eq!(text_at(&mut new(), 2150), "");
    assert_eq!(text_at(&mut new(), 2250), "B");
    assert_eq!(text_at(&mut new(), 2350), "BB");
    // Pause, two deletions, then back to the first phrase.
    assert_eq!(text_at(&mut new(), 2350 + 2000 + 100), "");
    assert_eq!(text_at(&mut new(), 2350 + 2000 + 100 + 100), "A");
}

#[test]
fn shrinking_to_mobile_keeps_the_newest_nodes() {
    let mut field = DecorField::new();
    let seqs: Vec<u64> = (0..40).map(|i| field.push(Effect::TechParticles, i)).collect();

    let plan = field.plan_resize(profile(390.0, PHONE_UA, false), false);

    assert_eq!(field.len(), tier_ceiling(Tier::Mobile));
    assert_eq!(plan.removed.len(), 35);
    assert!(plan.removed.iter().map(|r| r.seq).eq(seqs[..35].iter().copied()));
    assert!(field.iter().map(|r| r.node).eq(35..40));
    assert_eq!(plan.duration, "8s");
    assert!(!plan.stop_matrix);
}

#[test]
fn shrinking_to_mobile_drops_matrix_rain_entirely() {
    let mut field = DecorField::new();
    for i in 0..40 {
        field.push(Effect::MatrixRain, i);
    }

    let plan = field.plan_resize(profile(390.0, PHONE_UA, false), true);

    assert!(plan.stop_matrix);
    assert!(field.is_empty());
    assert_eq!(plan.removed.len(), 40);
    assert_eq!(plan.removed[39].timer_key(), "matrixRain#39");
}

#[test]
fn navbar_hides_going_down_and_shows_going_up() {
    let mut nav = NavbarTracker::new(NavbarConfig::default());
    let height = 70.0;

    let mut hidden_at = None;
    for offset in (0..=400).step_by(20) {
        nav.update(f64::from(offset), height);
        if nav.state().hidden && hidden_at.is_none() {
            hidden_at = Some(offset);
        }
    }
    let hidden_at = hidden_at.expect("navbar never hid");
    assert!(f64::from(hidden_at) > NavbarConfig::default().hide_threshold);

    // The first upward step reveals it again.
    nav.update(390.0, height);
    assert!(!nav.state().hidden);
    assert!(nav.state().scrolled);
}

struct Probe(Rc<Cell<u32>>);

impl Cancel for Probe {
    fn cancel(self) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn cancel_all_empties_the_registry_once() {
    let cancelled = Rc::new(Cell::new(0));
    let mut registry: EffectRegistry<Probe, Probe> = EffectRegistry::new();
    for name in ["typing", "matrixRain", "resize.debounce"] {
        registry.insert_timer(name, Probe(Rc::clone(&cancelled)));
    }
    registry.insert_observer("reveal", Probe(Rc::clone(&cancelled)));

    assert_eq!(registry.cancel_all(), 4);
    assert_eq!(cancelled.get(), 4);
    assert!(registry.is_empty());
    assert_eq!(registry.cancel_all(), 0);
    assert_eq!(cancelled.get(), 4);
}
