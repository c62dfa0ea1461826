//! Decorative background layers and their recurring spawners.

use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use web_sys::{Element, HtmlElement};

use super::dom;
use super::handles::Scheduled;
use super::shared::Shared;
use crate::content;
use crate::decor::{expiry_key, SpawnSpec};
use crate::effects::Effect;
use crate::error::Result;
use crate::profile::DeviceProfile;

pub(crate) const MATRIX_ID: &str = "matrixRain";
pub(crate) const BINARY_ID: &str = "binaryBackground";
pub(crate) const PARTICLES_ID: &str = "magicParticles";

const PARTICLE_LAYER_CSS: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
     pointer-events: none; z-index: -1; overflow: hidden;";

fn layer(fx: &Shared, class: &str, id: &str) -> Result<HtmlElement> {
    let el = dom::create(&fx.document, "div", class)?;
    if !id.is_empty() {
        el.set_id(id);
    }
    dom::body(&fx.document)?.append_child(&el)?;
    Ok(el)
}

/// Circuit board backdrop shown behind the full set.
pub(crate) fn circuit_background(fx: &Shared) -> Result<()> {
    layer(fx, "circuit-background", "")?;
    Ok(())
}

/// Reuses the page's particle layer or adds a managed one.
fn particle_layer(fx: &Shared) -> Result<HtmlElement> {
    if let Ok(existing) = dom::by_id(&fx.document, PARTICLES_ID) {
        return Ok(existing);
    }
    let el = layer(fx, "magic-particles", PARTICLES_ID)?;
    el.style().set_css_text(PARTICLE_LAYER_CSS);
    Ok(el)
}

/// Starts a fixed-period spawner for `effect`.
///
/// Each tick creates one node, mounts it in `container`, records it in the
/// decor field and registers its expiry timer under `"{effect}#{seq}"`. The
/// interval itself is registered under the effect name.
pub(crate) fn register_recurring_effect<F>(
    fx: &Rc<Shared>,
    effect: Effect,
    spec: SpawnSpec,
    container: HtmlElement,
    spawn: F,
) where
    F: Fn(&Shared) -> Result<HtmlElement> + 'static,
{
    let spawn_one = {
        let fx = Rc::clone(fx);
        move || {
            if !fx.active.get() {
                return;
            }
            if let Err(e) = spawn_node(&fx, effect, spec, &container, &spawn) {
                debug!("{effect}: spawn failed, {e}");
            }
        }
    };
    let interval = Interval::new(spec.interval_ms, spawn_one);
    fx.add_timer(effect.name(), Scheduled::Interval(interval));
    fx.running.set(fx.running.get().with(effect));
}

fn spawn_node<F>(
    fx: &Rc<Shared>,
    effect: Effect,
    spec: SpawnSpec,
    container: &HtmlElement,
    spawn: &F,
) -> Result<()>
where
    F: Fn(&Shared) -> Result<HtmlElement>,
{
    let node = spawn(fx.as_ref())?;
    let (delay, duration) = {
        let mut rng = fx.rng.borrow_mut();
        let (d, u) = (rng.gen::<f64>(), rng.gen::<f64>());
        spec.sample_timing(d, u)
    };
    dom::set_style(&node, "animation-delay", &format!("{delay:.2}s"));
    dom::set_style(&node, "animation-duration", &format!("{duration:.2}s"));
    container.append_child(&node)?;

    let seq = fx.decor.borrow_mut().push(effect, node);
    let key = expiry_key(effect, seq);
    let expire = {
        let fx = Rc::clone(fx);
        let key = key.clone();
        move || {
            fx.release_timer(&key);
            if let Some(record) = fx.decor.borrow_mut().remove(seq) {
                record.node.remove();
            }
        }
    };
    fx.add_timer(key, Scheduled::Timeout(Timeout::new(spec.lifetime_ms(), expire)));
    Ok(())
}

fn random_percent(fx: &Shared) -> String {
    format!("{:.2}%", fx.rng.borrow_mut().gen::<f64>() * 100.0)
}

pub(crate) fn matrix_rain(fx: &Rc<Shared>) -> Result<()> {
    let container = layer(fx, "matrix-rain", MATRIX_ID)?;
    register_recurring_effect(fx, Effect::MatrixRain, fx.config.spawn.matrix_rain, container, |fx| {
        let column = dom::create(&fx.document, "div", "matrix-column")?;
        column.set_text_content(Some(&content::matrix_column_text(&mut *fx.rng.borrow_mut())));
        dom::set_style(&column, "left", &random_percent(fx));
        Ok(column)
    });
    Ok(())
}

pub(crate) fn binary_rain(fx: &Rc<Shared>) -> Result<()> {
    let container = layer(fx, "binary-background", BINARY_ID)?;
    register_recurring_effect(fx, Effect::BinaryRain, fx.config.spawn.binary_rain, container, |fx| {
        let line = dom::create(&fx.document, "div", "binary-string")?;
        line.set_text_content(Some(&content::binary_string(&mut *fx.rng.borrow_mut())));
        dom::set_style(&line, "top", &random_percent(fx));
        Ok(line)
    });
    Ok(())
}

const TECH_BURST: u32 = 8;
const TECH_BURST_STEP_MS: u32 = 150;

pub(crate) fn tech_particles(fx: &Rc<Shared>) -> Result<()> {
    let container = particle_layer(fx)?;
    let spec = fx.config.spawn.tech_particles;
    let spawn = |fx: &Shared| -> Result<HtmlElement> {
        let (text, category) = *content::TECH_TAGS
            .choose(&mut *fx.rng.borrow_mut())
            .unwrap_or(&("Rust", "java"));
        let particle = dom::create(&fx.document, "div", &format!("tech-particle {category}"))?;
        particle.set_text_content(Some(text));
        dom::set_style(&particle, "left", &random_percent(fx));
        Ok(particle)
    };

    // Opening burst so the layer is not empty for the first interval.
    for i in 0..TECH_BURST {
        let container = container.clone();
        fx.after("techParticles.burst", i * TECH_BURST_STEP_MS, move |fx| {
            if !fx.active.get() {
                return;
            }
            if let Err(e) = spawn_node(fx, Effect::TechParticles, spec, &container, &spawn) {
                debug!("{}: burst spawn failed, {e}", Effect::TechParticles);
            }
        });
    }
    register_recurring_effect(fx, Effect::TechParticles, spec, container, spawn);
    Ok(())
}

/// The single lightweight spawner used on mobile.
pub(crate) fn light_particles(fx: &Rc<Shared>) -> Result<()> {
    let container = particle_layer(fx)?;
    register_recurring_effect(fx, Effect::LightParticles, fx.config.spawn.light_particles, container, |fx| {
        let kind = content::PARTICLE_KINDS
            .choose(&mut *fx.rng.borrow_mut())
            .copied()
            .unwrap_or_default();
        let class = if kind.is_empty() {
            "particle".to_owned()
        } else {
            format!("particle {kind}")
        };
        let particle = dom::create(&fx.document, "div", &class)?;
        dom::set_style(&particle, "left", &random_percent(fx));
        Ok(particle)
    });
    Ok(())
}

const CODE_ELEMENTS_PER_PATTERN: usize = 20;

/// Scatters floating code snippets inside every `.code-pattern`.
pub(crate) fn code_pattern(fx: &Rc<Shared>) -> Result<()> {
    let patterns = dom::require_all(&fx.document, ".code-pattern")?;
    for pattern in &patterns {
        for _ in 0..CODE_ELEMENTS_PER_PATTERN {
            let el = dom::create(&fx.document, "div", "code-element")?;
            let (snippet, left, top, delay) = {
                let mut rng = fx.rng.borrow_mut();
                (
                    content::CODE_SNIPPETS.choose(&mut *rng).copied().unwrap_or("{}"),
                    rng.gen::<f64>() * 100.0,
                    rng.gen::<f64>() * 100.0,
                    rng.gen::<f64>() * 10.0,
                )
            };
            el.set_text_content(Some(snippet));
            dom::set_style(&el, "left", &format!("{left:.2}%"));
            dom::set_style(&el, "top", &format!("{top:.2}%"));
            dom::set_style(&el, "animation-delay", &format!("{delay:.2}s"));
            pattern.append_child(&el)?;
        }
    }
    fx.running.set(fx.running.get().with(Effect::CodePattern));
    Ok(())
}

fn network_overlay(fx: &Shared) -> Result<HtmlElement> {
    let overlay = dom::create(&fx.document, "div", "network-visualization")?;
    for &(top, left) in content::NETWORK_NODES {
        let node = dom::create(&fx.document, "div", "network-node")?;
        node.style().set_css_text(&format!("top: {top}%; left: {left}%;"));
        overlay.append_child(&node)?;
    }
    for &(top, left, width, deg) in content::NETWORK_LINKS {
        let link = dom::create(&fx.document, "div", "network-connection")?;
        link.style().set_css_text(&format!(
            "top: {top}%; left: {left}%; width: {width}%; \
             transform-origin: left center; transform: rotate({deg}deg);"
        ));
        overlay.append_child(&link)?;
    }
    Ok(overlay)
}

/// Overlays a small network diagram on every `.architecture-diagram`.
pub(crate) fn network_diagram(fx: &Rc<Shared>) -> Result<()> {
    let sections: Vec<Element> = dom::require_all(&fx.document, ".architecture-diagram")?;
    for section in &sections {
        section.append_child(&network_overlay(fx)?)?;
    }
    fx.running.set(fx.running.get().with(Effect::NetworkDiagram));
    Ok(())
}

/// Ceiling, matrix shutdown and pacing for a freshly computed profile.
pub(crate) fn adjust_decor(fx: &Shared, profile: DeviceProfile) {
    let matrix_running = fx.running.get().contains(Effect::MatrixRain);
    let plan = fx.decor.borrow_mut().plan_resize(profile, matrix_running);
    {
        let mut registry = fx.registry.borrow_mut();
        for record in &plan.removed {
            registry.cancel_timer(&record.timer_key());
        }
        if plan.stop_matrix {
            registry.cancel_timer(Effect::MatrixRain.name());
        }
    }
    plan.removed.iter().for_each(|r| r.node.remove());

    if plan.stop_matrix {
        if let Ok(layer) = dom::by_id(&fx.document, MATRIX_ID) {
            layer.remove();
        }
        fx.running.set(fx.running.get().without(Effect::MatrixRain));
        info!("matrix rain disabled for mobile viewport");
    }

    let decor = fx.decor.borrow();
    for record in decor.iter() {
        dom::set_style(&record.node, "animation-duration", &plan.duration);
    }
    debug!(
        "resize: tier {:?}, removed {}, {} decor nodes live",
        profile.tier(),
        plan.removed.len(),
        decor.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FxConfig;
    use wasm_bindgen_test::*;

    const LONG_MS: u32 = 60_000;

    fn shared() -> Rc<Shared> {
        let window = dom::window().unwrap();
        let document = dom::document(&window).unwrap();
        Rc::new(Shared::new(FxConfig::default(), window, document))
    }

    /// Mounts `count` nodes for `effect` with live expiry timers.
    fn seed(fx: &Rc<Shared>, effect: Effect, container: &HtmlElement, count: usize) -> Vec<u64> {
        (0..count)
            .map(|_| {
                let node = dom::create(&fx.document, "div", "decor").unwrap();
                container.append_child(&node).unwrap();
                let seq = fx.decor.borrow_mut().push(effect, node);
                fx.add_timer(
                    expiry_key(effect, seq),
                    Scheduled::Timeout(Timeout::new(LONG_MS, || {})),
                );
                seq
            })
            .collect()
    }

    fn start_matrix(fx: &Rc<Shared>) -> HtmlElement {
        let container = layer(fx, "matrix-rain", MATRIX_ID).unwrap();
        fx.add_timer(
            Effect::MatrixRain.name(),
            Scheduled::Interval(Interval::new(LONG_MS, || {})),
        );
        fx.running.set(fx.running.get().with(Effect::MatrixRain));
        container
    }

    fn duration_of(el: &HtmlElement) -> String {
        el.style().get_property_value("animation-duration").unwrap()
    }

    fn clean_up(fx: &Shared) {
        fx.registry.borrow_mut().cancel_all();
        fx.decor.borrow_mut().drain_all();
        dom::remove_managed(&fx.document);
    }

    #[wasm_bindgen_test]
    fn mobile_resize_stops_matrix_and_trims() {
        let fx = shared();
        let matrix = start_matrix(&fx);
        let columns = seed(&fx, Effect::MatrixRain, &matrix, 20);
        let particles = particle_layer(&fx).unwrap();
        let tech = seed(&fx, Effect::TechParticles, &particles, 10);

        let mobile = DeviceProfile {
            is_mobile: true,
            ..DeviceProfile::default()
        };
        adjust_decor(&fx, mobile);

        {
            let registry = fx.registry.borrow();
            assert!(!registry.has_timer(Effect::MatrixRain.name()));
            for &seq in &columns {
                assert!(!registry.has_timer(&expiry_key(Effect::MatrixRain, seq)));
            }
            for &seq in &tech[..5] {
                assert!(!registry.has_timer(&expiry_key(Effect::TechParticles, seq)));
            }
            for &seq in &tech[5..] {
                assert!(registry.has_timer(&expiry_key(Effect::TechParticles, seq)));
            }
        }
        assert!(!fx.running.get().contains(Effect::MatrixRain));
        assert!(dom::by_id(&fx.document, MATRIX_ID).is_err());
        assert_eq!(particles.child_element_count(), 5);

        let decor = fx.decor.borrow();
        assert_eq!(decor.len(), 5);
        assert!(decor.iter().all(|r| duration_of(&r.node) == "8s"));
        drop(decor);
        clean_up(&fx);
    }

    #[wasm_bindgen_test]
    fn desktop_resize_keeps_matrix_and_speeds_up() {
        let fx = shared();
        let matrix = start_matrix(&fx);
        seed(&fx, Effect::MatrixRain, &matrix, 12);

        adjust_decor(&fx, DeviceProfile::default());

        assert!(fx.registry.borrow().has_timer(Effect::MatrixRain.name()));
        assert!(fx.running.get().contains(Effect::MatrixRain));
        let decor = fx.decor.borrow();
        assert_eq!(decor.len(), 12);
        assert!(decor.iter().all(|r| duration_of(&r.node) == "4s"));
        drop(decor);
        clean_up(&fx);
    }
}
