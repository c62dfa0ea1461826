#![cfg(target_arch = "wasm32")]

use portfolio_fx::EffectManager;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r##"
<nav class="navbar"><div class="navbar-nav"><a class="nav-link" href="#home">Home</a><a class="nav-link" href="#about">About</a></div></nav>
<main id="main-content">
  <section id="home"><h1 class="typing-animation">Engineer</h1></section>
  <section id="about"><div class="professional-card">card</div></section>
  <section id="skills"><span class="tech-badge">Rust</span></section>
  <section id="experience"></section>
  <div class="terminal-window"><div class="terminal-body">$ cargo run</div></div>
</main>
"##;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount() -> Document {
    let doc = document();
    doc.body().unwrap().set_inner_html(FIXTURE);
    doc
}

fn managed_left(doc: &Document) -> u32 {
    doc.query_selector_all("[data-fx-managed]").unwrap().length()
}

#[wasm_bindgen_test]
fn initialize_twice_wires_once() {
    mount();
    let fx = EffectManager::new(None).unwrap();
    fx.initialize();
    assert!(fx.is_active());
    let handles = fx.handle_count();
    assert!(handles > 0);

    fx.initialize();
    assert_eq!(fx.handle_count(), handles);
    fx.teardown();
}

#[wasm_bindgen_test]
fn teardown_leaves_nothing_behind() {
    let doc = mount();
    let fx = EffectManager::new(None).unwrap();
    fx.initialize();
    assert!(managed_left(&doc) > 0);

    fx.teardown();
    assert!(!fx.is_active());
    assert_eq!(fx.handle_count(), 0);
    assert_eq!(fx.decor_count(), 0);
    assert_eq!(managed_left(&doc), 0);
    assert_eq!(
        doc.query_selector(".typing-animation").unwrap().unwrap().text_content().as_deref(),
        Some("Engineer")
    );

    // Second teardown is a no-op.
    fx.teardown();
    assert_eq!(fx.handle_count(), 0);
}

#[wasm_bindgen_test]
fn missing_targets_are_skipped() {
    let doc = document();
    doc.body().unwrap().set_inner_html("");
    let fx = EffectManager::new(None).unwrap();
    fx.initialize();
    assert!(fx.is_active());
    assert!(!fx.scroll_to_section("nowhere"));
    fx.teardown();
    assert_eq!(managed_left(&doc), 0);
}

#[wasm_bindgen_test]
fn malformed_stats_change_nothing() {
    mount();
    let fx = EffectManager::new(None).unwrap();
    fx.initialize();
    assert_eq!(fx.update_stats(JsValue::from_str("not an array")), 0);
    fx.teardown();
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(EffectManager::new(Some("{ not json".into())).is_err());
}

#[wasm_bindgen_test]
fn rearm_needs_a_known_observer() {
    let doc = mount();
    let fx = EffectManager::new(None).unwrap();
    fx.initialize();
    let badge = doc.query_selector(".tech-badge").unwrap().unwrap();

    assert!(fx.rearm("reveal", &badge));
    assert!(!fx.rearm("nowhere", &badge));

    fx.teardown();
    assert!(!fx.rearm("reveal", &badge));
}

#[wasm_bindgen_test]
fn valid_stats_rewrite_the_bars() {
    let doc = mount();
    let fx = EffectManager::new(None).unwrap();
    fx.initialize();
    let stats = js_sys::JSON::parse(
        r#"[{"label": "Rust", "percentage": 97}, {"label": "Go", "percentage": 140}]"#,
    )
    .unwrap();

    assert_eq!(fx.update_stats(stats), 2);

    let values = doc.query_selector_all(".coding-stats .stat-value").unwrap();
    let text = |i| values.get(i).and_then(|n| n.text_content());
    assert_eq!(text(0).as_deref(), Some("97%"));
    assert_eq!(text(1).as_deref(), Some("100%"));
    let label = doc.query_selector(".coding-stats .stat-label").unwrap().unwrap();
    assert_eq!(label.text_content().as_deref(), Some("Rust"));
    fx.teardown();
}

#[wasm_bindgen_test]
fn scrolls_to_existing_sections_only() {
    mount();
    let fx = EffectManager::new(None).unwrap();
    fx.initialize();
    assert!(fx.scroll_to_section("about"));
    assert!(!fx.scroll_to_section("contact"));
    fx.teardown();
}

#[wasm_bindgen_test]
fn code_animation_restarts_from_none() {
    let doc = mount();
    let fx = EffectManager::new(None).unwrap();
    fx.initialize();
    let card: HtmlElement = doc
        .query_selector(".professional-card")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    let before = fx.handle_count();

    fx.trigger_code_animation(Some(card.clone()));

    assert_eq!(card.style().get_property_value("animation-name").unwrap(), "none");
    assert_eq!(fx.handle_count(), before + 1);
    fx.trigger_code_animation(None);
    fx.teardown();
}
