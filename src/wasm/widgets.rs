//! Static page furniture: injected styles, stats, editor mock, diagrams.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::dom;
use super::shared::Shared;
use crate::config::StatEntry;
use crate::content;
use crate::error::{FxError, Result};

pub(crate) fn inject_styles(fx: &Shared) -> Result<()> {
    let style = dom::create(&fx.document, "style", "")?;
    style.set_text_content(Some(content::INJECTED_CSS));
    let head = fx
        .document
        .head()
        .ok_or_else(|| FxError::MissingTarget("head".into()))?;
    head.append_child(&style)?;
    Ok(())
}

fn child(doc: &Document, parent: &HtmlElement, tag: &str, class: &str, text: &str) -> Result<HtmlElement> {
    let el = dom::create(doc, tag, class)?;
    if !text.is_empty() {
        el.set_text_content(Some(text));
    }
    parent.append_child(&el)?;
    Ok(el)
}

fn format_percent(value: f64) -> String {
    format!("{}%", value.round())
}

fn stats_block(doc: &Document, stats: &[StatEntry]) -> Result<HtmlElement> {
    let block = dom::create(doc, "div", "coding-stats")?;
    for stat in stats {
        let row = child(doc, &block, "div", "stat-row", "")?;
        child(doc, &row, "span", "stat-label", &stat.label)?;
        let bar = child(doc, &row, "div", "stat-bar", "")?;
        let progress = child(doc, &bar, "div", "stat-progress", "")?;
        dom::set_style(&progress, "--progress", &format_percent(stat.clamped()));
        child(doc, &row, "span", "stat-value", &format_percent(stat.clamped()))?;
    }
    Ok(block)
}

pub(crate) fn coding_stats(fx: &Shared) -> Result<()> {
    let skills = dom::by_id(&fx.document, "skills")?;
    skills.append_child(&stats_block(&fx.document, &fx.config.stats)?)?;
    Ok(())
}

/// Rewrites the displayed bars in order. Extra entries are ignored.
pub(crate) fn update_stats(doc: &Document, stats: &[StatEntry]) -> usize {
    let rows = dom::query_all(doc, ".coding-stats .stat-row");
    let mut updated = 0;
    for (row, stat) in rows.iter().zip(stats) {
        let percent = format_percent(stat.clamped());
        if let Some(bar) = row
            .query_selector(".stat-progress")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            dom::set_style(&bar, "--progress", &percent);
        }
        if let Ok(Some(value)) = row.query_selector(".stat-value") {
            value.set_text_content(Some(&percent));
        }
        if let Ok(Some(label)) = row.query_selector(".stat-label") {
            label.set_text_content(Some(&stat.label));
        }
        updated += 1;
    }
    updated
}

pub(crate) fn code_editor(fx: &Shared) -> Result<()> {
    let about = dom::by_id(&fx.document, "about")?;
    let doc = &fx.document;
    let editor = dom::create(doc, "div", "code-editor")?;

    let header = child(doc, &editor, "div", "editor-header", "")?;
    let tabs = child(doc, &header, "div", "editor-tabs", "")?;
    for (i, tab) in content::EDITOR_TABS.iter().enumerate() {
        let class = if i == 0 { "editor-tab active" } else { "editor-tab" };
        child(doc, &tabs, "div", class, tab)?;
    }
    let actions = child(doc, &header, "div", "editor-actions", "")?;
    for action in ["close", "minimize", "maximize"] {
        child(doc, &actions, "div", &format!("editor-action {action}"), "")?;
    }

    let body = child(doc, &editor, "div", "editor-body", "")?;
    for (n, line) in content::EDITOR_LINES.iter().enumerate() {
        let row = child(doc, &body, "div", "code-line", "")?;
        child(doc, &row, "span", "line-number", &(n + 1).to_string())?;
        let code = child(doc, &row, "span", "code-text", "")?;
        code.set_inner_html(line);
    }

    about.append_child(&editor)?;
    Ok(())
}

pub(crate) fn architecture_diagram(fx: &Shared) -> Result<()> {
    let experience = dom::by_id(&fx.document, "experience")?;
    let doc = &fx.document;
    let diagram = dom::create(doc, "div", "architecture-diagram")?;
    for (title, badges) in content::ARCHITECTURE {
        let layer = child(doc, &diagram, "div", "architecture-layer", "")?;
        child(doc, &layer, "div", "layer-title", title)?;
        let tech = child(doc, &layer, "div", "layer-tech", "")?;
        for badge in badges.iter() {
            child(doc, &tech, "span", "tech-badge-glow", badge)?;
        }
    }
    experience.append_child(&diagram)?;
    Ok(())
}

const TERMINAL_STAGGER_MS: u32 = 200;

pub(crate) fn terminal_windows(fx: &Rc<Shared>) -> Result<()> {
    let windows = dom::require_all(&fx.document, ".terminal-window")?;
    for (i, terminal) in windows.into_iter().enumerate() {
        {
            let terminal = terminal.clone();
            fx.on_teardown(move || {
                let _ = terminal.class_list().remove_1("animate-in");
            });
        }
        fx.after("terminalWindows", i as u32 * TERMINAL_STAGGER_MS, move |_| {
            let _ = terminal.class_list().add_1("animate-in");
        });
    }
    Ok(())
}

const CODE_ANIMATION: &str = "typewriter 2s steps(40, end), blinkCursor 0.75s step-end infinite";
const RESTART_DELAY_MS: u32 = 10;

/// Restarts the typewriter animation on `el`.
pub(crate) fn trigger_code_animation(fx: &Rc<Shared>, el: HtmlElement) {
    dom::set_style(&el, "animation", "none");
    fx.after("codeAnimation", RESTART_DELAY_MS, move |_| {
        dom::set_style(&el, "animation", CODE_ANIMATION);
    });
}
