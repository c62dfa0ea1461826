
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::render::request_animation_frame;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::dom;
use super::handles::Scheduled;
use super::shared::Shared;
use crate::effects::Effect;
use crate::error::{FxError, Result};
use crate::gravity::GravityField;

pub(crate) const CANVAS_ID: &str = "particleCanvas";
const FRAME_KEY: &str = "gravityCanvas.frame";

const CANVAS_CSS: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
     pointer-events: none; z-index: -1;";

struct Scene {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: RefCell<GravityField>,
}

impl Scene {
    fn draw(&self, fx: &Shared) {
        let (w, h) = (f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        let mut field = self.field.borrow_mut();
        field.step(&mut *fx.rng.borrow_mut(), w, h);

        self.ctx.clear_rect(0.0, 0.0, w, h);
        for spark in field.sparks() {
            self.ctx.save();
            self.ctx.set_global_alpha(spark.life.max(0.0));
            self.ctx.set_fill_style_str(&spark.fill_style());
            self.ctx.begin_path();
            let _ = self.ctx.arc(spark.x, spark.y, spark.size, 0.0, TAU);
            self.ctx.fill();
            self.ctx.restore();
        }
    }
}

/// Fits the canvas backing store to the viewport.
pub(crate) fn fit_canvas(fx: &Shared) {
    if let Some(canvas) = fx
        .document
        .get_element_by_id(CANVAS_ID)
        .and_then(|el| dom::cast::<HtmlCanvasElement>(el, "canvas").ok())
    {
        let (w, h) = dom::viewport(&fx.window);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }
}

/// Start the spark loop on a managed full-viewport canvas.
pub(crate) fn start(fx: &Rc<Shared>) -> Result<()> {
    let canvas: HtmlCanvasElement = dom::cast(
        dom::create(&fx.document, "canvas", "")?,
        "canvas",
    )?;
    canvas.set_id(CANVAS_ID);
    canvas.style().set_css_text(CANVAS_CSS);

    let ctx: CanvasRenderingContext2d = match canvas.get_context("2d")? {
        Some(ctx) => dom::cast(ctx, "2d context")?,
        None => return Err(FxError::Unsupported("2d canvas")),
    };
    dom::body(&fx.document)?.append_child(&canvas)?;
    fit_canvas(fx);

    let scene = Rc::new(Scene {
        canvas,
        ctx,
        field: RefCell::new(GravityField::new()),
    });
    schedule(fx, scene);
    fx.running.set(fx.running.get().with(Effect::GravityCanvas));
    Ok(())
}

// Each frame registers the next one under the same key, so teardown only
// ever has a single pending frame to cancel.
fn schedule(fx: &Rc<Shared>, scene: Rc<Scene>) {
    let next = {
        let fx = Rc::clone(fx);
        move |_timestamp: f64| {
            if !fx.active.get() {
                return;
            }
            scene.draw(&fx);
            schedule(&fx, scene);
        }
    };
    fx.add_timer(FRAME_KEY, Scheduled::Frame(request_animation_frame(next)));
}
