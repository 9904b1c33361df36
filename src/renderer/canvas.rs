//! HTML canvas 2D renderer (web only)

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Renderer, START_PROMPT, score_line};
use crate::consts::{COURT_HEIGHT, COURT_WIDTH};
use crate::sim::{GamePhase, Snapshot};

const BACKGROUND: &str = "#000";
const FOREGROUND: &str = "#fff";

/// Paints frames onto a `<canvas>` sized to the court
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    show_center_line: bool,
}

impl CanvasRenderer {
    /// Grab the 2D context of `canvas`. `None` if the browser won't give one.
    pub fn new(canvas: &HtmlCanvasElement, show_center_line: bool) -> Option<Self> {
        canvas.set_width(COURT_WIDTH as u32);
        canvas.set_height(COURT_HEIGHT as u32);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            show_center_line,
        })
    }

    fn center_line(&self) -> Result<(), JsValue> {
        let dash = js_sys::Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(15.0));
        self.ctx.set_line_dash(&dash)?;
        self.ctx.begin_path();
        self.ctx.move_to(COURT_WIDTH as f64 / 2.0, 0.0);
        self.ctx.line_to(COURT_WIDTH as f64 / 2.0, COURT_HEIGHT as f64);
        self.ctx.set_stroke_style_str(FOREGROUND);
        self.ctx.stroke();
        self.ctx.set_line_dash(&js_sys::Array::new())?;
        Ok(())
    }

    fn paint(&self, frame: &Snapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (COURT_WIDTH as f64, COURT_HEIGHT as f64);

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        if self.show_center_line {
            self.center_line()?;
        }

        ctx.set_fill_style_str(FOREGROUND);
        ctx.begin_path();
        ctx.arc(
            frame.ball.x as f64,
            frame.ball.y as f64,
            frame.ball.radius as f64,
            0.0,
            TAU,
        )?;
        ctx.fill();
        ctx.close_path();

        for paddle in [frame.player, frame.ai] {
            ctx.fill_rect(
                paddle.x as f64,
                paddle.y as f64,
                paddle.width as f64,
                paddle.height as f64,
            );
        }

        ctx.set_font("24px monospace");
        ctx.set_text_align("center");
        ctx.fill_text(&score_line(frame), w / 2.0, 30.0)?;

        if frame.phase == GamePhase::NotStarted {
            ctx.set_font("20px monospace");
            ctx.fill_text(START_PROMPT, w / 2.0, h * 0.75)?;
        }
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &Snapshot) {
        if let Err(e) = self.paint(frame) {
            log::warn!("Canvas draw failed: {:?}", e);
        }
    }
}
