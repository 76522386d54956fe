//! Browser collaborators: canvas 2D drawing, DOM score text, `setInterval`

use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::{Renderer, ScoreBoard, Surface, TimerId, Timers};
use crate::sim::Color;

/// Draws filled circles on a `<canvas>` with the 2D context
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// `None` if the canvas has no 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }
}

impl Renderer for CanvasRenderer {
    fn surface(&self) -> Surface {
        Surface::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let surface = self.surface();
        self.ctx
            .clear_rect(0.0, 0.0, surface.width as f64, surface.height as f64);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.set_fill_style_str(color.as_css());
        self.ctx.fill();
    }
}

/// Writes the score into a DOM element
pub struct DomScoreBoard {
    element: Option<Element>,
}

impl DomScoreBoard {
    /// Look up the element by id; updates are dropped if it is missing
    pub fn new(element_id: &str) -> Self {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id));
        if element.is_none() {
            log::warn!("No #{} element; score will not be shown", element_id);
        }
        Self { element }
    }
}

impl ScoreBoard for DomScoreBoard {
    fn show(&mut self, text: &str) {
        if let Some(el) = &self.element {
            el.set_text_content(Some(text));
        }
    }
}

struct BrowserInterval {
    handle: i32,
    // Kept alive until the interval is cleared
    _closure: Closure<dyn FnMut()>,
}

/// `setInterval` wrapper that reports firings through a dispatch callback
pub struct BrowserTimers {
    dispatch: Rc<dyn Fn(TimerId)>,
    next_id: u32,
    intervals: HashMap<TimerId, BrowserInterval>,
}

impl BrowserTimers {
    pub fn new(dispatch: Rc<dyn Fn(TimerId)>) -> Self {
        Self {
            dispatch,
            next_id: 0,
            intervals: HashMap::new(),
        }
    }
}

impl Timers for BrowserTimers {
    fn set_interval(&mut self, interval_ms: u32) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let dispatch = self.dispatch.clone();
        let closure = Closure::<dyn FnMut()>::new(move || dispatch(id));

        let handle = web_sys::window().and_then(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                interval_ms.min(i32::MAX as u32) as i32,
            )
            .ok()
        });

        match handle {
            Some(handle) => {
                self.intervals.insert(
                    id,
                    BrowserInterval {
                        handle,
                        _closure: closure,
                    },
                );
            }
            None => log::error!("setInterval failed; enemies will not spawn"),
        }
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        if let Some(interval) = self.intervals.remove(&id) {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(interval.handle);
            }
        }
    }
}
