//! Canvas2D render sink
//!
//! Draws the ground, the player sprite, the obstacle video frame for every
//! obstacle and the HUD text. Falls back to flat rectangles when an asset
//! element is missing.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, HtmlVideoElement};

use super::{FrameView, RenderSink, game_over_text, high_score_text, score_text};

const GROUND_COLOR: &str = "#888";
const PLAYER_COLOR: &str = "#0a0";
const OBSTACLE_COLOR: &str = "#a00";
const TEXT_COLOR: &str = "#000";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    player_image: Option<HtmlImageElement>,
    obstacle_video: Option<HtmlVideoElement>,
}

impl CanvasRenderer {
    pub fn new(
        canvas: &HtmlCanvasElement,
        player_image: Option<HtmlImageElement>,
        obstacle_video: Option<HtmlVideoElement>,
    ) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            player_image,
            obstacle_video,
        })
    }

    fn draw_player(&self, view: &FrameView<'_>) {
        let p = &view.state.player;
        let (x, y, w, h) = (p.pos.x as f64, p.pos.y as f64, p.size.x as f64, p.size.y as f64);
        let drawn = self
            .player_image
            .as_ref()
            .map(|img| {
                self.ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                    .is_ok()
            })
            .unwrap_or(false);
        if !drawn {
            self.ctx.set_fill_style_str(PLAYER_COLOR);
            self.ctx.fill_rect(x, y, w, h);
        }
    }

    fn draw_obstacles(&self, view: &FrameView<'_>) {
        for o in &view.state.obstacles {
            let (x, y, w, h) = (o.pos.x as f64, o.pos.y as f64, o.size.x as f64, o.size.y as f64);
            let drawn = self
                .obstacle_video
                .as_ref()
                .map(|video| {
                    self.ctx
                        .draw_image_with_html_video_element_and_dw_and_dh(video, x, y, w, h)
                        .is_ok()
                })
                .unwrap_or(false);
            if !drawn {
                self.ctx.set_fill_style_str(OBSTACLE_COLOR);
                self.ctx.fill_rect(x, y, w, h);
            }
        }
    }

    fn draw_hud(&self, view: &FrameView<'_>) {
        let state = view.state;
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font("16px sans-serif");
        self.ctx.set_text_align("left");
        let _ = self.ctx.fill_text(&score_text(state.score), 10.0, 24.0);
        let _ = self.ctx.fill_text(&high_score_text(view.high_score), 10.0, 44.0);
        if view.autopilot {
            let _ = self.ctx.fill_text("AUTO", self.width - 60.0, 24.0);
        }

        if !state.is_running() {
            self.ctx.set_font("24px sans-serif");
            self.ctx.set_text_align("center");
            let _ = self.ctx.fill_text(
                &game_over_text(state.score, view.new_record),
                self.width / 2.0,
                self.height / 2.0,
            );
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn render(&mut self, view: &FrameView<'_>) {
        let tuning = &view.state.tuning;
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);

        self.ctx.set_fill_style_str(GROUND_COLOR);
        self.ctx.fill_rect(
            0.0,
            (tuning.canvas_height - tuning.ground_height) as f64,
            self.width,
            tuning.ground_height as f64,
        );

        self.draw_player(view);
        self.draw_obstacles(view);
        self.draw_hud(view);
    }
}
