//! Fading trails, glow, and gradient connector lines.
//!
//! Everything here is presentation: it reads simulation state and draws, it
//! never writes back. The trail emulates a low-alpha accumulation surface by
//! keeping a short ring of past frame snapshots and drawing them with alpha
//! falling off with age.

use eframe::egui::{Color32, Painter, Pos2, Stroke};
use std::collections::VecDeque;

/// How many past frames a trail keeps.
pub const TRAIL_FRAMES: usize = 30;

/// Segments per connector line; each is tinted a step further along the
/// blend between the two endpoint colours.
const CONNECTOR_SEGMENTS: usize = 6;

pub struct TrailBuffer {
    frames: VecDeque<Vec<(Pos2, Color32)>>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record this frame's positions and colours, dropping the oldest frame
    /// once full.
    pub fn push_frame(&mut self, points: Vec<(Pos2, Color32)>) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(points);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Draw oldest first so fresh positions paint over stale ones.
    /// `max_alpha` comes from the trail-fade slider; zero hides the trail.
    pub fn draw(
        &self,
        painter: &Painter,
        to_screen: impl Fn(Pos2) -> Pos2,
        radius: f32,
        max_alpha: u8,
    ) {
        if max_alpha == 0 || self.frames.is_empty() {
            return;
        }
        let count = self.frames.len() as f32;
        for (age, frame) in self.frames.iter().enumerate() {
            let fade = (age as f32 + 1.0) / count;
            let alpha = (max_alpha as f32 * fade) as u8;
            for &(pos, color) in frame {
                let bright = brighten(color, 100);
                let faded = Color32::from_rgba_unmultiplied(
                    bright.r(),
                    bright.g(),
                    bright.b(),
                    alpha,
                );
                painter.circle_filled(to_screen(pos), radius, faded);
            }
        }
    }
}

/// Saturating per-channel brighten, as the original trail/glow tinting does.
pub fn brighten(color: Color32, amount: u8) -> Color32 {
    Color32::from_rgb(
        color.r().saturating_add(amount),
        color.g().saturating_add(amount),
        color.b().saturating_add(amount),
    )
}

/// Soft halo: translucent rings just outside the body, alpha falling off
/// with distance.
pub fn draw_glow(painter: &Painter, center: Pos2, radius: f32, color: Color32) {
    let bright = brighten(color, 100);
    for ring in 1..=3u32 {
        let glow_radius = radius + 2.0 * ring as f32;
        let alpha = (150.0 * (1.0 - (glow_radius - radius) / 12.0)).clamp(0.0, 255.0) as u8;
        painter.circle_filled(
            center,
            glow_radius,
            Color32::from_rgba_unmultiplied(bright.r(), bright.g(), bright.b(), alpha),
        );
    }
}

/// Connector line blending from `color_a` at `a` to `color_b` at `b`.
pub fn draw_connector(painter: &Painter, a: Pos2, b: Pos2, color_a: Color32, color_b: Color32) {
    for seg in 0..CONNECTOR_SEGMENTS {
        let t0 = seg as f32 / CONNECTOR_SEGMENTS as f32;
        let t1 = (seg + 1) as f32 / CONNECTOR_SEGMENTS as f32;
        let mid = (t0 + t1) / 2.0;
        let p0 = a + (b - a) * t0;
        let p1 = a + (b - a) * t1;
        let color = Color32::from_rgba_unmultiplied(
            lerp_channel(color_a.r(), color_b.r(), mid),
            lerp_channel(color_a.g(), color_b.g(), mid),
            lerp_channel(color_a.b(), color_b.b(), mid),
            90,
        );
        painter.line_segment([p0, p1], Stroke::new(1.0, color));
    }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t) as u8
}
