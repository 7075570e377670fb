//! Control panel: a vertical stack of sliders living in its own coordinate
//! space at the right edge of the window.
//!
//! Pointer events arrive in window coordinates and are translated by the
//! panel origin before they reach the sliders, so the slider hit tests work
//! no matter where the panel sits. Every slider sees every event; nothing
//! enforces that only one is dragged at a time (two overlapping hit regions
//! would both activate, which the layout avoids by construction).

use crate::slider::{PointerEvent, Slider};
use eframe::egui::{Painter, Pos2, pos2};

const SLIDER_X: f32 = 20.0;
const SLIDER_WIDTH: f32 = 260.0;
const SLIDER_HEIGHT: f32 = 10.0;
const SLIDER_SPACING: f32 = 20.0;
const GROUP_GAP: f32 = 20.0;
const TOP_MARGIN: f32 = 30.0;

pub struct ControlPanel {
    pub sliders: Vec<Slider>,
    next_y: f32,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            sliders: Vec::new(),
            next_y: TOP_MARGIN,
        }
    }

    /// Append a slider below the previous one. Returns its index so callers
    /// can keep named handles to the ones they read back.
    pub fn push(&mut self, min: f32, max: f32, initial: f32, label: &'static str) -> usize {
        let slider = Slider::new(
            SLIDER_X,
            self.next_y,
            SLIDER_WIDTH,
            SLIDER_HEIGHT,
            min,
            max,
            initial,
            label,
        );
        self.next_y += SLIDER_HEIGHT + SLIDER_SPACING;
        self.sliders.push(slider);
        self.sliders.len() - 1
    }

    /// Extra vertical space before the next slider group.
    pub fn gap(&mut self) {
        self.next_y += GROUP_GAP;
    }

    pub fn value(&self, index: usize) -> f32 {
        self.sliders[index].value
    }

    /// Feed window-space pointer events to all sliders, translated into
    /// panel space.
    pub fn handle_events(&mut self, events: &[PointerEvent], origin: Pos2) {
        for event in events {
            let local = match *event {
                PointerEvent::Down(pos) => {
                    PointerEvent::Down(pos2(pos.x - origin.x, pos.y - origin.y))
                }
                PointerEvent::Moved(pos) => {
                    PointerEvent::Moved(pos2(pos.x - origin.x, pos.y - origin.y))
                }
                PointerEvent::Up => PointerEvent::Up,
            };
            for slider in &mut self.sliders {
                slider.handle_event(local);
            }
        }
    }

    pub fn draw(&self, painter: &Painter, origin: Pos2) {
        for slider in &self.sliders {
            slider.draw(painter, origin);
        }
    }

    /// Height needed to show every slider, for sizing the panel scroll area.
    pub fn content_height(&self) -> f32 {
        self.next_y
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_translated_by_panel_origin() {
        let mut panel = ControlPanel::new();
        let idx = panel.push(0.0, 100.0, 50.0, "a");
        let origin = pos2(724.0, 0.0);
        let track_y = panel.sliders[idx].y;

        // Press in window space right on the track, then drag to its middle.
        let down = pos2(724.0 + SLIDER_X + 1.0, track_y);
        let mid = pos2(724.0 + SLIDER_X + SLIDER_WIDTH / 2.0, track_y);
        panel.handle_events(&[PointerEvent::Down(down), PointerEvent::Moved(mid)], origin);
        assert!((panel.value(idx) - 50.0).abs() < 0.5);

        // The same press without translation would miss entirely.
        let mut other = ControlPanel::new();
        let idx2 = other.push(0.0, 100.0, 50.0, "b");
        other.handle_events(&[PointerEvent::Down(down)], pos2(0.0, 0.0));
        assert!(!other.sliders[idx2].active);
    }

    #[test]
    fn sliders_stack_downward() {
        let mut panel = ControlPanel::new();
        let a = panel.push(0.0, 1.0, 0.0, "a");
        panel.gap();
        let b = panel.push(0.0, 1.0, 0.0, "b");
        assert!(panel.sliders[b].y > panel.sliders[a].y + SLIDER_HEIGHT + SLIDER_SPACING);
    }
}
