//! Bounded-value sliders driven by raw pointer events.
//!
//! A slider is a tiny state machine with two states, idle and dragging. A
//! pointer press inside the hit rectangle starts a drag, every pointer move
//! while dragging remaps the x-coordinate linearly onto `[min, max]`, and a
//! pointer release always ends the drag. The value can never leave its
//! bounds: the pointer position is clamped onto the track before mapping, so
//! there is no error path.
//!
//! Coordinates are panel-local; the owning [`crate::panel::ControlPanel`]
//! translates window coordinates before events reach a slider.

use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, pos2, vec2};

/// Extra pointer tolerance above and below the track, in panel units.
const HIT_MARGIN_Y: f32 = 10.0;

/// Discrete pointer input, in the same coordinate space as the sliders.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Moved(Pos2),
    Up,
}

/// A live-tunable scalar bound to `[min, max]`.
pub struct Slider {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min: f32,
    pub max: f32,
    pub value: f32,
    pub label: &'static str,
    /// True while the pointer is dragging this slider.
    pub active: bool,
}

impl Slider {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        min: f32,
        max: f32,
        initial: f32,
        label: &'static str,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min,
            max,
            value: initial,
            label,
            active: false,
        }
    }

    fn hit(&self, pos: Pos2) -> bool {
        self.x <= pos.x
            && pos.x <= self.x + self.width
            && self.y - HIT_MARGIN_Y <= pos.y
            && pos.y <= self.y + self.height + HIT_MARGIN_Y
    }

    /// Advance the idle/dragging state machine by one pointer event.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => {
                if self.hit(pos) {
                    self.active = true;
                }
            }
            PointerEvent::Moved(pos) => {
                if self.active {
                    let clamped_x = pos.x.clamp(self.x, self.x + self.width);
                    self.value =
                        self.min + (clamped_x - self.x) / self.width * (self.max - self.min);
                }
            }
            PointerEvent::Up => self.active = false,
        }
    }

    /// Knob centre on the track for the current value.
    pub fn knob_x(&self) -> f32 {
        self.x + (self.value - self.min) / (self.max - self.min) * self.width
    }

    /// Draw the track, knob, and label with the given painter. `origin` is
    /// the panel's top-left corner in window coordinates.
    pub fn draw(&self, painter: &eframe::egui::Painter, origin: Pos2) {
        let track = Rect::from_min_size(
            pos2(origin.x + self.x, origin.y + self.y),
            vec2(self.width, self.height),
        );
        painter.rect_filled(track, 2.0, Color32::from_gray(100));

        let knob = pos2(origin.x + self.knob_x(), track.center().y);
        let knob_color = if self.active {
            Color32::WHITE
        } else {
            Color32::from_gray(200)
        };
        painter.circle_filled(knob, 8.0, knob_color);
        painter.circle_stroke(knob, 8.0, Stroke::new(1.0, Color32::from_gray(60)));

        painter.text(
            pos2(track.left(), track.top() - 6.0),
            Align2::LEFT_BOTTOM,
            format!("{}: {:.1}", self.label, self.value),
            FontId::proportional(13.0),
            Color32::from_gray(230),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> Slider {
        Slider::new(0.0, 0.0, 200.0, 10.0, 0.0, 100.0, 50.0, "test")
    }

    #[test]
    fn drag_maps_position_linearly() {
        let mut s = slider();
        s.handle_event(PointerEvent::Down(pos2(100.0, 5.0)));
        assert!(s.active, "press inside the track must start a drag");
        s.handle_event(PointerEvent::Moved(pos2(50.0, 5.0)));
        assert_eq!(s.value, 25.0);
    }

    #[test]
    fn drag_clamps_out_of_range_pointer() {
        let mut s = slider();
        s.handle_event(PointerEvent::Down(pos2(10.0, 0.0)));
        s.handle_event(PointerEvent::Moved(pos2(-999.0, 0.0)));
        assert_eq!(s.value, 0.0);
        s.handle_event(PointerEvent::Moved(pos2(9999.0, 0.0)));
        assert_eq!(s.value, 100.0);
    }

    #[test]
    fn release_freezes_value() {
        let mut s = slider();
        s.handle_event(PointerEvent::Down(pos2(100.0, 5.0)));
        s.handle_event(PointerEvent::Moved(pos2(50.0, 5.0)));
        s.handle_event(PointerEvent::Up);
        assert!(!s.active);
        s.handle_event(PointerEvent::Moved(pos2(180.0, 5.0)));
        assert_eq!(s.value, 25.0, "moves after release must not change the value");
    }

    #[test]
    fn press_outside_hit_region_is_ignored() {
        let mut s = slider();
        s.handle_event(PointerEvent::Down(pos2(100.0, 25.0)));
        assert!(!s.active, "press below the tolerance margin must not activate");
        // The vertical margin extends the hit region by 10 units.
        s.handle_event(PointerEvent::Down(pos2(100.0, 19.0)));
        assert!(s.active);
    }

    #[test]
    fn moves_without_press_do_nothing() {
        let mut s = slider();
        s.handle_event(PointerEvent::Moved(pos2(180.0, 5.0)));
        assert_eq!(s.value, 50.0);
    }
}
