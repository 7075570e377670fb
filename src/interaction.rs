//! Particle kinds and the kind-by-kind interaction matrix.
//!
//! The matrix maps an *ordered* pair `(of, on)` to a signed strength:
//! positive pulls `of` toward `on`, negative pushes it away. Rows are not
//! required to mirror columns (everyone chases YELLOW while YELLOW flees
//! everyone, for instance); that asymmetry is deliberate, never symmetrize
//! it.

use eframe::egui::Color32;
use std::ops::{Index, IndexMut};

/// Discrete particle kinds. `Cursor` is the pointer-driven kind: it repels
/// the others through the matrix but is never integrated or drawn.
#[repr(usize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Red = 0,
    Green = 1,
    Blue = 2,
    Yellow = 3,
    Cursor = 4,
}

impl Kind {
    pub const COUNT: usize = 5;

    /// The kinds a spawned particle can take (everything but the cursor).
    pub const SPAWNABLE: [Kind; 4] = [Kind::Red, Kind::Green, Kind::Blue, Kind::Yellow];

    pub fn color(self) -> Color32 {
        match self {
            Kind::Red => Color32::from_rgb(255, 0, 0),
            Kind::Green => Color32::from_rgb(0, 255, 0),
            Kind::Blue => Color32::from_rgb(0, 0, 255),
            Kind::Yellow => Color32::from_rgb(255, 255, 0),
            Kind::Cursor => Color32::BLACK,
        }
    }
}

/// Signed interaction strengths indexed by `(of, on)`.
#[derive(Clone, Debug, PartialEq)]
pub struct InteractionMatrix {
    strengths: [[f32; Kind::COUNT]; Kind::COUNT],
}

impl Default for InteractionMatrix {
    fn default() -> Self {
        // Rows: the kind the force acts on. Columns: red, green, blue,
        // yellow, cursor.
        Self {
            strengths: [
                [-10.0, 40.0, -20.0, 60.0, -100.0],
                [40.0, -10.0, 40.0, 60.0, -100.0],
                [-20.0, 40.0, -10.0, 60.0, -100.0],
                [-40.0, -40.0, -40.0, -100.0, -100.0],
                [-50.0, -50.0, -50.0, -50.0, 0.0],
            ],
        }
    }
}

impl Index<(Kind, Kind)> for InteractionMatrix {
    type Output = f32;

    fn index(&self, (of, on): (Kind, Kind)) -> &f32 {
        &self.strengths[of as usize][on as usize]
    }
}

impl IndexMut<(Kind, Kind)> for InteractionMatrix {
    fn index_mut(&mut self, (of, on): (Kind, Kind)) -> &mut f32 {
        &mut self.strengths[of as usize][on as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matrix_keeps_configured_asymmetry() {
        let m = InteractionMatrix::default();
        // Red chases yellow, yellow flees red.
        assert_eq!(m[(Kind::Red, Kind::Yellow)], 60.0);
        assert_eq!(m[(Kind::Yellow, Kind::Red)], -40.0);
        // Everything flees the cursor harder than the cursor row says.
        assert_eq!(m[(Kind::Green, Kind::Cursor)], -100.0);
        assert_eq!(m[(Kind::Cursor, Kind::Green)], -50.0);
        assert_eq!(m[(Kind::Cursor, Kind::Cursor)], 0.0);
    }

    #[test]
    fn writing_one_direction_leaves_the_other_alone() {
        let mut m = InteractionMatrix::default();
        m[(Kind::Red, Kind::Green)] = 12.5;
        assert_eq!(m[(Kind::Red, Kind::Green)], 12.5);
        assert_eq!(m[(Kind::Green, Kind::Red)], 40.0);
    }
}
