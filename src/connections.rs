//! Per-frame proximity lists for the connector-line visual.
//!
//! A particle's list holds the indices of every other particle within a
//! radius-scaled range. The lists are rebuilt from scratch every frame and
//! feed rendering only; they must never leak back into force or impulse
//! computation. Because the pass is read-only it is safe to fan out over the
//! rayon pool, unlike the physics scan.

use eframe::egui::Pos2;
use rayon::prelude::*;

/// Neighbours count as "near" within this many multiples of the combined
/// radii.
pub const CONNECT_RANGE: f32 = 4.0;

/// Rebuild the `collided_with` lists for a population given as
/// `(position, radius)` pairs.
pub fn neighbor_lists(bodies: &[(Pos2, f32)], range_factor: f32) -> Vec<Vec<usize>> {
    bodies
        .par_iter()
        .enumerate()
        .map(|(i, &(pos, radius))| {
            let mut near = Vec::new();
            for (j, &(other_pos, other_radius)) in bodies.iter().enumerate() {
                if j == i {
                    continue;
                }
                let threshold = (radius + other_radius) * range_factor;
                if (other_pos - pos).length() < threshold {
                    near.push(j);
                }
            }
            near
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn lists_are_symmetric_and_self_free() {
        let bodies = vec![
            (pos2(0.0, 0.0), 5.0),
            (pos2(30.0, 0.0), 5.0),
            (pos2(500.0, 500.0), 5.0),
        ];
        let lists = neighbor_lists(&bodies, CONNECT_RANGE);
        assert_eq!(lists[0], vec![1]);
        assert_eq!(lists[1], vec![0]);
        assert!(lists[2].is_empty());
        for (i, list) in lists.iter().enumerate() {
            assert!(!list.contains(&i), "a particle must not neighbour itself");
        }
    }

    #[test]
    fn threshold_is_strict() {
        // Combined radii 10, factor 4: the cut-off sits exactly at 40.
        let at_limit = vec![(pos2(0.0, 0.0), 5.0), (pos2(40.0, 0.0), 5.0)];
        let lists = neighbor_lists(&at_limit, 4.0);
        assert!(lists[0].is_empty(), "exactly at range is out");

        let inside = vec![(pos2(0.0, 0.0), 5.0), (pos2(39.9, 0.0), 5.0)];
        let lists = neighbor_lists(&inside, 4.0);
        assert_eq!(lists[0], vec![1]);
    }

    #[test]
    fn mixed_radii_scale_the_range() {
        // A big body extends the reach for its pairs.
        let bodies = vec![(pos2(0.0, 0.0), 50.0), (pos2(150.0, 0.0), 5.0)];
        let lists = neighbor_lists(&bodies, 4.0);
        assert_eq!(lists[0], vec![1], "combined radii 55 * 4 = 220 reaches 150");
    }
}
