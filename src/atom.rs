//! Energy-exchange atoms.
//!
//! Every atom carries a scalar energy in `[0, 100]`. Energy decides both the
//! display colour (blue when cold, red when hot) and how fast the atom moves:
//! the heading vector is renormalized every frame and scaled to
//! `MIN_SPEED + (MAX_SPEED - MIN_SPEED) * energy / 100`, so direction
//! persists while speed never accumulates. Energy moves around the system in
//! two ways only: colliding atoms average it, and wall bounces average it
//! with the configured wall energy.

use crate::{Bounds, pair_mut};
use eframe::egui::{Color32, Pos2, Vec2, pos2, vec2};
use rand::Rng;

pub const MIN_SPEED: f32 = 1.0;
pub const MAX_SPEED: f32 = 5.0;
pub const MAX_ENERGY: f32 = 100.0;

/// Component-wise limit on relative velocity entering the impulse.
const REL_VEL_LIMIT: f32 = 1000.0;
/// Hard cap on the impulse magnitude.
const IMPULSE_LIMIT: f32 = 100.0;

pub const DEFAULT_RADIUS: f32 = 5.0;
pub const DEFAULT_WALL_ENERGY: f32 = 20.0;

pub struct Atom {
    pub pos: Pos2,
    /// Heading. Direction is what matters; the magnitude is rebuilt from
    /// energy on every move.
    pub heading: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub energy: f32,
    pub color: Color32,
}

/// Live-tunable constants, rewritten from the sliders at the top of each
/// frame.
#[derive(Clone, Debug)]
pub struct AtomParams {
    /// Energy the walls donate on bounce ("temperature").
    pub wall_energy: f32,
    /// Downward pull, scaled by how cold an atom is.
    pub gravity: f32,
    pub radius: f32,
    pub bounds: Bounds,
}

impl Default for AtomParams {
    fn default() -> Self {
        Self {
            wall_energy: DEFAULT_WALL_ENERGY,
            gravity: 0.0,
            radius: DEFAULT_RADIUS,
            bounds: Bounds::new(800.0, 600.0),
        }
    }
}

impl Atom {
    pub fn spawn(rng: &mut impl Rng, bounds: Bounds) -> Self {
        Self {
            pos: pos2(
                rng.random_range(0.0..bounds.width),
                rng.random_range(0.0..bounds.height),
            ),
            heading: vec2(rng.random_range(-3.0..=3.0), rng.random_range(-3.0..=3.0)),
            radius: DEFAULT_RADIUS,
            mass: 1.0,
            energy: 1.0,
            color: Color32::BLUE,
        }
    }

    /// Speed derived from the current energy.
    pub fn speed(&self) -> f32 {
        MIN_SPEED + (MAX_SPEED - MIN_SPEED) * (self.energy / MAX_ENERGY)
    }

    /// Instantaneous velocity: normalized heading at the energy-derived
    /// speed. Zero for an atom with no heading.
    fn velocity(&self) -> Vec2 {
        if self.heading.length() > 0.0 {
            self.heading.normalized() * self.speed()
        } else {
            Vec2::ZERO
        }
    }

    /// Clamp energy, refresh the colour, and take one movement step.
    fn update(&mut self, gravity: f32) {
        self.energy = self.energy.clamp(0.0, MAX_ENERGY);
        let t = self.energy / MAX_ENERGY;
        self.color = Color32::from_rgb((255.0 * t) as u8, 0, (255.0 * (1.0 - t)) as u8);

        // Cold atoms sink faster than hot ones.
        self.heading.y += gravity * (1.0 - t);

        if self.heading.length() > 0.0 {
            self.heading = self.heading.normalized();
            self.pos += self.heading * self.speed();
        }
    }

    /// Reflect off the walls, absorbing energy from them. Each axis is
    /// exclusive: a single bounce per axis per frame.
    fn bounce_walls(&mut self, wall_energy: f32, bounds: Bounds) {
        if self.pos.x < self.radius {
            self.pos.x = self.radius;
            self.heading.x *= -1.0;
            self.energy = (self.energy + wall_energy) / 2.0;
        } else if self.pos.x > bounds.width - self.radius {
            self.pos.x = bounds.width - self.radius;
            self.heading.x *= -1.0;
            self.energy = (self.energy + wall_energy) / 2.0;
        }

        if self.pos.y < self.radius {
            self.pos.y = self.radius;
            self.heading.y *= -1.0;
            self.energy = (self.energy + wall_energy) / 2.0;
        } else if self.pos.y > bounds.height - self.radius {
            self.pos.y = bounds.height - self.radius;
            self.heading.y *= -1.0;
            self.energy = (self.energy + wall_energy) / 2.0;
        }
    }
}

/// Resolve contact between two atoms: symmetric push-out, a capped impulse
/// along the normal, then one-sided energy averaging into `a`. The caller's
/// scan visits every ordered pair, so each unordered pair exchanges twice
/// per frame; that double exchange is part of the simulation's character.
fn collide_pair(a: &mut Atom, b: &mut Atom) {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance >= a.radius + b.radius {
        return;
    }

    // Coincident atoms get a zero normal: no push, no impulse, until they
    // drift apart.
    let normal = if distance > 0.0 {
        delta / distance
    } else {
        Vec2::ZERO
    };

    let overlap = (a.radius + b.radius) - distance;
    a.pos -= normal * (overlap / 2.0);
    b.pos += normal * (overlap / 2.0);

    let rel = (a.velocity() - b.velocity()).clamp(
        Vec2::splat(-REL_VEL_LIMIT),
        Vec2::splat(REL_VEL_LIMIT),
    );
    let impulse = (2.0 * rel.length() / (a.mass + b.mass)).min(IMPULSE_LIMIT);

    // Cross-mass scaling: the heavier side shoves the lighter side harder.
    a.heading -= normal * impulse * b.mass;
    b.heading += normal * impulse * a.mass;

    a.energy = (a.energy + b.energy) / 2.0;
}

/// Advance the whole population by one frame.
///
/// Strictly sequential and index-ordered: atom `i` moves, bounces, then
/// resolves contact against every other atom, mutating both sides mid-scan.
pub fn step(atoms: &mut [Atom], params: &AtomParams) {
    for i in 0..atoms.len() {
        let atom = &mut atoms[i];
        atom.radius = params.radius;
        atom.update(params.gravity);
        atom.bounce_walls(params.wall_energy, params.bounds);

        for j in 0..atoms.len() {
            if j == i {
                continue;
            }
            let (a, b) = pair_mut(atoms, i, j);
            collide_pair(a, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(x: f32, y: f32, energy: f32) -> Atom {
        Atom {
            pos: pos2(x, y),
            heading: vec2(1.0, 0.0),
            radius: DEFAULT_RADIUS,
            mass: 1.0,
            energy,
            color: Color32::BLUE,
        }
    }

    fn params() -> AtomParams {
        AtomParams::default()
    }

    #[test]
    fn energy_is_clamped_every_step() {
        let mut atoms = vec![atom(400.0, 300.0, 250.0), atom(100.0, 100.0, -40.0)];
        step(&mut atoms, &params());
        for a in &atoms {
            assert!(
                (0.0..=MAX_ENERGY).contains(&a.energy),
                "energy {} escaped [0, 100]",
                a.energy
            );
        }
    }

    #[test]
    fn color_blends_blue_to_red() {
        let mut cold = atom(400.0, 300.0, 0.0);
        let mut hot = atom(100.0, 100.0, 100.0);
        cold.update(0.0);
        hot.update(0.0);
        assert_eq!(cold.color, Color32::from_rgb(0, 0, 255));
        assert_eq!(hot.color, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn speed_scales_with_energy() {
        let mut hot = atom(400.0, 300.0, 100.0);
        hot.heading = vec2(1.0, 0.0);
        let before = hot.pos;
        hot.update(0.0);
        assert!((hot.pos.x - before.x - MAX_SPEED).abs() < 1e-4);

        let mut cold = atom(400.0, 300.0, 0.0);
        cold.heading = vec2(1.0, 0.0);
        let before = cold.pos;
        cold.update(0.0);
        assert!((cold.pos.x - before.x - MIN_SPEED).abs() < 1e-4);
    }

    #[test]
    fn wall_bounce_clamps_flips_and_absorbs_energy() {
        let p = params();
        let mut a = atom(p.radius - 1.0, 300.0, 10.0);
        a.heading = vec2(-0.5, 0.2);
        a.bounce_walls(100.0, p.bounds);
        assert_eq!(a.pos.x, p.radius);
        assert_eq!(a.heading.x, 0.5, "x heading must flip sign");
        assert_eq!(a.heading.y, 0.2, "y heading must be untouched");
        assert_eq!(a.energy, 55.0, "energy must average with the wall energy");
    }

    #[test]
    fn far_wall_is_symmetric() {
        let p = params();
        let mut a = atom(p.bounds.width - p.radius + 2.0, 300.0, 0.0);
        a.heading = vec2(1.0, 0.0);
        a.bounce_walls(p.wall_energy, p.bounds);
        assert_eq!(a.pos.x, p.bounds.width - p.radius);
        assert_eq!(a.heading.x, -1.0);
    }

    #[test]
    fn collision_separates_never_pulls_closer() {
        let mut a = atom(100.0, 100.0, 50.0);
        let mut b = atom(104.0, 100.0, 50.0);
        let before = (b.pos - a.pos).length();
        collide_pair(&mut a, &mut b);
        let after = (b.pos - a.pos).length();
        assert!(
            after >= before - 1e-4,
            "resolution must not pull atoms closer: {before} -> {after}"
        );
        // Overlap of 6 split evenly: centres end up a full diameter apart.
        assert!((after - 2.0 * DEFAULT_RADIUS).abs() < 1e-4);
    }

    #[test]
    fn coincident_atoms_are_a_no_op() {
        let mut a = atom(100.0, 100.0, 80.0);
        let mut b = atom(100.0, 100.0, 20.0);
        let heading_before = a.heading;
        collide_pair(&mut a, &mut b);
        assert_eq!(a.pos, pos2(100.0, 100.0));
        assert_eq!(b.pos, pos2(100.0, 100.0));
        assert_eq!(a.heading, heading_before, "zero normal must carry no impulse");
        // Energy still averages; only the geometric response degenerates.
        assert_eq!(a.energy, 50.0);
    }

    #[test]
    fn energy_exchange_is_one_sided_per_call() {
        let mut a = atom(100.0, 100.0, 80.0);
        let mut b = atom(104.0, 100.0, 20.0);
        collide_pair(&mut a, &mut b);
        assert_eq!(a.energy, 50.0);
        assert_eq!(b.energy, 20.0, "only the scanning side absorbs the average");
    }

    #[test]
    fn impulse_never_exceeds_cap() {
        let mut a = atom(100.0, 100.0, 100.0);
        let mut b = atom(101.0, 100.0, 100.0);
        a.heading = vec2(100.0, 0.0);
        b.heading = vec2(-100.0, 0.0);
        a.mass = 0.001;
        b.mass = 0.001;
        collide_pair(&mut a, &mut b);
        // Head-on at full speed: |rel| = 10, so the raw impulse would be
        // 2 * 10 / 0.002 = 10_000. Capped to 100, the heading change per
        // side is exactly cap * other mass = 0.1 along the normal.
        assert!((a.heading.x - (100.0 - IMPULSE_LIMIT * 0.001)).abs() < 1e-3);
        assert!((b.heading.x - (-100.0 + IMPULSE_LIMIT * 0.001)).abs() < 1e-3);
    }

    #[test]
    fn gravity_sinks_cold_atoms_faster() {
        let mut cold = atom(400.0, 300.0, 0.0);
        let mut hot = atom(400.0, 300.0, 100.0);
        cold.heading = vec2(1.0, 0.0);
        hot.heading = vec2(1.0, 0.0);
        cold.update(0.5);
        hot.update(0.5);
        assert!(
            cold.heading.y > hot.heading.y,
            "the cold atom must pick up more downward heading"
        );
        assert_eq!(hot.heading.y, 0.0, "a full-energy atom feels no gravity");
    }

    #[test]
    fn step_keeps_displacement_within_max_speed() {
        let mut rng = rand::rng();
        let p = params();
        let mut atoms: Vec<Atom> = (0..40).map(|_| Atom::spawn(&mut rng, p.bounds)).collect();
        let before: Vec<Pos2> = atoms.iter().map(|a| a.pos).collect();
        step(&mut atoms, &p);
        for (a, old) in atoms.iter().zip(&before) {
            // Movement itself is bounded by MAX_SPEED; collisions and walls
            // may add push-out on top, bounded by the atom diameter.
            let moved = (a.pos - *old).length();
            assert!(moved <= MAX_SPEED + 10.0 * p.radius, "moved {moved}");
        }
    }
}
