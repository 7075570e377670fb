//! Kind-interaction particles ("particle life").
//!
//! Every particle feels an inverse-square attraction or repulsion toward
//! every other particle, with the signed strength looked up in the
//! [`InteractionMatrix`] by the ordered kind pair. Contact is resolved
//! separately with a restitution impulse. The cursor particle is part of the
//! population for force and contact purposes but its position comes from the
//! pointer, never from integration.

use crate::interaction::{InteractionMatrix, Kind};
use crate::{Bounds, pair_mut};
use eframe::egui::{Color32, Pos2, Vec2, pos2, vec2};
use rand::Rng;

/// Speeds above this trigger the cap...
pub const MAX_SPEED: f32 = 10.0;
/// ...which rescales the velocity to this magnitude. The asymmetric pair is
/// how the original behaves and is kept as-is.
const CAP_RESCALE: f32 = 5.0;

/// Distances below this are treated as this, keeping the inverse-square law
/// away from its singularity.
pub const DISTANCE_FLOOR: f32 = 1.0;

/// Fraction of the accumulated force folded into velocity each frame.
pub const FORCE_DAMPING: f32 = 0.1;

/// Velocity retained per axis on a wall bounce.
const WALL_DAMPING: f32 = 0.8;

pub const DEFAULT_RADIUS: f32 = 5.0;
pub const DEFAULT_RESTITUTION: f32 = 0.8;
/// Neutral value of the force-strength slider: at this setting the force law
/// is exactly `coeff * delta / d²`.
pub const DEFAULT_FORCE_MULT: f32 = 20.0;

pub const CURSOR_RADIUS: f32 = 50.0;
pub const CURSOR_MASS: f32 = 40.0;

pub struct Particle {
    pub pos: Pos2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub kind: Kind,
    pub color: Color32,
}

/// Live-tunable constants, rewritten from the sliders each frame.
#[derive(Clone, Debug)]
pub struct LifeParams {
    pub speed_mult: f32,
    pub radius: f32,
    pub restitution: f32,
    pub force_mult: f32,
    pub bounds: Bounds,
}

impl Default for LifeParams {
    fn default() -> Self {
        Self {
            speed_mult: 1.0,
            radius: DEFAULT_RADIUS,
            restitution: DEFAULT_RESTITUTION,
            force_mult: DEFAULT_FORCE_MULT,
            bounds: Bounds::new(724.0, 600.0),
        }
    }
}

impl Particle {
    pub fn spawn(rng: &mut impl Rng, bounds: Bounds) -> Self {
        let kind = Kind::SPAWNABLE[rng.random_range(0..Kind::SPAWNABLE.len())];
        Self {
            pos: pos2(
                rng.random_range(DEFAULT_RADIUS..(bounds.width - DEFAULT_RADIUS)),
                rng.random_range(DEFAULT_RADIUS..(bounds.height - DEFAULT_RADIUS)),
            ),
            vel: vec2(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)),
            radius: DEFAULT_RADIUS,
            mass: 1.0,
            kind,
            color: kind.color(),
        }
    }

    /// The pointer-driven particle: big, heavy, repulsive, never drawn.
    pub fn cursor(rng: &mut impl Rng, bounds: Bounds) -> Self {
        Self {
            pos: pos2(
                rng.random_range(CURSOR_RADIUS..(bounds.width - CURSOR_RADIUS)),
                rng.random_range(CURSOR_RADIUS..(bounds.height - CURSOR_RADIUS)),
            ),
            vel: vec2(10.0, 10.0),
            radius: CURSOR_RADIUS,
            mass: CURSOR_MASS,
            kind: Kind::Cursor,
            color: Kind::Cursor.color(),
        }
    }

    /// Inverse-square interaction: `coeff * delta / d²` with the distance
    /// floored at [`DISTANCE_FLOOR`].
    fn force_from(&self, other: &Particle, matrix: &InteractionMatrix) -> Vec2 {
        let delta = other.pos - self.pos;
        let distance = delta.length().max(DISTANCE_FLOOR);
        let coeff = matrix[(self.kind, other.kind)];
        delta * (coeff / (distance * distance))
    }

    fn bounce_walls(&mut self, bounds: Bounds) {
        if self.pos.x < self.radius {
            self.pos.x = self.radius;
            self.vel.x *= -WALL_DAMPING;
        } else if self.pos.x > bounds.width - self.radius {
            self.pos.x = bounds.width - self.radius;
            self.vel.x *= -WALL_DAMPING;
        }

        if self.pos.y < self.radius {
            self.pos.y = self.radius;
            self.vel.y *= -WALL_DAMPING;
        } else if self.pos.y > bounds.height - self.radius {
            self.pos.y = bounds.height - self.radius;
            self.vel.y *= -WALL_DAMPING;
        }
    }
}

/// Contact resolution: symmetric push-out, then a restitution impulse for
/// pairs still moving toward each other. Pairs already separating keep their
/// velocities; the push-out alone handles them.
fn collide_pair(a: &mut Particle, b: &mut Particle, restitution: f32) {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    if distance >= a.radius + b.radius {
        return;
    }

    let normal = if distance > 0.0 {
        delta / distance
    } else {
        Vec2::ZERO
    };

    let overlap = (a.radius + b.radius) - distance;
    a.pos -= normal * (overlap / 2.0);
    b.pos += normal * (overlap / 2.0);

    let approach = (b.vel - a.vel).dot(normal);
    if approach > 0.0 {
        return;
    }

    let j = -(1.0 + restitution) * approach / (1.0 / a.mass + 1.0 / b.mass);
    let impulse = normal * j;
    a.vel -= impulse / a.mass;
    b.vel += impulse / b.mass;
}

/// Advance the whole population by one frame, in index order.
///
/// Each particle accumulates its net force and resolves contacts in the same
/// scan over the others, so later particles see the scan's mutations; then
/// it integrates, caps its speed, and bounces off the walls. The cursor is
/// skipped entirely; others still feel it as a force source and contact
/// partner.
pub fn step(particles: &mut [Particle], matrix: &InteractionMatrix, params: &LifeParams) {
    for i in 0..particles.len() {
        if particles[i].kind == Kind::Cursor {
            continue;
        }
        particles[i].radius = params.radius;

        let mut net = Vec2::ZERO;
        for j in 0..particles.len() {
            if j == i {
                continue;
            }
            net += particles[i].force_from(&particles[j], matrix);
            let (a, b) = pair_mut(particles, i, j);
            collide_pair(a, b, params.restitution);
        }

        let p = &mut particles[i];
        p.vel += net * FORCE_DAMPING * (params.force_mult / DEFAULT_FORCE_MULT);

        let speed = p.vel.length();
        if speed > MAX_SPEED {
            p.vel = p.vel / speed * CAP_RESCALE;
        }

        p.pos += p.vel * params.speed_mult;
        p.bounce_walls(params.bounds);
    }
}
