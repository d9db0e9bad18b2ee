//! Bolt generator: the jagged, branching discharge an enemy fires.
//!
//! `generate_bolt` is a pure function of its endpoints, parameters and random
//! source. It returns owned segments; whoever holds the `Bolt` component owns
//! them for exactly one tick and regenerates them the next, which is what makes
//! the discharge flicker.
//!
//! ```text
//!  source ──╮  ╭──╮ ╭─╮   ╭── target      trunk   (depth 0, thickness t)
//!           ╰──╯  ╰╮╯ ╰───╯
//!                  ╰──╮                   branch  (depth 1, thickness t/2)
//!                     ╰─
//! ```
//!
//! Invariants:
//! - the trunk starts exactly at `source` and ends exactly at `target`;
//! - interior vertices are jittered, the last interior vertex is not;
//! - `floor(distance * vertices_per_unit) <= 0` yields no segments at all.

use bevy::prelude::*;
use rand::Rng;

use crate::common::tunables::BoltTunables;

/// One rendered polyline of a bolt.
#[derive(Debug, Clone, PartialEq)]
pub struct BoltSegment {
    pub points: Vec<Vec3>,
    pub thickness: f32,
    /// 0 for the trunk, +1 per level of branching.
    pub depth: u8,
}

/// The discharge currently shown by an enemy. Empty outside of shooting.
#[derive(Component, Debug, Clone, Default)]
pub struct Bolt {
    segments: Vec<BoltSegment>,
}

impl Bolt {
    #[inline]
    pub fn segments(&self) -> &[BoltSegment] {
        &self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The depth-0 polyline, if any.
    pub fn trunk(&self) -> Option<&BoltSegment> {
        self.segments.iter().find(|s| s.depth == 0)
    }

    /// Drop last tick's geometry and show `segments` instead.
    pub fn replace(&mut self, segments: Vec<BoltSegment>) {
        self.segments = segments;
    }

    /// Release the geometry. Clearing an empty bolt does nothing.
    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

/// Generate a full bolt (trunk plus branches) from `source` to `target`.
pub fn generate_bolt<R: Rng + ?Sized>(
    source: Vec3,
    target: Vec3,
    params: &BoltTunables,
    rng: &mut R,
) -> Vec<BoltSegment> {
    let mut out = Vec::new();
    trace(source, target, params.thickness, 0, params, rng, &mut out);
    out
}

/// Uniform offset in `[-magnitude/2, magnitude/2)`.
#[inline]
fn offset<R: Rng + ?Sized>(rng: &mut R, magnitude: f32) -> f32 {
    rng.gen_range(-0.5f32..0.5) * magnitude
}

#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, magnitude: f32) -> Vec3 {
    Vec3::new(
        offset(rng, magnitude),
        offset(rng, magnitude),
        offset(rng, magnitude),
    )
}

/// Emit one polyline for `source -> target` and recurse into its branches.
///
/// Branches are pushed as they are discovered, so a segment's own polyline
/// lands after all of its branches.
fn trace<R: Rng + ?Sized>(
    source: Vec3,
    target: Vec3,
    thickness: f32,
    depth: u8,
    params: &BoltTunables,
    rng: &mut R,
    out: &mut Vec<BoltSegment>,
) {
    let steps = (source.distance(target) * params.vertices_per_unit).floor() as i64;
    if steps <= 0 {
        return;
    }

    let mut points = Vec::with_capacity(steps as usize + 1);
    points.push(source);

    for i in 1..steps {
        let alpha = i as f32 / steps as f32;
        let mut point = source.lerp(target, alpha);

        if i < steps - 1 {
            point += jitter(rng, params.jaggedness);
        }

        points.push(point);

        if depth < params.max_depth && rng.gen_range(0.0f32..1.0) < params.branch_chance {
            let tip = point + jitter(rng, params.branch_spread);
            trace(point, tip, thickness * 0.5, depth + 1, params, rng, out);
        }
    }

    points.push(target);

    out.push(BoltSegment {
        points,
        thickness,
        depth,
    });
}
