//! Collision dispatch: one typed channel for every gameplay contact.
//!
//! Avian reports `CollisionStart { collider1, collider2, body1, body2 }`. We
//! resolve each side to its gameplay owner (the rigid body when there is one),
//! look up its `BodyTag`, and write one `TaggedCollision` per tagged side:
//!
//! ```text
//!   CollisionStart(projectile, enemy)
//!     -> TaggedCollision { subject: enemy,      subject_tag: Enemy,            other_tag: Some(PlayerProjectile) }
//!     -> TaggedCollision { subject: projectile, subject_tag: PlayerProjectile, other_tag: Some(Enemy) }
//! ```
//!
//! Consumers (enemy damage, player contact damage) match on the tags only and
//! never need to know which side of the raw event they were on.

use avian3d::collision::narrow_phase::CollisionEventSystems;
use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::BodyTag;
use crate::common::schedule::SimulationSet;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaggedCollision {
    pub subject: Entity,
    pub subject_tag: BodyTag,
    pub other: Entity,
    /// `None` when the other body carries no tag.
    pub other_tag: Option<BodyTag>,
}

pub fn plugin(app: &mut App) {
    app.add_message::<TaggedCollision>();

    app.add_systems(
        FixedPostUpdate,
        classify_collisions
            .after(CollisionEventSystems)
            .in_set(SimulationSet::Collisions),
    );
}

#[inline]
fn gameplay_owner(collider: Entity, body: Option<Entity>) -> Entity {
    body.unwrap_or(collider)
}

pub fn classify_collisions(
    mut started: MessageReader<CollisionStart>,
    q_tags: Query<&BodyTag>,
    mut out: MessageWriter<TaggedCollision>,
) {
    for ev in started.read() {
        let a = gameplay_owner(ev.collider1, ev.body1);
        let b = gameplay_owner(ev.collider2, ev.body2);
        let tag_a = q_tags.get(a).ok().copied();
        let tag_b = q_tags.get(b).ok().copied();

        for (subject, subject_tag, other, other_tag) in [(a, tag_a, b, tag_b), (b, tag_b, a, tag_a)] {
            let Some(subject_tag) = subject_tag else {
                continue;
            };
            out.write(TaggedCollision {
                subject,
                subject_tag,
                other,
                other_tag,
            });
        }
    }
}
