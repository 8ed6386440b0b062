//! Begin-contact capture. Rapier reports contacts while it steps; game logic must
//! not touch bodies at that point, so the recorder only enqueues typed payload
//! pairs and the bullet lifecycle drains them on the next frame.
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::BulletId;
use crate::core::system::system_order::RecordContactsSet;

const LOG_TARGET: &str = "contacts";

/// Payloads of the two bodies that started touching. Walls carry no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactRecord {
    pub a: Option<BulletId>,
    pub b: Option<BulletId>,
}

impl ContactRecord {
    pub fn new(a: Option<BulletId>, b: Option<BulletId>) -> Self {
        Self { a, b }
    }

    pub fn involves(&self, id: BulletId) -> bool {
        self.a == Some(id) || self.b == Some(id)
    }
}

/// Contacts recorded during the last physics step. Pushed in arrival order,
/// popped last-in-first-out.
#[derive(Resource, Debug, Default)]
pub struct PendingContacts {
    stack: Vec<ContactRecord>,
}

impl PendingContacts {
    pub fn push(&mut self, record: ContactRecord) {
        self.stack.push(record);
    }

    pub fn pop(&mut self) -> Option<ContactRecord> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Arrival order, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ContactRecord> {
        self.stack.iter()
    }
}

pub struct ContactRecorderPlugin;

impl Plugin for ContactRecorderPlugin {
    fn build(&self, app: &mut App) {
        // Registered here too so the recorder runs in apps without the Rapier plugin.
        app.add_event::<CollisionEvent>()
            .init_resource::<PendingContacts>()
            .configure_sets(PostUpdate, RecordContactsSet.after(PhysicsSet::Writeback))
            .add_systems(PostUpdate, record_contacts.in_set(RecordContactsSet));
    }
}

pub fn record_contacts(
    mut collisions: EventReader<CollisionEvent>,
    payloads: Query<&BulletId>,
    mut pending: ResMut<PendingContacts>,
) {
    for ev in collisions.read() {
        let CollisionEvent::Started(e1, e2, _flags) = ev else {
            continue;
        };
        let record = ContactRecord::new(
            payloads.get(*e1).ok().copied(),
            payloads.get(*e2).ok().copied(),
        );
        debug!(target: LOG_TARGET, "contact started {:?} <-> {:?} => {:?}", e1, e2, record);
        pending.push(record);
    }
}
