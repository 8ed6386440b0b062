//! Central system ordering labels to make the frame sequence explicit.
//! Stages (high-level):
//! 1. Clock (advance simulation time by one fixed step)
//! 2. Input (pointer events -> touch state)
//! 3. Fire (cadence check, bullet spawn + impulse)
//! 4. ResolveContacts (drain contacts recorded during the previous step)
//! 5. Expire (bullets past their lifetime)
//! 6. Effects (damage label fading)
//! 7. Rapier step (PostUpdate, handled by plugin)
//! 8. RecordContacts (PostUpdate, after Rapier writeback; enqueue only)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum FrameSet {
    Clock,
    Input,
    Fire,
    ResolveContacts,
    Expire,
    Effects,
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct RecordContactsSet; // begin-contact capture, runs right after the physics step

pub(crate) fn configure_frame_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::Clock,
            FrameSet::Input,
            FrameSet::Fire,
            FrameSet::ResolveContacts,
            FrameSet::Expire,
            FrameSet::Effects,
        )
            .chain(),
    );
}
