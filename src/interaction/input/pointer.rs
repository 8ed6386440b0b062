//! Pointer input reduced to a single tracked touch.
//!
//! Platform capture (mouse or touch screen) emits [`PointerEvent`]s; the
//! headless core only ever sees those events, so tests drive it the same way
//! the window does.
use bevy::prelude::*;

use crate::core::system::system_order::FrameSet;

const LOG_TARGET: &str = "pointer";

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed at a world position.
    Down(Vec2),
    /// Motion since the previous event, in world units.
    Move(Vec2),
    Up,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub enum TouchState {
    #[default]
    Idle,
    Touching {
        position: Vec2,
    },
}

impl TouchState {
    pub fn apply(&mut self, event: PointerEvent) {
        *self = match (*self, event) {
            (_, PointerEvent::Down(position)) => TouchState::Touching { position },
            (TouchState::Touching { position }, PointerEvent::Move(delta)) => {
                TouchState::Touching {
                    position: position + delta,
                }
            }
            (TouchState::Idle, PointerEvent::Move(_)) => TouchState::Idle,
            (_, PointerEvent::Up) => TouchState::Idle,
        };
    }

    pub fn position(&self) -> Option<Vec2> {
        match self {
            TouchState::Idle => None,
            TouchState::Touching { position } => Some(*position),
        }
    }
}

pub fn apply_pointer_events(mut events: EventReader<PointerEvent>, mut touch: ResMut<TouchState>) {
    for ev in events.read() {
        touch.apply(*ev);
        trace!(target: LOG_TARGET, "{ev:?} -> {:?}", *touch);
    }
}

/// Headless half: event type, touch state and the reducer.
pub struct PointerPlugin;

impl Plugin for PointerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerEvent>()
            .init_resource::<TouchState>()
            .add_systems(Update, apply_pointer_events.in_set(FrameSet::Input));
    }
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PointerCaptureSet;

/// Windowed half: turns mouse and touch-screen input into [`PointerEvent`]s.
pub struct PointerCapturePlugin;

impl Plugin for PointerCapturePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, PointerCaptureSet.before(FrameSet::Input))
            .add_systems(Update, capture_pointer.in_set(PointerCaptureSet));
    }
}

fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

fn capture_pointer(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut last_world: Local<Option<Vec2>>,
    mut out: EventWriter<PointerEvent>,
) {
    // Touch screen first, mouse as fallback.
    let active_touch = touches
        .as_deref()
        .filter(|t| t.iter().next().is_some() || t.any_just_released());
    let (pressed, released, screen_pos) = if let Some(t) = active_touch {
        let pos = t.iter().next().map(|touch| touch.position());
        (t.any_just_pressed(), pos.is_none(), pos)
    } else if let Some(b) = buttons.as_deref() {
        let held = b.pressed(MouseButton::Left) || b.just_pressed(MouseButton::Left);
        let pos = windows_q
            .iter()
            .next()
            .and_then(Window::cursor_position)
            .filter(|_| held);
        (
            b.just_pressed(MouseButton::Left),
            b.just_released(MouseButton::Left),
            pos,
        )
    } else {
        return;
    };

    let world = screen_pos.and_then(|p| cursor_world_pos(&camera_q, p));

    if pressed {
        if let Some(w) = world {
            out.write(PointerEvent::Down(w));
            *last_world = Some(w);
        }
        return;
    }
    if released {
        out.write(PointerEvent::Up);
        *last_world = None;
        return;
    }
    if let (Some(w), Some(prev)) = (world, *last_world) {
        let delta = w - prev;
        if delta != Vec2::ZERO {
            out.write(PointerEvent::Move(delta));
            *last_world = Some(w);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_only_counts_while_touching() {
        let mut s = TouchState::default();
        s.apply(PointerEvent::Move(Vec2::new(5.0, 5.0)));
        assert_eq!(s, TouchState::Idle);
        s.apply(PointerEvent::Down(Vec2::new(10.0, 20.0)));
        s.apply(PointerEvent::Move(Vec2::new(-3.0, 1.0)));
        assert_eq!(s.position(), Some(Vec2::new(7.0, 21.0)));
        s.apply(PointerEvent::Up);
        assert_eq!(s, TouchState::Idle);
    }

    #[test]
    fn events_drive_state_in_app() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        crate::core::system::system_order::configure_frame_sets(&mut app);
        app.add_plugins(PointerPlugin);
        app.world_mut().send_event(PointerEvent::Down(Vec2::new(-50.0, 0.0)));
        app.update();
        assert_eq!(
            *app.world().resource::<TouchState>(),
            TouchState::Touching { position: Vec2::new(-50.0, 0.0) }
        );
        app.world_mut().send_event(PointerEvent::Up);
        app.update();
        assert_eq!(*app.world().resource::<TouchState>(), TouchState::Idle);
    }
}
