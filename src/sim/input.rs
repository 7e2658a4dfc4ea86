//! Shooting input: controller trigger and screen tap
//!
//! A press first tries the start/restart buttons with a ray from the aim
//! pose. Mode buttons ignore presses and must be shot. Anything else fires a
//! bullet.

use serde::{Deserialize, Serialize};

use super::collision::ray_sphere;
use super::screen::{HitTargetKind, Screen};
use super::state::{GameEvent, GameState, Pose};
use crate::consts::UI_HIT_RADIUS;
use crate::error::GameError;

/// What a trigger or tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// A bullet left the muzzle
    Fired(u32),
    /// A button was pressed directly
    Pressed(HitTargetKind),
    /// Nothing to do on this screen
    Ignored,
}

/// Nearest press-able button along the aim ray
fn pressed_target(state: &GameState, aim: &Pose) -> Option<HitTargetKind> {
    let forward = aim.forward();
    state
        .active_targets()
        .filter(|t| t.kind.accepts_press())
        .filter_map(|t| {
            ray_sphere(aim.position, forward, t.position, UI_HIT_RADIUS)
                .map(|hit| (hit.distance, t.kind))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, kind)| kind)
}

fn press(state: &mut GameState, kind: HitTargetKind) -> Result<ShotOutcome, GameError> {
    log::debug!("{:?} button pressed", kind);
    state.apply(kind.input())?;
    Ok(ShotOutcome::Pressed(kind))
}

/// Launch a bullet from `aim` along its forward axis
pub fn fire(state: &mut GameState, aim: &Pose) -> Result<u32, GameError> {
    let live = state.store.live_bullets();
    if live >= state.settings.max_bullets {
        log::warn!("Bullet limit reached ({}), shot dropped", live);
        return Err(GameError::BulletLimit(live));
    }

    let direction = aim.forward();
    let now = state.now_ms;
    let id = state
        .store
        .spawn_bullet(state.physics.as_mut(), aim.position, direction, now);
    log::trace!("Bullet {} fired from {:?}", id, aim.position);
    state.push_event(GameEvent::BulletFired {
        bullet_id: id,
        position: aim.position,
        direction,
    });
    Ok(id)
}

/// Controller trigger from the muzzle pose
pub fn trigger(state: &mut GameState, origin: Option<Pose>) -> Result<ShotOutcome, GameError> {
    let Some(aim) = origin.filter(Pose::is_valid) else {
        log::warn!("Trigger without a valid aim pose, shot dropped");
        return Err(GameError::MissingAimOrigin);
    };

    if state.screen == Screen::Inactive {
        return Ok(ShotOutcome::Ignored);
    }
    if let Some(kind) = pressed_target(state, &aim) {
        return press(state, kind);
    }
    fire(state, &aim).map(ShotOutcome::Fired)
}

/// Screen tap: same as a trigger from the camera, but only shoots while a
/// bullet can do something (playing, or picking a mode)
pub fn tap(state: &mut GameState) -> Result<ShotOutcome, GameError> {
    let aim = state.player;
    if !aim.is_valid() {
        return Err(GameError::MissingAimOrigin);
    }

    if let Some(kind) = pressed_target(state, &aim) {
        return press(state, kind);
    }
    match state.screen {
        Screen::Playing | Screen::ModeSelect => fire(state, &aim).map(ShotOutcome::Fired),
        _ => Ok(ShotOutcome::Ignored),
    }
}

impl GameState {
    /// See [`trigger`]
    pub fn trigger(&mut self, origin: Option<Pose>) -> Result<ShotOutcome, GameError> {
        trigger(self, origin)
    }

    /// See [`tap`]
    pub fn tap(&mut self) -> Result<ShotOutcome, GameError> {
        tap(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::mode::GameMode;
    use crate::sim::screen::ScreenInput;
    use glam::{Quat, Vec3};

    fn title_with_buttons() -> GameState {
        let mut state = GameState::new(5);
        state.session_ready().unwrap();
        state.set_hit_target(HitTargetKind::Start, Vec3::new(0.0, 0.0, -2.0));
        for (i, mode) in GameMode::ALL.into_iter().enumerate() {
            state.set_hit_target(
                HitTargetKind::Mode(mode),
                Vec3::new(i as f32 - 1.0, 0.0, -2.0),
            );
        }
        state.set_hit_target(HitTargetKind::Restart, Vec3::new(0.0, 0.0, -2.0));
        state.drain_events();
        state
    }

    #[test]
    fn test_missing_origin() {
        let mut state = title_with_buttons();
        assert_eq!(state.trigger(None), Err(GameError::MissingAimOrigin));
        let bad = Pose::new(Vec3::ZERO, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(state.trigger(Some(bad)), Err(GameError::MissingAimOrigin));
        assert_eq!(state.store.live_bullets(), 0);
    }

    #[test]
    fn test_trigger_presses_start() {
        let mut state = title_with_buttons();
        let outcome = state.trigger(Some(Pose::IDENTITY)).unwrap();
        assert_eq!(outcome, ShotOutcome::Pressed(HitTargetKind::Start));
        assert_eq!(state.screen, Screen::ModeSelect);
        assert_eq!(state.store.live_bullets(), 0);
    }

    #[test]
    fn test_trigger_cannot_select_mode() {
        let mut state = title_with_buttons();
        state.apply(ScreenInput::Start).unwrap();

        // Aimed straight at the survival button
        let aim = Pose::looking(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        let outcome = state.trigger(Some(aim)).unwrap();
        assert!(matches!(outcome, ShotOutcome::Fired(_)));
        assert_eq!(state.screen, Screen::ModeSelect);
        assert_eq!(state.store.live_bullets(), 1);
    }

    #[test]
    fn test_trigger_off_target_fires() {
        let mut state = title_with_buttons();
        let aim = Pose::looking(Vec3::ZERO, Vec3::X);
        let outcome = state.trigger(Some(aim)).unwrap();
        let ShotOutcome::Fired(id) = outcome else {
            panic!("expected a shot, got {:?}", outcome);
        };
        assert_eq!(state.screen, Screen::Title);
        let events = state.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::BulletFired { bullet_id, .. }] if *bullet_id == id
        ));
    }

    #[test]
    fn test_trigger_ignored_before_session() {
        let mut state = GameState::new(5);
        assert_eq!(state.trigger(Some(Pose::IDENTITY)), Ok(ShotOutcome::Ignored));
        assert_eq!(state.store.live_bullets(), 0);
    }

    #[test]
    fn test_restart_press() {
        let mut state = title_with_buttons();
        state.apply(ScreenInput::Start).unwrap();
        state.apply(ScreenInput::ChooseMode(GameMode::Classic)).unwrap();
        state.apply(ScreenInput::Finish).unwrap();
        assert_eq!(
            state.tap(),
            Ok(ShotOutcome::Pressed(HitTargetKind::Restart))
        );
        assert_eq!(state.screen, Screen::ModeSelect);
    }

    #[test]
    fn test_tap_fires_only_when_useful() {
        let mut state = title_with_buttons();
        // Look away from the start button
        state.player = Pose::looking(Vec3::ZERO, Vec3::Y);
        assert_eq!(state.tap(), Ok(ShotOutcome::Ignored));

        state.apply(ScreenInput::Start).unwrap();
        assert!(matches!(state.tap(), Ok(ShotOutcome::Fired(_))));

        state.apply(ScreenInput::ChooseMode(GameMode::Survival)).unwrap();
        assert!(matches!(state.tap(), Ok(ShotOutcome::Fired(_))));
    }

    #[test]
    fn test_bullet_cap() {
        let settings = Settings {
            max_bullets: 2,
            ..Settings::default()
        };
        let mut state = GameState::with_settings(5, settings);
        state.session_ready().unwrap();
        let aim = Some(Pose::looking(Vec3::ZERO, Vec3::X));
        assert!(state.trigger(aim).is_ok());
        assert!(state.trigger(aim).is_ok());
        assert_eq!(state.trigger(aim), Err(GameError::BulletLimit(2)));
        assert_eq!(state.physics().body_count(), 2);
    }
}
