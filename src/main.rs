//! AR Shooter headless runner
//!
//! On native targets this replays a scripted session with an autopilot
//! shooter: start, pick a mode, fight until game over, print the board.
//! The browser build is driven through `platform::web` instead.
//!
//! Usage: `ar-shooter [classic|survival|timeattack] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ar_shooter::consts::{BULLET_SPEED, PHYSICS_DT};
    use ar_shooter::platform::init_logging;
    use ar_shooter::sim::{
        GameEvent, GameMode, GameState, HitTargetKind, Pose, Screen, TickContext,
    };
    use ar_shooter::Settings;
    use glam::{Quat, Vec3};

    /// Standing head height
    const HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);
    /// Frame length at 60 fps (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames between autopilot shots
    const FIRE_EVERY: u64 = 12;
    /// Give up after this much simulated time
    const MAX_FRAMES: u64 = 60 * 180;

    /// Aim point that compensates for bullet drop over the flight time
    fn aim_point(state: &GameState, from: Vec3, target: Vec3) -> Vec3 {
        let gravity = state.settings.gravity;
        let flight = from.distance(target) / BULLET_SPEED;
        let flight = (flight / PHYSICS_DT).ceil() * PHYSICS_DT;
        target + Vec3::Y * (0.5 * gravity * flight * flight)
    }

    /// Nearest live enemy to the player
    fn nearest_enemy(state: &GameState) -> Option<Vec3> {
        let player = state.player.position;
        state
            .store
            .enemies()
            .iter()
            .filter(|e| e.alive)
            .map(|e| e.pos)
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)))
    }

    fn place_buttons(state: &mut GameState) {
        let ahead = HEAD + Vec3::new(0.0, 0.0, -1.5);
        state.set_hit_target(HitTargetKind::Start, ahead);
        state.set_hit_target(HitTargetKind::Restart, ahead);
        for (i, mode) in GameMode::ALL.into_iter().enumerate() {
            let x = (i as f32 - 1.0) * 0.8;
            state.set_hit_target(HitTargetKind::Mode(mode), ahead + Vec3::X * x);
        }
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::EnemyHit {
                enemy_id,
                points,
                distance,
                ..
            } => log::info!("Hit enemy {} at {:.2}m (+{})", enemy_id, distance, points),
            GameEvent::PlayerDamaged { hp } => log::info!("Player damaged, hp {}", hp),
            GameEvent::GameOver { score, mode } => {
                log::info!("Game over in {}: {}", mode.name(), score)
            }
            GameEvent::ModeSelected { mode } => log::info!("Mode: {}", mode.description()),
            GameEvent::ScreenChanged { from, to } => log::debug!("{:?} -> {:?}", from, to),
            GameEvent::EnemySpawned { .. } | GameEvent::BulletFired { .. } => {}
        }
    }

    fn advance(state: &mut GameState, now: &mut f64, camera: Pose) {
        *now += FRAME_MS;
        for event in state.tick(&TickContext::new(*now, camera)).events {
            log_event(&event);
        }
    }

    pub fn run() {
        init_logging();

        let mut args = std::env::args().skip(1);
        let mode = args
            .next()
            .map(|s| {
                GameMode::from_str(&s).unwrap_or_else(|| {
                    log::warn!("Unknown mode '{}', using classic", s);
                    GameMode::Classic
                })
            })
            .unwrap_or_default();
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

        log::info!("AR Shooter (headless) starting: {} seed {}", mode.name(), seed);

        let mut state = GameState::with_settings(seed, Settings::load());
        place_buttons(&mut state);
        let mut now = 0.0;
        let mut frame = 0u64;
        let camera = Pose::new(HEAD, Quat::IDENTITY);

        if let Err(e) = state.session_ready() {
            log::error!("{}", e);
            return;
        }
        advance(&mut state, &mut now, camera);

        // Title: press start straight ahead
        if let Err(e) = state.trigger(Some(camera)) {
            log::error!("Start press failed: {}", e);
        }

        // Mode select: shoot the chosen button
        let button = state
            .targets
            .iter()
            .find(|t| t.kind == HitTargetKind::Mode(mode))
            .map(|t| t.position);
        if let Some(button) = button {
            let aim = Pose::looking(HEAD, aim_point(&state, HEAD, button) - HEAD);
            if let Err(e) = state.trigger(Some(aim)) {
                log::error!("Mode shot failed: {}", e);
            }
        }
        while state.screen == Screen::ModeSelect && frame < 120 {
            advance(&mut state, &mut now, camera);
            frame += 1;
        }
        if !state.is_playing() {
            log::error!("Mode button was never hit");
            return;
        }

        frame = 0;
        let mut shots = 0u32;
        while state.is_playing() && frame < MAX_FRAMES {
            if frame % FIRE_EVERY == 0 {
                if let Some(target) = nearest_enemy(&state) {
                    let aim = Pose::looking(HEAD, aim_point(&state, HEAD, target) - HEAD);
                    match state.trigger(Some(aim)) {
                        Ok(_) => shots += 1,
                        Err(e) => log::warn!("{}", e),
                    }
                }
            }
            advance(&mut state, &mut now, camera);
            frame += 1;
        }

        if state.is_playing() {
            log::info!("Time limit reached, ending session");
            if let Err(e) = state.session_ended() {
                log::error!("{}", e);
            }
        }

        println!("\n{} finished after {:.1}s", mode.name(), now / 1000.0);
        println!("Score: {}  HP: {}  Shots: {}", state.session.score, state.session.hp, shots);
        println!("Top scores ({}):", mode.as_str());
        for (rank, score) in state.top_scores(mode, 3).iter().enumerate() {
            println!("  {}. {}", rank + 1, score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
