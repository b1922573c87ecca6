//! Breakout entry point
//!
//! The browser build starts from `platform::web`. Natively there is no
//! window: this binary plays a seeded game with a simple autopilot and logs
//! what happens, which is handy for eyeballing balance changes.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use breakout::Game;
    use breakout::persistence::MemoryStore;
    use breakout::sim::{GameEvent, GamePhase, TickInput};
    use breakout::tuning::Tuning;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Bad tuning file {} ({}), using defaults", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Can't read {} ({}), using defaults", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    log::info!("Breakout (native) starting, seed {}", seed);
    let mut game = Game::new(MemoryStore::new(), tuning, seed);

    // Ten simulated minutes at 60 Hz
    const FRAME_MS: f32 = 1000.0 / 60.0;
    let mut bricks_broken = 0u32;
    for frame in 0..36_000u32 {
        // Track the ball, slightly off-centre so it doesn't loop forever
        let wobble = ((frame as f32) * 0.013).sin() * game.state.paddle.width * 0.3;
        let input = TickInput {
            pointer_x: Some(game.state.ball.pos.x + wobble),
            ..Default::default()
        };

        for event in game.step(FRAME_MS, &input) {
            match event {
                GameEvent::BrickBroken { .. } => bricks_broken += 1,
                GameEvent::LevelStarted { level } => log::info!("Level {} started", level),
                GameEvent::LifeLost { lives_left } => log::info!("Life lost, {} left", lives_left),
                _ => {}
            }
        }

        if game.state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "level {} | score {} | high score {} | lives {} | bricks broken {}",
        game.state.level,
        game.state.score,
        game.high_score(),
        game.state.lives,
        bricks_broken
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
