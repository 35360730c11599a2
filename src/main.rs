//! Slime Hoops entry point
//!
//! The web build is driven from JavaScript through `platform::web`. Natively
//! there is no renderer, so the binary plays a scripted headless match and
//! logs what happens.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Slime Hoops (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use slime_hoops::persistence::snapshot;
    use slime_hoops::platform::{Game, KeyCode, PAUSE_KEY};
    use slime_hoops::sim::{PlayerCount, PlayerId};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Keys held over a span of simulated time
    struct Hold {
        from_ms: f64,
        to_ms: f64,
        keys: &'static [KeyCode],
    }

    const SCRIPT: &[Hold] = &[
        // Player 1 (S) charges fully, player 2 (down arrow) half way
        Hold {
            from_ms: 0.0,
            to_ms: 2000.0,
            keys: &[83],
        },
        Hold {
            from_ms: 500.0,
            to_ms: 1500.0,
            keys: &[40],
        },
        // Player 1 (W) jumps while player 2 (left arrow) walks
        Hold {
            from_ms: 2200.0,
            to_ms: 2300.0,
            keys: &[87],
        },
        Hold {
            from_ms: 2200.0,
            to_ms: 3000.0,
            keys: &[37],
        },
        // Escape mid-flight, then again to carry on
        Hold {
            from_ms: 2400.0,
            to_ms: 2450.0,
            keys: &[PAUSE_KEY],
        },
        Hold {
            from_ms: 3000.0,
            to_ms: 3050.0,
            keys: &[PAUSE_KEY],
        },
        // Quick tap: a low-power, slow shot
        Hold {
            from_ms: 3200.0,
            to_ms: 3500.0,
            keys: &[83],
        },
    ];

    pub fn run() {
        let mut game = Game::new(2024, PlayerCount::Two);
        let mut now = 0.0;

        while now < 6000.0 {
            let held = |k: KeyCode| {
                SCRIPT
                    .iter()
                    .any(|h| now >= h.from_ms && now < h.to_ms && h.keys.contains(&k))
            };
            if let Err(e) = game.frame(now, held) {
                log::warn!("Skipped frame: {}", e);
            }
            now += FRAME_MS;
        }

        log::info!(
            "Final score: {} - {}",
            game.state.score(PlayerId::One),
            game.state.score(PlayerId::Two)
        );
        snapshot::log_section(&game.state, "players");
        log::info!("Snapshot name: {}", snapshot::file_name(now));
    }
}
