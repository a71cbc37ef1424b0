//! Delta Defense entry point
//!
//! On wasm32 the page boots through `wasm_main`. Natively there is no
//! window; the binary runs a scripted headless session and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    delta_defense::platform::web::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use delta_defense::consts::SIM_DT;
    use delta_defense::hud::present_hud;
    use delta_defense::platform::headless::{HeadlessSurface, LogHud};
    use delta_defense::renderer::draw_frame;
    use delta_defense::sim::{SimulationLoop, World};
    use delta_defense::{GameOverStats, Settings};

    env_logger::init();
    log::info!("Delta Defense (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let settings = match std::env::var("DELTA_SETTINGS") {
        Ok(json) => match Settings::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("DELTA_SETTINGS: {}", e);
                std::process::exit(2);
            }
        },
        Err(_) => Settings::default(),
    };

    let mut world = World::new(&settings);
    let mut sim = SimulationLoop::new(SIM_DT, settings.max_substeps);
    let mut surface = HeadlessSurface::default();
    let mut hud = LogHud::default();

    // Scripted pilot: fire constantly, sweep left and right every two seconds
    world.input.key_down("Space");
    let frame = 1.0 / 60.0;
    let mut finished: Option<GameOverStats> = None;
    let max_frames = 60 * 120;
    for i in 0..max_frames {
        let sweep_right = (i / 120) % 2 == 0;
        world.input.key_up(if sweep_right { "ArrowLeft" } else { "ArrowRight" });
        world.input.key_down(if sweep_right { "ArrowRight" } else { "ArrowLeft" });

        // Fire is held, so a dead pilot restarts on the same step
        sim.advance(&mut world, frame, |world, report| {
            if finished.is_none() {
                finished = report.finished.as_ref().map(GameOverStats::from);
            }
            draw_frame(world, &mut surface);
            present_hud(world, &mut hud);
        });
        if finished.is_some() {
            break;
        }
    }

    let stats = finished.unwrap_or_else(|| GameOverStats::from(&world.stats));
    println!("\nFrames drawn: {}", surface.frames);
    for line in stats.lines() {
        println!("{}", line);
    }
    println!("{}", stats.score_line());
}
