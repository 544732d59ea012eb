//! Terminal demo: runs a simulation locally and prints each frame.
//!
//! A metal shelf catches a stream of sand, water pours from the right and a
//! drop of acid eats through the shelf. Speed is the number of ticks per frame,
//! given as the first argument.

use std::time::Duration;
use log::{error, info};

use falling_sand::config::simulation::{DEMO_FRAMES, FRAME_INTERVAL_MS};
use falling_sand::sim::render::print_grid;
use falling_sand::sim::{Engine, Material, SimResult, ThreadDice};

const ROWS: i32 = 24;
const COLS: i32 = 48;
const DEFAULT_SPEED: u32 = 400;

/// Lay out the starting scene.
fn build_scene(engine: &mut Engine<ThreadDice>) -> SimResult<()> {
    for col in 8..40 {
        engine.paint(14, col, Material::Metal)?;
    }
    for col in 30..34 {
        engine.paint(20, col, Material::Magma)?;
    }
    for col in 26..29 {
        engine.paint(12, col, Material::Oil)?;
    }
    engine.paint(0, 20, Material::Acid)?;
    Ok(())
}

/// Emit new particles each frame, like a user holding the mouse down.
fn pour(engine: &mut Engine<ThreadDice>) -> SimResult<()> {
    engine.apply_tool(0, 12, "Sand")?;
    engine.apply_tool(0, 13, "Sand")?;
    engine.apply_tool(0, COLS - 6, "Water")?;
    Ok(())
}

async fn run(speed: u32) -> SimResult<()> {
    let mut engine = Engine::new(ROWS, COLS)?;
    build_scene(&mut engine)?;

    let mut frame_timer = tokio::time::interval(Duration::from_millis(FRAME_INTERVAL_MS * 3));
    for _ in 0..DEMO_FRAMES {
        frame_timer.tick().await;
        pour(&mut engine)?;
        engine.advance(speed);
        print!("\x1b[2J\x1b[H");
        print_grid(engine.grid(), engine.generation());
    }

    info!(
        "Demo finished: generation={} sand={} water={} metal={}",
        engine.generation(),
        engine.grid().count(Material::Sand),
        engine.grid().count(Material::Water),
        engine.grid().count(Material::Metal),
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let speed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_SPEED);

    if let Err(e) = run(speed).await {
        error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}
