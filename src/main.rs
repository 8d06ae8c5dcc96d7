use log::{info, warn};
use std::io;
use std::sync::Arc;
use termsnake::{
    run_session, spawn_input_thread, Board, CliInput, CliRenderer, Controls, GameConfig,
    Renderer,
};

fn main() -> io::Result<()> {
    pretty_env_logger::init();

    // Bad overrides are reported before the terminal is taken over
    let config = GameConfig::from_env()?;
    info!(
        "starting {}x{} game with {} apples, {:?} per tick",
        config.width, config.height, config.apples, config.tick
    );

    let mut board = Board::new(&config);
    let controls = Arc::new(Controls::new());
    let mut renderer = CliRenderer::new();

    renderer.init()?;
    let input = spawn_input_thread(CliInput, Arc::clone(&controls))?;

    let result = run_session(&mut board, &mut renderer, &controls, config.tick);

    controls.quit();
    match input.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("input thread failed: {}", e),
        Err(_) => warn!("input thread panicked"),
    }

    renderer.cleanup()?;
    let end = result?;
    info!("session ended: {:?}", end);

    println!("Your final score was {}", board.score);
    Ok(())
}
