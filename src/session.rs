use crate::board::{Board, Collision, GameState};
use crate::input::Controls;
use crate::renderer::Renderer;
use log::info;
use std::io;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Died(Collision),
    Quit,
}

/// Drives one game: shows the board, waits for the first direction, then
/// ticks every `tick` until the snake dies or the player quits.
///
/// Quit is checked after each tick's render, so the last frame always
/// reflects the final board.
pub fn run_session<R: Renderer>(
    board: &mut Board,
    renderer: &mut R,
    controls: &Controls,
    tick: Duration,
) -> io::Result<SessionEnd> {
    renderer.render(board)?;

    if controls.wait_for_direction().is_none() {
        info!("quit before the first move");
        return Ok(SessionEnd::Quit);
    }
    info!("game started on a {}x{} board", board.width, board.height);

    loop {
        thread::sleep(tick);

        let Some(direction) = controls.direction() else {
            continue;
        };
        let state = board.advance(direction);
        renderer.render(board)?;

        if let GameState::Dead(collision) = state {
            info!("game over ({:?}), score {}", collision, board.score);
            return Ok(SessionEnd::Died(collision));
        }
        if !controls.is_running() {
            info!("game stopped by player, score {}", board.score);
            return Ok(SessionEnd::Quit);
        }
    }
}
