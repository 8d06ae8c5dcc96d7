use crate::board::Board;
use crate::entity::Direction;
use std::io;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Direction(Direction),
    Quit,
}

/// Trait that abstracts the display sink.
/// The terminal backend and the test recorder both implement it.
pub trait Renderer {
    /// Take over the display
    fn init(&mut self) -> io::Result<()>;

    /// Show the current board
    fn render(&mut self, board: &Board) -> io::Result<()>;

    /// Restore the display to how `init` found it
    fn cleanup(&mut self) -> io::Result<()>;
}

/// Where player input comes from. Polled by the input thread.
pub trait InputSource {
    /// Wait up to `timeout` for the next recognised input
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>>;
}
