pub mod board;
pub mod cli_renderer;
pub mod config;
pub mod entity;
pub mod frame;
pub mod input;
pub mod renderer;
pub mod session;

pub use board::{Board, Collision, GameState};
pub use cli_renderer::{CliInput, CliRenderer};
pub use config::GameConfig;
pub use entity::{Direction, Position};
pub use frame::render_frame;
pub use input::{spawn_input_thread, Controls};
pub use renderer::{Input, InputSource, Renderer};
pub use session::{run_session, SessionEnd};
