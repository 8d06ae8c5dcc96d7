use crate::board::Board;
use crate::entity::Direction;
use crate::frame::{render_frame, APPLE_CHAR, SNAKE_CHAR};
use crate::renderer::{Input, InputSource, Renderer};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;

pub struct CliRenderer {
    stdout: io::Stdout,
    active: bool,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            active: false,
        }
    }

    fn draw_line(&mut self, row: u16, line: &str) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(0, row))?;

        for ch in line.chars() {
            let color = match ch {
                SNAKE_CHAR => Color::Green,
                APPLE_CHAR => Color::Red,
                _ => Color::Reset,
            };
            queue!(self.stdout, SetForegroundColor(color), Print(ch))?;
        }

        Ok(())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        Ok(())
    }

    fn render(&mut self, board: &Board) -> io::Result<()> {
        // Raw mode does not return the carriage on '\n', so place every line
        let frame = render_frame(board);
        for (row, line) in frame.lines().enumerate() {
            let row = u16::try_from(row)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            self.draw_line(row, line)?;
        }

        queue!(self.stdout, ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        execute!(
            self.stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Keyboard input read through crossterm's event queue.
pub struct CliInput;

impl InputSource for CliInput {
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(map_key(key));
            }
        }
        Ok(None)
    }
}

/// Arrow keys steer, Esc quits. Ctrl+C quits too since raw mode
/// swallows the signal.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    match key.code {
        KeyCode::Up => Some(Input::Direction(Direction::Up)),
        KeyCode::Right => Some(Input::Direction(Direction::Right)),
        KeyCode::Down => Some(Input::Direction(Direction::Down)),
        KeyCode::Left => Some(Input::Direction(Direction::Left)),
        KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(map_key(press(KeyCode::Up)), Some(Input::Direction(Direction::Up)));
        assert_eq!(map_key(press(KeyCode::Right)), Some(Input::Direction(Direction::Right)));
        assert_eq!(map_key(press(KeyCode::Down)), Some(Input::Direction(Direction::Down)));
        assert_eq!(map_key(press(KeyCode::Left)), Some(Input::Direction(Direction::Left)));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Input::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(Input::Quit));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(map_key(press(KeyCode::Char('w'))), None);
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
        assert_eq!(map_key(press(KeyCode::Enter)), None);
    }

    #[test]
    fn test_release_ignored() {
        let release = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn test_cleanup_without_init_is_noop() {
        let mut renderer = CliRenderer::new();
        assert!(renderer.cleanup().is_ok());
    }
}
