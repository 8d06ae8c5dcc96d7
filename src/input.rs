use crate::entity::Direction;
use crate::renderer::{Input, InputSource};
use log::{debug, info, warn};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long the input thread blocks before re-checking the running flag.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// State shared between the input thread and the game loop.
///
/// The direction slot holds only the newest direction: a change that the
/// game loop has not read yet is simply overwritten.
#[derive(Debug)]
pub struct Controls {
    direction: Mutex<Option<Direction>>,
    changed: Condvar,
    running: AtomicBool,
}

impl Controls {
    pub fn new() -> Self {
        Self {
            direction: Mutex::new(None),
            changed: Condvar::new(),
            running: AtomicBool::new(true),
        }
    }

    pub fn set_direction(&self, direction: Direction) {
        *self.slot() = Some(direction);
        self.changed.notify_all();
    }

    /// Latest direction, `None` until the player presses a direction key.
    pub fn direction(&self) -> Option<Direction> {
        *self.slot()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn quit(&self) {
        self.running.store(false, Ordering::Release);
        // Taken so a waiter cannot miss the wakeup between its check and wait
        let _slot = self.slot();
        self.changed.notify_all();
    }

    /// Blocks until the first direction arrives. Returns `None` if quit
    /// was requested first.
    pub fn wait_for_direction(&self) -> Option<Direction> {
        let mut slot = self.slot();
        loop {
            if !self.is_running() {
                return None;
            }
            if let Some(direction) = *slot {
                return Some(direction);
            }
            slot = self
                .changed
                .wait(slot)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Direction>> {
        self.direction.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

/// Feeds `controls` from `source` until quit is requested by either side.
/// A polling error stops the game as well.
pub fn run_input_loop<S: InputSource>(source: &mut S, controls: &Controls) -> io::Result<()> {
    while controls.is_running() {
        match source.poll_input(POLL_INTERVAL) {
            Ok(Some(Input::Direction(direction))) => {
                debug!("direction {:?}", direction);
                controls.set_direction(direction);
            }
            Ok(Some(Input::Quit)) => {
                info!("quit requested");
                controls.quit();
            }
            Ok(None) => {}
            Err(e) => {
                warn!("input polling failed: {}", e);
                controls.quit();
                return Err(e);
            }
        }
    }
    Ok(())
}

pub fn spawn_input_thread<S>(
    mut source: S,
    controls: Arc<Controls>,
) -> io::Result<JoinHandle<io::Result<()>>>
where
    S: InputSource + Send + 'static,
{
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || run_input_loop(&mut source, &controls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed script, then reports nothing forever
    struct Scripted {
        script: VecDeque<io::Result<Option<Input>>>,
        polls: usize,
    }

    impl Scripted {
        fn new(script: Vec<io::Result<Option<Input>>>) -> Self {
            Self {
                script: script.into(),
                polls: 0,
            }
        }
    }

    impl InputSource for Scripted {
        fn poll_input(&mut self, _timeout: Duration) -> io::Result<Option<Input>> {
            self.polls += 1;
            self.script.pop_front().unwrap_or(Ok(None))
        }
    }

    #[test]
    fn test_latest_direction_wins() {
        let controls = Controls::new();
        let mut source = Scripted::new(vec![
            Ok(Some(Input::Direction(Direction::Up))),
            Ok(None),
            Ok(Some(Input::Direction(Direction::Left))),
            Ok(Some(Input::Direction(Direction::Down))),
            Ok(Some(Input::Quit)),
        ]);

        run_input_loop(&mut source, &controls).unwrap();

        assert_eq!(controls.direction(), Some(Direction::Down));
        assert!(!controls.is_running());
        assert_eq!(source.polls, 5);
    }

    #[test]
    fn test_poll_error_stops_game() {
        let controls = Controls::new();
        let mut source = Scripted::new(vec![Err(io::Error::new(io::ErrorKind::Other, "tty gone"))]);

        let err = run_input_loop(&mut source, &controls).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(!controls.is_running());
    }

    #[test]
    fn test_loop_exits_when_game_quits() {
        let controls = Controls::new();
        controls.quit();
        let mut source = Scripted::new(vec![]);

        run_input_loop(&mut source, &controls).unwrap();
        assert_eq!(source.polls, 0);
    }

    #[test]
    fn test_no_direction_before_input() {
        let controls = Controls::new();
        assert_eq!(controls.direction(), None);
        assert!(controls.is_running());
    }

    #[test]
    fn test_wait_wakes_on_direction() {
        let controls = Arc::new(Controls::new());
        let writer = Arc::clone(&controls);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            writer.set_direction(Direction::Right);
        });

        assert_eq!(controls.wait_for_direction(), Some(Direction::Right));
        handle.join().unwrap();
    }

    #[test]
    fn test_wait_wakes_on_quit() {
        let controls = Arc::new(Controls::new());
        let writer = Arc::clone(&controls);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            writer.quit();
        });

        assert_eq!(controls.wait_for_direction(), None);
        handle.join().unwrap();
    }

    #[test]
    fn test_input_thread_feeds_controls() {
        let controls = Arc::new(Controls::new());
        let source = Scripted::new(vec![Ok(Some(Input::Direction(Direction::Left)))]);

        let handle = spawn_input_thread(source, Arc::clone(&controls)).unwrap();

        assert_eq!(controls.wait_for_direction(), Some(Direction::Left));
        controls.quit();
        handle.join().unwrap().unwrap();
    }
}
