use crate::config::{GameConfig, MAX_SIDE};
use crate::entity::{Direction, Position};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What killed the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfBite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Dead(Collision),
}

impl GameState {
    pub fn is_alive(&self) -> bool {
        *self == GameState::Playing
    }
}

/// The authoritative game state.
///
/// The snake's head is `snake[0]`. Apples may overlap each other or the
/// snake; their count never changes.
#[derive(Debug, Clone)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub snake: Vec<Position>,
    pub apples: Vec<Position>,
    pub score: u32,
    pub state: GameState,
    rng: StdRng,
}

impl Board {
    /// Out-of-range configurations are clamped rather than rejected: sides
    /// into `1..=MAX_SIDE`, apples to one per cell. Use
    /// `GameConfig::validate` to report them instead.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as `new`, but apple placement is reproducible.
    pub fn seeded(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, rng: StdRng) -> Self {
        let width = config.width.clamp(1, MAX_SIDE);
        let height = config.height.clamp(1, MAX_SIDE);
        let apples = config.apples.min(width as usize * height as usize);

        let mut board = Self {
            width,
            height,
            snake: vec![Position::new(width / 2, height / 2)],
            apples: Vec::with_capacity(apples),
            score: 0,
            state: GameState::Playing,
            rng,
        };

        for _ in 0..apples {
            let apple = board.random_cell();
            board.apples.push(apple);
        }

        board
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Runs one tick. A tick that kills the snake leaves the snake, apples
    /// and score untouched; a dead board ignores further ticks.
    pub fn advance(&mut self, direction: Direction) -> GameState {
        if !self.state.is_alive() {
            return self.state;
        }

        let new_head = self.next_head(direction);
        if !self.contains(new_head) {
            return self.die(Collision::Wall);
        }

        // Growth follows the score as it stood before this tick's apples.
        let target_len = self.score as usize + 1;
        let freed = self.snake[self.snake.len() - 1];

        // Follow the leader: every segment takes the cell ahead of it.
        let mut next = Vec::with_capacity(self.snake.len() + 1);
        next.push(new_head);
        next.extend_from_slice(&self.snake[..self.snake.len() - 1]);

        if next[1..].contains(&new_head) {
            return self.die(Collision::SelfBite);
        }

        if target_len > self.snake.len() {
            if freed == new_head {
                return self.die(Collision::SelfBite);
            }
            next.push(freed);
        }

        let eaten = self.eat_apples(new_head);
        self.snake = next;

        debug!(
            "tick {:?}: head ({}, {}), length {}, score {}{}",
            direction,
            new_head.x,
            new_head.y,
            self.snake.len(),
            self.score,
            if eaten > 0 { " (ate)" } else { "" }
        );

        self.state
    }

    /// The cell the head moves to. Heading into the neck keeps the snake
    /// going straight instead.
    fn next_head(&self, direction: Direction) -> Position {
        let head = self.head();
        let candidate = head.moved(direction);

        if self.snake.len() > 1 && candidate == self.snake[1] {
            head.moved(direction.opposite())
        } else {
            candidate
        }
    }

    fn eat_apples(&mut self, head: Position) -> u32 {
        let mut eaten = 0;

        for i in 0..self.apples.len() {
            if self.apples[i] == head {
                eaten += 1;
                let respawn = self.random_cell();
                self.apples[i] = respawn;
                debug!(
                    "apple eaten at ({}, {}), respawned at ({}, {})",
                    head.x, head.y, self.apples[i].x, self.apples[i].y
                );
            }
        }

        self.score += eaten;
        eaten
    }

    fn random_cell(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.width);
        let y = self.rng.gen_range(0..self.height);
        Position::new(x, y)
    }

    fn die(&mut self, collision: Collision) -> GameState {
        debug!(
            "snake died ({:?}) at length {} with score {}",
            collision,
            self.snake.len(),
            self.score
        );
        self.state = GameState::Dead(collision);
        self.state
    }
}
