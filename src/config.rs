use std::env;
use std::io;
use std::time::Duration;

use log::debug;

pub const WIDTH_VAR: &str = "SNAKE_WIDTH";
pub const HEIGHT_VAR: &str = "SNAKE_HEIGHT";
pub const APPLES_VAR: &str = "SNAKE_APPLES";
pub const TICK_VAR: &str = "SNAKE_TICK_MS";

/// Largest width or height. The bordered frame must still fit in `u16`
/// terminal rows and columns.
pub const MAX_SIDE: i32 = u16::MAX as i32 - 2;

/// Configuration for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Width of the grid, in cells
    pub width: i32,
    /// Height of the grid, in cells
    pub height: i32,
    /// Number of apples on the board at all times
    pub apples: usize,
    /// Real time between two ticks
    pub tick: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 40,
            apples: 5,
            tick: Duration::from_millis(500),
        }
    }
}

impl GameConfig {
    /// Builds a configuration without checking it; see `validate`.
    pub fn new(width: i32, height: i32, apples: usize) -> Self {
        Self {
            width,
            height,
            apples,
            ..Default::default()
        }
    }

    /// Sides must lie in `1..=MAX_SIDE`, there can be at most one apple per
    /// cell, and the tick must be non-zero. Errors name the environment
    /// variable that sets the offending field.
    pub fn validate(&self) -> io::Result<()> {
        check_side(self.width, WIDTH_VAR)?;
        check_side(self.height, HEIGHT_VAR)?;

        let cells = self.width as u64 * self.height as u64;
        if self.apples as u64 > cells {
            return Err(invalid(
                APPLES_VAR,
                &self.apples.to_string(),
                &format!("must be at most {cells} (width * height)"),
            ));
        }

        if self.tick.is_zero() {
            return Err(invalid(TICK_VAR, "0", "must be greater than zero"));
        }

        Ok(())
    }

    /// Reads overrides from `SNAKE_WIDTH`, `SNAKE_HEIGHT`, `SNAKE_APPLES`
    /// and `SNAKE_TICK_MS`. Unset variables keep their default; the result
    /// is validated.
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(width) = parse_positive(&lookup, WIDTH_VAR)? {
            config.width = to_side(width, WIDTH_VAR)?;
        }
        if let Some(height) = parse_positive(&lookup, HEIGHT_VAR)? {
            config.height = to_side(height, HEIGHT_VAR)?;
        }
        if let Some(apples) = parse_positive(&lookup, APPLES_VAR)? {
            config.apples = usize::try_from(apples)
                .map_err(|e| invalid(APPLES_VAR, &apples.to_string(), &e.to_string()))?;
        }
        if let Some(tick) = parse_positive(&lookup, TICK_VAR)? {
            config.tick = Duration::from_millis(tick);
        }

        config.validate()?;
        debug!("configuration: {:?}", config);
        Ok(config)
    }
}

fn parse_positive<F>(lookup: &F, key: &str) -> io::Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid(key, &raw, "must be greater than zero")),
        Ok(value) => Ok(Some(value)),
        Err(e) => Err(invalid(key, &raw, &e.to_string())),
    }
}

fn to_side(value: u64, key: &str) -> io::Result<i32> {
    if value > MAX_SIDE as u64 {
        return Err(invalid(key, &value.to_string(), &side_reason()));
    }
    Ok(value as i32)
}

fn check_side(side: i32, key: &str) -> io::Result<()> {
    if (1..=MAX_SIDE).contains(&side) {
        Ok(())
    } else {
        Err(invalid(key, &side.to_string(), &side_reason()))
    }
}

fn side_reason() -> String {
    format!("must be between 1 and {MAX_SIDE}")
}

fn invalid(key: &str, raw: &str, reason: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{key}={raw:?}: {reason}"),
    )
}
