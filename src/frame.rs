use crate::board::Board;
use crate::entity::Position;

pub const BORDER_CHAR: char = '#';
pub const SNAKE_CHAR: char = '@';
pub const APPLE_CHAR: char = 'O';
pub const EMPTY_CHAR: char = ' ';

/// Draws the board as `height + 2` lines of `width + 2` characters, each
/// terminated by `\n`.
///
/// The top border carries the score banner. Grid cell (x, y) lands on
/// column `x + 1`, row `height - y`, so larger `y` is drawn higher up.
/// Apples are drawn after the snake and win any overlap.
pub fn render_frame(board: &Board) -> String {
    let cols = (board.width + 2) as usize;
    let rows = (board.height + 2) as usize;
    let mut grid = vec![vec![EMPTY_CHAR; cols]; rows];

    for x in 0..cols {
        grid[0][x] = BORDER_CHAR;
        grid[rows - 1][x] = BORDER_CHAR;
    }
    for row in grid.iter_mut() {
        row[0] = BORDER_CHAR;
        row[cols - 1] = BORDER_CHAR;
    }

    draw_banner(&mut grid[0], board.score);

    for &segment in &board.snake {
        plot(&mut grid, board, segment, SNAKE_CHAR);
    }
    for &apple in &board.apples {
        plot(&mut grid, board, apple, APPLE_CHAR);
    }

    let mut frame = String::with_capacity(rows * (cols + 1));
    for row in grid {
        frame.extend(row);
        frame.push('\n');
    }
    frame
}

/// Text shown in the middle of the top border.
pub fn score_banner(score: u32) -> String {
    format!(" Score: {} ", score)
}

// Centred on the row; whatever does not fit is clipped on both sides.
fn draw_banner(row: &mut [char], score: u32) {
    let banner: Vec<char> = score_banner(score).chars().collect();
    let start = row.len() as i64 / 2 - banner.len() as i64 / 2;

    for (i, ch) in banner.into_iter().enumerate() {
        let col = start + i as i64;
        if col >= 0 && (col as usize) < row.len() {
            row[col as usize] = ch;
        }
    }
}

fn plot(grid: &mut [Vec<char>], board: &Board, pos: Position, ch: char) {
    if !board.contains(pos) {
        return;
    }
    let row = (board.height - pos.y) as usize;
    let col = (pos.x + 1) as usize;
    grid[row][col] = ch;
}
