//! Plain-text maze dump used by console adapters and debugging.

use std::fmt::Write as _;

use maze_escape_core::{Cell, CellCoord, MazeView, WallSide};

const LEGEND: &str = "legend: + post, --- or | wall, S start, E end, @ player";

/// Legend line describing the glyphs produced by [`render`].
#[must_use]
pub const fn legend() -> &'static str {
    LEGEND
}

/// Renders the maze as text, one wall line and one content line per row.
///
/// The player marker takes precedence over the start and end markers.
#[must_use]
pub fn render(view: &MazeView<'_>, player: Option<CellCoord>) -> String {
    let width = view.width() as i32;
    let height = view.height() as i32;
    let mut out = String::new();

    for row in 0..height {
        horizontal_line(&mut out, view, row, WallSide::Top);

        for column in 0..width {
            let coord = CellCoord::new(column, row);
            let cell = view.cell(coord);
            out.push(if cell.wall_left() { '|' } else { ' ' });
            let _ = write!(out, " {} ", glyph(coord, cell, player));
        }
        let last = view.cell(CellCoord::new(width - 1, row));
        out.push(if last.wall_right() { '|' } else { ' ' });
        out.push('\n');
    }

    horizontal_line(&mut out, view, height - 1, WallSide::Bottom);
    out
}

fn horizontal_line(out: &mut String, view: &MazeView<'_>, row: i32, side: WallSide) {
    out.push('+');
    for column in 0..view.width() as i32 {
        let closed = view.cell(CellCoord::new(column, row)).has_wall(side);
        out.push_str(if closed { "---+" } else { "   +" });
    }
    out.push('\n');
}

fn glyph(coord: CellCoord, cell: Cell, player: Option<CellCoord>) -> char {
    if player == Some(coord) {
        '@'
    } else if cell.is_start() {
        'S'
    } else if cell.is_end() {
        'E'
    } else {
        ' '
    }
}
