//! Maze grid ownership and perfect-maze generation.

use log::{debug, info, warn};
use maze_escape_core::{
    Cell, CellCoord, MazeView, WallSide, DEFAULT_MAZE_HEIGHT, DEFAULT_MAZE_WIDTH,
};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Order in which the end cell looks for an already carved neighbour to open towards.
const END_INTERIOR_ORDER: [WallSide; 4] = [
    WallSide::Top,
    WallSide::Bottom,
    WallSide::Left,
    WallSide::Right,
];

/// Order in which the end cell falls back to opening one of its outer walls.
const END_BOUNDARY_ORDER: [WallSide; 4] = [
    WallSide::Bottom,
    WallSide::Right,
    WallSide::Top,
    WallSide::Left,
];

/// Start and end cells chosen by a generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Cell the carving started from; carries the start marker.
    pub start: CellCoord,
    /// Cell carrying the end marker.
    pub end: CellCoord,
}

/// Rectangular grid of cells that owns its own random source.
///
/// The dimensions are fixed for the lifetime of the maze. Every generation
/// pass resets the grid before carving, so a maze may be regenerated any
/// number of times.
#[derive(Clone, Debug)]
pub struct Maze {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    rng: ChaCha8Rng,
}

impl Maze {
    /// Creates a fully walled maze of the requested size.
    ///
    /// Non-positive dimensions are replaced with the default 10x10 grid and a
    /// warning is logged. The random source is seeded from `seed`, so equal
    /// seeds reproduce equal layouts.
    #[must_use]
    pub fn new(width: i32, height: i32, seed: u64) -> Self {
        let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(width), Ok(height)) if width > 0 && height > 0 => (width, height),
            _ => {
                warn!(
                    "invalid maze dimensions {width}x{height}, defaulting to \
                     {DEFAULT_MAZE_WIDTH}x{DEFAULT_MAZE_HEIGHT}"
                );
                (DEFAULT_MAZE_WIDTH, DEFAULT_MAZE_HEIGHT)
            }
        };

        let capacity = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); capacity],
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Read-only view over the grid.
    #[must_use]
    pub fn view(&self) -> MazeView<'_> {
        MazeView::new(&self.cells, self.width, self.height)
    }

    /// Returns the cell at the coordinate, or [`Cell::SOLID`] outside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Cell {
        self.view().cell(cell)
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.view().contains(cell)
    }

    /// Coordinate of the cell carrying the start marker, if any.
    #[must_use]
    pub fn start_cell(&self) -> Option<CellCoord> {
        self.view().start_cell()
    }

    /// Coordinate of the cell carrying the end marker, if any.
    #[must_use]
    pub fn end_cell(&self) -> Option<CellCoord> {
        self.view().end_cell()
    }

    /// Carves a perfect maze using a randomized depth-first backtracker.
    ///
    /// The walk runs on an explicit stack, so grid size is not bounded by the
    /// call stack. Start coordinates outside the grid are replaced by the
    /// origin with a warning. The end cell is the corner opposite the origin,
    /// shifted by one cell when it would coincide with the start.
    pub fn generate(&mut self, start: CellCoord) -> Layout {
        let start = if self.contains(start) {
            start
        } else {
            warn!("generation start {start} is outside the maze, using (0, 0)");
            CellCoord::new(0, 0)
        };

        debug!("resetting {}x{} grid before carving", self.width, self.height);
        self.cells.fill(Cell::default());

        let end = self.end_cell_for(start);
        self.update(start, |cell| {
            cell.set_start(true);
            cell.set_visited(true);
        });
        self.update(end, |cell| cell.set_end(true));

        self.carve_from(start);
        self.open_to_outside(start);
        self.open_end(end);

        info!(
            "maze generation complete ({}x{}, start {start}, end {end})",
            self.width, self.height
        );
        Layout { start, end }
    }

    /// Moves the start marker onto the provided cell.
    ///
    /// Returns `false` and leaves the grid untouched when the cell lies outside
    /// the maze.
    pub fn set_start_cell(&mut self, target: CellCoord) -> bool {
        if !self.contains(target) {
            warn!("start cell {target} is outside the maze, ignoring");
            return false;
        }

        for cell in &mut self.cells {
            cell.set_start(false);
        }
        self.update(target, |cell| cell.set_start(true));
        true
    }

    /// Moves the end marker onto the provided cell.
    ///
    /// Returns `false` and leaves the grid untouched when the cell lies outside
    /// the maze.
    pub fn set_end_cell(&mut self, target: CellCoord) -> bool {
        if !self.contains(target) {
            warn!("end cell {target} is outside the maze, ignoring");
            return false;
        }

        for cell in &mut self.cells {
            cell.set_end(false);
        }
        self.update(target, |cell| cell.set_end(true));
        true
    }

    fn end_cell_for(&self, start: CellCoord) -> CellCoord {
        let last_column = self.width as i32 - 1;
        let last_row = self.height as i32 - 1;
        let corner = CellCoord::new(last_column, last_row);
        if corner != start {
            return corner;
        }

        if self.width > 1 {
            CellCoord::new(last_column - 1, last_row)
        } else if self.height > 1 {
            CellCoord::new(last_column, last_row - 1)
        } else {
            corner
        }
    }

    fn carve_from(&mut self, start: CellCoord) {
        let mut stack = vec![start];
        let mut candidates: Vec<WallSide> = Vec::with_capacity(WallSide::ALL.len());

        while let Some(&current) = stack.last() {
            candidates.clear();
            for side in WallSide::ALL {
                let neighbor = current.neighbor(side);
                if self.contains(neighbor) && !self.cell(neighbor).visited() {
                    candidates.push(side);
                }
            }

            match candidates.choose(&mut self.rng).copied() {
                Some(side) => {
                    let next = current.neighbor(side);
                    self.remove_wall_between(current, side);
                    self.update(next, |cell| cell.set_visited(true));
                    stack.push(next);
                }
                None => {
                    let _ = stack.pop();
                }
            }
        }
    }

    fn remove_wall_between(&mut self, cell: CellCoord, side: WallSide) {
        self.update(cell, |current| current.set_wall(side, false));
        self.update(cell.neighbor(side), |neighbor| {
            neighbor.set_wall(side.opposite(), false)
        });
    }

    fn open_to_outside(&mut self, cell: CellCoord) {
        for side in WallSide::ALL {
            if self.on_boundary(cell, side) {
                self.update(cell, |current| current.set_wall(side, false));
            }
        }
    }

    fn open_end(&mut self, end: CellCoord) {
        let interior = END_INTERIOR_ORDER.into_iter().find(|side| {
            let neighbor = end.neighbor(*side);
            self.contains(neighbor) && !self.cell(neighbor).has_wall(side.opposite())
        });

        let side = interior.or_else(|| {
            END_BOUNDARY_ORDER
                .into_iter()
                .find(|side| self.on_boundary(end, *side))
        });

        if let Some(side) = side {
            self.update(end, |cell| cell.set_wall(side, false));
        }
    }

    fn on_boundary(&self, cell: CellCoord, side: WallSide) -> bool {
        self.contains(cell) && !self.contains(cell.neighbor(side))
    }

    fn update<F>(&mut self, cell: CellCoord, apply: F)
    where
        F: FnOnce(&mut Cell),
    {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                apply(slot);
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let column = usize::try_from(cell.column()).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}
