#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wraptrail puzzle.
//!
//! This crate defines the vocabulary that connects the level generator, the
//! authoritative traversal state, and presentation adapters. The generator
//! produces an immutable [`PathDescription`], the traversal crate owns a
//! working copy of its [`VisitGrid`] and executes [`Command`] values against
//! it, then reports [`Event`] values describing what happened. Every grid is
//! toroidal: stepping off one edge re-enters on the opposite edge.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted width or height of a grid.
pub const MAX_GRID_EXTENT: u32 = 255;

/// Visit count at which a cell is saturated and blocks further generation steps.
pub const SATURATED_VISITS: u8 = 3;

/// Default number of walks attempted when generating a level.
pub const DEFAULT_ATTEMPTS: u32 = 15;

const DEFAULT_ATTEMPT_COUNT: NonZeroU32 = match NonZeroU32::new(DEFAULT_ATTEMPTS) {
    Some(attempts) => attempts,
    None => panic!("default attempt count must be non-zero"),
};

const DEFAULT_WIDTH: u32 = 4;
const DEFAULT_HEIGHT: u32 = 3;
const DEFAULT_TARGET_LENGTH: u32 = 12;

/// Cardinal movement directions available to the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction, in the order the generator draws them.
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Column and row offsets applied by a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Cell where every walk and every traversal attempt begins.
    pub const ORIGIN: CellCoord = CellCoord::new(0, 0);

    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Validated dimensions of a toroidal grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Validates the provided dimensions.
    ///
    /// Both extents must lie within `1..=MAX_GRID_EXTENT`.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        for (axis, extent) in [(Axis::Width, width), (Axis::Height, height)] {
            if extent == 0 {
                return Err(ConfigError::ZeroExtent { axis });
            }
            if extent > MAX_GRID_EXTENT {
                return Err(ConfigError::ExtentTooLarge { axis, extent });
            }
        }

        Ok(Self { width, height })
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

    /// Total number of cells in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Folds an arbitrary coordinate back into the grid bounds.
    #[must_use]
    pub const fn wrap(&self, cell: CellCoord) -> CellCoord {
        CellCoord::new(cell.column % self.width, cell.row % self.height)
    }

    /// Cell reached by stepping once from `cell` in `direction`, wrapping on both axes.
    #[must_use]
    pub fn step(&self, cell: CellCoord, direction: Direction) -> CellCoord {
        let cell = self.wrap(cell);
        let (column_delta, row_delta) = direction.offset();
        CellCoord::new(
            wrap_axis(cell.column, column_delta, self.width),
            wrap_axis(cell.row, row_delta, self.height),
        )
    }

    /// The four toroidal neighbours of `cell`, ordered as [`Direction::ALL`].
    #[must_use]
    pub fn neighbors(&self, cell: CellCoord) -> [CellCoord; 4] {
        Direction::ALL.map(|direction| self.step(cell, direction))
    }

    /// Row-major storage index of the wrapped cell.
    #[must_use]
    pub const fn index_of(&self, cell: CellCoord) -> usize {
        let cell = self.wrap(cell);
        cell.row as usize * self.width as usize + cell.column as usize
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let width = self.width;
        (0..self.height)
            .flat_map(move |row| (0..width).map(move |column| CellCoord::new(column, row)))
    }
}

// Adds the extent before taking the modulo so a step below zero wraps to the far edge.
fn wrap_axis(value: u32, delta: i8, extent: u32) -> u32 {
    let shifted = i64::from(value) + i64::from(extent) + i64::from(delta);
    (shifted % i64::from(extent)) as u32
}

/// Rectangular grid of per-cell visit counters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitGrid {
    size: GridSize,
    cells: Vec<u8>,
}

impl VisitGrid {
    /// Creates a grid whose cells all hold zero visits.
    #[must_use]
    pub fn zeroed(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![0; size.cell_count()],
        }
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Visit count stored at the wrapped cell.
    #[must_use]
    pub fn visits(&self, cell: CellCoord) -> u8 {
        self.cells[self.size.index_of(cell)]
    }

    /// Returns `true` when the cell reached [`SATURATED_VISITS`].
    #[must_use]
    pub fn is_saturated(&self, cell: CellCoord) -> bool {
        self.visits(cell) >= SATURATED_VISITS
    }

    /// Records one more visit of the cell and returns the new count.
    pub fn add_visit(&mut self, cell: CellCoord) -> u8 {
        let slot = &mut self.cells[self.size.index_of(cell)];
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Consumes one visit from the cell.
    ///
    /// Returns the remaining count, or `None` without touching the grid when
    /// the cell has no visits left.
    pub fn remove_visit(&mut self, cell: CellCoord) -> Option<u8> {
        let slot = &mut self.cells[self.size.index_of(cell)];
        let remaining = slot.checked_sub(1)?;
        *slot = remaining;
        Some(remaining)
    }

    /// Sum of every cell's visit count.
    #[must_use]
    pub fn total_visits(&self) -> u32 {
        self.cells.iter().map(|&count| u32::from(count)).sum()
    }

    /// Raw row-major counters.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

/// Immutable description of a generated level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathDescription {
    grid: VisitGrid,
    route: Vec<Direction>,
}

impl PathDescription {
    /// Wraps a generated grid together with the route that produced it.
    ///
    /// The grid must hold exactly one visit per route step, since
    /// [`PathDescription::length`] counts the route and the traversal
    /// completes once that many visits are consumed.
    #[must_use]
    pub fn new(grid: VisitGrid, route: Vec<Direction>) -> Self {
        debug_assert_eq!(
            grid.total_visits(),
            route.len() as u32,
            "grid visits disagree with the route length"
        );
        Self { grid, route }
    }

    /// Builds the description obtained by walking `route` from the origin.
    #[must_use]
    pub fn from_route(size: GridSize, route: &[Direction]) -> Self {
        let mut grid = VisitGrid::zeroed(size);
        let mut cursor = CellCoord::ORIGIN;
        for &direction in route {
            cursor = size.step(cursor, direction);
            let _ = grid.add_visit(cursor);
        }
        Self::new(grid, route.to_vec())
    }

    /// Visit counts the player must consume.
    #[must_use]
    pub const fn grid(&self) -> &VisitGrid {
        &self.grid
    }

    /// Dimensions of the level.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.grid.size
    }

    /// Number of forward steps the generator achieved.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.route.len() as u32
    }

    /// Directions that retrace the generated path from the origin.
    #[must_use]
    pub fn route(&self) -> &[Direction] {
        &self.route
    }

    /// Returns `true` when the level has nothing to traverse.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }
}

/// Lifecycle of a traversal attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    /// The player is still consuming path cells.
    Playing,
    /// Every path step was consumed; no further input is processed.
    Completed,
}

/// Commands that express all permissible traversal mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Moves the cursor a single cell in the provided direction.
    Move {
        /// Direction of travel.
        direction: Direction,
    },
    /// Tick without directional input.
    Idle,
    /// Requests that the level restart from the origin.
    Restart,
}

/// Reason the traversal returned to the start of the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetCause {
    /// The player entered a cell that had no visits left.
    Overstepped {
        /// Cell whose allowance was already spent.
        cell: CellCoord,
    },
    /// The player asked for a restart.
    Requested,
}

/// Events reported by the traversal after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that the cursor consumed a visit from a new cell.
    CursorMoved {
        /// Cell the cursor occupied before moving.
        from: CellCoord,
        /// Cell the cursor occupies after moving.
        to: CellCoord,
        /// Visits left on the destination cell after the move.
        remaining: u8,
    },
    /// Announces that cursor, progress and grid returned to their initial values.
    LevelReset {
        /// What triggered the reset.
        cause: ResetCause,
    },
    /// Announces that the traversal consumed every step of the path.
    LevelCompleted {
        /// Steps taken since the last reset.
        steps: u32,
    },
}

/// Grid axis referenced by configuration errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal extent.
    Width,
    /// Vertical extent.
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Width => f.write_str("width"),
            Self::Height => f.write_str("height"),
        }
    }
}

/// Errors raised when level parameters cannot produce a well-defined grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A grid extent was zero.
    #[error("grid {axis} must be at least 1")]
    ZeroExtent {
        /// Offending axis.
        axis: Axis,
    },
    /// A grid extent exceeded [`MAX_GRID_EXTENT`].
    #[error("grid {axis} must be at most {max} (received {extent})", max = MAX_GRID_EXTENT)]
    ExtentTooLarge {
        /// Offending axis.
        axis: Axis,
        /// Rejected extent.
        extent: u32,
    },
    /// The generator was asked to make no attempts.
    #[error("generator needs at least one attempt")]
    ZeroAttempts,
}

/// User-facing level parameters, typically loaded from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    /// Number of grid columns.
    pub width: u32,
    /// Number of grid rows.
    pub height: u32,
    /// Desired number of path steps.
    pub target_length: u32,
    /// Number of walks the generator tries before keeping the longest.
    pub attempts: u32,
    /// Seed for reproducible generation; entropy is used when absent.
    pub seed: Option<u64>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            target_length: DEFAULT_TARGET_LENGTH,
            attempts: DEFAULT_ATTEMPTS,
            seed: None,
        }
    }
}

impl LevelConfig {
    /// Checks the parameters and converts them into generator settings.
    pub fn validate(&self) -> Result<GeneratorSettings, ConfigError> {
        let size = GridSize::new(self.width, self.height)?;
        let attempts = NonZeroU32::new(self.attempts).ok_or(ConfigError::ZeroAttempts)?;
        Ok(GeneratorSettings {
            size,
            target_length: self.target_length,
            attempts,
        })
    }
}

/// Validated parameters consumed by the level generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorSettings {
    size: GridSize,
    target_length: u32,
    attempts: NonZeroU32,
}

impl GeneratorSettings {
    /// Creates settings for the given grid using the default attempt count.
    #[must_use]
    pub fn new(size: GridSize, target_length: u32) -> Self {
        Self {
            size,
            target_length,
            attempts: DEFAULT_ATTEMPT_COUNT,
        }
    }

    /// Overrides the number of generation attempts.
    #[must_use]
    pub const fn with_attempts(mut self, attempts: NonZeroU32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Dimensions of the generated grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Desired number of path steps.
    #[must_use]
    pub const fn target_length(&self) -> u32 {
        self.target_length
    }

    /// Number of walks attempted.
    #[must_use]
    pub const fn attempts(&self) -> NonZeroU32 {
        self.attempts
    }
}
