#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural level generation system.
//!
//! A level is the trace of a random walk over a toroidal grid. Each walk
//! starts at the origin and enters one neighbouring cell per step, counting
//! how often every cell was entered. A cell entered [`SATURATED_VISITS`]
//! times can no longer be entered, and a walk surrounded by saturated cells
//! stops early. The generator runs several independent walks and keeps the
//! longest one.

use rand::Rng;
use tracing::{debug, info};
use wraptrail_core::{
    CellCoord, Direction, GeneratorSettings, GridSize, PathDescription, VisitGrid,
    SATURATED_VISITS,
};

/// Pure system that turns [`GeneratorSettings`] into a [`PathDescription`].
#[derive(Clone, Copy, Debug)]
pub struct LevelGenerator {
    settings: GeneratorSettings,
}

impl LevelGenerator {
    /// Creates a generator for the provided settings.
    #[must_use]
    pub const fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Generates a level, drawing every random decision from `rng`.
    ///
    /// The returned path is the first walk that achieved the greatest length.
    /// Identical random sources always produce identical levels.
    pub fn generate<R>(&self, rng: &mut R) -> PathDescription
    where
        R: Rng + ?Sized,
    {
        let size = self.settings.size();
        let target_length = self.settings.target_length();
        let attempts = self.settings.attempts().get();

        let mut best: Option<Walk> = None;
        for attempt in 0..attempts {
            let candidate = walk(size, target_length, rng);
            debug!(attempt, length = candidate.length(), "generation attempt finished");
            best = Some(keep_longest(best, candidate));

            if best.as_ref().map_or(false, |walk| walk.length() == target_length) {
                break;
            }
        }

        let best = best.unwrap_or_else(|| Walk::empty(size));
        info!(
            width = size.width(),
            height = size.height(),
            target_length,
            length = best.length(),
            "level generated"
        );
        best.into_path()
    }
}

/// Generates a level on `size` with the default number of attempts.
pub fn generate<R>(size: GridSize, target_length: u32, rng: &mut R) -> PathDescription
where
    R: Rng + ?Sized,
{
    LevelGenerator::new(GeneratorSettings::new(size, target_length)).generate(rng)
}

/// Outcome of a single random walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walk {
    grid: VisitGrid,
    route: Vec<Direction>,
}

impl Walk {
    fn empty(size: GridSize) -> Self {
        Self {
            grid: VisitGrid::zeroed(size),
            route: Vec::new(),
        }
    }

    /// Visit counts accumulated by the walk.
    #[must_use]
    pub const fn grid(&self) -> &VisitGrid {
        &self.grid
    }

    /// Directions taken by the walk, in order.
    #[must_use]
    pub fn route(&self) -> &[Direction] {
        &self.route
    }

    /// Number of steps the walk achieved.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.route.len() as u32
    }

    /// Converts the walk into an immutable level description.
    #[must_use]
    pub fn into_path(self) -> PathDescription {
        PathDescription::new(self.grid, self.route)
    }
}

/// Performs one self-avoiding walk of at most `target_length` steps.
///
/// Directions are drawn uniformly; a draw landing on a saturated cell is
/// discarded and redrawn. The walk ends early once all four neighbours of
/// the current cell are saturated.
pub fn walk<R>(size: GridSize, target_length: u32, rng: &mut R) -> Walk
where
    R: Rng + ?Sized,
{
    let mut walk = Walk::empty(size);
    let mut cursor = CellCoord::ORIGIN;

    while walk.length() < target_length {
        if is_dead_end(&walk.grid, cursor) {
            break;
        }

        let (direction, next) = loop {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            let candidate = size.step(cursor, direction);
            if !walk.grid.is_saturated(candidate) {
                break (direction, candidate);
            }
        };

        cursor = next;
        let visits = walk.grid.add_visit(cursor);
        debug_assert!(visits <= SATURATED_VISITS);
        walk.route.push(direction);
    }

    walk
}

fn is_dead_end(grid: &VisitGrid, cell: CellCoord) -> bool {
    grid.size()
        .neighbors(cell)
        .into_iter()
        .all(|neighbor| grid.is_saturated(neighbor))
}

// Ties keep the incumbent so the earliest longest walk wins.
fn keep_longest(best: Option<Walk>, candidate: Walk) -> Walk {
    match best {
        Some(current) if current.length() >= candidate.length() => current,
        _ => candidate,
    }
}
