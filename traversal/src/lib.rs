#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative traversal state for a Wraptrail level.
//!
//! A [`Traversal`] owns a working copy of the level's visit counts. Every
//! cell the cursor newly enters consumes one visit. Entering a cell with no
//! visits left sends the player back to the start of the same level, while
//! consuming every step of the path completes it.

use tracing::debug;
use wraptrail_core::{
    CellCoord, Command, Event, PathDescription, PlayState, ResetCause, VisitGrid,
};

/// Represents the progress of a single play session over one level.
#[derive(Clone, Debug)]
pub struct Traversal {
    path: PathDescription,
    working: VisitGrid,
    cursor: CellCoord,
    steps_completed: u32,
    state: PlayState,
}

impl Traversal {
    /// Starts a traversal of the provided level at the origin.
    ///
    /// A level without steps starts out completed.
    #[must_use]
    pub fn new(path: PathDescription) -> Self {
        let state = if path.is_empty() {
            PlayState::Completed
        } else {
            PlayState::Playing
        };

        Self {
            working: path.grid().clone(),
            path,
            cursor: CellCoord::ORIGIN,
            steps_completed: 0,
            state,
        }
    }

    fn reset(&mut self, cause: ResetCause, out_events: &mut Vec<Event>) {
        self.cursor = CellCoord::ORIGIN;
        self.steps_completed = 0;
        self.working.clone_from(self.path.grid());
        debug!(?cause, "traversal reset");
        out_events.push(Event::LevelReset { cause });
    }

    fn advance(&mut self, to: CellCoord, out_events: &mut Vec<Event>) {
        let from = self.cursor;
        if to == from {
            return;
        }

        let Some(remaining) = self.working.remove_visit(to) else {
            self.reset(ResetCause::Overstepped { cell: to }, out_events);
            return;
        };

        self.cursor = to;
        self.steps_completed = self.steps_completed.saturating_add(1);
        out_events.push(Event::CursorMoved {
            from,
            to,
            remaining,
        });

        if self.steps_completed == self.path.length() {
            self.state = PlayState::Completed;
            debug!(steps = self.steps_completed, "traversal completed");
            out_events.push(Event::LevelCompleted {
                steps: self.steps_completed,
            });
        }
    }
}

/// Applies the provided command to the traversal, reporting what changed.
///
/// Commands received after completion are ignored.
pub fn apply(traversal: &mut Traversal, command: Command, out_events: &mut Vec<Event>) {
    if traversal.state == PlayState::Completed {
        return;
    }

    match command {
        Command::Move { direction } => {
            let to = traversal.path.size().step(traversal.cursor, direction);
            traversal.advance(to, out_events);
        }
        Command::Idle => {}
        Command::Restart => traversal.reset(ResetCause::Requested, out_events),
    }
}

/// Query functions that provide read-only access to the traversal state.
pub mod query {
    use super::Traversal;
    use wraptrail_core::{CellCoord, PathDescription, PlayState, VisitGrid};

    /// Visits still owed on every cell.
    #[must_use]
    pub fn grid_view(traversal: &Traversal) -> &VisitGrid {
        &traversal.working
    }

    /// Level being traversed.
    #[must_use]
    pub fn path(traversal: &Traversal) -> &PathDescription {
        &traversal.path
    }

    /// Cell currently occupied by the cursor.
    #[must_use]
    pub fn cursor(traversal: &Traversal) -> CellCoord {
        traversal.cursor
    }

    /// Cells newly entered since the last reset.
    #[must_use]
    pub fn steps_completed(traversal: &Traversal) -> u32 {
        traversal.steps_completed
    }

    /// Fraction of the path consumed, in `0.0..=1.0`.
    ///
    /// A level without steps reports `1.0`.
    #[must_use]
    pub fn progress_ratio(traversal: &Traversal) -> f32 {
        let length = traversal.path.length();
        if length == 0 {
            return 1.0;
        }
        traversal.steps_completed as f32 / length as f32
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn play_state(traversal: &Traversal) -> PlayState {
        traversal.state
    }
}
