#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Wraptrail adapters.
//!
//! Nothing here draws. Adapters feed the traversal's grid view, cursor and
//! progress ratio in, and receive colours and opacities to present. Elapsed
//! time only shapes these visuals and never reaches the traversal itself.

use std::time::Duration;

use wraptrail_core::{CellCoord, GridSize, VisitGrid, SATURATED_VISITS};

/// Time between two easing steps of the progress colour.
pub const EASING_PERIOD: Duration = Duration::from_millis(256);

/// Length of one cursor pulse.
pub const CURSOR_PULSE_PERIOD: Duration = Duration::from_millis(2048);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Byte RGB values, rounded and clamped.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
            .map(|channel| (channel.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Grey of the same brightness, keeping alpha.
    #[must_use]
    pub fn greyed(self) -> Self {
        let grey = (self.red + self.green + self.blue) / 3.0;
        Self::new(grey, grey, grey, self.alpha)
    }

    /// Blends every channel as `weight * self + (1 - weight) * other`.
    #[must_use]
    pub fn interpolate(self, other: Self, weight: f32) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        let blend = |own: f32, theirs: f32| weight * own + (1.0 - weight) * theirs;

        Self {
            red: blend(self.red, other.red),
            green: blend(self.green, other.green),
            blue: blend(self.blue, other.blue),
            alpha: blend(self.alpha, other.alpha),
        }
    }
}

/// Progress colour smoothing.
///
/// Every [`EASING_PERIOD`] the eased value moves a quarter of the way
/// toward the latest progress ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressEasing {
    value: f32,
    pending: Duration,
}

impl ProgressEasing {
    /// Current eased progress.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Accounts for `dt` of elapsed time and returns the eased progress.
    pub fn advance(&mut self, dt: Duration, target: f32) -> f32 {
        self.pending += dt;
        let period = EASING_PERIOD.as_nanos();
        let pending = self.pending.as_nanos();
        let periods = pending / period;
        if periods == 0 {
            return self.value;
        }

        self.pending = Duration::from_nanos((pending % period) as u64);
        let periods = i32::try_from(periods).unwrap_or(i32::MAX);
        self.value = target + (self.value - target) * 0.75_f32.powi(periods);
        self.value
    }
}

/// Blinking cursor overlay, fully opaque right after the cursor moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CursorPulse {
    since_move: Duration,
}

impl CursorPulse {
    /// Accounts for `dt` of elapsed time.
    pub fn advance(&mut self, dt: Duration) {
        self.since_move += dt;
    }

    /// Restarts the pulse; called whenever the cursor moves.
    pub fn restart(&mut self) {
        self.since_move = Duration::ZERO;
    }

    /// Overlay opacity in `0.0..=1.0`.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        cursor_opacity(self.since_move)
    }
}

/// Opacity of the cursor overlay `elapsed` after its last move.
#[must_use]
pub fn cursor_opacity(elapsed: Duration) -> f32 {
    let period = CURSOR_PULSE_PERIOD.as_millis();
    let phase = (elapsed.as_millis() % period) as f32 / period as f32;
    ((phase - 0.5).abs() * 2.0).powi(4)
}

/// Colours derived from the eased progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shades {
    /// Colour of a tile still owed every visit.
    pub dark: Color,
    /// Colour of a tile with no visits left.
    pub lite: Color,
    /// Frame clear colour.
    pub background: Color,
}

impl Shades {
    /// Colour of a tile that still owes `visits` visits.
    #[must_use]
    pub fn tile(&self, visits: u8) -> Color {
        let weight = f32::from(visits) / f32::from(SATURATED_VISITS);
        self.dark.interpolate(self.lite, weight)
    }
}

/// Palette that drains to grey at the start of a level and saturates as the
/// player progresses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeedbackPalette {
    accent: Color,
}

impl Default for FeedbackPalette {
    fn default() -> Self {
        Self::new(Color::from_rgb_u8(0x00, 0xaa, 0xaa))
    }
}

impl FeedbackPalette {
    /// Creates a palette around the provided accent colour.
    #[must_use]
    pub const fn new(accent: Color) -> Self {
        Self { accent }
    }

    /// Shades for the given eased progress.
    #[must_use]
    pub fn shades(&self, eased_progress: f32) -> Shades {
        let dark = self
            .accent
            .interpolate(self.accent.greyed(), eased_progress);
        Shades {
            dark,
            lite: dark.interpolate(Color::WHITE, 1.0 / 3.0),
            background: dark.interpolate(Color::BLACK, 0.5),
        }
    }
}

/// Time-driven feedback for one traversal session.
///
/// Adapters advance it once per frame with the traversal's raw progress
/// ratio and report cursor movement; scenes are then shaded from the eased
/// progress rather than the raw ratio.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Feedback {
    palette: FeedbackPalette,
    easing: ProgressEasing,
    pulse: CursorPulse,
}

impl Feedback {
    /// Creates feedback shaded with the provided palette.
    #[must_use]
    pub fn new(palette: FeedbackPalette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    /// Accounts for `dt` of elapsed time while the traversal reports `progress`.
    pub fn advance(&mut self, dt: Duration, progress: f32) {
        let _ = self.easing.advance(dt, progress);
        self.pulse.advance(dt);
    }

    /// Restarts the cursor pulse after the cursor moved or the level reset.
    pub fn cursor_moved(&mut self) {
        self.pulse.restart();
    }

    /// Progress as currently shown.
    #[must_use]
    pub const fn eased_progress(&self) -> f32 {
        self.easing.value()
    }

    /// Shades for the eased progress.
    #[must_use]
    pub fn shades(&self) -> Shades {
        self.palette.shades(self.easing.value())
    }

    /// Composes a frame from the traversal's live grid view.
    #[must_use]
    pub fn scene(&self, grid: &VisitGrid, cursor: CellCoord) -> Scene {
        Scene::compose(grid, cursor, &self.shades(), &self.pulse)
    }
}

/// Snapshot of everything an adapter needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    size: GridSize,
    tiles: Vec<Color>,
    /// Cell highlighted by the cursor overlay.
    pub cursor: CellCoord,
    /// Opacity of the black cursor overlay.
    pub cursor_opacity: f32,
    /// Frame clear colour.
    pub background: Color,
}

impl Scene {
    /// Composes a frame from the traversal's live grid view.
    #[must_use]
    pub fn compose(
        grid: &VisitGrid,
        cursor: CellCoord,
        shades: &Shades,
        pulse: &CursorPulse,
    ) -> Self {
        let size = grid.size();
        let tiles = size
            .cells()
            .map(|cell| shades.tile(grid.visits(cell)))
            .collect();

        Self {
            size,
            tiles,
            cursor,
            cursor_opacity: pulse.opacity(),
            background: shades.background,
        }
    }

    /// Dimensions of the tile grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Colour of the tile at `cell`.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Color {
        self.tiles[self.size.index_of(cell)]
    }

    /// Tile colours one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.tiles.chunks(self.size.width() as usize)
    }
}
