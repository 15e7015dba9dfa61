use std::fmt::Write as _;

use wraptrail_core::{CellCoord, VisitGrid};
use wraptrail_rendering::{Color, Scene};

/// Lays out visit counts as rows of digits, bracketing the cursor cell.
#[must_use]
pub(crate) fn counts(grid: &VisitGrid, cursor: Option<CellCoord>) -> String {
    let size = grid.size();
    let mut out = String::new();
    for row in 0..size.height() {
        for column in 0..size.width() {
            let cell = CellCoord::new(column, row);
            let visits = grid.visits(cell);
            if cursor == Some(cell) {
                let _ = write!(out, "[{visits}]");
            } else {
                let _ = write!(out, " {visits} ");
            }
        }
        out.push('\n');
    }
    out
}

/// Paints a scene with 24-bit ANSI background colours, two columns per tile.
#[must_use]
pub(crate) fn shaded(scene: &Scene) -> String {
    let mut out = String::new();
    for (row, tiles) in scene.rows().enumerate() {
        for (column, &tile) in tiles.iter().enumerate() {
            let cell = CellCoord::new(column as u32, row as u32);
            let color = if cell == scene.cursor {
                Color::BLACK.interpolate(tile, scene.cursor_opacity)
            } else {
                tile
            };
            let [red, green, blue] = color.to_rgb_u8();
            let _ = write!(out, "\x1b[48;2;{red};{green};{blue}m  ");
        }
        out.push_str("\x1b[0m\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wraptrail_core::{Direction, GridSize, PathDescription};
    use wraptrail_rendering::{CursorPulse, FeedbackPalette};

    fn level() -> PathDescription {
        let size = GridSize::new(3, 2).expect("valid size");
        PathDescription::from_route(size, &[Direction::East, Direction::South, Direction::North])
    }

    #[test]
    fn counts_brackets_cursor() {
        let path = level();
        let printed = counts(path.grid(), Some(CellCoord::new(1, 0)));
        assert_eq!(printed, " 0 [2] 0 \n 0  1  0 \n");
    }

    #[test]
    fn counts_without_cursor() {
        let path = level();
        assert_eq!(counts(path.grid(), None), " 0  2  0 \n 0  1  0 \n");
    }

    #[test]
    fn shaded_paints_every_tile_and_resets_each_row() {
        let path = level();
        let shades = FeedbackPalette::default().shades(0.0);
        let scene = Scene::compose(path.grid(), CellCoord::ORIGIN, &shades, &CursorPulse::default());

        let printed = shaded(&scene);

        assert_eq!(printed.matches("\x1b[48;2;").count(), 6);
        assert_eq!(printed.matches("\x1b[0m\n").count(), 2);
        assert!(printed.starts_with("\x1b[48;2;0;0;0m"), "opaque cursor draws black");
    }
}
