#![allow(clippy::missing_errors_doc)]

use thiserror::Error;
use wraptrail_core::{Command, Direction};

/// Symbol that ticks without directional input.
const IDLE_SYMBOL: char = '.';
/// Symbol that requests a restart of the level.
const RESTART_SYMBOL: char = '!';

/// Parses a move script into the commands it encodes, one per symbol.
///
/// Moves are spelled `U`/`D`/`L`/`R` or `N`/`S`/`W`/`E` in either case.
/// Whitespace is ignored so long scripts can be wrapped.
pub(crate) fn parse(script: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::with_capacity(script.len());
    for (position, symbol) in script.chars().enumerate() {
        if symbol.is_whitespace() {
            continue;
        }

        let command = match symbol {
            IDLE_SYMBOL => Command::Idle,
            RESTART_SYMBOL => Command::Restart,
            _ => Command::Move {
                direction: parse_direction(symbol)
                    .ok_or(ScriptError::UnexpectedSymbol { symbol, position })?,
            },
        };
        commands.push(command);
    }

    if commands.is_empty() {
        return Err(ScriptError::Empty);
    }

    Ok(commands)
}

/// Spells a route as a move script that [`parse`] accepts.
#[must_use]
pub(crate) fn format_route(route: &[Direction]) -> String {
    route.iter().map(|&direction| direction_symbol(direction)).collect()
}

fn parse_direction(symbol: char) -> Option<Direction> {
    match symbol.to_ascii_uppercase() {
        'U' | 'N' => Some(Direction::North),
        'D' | 'S' => Some(Direction::South),
        'L' | 'W' => Some(Direction::West),
        'R' | 'E' => Some(Direction::East),
        _ => None,
    }
}

const fn direction_symbol(direction: Direction) -> char {
    match direction {
        Direction::North => 'U',
        Direction::South => 'D',
        Direction::West => 'L',
        Direction::East => 'R',
    }
}

/// Errors that can occur while parsing move scripts.
#[derive(Debug, PartialEq, Eq, Error)]
pub(crate) enum ScriptError {
    /// The script contained no commands.
    #[error("move script is empty")]
    Empty,
    /// The script contained a symbol that encodes no command.
    #[error("unexpected symbol '{symbol}' at position {position} of the move script")]
    UnexpectedSymbol {
        /// Offending symbol.
        symbol: char,
        /// Zero-based character offset of the symbol.
        position: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_ticks_and_restarts() {
        let commands = parse("Rd .\n!w").expect("script parses");
        assert_eq!(
            commands,
            vec![
                Command::Move {
                    direction: Direction::East,
                },
                Command::Move {
                    direction: Direction::South,
                },
                Command::Idle,
                Command::Restart,
                Command::Move {
                    direction: Direction::West,
                },
            ]
        );
    }

    #[test]
    fn rejects_unknown_symbols_with_position() {
        assert_eq!(
            parse("UUx"),
            Err(ScriptError::UnexpectedSymbol {
                symbol: 'x',
                position: 2,
            })
        );
    }

    #[test]
    fn rejects_blank_scripts() {
        assert_eq!(parse("  \t"), Err(ScriptError::Empty));
    }

    #[test]
    fn formatted_route_parses_back_into_moves() {
        let route = [
            Direction::North,
            Direction::West,
            Direction::South,
            Direction::East,
        ];
        let script = format_route(&route);
        assert_eq!(script, "ULDR");

        let directions: Vec<Direction> = parse(&script)
            .expect("route script parses")
            .into_iter()
            .filter_map(|command| match command {
                Command::Move { direction } => Some(direction),
                _ => None,
            })
            .collect();
        assert_eq!(directions, route);
    }
}
