//! Human-readable coordinates and action strings.
//!
//! Coordinates are `<file><rank>`: the file letter is the grid column, and
//! ranks count up from the bottom edge of the hexagon along each file, so
//! every file starts at rank 1.
//!
//! Actions are written as
//! - `PUT <color> <target> [<removed>]`
//! - `CAP <color> <source> <capturedColor> <destination>`

use crate::action::{Action, Cell, Marble};
use crate::board::Board;
use crate::constants::{DIRECTIONS, NUM_DIRECTIONS};
use crate::error::GameError;

/// Convert a cell index to its coordinate string (e.g. `"C3"`).
pub fn index_to_str(width: usize, cell: Cell) -> String {
    let (y, x) = (cell / width, cell % width);
    let shift = (width / 2).saturating_sub(x);
    let rank = width - (y + shift);
    format!("{}{}", (b'A' + x as u8) as char, rank)
}

/// Parse a coordinate string into a cell index.
///
/// Accepts lowercase letters. Fails for coordinates outside the hexagon.
pub fn str_to_index(width: usize, s: &str) -> Result<Cell, GameError> {
    let bad = || GameError::Notation(format!("invalid coordinate '{s}'"));

    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(bad)?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return Err(bad());
    }
    let x = (letter as u8 - b'A') as usize;
    let rank: usize = chars.as_str().parse().map_err(|_| bad())?;
    if x >= width || rank == 0 {
        return Err(bad());
    }

    let shift = (width / 2).saturating_sub(x);
    let y = rank
        .checked_add(shift)
        .and_then(|r| width.checked_sub(r))
        .ok_or_else(bad)?;
    if y.abs_diff(x) > width / 2 {
        return Err(bad());
    }
    Ok(y * width + x)
}

/// Render an action in notation. Capture strings name the marble colours
/// currently on the board, so `board` must be the state the action applies to.
pub fn action_to_string(board: &Board, action: &Action) -> Result<String, GameError> {
    let w = board.width();
    match *action {
        Action::Placement {
            marble,
            target,
            removed,
        } => {
            let mut s = format!("PUT {marble} {}", index_to_str(w, target));
            if let Some(r) = removed {
                s.push(' ');
                s.push_str(&index_to_str(w, r));
            }
            Ok(s)
        }
        Action::Capture { source, direction } => {
            let missing = || {
                GameError::Notation(format!(
                    "no capture from {} in direction {direction}",
                    index_to_str(w, source)
                ))
            };
            let over = board.neighbor(source, direction).ok_or_else(missing)?;
            let landing = board.neighbor(over, direction).ok_or_else(missing)?;
            let color = board.site(source).marble().ok_or_else(missing)?;
            let captured = board.site(over).marble().ok_or_else(missing)?;
            Ok(format!(
                "CAP {color} {} {captured} {}",
                index_to_str(w, source),
                index_to_str(w, landing)
            ))
        }
    }
}

fn parse_marble(token: &str) -> Result<Marble, GameError> {
    let mut chars = token.chars();
    match (chars.next().and_then(Marble::from_letter), chars.next()) {
        (Some(m), None) => Ok(m),
        _ => Err(GameError::Notation(format!("invalid marble colour '{token}'"))),
    }
}

/// Parse an action string against `board`.
///
/// Capture colours are checked against the marbles on the board. Legality is
/// not checked here.
pub fn string_to_action(board: &Board, s: &str) -> Result<Action, GameError> {
    let w = board.width();
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let verb = tokens.first().map(|t| t.to_ascii_uppercase()).unwrap_or_default();

    match (verb.as_str(), tokens.len()) {
        ("PUT", 3 | 4) => {
            let marble = parse_marble(tokens[1])?;
            let target = str_to_index(w, tokens[2])?;
            let removed = tokens.get(3).map(|t| str_to_index(w, t)).transpose()?;
            Ok(Action::Placement {
                marble,
                target,
                removed,
            })
        }
        ("CAP", 5) => {
            let color = parse_marble(tokens[1])?;
            let source = str_to_index(w, tokens[2])?;
            let captured = parse_marble(tokens[3])?;
            let landing = str_to_index(w, tokens[4])?;

            let (sy, sx) = board.coords(source);
            let (ly, lx) = board.coords(landing);
            let delta = (ly as isize - sy as isize, lx as isize - sx as isize);
            let direction = (0..NUM_DIRECTIONS)
                .find(|&d| (2 * DIRECTIONS[d].0, 2 * DIRECTIONS[d].1) == delta)
                .ok_or_else(|| {
                    GameError::Notation(format!("'{s}' does not jump over a single cell"))
                })?;

            let over = board
                .neighbor(source, direction)
                .ok_or_else(|| GameError::Notation(format!("'{s}' leaves the board")))?;
            if board.site(source).marble() != Some(color) {
                return Err(GameError::Notation(format!(
                    "no {color} marble on {}",
                    tokens[2]
                )));
            }
            if board.site(over).marble() != Some(captured) {
                return Err(GameError::Notation(format!(
                    "no {captured} marble between {} and {}",
                    tokens[2], tokens[4]
                )));
            }
            Ok(Action::Capture { source, direction })
        }
        _ => Err(GameError::Notation(format!("cannot parse action '{s}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::MarbleCounts;

    #[test]
    fn test_names_on_small_board() {
        let names: Vec<String> = [0, 1, 2, 5, 6, 10, 12, 14, 16, 22, 24]
            .into_iter()
            .map(|c| index_to_str(5, c))
            .collect();
        assert_eq!(
            names,
            ["A3", "B4", "C5", "A2", "B3", "A1", "C3", "E3", "B1", "C1", "E1"]
        );
    }

    #[test]
    fn test_parse_on_tournament_board() {
        let cases = [
            ("A1", (3, 0)),
            ("A4", (0, 0)),
            ("B4", (1, 1)),
            ("C2", (4, 2)),
            ("D3", (4, 3)),
            ("G4", (3, 6)),
            ("G1", (6, 6)),
        ];
        for (name, (y, x)) in cases {
            assert_eq!(str_to_index(7, name).unwrap(), y * 7 + x, "{name}");
        }
    }

    #[test]
    fn test_coordinate_roundtrip() {
        for width in [3usize, 5, 7, 9] {
            let half = width / 2;
            for cell in 0..width * width {
                let (y, x) = (cell / width, cell % width);
                if y.abs_diff(x) <= half {
                    let name = index_to_str(width, cell);
                    assert_eq!(str_to_index(width, &name).unwrap(), cell, "{name}");
                }
            }
        }
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(str_to_index(5, "Z1").is_err());
        assert!(str_to_index(5, "A0").is_err());
        assert!(str_to_index(5, "A4").is_err());
        assert!(str_to_index(5, "E4").is_err());
        assert!(str_to_index(5, "").is_err());
        assert!(str_to_index(5, "3A").is_err());
        assert!(str_to_index(5, "A18446744073709551615").is_err());
    }

    #[test]
    fn test_parse_placements() {
        let board = Board::new(19, MarbleCounts::new(10, 10, 10), 1).unwrap();
        assert_eq!(
            string_to_action(&board, "PUT w E1 D1").unwrap(),
            Action::Placement {
                marble: Marble::White,
                target: 24,
                removed: Some(23)
            }
        );
        assert_eq!(
            string_to_action(&board, "put g c3").unwrap(),
            Action::Placement {
                marble: Marble::Gray,
                target: 12,
                removed: None
            }
        );
        assert!(string_to_action(&board, "PUT x C3").is_err());
        assert!(string_to_action(&board, "PUT w").is_err());
        assert!(string_to_action(&board, "MOVE w C3").is_err());
    }

    #[test]
    fn test_capture_strings() {
        let mut board = Board::new(19, MarbleCounts::new(10, 10, 10), 1).unwrap();
        for s in ["PUT w E1 D1", "PUT b B3 B4", "PUT w C2 C5", "PUT b D3 C4", "PUT w C3 A1"] {
            let action = string_to_action(&board, s).unwrap();
            assert_eq!(action_to_string(&board, &action).unwrap(), s);
            board.apply_action(&action).unwrap();
        }

        let action = string_to_action(&board, "CAP b B3 w D2").unwrap();
        assert_eq!(
            action,
            Action::Capture {
                source: 6,
                direction: 5
            }
        );
        assert_eq!(action_to_string(&board, &action).unwrap(), "CAP b B3 w D2");

        for capture in board.legal_actions().actions {
            let s = action_to_string(&board, &capture).unwrap();
            assert_eq!(string_to_action(&board, &s).unwrap(), capture);
        }

        assert!(string_to_action(&board, "CAP w B3 w D2").is_err());
        assert!(string_to_action(&board, "CAP b B3 b D2").is_err());
        assert!(string_to_action(&board, "CAP b B3 w C3").is_err());
    }
}
