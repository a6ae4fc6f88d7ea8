//! Parser for the oracle's line-oriented response
//!
//! The oracle prints a fixed preamble, then on a known line either the literal
//! `Unsatisfiable` or normal output, then a `x = W, y = H` header on the next known
//! line, then one encoded row per line. Rows use `b` for a dead cell and any other
//! printable character for a live one; `$` ends a row and `!` ends the pattern.
//! The pattern carries a one-cell dead border around the target's area.

use super::{OracleResult, ProtocolError};
use crate::game_of_life::Grid;
use serde::{Deserialize, Serialize};

pub const UNSATISFIABLE_MARKER: &str = "Unsatisfiable";

/// Cells of border the oracle adds on each side of the target
const BORDER: usize = 1;

/// Where the interesting lines sit in the oracle's output (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseLayout {
    pub unsat_line: usize,
    pub header_line: usize,
}

impl Default for ResponseLayout {
    fn default() -> Self {
        Self {
            unsat_line: 14,
            header_line: 15,
        }
    }
}

impl ResponseLayout {
    /// Decode a full oracle response for `target`
    pub fn parse(&self, output: &str, target: &Grid) -> Result<OracleResult, ProtocolError> {
        let lines: Vec<&str> = output.lines().collect();

        if line_at(&lines, self.unsat_line)?.trim() == UNSATISFIABLE_MARKER {
            return Ok(OracleResult::Unsatisfiable);
        }

        let header = line_at(&lines, self.header_line)?;
        let (columns, rows) =
            parse_header(header).ok_or_else(|| ProtocolError::MalformedHeader {
                line: self.header_line,
                text: header.to_string(),
            })?;

        let expected_columns = target.columns() + 2 * BORDER;
        let expected_rows = target.rows() + 2 * BORDER;
        if columns != expected_columns || rows != expected_rows {
            return Err(ProtocolError::DimensionMismatch {
                declared_columns: columns,
                declared_rows: rows,
                expected_columns,
                expected_rows,
            });
        }

        let mut grid = Grid::new(target.columns(), target.rows());
        for row in 0..rows {
            let decoded = decode_row(line_at(&lines, self.header_line + 1 + row)?, columns, row)?;

            if (BORDER..rows - BORDER).contains(&row) {
                for col in BORDER..columns - BORDER {
                    grid.cells[(row - BORDER) * grid.width + (col - BORDER)] = decoded.cells[col];
                }
            }

            if decoded.ends_pattern {
                break;
            }
        }

        Ok(OracleResult::Satisfiable(grid))
    }
}

fn line_at<'a>(lines: &[&'a str], number: usize) -> Result<&'a str, ProtocolError> {
    number
        .checked_sub(1)
        .and_then(|index| lines.get(index))
        .copied()
        .ok_or(ProtocolError::Truncated {
            line: number,
            available: lines.len(),
        })
}

/// Parse `x = <columns>, y = <rows>`; trailing fields such as `, rule = B3/S23` are ignored
pub fn parse_header(line: &str) -> Option<(usize, usize)> {
    let rest = line.trim().strip_prefix('x')?.trim_start().strip_prefix('=')?;
    let (columns, rest) = leading_number(rest.trim_start())?;
    let rest = rest
        .trim_start()
        .strip_prefix(',')?
        .trim_start()
        .strip_prefix('y')?
        .trim_start()
        .strip_prefix('=')?;
    let (rows, _) = leading_number(rest.trim_start())?;
    Some((columns, rows))
}

fn leading_number(text: &str) -> Option<(usize, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

#[derive(Debug)]
struct DecodedRow {
    cells: Vec<bool>,
    ends_pattern: bool,
}

fn decode_row(text: &str, columns: usize, row: usize) -> Result<DecodedRow, ProtocolError> {
    let mut cells = vec![false; columns];
    let mut chars = text.trim_end().chars();

    for (column, cell) in cells.iter_mut().enumerate() {
        match chars.next() {
            None => {
                return Err(ProtocolError::ShortRow {
                    row,
                    found: column,
                    expected: columns,
                })
            }
            Some('$') => {
                return Ok(DecodedRow {
                    cells,
                    ends_pattern: false,
                })
            }
            Some('!') => {
                return Ok(DecodedRow {
                    cells,
                    ends_pattern: true,
                })
            }
            Some('b') => {}
            Some(ch) if ch.is_whitespace() || ch.is_control() => {
                return Err(ProtocolError::UnexpectedCharacter { row, column, ch })
            }
            Some(_) => *cell = true,
        }
    }

    Ok(DecodedRow {
        cells,
        ends_pattern: chars.next() == Some('!'),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preamble(lines: usize) -> String {
        (1..=lines).map(|i| format!("log line {}\n", i)).collect()
    }

    fn response(body: &[&str]) -> String {
        let mut out = preamble(13);
        for line in body {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_unsatisfiable_marker() {
        let output = response(&["Unsatisfiable"]);
        let result = ResponseLayout::default()
            .parse(&output, &Grid::new(3, 3))
            .unwrap();
        assert_eq!(result, OracleResult::Unsatisfiable);
    }

    #[test]
    fn test_decodes_bordered_pattern() {
        // 5x4 pattern around a 3x2 target
        let output = response(&[
            "Satisfiable",
            "x = 5, y = 4, rule = B3/S23",
            "bbbbb$",
            "bobob$",
            "bbobb$",
            "bbbbb!",
        ]);
        let target = Grid::new(3, 2);
        let grid = ResponseLayout::default()
            .parse(&output, &target)
            .unwrap()
            .into_grid()
            .unwrap();

        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.living_cells(), vec![(0, 0), (0, 2), (1, 1)]);
    }

    #[test]
    fn test_terminators_end_rows_and_pattern() {
        let output = response(&[
            "Satisfiable",
            "x = 5, y = 5",
            "$",
            "bo$",
            "bbbo!",
        ]);
        let grid = ResponseLayout::default()
            .parse(&output, &Grid::new(3, 3))
            .unwrap()
            .into_grid()
            .unwrap();

        assert_eq!(grid.living_cells(), vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn test_any_non_b_character_is_alive() {
        let output = response(&["", "x = 4, y = 3", "bbbb$", "bAob$", "bbbb!"]);
        let grid = ResponseLayout::default()
            .parse(&output, &Grid::new(2, 1))
            .unwrap()
            .into_grid()
            .unwrap();
        assert_eq!(grid.living_count(), 2);
    }

    #[test]
    fn test_malformed_header() {
        let output = response(&["Satisfiable", "width 5 height 5", "bbbbb$"]);
        let err = ResponseLayout::default()
            .parse(&output, &Grid::new(3, 3))
            .unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedHeader { line: 15, .. }));
    }

    #[test]
    fn test_dimension_mismatch() {
        let output = response(&["Satisfiable", "x = 4, y = 5", "bbbb$"]);
        let err = ResponseLayout::default()
            .parse(&output, &Grid::new(3, 3))
            .unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::DimensionMismatch {
                declared_columns: 4,
                expected_columns: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_output() {
        let err = ResponseLayout::default()
            .parse(&preamble(10), &Grid::new(3, 3))
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::Truncated {
                line: 14,
                available: 10
            }
        );

        let output = response(&["Satisfiable", "x = 5, y = 5", "bbbbb$", "bbobb$"]);
        let err = ResponseLayout::default()
            .parse(&output, &Grid::new(3, 3))
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Truncated { line: 18, .. }));
    }

    #[test]
    fn test_short_row_and_bad_character() {
        let output = response(&["Satisfiable", "x = 5, y = 3", "bbbbb$", "bbo"]);
        let err = ResponseLayout::default()
            .parse(&output, &Grid::new(3, 1))
            .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::ShortRow {
                row: 1,
                found: 3,
                expected: 5
            }
        );

        let output = response(&["Satisfiable", "x = 5, y = 3", "bbbbb$", "bo ob$", "bbbbb!"]);
        let err = ResponseLayout::default()
            .parse(&output, &Grid::new(3, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnexpectedCharacter { row: 1, column: 2, ch: ' ' }
        ));
    }

    #[test]
    fn test_custom_layout() {
        let layout = ResponseLayout {
            unsat_line: 1,
            header_line: 2,
        };
        let output = "ok\nx=3,y=3\nbbb$\nbob$\nbbb!\n";
        let grid = layout
            .parse(output, &Grid::new(1, 1))
            .unwrap()
            .into_grid()
            .unwrap();
        assert!(grid.get(0, 0));
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(parse_header("x = 12, y = 7"), Some((12, 7)));
        assert_eq!(parse_header("  x=3,y=4, rule = B3/S23\n"), Some((3, 4)));
        assert_eq!(parse_header("x = , y = 4"), None);
        assert_eq!(parse_header("y = 4, x = 3"), None);
        assert_eq!(parse_header(""), None);
    }
}
