use std::fmt;

use miette::Diagnostic;
use nom::{
    character::complete::{newline, satisfy},
    multi::{many1, separated_list1},
    IResult, Parser,
};
use nom_locate::LocatedSpan;
use thiserror::Error;
use tracing::debug;

use crate::point::Point;

#[derive(Debug, Error, Diagnostic)]
pub enum GridError {
    #[error("input grid is empty")]
    #[diagnostic(code(grid_explore::empty_input))]
    EmptyInput,

    #[error("failed to parse grid: {0}")]
    #[diagnostic(code(grid_explore::parse))]
    Parse(String),

    #[error("unparsed input at line {line}, column {column}")]
    #[diagnostic(code(grid_explore::trailing_input))]
    TrailingInput { line: u32, column: usize },
}

/// Character grid indexed by [`Point`]. Rows may be ragged: a lookup
/// past the end of a row is absent, not zero-filled, so every bounds
/// check is per-row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

impl Grid {
    /// Parses a grid from raw text. Blank lines are skipped; every
    /// other line becomes one row of single-character cells.
    #[tracing::instrument(skip(input))]
    pub fn parse(input: &str) -> Result<Self, GridError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(GridError::EmptyInput);
        }

        let (rest, cells) = parse_cells(LocatedSpan::new(input))
            .map_err(|e| GridError::Parse(e.to_string()))?;

        if !rest.fragment().trim().is_empty() {
            return Err(GridError::TrailingInput {
                line: rest.location_line(),
                column: rest.get_column(),
            });
        }

        // Rows are rebuilt from the cells' source lines, so blank lines
        // swallowed by the separator never produce empty rows.
        let mut rows: Vec<Vec<char>> = Vec::new();
        let mut current_line = None;
        for cell in cells {
            if current_line != Some(cell.line) {
                current_line = Some(cell.line);
                rows.push(Vec::new());
            }
            if let Some(row) = rows.last_mut() {
                row.push(cell.value);
            }
        }

        let grid = Self { rows };
        debug!(dimensions = ?grid.dimensions(), "parsed grid");
        Ok(grid)
    }

    /// Builds a grid from already-tokenized rows. Rows are trimmed and
    /// blank rows dropped, mirroring [`Grid::parse`].
    pub fn from_rows<S: AsRef<str>>(rows: impl IntoIterator<Item = S>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.as_ref().trim().chars().collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        Self { rows }
    }

    /// Character at `pos`, or `None` when `pos` falls outside the grid
    /// or past the end of its (possibly short) row.
    pub fn get(&self, pos: Point) -> Option<char> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.rows
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
    }

    /// Cell at `pos` read as a decimal digit. Absent cells and
    /// non-digit characters both yield `None`.
    pub fn digit(&self, pos: Point) -> Option<u8> {
        self.get(pos).and_then(|c| c.to_digit(10)).map(|d| d as u8)
    }

    /// (widest row, row count).
    pub fn dimensions(&self) -> (usize, usize) {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (width, self.rows.len())
    }

    /// Every cell in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (Point, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &value)| (Point::new(x as i32, y as i32), value))
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for value in row {
                write!(f, "{}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// region: Nom parser
type Span<'a> = LocatedSpan<&'a str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocatedCell {
    value: char,
    line: u32,
}

fn parse_cell(input: Span) -> IResult<Span, LocatedCell> {
    satisfy(|c: char| c.is_ascii_graphic())
        .map(|value| LocatedCell {
            value,
            line: input.location_line(),
        })
        .parse(input)
}

fn parse_cells(input: Span) -> IResult<Span, Vec<LocatedCell>> {
    let (input, lines) = separated_list1(many1(newline), many1(parse_cell))(input)?;
    Ok((input, lines.into_iter().flatten().collect()))
}
// endregion
