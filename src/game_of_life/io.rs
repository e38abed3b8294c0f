//! File I/O operations for Game of Life patterns

use super::{Grid, Position};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Structural problems in a plain-text pattern
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("invalid character '{character}' at row {row}, column {column}")]
    InvalidCharacter {
        row: usize,
        column: usize,
        character: char,
    },
    #[error("pattern row {row} is too long to place at the given origin")]
    OutOfRange { row: usize },
    #[error("malformed origin line before row {row}, expected `! origin <x> <y>`")]
    InvalidOrigin { row: usize },
    #[error("live cells span {width}x{height}, too large for plain text; use JSON instead")]
    TooLarge { width: u128, height: u128 },
}

/// On-disk representation of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFormat {
    Text,
    Json,
}

impl PatternFormat {
    /// `.json` files are JSON, anything else is plain text
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PatternFormat::Json,
            _ => PatternFormat::Text,
        }
    }
}

/// Parse a plain-text pattern.
///
/// Each line is a row (`y`), each character a column (`x`), both counted
/// from `origin`. `1`, `#`, `O` and `*` are alive; `0` and `.` are dead.
/// Lines starting with `!` are comments and do not advance the row. The
/// comment `! origin <x> <y>` replaces `origin` and restarts the row count.
pub fn parse_grid_from_string(content: &str, mut origin: Position) -> Result<Grid, PatternError> {
    let mut row_idx = 0;
    let mut living = Vec::new();

    for line in content.lines().map(str::trim_end) {
        if let Some(comment) = line.strip_prefix('!') {
            if let Some(args) = origin_directive(comment) {
                origin = parse_origin(args)
                    .ok_or(PatternError::InvalidOrigin { row: row_idx })?;
                row_idx = 0;
            }
            continue;
        }

        let y = offset(origin.y, row_idx).ok_or(PatternError::OutOfRange { row: row_idx })?;
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '1' | '#' | 'O' | '*' => {
                    let x = offset(origin.x, col_idx)
                        .ok_or(PatternError::OutOfRange { row: row_idx })?;
                    living.push(Position::new(x, y));
                }
                '0' | '.' => {}
                _ => {
                    return Err(PatternError::InvalidCharacter {
                        row: row_idx,
                        column: col_idx,
                        character: ch,
                    })
                }
            }
        }
        row_idx += 1;
    }

    Ok(Grid::from_living_cells(living))
}

fn origin_directive(comment: &str) -> Option<&str> {
    let rest = comment.trim_start().strip_prefix("origin")?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

fn parse_origin(args: &str) -> Option<Position> {
    let mut parts = args.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some(Position::new(x, y))
}

fn offset(base: i64, by: usize) -> Option<i64> {
    i64::try_from(by).ok().and_then(|by| base.checked_add(by))
}

/// Convert a grid to plain text covering the bounding box of its live cells.
///
/// The first line records the box's top-left corner as `! origin <x> <y>`,
/// so parsing the text gives back the same cells whatever origin is passed.
pub fn grid_to_string(grid: &Grid) -> Result<String, PatternError> {
    let Some(bounds) = grid.bounds() else {
        return Ok(String::new());
    };
    let body = grid.render('1', '0').ok_or(PatternError::TooLarge {
        width: bounds.width(),
        height: bounds.height(),
    })?;

    Ok(format!(
        "! origin {} {}\n{}",
        bounds.xs.start(),
        bounds.ys.start(),
        body
    ))
}

/// Load a grid, picking the format from the file extension
pub fn load_grid_from_file<P: AsRef<Path>>(path: P, origin: Position) -> Result<Grid> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern file: {}", path.display()))?;

    match PatternFormat::from_path(path) {
        PatternFormat::Text => parse_grid_from_string(&content, origin)
            .with_context(|| format!("Failed to parse pattern from file: {}", path.display())),
        PatternFormat::Json => serde_json::from_str::<Grid>(&content)
            .with_context(|| format!("Failed to parse JSON pattern: {}", path.display())),
    }
}

/// Save a grid in the given format
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P, format: PatternFormat) -> Result<()> {
    let path = path.as_ref();
    let content = match format {
        PatternFormat::Text => grid_to_string(grid)
            .with_context(|| format!("Failed to render pattern for {}", path.display()))?,
        PatternFormat::Json => {
            serde_json::to_string_pretty(grid).context("Failed to serialize grid")?
        }
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.display()))?;

    Ok(())
}

/// Write a few well-known patterns into `output_dir`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        ("glider.txt", "! Glider\n.#.\n..#\n###\n"),
        ("blinker.txt", "! Blinker (period 2)\n###\n"),
        ("block.txt", "! Block (still life)\n##\n##\n"),
        ("beacon.txt", "! Beacon (period 2)\n##..\n##..\n..##\n..##\n"),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
