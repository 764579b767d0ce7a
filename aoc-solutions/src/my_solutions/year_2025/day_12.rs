//! Day 12: packing presents under the Christmas trees
use anyhow::{Context, bail, ensure};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;

use crate::utils::line_error;

/// Side of the square every present fits in, used by the quick acceptance check.
const SHAPE_SIDE: usize = 3;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2025, day = 12, tags = ["2025", "backtracking"])]
pub struct Solver;

/// A present shape as every distinct rotation and reflection.
///
/// Each orientation lists `(row, col)` offsets relative to its first cell in
/// row-major order, so the first offset is always `(0, 0)`.
#[derive(Debug, Clone)]
pub struct Shape {
    area: usize,
    orientations: Vec<Vec<(isize, isize)>>,
}

impl Shape {
    fn from_rows(rows: &[&str]) -> anyhow::Result<Self> {
        ensure!(
            rows.len() <= SHAPE_SIDE && rows.iter().all(|row| row.len() <= SHAPE_SIDE),
            "shape does not fit in {SHAPE_SIDE}x{SHAPE_SIDE}"
        );
        let mut cells = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, b) in row.bytes().enumerate() {
                match b {
                    b'#' => cells.push((r as isize, c as isize)),
                    b'.' => {}
                    _ => bail!("unexpected character {:?} in shape", b as char),
                }
            }
        }
        ensure!(!cells.is_empty(), "shape has no cells");

        let orientations = (0..8)
            .map(|i| {
                cells
                    .iter()
                    .map(|&(r, c)| {
                        let (r, c) = if i >= 4 { (r, -c) } else { (r, c) };
                        match i % 4 {
                            0 => (r, c),
                            1 => (c, -r),
                            2 => (-r, -c),
                            _ => (-c, r),
                        }
                    })
                    .sorted_unstable()
                    .collect::<Vec<_>>()
            })
            .map(|cells| {
                let (r0, c0) = cells[0];
                cells.into_iter().map(|(r, c)| (r - r0, c - c0)).collect::<Vec<_>>()
            })
            .sorted_unstable()
            .dedup()
            .collect();

        Ok(Self {
            area: cells.len(),
            orientations,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    /// How many presents of each shape must fit.
    counts: Vec<usize>,
}

#[derive(Debug)]
pub struct SharedData {
    shapes: Vec<Shape>,
    regions: Vec<Region>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let header = Regex::new(r"^(\d+):$").map_err(|e| ParseError::Other(e.to_string()))?;
        let region = Regex::new(r"^(\d+)x(\d+):((?:\s+\d+)*)\s*$")
            .map_err(|e| ParseError::Other(e.to_string()))?;

        let mut shapes = Vec::new();
        let mut regions = Vec::new();
        let mut pending: Option<PendingShape<'a>> = None;

        for (line_idx, line) in input.lines().enumerate() {
            let line_no = line_idx + 1;
            let line = line.trim();

            if let Some(caps) = region.captures(line) {
                finish_shape(&mut pending, &mut shapes)?;
                let parsed = (|| -> anyhow::Result<Region> {
                    let width: usize = caps[1].parse().context("bad width")?;
                    let height: usize = caps[2].parse().context("bad height")?;
                    let counts: Vec<usize> = caps[3]
                        .split_whitespace()
                        .map(str::parse::<usize>)
                        .collect::<Result<_, _>>()
                        .context("bad present count")?;
                    Ok(Region { width, height, counts })
                })();
                regions.push(parsed.map_err(|e| line_error(line_no, e))?);
            } else if let Some(caps) = header.captures(line) {
                finish_shape(&mut pending, &mut shapes)?;
                let index: usize = caps[1].parse().map_err(|e| line_error(line_no, e))?;
                pending = Some(PendingShape {
                    index,
                    line_no,
                    rows: Vec::new(),
                });
            } else if line.is_empty() {
                finish_shape(&mut pending, &mut shapes)?;
            } else if let Some(shape) = pending.as_mut() {
                shape.rows.push(line);
            } else {
                return Err(line_error(line_no, format!("unexpected line {line:?}")));
            }
        }
        finish_shape(&mut pending, &mut shapes)?;

        if let Some(bad) = regions.iter().position(|r| r.counts.len() > shapes.len()) {
            return Err(ParseError::InvalidFormat(format!(
                "region {} lists {} shapes, only {} defined",
                bad + 1,
                regions[bad].counts.len(),
                shapes.len()
            )));
        }
        if regions.is_empty() {
            return Err(ParseError::MissingData("no regions".to_string()));
        }
        Ok(SharedData { shapes, regions })
    }
}

/// Shape being read: its index, header line and rows so far.
struct PendingShape<'a> {
    index: usize,
    line_no: usize,
    rows: Vec<&'a str>,
}

fn finish_shape(pending: &mut Option<PendingShape<'_>>, shapes: &mut Vec<Shape>) -> Result<(), ParseError> {
    let Some(shape) = pending.take() else {
        return Ok(());
    };
    if shape.index != shapes.len() {
        return Err(line_error(
            shape.line_no,
            format!("expected shape {}, found {}", shapes.len(), shape.index),
        ));
    }
    shapes.push(Shape::from_rows(&shape.rows).map_err(|e| line_error(shape.line_no, e))?);
    Ok(())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fitting = shared
            .regions
            .iter()
            .filter(|region| presents_fit(&shared.shapes, region))
            .count();
        Ok(fitting.to_string())
    }
}

fn presents_fit(shapes: &[Shape], region: &Region) -> bool {
    let cells = region.width * region.height;
    let needed: usize = region.counts.iter().zip(shapes).map(|(&n, s)| n * s.area).sum();
    let presents: usize = region.counts.iter().sum();

    if needed > cells {
        return false;
    }
    // One present per disjoint 3x3 block.
    if (region.width / SHAPE_SIDE) * (region.height / SHAPE_SIDE) >= presents {
        return true;
    }

    tracing::debug!(
        width = region.width,
        height = region.height,
        presents,
        "falling back to exact packing"
    );
    let mut packing = Packing {
        shapes,
        width: region.width,
        height: region.height,
        filled: vec![false; cells],
        remaining: region.counts.clone(),
        left_to_place: presents,
        slack: cells - needed,
    };
    packing.search(0)
}

/// Exact cover search: the first open cell is either covered by a present
/// anchored there or left empty, which uses up one cell of slack.
struct Packing<'s> {
    shapes: &'s [Shape],
    width: usize,
    height: usize,
    filled: Vec<bool>,
    remaining: Vec<usize>,
    left_to_place: usize,
    slack: usize,
}

impl Packing<'_> {
    fn search(&mut self, from: usize) -> bool {
        if self.left_to_place == 0 {
            return true;
        }
        let Some(pos) = (from..self.filled.len()).find(|&p| !self.filled[p]) else {
            return false;
        };
        let (row, col) = ((pos / self.width) as isize, (pos % self.width) as isize);

        for shape in 0..self.remaining.len() {
            if self.remaining[shape] == 0 {
                continue;
            }
            for orientation in &self.shapes[shape].orientations {
                let Some(cells) = self.cells_if_free(row, col, orientation) else {
                    continue;
                };
                self.set(&cells, true);
                self.remaining[shape] -= 1;
                self.left_to_place -= 1;

                let found = self.search(pos + 1);

                self.left_to_place += 1;
                self.remaining[shape] += 1;
                self.set(&cells, false);
                if found {
                    return true;
                }
            }
        }

        if self.slack > 0 {
            self.slack -= 1;
            self.filled[pos] = true;
            let found = self.search(pos + 1);
            self.filled[pos] = false;
            self.slack += 1;
            return found;
        }
        false
    }

    /// Grid indices covered by `orientation` anchored at `(row, col)`, if all are open.
    fn cells_if_free(&self, row: isize, col: isize, orientation: &[(isize, isize)]) -> Option<Vec<usize>> {
        orientation
            .iter()
            .map(|&(dr, dc)| {
                let (r, c) = (row + dr, col + dc);
                if !(0..self.height as isize).contains(&r) || !(0..self.width as isize).contains(&c) {
                    return None;
                }
                let index = r as usize * self.width + c as usize;
                (!self.filled[index]).then_some(index)
            })
            .collect()
    }

    fn set(&mut self, cells: &[usize], value: bool) {
        for &cell in cells {
            self.filled[cell] = value;
        }
    }
}
