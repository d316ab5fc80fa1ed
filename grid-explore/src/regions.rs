use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use tracing::debug;

use crate::grid::Grid;
use crate::point::Point;

/// Maximal 4-connected set of cells sharing one value. Two patches of
/// the same value are always disjoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    value: char,
    cells: HashSet<Point>,
}

impl Patch {
    pub fn value(&self) -> char {
        self.value
    }

    pub fn area(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Point) -> bool {
        self.cells.contains(&pos)
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().copied()
    }

    /// Count of (cell, direction) pairs whose neighbor falls outside
    /// the patch. Off-grid and different-value neighbors both count as
    /// an exposed edge.
    pub fn perimeter(&self) -> usize {
        self.cells
            .iter()
            .map(|&pos| {
                Point::CARDINAL
                    .iter()
                    .filter(|&&dir| !self.cells.contains(&(pos + dir)))
                    .count()
            })
            .sum()
    }

    /// Fence price for part-one style pricing: `area * perimeter`.
    pub fn perimeter_price(&self) -> usize {
        self.area() * self.perimeter()
    }

    /// Number of straight fence runs around the patch. A simple polygon
    /// has as many sides as corners, so this counts matched corner
    /// templates over every cell.
    pub fn sides(&self, grid: &Grid) -> usize {
        self.cells
            .iter()
            .map(|&pos| {
                Corner::ALL
                    .iter()
                    .filter(|corner| corner.matches(grid, self.value, pos))
                    .count()
            })
            .sum()
    }

    /// Fence price for part-two style pricing: `area * sides`.
    pub fn side_price(&self, grid: &Grid) -> usize {
        self.area() * self.sides(grid)
    }
}

/// Local corner shape of a patch cell, one kind per orientation.
/// A single cell can match several templates at once (a diagonal touch
/// point contributes a concave corner on each side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    ConvexUpperLeft,
    ConvexUpperRight,
    ConvexLowerLeft,
    ConvexLowerRight,
    ConcaveUpperLeft,
    ConcaveUpperRight,
    ConcaveLowerLeft,
    ConcaveLowerRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Same,
    Differs,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::ConvexUpperLeft,
        Corner::ConvexUpperRight,
        Corner::ConvexLowerLeft,
        Corner::ConvexLowerRight,
        Corner::ConcaveUpperLeft,
        Corner::ConcaveUpperRight,
        Corner::ConcaveLowerLeft,
        Corner::ConcaveLowerRight,
    ];

    /// Neighborhood template: offsets from the cell and the relation
    /// each neighbor must hold to the patch value. Convex corners need
    /// both axis neighbors to differ; concave corners need both axis
    /// neighbors equal and the diagonal different.
    fn template(self) -> &'static [(Point, Relation)] {
        use Relation::{Differs, Same};

        const UP: Point = Point::new(0, -1);
        const DOWN: Point = Point::new(0, 1);
        const LEFT: Point = Point::new(-1, 0);
        const RIGHT: Point = Point::new(1, 0);
        const UP_LEFT: Point = Point::new(-1, -1);
        const UP_RIGHT: Point = Point::new(1, -1);
        const DOWN_LEFT: Point = Point::new(-1, 1);
        const DOWN_RIGHT: Point = Point::new(1, 1);

        match self {
            Corner::ConvexUpperLeft => &[(UP, Differs), (LEFT, Differs)],
            Corner::ConvexUpperRight => &[(UP, Differs), (RIGHT, Differs)],
            Corner::ConvexLowerLeft => &[(DOWN, Differs), (LEFT, Differs)],
            Corner::ConvexLowerRight => &[(DOWN, Differs), (RIGHT, Differs)],
            Corner::ConcaveUpperLeft => &[(UP_LEFT, Differs), (UP, Same), (LEFT, Same)],
            Corner::ConcaveUpperRight => &[(UP_RIGHT, Differs), (UP, Same), (RIGHT, Same)],
            Corner::ConcaveLowerLeft => &[(DOWN_LEFT, Differs), (DOWN, Same), (LEFT, Same)],
            Corner::ConcaveLowerRight => &[(DOWN_RIGHT, Differs), (DOWN, Same), (RIGHT, Same)],
        }
    }

    /// True when every templated neighbor of `pos` holds its expected
    /// relation to `value`. Off-grid neighbors are absent and therefore
    /// never equal to the patch value.
    fn matches(self, grid: &Grid, value: char, pos: Point) -> bool {
        self.template().iter().all(|&(delta, relation)| {
            let neighbor = grid.get(pos + delta);
            match relation {
                Relation::Same => neighbor == Some(value),
                Relation::Differs => neighbor != Some(value),
            }
        })
    }
}

/// Decomposes the grid into maximal same-value patches, keyed by value.
/// The union of all patches is exactly the set of grid cells.
#[tracing::instrument(skip(grid))]
pub fn partition(grid: &Grid) -> HashMap<char, Vec<Patch>> {
    let mut visited: HashSet<Point> = HashSet::new();
    let mut patches = Vec::new();

    for (start, value) in grid.positions() {
        if visited.contains(&start) {
            continue;
        }
        patches.push(flood_fill(grid, start, value, &mut visited));
    }

    debug!(patches = patches.len(), "partitioned grid");

    patches
        .into_iter()
        .map(|patch| (patch.value, patch))
        .into_group_map()
}

fn flood_fill(grid: &Grid, start: Point, value: char, visited: &mut HashSet<Point>) -> Patch {
    let mut cells = HashSet::new();
    let mut stack = vec![start];
    visited.insert(start);

    while let Some(pos) = stack.pop() {
        cells.insert(pos);

        for dir in Point::CARDINAL {
            let next = pos + dir;
            if !visited.contains(&next) && grid.get(next) == Some(value) {
                visited.insert(next);
                stack.push(next);
            }
        }
    }

    Patch { value, cells }
}
