use std::collections::HashMap;

use itertools::Itertools;
use tracing::debug;

use crate::grid::Grid;
use crate::point::Point;

pub const TRAILHEAD: u8 = 0;
pub const SUMMIT: u8 = 9;

/// A maximal monotonic path: starts at a trailhead, gains exactly one
/// unit of height per 4-adjacent step, ends at a summit. Trails are
/// distinguished by their full position sequence.
pub type Trail = Vec<Point>;

/// Enumerates every trail in the grid, keyed by trailhead.
///
/// Cells that are absent or non-digit never match a step, so dotted
/// example grids work without special casing. A grid with no
/// trailheads yields an empty map.
#[tracing::instrument(skip(grid))]
pub fn find_trails(grid: &Grid) -> HashMap<Point, Vec<Trail>> {
    // The cache is scoped to this call, so results never leak between
    // grids.
    let mut cache: HashMap<Point, Vec<Trail>> = HashMap::new();

    let trails: Vec<Trail> = grid
        .positions()
        .filter(|&(pos, _)| grid.digit(pos) == Some(TRAILHEAD))
        .flat_map(|(head, _)| climb(grid, head, TRAILHEAD, &mut cache))
        .collect();

    debug!(trails = trails.len(), "explored monotonic paths");

    trails.into_iter().map(|trail| (trail[0], trail)).into_group_map()
}

/// All trails from `pos` (which holds `value`) to every reachable
/// summit. Downstream reachability depends only on the current cell,
/// never on how it was reached, so the cache is keyed on the position
/// alone and full trails are rebuilt by prepending onto memoized
/// suffixes.
fn climb(
    grid: &Grid,
    pos: Point,
    value: u8,
    cache: &mut HashMap<Point, Vec<Trail>>,
) -> Vec<Trail> {
    if let Some(hit) = cache.get(&pos) {
        return hit.clone();
    }

    let trails = if value == SUMMIT {
        vec![vec![pos]]
    } else {
        let mut trails = Vec::new();
        for dir in Point::CARDINAL {
            let next = pos + dir;
            if grid.digit(next) != Some(value + 1) {
                continue;
            }
            for suffix in climb(grid, next, value + 1, cache) {
                let mut trail = Vec::with_capacity(suffix.len() + 1);
                trail.push(pos);
                trail.extend(suffix);
                trails.push(trail);
            }
        }
        trails
    };

    cache.insert(pos, trails.clone());
    trails
}

/// Distinct summits reachable from one trailhead's trails. Multiple
/// routes to the same summit count once.
pub fn score(trails: &[Trail]) -> usize {
    trails.iter().filter_map(|t| t.last()).unique().count()
}

/// Distinct full trails from one trailhead. The same summit reached by
/// different routes counts every time.
pub fn rating(trails: &[Trail]) -> usize {
    trails.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOPO: &str = "89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732";

    fn score_total(grid: &Grid) -> usize {
        find_trails(grid).values().map(|t| score(t)).sum()
    }

    fn rating_total(grid: &Grid) -> usize {
        find_trails(grid).values().map(|t| rating(t)).sum()
    }

    #[test_log::test]
    fn test_topo_fixture() -> miette::Result<()> {
        let grid = Grid::parse(TOPO)?;
        let trails = find_trails(&grid);

        assert_eq!(9, trails.len(), "nine trailheads");
        assert_eq!(36, score_total(&grid));
        assert_eq!(81, rating_total(&grid));
        Ok(())
    }

    #[rstest]
    #[case("0123\n1234\n8765\n9876", 1)]
    #[case(
        "...0...
...1...
...2...
6543456
7.....7
8.....8
9.....9",
        2
    )]
    #[case(
        "..90..9
...1.98
...2..7
6543456
765.987
876....
987....",
        4
    )]
    #[case(
        "10..9..
2...8..
3...7..
4567654
...8..3
...9..2
.....01",
        3
    )]
    fn test_scores(#[case] input: &str, #[case] expected: usize) -> miette::Result<()> {
        let grid = Grid::parse(input)?;
        assert_eq!(expected, score_total(&grid));
        Ok(())
    }

    #[rstest]
    #[case("0123\n1234\n8765\n9876", 16)]
    #[case(
        ".....0.
..4321.
..5..2.
..6543.
..7..4.
..8765.
..9....",
        3
    )]
    #[case(
        "..90..9
...1.98
...2..7
6543456
765.987
876....
987....",
        13
    )]
    #[case(
        "012345
123456
234567
345678
4.6789
56789.",
        227
    )]
    fn test_ratings(#[case] input: &str, #[case] expected: usize) -> miette::Result<()> {
        let grid = Grid::parse(input)?;
        assert_eq!(expected, rating_total(&grid));
        Ok(())
    }

    #[test]
    fn test_trail_shape() -> miette::Result<()> {
        let grid = Grid::parse("0123456789")?;
        let trails = find_trails(&grid);

        assert_eq!(1, trails.len());
        let head = Point::new(0, 0);
        assert_eq!(1, trails[&head].len());

        let trail = &trails[&head][0];
        assert_eq!(10, trail.len());
        assert_eq!(head, trail[0]);
        assert_eq!(Point::new(9, 0), *trail.last().unwrap());
        for pair in trail.windows(2) {
            assert_eq!(1, (pair[1].x - pair[0].x).abs() + (pair[1].y - pair[0].y).abs());
        }
        Ok(())
    }

    #[test]
    fn test_score_never_exceeds_rating() -> miette::Result<()> {
        let grid = Grid::parse(TOPO)?;
        for trails in find_trails(&grid).values() {
            assert!(score(trails) <= rating(trails));
        }
        Ok(())
    }

    #[test]
    fn test_no_trailheads_is_empty() -> miette::Result<()> {
        let grid = Grid::parse("987\n876\n765")?;
        let trails = find_trails(&grid);

        assert!(trails.is_empty());
        assert_eq!(0, score_total(&grid));
        assert_eq!(0, rating_total(&grid));
        Ok(())
    }

    #[test]
    fn test_dead_ends_are_not_trails() -> miette::Result<()> {
        // 0 through 3 then nowhere to go: no trail reaches a summit.
        let grid = Grid::parse("0123")?;
        assert!(find_trails(&grid).is_empty());
        Ok(())
    }

    #[test]
    fn test_search_is_deterministic() -> miette::Result<()> {
        let grid = Grid::parse(TOPO)?;
        assert_eq!(find_trails(&grid), find_trails(&grid));
        Ok(())
    }
}
