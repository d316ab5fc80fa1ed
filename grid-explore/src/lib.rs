//! Grid exploration primitives for character-grid puzzles.
//!
//! Three pieces built on a shared [`Grid`] index:
//! - flood-fill partitioning of a grid into maximal same-value patches,
//! - fence pricing per patch, by perimeter or by side count
//!   (sides are counted as corners),
//! - memoized search for monotonic height trails from '0' cells to '9'
//!   cells, with per-trailhead score and rating.

pub mod grid;
pub mod point;
pub mod regions;
pub mod trails;

pub use grid::{Grid, GridError};
pub use point::Point;
pub use regions::{partition, Corner, Patch};
pub use trails::{find_trails, rating, score, Trail};
