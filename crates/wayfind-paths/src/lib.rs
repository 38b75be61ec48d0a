//! A* shortest-path search over walkable/blocked grids.
//!
//! This crate provides:
//!
//! - **A\*** search on a 4-connected [`Grid`](wayfind_core::Grid) with the
//!   [`manhattan`] heuristic ([`search`], [`search_detailed`])
//! - an **indexed min-heap** ([`IndexedMinHeap`]) whose key → slot map makes
//!   priority updates `O(log n)` without scanning the queue
//!
//! Every search owns its queue and bookkeeping; the grid is only read, so one
//! grid can be shared between concurrent searches.
//!
//! ```
//! use wayfind_core::{Grid, Point};
//!
//! let grid = Grid::parse("
//! .#.
//! ...
//! ").unwrap();
//! let path = wayfind_paths::search(Point::new(0, 0), Point::new(0, 2), &grid).unwrap();
//! assert_eq!(path.len(), 5);
//! ```

mod distance;
mod heap;
mod search;

pub use distance::manhattan;
pub use heap::{HeapEntry, IndexedMinHeap};
pub use search::{PathResult, search, search_detailed};
