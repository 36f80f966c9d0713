//! Paths over a [`FlagGrid`](rlfl_core::FlagGrid).
//!
//! - **Line traces** ([`trace_line`]): projection lines that stop at walls,
//!   occupants, the destination or the range limit, steered by
//!   [`ProjectFlags`](rlfl_core::ProjectFlags).
//! - **A\*** shortest paths ([`astar_path`], or [`find_path`] for a stored
//!   [`Path`] that also marks the grid).
//! - **Dijkstra** distance fields ([`DistanceField`]) and the [`PathMap`]s built
//!   from them for greedy approach and flee stepping.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | distance fields |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`FlagPather`] implements all three over cell flags.

mod astar;
mod dijkstra;
mod line;
mod path;
mod pather;
mod pathmap;
mod traits;

pub use astar::astar_path;
pub use dijkstra::DistanceField;
pub use line::trace_line;
pub use path::{Path, PathKind, PathOptions, find_path};
pub use pather::{ASTAR_DIRS, FlagPather, MAP_DIRS};
pub use pathmap::PathMap;
pub use traits::{AstarPather, Pather, WeightedPather};
