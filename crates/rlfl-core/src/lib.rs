//! Core types shared by the rlfl crates.
//!
//! - [`Point`] and [`Range`] geometry
//! - [`CellFlags`] and [`ProjectFlags`] bitmasks
//! - [`FlagGrid`], the map every engine operates on
//! - [`distance`], the approximate metric used for ranges and radii
//! - [`Error`] and [`Result`]
//! - [`SlotTable`] and [`Handle`] for bounded registries
//! - [`Limits`] configuration

mod distance;
mod error;
mod flags;
mod geom;
mod grid;
mod limits;
mod slots;

pub use distance::{chebyshev, distance, manhattan};
pub use error::{Error, Result};
pub use flags::{CellFlags, ProjectFlags};
pub use geom::{Point, Range, RangeIter};
pub use grid::FlagGrid;
pub use limits::Limits;
pub use slots::{Handle, SlotTable};
