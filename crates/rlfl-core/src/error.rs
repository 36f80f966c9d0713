use crate::geom::Point;

/// Errors returned by every fallible operation of the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Generic(&'static str),

    #[error("grid handle does not refer to a live grid")]
    NoMap,

    #[error("flag bits {0:#x} are outside the cell mask")]
    InvalidFlag(u32),

    #[error("path handle does not refer to a live path or path map")]
    NoPath,

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Point),

    #[error("projection handle does not refer to a live projection")]
    NoProjection,

    #[error("grid size {width}x{height} is not allowed")]
    SizeError { width: i32, height: i32 },

    #[error("{0} registry is full")]
    RegistryFull(&'static str),

    #[error("no path between the requested cells")]
    NoPathFound,

    #[error("radius {0} exceeds the maximum")]
    InvalidRadius(u32),
}

impl Error {
    /// Negative integer code used by C-style bindings.
    pub fn code(&self) -> i32 {
        match self {
            Error::Generic(_) | Error::InvalidRadius(_) => -1,
            Error::NoMap => -2,
            Error::InvalidFlag(_) => -3,
            Error::NoPath => -4,
            Error::OutOfBounds(_) => -5,
            Error::NoProjection => -6,
            Error::SizeError { .. } => -7,
            Error::RegistryFull(_) => -8,
            Error::NoPathFound => -9,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
