use rlfl_core::Handle;

macro_rules! typed_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub(crate) Handle);

        impl $name {
            /// Slot index, stable while the handle is live.
            pub fn index(self) -> usize {
                self.0.index()
            }
        }
    };
}

typed_handle!(
    /// A live grid.
    GridId
);

typed_handle!(
    /// A stored path.
    PathId
);

typed_handle!(
    /// A stored projection.
    ProjectionId
);

/// A path map, owned by the grid it was computed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathMapId {
    pub(crate) grid: GridId,
    pub(crate) map: Handle,
}

impl PathMapId {
    pub fn grid(self) -> GridId {
        self.grid
    }

    pub fn index(self) -> usize {
        self.map.index()
    }
}
