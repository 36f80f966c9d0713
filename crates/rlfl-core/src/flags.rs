//! Bitmasks stored in map cells ([`CellFlags`]) and passed to the projection
//! engine ([`ProjectFlags`]).

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::error::{Error, Result};

macro_rules! mask_ops {
    ($name:ident) => {
        impl BitOr for $name {
            type Output = Self;
            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            #[inline]
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl BitAnd for $name {
            type Output = Self;
            #[inline]
            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }

        impl BitAndAssign for $name {
            #[inline]
            fn bitand_assign(&mut self, rhs: Self) {
                self.0 &= rhs.0;
            }
        }

        impl Not for $name {
            type Output = Self;
            #[inline]
            fn not(self) -> Self {
                Self(!self.0)
            }
        }

        impl $name {
            /// Whether this mask contains all bits of `other`.
            #[inline]
            pub const fn contains(self, other: Self) -> bool {
                (self.0 & other.0) == other.0
            }

            /// Whether this mask shares at least one bit with `other`.
            #[inline]
            pub const fn intersects(self, other: Self) -> bool {
                (self.0 & other.0) != 0
            }

            #[inline]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            /// Raw bit value.
            #[inline]
            pub const fn bits(self) -> u16 {
                self.0
            }
        }
    };
}

// ---------------------------------------------------------------------------
// CellFlags
// ---------------------------------------------------------------------------

/// Per-cell state bits.
///
/// Terrain bits (`OPEN`, `WALK`, `PERM`, ...) are written by the host; the
/// FOV and path engines write `SEEN`, `MEMO` and `PATH`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFlags(pub u16);

impl CellFlags {
    pub const NONE: Self = Self(0);
    pub const DARK: Self = Self(0x0001);
    /// Light passes through.
    pub const OPEN: Self = Self(0x0002);
    pub const VIEW: Self = Self(0x0004);
    pub const LIT: Self = Self(0x0008);
    /// Creatures can walk here.
    pub const WALK: Self = Self(0x0010);
    /// Remembered by the viewer.
    pub const MEMO: Self = Self(0x0020);
    /// Currently in view.
    pub const SEEN: Self = Self(0x0040);
    pub const ROOM: Self = Self(0x0080);
    pub const GLOW: Self = Self(0x0100);
    /// On the most recently created path.
    pub const PATH: Self = Self(0x0200);
    /// Occupied by a creature.
    pub const OCCUPIED: Self = Self(0x0400);
    pub const REFLECTS: Self = Self(0x0800);
    /// Permanent wall, stops even `THRU` projections.
    pub const PERMANENT: Self = Self(0x1000);
    /// Target cell for custom path maps.
    pub const GOAL: Self = Self(0x2000);
    pub const PASS: Self = Self(0x4000);
    pub const MARK: Self = Self(0x8000);

    /// The bits set by a field-of-view computation.
    pub const FOV: Self = Self(Self::SEEN.0 | Self::MEMO.0);
    /// Every defined bit.
    pub const MASK: Self = Self(0xFFFF);

    /// Validated constructor for raw bits coming from outside the type system.
    ///
    /// Fails with [`Error::InvalidFlag`] when a bit outside [`Self::MASK`] is set.
    pub fn from_bits(bits: u32) -> Result<Self> {
        u16::try_from(bits)
            .map(Self)
            .map_err(|_| Error::InvalidFlag(bits))
    }
}

mask_ops!(CellFlags);

const CELL_NAMES: [&str; 16] = [
    "DARK", "OPEN", "VIEW", "LIT", "WALK", "MEMO", "SEEN", "ROOM", "GLOW", "PATH", "OCCUPIED",
    "REFLECTS", "PERMANENT", "GOAL", "PASS", "MARK",
];

impl fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("CellFlags(NONE)");
        }
        f.write_str("CellFlags(")?;
        let mut first = true;
        for (bit, name) in CELL_NAMES.iter().enumerate() {
            if self.0 & (1 << bit) != 0 {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        f.write_str(")")
    }
}

// ---------------------------------------------------------------------------
// ProjectFlags
// ---------------------------------------------------------------------------

/// Behaviour switches for traces and projections.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectFlags(pub u16);

impl ProjectFlags {
    pub const NONE: Self = Self(0);
    /// Keep tracing past the target.
    pub const BEAM: Self = Self(0x0001);
    /// Stop at the first occupied cell.
    pub const STOP: Self = Self(0x0002);
    pub const BALL: Self = Self(0x0004);
    /// Spread as a cone (breath) along the trace.
    pub const CONE: Self = Self(0x0008);
    pub const JUMP: Self = Self(0x0010);
    /// Pass through walls that are not permanent.
    pub const THRU: Self = Self(0x0020);
    pub const WAVE: Self = Self(0x0040);
    /// Trace away from the target instead of toward it.
    pub const REVERSE: Self = Self(0x0080);
    /// Continue past the target.
    pub const PASS: Self = Self(0x0100);
    /// Only the outer ring of the area effect.
    pub const SHELL: Self = Self(0x0200);
    pub const DIAMOND: Self = Self(0x0400);
    pub const SQUARE: Self = Self(0x0800);

    pub const MASK: Self = Self(0x0FFF);

    /// Validated constructor for raw bits.
    pub fn from_bits(bits: u32) -> Result<Self> {
        if bits & !u32::from(Self::MASK.0) != 0 {
            return Err(Error::InvalidFlag(bits));
        }
        Ok(Self(bits as u16))
    }
}

mask_ops!(ProjectFlags);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_flag_ops() {
        let f = CellFlags::OPEN | CellFlags::WALK;
        assert!(f.contains(CellFlags::OPEN));
        assert!(f.intersects(CellFlags::WALK | CellFlags::GLOW));
        assert!(!f.contains(CellFlags::WALK | CellFlags::GLOW));
        assert_eq!(f & !CellFlags::OPEN, CellFlags::WALK);
        assert_eq!(CellFlags::FOV.bits(), 0x60);
    }

    #[test]
    fn test_from_bits_rejects_unknown_bits() {
        assert_eq!(CellFlags::from_bits(0x2002).unwrap(), CellFlags::GOAL | CellFlags::OPEN);
        assert_eq!(CellFlags::from_bits(0).unwrap(), CellFlags::NONE);
        assert!(matches!(
            CellFlags::from_bits(0x1_0000),
            Err(Error::InvalidFlag(0x1_0000))
        ));
        assert!(ProjectFlags::from_bits(0x0800).is_ok());
        assert!(ProjectFlags::from_bits(0x1000).is_err());
    }

    #[test]
    fn test_debug_lists_names() {
        let s = format!("{:?}", CellFlags::OPEN | CellFlags::SEEN);
        assert_eq!(s, "CellFlags(OPEN | SEEN)");
        assert_eq!(format!("{:?}", CellFlags::NONE), "CellFlags(NONE)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let f = CellFlags::OPEN | CellFlags::MARK;
        let json = serde_json::to_string(&f).unwrap();
        let back: CellFlags = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
