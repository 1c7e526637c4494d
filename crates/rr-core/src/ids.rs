//! Strongly typed, zero-cost identifier wrappers.
//!
//! These are *internal* dense indices assigned by the network builder, not
//! the identifiers found in map data.  External ids (OSM node ids, CSV `id`
//! columns) are plain `i64`s and are translated at the `RoadNetwork` boundary.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and heap
//! entries without ceremony.  The inner integer is `pub` to allow direct
//! indexing into the network's SoA `Vec`s, but callers should prefer the
//! `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a road-network node (intersection or way vertex).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road-network edge.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index into the network's interned road-name table.
    pub struct NameId(u32);
}

impl NameId {
    /// The name shared by every edge whose source data carried no name (or an
    /// empty one).  Always slot 0 of the name table.
    pub const UNNAMED: NameId = NameId(0);

    #[inline]
    pub fn is_unnamed(self) -> bool {
        self == Self::UNNAMED
    }
}
