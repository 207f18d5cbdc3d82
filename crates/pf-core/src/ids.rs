use core::fmt;
use core::num::NonZeroU32;

/// Compact identifier for pores and throats.
///
/// Stores `index + 1` in a `NonZeroU32` so `Option<Id>` costs nothing extra.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index.
    pub fn from_index(index: u32) -> Self {
        Self(NonZeroU32::MIN.saturating_add(index))
    }

    /// Create an Id from a 0-based `usize` index (saturates at `u32::MAX - 1`).
    pub fn from_usize(index: usize) -> Self {
        Self::from_index(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The 0-based index as `usize`, ready for slice indexing.
    pub fn as_usize(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

pub type PoreId = Id;
pub type ThroatId = Id;

/// Convenience: map a slice of raw indices to ids.
pub fn ids_from_indices(indices: &[usize]) -> Vec<Id> {
    indices.iter().map(|&i| Id::from_usize(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_usize, 1, 2, 42, 10_000] {
            let id = Id::from_usize(i);
            assert_eq!(id.as_usize(), i);
        }
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<Id>(),
            core::mem::size_of::<Option<Id>>()
        );
    }

    #[test]
    fn ordering_follows_index() {
        let mut ids = ids_from_indices(&[5, 1, 3]);
        ids.sort();
        assert_eq!(ids, ids_from_indices(&[1, 3, 5]));
    }
}
