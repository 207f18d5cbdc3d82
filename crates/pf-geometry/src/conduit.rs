//! Per-conduit value triples and their per-network arrays.

use core::fmt;
use core::ops::{Index, IndexMut};

use pf_core::{Real, ThroatId, series};

use crate::error::{GeometryError, GeometryResult};

/// One of the three segments of a conduit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    Pore1,
    Throat,
    Pore2,
}

impl Segment {
    pub const ALL: [Segment; 3] = [Segment::Pore1, Segment::Throat, Segment::Pore2];
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Segment::Pore1 => "pore1",
            Segment::Throat => "throat",
            Segment::Pore2 => "pore2",
        })
    }
}

/// A value for each segment of one conduit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segments<T> {
    pub pore1: T,
    pub throat: T,
    pub pore2: T,
}

impl<T> Segments<T> {
    pub fn new(pore1: T, throat: T, pore2: T) -> Self {
        Self {
            pore1,
            throat,
            pore2,
        }
    }

    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Segment) -> T,
    {
        Self::new(f(Segment::Pore1), f(Segment::Throat), f(Segment::Pore2))
    }

    pub fn map<U, F>(self, mut f: F) -> Segments<U>
    where
        F: FnMut(T) -> U,
    {
        Segments::new(f(self.pore1), f(self.throat), f(self.pore2))
    }

    pub fn to_array(self) -> [T; 3] {
        [self.pore1, self.throat, self.pore2]
    }
}

impl Segments<Real> {
    /// Series combination of the three segment conductances.
    pub fn series(&self) -> Real {
        series([self.pore1, self.throat, self.pore2])
    }
}

impl<T> Index<Segment> for Segments<T> {
    type Output = T;

    fn index(&self, s: Segment) -> &T {
        match s {
            Segment::Pore1 => &self.pore1,
            Segment::Throat => &self.throat,
            Segment::Pore2 => &self.pore2,
        }
    }
}

impl<T> IndexMut<Segment> for Segments<T> {
    fn index_mut(&mut self, s: Segment) -> &mut T {
        match s {
            Segment::Pore1 => &mut self.pore1,
            Segment::Throat => &mut self.throat,
            Segment::Pore2 => &mut self.pore2,
        }
    }
}

/// Raw conduit description read from the network, before lengths are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConduitInput {
    pub diameters: Segments<Real>,
    /// Center-to-center distance of the two pores.
    pub ctc: Real,
    /// Explicit throat length, if the network carries one.
    pub throat_length: Option<Real>,
}

/// Resolved conduit dimensions: a diameter and a length per segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConduitDims {
    pub diameters: Segments<Real>,
    pub lengths: Segments<Real>,
}

/// Three parallel per-throat arrays, one per conduit segment.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentArrays {
    pub pore1: Vec<Real>,
    pub throat: Vec<Real>,
    pub pore2: Vec<Real>,
}

/// Per-throat segment lengths.
pub type ConduitLengths = SegmentArrays;

/// Per-throat segment conductances.
pub type ConduitSegments = SegmentArrays;

impl SegmentArrays {
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Segments<Real>>,
    {
        let rows = rows.into_iter();
        let (lower, _) = rows.size_hint();
        let mut out = Self {
            pore1: Vec::with_capacity(lower),
            throat: Vec::with_capacity(lower),
            pore2: Vec::with_capacity(lower),
        };
        for r in rows {
            out.pore1.push(r.pore1);
            out.throat.push(r.throat);
            out.pore2.push(r.pore2);
        }
        out
    }

    /// Number of throats; errors if the three arrays disagree.
    pub fn checked_len(&self) -> GeometryResult<usize> {
        let n = self.pore1.len();
        for actual in [self.throat.len(), self.pore2.len()] {
            if actual != n {
                return Err(GeometryError::LengthMismatch {
                    expected: n,
                    actual,
                });
            }
        }
        Ok(n)
    }

    pub fn len(&self) -> usize {
        self.pore1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pore1.is_empty()
    }

    pub fn row(&self, throat: ThroatId) -> Segments<Real> {
        let i = throat.as_usize();
        Segments::new(self.pore1[i], self.throat[i], self.pore2[i])
    }

    /// Series combination per throat.
    pub fn combined(&self) -> Vec<Real> {
        (0..self.len())
            .map(|i| series([self.pore1[i], self.throat[i], self.pore2[i]]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_by_segment() {
        let mut s = Segments::new(1.0, 2.0, 3.0);
        s[Segment::Throat] = 5.0;
        assert_eq!(s.to_array(), [1.0, 5.0, 3.0]);
        assert_eq!(
            Segments::from_fn(|seg| seg == Segment::Pore2),
            Segments::new(false, false, true)
        );
    }

    #[test]
    fn series_of_segments() {
        let s = Segments::new(2.0, 2.0, Real::INFINITY);
        assert!((s.series() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn arrays_round_trip_rows() {
        let arr = SegmentArrays::from_rows([
            Segments::new(1.0, 1.0, 1.0),
            Segments::new(2.0, 4.0, 4.0),
        ]);
        assert_eq!(arr.checked_len(), Ok(2));
        assert_eq!(arr.row(ThroatId::from_index(1)), Segments::new(2.0, 4.0, 4.0));
        let g = arr.combined();
        assert!((g[0] - 1.0 / 3.0).abs() < 1e-15);
        assert!((g[1] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn ragged_arrays_are_rejected() {
        let arr = SegmentArrays {
            pore1: vec![1.0, 1.0],
            throat: vec![1.0],
            pore2: vec![1.0, 1.0],
        };
        assert_eq!(
            arr.checked_len(),
            Err(GeometryError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }
}
