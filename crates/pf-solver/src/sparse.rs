//! Compressed sparse row storage for the conductance matrix.
//!
//! The matrix is built once from coordinate triplets. Duplicate entries are
//! summed after sorting, so the result does not depend on emission order.
//! The sparsity pattern is fixed afterwards; only values change.

use nalgebra::DVector;
use pf_core::Real;

/// Square CSR matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    n: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<Real>,
}

impl CsrMatrix {
    /// Build an `n x n` matrix from `(row, col, value)` triplets.
    ///
    /// Entries outside `0..n` are ignored. Duplicates are summed; explicit
    /// zeros keep their slot in the pattern.
    pub fn from_triplets(n: usize, mut triplets: Vec<(usize, usize, Real)>) -> Self {
        triplets.retain(|&(r, c, _)| r < n && c < n);
        triplets.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut row_ptr = vec![0; n + 1];
        let mut col_idx: Vec<usize> = Vec::with_capacity(triplets.len());
        let mut values: Vec<Real> = Vec::with_capacity(triplets.len());
        let mut last: Option<(usize, usize)> = None;
        for (r, c, v) in triplets {
            if last == Some((r, c)) {
                if let Some(acc) = values.last_mut() {
                    *acc += v;
                }
            } else {
                col_idx.push(c);
                values.push(v);
                row_ptr[r + 1] += 1;
                last = Some((r, c));
            }
        }
        for i in 0..n {
            row_ptr[i + 1] += row_ptr[i];
        }

        Self {
            n,
            row_ptr,
            col_idx,
            values,
        }
    }

    pub fn nrows(&self) -> usize {
        self.n
    }

    /// Stored entries, including explicit zeros.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// `(col, value)` pairs of one row in column order.
    pub fn row(&self, i: usize) -> impl Iterator<Item = (usize, Real)> + '_ {
        let span = self.row_ptr[i]..self.row_ptr[i + 1];
        self.col_idx[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }

    fn position(&self, i: usize, j: usize) -> Option<usize> {
        let start = self.row_ptr[i];
        let cols = &self.col_idx[start..self.row_ptr[i + 1]];
        cols.binary_search(&j).ok().map(|k| start + k)
    }

    /// Entry `(i, j)`, zero if outside the pattern.
    pub fn get(&self, i: usize, j: usize) -> Real {
        if i >= self.n || j >= self.n {
            return 0.0;
        }
        self.position(i, j).map_or(0.0, |k| self.values[k])
    }

    /// Overwrite an entry inside the pattern. Returns `false` if `(i, j)` is
    /// not stored.
    pub fn set(&mut self, i: usize, j: usize, value: Real) -> bool {
        if i >= self.n || j >= self.n {
            return false;
        }
        match self.position(i, j) {
            Some(k) => {
                self.values[k] = value;
                true
            }
            None => false,
        }
    }

    pub fn diagonal(&self) -> DVector<Real> {
        DVector::from_iterator(self.n, (0..self.n).map(|i| self.get(i, i)))
    }

    pub fn row_sums(&self) -> Vec<Real> {
        (0..self.n).map(|i| self.row(i).map(|(_, v)| v).sum()).collect()
    }

    /// `y = A x`.
    pub fn mul_vec_into(&self, x: &DVector<Real>, y: &mut DVector<Real>) {
        for i in 0..self.n {
            y[i] = self.row(i).map(|(j, a)| a * x[j]).sum();
        }
    }

    pub fn mul_vec(&self, x: &DVector<Real>) -> DVector<Real> {
        let mut y = DVector::zeros(self.n);
        self.mul_vec_into(x, &mut y);
        y
    }

    pub fn is_symmetric(&self, tol: Real) -> bool {
        (0..self.n).all(|i| self.row(i).all(|(j, a)| (a - self.get(j, i)).abs() <= tol))
    }

    /// Fix `x[i] = v` for each `(i, v)` while keeping the matrix symmetric.
    ///
    /// Requires a structurally symmetric matrix with a stored diagonal for
    /// every pinned row. Column `i` is moved to the right-hand side of the
    /// free rows, then row and column `i` are cleared. The pinned row keeps
    /// its diagonal `d` (one if `d` is not positive) and reads `d x[i] = d v`,
    /// so every row stays in the units of the assembled matrix.
    pub fn pin_symmetric(&mut self, b: &mut DVector<Real>, fixed: &[(usize, Real)]) {
        let mut pinned = vec![false; self.n];
        for &(i, _) in fixed {
            pinned[i] = true;
        }

        // Column i equals row i before any clearing.
        for &(i, v) in fixed {
            let span = self.row_ptr[i]..self.row_ptr[i + 1];
            for k in span {
                let r = self.col_idx[k];
                if !pinned[r] {
                    b[r] -= self.values[k] * v;
                }
            }
        }

        for &(i, v) in fixed {
            let d = self.get(i, i);
            let scale = if d > 0.0 { d } else { 1.0 };
            let span = self.row_ptr[i]..self.row_ptr[i + 1];
            for k in span {
                let j = self.col_idx[k];
                if j == i {
                    self.values[k] = scale;
                } else {
                    self.values[k] = 0.0;
                    self.set(j, i, 0.0);
                }
            }
            b[i] = scale * v;
        }
    }
}
