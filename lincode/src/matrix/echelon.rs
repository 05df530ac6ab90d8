//! Gauss-Jordan elimination over GF(2)

use super::Matrix;
use log::{debug, trace};

impl Matrix {
    /// Main working function for row-reduction
    ///
    /// Reduces every element mod 2, then performs Gauss-Jordan elimination using only the first
    /// `limit` columns as pivot candidates. For each candidate column the first row at or below
    /// the current pivot row with a 1 in that column is swapped into place and added to every
    /// other row with a 1 there. Columns without such a row are skipped. Returns the pivot
    /// columns in order.
    pub fn eliminate(&mut self, limit: usize) -> Vec<usize> {
        for row in self.rows.iter_mut() {
            *row = row.mod2();
        }

        let limit = usize::min(limit, self.cols());
        let mut row = 0;
        let mut pcol = 0;
        let mut pcols = vec![];
        while row < self.rows() {
            let mut next_row = None;
            'outer: while pcol < limit {
                for i in row..self.rows() {
                    if self.rows[i][pcol] != 0 {
                        next_row = Some(i);
                        break 'outer;
                    }
                }
                trace!("column {} has no pivot at or below row {}", pcol, row);
                pcol += 1;
            }

            let Some(row1) = next_row else {
                break;
            };

            if row != row1 {
                trace!("swapping rows {} and {}", row, row1);
                self.rows.swap(row, row1);
            }

            let pivot = self.rows[row].clone();
            for (i, target) in self.rows.iter_mut().enumerate() {
                if i != row && target[pcol] != 0 {
                    trace!("row {} += row {}", i, row);
                    for (x, &p) in target.iter_mut().zip(pivot.as_slice()) {
                        *x ^= p;
                    }
                }
            }

            pcols.push(pcol);
            row += 1;
            pcol += 1;
        }

        pcols
    }

    /// Transforms the matrix in place into reduced row echelon form over GF(2)
    #[inline]
    pub fn rref_inplace(&mut self) {
        self.eliminate(self.cols());
    }

    /// Returns the reduced row echelon form of the matrix, leaving `self` untouched
    #[inline]
    pub fn rref(&self) -> Self {
        let mut m = self.clone();
        m.rref_inplace();
        m
    }

    /// Rank over GF(2)
    #[inline]
    pub fn rank(&self) -> usize {
        self.clone().eliminate(self.cols()).len()
    }

    /// Returns a basis for the row space, in reduced row echelon form
    ///
    /// Zero rows and repeated rows left by the reduction are dropped, then the survivors are
    /// reduced again.
    pub fn basis(&self) -> Self {
        let mut base = self.rref();

        let mut to_remove = vec![false; base.rows()];
        for i in 0..base.rows() {
            if base.rows[i].is_zero() {
                debug!("row {} is zero, removing", i);
                to_remove[i] = true;
                continue;
            }
            for j in (i + 1)..base.rows() {
                if base.rows[i] == base.rows[j] {
                    debug!("row {} repeats row {}, removing", j, i);
                    to_remove[j] = true;
                }
            }
        }

        // remove from the back so earlier indices stay valid
        for i in (0..to_remove.len()).rev() {
            if to_remove[i] {
                base.rows.remove(i);
            }
        }

        base.rref_inplace();
        base
    }
}
