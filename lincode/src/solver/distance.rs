//! Exhaustive search for the minimum distance of a code

use crate::Matrix;
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Iterator over the `k`-element subsets of `0..n`, in lexicographic order
///
/// ```
/// use lincode::solver::Combinations;
///
/// let all: Vec<_> = Combinations::new(4, 2).collect();
/// assert_eq!(all[0], vec![0, 1]);
/// assert_eq!(all[5], vec![2, 3]);
/// assert_eq!(all.len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Combinations {
            n,
            indices: (0..k).collect(),
            done: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        // bump the rightmost index that still has room, then reset everything after it
        let k = self.indices.len();
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(current)
    }
}

#[inline]
fn sums_to_zero(h: &Matrix, cols: &[usize]) -> bool {
    matches!(h.column_sum(cols), Ok(sum) if sum.is_zero())
}

#[cfg(feature = "parallel")]
fn has_dependent_subset(h: &Matrix, size: usize) -> bool {
    Combinations::new(h.cols(), size)
        .par_bridge()
        .any(|cols| sums_to_zero(h, &cols))
}

#[cfg(not(feature = "parallel"))]
fn has_dependent_subset(h: &Matrix, size: usize) -> bool {
    Combinations::new(h.cols(), size).any(|cols| sums_to_zero(h, &cols))
}

/// The smallest number of columns of `h` that sum to zero mod 2
///
/// Applied to a parity-check matrix this is the minimum distance of the code. Subsets are tried
/// by increasing size, so the cost is exponential in the number of columns. Returns
/// `h.cols() + 1` if the columns are linearly independent.
pub fn min_distance(h: &Matrix) -> usize {
    let n = h.cols();
    for size in 1..=n {
        if has_dependent_subset(h, size) {
            debug!("found {} dependent columns", size);
            return size;
        }
    }
    n + 1
}
