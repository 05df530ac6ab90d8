//! Derivation of linear codes from matrices over GF(2)
//!
//! [`solve`] takes any set of rows spanning a code, reduces them to a generator matrix `G`,
//! derives the parity-check matrix `H` and computes the minimum distance. [`hamming`] builds the
//! canonical Hamming codes directly.

pub mod distance;

pub use distance::{min_distance, Combinations};

use crate::{error::CodeError, LinearCode, Matrix, Row};
use log::{debug, warn};

/// Checks `G · Hᵗ ≡ 0 (mod 2)`
pub fn are_orthogonal(g: &Matrix, h: &Matrix) -> bool {
    if h.rows() == 0 {
        return true;
    }
    g.try_mul(&h.transposed())
        .map(|product| product.mod2().is_zero())
        .unwrap_or(false)
}

/// Derives a parity-check matrix for the code spanned by the rows of `generator`
///
/// The rows are first reduced to a basis `G` (k by n). If `G = (I | A)` then `H = (Aᵗ | I)`.
/// Otherwise `(Gᵗ | I_n)` is row-reduced on its first `k` columns; the last `n - k` rows then
/// have a zero left block, and their right block spans the null space of `G`.
///
/// Returns `None` if the result is not an `(n - k)` by `n` matrix orthogonal to `G`.
pub fn parity_check_matrix(generator: &Matrix) -> Option<Matrix> {
    let g = generator.basis();
    let (k, n) = g.shape();

    let h = if g.is_systematic() {
        debug!("generator is systematic, taking H = (A^t | I)");
        let a = g.split(.., k..);
        match a.transposed().hstack(&Matrix::identity(n - k)) {
            Ok(h) => h,
            Err(e) => {
                warn!("could not assemble parity-check matrix: {}", e);
                return None;
            }
        }
    } else {
        debug!("generator is not systematic, reducing (G^t | I)");
        let mut augmented = match g.transposed().hstack(&Matrix::identity(n)) {
            Ok(m) => m,
            Err(e) => {
                warn!("could not augment transposed generator: {}", e);
                return None;
            }
        };
        augmented.eliminate(k);
        augmented.split(k.., k..).basis()
    };

    if h.rows() != n - k || !are_orthogonal(&g, &h) {
        warn!(
            "derived parity-check matrix is unusable: {} rows for n - k = {}",
            h.rows(),
            n - k
        );
        return None;
    }
    Some(h)
}

/// Builds the Hamming code with `t` parity bits
///
/// The code has length `n = 2^t - 1`, dimension `n - t` and distance 3. The columns of `H` are
/// the binary forms of `n, n - 1, ..., 1`, most significant bit first, and `G` is the dual of
/// `H`.
pub fn hamming(t: u32) -> Result<LinearCode, CodeError> {
    if t < 2 || t >= usize::BITS {
        return Err(CodeError::InvalidHammingParameter(t));
    }
    let n = (1usize << t) - 1;

    let mut h = Matrix::zeros(t as usize, 0);
    for value in (1..=n).rev() {
        let column: Row = (0..t).rev().map(|bit| (value >> bit) & 1 == 1).collect();
        h.push_column(&column)?;
    }

    let g = parity_check_matrix(&h).ok_or(CodeError::MissingParityCheck)?;
    debug!("built Hamming code [{}, {}, 3]", n, g.rows());
    Ok(LinearCode::with_distance(g, h, 3))
}

/// Computes the linear code spanned by the rows of `matrix`
///
/// The rows may be any elements of the code, dependent or repeated. If no parity-check matrix
/// can be derived the code is returned without one and syndrome decoding is unavailable.
pub fn solve(matrix: &Matrix) -> Result<LinearCode, CodeError> {
    let g = matrix.basis();
    if g.rows() == 0 {
        return Err(CodeError::DegenerateCode);
    }
    debug!("generator has shape {:?}", g.shape());

    match parity_check_matrix(&g) {
        Some(h) => {
            let d = min_distance(&h);
            Ok(LinearCode::with_distance(g, h, d))
        }
        None => Ok(LinearCode::from_generator(g)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Element;
    use rand::{rngs::SmallRng, SeedableRng};

    fn m(data: &[&[Element]]) -> Matrix {
        Matrix::from_vecs(data.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn systematic_parity_check() {
        let g = m(&[&[1, 0, 1, 1], &[0, 1, 1, 0]]);
        let h = parity_check_matrix(&g).unwrap();
        assert_eq!(h, m(&[&[1, 1, 1, 0], &[1, 0, 0, 1]]));
        assert!(are_orthogonal(&g, &h));
    }

    #[test]
    fn non_systematic_parity_check() {
        let g = m(&[&[0, 1, 1, 1, 0, 0], &[0, 1, 1, 0, 1, 1]]);
        let h = parity_check_matrix(&g).unwrap();
        assert_eq!(h.shape(), (4, 6));
        assert!(are_orthogonal(&g, &h));
        assert_eq!(h.rank(), 4);
    }

    #[test]
    fn full_rank_generator_has_empty_parity_check() {
        let h = parity_check_matrix(&Matrix::identity(3)).unwrap();
        assert_eq!(h.rows(), 0);
    }

    #[test]
    fn random_generators_are_orthogonal() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..30 {
            let a = Matrix::random(&mut rng, 4, 9);
            let g = a.basis();
            let h = parity_check_matrix(&a).unwrap();
            assert_eq!(h.rows(), 9 - g.rows());
            assert!(are_orthogonal(&g, &h));
            assert!(are_orthogonal(&a, &h));
        }
    }

    #[test]
    fn hamming_3() {
        let code = hamming(3).unwrap();
        let params = code.parameters().unwrap();
        assert_eq!((params.n, params.k, params.d), (7, 4, 3));
        assert_eq!(params.m, 16);
        let h = code.parity_check().unwrap();
        assert_eq!(
            h,
            &m(&[
                &[1, 1, 1, 1, 0, 0, 0],
                &[1, 1, 0, 0, 1, 1, 0],
                &[1, 0, 1, 0, 1, 0, 1],
            ])
        );
        assert!(are_orthogonal(code.generator().unwrap(), h));
        assert_eq!(min_distance(h), 3);
    }

    #[test]
    fn hamming_parameters_rejected() {
        assert_eq!(
            hamming(1).unwrap_err(),
            CodeError::InvalidHammingParameter(1)
        );
        assert!(hamming(0).is_err());
        assert!(hamming(usize::BITS).is_err());
    }

    #[test]
    fn solve_min_distance_example() {
        let code = solve(&m(&[&[1, 0, 1, 1], &[0, 1, 1, 0]])).unwrap();
        assert_eq!(code.distance().unwrap(), 2);
    }

    #[test]
    fn solve_drops_dependent_rows() {
        let code = solve(&m(&[
            &[0, 1, 1, 1, 0, 0],
            &[0, 1, 1, 0, 1, 1],
            &[0, 0, 0, 1, 1, 1],
            &[0, 0, 0, 0, 0, 0],
        ]))
        .unwrap();
        let params = code.parameters().unwrap();
        assert_eq!((params.n, params.k, params.d), (6, 2, 3));
    }

    #[test]
    fn solve_zero_rows() {
        assert_eq!(
            solve(&Matrix::zeros(2, 5)).unwrap_err(),
            CodeError::DegenerateCode
        );
        assert_eq!(
            solve(&Matrix::default()).unwrap_err(),
            CodeError::DegenerateCode
        );
    }
}
