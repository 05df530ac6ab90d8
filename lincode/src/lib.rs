//! `lincode` is a Rust library for building and operating binary linear block codes. Some
//! features include:
//! - rows and matrices of field elements with checked arithmetic, stacking, slicing and
//!   transposition
//! - Gauss-Jordan elimination over GF(2), rank and row-space bases
//! - derivation of a parity-check matrix from any generator, systematic or not
//! - exhaustive minimum distance search and the canonical Hamming codes
//! - encoding, and syndrome decoding with error detection or bounded error correction
//!
//! The main data structures provided by this crate are:
//! - [`Row`]: a fixed-length vector of integers, reduced mod 2 by the code layer
//! - [`Matrix`]: a matrix built from `Row`s, which implements the linear algebra
//! - [`LinearCode`]: a generator matrix, parity-check matrix and distance, produced by [`solve`]
//!   or [`hamming`]
//!
//! ```
//! use lincode::{solve, Matrix};
//!
//! let rows = Matrix::from_vecs(vec![
//!     vec![0, 1, 1, 1, 0, 0],
//!     vec![0, 1, 1, 0, 1, 1],
//!     vec![0, 0, 0, 1, 1, 1],
//! ]).unwrap();
//! let code = solve(&rows).unwrap();
//! let params = code.parameters().unwrap();
//! assert_eq!((params.n, params.k, params.d), (6, 2, 3));
//!
//! let sent = code.encode_str("1001").unwrap();
//! let mut received: Vec<char> = sent.chars().collect();
//! received[4] = if received[4] == '0' { '1' } else { '0' };
//! let received: String = received.into_iter().collect();
//! assert_eq!(code.decode_correct_str(&received).unwrap().message(), "1001");
//! ```

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::cast_possible_truncation,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod error;
pub mod linear_code;
pub mod matrix;
pub mod row;
pub mod solver;

pub use error::{AlgebraError, CodeError};
pub use linear_code::{split_blocks, CodeParameters, Decoded, LinearCode, PLACEHOLDER};
pub use matrix::{Matrix, RowOps, Span};
pub use row::{Element, Row, RowSlice};
pub use solver::{hamming, min_distance, parity_check_matrix, solve};
