use std::fmt;
use std::sync::OnceLock;

use log::{debug, warn};
use rustc_hash::FxHashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::CodeError;
use crate::row::{Row, RowSlice};
use crate::solver::{min_distance, Combinations};
use crate::Matrix;

/// Symbol emitted for every message bit of a block that could not be decoded
pub const PLACEHOLDER: char = '?';

/// A binary linear block code
///
/// Holds the generator matrix `G` (k by n) and the parity-check matrix `H` ((n - k) by n),
/// usually produced by [`solve`](crate::solve) or [`hamming`](crate::hamming). A code can also be
/// assembled by hand from its matrices, in which case the minimum distance is computed from `H`
/// the first time it is needed.
///
/// The table mapping each codeword to its message is built on first use and kept for the life
/// of the value. Replacing `G` with [`LinearCode::set_generator`] afterwards does not rebuild
/// it, so decoding keeps using the old codewords.
#[derive(Clone, Debug, Default)]
pub struct LinearCode {
    g_generator_matrix: Option<Matrix>,
    h_parity_check_matrix: Option<Matrix>,
    d_code_distance: OnceLock<usize>,
    codewords: OnceLock<FxHashMap<Row, Row>>,
}

/// The parameters of a code, in the usual `[n, k, d]` notation plus the code size `M = 2^k`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeParameters {
    /// codeword length
    pub n: usize,
    /// message length, i.e. the dimension of the code
    pub k: usize,
    /// number of codewords, saturating at `u128::MAX`
    pub m: u128,
    /// minimum distance
    pub d: usize,
}

/// The result of decoding a bit-stream
///
/// Blocks that failed detection or correction are replaced by [`PLACEHOLDER`] symbols and their
/// indices are listed in `flagged_blocks`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    message: String,
    flagged_blocks: Vec<usize>,
}

/// Splits `bits` into consecutive blocks of `size` bits
///
/// # Errors
///
/// If the length of `bits` is not a multiple of `size`, or `size` is zero
pub fn split_blocks(
    bits: &RowSlice,
    size: usize,
) -> Result<impl Iterator<Item = &RowSlice>, CodeError> {
    if size == 0 || bits.len() % size != 0 {
        return Err(CodeError::BlockLength {
            len: bits.len(),
            block: size,
        });
    }
    Ok(bits.as_slice().chunks_exact(size).map(RowSlice::new))
}

/// The `k`-bit messages in lexicographic order, first bit most significant
fn messages(k: usize) -> impl Iterator<Item = Row> {
    let count = u32::try_from(k)
        .ok()
        .and_then(|s| 1usize.checked_shl(s))
        .unwrap_or(usize::MAX);
    (0..count).map(move |m| (0..k).rev().map(|bit| (m >> bit) & 1 == 1).collect())
}

impl CodeParameters {
    /// Number of errors per block that are guaranteed to be detected
    #[inline]
    pub fn error_detection(&self) -> usize {
        self.d.saturating_sub(1)
    }

    /// Number of errors per block that are guaranteed to be corrected
    #[inline]
    pub fn error_correction(&self) -> usize {
        self.d.saturating_sub(1) / 2
    }

    /// Give the rate of information transfer, `k / n`
    #[inline]
    pub fn rate(&self) -> f64 {
        self.k as f64 / self.n as f64
    }

    /// the standard `[n,k,d]_q` notation
    pub fn n_k_d_q(&self) -> [usize; 4] {
        [self.n, self.k, self.d, 2]
    }
}

impl fmt::Display for CodeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Linear Code Parameters:")?;
        writeln!(f, "  - Code Length (n): {}", self.n)?;
        writeln!(f, "  - Code Dimension (k): {}", self.k)?;
        writeln!(f, "  - Code Size (M): {}", self.m)?;
        writeln!(f, "  - Delta (d): {}", self.d)?;
        writeln!(f, "  - Error Detection: {}", self.error_detection())?;
        write!(f, "  - Error Correction: {}", self.error_correction())
    }
}

impl Decoded {
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn into_message(self) -> String {
        self.message
    }

    /// Indices of the blocks replaced by placeholders
    #[inline]
    pub fn flagged_blocks(&self) -> &[usize] {
        &self.flagged_blocks
    }

    /// True if every block was decoded
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.flagged_blocks.is_empty()
    }

    fn push_message(&mut self, message: &RowSlice) {
        self.message.push_str(&message.to_bit_string());
    }

    fn push_placeholder(&mut self, index: usize, k: usize) {
        self.message.extend(std::iter::repeat(PLACEHOLDER).take(k));
        self.flagged_blocks.push(index);
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl LinearCode {
    /// Assembles a code from a generator matrix and a parity-check matrix
    ///
    /// The matrices are taken as given: `G` should have independent rows and `G · Hᵗ` should
    /// vanish mod 2.
    pub fn new(g: Matrix, h: Matrix) -> Self {
        LinearCode {
            g_generator_matrix: Some(g),
            h_parity_check_matrix: Some(h),
            ..Default::default()
        }
    }

    /// A code without a parity-check matrix, which can encode but not decode
    pub fn from_generator(g: Matrix) -> Self {
        LinearCode {
            g_generator_matrix: Some(g),
            ..Default::default()
        }
    }

    pub(crate) fn with_distance(g: Matrix, h: Matrix, d: usize) -> Self {
        LinearCode {
            g_generator_matrix: Some(g),
            h_parity_check_matrix: Some(h),
            d_code_distance: OnceLock::from(d),
            codewords: OnceLock::new(),
        }
    }

    /// Replaces the generator matrix. The codeword table, if already built, is kept as is.
    pub fn set_generator(&mut self, g: Matrix) {
        self.g_generator_matrix = Some(g);
    }

    /// Replaces the parity-check matrix. A distance already computed is kept as is.
    pub fn set_parity_check(&mut self, h: Matrix) {
        self.h_parity_check_matrix = Some(h);
    }

    pub fn generator(&self) -> Result<&Matrix, CodeError> {
        self.g_generator_matrix
            .as_ref()
            .ok_or(CodeError::MissingGenerator)
    }

    pub fn parity_check(&self) -> Result<&Matrix, CodeError> {
        self.h_parity_check_matrix
            .as_ref()
            .ok_or(CodeError::MissingParityCheck)
    }

    /// Codeword length `n`
    #[inline]
    pub fn length(&self) -> Result<usize, CodeError> {
        Ok(self.generator()?.cols())
    }

    /// Message length `k`
    #[inline]
    pub fn dimension(&self) -> Result<usize, CodeError> {
        Ok(self.generator()?.rows())
    }

    /// Minimum distance, computed from `H` on first request if it was not already known
    pub fn distance(&self) -> Result<usize, CodeError> {
        if let Some(&d) = self.d_code_distance.get() {
            return Ok(d);
        }
        let h = self.parity_check()?;
        Ok(*self.d_code_distance.get_or_init(|| min_distance(h)))
    }

    /// Is `G` of the form `(I | A)`
    pub fn is_systematic(&self) -> Result<bool, CodeError> {
        Ok(self.generator()?.is_systematic())
    }

    /// # Errors
    ///
    /// If either `G` or `H` has not been defined
    pub fn parameters(&self) -> Result<CodeParameters, CodeError> {
        let (k, n) = self.generator()?.shape();
        self.parity_check()?;
        let d = self.distance()?;
        let m = u32::try_from(k)
            .ok()
            .and_then(|s| 1u128.checked_shl(s))
            .unwrap_or(u128::MAX);
        Ok(CodeParameters { n, k, m, d })
    }

    /// The table of all codewords, mapped to the message that encodes to each
    ///
    /// Built by encoding all `2^k` messages the first time it is requested.
    pub fn codewords(&self) -> Result<&FxHashMap<Row, Row>, CodeError> {
        if let Some(table) = self.codewords.get() {
            return Ok(table);
        }
        let g = self.generator()?;
        debug!("enumerating the {} codewords", 1u128 << g.rows().min(127));
        let mut table = FxHashMap::default();
        for message in messages(g.rows()) {
            let codeword = g.try_row_mul(&message)?.mod2();
            table.insert(codeword, message);
        }
        Ok(self.codewords.get_or_init(|| table))
    }

    /// Encodes `message` block by block, `k` bits at a time
    ///
    /// # Errors
    ///
    /// If `G` is missing or the length of `message` is not a multiple of `k`
    pub fn encode(&self, message: &RowSlice) -> Result<Row, CodeError> {
        let g = self.generator()?;
        let mut out = Vec::with_capacity(message.len() / g.rows().max(1) * g.cols());
        for block in split_blocks(message, g.rows())? {
            out.extend(g.try_row_mul(block)?.mod2().into_vec());
        }
        Ok(out.into())
    }

    /// Computes the syndrome `H · blockᵗ mod 2`
    pub fn syndrome(&self, block: &RowSlice) -> Result<Row, CodeError> {
        Ok(self.parity_check()?.try_mul_vector(block)?.mod2())
    }

    fn message_for(&self, codeword: &Row, index: usize) -> Result<&Row, CodeError> {
        self.codewords()?
            .get(codeword)
            .ok_or(CodeError::UnknownCodeword { index })
    }

    /// Decodes `received`, replacing every block with a nonzero syndrome by placeholders
    ///
    /// # Errors
    ///
    /// If `G` or `H` is missing, the length of `received` is not a multiple of `n`, or a block
    /// with zero syndrome is not a codeword of `G`
    pub fn decode_detect(&self, received: &RowSlice) -> Result<Decoded, CodeError> {
        let (k, n) = self.generator()?.shape();
        self.parity_check()?;

        let mut decoded = Decoded {
            message: String::with_capacity(received.len() / n.max(1) * k),
            flagged_blocks: vec![],
        };
        for (index, block) in split_blocks(received, n)?.enumerate() {
            let block = block.mod2();
            if self.syndrome(&block)?.any() {
                debug!("block {} ({}) has a nonzero syndrome", index, block);
                decoded.push_placeholder(index, k);
            } else {
                decoded.push_message(self.message_for(&block, index)?);
            }
        }
        Ok(decoded)
    }

    /// Maps the syndrome of every error pattern of weight `1..=⌊(d-1)/2⌋` to that pattern
    pub fn syndrome_table(&self) -> Result<FxHashMap<Row, Row>, CodeError> {
        let n = self.length()?;
        let h = self.parity_check()?;
        let t = self.distance()?.saturating_sub(1) / 2;

        let mut table = FxHashMap::default();
        for weight in 1..=t.min(n) {
            for (syndrome, pattern) in syndromes_of_weight(h, n, weight)? {
                table.entry(syndrome).or_insert(pattern);
            }
        }
        debug!("syndrome table has {} entries for t = {}", table.len(), t);
        Ok(table)
    }

    /// Decodes `received`, correcting up to `⌊(d-1)/2⌋` errors per block
    ///
    /// Blocks whose syndrome matches no correctable error pattern are replaced by placeholders
    /// and reported with a warning; the remaining blocks are still decoded.
    ///
    /// # Errors
    ///
    /// As for [`LinearCode::decode_detect`]
    pub fn decode_correct(&self, received: &RowSlice) -> Result<Decoded, CodeError> {
        let (k, n) = self.generator()?.shape();
        let table = self.syndrome_table()?;

        let mut decoded = Decoded {
            message: String::with_capacity(received.len() / n.max(1) * k),
            flagged_blocks: vec![],
        };
        for (index, block) in split_blocks(received, n)?.enumerate() {
            let block = block.mod2();
            let syndrome = self.syndrome(&block)?;
            if syndrome.is_zero() {
                decoded.push_message(self.message_for(&block, index)?);
            } else if let Some(error) = table.get(&syndrome) {
                debug!("block {}: correcting error pattern {}", index, error);
                let corrected = block.try_sub(error)?.mod2();
                decoded.push_message(self.message_for(&corrected, index)?);
            } else {
                warn!(
                    "block {} ({}) has more errors than the code can correct",
                    index, block
                );
                decoded.push_placeholder(index, k);
            }
        }
        Ok(decoded)
    }

    /// [`LinearCode::encode`] on a bit-string
    pub fn encode_str(&self, bits: &str) -> Result<String, CodeError> {
        Ok(self.encode(&bits.parse::<Row>()?)?.to_bit_string())
    }

    /// [`LinearCode::decode_detect`] on a bit-string
    pub fn decode_detect_str(&self, bits: &str) -> Result<Decoded, CodeError> {
        self.decode_detect(&bits.parse::<Row>()?)
    }

    /// [`LinearCode::decode_correct`] on a bit-string
    pub fn decode_correct_str(&self, bits: &str) -> Result<Decoded, CodeError> {
        self.decode_correct(&bits.parse::<Row>()?)
    }
}

/// The syndrome of the error pattern with ones at `support`, paired with the pattern
fn error_syndrome(h: &Matrix, n: usize, support: Vec<usize>) -> Result<(Row, Row), CodeError> {
    let mut e = Row::zeros(n);
    for i in support {
        e[i] = 1;
    }
    Ok((h.try_mul_vector(&e)?.mod2(), e))
}

/// All weight-`weight` error patterns of length `n` with their syndromes, in lexicographic
/// order of their support
#[cfg(feature = "parallel")]
fn syndromes_of_weight(
    h: &Matrix,
    n: usize,
    weight: usize,
) -> Result<Vec<(Row, Row)>, CodeError> {
    Combinations::new(n, weight)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|support| error_syndrome(h, n, support))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn syndromes_of_weight(
    h: &Matrix,
    n: usize,
    weight: usize,
) -> Result<Vec<(Row, Row)>, CodeError> {
    Combinations::new(n, weight)
        .map(|support| error_syndrome(h, n, support))
        .collect()
}
