use crate::error::AlgebraError;
use rand::Rng;
use ref_cast::RefCast;
use std::fmt;
use std::ops::{Add, Deref, DerefMut, Index, IndexMut, Mul, Range, Rem, Sub};
use std::str::FromStr;

/// A field element. Values are integers which the code layer reduces mod 2.
pub type Element = i32;

/// A fixed-length vector of [`Element`]s
///
/// Arithmetic always produces a new `Row`; `set`, `push` and `add_assign_mod2` are the only
/// operations that mutate a row in place.
///
/// # Examples
///
/// ```
/// use lincode::Row;
///
/// let r: Row = "0110".parse().unwrap();
/// let s = Row::from(vec![1, 1, 1, 1]);
/// assert_eq!(r.try_add(&s).unwrap().mod2().to_bit_string(), "1001");
/// ```
///
/// # Note
///
/// Most read-only methods are implemented via dereferencing to [`RowSlice`], so they are also
/// available on sub-ranges such as `&row[2..5]`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Row(Vec<Element>);

/// A borrowed range of elements, the unsized counterpart of [`Row`]
#[derive(RefCast, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct RowSlice([Element]);

impl RowSlice {
    /// Wraps a plain slice of elements
    #[inline]
    pub fn new(elements: &[Element]) -> &Self {
        RowSlice::ref_cast(elements)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Element] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Element> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element> + '_ {
        self.0.iter_mut()
    }

    /// Returns an owned copy of the range
    #[inline]
    pub fn to_row(&self) -> Row {
        Row(self.0.to_vec())
    }

    /// Returns the element at `index`, or an error if it is out of range
    pub fn get(&self, index: usize) -> Result<Element, AlgebraError> {
        self.0
            .get(index)
            .copied()
            .ok_or(AlgebraError::IndexOutOfBounds {
                what: "element",
                index,
                len: self.len(),
            })
    }

    /// Sets the element at `index`
    pub fn set(&mut self, index: usize, value: Element) -> Result<(), AlgebraError> {
        let len = self.len();
        let slot = self.0.get_mut(index).ok_or(AlgebraError::IndexOutOfBounds {
            what: "element",
            index,
            len,
        })?;
        *slot = value;
        Ok(())
    }

    /// Truthiness of the row: true if any element is nonzero
    #[inline]
    pub fn any(&self) -> bool {
        self.0.iter().any(|&x| x != 0)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        !self.any()
    }

    /// Hamming weight, i.e. the number of elements that are 1 mod 2
    #[inline]
    pub fn weight(&self) -> usize {
        self.0.iter().filter(|&&x| x.rem_euclid(2) == 1).count()
    }

    #[inline]
    fn check_len(&self, other: &RowSlice) -> Result<(), AlgebraError> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(AlgebraError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            })
        }
    }

    /// Element-wise sum
    pub fn try_add(&self, other: &RowSlice) -> Result<Row, AlgebraError> {
        self.check_len(other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a + b).collect())
    }

    /// Element-wise difference
    pub fn try_sub(&self, other: &RowSlice) -> Result<Row, AlgebraError> {
        self.check_len(other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a - b).collect())
    }

    /// Multiplies every element by `k`
    pub fn scaled(&self, k: Element) -> Row {
        self.iter().map(|x| x * k).collect()
    }

    /// Reduces every element modulo `m`, always landing in `0..m`
    ///
    /// # Panics
    ///
    /// Panics if `m` is zero.
    pub fn modulo(&self, m: Element) -> Row {
        self.iter().map(|x| x.rem_euclid(m)).collect()
    }

    /// Shorthand for `modulo(2)`
    #[inline]
    pub fn mod2(&self) -> Row {
        self.modulo(2)
    }

    /// Integer dot product (not reduced)
    pub fn dot(&self, other: &RowSlice) -> Result<Element, AlgebraError> {
        self.check_len(other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a * b).sum())
    }

    /// Adds `other` into this row over GF(2), leaving every element in {0,1}
    pub fn add_assign_mod2(&mut self, other: &RowSlice) -> Result<(), AlgebraError> {
        self.check_len(other)?;
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            *a = (*a + *b).rem_euclid(2);
        }
        Ok(())
    }

    /// Returns a new row with the elements of `other` appended
    pub fn concat(&self, other: &RowSlice) -> Row {
        self.iter().chain(other.iter()).collect()
    }

    /// Renders the row as a string of `0`/`1` characters, reducing each element mod 2
    pub fn to_bit_string(&self) -> String {
        self.iter()
            .map(|x| if x.rem_euclid(2) == 1 { '1' } else { '0' })
            .collect()
    }
}

impl Index<usize> for RowSlice {
    type Output = Element;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for RowSlice {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Index<Range<usize>> for RowSlice {
    type Output = RowSlice;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        RowSlice::ref_cast(&self.0[index])
    }
}

impl IndexMut<Range<usize>> for RowSlice {
    fn index_mut(&mut self, index: Range<usize>) -> &mut Self::Output {
        RowSlice::ref_cast_mut(&mut self.0[index])
    }
}

impl fmt::Display for RowSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

impl Row {
    #[inline]
    pub fn new(elements: Vec<Element>) -> Self {
        Row(elements)
    }

    #[inline]
    pub fn zeros(len: usize) -> Self {
        Row(vec![0; len])
    }

    #[inline]
    pub fn ones(len: usize) -> Self {
        Row(vec![1; len])
    }

    /// The `index`-th standard basis vector of length `len`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn unit(len: usize, index: usize) -> Self {
        let mut row = Row::zeros(len);
        row.0[index] = 1;
        row
    }

    /// A random 0/1 row
    #[inline]
    pub fn random(rng: &mut impl Rng, len: usize) -> Self {
        (0..len).map(|_| rng.random::<bool>()).collect()
    }

    /// Appends an element, growing the row by one
    #[inline]
    pub fn push(&mut self, element: Element) {
        self.0.push(element);
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Element> {
        self.0
    }
}

impl Deref for Row {
    type Target = RowSlice;

    fn deref(&self) -> &Self::Target {
        RowSlice::ref_cast(&self.0)
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        RowSlice::ref_cast_mut(&mut self.0)
    }
}

impl AsRef<RowSlice> for Row {
    fn as_ref(&self) -> &RowSlice {
        self
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl From<Vec<Element>> for Row {
    fn from(value: Vec<Element>) -> Self {
        Row(value)
    }
}

impl From<&[Element]> for Row {
    fn from(value: &[Element]) -> Self {
        Row(value.to_vec())
    }
}

impl From<Row> for Vec<Element> {
    fn from(value: Row) -> Self {
        value.0
    }
}

impl FromIterator<Element> for Row {
    fn from_iter<T: IntoIterator<Item = Element>>(iter: T) -> Self {
        Row(Vec::from_iter(iter))
    }
}

impl FromIterator<bool> for Row {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        iter.into_iter().map(Element::from).collect()
    }
}

/// Parses a bit-string made only of `'0'` and `'1'`, with no separators
impl FromStr for Row {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(0),
                '1' => Ok(1),
                other => Err(AlgebraError::InvalidBit(other)),
            })
            .collect()
    }
}

impl Add for &Row {
    type Output = Row;

    /// # Panics
    ///
    /// Panics if the rows have different lengths. Use [`RowSlice::try_add`] to get an error
    /// instead.
    fn add(self, rhs: Self) -> Self::Output {
        match self.try_add(rhs) {
            Ok(row) => row,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Sub for &Row {
    type Output = Row;

    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    fn sub(self, rhs: Self) -> Self::Output {
        match self.try_sub(rhs) {
            Ok(row) => row,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Mul<Element> for &Row {
    type Output = Row;

    fn mul(self, rhs: Element) -> Self::Output {
        self.scaled(rhs)
    }
}

impl Rem<Element> for &Row {
    type Output = Row;

    fn rem(self, rhs: Element) -> Self::Output {
        self.modulo(rhs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn add_sub() {
        let r1 = Row::from(vec![1, 2, 3]);
        let r2 = Row::from(vec![4, 5, 6]);
        assert_eq!(&r1 + &r2, Row::from(vec![5, 7, 9]));
        assert_eq!(&r1 - &r2, Row::from(vec![-3, -3, -3]));
        assert_eq!((&r1 - &r2).mod2(), Row::from(vec![1, 1, 1]));
    }

    #[test]
    fn length_mismatch() {
        let r1 = Row::zeros(3);
        let r2 = Row::zeros(4);
        assert_eq!(
            r1.try_add(&r2),
            Err(AlgebraError::LengthMismatch { left: 3, right: 4 })
        );
        assert!(r1.try_sub(&r2).is_err());
        assert!(r1.dot(&r2).is_err());
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn add_operator_panics() {
        let _ = &Row::zeros(2) + &Row::zeros(5);
    }

    #[test]
    fn scale_and_modulo() {
        let r = Row::from(vec![1, 2, 3]);
        assert_eq!(&r * 3, Row::from(vec![3, 6, 9]));
        assert_eq!(&r % 2, Row::from(vec![1, 0, 1]));
        assert_eq!(Row::from(vec![-1, -2, 5]).modulo(3), Row::from(vec![2, 1, 2]));
    }

    #[test]
    fn truthiness_and_weight() {
        assert!(!Row::zeros(5).any());
        assert!(Row::zeros(5).is_zero());
        assert!(Row::unit(5, 3).any());
        assert_eq!(Row::from(vec![1, 2, 3, 0, 1]).weight(), 3);
    }

    #[test]
    fn get_set() {
        let mut r = Row::zeros(4);
        r.set(2, 1).unwrap();
        assert_eq!(r.get(2), Ok(1));
        assert_eq!(r[2], 1);
        assert_eq!(
            r.set(4, 1),
            Err(AlgebraError::IndexOutOfBounds {
                what: "element",
                index: 4,
                len: 4
            })
        );
        assert!(r.get(10).is_err());
    }

    #[test]
    fn push_and_concat() {
        let mut r = Row::from(vec![1, 0]);
        r.push(1);
        assert_eq!(r.len(), 3);
        let c = r.concat(&Row::from(vec![0, 0]));
        assert_eq!(c.to_bit_string(), "10100");
    }

    #[test]
    fn parse_bits() {
        let r: Row = "011100".parse().unwrap();
        assert_eq!(r, Row::from(vec![0, 1, 1, 1, 0, 0]));
        assert_eq!(r.to_bit_string(), "011100");
        assert_eq!("01a".parse::<Row>(), Err(AlgebraError::InvalidBit('a')));
        assert_eq!("0 1".parse::<Row>(), Err(AlgebraError::InvalidBit(' ')));
        assert!("".parse::<Row>().unwrap().is_empty());
    }

    #[test]
    fn add_assign_mod2_is_xor() {
        let mut rng = SmallRng::seed_from_u64(1);
        let a = Row::random(&mut rng, 40);
        let mut b = a.clone();
        b.add_assign_mod2(&a).unwrap();
        assert!(b.is_zero());

        let c = Row::random(&mut rng, 40);
        let mut d = a.clone();
        d.add_assign_mod2(&c).unwrap();
        for i in 0..40 {
            assert_eq!(d[i], a[i] ^ c[i]);
        }
    }

    #[test]
    fn sub_range() {
        let r: Row = "1100101".parse().unwrap();
        let s: &RowSlice = &r[2..5];
        assert_eq!(s.len(), 3);
        assert_eq!(s.to_bit_string(), "001");
        assert_eq!(format!("{}", r), "[1 1 0 0 1 0 1]");
    }
}
