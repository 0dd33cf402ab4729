//! [MuHash3072] is an incremental, order independent hash of a multiset of byte-strings.
//!
//! Each element is mapped to a residue modulo `2^3072 - 1103717` by the
//! [encoder](super::encoder), and the set is represented by the product of its elements. Since
//! multiplication commutes, inserting or removing elements in any order leads to the same
//! result, and two accumulators over disjoint sets multiply to one over their union.
//!
//! Removals are tracked as a separate denominator, so that inserting and removing both cost one
//! multiplication. The single modular inversion happens when the accumulator is finalized.
//! # Example
//! ```
//! use muhash::accumulator::muhash::MuHash3072;
//! let mut one = [0; 32];
//! one[0] = 1;
//! let mut two = [0; 32];
//! two[0] = 2;
//!
//! let mut acc = MuHash3072::new();
//! acc.insert(&[0; 32]).insert(&one).remove(&two);
//! assert_eq!(
//!     acc.finalize().to_string(),
//!     "10d312b100cbd32ada024a6646e40d3482fcff103668d2625f10002a607d5863"
//! );
//! ```
use std::io::Read;
use std::io::Write;
use std::iter::FromIterator;
use std::ops::DivAssign;
use std::ops::MulAssign;

use bitcoin_hashes::sha256;
use bitcoin_hashes::Hash;
use log::debug;
use log::trace;

use super::digest::Digest;
use super::encoder::encode;
use super::num3072::Num3072;
use super::num3072::BYTE_SIZE;
use super::utxo::Utxo;

#[derive(Debug, Clone)]
pub struct MuHash3072 {
    numerator: Num3072,
    denominator: Num3072,
}

impl MuHash3072 {
    /// Creates an accumulator for the empty set.
    /// # Example
    /// ```
    /// use muhash::accumulator::muhash::MuHash3072;
    /// let acc = MuHash3072::new();
    /// assert_eq!(
    ///     acc.finalize().to_string(),
    ///     "dd5ad2a105c2d29495f577245c357409002329b9f4d6182c0af3dc2f462555c8"
    /// );
    /// ```
    pub fn new() -> Self {
        MuHash3072 {
            numerator: Num3072::one(),
            denominator: Num3072::one(),
        }
    }

    /// Creates an accumulator for the set holding only `element`.
    pub fn from_element(element: &[u8]) -> Self {
        MuHash3072 {
            numerator: encode(element),
            denominator: Num3072::one(),
        }
    }

    /// Adds `element` to the set.
    pub fn insert(&mut self, element: &[u8]) -> &mut Self {
        self.numerator *= &encode(element);
        self
    }

    /// Removes `element` from the set. Nothing checks that it was inserted before; removing an
    /// element that isn't there leaves its inverse in the set, to be cancelled by a later insert.
    pub fn remove(&mut self, element: &[u8]) -> &mut Self {
        self.denominator *= &encode(element);
        self
    }

    /// Inserts every element of `elements`.
    pub fn insert_all<I>(&mut self, elements: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for element in elements {
            self.insert(element.as_ref());
        }
        self
    }

    pub fn insert_utxo(&mut self, utxo: &Utxo) -> &mut Self {
        self.insert(&utxo.serialize())
    }

    pub fn remove_utxo(&mut self, utxo: &Utxo) -> &mut Self {
        self.remove(&utxo.serialize())
    }

    /// Merges `other` into this accumulator. If both track disjoint sets, the result tracks
    /// their union. This is what lets a set be hashed in shards and joined afterwards.
    /// # Example
    /// ```
    /// use muhash::accumulator::muhash::MuHash3072;
    /// let mut left = MuHash3072::from_element(b"a");
    /// let right = MuHash3072::from_element(b"b");
    /// left.combine(&right);
    ///
    /// let mut both = MuHash3072::new();
    /// both.insert(b"a").insert(b"b");
    /// assert_eq!(left, both);
    /// ```
    pub fn combine(&mut self, other: &MuHash3072) -> &mut Self {
        self.numerator *= &other.numerator;
        self.denominator *= &other.denominator;
        self
    }

    /// Removes every element tracked by `other` from this accumulator.
    pub fn difference(&mut self, other: &MuHash3072) -> &mut Self {
        self.numerator *= &other.denominator;
        self.denominator *= &other.numerator;
        self
    }

    /// The group element this accumulator represents, `numerator / denominator`.
    ///
    /// # Panics
    /// If the denominator isn't invertible, which takes a corrupted state.
    pub fn state(&self) -> Num3072 {
        let mut state = self.numerator;
        state.divide(&self.denominator);
        state
    }

    /// Computes the digest of the current set: the SHA-256 of the 384-byte little-endian
    /// encoding of [MuHash3072::state]. This doesn't consume or change the accumulator, so it's
    /// fine to keep updating it afterwards.
    pub fn finalize(&self) -> Digest {
        let digest = Digest::from(sha256::Hash::hash(&self.state().to_le_bytes()));
        trace!("muhash finalized to {digest}");
        digest
    }

    /// Serializes this accumulator as its numerator followed by its denominator, 384 bytes
    /// little-endian each.
    pub fn write<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: Write,
    {
        writer.write_all(&self.numerator.to_le_bytes())?;
        writer.write_all(&self.denominator.to_le_bytes())
    }

    /// Reads an accumulator written by [MuHash3072::write].
    /// # Example
    /// ```
    /// use muhash::accumulator::muhash::MuHash3072;
    /// let mut acc = MuHash3072::new();
    /// acc.insert(b"a").remove(b"b");
    ///
    /// let mut buf = Vec::new();
    /// acc.write(&mut buf).unwrap();
    /// assert_eq!(buf.len(), 768);
    ///
    /// let read = MuHash3072::read(&mut buf.as_slice()).unwrap();
    /// assert_eq!(read, acc);
    /// ```
    pub fn read<R>(reader: &mut R) -> std::io::Result<Self>
    where
        R: Read,
    {
        let mut bytes = [0; BYTE_SIZE];
        reader.read_exact(&mut bytes)?;
        let numerator = Num3072::from_le_bytes(&bytes);
        reader.read_exact(&mut bytes)?;
        let denominator = Num3072::from_le_bytes(&bytes);

        if denominator.is_zero() {
            debug!("refusing to read a muhash state with a zero denominator");
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "muhash denominator is not invertible",
            ));
        }
        Ok(MuHash3072 {
            numerator,
            denominator,
        })
    }
}

#[cfg(feature = "parallel")]
impl MuHash3072 {
    /// Hashes `elements` on rayon's thread pool. Each worker accumulates the chunk it's handed,
    /// and partial accumulators are joined with [MuHash3072::combine].
    pub fn par_from_elements<T>(elements: &[T]) -> Self
    where
        T: AsRef<[u8]> + Sync,
    {
        use rayon::prelude::*;

        elements
            .par_iter()
            .fold(MuHash3072::new, |mut acc, element| {
                acc.insert(element.as_ref());
                acc
            })
            .reduce(MuHash3072::new, |mut left, right| {
                left.combine(&right);
                left
            })
    }
}

impl Default for MuHash3072 {
    fn default() -> Self {
        MuHash3072::new()
    }
}

/// Two accumulators are equal if they represent the same set, no matter how their fractions
/// are written.
impl PartialEq for MuHash3072 {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.numerator;
        left *= &other.denominator;
        let mut right = other.numerator;
        right *= &self.denominator;
        left == right
    }
}

impl Eq for MuHash3072 {}

impl MulAssign<&MuHash3072> for MuHash3072 {
    fn mul_assign(&mut self, rhs: &MuHash3072) {
        self.combine(rhs);
    }
}

impl DivAssign<&MuHash3072> for MuHash3072 {
    fn div_assign(&mut self, rhs: &MuHash3072) {
        self.difference(rhs);
    }
}

impl<T: AsRef<[u8]>> Extend<T> for MuHash3072 {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T: AsRef<[u8]>> FromIterator<T> for MuHash3072 {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut acc = MuHash3072::new();
        acc.insert_all(iter);
        acc
    }
}
