//! [Digest] is the finalized value of a [MuHash3072](super::muhash::MuHash3072): the SHA-256 of
//! its canonical 384-byte state. It's just a wrapper around [[u8; 32]] with the byte-order
//! conventions of a Bitcoin node attached.
//!
//! Nodes print hashes like this one with their bytes reversed, so [Display] and [FromStr] work on
//! that reversed hex, and the string can be compared directly with what `gettxoutsetinfo muhash`
//! reports. [Digest::as_bytes] gives the bytes in the order SHA-256 produced them.
//! # Examples
//! Building from a str
//! ```
//! use std::str::FromStr;
//!
//! use muhash::accumulator::digest::Digest;
//! let digest = Digest::from_str(
//!     "10d312b100cbd32ada024a6646e40d3482fcff103668d2625f10002a607d5863",
//! )
//! .unwrap();
//! assert_eq!(digest.as_bytes()[0], 0x63);
//! assert_eq!(
//!     digest.to_string().as_str(),
//!     "10d312b100cbd32ada024a6646e40d3482fcff103668d2625f10002a607d5863"
//! );
//! ```
//! Building from a slice
//! ```
//! use muhash::accumulator::digest::Digest;
//! let digest1 = Digest::new([0; 32]);
//! // ... or ...
//! let digest2 = Digest::from([0; 32]);
//! assert_eq!(digest1, digest2);
//! ```
use std::convert::TryFrom;
use std::fmt::Debug;
use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;

use bitcoin_hashes::hex;
use bitcoin_hashes::sha256;
use bitcoin_hashes::Hash;
#[cfg(feature = "with-serde")]
use serde::Deserialize;
#[cfg(feature = "with-serde")]
use serde::Serialize;

#[derive(Eq, PartialEq, Copy, Clone, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
/// A 32 byte MuHash3072 digest, stored in hash output order.
/// # Example
/// ```
/// use muhash::accumulator::digest::Digest;
/// let mut bytes = [0; 32];
/// bytes[31] = 0xab;
/// let digest = Digest::new(bytes);
/// // Display reverses the bytes, like a node does
/// assert!(digest.to_string().starts_with("ab00"));
/// ```
pub struct Digest([u8; 32]);

impl Deref for Digest {
    type Target = [u8; 32];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        let mut s = String::new();
        for byte in self.0.iter().rev() {
            s.push_str(&format!("{byte:02x}"));
        }
        write!(f, "{s}")
    }
}

impl Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "Digest({self})")
    }
}

impl From<sha256::Hash> for Digest {
    fn from(hash: sha256::Hash) -> Self {
        Digest(hash.to_byte_array())
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }
}

impl From<&[u8; 32]> for Digest {
    fn from(bytes: &[u8; 32]) -> Self {
        Digest(*bytes)
    }
}

impl From<Digest> for [u8; 32] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl TryFrom<&str> for Digest {
    type Error = hex::HexToArrayError;
    fn try_from(digest: &str) -> Result<Self, Self::Error> {
        let mut inner: [u8; 32] = hex::FromHex::from_hex(digest)?;
        inner.reverse();
        Ok(Digest(inner))
    }
}

impl FromStr for Digest {
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Digest::try_from(s)
    }

    type Err = hex::HexToArrayError;
}

impl Digest {
    /// Creates a new Digest from the 32 bytes SHA-256 produced.
    pub fn new(inner: [u8; 32]) -> Self {
        Digest(inner)
    }

    /// The digest bytes in hash output order, i.e. the reverse of what [Display] prints.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
