//! Canonical encoding of UTXO records, the byte-strings a node feeds into its UTXO set hash.
//!
//! A record is serialized as
//!
//! ```text
//! txid (32 bytes, internal order) | vout (u32 LE) | header_code (u32 LE) | value (i64 LE) |
//! CompactSize(script length) | script_pubkey
//! ```
//!
//! where `header_code` packs the creation height and whether the output comes from a coinbase
//! transaction. Any change here changes every digest, so this layout must match the node byte for
//! byte.
//! # Example
//! ```
//! use muhash::accumulator::muhash::MuHash3072;
//! use muhash::accumulator::utxo::{Coin, OutPoint, TxOut, Utxo};
//!
//! let utxo = Utxo::new(
//!     OutPoint::new([1; 32], 0),
//!     Coin::new(TxOut::new(5_000_000_000, vec![0x51]), 4, true),
//! );
//! let mut acc = MuHash3072::new();
//! acc.insert_utxo(&utxo);
//! acc.remove(&utxo.serialize());
//! assert_eq!(acc, MuHash3072::new());
//! ```
use std::io::Write;

use bitcoin_hashes::hex;
#[cfg(feature = "with-serde")]
use serde::Deserialize;
#[cfg(feature = "with-serde")]
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
/// Reference to a transaction output.
pub struct OutPoint {
    /// The transaction id, in internal byte order (the reverse of how nodes print it).
    pub txid: [u8; 32],
    /// Index of the output inside that transaction.
    pub vout: u32,
}

impl OutPoint {
    pub fn new(txid: [u8; 32], vout: u32) -> Self {
        OutPoint { txid, vout }
    }

    /// Builds an outpoint from a txid as printed by a node or block explorer.
    /// # Example
    /// ```
    /// use muhash::accumulator::utxo::OutPoint;
    /// let outpoint = OutPoint::from_txid_hex(
    ///     "0000000000000000000000000000000000000000000000000000000000000001",
    ///     0,
    /// )
    /// .unwrap();
    /// assert_eq!(outpoint.txid[0], 1);
    /// ```
    pub fn from_txid_hex(txid: &str, vout: u32) -> Result<Self, hex::HexToArrayError> {
        let mut txid: [u8; 32] = hex::FromHex::from_hex(txid)?;
        txid.reverse();
        Ok(OutPoint { txid, vout })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub struct TxOut {
    /// Amount in satoshis.
    pub value: i64,
    pub script_pubkey: Vec<u8>,
}

impl TxOut {
    pub fn new(value: i64, script_pubkey: Vec<u8>) -> Self {
        TxOut {
            value,
            script_pubkey,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
/// An unspent output together with the metadata a node keeps for it.
pub struct Coin {
    pub output: TxOut,
    /// Height of the block that created this output. Only 31 bits are committed to.
    pub height: u32,
    pub is_coinbase: bool,
}

impl Coin {
    pub fn new(output: TxOut, height: u32, is_coinbase: bool) -> Self {
        Coin {
            output,
            height,
            is_coinbase,
        }
    }

    /// Header code is a compact commitment to the block height and whether or not this
    /// output was created by a coinbase transaction:
    ///
    /// ```text
    /// header_code = (height << 1) | is_coinbase
    /// ```
    pub fn header_code(&self) -> u32 {
        debug_assert!(self.height < 1 << 31, "height {} overflows", self.height);
        (self.height << 1) | self.is_coinbase as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
/// One member of the UTXO set.
pub struct Utxo {
    pub outpoint: OutPoint,
    pub coin: Coin,
}

impl Utxo {
    pub fn new(outpoint: OutPoint, coin: Coin) -> Self {
        Utxo { outpoint, coin }
    }

    /// Returns the canonical encoding of this record.
    pub fn serialize(&self) -> Vec<u8> {
        let script = &self.coin.output.script_pubkey;
        let mut buf = Vec::with_capacity(32 + 4 + 4 + 8 + 9 + script.len());
        buf.extend_from_slice(&self.outpoint.txid);
        buf.extend_from_slice(&self.outpoint.vout.to_le_bytes());
        buf.extend_from_slice(&self.coin.header_code().to_le_bytes());
        buf.extend_from_slice(&self.coin.output.value.to_le_bytes());
        push_compact_size(&mut buf, script.len() as u64);
        buf.extend_from_slice(script);
        buf
    }

    /// Writes the canonical encoding of this record to `writer`.
    pub fn write<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: Write,
    {
        writer.write_all(&self.serialize())
    }
}

/// Bitcoin's variable length integer: one byte below 0xfd, otherwise a marker byte followed by a
/// 2, 4 or 8 byte little-endian integer.
fn push_compact_size(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x10000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}
