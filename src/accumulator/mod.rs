//! This module is the core of the library. It contains the accumulator and everything it's
//! built from.
//!
//! # [MuHash3072](muhash::MuHash3072)
//! The accumulator. It holds a single group element (kept as a fraction, so removals don't need
//! an inversion each) and can be updated, merged with other accumulators and finalized into a
//! [Digest](digest::Digest) at any point.
//!
//! ## Example
//! ```
//!   use muhash::accumulator::muhash::MuHash3072;
//!   // Create a new empty accumulator
//!   let mut acc = MuHash3072::new();
//!   // The newly created outputs
//!   acc.insert(b"utxo 1").insert(b"utxo 2");
//!   // The spent ones
//!   acc.remove(b"utxo 1");
//!
//!   // The order of operations doesn't matter, only what is left in the set
//!   let mut other = MuHash3072::new();
//!   other.insert(b"utxo 2");
//!   assert_eq!(acc.finalize(), other.finalize());
//! ```
//!
//! # UTXO records
//! Nodes hash each unspent output as a fixed serialization of its outpoint, height, coinbase
//! flag and output, see [utxo]. Digests are printed with their bytes reversed, see [digest].
//! ## Example
//! ```
//!   use muhash::accumulator::muhash::MuHash3072;
//!   use muhash::accumulator::utxo::{Coin, OutPoint, TxOut, Utxo};
//!
//!   let mut acc = MuHash3072::new();
//!   let mut txid = [0; 32];
//!   txid[0] = 1;
//!   acc.insert_utxo(&Utxo::new(
//!       OutPoint::new(txid, 0),
//!       Coin::new(TxOut::new(5_000_000_000, vec![0x51]), 4, false),
//!   ));
//!   assert_eq!(
//!       acc.finalize().to_string(),
//!       "0bd8912c3f3473daa632771a1865b2e4b02c8c30589faba9014094ffc0604140"
//!   );
//! ```
pub mod digest;
pub mod encoder;
pub mod muhash;
pub mod num3072;
pub mod utxo;
