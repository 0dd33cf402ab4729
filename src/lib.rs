//! # Muhash
//!
//! Muhash is a Rust implementation of MuHash3072, the incremental set hash Bitcoin nodes use to
//! commit to their UTXO set. It hashes an unordered multiset of byte-strings into a 32 byte
//! digest such that elements may be added and removed in any order, each update costs a single
//! multiplication in a large group, and the digest of a set never depends on how it was built.
//! When a block is connected its new outputs are inserted and its spent outputs are removed,
//! without touching the rest of the set.
//!
//! This library has all building blocks to compute a digest that agrees with a node's
//! `gettxoutsetinfo muhash`: the group arithmetic, the mapping from bytes to group elements, the
//! accumulator itself and the canonical encoding of UTXO records.
//!
//! For more information, check each module's documentation.

pub mod accumulator;
